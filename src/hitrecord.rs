use crate::*;

#[derive(Clone, Copy, Debug)]
pub struct HitRecord{
    pub p: Point,
    pub n: Vector,
    pub t: Float,
    pub mat: MaterialId,
    pub front: bool,
    pub uv: UV,
}

impl HitRecord{
    /// Builds a record whose normal faces against `ray`; `outward_normal` must be unit length.
    pub fn new(ray: &Ray, t: Float, p: Point, outward_normal: Vector, uv: UV, mat: MaterialId) -> Self{
        let mut record = Self{p, n: outward_normal, t, mat, front: true, uv};
        record.set_face_normal(ray, outward_normal);
        record
    }
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vector) -> &Self{
        self.front = outward_normal.dot(ray.dir) < 0.;
        self.n =   if self.front {outward_normal} else {-outward_normal};
        self
    }
}
