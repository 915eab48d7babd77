use crate::*;

/// Rotation about the vertical axis, in degrees.
pub struct RotateY{
    sin: Float,
    cos: Float,
    bbox: AABB,
    object: Box<Surface>
}

impl RotateY{
    pub fn new(object: Surface, degrees: Float) -> Self{
        let theta = degrees.to_radians();
        let sin = theta.sin();
        let cos = theta.cos();
        let (min, max) = object.bounding_box().corners()
            .map(|corner| Self::rotate(sin, cos, corner))
            .fold((Point::splat(INFINITY), Point::splat(NEG_INFINITY)), |(min, max), p| (min.min(p), max.max(p)));
        let bbox = AABB::enclosing_point(&min, &max);
        Self{sin, cos, bbox, object: Box::new(object)}
    }
    /// Object space to world space.
    fn rotate(sin: Float, cos: Float, p: Vector) -> Vector{
        Vector::new(cos*p.x + sin*p.z, p.y, -sin*p.x + cos*p.z)
    }
    fn to_world(&self, p: Vector) -> Vector{
        Self::rotate(self.sin, self.cos, p)
    }
    fn to_object(&self, p: Vector) -> Vector{
        Vector::new(self.cos*p.x - self.sin*p.z, p.y, self.sin*p.x + self.cos*p.z)
    }
    pub fn bounding_box(&self) -> &AABB {
        &self.bbox
    }
    pub fn hit(&self, ray: &Ray, t:&Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        let rotated_ray = Ray{orig: self.to_object(ray.orig), dir: self.to_object(ray.dir), ..*ray};
        self.object.hit(&rotated_ray, t, rng).map(|record| {
            let p = self.to_world(record.p);
            let n = self.to_world(record.n);
            HitRecord{p, n, ..record}
        })
    }
    pub fn pdf_value(&self, orig: &Point, dir: &Vector) -> Float{
        self.object.pdf_value(&self.to_object(*orig), &self.to_object(*dir))
    }
    pub fn random(&self, orig: &Point, rng: &mut dyn RngCore) -> Vector{
        self.to_world(self.object.random(&self.to_object(*orig), rng))
    }
}
