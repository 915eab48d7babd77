use crate::*;

/// Axis-aligned box between two opposite corners, as six outward-facing quads.
pub fn make_box(a: Point, b: Point, mat: MaterialId) -> HittableList {
    let mut sides:HittableList  = HittableList::new();
    let min = a.min(b);
    let max = a.max(b);

    let dx = Vector::new(max.x - min.x, 0.0, 0.0);
    let dy = Vector::new(0.0, max.y - min.y, 0.0);
    let dz = Vector::new(0.0, 0.0, max.z - min.z);

    sides.add(Quad::new(Point::new(min.x, min.y, max.z), dx, dy, mat)); // front
    sides.add(Quad::new(Point::new(max.x, min.y, max.z), -dz, dy, mat)); // right
    sides.add(Quad::new(Point::new(max.x, min.y, min.z), -dx, dy, mat)); // back
    sides.add(Quad::new(Point::new(min.x, min.y, min.z), dz, dy, mat)); // left
    sides.add(Quad::new(Point::new(min.x, max.y, max.z), dx, -dz, mat)); // top
    sides.add(Quad::new(Point::new(min.x, min.y, min.z), dx, dz, mat));  // bottom
    sides
}

/// Parallelogram spanned by edges `u` and `v` from corner `q`.
pub struct Quad{
    q: Point,
    u: Vector,
    v: Vector,
    n: Vector,
    w: Vector,
    d: Float,
    area: Float,
    mat: MaterialId,
    bbox: AABB,
}

impl Quad{
    pub fn new(q: Point, u:Vector, v:Vector, mat:MaterialId)->Self{
        let a = AABB::enclosing_point(&q, &(q+u+v));
        let b = AABB::enclosing_point(&(q+u), &(q+v));
        let bbox = AABB::surrounding(&a, &b);
        let normal = u.cross(v);
        let area = normal.length();
        // Zero-area quads keep a finite plane so that hit() just misses.
        let (n, w) = if area > 0.0 {
            (normal/area, normal/normal.length_squared())
        } else {
            (Vector::Y, Vector::ZERO)
        };
        let d = n.dot(q);
        Self{q, u, v, n, w, d, area, mat, bbox}
    }
    fn is_interior(a: Float, b: Float) -> Option<UV> {
        if !Interval::UNIT.contains(a) || !Interval::UNIT.contains(b) {
            None
        } else {
            Some(UV{x:a,y:b})
        }
    }
    pub fn hit(&self, ray: &Ray, t:&Interval) -> Option<HitRecord> {
        let denom = ray.dir.dot(self.n);
        if denom.abs() < 1e-8 || self.area == 0.0 {
            return None;
        }
        let root = (self.d - self.n.dot(ray.orig))/denom;
        if !t.contains(root){
            return None;
        }
        let p = ray.at(root);
        let planar_p = p - self.q;
        let alpha = self.w.dot(planar_p.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_p));
        Quad::is_interior(alpha, beta).map(|uv| HitRecord::new(ray, root, p, self.n, uv, self.mat))
    }
    pub fn bounding_box(&self) -> &AABB {
        &self.bbox
    }
    pub fn pdf_value(&self, orig: &Point, dir: &Vector) -> Float{
        let probe = Ray::new(*orig, *dir);
        match self.hit(&probe, &Interval::new(0.001, INFINITY)){
            None => 0.0,
            Some(record) => {
                let distance_squared = record.t*record.t*dir.length_squared();
                let cos = (dir.dot(record.n)/dir.length()).abs();
                distance_squared/(cos*self.area)
            }
        }
    }
    pub fn random(&self, orig: &Point, rng: &mut dyn RngCore) -> Vector{
        let p = self.q + rng.gen::<Float>()*self.u + rng.gen::<Float>()*self.v;
        p - *orig
    }
}
