use crate::*;
pub mod sphere;
pub mod quad;
pub mod hittable_list;
pub mod rotate;
pub mod translate;
pub mod constant_medium;

pub use sphere::*;
pub use quad::*;
pub use hittable_list::*;
pub use rotate::*;
pub use translate::*;
pub use constant_medium::*;

/// Anything a ray can hit.
///
/// Only surfaces placed in a light list need a meaningful `pdf_value` and
/// `random`; the rest report zero density and a fixed direction.
pub enum Surface{
    Sphere(Sphere),
    Quad(Quad),
    List(HittableList),
    Bvh(BVHNode),
    Translate(Translate),
    RotateY(RotateY),
    Medium(ConstantMedium),
}

impl Surface{
    pub fn hit(&self, ray: &Ray, t: &Interval, rng: &mut dyn RngCore) -> Option<HitRecord>{
        match self{
            Surface::Sphere(s) => s.hit(ray, t),
            Surface::Quad(q) => q.hit(ray, t),
            Surface::List(l) => l.hit(ray, t, rng),
            Surface::Bvh(b) => b.hit(ray, t, rng),
            Surface::Translate(tr) => tr.hit(ray, t, rng),
            Surface::RotateY(r) => r.hit(ray, t, rng),
            Surface::Medium(m) => m.hit(ray, t, rng),
        }
    }
    pub fn bounding_box(&self) -> &AABB{
        match self{
            Surface::Sphere(s) => s.bounding_box(),
            Surface::Quad(q) => q.bounding_box(),
            Surface::List(l) => l.bounding_box(),
            Surface::Bvh(b) => b.bounding_box(),
            Surface::Translate(tr) => tr.bounding_box(),
            Surface::RotateY(r) => r.bounding_box(),
            Surface::Medium(m) => m.bounding_box(),
        }
    }
    /// Solid-angle density of `random` choosing direction `dir` from `orig`.
    pub fn pdf_value(&self, orig: &Point, dir: &Vector) -> Float{
        match self{
            Surface::Sphere(s) => s.pdf_value(orig, dir),
            Surface::Quad(q) => q.pdf_value(orig, dir),
            Surface::List(l) => l.pdf_value(orig, dir),
            Surface::Translate(tr) => tr.pdf_value(orig, dir),
            Surface::RotateY(r) => r.pdf_value(orig, dir),
            Surface::Bvh(_) | Surface::Medium(_) => 0.0,
        }
    }
    /// Direction (not normalized) from `orig` toward a random point on the surface.
    pub fn random(&self, orig: &Point, rng: &mut dyn RngCore) -> Vector{
        match self{
            Surface::Sphere(s) => s.random(orig, rng),
            Surface::Quad(q) => q.random(orig, rng),
            Surface::List(l) => l.random(orig, rng),
            Surface::Translate(tr) => tr.random(orig, rng),
            Surface::RotateY(r) => r.random(orig, rng),
            Surface::Bvh(_) | Surface::Medium(_) => Vector::X,
        }
    }
    pub fn translated(self, offset: Vector) -> Self{
        Surface::Translate(Translate::new(self, offset))
    }
    pub fn rotated_y(self, degrees: Float) -> Self{
        Surface::RotateY(RotateY::new(self, degrees))
    }
}

impl From<Sphere> for Surface{
    fn from(s: Sphere) -> Self{
        Surface::Sphere(s)
    }
}

impl From<Quad> for Surface{
    fn from(q: Quad) -> Self{
        Surface::Quad(q)
    }
}

impl From<HittableList> for Surface{
    fn from(l: HittableList) -> Self{
        Surface::List(l)
    }
}

impl From<BVHNode> for Surface{
    fn from(b: BVHNode) -> Self{
        Surface::Bvh(b)
    }
}

impl From<ConstantMedium> for Surface{
    fn from(m: ConstantMedium) -> Self{
        Surface::Medium(m)
    }
}
