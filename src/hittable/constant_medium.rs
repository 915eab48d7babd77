use crate::*;

/// Homogeneous participating medium filling a convex boundary.
pub struct ConstantMedium{
    boundary: Box<Surface>,
    neg_inv_density: Float,
    phase_function: MaterialId
}

impl ConstantMedium{
    /// `phase_function` should be an isotropic material registered in the scene's arena.
    pub fn new(boundary: Surface, density: Float, phase_function: MaterialId) -> Self{
        let neg_inv_density = -density.recip();
        Self{
            boundary: Box::new(boundary),
            neg_inv_density,
            phase_function,
        }
    }
    pub fn bounding_box(&self) -> &AABB {
        self.boundary.bounding_box()
    }
    pub fn hit(&self, ray: &Ray, t:&Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        let entry = self.boundary.hit(ray, &Interval::ALL, rng)?;
        let exit = self.boundary.hit(ray, &Interval::new(entry.t+0.0001, INFINITY), rng)?;

        let t_prev = t.min.max(entry.t);
        let t_next = t.max.min(exit.t);
        if t_prev >= t_next {
            return None;
        }
        let t_prev = t_prev.max(0.0);
        let ray_length = ray.dir.length();
        let distance_inside_boundary = (t_next-t_prev)*ray_length;
        let hit_distance = self.neg_inv_density * (1.0 - rng.gen::<Float>()).ln();
        if hit_distance > distance_inside_boundary{
            return None;
        }
        let t = t_prev + hit_distance/ray_length;
        // Normal and face are arbitrary inside a volume.
        Some(HitRecord{
            p: ray.at(t),
            n: Vector::X,
            t,
            mat: self.phase_function,
            front: true,
            uv: UV::ZERO,
        })
    }
}
