use crate::*;
pub struct Translate{
    offset: Vector,
    object: Box<Surface>,
    bbox: AABB
}

impl Translate{
    pub fn new(object: Surface, offset: Vector) -> Self{
        let bbox = object.bounding_box() + &offset;
        Self{object: Box::new(object), offset, bbox}
    }
    pub fn bounding_box(&self) -> &AABB {
        &self.bbox
    }
    pub fn hit(&self, ray: &Ray, t:&Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        let offset_ray = Ray{orig:ray.orig-self.offset, ..*ray};
        self.object.hit(&offset_ray, t, rng).map(|r| HitRecord{p:r.p+self.offset, ..r})
    }
    pub fn pdf_value(&self, orig: &Point, dir: &Vector) -> Float{
        self.object.pdf_value(&(*orig - self.offset), dir)
    }
    pub fn random(&self, orig: &Point, rng: &mut dyn RngCore) -> Vector{
        self.object.random(&(*orig - self.offset), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_translate_moves_hit_and_box() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let sphere = Surface::from(Sphere::new(Point::ZERO, 1.0, MaterialId::EMPTY));
        let moved = sphere.translated(Vector::new(10.0, 0.0, 0.0));
        assert_eq!(moved.bounding_box().x, Interval::new(9.0, 11.0));

        let ray = Ray::new(Point::new(10.0, 0.0, 5.0), -Vector::Z);
        let hit = moved.hit(&ray, &Interval::new(0.001, INFINITY), &mut rng).unwrap();
        assert!((hit.p - Point::new(10.0, 0.0, 1.0)).length() < 1e-9);
        assert!((hit.t - 4.0).abs() < 1e-9);

        let ray = Ray::new(Point::new(0.0, 0.0, 5.0), -Vector::Z);
        assert!(moved.hit(&ray, &Interval::new(0.001, INFINITY), &mut rng).is_none());
    }
}
