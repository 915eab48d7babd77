use crate::*;

#[derive(Default)]
pub struct HittableList{
    pub objects: Vec<Surface>,
    pub bbox: AABB,
}

impl HittableList{
    pub fn new() -> Self{
        HittableList{objects:Vec::new(), bbox:AABB::NONE}
    }
    pub fn add(&mut self, object: impl Into<Surface>) {
        let object = object.into();
        self.bbox = AABB::surrounding(&self.bbox, object.bounding_box());
        self.objects.push(object);
    }
    pub fn len(&self) -> usize{
        self.objects.len()
    }
    pub fn is_empty(&self) -> bool{
        self.objects.is_empty()
    }
    pub fn hit(&self, ray: &Ray, t:&Interval, rng: &mut dyn RngCore) -> Option<HitRecord>{
        // Only closer objects are permitted after each iteration
        let mut t_least = t.max;
        let mut closest = None;
        for object in &self.objects{
            if let Some(record) = object.hit(ray, &t.up_to(t_least), rng){
                t_least = record.t;
                closest = Some(record);
            }
        }
        closest
    }
    pub fn bounding_box(&self) -> &AABB {
        &self.bbox
    }
    /// Mean of the members' densities: `random` picks each member with equal odds.
    pub fn pdf_value(&self, orig: &Point, dir: &Vector) -> Float{
        if self.objects.is_empty(){
            return 0.0;
        }
        let weight = (self.objects.len() as Float).recip();
        self.objects.iter().map(|object| weight*object.pdf_value(orig, dir)).sum()
    }
    pub fn random(&self, orig: &Point, rng: &mut dyn RngCore) -> Vector{
        if self.objects.is_empty(){
            return Vector::X;
        }
        let index = rng.gen_range(0..self.objects.len());
        self.objects[index].random(orig, rng)
    }
}
