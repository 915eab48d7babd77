use crate::*;

/// Sphere whose center moves linearly from `center` to `center + motion` over ray time [0, 1].
pub struct Sphere{
    center: Point,
    motion: Vector,
    radius: Float,
    mat: MaterialId,
    bbox: AABB,
}

impl Sphere{
    pub fn new(center: Point, radius: Float, mat: MaterialId) -> Self{
        let radius = radius.max(0.0);
        let r = Vector::splat(radius);
        let bbox = AABB::enclosing_point(&(center - r), &(center + r));
        Sphere{center, motion: Vector::ZERO, radius, mat, bbox}
    }
    pub fn moving(center1: Point, center2: Point, radius: Float, mat: MaterialId) -> Self{
        let radius = radius.max(0.0);
        let r = Vector::splat(radius);
        let box1 = AABB::enclosing_point(&(center1 - r), &(center1 + r));
        let box2 = AABB::enclosing_point(&(center2 - r), &(center2 + r));
        let bbox = AABB::surrounding(&box1, &box2);
        Sphere{center: center1, motion: center2 - center1, radius, mat, bbox}
    }
    pub fn center_at(&self, time: Float) -> Point{
        self.center + time*self.motion
    }
    pub fn hit(&self, ray: &Ray, t:&Interval) -> Option<HitRecord>{
        let center = self.center_at(ray.time);
        let oc = center - ray.orig;
        let a = ray.dir.length_squared();
        let h = ray.dir.dot(oc);
        let c = oc.length_squared() - self.radius*self.radius;
        let discriminant = h*h - a*c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();
        let mut root = (h - sqrtd) / a;
        if !t.surrounds(root){
            root = (h + sqrtd) / a;
            if !t.surrounds(root){
                return None;
            }
        }
        let p = ray.at(root);
        let outward_normal = (p - center) / self.radius;
        Some(HitRecord::new(ray, root, p, outward_normal, Sphere::get_sphere_uv(&outward_normal), self.mat))
    }
    pub fn bounding_box(&self) -> &AABB {
        &self.bbox
    }
    /// Density of `random` over solid angle. From inside the sphere every
    /// direction is equally likely.
    pub fn pdf_value(&self, orig: &Point, dir: &Vector) -> Float{
        let distance_squared = (self.center_at(0.0) - *orig).length_squared();
        if distance_squared <= self.radius*self.radius{
            return 0.25*FRAC_1_PI;
        }
        let probe = Ray::new(*orig, *dir);
        if self.hit(&probe, &Interval::new(0.001, INFINITY)).is_none(){
            return 0.0;
        }
        let cos_max = (1.0 - self.radius*self.radius/distance_squared).max(0.0).sqrt();
        let solid_angle = 2.0*PI*(1.0 - cos_max);
        solid_angle.recip()
    }
    pub fn random(&self, orig: &Point, rng: &mut dyn RngCore) -> Vector{
        let direction = self.center_at(0.0) - *orig;
        let distance_squared = direction.length_squared();
        if distance_squared <= self.radius*self.radius{
            return Vector::random_unit_vector(rng);
        }
        let onb = ONB::new(&direction);
        onb.transform(&Vector::random_to_sphere(rng, self.radius, distance_squared))
    }
    fn get_sphere_uv(p: &Point) -> UV{
        let t = (-p.y).acos();
        let f = (-p.z).atan2(p.x) + PI;
        let u = f/(2.*PI);
        let v = t/PI;
        UV{x:u, y:v}
    }
}
