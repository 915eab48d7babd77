use crate::*;

/// Handle to a material stored in a [`Materials`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

impl MaterialId{
    /// The placeholder material every arena starts with. Used for light-list geometry.
    pub const EMPTY: Self = MaterialId(0);
}

/// Owns every material of a scene; surfaces refer to entries by [`MaterialId`].
pub struct Materials{
    materials: Vec<Material>,
}

impl Default for Materials{
    fn default() -> Self{
        Self::new()
    }
}

impl Materials{
    pub fn new() -> Self{
        Self{materials: vec![Material::Empty]}
    }
    pub fn add(&mut self, material: Material) -> MaterialId{
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }
    pub fn get(&self, id: MaterialId) -> &Material{
        &self.materials[id.0]
    }
    pub fn len(&self) -> usize{
        self.materials.len()
    }
    pub fn is_empty(&self) -> bool{
        self.materials.is_empty()
    }
}

/// How the next ray leaves a surface.
pub enum Scatter{
    /// A single deterministic-given-the-rng direction; no density applies.
    Specular(Ray),
    /// Direction is drawn from a density, possibly mixed with light sampling.
    Sampled(MaterialPdf),
}

pub struct ScatterRecord{
    pub attenuation: Color,
    pub scatter: Scatter,
}

pub enum Material{
    Empty,
    Lambertian{albedo: Texture},
    Metal{albedo: Color, fuzz: Float},
    Dielectric{refractive_index: Float},
    DiffuseLight{emit: Texture},
    Isotropic{albedo: Texture},
}

impl Material{
    pub fn lambertian(albedo: impl Into<Texture>) -> Self{
        Material::Lambertian{albedo: albedo.into()}
    }
    pub fn metal(albedo: Color, fuzz: Float) -> Self{
        Material::Metal{albedo, fuzz: fuzz.clamp(0.0, 1.0)}
    }
    pub fn dielectric(refractive_index: Float) -> Self{
        Material::Dielectric{refractive_index}
    }
    pub fn diffuse_light(emit: impl Into<Texture>) -> Self{
        Material::DiffuseLight{emit: emit.into()}
    }
    pub fn isotropic(albedo: impl Into<Texture>) -> Self{
        Material::Isotropic{albedo: albedo.into()}
    }

    pub fn scatter(&self, ray: &Ray, record: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterRecord>{
        match self{
            Material::Empty | Material::DiffuseLight{..} => None,
            Material::Lambertian{albedo} => Some(ScatterRecord{
                attenuation: albedo.value(record.uv, &record.p),
                scatter: Scatter::Sampled(MaterialPdf::Cosine(CosinePDF::new(&record.n))),
            }),
            Material::Isotropic{albedo} => Some(ScatterRecord{
                attenuation: albedo.value(record.uv, &record.p),
                scatter: Scatter::Sampled(MaterialPdf::Sphere(SpherePDF)),
            }),
            Material::Metal{albedo, fuzz} => {
                let reflected = reflect(ray.dir, record.n).normalize()
                    + (*fuzz * Vector::random_unit_vector(rng));
                if reflected.dot(record.n) <= 0.0 {
                    return None;
                }
                Some(ScatterRecord{
                    attenuation: *albedo,
                    scatter: Scatter::Specular(Ray::at_time(record.p, reflected, ray.time)),
                })
            },
            Material::Dielectric{refractive_index} => {
                let ri = if record.front {refractive_index.recip()} else {*refractive_index};
                let unit = ray.dir.normalize();
                let cos = record.n.dot(-unit).min(1.0);
                let sin = (1.0 - cos*cos).sqrt();
                let cannot_refract = ri * sin > 1.0;
                let dir = if cannot_refract || reflectance(cos, ri) > rng.gen::<Float>(){
                    reflect(unit, record.n)
                } else{
                    refract(unit, record.n, ri)
                };
                Some(ScatterRecord{
                    attenuation: Color::ONE,
                    scatter: Scatter::Specular(Ray::at_time(record.p, dir, ray.time)),
                })
            },
        }
    }

    /// Density of the material itself scattering toward `scattered`.
    pub fn scattering_pdf(&self, record: &HitRecord, scattered: &Ray) -> Float{
        match self{
            Material::Lambertian{..} => {
                let cos = record.n.dot(scattered.dir.normalize());
                0f64.max(cos*FRAC_1_PI)
            },
            Material::Isotropic{..} => 0.25*FRAC_1_PI,
            _ => 0.0,
        }
    }

    pub fn emitted(&self, record: &HitRecord, uv: UV, p: &Point) -> Color{
        match self{
            Material::DiffuseLight{emit} if record.front => emit.value(uv, p),
            _ => Color::ZERO,
        }
    }
}

/// Schlick's approximation of Fresnel reflectance.
pub fn reflectance(cos: Float, ri: Float) -> Float{
    let r0 = {
        let rt = (1.-ri)/(1.+ri);
        rt*rt
    };
    r0 + (1.0-r0)*(1.0 - cos).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn record_facing_up() -> HitRecord {
        let ray = Ray::new(Point::new(0.0, 1.0, 0.0), -Vector::Y);
        HitRecord::new(&ray, 1.0, Point::ZERO, Vector::Y, UV::new(0.25, 0.75), MaterialId::EMPTY)
    }

    #[test]
    fn test_arena_starts_with_empty() {
        let mut materials = Materials::new();
        assert!(matches!(materials.get(MaterialId::EMPTY), Material::Empty));
        let id = materials.add(Material::dielectric(1.5));
        assert_ne!(id, MaterialId::EMPTY);
        assert!(matches!(materials.get(id), Material::Dielectric{..}));
        assert_eq!(materials.len(), 2);
    }

    #[test]
    fn test_lambertian_samples_cosine_pdf() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let record = record_facing_up();
        let mat = Material::lambertian(Color::new(0.5, 0.25, 1.0));
        let ray = Ray::new(Point::new(0.0, 1.0, 0.0), -Vector::Y);
        let scatter = mat.scatter(&ray, &record, &mut rng).unwrap();
        assert_eq!(scatter.attenuation, Color::new(0.5, 0.25, 1.0));
        let Scatter::Sampled(pdf) = scatter.scatter else { panic!("lambertian must sample a pdf") };
        let dir = pdf.generate(&mut rng);
        assert!(dir.dot(record.n) >= 0.0);
        let scattered = Ray::new(record.p, dir);
        assert!((mat.scattering_pdf(&record, &scattered) - pdf.value(&dir)).abs() < 1e-9);
    }

    #[test]
    fn test_metal_reflects_and_absorbs() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let record = record_facing_up();
        let mirror = Material::metal(Color::ONE, 0.0);
        let ray = Ray::new(Point::new(-1.0, 1.0, 0.0), Vector::new(1.0, -1.0, 0.0));
        let scatter = mirror.scatter(&ray, &record, &mut rng).unwrap();
        let Scatter::Specular(out) = scatter.scatter else { panic!("metal is specular") };
        assert!((out.dir - Vector::new(1.0, 1.0, 0.0).normalize()).length() < 1e-12);

        // Fully fuzzed metal at grazing incidence is sometimes absorbed.
        let fuzzy = Material::metal(Color::ONE, 1.0);
        let grazing = Ray::new(Point::new(-1.0, 0.01, 0.0), Vector::new(1.0, -0.01, 0.0));
        let absorbed = (0..1000).filter(|_| fuzzy.scatter(&grazing, &record, &mut rng).is_none()).count();
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_never_gains_energy() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let glass = Material::dielectric(1.5);
        for _ in 0..2000 {
            let normal = Vector::random_unit_vector(&mut rng);
            let dir = Vector::random_unit_vector(&mut rng);
            let ray = Ray::new(Point::ZERO - dir, dir);
            let record = HitRecord::new(&ray, 1.0, Point::ZERO, normal, UV::ZERO, MaterialId::EMPTY);
            let scatter = glass.scatter(&ray, &record, &mut rng).unwrap();
            assert!(scatter.attenuation.max_element() <= 1.0);
            let Scatter::Specular(out) = scatter.scatter else { panic!("glass is specular") };
            assert!((out.dir.length() - 1.0).abs() < 1e-6);
            assert!(out.dir.is_finite());
        }
        for i in 0..=100 {
            let cos = i as Float / 100.0;
            let r = reflectance(cos, 1.0 / 1.5);
            assert!((0.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn test_total_internal_reflection() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let glass = Material::dielectric(1.5);
        // Leaving the glass at a shallow angle.
        let dir = Vector::new(1.0, 0.2, 0.0).normalize();
        let ray = Ray::new(Point::ZERO - dir, dir);
        let record = HitRecord::new(&ray, 1.0, Point::ZERO, Vector::Y, UV::ZERO, MaterialId::EMPTY);
        assert!(!record.front);
        for _ in 0..100 {
            let scatter = glass.scatter(&ray, &record, &mut rng).unwrap();
            let Scatter::Specular(out) = scatter.scatter else { panic!("glass is specular") };
            assert!(out.dir.y < 0.0);
        }
    }

    #[test]
    fn test_diffuse_light_emits_on_front_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let light = Material::diffuse_light(Color::splat(4.0));
        let front = record_facing_up();
        assert!(light.scatter(&Ray::new(Point::Y, -Vector::Y), &front, &mut rng).is_none());
        assert_eq!(light.emitted(&front, front.uv, &front.p), Color::splat(4.0));

        let ray = Ray::new(Point::new(0.0, -1.0, 0.0), Vector::Y);
        let back = HitRecord::new(&ray, 1.0, Point::ZERO, Vector::Y, UV::ZERO, MaterialId::EMPTY);
        assert_eq!(light.emitted(&back, back.uv, &back.p), Color::ZERO);
    }

    #[test]
    fn test_isotropic_density() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let fog = Material::isotropic(Color::ONE);
        let record = record_facing_up();
        let ray = Ray::new(Point::Y, -Vector::Y);
        let scatter = fog.scatter(&ray, &record, &mut rng).unwrap();
        assert!(matches!(scatter.scatter, Scatter::Sampled(MaterialPdf::Sphere(_))));
        assert!((fog.scattering_pdf(&record, &Ray::new(Point::ZERO, -Vector::Z)) - 1.0 / (4.0 * PI)).abs() < 1e-12);
    }
}
