use crate::*;

/// A direction sampling strategy together with its density.
pub trait PDF{
    /// Density over solid angle of `generate` producing `dir`.
    fn value(&self, dir: &Vector) -> Float;
    fn generate(&self, rng: &mut dyn RngCore) -> Vector;
}

#[derive(Clone, Copy, Debug)]
pub struct SpherePDF;

impl PDF for SpherePDF{
    fn value(&self, _dir: &Vector) -> Float{
        0.25 * FRAC_1_PI
    }
    fn generate(&self, rng: &mut dyn RngCore) -> Vector {
        Vector::random_unit_vector(rng)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CosinePDF{
    onb: ONB
}

impl CosinePDF{
    pub fn new(dir: &Vector) -> Self{
        let onb = ONB::new(dir);
        Self{onb}
    }
}

impl PDF for CosinePDF{
    fn value(&self, dir: &Vector) -> Float {
        let cos = dir.normalize().dot(self.onb.w);
        0f64.max(cos*FRAC_1_PI)
    }
    fn generate(&self, rng: &mut dyn RngCore) -> Vector {
        self.onb.transform(&Vector::random_cosine_z(rng))
    }
}

/// The densities a material can hand back from `scatter`.
#[derive(Clone, Copy, Debug)]
pub enum MaterialPdf{
    Cosine(CosinePDF),
    Sphere(SpherePDF),
}

impl PDF for MaterialPdf{
    fn value(&self, dir: &Vector) -> Float {
        match self{
            MaterialPdf::Cosine(pdf) => pdf.value(dir),
            MaterialPdf::Sphere(pdf) => pdf.value(dir),
        }
    }
    fn generate(&self, rng: &mut dyn RngCore) -> Vector {
        match self{
            MaterialPdf::Cosine(pdf) => pdf.generate(rng),
            MaterialPdf::Sphere(pdf) => pdf.generate(rng),
        }
    }
}

/// Samples directions from `orig` toward a surface, usually the light list.
pub struct HittablePDF<'a>{
    objects: &'a Surface,
    orig: Point
}

impl<'a> HittablePDF<'a>{
    pub fn new(objects: &'a Surface, orig: Point)->Self{
        Self{objects,orig}
    }
}

impl<'a> PDF for HittablePDF<'a> {
    fn value(&self, dir: &Vector) -> Float {
        self.objects.pdf_value(&self.orig, dir)
    }
    fn generate(&self, rng: &mut dyn RngCore) -> Vector {
        self.objects.random(&self.orig, rng)
    }
}

/// Picks `right` with probability `t` and `left` otherwise.
pub struct MixturePDF<'a> {
    left: &'a dyn PDF,
    right: &'a dyn PDF,
    t: Float,
}

impl<'a> MixturePDF<'a> {
    pub fn new(left: &'a dyn PDF, right: &'a dyn PDF, t: Float) -> Self {
        Self { left, right, t: t.clamp(0.0, 1.0) }
    }
}

impl<'a> PDF for MixturePDF<'a> {
    fn value(&self, dir: &Vector) -> Float {
        self.t * self.right.value(dir) + (1.-self.t) * self.left.value(dir)
    }
    fn generate(&self, rng: &mut dyn RngCore) -> Vector {
        if rng.gen::<Float>() < self.t {self.right.generate(rng)} else {self.left.generate(rng)}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SAMPLES: usize = 200_000;

    /// Monte Carlo estimate of the integral of `pdf` over the unit sphere.
    fn integrate(pdf: &dyn PDF, rng: &mut ChaCha8Rng) -> Float {
        let sum: Float = (0..SAMPLES)
            .map(|_| pdf.value(&Vector::random_unit_vector(rng)))
            .sum();
        4.0 * PI * sum / SAMPLES as Float
    }

    #[test]
    fn test_sphere_pdf_normalized() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let estimate = integrate(&SpherePDF, &mut rng);
        assert!((estimate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_pdf_normalized() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let pdf = CosinePDF::new(&Vector::new(0.2, 1.0, -0.4));
        let estimate = integrate(&pdf, &mut rng);
        assert!((estimate - 1.0).abs() < 0.02, "estimate {estimate}");
    }

    #[test]
    fn test_cosine_pdf_samples_match_density() {
        // Mean cosine under a cos/pi density is 2/3.
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let normal = Vector::new(0.0, 0.0, 1.0);
        let pdf = CosinePDF::new(&normal);
        let mean: Float = (0..SAMPLES).map(|_| pdf.generate(&mut rng).dot(normal)).sum::<Float>() / SAMPLES as Float;
        assert!((mean - 2.0 / 3.0).abs() < 0.01, "mean {mean}");
    }

    #[test]
    fn test_quad_light_pdf_normalized() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let light = Surface::from(Quad::new(
            Point::new(-1.0, 2.0, -1.0),
            Vector::new(2.0, 0.0, 0.0),
            Vector::new(0.0, 0.0, 2.0),
            MaterialId::EMPTY,
        ));
        let pdf = HittablePDF::new(&light, Point::ZERO);
        let estimate = integrate(&pdf, &mut rng);
        assert!((estimate - 1.0).abs() < 0.05, "estimate {estimate}");
    }

    #[test]
    fn test_sphere_light_pdf_normalized() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let light = Surface::from(Sphere::new(Point::new(0.0, 3.0, 0.0), 1.5, MaterialId::EMPTY));
        let pdf = HittablePDF::new(&light, Point::ZERO);
        let estimate = integrate(&pdf, &mut rng);
        assert!((estimate - 1.0).abs() < 0.05, "estimate {estimate}");
    }

    #[test]
    fn test_mixture_is_weighted_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let cosine = CosinePDF::new(&Vector::Y);
        let sphere = SpherePDF;
        let mix = MixturePDF::new(&cosine, &sphere, 0.5);
        let dir = Vector::new(0.3, 0.8, 0.1).normalize();
        let expected = 0.5 * cosine.value(&dir) + 0.5 * sphere.value(&dir);
        assert!((mix.value(&dir) - expected).abs() < 1e-12);
        let estimate = integrate(&mix, &mut rng);
        assert!((estimate - 1.0).abs() < 0.02, "estimate {estimate}");

        // Weight 0 never consults the right-hand density.
        let only_left = MixturePDF::new(&cosine, &sphere, 0.0);
        assert!((only_left.value(&dir) - cosine.value(&dir)).abs() < 1e-12);
        for _ in 0..100 {
            assert!(only_left.generate(&mut rng).dot(Vector::Y) >= 0.0);
        }
    }
}
