use rayon::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use log::{debug, info};
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::*;

/// Everything the camera needs before rendering; read-only once the render starts.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig{
    pub aspect_ratio: Float,
    pub image_width: usize,
    pub samples_per_pixel: usize,
    pub max_depth: usize,
    pub vfov: Float,
    pub lookfrom: Point,
    pub lookat: Point,
    pub vup: Vector,
    pub defocus_angle: Float,
    pub focus_dist: Float,
    pub background: Color,
    /// Probability of sampling toward the light list instead of the material.
    pub light_weight: Float,
    pub seed: u64,
}

impl Default for CameraConfig{
    fn default() -> Self{
        Self{
            aspect_ratio: 16.0/9.0,
            image_width: 1920,
            samples_per_pixel: 100,
            max_depth: 50,
            vfov: 20.0,
            lookfrom: Point::new(13.0, 2.0, 3.0),
            lookat: Point::ZERO,
            vup: Vector::Y,
            defocus_angle: 0.6,
            focus_dist: 10.0,
            background: Color::new(0.7, 0.8, 1.0),
            light_weight: 0.5,
            seed: 0,
        }
    }
}

pub struct Camera{
    background: Color,
    image_width: usize,
    image_height: usize,
    samples_per_pixel: usize,
    max_depth: usize,
    inverse_density: Float,
    light_weight: Float,
    seed: u64,
    center: Point,
    pixel_corner: Point,
    pixel_delta_u: Vector,
    pixel_delta_v: Vector,
    defocus_disk_u: Vector,
    defocus_disk_v: Vector,
    defocus_angle: Float,
}

impl Camera{
    pub fn new(config: &CameraConfig) -> Self {
        debug!("Initializing camera with parameters:");
        debug!("  - Look From: {}", config.lookfrom);
        debug!("  - Look At: {}", config.lookat);
        debug!("  - View Up: {}", config.vup);
        debug!("  - Vertical FOV: {}", config.vfov);
        debug!("  - Aspect Ratio: {}", config.aspect_ratio);
        debug!("  - Image Width: {}", config.image_width);
        debug!("  - Samples per Pixel: {}", config.samples_per_pixel);
        debug!("  - Max Depth: {}", config.max_depth);
        debug!("  - Defocus Angle: {}", config.defocus_angle);
        debug!("  - Focus Distance: {}", config.focus_dist);
        debug!("  - Background Color: {}", config.background);
        debug!("  - Light Weight: {}", config.light_weight);
        debug!("  - Seed: {}", config.seed);

        let image_width = config.image_width.max(1);
        let image_height = ((image_width as Float/config.aspect_ratio) as usize).max(1);
        let samples_per_pixel = config.samples_per_pixel.max(1);
        let inverse_density = (samples_per_pixel as Float).recip();

        let center = config.lookfrom;
        let focus_dist = config.focus_dist;
        let w = (config.lookfrom-config.lookat).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);
        let h = (config.vfov/2.).to_radians().tan();
        let viewport_h = 2.0*h*focus_dist;
        let viewport_w = viewport_h*(image_width as Float/image_height as Float);
        let viewport_u = viewport_w * u;
        let viewport_v = viewport_h * -v;
        let pixel_delta_u = viewport_u/image_width as Float;
        let pixel_delta_v = viewport_v/image_height as Float;
        let viewport_upper_left = center - (focus_dist*w) - 0.5*(viewport_u+viewport_v);
        let pixel_corner = viewport_upper_left + 0.5*(pixel_delta_v+pixel_delta_u);

        let defocus_radius = focus_dist * (config.defocus_angle/2.).to_radians().tan();
        let defocus_disk_u = defocus_radius * u;
        let defocus_disk_v = defocus_radius * v;
        Camera{
            background: config.background,
            image_width,
            image_height,
            samples_per_pixel,
            max_depth: config.max_depth,
            inverse_density,
            light_weight: config.light_weight,
            seed: config.seed,
            center,
            pixel_corner,
            pixel_delta_u,
            pixel_delta_v,
            defocus_disk_u,
            defocus_disk_v,
            defocus_angle: config.defocus_angle,
        }
    }
    pub fn image_width(&self) -> usize{
        self.image_width
    }
    pub fn image_height(&self) -> usize{
        self.image_height
    }
    /// Renders rows in parallel. Each row draws from its own generator keyed by
    /// the seed and row index, so output does not depend on scheduling.
    pub fn render(&self, scene: &Scene) -> Raster {
        info!("Rendering {}x{} at {} samples per pixel", self.image_width, self.image_height, self.samples_per_pixel);
        let remaining = AtomicUsize::new(self.image_height);
        let mut data = vec![[0u8; 3]; self.image_height*self.image_width];
        data.par_chunks_mut(self.image_width).enumerate().for_each(|(j, row)| {
            let mut rng = self.row_rng(j);
            for (i, pixel) in row.iter_mut().enumerate() {
                *pixel = to_rgb8(self.pixel_color(i, j, scene, &mut rng));
            }
            let left = remaining.fetch_sub(1, Ordering::Relaxed) - 1;
            debug!("Scanlines remaining: {}", left);
        });
        info!("Finished rendering");
        Raster::new(self.image_width, self.image_height, data)
    }
    fn row_rng(&self, row: usize) -> ChaCha8Rng{
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(row as u64);
        rng
    }
    /// Linear radiance averaged over all samples of pixel (i, j).
    pub fn pixel_color(&self, i: usize, j: usize, scene: &Scene, rng: &mut dyn RngCore) -> Color{
        (0..self.samples_per_pixel)
            .map(|_| {
                let ray = self.get_ray(i, j, rng);
                sanitize(self.ray_color(&ray, scene, self.max_depth, rng))
            })
            .sum::<Color>()*self.inverse_density
    }
    pub fn ray_color(&self, ray: &Ray, scene: &Scene, depth: usize, rng: &mut dyn RngCore) -> Color{
        if depth==0{
            return Color::ZERO;
        }
        let Some(record) = scene.world.hit(ray, &Interval::new(0.001, INFINITY), rng) else {
            return self.background;
        };
        let material = scene.materials.get(record.mat);
        let emission = material.emitted(&record, record.uv, &record.p);
        let Some(scatter) = material.scatter(ray, &record, rng) else {
            return emission;
        };
        match scatter.scatter{
            Scatter::Specular(scattered) =>
                emission + scatter.attenuation * self.ray_color(&scattered, scene, depth-1, rng),
            Scatter::Sampled(material_pdf) => {
                let (dir, pdf_value) = match &scene.lights{
                    Some(lights) => {
                        let light_pdf = HittablePDF::new(lights, record.p);
                        let mixture = MixturePDF::new(&material_pdf, &light_pdf, self.light_weight);
                        let dir = mixture.generate(rng);
                        (dir, mixture.value(&dir))
                    },
                    None => {
                        let dir = material_pdf.generate(rng);
                        (dir, material_pdf.value(&dir))
                    },
                };
                if !(pdf_value > 0.0 && pdf_value.is_finite()){
                    return emission;
                }
                let scattered = Ray::at_time(record.p, dir, ray.time);
                let scattering_pdf = material.scattering_pdf(&record, &scattered);
                let incoming = self.ray_color(&scattered, scene, depth-1, rng);
                emission + scatter.attenuation * scattering_pdf * incoming / pdf_value
            },
        }
    }
    pub fn get_ray(&self, i:usize, j:usize, rng: &mut dyn RngCore) -> Ray{
        let offset = Vector::random_on_pixel(rng);
        let pixel_sample = self.pixel_corner + ((i as Float + offset.x) * self.pixel_delta_u) + ((j as Float + offset.y) * self.pixel_delta_v);
        let ray_origin = if self.defocus_angle > 0. {self.defocus_disk_sample(rng)} else {self.center};
        let ray_direction = pixel_sample - ray_origin;
        Ray::at_time(ray_origin, ray_direction, rng.gen())
    }
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point{
        let p = Point::random_on_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

/// Zeroes NaN and infinite components so one bad sample cannot poison a pixel.
fn sanitize(c: Color) -> Color{
    Color::new(
        if c.x.is_finite() {c.x} else {0.0},
        if c.y.is_finite() {c.y} else {0.0},
        if c.z.is_finite() {c.z} else {0.0},
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> CameraConfig {
        CameraConfig{
            aspect_ratio: 1.0,
            image_width: 16,
            samples_per_pixel: 4,
            max_depth: 8,
            vfov: 40.0,
            lookfrom: Point::new(0.0, 0.0, 5.0),
            lookat: Point::ZERO,
            vup: Vector::Y,
            defocus_angle: 0.0,
            focus_dist: 5.0,
            background: Color::new(0.25, 0.49, 1.0),
            light_weight: 0.5,
            seed: 1234,
        }
    }

    fn sphere_scene(material: Material) -> Scene {
        let mut materials = Materials::new();
        let mat = materials.add(material);
        let mut world = HittableList::new();
        world.add(Sphere::new(Point::ZERO, 1.0, mat));
        Scene::new(materials, world, HittableList::new())
    }

    #[test]
    fn test_sanitize() {
        let c = sanitize(Color::new(Float::NAN, INFINITY, 0.5));
        assert_eq!(c, Color::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_image_height_derived_from_aspect() {
        let camera = Camera::new(&CameraConfig{image_width: 400, aspect_ratio: 16.0/9.0, ..small_config()});
        assert_eq!(camera.image_height(), 225);
        let tiny = Camera::new(&CameraConfig{image_width: 1, aspect_ratio: 4.0, ..small_config()});
        assert_eq!(tiny.image_height(), 1);
    }

    #[test]
    fn test_center_ray_points_at_lookat() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let camera = Camera::new(&CameraConfig{image_width: 101, aspect_ratio: 1.0, ..small_config()});
        let ray = camera.get_ray(50, 50, &mut rng);
        assert_eq!(ray.orig, Point::new(0.0, 0.0, 5.0));
        let dir = ray.dir.normalize();
        assert!(dir.dot(-Vector::Z) > 0.999);
        assert!((0.0..1.0).contains(&ray.time));
    }

    #[test]
    fn test_defocus_jitters_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let camera = Camera::new(&CameraConfig{defocus_angle: 10.0, ..small_config()});
        let radius = 5.0 * (5.0 as Float).to_radians().tan();
        let origins: Vec<Point> = (0..50).map(|_| camera.get_ray(8, 8, &mut rng).orig).collect();
        assert!(origins.iter().any(|o| *o != Point::new(0.0, 0.0, 5.0)));
        assert!(origins.iter().all(|o| (*o - Point::new(0.0, 0.0, 5.0)).length() <= radius + 1e-12));
    }

    #[test]
    fn test_empty_view_renders_background() {
        // The only object sits behind the camera.
        let mut materials = Materials::new();
        let mat = materials.add(Material::lambertian(Color::splat(0.5)));
        let mut world = HittableList::new();
        world.add(Sphere::new(Point::new(0.0, 0.0, 20.0), 1.0, mat));
        let scene = Scene::new(materials, world, HittableList::new());

        let raster = Camera::new(&small_config()).render(&scene);
        assert_eq!(raster.width(), 16);
        assert_eq!(raster.height(), 16);
        assert!(raster.pixels().iter().all(|p| *p == [128, 179, 255]));
    }

    #[test]
    fn test_single_bounce_lambertian_sphere() {
        let scene = sphere_scene(Material::lambertian(Color::splat(0.5)));
        let config = CameraConfig{samples_per_pixel: 1, max_depth: 1, ..small_config()};
        let raster = Camera::new(&config).render(&scene);
        // With one bounce the scattered ray is never traced, so the sphere is black.
        assert_eq!(raster.pixel(8, 8), [0, 0, 0]);
        assert_eq!(raster.pixel(0, 0), [128, 179, 255]);
        // Deterministic for a fixed seed.
        let again = Camera::new(&config).render(&scene);
        assert_eq!(raster, again);
    }

    #[test]
    fn test_depth_zero_is_black() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let scene = sphere_scene(Material::lambertian(Color::ONE));
        let camera = Camera::new(&small_config());
        let ray = Ray::new(Point::new(0.0, 0.0, 5.0), -Vector::Z);
        assert_eq!(camera.ray_color(&ray, &scene, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_white_furnace() {
        // A white diffuse sphere under a uniform sky reflects the sky exactly.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let scene = sphere_scene(Material::lambertian(Color::ONE));
        let camera = Camera::new(&CameraConfig{background: Color::ONE, ..small_config()});
        let ray = Ray::new(Point::new(0.0, 0.0, 5.0), -Vector::Z);
        for _ in 0..50 {
            let c = camera.ray_color(&ray, &scene, 8, &mut rng);
            assert!((c - Color::ONE).length() < 1e-9, "{c}");
        }
    }

    #[test]
    fn test_light_sampling_sees_emitter() {
        // Diffuse floor lit by a small quad light in a black world.
        let mut materials = Materials::new();
        let floor = materials.add(Material::lambertian(Color::splat(0.8)));
        let lamp = materials.add(Material::diffuse_light(Color::splat(10.0)));
        let mut world = HittableList::new();
        world.add(Quad::new(Point::new(-10.0, 0.0, -10.0), Vector::new(20.0, 0.0, 0.0), Vector::new(0.0, 0.0, 20.0), floor));
        // Facing down.
        world.add(Quad::new(Point::new(-0.5, 3.0, -0.5), Vector::new(1.0, 0.0, 0.0), Vector::new(0.0, 0.0, 1.0), lamp));
        let mut lights = HittableList::new();
        lights.add(Quad::new(Point::new(-0.5, 3.0, -0.5), Vector::new(1.0, 0.0, 0.0), Vector::new(0.0, 0.0, 1.0), MaterialId::EMPTY));
        let lit = Scene::new(materials, world, lights);

        let config = CameraConfig{background: Color::ZERO, ..small_config()};
        let camera = Camera::new(&config);
        let ray = Ray::new(Point::new(0.0, 1.0, 2.0), Vector::new(0.0, -1.0, -2.0));
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let n = 4000;
        let mean = (0..n).map(|_| camera.ray_color(&ray, &lit, 4, &mut rng)).sum::<Color>() / n as Float;
        assert!(mean.x > 0.0);
        assert!(mean.is_finite());
    }

    #[test]
    fn test_light_weight_does_not_bias_estimate() {
        // Same floor-and-lamp setup; every mixture weight must converge to the same radiance.
        let build = || {
            let mut materials = Materials::new();
            let floor = materials.add(Material::lambertian(Color::splat(0.8)));
            let lamp = materials.add(Material::diffuse_light(Color::splat(10.0)));
            let (corner, u, v) = (Point::new(-0.5, 3.0, -0.5), Vector::new(1.0, 0.0, 0.0), Vector::new(0.0, 0.0, 1.0));
            let mut world = HittableList::new();
            world.add(Quad::new(Point::new(-10.0, 0.0, -10.0), Vector::new(20.0, 0.0, 0.0), Vector::new(0.0, 0.0, 20.0), floor));
            world.add(Quad::new(corner, u, v, lamp));
            let mut lights = HittableList::new();
            lights.add(Quad::new(corner, u, v, MaterialId::EMPTY));
            Scene::new(materials, world, lights)
        };
        let scene = build();
        let ray = Ray::new(Point::new(0.0, 1.0, 2.0), Vector::new(0.0, -1.0, -2.0));
        let n = 200_000;
        let means: Vec<Float> = [0.0, 0.5, 1.0].iter().map(|&light_weight| {
            let camera = Camera::new(&CameraConfig{background: Color::ZERO, light_weight, ..small_config()});
            let mut rng = ChaCha8Rng::seed_from_u64(21);
            (0..n).map(|_| camera.ray_color(&ray, &scene, 2, &mut rng).x).sum::<Float>() / n as Float
        }).collect();

        // Direct lighting only at depth 2: albedo/pi * Le * solid angle * cos, roughly 0.27.
        for mean in &means {
            assert!(*mean > 0.2 && *mean < 0.35, "mean {mean}");
        }
        for pair in means.windows(2) {
            assert!((pair[0] - pair[1]).abs() / pair[1] < 0.05, "means disagree: {means:?}");
        }
        assert!((means[0] - means[2]).abs() / means[2] < 0.05, "means disagree: {means:?}");
    }
}
