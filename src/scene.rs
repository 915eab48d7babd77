use log::{debug, info};
use std::fmt;
use crate::*;

/// Texture used by the globe scenes; a missing file renders as the fallback color.
pub const EARTH_TEXTURE: &str = "img/earthmap.jpg";

/// A renderable world: material arena, accelerated geometry and the light list.
pub struct Scene{
    pub materials: Materials,
    pub world: Surface,
    /// Geometry to importance-sample toward; `None` disables light sampling.
    pub lights: Option<Surface>,
}

impl Scene{
    pub fn new(materials: Materials, world: HittableList, lights: HittableList) -> Self{
        let count = world.len();
        let world = world.into_bvh();
        if let Surface::Bvh(node) = &world{
            debug!("Built BVH over {} surfaces: {} nodes, depth {}", count, node.node_count(), node.depth());
        }
        let lights = if lights.is_empty() {None} else {Some(Surface::List(lights))};
        Self{materials, world, lights}
    }
}

/// The demo scenes, numbered 1 to 10 on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoScene{
    RandomSpheres,
    TwoSpheres,
    Earth,
    TwoPerlinSpheres,
    Quads,
    SimpleLight,
    CornellBox,
    CornellSmoke,
    FinalScene,
    AnotherLastScene,
}

impl fmt::Display for DemoScene{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result{
        f.write_str(self.name())
    }
}

impl DemoScene{
    pub const ALL: [DemoScene; 10] = [
        DemoScene::RandomSpheres,
        DemoScene::TwoSpheres,
        DemoScene::Earth,
        DemoScene::TwoPerlinSpheres,
        DemoScene::Quads,
        DemoScene::SimpleLight,
        DemoScene::CornellBox,
        DemoScene::CornellSmoke,
        DemoScene::FinalScene,
        DemoScene::AnotherLastScene,
    ];

    /// One-based index, as used by the command line.
    pub fn from_index(index: usize) -> Option<Self>{
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
    pub fn name(&self) -> &'static str{
        match self{
            DemoScene::RandomSpheres => "random_spheres",
            DemoScene::TwoSpheres => "two_spheres",
            DemoScene::Earth => "earth",
            DemoScene::TwoPerlinSpheres => "two_perlin_spheres",
            DemoScene::Quads => "quads",
            DemoScene::SimpleLight => "simple_light",
            DemoScene::CornellBox => "cornell_box",
            DemoScene::CornellSmoke => "cornell_smoke",
            DemoScene::FinalScene => "final_scene",
            DemoScene::AnotherLastScene => "another_last_scene",
        }
    }
    /// Assembles the scene and adapts `base` to its framing.
    pub fn build(self, base: &CameraConfig, rng: &mut dyn RngCore) -> (Scene, CameraConfig){
        info!("Building scene {}", self);
        match self{
            DemoScene::RandomSpheres => random_spheres(base, rng, -15, 15),
            DemoScene::TwoSpheres => two_spheres(base),
            DemoScene::Earth => earth(base),
            DemoScene::TwoPerlinSpheres => two_perlin_spheres(base, rng),
            DemoScene::Quads => quads(base),
            DemoScene::SimpleLight => simple_light(base, rng),
            DemoScene::CornellBox => cornell_box(base),
            DemoScene::CornellSmoke => cornell_smoke(base),
            DemoScene::FinalScene => final_scene(base, rng),
            DemoScene::AnotherLastScene => another_last_scene(base),
        }
    }
}

fn cornell_camera(base: &CameraConfig) -> CameraConfig{
    CameraConfig{
        lookfrom: Point::new(278.0, 278.0, -800.0),
        lookat: Point::new(278.0, 278.0, 0.0),
        vfov: 40.0,
        defocus_angle: 0.0,
        background: Color::ZERO,
        ..base.clone()
    }
}

pub fn random_spheres(base: &CameraConfig, rng: &mut dyn RngCore, start: i32, end: i32) -> (Scene, CameraConfig){
    let mut materials = Materials::new();
    let mut world = HittableList::new();

    let checker = Texture::checkered_colors(0.32, Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9));
    let ground = materials.add(Material::lambertian(checker));
    world.add(Sphere::new(Point::new(0.0, -1000.0, 0.0), 1000.0, ground));

    let (mut metal, mut glass) = (0, 0);
    for a in start..end{
        for b in start..end{
            let choose_mat: Float = rng.gen();
            let center = Point::new(a as Float + 0.9*rng.gen::<Float>(), 0.2, b as Float + 0.9*rng.gen::<Float>());
            if (center - Point::new(4.0, 0.2, 0.0)).length() <= 0.9{
                continue;
            }
            if choose_mat < 0.8{
                let albedo = Color::random(rng) * Color::random(rng);
                let mat = materials.add(Material::lambertian(albedo));
                let center2 = center + Vector::new(0.0, rng.gen_range(0.0..0.5), 0.0);
                world.add(Sphere::moving(center, center2, 0.2, mat));
            } else if choose_mat < 0.95{
                metal += 1;
                let albedo = Color::random_range(rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                let mat = materials.add(Material::metal(albedo, fuzz));
                world.add(Sphere::new(center, 0.2, mat));
            } else {
                glass += 1;
                let mat = materials.add(Material::dielectric(1.5));
                world.add(Sphere::new(center, 0.2, mat));
            }
        }
    }
    debug!("Created {} spheres: {} metal, {} glass", world.len() - 1, metal, glass);

    let material1 = materials.add(Material::dielectric(1.5));
    world.add(Sphere::new(Point::new(0.0, 1.0, 0.0), 1.0, material1));
    let material2 = materials.add(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    world.add(Sphere::new(Point::new(-4.0, 1.0, 0.0), 1.0, material2));
    let material3 = materials.add(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    world.add(Sphere::new(Point::new(4.0, 1.0, 0.0), 1.0, material3));

    (Scene::new(materials, world, HittableList::new()), base.clone())
}

pub fn two_spheres(base: &CameraConfig) -> (Scene, CameraConfig){
    let mut materials = Materials::new();
    let mut world = HittableList::new();

    let checker = Texture::checkered_colors(0.8, Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9));
    let mat = materials.add(Material::lambertian(checker));
    world.add(Sphere::new(Point::new(0.0, 10.0, 0.0), 10.0, mat));
    world.add(Sphere::new(Point::new(0.0, -10.0, 0.0), 10.0, mat));

    (Scene::new(materials, world, HittableList::new()), base.clone())
}

pub fn earth(base: &CameraConfig) -> (Scene, CameraConfig){
    let mut materials = Materials::new();
    let mut world = HittableList::new();

    let earth_texture = Texture::Image(ImageTexture::open_or_fallback(EARTH_TEXTURE));
    let surface = materials.add(Material::lambertian(earth_texture));
    world.add(Sphere::new(Point::ZERO, 2.0, surface));

    let camera = CameraConfig{lookfrom: Point::new(0.0, 0.0, 12.0), ..base.clone()};
    (Scene::new(materials, world, HittableList::new()), camera)
}

pub fn two_perlin_spheres(base: &CameraConfig, rng: &mut dyn RngCore) -> (Scene, CameraConfig){
    let mut materials = Materials::new();
    let mut world = HittableList::new();

    let ground = materials.add(Material::lambertian(Texture::Noise(NoiseTexture::new(4.0, rng))));
    let ball = materials.add(Material::lambertian(Texture::Noise(NoiseTexture::new(4.0, rng))));
    world.add(Sphere::new(Point::new(0.0, -1000.0, 0.0), 1000.0, ground));
    world.add(Sphere::new(Point::new(0.0, 2.0, 0.0), 2.0, ball));

    let camera = CameraConfig{defocus_angle: 0.0, ..base.clone()};
    (Scene::new(materials, world, HittableList::new()), camera)
}

pub fn quads(base: &CameraConfig) -> (Scene, CameraConfig){
    let mut materials = Materials::new();
    let mut world = HittableList::new();

    let left_red = materials.add(Material::lambertian(Color::new(1.0, 0.2, 0.2)));
    let back_green = materials.add(Material::lambertian(Color::new(0.2, 1.0, 0.2)));
    let right_blue = materials.add(Material::lambertian(Color::new(0.2, 0.2, 1.0)));
    let upper_orange = materials.add(Material::lambertian(Color::new(1.0, 0.5, 0.0)));
    let lower_teal = materials.add(Material::lambertian(Color::new(0.2, 0.8, 0.8)));

    world.add(Quad::new(Point::new(-3.0, -2.0, 5.0), Vector::new(0.0, 0.0, -4.0), Vector::new(0.0, 4.0, 0.0), left_red));
    world.add(Quad::new(Point::new(-2.0, -2.0, 0.0), Vector::new(4.0, 0.0, 0.0), Vector::new(0.0, 4.0, 0.0), back_green));
    world.add(Quad::new(Point::new(3.0, -2.0, 1.0), Vector::new(0.0, 0.0, 4.0), Vector::new(0.0, 4.0, 0.0), right_blue));
    world.add(Quad::new(Point::new(-2.0, 3.0, 1.0), Vector::new(4.0, 0.0, 0.0), Vector::new(0.0, 0.0, 4.0), upper_orange));
    world.add(Quad::new(Point::new(-2.0, -3.0, 5.0), Vector::new(4.0, 0.0, 0.0), Vector::new(0.0, 0.0, -4.0), lower_teal));

    let camera = CameraConfig{
        lookfrom: Point::new(0.0, 0.0, 9.0),
        vfov: 80.0,
        defocus_angle: 0.0,
        ..base.clone()
    };
    (Scene::new(materials, world, HittableList::new()), camera)
}

pub fn simple_light(base: &CameraConfig, rng: &mut dyn RngCore) -> (Scene, CameraConfig){
    let mut materials = Materials::new();
    let mut world = HittableList::new();
    let mut lights = HittableList::new();

    let ground = materials.add(Material::lambertian(Texture::Noise(NoiseTexture::new(4.0, rng))));
    let ball = materials.add(Material::lambertian(Texture::Noise(NoiseTexture::new(4.0, rng))));
    world.add(Sphere::new(Point::new(0.0, -1000.0, 0.0), 1000.0, ground));
    world.add(Sphere::new(Point::new(0.0, 2.0, 0.0), 2.0, ball));

    let difflight = materials.add(Material::diffuse_light(Color::splat(4.0)));
    let (corner, u, v) = (Point::new(3.0, 1.0, -2.0), Vector::new(2.0, 0.0, 0.0), Vector::new(0.0, 2.0, 0.0));
    world.add(Sphere::new(Point::new(0.0, 7.0, 0.0), 2.0, difflight));
    world.add(Quad::new(corner, u, v, difflight));
    lights.add(Sphere::new(Point::new(0.0, 7.0, 0.0), 2.0, MaterialId::EMPTY));
    lights.add(Quad::new(corner, u, v, MaterialId::EMPTY));

    let camera = CameraConfig{
        lookfrom: Point::new(26.0, 3.0, 6.0),
        lookat: Point::new(0.0, 2.0, 0.0),
        defocus_angle: 0.0,
        ..base.clone()
    };
    (Scene::new(materials, world, lights), camera)
}

pub fn cornell_box(base: &CameraConfig) -> (Scene, CameraConfig){
    let mut materials = Materials::new();
    let mut world = HittableList::new();
    let mut lights = HittableList::new();

    let red = materials.add(Material::lambertian(Color::new(0.65, 0.05, 0.05)));
    let white = materials.add(Material::lambertian(Color::new(0.73, 0.73, 0.73)));
    let green = materials.add(Material::lambertian(Color::new(0.12, 0.45, 0.15)));
    let light = materials.add(Material::diffuse_light(Color::splat(15.0)));

    world.add(Quad::new(Point::new(555.0, 0.0, 0.0), Vector::new(0.0, 555.0, 0.0), Vector::new(0.0, 0.0, 555.0), green));
    world.add(Quad::new(Point::ZERO, Vector::new(0.0, 555.0, 0.0), Vector::new(0.0, 0.0, 555.0), red));
    world.add(Quad::new(Point::new(343.0, 554.0, 332.0), Vector::new(-130.0, 0.0, 0.0), Vector::new(0.0, 0.0, -105.0), light));
    world.add(Quad::new(Point::ZERO, Vector::new(555.0, 0.0, 0.0), Vector::new(0.0, 0.0, 555.0), white));
    world.add(Quad::new(Point::splat(555.0), Vector::new(-555.0, 0.0, 0.0), Vector::new(0.0, 0.0, -555.0), white));
    world.add(Quad::new(Point::new(0.0, 0.0, 555.0), Vector::new(555.0, 0.0, 0.0), Vector::new(0.0, 555.0, 0.0), white));

    let box1 = Surface::from(make_box(Point::ZERO, Point::new(165.0, 330.0, 165.0), white))
        .rotated_y(15.0)
        .translated(Vector::new(265.0, 0.0, 295.0));
    world.add(box1);
    let box2 = Surface::from(make_box(Point::ZERO, Point::splat(165.0), white))
        .rotated_y(-18.0)
        .translated(Vector::new(130.0, 0.0, 65.0));
    world.add(box2);

    lights.add(Quad::new(Point::new(343.0, 554.0, 332.0), Vector::new(-130.0, 0.0, 0.0), Vector::new(0.0, 0.0, -105.0), MaterialId::EMPTY));

    (Scene::new(materials, world, lights), cornell_camera(base))
}

pub fn cornell_smoke(base: &CameraConfig) -> (Scene, CameraConfig){
    let mut materials = Materials::new();
    let mut world = HittableList::new();
    let mut lights = HittableList::new();

    let red = materials.add(Material::lambertian(Color::new(0.65, 0.05, 0.05)));
    let white = materials.add(Material::lambertian(Color::new(0.73, 0.73, 0.73)));
    let green = materials.add(Material::lambertian(Color::new(0.12, 0.45, 0.15)));
    let light = materials.add(Material::diffuse_light(Color::splat(7.0)));

    let (corner, u, v) = (Point::new(113.0, 554.0, 127.0), Vector::new(330.0, 0.0, 0.0), Vector::new(0.0, 0.0, 305.0));
    world.add(Quad::new(Point::new(555.0, 0.0, 0.0), Vector::new(0.0, 555.0, 0.0), Vector::new(0.0, 0.0, 555.0), green));
    world.add(Quad::new(Point::ZERO, Vector::new(0.0, 555.0, 0.0), Vector::new(0.0, 0.0, 555.0), red));
    world.add(Quad::new(corner, u, v, light));
    world.add(Quad::new(Point::new(0.0, 555.0, 0.0), Vector::new(555.0, 0.0, 0.0), Vector::new(0.0, 0.0, 555.0), white));
    world.add(Quad::new(Point::ZERO, Vector::new(555.0, 0.0, 0.0), Vector::new(0.0, 0.0, 555.0), white));
    world.add(Quad::new(Point::new(0.0, 0.0, 555.0), Vector::new(555.0, 0.0, 0.0), Vector::new(0.0, 555.0, 0.0), white));

    let box1 = Surface::from(make_box(Point::ZERO, Point::new(165.0, 330.0, 165.0), white))
        .rotated_y(15.0)
        .translated(Vector::new(265.0, 0.0, 295.0));
    let box2 = Surface::from(make_box(Point::ZERO, Point::splat(165.0), white))
        .rotated_y(-18.0)
        .translated(Vector::new(130.0, 0.0, 65.0));

    let black_smoke = materials.add(Material::isotropic(Color::ZERO));
    let white_smoke = materials.add(Material::isotropic(Color::ONE));
    world.add(ConstantMedium::new(box1, 0.01, black_smoke));
    world.add(ConstantMedium::new(box2, 0.01, white_smoke));

    lights.add(Quad::new(corner, u, v, MaterialId::EMPTY));

    let camera = CameraConfig{samples_per_pixel: 200, ..cornell_camera(base)};
    (Scene::new(materials, world, lights), camera)
}

pub fn final_scene(base: &CameraConfig, rng: &mut dyn RngCore) -> (Scene, CameraConfig){
    let mut materials = Materials::new();
    let mut lights = HittableList::new();

    let mut boxes1 = HittableList::new();
    let ground = materials.add(Material::lambertian(Color::new(0.48, 0.83, 0.53)));
    let boxes_per_side = 20;
    for i in 0..boxes_per_side{
        for j in 0..boxes_per_side{
            let w = 100.0;
            let x0 = -1000.0 + i as Float * w;
            let z0 = -1000.0 + j as Float * w;
            let y0 = 0.0;
            let x1 = x0 + w;
            let y1 = rng.gen_range(1.0..101.0);
            let z1 = z0 + w;
            boxes1.add(make_box(Point::new(x0, y0, z0), Point::new(x1, y1, z1), ground));
        }
    }

    let mut world = HittableList::new();
    world.add(boxes1.into_bvh());

    let light = materials.add(Material::diffuse_light(Color::splat(7.0)));
    let (corner, u, v) = (Point::new(123.0, 554.0, 147.0), Vector::new(300.0, 0.0, 0.0), Vector::new(0.0, 0.0, 265.0));
    world.add(Quad::new(corner, u, v, light));
    lights.add(Quad::new(corner, u, v, MaterialId::EMPTY));

    let center1 = Point::new(400.0, 400.0, 200.0);
    let center2 = center1 + Vector::new(30.0, 0.0, 0.0);
    let sphere_material = materials.add(Material::lambertian(Color::new(0.7, 0.3, 0.1)));
    world.add(Sphere::moving(center1, center2, 50.0, sphere_material));

    let glass = materials.add(Material::dielectric(1.5));
    world.add(Sphere::new(Point::new(260.0, 150.0, 45.0), 50.0, glass));
    let metal = materials.add(Material::metal(Color::new(0.8, 0.8, 0.9), 1.0));
    world.add(Sphere::new(Point::new(0.0, 150.0, 145.0), 50.0, metal));

    let boundary = Point::new(360.0, 150.0, 145.0);
    world.add(Sphere::new(boundary, 70.0, glass));
    let blue_fog = materials.add(Material::isotropic(Color::new(0.2, 0.4, 0.9)));
    world.add(ConstantMedium::new(Sphere::new(boundary, 70.0, glass).into(), 0.2, blue_fog));
    let mist = materials.add(Material::isotropic(Color::ONE));
    world.add(ConstantMedium::new(Sphere::new(Point::ZERO, 5000.0, glass).into(), 0.0001, mist));

    let earth_texture = Texture::Image(ImageTexture::open_or_fallback(EARTH_TEXTURE));
    let emat = materials.add(Material::lambertian(earth_texture));
    world.add(Sphere::new(Point::new(400.0, 200.0, 400.0), 100.0, emat));
    let pertext = materials.add(Material::lambertian(Texture::Noise(NoiseTexture::new(0.1, rng))));
    world.add(Sphere::new(Point::new(220.0, 280.0, 300.0), 80.0, pertext));

    let mut boxes2 = HittableList::new();
    let white = materials.add(Material::lambertian(Color::splat(0.73)));
    for _ in 0..1000{
        boxes2.add(Sphere::new(Point::random_range(rng, 0.0, 165.0), 10.0, white));
    }
    world.add(boxes2.into_bvh().rotated_y(15.0).translated(Vector::new(-100.0, 270.0, 395.0)));

    let camera = CameraConfig{
        lookfrom: Point::new(478.0, 278.0, -600.0),
        ..cornell_camera(base)
    };
    (Scene::new(materials, world, lights), camera)
}

pub fn another_last_scene(base: &CameraConfig) -> (Scene, CameraConfig){
    let mut materials = Materials::new();
    let mut world = HittableList::new();
    let mut lights = HittableList::new();

    let red = materials.add(Material::lambertian(Color::new(0.65, 0.05, 0.05)));
    let white = materials.add(Material::lambertian(Color::new(0.73, 0.73, 0.73)));
    let green = materials.add(Material::lambertian(Color::new(0.12, 0.45, 0.15)));
    let light = materials.add(Material::diffuse_light(Color::splat(15.0)));

    world.add(Quad::new(Point::new(555.0, 0.0, 0.0), Vector::new(0.0, 0.0, 555.0), Vector::new(0.0, 555.0, 0.0), green));
    world.add(Quad::new(Point::new(0.0, 0.0, 555.0), Vector::new(0.0, 0.0, -555.0), Vector::new(0.0, 555.0, 0.0), red));
    world.add(Quad::new(Point::new(0.0, 555.0, 0.0), Vector::new(555.0, 0.0, 0.0), Vector::new(0.0, 0.0, 555.0), white));
    world.add(Quad::new(Point::new(0.0, 0.0, 555.0), Vector::new(555.0, 0.0, 0.0), Vector::new(0.0, 0.0, -555.0), white));
    world.add(Quad::new(Point::new(555.0, 0.0, 555.0), Vector::new(-555.0, 0.0, 0.0), Vector::new(0.0, 555.0, 0.0), white));

    world.add(Quad::new(Point::new(213.0, 554.0, 227.0), Vector::new(130.0, 0.0, 0.0), Vector::new(0.0, 0.0, 105.0), light));

    let box1 = Surface::from(make_box(Point::ZERO, Point::new(165.0, 330.0, 165.0), white))
        .rotated_y(15.0)
        .translated(Vector::new(265.0, 0.0, 295.0));
    world.add(box1);

    let glass = materials.add(Material::dielectric(1.5));
    world.add(Sphere::new(Point::new(190.0, 90.0, 190.0), 90.0, glass));

    lights.add(Quad::new(Point::new(343.0, 554.0, 332.0), Vector::new(-130.0, 0.0, 0.0), Vector::new(0.0, 0.0, -105.0), MaterialId::EMPTY));
    lights.add(Sphere::new(Point::new(190.0, 90.0, 190.0), 90.0, MaterialId::EMPTY));

    let camera = CameraConfig{defocus_angle: base.defocus_angle, ..cornell_camera(base)};
    (Scene::new(materials, world, lights), camera)
}
