use crate::*;
use image::RgbImage;
use rand::seq::SliceRandom;
use std::array::from_fn;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading an image texture.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer of {len} bytes does not hold a {width}x{height} RGB image")]
    BufferSize { width: u32, height: u32, len: usize },
}

pub enum Texture{
    SolidColor(Color),
    Checkered{
        inv_scale: Float,
        even: Box<Texture>,
        odd: Box<Texture>,
    },
    Noise(NoiseTexture),
    Image(ImageTexture),
}

impl Texture{
    pub fn checkered(scale: Float, even: Texture, odd: Texture) -> Self{
        Texture::Checkered{inv_scale: scale.recip(), even: Box::new(even), odd: Box::new(odd)}
    }
    pub fn checkered_colors(scale: Float, even: Color, odd: Color) -> Self{
        Self::checkered(scale, Texture::SolidColor(even), Texture::SolidColor(odd))
    }
    pub fn value(&self, uv: UV, p: &Point) -> Color{
        match self{
            Texture::SolidColor(albedo) => *albedo,
            Texture::Checkered{inv_scale, even, odd} => {
                let sum: i64 = (0..3).map(|axis| (inv_scale * p[axis]).floor() as i64).sum();
                if sum.rem_euclid(2) == 0 {even.value(uv, p)} else {odd.value(uv, p)}
            },
            Texture::Noise(noise) => noise.value(p),
            Texture::Image(image) => image.value(uv),
        }
    }
}

impl From<Color> for Texture{
    fn from(albedo: Color) -> Self{
        Texture::SolidColor(albedo)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoisePattern{
    /// Raw lattice noise remapped to [0, 1].
    Smooth,
    /// Seven octaves of absolute noise.
    Turbulence,
    /// Sine bands along z, phase-shifted by turbulence.
    Marble,
}

pub struct NoiseTexture {
    noise: Perlin,
    scale: Float,
    albedo: Color,
    pattern: NoisePattern,
}

impl NoiseTexture {
    pub fn new(scale: Float, rng: &mut dyn RngCore) -> Self {
        Self::with_pattern(scale, NoisePattern::Marble, Color::ONE, rng)
    }
    pub fn with_pattern(scale: Float, pattern: NoisePattern, albedo: Color, rng: &mut dyn RngCore) -> Self {
        Self { noise: Perlin::new(rng), scale, albedo, pattern }
    }
    pub fn scale(&self) -> Float {
        self.scale
    }
    pub fn value(&self, p: &Point) -> Color {
        let intensity = match self.pattern{
            NoisePattern::Smooth => 0.5 * (1.0 + self.noise.noise(&(self.scale * *p))),
            NoisePattern::Turbulence => self.noise.turbulence(&(self.scale * *p), 7),
            NoisePattern::Marble => 0.5 * (1.0 + (self.scale*p.z + 10.*self.noise.turbulence(p, 7)).sin()),
        };
        self.albedo * Interval::UNIT.clamp(intensity)
    }
}

pub struct Perlin{
    perm: [[usize; 256];3],
    ranvec: [Vector; 256],
}

impl Perlin{
    fn generate_perm(rng: &mut dyn RngCore) -> [usize; 256]{
        let mut p:[usize;256] = from_fn(|i| i);
        p.shuffle(rng);
        p
    }
    pub fn new(rng: &mut dyn RngCore) -> Self{
        let ranvec = from_fn(|_| Vector::random_unit_vector(rng));
        let perm = [
            Perlin::generate_perm(rng),
            Perlin::generate_perm(rng),
            Perlin::generate_perm(rng),
        ];
        Self{perm, ranvec}
    }
    /// Gradient noise in roughly [-1, 1].
    pub fn noise(&self, p: &Point) -> Float{
        let i = p.floor();
        let u = *p - i;
        let c: [[[Vector; 2]; 2]; 2] = from_fn(|di| from_fn(|dj| from_fn(|dk|
            self.ranvec[
            self.perm[0][((i.x as i64 + di as i64) & 255) as usize] ^
            self.perm[1][((i.y as i64 + dj as i64) & 255) as usize] ^
            self.perm[2][((i.z as i64 + dk as i64) & 255) as usize] ]
        )));
        Perlin::perlin_interpolate(c, u)
    }
    fn perlin_interpolate(c:[[[Vector;2];2];2], u:Vector) -> Float{
        let uu = u*u*(3.-2.*u);
        (0..2).flat_map(|i| (0..2).flat_map(move |j| (0..2).map(move |k|{
            let weight = Vector::new(u.x - i as Float, u.y - j as Float, u.z - k as Float);
            (if i == 0 { 1.0 - uu.x } else { uu.x })*
            (if j == 0 { 1.0 - uu.y } else { uu.y })*
            (if k == 0 { 1.0 - uu.z } else { uu.z })*
            c[i][j][k].dot(weight)
        }
        ))).sum::<Float>()
    }
    pub fn turbulence(&self, p:&Point, depth: usize) -> Float{
        (0..depth)
            .fold((0.0, *p, 1.0), |(sum, point, weight), _| {
                (sum + weight * self.noise(&point), point * 2.0, weight * 0.5)
            }).0.abs()
    }
}

/// Raster lookup with clamped coordinates. Without pixels it renders as solid cyan.
pub struct ImageTexture{
    image: Option<RgbImage>,
}

impl ImageTexture{
    pub const FALLBACK: Color = Color{x:0.0, y:1.0, z:1.0};

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError>{
        let image = image::open(path)?.to_rgb8();
        Ok(Self{image: Some(image)})
    }
    /// Loads `path`, degrading to the fallback color when it cannot be decoded.
    pub fn open_or_fallback(path: impl AsRef<Path>) -> Self{
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|err| {
            log::warn!("could not load texture {}: {}", path.display(), err);
            Self::missing()
        })
    }
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError>{
        let len = pixels.len();
        RgbImage::from_raw(width, height, pixels)
            .map(|image| Self{image: Some(image)})
            .ok_or(TextureError::BufferSize{width, height, len})
    }
    pub fn missing() -> Self{
        Self{image: None}
    }
    pub fn value(&self, uv: UV) -> Color{
        let Some(image) = &self.image else {
            return Self::FALLBACK;
        };
        if image.width() == 0 || image.height() == 0 {
            return Self::FALLBACK;
        }
        let u = Interval::UNIT.clamp(uv.x);
        let v = 1.0 - Interval::UNIT.clamp(uv.y);
        let i = ((u * image.width() as Float) as u32).min(image.width() - 1);
        let j = ((v * image.height() as Float) as u32).min(image.height() - 1);
        let [r, g, b] = image.get_pixel(i, j).0;
        Color::new(r as Float, g as Float, b as Float) / 255.0
    }
}
