use crate::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval{
    pub min:Float,
    pub max:Float,
}

impl Add<Float> for &Interval{
    type Output = Interval;
    fn add(self, rhs: Float) -> Self::Output {
        let min = self.min + rhs;
        let max = self.max + rhs;
        Self::Output{min, max}
    }
}

impl Interval{
    pub const NONE: Self = Self{min:INFINITY, max:NEG_INFINITY};
    pub const ALL: Self = Self{min:NEG_INFINITY, max:INFINITY};
    pub const UNIT: Self = Self{min:0.0, max:1.0};

    pub fn new(min: Float, max: Float) -> Self{
        Self{min, max}
    }
    pub fn len(&self) -> Float{
        self.max - self.min
    }
    pub fn is_empty(&self) -> bool{
        self.min > self.max
    }
    pub fn contains(&self, x:Float) -> bool{
        self.min <= x && x <= self.max
    }
    pub fn surrounds(&self, x:Float) -> bool{
        self.min < x && x < self.max
    }
    pub fn clamp(&self, x:Float) -> Float{
        x.clamp(self.min, self.max)
    }
    pub fn expanded(&self, d:Float) -> Interval{
        Interval{min:self.min-d, max:self.max+d}
    }
    pub fn ordered(x:Float, y:Float) -> Self{
        let (min, max) = if x>=y {(y, x)} else {(x, y)};
        Self{min, max}
    }
    pub fn enclosing(a: &Self, b:&Self) -> Self{
        let min = a.min.min(b.min);
        let max = a.max.max(b.max);
        Interval{min, max}
    }
    /// `self` with its upper bound pulled in to `max`.
    pub fn up_to(&self, max: Float) -> Self{
        Self{min:self.min, max}
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Ray{
    pub orig:Point,
    pub dir:Vector,
    pub time:Float,
}

impl Ray{
    pub fn new(orig: Point, dir: Vector) -> Self{
        Self{orig, dir, time:0.0}
    }
    pub fn at_time(orig: Point, dir: Vector, time: Float) -> Self{
        Self{orig, dir, time}
    }
    pub fn at(&self, t:Float) -> Point{
        self.orig + t*self.dir
    }
}

pub fn linear_to_gamma(linear: Float) -> Float{
    if linear>0.0 {linear.sqrt()} else {0.0}
}

pub fn reflect(v: Vector, n: Vector) -> Vector{
    v - 2.0*v.dot(n)*n
}

/// Snell refraction of the unit vector `uv` through a surface with normal `n`.
pub fn refract(uv: Vector, n: Vector, etai_over_etat: Float) -> Vector{
    let cos = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos*n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Random sampling helpers on vectors. Every draw comes from the caller's generator.
pub trait Utils: Sized {
    fn random(rng: &mut dyn RngCore) -> Self;
    fn random_range(rng: &mut dyn RngCore, min: Float, max: Float) -> Self;
    fn random_unit_vector(rng: &mut dyn RngCore) -> Self;
    fn random_on_hemisphere(rng: &mut dyn RngCore, normal: &Vector) -> Self;
    fn random_on_pixel(rng: &mut dyn RngCore) -> Self;
    fn random_on_disk(rng: &mut dyn RngCore) -> Self;
    fn random_cosine_z(rng: &mut dyn RngCore) -> Self;
    fn random_to_sphere(rng: &mut dyn RngCore, radius: Float, distance_squared: Float) -> Self;
    fn near_zero(&self) -> bool;
}

impl Utils for Vector {
    fn random(rng: &mut dyn RngCore) -> Self{
        Self::new(rng.gen(), rng.gen(), rng.gen())
    }
    fn random_range(rng: &mut dyn RngCore, min: Float, max: Float) -> Self{
        Self::new(
            rng.gen_range(min..max),
            rng.gen_range(min..max),
            rng.gen_range(min..max),
        )
    }
    fn random_unit_vector(rng: &mut dyn RngCore) -> Self{
        loop{
            let p = Self::random_range(rng, -1.0, 1.0);
            let lsq = p.length_squared();
            if 1e-160 < lsq && lsq <= 1.0 {
                return p/lsq.sqrt();
            }
        }
    }
    fn random_on_hemisphere(rng: &mut dyn RngCore, normal: &Vector) -> Self{
        let uv = Self::random_unit_vector(rng);
        if normal.dot(uv) > 0.0 {uv} else {-uv}
    }
    fn random_on_pixel(rng: &mut dyn RngCore) -> Self{
        Self::new(rng.gen::<Float>() - 0.5, rng.gen::<Float>() - 0.5, 0.0)
    }
    fn random_on_disk(rng: &mut dyn RngCore) -> Self{
        loop{
            let p = Self::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
            if p.length_squared() < 1.0{
                return p;
            }
        }
    }
    fn random_cosine_z(rng: &mut dyn RngCore) -> Self{
        let r1: Float = rng.gen();
        let r2: Float = rng.gen();
        let phi = 2.0*PI*r1;
        let x = phi.cos()*r2.sqrt();
        let y = phi.sin()*r2.sqrt();
        let z = (1.0 - r2).sqrt();
        Self::new(x, y, z)
    }
    /// Uniform direction inside the cone subtended by a sphere, around +z.
    fn random_to_sphere(rng: &mut dyn RngCore, radius: Float, distance_squared: Float) -> Self{
        let r1: Float = rng.gen();
        let r2: Float = rng.gen();
        let cos_max = (1.0 - radius*radius/distance_squared).max(0.0).sqrt();
        let z = 1.0 + r2*(cos_max - 1.0);
        let phi = 2.0*PI*r1;
        let sin = (1.0 - z*z).max(0.0).sqrt();
        Self::new(phi.cos()*sin, phi.sin()*sin, z)
    }
    fn near_zero(&self) -> bool{
        let t = 1e-8;
        (self.x.abs() < t) &&
        (self.y.abs() < t) &&
        (self.z.abs() < t)
    }
}

/// Orthonormal basis with `w` along a given direction.
#[derive(Clone, Copy, Debug)]
pub struct ONB{
    pub u: Vector,
    pub v: Vector,
    pub w: Vector,
}

impl ONB{
    pub fn new(n: &Vector) -> Self{
        let w = n.normalize();
        let a = if w.x.abs() > 0.9 {Vector::Y} else {Vector::X};
        let v = w.cross(a).normalize();
        let u = w.cross(v);
        Self{u, v, w}
    }
    pub fn transform(&self, p: &Vector) -> Vector{
        p.x*self.u + p.y*self.v + p.z*self.w
    }
}
