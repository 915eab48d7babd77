//! Offline Monte Carlo path tracer.
//!
//! Surfaces, materials and textures are closed enums; materials live in an
//! arena and are referenced from geometry by [`MaterialId`]. Every random
//! decision draws from an explicit generator so renders are reproducible.

use glam::{DVec2, DVec3};
use rand::{Rng, RngCore};
use std::f64::consts::{FRAC_1_PI, PI};
use std::f64::{INFINITY, NEG_INFINITY};
use std::ops::{Add, Index};

pub mod aabb;
pub mod bvh;
pub mod camera;
pub mod config;
pub mod hitrecord;
pub mod hittable;
pub mod material;
pub mod math;
pub mod output;
pub mod pdf;
pub mod scene;
pub mod texture;

pub use aabb::*;
pub use bvh::*;
pub use camera::*;
pub use config::*;
pub use hitrecord::*;
pub use hittable::*;
pub use material::*;
pub use math::*;
pub use output::*;
pub use pdf::*;
pub use scene::*;
pub use texture::*;

pub type Color = DVec3;
pub type Point = DVec3;
pub type Vector = DVec3;
pub type UV = DVec2;
pub type Float = f64;
