//! Render parameters file.
//!
//! One `key=value` pair per line, vector values comma separated:
//!
//! ```text
//! # camera
//! lookfrom=13,2,3
//! vfov=20
//! background=0.7,0.8,1.0
//! ```
//!
//! Keys that are absent keep the value of the base configuration.

use log::{info, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use crate::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read parameters file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected key=value")]
    MissingValue { line: usize },

    #[error("line {line}: unknown key '{key}'")]
    UnknownKey { line: usize, key: String },

    #[error("line {line}: '{value}' is not a valid value for {key}")]
    InvalidNumber { line: usize, key: String, value: String },

    #[error("line {line}: {key} takes {expected} component(s), found {found}")]
    WrongArity { line: usize, key: String, expected: usize, found: usize },

    #[error("{key} is out of range: {reason}")]
    OutOfRange { key: &'static str, reason: &'static str },
}

impl FromStr for CameraConfig{
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err>{
        parse_parameters(text, CameraConfig::default())
    }
}

/// Applies the pairs in `text` on top of `base` and validates the result.
pub fn parse_parameters(text: &str, base: CameraConfig) -> Result<CameraConfig, ConfigError>{
    let mut config = base;
    for (index, raw) in text.lines().enumerate(){
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty(){
            continue;
        }
        let Some((key, value)) = content.split_once('=') else {
            return Err(ConfigError::MissingValue{line});
        };
        let (key, value) = (key.trim(), value.trim());
        if value.is_empty(){
            return Err(ConfigError::MissingValue{line});
        }
        let field = Field{line, key, value};
        match key{
            "lookfrom" => config.lookfrom = field.vector()?,
            "lookat" => config.lookat = field.vector()?,
            "vup" => config.vup = field.vector()?,
            "vfov" => config.vfov = field.number()?,
            "aspect_ratio" => config.aspect_ratio = field.number()?,
            "image_width" => config.image_width = field.number()?,
            "samples_per_pixel" => config.samples_per_pixel = field.number()?,
            "max_depth" => config.max_depth = field.number()?,
            "defocus_angle" => config.defocus_angle = field.number()?,
            "focus_dist" => config.focus_dist = field.number()?,
            "background" => config.background = field.vector()?,
            "light_weight" => config.light_weight = field.number()?,
            "seed" => config.seed = field.number()?,
            _ => return Err(ConfigError::UnknownKey{line, key: key.to_string()}),
        }
    }
    validate(&config)?;
    Ok(config)
}

/// Reads a parameters file. A file that does not exist leaves `base` untouched.
pub fn load_parameters(path: impl AsRef<Path>, base: CameraConfig) -> Result<CameraConfig, ConfigError>{
    let path = path.as_ref();
    match std::fs::read_to_string(path){
        Ok(text) => {
            let config = parse_parameters(&text, base)?;
            info!("Parameters set from config file: {}", path.display());
            Ok(config)
        },
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!("Parameters file {} not found, using defaults", path.display());
            Ok(base)
        },
        Err(source) => Err(ConfigError::Io{path: path.to_path_buf(), source}),
    }
}

pub fn validate(config: &CameraConfig) -> Result<(), ConfigError>{
    let check = |ok: bool, key: &'static str, reason: &'static str| {
        if ok {Ok(())} else {Err(ConfigError::OutOfRange{key, reason})}
    };
    check(config.image_width > 0, "image_width", "must be positive")?;
    check(config.samples_per_pixel > 0, "samples_per_pixel", "must be positive")?;
    check(config.max_depth > 0, "max_depth", "must be positive")?;
    check(config.aspect_ratio.is_finite() && config.aspect_ratio > 0.0, "aspect_ratio", "must be positive")?;
    check(config.vfov > 0.0 && config.vfov < 180.0, "vfov", "must lie strictly between 0 and 180 degrees")?;
    check(config.focus_dist.is_finite() && config.focus_dist > 0.0, "focus_dist", "must be positive")?;
    check(config.defocus_angle >= 0.0 && config.defocus_angle < 180.0, "defocus_angle", "must lie in [0, 180)")?;
    check(Interval::UNIT.contains(config.light_weight), "light_weight", "must lie in [0, 1]")?;
    check(config.lookfrom != config.lookat, "lookat", "must differ from lookfrom")?;
    check(config.vup.length_squared() > 0.0, "vup", "must be non-zero")?;
    Ok(())
}

struct Field<'a>{
    line: usize,
    key: &'a str,
    value: &'a str,
}

impl Field<'_>{
    fn invalid(&self, value: &str) -> ConfigError{
        ConfigError::InvalidNumber{line: self.line, key: self.key.to_string(), value: value.to_string()}
    }
    fn components(&self) -> Vec<&str>{
        self.value.split(',').map(str::trim).collect()
    }
    fn number<T: FromStr>(&self) -> Result<T, ConfigError>{
        let parts = self.components();
        if parts.len() != 1{
            return Err(ConfigError::WrongArity{line: self.line, key: self.key.to_string(), expected: 1, found: parts.len()});
        }
        parts[0].parse().map_err(|_| self.invalid(parts[0]))
    }
    fn vector(&self) -> Result<Vector, ConfigError>{
        let parts = self.components();
        if parts.len() != 3{
            return Err(ConfigError::WrongArity{line: self.line, key: self.key.to_string(), expected: 3, found: parts.len()});
        }
        let mut v = Vector::ZERO;
        for (axis, part) in parts.iter().enumerate(){
            let x: Float = part.parse().map_err(|_| self.invalid(part))?;
            if !x.is_finite(){
                return Err(self.invalid(part));
            }
            v[axis] = x;
        }
        Ok(v)
    }
}
