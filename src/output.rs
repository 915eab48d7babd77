use image::RgbImage;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use crate::*;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Raster of {width}x{height} does not fit an image buffer")]
    Dimensions { width: usize, height: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat{
    Ppm,
    Png,
}

impl OutputFormat{
    pub fn extension(&self) -> &'static str{
        match self{
            OutputFormat::Ppm => "ppm",
            OutputFormat::Png => "png",
        }
    }
    /// PNG for a `.png` extension (any case), PPM for everything else.
    pub fn from_path(path: &Path) -> Self{
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => OutputFormat::Png,
            _ => OutputFormat::Ppm,
        }
    }
}

/// Gamma-encodes a linear color and quantizes it to 8 bits per channel.
pub fn to_rgb8(c: Color) -> [u8; 3]{
    const INTENSITY: Interval = Interval{min: 0.000, max: 0.999};
    let quantize = |x: Float| (256. * INTENSITY.clamp(linear_to_gamma(x))) as u8;
    [quantize(c.x), quantize(c.y), quantize(c.z)]
}

/// Finished 8-bit image, stored row-major from the top-left pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster{
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl Raster{
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Self{
        debug_assert_eq!(pixels.len(), width*height, "raster size mismatch");
        Self{width, height, pixels}
    }
    pub fn width(&self) -> usize{
        self.width
    }
    pub fn height(&self) -> usize{
        self.height
    }
    pub fn pixels(&self) -> &[[u8; 3]]{
        &self.pixels
    }
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3]{
        self.pixels[y*self.width + x]
    }

    pub fn write_ppm<W: Write>(&self, writer: &mut W) -> Result<(), OutputError>{
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;
        for [r, g, b] in &self.pixels{
            writeln!(writer, "{r} {g} {b}")?;
        }
        Ok(())
    }

    pub fn to_image(&self) -> Result<RgbImage, OutputError>{
        let dimensions = OutputError::Dimensions{width: self.width, height: self.height};
        let (Ok(w), Ok(h)) = (u32::try_from(self.width), u32::try_from(self.height)) else {
            return Err(dimensions);
        };
        let bytes = self.pixels.iter().flatten().copied().collect();
        RgbImage::from_raw(w, h, bytes).ok_or(dimensions)
    }

    /// Writes the raster to `path`, picking the encoding from its extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OutputError>{
        let path = path.as_ref();
        match OutputFormat::from_path(path){
            OutputFormat::Png => {
                self.to_image()?.save_with_format(path, image::ImageFormat::Png)?;
            },
            OutputFormat::Ppm => {
                let mut writer = BufWriter::new(File::create(path)?);
                self.write_ppm(&mut writer)?;
                writer.flush()?;
            },
        }
        info!("Image saved as {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgb8_quantization() {
        assert_eq!(to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(to_rgb8(Color::ONE), [255, 255, 255]);
        assert_eq!(to_rgb8(Color::splat(7.0)), [255, 255, 255]);
        assert_eq!(to_rgb8(Color::splat(-1.0)), [0, 0, 0]);
        // sqrt(0.25) = 0.5 -> 128
        assert_eq!(to_rgb8(Color::new(0.25, 0.0, 1.0)), [128, 0, 255]);
    }

    #[test]
    fn test_ppm_layout() {
        let raster = Raster::new(2, 1, vec![[255, 0, 0], [0, 128, 7]]);
        let mut out = Vec::new();
        raster.write_ppm(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "P3\n2 1\n255\n255 0 0\n0 128 7\n");
        assert_eq!(raster.pixel(1, 0), [0, 128, 7]);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out/cornell_box.png")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("out/cornell_box.PNG")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("out/cornell_box.ppm")), OutputFormat::Ppm);
        assert_eq!(OutputFormat::from_path(Path::new("image")), OutputFormat::Ppm);
    }

    #[test]
    fn test_png_roundtrip_through_disk() {
        let raster = Raster::new(2, 2, vec![[1, 2, 3], [4, 5, 6], [7, 8, 9], [10, 11, 12]]);
        let path = std::env::temp_dir().join(format!("riw-output-test-{}.png", std::process::id()));
        raster.save(&path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(decoded.get_pixel(1, 1).0, [10, 11, 12]);
        assert_eq!(decoded.get_pixel(0, 1).0, [7, 8, 9]);
    }
}
