//! The image state holder: an untouched original and the working copy.
//!
//! Every filter either replaces the working copy with a fully computed result
//! or returns an error before touching it.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::size::Size;

/// Rotation angles accepted by [`ImageProcessor::rotate`], clockwise.
pub const SUPPORTED_ROTATIONS: [u32; 3] = [90, 180, 270];

/// Hysteresis thresholds used for edge detection.
pub const CANNY_LOW: f32 = 100.0;
pub const CANNY_HIGH: f32 = 200.0;

/// Largest image, in pixels, a resize may produce (about 300 MB of RGB data).
pub const MAX_PIXELS: u64 = 100_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

impl FlipAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlipAxis::Horizontal => "horizontal",
            FlipAxis::Vertical => "vertical",
        }
    }
}

impl FromStr for FlipAxis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "horizontal" => Ok(FlipAxis::Horizontal),
            "vertical" => Ok(FlipAxis::Vertical),
            other => Err(Error::invalid(
                "flip axis",
                format!("expected 'horizontal' or 'vertical', got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for FlipAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
struct Buffers {
    original: RgbImage,
    current: RgbImage,
}

/// Holds the loaded image. Empty until the first successful [`load`](Self::load).
#[derive(Debug, Clone, Default)]
pub struct ImageProcessor {
    buffers: Option<Buffers>,
}

impl ImageProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor and load `path` in one step.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut processor = Self::new();
        processor.load(path)?;
        Ok(processor)
    }

    /// Create a processor around an image that is already in memory.
    pub fn from_image(image: RgbImage) -> Self {
        Self {
            buffers: Some(Buffers {
                original: image.clone(),
                current: image,
            }),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.buffers.is_some()
    }

    /// The working image.
    pub fn image(&self) -> Result<&RgbImage> {
        self.buffers().map(|b| &b.current)
    }

    /// The image as it was loaded.
    pub fn original(&self) -> Result<&RgbImage> {
        self.buffers().map(|b| &b.original)
    }

    pub fn dimensions(&self) -> Result<Size> {
        let image = self.image()?;
        Size::new(image.width(), image.height())
    }

    fn buffers(&self) -> Result<&Buffers> {
        self.buffers.as_ref().ok_or(Error::NoImage)
    }

    fn buffers_mut(&mut self) -> Result<&mut Buffers> {
        self.buffers.as_mut().ok_or(Error::NoImage)
    }

    /// Decode `path` and make it both the original and the working image.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        ensure_path(path)?;

        let decoded = image::open(path).map_err(|source| {
            warn!("Could not read {}: {}", path.display(), source);
            Error::ImageLoad {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let image = decoded.into_rgb8();
        info!(
            "Loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );

        *self = Self::from_image(image);
        Ok(())
    }

    /// Write the working image. The format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let current = self.image()?;
        let path = path.as_ref();
        ensure_path(path)?;

        current.save(path).map_err(|source| {
            warn!("Could not write {}: {}", path.display(), source);
            Error::ImageSave {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!("Saved {}", path.display());
        Ok(())
    }

    /// Throw away every edit and start again from the original.
    pub fn reset(&mut self) -> Result<()> {
        let buffers = self.buffers_mut()?;
        buffers.current = buffers.original.clone();
        info!("Working image reset to original");
        Ok(())
    }

    /// Swap in a previously saved working image (used by undo/redo).
    pub fn replace_current(&mut self, image: RgbImage) -> Result<()> {
        self.buffers_mut()?.current = image;
        Ok(())
    }

    pub fn grayscale(&mut self) -> Result<()> {
        let buffers = self.buffers_mut()?;
        let gray = imageops::grayscale(&buffers.current);
        buffers.current = expand_gray(gray);
        debug!("Applied grayscale");
        Ok(())
    }

    /// Gaussian blur with a `2 * intensity + 1` kernel. Zero leaves the image as is.
    ///
    /// Sigma is capped at the longer image side; wider kernels look the same.
    pub fn blur(&mut self, intensity: i32) -> Result<()> {
        let buffers = self.buffers_mut()?;
        if intensity < 0 {
            return Err(Error::invalid(
                "blur intensity",
                "must be a non-negative integer",
            ));
        }
        if intensity == 0 {
            debug!("Blur intensity 0, nothing to do");
            return Ok(());
        }

        let longest = buffers.current.width().max(buffers.current.height());
        let sigma = kernel_sigma(2 * u64::from(intensity.unsigned_abs()) + 1).min(longest as f32);
        buffers.current = gaussian_blur_f32(&buffers.current, sigma);
        debug!("Applied blur (intensity {}, sigma {:.2})", intensity, sigma);
        Ok(())
    }

    /// Canny edges rendered as white lines on black.
    pub fn edge_detect(&mut self) -> Result<()> {
        let buffers = self.buffers_mut()?;
        let gray = imageops::grayscale(&buffers.current);
        let edges = canny(&gray, CANNY_LOW, CANNY_HIGH);
        buffers.current = expand_gray(edges);
        debug!("Applied edge detection");
        Ok(())
    }

    /// Shift the HSV value channel by `delta`; hue and saturation are kept.
    pub fn brightness(&mut self, delta: i32) -> Result<()> {
        let buffers = self.buffers_mut()?;
        let mut out = buffers.current.clone();
        for pixel in out.pixels_mut() {
            *pixel = shift_value(*pixel, delta);
        }
        buffers.current = out;
        debug!("Applied brightness {:+}", delta);
        Ok(())
    }

    /// Multiply every channel by `factor`, saturating at 255.
    pub fn contrast(&mut self, factor: f32) -> Result<()> {
        let buffers = self.buffers_mut()?;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(Error::invalid("contrast factor", "must be > 0"));
        }

        let mut out = buffers.current.clone();
        for channel in out.iter_mut() {
            *channel = (factor * f32::from(*channel)).abs().round().min(255.0) as u8;
        }
        buffers.current = out;
        debug!("Applied contrast x{}", factor);
        Ok(())
    }

    /// Rotate clockwise by 90, 180 or 270 degrees.
    pub fn rotate(&mut self, angle: u32) -> Result<()> {
        let buffers = self.buffers_mut()?;
        buffers.current = match angle {
            90 => imageops::rotate90(&buffers.current),
            180 => imageops::rotate180(&buffers.current),
            270 => imageops::rotate270(&buffers.current),
            _ => {
                return Err(Error::invalid(
                    "rotation angle",
                    format!("must be one of {SUPPORTED_ROTATIONS:?}, got {angle}"),
                ))
            }
        };
        debug!("Rotated {} degrees", angle);
        Ok(())
    }

    pub fn flip(&mut self, axis: FlipAxis) -> Result<()> {
        let buffers = self.buffers_mut()?;
        buffers.current = match axis {
            FlipAxis::Horizontal => imageops::flip_horizontal(&buffers.current),
            FlipAxis::Vertical => imageops::flip_vertical(&buffers.current),
        };
        debug!("Flipped {}", axis);
        Ok(())
    }

    /// Replace the working image with the original scaled to `percent`.
    ///
    /// Always starts from the original, so repeated calls never compound.
    pub fn resize_from_original(&mut self, percent: i32) -> Result<()> {
        let buffers = self.buffers_mut()?;
        let percent = u32::try_from(percent)
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| Error::invalid("resize percentage", "must be a positive integer"))?;

        let base = Size::new(buffers.original.width(), buffers.original.height())?;
        let target = base.percent(percent)?;
        if target.area() > MAX_PIXELS {
            return Err(Error::invalid(
                "resize percentage",
                format!(
                    "{percent}% gives {}x{}, over the {MAX_PIXELS} pixel limit",
                    target.w, target.h
                ),
            ));
        }
        buffers.current = imageops::resize(&buffers.original, target.w, target.h, FilterType::Triangle);
        debug!(
            "Resized original {}x{} to {}x{} ({}%)",
            base.w, base.h, target.w, target.h, percent
        );
        Ok(())
    }
}

impl fmt::Display for ImageProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageProcessor(loaded={})", self.is_loaded())
    }
}

fn ensure_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidPath);
    }
    Ok(())
}

fn expand_gray(gray: GrayImage) -> RgbImage {
    DynamicImage::ImageLuma8(gray).into_rgb8()
}

/// Sigma OpenCV derives for a Gaussian kernel of size `ksize` when none is given.
fn kernel_sigma(ksize: u64) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

fn shift_value(pixel: Rgb<u8>, delta: i32) -> Rgb<u8> {
    let value = pixel.0.iter().copied().max().unwrap_or(0);
    let target = (i32::from(value) + delta).clamp(0, 255);
    if value == 0 {
        // Black has no saturation, so it lifts to gray.
        let t = target as u8;
        return Rgb([t, t, t]);
    }
    let ratio = target as f32 / f32::from(value);
    Rgb(pixel
        .0
        .map(|c| (f32::from(c) * ratio).round().clamp(0.0, 255.0) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 90]))
    }

    #[test]
    fn test_operations_require_image() {
        let mut processor = ImageProcessor::new();
        assert!(matches!(processor.grayscale(), Err(Error::NoImage)));
        assert!(matches!(processor.blur(2), Err(Error::NoImage)));
        assert!(matches!(processor.reset(), Err(Error::NoImage)));
        assert!(matches!(processor.rotate(90), Err(Error::NoImage)));
        assert!(matches!(processor.save("target/never.png"), Err(Error::NoImage)));
        assert!(matches!(processor.resize_from_original(50), Err(Error::NoImage)));
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut processor = ImageProcessor::new();
        assert!(matches!(processor.load(""), Err(Error::InvalidPath)));

        let processor = ImageProcessor::from_image(gradient(4, 4));
        assert!(matches!(processor.save(""), Err(Error::InvalidPath)));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let mut processor = ImageProcessor::new();
        let err = processor.load("target/does/not/exist.png").unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
        assert!(!processor.is_loaded());
    }

    #[test]
    fn test_blur_zero_is_noop() {
        let image = gradient(12, 9);
        let mut processor = ImageProcessor::from_image(image.clone());
        processor.blur(0).unwrap();
        assert_eq!(processor.image().unwrap(), &image);
    }

    #[test]
    fn test_negative_blur_leaves_image() {
        let image = gradient(12, 9);
        let mut processor = ImageProcessor::from_image(image.clone());
        let err = processor.blur(-1).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(processor.image().unwrap(), &image);
    }

    #[test]
    fn test_blur_smooths_hard_edge() {
        let image = RgbImage::from_fn(10, 1, |x, _| if x < 5 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) });
        let mut processor = ImageProcessor::from_image(image);
        processor.blur(2).unwrap();
        let at_edge = processor.image().unwrap().get_pixel(4, 0)[0];
        assert!(at_edge > 0 && at_edge < 255);
    }

    #[test]
    fn test_huge_blur_is_capped() {
        let mut capped = ImageProcessor::from_image(gradient(4, 4));
        capped.blur(i32::MAX).unwrap();

        let mut wide = ImageProcessor::from_image(gradient(4, 4));
        wide.blur(100).unwrap();
        assert_eq!(capped.image().unwrap(), wide.image().unwrap());
    }

    #[test]
    fn test_grayscale_equal_channels() {
        let mut processor = ImageProcessor::from_image(gradient(8, 8));
        processor.grayscale().unwrap();
        for pixel in processor.image().unwrap().pixels() {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }
    }

    #[test]
    fn test_edge_detect_is_binary() {
        let image = RgbImage::from_fn(20, 20, |x, _| if x < 10 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) });
        let mut processor = ImageProcessor::from_image(image);
        processor.edge_detect().unwrap();
        let out = processor.image().unwrap();
        assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert!(out.pixels().any(|p| p[0] == 255));
    }

    #[test]
    fn test_brightness_shifts_value() {
        let image = RgbImage::from_pixel(2, 2, Rgb([100, 50, 0]));
        let mut processor = ImageProcessor::from_image(image);
        processor.brightness(100).unwrap();
        assert_eq!(processor.image().unwrap().get_pixel(0, 0), &Rgb([200, 100, 0]));
    }

    #[test]
    fn test_brightness_clamps() {
        let image = RgbImage::from_pixel(1, 1, Rgb([250, 10, 10]));
        let mut processor = ImageProcessor::from_image(image);
        processor.brightness(30).unwrap();
        assert_eq!(processor.image().unwrap().get_pixel(0, 0)[0], 255);

        processor.brightness(-400).unwrap();
        assert_eq!(processor.image().unwrap().get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_brightness_lifts_black_to_gray() {
        let mut processor = ImageProcessor::from_image(RgbImage::new(1, 1));
        processor.brightness(40).unwrap();
        assert_eq!(processor.image().unwrap().get_pixel(0, 0), &Rgb([40, 40, 40]));
    }

    #[test]
    fn test_contrast_scales_and_saturates() {
        let image = RgbImage::from_pixel(1, 1, Rgb([100, 200, 10]));
        let mut processor = ImageProcessor::from_image(image);
        processor.contrast(1.5).unwrap();
        assert_eq!(processor.image().unwrap().get_pixel(0, 0), &Rgb([150, 255, 15]));
    }

    #[test]
    fn test_contrast_rejects_non_positive() {
        let image = gradient(3, 3);
        let mut processor = ImageProcessor::from_image(image.clone());
        assert!(processor.contrast(0.0).is_err());
        assert!(processor.contrast(-1.0).is_err());
        assert!(processor.contrast(f32::NAN).is_err());
        assert_eq!(processor.image().unwrap(), &image);
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let mut processor = ImageProcessor::from_image(gradient(6, 4));
        processor.rotate(90).unwrap();
        assert_eq!(processor.dimensions().unwrap(), Size { w: 4, h: 6 });
        processor.rotate(180).unwrap();
        assert_eq!(processor.dimensions().unwrap(), Size { w: 4, h: 6 });
        processor.rotate(270).unwrap();
        assert_eq!(processor.dimensions().unwrap(), Size { w: 6, h: 4 });
    }

    #[test]
    fn test_rotate_four_times_restores() {
        let image = gradient(6, 4);
        let mut processor = ImageProcessor::from_image(image.clone());
        for _ in 0..4 {
            processor.rotate(90).unwrap();
        }
        assert_eq!(processor.image().unwrap(), &image);
    }

    #[test]
    fn test_rotate_rejects_unsupported_angle() {
        let image = gradient(6, 4);
        let mut processor = ImageProcessor::from_image(image.clone());
        assert!(processor.rotate(45).is_err());
        assert!(processor.rotate(0).is_err());
        assert!(processor.rotate(360).is_err());
        assert_eq!(processor.image().unwrap(), &image);
    }

    #[test]
    fn test_flip_mirrors() {
        let image = gradient(5, 3);
        let mut processor = ImageProcessor::from_image(image.clone());
        processor.flip(FlipAxis::Horizontal).unwrap();
        assert_eq!(processor.image().unwrap().get_pixel(0, 0), image.get_pixel(4, 0));

        processor.flip(FlipAxis::Horizontal).unwrap();
        processor.flip(FlipAxis::Vertical).unwrap();
        assert_eq!(processor.image().unwrap().get_pixel(0, 0), image.get_pixel(0, 2));
    }

    #[test]
    fn test_flip_axis_parse() {
        assert_eq!("horizontal".parse::<FlipAxis>().unwrap(), FlipAxis::Horizontal);
        assert_eq!("vertical".parse::<FlipAxis>().unwrap(), FlipAxis::Vertical);
        assert!("diagonal".parse::<FlipAxis>().is_err());
        assert!("Horizontal".parse::<FlipAxis>().is_err());
    }

    #[test]
    fn test_resize_anchored_to_original() {
        let mut processor = ImageProcessor::from_image(gradient(200, 100));
        processor.resize_from_original(50).unwrap();
        assert_eq!(processor.dimensions().unwrap(), Size { w: 100, h: 50 });
        processor.resize_from_original(200).unwrap();
        assert_eq!(processor.dimensions().unwrap(), Size { w: 400, h: 200 });
    }

    #[test]
    fn test_resize_rejects_non_positive() {
        let image = gradient(10, 10);
        let mut processor = ImageProcessor::from_image(image.clone());
        assert!(processor.resize_from_original(0).is_err());
        assert!(processor.resize_from_original(-20).is_err());
        assert_eq!(processor.image().unwrap(), &image);
    }

    #[test]
    fn test_resize_over_pixel_limit_rejected() {
        let image = gradient(200, 100);
        let mut processor = ImageProcessor::from_image(image.clone());
        let err = processor.resize_from_original(1_000_000).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(processor.image().unwrap(), &image);

        // 200x100 at 7000% is 98 megapixels, just under the limit.
        let target = Size::new(200, 100).unwrap().percent(7000).unwrap();
        assert!(target.area() <= MAX_PIXELS);
    }

    #[test]
    fn test_resize_keeps_one_pixel() {
        let mut processor = ImageProcessor::from_image(gradient(3, 3));
        processor.resize_from_original(1).unwrap();
        assert_eq!(processor.dimensions().unwrap(), Size { w: 1, h: 1 });
    }

    #[test]
    fn test_reset_restores_original() {
        let image = gradient(7, 5);
        let mut processor = ImageProcessor::from_image(image.clone());
        processor.rotate(90).unwrap();
        processor.grayscale().unwrap();
        processor.reset().unwrap();
        assert_eq!(processor.image().unwrap(), &image);
    }

    #[test]
    fn test_display() {
        assert_eq!(ImageProcessor::new().to_string(), "ImageProcessor(loaded=false)");
        let processor = ImageProcessor::from_image(gradient(1, 1));
        assert_eq!(processor.to_string(), "ImageProcessor(loaded=true)");
    }
}
