//! Pixel dimensions and percentage scaling.

use crate::error::{Error, Result};

/// A width/height pair where both sides are at least one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Result<Self> {
        if w == 0 || h == 0 {
            return Err(Error::invalid("size", "dimensions must be positive"));
        }
        Ok(Self { w, h })
    }

    /// Scale both axes by `factor`, truncating and clamping each to 1px.
    pub fn scaled(self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(Error::invalid("scale factor", "must be > 0"));
        }
        Ok(Self {
            w: scale_axis(self.w, factor),
            h: scale_axis(self.h, factor),
        })
    }

    pub fn area(&self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }

    /// Scale by an integer percentage, e.g. `50` halves both axes.
    pub fn percent(self, percent: u32) -> Result<Self> {
        self.scaled(f64::from(percent) / 100.0)
    }
}

fn scale_axis(len: u32, factor: f64) -> u32 {
    let scaled = (f64::from(len) * factor) as u64;
    scaled.clamp(1, u64::from(u32::MAX)) as u32
}

impl From<Size> for (u32, u32) {
    fn from(size: Size) -> Self {
        (size.w, size.h)
    }
}
