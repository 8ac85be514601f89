//! The set of pixel edits, as values.
//!
//! Edits parse from `op[=arg]` strings (`grayscale`, `blur=3`, `flip=vertical`)
//! and serialize as tagged JSON objects (`{"op": "blur", "intensity": 3}`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::processor::{FlipAxis, ImageProcessor};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    Grayscale,
    Blur { intensity: i32 },
    EdgeDetect,
    Brightness { delta: i32 },
    Contrast { factor: f32 },
    Rotate { angle: u32 },
    Flip { axis: FlipAxis },
    /// Replace the working image with the original scaled to `percent`.
    Resample { percent: i32 },
}

impl Edit {
    pub fn apply(&self, processor: &mut ImageProcessor) -> Result<()> {
        match *self {
            Edit::Grayscale => processor.grayscale(),
            Edit::Blur { intensity } => processor.blur(intensity),
            Edit::EdgeDetect => processor.edge_detect(),
            Edit::Brightness { delta } => processor.brightness(delta),
            Edit::Contrast { factor } => processor.contrast(factor),
            Edit::Rotate { angle } => processor.rotate(angle),
            Edit::Flip { axis } => processor.flip(axis),
            Edit::Resample { percent } => processor.resize_from_original(percent),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Edit::Grayscale => "grayscale",
            Edit::Blur { .. } => "blur",
            Edit::EdgeDetect => "edge",
            Edit::Brightness { .. } => "brightness",
            Edit::Contrast { .. } => "contrast",
            Edit::Rotate { .. } => "rotate",
            Edit::Flip { .. } => "flip",
            Edit::Resample { .. } => "resample",
        }
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Grayscale | Edit::EdgeDetect => f.write_str(self.name()),
            Edit::Blur { intensity } => write!(f, "blur={intensity}"),
            Edit::Brightness { delta } => write!(f, "brightness={delta}"),
            Edit::Contrast { factor } => write!(f, "contrast={factor}"),
            Edit::Rotate { angle } => write!(f, "rotate={angle}"),
            Edit::Flip { axis } => write!(f, "flip={axis}"),
            Edit::Resample { percent } => write!(f, "resample={percent}"),
        }
    }
}

impl FromStr for Edit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (op, arg) = match s.split_once('=') {
            Some((op, arg)) => (op.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };

        let edit = match op {
            "grayscale" => no_arg(Edit::Grayscale, arg)?,
            "edge" | "edge_detect" => no_arg(Edit::EdgeDetect, arg)?,
            "blur" => Edit::Blur {
                intensity: number("blur intensity", arg)?,
            },
            "brightness" => Edit::Brightness {
                delta: number("brightness", arg)?,
            },
            "contrast" => Edit::Contrast {
                factor: number("contrast factor", arg)?,
            },
            "rotate" => Edit::Rotate {
                angle: number("rotation angle", arg)?,
            },
            "flip" => Edit::Flip {
                axis: arg
                    .ok_or_else(|| Error::invalid("flip axis", "missing value"))?
                    .parse()?,
            },
            "resample" => Edit::Resample {
                percent: number("resize percentage", arg)?,
            },
            other => return Err(Error::invalid("edit", format!("unknown operation '{other}'"))),
        };
        Ok(edit)
    }
}

fn no_arg(edit: Edit, arg: Option<&str>) -> Result<Edit> {
    match arg {
        None => Ok(edit),
        Some(_) => Err(Error::invalid("edit", format!("'{}' takes no value", edit.name()))),
    }
}

fn number<T: FromStr>(name: &'static str, arg: Option<&str>) -> Result<T> {
    let raw = arg.ok_or_else(|| Error::invalid(name, "missing value"))?;
    raw.parse()
        .map_err(|_| Error::invalid(name, format!("'{raw}' is not a number")))
}
