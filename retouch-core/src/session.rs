//! Edit session: the processor, its history and the zoom level, kept in step.
//!
//! Every user action goes through here:
//! - pixel edits snapshot the working image before they commit
//! - zoom only records the previous scale, the pixels stay put
//! - undo/redo restore pixels and scale together
//! - loading or resetting starts a fresh history

use std::path::Path;
use tracing::{debug, info, warn};

use crate::edit::Edit;
use crate::error::{Error, Result};
use crate::history::{History, Snapshot};
use crate::processor::ImageProcessor;
use crate::size::Size;

/// File name used when saving without an explicit path.
pub const DEFAULT_SAVE_NAME: &str = "edited_image.png";

/// Zoom percentage after a load or reset.
pub const DEFAULT_SCALE: u32 = 100;
pub const MIN_SCALE: u32 = 10;
pub const MAX_SCALE: u32 = 200;

#[derive(Debug, Clone)]
pub struct EditSession {
    processor: ImageProcessor,
    history: History,
    scale: u32,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            processor: ImageProcessor::new(),
            history: History::new(),
            scale: DEFAULT_SCALE,
        }
    }

    /// Start a session around an in-memory image.
    pub fn with_image(image: image::RgbImage) -> Self {
        Self {
            processor: ImageProcessor::from_image(image),
            ..Self::new()
        }
    }

    pub fn processor(&self) -> &ImageProcessor {
        &self.processor
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_loaded(&self) -> bool {
        self.processor.is_loaded()
    }

    fn ensure_loaded(&self) -> Result<()> {
        if !self.processor.is_loaded() {
            warn!("Rejected action: no image loaded");
            return Err(Error::NoImage);
        }
        Ok(())
    }

    /// Open an image. History and zoom start over only if the load succeeds.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.processor.load(path)?;
        self.history.clear();
        self.scale = DEFAULT_SCALE;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.processor.save(path)
    }

    /// Save to [`DEFAULT_SAVE_NAME`] in the working directory.
    pub fn save_default(&self) -> Result<()> {
        self.save(DEFAULT_SAVE_NAME)
    }

    /// Apply a pixel edit. The pre-edit state becomes an undo step only if
    /// the edit succeeds.
    pub fn apply(&mut self, edit: &Edit) -> Result<()> {
        self.ensure_loaded()?;
        let before = self.processor.image()?.clone();

        if let Err(err) = edit.apply(&mut self.processor) {
            warn!("Edit {} rejected: {}", edit, err);
            return Err(err);
        }

        self.history.record(Snapshot::new(before, self.scale));
        info!("Applied {} ({})", edit, self.history);
        Ok(())
    }

    /// Change the display zoom. Pixels are not resampled.
    pub fn zoom(&mut self, percent: u32) -> Result<()> {
        self.ensure_loaded()?;
        if !(MIN_SCALE..=MAX_SCALE).contains(&percent) {
            return Err(Error::InvalidArgument {
                name: "zoom",
                reason: format!("must be between {MIN_SCALE} and {MAX_SCALE}, got {percent}"),
            });
        }

        self.history.save(self.processor.image()?, self.scale);
        debug!("Zoom {}% -> {}%", self.scale, percent);
        self.scale = percent;
        Ok(())
    }

    /// Step back one action. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        self.ensure_loaded()?;
        let current = self.processor.image()?;
        match self.history.undo(current, self.scale) {
            Some(snapshot) => {
                self.restore(snapshot)?;
                info!("Undo ({})", self.history);
                Ok(true)
            }
            None => {
                debug!("Nothing to undo");
                Ok(false)
            }
        }
    }

    /// Re-apply the last undone action. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool> {
        self.ensure_loaded()?;
        let current = self.processor.image()?;
        match self.history.redo(current, self.scale) {
            Some(snapshot) => {
                self.restore(snapshot)?;
                info!("Redo ({})", self.history);
                Ok(true)
            }
            None => {
                debug!("Nothing to redo");
                Ok(false)
            }
        }
    }

    fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        let (image, scale) = snapshot.into_parts();
        self.processor.replace_current(image)?;
        self.scale = scale;
        Ok(())
    }

    /// Back to the loaded image at default zoom, with an empty history.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_loaded()?;
        self.processor.reset()?;
        self.history.clear();
        self.scale = DEFAULT_SCALE;
        Ok(())
    }

    /// Dimensions of the working image scaled by the current zoom.
    pub fn display_size(&self) -> Result<Size> {
        self.processor.dimensions()?.percent(self.scale)
    }

    /// One-line summary for a status bar.
    pub fn status_line(&self) -> String {
        match self.processor.dimensions() {
            Ok(size) => format!(
                "Image Loaded | {} x {} | Zoom: {}%",
                size.w, size.h, self.scale
            ),
            Err(_) => "No image loaded".to_string(),
        }
    }
}
