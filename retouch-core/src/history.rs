// Undo/redo history for the editor.

use image::RgbImage;
use std::fmt;
use tracing::{debug, trace};

/// A saved editor state: the pixels plus the zoom percentage shown with them.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub image: RgbImage,
    pub scale: u32,
}

impl Snapshot {
    pub fn new(image: RgbImage, scale: u32) -> Self {
        Self { image, scale }
    }

    pub fn into_parts(self) -> (RgbImage, u32) {
        (self.image, self.scale)
    }
}

/// Linear two-stack history. A new save drops everything that was undone.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of `image` and `scale` as the newest undo step.
    pub fn save(&mut self, image: &RgbImage, scale: u32) {
        self.record(Snapshot::new(image.clone(), scale));
    }

    /// Same as [`History::save`] for a snapshot the caller already owns.
    pub fn record(&mut self, snapshot: Snapshot) {
        trace!(
            "Recording {}x{} snapshot at {}%",
            snapshot.image.width(),
            snapshot.image.height(),
            snapshot.scale
        );
        self.undo.push(snapshot);
        if !self.redo.is_empty() {
            debug!("Discarding {} redo step(s)", self.redo.len());
            self.redo.clear();
        }
    }

    /// Step back. The current state is kept on the redo stack.
    pub fn undo(&mut self, current: &RgbImage, scale: u32) -> Option<Snapshot> {
        let previous = self.undo.pop()?;
        self.redo.push(Snapshot::new(current.clone(), scale));
        debug!("Undo: {}", self);
        Some(previous)
    }

    /// Step forward again. The current state is kept on the undo stack.
    pub fn redo(&mut self, current: &RgbImage, scale: u32) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push(Snapshot::new(current.clone(), scale));
        debug!("Redo: {}", self);
        Some(next)
    }

    pub fn clear(&mut self) {
        debug!("Clearing history ({})", self);
        self.undo.clear();
        self.redo.clear();
    }

    /// Number of undo steps available.
    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "History(undo={}, redo={})", self.undo.len(), self.redo.len())
    }
}
