//! retouch-core: image state, pixel edits and undo/redo history.
//!
//! Design rules:
//! - The loaded original is never modified; edits work on a separate copy.
//! - An edit either fully replaces the working image or fails and leaves it alone.
//! - History stores owned snapshots, so later edits cannot reach into it.
//! - Zoom is a number stored next to the pixels, not a resample of them.

pub mod edit;
pub mod error;
pub mod history;
pub mod processor;
pub mod session;
pub mod size;

pub use edit::Edit;
pub use error::{Error, Result};
pub use history::{History, Snapshot};
pub use processor::{FlipAxis, ImageProcessor, MAX_PIXELS, SUPPORTED_ROTATIONS};
pub use session::{EditSession, DEFAULT_SAVE_NAME, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};
pub use size::Size;

/// File extensions the editor opens.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];
