//! Error types shared by the processor, history and session.

use std::path::PathBuf;
use thiserror::Error;

/// Every failure is recoverable: the image and history are left as they were.
#[derive(Debug, Error)]
pub enum Error {
    /// An operation needed a loaded image and there was none.
    #[error("no image loaded")]
    NoImage,

    /// An argument was outside the range an operation accepts.
    #[error("invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The path was empty.
    #[error("invalid file path")]
    InvalidPath,

    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// True for failures caused by the caller's arguments rather than I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. } | Error::InvalidPath)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
