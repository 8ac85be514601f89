//! retouch-ui: egui building blocks for the image editor.
//!
//! Widgets never touch the image themselves. They return [`editor::EditorAction`]s,
//! [`editor::Editor`] runs them against a [`retouch_core::EditSession`] and
//! refreshes the canvas, toolbar and status bar from the result. The
//! `retouch-editor` binary hosts it in an eframe window.

pub mod config;
pub mod editor;

pub use config::{Palette, UiConfig};
pub use editor::{Editor, EditorAction, ImageCanvas, Outcome, Render};
