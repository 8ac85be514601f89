// Status bar and pop-up notifications.

use egui::{Color32, RichText};
use retouch_core::Error;
use tracing::debug;

use crate::config::Palette;

pub const NO_IMAGE_TEXT: &str = "No image loaded";

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBar {
    text: String,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self {
            text: NO_IMAGE_TEXT.to_string(),
        }
    }
}

impl StatusBar {
    pub fn update(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.label(&self.text);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A message the user has to dismiss.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn from_error(err: &Error) -> Self {
        let (title, message) = match err {
            Error::NoImage => ("No image", "Load an image first.".to_string()),
            other => ("Error", other.to_string()),
        };
        Self {
            title: title.to_string(),
            message,
            severity: Severity::Error,
        }
    }

    /// Draw as a small window. Returns `true` once the user dismissed it.
    pub fn show(&self, ctx: &egui::Context, palette: &Palette) -> bool {
        let mut dismissed = false;
        let color: Color32 = match self.severity {
            Severity::Info => palette.info,
            Severity::Error => palette.danger,
        };
        egui::Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(RichText::new(&self.message).color(color));
                if ui.button("OK").clicked() {
                    debug!("Notification '{}' dismissed", self.title);
                    dismissed = true;
                }
            });
        dismissed
    }
}
