// Look and feel of the editor, built once at startup and passed down by reference.

use egui::Color32;
use retouch_core::{DEFAULT_SAVE_NAME, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, SUPPORTED_EXTENSIONS};
use std::ops::RangeInclusive;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub primary: Color32,
    pub danger: Color32,
    pub info: Color32,
    pub dark_bg: Color32,
    pub panel_bg: Color32,
    pub toolbar_bg: Color32,
    pub button_bg: Color32,
    pub button_hover: Color32,
    pub text: Color32,
    pub subtle_text: Color32,
    pub border: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color32::from_rgb(0x4C, 0xAF, 0x50),
            danger: Color32::from_rgb(0xD7, 0x2A, 0x2A),
            info: Color32::from_rgb(0x2A, 0x4F, 0xD7),
            dark_bg: Color32::from_rgb(0x2B, 0x2B, 0x2B),
            panel_bg: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            toolbar_bg: Color32::WHITE,
            button_bg: Color32::WHITE,
            button_hover: Color32::from_rgb(0xE0, 0xE0, 0xE0),
            text: Color32::from_rgb(0x33, 0x33, 0x33),
            subtle_text: Color32::from_rgb(0x9E, 0x9E, 0x9E),
            border: Color32::from_rgb(0xDD, 0xDD, 0xDD),
        }
    }
}

/// Everything the UI layer would otherwise keep in module-level constants.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    pub window_title: String,
    pub window_size: [f32; 2],
    pub supported_extensions: Vec<String>,
    pub default_save_name: String,
    pub placeholder_text: String,
    pub palette: Palette,
    pub zoom_range: RangeInclusive<u32>,
    pub zoom_default: u32,
    pub blur_range: RangeInclusive<i32>,
    pub blur_default: i32,
    /// Brightness change of the "Bright -" / "Bright +" buttons.
    pub brightness_step: i32,
    pub contrast_down: f32,
    pub contrast_up: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_title: "Retouch Image Editor".to_string(),
            window_size: [1000.0, 600.0],
            supported_extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            default_save_name: DEFAULT_SAVE_NAME.to_string(),
            placeholder_text: "Please upload an image\nClick here or use File → Open".to_string(),
            palette: Palette::default(),
            zoom_range: MIN_SCALE..=MAX_SCALE,
            zoom_default: DEFAULT_SCALE,
            blur_range: 1..=20,
            blur_default: 5,
            brightness_step: 30,
            contrast_down: 0.8,
            contrast_up: 1.2,
        }
    }
}

impl UiConfig {
    /// Whether the file extension is one the editor can open (case-insensitive).
    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                self.supported_extensions
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Native window settings for the desktop binary.
    pub fn viewport(&self) -> egui::ViewportBuilder {
        egui::ViewportBuilder::default()
            .with_title(self.window_title.clone())
            .with_inner_size(self.window_size)
            .with_min_inner_size([640.0, 400.0])
    }

    /// Filter pattern for file dialogs, e.g. `*.png *.jpg`.
    pub fn file_filter(&self) -> String {
        self.supported_extensions
            .iter()
            .map(|e| format!("*.{e}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
