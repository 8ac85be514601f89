// Control panel and toolbar. Both only report what was clicked; the editor
// decides what to do with it.

use egui::{Color32, RichText, Slider};
use retouch_core::{Edit, FlipAxis};
use tracing::{debug, trace};

use super::actions::EditorAction;
use super::widgets::ActionButton;
use crate::config::UiConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub tint: Color32,
    pub buttons: Vec<ActionButton>,
}

/// Filter buttons grouped into sections, plus a reset button.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    pub sections: Vec<Section>,
    pub reset: ActionButton,
    blur_intensity: i32,
    blur_range: std::ops::RangeInclusive<i32>,
}

impl ControlPanel {
    pub fn new(config: &UiConfig) -> Self {
        let step = config.brightness_step;
        let sections = vec![
            Section {
                title: "Basic Filters",
                tint: Color32::from_rgb(0xE3, 0xF2, 0xFD),
                buttons: vec![
                    ActionButton::new(
                        "Grayscale",
                        "Converts image to black and white.",
                        EditorAction::Edit(Edit::Grayscale),
                    ),
                    ActionButton::new(
                        "Blur",
                        "Smooths the image to reduce noise.",
                        EditorAction::Edit(Edit::Blur {
                            intensity: config.blur_default,
                        }),
                    ),
                    ActionButton::new(
                        "Edge",
                        "Detects edges in the image.",
                        EditorAction::Edit(Edit::EdgeDetect),
                    ),
                ],
            },
            Section {
                title: "Adjustments",
                tint: Color32::from_rgb(0xFF, 0xF3, 0xE0),
                buttons: vec![
                    ActionButton::new(
                        "Bright -",
                        "Decreases brightness.",
                        EditorAction::Edit(Edit::Brightness { delta: -step }),
                    ),
                    ActionButton::new(
                        "Bright +",
                        "Increases brightness.",
                        EditorAction::Edit(Edit::Brightness { delta: step }),
                    ),
                    ActionButton::new(
                        "Contrast -",
                        "Reduces contrast.",
                        EditorAction::Edit(Edit::Contrast {
                            factor: config.contrast_down,
                        }),
                    ),
                    ActionButton::new(
                        "Contrast +",
                        "Increases contrast.",
                        EditorAction::Edit(Edit::Contrast {
                            factor: config.contrast_up,
                        }),
                    ),
                ],
            },
            Section {
                title: "Transform",
                tint: Color32::from_rgb(0xF3, 0xE5, 0xF5),
                buttons: vec![
                    ActionButton::new(
                        "Rotate 90",
                        "Rotates image 90 degrees.",
                        EditorAction::Edit(Edit::Rotate { angle: 90 }),
                    ),
                    ActionButton::new(
                        "Rotate 180",
                        "Rotates image upside down.",
                        EditorAction::Edit(Edit::Rotate { angle: 180 }),
                    ),
                    ActionButton::new(
                        "Rotate 270",
                        "Rotates image 270 degrees.",
                        EditorAction::Edit(Edit::Rotate { angle: 270 }),
                    ),
                    ActionButton::new(
                        "Flip H",
                        "Flips image horizontally.",
                        EditorAction::Edit(Edit::Flip {
                            axis: FlipAxis::Horizontal,
                        }),
                    ),
                    ActionButton::new(
                        "Flip V",
                        "Flips image vertically.",
                        EditorAction::Edit(Edit::Flip {
                            axis: FlipAxis::Vertical,
                        }),
                    ),
                ],
            },
        ];

        Self {
            sections,
            reset: ActionButton::new("Reset", "Back to the loaded image.", EditorAction::Reset)
                .filled(config.palette.danger),
            blur_intensity: config.blur_default,
            blur_range: config.blur_range.clone(),
        }
    }

    pub fn blur_intensity(&self) -> i32 {
        self.blur_intensity
    }

    /// Change the intensity the Blur button applies, clamped to the configured range.
    pub fn set_blur_intensity(&mut self, intensity: i32) {
        let clamped = intensity.clamp(*self.blur_range.start(), *self.blur_range.end());
        debug!("Blur intensity set to {}", clamped);
        self.blur_intensity = clamped;
        for button in self.sections.iter_mut().flat_map(|s| s.buttons.iter_mut()) {
            if let EditorAction::Edit(Edit::Blur { intensity }) = &mut button.action {
                *intensity = clamped;
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<EditorAction> {
        let mut clicked = None;
        for section in &self.sections {
            egui::Frame::group(ui.style())
                .fill(section.tint)
                .show(ui, |ui| {
                    ui.label(RichText::new(section.title).strong());
                    for button in &section.buttons {
                        if let Some(action) = button.show(ui) {
                            clicked = Some(action);
                        }
                    }
                });
        }

        let mut intensity = self.blur_intensity;
        ui.add(Slider::new(&mut intensity, self.blur_range.clone()).text("Blur intensity"));
        if intensity != self.blur_intensity {
            self.set_blur_intensity(intensity);
        }

        ui.add_space(15.0);
        if let Some(action) = self.reset.show(ui) {
            clicked = Some(action);
        }

        if let Some(action) = &clicked {
            trace!("Control panel clicked: {:?}", action);
        }
        clicked
    }
}

/// Undo/redo buttons and the zoom slider with its "Apply Resize" button.
#[derive(Debug, Clone, PartialEq)]
pub struct TopToolbar {
    zoom: u32,
    zoom_range: std::ops::RangeInclusive<u32>,
    apply_fill: Color32,
}

impl TopToolbar {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            zoom: config.zoom_default,
            zoom_range: config.zoom_range.clone(),
            apply_fill: config.palette.primary,
        }
    }

    /// Move the slider to `percent` without emitting an action.
    pub fn set_zoom(&mut self, percent: u32) {
        self.zoom = percent.clamp(*self.zoom_range.start(), *self.zoom_range.end());
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn zoom_label(&self) -> String {
        format!("{}%", self.zoom)
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<EditorAction> {
        let mut clicked = None;
        ui.horizontal(|ui| {
            if ui.button("Undo").clicked() {
                clicked = Some(EditorAction::Undo);
            }
            if ui.button("Redo").clicked() {
                clicked = Some(EditorAction::Redo);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let apply = ActionButton::new(
                    "Apply Resize",
                    "Set the display zoom.",
                    EditorAction::Zoom(self.zoom),
                )
                .filled(self.apply_fill);
                if let Some(action) = apply.show(ui) {
                    clicked = Some(action);
                }
                ui.add(Slider::new(&mut self.zoom, self.zoom_range.clone()).show_value(false));
                ui.label(self.zoom_label());
            });
        });
        clicked
    }
}
