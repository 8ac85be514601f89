// Small widgets shared by the panels.

use egui::{Button, Color32, RichText, Vec2};

use super::actions::EditorAction;

/// Callback a component runs when it is clicked.
pub type ClickHandler = Box<dyn FnMut()>;

/// A labelled button that produces an [`EditorAction`] when pressed.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionButton {
    pub label: &'static str,
    pub tooltip: &'static str,
    pub action: EditorAction,
    pub fill: Option<Color32>,
}

impl ActionButton {
    pub fn new(label: &'static str, tooltip: &'static str, action: EditorAction) -> Self {
        Self {
            label,
            tooltip,
            action,
            fill: None,
        }
    }

    pub fn filled(mut self, color: Color32) -> Self {
        self.fill = Some(color);
        self
    }

    /// Draw the button; returns its action if it was clicked this frame.
    pub fn show(&self, ui: &mut egui::Ui) -> Option<EditorAction> {
        let mut button = Button::new(match self.fill {
            Some(_) => RichText::new(self.label).color(Color32::WHITE),
            None => RichText::new(self.label),
        })
        .min_size(Vec2::new(140.0, 0.0));
        if let Some(fill) = self.fill {
            button = button.fill(fill);
        }

        let response = ui.add(button).on_hover_text(self.tooltip);
        response.clicked().then(|| self.action.clone())
    }
}
