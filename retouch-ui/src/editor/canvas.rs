// Image canvas for the editor.
// Shows the working image fitted to the available space with the current zoom,
// or a clickable upload placeholder when nothing is loaded.

use egui::{Align2, Color32, ColorImage, FontId, Sense, TextureHandle, TextureOptions, Vec2};
use image::RgbImage;
use tracing::{debug, info, trace};

use super::widgets::ClickHandler;
use crate::config::UiConfig;

/// Anything that can draw itself into a [`egui::Ui`].
pub trait Render {
    fn render(&mut self, ui: &mut egui::Ui);
}

pub struct ImageCanvas {
    image: Option<ColorImage>,
    texture: Option<TextureHandle>,
    texture_dirty: bool,
    zoom_percent: u32,
    background: Color32,
    placeholder_text: String,
    placeholder_color: Color32,
    icon_color: Color32,
    /// Called when the placeholder is clicked.
    pub on_upload_click: Option<ClickHandler>,
}

impl ImageCanvas {
    pub fn new(config: &UiConfig) -> Self {
        info!("Creating image canvas");
        Self {
            image: None,
            texture: None,
            texture_dirty: false,
            zoom_percent: config.zoom_default,
            background: config.palette.dark_bg,
            placeholder_text: config.placeholder_text.clone(),
            placeholder_color: config.palette.subtle_text,
            icon_color: config.palette.primary,
            on_upload_click: None,
        }
    }

    /// Replace the displayed image.
    pub fn update(&mut self, image: &RgbImage) {
        let size = [image.width() as usize, image.height() as usize];
        debug!("Canvas image updated to {}x{}", size[0], size[1]);
        self.image = Some(ColorImage::from_rgb(size, image.as_raw()));
        self.texture_dirty = true;
    }

    pub fn clear(&mut self) {
        info!("Clearing canvas");
        self.image = None;
        self.texture = None;
        self.texture_dirty = false;
    }

    pub fn set_zoom(&mut self, percent: u32) {
        trace!("Canvas zoom set to {}%", percent);
        self.zoom_percent = percent;
    }

    pub fn zoom(&self) -> u32 {
        self.zoom_percent
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Size of the shown image in pixels, if any.
    pub fn image_size(&self) -> Option<[usize; 2]> {
        self.image.as_ref().map(|img| img.size)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        let image = self.image.as_ref()?;
        let [w, h] = image.size;
        if x >= w || y >= h {
            return None;
        }
        Some(image.pixels[y * w + x])
    }

    /// Fire the upload handler, if one is set. Returns whether it ran.
    pub fn click_upload(&mut self) -> bool {
        match self.on_upload_click.as_mut() {
            Some(handler) => {
                debug!("Upload placeholder clicked");
                handler();
                true
            }
            None => false,
        }
    }

    fn texture_for(&mut self, ctx: &egui::Context) -> Option<&TextureHandle> {
        if self.texture_dirty || self.texture.is_none() {
            let image = self.image.clone()?;
            trace!("Uploading canvas texture");
            self.texture = Some(ctx.load_texture("retouch-canvas", image, TextureOptions::LINEAR));
            self.texture_dirty = false;
        }
        self.texture.as_ref()
    }

    fn render_placeholder(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, self.background);
        if rect.width() < 10.0 || rect.height() < 10.0 {
            return;
        }

        let center = rect.center();
        painter.text(
            center - Vec2::new(0.0, 42.0),
            Align2::CENTER_CENTER,
            "📤",
            FontId::proportional(32.0),
            self.icon_color,
        );
        painter.text(
            center + Vec2::new(0.0, 18.0),
            Align2::CENTER_CENTER,
            &self.placeholder_text,
            FontId::proportional(12.0),
            self.placeholder_color,
        );

        if response.clicked() {
            self.click_upload();
        }
    }
}

impl Render for ImageCanvas {
    fn render(&mut self, ui: &mut egui::Ui) {
        let Some([img_w, img_h]) = self.image_size() else {
            self.render_placeholder(ui);
            return;
        };

        let available = ui.available_size();
        let size = fit_size(available, [img_w, img_h], self.zoom_percent);
        let zoom = self.zoom_percent;
        let background = self.background;
        let Some(texture) = self.texture_for(ui.ctx()) else {
            return;
        };
        let id = texture.id();

        egui::Frame::new().fill(background).show(ui, |ui| {
            ui.centered_and_justified(|ui| {
                ui.image((id, size));
            });
        });
        trace!(
            "Rendered {}x{} image at {:.0}x{:.0} ({}%)",
            img_w,
            img_h,
            size.x,
            size.y,
            zoom
        );
    }
}

/// Fit `image` into `available`, then apply `zoom_percent`. Never smaller than 1x1.
pub fn fit_size(available: Vec2, image: [usize; 2], zoom_percent: u32) -> Vec2 {
    let (img_w, img_h) = (image[0].max(1) as f32, image[1].max(1) as f32);
    let fit = (available.x / img_w).min(available.y / img_h).max(0.0);
    let scale = fit * zoom_percent as f32 / 100.0;
    Vec2::new(
        (img_w * scale).floor().max(1.0),
        (img_h * scale).floor().max(1.0),
    )
}
