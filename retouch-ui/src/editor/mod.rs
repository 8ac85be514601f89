// Editor module for the retouch UI.
// `Editor` is the glue: widgets report actions, the session runs them,
// and the display is refreshed from the session afterwards.

pub mod actions;
pub mod canvas;
pub mod controls;
pub mod status;
pub mod widgets;

pub use actions::{dispatch, EditorAction, Outcome};
pub use canvas::{ImageCanvas, Render};
pub use controls::{ControlPanel, TopToolbar};
pub use status::{Notification, StatusBar};
pub use widgets::{ActionButton, ClickHandler};

use retouch_core::EditSession;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::config::UiConfig;

pub struct Editor {
    config: UiConfig,
    session: EditSession,
    canvas: ImageCanvas,
    controls: ControlPanel,
    toolbar: TopToolbar,
    status: StatusBar,
    notification: Option<Notification>,
    open_requested: Rc<Cell<bool>>,
    save_as_requested: bool,
}

impl Editor {
    pub fn new(config: UiConfig) -> Self {
        info!("Starting editor: {}", config.window_title);
        let open_requested = Rc::new(Cell::new(false));
        let mut canvas = ImageCanvas::new(&config);
        let flag = open_requested.clone();
        canvas.on_upload_click = Some(Box::new(move || flag.set(true)));

        Self {
            controls: ControlPanel::new(&config),
            toolbar: TopToolbar::new(&config),
            canvas,
            config,
            session: EditSession::new(),
            status: StatusBar::default(),
            notification: None,
            open_requested,
            save_as_requested: false,
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn status(&self) -> &StatusBar {
        &self.status
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// True once after the user asked to open a file (placeholder click or
    /// File → Open). The host shows its file dialog and sends `Open(path)`.
    pub fn take_open_request(&mut self) -> bool {
        self.open_requested.replace(false)
    }

    /// Ask the host for a Save As destination.
    pub fn request_save_as(&mut self) {
        debug!("Save As requested");
        self.save_as_requested = true;
    }

    /// True once after File → Save As. The host shows its save dialog and
    /// sends `SaveAs(path)`.
    pub fn take_save_as_request(&mut self) -> bool {
        std::mem::take(&mut self.save_as_requested)
    }

    /// Run one action. Failures become a notification and leave the display as is.
    pub fn handle(&mut self, action: EditorAction) -> Option<Outcome> {
        match dispatch(&mut self.session, &action, &self.config.default_save_name) {
            Ok(outcome) => {
                match &outcome {
                    Outcome::Updated => self.refresh(),
                    Outcome::Saved(path) => {
                        self.notification = Some(Notification::info(
                            "Saved",
                            format!("Image saved to {}.", path.display()),
                        ));
                    }
                    _ => {}
                }
                Some(outcome)
            }
            Err(err) => {
                warn!("{:?} failed: {}", action, err);
                self.notification = Some(Notification::from_error(&err));
                None
            }
        }
    }

    fn refresh(&mut self) {
        match self.session.processor().image() {
            Ok(image) => self.canvas.update(image),
            Err(_) if self.canvas.has_image() => self.canvas.clear(),
            Err(_) => {}
        }
        let scale = self.session.scale();
        self.canvas.set_zoom(scale);
        self.toolbar.set_zoom(scale);
        self.status.update(self.session.status_line());
    }

    /// Lay out the editor for one frame and run whatever was clicked.
    pub fn ui(&mut self, ctx: &egui::Context) -> Option<Outcome> {
        let mut action = None;

        egui::TopBottomPanel::top("retouch_menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open...").clicked() {
                        self.open_requested.set(true);
                        ui.close();
                    }
                    if ui.button("Save").clicked() {
                        action = Some(EditorAction::Save);
                        ui.close();
                    }
                    if ui.button("Save As...").clicked() {
                        self.request_save_as();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        action = Some(EditorAction::Exit);
                    }
                });
            });
            if let Some(clicked) = self.toolbar.show(ui) {
                action = Some(clicked);
            }
        });

        egui::TopBottomPanel::bottom("retouch_status").show(ctx, |ui| {
            self.status.show(ui);
        });

        egui::SidePanel::right("retouch_controls")
            .resizable(false)
            .default_width(260.0)
            .frame(egui::Frame::new().fill(self.config.palette.panel_bg))
            .show(ctx, |ui| {
                if let Some(clicked) = self.controls.show(ui) {
                    action = Some(clicked);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas.render(ui);
        });

        let dismissed = self
            .notification
            .as_ref()
            .is_some_and(|note| note.show(ctx, &self.config.palette));
        if dismissed {
            self.notification = None;
        }

        action.and_then(|action| self.handle(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use retouch_core::Edit;
    use std::fs;
    use std::path::Path;

    fn fixture(name: &str) -> std::path::PathBuf {
        let dir = Path::new("target/retouch-ui-tests");
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        RgbImage::from_pixel(40, 20, Rgb([90, 40, 10])).save(&path).unwrap();
        path
    }

    #[test]
    fn test_action_without_image_notifies() {
        let mut editor = Editor::new(UiConfig::default());
        assert!(editor
            .handle(EditorAction::Edit(Edit::Grayscale))
            .is_none());
        assert_eq!(editor.notification().unwrap().title, "No image");
        assert_eq!(editor.status().text(), "No image loaded");
    }

    #[test]
    fn test_open_edit_undo_refreshes_display() {
        let path = fixture("editor_open.png");
        let mut editor = Editor::new(UiConfig::default());

        editor.handle(EditorAction::Open(path)).unwrap();
        assert_eq!(editor.status().text(), "Image Loaded | 40 x 20 | Zoom: 100%");
        assert_eq!(editor.canvas.image_size(), Some([40, 20]));

        editor.handle(EditorAction::Edit(Edit::Rotate { angle: 90 })).unwrap();
        assert_eq!(editor.canvas.image_size(), Some([20, 40]));

        editor.handle(EditorAction::Zoom(60)).unwrap();
        assert_eq!(editor.toolbar.zoom(), 60);
        assert_eq!(editor.canvas.zoom(), 60);

        editor.handle(EditorAction::Undo).unwrap();
        assert_eq!(editor.toolbar.zoom(), 100);
        assert_eq!(editor.status().text(), "Image Loaded | 20 x 40 | Zoom: 100%");
    }

    #[test]
    fn test_save_as_shows_saved_notification() {
        let path = fixture("editor_save_as.png");
        let target = Path::new("target/retouch-ui-tests/editor_save_as_out.bmp");
        let mut editor = Editor::new(UiConfig::default());
        editor.handle(EditorAction::Open(path)).unwrap();

        let outcome = editor.handle(EditorAction::SaveAs(target.to_path_buf()));
        assert_eq!(outcome, Some(Outcome::Saved(target.to_path_buf())));
        let note = editor.notification().unwrap();
        assert_eq!(note.title, "Saved");
        assert!(note.message.contains("editor_save_as_out.bmp"));
    }

    #[test]
    fn test_save_as_request_is_taken_once() {
        let mut editor = Editor::new(UiConfig::default());
        assert!(!editor.take_save_as_request());
        editor.request_save_as();
        assert!(editor.take_save_as_request());
        assert!(!editor.take_save_as_request());
    }

    #[test]
    fn test_refresh_clears_stale_canvas() {
        let mut editor = Editor::new(UiConfig::default());
        editor.canvas.update(&RgbImage::new(4, 4));
        editor.refresh();
        assert!(!editor.canvas.has_image());
        assert_eq!(editor.status().text(), "No image loaded");
    }

    #[test]
    fn test_upload_click_requests_open() {
        let mut editor = Editor::new(UiConfig::default());
        assert!(!editor.take_open_request());
        assert!(editor.canvas.click_upload());
        assert!(editor.take_open_request());
        assert!(!editor.take_open_request());
    }

    #[test]
    fn test_frame_renders_headless() {
        let mut editor = Editor::new(UiConfig::default());
        editor.handle(EditorAction::Reset);
        let ctx = egui::Context::default();
        let mut outcome = Some(Outcome::Unchanged);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            outcome = editor.ui(ctx);
        });
        assert!(outcome.is_none());
        assert!(editor.notification().is_some());
    }
}
