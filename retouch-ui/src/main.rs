// Desktop shell for the editor: owns the native window and the file dialogs,
// everything else happens in `retouch_ui::Editor`.

use std::path::PathBuf;

use retouch_ui::{Editor, EditorAction, Outcome, UiConfig};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct RetouchApp {
    editor: Editor,
}

impl RetouchApp {
    fn new(config: UiConfig) -> Self {
        Self {
            editor: Editor::new(config),
        }
    }

    fn pick_image(&self) -> Option<PathBuf> {
        image_dialog(self.editor.config(), "Open image").pick_file()
    }

    fn pick_save_target(&self) -> Option<PathBuf> {
        let config = self.editor.config();
        image_dialog(config, "Save image as")
            .set_file_name(config.default_save_name.clone())
            .save_file()
    }
}

fn image_dialog(config: &UiConfig, title: &str) -> rfd::FileDialog {
    rfd::FileDialog::new().set_title(title).add_filter(
        format!("Images ({})", config.file_filter()),
        config.supported_extensions.as_slice(),
    )
}

impl eframe::App for RetouchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(Outcome::Exit) = self.editor.ui(ctx) {
            info!("Exit requested");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        if self.editor.take_open_request() {
            match self.pick_image() {
                Some(path) => {
                    self.editor.handle(EditorAction::Open(path));
                }
                None => debug!("Open cancelled"),
            }
        }

        if self.editor.take_save_as_request() {
            match self.pick_save_target() {
                Some(path) => {
                    self.editor.handle(EditorAction::SaveAs(path));
                }
                None => debug!("Save As cancelled"),
            }
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retouch_editor=info,retouch_ui=info,retouch_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = UiConfig::default();
    let options = eframe::NativeOptions {
        viewport: config.viewport(),
        ..Default::default()
    };
    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(RetouchApp::new(config)))),
    )
}
