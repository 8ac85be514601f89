// Everything a user can ask the editor to do, and how it reaches the session.

use retouch_core::{Edit, EditSession, Result};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    Open(PathBuf),
    /// Save to the configured default file name.
    Save,
    SaveAs(PathBuf),
    Exit,
    Edit(Edit),
    Zoom(u32),
    Undo,
    Redo,
    Reset,
}

/// What the display has to do after an action ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Image or zoom changed; redraw.
    Updated,
    /// Nothing to undo/redo; the display is already current.
    Unchanged,
    Saved(PathBuf),
    Exit,
}

/// Route one action into the session.
pub fn dispatch(
    session: &mut EditSession,
    action: &EditorAction,
    default_save_name: &str,
) -> Result<Outcome> {
    debug!("Dispatching {:?}", action);
    let outcome = match action {
        EditorAction::Open(path) => {
            session.load(path)?;
            Outcome::Updated
        }
        EditorAction::Save => {
            session.save(default_save_name)?;
            Outcome::Saved(PathBuf::from(default_save_name))
        }
        EditorAction::SaveAs(path) => {
            session.save(path)?;
            Outcome::Saved(path.clone())
        }
        EditorAction::Exit => Outcome::Exit,
        EditorAction::Edit(edit) => {
            session.apply(edit)?;
            Outcome::Updated
        }
        EditorAction::Zoom(percent) => {
            session.zoom(*percent)?;
            Outcome::Updated
        }
        EditorAction::Undo => changed(session.undo()?),
        EditorAction::Redo => changed(session.redo()?),
        EditorAction::Reset => {
            session.reset()?;
            Outcome::Updated
        }
    };
    info!("{}", session.status_line());
    Ok(outcome)
}

fn changed(moved: bool) -> Outcome {
    if moved {
        Outcome::Updated
    } else {
        Outcome::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use retouch_core::Error;

    fn session() -> EditSession {
        EditSession::with_image(RgbImage::from_pixel(4, 2, Rgb([50, 60, 70])))
    }

    #[test]
    fn test_edit_then_undo_redo() {
        let mut s = session();
        let rotate = EditorAction::Edit(Edit::Rotate { angle: 90 });
        assert_eq!(dispatch(&mut s, &rotate, "out.png").unwrap(), Outcome::Updated);
        assert_eq!(dispatch(&mut s, &EditorAction::Undo, "out.png").unwrap(), Outcome::Updated);
        assert_eq!(dispatch(&mut s, &EditorAction::Undo, "out.png").unwrap(), Outcome::Unchanged);
        assert_eq!(dispatch(&mut s, &EditorAction::Redo, "out.png").unwrap(), Outcome::Updated);
        assert_eq!(s.processor().dimensions().unwrap().w, 2);
    }

    #[test]
    fn test_guard_without_image() {
        let mut s = EditSession::new();
        let err = dispatch(&mut s, &EditorAction::Edit(Edit::Grayscale), "out.png").unwrap_err();
        assert!(matches!(err, Error::NoImage));
        assert!(matches!(
            dispatch(&mut s, &EditorAction::Save, "out.png"),
            Err(Error::NoImage)
        ));
    }

    #[test]
    fn test_exit_and_zoom() {
        let mut s = session();
        assert_eq!(dispatch(&mut s, &EditorAction::Exit, "out.png").unwrap(), Outcome::Exit);
        dispatch(&mut s, &EditorAction::Zoom(40), "out.png").unwrap();
        assert_eq!(s.scale(), 40);
    }
}
