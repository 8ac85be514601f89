//! `retouch` CLI - apply edits to an image without opening the editor.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use retouch_core::{Edit, EditSession, DEFAULT_SAVE_NAME};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Load an image, run edits, undo/redo and zoom steps in order, then save it.
#[derive(Parser, Debug)]
#[command(name = "retouch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image (PNG, JPEG or BMP).
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output path; the format follows the extension.
    #[arg(short, long, value_name = "OUTPUT", default_value = DEFAULT_SAVE_NAME)]
    output: PathBuf,

    /// A step: grayscale, edge, blur=N, brightness=N, contrast=F, rotate=90|180|270,
    /// flip=horizontal|vertical, resample=N, zoom=N, undo, redo or reset.
    #[arg(long = "op", value_name = "OP")]
    ops: Vec<Step>,

    /// JSON array of edits applied after the --op steps.
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Edit(Edit),
    Zoom(u32),
    Undo,
    Redo,
    Reset,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "undo" => return Ok(Step::Undo),
            "redo" => return Ok(Step::Redo),
            "reset" => return Ok(Step::Reset),
            _ => {}
        }
        if let Some(percent) = s.trim().strip_prefix("zoom=") {
            return percent
                .parse()
                .map(Step::Zoom)
                .map_err(|_| format!("invalid zoom '{percent}'"));
        }
        s.parse().map(Step::Edit).map_err(|e| e.to_string())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("retouch={log_level},retouch_core={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let mut session = EditSession::new();
    session
        .load(&args.input)
        .with_context(|| format!("open {}", args.input.display()))?;

    let mut steps = args.ops.clone();
    if let Some(script) = &args.script {
        steps.extend(load_script(script)?.into_iter().map(Step::Edit));
    }

    for (index, step) in steps.iter().enumerate() {
        apply_step(&mut session, step).with_context(|| format!("step {} ({step:?})", index + 1))?;
    }

    session
        .save(&args.output)
        .with_context(|| format!("save {}", args.output.display()))?;

    info!("{} -> {}", args.input.display(), args.output.display());
    println!("{}", session.status_line());
    Ok(())
}

fn apply_step(session: &mut EditSession, step: &Step) -> Result<()> {
    match step {
        Step::Edit(edit) => session.apply(edit)?,
        Step::Zoom(percent) => session.zoom(*percent)?,
        Step::Undo => {
            if !session.undo()? {
                info!("Nothing to undo");
            }
        }
        Step::Redo => {
            if !session.redo()? {
                info!("Nothing to redo");
            }
        }
        Step::Reset => session.reset()?,
    }
    debug!("{} | {}", session.status_line(), session.history());
    Ok(())
}

fn load_script(path: &Path) -> Result<Vec<Edit>> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read script: {}", path.display()))?;
    let edits: Vec<Edit> = serde_json::from_str(&data).context("parse edit script json")?;
    Ok(edits)
}
