//! Headless session driver: replays a scripted input session and reports the
//! resulting canvas.

mod render;
mod script;

use clap::Parser;
use render::LogRenderer;
use sketchpad_core::{EditorConfig, EditorError, Element};
use sketchpad_render::{RenderContext, RendererError, render_scene};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "sketchpad")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON script of input steps to replay
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Editor configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Session driver errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Input port closed")]
    PortClosed,
}

fn read_file(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig, AppError> {
    match path {
        Some(path) => {
            let config = serde_json::from_str(&read_file(path)?)?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(EditorConfig::default()),
    }
}

fn describe(element: &Element) -> String {
    let a = element.anchors();
    let extra = match element {
        Element::Freehand(stroke) => format!(" [{} points]", stroke.len()),
        Element::Text(text) => format!(" {:?}", text.content()),
        Element::Line(_) | Element::Rectangle(_) => String::new(),
    };
    format!(
        "{} {} ({:.1}, {:.1}) - ({:.1}, {:.1}){}",
        element.kind(),
        element.id(),
        a.x1,
        a.y1,
        a.x2,
        a.y2,
        extra
    )
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = load_config(args.config.as_deref())?;
    let steps = script::parse_script(&read_file(&args.script)?)?;
    log::info!("Replaying {} steps from {}", steps.len(), args.script.display());

    let session = script::replay(config, &steps)?;
    let editor = session.editor();

    let mut renderer = LogRenderer::default();
    let drawn = render_scene(&mut renderer, &RenderContext::from_editor(editor))?;

    let history = editor.history();
    println!(
        "{} elements ({} drawn), history step {} of {}, tool {}, action {:?}",
        editor.elements().len(),
        drawn,
        history.index() + 1,
        history.len(),
        editor.tool().name(),
        editor.action()
    );
    let camera = editor.camera();
    println!(
        "camera: pan ({:.1}, {:.1}), zoom {:.2}",
        camera.offset.x,
        camera.offset.y,
        camera.scale()
    );
    for (i, element) in editor.store().iter().enumerate() {
        println!("{:>3}: {}", i, describe(element));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
