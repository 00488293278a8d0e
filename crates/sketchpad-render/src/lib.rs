//! Sketchpad Render Library
//!
//! Renderer abstraction, the per-frame render pass over the element sequence,
//! and a reference freehand tessellator.

mod freehand;
mod renderer;

pub use freehand::{FREEHAND_STROKE_SIZE, outline_to_path, tessellate_freehand};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, render_scene};
