//! Sketchpad Core Library
//!
//! Element model, hit-testing geometry, undo history, viewport camera and the
//! interaction state machine for a pannable, zoomable sketch canvas.

pub mod camera;
pub mod config;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod input;
pub mod port;
pub mod shapes;
pub mod store;
pub mod tools;

pub use camera::Camera;
pub use config::{EditorConfig, ViewportConfig};
pub use editor::{
    Action, Deferred, Editor, EditorError, EditorResult, GrabOffset, SelectedElement, TextOverlay,
};
pub use geometry::{CursorHint, Hit, HitOrder, PositionTag};
pub use history::{CommitMode, History};
pub use input::{InputEvent, InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use port::{ChannelPort, InputPort, Session, input_channel};
pub use shapes::{Anchors, Element, ElementError, ElementId, ElementKind};
pub use store::ElementStore;
pub use tools::ToolKind;
