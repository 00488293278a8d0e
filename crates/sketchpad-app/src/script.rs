//! Scripted input sessions.

use crate::AppError;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use sketchpad_core::{
    ChannelPort, Deferred, Editor, EditorConfig, InputEvent, KeyEvent, MouseButton, PointerEvent,
    Session, ToolKind, input_channel,
};

fn left() -> MouseButton {
    MouseButton::Left
}

/// One step of a scripted session. Pointer coordinates are screen units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Down {
        x: f64,
        y: f64,
        #[serde(default = "left")]
        button: MouseButton,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default = "left")]
        button: MouseButton,
    },
    Press {
        key: String,
    },
    Release {
        key: String,
    },
    Wheel {
        dx: f64,
        dy: f64,
    },
    Tool {
        tool: ToolKind,
    },
    /// Blur the text overlay with its final contents.
    FinishText {
        text: String,
    },
    Undo,
    Redo,
    Zoom {
        delta: f64,
    },
}

impl Step {
    /// Raw input this step delivers through the port, if any.
    fn input_event(&self) -> Option<InputEvent> {
        let event = match self {
            Step::Down { x, y, button } => InputEvent::Pointer(PointerEvent::Down {
                position: Point::new(*x, *y),
                button: *button,
            }),
            Step::Move { x, y } => InputEvent::Pointer(PointerEvent::Move {
                position: Point::new(*x, *y),
            }),
            Step::Up { x, y, button } => InputEvent::Pointer(PointerEvent::Up {
                position: Point::new(*x, *y),
                button: *button,
            }),
            Step::Press { key } => InputEvent::Key(KeyEvent::Pressed(key.clone())),
            Step::Release { key } => InputEvent::Key(KeyEvent::Released(key.clone())),
            Step::Wheel { dx, dy } => InputEvent::Wheel {
                delta: Vec2::new(*dx, *dy),
            },
            Step::Tool { .. }
            | Step::FinishText { .. }
            | Step::Undo
            | Step::Redo
            | Step::Zoom { .. } => return None,
        };
        Some(event)
    }
}

/// Parse a JSON array of steps.
pub fn parse_script(source: &str) -> Result<Vec<Step>, AppError> {
    Ok(serde_json::from_str(source)?)
}

fn run_deferred(editor: &mut Editor) {
    for work in editor.take_deferred() {
        match work {
            Deferred::FocusTextEditor { id, initial_text } => {
                let overlay = editor.text_overlay();
                log::info!(
                    "Text overlay for {} focused with {:?} at {:?}",
                    id,
                    initial_text,
                    overlay.map(|o| o.position)
                );
            }
        }
    }
}

/// Replay `steps` through an attached input port.
pub fn replay(config: EditorConfig, steps: &[Step]) -> Result<Session<ChannelPort>, AppError> {
    let (event_tx, port) = input_channel();
    let mut session = Session::new(port, Editor::new(config));

    for step in steps {
        log::trace!("Step {:?}", step);
        if let Some(event) = step.input_event() {
            event_tx.send(event).map_err(|_| AppError::PortClosed)?;
            session.pump()?;
        } else {
            let editor = session.editor_mut();
            match step {
                Step::Tool { tool } => editor.set_tool(*tool),
                Step::FinishText { text } => editor.finish_text_edit(text)?,
                Step::Undo => {
                    editor.undo();
                }
                Step::Redo => {
                    editor.redo();
                }
                Step::Zoom { delta } => editor.zoom(*delta),
                _ => {}
            }
        }
        run_deferred(session.editor_mut());
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchpad_core::{Action, Anchors, ElementKind, InputPort};

    const SCRIPT: &str = r#"[
        { "step": "tool", "tool": "rectangle" },
        { "step": "down", "x": 50, "y": 50 },
        { "step": "move", "x": 10, "y": 10 },
        { "step": "up", "x": 10, "y": 10 },
        { "step": "tool", "tool": "text" },
        { "step": "down", "x": 100, "y": 200 },
        { "step": "up", "x": 100, "y": 200 },
        { "step": "finish_text", "text": "note" }
    ]"#;

    #[test]
    fn test_parse_script() {
        let steps = parse_script(SCRIPT).unwrap();
        assert_eq!(steps.len(), 8);
        assert_eq!(
            steps[1],
            Step::Down {
                x: 50.0,
                y: 50.0,
                button: MouseButton::Left
            }
        );
        assert_eq!(steps[4], Step::Tool { tool: ToolKind::Text });
    }

    #[test]
    fn test_parse_rejects_unknown_step() {
        assert!(matches!(
            parse_script(r#"[{ "step": "erase" }]"#),
            Err(AppError::Json(_))
        ));
    }

    #[test]
    fn test_replay_script() {
        let steps = parse_script(SCRIPT).unwrap();
        let session = replay(EditorConfig::default(), &steps).unwrap();
        let editor = session.editor();

        assert_eq!(editor.elements().len(), 2);
        assert_eq!(editor.elements()[0].anchors(), Anchors::new(10.0, 10.0, 50.0, 50.0));
        assert_eq!(editor.elements()[1].kind(), ElementKind::Text);
        assert_eq!(editor.action(), Action::Idle);
        assert!(session.port().is_attached());
    }

    #[test]
    fn test_replay_undo_and_shortcuts() {
        let steps = parse_script(
            r#"[
                { "step": "down", "x": 0, "y": 0 },
                { "step": "up", "x": 20, "y": 20 },
                { "step": "press", "key": "Control" },
                { "step": "press", "key": "z" },
                { "step": "release", "key": "z" },
                { "step": "release", "key": "Control" },
                { "step": "press", "key": "3" }
            ]"#,
        )
        .unwrap();
        let session = replay(EditorConfig::default(), &steps).unwrap();
        assert!(session.editor().elements().is_empty());
        assert_eq!(session.editor().tool(), ToolKind::Rectangle);
        assert!(session.editor().history().can_redo());
    }
}
