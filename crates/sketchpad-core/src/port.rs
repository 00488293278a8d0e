//! Input delivery to an editor session.

use crate::editor::{Editor, EditorResult};
use crate::input::InputEvent;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Source of raw input events for an editor.
///
/// A port only delivers events between `attach` and `detach`.
pub trait InputPort {
    /// Start delivering events.
    fn attach(&mut self);

    /// Drain the events received since the last poll.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Stop delivering events.
    fn detach(&mut self);

    fn is_attached(&self) -> bool;
}

/// Input port fed through a channel.
pub struct ChannelPort {
    event_rx: Receiver<InputEvent>,
    attached: bool,
}

/// Create a channel-backed port and the sender that feeds it.
pub fn input_channel() -> (Sender<InputEvent>, ChannelPort) {
    let (event_tx, event_rx) = channel();
    (
        event_tx,
        ChannelPort {
            event_rx,
            attached: false,
        },
    )
}

impl InputPort for ChannelPort {
    fn attach(&mut self) {
        self.attached = true;
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        if !self.attached {
            return Vec::new();
        }
        self.event_rx.try_iter().collect()
    }

    fn detach(&mut self) {
        if self.attached {
            log::debug!("Input port detached");
        }
        self.attached = false;
        // Drop anything that arrived after detaching
        while self.event_rx.try_recv().is_ok() {}
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

/// An editor bound to its input port for as long as the session lives.
///
/// The port is attached on construction and detached on drop.
pub struct Session<P: InputPort> {
    port: P,
    editor: Editor,
}

impl<P: InputPort> Session<P> {
    pub fn new(mut port: P, editor: Editor) -> Self {
        port.attach();
        log::debug!("Input port attached");
        Self { port, editor }
    }

    /// Feed all pending events to the editor. Returns how many were handled.
    pub fn pump(&mut self) -> EditorResult<usize> {
        let events = self.port.poll_events();
        for event in &events {
            self.editor.handle_event(event)?;
        }
        Ok(events.len())
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn port(&self) -> &P {
        &self.port
    }
}

impl<P: InputPort> Drop for Session<P> {
    fn drop(&mut self) {
        self.port.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, PointerEvent};
    use crate::tools::ToolKind;
    use kurbo::Point;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_pump_delivers_events_in_order() {
        let (tx, port) = input_channel();
        let mut session = Session::new(port, Editor::default());
        assert!(session.port().is_attached());

        tx.send(InputEvent::Pointer(PointerEvent::Down {
            position: Point::new(0.0, 0.0),
            button: MouseButton::Left,
        }))
        .unwrap();
        tx.send(InputEvent::Pointer(PointerEvent::Move {
            position: Point::new(30.0, 40.0),
        }))
        .unwrap();
        tx.send(InputEvent::Pointer(PointerEvent::Up {
            position: Point::new(30.0, 40.0),
            button: MouseButton::Left,
        }))
        .unwrap();

        assert_eq!(session.pump().unwrap(), 3);
        assert_eq!(session.editor().elements().len(), 1);
        assert_eq!(session.pump().unwrap(), 0);
    }

    #[test]
    fn test_detached_port_delivers_nothing() {
        let (tx, mut port) = input_channel();
        tx.send(InputEvent::Wheel {
            delta: kurbo::Vec2::new(1.0, 1.0),
        })
        .unwrap();
        assert!(port.poll_events().is_empty());

        port.attach();
        port.detach();
        assert!(!port.is_attached());
        port.attach();
        assert!(port.poll_events().is_empty());
    }

    struct CountingPort {
        detached: Rc<Cell<u32>>,
    }

    impl InputPort for CountingPort {
        fn attach(&mut self) {}

        fn poll_events(&mut self) -> Vec<InputEvent> {
            Vec::new()
        }

        fn detach(&mut self) {
            self.detached.set(self.detached.get() + 1);
        }

        fn is_attached(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_session_drop_detaches() {
        let detached = Rc::new(Cell::new(0));
        {
            let mut session = Session::new(
                CountingPort {
                    detached: Rc::clone(&detached),
                },
                Editor::default(),
            );
            session.editor_mut().set_tool(ToolKind::Line);
            assert_eq!(detached.get(), 0);
        }
        assert_eq!(detached.get(), 1);
    }
}
