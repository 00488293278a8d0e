//! Interaction state machine driving the canvas.

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::geometry::{self, CursorHint, PositionTag};
use crate::history::{CommitMode, History};
use crate::input::{InputEvent, InputState, KeyEvent, MouseButton, PointerEvent};
use crate::shapes::{
    Anchors, ApproxTextMeasure, Element, ElementError, ElementId, ElementKind, PathPrimitives,
    PrimitiveBuilder, TEXT_FONT_SIZE, TextMeasure,
};
use crate::store::ElementStore;
use crate::tools::ToolKind;
use kurbo::{Point, Size, Vec2};
use std::collections::VecDeque;
use thiserror::Error;

/// Zoom change per wheel unit while Ctrl is held.
pub const ZOOM_WHEEL_FACTOR: f64 = 0.01;

/// Net displacement below which a text drag counts as a click.
const CLICK_EPSILON: f64 = 1e-6;

/// Vertical gap between a text box and its edit overlay, in world units.
const OVERLAY_LIFT: f64 = 2.0;

/// Editor errors. Any of these means the caller broke the editor's contract.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Element(#[from] ElementError),
    #[error("Element {0} is not a text element")]
    NotText(ElementId),
}

pub type EditorResult<T> = Result<T, EditorError>;

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    Idle,
    Drawing,
    Moving,
    Resizing,
    Panning,
    EditingText,
}

/// Pointer-to-element offset captured when a drag starts.
#[derive(Debug, Clone, PartialEq)]
pub enum GrabOffset {
    /// Offset from `(x1, y1)`.
    Single(Vec2),
    /// One offset per freehand point.
    PerPoint(Vec<Vec2>),
}

/// The element under manipulation, as it was when the gesture started.
#[derive(Debug, Clone)]
pub struct SelectedElement {
    pub element: Element,
    pub tag: Option<PositionTag>,
    /// `None` for elements just created by a drawing tool.
    pub grab: Option<GrabOffset>,
}

impl SelectedElement {
    pub fn id(&self) -> ElementId {
        self.element.id()
    }
}

/// Work the host must perform once its UI has caught up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Focus the text overlay and seed it with `initial_text`.
    FocusTextEditor {
        id: ElementId,
        initial_text: String,
    },
}

/// Placement of the in-place text editor, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOverlay {
    pub element_id: ElementId,
    pub position: Point,
    pub font_size: f64,
}

/// Owns the element history, viewport and selection, and turns raw input
/// into edits.
pub struct Editor {
    config: EditorConfig,
    history: History<ElementStore>,
    camera: Camera,
    input: InputState,
    tool: ToolKind,
    action: Action,
    selection: Option<SelectedElement>,
    /// World point where the current pan started.
    pan_start: Point,
    cursor: CursorHint,
    deferred: VecDeque<Deferred>,
    primitives: Box<dyn PrimitiveBuilder>,
    measure: Box<dyn TextMeasure>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with path primitives and approximate text measurement.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_collaborators(
            config,
            Box::new(PathPrimitives),
            Box::new(ApproxTextMeasure::default()),
        )
    }

    /// Create an editor with host-provided primitive building and text measurement.
    pub fn with_collaborators(
        config: EditorConfig,
        primitives: Box<dyn PrimitiveBuilder>,
        measure: Box<dyn TextMeasure>,
    ) -> Self {
        let mut camera = Camera::new().with_limits(config.min_zoom, config.max_zoom);
        camera.set_viewport_size(Size::new(config.viewport.width, config.viewport.height));
        let history = History::new(ElementStore::new()).with_limit(config.history_limit);
        Self {
            tool: config.default_tool,
            config,
            history,
            camera,
            input: InputState::new(),
            action: Action::Idle,
            selection: None,
            pan_start: Point::ZERO,
            cursor: CursorHint::Default,
            deferred: VecDeque::new(),
            primitives,
            measure,
        }
    }

    /// Dispatch a raw input event.
    pub fn handle_event(&mut self, event: &InputEvent) -> EditorResult<()> {
        match event {
            InputEvent::Pointer(PointerEvent::Down { position, button }) => {
                self.pointer_down(*position, *button)
            }
            InputEvent::Pointer(PointerEvent::Move { position }) => self.pointer_move(*position),
            InputEvent::Pointer(PointerEvent::Up { position, button }) => {
                self.pointer_up(*position, *button)
            }
            InputEvent::Key(key) => {
                self.handle_key(key);
                Ok(())
            }
            InputEvent::Wheel { delta } => {
                self.handle_wheel(*delta);
                Ok(())
            }
        }
    }

    /// Pointer pressed at a screen position.
    pub fn pointer_down(&mut self, screen: Point, button: MouseButton) -> EditorResult<()> {
        self.input.handle_pointer_event(&PointerEvent::Down {
            position: screen,
            button,
        });
        // One gesture at a time; text editing ends only through blur
        if self.action != Action::Idle {
            log::debug!("Pointer down ignored while {:?}", self.action);
            return Ok(());
        }

        let point = self.camera.screen_to_world(screen);
        if self.tool == ToolKind::Pan || button == MouseButton::Middle || self.input.is_space_held() {
            self.pan_start = point;
            self.set_action(Action::Panning);
            return Ok(());
        }

        if self.tool.is_drawing() {
            self.begin_drawing(point)
        } else {
            self.begin_selection(point)
        }
    }

    /// Pointer moved to a screen position.
    pub fn pointer_move(&mut self, screen: Point) -> EditorResult<()> {
        self.input
            .handle_pointer_event(&PointerEvent::Move { position: screen });
        let point = self.camera.screen_to_world(screen);

        match self.action {
            Action::Panning => {
                let delta = point - self.pan_start;
                self.camera.pan_by(delta);
                log::trace!("Pan offset now {:?}", self.camera.offset);
                Ok(())
            }
            Action::Drawing => self.extend_drawing(point),
            Action::Moving => self.move_selection(point),
            Action::Resizing => self.resize_selection(point),
            Action::Idle if self.tool == ToolKind::Selection => {
                let hit = geometry::hit_test(point, self.elements(), self.config.hit_order);
                self.cursor = geometry::cursor_for(hit.map(|h| h.tag));
                Ok(())
            }
            Action::Idle | Action::EditingText => Ok(()),
        }
    }

    /// Pointer released at a screen position.
    pub fn pointer_up(&mut self, screen: Point, button: MouseButton) -> EditorResult<()> {
        self.input.handle_pointer_event(&PointerEvent::Up {
            position: screen,
            button,
        });
        if self.action == Action::EditingText {
            return Ok(());
        }
        let point = self.camera.screen_to_world(screen);

        if self.action == Action::Moving && self.is_text_click(point) {
            if let Some(Element::Text(text)) = self.selection.as_ref().map(|s| &s.element) {
                self.deferred.push_back(Deferred::FocusTextEditor {
                    id: text.id(),
                    initial_text: text.content().to_string(),
                });
            }
            self.set_action(Action::EditingText);
            return Ok(());
        }

        if matches!(self.action, Action::Drawing | Action::Resizing) {
            self.normalize_selected()?;
        }
        self.set_action(Action::Idle);
        self.selection = None;
        Ok(())
    }

    fn is_text_click(&self, point: Point) -> bool {
        match &self.selection {
            Some(SelectedElement {
                element: Element::Text(text),
                grab: Some(GrabOffset::Single(offset)),
                ..
            }) => (point - *offset - text.anchors.start()).hypot() < CLICK_EPSILON,
            _ => false,
        }
    }

    fn begin_selection(&mut self, point: Point) -> EditorResult<()> {
        let Some(hit) = geometry::hit_test(point, self.elements(), self.config.hit_order) else {
            return Ok(());
        };
        let element = self
            .store()
            .get(hit.id)
            .cloned()
            .ok_or(ElementError::NotFound(hit.id))?;

        // Checkpoint so the drag that follows is its own undo step
        self.commit(self.store().clone(), CommitMode::Append);

        let grab = match &element {
            Element::Freehand(freehand) => {
                GrabOffset::PerPoint(freehand.points.iter().map(|p| point - *p).collect())
            }
            other => GrabOffset::Single(point - other.anchors().start()),
        };
        log::debug!("Selected {} {} at {:?}", element.kind(), element.id(), hit.tag);
        self.selection = Some(SelectedElement {
            element,
            tag: Some(hit.tag),
            grab: Some(grab),
        });
        self.set_action(if hit.tag == PositionTag::Inside {
            Action::Moving
        } else {
            Action::Resizing
        });
        Ok(())
    }

    fn begin_drawing(&mut self, point: Point) -> EditorResult<()> {
        let kind = ElementKind::try_from(self.tool)?;
        let element = Element::create(
            kind,
            Anchors::from_points(point, point),
            self.primitives.as_ref(),
        );
        let id = element.id();

        let mut store = self.store().clone();
        store.push(element.clone());
        self.commit(store, CommitMode::Append);

        self.selection = Some(SelectedElement {
            element,
            tag: None,
            grab: None,
        });
        if kind == ElementKind::Text {
            self.deferred.push_back(Deferred::FocusTextEditor {
                id,
                initial_text: String::new(),
            });
            self.set_action(Action::EditingText);
        } else {
            self.set_action(Action::Drawing);
        }
        Ok(())
    }

    fn extend_drawing(&mut self, point: Point) -> EditorResult<()> {
        let mut store = self.store().clone();
        let Some(current) = store.last() else {
            return Ok(());
        };
        let id = current.id();
        match current {
            Element::Line(_) | Element::Rectangle(_) => {
                let anchors = Anchors::from_points(current.anchors().start(), point);
                let updated = current.with_anchors(anchors, self.primitives.as_ref());
                store.replace(id, updated)?;
            }
            Element::Freehand(_) => store.append_point(id, point)?,
            Element::Text(_) => return Ok(()),
        }
        self.commit(store, CommitMode::Overwrite);
        Ok(())
    }

    fn move_selection(&mut self, point: Point) -> EditorResult<()> {
        let Some(selected) = &self.selection else {
            return Ok(());
        };
        let id = selected.id();
        let moved = match (&selected.element, &selected.grab) {
            (Element::Freehand(freehand), Some(GrabOffset::PerPoint(offsets))) => {
                Element::Freehand(freehand.with_points(offsets.iter().map(|o| point - *o).collect()))
            }
            (element, Some(GrabOffset::Single(offset))) => {
                let anchors = element.anchors().moved_to(point - *offset);
                element.with_anchors(anchors, self.primitives.as_ref())
            }
            _ => return Ok(()),
        };

        let mut store = self.store().clone();
        store.replace(id, moved)?;
        self.commit(store, CommitMode::Overwrite);
        Ok(())
    }

    fn resize_selection(&mut self, point: Point) -> EditorResult<()> {
        let Some(selected) = &self.selection else {
            return Ok(());
        };
        let id = selected.id();
        let anchors = geometry::resize(selected.tag, selected.element.anchors(), point);
        let resized = selected
            .element
            .with_anchors(anchors, self.primitives.as_ref());

        let mut store = self.store().clone();
        store.replace(id, resized)?;
        self.commit(store, CommitMode::Overwrite);
        Ok(())
    }

    /// Put the selected line or rectangle into canonical anchor order.
    fn normalize_selected(&mut self) -> EditorResult<()> {
        let Some(id) = self.selection.as_ref().map(SelectedElement::id) else {
            return Ok(());
        };
        let mut store = self.store().clone();
        let current = store.get(id).ok_or(ElementError::NotFound(id))?;
        let kind = current.kind();
        if !kind.requires_normalization() {
            return Ok(());
        }
        let anchors = geometry::normalize(kind, current.anchors());
        let normalized = current.with_anchors(anchors, self.primitives.as_ref());
        store.replace(id, normalized)?;
        self.commit(store, CommitMode::Overwrite);
        Ok(())
    }

    /// Commit the overlay's text and leave text editing.
    ///
    /// The box becomes `(x1, y1)-(x1 + width, y1 + line height)` for the
    /// measured width of `text`.
    pub fn finish_text_edit(&mut self, text: &str) -> EditorResult<()> {
        if self.action != Action::EditingText {
            log::warn!("Text edit finished while not editing text ({:?})", self.action);
            return Ok(());
        }
        let Some(id) = self.selection.as_ref().map(SelectedElement::id) else {
            log::warn!("Text edit finished without a selected element");
            self.set_action(Action::Idle);
            return Ok(());
        };

        let mut store = self.store().clone();
        let Some(Element::Text(current)) = store.get(id).cloned() else {
            return match store.get(id) {
                Some(_) => Err(EditorError::NotText(id)),
                None => Err(ElementError::NotFound(id).into()),
            };
        };
        let start = current.anchors.start();
        let width = self.measure.width(text);
        let anchors = Anchors::new(
            start.x,
            start.y,
            start.x + width,
            start.y + self.config.text_line_height,
        );
        store.replace(id, Element::Text(current.with_anchors(anchors).with_content(text)))?;
        self.selection = None;
        self.commit(store, CommitMode::Append);
        self.set_action(Action::Idle);
        Ok(())
    }

    /// Apply keyboard shortcuts and track held keys.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        let newly_pressed = self.input.handle_key_event(event);
        if self.action == Action::EditingText || !newly_pressed {
            return;
        }
        let KeyEvent::Pressed(key) = event else {
            return;
        };

        if self.input.command() {
            if key.eq_ignore_ascii_case("z") {
                if self.input.shift() {
                    self.redo();
                } else {
                    self.undo();
                }
            }
        } else if let Some(tool) = ToolKind::from_shortcut(key) {
            self.set_tool(tool);
        }
    }

    /// Zoom with Ctrl held, pan otherwise.
    pub fn handle_wheel(&mut self, delta: Vec2) {
        if self.input.modifiers.ctrl {
            self.zoom(-delta.y * ZOOM_WHEEL_FACTOR);
        } else {
            self.camera.pan_by(-delta);
        }
    }

    /// Step back one snapshot. Ignored while a gesture or text edit is open.
    pub fn undo(&mut self) -> bool {
        if self.action != Action::Idle {
            log::debug!("Undo ignored while {:?}", self.action);
            return false;
        }
        let moved = self.history.undo();
        log::debug!("Undo (moved: {}, index: {})", moved, self.history.index());
        moved
    }

    /// Step forward one snapshot. Ignored while a gesture or text edit is open.
    pub fn redo(&mut self) -> bool {
        if self.action != Action::Idle {
            log::debug!("Redo ignored while {:?}", self.action);
            return false;
        }
        let moved = self.history.redo();
        log::debug!("Redo (moved: {}, index: {})", moved, self.history.index());
        moved
    }

    /// Adjust zoom additively; the result is clamped.
    pub fn zoom(&mut self, delta: f64) {
        self.camera.zoom(delta);
        log::debug!("Zoom now {:.2}", self.camera.scale());
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools. A gesture in progress keeps its element kind.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            log::debug!("Tool {} -> {}", self.tool.name(), tool.name());
        }
        self.tool = tool;
    }

    /// The current element sequence, in draw order.
    pub fn elements(&self) -> &[Element] {
        self.history.current().as_slice()
    }

    pub fn store(&self) -> &ElementStore {
        self.history.current()
    }

    pub fn history(&self) -> &History<ElementStore> {
        &self.history
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn selection(&self) -> Option<&SelectedElement> {
        self.selection.as_ref()
    }

    /// Hover cursor hint for the selection tool.
    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Id of the text element being edited, if any.
    pub fn editing_element(&self) -> Option<ElementId> {
        match self.action {
            Action::EditingText => self.selection.as_ref().map(SelectedElement::id),
            _ => None,
        }
    }

    /// Where to place the text overlay while editing.
    pub fn text_overlay(&self) -> Option<TextOverlay> {
        let id = self.editing_element()?;
        let anchors = self.store().get(id)?.anchors();
        Some(TextOverlay {
            element_id: id,
            position: self
                .camera
                .world_to_screen(Point::new(anchors.x1, anchors.y1 - OVERLAY_LIFT)),
            font_size: TEXT_FONT_SIZE * self.camera.scale(),
        })
    }

    /// Drain queued host work.
    pub fn take_deferred(&mut self) -> Vec<Deferred> {
        self.deferred.drain(..).collect()
    }

    fn set_action(&mut self, action: Action) {
        if self.action != action {
            log::debug!("Action {:?} -> {:?}", self.action, action);
        }
        self.action = action;
    }

    fn commit(&mut self, store: ElementStore, mode: CommitMode) {
        match mode {
            CommitMode::Append => log::debug!(
                "Commit {} elements as step {}",
                store.len(),
                self.history.index() + 1
            ),
            CommitMode::Overwrite => log::trace!("Overwrite step {}", self.history.index()),
        }
        self.history.commit(store, mode);
    }
}
