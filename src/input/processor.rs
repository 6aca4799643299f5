//! Folds raw input events into per-frame input.
//!
//! The `InputProcessor` owns all transient pointer state (press position,
//! drag detection, click suppression) plus the frame's pending key actions
//! and resize. The scheduler drains its input port into the processor and
//! takes one [`FrameInput`] per frame.

use glam::Vec2;

use super::event::InputEvent;
use super::gesture::PointerGesture;
use super::KeyAction;

/// Press movement (squared pixels) beyond which a press becomes a drag.
const DRAG_THRESHOLD_SQ: f32 = 1.0;

/// Everything the frame step consumes from input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Accumulated pointer gesture.
    pub gesture: PointerGesture,
    /// Key actions in arrival order.
    pub actions: Vec<KeyAction>,
    /// Latest surface size, if it changed.
    pub resize: Option<(u32, u32)>,
}

/// Tracks the primary button between press and release.
#[derive(Debug, Clone, Copy)]
struct Press {
    start: Vec2,
    last: Vec2,
    dragged: bool,
}

/// Converts raw [`InputEvent`]s into [`FrameInput`].
#[derive(Debug, Default)]
pub struct InputProcessor {
    press: Option<Press>,
    /// Release point of a drag that ended this frame. A click landing
    /// there is the drag's own release and must not select.
    drag_release: Option<Vec2>,
    gesture: PointerGesture,
    actions: Vec<KeyAction>,
    resize: Option<(u32, u32)>,
}

impl InputProcessor {
    /// Create a processor with no pending input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the primary button is currently held.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Fold one event into the pending frame input.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::DragStart { x, y } => {
                let Some(p) = finite_point(x, y) else { return };
                self.press = Some(Press {
                    start: p,
                    last: p,
                    dragged: false,
                });
                self.drag_release = None;
            }
            InputEvent::DragMove { x, y } => {
                if let Some(p) = finite_point(x, y) {
                    self.track_press(p);
                }
            }
            InputEvent::DragEnd { x, y } => {
                if let Some(p) = finite_point(x, y) {
                    self.track_press(p);
                }
                if let Some(press) = self.press.take() {
                    self.drag_release = press.dragged.then_some(press.last);
                }
            }
            InputEvent::Wheel { delta } => {
                if delta.is_finite() {
                    self.gesture.wheel += delta;
                } else {
                    log::debug!("dropping non-finite wheel delta");
                }
            }
            InputEvent::Click { x, y } => self.handle_click(x, y),
            InputEvent::Key(action) => self.actions.push(action),
            InputEvent::Resized { width, height } => {
                self.resize = Some((width, height));
            }
        }
    }

    /// Take the input accumulated since the previous call. A press in
    /// progress carries over; its deltas and any pending drag release do
    /// not.
    pub fn take_frame(&mut self) -> FrameInput {
        self.drag_release = None;
        FrameInput {
            gesture: self.gesture.take(),
            actions: std::mem::take(&mut self.actions),
            resize: self.resize.take(),
        }
    }

    fn track_press(&mut self, p: Vec2) {
        let Some(press) = self.press.as_mut() else {
            return;
        };
        self.gesture.drag += p - press.last;
        press.last = p;
        if (p - press.start).length_squared() > DRAG_THRESHOLD_SQ {
            press.dragged = true;
        }
    }

    fn handle_click(&mut self, x: f32, y: f32) {
        let release = self.drag_release.take();
        let Some(p) = finite_point(x, y) else { return };
        if release.is_some_and(|r| (p - r).length_squared() <= DRAG_THRESHOLD_SQ) {
            log::trace!("click after drag ignored");
            return;
        }
        self.gesture.click = Some(p);
    }
}

fn finite_point(x: f32, y: f32) -> Option<Vec2> {
    let p = Vec2::new(x, y);
    p.is_finite().then_some(p)
}
