use super::KeyAction;

/// Platform-agnostic input events delivered by the host's input surface.
///
/// Coordinates are viewport pixels with the origin at the top-left.
/// Events are queued through an [`InputPort`](super::InputPort) and folded
/// into one [`FrameInput`](super::FrameInput) per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    DragStart {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Pointer moved while the primary button is held.
    DragMove {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Primary button released.
    DragEnd {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Scroll wheel (positive = zoom out).
    Wheel {
        /// Scroll amount in wheel units.
        delta: f32,
    },
    /// Click at a viewport position.
    Click {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// A bound key was pressed.
    Key(KeyAction),
    /// The render surface changed size.
    Resized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
}
