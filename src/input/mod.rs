//! Input handling: event types, the per-frame gesture accumulator, the
//! processor that folds raw events into frame input, and the input port
//! hosts register with.

/// Platform-agnostic input events.
pub mod event;
/// Per-frame pointer gesture.
pub mod gesture;
/// Bindable key actions.
pub mod keyboard;
/// Listener registration and event queueing.
pub mod port;
/// Folds raw events into per-frame input.
pub mod processor;

pub use event::InputEvent;
pub use gesture::PointerGesture;
pub use keyboard::KeyAction;
pub use port::{InputPort, InputRegistration};
pub use processor::{FrameInput, InputProcessor};
