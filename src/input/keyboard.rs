use serde::{Deserialize, Serialize};

/// Simulation-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_playback = "Space"
/// clear_selection = "Escape"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Play or pause orbital motion.
    TogglePlayback,
    /// Dismiss the current selection.
    ClearSelection,
    /// Return the camera to its initial free-orbit pose.
    ResetCamera,
    /// Double the time-scale.
    FasterTime,
    /// Halve the time-scale.
    SlowerTime,
}
