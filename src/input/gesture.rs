use glam::Vec2;

/// Pointer input accumulated over one frame.
///
/// Drag and wheel deltas are summed as events arrive and applied together
/// at the next frame boundary, then reset, so a delta is never replayed
/// into a later frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerGesture {
    /// Summed drag movement in pixels.
    pub drag: Vec2,
    /// Summed wheel delta (positive = zoom out).
    pub wheel: f32,
    /// Click position, at most one per frame (the latest wins).
    pub click: Option<Vec2>,
}

impl PointerGesture {
    /// Whether this gesture carries nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drag == Vec2::ZERO && self.wheel == 0.0 && self.click.is_none()
    }

    /// Whether any camera-affecting movement is present.
    #[must_use]
    pub fn moves_camera(&self) -> bool {
        self.drag != Vec2::ZERO || self.wheel != 0.0
    }

    /// Take the accumulated gesture, leaving an empty one behind.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_resets_accumulator() {
        let mut g = PointerGesture {
            drag: Vec2::new(3.0, -1.0),
            wheel: 2.0,
            click: Some(Vec2::new(10.0, 10.0)),
        };
        let taken = g.take();
        assert!(!taken.is_empty());
        assert!(taken.moves_camera());
        assert!(g.is_empty());
    }

    #[test]
    fn click_alone_does_not_move_camera() {
        let g = PointerGesture {
            click: Some(Vec2::ZERO),
            ..PointerGesture::default()
        };
        assert!(!g.moves_camera());
        assert!(!g.is_empty());
    }
}
