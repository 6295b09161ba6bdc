//! Interaction flags shared by the seek bar and its drawables.

/// Enabled/pressed/focused flags of the control.
///
/// Drawables receive a copy whenever the flags change and pick their colors
/// and animations from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractionState {
    /// Whether the control accepts input.
    pub enabled: bool,
    /// Whether a pointer is currently dragging the thumb.
    pub pressed: bool,
    /// Whether the control holds input focus.
    pub focused: bool,
}

impl InteractionState {
    /// Returns `true` if the control is enabled and pressed or focused.
    pub fn is_active(&self) -> bool {
        self.enabled && (self.pressed || self.focused)
    }
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            enabled: true,
            pressed: false,
            focused: false,
        }
    }
}
