//! Cursor lock state requested by the camera rig

/// Desired cursor behavior; the window layer applies it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    /// Cursor is grabbed by the window
    pub locked: bool,
    /// Cursor is drawn
    pub visible: bool,
}

impl CursorState {
    /// Grabbed and hidden
    pub const LOCKED: Self = Self {
        locked: true,
        visible: false,
    };

    /// Free and shown
    pub const FREE: Self = Self {
        locked: false,
        visible: true,
    };
}

impl Default for CursorState {
    fn default() -> Self {
        Self::FREE
    }
}
