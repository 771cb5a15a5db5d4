/// The path number the user is currently placing. Always >= 1; there
/// is no upper bound. Not tied to any cell on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathCursor(u16);

impl PathCursor {
    pub fn new() -> Self {
        Self(1)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Floor-clamped at 1.
    pub fn decrement(&mut self) {
        if self.0 > 1 {
            self.0 -= 1;
        }
    }
}

impl Default for PathCursor {
    fn default() -> Self {
        Self::new()
    }
}
