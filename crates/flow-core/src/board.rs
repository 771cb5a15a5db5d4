use serde::{Deserialize, Serialize};

/// Result of toggling a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The cell was empty and now holds the given path number.
    Placed(u16),
    /// The cell held a number and is now empty again.
    Cleared(u16),
    /// Both endpoints of the given number already exist elsewhere;
    /// the board was left untouched.
    Rejected(u16),
}

/// Rectangular endpoint grid. 0 = empty, n > 0 = endpoint of path n.
///
/// Each positive number may occupy at most two cells; `toggle`
/// enforces that, so the invariant holds after any toggle sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    h: usize,
    w: usize,
    cells: Vec<u16>,
}

impl Board {
    /// All-zero board. Dimensions are clamped to at least 1.
    pub fn new(h: usize, w: usize) -> Self {
        let h = h.max(1);
        let w = w.max(1);
        Self {
            h,
            w,
            cells: vec![0; h * w],
        }
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, r: usize, c: usize) -> u16 {
        self.cells[r * self.w + c]
    }

    /// How many cells currently hold `n`.
    pub fn count_of(&self, n: u16) -> usize {
        self.cells.iter().filter(|&&v| v == n).count()
    }

    /// Toggle a cell: clear it if occupied, otherwise try to place `n`.
    /// Placement is refused once two endpoints of `n` exist.
    pub fn toggle(&mut self, r: usize, c: usize, n: u16) -> ToggleOutcome {
        let idx = r * self.w + c;
        let existing = self.cells[idx];
        if existing != 0 {
            self.cells[idx] = 0;
            return ToggleOutcome::Cleared(existing);
        }
        if self.count_of(n) >= 2 {
            return ToggleOutcome::Rejected(n);
        }
        self.cells[idx] = n;
        ToggleOutcome::Placed(n)
    }

    /// Row-by-row copy, the shape the solve request wants.
    pub fn rows(&self) -> Vec<Vec<u16>> {
        self.cells.chunks(self.w).map(|row| row.to_vec()).collect()
    }
}
