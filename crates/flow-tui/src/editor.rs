use flow_core::protocol::{Solution, SolveError, SolveRequest, SolveResponse, SolverOptions};
use flow_core::{Board, PathCursor, ToggleOutcome};

const DEFAULT_HEIGHT: usize = 10;
const DEFAULT_WIDTH: usize = 10;

/// Outcome of the most recent action, shown in the side panel.
#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    Idle,
    Solving,
    Solved { nodes: u64, elapsed_ms: u64 },
    NoSolution,
    /// Both endpoints of this number already exist.
    Conflict(u16),
    Error(String),
}

/// Which grid dimension a size entry edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeField {
    Height,
    Width,
}

/// In-progress numeric entry for a grid dimension. While one is open
/// it captures all key input, so the global number-cursor bindings
/// cannot fire mid-edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeInput {
    pub field: SizeField,
    pub buffer: String,
}

/// All mutable UI state: board, cursors, solver options, the last
/// solution and status. Owned by the event loop; the renderer only
/// ever sees a shared borrow.
pub struct Editor {
    pub board: Board,
    pub selected_row: usize,
    pub selected_col: usize,
    pub cursor: PathCursor,
    pub options: SolverOptions,
    pub solution: Option<Solution>,
    pub status: Status,
    pub size_input: Option<SizeInput>,
    solve_seq: u64,
    pending_seq: Option<u64>,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            board: Board::new(DEFAULT_HEIGHT, DEFAULT_WIDTH),
            selected_row: 0,
            selected_col: 0,
            cursor: PathCursor::new(),
            options: SolverOptions::default(),
            solution: None,
            status: Status::Idle,
            size_input: None,
            solve_seq: 0,
            pending_seq: None,
        }
    }

    // ── Board editing ───────────────────────────────────────────────────

    pub fn move_selection(&mut self, dr: i32, dc: i32) {
        let h = self.board.height() as i32;
        let w = self.board.width() as i32;
        self.selected_row = (self.selected_row as i32 + dr).rem_euclid(h) as usize;
        self.selected_col = (self.selected_col as i32 + dc).rem_euclid(w) as usize;
    }

    pub fn toggle_selected(&mut self) {
        self.toggle_at(self.selected_row, self.selected_col);
    }

    /// Toggle a cell with the current path number. Any toggle attempt
    /// clears prior status display first.
    pub fn toggle_at(&mut self, r: usize, c: usize) {
        if r >= self.board.height() || c >= self.board.width() {
            return;
        }
        self.status = Status::Idle;
        if let ToggleOutcome::Rejected(n) = self.board.toggle(r, c, self.cursor.value()) {
            self.status = Status::Conflict(n);
        }
    }

    /// Replace the board wholesale. The old solution is keyed to the
    /// old shape, so it is dropped along with any in-flight result.
    pub fn resize(&mut self, h: usize, w: usize) {
        self.board = Board::new(h, w);
        self.solution = None;
        self.pending_seq = None;
        self.status = Status::Idle;
        self.selected_row = self.selected_row.min(self.board.height() - 1);
        self.selected_col = self.selected_col.min(self.board.width() - 1);
    }

    // ── Size entry ──────────────────────────────────────────────────────

    pub fn open_size_input(&mut self, field: SizeField) {
        self.size_input = Some(SizeInput {
            field,
            buffer: String::new(),
        });
    }

    pub fn size_input_push(&mut self, ch: char) {
        if let Some(input) = &mut self.size_input {
            if ch.is_ascii_digit() && input.buffer.len() < 3 {
                input.buffer.push(ch);
            }
        }
    }

    pub fn size_input_pop(&mut self) {
        if let Some(input) = &mut self.size_input {
            input.buffer.pop();
        }
    }

    pub fn size_input_cancel(&mut self) {
        self.size_input = None;
    }

    /// Apply the entered dimension, minimum 1. An unparsable (empty)
    /// buffer just closes the field.
    pub fn size_input_commit(&mut self) {
        let Some(input) = self.size_input.take() else {
            return;
        };
        let Ok(v) = input.buffer.parse::<usize>() else {
            return;
        };
        let v = v.max(1);
        match input.field {
            SizeField::Height => self.resize(v, self.board.width()),
            SizeField::Width => self.resize(self.board.height(), v),
        }
    }

    // ── Solve orchestration ─────────────────────────────────────────────

    /// Snapshot board + options into a request and mark it as the one
    /// outstanding solve. Any previously displayed solution is cleared
    /// immediately; an older in-flight request is superseded, not
    /// cancelled.
    pub fn begin_solve(&mut self) -> (u64, SolveRequest) {
        self.solve_seq += 1;
        self.pending_seq = Some(self.solve_seq);
        self.solution = None;
        self.status = Status::Solving;
        (self.solve_seq, SolveRequest::new(&self.board, self.options))
    }

    /// Accept a solve result, unless a newer request has superseded it.
    pub fn finish_solve(&mut self, seq: u64, result: Result<SolveResponse, SolveError>) {
        if self.pending_seq != Some(seq) {
            return;
        }
        self.pending_seq = None;

        match result {
            Ok(resp) if resp.solved => {
                match Solution::from_response(resp, self.board.height(), self.board.width()) {
                    Ok(sol) => {
                        self.status = Status::Solved {
                            nodes: sol.nodes,
                            elapsed_ms: sol.elapsed_ms,
                        };
                        self.solution = Some(sol);
                    }
                    Err(e) => self.status = Status::Error(SolveError::from(e).to_string()),
                }
            }
            Ok(_) => self.status = Status::NoSolution,
            Err(e) => self.status = Status::Error(e.to_string()),
        }
    }

    pub fn is_solving(&self) -> bool {
        self.pending_seq.is_some()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
