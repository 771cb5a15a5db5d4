use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;

/// Solver heuristics. Flat flags with no interdependencies; `use_table`
/// ("use cache") is an opaque passthrough whose semantics live in the
/// solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverOptions {
    pub allow_zigzag: bool,
    pub use_vcut: bool,
    pub use_table: bool,
    pub use_diagonals: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            allow_zigzag: false,
            use_vcut: false,
            use_table: false,
            use_diagonals: true,
        }
    }
}

/// Body of `POST /solve`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolveRequest {
    pub board: Vec<Vec<u16>>,
    pub allow_zigzag: bool,
    pub use_vcut: bool,
    pub use_table: bool,
    pub use_diagonals: bool,
}

impl SolveRequest {
    /// Snapshot a board and options into a request body.
    pub fn new(board: &Board, options: SolverOptions) -> Self {
        Self {
            board: board.rows(),
            allow_zigzag: options.allow_zigzag,
            use_vcut: options.use_vcut,
            use_table: options.use_table,
            use_diagonals: options.use_diagonals,
        }
    }
}

/// Edge graph of a solution: `right[r*w+c]` connects (r, c) to its
/// right neighbor, `down[r*w+c]` to the one below.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionEdges {
    pub h: usize,
    pub w: usize,
    pub right: Vec<bool>,
    pub down: Vec<bool>,
}

/// Body returned by the solver.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolveResponse {
    pub solved: bool,
    pub nodes: u64,
    pub elapsed_ms: f64,
    pub edges: Option<SolutionEdges>,
    pub colors: Option<Vec<u16>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("solved response is missing edges or colors")]
    MissingFields,
    #[error("solution is {got_h}x{got_w} but the board is {want_h}x{want_w}")]
    DimensionMismatch {
        got_h: usize,
        got_w: usize,
        want_h: usize,
        want_w: usize,
    },
    #[error("edge or color array length does not match the grid")]
    BadArrayLength,
}

/// Failure modes of a single solve round trip. All are terminal for
/// that request; the orchestrator never retries.
#[derive(Clone, Debug, Error)]
pub enum SolveError {
    #[error("solver unreachable: {0}")]
    Transport(String),
    #[error("solver returned HTTP {0}")]
    Status(u16),
    #[error("undecodable solver response: {0}")]
    Decode(String),
    #[error("malformed solver response: {0}")]
    Protocol(#[from] ProtocolError),
}

/// A validated, immutable solution. Only meaningful against the board
/// snapshot that produced the request, so construction checks the
/// dimensions it was solved for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub edges: SolutionEdges,
    pub colors: Vec<u16>,
    pub nodes: u64,
    pub elapsed_ms: u64,
}

impl Solution {
    /// Validate a solved response against the requesting board's shape.
    pub fn from_response(
        resp: SolveResponse,
        board_h: usize,
        board_w: usize,
    ) -> Result<Self, ProtocolError> {
        let (edges, colors) = match (resp.edges, resp.colors) {
            (Some(e), Some(c)) => (e, c),
            _ => return Err(ProtocolError::MissingFields),
        };
        if edges.h != board_h || edges.w != board_w {
            return Err(ProtocolError::DimensionMismatch {
                got_h: edges.h,
                got_w: edges.w,
                want_h: board_h,
                want_w: board_w,
            });
        }
        let len = edges.h * edges.w;
        if edges.right.len() != len || edges.down.len() != len || colors.len() != len {
            return Err(ProtocolError::BadArrayLength);
        }
        Ok(Self {
            edges,
            colors,
            nodes: resp.nodes,
            elapsed_ms: resp.elapsed_ms as u64,
        })
    }
}
