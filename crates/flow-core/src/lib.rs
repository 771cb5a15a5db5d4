pub mod board;
pub mod cursor;
pub mod geometry;
pub mod palette;
pub mod protocol;
pub mod scene;

pub use board::{Board, ToggleOutcome};
pub use cursor::PathCursor;
pub use geometry::CellMetrics;
pub use palette::{color_for, contrast, Foreground, Rgb};
pub use protocol::{Solution, SolveError, SolveRequest, SolveResponse, SolverOptions};
