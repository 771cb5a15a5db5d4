use crate::board::Board;
use crate::geometry::CellMetrics;
use crate::palette::{color_for, contrast, Foreground, Rgb};
use crate::protocol::Solution;

const CELL_BG: Rgb = Rgb::new(0xff, 0xff, 0xff);
const LINE_WIDTH: f64 = 8.0;

/// Drawable primitives in pixel space. The drawing backend decides how
/// to realize them; this module only decides what to draw and where.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
    },
    Segment {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Rgb,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Rgb,
    },
    Label {
        x: f64,
        y: f64,
        text: String,
        fg: Foreground,
    },
}

/// Build the full drawable scene for a board and an optional solution.
/// Purely derived: the same inputs always yield the same primitives.
///
/// Layering, bottom to top: cell backgrounds, solution lines, endpoint
/// circles, endpoint labels.
pub fn scene(board: &Board, solution: Option<&Solution>, metrics: &CellMetrics) -> Vec<Primitive> {
    let mut out = Vec::new();

    for r in 0..board.height() {
        for c in 0..board.width() {
            let (x, y) = metrics.origin(r, c);
            out.push(Primitive::Rect {
                x,
                y,
                width: metrics.cell,
                height: metrics.cell,
                color: CELL_BG,
            });
        }
    }

    if let Some(sol) = solution {
        solution_lines(sol, metrics, &mut out);
    }

    for r in 0..board.height() {
        for c in 0..board.width() {
            let n = board.get(r, c);
            let Some(color) = color_for(n) else { continue };
            let (cx, cy) = metrics.center(r, c);
            out.push(Primitive::Circle {
                cx,
                cy,
                radius: metrics.cell * 0.75 / 2.0,
                color,
            });
            out.push(Primitive::Label {
                x: cx,
                y: cy,
                text: n.to_string(),
                fg: contrast(Some(color)),
            });
        }
    }

    out
}

/// One segment per set edge flag, anchored on cell centers. Flags on
/// the right/bottom boundary never produce an out-of-bounds segment.
fn solution_lines(sol: &Solution, metrics: &CellMetrics, out: &mut Vec<Primitive>) {
    let h = sol.edges.h;
    let w = sol.edges.w;
    for r in 0..h {
        for c in 0..w {
            let idx = r * w + c;
            let Some(color) = color_for(sol.colors[idx]) else {
                continue;
            };
            if sol.edges.right[idx] && c + 1 < w {
                let (x1, y1) = metrics.center(r, c);
                let (x2, y2) = metrics.center(r, c + 1);
                out.push(Primitive::Segment {
                    x1,
                    y1,
                    x2,
                    y2,
                    width: LINE_WIDTH,
                    color,
                });
            }
            if sol.edges.down[idx] && r + 1 < h {
                let (x1, y1) = metrics.center(r, c);
                let (x2, y2) = metrics.center(r + 1, c);
                out.push(Primitive::Segment {
                    x1,
                    y1,
                    x2,
                    y2,
                    width: LINE_WIDTH,
                    color,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::SolutionEdges;

    fn segments(prims: &[Primitive]) -> Vec<&Primitive> {
        prims
            .iter()
            .filter(|p| matches!(p, Primitive::Segment { .. }))
            .collect()
    }

    fn top_row_solution() -> Solution {
        // 3x3, path 1 runs along the top row: edges right at (0,0) and (0,1)
        let mut right = vec![false; 9];
        right[0] = true;
        right[1] = true;
        let mut colors = vec![0; 9];
        colors[0] = 1;
        colors[1] = 1;
        colors[2] = 1;
        Solution {
            edges: SolutionEdges {
                h: 3,
                w: 3,
                right,
                down: vec![false; 9],
            },
            colors,
            nodes: 1,
            elapsed_ms: 0,
        }
    }

    #[test]
    fn top_row_emits_two_horizontal_segments() {
        let mut board = Board::new(3, 3);
        board.toggle(0, 0, 1);
        board.toggle(0, 2, 1);
        let m = CellMetrics::default();
        let prims = scene(&board, Some(&top_row_solution()), &m);

        let segs = segments(&prims);
        assert_eq!(segs.len(), 2);
        let expect = [
            (m.center(0, 0), m.center(0, 1)),
            (m.center(0, 1), m.center(0, 2)),
        ];
        for (seg, ((ex1, ey1), (ex2, ey2))) in segs.iter().zip(expect) {
            let Primitive::Segment {
                x1,
                y1,
                x2,
                y2,
                color,
                ..
            } = seg
            else {
                unreachable!()
            };
            assert_eq!((*x1, *y1, *x2, *y2), (ex1, ey1, ex2, ey2));
            assert_eq!(Some(*color), color_for(1));
        }
    }

    #[test]
    fn boundary_flags_emit_nothing() {
        // Every flag set on a 2x2 grid: only the in-bounds edges count.
        let sol = Solution {
            edges: SolutionEdges {
                h: 2,
                w: 2,
                right: vec![true; 4],
                down: vec![true; 4],
            },
            colors: vec![1; 4],
            nodes: 0,
            elapsed_ms: 0,
        };
        let board = Board::new(2, 2);
        let prims = scene(&board, Some(&sol), &CellMetrics::default());
        // right edges: (0,0) and (1,0); down edges: (0,0) and (0,1)
        assert_eq!(segments(&prims).len(), 4);
    }

    #[test]
    fn uncolored_cells_emit_no_segments() {
        let sol = Solution {
            edges: SolutionEdges {
                h: 1,
                w: 2,
                right: vec![true, false],
                down: vec![false, false],
            },
            colors: vec![0, 0],
            nodes: 0,
            elapsed_ms: 0,
        };
        let board = Board::new(1, 2);
        let prims = scene(&board, Some(&sol), &CellMetrics::default());
        assert!(segments(&prims).is_empty());
    }

    #[test]
    fn endpoints_draw_circle_and_label() {
        let mut board = Board::new(2, 2);
        board.toggle(1, 1, 3);
        let prims = scene(&board, None, &CellMetrics::default());
        let circles = prims
            .iter()
            .filter(|p| matches!(p, Primitive::Circle { .. }))
            .count();
        let labels: Vec<_> = prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(circles, 1);
        assert_eq!(labels, vec!["3"]);
    }

    #[test]
    fn scene_is_deterministic() {
        let mut board = Board::new(3, 3);
        board.toggle(0, 0, 1);
        board.toggle(0, 2, 1);
        let sol = top_row_solution();
        let m = CellMetrics::default();
        assert_eq!(scene(&board, Some(&sol), &m), scene(&board, Some(&sol), &m));
    }
}
