use ratatui::{
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Circle, Line as CanvasLine, Rectangle},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use flow_core::palette::{color_for, contrast, Foreground, Rgb};
use flow_core::scene::{scene, Primitive};
use flow_core::CellMetrics;

use crate::editor::{Editor, SizeField, Status};

const SIDE_PANEL_WIDTH: u16 = 30;

fn tui_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

fn fg_color(fg: Foreground) -> Color {
    match fg {
        Foreground::Dark => Color::Black,
        Foreground::Light => Color::White,
    }
}

/// Split the frame into side panel, board, and key-hint bar. Shared
/// with mouse hit-testing so clicks and pixels agree.
pub fn layout(area: Rect) -> (Rect, Rect, Rect) {
    let outer = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
    let cols = Layout::horizontal([Constraint::Length(SIDE_PANEL_WIDTH), Constraint::Min(0)])
        .split(outer[0]);
    (cols[0], cols[1], outer[1])
}

/// Which board cell a terminal position lands on, if any.
pub fn hit_cell(editor: &Editor, column: u16, row: u16, area: Rect) -> Option<(usize, usize)> {
    let (_, board_rect, _) = layout(area);
    let inner = board_rect.inner(Margin::new(1, 1));
    if inner.width == 0 || inner.height == 0 || !inner.contains(Position::new(column, row)) {
        return None;
    }

    let metrics = CellMetrics::default();
    let h = editor.board.height();
    let w = editor.board.width();
    let (canvas_w, canvas_h) = metrics.canvas_size(h, w);

    // Center of the hit terminal cell, scaled into pixel space. The
    // canvas flips y, and so does reading rows top-down, so no flip
    // is needed here.
    let x = ((column - inner.x) as f64 + 0.5) / inner.width as f64 * canvas_w;
    let y = ((row - inner.y) as f64 + 0.5) / inner.height as f64 * canvas_h;
    metrics.cell_at(x, y, h, w)
}

pub fn draw(f: &mut Frame, editor: &Editor) {
    let (side, board, bar) = layout(f.area());
    draw_side_panel(f, editor, side);
    draw_board(f, editor, board);
    draw_key_hints(f, bar);
}

// ── Side panel ───────────────────────────────────────────────────────────────

fn draw_side_panel(f: &mut Frame, editor: &Editor, area: Rect) {
    let block = Block::bordered()
        .title(" Flow Solver ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::White));

    let mut lines = vec![Line::from(""), size_line(editor), Line::from("")];

    lines.push(Line::from(Span::styled(
        " Current number",
        Style::default().fg(Color::Gray),
    )));
    lines.push(number_chip(editor));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        " Solver options",
        Style::default().fg(Color::Gray),
    )));
    lines.push(option_line('z', "Allow zigzags", editor.options.allow_zigzag));
    lines.push(option_line('v', "VCut pruning", editor.options.use_vcut));
    lines.push(option_line('b', "Use cache", editor.options.use_table));
    lines.push(option_line('g', "Diagonal pruning", editor.options.use_diagonals));
    lines.push(Line::from(""));

    lines.push(status_line(&editor.status));

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, area);
}

fn size_line(editor: &Editor) -> Line<'static> {
    let field = |own: SizeField, value: usize| -> Span<'static> {
        match &editor.size_input {
            Some(input) if input.field == own => Span::styled(
                format!("{}_", input.buffer),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            _ => Span::styled(value.to_string(), Style::default().fg(Color::White)),
        }
    };

    Line::from(vec![
        Span::styled(" Grid  ", Style::default().fg(Color::Gray)),
        field(SizeField::Height, editor.board.height()),
        Span::styled(" x ", Style::default().fg(Color::Gray)),
        field(SizeField::Width, editor.board.width()),
    ])
}

fn number_chip(editor: &Editor) -> Line<'static> {
    let n = editor.cursor.value();
    let bg = color_for(n);
    let chip_style = match bg {
        Some(c) => Style::default()
            .bg(tui_color(c))
            .fg(fg_color(contrast(bg)))
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::White),
    };
    Line::from(vec![
        Span::styled(" ◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("  {}  ", n), chip_style),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ])
}

fn option_line(key: char, label: &str, on: bool) -> Line<'static> {
    let marker = if on { "[x]" } else { "[ ]" };
    let marker_style = if on {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(format!(" {} ", marker), marker_style),
        Span::styled(format!("{} ", key), Style::default().fg(Color::Yellow)),
        Span::styled(label.to_string(), Style::default().fg(Color::White)),
    ])
}

fn status_line(status: &Status) -> Line<'static> {
    let (text, color) = match status {
        Status::Idle => (String::new(), Color::DarkGray),
        Status::Solving => ("Solving...".to_string(), Color::Yellow),
        Status::Solved { nodes, elapsed_ms } => (
            format!("Solved. Nodes: {}. Time: {} ms.", nodes, elapsed_ms),
            Color::Green,
        ),
        Status::NoSolution => ("No solution found".to_string(), Color::Gray),
        Status::Conflict(n) => (format!("There are already two {}s", n), Color::Red),
        Status::Error(msg) => (format!("Error: {}", msg), Color::Red),
    };
    Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(color),
    ))
}

// ── Board ────────────────────────────────────────────────────────────────────

fn draw_board(f: &mut Frame, editor: &Editor, area: Rect) {
    let metrics = CellMetrics::default();
    let h = editor.board.height();
    let w = editor.board.width();
    let (canvas_w, canvas_h) = metrics.canvas_size(h, w);

    let block = Block::bordered()
        .title(" Board ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::White));

    let prims = scene(&editor.board, editor.solution.as_ref(), &metrics);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::HalfBlock)
        .x_bounds([0.0, canvas_w])
        .y_bounds([0.0, canvas_h])
        .paint(move |ctx| {
            // Pixel space grows downward; the canvas grows upward.
            let flip = |y: f64| canvas_h - y;

            for prim in &prims {
                match prim {
                    Primitive::Rect {
                        x,
                        y,
                        width,
                        height,
                        color,
                    } => {
                        ctx.draw(&Rectangle {
                            x: *x,
                            y: flip(y + height),
                            width: *width,
                            height: *height,
                            color: tui_color(*color),
                        });
                    }
                    Primitive::Segment {
                        x1,
                        y1,
                        x2,
                        y2,
                        color,
                        ..
                    } => {
                        ctx.draw(&CanvasLine {
                            x1: *x1,
                            y1: flip(*y1),
                            x2: *x2,
                            y2: flip(*y2),
                            color: tui_color(*color),
                        });
                    }
                    Primitive::Circle {
                        cx,
                        cy,
                        radius,
                        color,
                    } => {
                        ctx.draw(&Circle {
                            x: *cx,
                            y: flip(*cy),
                            radius: *radius,
                            color: tui_color(*color),
                        });
                    }
                    Primitive::Label { x, y, text, fg } => {
                        ctx.print(
                            *x,
                            flip(*y),
                            Line::from(Span::styled(
                                text.clone(),
                                Style::default()
                                    .fg(fg_color(*fg))
                                    .add_modifier(Modifier::BOLD),
                            )),
                        );
                    }
                }
            }

            // Selection highlight on top of everything
            let (sx, sy) = metrics.origin(editor.selected_row, editor.selected_col);
            ctx.draw(&Rectangle {
                x: sx,
                y: flip(sy + metrics.cell),
                width: metrics.cell,
                height: metrics.cell,
                color: Color::Yellow,
            });
        });

    f.render_widget(canvas, area);
}

// ── Key hints (bottom status bar) ────────────────────────────────────────────

fn draw_key_hints(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" ←↑↓→", Style::default().fg(Color::Yellow)),
        Span::styled(" Move  ", Style::default().fg(Color::Gray)),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::styled("/", Style::default().fg(Color::Gray)),
        Span::styled("Click", Style::default().fg(Color::Yellow)),
        Span::styled(" Toggle  ", Style::default().fg(Color::Gray)),
        Span::styled("a/d", Style::default().fg(Color::Yellow)),
        Span::styled(" Number  ", Style::default().fg(Color::Gray)),
        Span::styled("h/w", Style::default().fg(Color::Yellow)),
        Span::styled(" Size  ", Style::default().fg(Color::Gray)),
        Span::styled("s", Style::default().fg(Color::Yellow)),
        Span::styled(" Solve  ", Style::default().fg(Color::Gray)),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::styled(" Quit", Style::default().fg(Color::Gray)),
    ]);

    let bar = Paragraph::new(hints).style(Style::default().bg(Color::DarkGray));
    f.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Project a cell's pixel center into terminal coordinates, the
    /// inverse of what `hit_cell` computes.
    fn terminal_pos(editor: &Editor, area: Rect, r: usize, c: usize) -> (u16, u16) {
        let (_, board, _) = layout(area);
        let inner = board.inner(Margin::new(1, 1));
        let metrics = CellMetrics::default();
        let (canvas_w, canvas_h) =
            metrics.canvas_size(editor.board.height(), editor.board.width());
        let (px, py) = metrics.center(r, c);
        let col = inner.x + (px / canvas_w * inner.width as f64) as u16;
        let row = inner.y + (py / canvas_h * inner.height as f64) as u16;
        (col, row)
    }

    #[test]
    fn hit_cell_maps_first_cell_center() {
        let editor = Editor::new();
        let area = Rect::new(0, 0, 120, 40);
        let (col, row) = terminal_pos(&editor, area, 0, 0);
        assert_eq!(hit_cell(&editor, col, row, area), Some((0, 0)));
    }

    #[test]
    fn hit_cell_ignores_side_panel_and_bar() {
        let editor = Editor::new();
        let area = Rect::new(0, 0, 120, 40);
        assert_eq!(hit_cell(&editor, 2, 2, area), None);
        assert_eq!(hit_cell(&editor, 60, 39, area), None);
    }

    #[test]
    fn hit_cell_maps_last_cell_center() {
        let editor = Editor::new();
        let area = Rect::new(0, 0, 120, 40);
        let (col, row) = terminal_pos(&editor, area, 9, 9);
        assert_eq!(hit_cell(&editor, col, row, area), Some((9, 9)));
    }
}
