use std::io;
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tokio::sync::mpsc;

use flow_core::protocol::{SolveError, SolveResponse};

use crate::editor::{Editor, SizeField};
use crate::net::SolverClient;
use crate::ui;

/// What the event loop should do after a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Solve,
    Quit,
}

type SolveResult = (u64, Result<SolveResponse, SolveError>);

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async_run())
}

async fn async_run() -> Result<(), Box<dyn std::error::Error>> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut editor = Editor::new();
    let client = SolverClient::from_env();

    let result = run_loop(&mut terminal, &mut editor, &client).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    editor: &mut Editor,
    client: &SolverClient,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut event_stream = EventStream::new();
    let (results_tx, mut results_rx) = mpsc::unbounded_channel::<SolveResult>();
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui::draw(f, editor))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        match handle_key(editor, key) {
                            Action::Quit => return Ok(()),
                            Action::Solve => kick_solve(editor, client, &results_tx),
                            Action::None => {}
                        }
                    }
                    Some(Ok(Event::Mouse(mouse))) => {
                        let size = terminal.size()?;
                        let area = Rect::new(0, 0, size.width, size.height);
                        handle_mouse(editor, mouse, area);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                }
            }
            Some((seq, result)) = results_rx.recv() => {
                editor.finish_solve(seq, result);
            }
            _ = tokio::time::sleep(tick_rate) => {}
        }
    }
}

/// Snapshot the board and dispatch a solve on a background task. The
/// sequence token ties the eventual response back to this request; an
/// older in-flight solve keeps running but its answer will be stale.
fn kick_solve(
    editor: &mut Editor,
    client: &SolverClient,
    results_tx: &mpsc::UnboundedSender<SolveResult>,
) {
    let (seq, request) = editor.begin_solve();
    let client = client.clone();
    let tx = results_tx.clone();
    tokio::spawn(async move {
        let result = client.solve(&request).await;
        let _ = tx.send((seq, result));
    });
}

/// Apply a key press to the editor. While a size field is open it
/// captures everything, so the global bindings stay inert during
/// numeric entry.
pub fn handle_key(editor: &mut Editor, key: KeyEvent) -> Action {
    if editor.size_input.is_some() {
        match key.code {
            KeyCode::Char(c @ '0'..='9') => editor.size_input_push(c),
            KeyCode::Backspace => editor.size_input_pop(),
            KeyCode::Enter => editor.size_input_commit(),
            KeyCode::Esc => editor.size_input_cancel(),
            _ => {}
        }
        return Action::None;
    }

    match key.code {
        KeyCode::Up => editor.move_selection(-1, 0),
        KeyCode::Down => editor.move_selection(1, 0),
        KeyCode::Left => editor.move_selection(0, -1),
        KeyCode::Right => editor.move_selection(0, 1),
        KeyCode::Enter | KeyCode::Char(' ') => editor.toggle_selected(),
        KeyCode::Char('a') => editor.cursor.decrement(),
        KeyCode::Char('d') => editor.cursor.increment(),
        KeyCode::Char('z') => editor.options.allow_zigzag = !editor.options.allow_zigzag,
        KeyCode::Char('v') => editor.options.use_vcut = !editor.options.use_vcut,
        KeyCode::Char('b') => editor.options.use_table = !editor.options.use_table,
        KeyCode::Char('g') => editor.options.use_diagonals = !editor.options.use_diagonals,
        KeyCode::Char('h') => editor.open_size_input(SizeField::Height),
        KeyCode::Char('w') => editor.open_size_input(SizeField::Width),
        KeyCode::Char('s') => return Action::Solve,
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        _ => {}
    }
    Action::None
}

pub fn handle_mouse(editor: &mut Editor, mouse: MouseEvent, area: Rect) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if let Some((r, c)) = ui::hit_cell(editor, mouse.column, mouse.row, area) {
        editor.toggle_at(r, c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn number_keys_adjust_cursor() {
        let mut ed = Editor::new();
        assert_eq!(handle_key(&mut ed, press(KeyCode::Char('d'))), Action::None);
        assert_eq!(ed.cursor.value(), 2);
        handle_key(&mut ed, press(KeyCode::Char('a')));
        handle_key(&mut ed, press(KeyCode::Char('a')));
        assert_eq!(ed.cursor.value(), 1);
    }

    #[test]
    fn size_entry_captures_global_bindings() {
        let mut ed = Editor::new();
        handle_key(&mut ed, press(KeyCode::Char('h')));
        assert!(ed.size_input.is_some());

        // 'd' would normally increment the path cursor and 's' would
        // solve; both must be inert while the field has focus.
        assert_eq!(handle_key(&mut ed, press(KeyCode::Char('d'))), Action::None);
        assert_eq!(ed.cursor.value(), 1);
        assert_eq!(handle_key(&mut ed, press(KeyCode::Char('s'))), Action::None);

        handle_key(&mut ed, press(KeyCode::Char('5')));
        handle_key(&mut ed, press(KeyCode::Enter));
        assert!(ed.size_input.is_none());
        assert_eq!(ed.board.height(), 5);
    }

    #[test]
    fn escape_cancels_size_entry() {
        let mut ed = Editor::new();
        handle_key(&mut ed, press(KeyCode::Char('w')));
        handle_key(&mut ed, press(KeyCode::Char('3')));
        handle_key(&mut ed, press(KeyCode::Esc));
        assert!(ed.size_input.is_none());
        assert_eq!(ed.board.width(), 10);
    }

    #[test]
    fn solve_and_quit_actions() {
        let mut ed = Editor::new();
        assert_eq!(handle_key(&mut ed, press(KeyCode::Char('s'))), Action::Solve);
        assert_eq!(handle_key(&mut ed, press(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn option_keys_toggle_flags() {
        let mut ed = Editor::new();
        handle_key(&mut ed, press(KeyCode::Char('z')));
        assert!(ed.options.allow_zigzag);
        handle_key(&mut ed, press(KeyCode::Char('g')));
        assert!(!ed.options.use_diagonals);
    }

    #[test]
    fn enter_toggles_selected_cell() {
        let mut ed = Editor::new();
        handle_key(&mut ed, press(KeyCode::Enter));
        assert_eq!(ed.board.get(0, 0), 1);
        handle_key(&mut ed, press(KeyCode::Enter));
        assert_eq!(ed.board.get(0, 0), 0);
    }
}
