//! Terminal session: a document view plus an abbreviation prompt.
//!
//! `:` or `Ctrl-P` opens the prompt, `Enter` inserts the expansion and closes
//! it, `Esc` discards the input, `q` ends the session.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use emmet_blocks_engine::{Block as ContentBlock, Composer, Expander, SubmitOutcome, outline};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::io::{Stdout, stdout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Document,
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

pub struct App<'c, E> {
    composer: &'c Composer<E>,
    document: Vec<ContentBlock>,
    input: String,
    mode: Mode,
    status: Option<String>,
}

impl<'c, E: Expander> App<'c, E> {
    pub fn new(composer: &'c Composer<E>) -> Self {
        Self {
            composer,
            document: Vec::new(),
            input: String::new(),
            mode: Mode::Document,
            status: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn document(&self) -> &[ContentBlock] {
        &self.document
    }

    pub fn into_document(self) -> Vec<ContentBlock> {
        self.document
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.mode {
            Mode::Document => match key.code {
                KeyCode::Char('q') if key.modifiers.is_empty() => return Action::Quit,
                KeyCode::Char(':') => self.open_prompt(),
                KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.open_prompt()
                }
                _ => {}
            },
            Mode::Prompt => match key.code {
                KeyCode::Esc => self.close_prompt(),
                KeyCode::Enter => self.submit(),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.input.push(c)
                }
                _ => {}
            },
        }

        Action::Continue
    }

    fn open_prompt(&mut self) {
        self.input.clear();
        self.mode = Mode::Prompt;
    }

    fn close_prompt(&mut self) {
        self.input.clear();
        self.mode = Mode::Document;
    }

    fn submit(&mut self) {
        let status = match self.composer.submit(&self.input, &mut self.document) {
            SubmitOutcome::Empty => None,
            SubmitOutcome::Failed(err) => Some(err.to_string()),
            SubmitOutcome::NothingGenerated => Some("Nothing to insert".to_string()),
            SubmitOutcome::Inserted { count: 1 } => Some("Inserted 1 block".to_string()),
            SubmitOutcome::Inserted { count } => Some(format!("Inserted {count} blocks")),
        };
        self.status = status;
        self.close_prompt();
    }
}

/// Run a session on the terminal and return the document built in it.
pub fn run<E: Expander>(composer: &Composer<E>) -> Result<Vec<ContentBlock>> {
    // Log lines on stderr would tear up the screen; failures show in the status line.
    with_logs_suppressed(|| {
        enable_raw_mode()?;
        let mut app = App::new(composer);
        let res = run_on_alternate_screen(&mut app);
        let restored = restore_terminal();
        res?;
        restored?;
        Ok(app.into_document())
    })
}

fn with_logs_suppressed<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    let level = log::max_level();
    log::set_max_level(log::LevelFilter::Off);
    let res = f();
    log::set_max_level(level);
    res
}

fn run_on_alternate_screen<E: Expander>(app: &mut App<'_, E>) -> Result<()> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    run_app(&mut terminal, app)
}

/// Leave raw mode and the alternate screen, however far setup got.
fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode();
    execute!(stdout(), LeaveAlternateScreen, Show)?;
    raw?;
    Ok(())
}

fn run_app<E: Expander>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<'_, E>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key) == Action::Quit
        {
            return Ok(());
        }
    }
}

fn ui<E>(f: &mut Frame, app: &App<'_, E>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    let text = outline(&app.document);
    let lines: Vec<Line> = if text.is_empty() {
        vec![Line::from("Empty document. Press : to insert blocks.")]
    } else {
        text.lines().map(|line| Line::from(line.to_string())).collect()
    };
    let document = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Document ({} blocks)", app.document.iter().map(ContentBlock::count).sum::<usize>())),
    );
    f.render_widget(document, chunks[0]);

    let status = Paragraph::new(app.status.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(status, chunks[1]);

    let help = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw(":/Ctrl-P: Insert | "),
        Span::raw("Enter: Generate | Esc: Cancel"),
    ]);
    f.render_widget(Paragraph::new(help), chunks[2]);

    if app.mode == Mode::Prompt {
        let area = centered(f.area(), 60, 3);
        let prompt = Paragraph::new(app.input.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Emmet abbreviation"),
        );
        f.render_widget(Clear, area);
        f.render_widget(prompt, area);

        let cursor_x = area.x + 1 + (app.input.chars().count() as u16).min(area.width.saturating_sub(2));
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use emmet_blocks_engine::{BlockMapper, BoxError};
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text<E: Expander>(app: &mut App<'_, E>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn prompt_opens_with_colon_or_ctrl_p() {
        let composer = Composer::emmet(BlockMapper::default());
        let mut app = App::new(&composer);

        app.handle_key(key(KeyCode::Char(':')));
        assert_eq!(app.mode(), Mode::Prompt);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode(), Mode::Document);
        app.handle_key(ctrl('p'));
        assert_eq!(app.mode(), Mode::Prompt);
    }

    #[test]
    fn enter_inserts_and_resets() {
        let composer = Composer::emmet(BlockMapper::default());
        let mut app = App::new(&composer);

        app.handle_key(key(KeyCode::Char(':')));
        type_text(&mut app, "ul>li*3");
        assert_eq!(app.input(), "ul>li*3");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.mode(), Mode::Document);
        assert_eq!(app.input(), "");
        assert_eq!(app.document().len(), 1);
        assert_eq!(app.status(), Some("Inserted 1 block"));
    }

    #[test]
    fn failed_submission_keeps_document() {
        let composer = Composer::emmet(BlockMapper::default());
        let mut app = App::new(&composer);

        app.handle_key(key(KeyCode::Char(':')));
        type_text(&mut app, "p+p");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char(':')));
        type_text(&mut app, "div>(p");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.document().len(), 2);
        assert!(app.status().is_some_and(|s| s.contains("unclosed `(`")));
        assert_eq!(app.input(), "");
    }

    #[test]
    fn escape_discards_input_without_expanding() {
        let expander = |_: &str| -> Result<String, BoxError> { panic!("must not expand") };
        let composer = Composer::new(expander, BlockMapper::default());
        let mut app = App::new(&composer);

        app.handle_key(key(KeyCode::Char(':')));
        type_text(&mut app, "div");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.input(), "di");
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.input(), "");
        assert!(app.document().is_empty());
    }

    #[test]
    fn q_quits_only_outside_the_prompt() {
        let composer = Composer::emmet(BlockMapper::default());
        let mut app = App::new(&composer);

        app.handle_key(key(KeyCode::Char(':')));
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Action::Continue);
        assert_eq!(app.input(), "q");
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(app.handle_key(ctrl('c')), Action::Quit);
    }

    #[test]
    fn log_level_is_restored_when_the_session_fails() {
        log::set_max_level(log::LevelFilter::Info);

        let res: Result<()> = with_logs_suppressed(|| {
            assert_eq!(log::max_level(), log::LevelFilter::Off);
            anyhow::bail!("no terminal")
        });

        assert!(res.is_err());
        assert_eq!(log::max_level(), log::LevelFilter::Info);
    }

    #[test]
    fn prompt_is_drawn_over_the_document() {
        let composer = Composer::emmet(BlockMapper::default());
        let mut app = App::new(&composer);
        app.handle_key(key(KeyCode::Char(':')));
        type_text(&mut app, "h1{Hi}");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char(':')));
        type_text(&mut app, "row>sp");

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(screen.contains("core/heading content=\"Hi\""));
        assert!(screen.contains("Emmet abbreviation"));
        assert!(screen.contains("row>sp"));
    }
}
