use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::Backend,
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use slidegenius_common::{OutlinePreview, Slide};
use std::io;

/// Pages through an outline one slide at a time.
pub struct OutlineViewer {
    slides: Vec<Slide>,
    total: usize,
    current_slide: usize,
    running: bool,
}

impl OutlineViewer {
    /// Only the displayable slides are kept; `total` still reflects the full outline.
    pub fn new(outline: &OutlinePreview) -> Self {
        Self {
            slides: outline.displayed().to_vec(),
            total: outline.slides.len(),
            current_slide: 0,
            running: true,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let _session = TerminalSession::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        self.event_loop(&mut terminal, event::read)
    }

    fn event_loop<B, E>(&mut self, terminal: &mut Terminal<B>, mut next_event: E) -> Result<()>
    where
        B: Backend,
        E: FnMut() -> io::Result<Event>,
    {
        while self.running {
            terminal.draw(|f| self.draw(f))?;

            if let Event::Key(key) = next_event()? {
                self.handle_key(key.code);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.previous_slide();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.next_slide();
            }
            _ => {}
        }
    }

    fn draw(&self, f: &mut Frame) {
        let size = f.area();

        let block = Block::default().title(self.title()).borders(Borders::ALL);

        let lines = match self.slides.get(self.current_slide) {
            Some(slide) => slide_lines(self.current_slide + 1, slide),
            None => vec![Line::from("No slides in this outline")],
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, size);
    }

    fn title(&self) -> String {
        if self.slides.is_empty() {
            return "Outline (0 slides)".to_string();
        }
        let mut title = format!(
            "Outline ({}/{})",
            self.current_slide + 1,
            self.slides.len()
        );
        if self.total > self.slides.len() {
            title.push_str(&format!(" of {} returned", self.total));
        }
        title
    }

    fn next_slide(&mut self) {
        if self.current_slide < self.slides.len().saturating_sub(1) {
            self.current_slide += 1;
        }
    }

    fn previous_slide(&mut self) {
        if self.current_slide > 0 {
            self.current_slide -= 1;
        }
    }
}

/// Raw mode and the alternate screen, held for the viewer's lifetime.
///
/// Dropping the session restores the terminal on every exit path.
struct TerminalSession;

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let session = Self;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

/// Title, bullets and speaker notes for one slide.
pub fn slide_lines(number: usize, slide: &Slide) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{number}. {}", slide.display_title()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        slide
            .bullets
            .iter()
            .map(|bullet| Line::from(format!("  • {bullet}"))),
    );
    if let Some(notes) = slide.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Notes: {notes}"),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}
