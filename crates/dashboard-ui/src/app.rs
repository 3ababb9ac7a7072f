//! Main application state and TUI event loop for the pop-up dashboard.
//!
//! [`App`] owns the theme, view mode, the loaded [`DashboardSession`] and
//! the selection state. It drives both the interactive dashboard and the
//! static table event loops.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::mpsc;

use dashboard_core::sonification::ToneSpec;
use dashboard_runtime::player::{PlaybackEvent, ToneRequest};
use dashboard_runtime::session::DashboardSession;

use crate::dashboard_view::{self, DashboardViewData, StatusMessage};
use crate::table_view;
use crate::themes::Theme;

const TICK_RATE: Duration = Duration::from_millis(250);

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which screen the TUI renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Interactive cards, chart and detail panel.
    Dashboard,
    /// Static brand table.
    Table,
}

impl ViewMode {
    /// The TUI screen for a `--view` name, or `None` for views that do not
    /// open the terminal UI (`json`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dashboard" => Some(ViewMode::Dashboard),
            "table" => Some(ViewMode::Table),
            _ => None,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub view_mode: ViewMode,
    pub session: DashboardSession,
    /// Index into the session's brand list.
    pub selected: Option<usize>,
    pub detail_open: bool,
    pub status: Option<StatusMessage>,
    /// Length of each requested tone.
    pub note: Duration,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    tones: Option<mpsc::Sender<ToneRequest>>,
}

impl App {
    pub fn new(theme_name: &str, view_mode: ViewMode, session: DashboardSession, note: Duration) -> Self {
        let selected = (!session.brands().is_empty()).then_some(0);
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            session,
            selected,
            detail_open: false,
            status: None,
            note,
            should_quit: false,
            tones: None,
        }
    }

    /// Route tone requests to a running playback service.
    pub fn with_player(mut self, tones: mpsc::Sender<ToneRequest>) -> Self {
        self.tones = Some(tones);
        self
    }

    // ── Public event loops ────────────────────────────────────────────────────

    /// Run the interactive dashboard until `q` / `Ctrl+C`.
    ///
    /// Keyboard input is polled with a 250 ms timeout; playback events are
    /// drained with `try_recv` between polls so audio never blocks drawing.
    pub async fn run_dashboard(
        mut self,
        mut playback: Option<mpsc::Receiver<PlaybackEvent>>,
    ) -> io::Result<()> {
        let mut terminal = setup_terminal()?;

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(TICK_RATE) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if let Some(rx) = playback.as_mut() {
                loop {
                    match rx.try_recv() {
                        Ok(event) => self.apply_playback(event),
                        Err(mpsc::error::TryRecvError::Empty) => break,
                        Err(mpsc::error::TryRecvError::Disconnected) => {
                            tracing::warn!("playback service stopped");
                            self.tones = None;
                            playback = None;
                            break;
                        }
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        restore_terminal(&mut terminal)?;
        result
    }

    /// Run the static brand table, then wait for `q` / `Ctrl+C`.
    pub async fn run_table(self) -> io::Result<()> {
        let mut terminal = setup_terminal()?;

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }
            match event::poll(TICK_RATE) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if is_quit(&key) => break Ok(()),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }
        };

        restore_terminal(&mut terminal)?;
        result
    }

    // ── State transitions ─────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if is_quit(&key) {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.select_previous(),
            KeyCode::Right | KeyCode::Char('l') => self.select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),
            KeyCode::Esc => self.detail_open = false,
            _ => {}
        }
    }

    pub fn select_next(&mut self) {
        let count = self.session.brands().len();
        if count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(count - 1),
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.session.brands().is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    /// "Click" the selected bar: request its tone and open the detail panel.
    pub fn activate(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        let Some(brand) = self.session.brands().get(index) else {
            return;
        };
        let tone = ToneSpec::from_brand(brand, self.note);
        self.detail_open = true;

        let Some(tones) = self.tones.as_ref() else {
            self.status = Some(StatusMessage::info("Audio output is disabled"));
            return;
        };
        match tones.try_send(ToneRequest { index, tone }) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.status = Some(StatusMessage::error("Audio busy; tone skipped"));
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.tones = None;
                self.status = Some(StatusMessage::error("Audio service stopped"));
            }
        }
    }

    /// Re-read the CSV. A failed reload keeps the current dataset on screen.
    pub fn reload(&mut self) {
        match self.session.load() {
            Ok(()) => {
                let count = self.session.brands().len();
                self.selected = match self.selected {
                    _ if count == 0 => None,
                    Some(i) => Some(i.min(count - 1)),
                    None => Some(0),
                };
                self.detail_open = false;
                self.status = Some(StatusMessage::info(format!("Reloaded {count} brands")));
            }
            Err(e) => {
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }

    pub fn apply_playback(&mut self, event: PlaybackEvent) {
        self.status = Some(match event {
            PlaybackEvent::ContextStarted { sample_rate } => {
                StatusMessage::info(format!("Audio ready ({sample_rate} Hz)"))
            }
            PlaybackEvent::Rendered {
                brand,
                path,
                duration,
                ..
            } => StatusMessage::info(format!(
                "♪ {brand} ({} ms) → {}",
                duration.as_millis(),
                path.display()
            )),
            PlaybackEvent::Failed { brand, error, .. } => {
                StatusMessage::error(format!("Could not play {brand}: {error}"))
            }
        });
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let Some(analysis) = self.session.analysis() else {
            dashboard_view::render_no_data(frame, area, self.session.last_error(), &self.theme);
            return;
        };

        match self.view_mode {
            ViewMode::Dashboard => {
                let source = self.source_name();
                let data = DashboardViewData {
                    source: &source,
                    loaded_at: self
                        .session
                        .loaded_at()
                        .map(|t| t.format("%H:%M:%S").to_string()),
                    brands: &analysis.brands,
                    summary: &analysis.summary,
                    selected: self.selected,
                    detail_open: self.detail_open,
                    status: self.status.as_ref(),
                };
                dashboard_view::render_dashboard(frame, area, &data, &self.theme);
            }
            ViewMode::Table => {
                table_view::render_brand_table(
                    frame,
                    area,
                    "Brand Summary",
                    &analysis.brands,
                    &analysis.summary,
                    &self.theme,
                );
            }
        }
    }

    fn source_name(&self) -> String {
        let path = self.session.csv_path();
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

// ── Terminal helpers ──────────────────────────────────────────────────────────

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
