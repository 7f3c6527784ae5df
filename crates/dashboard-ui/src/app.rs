//! Application state and TUI event loop for the dashboard.
//!
//! [`App`] owns the session, the theme, the sidebar state and the view model
//! for the current selection. Every key that changes the selection or the
//! data re-renders the view model from scratch.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use dashboard_core::Result;
use dashboard_data::export::default_export_path;
use dashboard_data::pipeline::ViewModel;
use dashboard_runtime::session::DashboardSession;

use crate::components::filter_panel::FilterPanelState;
use crate::dashboard_view::{render_dashboard, DashboardViewData, StatusMessage};
use crate::themes::Theme;

/// How long to wait for a key before redrawing.
const TICK_RATE: Duration = Duration::from_millis(250);

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub theme: Theme,
    pub session: DashboardSession,
    /// View model for the current selection.
    pub view_model: ViewModel,
    pub panel: FilterPanelState,
    /// Target directory for the export key; `None` uses the download dir.
    pub export_dir: Option<PathBuf>,
    /// Result of the last action, shown in the footer.
    pub status: Option<StatusMessage>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(mut session: DashboardSession, theme_name: &str, export_dir: Option<PathBuf>) -> Result<Self> {
        let view_model = session.view_model()?;
        Ok(Self {
            theme: Theme::from_name(theme_name),
            session,
            view_model,
            panel: FilterPanelState::default(),
            export_dir,
            status: None,
            should_quit: false,
        })
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the interactive dashboard until `q`, `Q` or `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => self.panel.focus_next(),
            KeyCode::BackTab => self.panel.focus_prev(),
            KeyCode::Up | KeyCode::Char('k') => self.panel.move_up(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.focused_len();
                self.panel.move_down(len);
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_current(),
            KeyCode::Char('a') => self.select_all(),
            KeyCode::Char('n') => self.select_none(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }

    // ── Actions ───────────────────────────────────────────────────────────────

    fn toggle_current(&mut self) {
        let dimension = self.panel.focused_dimension();
        let Some(value) = self
            .panel
            .current_value(&self.view_model.options)
            .map(str::to_string)
        else {
            return;
        };
        let outcome = self.session.toggle(dimension, &value);
        self.after_change(outcome);
    }

    fn select_all(&mut self) {
        self.session.select_all(self.panel.focused_dimension());
        self.after_change(Ok(()));
    }

    fn select_none(&mut self) {
        self.session.select_none(self.panel.focused_dimension());
        self.after_change(Ok(()));
    }

    fn export(&mut self) {
        let path = default_export_path(self.export_dir.as_deref());
        self.status = Some(match self.session.export(&path) {
            Ok(rows) => StatusMessage::info(format!("Exported {} rows to {}", rows, path.display())),
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                StatusMessage::error(e.to_string())
            }
        });
    }

    fn reload(&mut self) {
        match self.session.reload() {
            Ok(rows) => {
                self.status = Some(StatusMessage::info(format!("Reloaded {rows} rows")));
                self.refresh();
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    /// Re-render after a selection change, or report why it failed.
    fn after_change(&mut self, outcome: Result<()>) {
        match outcome {
            Ok(()) => {
                self.status = None;
                self.refresh();
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    fn refresh(&mut self) {
        match self.session.view_model() {
            Ok(vm) => {
                self.view_model = vm;
                self.panel.clamp(&self.view_model.options);
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    fn focused_len(&self) -> usize {
        let dimension = self.panel.focused_dimension();
        self.view_model
            .options
            .iter()
            .find(|o| o.dimension == dimension)
            .map_or(0, |o| o.values.len())
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let source = self.session.source().path().display().to_string();
        let data = DashboardViewData {
            source: &source,
            view_model: &self.view_model,
            panel: &self.panel,
            status: self.status.as_ref(),
        };
        render_dashboard(frame, frame.area(), &data, &self.theme);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
