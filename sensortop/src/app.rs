//! App state and main loop: input handling, applying poll results, and drawing.

use std::{io, sync::Arc, time::Duration};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::time::sleep;
use tracing::debug;

use crate::config::MonitorConfig;
use crate::http::ReadingsSource;
use crate::limit::LimitControl;
use crate::poll::PollController;
use crate::ui::{
    dial::draw_dials,
    footer::draw_footer,
    header::draw_header,
    history::{draw_history, history_clamp, history_handle_key, history_handle_mouse, page_size},
    stats::draw_stats,
};

pub struct App {
    ctl: PollController,
    limit: LimitControl,

    history_scroll: usize,
    // Cached from the last draw for input handlers
    last_history_area: Option<Rect>,

    should_quit: bool,
}

impl App {
    pub fn new(config: &MonitorConfig, source: Arc<dyn ReadingsSource>) -> Self {
        Self {
            ctl: PollController::new(config, source),
            limit: LimitControl::new(),
            history_scroll: 0,
            last_history_area: None,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &PollController {
        &self.ctl
    }

    pub fn controller_mut(&mut self) -> &mut PollController {
        &mut self.ctl
    }

    pub fn limit_control(&self) -> &LimitControl {
        &self.limit
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        self.ctl.start(self.ctl.limit());
        let res = self.event_loop(&mut terminal).await;
        self.ctl.stop();

        // Teardown
        disable_raw_mode()?;
        let backend = terminal.backend_mut();
        execute!(backend, DisableMouseCapture, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                match event::read()? {
                    Event::Key(k) if k.kind == KeyEventKind::Press => self.handle_key(k),
                    Event::Mouse(m) => {
                        if let Some(area) = self.last_history_area {
                            history_handle_mouse(&mut self.history_scroll, m, area);
                        }
                    }
                    _ => {}
                }
            }
            if self.should_quit {
                break;
            }

            // Apply finished polls and timer ticks
            self.ctl.drain();

            terminal.draw(|f| self.draw(f))?;

            sleep(Duration::from_millis(100)).await;
        }
        Ok(())
    }

    pub fn handle_key(&mut self, k: KeyEvent) {
        // Raw mode swallows SIGINT
        if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if self.limit.is_editing() {
            match k.code {
                KeyCode::Enter => {
                    if let Ok(limit) = self.limit.submit(&mut self.ctl) {
                        debug!(limit = limit.get(), "limit applied from prompt");
                        self.history_scroll = 0;
                    }
                }
                KeyCode::Esc => self.limit.cancel(),
                KeyCode::Backspace => self.limit.backspace(),
                KeyCode::Char(c) => self.limit.push(c),
                _ => {}
            }
            return;
        }

        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.ctl.refresh();
            }
            KeyCode::Char('l') | KeyCode::Char('L') => self.limit.open(self.ctl.limit()),
            _ => {
                let page = self.last_history_area.map(page_size).unwrap_or(1);
                if history_handle_key(&mut self.history_scroll, k, page) {
                    history_clamp(&mut self.history_scroll, self.ctl.store().len(), page);
                }
            }
        }
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        // Root rows: header, dials, stats, history, footer
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),  // header + status/error line
                Constraint::Length(10), // dials
                Constraint::Length(6),  // window stats
                Constraint::Min(5),     // history table
                Constraint::Length(2),  // footer / limit prompt
            ])
            .split(area);

        let store = self.ctl.store();
        draw_header(f, rows[0], &self.ctl);
        draw_dials(f, rows[1], store.latest());
        draw_stats(f, rows[2], store.readings());

        let history_area = rows[3];
        history_clamp(&mut self.history_scroll, store.len(), page_size(history_area));
        draw_history(f, history_area, store.readings(), self.history_scroll);
        self.last_history_area = Some(history_area);

        draw_footer(f, rows[4], &self.limit);
    }
}
