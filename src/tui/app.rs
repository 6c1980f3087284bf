//! Main TUI application.
//!
//! Handles:
//! - Input event handling
//! - Frame clock for the gauge and particle animations
//! - Prediction requests via background worker

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::{FieldErrorRenderer, HttpPredictionClient};
use crate::application::{FormController, SubmitError};
use crate::config::Config;
use crate::domain::FormState;
use crate::ports::{PredictionClient, TransportError};

use super::ui::{
    confetti::render_confetti, form::render_form, render_alert, render_disclaimer,
    result::render_result,
};
use super::worker::{PredictionWorker, PredictionWorkerHandle, WorkerPoll};

/// Delay between frames while idle; input wakes the loop earlier.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

const WORKER_TERMINATED: &str = "worker terminated";

/// Main application state
pub struct App {
    controller: FormController<FieldErrorRenderer>,

    client: Arc<dyn PredictionClient>,

    /// Request in flight, if any
    pending_worker: Option<PredictionWorkerHandle>,

    should_quit: bool,
}

impl App {
    /// Create the application against the configured prediction service.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let client = HttpPredictionClient::new(&config.endpoint)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create the application with an injected prediction client.
    pub fn with_client(client: Arc<dyn PredictionClient>) -> Self {
        let mut controller = FormController::new(FormState::default(), FieldErrorRenderer);
        controller.initialize();
        Self {
            controller,
            client,
            pending_worker: None,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &FormController<FieldErrorRenderer> {
        &self.controller
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.poll_worker(Instant::now());

            let now = Instant::now();
            self.controller.tick(now);
            terminal.draw(|f| self.draw(f, now))?;

            if event::poll(FRAME_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers, Instant::now());
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame, now: Instant) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        if self.controller.result_visible() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
                .split(chunks[0]);
            render_form(f, columns[0], &self.controller);
            render_result(f, columns[1], &self.controller, now);
        } else {
            render_form(f, chunks[0], &self.controller);
        }

        render_disclaimer(f, chunks[1]);
        render_confetti(f, area, self.controller.particles(now));

        if let Some(message) = self.controller.pending_alert() {
            render_alert(f, area, message);
        }
    }

    /// Apply the worker's outcome once it arrives.
    fn poll_worker(&mut self, now: Instant) {
        let outcome = match self.pending_worker.as_ref().map(PredictionWorkerHandle::poll) {
            None | Some(WorkerPoll::Pending) => return,
            Some(WorkerPoll::Done(outcome)) => outcome,
            Some(WorkerPoll::Terminated) => {
                tracing::error!("Prediction worker terminated without an answer");
                Err(TransportError::Request(WORKER_TERMINATED.to_string()))
            }
        };
        self.pending_worker = None;
        self.controller.finish_submit(outcome, now);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers, now: Instant) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.controller.pending_alert().is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                self.controller.dismiss_alert();
            }
            return;
        }

        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::BackTab => self.controller.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.controller.next_field(),
            KeyCode::Left => {
                self.controller.cycle_choice(false);
            }
            KeyCode::Right => {
                self.controller.cycle_choice(true);
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.controller.load_sample_data();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.controller.reset_visible() {
                    self.pending_worker = None;
                    self.controller.reset(now);
                }
            }
            KeyCode::Char(c) => {
                self.controller.input_char(c);
            }
            KeyCode::Backspace => {
                self.controller.delete_char();
            }
            KeyCode::Delete => {
                self.controller.clear_field();
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        match self.controller.begin_submit() {
            Ok(request) => {
                let worker = PredictionWorker::spawn(Arc::clone(&self.client), request);
                self.pending_worker = Some(worker);
            }
            Err(SubmitError::Busy) => {}
            Err(SubmitError::Invalid(e)) => {
                tracing::debug!("Submission blocked on {}", e.field());
            }
        }
    }
}
