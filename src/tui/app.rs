//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use std::time::Instant;
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::client::{Outcome, ServiceClient, EMPTY_INPUT_WARNING};
use crate::config::Settings;
use crate::tui::editor::Editor;
use crate::tui::screens::{FormScreen, FormView};
use crate::tui::widgets::HelpPopup;

/// Main application state
pub struct App {
    client: ServiceClient,
    editor: Editor,
    form: FormScreen,
    show_help: bool,

    // Request state
    pending: Option<oneshot::Receiver<Outcome>>,
    pending_since: Option<Instant>,
    outcome: Option<Outcome>,
    tick: usize,
}

impl App {
    /// Create a new app instance
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self::with_client(ServiceClient::from_settings(settings)?))
    }

    pub fn with_client(client: ServiceClient) -> Self {
        Self {
            client,
            editor: Editor::new(),
            form: FormScreen::new(),
            show_help: false,
            pending: None,
            pending_since: None,
            outcome: None,
            tick: 0,
        }
    }

    /// Draw the form
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();

        let view = FormView {
            editor: &self.editor,
            service_url: self.client.url(),
            pending: self.pending_since.map(|since| (since.elapsed(), self.tick)),
            outcome: self.outcome.as_ref(),
        };
        self.form.draw(frame, area, &view);

        if self.show_help {
            HelpPopup::draw(frame, area);
        }
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            self.show_help = false;
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.submit(),
                KeyCode::Char('l') => self.clear(),
                _ => {}
            }
            return;
        }

        // Input is frozen while a request is in flight
        if self.is_pending() {
            return;
        }

        match key.code {
            KeyCode::Char(c) => self.editor.insert_char(c),
            KeyCode::Enter => self.editor.newline(),
            KeyCode::Tab => self.editor.insert_str("    "),
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Delete => self.editor.delete(),
            KeyCode::Left => self.editor.move_left(),
            KeyCode::Right => self.editor.move_right(),
            KeyCode::Up => self.editor.move_up(),
            KeyCode::Down => self.editor.move_down(),
            KeyCode::Home => self.editor.move_home(),
            KeyCode::End => self.editor.move_end(),
            _ => {}
        }
    }

    /// Handle pasted text
    pub fn handle_paste(&mut self, text: &str) {
        if !self.is_pending() && !self.show_help {
            self.editor.insert_str(text);
        }
    }

    /// Submit the current text to the summarization service
    pub fn submit(&mut self) {
        if self.is_pending() {
            return;
        }

        if self.editor.is_blank() {
            self.outcome = Some(Outcome::Warning(EMPTY_INPUT_WARNING.to_string()));
            return;
        }

        let text = self.editor.text();
        let client = self.client.clone();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let _ = tx.send(client.submit(&text).await);
        });

        self.pending = Some(rx);
        self.pending_since = Some(Instant::now());
        self.outcome = None;
    }

    /// Clear the input and the last result
    pub fn clear(&mut self) {
        if self.is_pending() {
            return;
        }
        self.editor.clear();
        self.outcome = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Toggle help popup
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn is_help_shown(&self) -> bool {
        self.show_help
    }

    /// Update app state
    pub fn update(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };

        let finished = match rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => {
                self.tick = self.tick.wrapping_add(1);
                None
            }
            Err(TryRecvError::Closed) => Some(Outcome::Error(
                "Error: summarize request ended without a result".to_string(),
            )),
        };

        if let Some(outcome) = finished {
            self.pending = None;
            self.pending_since = None;
            self.outcome = Some(outcome);
        }
    }
}
