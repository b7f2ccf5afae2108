//! TUI module for textsum
//!
//! Interactive summarization form using ratatui.

mod app;
mod editor;
pub mod screens;
pub mod widgets;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;

use crate::config::Settings;
pub use app::App;
pub use editor::Editor;

/// Run the TUI application
pub async fn run(settings: &Settings) -> Result<()> {
    // Create app state before touching the terminal so config errors print normally
    let mut app = App::new(settings)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

/// Main application loop
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| app.draw(f))?;

        // Handle events with timeout so the request task can make progress
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Esc => {
                        if !app.is_help_shown() {
                            return Ok(());
                        }
                        app.toggle_help();
                    }
                    KeyCode::F(1) => {
                        app.toggle_help();
                    }
                    _ => {
                        app.handle_key(key);
                    }
                },
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }

        // Pick up a finished request
        app.update();

        tokio::task::yield_now().await;
    }
}
