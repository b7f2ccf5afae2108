//! Form screen - text input and summary panel

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::time::Duration;

use crate::client::Outcome;
use crate::tui::editor::Editor;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Data the form needs for one frame.
pub struct FormView<'a> {
    pub editor: &'a Editor,
    pub service_url: &'a str,
    /// Elapsed time and animation tick while a request is in flight.
    pub pending: Option<(Duration, usize)>,
    pub outcome: Option<&'a Outcome>,
}

/// Form screen state
#[derive(Default)]
pub struct FormScreen {
    scroll_row: usize,
    scroll_col: usize,
}

impl FormScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, view: &FormView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),      // Title
                Constraint::Min(6),         // Text input
                Constraint::Percentage(40), // Summary
                Constraint::Length(1),      // Help
            ])
            .split(area);

        // Title
        let title = Paragraph::new("LLaMA Text Summarizer")
            .style(Style::default().fg(Color::Cyan).bold())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(title, chunks[0]);

        self.draw_input(frame, chunks[1], view);
        draw_summary(frame, chunks[2], view);

        // Help bar
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" [Ctrl+S] ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Summarize  "),
            Span::styled(" [Ctrl+L] ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Clear  "),
            Span::styled(" [F1] ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Help  "),
            Span::styled(" [Esc] ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[3]);
    }

    fn draw_input(&mut self, frame: &mut Frame, area: Rect, view: &FormView) {
        let block = Block::default()
            .title(" Enter your text here ")
            .borders(Borders::ALL)
            .border_style(if view.pending.is_some() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Blue)
            });
        let inner = block.inner(area);

        // Keep the cursor inside the visible window
        let (row, col) = view.editor.cursor();
        let (height, width) = (usize::from(inner.height), usize::from(inner.width));
        self.scroll_row = follow(self.scroll_row, row, height);
        self.scroll_col = follow(self.scroll_col, col, width);

        // Lines can outgrow u16 offsets, so the window is cut out here
        let lines: Vec<Line> = view
            .editor
            .lines()
            .iter()
            .skip(self.scroll_row)
            .take(height)
            .map(|l| Line::from(l.chars().skip(self.scroll_col).take(width).collect::<String>()))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);

        if view.pending.is_none() && inner.width > 0 && inner.height > 0 {
            frame.set_cursor(
                inner.x + to_u16(col - self.scroll_col),
                inner.y + to_u16(row - self.scroll_row),
            );
        }
    }
}

fn draw_summary(frame: &mut Frame, area: Rect, view: &FormView) {
    let (text, style) = match (view.pending, view.outcome) {
        (Some((elapsed, tick)), _) => (
            format!(
                "{} Generating summary... ({}s)",
                SPINNER[tick % SPINNER.len()],
                elapsed.as_secs()
            ),
            Style::default().fg(Color::Yellow),
        ),
        (None, Some(Outcome::Summary(summary))) => (summary.clone(), Style::default()),
        (None, Some(Outcome::Warning(message))) => {
            (message.clone(), Style::default().fg(Color::Yellow))
        }
        (None, Some(Outcome::Error(message))) => {
            (message.clone(), Style::default().fg(Color::Red))
        }
        (None, None) => (
            format!("Summaries come from {}", view.service_url),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let summary = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Summary ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(summary, area);
}

/// Scroll offset that keeps `pos` within a window of `size` cells.
fn follow(offset: usize, pos: usize, size: usize) -> usize {
    if size == 0 {
        return offset;
    }
    if pos < offset {
        pos
    } else if pos >= offset + size {
        pos - (size - 1)
    } else {
        offset
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
