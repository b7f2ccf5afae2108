//! Help popup widget

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Help popup that shows keyboard shortcuts
pub struct HelpPopup;

const SHORTCUTS: [(&str, &str); 6] = [
    ("Ctrl+S", "Summarize the text"),
    ("Ctrl+L", "Clear text and summary"),
    ("Enter", "New line"),
    ("Arrows", "Move the cursor"),
    ("F1", "Show this help"),
    ("Esc", "Quit"),
];

impl HelpPopup {
    pub fn draw(frame: &mut Frame, area: Rect) {
        // Calculate popup area (centered, 60% width, 60% height)
        let popup_width = (area.width as f32 * 0.6) as u16;
        let popup_height = (area.height as f32 * 0.6) as u16;
        let popup_x = (area.width - popup_width) / 2;
        let popup_y = (area.height - popup_height) / 2;

        let popup_area = Rect {
            x: popup_x,
            y: popup_y,
            width: popup_width,
            height: popup_height,
        };

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let mut help_text = vec![
            Line::from(Span::styled(
                "Form Shortcuts",
                Style::default().fg(Color::Cyan).bold(),
            )),
            Line::from(""),
        ];

        help_text.extend(SHORTCUTS.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:<8}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        }));

        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )));

        let help = Paragraph::new(help_text).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        );

        frame.render_widget(help, popup_area);
    }
}
