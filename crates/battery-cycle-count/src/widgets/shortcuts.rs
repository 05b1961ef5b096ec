use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::AppState;

pub struct ShortcutsWidget;

impl ShortcutsWidget {
    pub fn render(frame: &mut Frame, area: Rect, _state: &AppState) {
        let key = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let text = Style::default().fg(Color::Gray);

        let shortcuts_text = vec![Line::from(vec![
            Span::styled("Press ", text),
            Span::styled("q", key),
            Span::styled(" to quit, ", text),
            Span::styled("r", key),
            Span::styled(" to reload the log, ", text),
            Span::styled("l", key),
            Span::styled(" for charge events", text),
        ])];

        let shortcuts = Paragraph::new(shortcuts_text).alignment(Alignment::Center);

        frame.render_widget(shortcuts, area);
    }
}
