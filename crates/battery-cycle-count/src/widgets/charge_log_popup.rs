use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Row, Table},
    Frame,
};

use crate::AppState;

pub struct ChargeLogPopupWidget;

impl ChargeLogPopupWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let popup_area = Self::centered_rect(70, 80, area);

        // Clear the area first
        frame.render_widget(Clear, popup_area);

        let header = Row::new(vec!["Date", "Saver", "Start", "End", "+%", "Next in"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

        // newest first so the latest charges stay visible in short terminals
        let rows: Vec<Row> = state
            .monitor
            .events()
            .iter()
            .rev()
            .map(|event| {
                let delta_style = if event.percent_delta() < 0 {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::Green)
                };

                Row::new(vec![
                    Line::from(event.date().to_string()),
                    Line::from(if event.battery_saver() { "on" } else { "off" }),
                    Line::from(format!("{}%", event.start_percent())),
                    Line::from(format!("{}%", event.end_percent())),
                    Line::from(Span::styled(
                        format!("{:+}", event.percent_delta()),
                        delta_style,
                    )),
                    Line::from(
                        event
                            .days_until_next()
                            .map(|d| format!("{} d", d))
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Min(8),
        ];

        let title = format!("Charge Log ({} events)", state.monitor.event_count());
        let table = Table::new(rows, widths).header(header).block(
            Block::bordered()
                .title(title)
                .title_alignment(Alignment::Center)
                .title_bottom(Line::from(vec![
                    Span::styled(" Press ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        "l",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" to close ", Style::default().fg(Color::Gray)),
                ]))
                .style(Style::default().fg(Color::White)),
        );

        frame.render_widget(table, popup_area);
    }

    fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = ratatui::layout::Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        ratatui::layout::Layout::default()
            .direction(ratatui::layout::Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
