use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::report::format_optional;
use crate::AppState;

pub struct StatisticsWidget;

impl StatisticsWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let report = state.report.as_ref();

        let mut stats_text = vec![
            Line::from(vec![
                Span::styled("Data Status: ", Style::default().fg(Color::White)),
                Span::styled(
                    if state.data_loaded {
                        format!("Loaded ({} events)", state.monitor.event_count())
                    } else {
                        "No data".to_string()
                    },
                    Style::default()
                        .fg(if state.data_loaded {
                            Color::Green
                        } else {
                            Color::Red
                        })
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Total Cycles: ", Style::default().fg(Color::White)),
                Span::styled(
                    report
                        .map(|r| format!("{:.2}", r.total_cycles()))
                        .unwrap_or_else(|| "N/A".to_string()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Days Recorded: ", Style::default().fg(Color::White)),
                Span::styled(
                    format_optional(report.map(|r| r.days_elapsed())),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    report
                        .map(|r| format!(" ({} to {})", r.first_date(), r.last_date()))
                        .unwrap_or_default(),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(vec![
                Span::styled("Cycles Per Day: ", Style::default().fg(Color::White)),
                Span::styled(
                    format_optional(
                        report
                            .and_then(|r| r.daily_cycle_rate())
                            .map(|rate| format!("{:.2}", rate)),
                    ),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if let Some(error) = &state.error_message {
            stats_text.push(Line::from(vec![
                Span::styled("Error: ", Style::default().fg(Color::Red)),
                Span::styled(
                    error.chars().take(70).collect::<String>()
                        + if error.chars().count() > 70 { "..." } else { "" },
                    Style::default().fg(Color::Red),
                ),
            ]));
        } else {
            stats_text.push(Line::from(vec![
                Span::styled("Last Update: ", Style::default().fg(Color::White)),
                Span::styled(
                    state.last_update.format("%Y-%m-%d %H:%M:%S").to_string(),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        }

        let stats = Paragraph::new(stats_text)
            .block(Block::bordered().title("Statistics"))
            .alignment(Alignment::Left);

        frame.render_widget(stats, area);
    }
}
