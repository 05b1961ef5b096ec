use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use battery_cycle_monitor::{CycleReport, CYCLE_THRESHOLD};

use crate::report::{describe_days_remaining, format_optional};
use crate::AppState;

pub struct PredictionsWidget;

impl PredictionsWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let predictions_text = match &state.report {
            Some(report) if report.daily_cycle_rate().is_some() => Self::render_report(report),
            Some(_) => vec![
                Line::from(vec![Span::styled(
                    "Not enough days recorded for projections",
                    Style::default().fg(Color::Yellow),
                )]),
                Line::from(" "),
                Line::from(vec![Span::styled(
                    "Add charges on at least two different dates.",
                    Style::default().fg(Color::Gray),
                )]),
            ],
            None => Self::render_no_data_text(state),
        };

        let predictions = Paragraph::new(predictions_text)
            .block(Block::bordered().title("Predictions"))
            .alignment(Alignment::Left);

        frame.render_widget(predictions, area);
    }

    fn render_report(report: &CycleReport) -> Vec<Line<'static>> {
        let exceeded = report.threshold_exceeded();
        let highlight = Style::default()
            .fg(if exceeded { Color::Red } else { Color::Green })
            .add_modifier(Modifier::BOLD);

        vec![
            Line::from(vec![
                Span::styled(
                    format!("Cycles remaining to {}: ", CYCLE_THRESHOLD),
                    Style::default().fg(Color::White),
                ),
                Span::styled(format!("{:.2}", report.cycles_remaining()), highlight),
            ]),
            Line::from(vec![
                Span::styled("Days remaining: ", Style::default().fg(Color::White)),
                Span::styled(describe_days_remaining(report.days_remaining()), highlight),
            ]),
            Line::from(vec![
                Span::styled(
                    if exceeded {
                        "Threshold reached on: "
                    } else {
                        "Projected date: "
                    },
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format_optional(report.projected_threshold_date()),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled(
                    format!("Cycle projection ({}y): ", report.horizon_years()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format_optional(
                        report
                            .projected_cycles_over_horizon()
                            .map(|c| format!("{:.2}", c)),
                    ),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
        ]
    }

    fn render_no_data_text(state: &AppState) -> Vec<Line<'static>> {
        vec![
            Line::from(vec![Span::styled(
                "No charge data available",
                Style::default().fg(Color::Red),
            )]),
            Line::from(" "),
            Line::from(vec![Span::styled(
                format!("Expected a CSV at {}", state.log_file.display()),
                Style::default().fg(Color::Gray),
            )]),
            Line::from(vec![Span::styled(
                "  date,battery_saver,start_percent,end_percent",
                Style::default().fg(Color::Gray),
            )]),
        ]
    }
}
