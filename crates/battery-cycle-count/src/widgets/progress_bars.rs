use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Gauge},
    Frame,
};

use battery_cycle_monitor::CYCLE_THRESHOLD;

use crate::AppState;

pub struct ProgressBarsWidget;

impl ProgressBarsWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let (usage_percentage, total_cycles) = state
            .report
            .as_ref()
            .map(|r| (r.threshold_usage_percentage(), r.total_cycles()))
            .unwrap_or((0.0, 0.0));

        let cycle_gauge = Gauge::default()
            .block(Block::bordered().title(format!("Cycles ({} max)", CYCLE_THRESHOLD)))
            .gauge_style(if usage_percentage > 80.0 {
                Style::default().fg(Color::Red)
            } else if usage_percentage > 60.0 {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Green)
            })
            .percent(usage_percentage.clamp(0.0, 100.0) as u16)
            .label(format!("{:.2} ({:.1}%)", total_cycles, usage_percentage));

        frame.render_widget(cycle_gauge, chunks[0]);

        let saver_percentage = state
            .report
            .as_ref()
            .map(|r| r.battery_saver_percentage())
            .unwrap_or(0.0);

        let saver_gauge = Gauge::default()
            .block(Block::bordered().title("Charges With Battery Saver"))
            .gauge_style(Style::default().fg(Color::Blue))
            .percent(saver_percentage.clamp(0.0, 100.0) as u16)
            .label(format!("{:.0}%", saver_percentage));

        frame.render_widget(saver_gauge, chunks[1]);
    }
}
