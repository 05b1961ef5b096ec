use anyhow::{anyhow, Context, Result};
use battery_cycle_monitor::prelude::*;
use chrono::{DateTime, Local};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod report;
mod widgets;
use config::{config_path, load_config, save_config};
use widgets::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Dashboard,
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupType {
    ChargeLog,
}

#[derive(Parser, Debug)]
#[clap(author = "w01f", version, about)]
struct Args {
    /// Charge log CSV with columns date,battery_saver,start_percent,end_percent
    file: Option<String>,

    /// Keep the final row instead of dropping it before computing statistics
    #[arg(long = "keep-last-row")]
    keep_last_row: bool,

    /// Horizon in years for the cycle projection
    #[arg(short = 'y', long = "years")]
    years: Option<u32>,

    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Dashboard)]
    output: OutputFormat,

    /// Config file (defaults to ~/.battery-cycle-count.json)
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    #[arg(short = 'v')]
    verbose: bool,
}

fn init_tracing(args: &Args) {
    let default_level = if args.verbose {
        "debug"
    } else if args.output == OutputFormat::Dashboard {
        "off"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub struct AppState {
    pub monitor: BatteryMonitor,
    pub log_file: PathBuf,
    pub delete_last_row: bool,
    pub years: u32,
    pub report: Option<CycleReport>,
    pub data_loaded: bool,
    pub error_message: Option<String>,
    pub last_update: DateTime<Local>,
    pub active_popup: Option<PopupType>,
}

impl AppState {
    fn new(log_file: PathBuf, delete_last_row: bool, years: u32) -> Self {
        Self {
            monitor: BatteryMonitor::new(),
            log_file,
            delete_last_row,
            years,
            report: None,
            data_loaded: false,
            error_message: None,
            last_update: Local::now(),
            active_popup: None,
        }
    }

    fn load_data(&mut self) -> Result<()> {
        self.error_message = None;

        let result = if self.monitor.charge_log().is_some() {
            self.monitor.reload()
        } else {
            self.monitor.load_data(&self.log_file, self.delete_last_row)
        }
        .and_then(|_| self.monitor.report(self.years, Local::now().date_naive()));

        self.last_update = Local::now();

        match result {
            Ok(report) => {
                self.report = Some(report);
                self.data_loaded = true;
                Ok(())
            }
            Err(e) => {
                self.report = None;
                self.error_message = Some(e.to_string());
                self.data_loaded = self.monitor.charge_log().is_some();
                Err(e.into())
            }
        }
    }

    pub fn file_name(&self) -> String {
        self.log_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.log_file.display().to_string())
    }
}

pub struct App {
    state: AppState,
    exit: bool,
}

impl App {
    pub fn new(log_file: PathBuf, delete_last_row: bool, years: u32) -> Self {
        let mut state = AppState::new(log_file, delete_last_row, years);

        if let Err(e) = state.load_data() {
            state.error_message = Some(format!("Initial load failed: {}", e));
        }

        Self { state, exit: false }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            terminal.draw(|frame| self.draw(frame))?;

            let event = event::read()?;
            self.handle_event(event);
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Min(6),
                Constraint::Length(1),
            ])
            .split(area);

        HeaderWidget::render(frame, chunks[0], &self.state);
        ProgressBarsWidget::render(frame, chunks[1], &self.state);
        StatisticsWidget::render(frame, chunks[2], &self.state);
        PredictionsWidget::render(frame, chunks[3], &self.state);
        ShortcutsWidget::render(frame, chunks[4], &self.state);

        if let Some(PopupType::ChargeLog) = &self.state.active_popup {
            ChargeLogPopupWidget::render(frame, area, &self.state);
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key_event) = event {
            if key_event.kind == KeyEventKind::Press {
                match key_event.code {
                    KeyCode::Char('q') => self.exit = true,
                    KeyCode::Char('r') => {
                        // error is already surfaced in the statistics panel
                        let _ = self.state.load_data();
                    }
                    KeyCode::Char('l') => {
                        self.state.active_popup =
                            if self.state.active_popup == Some(PopupType::ChargeLog) {
                                None
                            } else {
                                Some(PopupType::ChargeLog)
                            };
                    }
                    KeyCode::Esc => self.state.active_popup = None,
                    _ => {}
                }
            }
        }
    }
}

fn print_report(
    log_file: &Path,
    delete_last_row: bool,
    years: u32,
    output: OutputFormat,
) -> Result<()> {
    let mut monitor = BatteryMonitor::new();
    monitor
        .load_data(log_file, delete_last_row)
        .with_context(|| format!("Could not load charge log {}", log_file.display()))?;

    let cycle_report = monitor.report(years, Local::now().date_naive())?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cycle_report)?),
        _ => print!("{}", report::TextReport::new(&cycle_report, log_file)),
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let config_path = config_path(args.config.as_deref());
    let mut config = load_config(&config_path).unwrap_or_else(|e| {
        warn!("Ignoring unreadable config: {:#}", e);
        Default::default()
    });

    // Explicit arguments become the new defaults
    let mut changed = false;
    if let Some(file) = &args.file {
        config.log_file = Some(file.clone());
        changed = true;
    }
    if let Some(years) = args.years {
        config.years = years;
        changed = true;
    }
    if changed {
        if let Err(e) = save_config(&config_path, &config) {
            warn!("Could not save config: {:#}", e);
        }
    }

    let log_file = config.log_file.as_deref().ok_or_else(|| {
        anyhow!(
            "No charge log given and none remembered in {}\nUsage: battery-cycle-count <charge_log.csv>",
            config_path.display()
        )
    })?;
    let log_file = PathBuf::from(shellexpand::tilde(log_file).as_ref());
    let delete_last_row = !args.keep_last_row;
    debug!(path = %log_file.display(), delete_last_row, years = config.years, "starting");

    if args.output != OutputFormat::Dashboard {
        return print_report(&log_file, delete_last_row, config.years, args.output);
    }

    let mut terminal = ratatui::init();
    let mut app = App::new(log_file, delete_last_row, config.years);

    let result = app.run(&mut terminal);

    ratatui::restore();

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "date,battery_saver,start_percent,end_percent
2022-03-29,0,0,70
2022-04-02,1,25,50
2022-04-06,1,29,50
";

    #[test]
    fn test_load_data_builds_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("charges.csv");
        fs::write(&path, SAMPLE).unwrap();

        let mut state = AppState::new(path, true, 1);
        state.load_data().unwrap();

        assert!(state.data_loaded);
        assert!(state.error_message.is_none());
        assert_eq!(state.report.as_ref().unwrap().event_count(), 2);
    }

    #[test]
    fn test_failed_reload_clears_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("charges.csv");
        fs::write(&path, SAMPLE).unwrap();

        let mut state = AppState::new(path.clone(), true, 1);
        state.load_data().unwrap();

        fs::write(&path, "date,battery_saver,start_percent,end_percent\n2022-03-29,0,x,70\n")
            .unwrap();
        assert!(state.load_data().is_err());

        assert!(state.report.is_none());
        assert!(state.error_message.is_some());
        // rows from the previous successful load are still shown
        assert!(state.data_loaded);
        assert_eq!(state.monitor.event_count(), 2);
    }
}
