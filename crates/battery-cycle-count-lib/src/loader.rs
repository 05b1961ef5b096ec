use crate::data_structures::ChargeEvent;
use crate::error::{CycleError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 4] = ["date", "battery_saver", "start_percent", "end_percent"];

/// Column layout of a charge log row as written by hand.
#[derive(Debug, Deserialize)]
struct ChargeRow {
    date: NaiveDate,
    battery_saver: u8,
    start_percent: i32,
    end_percent: i32,
}

pub struct DataLoader;

impl DataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Reads every row of a charge log CSV. The file is closed before returning.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<ChargeEvent>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CycleError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let events = self.load_from_reader(file, path)?;
        debug!(path = %path.display(), rows = events.len(), "loaded charge log");
        Ok(events)
    }

    /// Parses charge rows from any reader. `origin` is only used in error messages.
    pub fn load_from_reader<R: Read>(&self, reader: R, origin: &Path) -> Result<Vec<ChargeEvent>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Self::data_load_error(origin, &e))?;
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(CycleError::DataLoad {
                path: origin.to_path_buf(),
                line: 1,
                message: format!("missing column(s): {}", missing.join(", ")),
            });
        }

        let mut events = Vec::new();

        for result in reader.deserialize::<ChargeRow>() {
            let row = result.map_err(|e| Self::data_load_error(origin, &e))?;
            events.push(self.parse_row(row, origin, events.len())?);
        }

        Ok(events)
    }

    fn parse_row(&self, row: ChargeRow, origin: &Path, index: usize) -> Result<ChargeEvent> {
        let battery_saver = match row.battery_saver {
            0 => false,
            1 => true,
            other => {
                return Err(CycleError::DataLoad {
                    path: origin.to_path_buf(),
                    // header is line 1
                    line: index as u64 + 2,
                    message: format!("battery_saver must be 0 or 1, got {}", other),
                })
            }
        };

        Ok(ChargeEvent::new(
            row.date,
            battery_saver,
            row.start_percent,
            row.end_percent,
        ))
    }

    fn data_load_error(origin: &Path, error: &csv::Error) -> CycleError {
        let line = error.position().map(|pos| pos.line()).unwrap_or(0);
        CycleError::DataLoad {
            path: origin.to_path_buf(),
            line,
            message: error.to_string(),
        }
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "date,battery_saver,start_percent,end_percent
2022-03-29,0,0,70
2022-04-02,1,25,50
2022-04-06,1,29,50
";

    fn parse(content: &str) -> Result<Vec<ChargeEvent>> {
        DataLoader::new().load_from_reader(content.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn test_parse_valid_rows() {
        let events = parse(SAMPLE).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].date(), NaiveDate::from_ymd_opt(2022, 3, 29).unwrap());
        assert!(!events[0].battery_saver());
        assert_eq!(events[0].start_percent(), 0);
        assert_eq!(events[0].end_percent(), 70);
        assert!(events[1].battery_saver());
        assert_eq!(events[2].percent_delta(), 21);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let content = "date, battery_saver, start_percent, end_percent\n2022-03-29 , 0 , 10 , 80\n";
        let events = parse(content).unwrap();
        assert_eq!(events[0].percent_delta(), 70);
    }

    #[test]
    fn test_header_only_gives_no_rows() {
        let events = parse("date,battery_saver,start_percent,end_percent\n").unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_malformed_date_fails() {
        let content = "date,battery_saver,start_percent,end_percent\n2022-13-01,0,0,70\n";
        let err = parse(content).unwrap_err();
        assert!(matches!(err, CycleError::DataLoad { line: 2, .. }));
    }

    #[test]
    fn test_non_numeric_percent_fails() {
        let content = "date,battery_saver,start_percent,end_percent\n2022-03-29,0,0,70\n2022-04-02,0,abc,50\n";
        let err = parse(content).unwrap_err();
        assert!(matches!(err, CycleError::DataLoad { line: 3, .. }));
    }

    #[test]
    fn test_missing_column_fails() {
        let content = "date,battery_saver,start_percent\n2022-03-29,0,0\n";
        assert!(parse(content).unwrap_err().is_data_load());
    }

    #[test]
    fn test_missing_column_without_rows_fails() {
        let err = parse("date,battery_saver,start_percent\n").unwrap_err();
        match err {
            CycleError::DataLoad { line, message, .. } => {
                assert_eq!(line, 1);
                assert!(message.contains("end_percent"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input_fails() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, CycleError::DataLoad { line: 1, .. }));
    }

    #[test]
    fn test_battery_saver_out_of_range_fails() {
        let content = "date,battery_saver,start_percent,end_percent\n2022-03-29,2,0,70\n";
        let err = parse(content).unwrap_err();
        match err {
            CycleError::DataLoad { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("battery_saver"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SAMPLE.as_bytes()).unwrap();

        let events = DataLoader::new().load_from_file(temp_file.path()).unwrap();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DataLoader::new()
            .load_from_file("/nonexistent/charges.csv")
            .unwrap_err();
        assert!(matches!(err, CycleError::Io { .. }));
        assert!(err.is_data_load());
    }
}
