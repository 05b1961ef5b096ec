use battery_cycle_monitor::{CycleReport, CYCLE_THRESHOLD};
use std::fmt;
use std::path::Path;

pub fn format_optional<T: fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Wording for a signed day count until (or since) the threshold.
pub fn describe_days_remaining(days: Option<i64>) -> String {
    match days {
        Some(d) if d < 0 => format!("reached {} days ago", -d),
        Some(d) => format!("{} days", d),
        None => "N/A".to_string(),
    }
}

/// Plain text rendering of a report for terminals and pipes.
pub struct TextReport<'a> {
    report: &'a CycleReport,
    source: &'a Path,
}

impl<'a> TextReport<'a> {
    pub fn new(report: &'a CycleReport, source: &'a Path) -> Self {
        Self { report, source }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(f, "Battery Cycle Count - {}", self.source.display())?;
        writeln!(f, "Report date: {}", report.generated_on())?;
        writeln!(
            f,
            "Charges: {} ({} with battery saver), {} to {}",
            report.event_count(),
            report.battery_saver_events(),
            report.first_date(),
            report.last_date()
        )?;
        writeln!(f)?;
        writeln!(f, "Total cycles:        {:.2}", report.total_cycles())?;
        writeln!(f, "Days recorded:       {}", report.days_elapsed())?;
        writeln!(
            f,
            "Cycles per day:      {}",
            format_optional(report.daily_cycle_rate().map(|r| format!("{:.2}", r)))
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Cycles remaining to {}: {:.2}",
            CYCLE_THRESHOLD,
            report.cycles_remaining()
        )?;
        writeln!(
            f,
            "Days remaining:      {}",
            describe_days_remaining(report.days_remaining())
        )?;
        writeln!(
            f,
            "Projected date:      {}",
            format_optional(report.projected_threshold_date())
        )?;
        writeln!(
            f,
            "Cycle projection ({}y): {}",
            report.horizon_years(),
            format_optional(
                report
                    .projected_cycles_over_horizon()
                    .map(|c| format!("{:.2}", c))
            )
        )?;

        if report.daily_cycle_rate().is_none() {
            writeln!(f)?;
            writeln!(f, "Not enough days recorded for rate-based projections.")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battery_cycle_monitor::{ChargeEvent, ChargeLog, CycleEstimator, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_describe_days_remaining() {
        assert_eq!(describe_days_remaining(Some(12)), "12 days");
        assert_eq!(describe_days_remaining(Some(-9)), "reached 9 days ago");
        assert_eq!(describe_days_remaining(None), "N/A");
    }

    #[test]
    fn test_render_text_contains_statistics() {
        let events = vec![
            ChargeEvent::new(date(2022, 3, 29), false, 0, 70),
            ChargeEvent::new(date(2022, 4, 2), true, 25, 50),
            ChargeEvent::new(date(2022, 4, 6), true, 29, 50),
            ChargeEvent::new(date(2022, 4, 9), true, 30, 50),
            ChargeEvent::new(date(2022, 4, 12), true, 34, 60),
        ];
        let log = ChargeLog::from_events("charges.csv", events, true);
        let report = CycleEstimator::new(&log)
            .report(1, date(2023, 1, 1))
            .unwrap();

        let text = TextReport::new(&report, log.path()).to_string();
        assert!(text.contains("Report date: 2023-01-01"));
        assert!(text.contains("Total cycles:        1.46"));
        assert!(text.contains("Days recorded:       11"));
        assert!(text.contains("Cycles per day:      0.13"));
        assert!(text.contains("2029-04-15"));
        assert!(!text.contains("Not enough days"));
    }

    #[test]
    fn test_render_text_without_rate() {
        let events = vec![ChargeEvent::new(date(2022, 3, 29), false, 0, 70)];
        let log = ChargeLog::from_events("charges.csv", events, false);
        let report = CycleEstimator::new(&log)
            .report(1, date(2023, 1, 1))
            .unwrap();

        let text = TextReport::new(&report, log.path()).to_string();
        assert!(text.contains("Cycles per day:      N/A"));
        assert!(text.contains("Not enough days"));
    }
}
