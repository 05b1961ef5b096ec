use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of full equivalent cycles the projections count towards.
pub const CYCLE_THRESHOLD: f64 = 300.0;

/// One recorded charging session, from plug-in to unplug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeEvent {
    date: NaiveDate,
    battery_saver: bool,
    start_percent: i32,
    end_percent: i32,
    percent_delta: i32,
    days_until_next: Option<i64>,
}

impl ChargeEvent {
    pub fn new(date: NaiveDate, battery_saver: bool, start_percent: i32, end_percent: i32) -> Self {
        Self {
            date,
            battery_saver,
            start_percent,
            end_percent,
            percent_delta: end_percent - start_percent,
            days_until_next: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn battery_saver(&self) -> bool {
        self.battery_saver
    }

    pub fn start_percent(&self) -> i32 {
        self.start_percent
    }

    pub fn end_percent(&self) -> i32 {
        self.end_percent
    }

    /// Percentage points added by this charge. Negative only for misrecorded rows.
    pub fn percent_delta(&self) -> i32 {
        self.percent_delta
    }

    /// Calendar days until the following charge, `None` for the final row.
    pub fn days_until_next(&self) -> Option<i64> {
        self.days_until_next
    }

    pub(crate) fn set_days_until_next(&mut self, days: Option<i64>) {
        self.days_until_next = days;
    }
}

/// Snapshot of every statistic derived from a charge log.
///
/// Fields that depend on the daily rate are `None` when the log spans zero
/// days, since the rate is undefined there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    generated_on: NaiveDate,
    event_count: usize,
    battery_saver_events: usize,
    first_date: NaiveDate,
    last_date: NaiveDate,
    total_cycles: f64,
    days_elapsed: i64,
    daily_cycle_rate: Option<f64>,
    cycles_remaining: f64,
    days_remaining: Option<i64>,
    projected_threshold_date: Option<NaiveDate>,
    horizon_years: u32,
    projected_cycles_over_horizon: Option<f64>,
}

impl CycleReport {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        generated_on: NaiveDate,
        event_count: usize,
        battery_saver_events: usize,
        first_date: NaiveDate,
        last_date: NaiveDate,
        total_cycles: f64,
        days_elapsed: i64,
        daily_cycle_rate: Option<f64>,
        cycles_remaining: f64,
        days_remaining: Option<i64>,
        projected_threshold_date: Option<NaiveDate>,
        horizon_years: u32,
        projected_cycles_over_horizon: Option<f64>,
    ) -> Self {
        Self {
            generated_on,
            event_count,
            battery_saver_events,
            first_date,
            last_date,
            total_cycles,
            days_elapsed,
            daily_cycle_rate,
            cycles_remaining,
            days_remaining,
            projected_threshold_date,
            horizon_years,
            projected_cycles_over_horizon,
        }
    }

    pub fn generated_on(&self) -> NaiveDate {
        self.generated_on
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }

    pub fn battery_saver_events(&self) -> usize {
        self.battery_saver_events
    }

    pub fn first_date(&self) -> NaiveDate {
        self.first_date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    pub fn total_cycles(&self) -> f64 {
        self.total_cycles
    }

    pub fn days_elapsed(&self) -> i64 {
        self.days_elapsed
    }

    pub fn daily_cycle_rate(&self) -> Option<f64> {
        self.daily_cycle_rate
    }

    pub fn cycles_remaining(&self) -> f64 {
        self.cycles_remaining
    }

    pub fn days_remaining(&self) -> Option<i64> {
        self.days_remaining
    }

    pub fn projected_threshold_date(&self) -> Option<NaiveDate> {
        self.projected_threshold_date
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    pub fn projected_cycles_over_horizon(&self) -> Option<f64> {
        self.projected_cycles_over_horizon
    }

    /// Share of the threshold already consumed, in percent. Exceeds 100 past the threshold.
    pub fn threshold_usage_percentage(&self) -> f64 {
        self.total_cycles / CYCLE_THRESHOLD * 100.0
    }

    /// Share of charges taken with battery saver on, in percent.
    pub fn battery_saver_percentage(&self) -> f64 {
        if self.event_count == 0 {
            return 0.0;
        }
        self.battery_saver_events as f64 / self.event_count as f64 * 100.0
    }

    pub fn threshold_exceeded(&self) -> bool {
        self.cycles_remaining < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_delta_is_derived() {
        let date = NaiveDate::from_ymd_opt(2022, 4, 2).unwrap();
        let event = ChargeEvent::new(date, true, 25, 50);
        assert_eq!(event.percent_delta(), 25);
        assert_eq!(event.days_until_next(), None);
        assert!(event.battery_saver());
    }

    #[test]
    fn test_misrecorded_event_keeps_negative_delta() {
        let date = NaiveDate::from_ymd_opt(2022, 4, 2).unwrap();
        let event = ChargeEvent::new(date, false, 60, 40);
        assert_eq!(event.percent_delta(), -20);
    }
}
