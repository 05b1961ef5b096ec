use crate::charge_log::ChargeLog;
use crate::data_structures::{CycleReport, CYCLE_THRESHOLD};
use crate::error::{CycleError, Result};
use chrono::{Duration, Months, NaiveDate};

/// Derives cycle-wear statistics from a charge log.
///
/// One cycle is 100 percentage points of charge added, regardless of how many
/// partial charges it took. Every method recomputes from the log.
pub struct CycleEstimator<'a> {
    log: &'a ChargeLog,
}

impl<'a> CycleEstimator<'a> {
    pub fn new(log: &'a ChargeLog) -> Self {
        Self { log }
    }

    pub fn total_cycles(&self) -> f64 {
        self.log.total_percent_added() as f64 / 100.0
    }

    /// Calendar days between the first and last retained charge.
    pub fn days_elapsed(&self) -> Result<i64> {
        match (self.log.first(), self.log.last()) {
            (Some(first), Some(last)) => Ok((last.date() - first.date()).num_days()),
            _ => Err(CycleError::EmptyLog),
        }
    }

    /// Average cycles per day, rounded to two decimals.
    pub fn daily_cycle_rate(&self) -> Result<f64> {
        let days = self.days_elapsed()?;
        if days == 0 {
            return Err(CycleError::DivisionByZero("daily cycle rate"));
        }
        Ok(round2(self.total_cycles() / days as f64))
    }

    /// Cycles left until the threshold. Negative once it has been passed.
    pub fn cycles_remaining(&self) -> f64 {
        round2(CYCLE_THRESHOLD - self.total_cycles())
    }

    /// Days until the threshold at the current rate, truncated toward zero.
    /// Negative means it was passed that many days ago.
    pub fn days_remaining(&self) -> Result<i64> {
        let rate = self.daily_cycle_rate()?;
        if rate == 0.0 {
            return Err(CycleError::DivisionByZero("days remaining"));
        }
        Ok((self.cycles_remaining() / rate).trunc() as i64)
    }

    /// Date the threshold is expected to be reached, counted from `today`.
    /// May lie in the past.
    pub fn projected_threshold_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        let days = self.days_remaining()?;
        Duration::try_days(days)
            .and_then(|offset| today.checked_add_signed(offset))
            .ok_or(CycleError::DateOutOfRange)
    }

    /// Cycle projection over `years` calendar years starting at `today`.
    ///
    /// Computed as `(days_in_horizon - total_cycles) * daily_cycle_rate`. The
    /// subtraction mixes a day count with a cycle count; kept as is so results
    /// stay comparable with earlier reports. `daily_cycle_rate * days_in_horizon`
    /// would be the plain extrapolation.
    pub fn projected_cycles_over_horizon(&self, years: u32, today: NaiveDate) -> Result<f64> {
        let days = Self::days_in_horizon(years, today)?;
        let rate = self.daily_cycle_rate()?;
        Ok(round2((days as f64 - self.total_cycles()) * rate))
    }

    /// Builds a report of every statistic. Values that would divide by zero are left empty.
    pub fn report(&self, years: u32, today: NaiveDate) -> Result<CycleReport> {
        let first = self.log.first().ok_or(CycleError::EmptyLog)?;
        let last = self.log.last().ok_or(CycleError::EmptyLog)?;

        let daily_cycle_rate = optional(self.daily_cycle_rate())?;
        let days_remaining = optional(self.days_remaining())?;
        let projected_threshold_date = optional(self.projected_threshold_date(today))?;
        let projected_cycles_over_horizon =
            optional(self.projected_cycles_over_horizon(years, today))?;

        Ok(CycleReport::new(
            today,
            self.log.len(),
            self.log.battery_saver_events(),
            first.date(),
            last.date(),
            self.total_cycles(),
            self.days_elapsed()?,
            daily_cycle_rate,
            self.cycles_remaining(),
            days_remaining,
            projected_threshold_date,
            years,
            projected_cycles_over_horizon,
        ))
    }

    fn days_in_horizon(years: u32, today: NaiveDate) -> Result<i64> {
        let months = years.checked_mul(12).ok_or(CycleError::DateOutOfRange)?;
        let end = today
            .checked_add_months(Months::new(months))
            .ok_or(CycleError::DateOutOfRange)?;
        Ok((end - today).num_days())
    }
}

fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(CycleError::DivisionByZero(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Two-decimal rounding, ties to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
