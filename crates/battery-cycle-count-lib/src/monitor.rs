use crate::charge_log::ChargeLog;
use crate::data_structures::{ChargeEvent, CycleReport};
use crate::error::{CycleError, Result};
use crate::estimator::CycleEstimator;
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

/// Owns the loaded charge log and hands out estimators and reports for it.
pub struct BatteryMonitor {
    charge_log: Option<ChargeLog>,
}

impl BatteryMonitor {
    pub fn new() -> Self {
        Self { charge_log: None }
    }

    pub fn load_data<P: AsRef<Path>>(&mut self, path: P, delete_last_row: bool) -> Result<()> {
        let log = ChargeLog::load_with(path, delete_last_row)?;
        info!(
            path = %log.path().display(),
            events = log.len(),
            "charge log loaded"
        );
        self.charge_log = Some(log);
        Ok(())
    }

    /// Re-reads the current log from disk. Fails with [`CycleError::NoData`] if nothing was loaded yet.
    pub fn reload(&mut self) -> Result<()> {
        let log = self.charge_log.as_mut().ok_or(CycleError::NoData)?;
        log.reload()?;
        info!(
            path = %log.path().display(),
            events = log.len(),
            "charge log reloaded"
        );
        Ok(())
    }

    pub fn charge_log(&self) -> Option<&ChargeLog> {
        self.charge_log.as_ref()
    }

    pub fn events(&self) -> &[ChargeEvent] {
        self.charge_log
            .as_ref()
            .map(|log| log.events())
            .unwrap_or(&[])
    }

    pub fn estimator(&self) -> Option<CycleEstimator<'_>> {
        self.charge_log.as_ref().map(CycleEstimator::new)
    }

    pub fn report(&self, years: u32, today: NaiveDate) -> Result<CycleReport> {
        self.estimator()
            .ok_or(CycleError::NoData)?
            .report(years, today)
    }

    pub fn event_count(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events().is_empty()
    }
}

impl Default for BatteryMonitor {
    fn default() -> Self {
        Self::new()
    }
}
