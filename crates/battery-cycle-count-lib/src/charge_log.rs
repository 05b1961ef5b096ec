use crate::data_structures::ChargeEvent;
use crate::error::Result;
use crate::loader::DataLoader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Chronological record of charge events for a single device.
///
/// By default the final row is dropped after the derived columns are computed:
/// it has no following charge, so its `days_until_next` is unknown and it would
/// skew rate calculations.
#[derive(Debug, Clone)]
pub struct ChargeLog {
    path: PathBuf,
    delete_last_row: bool,
    events: Vec<ChargeEvent>,
}

impl ChargeLog {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, true)
    }

    pub fn load_with<P: AsRef<Path>>(path: P, delete_last_row: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let events = DataLoader::new().load_from_file(&path)?;
        Ok(Self::from_events(path, events, delete_last_row))
    }

    /// Builds a log from rows that were already parsed, deriving columns exactly
    /// as a file load would.
    pub fn from_events<P: Into<PathBuf>>(
        path: P,
        events: Vec<ChargeEvent>,
        delete_last_row: bool,
    ) -> Self {
        Self {
            path: path.into(),
            delete_last_row,
            events: Self::derive_columns(events, delete_last_row),
        }
    }

    /// Re-reads the log from the current path with the same options.
    /// The loaded rows are left untouched if reading fails.
    pub fn reload(&mut self) -> Result<()> {
        let events = DataLoader::new().load_from_file(&self.path)?;
        self.events = Self::derive_columns(events, self.delete_last_row);
        Ok(())
    }

    pub fn events(&self) -> &[ChargeEvent] {
        &self.events
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Points the log at a different file. Does not reload; call [`ChargeLog::reload`].
    pub fn set_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.path = path.into();
    }

    pub fn delete_last_row(&self) -> bool {
        self.delete_last_row
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn first(&self) -> Option<&ChargeEvent> {
        self.events.first()
    }

    pub fn last(&self) -> Option<&ChargeEvent> {
        self.events.last()
    }

    pub fn total_percent_added(&self) -> i64 {
        self.events.iter().map(|e| e.percent_delta() as i64).sum()
    }

    pub fn battery_saver_events(&self) -> usize {
        self.events.iter().filter(|e| e.battery_saver()).count()
    }

    fn derive_columns(mut events: Vec<ChargeEvent>, delete_last_row: bool) -> Vec<ChargeEvent> {
        for i in 0..events.len() {
            let next_date = events.get(i + 1).map(|next| next.date());
            let current_date = events[i].date();

            let days = next_date.map(|next| (next - current_date).num_days());
            if let Some(days) = days {
                if days <= 0 {
                    warn!(
                        date = %current_date,
                        days,
                        "charge log is not in strictly ascending date order"
                    );
                }
            }
            events[i].set_days_until_next(days);
        }

        if delete_last_row {
            if let Some(dropped) = events.pop() {
                debug!(date = %dropped.date(), "dropped final charge event");
            }
        }

        events
    }
}
