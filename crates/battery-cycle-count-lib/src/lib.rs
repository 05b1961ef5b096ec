pub mod charge_log;
pub mod data_structures;
pub mod error;
pub mod estimator;
pub mod loader;
pub mod monitor;

pub use charge_log::ChargeLog;
pub use data_structures::{ChargeEvent, CycleReport, CYCLE_THRESHOLD};
pub use error::{CycleError, Result};
pub use estimator::CycleEstimator;
pub use loader::DataLoader;
pub use monitor::BatteryMonitor;

pub use chrono::NaiveDate;

pub mod prelude {
    pub use crate::charge_log::ChargeLog;
    pub use crate::data_structures::{ChargeEvent, CycleReport, CYCLE_THRESHOLD};
    pub use crate::error::{CycleError, Result};
    pub use crate::estimator::CycleEstimator;
    pub use crate::monitor::BatteryMonitor;
    pub use chrono::NaiveDate;
}
