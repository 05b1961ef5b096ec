//! TUI widget modules

pub mod charge_log_popup;
pub mod header;
pub mod predictions;
pub mod progress_bars;
pub mod shortcuts;
pub mod statistics;

pub use charge_log_popup::*;
pub use header::*;
pub use predictions::*;
pub use progress_bars::*;
pub use shortcuts::*;
pub use statistics::*;
