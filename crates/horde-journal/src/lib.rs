//! `horde-journal`: records what the alert engine did.
//!
//! | File                 | One row per                                   |
//! |----------------------|-----------------------------------------------|
//! | `alerts.csv`         | alert that was not suppressed                 |
//! | `monitor_ends.csv`   | perception monitor that stopped, with reason  |
//! | `tick_summaries.csv` | tick on which at least one monitor was checked |
//!
//! [`CsvJournal`] implements [`JournalWriter`] and is driven by
//! [`JournalObserver`], which implements `horde_sim::HordeObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use horde_journal::{CsvJournal, JournalObserver};
//!
//! let writer = CsvJournal::new(Path::new("./journal"))?;
//! let mut obs = JournalObserver::new(writer, &horde.config);
//! horde.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("journal error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvJournal;
pub use error::{JournalError, JournalResult};
pub use observer::JournalObserver;
pub use row::{AlertRow, MonitorEndRow, TickSummaryRow};
pub use writer::JournalWriter;
