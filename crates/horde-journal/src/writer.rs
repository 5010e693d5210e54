//! The `JournalWriter` trait.

use crate::{AlertRow, JournalResult, MonitorEndRow, TickSummaryRow};

/// Sink for journal rows.
///
/// Errors are stored by [`JournalObserver`][crate::JournalObserver] and
/// retrieved with [`take_error`][crate::JournalObserver::take_error].
pub trait JournalWriter {
    fn write_alert(&mut self, row: &AlertRow) -> JournalResult<()>;

    fn write_monitor_end(&mut self, row: &MonitorEndRow) -> JournalResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> JournalResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> JournalResult<()>;
}
