//! CSV journal backend.
//!
//! Creates three files in the configured directory:
//! - `alerts.csv`
//! - `monitor_ends.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::JournalWriter;
use crate::{AlertRow, JournalResult, MonitorEndRow, TickSummaryRow};

pub struct CsvJournal {
    alerts:    Writer<File>,
    ends:      Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvJournal {
    /// Create `dir` if needed, open the three files and write header rows.
    pub fn new(dir: &Path) -> JournalResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut alerts = Writer::from_path(dir.join("alerts.csv"))?;
        alerts.write_record([
            "tick", "at_ms", "trigger", "player", "dest_x", "dest_y", "dest_z", "alerted", "failed_moves",
        ])?;

        let mut ends = Writer::from_path(dir.join("monitor_ends.csv"))?;
        ends.write_record(["tick", "agent", "reason", "player"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "at_ms", "evaluated"])?;

        Ok(Self { alerts, ends, summaries, finished: false })
    }
}

impl JournalWriter for CsvJournal {
    fn write_alert(&mut self, row: &AlertRow) -> JournalResult<()> {
        self.alerts.write_record(&[
            row.tick.to_string(),
            row.at_ms.to_string(),
            row.trigger.to_string(),
            row.player.to_string(),
            row.dest_x.to_string(),
            row.dest_y.to_string(),
            row.dest_z.to_string(),
            row.alerted.to_string(),
            row.failed_moves.to_string(),
        ])?;
        Ok(())
    }

    fn write_monitor_end(&mut self, row: &MonitorEndRow) -> JournalResult<()> {
        self.ends.write_record(&[
            row.tick.to_string(),
            row.agent.to_string(),
            row.reason.to_owned(),
            row.player.to_string(),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> JournalResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.at_ms.to_string(),
            row.evaluated.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> JournalResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.alerts.flush()?;
        self.ends.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
