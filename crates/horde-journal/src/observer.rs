//! `JournalObserver<W>`: bridges `HordeObserver` to a `JournalWriter`.

use horde_alert::{Alert, Termination};
use horde_core::{AgentId, SimClock, SimConfig, Tick};
use horde_sim::HordeObserver;

use crate::row::{AlertRow, MonitorEndRow, TickSummaryRow};
use crate::writer::JournalWriter;
use crate::{JournalError, JournalResult};

/// A [`HordeObserver`] that records alerts, monitor outcomes and busy ticks
/// to any [`JournalWriter`].
///
/// Ticks on which no monitor was checked are not written.  Writer errors are
/// stored because observer methods have no return value; check with
/// [`take_error`][Self::take_error] after the run.
pub struct JournalObserver<W: JournalWriter> {
    writer:     W,
    clock:      SimClock,
    last_error: Option<JournalError>,
}

impl<W: JournalWriter> JournalObserver<W> {
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<JournalError> {
        self.last_error.take()
    }

    /// Flush the writer.  Needed when the run was driven with `run_ticks`
    /// rather than `run`.
    pub fn finish(&mut self) -> JournalResult<()> {
        self.writer.finish()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: JournalResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: JournalWriter> HordeObserver for JournalObserver<W> {
    fn on_alert(&mut self, tick: Tick, alert: &Alert) {
        let row = AlertRow {
            tick:         tick.0,
            at_ms:        alert.at.0,
            trigger:      alert.trigger.0,
            player:       alert.player.0,
            dest_x:       alert.destination.x,
            dest_y:       alert.destination.y,
            dest_z:       alert.destination.z,
            alerted:      alert.alerted.len() as u32,
            failed_moves: alert.failed_moves.len() as u32,
        };
        let result = self.writer.write_alert(&row);
        self.store_err(result);
    }

    fn on_monitor_end(&mut self, tick: Tick, agent: AgentId, reason: Termination) {
        let player = match reason {
            Termination::Acquired(player) => player.0,
            _ => u32::MAX,
        };
        let row = MonitorEndRow { tick: tick.0, agent: agent.0, reason: reason.as_str(), player };
        let result = self.writer.write_monitor_end(&row);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, tick: Tick, evaluated: usize) {
        if evaluated == 0 {
            return;
        }
        let row = TickSummaryRow { tick: tick.0, at_ms: self.clock.millis_at(tick).0, evaluated: evaluated as u64 };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
