//! Observer trait for reporting and data collection.

use horde_alert::{Alert, Termination};
use horde_core::{AgentId, Tick};

/// Callbacks invoked by [`Horde`][crate::Horde] as events are handled and
/// ticks run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: alert counter
///
/// ```rust
/// use horde_alert::Alert;
/// use horde_core::Tick;
/// use horde_sim::HordeObserver;
///
/// #[derive(Default)]
/// struct AlertCounter { alerted: usize }
///
/// impl HordeObserver for AlertCounter {
///     fn on_alert(&mut self, _tick: Tick, alert: &Alert) {
///         self.alerted += alert.alerted.len();
///     }
/// }
/// ```
pub trait HordeObserver {
    /// Called at the very start of each tick, before pending events.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every alert that was not suppressed.
    fn on_alert(&mut self, _tick: Tick, _alert: &Alert) {}

    /// Called once when a perception monitor stops, for any reason.
    fn on_monitor_end(&mut self, _tick: Tick, _agent: AgentId, _reason: Termination) {}

    /// Called at the end of each tick.
    ///
    /// `evaluated` is the number of monitors checked this tick.
    fn on_tick_end(&mut self, _tick: Tick, _evaluated: usize) {}

    /// Called once after [`Horde::run`][crate::Horde::run] finishes.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`HordeObserver`] that does nothing.
pub struct NoopObserver;

impl HordeObserver for NoopObserver {}
