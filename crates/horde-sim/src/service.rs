//! The `Horde` service and its tick loop.

use std::path::Path;
use std::sync::Arc;

use horde_alert::{
    Alert, AlertConfig, AlertDispatcher, CooldownTracker, MonitorQueue, MonitorState,
    PerceptionMonitor, Termination, Verdict,
};
use horde_core::{AgentId, SimClock, SimConfig, Tick};
use horde_world::World;

use crate::{EntityRef, HordeObserver, HostEvent, SimResult};

/// Which parameters a running perception monitor reads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ParamBinding {
    /// Whatever is published at the time of each check; a reload takes
    /// effect on the next check.
    #[default]
    Live,
    /// The parameters in effect when the monitor started.
    Snapshot,
}

/// One alert engine session bound to a host world.
///
/// `Horde<W>` owns the world, the current configuration, the cooldown table
/// and the perception monitors, and drives them one tick at a time:
///
/// 1. **Events**: deliver everything queued with [`submit`](Self::submit).
/// 2. **Host step**: [`World::advance`].
/// 3. **Drain**: take the monitors due this tick from the [`MonitorQueue`].
/// 4. **Evaluate** (parallel with the `parallel` feature): read-only
///    [`PerceptionMonitor::evaluate`] for each due monitor.
/// 5. **Apply** (sequential, ascending `AgentId`): resolve each verdict, then
///    reschedule active monitors `monitor_interval_ticks` ahead.
///
/// Create via [`HordeBuilder`][crate::HordeBuilder].
pub struct Horde<W: World> {
    /// Run length and tick duration.
    pub config: SimConfig,

    /// Current tick and its simulated time.
    pub clock: SimClock,

    /// The host.
    pub world: W,

    /// Active perception monitors, keyed by due tick.
    pub monitors: MonitorQueue,

    pub(crate) alert:      AlertConfig,
    pub(crate) dispatcher: AlertDispatcher,
    pub(crate) binding:    ParamBinding,
    pub(crate) pending:    Vec<HostEvent>,
}

impl<W: World> Horde<W> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: HordeObserver + ?Sized>(&mut self, observer: &mut O) {
        while self.clock.current_tick < self.config.end_tick() {
            self.tick(observer);
        }
        observer.on_run_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: HordeObserver + ?Sized>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    /// Process one tick and advance the clock.  Returns the number of
    /// monitors evaluated.
    pub fn tick<O: HordeObserver + ?Sized>(&mut self, observer: &mut O) -> usize {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ── Phase 1: queued host events ───────────────────────────────────
        for event in std::mem::take(&mut self.pending) {
            self.handle_event(event, observer);
        }

        // ── Phase 2: host step ────────────────────────────────────────────
        self.world.advance(now);

        // ── Phase 3: drain due monitors ───────────────────────────────────
        let due = self.monitors.drain_due(now);
        let evaluated = due.len();

        // ── Phase 4: evaluate (read-only) ─────────────────────────────────
        let verdicts = self.evaluate(&due);

        // ── Phase 5: apply in ascending AgentId order ─────────────────────
        for (monitor, verdict) in due.into_iter().zip(verdicts) {
            self.apply(monitor, verdict, now, observer);
        }

        observer.on_tick_end(now, evaluated);
        self.clock.advance();
        evaluated
    }

    /// Deliver one host event immediately.
    ///
    /// Only a mob targeting a player reaches the dispatcher.  A despawn
    /// cancels that mob's monitor.  Every other event is ignored.  Monitors
    /// started here get their first check on the current tick.
    pub fn handle_event<O: HordeObserver + ?Sized>(
        &mut self,
        event:    HostEvent,
        observer: &mut O,
    ) -> Option<Alert> {
        let now = self.clock.current_tick;
        match event {
            HostEvent::Targeted { source: EntityRef::Mob(mob), target: EntityRef::Player(player) } => {
                let alert = self.dispatcher.dispatch(&self.world, mob, player, &self.alert, self.clock.now())?;
                for &agent in &alert.alerted {
                    self.start_monitor(agent, now);
                }
                observer.on_alert(now, &alert);
                Some(alert)
            }
            HostEvent::Targeted { .. } => {
                tracing::trace!(?event, "ignoring targeting event");
                None
            }
            HostEvent::Despawned(agent) => {
                if self.monitors.cancel(agent).is_some() {
                    observer.on_monitor_end(now, agent, Termination::Cancelled);
                }
                None
            }
        }
    }

    /// Queue an event for delivery at the start of the next tick.
    pub fn submit(&mut self, event: HostEvent) {
        self.pending.push(event);
    }

    /// Publish a new configuration.
    ///
    /// Cooldown stamps and running monitors are kept.  Monitors bound to
    /// [`ParamBinding::Live`] see the new parameters on their next check.
    pub fn reload(&mut self, config: AlertConfig) {
        if config == self.alert {
            tracing::debug!("reloaded configuration is unchanged");
        } else {
            tracing::info!(
                allowed = config.allowed.len(),
                radius = config.params.aggression_radius,
                "configuration reloaded"
            );
        }
        self.alert = config;
    }

    /// Load, validate and publish a config file.
    ///
    /// On failure the previous configuration stays in effect.
    pub fn reload_from_path(&mut self, path: &Path) -> SimResult<()> {
        match AlertConfig::load(path) {
            Ok(config) => {
                self.reload(config);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("keeping previous configuration: {e}");
                Err(e.into())
            }
        }
    }

    /// Stop the monitor of `agent`.  Returns `false` if it had none.
    pub fn cancel_monitor(&mut self, agent: AgentId) -> bool {
        self.monitors.cancel(agent).is_some()
    }

    /// Stop every monitor and drop queued events.  Returns the number of
    /// monitors that were active.
    pub fn shutdown(&mut self) -> usize {
        self.pending.clear();
        let stopped = self.monitors.cancel_all();
        tracing::info!("alert engine shut down; {stopped} monitor(s) cancelled");
        stopped
    }

    pub fn alert_config(&self) -> &AlertConfig {
        &self.alert
    }

    pub fn binding(&self) -> ParamBinding {
        self.binding
    }

    pub fn dispatcher(&self) -> &AlertDispatcher {
        &self.dispatcher
    }

    pub fn cooldowns(&self) -> &Arc<CooldownTracker> {
        self.dispatcher.cooldowns()
    }

    /// Events waiting for the next tick.
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    // ── Tick internals ────────────────────────────────────────────────────

    fn start_monitor(&mut self, agent: AgentId, now: Tick) {
        let monitor = match self.binding {
            ParamBinding::Live     => PerceptionMonitor::new(agent, now),
            ParamBinding::Snapshot => PerceptionMonitor::with_snapshot(agent, now, self.alert.params),
        };
        if !self.monitors.start(monitor, now) {
            tracing::debug!("{agent} is already monitored");
        }
    }

    /// Read-only verdicts for `due`, in the same order.
    fn evaluate(&self, due: &[PerceptionMonitor]) -> Vec<Verdict> {
        let world = &self.world;
        let live = &self.alert.params;

        #[cfg(not(feature = "parallel"))]
        {
            due.iter().map(|m| m.evaluate(world, live)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            due.par_iter().map(|m| m.evaluate(world, live)).collect()
        }
    }

    fn apply<O: HordeObserver + ?Sized>(
        &mut self,
        mut monitor: PerceptionMonitor,
        verdict:     Verdict,
        now:         Tick,
        observer:    &mut O,
    ) {
        let agent = monitor.agent();
        match monitor.resolve(&self.world, verdict) {
            MonitorState::Active => {
                let interval = monitor.params(&self.alert.params).monitor_interval_ticks;
                self.monitors.schedule(monitor, now.offset(interval));
            }
            MonitorState::Terminated(reason) => {
                if self.alert.debug {
                    if let Termination::Acquired(player) = reason {
                        tracing::info!("{agent} acquired {player} after {} check(s)", monitor.checks());
                    }
                }
                tracing::debug!(agent = %agent, reason = reason.as_str(), "monitor ended");
                observer.on_monitor_end(now, agent, reason);
            }
        }
    }
}
