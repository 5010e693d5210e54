//! `MonitorQueue`: sparse timer wheel for perception monitors.
//!
//! Due checks are stored as `(agent, generation)` pairs in a
//! `BTreeMap<Tick, Vec<..>>`; the monitors themselves live in a map keyed by
//! agent.  Cancelling a monitor removes it from the map and leaves its wake
//! entry behind; the entry is recognized as stale when it comes due, because
//! either the agent has no live monitor or the live monitor carries a newer
//! generation.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use horde_core::{AgentId, Tick};

use crate::PerceptionMonitor;

#[derive(Default)]
pub struct MonitorQueue {
    due:             BTreeMap<Tick, Vec<(AgentId, u64)>>,
    live:            FxHashMap<AgentId, PerceptionMonitor>,
    next_generation: u64,
}

impl MonitorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new monitor with its first check at `at`.
    ///
    /// Returns `false` and drops `monitor` if its agent is already
    /// monitored; the existing monitor keeps running unchanged.
    pub fn start(&mut self, mut monitor: PerceptionMonitor, at: Tick) -> bool {
        let agent = monitor.agent();
        if !monitor.is_active() || self.live.contains_key(&agent) {
            return false;
        }
        monitor.generation = self.next_generation;
        self.next_generation += 1;
        self.due.entry(at).or_default().push((agent, monitor.generation));
        self.live.insert(agent, monitor);
        true
    }

    /// Put back a monitor returned by [`drain_due`](Self::drain_due) for its
    /// next check.  Terminated monitors are dropped.
    pub fn schedule(&mut self, monitor: PerceptionMonitor, at: Tick) {
        if !monitor.is_active() {
            return;
        }
        let agent = monitor.agent();
        self.due.entry(at).or_default().push((agent, monitor.generation));
        self.live.insert(agent, monitor);
    }

    /// Remove and return every monitor due at or before `tick`, sorted by
    /// agent.
    ///
    /// The returned monitors are no longer in the queue; the caller either
    /// reschedules them or lets them drop.
    pub fn drain_due(&mut self, tick: Tick) -> Vec<PerceptionMonitor> {
        let later = self.due.split_off(&tick.offset(1));
        let ready = std::mem::replace(&mut self.due, later);

        let mut out = Vec::new();
        for (agent, generation) in ready.into_values().flatten() {
            let current = self.live.get(&agent).is_some_and(|m| m.generation == generation);
            if current {
                if let Some(monitor) = self.live.remove(&agent) {
                    out.push(monitor);
                }
            }
        }
        out.sort_by_key(|m| m.agent());
        out
    }

    /// Stop and remove the monitor of `agent`.
    pub fn cancel(&mut self, agent: AgentId) -> Option<PerceptionMonitor> {
        let mut monitor = self.live.remove(&agent)?;
        monitor.cancel();
        Some(monitor)
    }

    /// Stop every monitor.  Returns how many were active.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.live.len();
        self.live.clear();
        self.due.clear();
        n
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.live.contains_key(&agent)
    }

    pub fn get(&self, agent: AgentId) -> Option<&PerceptionMonitor> {
        self.live.get(&agent)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Earliest tick with a pending entry (possibly stale).
    pub fn next_tick(&self) -> Option<Tick> {
        self.due.keys().next().copied()
    }

    /// Monitored agents in ascending order.
    pub fn agents(&self) -> Vec<AgentId> {
        let mut agents: Vec<AgentId> = self.live.keys().copied().collect();
        agents.sort();
        agents
    }
}
