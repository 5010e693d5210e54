//! `CooldownTracker`: per-mob last-alert timestamps.
//!
//! A mob that was alerted (or triggered an alert) less than `window`
//! milliseconds ago is on cooldown and cannot take part in another alert.
//! Entries are never deleted: a stale entry only matters until its window
//! has elapsed, after which it behaves exactly like "never alerted".
//!
//! The map sits behind one `Mutex`.  [`try_claim`](CooldownTracker::try_claim)
//! checks and stamps under a single guard, so two dispatch passes running on
//! different threads can never both claim the same mob.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;

use horde_core::{AgentId, Millis};

#[derive(Default)]
pub struct CooldownTracker {
    entries: Mutex<FxHashMap<AgentId, Millis>>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` iff `agent` was stamped and `now - stamp < window_ms`.
    pub fn is_on_cooldown(&self, agent: AgentId, now: Millis, window_ms: u64) -> bool {
        self.lock()
            .get(&agent)
            .is_some_and(|&stamp| now.since(stamp) < window_ms)
    }

    /// Stamp `agent` with `now`, replacing any earlier stamp.
    pub fn set_cooldown(&self, agent: AgentId, now: Millis) {
        self.lock().insert(agent, now);
    }

    /// Atomic check-then-set.
    ///
    /// Returns `true` and stamps `agent` if it was not on cooldown; returns
    /// `false` and leaves the existing stamp untouched otherwise.
    pub fn try_claim(&self, agent: AgentId, now: Millis, window_ms: u64) -> bool {
        let mut entries = self.lock();
        let on_cooldown = entries
            .get(&agent)
            .is_some_and(|&stamp| now.since(stamp) < window_ms);
        if on_cooldown {
            return false;
        }
        entries.insert(agent, now);
        true
    }

    /// Time of the last alert involving `agent`.
    pub fn last_alert(&self, agent: AgentId) -> Option<Millis> {
        self.lock().get(&agent).copied()
    }

    /// Number of mobs ever stamped (including expired stamps).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, FxHashMap<AgentId, Millis>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
