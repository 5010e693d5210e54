//! `PerceptionMonitor`: the heightened-perception state of one alerted mob.
//!
//! A monitor is checked once every `monitor_interval_ticks`, the first check
//! at the tick it starts.  Each check is split in two:
//!
//! 1. [`evaluate`](PerceptionMonitor::evaluate) reads the world and returns a
//!    [`Verdict`].  It takes `&self`, so many monitors can be evaluated in
//!    parallel against a shared `&World`.
//! 2. [`resolve`](PerceptionMonitor::resolve) applies the verdict: it is the
//!    only place a monitor writes to the world (`set_target`) and the only
//!    place its state changes.
//!
//! Once terminated a monitor never becomes active again.

use horde_core::{AgentId, PlayerId, Tick};
use horde_world::{World, WorldError};

use crate::AlertParameters;

/// Why a monitor stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The mob was removed or despawned.
    AgentGone,
    /// The mob already hunted someone when the check ran; its target is left
    /// untouched.
    AlreadyTargeted,
    /// The mob was pointed at this player.
    Acquired(PlayerId),
    /// Stopped from outside (despawn event, shutdown, explicit cancel).
    Cancelled,
}

impl Termination {
    pub fn as_str(self) -> &'static str {
        match self {
            Termination::AgentGone       => "agent_gone",
            Termination::AlreadyTargeted => "already_targeted",
            Termination::Acquired(_)     => "acquired",
            Termination::Cancelled       => "cancelled",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MonitorState {
    Active,
    Terminated(Termination),
}

impl MonitorState {
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, MonitorState::Active)
    }
}

/// Result of the read-only half of a perception check.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Verdict {
    /// Nobody qualifies yet; check again next interval.
    Continue,
    /// Terminal condition detected without any write.
    Stop(Termination),
    /// Target `player`.
    Acquire {
        player:      PlayerId,
        distance_sq: f64,
        in_sight:    bool,
    },
}

/// Per-mob perception check.
#[derive(Clone, Debug)]
pub struct PerceptionMonitor {
    agent:    AgentId,
    state:    MonitorState,
    started:  Tick,
    checks:   u32,
    snapshot: Option<AlertParameters>,
    pub(crate) generation: u64,
}

impl PerceptionMonitor {
    /// A monitor that reads the live parameters on every check.
    pub fn new(agent: AgentId, started: Tick) -> Self {
        Self {
            agent,
            state:      MonitorState::Active,
            started,
            checks:     0,
            snapshot:   None,
            generation: 0,
        }
    }

    /// A monitor pinned to the parameters in effect when it started.
    pub fn with_snapshot(agent: AgentId, started: Tick, params: AlertParameters) -> Self {
        Self { snapshot: Some(params), ..Self::new(agent, started) }
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn started(&self) -> Tick {
        self.started
    }

    /// Number of checks resolved so far.
    pub fn checks(&self) -> u32 {
        self.checks
    }

    /// Parameters this monitor uses, given the currently published ones.
    #[inline]
    pub fn params<'a>(&'a self, live: &'a AlertParameters) -> &'a AlertParameters {
        self.snapshot.as_ref().unwrap_or(live)
    }

    /// Decide what this check should do.  Never writes.
    pub fn evaluate<W: World + ?Sized>(&self, world: &W, live: &AlertParameters) -> Verdict {
        if !self.is_active() {
            return Verdict::Continue;
        }
        let Some(mob) = world.mob(self.agent) else {
            return Verdict::Stop(Termination::AgentGone);
        };
        if mob.target.is_some() {
            return Verdict::Stop(Termination::AlreadyTargeted);
        }

        let params = self.params(live);
        let radius_sq = params.aggression_radius_sq();

        for player in world.players_in_box(mob.position, params.perception_box()) {
            let distance_sq = mob.position.distance_squared(player.position);
            let in_sight = match world.has_line_of_sight(self.agent, player.id) {
                Ok(seen) => seen,
                Err(e) => {
                    tracing::debug!("sight check {} -> {} failed: {e}", self.agent, player.id);
                    false
                }
            };
            if in_sight || distance_sq <= radius_sq {
                return Verdict::Acquire { player: player.id, distance_sq, in_sight };
            }
        }
        Verdict::Continue
    }

    /// Apply a verdict produced by [`evaluate`](Self::evaluate).
    pub fn resolve<W: World + ?Sized>(&mut self, world: &W, verdict: Verdict) -> MonitorState {
        if !self.is_active() {
            return self.state;
        }
        self.checks += 1;
        match verdict {
            Verdict::Continue => {}
            Verdict::Stop(reason) => self.state = MonitorState::Terminated(reason),
            Verdict::Acquire { player, .. } => match world.set_target(self.agent, player) {
                Ok(()) => self.state = MonitorState::Terminated(Termination::Acquired(player)),
                Err(WorldError::MobGone(_)) => {
                    self.state = MonitorState::Terminated(Termination::AgentGone);
                }
                Err(e) => tracing::warn!("{} could not target {player}: {e}", self.agent),
            },
        }
        self.state
    }

    /// Evaluate and resolve in one step.
    pub fn tick<W: World + ?Sized>(&mut self, world: &W, live: &AlertParameters) -> MonitorState {
        let verdict = self.evaluate(world, live);
        self.resolve(world, verdict)
    }

    /// Force-stop.  No effect on a monitor that already terminated.
    pub fn cancel(&mut self) {
        if self.is_active() {
            self.state = MonitorState::Terminated(Termination::Cancelled);
        }
    }
}
