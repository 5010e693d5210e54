//! Fluent builder for constructing a [`Horde`].

use std::sync::Arc;

use horde_alert::{AlertConfig, AlertDispatcher, CooldownTracker, MonitorQueue};
use horde_core::SimConfig;
use horde_world::World;

use crate::{Horde, ParamBinding, SimError, SimResult};

/// Fluent builder for [`Horde<W>`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                          |
/// |---------------------|----------------------------------|
/// | `.sim_config(c)`    | `SimConfig::default()` (50 ms)   |
/// | `.alert_config(c)`  | `AlertConfig::default()`         |
/// | `.cooldowns(t)`     | a fresh, empty tracker           |
/// | `.binding(b)`       | `ParamBinding::Live`             |
///
/// # Example
///
/// ```rust
/// use horde_alert::AlertConfig;
/// use horde_sim::{HordeBuilder, NoopObserver, ParamBinding};
/// use horde_world::GridWorldBuilder;
///
/// let mut horde = HordeBuilder::new(GridWorldBuilder::new().build())
///     .alert_config(AlertConfig::default())
///     .binding(ParamBinding::Snapshot)
///     .build()
///     .unwrap();
/// horde.run_ticks(3, &mut NoopObserver);
/// assert_eq!(horde.clock.current_tick.0, 3);
/// ```
pub struct HordeBuilder<W: World> {
    world:     W,
    config:    SimConfig,
    alert:     AlertConfig,
    cooldowns: Option<Arc<CooldownTracker>>,
    binding:   ParamBinding,
}

impl<W: World> HordeBuilder<W> {
    pub fn new(world: W) -> Self {
        Self {
            world,
            config:    SimConfig::default(),
            alert:     AlertConfig::default(),
            cooldowns: None,
            binding:   ParamBinding::default(),
        }
    }

    pub fn sim_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn alert_config(mut self, config: AlertConfig) -> Self {
        self.alert = config;
        self
    }

    /// Share a cooldown table with other dispatchers.
    pub fn cooldowns(mut self, cooldowns: Arc<CooldownTracker>) -> Self {
        self.cooldowns = Some(cooldowns);
        self
    }

    pub fn binding(mut self, binding: ParamBinding) -> Self {
        self.binding = binding;
        self
    }

    /// Validate inputs and return a ready-to-run [`Horde`].
    pub fn build(self) -> SimResult<Horde<W>> {
        if self.config.tick_duration_ms == 0 {
            return Err(SimError::Clock("tick_duration_ms must be at least 1".to_owned()));
        }
        let cooldowns = self.cooldowns.unwrap_or_default();

        Ok(Horde {
            clock:      self.config.make_clock(),
            config:     self.config,
            world:      self.world,
            monitors:   MonitorQueue::new(),
            alert:      self.alert,
            dispatcher: AlertDispatcher::new(cooldowns),
            binding:    self.binding,
            pending:    Vec::new(),
        })
    }
}
