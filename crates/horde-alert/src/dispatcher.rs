//! `AlertDispatcher`: fans one targeting event out to nearby mobs.

use std::sync::Arc;

use horde_core::{AgentId, Millis, PlayerId, Position};
use horde_world::{World, WorldError};

use crate::{AlertConfig, CooldownTracker};

/// Outcome of one alert that was not suppressed.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    /// Mob whose targeting caused the alert.
    pub trigger:      AgentId,
    pub player:       PlayerId,
    /// Player position at the moment of the alert.
    pub destination:  Position,
    /// Mobs that were selected, in neighborhood order.  Each one needs a
    /// perception monitor.
    pub alerted:      Vec<AgentId>,
    /// Selected mobs whose move order the host refused.  They are still in
    /// `alerted`.
    pub failed_moves: Vec<(AgentId, WorldError)>,
    pub at:           Millis,
}

/// Selects and commands the mobs around a trigger.
///
/// `dispatch` takes `&self` and the cooldown claim is atomic, so one
/// dispatcher may be shared between threads handling different triggers.
/// A mob is never claimed by two concurrent alerts inside one cooldown
/// window.
#[derive(Clone, Default)]
pub struct AlertDispatcher {
    cooldowns: Arc<CooldownTracker>,
}

impl AlertDispatcher {
    /// Cells searched on each side of the trigger's cell (1 ⇒ a 3×3 block).
    pub const NEIGHBORHOOD_RADIUS: i32 = 1;

    pub fn new(cooldowns: Arc<CooldownTracker>) -> Self {
        Self { cooldowns }
    }

    pub fn cooldowns(&self) -> &Arc<CooldownTracker> {
        &self.cooldowns
    }

    /// Alert every eligible mob around `trigger` that `player` was spotted.
    ///
    /// Returns `None` when the alert is suppressed: the trigger is gone, of
    /// a kind that is not allowed, on cooldown, or the player is gone.
    pub fn dispatch<W: World + ?Sized>(
        &self,
        world:   &W,
        trigger: AgentId,
        player:  PlayerId,
        config:  &AlertConfig,
        now:     Millis,
    ) -> Option<Alert> {
        let params = &config.params;

        let source = world.mob(trigger)?;
        if !config.allowed.contains(source.kind) {
            return None;
        }
        let destination = world.player(player)?.position;

        if !self.cooldowns.try_claim(trigger, now, params.cooldown_ms) {
            if config.debug {
                tracing::info!("{trigger} is on cooldown; alert suppressed");
            }
            return None;
        }

        let center = world.cell_of(source.position);
        let candidates = world.mobs_in_cells(center, Self::NEIGHBORHOOD_RADIUS);

        let mut alerted = Vec::new();
        let mut failed_moves = Vec::new();

        for id in candidates {
            if id == trigger {
                continue;
            }
            let Some(mob) = world.mob(id) else { continue };
            if !config.allowed.contains(mob.kind) || mob.target.is_some() {
                continue;
            }
            if !self.cooldowns.try_claim(id, now, params.cooldown_ms) {
                continue;
            }

            if let Err(e) = world.raise_follow_range(id, params.follow_range_boost) {
                tracing::warn!("could not raise follow range of {id}: {e}");
            }
            if let Err(e) = world.move_to(id, destination) {
                tracing::warn!("{id} cannot move toward {player}: {e}");
                failed_moves.push((id, e));
            }
            if config.debug {
                tracing::info!("{id} ({}) alerted by {trigger}", mob.kind);
            }
            alerted.push(id);
        }

        if config.debug {
            tracing::info!(
                "{trigger} spotted {player}; {} mob(s) alerted around {center}",
                alerted.len()
            );
        } else {
            tracing::debug!(trigger = %trigger, player = %player, alerted = alerted.len(), "alert");
        }

        Some(Alert { trigger, player, destination, alerted, failed_moves, at: now })
    }
}
