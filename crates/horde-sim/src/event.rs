//! Host events, as seen at the engine boundary.
//!
//! The host translates its own entity types into these tagged variants; the
//! engine never inspects anything else about a host entity.

use horde_core::{AgentId, PlayerId};

/// An entity taking part in a host event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityRef {
    Player(PlayerId),
    Mob(AgentId),
    /// Anything else (projectiles, item frames, other non-mob entities).
    Other,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// `source` started targeting `target`.
    Targeted { source: EntityRef, target: EntityRef },
    /// A mob was removed from the world.
    Despawned(AgentId),
}

impl HostEvent {
    /// The only kind of targeting that raises an alert.
    pub fn mob_targets_player(mob: AgentId, player: PlayerId) -> Self {
        HostEvent::Targeted {
            source: EntityRef::Mob(mob),
            target: EntityRef::Player(player),
        }
    }
}
