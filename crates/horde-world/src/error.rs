//! Host-world error type.

use thiserror::Error;

use horde_core::{AgentId, PlayerId, Position};

/// Errors reported by a [`World`][crate::World] when a command or query
/// cannot be carried out.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorldError {
    #[error("mob {0} is no longer in the world")]
    MobGone(AgentId),

    #[error("player {0} is no longer in the world")]
    PlayerGone(PlayerId),

    #[error("no path for {mob} to {destination}")]
    NoPath { mob: AgentId, destination: Position },

    #[error("host rejected command: {0}")]
    Rejected(String),
}

pub type WorldResult<T> = Result<T, WorldError>;
