//! `horde-core`: foundational types for the `horde` mob alert engine.
//!
//! This crate is a dependency of every other `horde-*` crate.  It has no
//! `horde-*` dependencies and only a few external ones (`rand`, `strum`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `PlayerId`                                 |
//! | [`geo`]         | `Position`, `Extent`, `CellPos`, `BlockPos`           |
//! | [`time`]        | `Tick`, `Millis`, `SimClock`, `SimConfig`             |
//! | [`kind`]        | `MobKind` enum with hostility/spawnability flags      |
//! | [`attribute`]   | `Attribute` (base + bonus), `Raise`                   |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod attribute;
pub mod geo;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use attribute::{Attribute, Raise};
pub use geo::{BlockPos, CELL_SIZE, CellPos, Extent, Position};
pub use ids::{AgentId, PlayerId};
pub use kind::MobKind;
pub use rng::SimRng;
pub use time::{Millis, SimClock, SimConfig, Tick};
