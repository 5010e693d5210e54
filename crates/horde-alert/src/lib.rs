//! `horde-alert`: the alert propagation engine.
//!
//! When a mob starts hunting a player, the [`AlertDispatcher`] wakes the
//! eligible mobs around it, sends them toward the player, and reports them so
//! a [`PerceptionMonitor`] can watch each one until it finds a target.
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`cooldown`]    | `CooldownTracker`: per-mob last-alert stamps              |
//! | [`eligibility`] | `AllowedKinds`, `KindRejection`                           |
//! | [`params`]      | `AlertParameters`                                         |
//! | [`config`]      | `AlertSettings` (file) and `AlertConfig` (validated)      |
//! | [`dispatcher`]  | `AlertDispatcher`, `Alert`                                |
//! | [`monitor`]     | `PerceptionMonitor`, `Verdict`, `MonitorState`            |
//! | [`queue`]       | `MonitorQueue`: due-tick schedule of monitors             |
//!
//! Nothing here owns a clock or a loop; `horde-sim` drives these pieces.

pub mod config;
pub mod cooldown;
pub mod dispatcher;
pub mod eligibility;
pub mod error;
pub mod monitor;
pub mod params;
pub mod queue;

#[cfg(test)]
mod tests;

pub use config::{AlertConfig, AlertSettings};
pub use cooldown::CooldownTracker;
pub use dispatcher::{Alert, AlertDispatcher};
pub use eligibility::{AllowedKinds, KindRejection};
pub use error::{ConfigError, ConfigResult};
pub use monitor::{MonitorState, PerceptionMonitor, Termination, Verdict};
pub use params::AlertParameters;
pub use queue::MonitorQueue;
