//! `horde-sim`: drives the alert engine against a host world.
//!
//! # Tick loop
//!
//! ```text
//! every tick:
//!   ① Events   : queued HostEvents: Targeted(mob → player) dispatches an
//!                 alert and starts one monitor per alerted mob;
//!                 Despawned(mob) cancels its monitor.
//!   ② Host     : World::advance (reference host walks mobs).
//!   ③ Drain    : monitors due this tick leave the MonitorQueue.
//!   ④ Evaluate : PerceptionMonitor::evaluate for each
//!                 (parallel with the `parallel` feature).
//!   ⑤ Apply    : in ascending AgentId order:
//!                   Continue / failed write → reschedule at now + interval
//!                   terminal                → on_monitor_end, dropped
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the evaluate phase on Rayon's thread pool.        |

pub mod builder;
pub mod error;
pub mod event;
pub mod observer;
pub mod service;


pub use builder::HordeBuilder;
pub use error::{SimError, SimResult};
pub use event::{EntityRef, HostEvent};
pub use observer::{HordeObserver, NoopObserver};
pub use service::{Horde, ParamBinding};
