//! `horde-world`: the host boundary of the alert engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`world`]   | `World` trait, `MobView`, `PlayerView`                      |
//! | [`grid`]    | `GridWorld`: in-memory reference host                       |
//! | [`builder`] | `GridWorldBuilder`                                          |
//! | [`store`]   | `MobTable` (SoA mob storage + cell index)                   |
//! | [`players`] | `PlayerIndex` (R-tree over player positions)                |
//! | [`error`]   | `WorldError`, `WorldResult<T>`                              |
//!
//! The alert engine only ever talks to [`World`].  A real game server
//! implements it over its own entity system; `GridWorld` exists for tests,
//! demos and soak runs.

pub mod builder;
pub mod error;
pub mod grid;
pub mod players;
pub mod store;
pub mod world;


pub use builder::GridWorldBuilder;
pub use error::{WorldError, WorldResult};
pub use grid::{EYE_HEIGHT, GridWorld};
pub use players::PlayerIndex;
pub use store::MobTable;
pub use world::{MobView, PlayerView, World};
