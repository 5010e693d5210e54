//! `GridWorld`: an in-memory reference host.
//!
//! Mobs live in a [`MobTable`] indexed by 16-block cells, players in an
//! R-tree, and terrain is a sparse set of solid blocks that block line of
//! sight and pathing.  Movement is straight-line walking at a fixed speed;
//! the pathfinder fails when the destination is inside a solid block or the
//! mob has been pinned.
//!
//! All state sits behind `RwLock`s so the world can be shared across alert
//! dispatch threads.  A poisoned lock is recovered rather than propagated:
//! the tables are plain data and stay consistent between statements.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashSet;

use horde_core::{AgentId, BlockPos, CellPos, Extent, MobKind, PlayerId, Position, Raise, Tick};

use crate::players::PlayerIndex;
use crate::store::MobTable;
use crate::{MobView, PlayerView, World, WorldError, WorldResult};

/// Height of the eyes above the feet, used for line-of-sight rays.
pub const EYE_HEIGHT: f64 = 1.6;

/// Distance between samples along a line-of-sight ray.
const SIGHT_STEP: f64 = 0.25;

pub struct GridWorld {
    mobs:                 RwLock<MobTable>,
    players:              RwLock<PlayerIndex>,
    solid:                FxHashSet<BlockPos>,
    /// Blocks walked per tick.
    walk_speed:           f64,
    /// Follow range given to newly spawned mobs.
    default_follow_range: f64,
}

impl GridWorld {
    pub(crate) fn from_parts(
        cell_size:            f64,
        walk_speed:           f64,
        default_follow_range: f64,
        solid:                FxHashSet<BlockPos>,
    ) -> Self {
        Self {
            mobs: RwLock::new(MobTable::new(cell_size)),
            players: RwLock::new(PlayerIndex::new()),
            solid,
            walk_speed,
            default_follow_range,
        }
    }

    // ── Population ────────────────────────────────────────────────────────

    pub fn spawn_mob(&self, kind: MobKind, position: Position) -> AgentId {
        self.mobs_mut().spawn(kind, position, self.default_follow_range)
    }

    /// Remove a mob.  Returns `false` if it was already gone.
    pub fn despawn_mob(&self, id: AgentId) -> bool {
        self.mobs_mut().despawn(id)
    }

    pub fn join_player(&self, position: Position) -> PlayerId {
        self.players_mut().join(position)
    }

    pub fn move_player(&self, id: PlayerId, to: Position) -> bool {
        self.players_mut().relocate(id, to)
    }

    pub fn leave_player(&self, id: PlayerId) -> bool {
        self.players_mut().leave(id)
    }

    // ── Terrain ───────────────────────────────────────────────────────────

    pub fn set_solid(&mut self, block: BlockPos) {
        self.solid.insert(block);
    }

    pub fn is_solid(&self, block: BlockPos) -> bool {
        self.solid.contains(&block)
    }

    // ── Direct mob manipulation (host AI stand-ins) ───────────────────────

    /// Make every future `move_to` for `id` fail.
    pub fn pin_mob(&self, id: AgentId) {
        let mut mobs = self.mobs_mut();
        if mobs.is_alive(id) {
            mobs.pinned[id.index()] = true;
        }
    }

    /// Set or clear a target without going through the alert engine.
    pub fn force_target(&self, id: AgentId, target: Option<PlayerId>) {
        let mut mobs = self.mobs_mut();
        if mobs.is_alive(id) {
            mobs.target[id.index()] = target;
        }
    }

    pub fn teleport_mob(&self, id: AgentId, to: Position) {
        self.mobs_mut().relocate(id, to);
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn destination(&self, id: AgentId) -> Option<Position> {
        let mobs = self.mobs_ref();
        if mobs.is_alive(id) { mobs.destination[id.index()] } else { None }
    }

    /// Base follow range, or `None` if the mob is gone.
    pub fn follow_range_base(&self, id: AgentId) -> Option<f64> {
        let mobs = self.mobs_ref();
        mobs.is_alive(id).then(|| mobs.follow_range[id.index()].base)
    }

    pub fn mob_ids(&self) -> Vec<AgentId> {
        self.mobs_ref().live_ids().collect()
    }

    pub fn mob_count(&self) -> usize {
        self.mobs_ref().live_ids().count()
    }

    pub fn player_count(&self) -> usize {
        self.players_ref().len()
    }

    // ── Lock helpers ──────────────────────────────────────────────────────

    fn mobs_ref(&self) -> RwLockReadGuard<'_, MobTable> {
        self.mobs.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn mobs_mut(&self) -> RwLockWriteGuard<'_, MobTable> {
        self.mobs.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn players_ref(&self) -> RwLockReadGuard<'_, PlayerIndex> {
        self.players.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn players_mut(&self) -> RwLockWriteGuard<'_, PlayerIndex> {
        self.players.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// March from `from` to `to` in fixed steps; any solid sample blocks.
    fn ray_is_clear(&self, from: Position, to: Position) -> bool {
        if self.solid.is_empty() {
            return true;
        }
        let length = from.distance(to);
        let steps = (length / SIGHT_STEP).ceil() as usize;
        (1..steps).all(|i| {
            let t = i as f64 / steps as f64;
            !self.solid.contains(&from.lerp(to, t).block())
        })
    }
}

impl World for GridWorld {
    fn mob(&self, id: AgentId) -> Option<MobView> {
        self.mobs_ref().view(id)
    }

    fn player(&self, id: PlayerId) -> Option<PlayerView> {
        self.players_ref().get(id)
    }

    fn cell_of(&self, position: Position) -> CellPos {
        position.cell(self.mobs_ref().cell_size())
    }

    fn mobs_in_cells(&self, center: CellPos, radius: i32) -> Vec<AgentId> {
        self.mobs_ref().in_cells(center, radius)
    }

    fn players_in_box(&self, center: Position, half: Extent) -> Vec<PlayerView> {
        self.players_ref().in_box(center, half)
    }

    fn has_line_of_sight(&self, mob: AgentId, player: PlayerId) -> WorldResult<bool> {
        let from = self.mob(mob).ok_or(WorldError::MobGone(mob))?.position;
        let to = self.player(player).ok_or(WorldError::PlayerGone(player))?.position;
        Ok(self.ray_is_clear(from.offset(0.0, EYE_HEIGHT, 0.0), to.offset(0.0, EYE_HEIGHT, 0.0)))
    }

    fn set_target(&self, mob: AgentId, player: PlayerId) -> WorldResult<()> {
        if self.player(player).is_none() {
            return Err(WorldError::PlayerGone(player));
        }
        let mut mobs = self.mobs_mut();
        if !mobs.is_alive(mob) {
            return Err(WorldError::MobGone(mob));
        }
        mobs.target[mob.index()] = Some(player);
        Ok(())
    }

    fn raise_follow_range(&self, mob: AgentId, floor: f64) -> WorldResult<Raise> {
        // Read-modify-write under one write guard keeps concurrent raises a max.
        let mut mobs = self.mobs_mut();
        if !mobs.is_alive(mob) {
            return Err(WorldError::MobGone(mob));
        }
        Ok(mobs.follow_range[mob.index()].raise_base_to(floor))
    }

    fn move_to(&self, mob: AgentId, destination: Position) -> WorldResult<()> {
        let mut mobs = self.mobs_mut();
        if !mobs.is_alive(mob) {
            return Err(WorldError::MobGone(mob));
        }
        if mobs.pinned[mob.index()] || self.solid.contains(&destination.block()) {
            return Err(WorldError::NoPath { mob, destination });
        }
        mobs.destination[mob.index()] = Some(destination);
        Ok(())
    }

    fn advance(&mut self, _now: Tick) {
        let speed = self.walk_speed;
        let mobs = self.mobs.get_mut().unwrap_or_else(PoisonError::into_inner);
        let walking: Vec<(AgentId, Position, Position)> = mobs
            .live_ids()
            .filter_map(|id| {
                mobs.destination[id.index()].map(|dest| (id, mobs.position[id.index()], dest))
            })
            .collect();

        for (id, from, dest) in walking {
            let remaining = from.distance(dest);
            if remaining <= speed {
                mobs.relocate(id, dest);
                mobs.destination[id.index()] = None;
                tracing::trace!(mob = %id, at = %dest, "mob reached destination");
            } else {
                mobs.relocate(id, from.lerp(dest, speed / remaining));
            }
        }
    }
}
