//! Fluent builder for constructing a populated [`GridWorld`].
//!
//! # Usage
//!
//! ```rust
//! use horde_core::{MobKind, Position};
//! use horde_world::{GridWorldBuilder, World};
//!
//! let world = GridWorldBuilder::new()
//!     .wall(-2, 64, 5, 2, 67, 5)
//!     .mob(MobKind::Zombie, Position::new(0.0, 64.0, 0.0))
//!     .player(Position::new(0.0, 64.0, 12.0))
//!     .build();
//!
//! assert_eq!(world.mob_count(), 1);
//! assert_eq!(world.player_count(), 1);
//! ```

use rustc_hash::FxHashSet;

use horde_core::{BlockPos, CELL_SIZE, MobKind, Position};

use crate::GridWorld;

/// Fluent builder for [`GridWorld`].
///
/// Mobs and players are added in call order, so the first `.mob(..)` gets
/// `AgentId(0)` and the first `.player(..)` gets `PlayerId(0)`.
pub struct GridWorldBuilder {
    cell_size:            f64,
    walk_speed:           f64,
    default_follow_range: f64,
    solid:                FxHashSet<BlockPos>,
    mobs:                 Vec<(MobKind, Position)>,
    players:              Vec<Position>,
}

impl Default for GridWorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GridWorldBuilder {
    pub fn new() -> Self {
        Self {
            cell_size:            CELL_SIZE,
            walk_speed:           0.25,
            default_follow_range: 16.0,
            solid:                FxHashSet::default(),
            mobs:                 Vec::new(),
            players:              Vec::new(),
        }
    }

    /// Edge length of a broad-phase cell.  Default: 16.
    pub fn cell_size(mut self, size: f64) -> Self {
        self.cell_size = size;
        self
    }

    /// Blocks walked per tick.  Default: 0.25 (5 blocks per second at 20 Hz).
    pub fn walk_speed(mut self, speed: f64) -> Self {
        self.walk_speed = speed;
        self
    }

    /// Base follow range of every spawned mob.  Default: 16.
    pub fn default_follow_range(mut self, range: f64) -> Self {
        self.default_follow_range = range;
        self
    }

    pub fn solid(mut self, block: BlockPos) -> Self {
        self.solid.insert(block);
        self
    }

    /// Fill the inclusive block box between two corners.
    pub fn wall(mut self, x0: i32, y0: i32, z0: i32, x1: i32, y1: i32, z1: i32) -> Self {
        for x in x0.min(x1)..=x0.max(x1) {
            for y in y0.min(y1)..=y0.max(y1) {
                for z in z0.min(z1)..=z0.max(z1) {
                    self.solid.insert(BlockPos::new(x, y, z));
                }
            }
        }
        self
    }

    pub fn mob(mut self, kind: MobKind, position: Position) -> Self {
        self.mobs.push((kind, position));
        self
    }

    pub fn player(mut self, position: Position) -> Self {
        self.players.push(position);
        self
    }

    pub fn build(self) -> GridWorld {
        let world = GridWorld::from_parts(
            self.cell_size,
            self.walk_speed,
            self.default_follow_range,
            self.solid,
        );
        for (kind, position) in self.mobs {
            world.spawn_mob(kind, position);
        }
        for position in self.players {
            world.join_player(position);
        }
        world
    }
}
