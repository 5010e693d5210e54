//! The `World` trait: everything the alert engine needs from its host.

use horde_core::{AgentId, CELL_SIZE, CellPos, Extent, MobKind, PlayerId, Position, Raise, Tick};

use crate::WorldResult;

/// A read-only snapshot of one mob, taken at query time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MobView {
    pub id:           AgentId,
    pub kind:         MobKind,
    pub position:     Position,
    /// The player the mob is currently hunting, if any.
    pub target:       Option<PlayerId>,
    /// Effective follow (perception) range.
    pub follow_range: f64,
}

/// A read-only snapshot of one player.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub id:       PlayerId,
    pub position: Position,
}

/// Host world as seen by the alert engine.
///
/// Every method takes `&self` so alert dispatch can run from several threads
/// at once; implementations guard their own state.  A mob that has been
/// removed or despawned is reported as `None` by [`mob`](Self::mob) and
/// commands addressed to it fail with [`WorldError::MobGone`][crate::WorldError::MobGone].
///
/// # Write semantics
///
/// - [`raise_follow_range`](Self::raise_follow_range) must be a max
///   operation applied atomically per mob: concurrent raises of the same mob
///   never lower its value.
/// - [`move_to`](Self::move_to) hands a destination to the host pathfinder
///   and returns immediately.
pub trait World: Send + Sync {
    /// Snapshot of a live mob, or `None` if it is gone.
    fn mob(&self, id: AgentId) -> Option<MobView>;

    /// Snapshot of a connected player, or `None` if they left.
    fn player(&self, id: PlayerId) -> Option<PlayerView>;

    /// Spatial cell containing `position`.
    ///
    /// Default: the standard 16-block grid.
    fn cell_of(&self, position: Position) -> CellPos {
        position.cell(CELL_SIZE)
    }

    /// All live mobs in the cells within `radius` of `center`, cell by cell.
    fn mobs_in_cells(&self, center: CellPos, radius: i32) -> Vec<AgentId>;

    /// All players inside the box `center ± half` (bounds inclusive).
    fn players_in_box(&self, center: Position, half: Extent) -> Vec<PlayerView>;

    /// Whether `mob` can see `player` without obstruction.
    fn has_line_of_sight(&self, mob: AgentId, player: PlayerId) -> WorldResult<bool>;

    /// Make `mob` hunt `player`.
    fn set_target(&self, mob: AgentId, player: PlayerId) -> WorldResult<()>;

    /// Raise the base follow range of `mob` to at least `floor`.
    fn raise_follow_range(&self, mob: AgentId, floor: f64) -> WorldResult<Raise>;

    /// Order `mob` to walk to `destination`.
    fn move_to(&self, mob: AgentId, destination: Position) -> WorldResult<()>;

    /// Host-side simulation step, called once per tick before perception
    /// checks run.  Hosts that drive their own loop leave this empty.
    fn advance(&mut self, _now: Tick) {}
}
