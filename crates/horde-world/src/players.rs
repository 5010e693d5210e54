//! Player positions with an R-tree for box queries.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds one `[x, y, z]` point per player.  Box
//! queries use `locate_in_envelope`, which is inclusive on every face, so a
//! player sitting exactly on the perception boundary is found.

use rstar::{AABB, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use horde_core::{Extent, PlayerId, Position};

use crate::PlayerView;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
struct PlayerEntry {
    point: [f64; 3],
    id:    PlayerId,
}

impl PlayerEntry {
    fn new(id: PlayerId, p: Position) -> Self {
        Self { point: [p.x, p.y, p.z], id }
    }
}

impl RTreeObject for PlayerEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

// ── PlayerIndex ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct PlayerIndex {
    tree:      RTree<PlayerEntry>,
    positions: FxHashMap<PlayerId, Position>,
    next_id:   u32,
}

impl PlayerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&mut self, position: Position) -> PlayerId {
        let id = PlayerId(self.next_id);
        self.next_id += 1;
        self.tree.insert(PlayerEntry::new(id, position));
        self.positions.insert(id, position);
        id
    }

    /// Returns `false` if the player is not connected.
    pub fn relocate(&mut self, id: PlayerId, to: Position) -> bool {
        let Some(from) = self.positions.get(&id).copied() else {
            return false;
        };
        self.tree.remove(&PlayerEntry::new(id, from));
        self.tree.insert(PlayerEntry::new(id, to));
        self.positions.insert(id, to);
        true
    }

    pub fn leave(&mut self, id: PlayerId) -> bool {
        match self.positions.remove(&id) {
            Some(at) => {
                self.tree.remove(&PlayerEntry::new(id, at));
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: PlayerId) -> Option<PlayerView> {
        self.positions
            .get(&id)
            .map(|&position| PlayerView { id, position })
    }

    /// Players inside `center ± half`, in ascending `PlayerId` order.
    pub fn in_box(&self, center: Position, half: Extent) -> Vec<PlayerView> {
        let (lo, hi) = half.corners(center);
        let envelope = AABB::from_corners([lo.x, lo.y, lo.z], [hi.x, hi.y, hi.z]);
        let mut found: Vec<PlayerView> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|e| PlayerView {
                id:       e.id,
                position: Position::new(e.point[0], e.point[1], e.point[2]),
            })
            .collect();
        found.sort_by_key(|p| p.id);
        found
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
