//! `MobTable`: Structure-of-Arrays storage for the reference world's mobs.
//!
//! Every `Vec` field has exactly `count` elements and the `AgentId` value is
//! the index into all of them:
//!
//! ```ignore
//! let pos = table.position[mob.index()];
//! ```
//!
//! Despawned mobs keep their slot (`alive = false`) so IDs are never reused
//! within a session.  A sparse `CellPos → Vec<AgentId>` index is kept in
//! sync with positions for broad-phase neighborhood queries.

use rustc_hash::FxHashMap;

use horde_core::{AgentId, Attribute, CellPos, MobKind, PlayerId, Position};

use crate::MobView;

pub struct MobTable {
    /// Number of slots ever allocated (live + despawned).
    pub count: usize,

    pub kind: Vec<MobKind>,

    pub position: Vec<Position>,

    /// Current hunting target.  `None` while idle.
    pub target: Vec<Option<PlayerId>>,

    /// Follow (perception) range attribute.
    pub follow_range: Vec<Attribute>,

    /// `false` once despawned.
    pub alive: Vec<bool>,

    /// Pending walk destination, cleared on arrival.
    pub destination: Vec<Option<Position>>,

    /// Mobs whose pathfinder refuses every destination.
    pub pinned: Vec<bool>,

    cell_size: f64,
    cells:     FxHashMap<CellPos, Vec<AgentId>>,
}

impl MobTable {
    pub fn new(cell_size: f64) -> Self {
        Self {
            count:        0,
            kind:         Vec::new(),
            position:     Vec::new(),
            target:       Vec::new(),
            follow_range: Vec::new(),
            alive:        Vec::new(),
            destination:  Vec::new(),
            pinned:       Vec::new(),
            cell_size,
            cells:        FxHashMap::default(),
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Append a live mob and index it.
    pub fn spawn(&mut self, kind: MobKind, position: Position, follow_range: f64) -> AgentId {
        let id = AgentId(self.count as u32);
        self.count += 1;
        self.kind.push(kind);
        self.position.push(position);
        self.target.push(None);
        self.follow_range.push(Attribute::new(follow_range));
        self.alive.push(true);
        self.destination.push(None);
        self.pinned.push(false);
        self.cells.entry(position.cell(self.cell_size)).or_default().push(id);
        id
    }

    /// Mark a mob dead and drop it from the cell index.  Returns `false` if it
    /// was already gone.
    pub fn despawn(&mut self, id: AgentId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let i = id.index();
        self.alive[i] = false;
        self.destination[i] = None;
        self.target[i] = None;
        let cell = self.position[i].cell(self.cell_size);
        self.unindex(cell, id);
        true
    }

    #[inline]
    pub fn is_alive(&self, id: AgentId) -> bool {
        self.alive.get(id.index()).copied().unwrap_or(false)
    }

    /// Move a mob and keep the cell index in sync.
    pub fn relocate(&mut self, id: AgentId, to: Position) {
        if !self.is_alive(id) {
            return;
        }
        let i = id.index();
        let from_cell = self.position[i].cell(self.cell_size);
        let to_cell = to.cell(self.cell_size);
        self.position[i] = to;
        if from_cell != to_cell {
            self.unindex(from_cell, id);
            self.cells.entry(to_cell).or_default().push(id);
        }
    }

    /// Live mobs in every cell within `radius` of `center`.
    pub fn in_cells(&self, center: CellPos, radius: i32) -> Vec<AgentId> {
        center
            .neighborhood(radius)
            .filter_map(|cell| self.cells.get(&cell))
            .flat_map(|ids| ids.iter().copied())
            .collect()
    }

    pub fn view(&self, id: AgentId) -> Option<MobView> {
        if !self.is_alive(id) {
            return None;
        }
        let i = id.index();
        Some(MobView {
            id,
            kind:         self.kind[i],
            position:     self.position[i],
            target:       self.target[i],
            follow_range: self.follow_range[i].effective(),
        })
    }

    /// Iterator over live mob IDs in ascending order.
    pub fn live_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(i, _)| AgentId(i as u32))
    }

    fn unindex(&mut self, cell: CellPos, id: AgentId) {
        if let Some(ids) = self.cells.get_mut(&cell) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.cells.remove(&cell);
            }
        }
    }
}
