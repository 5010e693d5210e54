//! World-space geometry: positions, half-extent boxes, and grid cells.
//!
//! Coordinates are `f64` block units with `y` pointing up.  The horizontal
//! plane is partitioned into square cells of [`CELL_SIZE`] blocks (the host's
//! chunk grid); cells are the broad-phase unit for alert fan-out.

/// Edge length of one spatial cell, in blocks.
pub const CELL_SIZE: f64 = 16.0;

// ── Position ──────────────────────────────────────────────────────────────────

/// A point in world space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance.  Compare against a squared radius to avoid
    /// the square root.
    #[inline]
    pub fn distance_squared(self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    #[inline]
    pub fn distance(self, other: Position) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// `self + (dx, dy, dz)`.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Position {
        Position::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Position, t: f64) -> Position {
        Position::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    /// Cell containing this position for a grid of `cell_size` blocks.
    #[inline]
    pub fn cell(self, cell_size: f64) -> CellPos {
        CellPos::new(
            (self.x / cell_size).floor() as i32,
            (self.z / cell_size).floor() as i32,
        )
    }

    /// Block (unit voxel) containing this position.
    #[inline]
    pub fn block(self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }

    /// `true` if `self` lies inside the box `center ± half` (bounds inclusive).
    #[inline]
    pub fn within_box(self, center: Position, half: Extent) -> bool {
        (self.x - center.x).abs() <= half.x
            && (self.y - center.y).abs() <= half.y
            && (self.z - center.z).abs() <= half.z
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ── Extent ────────────────────────────────────────────────────────────────────

/// Half-extents of an axis-aligned box.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Extent {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The perception box for a given radius: full radius horizontally, half
    /// radius vertically.
    #[inline]
    pub fn perception(radius: f64) -> Self {
        Self::new(radius, radius / 2.0, radius)
    }

    /// Lower and upper corners of the box around `center`.
    #[inline]
    pub fn corners(self, center: Position) -> (Position, Position) {
        (
            center.offset(-self.x, -self.y, -self.z),
            center.offset(self.x, self.y, self.z),
        )
    }
}

// ── CellPos ───────────────────────────────────────────────────────────────────

/// Horizontal grid cell coordinate (the host's chunk coordinate).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPos {
    pub x: i32,
    pub z: i32,
}

impl CellPos {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Every cell within `radius` cells of `self` (Chebyshev distance),
    /// including `self`.  `radius = 1` yields the 3×3 neighborhood.
    ///
    /// Iteration order is row-major: `x` outer, `z` inner, both ascending.
    pub fn neighborhood(self, radius: i32) -> impl Iterator<Item = CellPos> {
        let r = radius.max(0);
        (self.x - r..=self.x + r)
            .flat_map(move |x| (self.z - r..=self.z + r).map(move |z| CellPos::new(x, z)))
    }
}

impl std::fmt::Display for CellPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

// ── BlockPos ──────────────────────────────────────────────────────────────────

/// Integer voxel coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}
