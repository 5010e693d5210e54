//! Numeric mob attributes (follow/perception range).

/// A numeric attribute with a base value and an additive bonus from
/// equipment or effects.  The alert engine only touches `base`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub base:  f64,
    pub bonus: f64,
}

/// Outcome of [`Attribute::raise_base_to`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Raise {
    /// `base` was already at or above the floor.
    Unchanged { base: f64 },
    /// `base` moved from `from` up to `to`.
    Raised { from: f64, to: f64 },
}

impl Raise {
    #[inline]
    pub fn changed(self) -> bool {
        matches!(self, Raise::Raised { .. })
    }
}

impl Attribute {
    #[inline]
    pub const fn new(base: f64) -> Self {
        Self { base, bonus: 0.0 }
    }

    /// The value the host AI reads.
    #[inline]
    pub fn effective(&self) -> f64 {
        self.base + self.bonus
    }

    /// Raise `base` to at least `floor`.  Never lowers it.
    pub fn raise_base_to(&mut self, floor: f64) -> Raise {
        if self.base < floor {
            let from = self.base;
            self.base = floor;
            Raise::Raised { from, to: floor }
        } else {
            Raise::Unchanged { base: self.base }
        }
    }
}
