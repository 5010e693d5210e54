//! `AllowedKinds`: the set of mob kinds that take part in alerts.

use std::str::FromStr;

use rustc_hash::FxHashSet;
use thiserror::Error;

use horde_core::MobKind;

/// Why a configured kind name was left out of the allowed set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KindRejection {
    #[error("unknown mob type in config: {0}")]
    Unknown(String),

    #[error("mob type {0} is not hostile")]
    NotHostile(MobKind),

    #[error("mob type {0} cannot spawn")]
    NotSpawnable(MobKind),
}

/// Set of kinds eligible for alert participation.
///
/// Only hostile, spawnable kinds can be members.  The set is built once per
/// configuration load and never mutated afterwards; a reload builds a fresh
/// one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowedKinds(FxHashSet<MobKind>);

impl AllowedKinds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from config-file names, returning the names that were dropped.
    ///
    /// Names are matched case-insensitively (`"zombie"`, `"CAVE_SPIDER"`).
    pub fn from_names<I, S>(names: I) -> (Self, Vec<KindRejection>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        let mut rejected = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            let outcome = MobKind::from_str(name)
                .map_err(|_| KindRejection::Unknown(name.to_owned()))
                .and_then(|kind| set.insert(kind));
            if let Err(rejection) = outcome {
                rejected.push(rejection);
            }
        }
        (set, rejected)
    }

    /// Add a kind.  Returns `Ok(false)` if it was already present.
    pub fn insert(&mut self, kind: MobKind) -> Result<bool, KindRejection> {
        if kind.is_alert_eligible() {
            return Ok(self.0.insert(kind));
        }
        if kind.is_hostile() {
            Err(KindRejection::NotSpawnable(kind))
        } else {
            Err(KindRejection::NotHostile(kind))
        }
    }

    #[inline]
    pub fn contains(&self, kind: MobKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Members in declaration order, for logging and serialization.
    pub fn sorted(&self) -> Vec<MobKind> {
        let mut kinds: Vec<MobKind> = self.0.iter().copied().collect();
        kinds.sort();
        kinds
    }
}
