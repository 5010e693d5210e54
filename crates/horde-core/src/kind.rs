//! Mob kinds known to the engine.
//!
//! The set mirrors the host's living entity types that can show up in the
//! world, including passive animals and kinds that never spawn naturally.
//! Only kinds that are both hostile and spawnable may take part in alerts;
//! the config loader filters the rest out.
//!
//! Names parse case-insensitively in `snake_case` (`"cave_spider"`,
//! `"CAVE_SPIDER"`), which is the format used in config files.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The species of a mob.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MobKind {
    // ── Hostile ───────────────────────────────────────────────────────────
    Zombie,
    Husk,
    Drowned,
    ZombieVillager,
    Skeleton,
    Stray,
    Bogged,
    WitherSkeleton,
    Creeper,
    Spider,
    CaveSpider,
    Witch,
    Pillager,
    Vindicator,
    Evoker,
    Ravager,
    Blaze,
    Ghast,
    MagmaCube,
    Slime,
    Silverfish,
    Endermite,
    Enderman,
    Phantom,
    Guardian,
    Piglin,
    PiglinBrute,
    Hoglin,
    Zoglin,
    Breeze,
    Warden,

    // ── Hostile, never spawned by the world ───────────────────────────────
    Giant,
    Illusioner,

    // ── Passive / neutral ─────────────────────────────────────────────────
    Cow,
    Pig,
    Sheep,
    Chicken,
    Villager,
    IronGolem,
    Wolf,

    // ── Not a mob at all ──────────────────────────────────────────────────
    ArmorStand,
}

impl MobKind {
    /// `true` for kinds that attack players on sight.
    pub fn is_hostile(self) -> bool {
        !matches!(
            self,
            MobKind::Cow
                | MobKind::Pig
                | MobKind::Sheep
                | MobKind::Chicken
                | MobKind::Villager
                | MobKind::IronGolem
                | MobKind::Wolf
                | MobKind::ArmorStand
        )
    }

    /// `true` for kinds the world can spawn (naturally or from spawners).
    pub fn is_spawnable(self) -> bool {
        !matches!(self, MobKind::Giant | MobKind::Illusioner | MobKind::ArmorStand)
    }

    /// Whether a config may list this kind as an alert participant.
    #[inline]
    pub fn is_alert_eligible(self) -> bool {
        self.is_hostile() && self.is_spawnable()
    }

    /// Config-file spelling of the kind.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
