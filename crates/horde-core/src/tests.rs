//! Unit tests for horde-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, PlayerId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(PlayerId::default(), PlayerId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(PlayerId(3).to_string(), "PlayerId(3)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{CellPos, Extent, Position, CELL_SIZE};

    #[test]
    fn distance_squared_exact() {
        let a = Position::new(0.0, 64.0, 0.0);
        let b = Position::new(6.0, 64.0, 8.0);
        assert_eq!(a.distance_squared(b), 100.0);
        assert_eq!(a.distance(b), 10.0);
    }

    #[test]
    fn cell_floors_negative_coordinates() {
        assert_eq!(Position::new(0.0, 0.0, 0.0).cell(CELL_SIZE), CellPos::new(0, 0));
        assert_eq!(Position::new(15.9, 0.0, 16.0).cell(CELL_SIZE), CellPos::new(0, 1));
        assert_eq!(Position::new(-0.1, 0.0, -16.0).cell(CELL_SIZE), CellPos::new(-1, -1));
        assert_eq!(Position::new(-16.1, 0.0, 3.0).cell(CELL_SIZE), CellPos::new(-2, 0));
    }

    #[test]
    fn neighborhood_is_three_by_three() {
        let cells: Vec<CellPos> = CellPos::new(2, -1).neighborhood(1).collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells.first(), Some(&CellPos::new(1, -2)));
        assert_eq!(cells.last(), Some(&CellPos::new(3, 0)));
        assert!(cells.contains(&CellPos::new(2, -1)));
    }

    #[test]
    fn neighborhood_radius_zero_is_self() {
        let cells: Vec<CellPos> = CellPos::new(5, 5).neighborhood(0).collect();
        assert_eq!(cells, vec![CellPos::new(5, 5)]);
    }

    #[test]
    fn perception_box_is_half_height() {
        let half = Extent::perception(10.0);
        assert_eq!(half, Extent::new(10.0, 5.0, 10.0));

        let center = Position::new(0.0, 0.0, 0.0);
        assert!(Position::new(10.0, 5.0, -10.0).within_box(center, half));
        assert!(!Position::new(0.0, 5.5, 0.0).within_box(center, half));
        assert!(!Position::new(10.01, 0.0, 0.0).within_box(center, half));
    }

    #[test]
    fn lerp_endpoints() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(4.0, 2.0, -8.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Position::new(2.0, 1.0, -4.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{Millis, SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn clock_millis() {
        let mut clock = SimClock::new(50);
        assert_eq!(clock.now(), Millis(0));
        clock.advance();
        assert_eq!(clock.now(), Millis(50));
        for _ in 0..19 {
            clock.advance();
        }
        assert_eq!(clock.now(), Millis(1_000));
        assert_eq!(clock.current_tick, Tick(20));
    }

    #[test]
    fn ticks_for_duration_rounds_up() {
        let clock = SimClock::default();
        assert_eq!(clock.ticks_for_secs(1), 20);
        assert_eq!(clock.ticks_for_ms(10_000), 200);
        assert_eq!(clock.ticks_for_ms(1), 1);
    }

    #[test]
    fn millis_since_saturates() {
        assert_eq!(Millis(5_000).since(Millis(0)), 5_000);
        assert_eq!(Millis(0).since(Millis(5_000)), 0);
    }

    #[test]
    fn sim_config_defaults() {
        let cfg = SimConfig { total_ticks: 400, ..SimConfig::default() };
        assert_eq!(cfg.end_tick(), Tick(400));
        assert_eq!(cfg.make_clock().tick_duration_ms, 50);
    }
}

#[cfg(test)]
mod kind {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use crate::MobKind;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(MobKind::from_str("zombie"), Ok(MobKind::Zombie));
        assert_eq!(MobKind::from_str("ZOMBIE"), Ok(MobKind::Zombie));
        assert_eq!(MobKind::from_str("Cave_Spider"), Ok(MobKind::CaveSpider));
        assert!(MobKind::from_str("dragon_kin").is_err());
    }

    #[test]
    fn display_matches_config_spelling() {
        assert_eq!(MobKind::WitherSkeleton.to_string(), "wither_skeleton");
        assert_eq!(MobKind::CaveSpider.as_str(), "cave_spider");
    }

    #[test]
    fn every_kind_roundtrips_through_its_name() {
        for kind in MobKind::iter() {
            assert_eq!(MobKind::from_str(kind.as_str()), Ok(kind));
        }
    }

    #[test]
    fn eligibility_flags() {
        assert!(MobKind::Zombie.is_alert_eligible());
        assert!(!MobKind::Cow.is_alert_eligible());
        assert!(MobKind::Giant.is_hostile());
        assert!(!MobKind::Giant.is_alert_eligible());
        assert!(!MobKind::ArmorStand.is_spawnable());
    }
}

#[cfg(test)]
mod attribute {
    use crate::{Attribute, Raise};

    #[test]
    fn raise_sets_exact_floor() {
        let mut a = Attribute::new(16.0);
        assert_eq!(a.raise_base_to(64.0), Raise::Raised { from: 16.0, to: 64.0 });
        assert_eq!(a.base, 64.0);
    }

    #[test]
    fn raise_never_lowers() {
        let mut a = Attribute::new(80.0);
        assert_eq!(a.raise_base_to(64.0), Raise::Unchanged { base: 80.0 });
        assert_eq!(a.base, 80.0);
    }

    #[test]
    fn raise_is_idempotent() {
        let mut a = Attribute::new(10.0);
        assert!(a.raise_base_to(64.0).changed());
        assert!(!a.raise_base_to(64.0).changed());
        assert_eq!(a.base, 64.0);
    }

    #[test]
    fn effective_includes_bonus() {
        let a = Attribute { base: 32.0, bonus: 4.0 };
        assert_eq!(a.effective(), 36.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        let kinds = [1u8, 2, 3, 4, 5];
        for _ in 0..100 {
            assert_eq!(r1.gen_range(-30.0f64..30.0), r2.gen_range(-30.0f64..30.0));
            assert_eq!(r1.choose(&kinds), r2.choose(&kinds));
        }
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.gen_range(-8.0f64..8.0);
            assert!((-8.0..8.0).contains(&v));
        }
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(0);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
