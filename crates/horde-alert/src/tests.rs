//! Unit tests for horde-alert.

use std::sync::Arc;

use horde_core::{AgentId, MobKind, Millis, PlayerId, Position, Tick};
use horde_world::{GridWorldBuilder, World, WorldError};

use crate::{
    AlertConfig, AlertDispatcher, AlertParameters, AlertSettings, AllowedKinds, ConfigError,
    CooldownTracker, KindRejection, MonitorQueue, MonitorState, PerceptionMonitor, Termination,
    Verdict,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn at(x: f64, z: f64) -> Position {
    Position::new(x, 64.0, z)
}

fn config_allowing(kinds: &[MobKind]) -> AlertConfig {
    let mut allowed = AllowedKinds::new();
    for &kind in kinds {
        allowed.insert(kind).unwrap();
    }
    AlertConfig { allowed, ..AlertConfig::default() }
}

fn zombie_config() -> AlertConfig {
    config_allowing(&[MobKind::Zombie, MobKind::Skeleton])
}

// ── Cooldowns ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cooldown {
    use super::*;

    #[test]
    fn window_scenario() {
        let tracker = CooldownTracker::new();
        let a = AgentId(1);
        assert!(!tracker.is_on_cooldown(a, Millis(0), 10_000));
        tracker.set_cooldown(a, Millis(0));
        assert!(tracker.is_on_cooldown(a, Millis(0), 10_000));
        assert!(tracker.is_on_cooldown(a, Millis(5_000), 10_000));
        assert!(tracker.is_on_cooldown(a, Millis(9_999), 10_000));
        assert!(!tracker.is_on_cooldown(a, Millis(10_001), 10_000));
    }

    #[test]
    fn zero_window_never_blocks() {
        let tracker = CooldownTracker::new();
        tracker.set_cooldown(AgentId(0), Millis(100));
        assert!(!tracker.is_on_cooldown(AgentId(0), Millis(100), 0));
    }

    #[test]
    fn try_claim_stamps_only_when_free() {
        let tracker = CooldownTracker::new();
        assert!(tracker.try_claim(AgentId(3), Millis(1_000), 500));
        assert!(!tracker.try_claim(AgentId(3), Millis(1_200), 500));
        assert_eq!(tracker.last_alert(AgentId(3)), Some(Millis(1_000)));
        assert!(tracker.try_claim(AgentId(3), Millis(1_500), 500));
        assert_eq!(tracker.last_alert(AgentId(3)), Some(Millis(1_500)));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn concurrent_claims_have_one_winner() {
        let tracker = CooldownTracker::new();
        let wins: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| tracker.try_claim(AgentId(7), Millis(0), 10_000)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap() as usize).sum()
        });
        assert_eq!(wins, 1);
    }
}

// ── Eligibility ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod eligibility {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        let (set, rejected) = AllowedKinds::from_names(["zombie", "CAVE_SPIDER", " Skeleton "]);
        assert!(rejected.is_empty());
        assert_eq!(set.sorted(), vec![MobKind::Zombie, MobKind::Skeleton, MobKind::CaveSpider]);
    }

    #[test]
    fn ineligible_names_are_reported() {
        let (set, rejected) = AllowedKinds::from_names(["COW", "giant", "dragonfly", "zombie"]);
        assert_eq!(set.sorted(), vec![MobKind::Zombie]);
        assert_eq!(
            rejected,
            vec![
                KindRejection::NotHostile(MobKind::Cow),
                KindRejection::NotSpawnable(MobKind::Giant),
                KindRejection::Unknown("dragonfly".to_owned()),
            ]
        );
    }

    #[test]
    fn armor_stand_is_never_allowed() {
        let mut set = AllowedKinds::new();
        assert!(set.insert(MobKind::ArmorStand).is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn duplicate_insert_reports_false() {
        let mut set = AllowedKinds::new();
        assert_eq!(set.insert(MobKind::Zombie), Ok(true));
        assert_eq!(set.insert(MobKind::Zombie), Ok(false));
        assert_eq!(set.len(), 1);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AlertConfig::from_toml_str("").unwrap();
        assert_eq!(config, AlertConfig::default());
        assert_eq!(config.params.cooldown_ms, 10_000);
        assert_eq!(config.params.aggression_radius, 10.0);
        assert_eq!(config.params.follow_range_boost, 64.0);
        assert_eq!(config.params.monitor_interval_ticks, 20);
        assert!(config.allowed.is_empty());
        assert!(!config.debug);
    }

    #[test]
    fn full_file_is_read() {
        let text = r#"
            cooldown_millis        = 2500
            aggression_radius      = 12
            follow_range           = 48.5
            allowed_mobs           = ["zombie", "husk"]
            debug                  = true
            monitor_interval_ticks = 10
        "#;
        let config = AlertConfig::from_toml_str(text).unwrap();
        assert_eq!(
            config.params,
            AlertParameters {
                cooldown_ms:            2_500,
                aggression_radius:      12.0,
                follow_range_boost:     48.5,
                monitor_interval_ticks: 10,
            }
        );
        assert_eq!(config.allowed.sorted(), vec![MobKind::Zombie, MobKind::Husk]);
        assert!(config.debug);
    }

    #[test]
    fn bad_values_fall_back_per_key() {
        let text = r#"
            cooldown_millis        = -5
            aggression_radius      = 0.0
            follow_range           = "far"
            monitor_interval_ticks = 0
            debug                  = "yes"
            allowed_mobs           = ["zombie", "COW", 3, "giant", "CAVE_SPIDER"]
            colour                 = "red"
        "#;
        let config = AlertConfig::from_toml_str(text).unwrap();
        assert_eq!(config.params, AlertParameters::default());
        assert!(!config.debug);
        assert_eq!(config.allowed.sorted(), vec![MobKind::Zombie, MobKind::CaveSpider]);
    }

    #[test]
    fn allowed_mobs_of_wrong_type_means_none() {
        let config = AlertConfig::from_toml_str("allowed_mobs = \"zombie\"").unwrap();
        assert!(config.allowed.is_empty());
    }

    #[test]
    fn syntax_error_is_returned() {
        let err = AlertConfig::from_toml_str("cooldown_millis = = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AlertConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn write_default_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("horde.toml");

        assert!(AlertConfig::write_default(&path).unwrap());
        assert!(!AlertConfig::write_default(&path).unwrap());
        assert_eq!(AlertConfig::load(&path).unwrap(), AlertConfig::default());
    }

    #[test]
    fn write_default_leaves_existing_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("horde.toml");
        std::fs::write(&path, "cooldown_millis = 1\n").unwrap();

        assert!(!AlertConfig::write_default(&path).unwrap());
        assert_eq!(AlertConfig::load(&path).unwrap().params.cooldown_ms, 1);
    }

    #[test]
    fn reloading_identical_file_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("horde.toml");
        std::fs::write(&path, "allowed_mobs = [\"zombie\", \"creeper\"]\naggression_radius = 7.5\n").unwrap();

        let first = AlertConfig::load(&path).unwrap();
        let second = AlertConfig::load(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn settings_serialize_every_key() {
        let text = AlertSettings::default().to_toml_string().unwrap();
        for key in [
            "cooldown_millis",
            "aggression_radius",
            "follow_range",
            "allowed_mobs",
            "debug",
            "monitor_interval_ticks",
        ] {
            assert!(text.contains(key), "missing {key} in {text}");
        }
    }

    #[test]
    fn written_settings_read_back_unchanged() {
        let settings = AlertSettings {
            cooldown_millis: 2500,
            allowed_mobs: vec!["zombie".to_owned(), "husk".to_owned()],
            debug: true,
            ..AlertSettings::default()
        };
        let text = settings.to_toml_string().unwrap();
        assert_eq!(AlertSettings::from_toml_str(&text).unwrap(), settings);
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatcher {
    use super::*;

    /// Trigger `AgentId(0)` and player `PlayerId(0)` in cell (0, 0).
    fn crowd() -> GridWorldBuilder {
        GridWorldBuilder::new()
            .mob(MobKind::Zombie, at(8.0, 8.0))
            .player(at(8.0, 14.0))
    }

    #[test]
    fn five_eligible_two_ineligible() {
        let world = crowd()
            .mob(MobKind::Zombie, at(2.0, 2.0))
            .mob(MobKind::Zombie, at(20.0, 4.0))
            .mob(MobKind::Skeleton, at(-5.0, 10.0))
            .mob(MobKind::Skeleton, at(10.0, 30.0))
            .mob(MobKind::Zombie, at(-10.0, -10.0))
            .mob(MobKind::Cow, at(9.0, 9.0))
            .mob(MobKind::Creeper, at(7.0, 7.0))
            .build();
        let dispatcher = AlertDispatcher::default();

        let alert = dispatcher
            .dispatch(&world, AgentId(0), PlayerId(0), &zombie_config(), Millis(0))
            .unwrap();

        let mut alerted = alert.alerted.clone();
        alerted.sort();
        assert_eq!(alerted, (1..=5).map(AgentId).collect::<Vec<_>>());
        assert!(alert.failed_moves.is_empty());
        assert_eq!(alert.destination, at(8.0, 14.0));
        for id in &alerted {
            assert_eq!(world.destination(*id), Some(at(8.0, 14.0)));
        }
        assert_eq!(world.destination(AgentId(6)), None);
        assert_eq!(world.destination(AgentId(7)), None);
        assert_eq!(world.destination(AgentId(0)), None);
    }

    #[test]
    fn trigger_and_alerted_mobs_are_stamped() {
        let world = crowd().mob(MobKind::Zombie, at(2.0, 2.0)).build();
        let dispatcher = AlertDispatcher::default();
        dispatcher.dispatch(&world, AgentId(0), PlayerId(0), &zombie_config(), Millis(42));

        let cooldowns = dispatcher.cooldowns();
        assert_eq!(cooldowns.last_alert(AgentId(0)), Some(Millis(42)));
        assert_eq!(cooldowns.last_alert(AgentId(1)), Some(Millis(42)));
    }

    #[test]
    fn trigger_on_cooldown_suppresses_everything() {
        let world = crowd().mob(MobKind::Zombie, at(2.0, 2.0)).build();
        let dispatcher = AlertDispatcher::default();
        let config = zombie_config();

        assert!(dispatcher.dispatch(&world, AgentId(0), PlayerId(0), &config, Millis(0)).is_some());
        assert!(dispatcher.dispatch(&world, AgentId(0), PlayerId(0), &config, Millis(5_000)).is_none());

        let later = dispatcher.dispatch(&world, AgentId(0), PlayerId(0), &config, Millis(10_000)).unwrap();
        assert_eq!(later.alerted, vec![AgentId(1)]);
    }

    #[test]
    fn alerted_mob_cannot_trigger_within_its_window() {
        let world = crowd().mob(MobKind::Zombie, at(2.0, 2.0)).build();
        let dispatcher = AlertDispatcher::default();
        let config = zombie_config();
        dispatcher.dispatch(&world, AgentId(0), PlayerId(0), &config, Millis(0));

        assert!(dispatcher.dispatch(&world, AgentId(1), PlayerId(0), &config, Millis(100)).is_none());
    }

    #[test]
    fn disallowed_trigger_does_nothing() {
        let world = GridWorldBuilder::new()
            .mob(MobKind::Cow, at(8.0, 8.0))
            .mob(MobKind::Zombie, at(9.0, 9.0))
            .player(at(8.0, 14.0))
            .build();
        let dispatcher = AlertDispatcher::default();

        assert!(dispatcher.dispatch(&world, AgentId(0), PlayerId(0), &zombie_config(), Millis(0)).is_none());
        assert!(dispatcher.cooldowns().is_empty());
        assert_eq!(world.destination(AgentId(1)), None);
    }

    #[test]
    fn missing_trigger_or_player_does_nothing() {
        let world = crowd().build();
        let dispatcher = AlertDispatcher::default();
        let config = zombie_config();
        assert!(dispatcher.dispatch(&world, AgentId(9), PlayerId(0), &config, Millis(0)).is_none());
        assert!(dispatcher.dispatch(&world, AgentId(0), PlayerId(9), &config, Millis(0)).is_none());
        assert!(dispatcher.cooldowns().is_empty());
    }

    #[test]
    fn targeted_and_cooling_candidates_are_skipped() {
        let world = crowd()
            .mob(MobKind::Zombie, at(2.0, 2.0))
            .mob(MobKind::Zombie, at(3.0, 3.0))
            .mob(MobKind::Zombie, at(4.0, 4.0))
            .build();
        world.force_target(AgentId(1), Some(PlayerId(0)));
        let dispatcher = AlertDispatcher::default();
        dispatcher.cooldowns().set_cooldown(AgentId(2), Millis(0));

        let alert = dispatcher
            .dispatch(&world, AgentId(0), PlayerId(0), &zombie_config(), Millis(1_000))
            .unwrap();
        assert_eq!(alert.alerted, vec![AgentId(3)]);
        assert_eq!(dispatcher.cooldowns().last_alert(AgentId(2)), Some(Millis(0)));
        assert_eq!(dispatcher.cooldowns().last_alert(AgentId(1)), None);
    }

    #[test]
    fn failed_move_does_not_stop_the_fan_out() {
        let world = crowd()
            .mob(MobKind::Zombie, at(2.0, 2.0))
            .mob(MobKind::Zombie, at(3.0, 3.0))
            .mob(MobKind::Zombie, at(4.0, 4.0))
            .build();
        world.pin_mob(AgentId(2));
        let dispatcher = AlertDispatcher::default();

        let alert = dispatcher
            .dispatch(&world, AgentId(0), PlayerId(0), &zombie_config(), Millis(0))
            .unwrap();
        assert_eq!(alert.alerted.len(), 3);
        assert!(alert.alerted.contains(&AgentId(2)));
        assert_eq!(alert.failed_moves.len(), 1);
        assert_eq!(alert.failed_moves[0].0, AgentId(2));
        assert!(matches!(alert.failed_moves[0].1, WorldError::NoPath { .. }));
        assert_eq!(world.destination(AgentId(1)), Some(at(8.0, 14.0)));
        assert_eq!(world.destination(AgentId(3)), Some(at(8.0, 14.0)));
    }

    #[test]
    fn neighborhood_is_cells_not_distance() {
        let world = GridWorldBuilder::new()
            .mob(MobKind::Zombie, at(0.5, 0.5))    // trigger, cell (0, 0)
            .mob(MobKind::Zombie, at(31.5, 31.5))  // cell (1, 1), ~44 away
            .mob(MobKind::Zombie, at(33.0, 0.5))   // cell (2, 0), ~32 away
            .player(at(0.5, 5.0))
            .build();
        let dispatcher = AlertDispatcher::default();

        let alert = dispatcher
            .dispatch(&world, AgentId(0), PlayerId(0), &zombie_config(), Millis(0))
            .unwrap();
        assert_eq!(alert.alerted, vec![AgentId(1)]);
    }

    #[test]
    fn follow_range_is_raised_never_lowered() {
        let world = crowd()
            .default_follow_range(16.0)
            .mob(MobKind::Zombie, at(2.0, 2.0))
            .mob(MobKind::Zombie, at(3.0, 3.0))
            .build();
        world.raise_follow_range(AgentId(2), 100.0).unwrap();
        let dispatcher = AlertDispatcher::default();

        dispatcher.dispatch(&world, AgentId(0), PlayerId(0), &zombie_config(), Millis(0));
        assert_eq!(world.follow_range_base(AgentId(1)), Some(64.0));
        assert_eq!(world.follow_range_base(AgentId(2)), Some(100.0));
        // The trigger's own range is not touched.
        assert_eq!(world.follow_range_base(AgentId(0)), Some(16.0));
    }

    #[test]
    fn parallel_triggers_never_share_a_mob() {
        let mut builder = GridWorldBuilder::new()
            .mob(MobKind::Zombie, at(4.0, 4.0))
            .mob(MobKind::Zombie, at(12.0, 12.0))
            .player(at(8.0, 8.0));
        for i in 0..20 {
            builder = builder.mob(MobKind::Skeleton, at(1.0 + i as f64 * 0.5, 6.0));
        }
        let world = builder.build();
        let dispatcher = AlertDispatcher::new(Arc::new(CooldownTracker::new()));
        let config = zombie_config();

        let alerts: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = [AgentId(0), AgentId(1)]
                .into_iter()
                .map(|trigger| {
                    let (world, dispatcher, config) = (&world, &dispatcher, &config);
                    s.spawn(move || dispatcher.dispatch(world, trigger, PlayerId(0), config, Millis(0)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let mut seen: Vec<AgentId> = alerts.into_iter().flatten().flat_map(|a| a.alerted).collect();
        let total = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);
    }
}

// ── Perception monitor ────────────────────────────────────────────────────────

#[cfg(test)]
mod monitor {
    use super::*;

    fn params() -> AlertParameters {
        AlertParameters::default()
    }

    /// Wall on x = 5 between the mob at the origin and anything east of it.
    fn walled() -> GridWorldBuilder {
        GridWorldBuilder::new().wall(5, 60, -3, 5, 70, 3)
    }

    #[test]
    fn player_at_exact_radius_without_sight_is_acquired() {
        let world = walled()
            .mob(MobKind::Zombie, at(0.5, 0.5))
            .player(at(10.5, 0.5))
            .build();
        assert_eq!(world.has_line_of_sight(AgentId(0), PlayerId(0)), Ok(false));

        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        let verdict = monitor.evaluate(&world, &params());
        assert_eq!(verdict, Verdict::Acquire { player: PlayerId(0), distance_sq: 100.0, in_sight: false });

        let state = monitor.resolve(&world, verdict);
        assert_eq!(state, MonitorState::Terminated(Termination::Acquired(PlayerId(0))));
        assert_eq!(world.mob(AgentId(0)).unwrap().target, Some(PlayerId(0)));
    }

    #[test]
    fn sight_beyond_radius_is_enough() {
        let world = GridWorldBuilder::new()
            .mob(MobKind::Zombie, at(0.5, 0.5))
            .player(at(8.5, 8.5))
            .build();
        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        assert!(matches!(
            monitor.evaluate(&world, &params()),
            Verdict::Acquire { in_sight: true, .. }
        ));
        assert_eq!(
            monitor.tick(&world, &params()),
            MonitorState::Terminated(Termination::Acquired(PlayerId(0)))
        );
    }

    #[test]
    fn blocked_sight_beyond_radius_keeps_waiting() {
        let world = GridWorldBuilder::new()
            .wall(3, 60, -5, 3, 70, 10)
            .mob(MobKind::Zombie, at(0.5, 0.5))
            .player(at(8.5, 8.5))
            .build();
        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        assert_eq!(monitor.evaluate(&world, &params()), Verdict::Continue);
        assert_eq!(monitor.tick(&world, &params()), MonitorState::Active);
        assert_eq!(world.mob(AgentId(0)).unwrap().target, None);
    }

    /// Delegates to a `GridWorld` but refuses every sight query.
    struct BlindHost(horde_world::GridWorld);

    impl World for BlindHost {
        fn mob(&self, id: AgentId) -> Option<horde_world::MobView> {
            self.0.mob(id)
        }

        fn player(&self, id: PlayerId) -> Option<horde_world::PlayerView> {
            self.0.player(id)
        }

        fn mobs_in_cells(&self, center: horde_core::CellPos, radius: i32) -> Vec<AgentId> {
            self.0.mobs_in_cells(center, radius)
        }

        fn players_in_box(&self, center: Position, half: horde_core::Extent) -> Vec<horde_world::PlayerView> {
            self.0.players_in_box(center, half)
        }

        fn has_line_of_sight(&self, _mob: AgentId, _player: PlayerId) -> horde_world::WorldResult<bool> {
            Err(WorldError::Rejected("sight queries unavailable".to_owned()))
        }

        fn set_target(&self, mob: AgentId, player: PlayerId) -> horde_world::WorldResult<()> {
            self.0.set_target(mob, player)
        }

        fn raise_follow_range(&self, mob: AgentId, floor: f64) -> horde_world::WorldResult<horde_core::Raise> {
            self.0.raise_follow_range(mob, floor)
        }

        fn move_to(&self, mob: AgentId, destination: Position) -> horde_world::WorldResult<()> {
            self.0.move_to(mob, destination)
        }
    }

    #[test]
    fn failed_sight_query_beyond_radius_does_not_qualify() {
        // Open ground, 7.5 out on both axes: ~10.6 away and inside the box.
        let host = BlindHost(
            GridWorldBuilder::new()
                .mob(MobKind::Zombie, at(0.5, 0.5))
                .player(at(8.0, 8.0))
                .build(),
        );
        assert!(host.has_line_of_sight(AgentId(0), PlayerId(0)).is_err());

        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        assert_eq!(monitor.evaluate(&host, &params()), Verdict::Continue);
        assert_eq!(monitor.tick(&host, &params()), MonitorState::Active);
        assert_eq!(host.mob(AgentId(0)).unwrap().target, None);
    }

    #[test]
    fn failed_sight_query_within_radius_still_acquires() {
        // 6 and 8 out: exactly 10 away.
        let host = BlindHost(
            GridWorldBuilder::new()
                .mob(MobKind::Zombie, at(0.5, 0.5))
                .player(at(6.5, 8.5))
                .build(),
        );
        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        assert_eq!(
            monitor.evaluate(&host, &params()),
            Verdict::Acquire { player: PlayerId(0), distance_sq: 100.0, in_sight: false }
        );
        assert_eq!(
            monitor.tick(&host, &params()),
            MonitorState::Terminated(Termination::Acquired(PlayerId(0)))
        );
        assert_eq!(host.mob(AgentId(0)).unwrap().target, Some(PlayerId(0)));
    }

    #[test]
    fn player_outside_box_is_ignored() {
        // In plain sight but 12 blocks out on x.
        let world = GridWorldBuilder::new()
            .mob(MobKind::Zombie, at(0.5, 0.5))
            .player(at(12.5, 0.5))
            .build();
        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        assert_eq!(monitor.tick(&world, &params()), MonitorState::Active);
    }

    #[test]
    fn existing_target_is_left_alone() {
        let world = GridWorldBuilder::new()
            .mob(MobKind::Zombie, at(0.5, 0.5))
            .player(at(2.0, 2.0))
            .player(at(50.0, 50.0))
            .build();
        world.force_target(AgentId(0), Some(PlayerId(1)));

        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        assert_eq!(
            monitor.tick(&world, &params()),
            MonitorState::Terminated(Termination::AlreadyTargeted)
        );
        assert_eq!(world.mob(AgentId(0)).unwrap().target, Some(PlayerId(1)));
    }

    #[test]
    fn despawned_mob_terminates() {
        let world = GridWorldBuilder::new()
            .mob(MobKind::Zombie, at(0.5, 0.5))
            .player(at(2.0, 2.0))
            .build();
        world.despawn_mob(AgentId(0));
        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        assert_eq!(monitor.tick(&world, &params()), MonitorState::Terminated(Termination::AgentGone));
    }

    #[test]
    fn mob_gone_between_evaluate_and_resolve() {
        let world = GridWorldBuilder::new()
            .mob(MobKind::Zombie, at(0.5, 0.5))
            .player(at(2.0, 2.0))
            .build();
        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        let verdict = monitor.evaluate(&world, &params());
        world.despawn_mob(AgentId(0));
        assert_eq!(monitor.resolve(&world, verdict), MonitorState::Terminated(Termination::AgentGone));
    }

    #[test]
    fn player_leaving_before_resolve_keeps_monitor_active() {
        let world = GridWorldBuilder::new()
            .mob(MobKind::Zombie, at(0.5, 0.5))
            .player(at(2.0, 2.0))
            .build();
        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        let verdict = monitor.evaluate(&world, &params());
        world.leave_player(PlayerId(0));
        assert_eq!(monitor.resolve(&world, verdict), MonitorState::Active);
    }

    #[test]
    fn empty_surroundings_stay_active() {
        let world = GridWorldBuilder::new().mob(MobKind::Zombie, at(0.5, 0.5)).build();
        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        for _ in 0..500 {
            assert_eq!(monitor.tick(&world, &params()), MonitorState::Active);
        }
        assert_eq!(monitor.checks(), 500);
    }

    #[test]
    fn terminated_monitor_never_resumes() {
        let world = GridWorldBuilder::new()
            .mob(MobKind::Zombie, at(0.5, 0.5))
            .player(at(2.0, 2.0))
            .build();
        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        monitor.cancel();
        assert_eq!(monitor.tick(&world, &params()), MonitorState::Terminated(Termination::Cancelled));
        assert_eq!(world.mob(AgentId(0)).unwrap().target, None);
        assert_eq!(monitor.checks(), 0);
    }

    #[test]
    fn snapshot_ignores_live_parameters() {
        let world = GridWorldBuilder::new()
            .wall(3, 60, -5, 3, 70, 10)
            .mob(MobKind::Zombie, at(0.5, 0.5))
            .player(at(6.5, 0.5))
            .build();
        let small = AlertParameters { aggression_radius: 4.0, ..params() };

        let live = PerceptionMonitor::new(AgentId(0), Tick(0));
        let pinned = PerceptionMonitor::with_snapshot(AgentId(0), Tick(0), small);

        assert!(matches!(live.evaluate(&world, &params()), Verdict::Acquire { .. }));
        assert_eq!(pinned.evaluate(&world, &params()), Verdict::Continue);
    }

    #[test]
    fn first_player_in_host_order_wins() {
        let world = GridWorldBuilder::new()
            .mob(MobKind::Zombie, at(0.5, 0.5))
            .player(at(6.0, 0.5))
            .player(at(2.0, 0.5))
            .build();
        let mut monitor = PerceptionMonitor::new(AgentId(0), Tick(0));
        assert_eq!(
            monitor.tick(&world, &params()),
            MonitorState::Terminated(Termination::Acquired(PlayerId(0)))
        );
    }
}

// ── Monitor queue ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;

    fn monitor(agent: u32) -> PerceptionMonitor {
        PerceptionMonitor::new(AgentId(agent), Tick(0))
    }

    #[test]
    fn one_monitor_per_agent() {
        let mut queue = MonitorQueue::new();
        assert!(queue.start(monitor(1), Tick(0)));
        assert!(!queue.start(monitor(1), Tick(3)));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_tick(), Some(Tick(0)));
    }

    #[test]
    fn drain_returns_due_monitors_sorted() {
        let mut queue = MonitorQueue::new();
        queue.start(monitor(5), Tick(2));
        queue.start(monitor(1), Tick(1));
        queue.start(monitor(3), Tick(2));
        queue.start(monitor(9), Tick(7));

        let due: Vec<AgentId> = queue.drain_due(Tick(2)).iter().map(|m| m.agent()).collect();
        assert_eq!(due, vec![AgentId(1), AgentId(3), AgentId(5)]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_tick(), Some(Tick(7)));
        assert!(queue.drain_due(Tick(6)).is_empty());
    }

    #[test]
    fn rescheduled_monitor_comes_back() {
        let mut queue = MonitorQueue::new();
        queue.start(monitor(1), Tick(0));
        let mut due = queue.drain_due(Tick(0));
        assert!(queue.is_empty());

        queue.schedule(due.remove(0), Tick(20));
        assert!(queue.contains(AgentId(1)));
        assert!(queue.drain_due(Tick(19)).is_empty());
        assert_eq!(queue.drain_due(Tick(20)).len(), 1);
    }

    #[test]
    fn terminated_monitor_is_not_rescheduled() {
        let mut queue = MonitorQueue::new();
        let mut m = monitor(1);
        m.cancel();
        queue.schedule(m, Tick(5));
        assert!(queue.is_empty());

        let mut m = monitor(2);
        m.cancel();
        assert!(!queue.start(m, Tick(0)));
        assert!(queue.is_empty());
    }

    #[test]
    fn cancel_leaves_a_stale_entry_that_is_skipped() {
        let mut queue = MonitorQueue::new();
        queue.start(monitor(4), Tick(5));
        let cancelled = queue.cancel(AgentId(4)).unwrap();
        assert_eq!(cancelled.state(), MonitorState::Terminated(Termination::Cancelled));
        assert!(queue.cancel(AgentId(4)).is_none());

        // A fresh monitor for the same agent is not woken by the old entry.
        assert!(queue.start(monitor(4), Tick(10)));
        assert!(queue.drain_due(Tick(5)).is_empty());
        assert_eq!(queue.drain_due(Tick(10)).len(), 1);
    }

    #[test]
    fn cancel_all_empties_the_queue() {
        let mut queue = MonitorQueue::new();
        for agent in 0..4 {
            queue.start(monitor(agent), Tick(agent as u64));
        }
        assert_eq!(queue.agents(), (0..4).map(AgentId).collect::<Vec<_>>());
        assert_eq!(queue.cancel_all(), 4);
        assert!(queue.is_empty());
        assert_eq!(queue.next_tick(), None);
    }
}
