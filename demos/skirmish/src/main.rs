//! skirmish: a small walled arena for the horde alert engine.
//!
//! Scatters a mixed crowd of mobs around two players, lets one zombie spot a
//! player, and watches the alert spread: who was woken, who walked where, and
//! who ended up hunting whom.  Halfway through, the second player wanders
//! into the crowd and a skeleton raises a second alert.
//!
//! ```text
//! cargo run -p skirmish -- [path/to/horde.toml]
//! RUST_LOG=debug cargo run -p skirmish
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;

use horde_alert::{Alert, AlertConfig, AllowedKinds, Termination};
use horde_core::{AgentId, MobKind, PlayerId, Position, SimConfig, SimRng, Tick};
use horde_journal::{CsvJournal, JournalObserver, JournalWriter};
use horde_sim::{HordeBuilder, HordeObserver, HostEvent};
use horde_world::{GridWorld, GridWorldBuilder, World};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64   = 7;
const MOB_COUNT:   usize = 40;
const ARENA_HALF:  f64   = 30.0;
const GROUND_Y:    f64   = 64.0;
const TOTAL_TICKS: u64   = 600; // 30 s at 50 ms per tick
const SECOND_WAVE: u64   = 300;

const CROWD: [MobKind; 6] = [
    MobKind::Zombie,
    MobKind::Zombie,
    MobKind::Skeleton,
    MobKind::Spider,
    MobKind::Creeper,
    MobKind::Cow,
];

// ── Observer ──────────────────────────────────────────────────────────────────

/// Journals everything and keeps a few counters for the summary.
struct Tally<W: JournalWriter> {
    journal:  JournalObserver<W>,
    alerts:   Vec<(Tick, Alert)>,
    acquired: usize,
    released: usize,
    checks:   usize,
}

impl<W: JournalWriter> Tally<W> {
    fn new(journal: JournalObserver<W>) -> Self {
        Self { journal, alerts: Vec::new(), acquired: 0, released: 0, checks: 0 }
    }
}

impl<W: JournalWriter> HordeObserver for Tally<W> {
    fn on_alert(&mut self, tick: Tick, alert: &Alert) {
        self.alerts.push((tick, alert.clone()));
        self.journal.on_alert(tick, alert);
    }

    fn on_monitor_end(&mut self, tick: Tick, agent: AgentId, reason: Termination) {
        match reason {
            Termination::Acquired(_) => self.acquired += 1,
            _ => self.released += 1,
        }
        self.journal.on_monitor_end(tick, agent, reason);
    }

    fn on_tick_end(&mut self, tick: Tick, evaluated: usize) {
        self.checks += evaluated;
        self.journal.on_tick_end(tick, evaluated);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.journal.on_run_end(final_tick);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<AlertConfig> {
    if AlertConfig::write_default(path)? {
        println!("Wrote default settings to {}", path.display());
    }
    let mut config = AlertConfig::load(path)?;
    if config.allowed.is_empty() {
        println!("allowed_mobs is empty; using zombie, skeleton and spider for the demo");
        let (allowed, _) = AllowedKinds::from_names(["zombie", "skeleton", "spider"]);
        config.allowed = allowed;
    }
    Ok(config)
}

fn ground(x: f64, z: f64) -> Position {
    Position::new(x, GROUND_Y, z)
}

/// A walled square arena with a crowd in the west half and two players.
fn build_arena(rng: &mut SimRng) -> GridWorld {
    let h = ARENA_HALF as i32;
    let y = GROUND_Y as i32;
    let mut builder = GridWorldBuilder::new()
        .wall(-h, y, -h, h, y + 3, -h)
        .wall(-h, y, h, h, y + 3, h)
        .wall(-h, y, -h, -h, y + 3, h)
        .wall(h, y, -h, h, y + 3, h)
        // A low divider the crowd has to see around.
        .wall(0, y, -12, 0, y + 2, 12);

    for _ in 0..MOB_COUNT {
        let kind = rng.choose(&CROWD).copied().unwrap_or(MobKind::Zombie);
        let x = rng.gen_range(-ARENA_HALF + 2.0..-2.0);
        let z = rng.gen_range(-ARENA_HALF + 2.0..ARENA_HALF - 2.0);
        builder = builder.mob(kind, ground(x, z));
    }

    builder
        .player(ground(-20.0, 0.0))
        .player(ground(20.0, 20.0))
        .build()
}

/// The first mob of `kind` within `reach` of `player`.
fn spotter(world: &GridWorld, kind: MobKind, player: PlayerId, reach: f64) -> Option<AgentId> {
    let target = world.player(player)?.position;
    world
        .mob_ids()
        .into_iter()
        .filter_map(|id| world.mob(id))
        .find(|m| m.kind == kind && m.position.distance(target) <= reach)
        .map(|m| m.id)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== skirmish: horde alert engine ===");

    // 1. Settings.
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("horde.toml"));
    let alert_config = load_config(&config_path)?;
    println!(
        "Settings: cooldown {} ms, radius {}, follow range {}, {} allowed kind(s)",
        alert_config.params.cooldown_ms,
        alert_config.params.aggression_radius,
        alert_config.params.follow_range_boost,
        alert_config.allowed.len(),
    );

    // 2. World.
    let mut rng = SimRng::new(SEED);
    let world = build_arena(&mut rng);
    println!("Arena: {} mobs, {} players", world.mob_count(), world.player_count());

    // 3. Engine.
    let sim_config = SimConfig { total_ticks: TOTAL_TICKS, seed: SEED, ..SimConfig::default() };
    let mut horde = HordeBuilder::new(world)
        .sim_config(sim_config.clone())
        .alert_config(alert_config)
        .build()?;

    // 4. Journal.
    let out_dir = Path::new("output/skirmish");
    let journal = JournalObserver::new(CsvJournal::new(out_dir)?, &sim_config);
    let mut tally = Tally::new(journal);

    // 5. First wave: a zombie near player 0 spots them.
    match spotter(&horde.world, MobKind::Zombie, PlayerId(0), 16.0) {
        Some(mob) => horde.submit(HostEvent::mob_targets_player(mob, PlayerId(0))),
        None => println!("No zombie close enough to player 0; first wave skipped"),
    }

    let t0 = Instant::now();
    horde.run_ticks(SECOND_WAVE, &mut tally);

    // 6. Second wave: player 1 walks into the crowd and a skeleton notices.
    horde.world.move_player(PlayerId(1), ground(-10.0, 15.0));
    match spotter(&horde.world, MobKind::Skeleton, PlayerId(1), 20.0) {
        Some(mob) => horde.submit(HostEvent::mob_targets_player(mob, PlayerId(1))),
        None => println!("No skeleton close enough to player 1; second wave skipped"),
    }
    horde.run(&mut tally);
    let elapsed = t0.elapsed();

    if let Some(e) = tally.journal.take_error() {
        eprintln!("journal error: {e}");
    }
    let still_watching = horde.shutdown();

    // 7. Summary.
    println!();
    println!("Ran {} ticks in {:.3} s", horde.clock.current_tick.0, elapsed.as_secs_f64());
    for (tick, alert) in &tally.alerts {
        println!(
            "  {tick}: {} spotted {} and woke {} mob(s) ({} could not move)",
            alert.trigger,
            alert.player,
            alert.alerted.len(),
            alert.failed_moves.len(),
        );
    }
    println!(
        "  {} perception check(s), {} acquired, {} released, {} still watching at shutdown",
        tally.checks, tally.acquired, tally.released, still_watching,
    );
    println!("  journal written to {}", out_dir.display());
    println!();

    println!("{:<14} {:<12} {:<12} {:<8}", "Mob", "Kind", "Target", "Range");
    println!("{}", "-".repeat(48));
    for id in horde.world.mob_ids() {
        let Some(mob) = horde.world.mob(id) else { continue };
        let target = mob.target.map_or_else(|| "-".to_owned(), |p| p.to_string());
        println!("{:<14} {:<12} {:<12} {:<8.1}", id.to_string(), mob.kind.to_string(), target, mob.follow_range);
    }

    Ok(())
}
