//! Inferno demo entry point.
//!
//! Runs the boss-arena core either in a raylib window (keyboard controlled,
//! placeholder rectangles instead of artwork) or headless for a fixed number
//! of ticks with a scripted player.
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! cargo run --release -- --headless 3600 --seed 7
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info};
use raylib::prelude::*;

use infernocore::components::boss::BossBrain;
use infernocore::components::boxcollider::BoxCollider;
use infernocore::components::combatant::Combatant;
use infernocore::components::health::Health;
use infernocore::components::mapposition::MapPosition;
use infernocore::components::player::{Player, PlayerController};
use infernocore::error::Result;
use infernocore::game::{PLAYER_PREFIX, build_schedule, new_world, tick};
use infernocore::resources::bosstuning::BossRoster;
use infernocore::resources::encounter::{Encounter, Outcome};
use infernocore::resources::framestore::FrameStore;
use infernocore::resources::gameconfig::GameConfig;
use infernocore::resources::input::InputCommands;
use infernocore::systems::input::{merge_input, read_input_commands};
use infernocore::systems::render::{draw_snapshot, render_snapshot};

/// Inferno boss-arena demo
#[derive(Parser)]
#[command(version, about = "Boss-arena combat core with a raylib demo front end")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON boss roster; overrides the path named in the config.
    #[arg(long, value_name = "PATH")]
    roster: Option<PathBuf>,

    /// Seed for hazard placement and wandering.
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many ticks without a window, driving the player by script.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u32>,

    /// Write the canonical roster as JSON and exit.
    #[arg(long, value_name = "PATH")]
    dump_roster: Option<PathBuf>,
}

const ANIM_COUNTS: [(&str, usize); 5] = [
    ("idle", 4),
    ("walk", 8),
    ("attack", 6),
    ("hurt", 3),
    ("die", 6),
];

/// Placeholder frames for every actor so animation timing matches real art.
fn demo_frame_store(roster: &BossRoster) -> FrameStore {
    let mut store =
        FrameStore::new().with_placeholder_frames(PLAYER_PREFIX, &ANIM_COUNTS, 64.0, 110.0);
    for tuning in &roster.bosses {
        let [w, h] = tuning.size;
        store = store.with_placeholder_frames(tuning.kind.asset_prefix(), &ANIM_COUNTS, w, h);
    }
    store
}

fn load_setup(cli: &Cli) -> Result<(GameConfig, BossRoster)> {
    let mut config = GameConfig::with_path(&cli.config);
    if cli.config.exists() {
        config.load_from_file()?;
    } else {
        info!("No config at {:?}, using defaults", cli.config);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let roster_path = cli.roster.clone().or_else(|| config.roster_path.clone());
    let roster = match roster_path {
        Some(path) => BossRoster::load_json(path)?,
        None => BossRoster::default(),
    };
    Ok((config, roster))
}

/// Walk toward the current boss and swing when in reach; head for the exit
/// once it is down.
fn scripted_commands(world: &mut World, tick_index: u32) -> InputCommands {
    let mut players = world.query_filtered::<
        (&MapPosition, &BoxCollider, &PlayerController, &Combatant),
        With<Player>,
    >();
    let Some((pos, col, ctrl, fighter)) = players.iter(world).next() else {
        return InputCommands::default();
    };
    let (player_x, reach) = (col.center(pos.pos).x, ctrl.attack_range);
    if !fighter.alive {
        return InputCommands::default();
    }

    let mut bosses = world.query::<(&MapPosition, &BoxCollider, &Combatant, &BossBrain)>();
    let target = bosses
        .iter(world)
        .find(|(_, _, fighter, _)| fighter.alive)
        .map(|(pos, col, ..)| col.center(pos.pos).x);

    let mut commands = InputCommands {
        jump: tick_index % 150 == 0,
        ..InputCommands::default()
    };
    match target {
        Some(boss_x) => {
            let dx = boss_x - player_x;
            if dx.abs() > reach * 0.8 {
                commands.move_right = dx > 0.0;
                commands.move_left = dx < 0.0;
            }
            commands.attack = dx.abs() <= reach && tick_index % 20 == 0;
        }
        None => commands.move_right = true,
    }
    commands
}

fn log_outcome(world: &mut World) {
    let encounter = world.resource::<Encounter>();
    let outcome = encounter.outcome;
    let defeated: Vec<_> = encounter
        .defeated
        .iter()
        .map(|k| k.display_name())
        .collect();
    let mut players = world.query_filtered::<&Health, With<Player>>();
    let hp = players.iter(world).next().map_or(0, |h| h.hp);
    info!(
        "Outcome: {:?}, defeated [{}], player hp {}",
        outcome,
        defeated.join(", "),
        hp
    );
}

fn run_headless(mut world: World, ticks: u32) {
    let mut schedule = build_schedule();
    let dt_ms = 1000 / 60;
    for i in 0..ticks {
        let commands = scripted_commands(&mut world, i);
        *world.resource_mut::<InputCommands>() = commands;
        tick(&mut world, &mut schedule, dt_ms);
        if world.resource::<Encounter>().is_over() {
            info!("Encounter decided after {} ticks", i + 1);
            break;
        }
    }
    log_outcome(&mut world);
}

fn run_windowed(mut world: World, config: &GameConfig) {
    let (width, height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(width as i32, height as i32)
        .title("Inferno")
        .build();
    rl.set_target_fps(config.target_fps);

    let mut schedule = build_schedule();
    let floor_y = (height as f32 - config.floor_margin) as i32;

    while !rl.window_should_close() {
        let frame = read_input_commands(&rl);
        merge_input(&mut world.resource_mut::<InputCommands>(), frame);
        let dt_ms = (rl.get_frame_time() * 1000.0).round() as u32;
        tick(&mut world, &mut schedule, dt_ms);

        let snapshot = render_snapshot(&mut world);
        let outcome = world.resource::<Encounter>().outcome;

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::new(40, 12, 10, 255));
        d.draw_rectangle(
            0,
            floor_y,
            width as i32,
            height as i32 - floor_y,
            Color::new(20, 6, 4, 255),
        );
        draw_snapshot(&mut d, &snapshot, width as f32);
        let banner = match outcome {
            Outcome::InProgress => None,
            Outcome::Victory => Some(("VICTORIA", Color::GOLD)),
            Outcome::Defeat => Some(("DERROTA", Color::RED)),
        };
        if let Some((text, color)) = banner {
            d.draw_text(text, width as i32 / 2 - 90, height as i32 / 2 - 30, 48, color);
        }
    }
    log_outcome(&mut world);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Some(path) = &cli.dump_roster {
        match BossRoster::default().save_json(path) {
            Ok(()) => info!("Roster written to {}", path.display()),
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let (config, roster) = match load_setup(&cli) {
        Ok(setup) => setup,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    let store = demo_frame_store(&roster);

    let world = match new_world(config.clone(), roster, store) {
        Ok(world) => world,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let rooms: Vec<_> = world
        .resource::<Encounter>()
        .rooms
        .iter()
        .map(|k| k.display_name())
        .collect();
    info!("Rooms: {}", rooms.join(" -> "));

    match cli.headless {
        Some(ticks) => run_headless(world, ticks),
        None => run_windowed(world, &config),
    }
}
