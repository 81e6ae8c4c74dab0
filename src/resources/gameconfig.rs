//! Game configuration resource.
//!
//! Settings loaded from an INI file. Missing files or keys keep the defaults
//! below, so the core always starts with a usable configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//!
//! [playfield]
//! floor_margin = 10
//! exit_margin = 120
//! entry_x = 140
//!
//! [player]
//! max_hp = 100
//! hp_per_heart = 20
//! attack_damage = 20
//! attack_range = 120
//! move_speed = 4
//! jump_power = 20
//! max_jumps = 2
//! gravity = 1.0
//! grace_ms = 0
//!
//! [combat]
//! first_strike_window_ms = 17
//! seed = 1234
//!
//! [roster]
//! path = bosses.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_FLOOR_MARGIN: f32 = 10.0;
const DEFAULT_EXIT_MARGIN: f32 = 120.0;
const DEFAULT_ENTRY_X: f32 = 140.0;
const DEFAULT_PLAYER_MAX_HP: u32 = 100;
const DEFAULT_HP_PER_HEART: u32 = 20;
const DEFAULT_ATTACK_DAMAGE: u32 = 20;
const DEFAULT_ATTACK_RANGE: f32 = 120.0;
const DEFAULT_MOVE_SPEED: f32 = 4.0;
const DEFAULT_JUMP_POWER: f32 = 20.0;
const DEFAULT_MAX_JUMPS: u8 = 2;
const DEFAULT_GRAVITY: f32 = 1.0;
const DEFAULT_FIRST_STRIKE_WINDOW_MS: u32 = 17;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub floor_margin: f32,
    /// Distance from the right edge that leads to the next room.
    pub exit_margin: f32,
    /// Player x after a room change.
    pub entry_x: f32,
    pub player_max_hp: u32,
    pub hp_per_heart: u32,
    pub attack_damage: u32,
    pub attack_range: f32,
    /// Pixels per reference tick.
    pub move_speed: f32,
    pub jump_power: f32,
    pub max_jumps: u8,
    /// Pixels per reference tick squared.
    pub gravity: f32,
    /// Invulnerability after a hit, zero disables it.
    pub grace_ms: u32,
    /// A player attack while the boss timer is below this makes the boss furious.
    pub first_strike_window_ms: u32,
    pub seed: Option<u64>,
    pub roster_path: Option<PathBuf>,
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            floor_margin: DEFAULT_FLOOR_MARGIN,
            exit_margin: DEFAULT_EXIT_MARGIN,
            entry_x: DEFAULT_ENTRY_X,
            player_max_hp: DEFAULT_PLAYER_MAX_HP,
            hp_per_heart: DEFAULT_HP_PER_HEART,
            attack_damage: DEFAULT_ATTACK_DAMAGE,
            attack_range: DEFAULT_ATTACK_RANGE,
            move_speed: DEFAULT_MOVE_SPEED,
            jump_power: DEFAULT_JUMP_POWER,
            max_jumps: DEFAULT_MAX_JUMPS,
            gravity: DEFAULT_GRAVITY,
            grace_ms: 0,
            first_strike_window_ms: DEFAULT_FIRST_STRIKE_WINDOW_MS,
            seed: None,
            roster_path: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    fn config_error(path: &Path, reason: String) -> CoreError {
        CoreError::Config {
            path: path.to_path_buf(),
            reason,
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| Self::config_error(&self.config_path, e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [playfield] section
        if let Some(v) = config.getfloat("playfield", "floor_margin").ok().flatten() {
            self.floor_margin = v as f32;
        }
        if let Some(v) = config.getfloat("playfield", "exit_margin").ok().flatten() {
            self.exit_margin = v as f32;
        }
        if let Some(v) = config.getfloat("playfield", "entry_x").ok().flatten() {
            self.entry_x = v as f32;
        }

        // [player] section
        if let Some(v) = config.getuint("player", "max_hp").ok().flatten() {
            self.player_max_hp = v as u32;
        }
        if let Some(v) = config.getuint("player", "hp_per_heart").ok().flatten() {
            self.hp_per_heart = v as u32;
        }
        if let Some(v) = config.getuint("player", "attack_damage").ok().flatten() {
            self.attack_damage = v as u32;
        }
        if let Some(v) = config.getfloat("player", "attack_range").ok().flatten() {
            self.attack_range = v as f32;
        }
        if let Some(v) = config.getfloat("player", "move_speed").ok().flatten() {
            self.move_speed = v as f32;
        }
        if let Some(v) = config.getfloat("player", "jump_power").ok().flatten() {
            self.jump_power = v as f32;
        }
        if let Some(v) = config.getuint("player", "max_jumps").ok().flatten() {
            self.max_jumps = v.min(u8::MAX as u64) as u8;
        }
        if let Some(v) = config.getfloat("player", "gravity").ok().flatten() {
            self.gravity = v as f32;
        }
        if let Some(v) = config.getuint("player", "grace_ms").ok().flatten() {
            self.grace_ms = v as u32;
        }

        // [combat] section
        if let Some(v) = config
            .getuint("combat", "first_strike_window_ms")
            .ok()
            .flatten()
        {
            self.first_strike_window_ms = v as u32;
        }
        if let Some(v) = config.getuint("combat", "seed").ok().flatten() {
            self.seed = Some(v);
        }

        // [roster] section
        if let Some(path) = config.get("roster", "path") {
            self.roster_path = Some(PathBuf::from(path));
        }

        info!(
            "Loaded config: {}x{} window, fps={}, player hp={}, seed={:?}",
            self.window_width, self.window_height, self.target_fps, self.player_max_hp, self.seed
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<()> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config.set("playfield", "floor_margin", Some(self.floor_margin.to_string()));
        config.set("playfield", "exit_margin", Some(self.exit_margin.to_string()));
        config.set("playfield", "entry_x", Some(self.entry_x.to_string()));

        config.set("player", "max_hp", Some(self.player_max_hp.to_string()));
        config.set("player", "hp_per_heart", Some(self.hp_per_heart.to_string()));
        config.set("player", "attack_damage", Some(self.attack_damage.to_string()));
        config.set("player", "attack_range", Some(self.attack_range.to_string()));
        config.set("player", "move_speed", Some(self.move_speed.to_string()));
        config.set("player", "jump_power", Some(self.jump_power.to_string()));
        config.set("player", "max_jumps", Some(self.max_jumps.to_string()));
        config.set("player", "gravity", Some(self.gravity.to_string()));
        config.set("player", "grace_ms", Some(self.grace_ms.to_string()));

        config.set(
            "combat",
            "first_strike_window_ms",
            Some(self.first_strike_window_ms.to_string()),
        );
        if let Some(seed) = self.seed {
            config.set("combat", "seed", Some(seed.to_string()));
        }
        if let Some(path) = &self.roster_path {
            config.set("roster", "path", Some(path.display().to_string()));
        }

        config
            .write(&self.config_path)
            .map_err(|e| Self::config_error(&self.config_path, e.to_string()))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
