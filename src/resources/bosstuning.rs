//! Boss tuning data.
//!
//! Every boss kind has exactly one canonical parameter set. The roster can
//! be dumped to JSON, edited and loaded back to override it without touching
//! code.
//!
//! ```json
//! { "bosses": [ { "kind": "Ira", "max_hp": 180, "damage": 18, ... } ] }
//! ```
use std::fs;
use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use serde::{Deserialize, Serialize};

use crate::components::animationset::FrameDelays;
use crate::components::boss::{AttackPattern, BossKind, Movement};
use crate::components::combatant::Capabilities;
use crate::components::facing::Facing;
use crate::components::hazard::HazardLayout;
use crate::components::projectile::{AimedShot, ThrownShot};
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossTuning {
    pub kind: BossKind,
    pub max_hp: u32,
    pub damage: u32,
    pub movement: Movement,
    pub patterns: Vec<AttackPattern>,
    pub attack_interval_ms: u32,
    #[serde(default)]
    pub windup_ms: u32,
    #[serde(default)]
    pub recovery_ms: u32,
    /// Attack timer only runs while the player is this close.
    #[serde(default)]
    pub attack_range: Option<f32>,
    /// `None` disables the first-strike rule for this boss.
    #[serde(default)]
    pub fury_multiplier: Option<f32>,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub frame_delays: FrameDelays,
    #[serde(default)]
    pub authored_facing: Facing,
    /// Placeholder box when no frames were supplied.
    pub size: [f32; 2],
    pub color: [u8; 4],
    /// Spawn x relative to the playfield center.
    #[serde(default)]
    pub spawn_offset_x: f32,
    /// Spawn height above the floor line.
    #[serde(default)]
    pub spawn_height: f32,
}

impl BossTuning {
    pub fn ira() -> Self {
        Self {
            kind: BossKind::Ira,
            max_hp: 180,
            damage: 18,
            movement: Movement::Stationary,
            patterns: vec![AttackPattern::GroundHazards(HazardLayout::default())],
            attack_interval_ms: 2000,
            windup_ms: 240,
            recovery_ms: 240,
            attack_range: None,
            fury_multiplier: Some(1.5),
            capabilities: Capabilities::default(),
            frame_delays: FrameDelays {
                attack: 120,
                ..FrameDelays::default()
            },
            authored_facing: Facing::Left,
            size: [120.0, 160.0],
            color: [200, 40, 40, 255],
            spawn_offset_x: 100.0,
            spawn_height: 0.0,
        }
    }

    pub fn gula() -> Self {
        Self {
            kind: BossKind::Gula,
            max_hp: 420,
            damage: 16,
            movement: Movement::Patrol {
                speed: 2.0,
                edge_margin: 120.0,
            },
            patterns: vec![
                AttackPattern::GroundHazards(HazardLayout {
                    count: 5,
                    width: 76.0,
                    height: 18.0,
                    warn_ms: 1200,
                    active_ms: 1800,
                    pad_x: 10.0,
                    pad_y: 4.0,
                    edge_margin: 100.0,
                }),
                AttackPattern::Thrown(ThrownShot::default()),
            ],
            attack_interval_ms: 2200,
            windup_ms: 200,
            recovery_ms: 300,
            attack_range: None,
            fury_multiplier: Some(1.4),
            capabilities: Capabilities {
                contact_damage: true,
                ..Capabilities::default()
            },
            frame_delays: FrameDelays {
                idle: 200,
                walk: 200,
                attack: 100,
                hurt: 200,
                die: 120,
            },
            authored_facing: Facing::Left,
            size: [150.0, 170.0],
            color: [120, 160, 60, 255],
            spawn_offset_x: 100.0,
            spawn_height: 0.0,
        }
    }

    pub fn ganancia() -> Self {
        Self {
            kind: BossKind::Ganancia,
            max_hp: 300,
            damage: 10,
            movement: Movement::KeepRange {
                speed: 2.0,
                range: 420.0,
            },
            patterns: vec![AttackPattern::AimedShot(AimedShot::default())],
            attack_interval_ms: 2500,
            windup_ms: 0,
            recovery_ms: 150,
            attack_range: Some(420.0),
            fury_multiplier: None,
            capabilities: Capabilities {
                reacts_to_attack: true,
                reacts_to_hit: true,
                ..Capabilities::default()
            },
            frame_delays: FrameDelays::uniform(150),
            authored_facing: Facing::Left,
            size: [110.0, 140.0],
            color: [220, 190, 40, 255],
            spawn_offset_x: 100.0,
            spawn_height: 0.0,
        }
    }

    pub fn canonical(kind: BossKind) -> Self {
        match kind {
            BossKind::Ira => Self::ira(),
            BossKind::Gula => Self::gula(),
            BossKind::Ganancia => Self::ganancia(),
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossRoster {
    pub bosses: Vec<BossTuning>,
}

impl Default for BossRoster {
    fn default() -> Self {
        Self {
            bosses: vec![BossTuning::gula(), BossTuning::ira(), BossTuning::ganancia()],
        }
    }
}

impl BossRoster {
    pub fn get(&self, kind: BossKind) -> Option<&BossTuning> {
        self.bosses.iter().find(|b| b.kind == kind)
    }

    pub fn require(&self, kind: BossKind) -> Result<&BossTuning> {
        self.get(kind).ok_or(CoreError::UnknownBoss(kind))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CoreError::RosterIo {
            path: path.to_path_buf(),
            source,
        })?;
        let roster = Self::from_json(&text)?;
        info!("Loaded boss roster from {:?} ({} bosses)", path, roster.bosses.len());
        Ok(roster)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| CoreError::RosterIo {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved boss roster to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_has_every_kind_once() {
        let roster = BossRoster::default();
        for kind in [BossKind::Ira, BossKind::Gula, BossKind::Ganancia] {
            assert_eq!(roster.bosses.iter().filter(|b| b.kind == kind).count(), 1);
        }
    }

    #[test]
    fn test_canonical_values() {
        let ira = BossTuning::ira();
        assert_eq!((ira.max_hp, ira.damage, ira.attack_interval_ms), (180, 18, 2000));
        assert_eq!(ira.fury_multiplier, Some(1.5));

        let gula = BossTuning::gula();
        assert!(gula.capabilities.contact_damage);
        assert_eq!(gula.patterns.len(), 2);

        let ganancia = BossTuning::ganancia();
        assert!(ganancia.fury_multiplier.is_none());
        assert_eq!(ganancia.attack_range, Some(420.0));
    }

    #[test]
    fn test_unknown_boss_is_error() {
        let roster = BossRoster {
            bosses: vec![BossTuning::ira()],
        };
        assert!(matches!(
            roster.require(BossKind::Gula),
            Err(CoreError::UnknownBoss(BossKind::Gula))
        ));
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        let mut roster = BossRoster::default();
        roster.bosses[0].max_hp = 999;
        roster.save_json(&path).unwrap();
        let loaded = BossRoster::load_json(&path).unwrap();
        assert_eq!(loaded, roster);
    }

    #[test]
    fn test_partial_entry_uses_field_defaults() {
        let text = r#"{ "bosses": [ {
            "kind": "Ira", "max_hp": 50, "damage": 5,
            "movement": { "type": "stationary" },
            "patterns": [ { "type": "ground_hazards", "count": 2 } ],
            "attack_interval_ms": 1000,
            "size": [40, 60], "color": [255, 0, 0, 255]
        } ] }"#;
        let roster = BossRoster::from_json(text).unwrap();
        let ira = roster.require(BossKind::Ira).unwrap();
        assert_eq!(ira.windup_ms, 0);
        assert!(ira.fury_multiplier.is_none());
        match ira.patterns[0] {
            AttackPattern::GroundHazards(layout) => {
                assert_eq!(layout.count, 2);
                assert_eq!(layout.warn_ms, 500);
            }
            _ => panic!("expected ground hazards"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = BossRoster::load_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CoreError::RosterIo { .. }));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            BossRoster::from_json("{ nope"),
            Err(CoreError::RosterParse(_))
        ));
    }
}
