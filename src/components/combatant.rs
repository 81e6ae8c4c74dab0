//! Combat identity and optional capabilities of an actor.
//!
//! Behaviour that differs between actor types is declared here as explicit
//! flags instead of being probed at runtime. Systems read [`Capabilities`] to
//! decide, for example, whether a hit freezes the actor or plays a hurt
//! sequence.
use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Boss,
}

impl Faction {
    pub fn opposes(self, other: Faction) -> bool {
        self != other
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Zero velocity on every damage application.
    pub hit_stop: bool,
    /// Enter `Hurt` on non-lethal damage.
    pub hurt_lock: bool,
    /// Play `Hurt` before `Dying` on a lethal hit.
    pub hurt_before_death: bool,
    /// Damage opponents whose body overlaps this one.
    pub contact_damage: bool,
    /// Play the attack sequence when the player swings.
    pub reacts_to_attack: bool,
    /// Play the attack sequence when damaged.
    pub reacts_to_hit: bool,
}

#[derive(Component, Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub faction: Faction,
    /// Current damage per hit, after any fury scaling.
    pub damage: u32,
    /// False once the death sequence has completed.
    pub alive: bool,
    pub capabilities: Capabilities,
}

impl Combatant {
    pub fn new(name: impl Into<String>, faction: Faction, damage: u32) -> Self {
        Self {
            name: name.into(),
            faction,
            damage,
            alive: true,
            capabilities: Capabilities::default(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Scale damage by `factor`, truncating.
    pub fn scale_damage(&mut self, factor: f32) {
        self.damage = (self.damage as f32 * factor) as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factions_oppose() {
        assert!(Faction::Player.opposes(Faction::Boss));
        assert!(!Faction::Boss.opposes(Faction::Boss));
    }

    #[test]
    fn test_scale_damage_truncates() {
        let mut c = Combatant::new("Ira", Faction::Boss, 18);
        c.scale_damage(1.5);
        assert_eq!(c.damage, 27);
        let mut g = Combatant::new("Gula", Faction::Boss, 16);
        g.scale_damage(1.4);
        assert_eq!(g.damage, 22);
    }
}
