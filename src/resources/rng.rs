use bevy_ecs::prelude::Resource;

/// Random source for hazard placement and wandering movement.
///
/// Seeded from config when a seed is given so runs are reproducible.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub fastrand::Rng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        GameRng(fastrand::Rng::with_seed(seed))
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => GameRng(fastrand::Rng::new()),
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        GameRng(fastrand::Rng::new())
    }
}
