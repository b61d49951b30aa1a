// Shared fixtures for the battle flow tests.

use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::combat::TypeEffectiveness;
use crate::monsters::{Pokemon, PokemonType, Team, TEAM_SIZE};

pub fn pokemon(id: &str, pokemon_type: PokemonType, power: u32, life: u32) -> Pokemon {
    Pokemon {
        id: id.to_string(),
        name: format!("Mon {}", id),
        image: format!("https://example.com/{}.png", id),
        pokemon_type,
        power,
        life,
    }
}

/// Six identical members
pub fn uniform_team(id: &str, pokemon_type: PokemonType, power: u32, life: u32) -> Team {
    Team {
        id: id.to_string(),
        name: format!("Team {}", id),
        members: (0..TEAM_SIZE)
            .map(|i| pokemon(&format!("{}-{}", id, i), pokemon_type, power, life))
            .collect(),
    }
}

/// Resolver that always answers with the same factor
pub struct FixedEffectiveness(pub f32);

#[async_trait]
impl TypeEffectiveness for FixedEffectiveness {
    async fn effectiveness(&self, _attacker: PokemonType, _defender: PokemonType) -> anyhow::Result<f32> {
        Ok(self.0)
    }
}

/// Resolver that fails once `healthy_calls` lookups have been answered
pub struct FailingEffectiveness {
    pub healthy_calls: usize,
    pub calls: AtomicUsize,
}

impl FailingEffectiveness {
    pub fn after(healthy_calls: usize) -> Self {
        FailingEffectiveness {
            healthy_calls,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TypeEffectiveness for FailingEffectiveness {
    async fn effectiveness(&self, _attacker: PokemonType, _defender: PokemonType) -> anyhow::Result<f32> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.healthy_calls {
            return Err(anyhow!("type chart unavailable"));
        }
        Ok(1.0)
    }
}
