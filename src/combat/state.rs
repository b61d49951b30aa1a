use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use uuid::Uuid;

use crate::monsters::{Pokemon, PokemonType, Team};

/// Main battle state container, owned by a single simulation
#[derive(Debug, Clone)]
pub struct BattleState {
    pub battle_id: Uuid,
    pub team1: BattleTeam,
    pub team2: BattleTeam,
    pub current_round: u32, // 1-based, number of the next round to be fought
    pub rounds: Vec<BattleRound>,
    pub winner: Option<TeamSide>,
    pub is_complete: bool,
    pub battle_duration: u64, // milliseconds since start_time
    pub start_time: Instant,
}

/// A Pokemon with its battle-only state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BattlePokemon {
    pub id: String,
    pub name: String,
    pub image: String,
    #[serde(rename = "type")]
    pub pokemon_type: PokemonType,
    pub power: u32,
    pub max_life: u32,
    pub current_life: u32,
    pub is_defeated: bool,
    pub total_damage_dealt: u32,
    pub total_damage_taken: u32,
}

/// One side of the battle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BattleTeam {
    pub id: String,
    pub name: String,
    pub pokemon: Vec<BattlePokemon>,
    pub current_pokemon_index: usize,
    pub defeated_count: usize,
    pub is_defeated: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl std::str::FromStr for TeamSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "team1" => Ok(TeamSide::Team1),
            "team2" => Ok(TeamSide::Team2),
            other => Err(format!("unknown team side '{}'", other)),
        }
    }
}

/// Which active Pokemon took the round
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoundWinner {
    Pokemon1,
    Pokemon2,
    Draw,
}

/// Side tag used to list knockouts inside a round
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoundSide {
    Pokemon1,
    Pokemon2,
}

/// Post-round snapshot of one of the fighting Pokemon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundPokemonView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pokemon_type: PokemonType,
    pub image: String,
    pub power: u32,
    pub life: u32,
    pub current_life: u32,
    pub is_defeated: bool,
}

/// Immutable record of a single round
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BattleRound {
    pub round_number: u32,
    pub pokemon1: RoundPokemonView,
    pub pokemon2: RoundPokemonView,
    pub damage1: u32, // dealt by pokemon1 to pokemon2
    pub damage2: u32, // dealt by pokemon2 to pokemon1
    pub type_effectiveness1: f32,
    pub type_effectiveness2: f32,
    pub winner: RoundWinner,
    pub defeated: Vec<RoundSide>,
}

impl BattlePokemon {
    /// Snapshot a roster member at battle start
    pub fn from_pokemon(pokemon: &Pokemon) -> Self {
        BattlePokemon {
            id: pokemon.id.clone(),
            name: pokemon.name.clone(),
            image: pokemon.image.clone(),
            pokemon_type: pokemon.pokemon_type,
            power: pokemon.power,
            max_life: pokemon.life,
            current_life: pokemon.life,
            is_defeated: false,
            total_damage_dealt: 0,
            total_damage_taken: 0,
        }
    }

    pub fn round_view(&self) -> RoundPokemonView {
        RoundPokemonView {
            id: self.id.clone(),
            name: self.name.clone(),
            pokemon_type: self.pokemon_type,
            image: self.image.clone(),
            power: self.power,
            life: self.max_life,
            current_life: self.current_life,
            is_defeated: self.is_defeated,
        }
    }
}

impl BattleTeam {
    pub fn from_team(team: &Team) -> Self {
        BattleTeam {
            id: team.id.clone(),
            name: team.name.clone(),
            pokemon: team.members.iter().map(BattlePokemon::from_pokemon).collect(),
            current_pokemon_index: 0,
            defeated_count: 0,
            is_defeated: false,
        }
    }
}

impl BattleState {
    pub fn new(team1: &Team, team2: &Team) -> Self {
        BattleState {
            battle_id: Uuid::new_v4(),
            team1: BattleTeam::from_team(team1),
            team2: BattleTeam::from_team(team2),
            current_round: 1,
            rounds: Vec::new(),
            winner: None,
            is_complete: false,
            battle_duration: 0,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }
}
