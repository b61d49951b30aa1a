use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest and highest value allowed for both `power` and `life`.
pub const MIN_STAT: u32 = 10;
pub const MAX_STAT: u32 = 100;

/// Number of Pokemon every battle-ready team must carry.
pub const TEAM_SIZE: usize = 6;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PokemonType {
    Fire,
    Water,
    Grass,
}

impl PokemonType {
    pub const ALL: [PokemonType; 3] = [PokemonType::Fire, PokemonType::Water, PokemonType::Grass];

    pub fn display_name(&self) -> &'static str {
        match self {
            PokemonType::Fire => "Fire",
            PokemonType::Water => "Water",
            PokemonType::Grass => "Grass",
        }
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for PokemonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fire" => Ok(PokemonType::Fire),
            "water" => Ok(PokemonType::Water),
            "grass" => Ok(PokemonType::Grass),
            other => Err(format!("unknown pokemon type '{}'", other)),
        }
    }
}

/// Static Pokemon definition as handed over by the team store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pokemon {
    pub id: String,
    pub name: String,
    pub image: String,
    #[serde(rename = "type")]
    pub pokemon_type: PokemonType,
    pub power: u32,
    pub life: u32,
}

impl Pokemon {
    /// Returns a description of the first malformed field, if any
    pub fn validation_issue(&self) -> Option<String> {
        if self.id.trim().is_empty() {
            return Some("member has an empty id".to_string());
        }
        if self.name.trim().is_empty() {
            return Some(format!("member {} has an empty name", self.id));
        }
        if !(MIN_STAT..=MAX_STAT).contains(&self.power) {
            return Some(format!(
                "{} has power {} outside {}..={}",
                self.name, self.power, MIN_STAT, MAX_STAT
            ));
        }
        if !(MIN_STAT..=MAX_STAT).contains(&self.life) {
            return Some(format!(
                "{} has life {} outside {}..={}",
                self.name, self.life, MIN_STAT, MAX_STAT
            ));
        }
        None
    }
}

/// Team read model: an ordered roster, position decides fighting order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub members: Vec<Pokemon>,
}

impl Team {
    pub fn total_power(&self) -> u32 {
        self.members.iter().map(|p| p.power).sum()
    }
}
