pub mod monster;
pub mod team_manager;

pub use monster::{Pokemon, PokemonType, Team, TEAM_SIZE};
pub use team_manager::TeamRepository;
