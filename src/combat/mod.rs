pub mod state;
pub mod messages;
pub mod manager;
pub mod utils;
pub mod logic;
pub mod type_chart;
pub mod composer;

// Re-export key types
pub use state::{
    BattleState,
    BattleTeam,
    BattlePokemon,
    BattleRound,
    RoundPokemonView,
    RoundWinner,
    RoundSide,
    TeamSide,
};
pub use messages::{BattleResult, BattleSummary, BattlePrediction};
pub use type_chart::{TypeChart, TypeEffectiveness};
pub use manager::BattleManager;
