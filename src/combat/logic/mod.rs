pub mod battle_engine;
pub mod battle_calculations;

// Re-export the main entry points
pub use battle_engine::{execute_round, simulate_complete_battle};
