// Re-export modules for external use
pub mod app_state;
pub mod combat;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod monsters;

pub use errors::BattleError;

#[cfg(test)]
mod tests;
