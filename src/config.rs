use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tracing::{info, warn};

use crate::combat::logic::battle_engine::{SimulationOptions, DEFAULT_MAX_ROUNDS};
use crate::combat::state::TeamSide;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub battle: BattleConfig,
    pub roster: RosterConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BattleConfig {
    pub max_rounds: u32,
    pub round_delay_ms: u64,
    pub undecided_winner_fallback: Option<TeamSide>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RosterConfig {
    pub teams_path: String,
    pub type_chart_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
                port: 8080,
                cors_origins: vec!["*".to_string()],
            },
            battle: BattleConfig {
                max_rounds: DEFAULT_MAX_ROUNDS,
                round_delay_ms: 0,
                undecided_winner_fallback: None,
            },
            roster: RosterConfig {
                teams_path: "resources/teams.json".to_string(),
                type_chart_path: "resources/types.json".to_string(),
            },
        }
    }
}

impl BattleConfig {
    pub fn simulation_options(&self) -> SimulationOptions {
        SimulationOptions {
            max_rounds: self.max_rounds,
            round_delay: Duration::from_millis(self.round_delay_ms),
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables; `.env` is loaded by main
    pub fn from_env() -> Self {
        let mut config = Config::default();

        // Server config
        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.server.port = port;
            }
        }

        if let Ok(host) = env::var("HOST") {
            if let Ok(host) = host.parse::<IpAddr>() {
                config.server.host = host;
            }
        }

        if let Ok(cors) = env::var("CORS_ORIGINS") {
            config.server.cors_origins = cors.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Battle config
        if let Ok(max_rounds) = env::var("BATTLE_MAX_ROUNDS") {
            match max_rounds.parse::<u32>() {
                Ok(max_rounds) if max_rounds > 0 => config.battle.max_rounds = max_rounds,
                _ => warn!("Ignoring invalid BATTLE_MAX_ROUNDS '{}'", max_rounds),
            }
        }

        if let Ok(delay) = env::var("BATTLE_ROUND_DELAY_MS") {
            if let Ok(delay) = delay.parse::<u64>() {
                config.battle.round_delay_ms = delay;
            }
        }

        if let Ok(fallback) = env::var("BATTLE_UNDECIDED_WINNER_FALLBACK") {
            match fallback.parse::<TeamSide>() {
                Ok(side) => config.battle.undecided_winner_fallback = Some(side),
                Err(e) => warn!("Ignoring BATTLE_UNDECIDED_WINNER_FALLBACK: {}", e),
            }
        }

        // Roster config
        if let Ok(teams_path) = env::var("TEAMS_PATH") {
            config.roster.teams_path = teams_path;
        }

        if let Ok(type_chart_path) = env::var("TYPE_CHART_PATH") {
            config.roster.type_chart_path = type_chart_path;
        }

        info!("Configuration loaded: {:?}", config);
        config
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }
}
