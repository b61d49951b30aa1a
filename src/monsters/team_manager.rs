use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::monsters::Team;

/// Seed roster shipped with the server, used when no teams file can be read
const SEED_TEAMS: &str = include_str!("../../resources/teams.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRoster {
    pub teams: Vec<Team>,
}

/// In-memory team store keyed by team id
pub struct TeamRepository {
    pub teams: DashMap<String, Team>,
}

impl TeamRepository {
    pub fn new(teams_path: &str) -> Arc<Self> {
        let roster = Self::load_roster(teams_path);
        info!("Loaded {} teams from {}", roster.teams.len(), teams_path);
        Arc::new(Self::from_teams(roster.teams))
    }

    pub fn from_teams(teams: Vec<Team>) -> Self {
        let map = DashMap::new();
        for team in teams {
            map.insert(team.id.clone(), team);
        }
        TeamRepository { teams: map }
    }

    fn load_roster(path: &str) -> TeamRoster {
        match File::open(Path::new(path)) {
            Ok(file) => {
                let reader = BufReader::new(file);
                match serde_json::from_reader(reader) {
                    Ok(roster) => roster,
                    Err(e) => {
                        warn!("Failed to parse teams JSON {}: {}, using seed roster", path, e);
                        Self::seed_roster()
                    }
                }
            }
            Err(e) => {
                warn!("Failed to open teams file {}: {}, using seed roster", path, e);
                Self::seed_roster()
            }
        }
    }

    pub fn seed_roster() -> TeamRoster {
        Self::parse_seed(SEED_TEAMS)
    }

    fn parse_seed(json: &str) -> TeamRoster {
        match serde_json::from_str(json) {
            Ok(roster) => roster,
            Err(e) => {
                warn!("Failed to parse seed roster: {}, starting with no teams", e);
                TeamRoster { teams: Vec::new() }
            }
        }
    }

    pub fn get_team(&self, team_id: &str) -> Option<Team> {
        self.teams.get(team_id).map(|entry| entry.value().clone())
    }

    /// All teams sorted by name so listings are stable
    pub fn list_teams(&self) -> Vec<Team> {
        let mut teams: Vec<Team> = self.teams.iter().map(|entry| entry.value().clone()).collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        teams
    }
}
