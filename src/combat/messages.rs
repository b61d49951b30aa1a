use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::{BattleRound, BattleTeam, TeamSide};

/// Request body for starting a battle
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StartBattleRequest {
    pub team1_id: String,
    pub team2_id: String,
}

/// Final, immutable outcome of a simulated battle
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleResult {
    pub id: Uuid,
    pub team1: BattleTeam,
    pub team2: BattleTeam,
    pub rounds: Vec<BattleRound>,
    /// Absent when the battle hit the round cap undecided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<TeamSide>,
    pub is_complete: bool,
    pub total_rounds: u32,
    pub battle_duration: u64, // milliseconds
    pub created_at: DateTime<Utc>,
}

/// Short form of a result, for listings
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleSummary {
    pub id: Uuid,
    pub team1_name: String,
    pub team2_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<TeamSide>,
    pub total_rounds: u32,
    pub created_at: DateTime<Utc>,
}

/// Pre-battle guess based on total team power
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattlePrediction {
    pub favorite_team_id: String,
    pub underdog_team_id: String,
    pub power_difference: u32,
    pub confidence: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PredictionQuery {
    pub team1_id: String,
    pub team2_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypeEffectivenessResponse {
    pub factor: f32,
}
