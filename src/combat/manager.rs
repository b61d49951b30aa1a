use crate::combat::composer::compose_result;
use crate::combat::logic::battle_engine::{can_start_battle, simulate_complete_battle};
use crate::combat::messages::{BattlePrediction, BattleResult};
use crate::combat::type_chart::TypeEffectiveness;
use crate::combat::utils;
use crate::config::BattleConfig;
use crate::errors::BattleError;
use crate::monsters::{Team, TeamRepository};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs battles between stored teams
pub struct BattleManager {
    team_repository: Arc<TeamRepository>,
    resolver: Arc<dyn TypeEffectiveness>,
    config: BattleConfig,
}

impl BattleManager {
    pub fn new(
        team_repository: Arc<TeamRepository>,
        resolver: Arc<dyn TypeEffectiveness>,
        config: BattleConfig,
    ) -> Self {
        BattleManager {
            team_repository,
            resolver,
            config,
        }
    }

    fn fetch_team(&self, team_id: &str) -> Result<Team, BattleError> {
        self.team_repository
            .get_team(team_id)
            .ok_or_else(|| BattleError::TeamNotFound {
                team_id: team_id.to_string(),
            })
    }

    /// Look both teams up by id and battle them
    pub async fn start_battle(&self, team1_id: &str, team2_id: &str) -> Result<BattleResult, BattleError> {
        if team1_id == team2_id {
            return Err(BattleError::SameTeam);
        }
        let team1 = self.fetch_team(team1_id)?;
        let team2 = self.fetch_team(team2_id)?;
        self.run_battle(&team1, &team2).await
    }

    /// Simulate a battle between two team read models
    pub async fn run_battle(&self, team1: &Team, team2: &Team) -> Result<BattleResult, BattleError> {
        can_start_battle(team1, team2)?;
        info!("Starting battle: {} vs {}", team1.name, team2.name);

        let mut rng = SmallRng::from_entropy();
        let state = simulate_complete_battle(
            team1,
            team2,
            self.resolver.as_ref(),
            self.config.simulation_options(),
            &mut rng,
        )
        .await
        .map_err(|e| {
            warn!("Battle {} vs {} aborted: {}", team1.name, team2.name, e);
            e
        })?;

        let result = compose_result(&state, self.config.undecided_winner_fallback);
        info!(
            "Battle {} finished: winner {:?} after {} rounds ({})",
            result.id,
            result.winner,
            result.total_rounds,
            utils::format_battle_duration(result.battle_duration)
        );
        Ok(result)
    }

    pub fn predict(&self, team1_id: &str, team2_id: &str) -> Result<BattlePrediction, BattleError> {
        if team1_id == team2_id {
            return Err(BattleError::SameTeam);
        }
        let team1 = self.fetch_team(team1_id)?;
        let team2 = self.fetch_team(team2_id)?;
        Ok(utils::predict_outcome(&team1, &team2))
    }
}
