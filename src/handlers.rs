use crate::app_state::AppState;
use crate::combat::messages::{
    BattlePrediction, BattleResult, PredictionQuery, StartBattleRequest, TypeEffectivenessResponse,
};
use crate::combat::type_chart::TypeChartEntry;
use crate::errors::BattleError;
use crate::monsters::{PokemonType, Team};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    "OK"
}

pub async fn list_teams_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Team>> {
    Json(state.team_repository.list_teams())
}

pub async fn start_battle_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartBattleRequest>,
) -> Result<Json<BattleResult>, BattleError> {
    info!("Battle requested: {} vs {}", request.team1_id, request.team2_id);
    let result = state
        .battle_manager
        .start_battle(&request.team1_id, &request.team2_id)
        .await?;
    Ok(Json(result))
}

pub async fn prediction_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PredictionQuery>,
) -> Result<Json<BattlePrediction>, BattleError> {
    let prediction = state.battle_manager.predict(&query.team1_id, &query.team2_id)?;
    Ok(Json(prediction))
}

pub async fn type_chart_handler(State(state): State<Arc<AppState>>) -> Json<Vec<TypeChartEntry>> {
    Json(state.type_chart.entries())
}

fn parse_type(name: &str) -> Result<PokemonType, BattleError> {
    name.parse::<PokemonType>()
        .map_err(|reason| BattleError::validation("Type chart", reason))
}

pub async fn type_effectiveness_handler(
    State(state): State<Arc<AppState>>,
    Path((attacker, defender)): Path<(String, String)>,
) -> Result<Json<TypeEffectivenessResponse>, BattleError> {
    let attacker = parse_type(&attacker)?;
    let defender = parse_type(&defender)?;
    let factor = state.type_chart.factor(attacker, defender);
    Ok(Json(TypeEffectivenessResponse { factor }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use crate::combat::TypeChart;
    use crate::config::Config;
    use crate::monsters::TeamRepository;

    fn test_state() -> Arc<AppState> {
        let teams = Arc::new(TeamRepository::from_teams(TeamRepository::seed_roster().teams));
        AppState::new(Config::default(), teams, Arc::new(TypeChart::default()))
    }

    #[tokio::test]
    async fn start_battle_returns_complete_result() {
        let request = StartBattleRequest {
            team1_id: "fire-squad".to_string(),
            team2_id: "grass-guardians".to_string(),
        };
        let Json(result) = start_battle_handler(State(test_state()), Json(request))
            .await
            .expect("battle runs");
        assert_eq!(result.total_rounds as usize, result.rounds.len());
        assert_eq!(result.team1.name, "Fire Squad");
        assert!(result.rounds.len() <= 50);
    }

    #[tokio::test]
    async fn unknown_team_is_not_found() {
        let request = StartBattleRequest {
            team1_id: "fire-squad".to_string(),
            team2_id: "rocket".to_string(),
        };
        let err = start_battle_handler(State(test_state()), Json(request)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn same_team_is_rejected() {
        let query = PredictionQuery {
            team1_id: "fire-squad".to_string(),
            team2_id: "fire-squad".to_string(),
        };
        let err = prediction_handler(State(test_state()), Query(query)).await.unwrap_err();
        assert!(matches!(err, BattleError::SameTeam));
    }

    #[tokio::test]
    async fn type_chart_endpoints() {
        let Json(entries) = type_chart_handler(State(test_state())).await;
        assert_eq!(entries.len(), 9);

        let Json(ok) = type_effectiveness_handler(State(test_state()), Path(("fire".to_string(), "grass".to_string())))
            .await
            .expect("known types");
        assert_eq!(ok.factor, 2.0);
    }

    #[tokio::test]
    async fn unknown_type_is_a_json_validation_error() {
        let err = type_effectiveness_handler(State(test_state()), Path(("fire".to_string(), "ice".to_string())))
            .await
            .unwrap_err();
        assert!(matches!(err, BattleError::Validation { .. }));
        let body = err.to_response();
        assert_eq!(body.status_code, 400);
        assert_eq!(body.error, "VALIDATION_ERROR");
        assert!(body.message.contains("'ice'"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(axum::http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
