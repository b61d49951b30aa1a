use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::monsters::PokemonType;

/// Errors that abort a battle request
#[derive(Error, Debug)]
pub enum BattleError {
    #[error("{team}: {reason}")]
    Validation { team: String, reason: String },

    #[error("A team cannot battle against itself")]
    SameTeam,

    #[error("Team {team_id} not found")]
    TeamNotFound { team_id: String },

    #[error("Type effectiveness lookup {attacker} -> {defender} failed: {source}")]
    LookupFailure {
        attacker: PokemonType,
        defender: PokemonType,
        #[source]
        source: anyhow::Error,
    },
}

impl BattleError {
    pub fn validation(team: impl Into<String>, reason: impl Into<String>) -> Self {
        BattleError::Validation {
            team: team.into(),
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            BattleError::Validation { .. } => 400,
            BattleError::SameTeam => 400,
            BattleError::TeamNotFound { .. } => 404,
            BattleError::LookupFailure { .. } => 502,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            BattleError::Validation { .. } => "VALIDATION_ERROR",
            BattleError::SameTeam => "VALIDATION_ERROR",
            BattleError::TeamNotFound { .. } => "TEAM_NOT_FOUND",
            BattleError::LookupFailure { .. } => "LOOKUP_FAILURE",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.error_code().to_string(),
            message: self.to_string(),
            status_code: self.status_code(),
        }
    }
}

/// Error body returned by the HTTP layer
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl IntoResponse for BattleError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}
