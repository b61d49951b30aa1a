use chrono::Utc;
use uuid::Uuid;

use super::messages::{BattleResult, BattleSummary};
use super::state::{BattleState, RoundSide, TeamSide};

/// Package a finished simulation into a transportable result.
///
/// `fallback_winner` is only used when the simulation did not decide a
/// winner; pass `None` to keep "no winner" visible to the caller.
pub fn compose_result(state: &BattleState, fallback_winner: Option<TeamSide>) -> BattleResult {
    BattleResult {
        id: Uuid::new_v4(),
        team1: state.team1.clone(),
        team2: state.team2.clone(),
        rounds: state.rounds.clone(),
        winner: state.winner.or(fallback_winner),
        is_complete: state.is_complete,
        total_rounds: state.rounds.len() as u32,
        battle_duration: state.battle_duration,
        created_at: Utc::now(),
    }
}

pub fn summarize(result: &BattleResult) -> BattleSummary {
    BattleSummary {
        id: result.id,
        team1_name: result.team1.name.clone(),
        team2_name: result.team2.name.clone(),
        winner: result.winner,
        total_rounds: result.total_rounds,
        created_at: result.created_at,
    }
}

/// Knockouts suffered by each team, counted from the round log
pub fn knockouts_from_rounds(result: &BattleResult) -> (usize, usize) {
    result.rounds.iter().fold((0, 0), |(team1, team2), round| {
        let lost1 = round.defeated.contains(&RoundSide::Pokemon1) as usize;
        let lost2 = round.defeated.contains(&RoundSide::Pokemon2) as usize;
        (team1 + lost1, team2 + lost2)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::logic::battle_engine::{initialize_battle, resolve_round};
    use crate::monsters::{Pokemon, PokemonType, Team, TEAM_SIZE};

    fn team(id: &str) -> Team {
        Team {
            id: id.to_string(),
            name: format!("Team {}", id),
            members: (0..TEAM_SIZE)
                .map(|i| Pokemon {
                    id: format!("{}-{}", id, i),
                    name: format!("Mon {}", i),
                    image: "https://example.com/mon.png".to_string(),
                    pokemon_type: PokemonType::Water,
                    power: 40,
                    life: 40,
                })
                .collect(),
        }
    }

    #[test]
    fn undecided_battle_has_no_winner_unless_fallback_given() {
        let state = initialize_battle(&team("a"), &team("b")).unwrap();
        let state = resolve_round(&state, 10, 10, 1.0, 1.0);

        let result = compose_result(&state, None);
        assert_eq!(result.winner, None);
        assert!(!result.is_complete);
        assert_eq!(result.total_rounds, 1);

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("winner").is_none());

        assert_eq!(compose_result(&state, Some(TeamSide::Team1)).winner, Some(TeamSide::Team1));
    }

    #[test]
    fn decided_winner_ignores_fallback() {
        let mut state = initialize_battle(&team("a"), &team("b")).unwrap();
        for _ in 0..TEAM_SIZE {
            state = resolve_round(&state, 40, 1, 1.0, 1.0);
        }
        let result = compose_result(&state, Some(TeamSide::Team2));
        assert_eq!(result.winner, Some(TeamSide::Team1));
        assert_eq!(knockouts_from_rounds(&result), (0, 6));
        assert_eq!(result.team2.defeated_count, 6);

        let summary = summarize(&result);
        assert_eq!(summary.team1_name, "Team a");
        assert_eq!(summary.total_rounds, 6);
        assert_eq!(summary.winner, Some(TeamSide::Team1));
    }

    #[test]
    fn result_serializes_with_iso_timestamp() {
        let state = initialize_battle(&team("a"), &team("b")).unwrap();
        let json = serde_json::to_value(compose_result(&state, None)).unwrap();
        let created_at = json["created_at"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
        assert_eq!(json["total_rounds"], 0);
    }
}
