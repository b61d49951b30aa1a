use std::cmp::Ordering;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::combat::state::{
    BattlePokemon, BattleRound, BattleState, BattleTeam, RoundSide, RoundWinner, TeamSide,
};
use crate::combat::type_chart::{TypeEffectiveness, NEUTRAL};
use crate::errors::BattleError;
use crate::monsters::{PokemonType, Team, TEAM_SIZE};

use super::battle_calculations::{apply_damage, calculate_damage};

/// Hard limit on the number of rounds a simulation may run
pub const DEFAULT_MAX_ROUNDS: u32 = 50;

#[derive(Debug, Clone, Copy)]
pub struct SimulationOptions {
    pub max_rounds: u32,
    pub round_delay: Duration,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        SimulationOptions {
            max_rounds: DEFAULT_MAX_ROUNDS,
            round_delay: Duration::ZERO,
        }
    }
}

/// Check that a team can enter a battle
pub fn validate_team(team: &Team) -> Result<(), BattleError> {
    if team.members.is_empty() {
        return Err(BattleError::validation(&team.name, "team has no Pokemon"));
    }
    if team.members.len() != TEAM_SIZE {
        return Err(BattleError::validation(
            &team.name,
            format!("must have exactly {} Pokemon, found {}", TEAM_SIZE, team.members.len()),
        ));
    }
    for (position, pokemon) in team.members.iter().enumerate() {
        if let Some(issue) = pokemon.validation_issue() {
            return Err(BattleError::validation(
                &team.name,
                format!("member {} is malformed: {}", position + 1, issue),
            ));
        }
    }
    Ok(())
}

/// Full precondition check for a battle between two teams
pub fn can_start_battle(team1: &Team, team2: &Team) -> Result<(), BattleError> {
    if team1.id == team2.id {
        return Err(BattleError::SameTeam);
    }
    validate_team(team1)?;
    validate_team(team2)
}

pub fn initialize_battle(team1: &Team, team2: &Team) -> Result<BattleState, BattleError> {
    validate_team(team1)?;
    validate_team(team2)?;
    Ok(BattleState::new(team1, team2))
}

/// The team's current fighter, or `None` once the team has nobody left
pub fn get_active_pokemon(team: &BattleTeam) -> Option<&BattlePokemon> {
    team.pokemon
        .get(team.current_pokemon_index)
        .filter(|pokemon| !pokemon.is_defeated)
}

/// Move the team on to its next fighter after a knockout
pub fn switch_to_next_pokemon(team: &BattleTeam) -> BattleTeam {
    let roster_len = team.pokemon.len();
    let mut next_index = team.current_pokemon_index + 1;
    while next_index < roster_len && team.pokemon[next_index].is_defeated {
        next_index += 1;
    }

    let is_defeated = next_index >= roster_len;
    BattleTeam {
        // a wiped team keeps pointing at its last slot
        current_pokemon_index: if is_defeated { roster_len.saturating_sub(1) } else { next_index },
        defeated_count: team.pokemon.iter().filter(|p| p.is_defeated).count(),
        is_defeated,
        ..team.clone()
    }
}

/// Battle winner from both team flags, `None` while both are still standing
pub fn decide_winner(team1: &BattleTeam, team2: &BattleTeam) -> Option<TeamSide> {
    match (team1.is_defeated, team2.is_defeated) {
        (true, true) => {
            if team1.defeated_count < team2.defeated_count {
                Some(TeamSide::Team1)
            } else {
                Some(TeamSide::Team2)
            }
        }
        (true, false) => Some(TeamSide::Team2),
        (false, true) => Some(TeamSide::Team1),
        (false, false) => None,
    }
}

pub fn round_winner(pokemon1: &BattlePokemon, pokemon2: &BattlePokemon, damage1: u32, damage2: u32) -> RoundWinner {
    match (pokemon1.is_defeated, pokemon2.is_defeated) {
        (true, true) => RoundWinner::Draw,
        (true, false) => RoundWinner::Pokemon2,
        (false, true) => RoundWinner::Pokemon1,
        (false, false) => match damage1.cmp(&damage2) {
            Ordering::Greater => RoundWinner::Pokemon1,
            Ordering::Less => RoundWinner::Pokemon2,
            Ordering::Equal => RoundWinner::Draw,
        },
    }
}

/// Mark the battle finished without fighting another round
fn conclude(state: &BattleState) -> BattleState {
    let mut next = state.clone();
    next.is_complete = true;
    if next.winner.is_none() {
        next.winner = decide_winner(&next.team1, &next.team2);
    }
    next.battle_duration = state.elapsed_ms();
    next
}

/// Roll both attacks of a round and resolve it
pub fn execute_round<R: Rng>(
    state: &BattleState,
    effectiveness1: f32,
    effectiveness2: f32,
    rng: &mut R,
) -> BattleState {
    let (Some(pokemon1), Some(pokemon2)) = (get_active_pokemon(&state.team1), get_active_pokemon(&state.team2)) else {
        return conclude(state);
    };
    let damage1 = calculate_damage(pokemon1.power, effectiveness1, rng);
    let damage2 = calculate_damage(pokemon2.power, effectiveness2, rng);
    resolve_round(state, damage1, damage2, effectiveness1, effectiveness2)
}

/// Apply an already rolled exchange: `damage1` is dealt by team1's fighter,
/// `damage2` by team2's. Both hits land even if one of them knocks out.
pub fn resolve_round(
    state: &BattleState,
    damage1: u32,
    damage2: u32,
    effectiveness1: f32,
    effectiveness2: f32,
) -> BattleState {
    let (Some(pokemon1), Some(pokemon2)) = (get_active_pokemon(&state.team1), get_active_pokemon(&state.team2)) else {
        return conclude(state);
    };

    let mut updated1 = apply_damage(pokemon1, damage2);
    updated1.total_damage_dealt = updated1.total_damage_dealt.saturating_add(damage1);
    let mut updated2 = apply_damage(pokemon2, damage1);
    updated2.total_damage_dealt = updated2.total_damage_dealt.saturating_add(damage2);

    let mut next = state.clone();
    let index1 = next.team1.current_pokemon_index;
    let index2 = next.team2.current_pokemon_index;
    next.team1.pokemon[index1] = updated1.clone();
    next.team2.pokemon[index2] = updated2.clone();

    if updated1.is_defeated {
        next.team1 = switch_to_next_pokemon(&next.team1);
    }
    if updated2.is_defeated {
        next.team2 = switch_to_next_pokemon(&next.team2);
    }

    let mut defeated = Vec::new();
    if updated1.is_defeated {
        defeated.push(RoundSide::Pokemon1);
    }
    if updated2.is_defeated {
        defeated.push(RoundSide::Pokemon2);
    }

    next.rounds.push(BattleRound {
        round_number: state.current_round,
        pokemon1: updated1.round_view(),
        pokemon2: updated2.round_view(),
        damage1,
        damage2,
        type_effectiveness1: effectiveness1,
        type_effectiveness2: effectiveness2,
        winner: round_winner(&updated1, &updated2, damage1, damage2),
        defeated,
    });
    next.current_round += 1;

    next.winner = decide_winner(&next.team1, &next.team2);
    next.is_complete = next.winner.is_some();
    next.battle_duration = state.elapsed_ms();
    next
}

async fn lookup(
    resolver: &dyn TypeEffectiveness,
    attacker: PokemonType,
    defender: PokemonType,
) -> Result<f32, BattleError> {
    resolver
        .effectiveness(attacker, defender)
        .await
        .map_err(|source| BattleError::LookupFailure { attacker, defender, source })
}

/// Run rounds until one side is wiped out or the round cap is reached.
///
/// An undecided battle comes back with `is_complete == false` and no winner.
pub async fn simulate_complete_battle<R: Rng + Send>(
    team1: &Team,
    team2: &Team,
    resolver: &dyn TypeEffectiveness,
    options: SimulationOptions,
    rng: &mut R,
) -> Result<BattleState, BattleError> {
    let mut state = initialize_battle(team1, team2)?;

    while !state.is_complete && state.current_round <= options.max_rounds {
        let active_types = match (get_active_pokemon(&state.team1), get_active_pokemon(&state.team2)) {
            (Some(p1), Some(p2)) => Some((p1.pokemon_type, p2.pokemon_type)),
            _ => None,
        };
        let Some((type1, type2)) = active_types else {
            state = execute_round(&state, NEUTRAL, NEUTRAL, rng);
            break;
        };

        let (effectiveness1, effectiveness2) = futures_util::future::try_join(
            lookup(resolver, type1, type2),
            lookup(resolver, type2, type1),
        )
        .await?;

        state = execute_round(&state, effectiveness1, effectiveness2, rng);
        if let Some(round) = state.rounds.last() {
            debug!(
                "Battle {} round {}: {} dealt {}, {} dealt {}, winner {:?}",
                state.battle_id,
                round.round_number,
                round.pokemon1.name,
                round.damage1,
                round.pokemon2.name,
                round.damage2,
                round.winner
            );
        }

        if !state.is_complete && !options.round_delay.is_zero() {
            tokio::time::sleep(options.round_delay).await;
        }
    }

    if !state.is_complete {
        warn!(
            "Battle {} undecided after {} rounds",
            state.battle_id,
            state.rounds.len()
        );
    }
    state.battle_duration = state.elapsed_ms();
    Ok(state)
}
