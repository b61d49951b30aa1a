use crate::combat::messages::BattlePrediction;
use crate::monsters::Team;

/// Guess the favorite from total team power; ties favor team2
pub fn predict_outcome(team1: &Team, team2: &Team) -> BattlePrediction {
    let power1 = team1.total_power();
    let power2 = team2.total_power();
    let power_difference = power1.abs_diff(power2);
    let (favorite, underdog) = if power1 > power2 { (team1, team2) } else { (team2, team1) };

    let confidence = if power_difference > 100 {
        "Strong favorite"
    } else if power_difference > 50 {
        "Slight favorite"
    } else {
        "Even match"
    };

    BattlePrediction {
        favorite_team_id: favorite.id.clone(),
        underdog_team_id: underdog.id.clone(),
        power_difference,
        confidence: confidence.to_string(),
    }
}

/// Human readable duration, e.g. "42s" or "3m 5s"
pub fn format_battle_duration(milliseconds: u64) -> String {
    let seconds = milliseconds / 1000;
    if seconds < 60 {
        return format!("{}s", seconds);
    }
    format!("{}m {}s", seconds / 60, seconds % 60)
}
