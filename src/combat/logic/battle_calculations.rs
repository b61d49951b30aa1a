use rand::Rng;

use crate::combat::state::BattlePokemon;

/// Bounds of the random damage roll, lower inclusive, upper exclusive
pub const MIN_RANDOM_FACTOR: f64 = 0.85;
pub const MAX_RANDOM_FACTOR: f64 = 1.15;

/// Calculate the damage of one hit.
///
/// Damage = floor(power * effectiveness * roll) with the roll drawn uniformly
/// from [0.85, 1.15). A hit always deals at least 1.
pub fn calculate_damage<R: Rng>(attacker_power: u32, type_effectiveness: f32, rng: &mut R) -> u32 {
    let random_factor = rng.gen_range(MIN_RANDOM_FACTOR..MAX_RANDOM_FACTOR);
    damage_for_roll(attacker_power, type_effectiveness, random_factor)
}

/// Deterministic half of `calculate_damage`, for a known roll
pub fn damage_for_roll(attacker_power: u32, type_effectiveness: f32, random_factor: f64) -> u32 {
    let raw = (attacker_power as f64 * type_effectiveness as f64 * random_factor).floor();
    // NaN and negatives saturate to 0 here
    (raw as u32).max(1)
}

/// Return a copy of `pokemon` after taking `damage`
pub fn apply_damage(pokemon: &BattlePokemon, damage: u32) -> BattlePokemon {
    let current_life = pokemon.current_life.saturating_sub(damage);
    BattlePokemon {
        current_life,
        is_defeated: current_life == 0,
        total_damage_taken: pokemon.total_damage_taken.saturating_add(damage),
        ..pokemon.clone()
    }
}

/// Remaining life as a rounded percentage of max life
pub fn health_percentage(pokemon: &BattlePokemon) -> u32 {
    if pokemon.max_life == 0 {
        return 0;
    }
    (pokemon.current_life as f64 / pokemon.max_life as f64 * 100.0).round() as u32
}

pub fn effectiveness_message(factor: f32) -> &'static str {
    if factor >= 2.0 {
        "Super effective!"
    } else if factor >= 1.5 {
        "It's effective!"
    } else if factor <= 0.25 {
        "It barely affected the opponent!"
    } else if factor <= 0.5 {
        "Not very effective..."
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monsters::PokemonType;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn bulbasaur() -> BattlePokemon {
        BattlePokemon {
            id: "pokemon-1".to_string(),
            name: "Bulbasaur".to_string(),
            image: "https://example.com/1.png".to_string(),
            pokemon_type: PokemonType::Grass,
            power: 49,
            max_life: 45,
            current_life: 45,
            is_defeated: false,
            total_damage_dealt: 0,
            total_damage_taken: 0,
        }
    }

    #[test]
    fn damage_stays_inside_roll_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let damage = calculate_damage(80, 2.0, &mut rng);
            assert!((136..=184).contains(&damage), "damage {} out of range", damage);
        }
    }

    #[test]
    fn roll_bounds_hit_the_exact_extremes() {
        assert_eq!(damage_for_roll(80, 2.0, MIN_RANDOM_FACTOR), 136);
        assert_eq!(damage_for_roll(80, 2.0, 1.149_999), 183);
    }

    #[test]
    fn damage_is_never_below_one() {
        let mut rng = SmallRng::seed_from_u64(11);
        for power in [0, 1, 10] {
            for effectiveness in [0.0, 0.01, 0.5, -1.0, f32::NAN] {
                assert!(calculate_damage(power, effectiveness, &mut rng) >= 1);
            }
        }
    }

    #[test]
    fn roll_is_floored() {
        assert_eq!(damage_for_roll(50, 1.0, 1.0), 50);
        assert_eq!(damage_for_roll(50, 0.5, 0.9), 22);
        assert_eq!(damage_for_roll(10, 2.0, 1.149), 22);
    }

    #[test]
    fn apply_damage_clamps_at_zero_and_flags_defeat() {
        let hit = apply_damage(&bulbasaur(), 20);
        assert_eq!(hit.current_life, 25);
        assert!(!hit.is_defeated);

        let finished = apply_damage(&hit, 500);
        assert_eq!(finished.current_life, 0);
        assert!(finished.is_defeated);
        assert_eq!(finished.total_damage_taken, 520);
    }

    #[test]
    fn apply_damage_leaves_input_untouched() {
        let before = bulbasaur();
        let _ = apply_damage(&before, 45);
        assert_eq!(before.current_life, 45);
        assert!(!before.is_defeated);
    }

    #[test]
    fn health_and_messages() {
        let mut mon = bulbasaur();
        mon.current_life = 15;
        assert_eq!(health_percentage(&mon), 33);
        assert_eq!(effectiveness_message(2.0), "Super effective!");
        assert_eq!(effectiveness_message(1.5), "It's effective!");
        assert_eq!(effectiveness_message(1.0), "");
        assert_eq!(effectiveness_message(0.5), "Not very effective...");
        assert_eq!(effectiveness_message(0.25), "It barely affected the opponent!");
    }
}
