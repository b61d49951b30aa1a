use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::monsters::PokemonType;

/// Factor used for any pair the chart does not list
pub const NEUTRAL: f32 = 1.0;

/// Resolves the damage multiplier of an attacker type against a defender type.
///
/// Implementations may suspend (e.g. a database round-trip). An `Err` aborts
/// the battle that requested it.
#[async_trait]
pub trait TypeEffectiveness: Send + Sync {
    async fn effectiveness(&self, attacker: PokemonType, defender: PokemonType) -> anyhow::Result<f32>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeChartEntry {
    pub attacker_type: PokemonType,
    pub defender_type: PokemonType,
    pub factor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeChartFile {
    pub entries: Vec<TypeChartEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeChart {
    chart: HashMap<PokemonType, HashMap<PokemonType, f32>>,
}

impl Default for TypeChart {
    /// Fire beats Grass, Grass beats Water, Water beats Fire
    fn default() -> Self {
        use PokemonType::*;

        let mut chart = TypeChart::empty();
        chart.insert(Fire, Fire, 1.0);
        chart.insert(Fire, Water, 0.5);
        chart.insert(Fire, Grass, 2.0);
        chart.insert(Water, Fire, 2.0);
        chart.insert(Water, Water, 1.0);
        chart.insert(Water, Grass, 0.5);
        chart.insert(Grass, Fire, 0.5);
        chart.insert(Grass, Water, 2.0);
        chart.insert(Grass, Grass, 1.0);
        chart
    }
}

impl TypeChart {
    pub fn empty() -> Self {
        TypeChart { chart: HashMap::new() }
    }

    pub fn from_entries(entries: &[TypeChartEntry]) -> Self {
        let mut chart = TypeChart::empty();
        for entry in entries {
            chart.insert(entry.attacker_type, entry.defender_type, entry.factor);
        }
        chart
    }

    /// Load the chart from a JSON file, keeping the built-in chart if that fails
    pub fn load(path: &str) -> Arc<Self> {
        let chart = match File::open(Path::new(path)) {
            Ok(file) => {
                let reader = BufReader::new(file);
                match serde_json::from_reader::<_, TypeChartFile>(reader) {
                    Ok(parsed) => TypeChart::from_entries(&parsed.entries),
                    Err(e) => {
                        warn!("Failed to parse type chart JSON {}: {}, using built-in chart", path, e);
                        TypeChart::default()
                    }
                }
            }
            Err(e) => {
                warn!("Failed to open type chart file {}: {}, using built-in chart", path, e);
                TypeChart::default()
            }
        };
        info!("Loaded {} type chart entries", chart.len());
        Arc::new(chart)
    }

    pub fn insert(&mut self, attacker: PokemonType, defender: PokemonType, factor: f32) {
        self.chart.entry(attacker).or_default().insert(defender, factor);
    }

    pub fn factor(&self, attacker: PokemonType, defender: PokemonType) -> f32 {
        self.chart
            .get(&attacker)
            .and_then(|row| row.get(&defender))
            .copied()
            .unwrap_or(NEUTRAL)
    }

    pub fn len(&self) -> usize {
        self.chart.values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every listed pair, ordered by attacker then defender
    pub fn entries(&self) -> Vec<TypeChartEntry> {
        let mut entries = Vec::with_capacity(self.len());
        for attacker in PokemonType::ALL {
            if let Some(row) = self.chart.get(&attacker) {
                for defender in PokemonType::ALL {
                    if let Some(factor) = row.get(&defender) {
                        entries.push(TypeChartEntry {
                            attacker_type: attacker,
                            defender_type: defender,
                            factor: *factor,
                        });
                    }
                }
            }
        }
        entries
    }
}

#[async_trait]
impl TypeEffectiveness for TypeChart {
    async fn effectiveness(&self, attacker: PokemonType, defender: PokemonType) -> anyhow::Result<f32> {
        Ok(self.factor(attacker, defender))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PokemonType::*;

    #[test]
    fn built_in_match_ups() {
        let chart = TypeChart::default();
        assert_eq!(chart.factor(Fire, Grass), 2.0);
        assert_eq!(chart.factor(Grass, Fire), 0.5);
        assert_eq!(chart.factor(Water, Fire), 2.0);
        assert_eq!(chart.factor(Fire, Water), 0.5);
        assert_eq!(chart.factor(Grass, Water), 2.0);
        assert_eq!(chart.factor(Water, Grass), 0.5);
        for t in PokemonType::ALL {
            assert_eq!(chart.factor(t, t), 1.0);
        }
    }

    #[test]
    fn opposite_match_ups_cancel_out() {
        let chart = TypeChart::default();
        for a in PokemonType::ALL {
            for b in PokemonType::ALL {
                assert_eq!(chart.factor(a, b) * chart.factor(b, a), 1.0, "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn missing_pair_is_neutral() {
        let mut chart = TypeChart::empty();
        chart.insert(Fire, Grass, 2.0);
        assert_eq!(chart.factor(Grass, Fire), NEUTRAL);
        assert_eq!(chart.len(), 1);
    }

    #[test]
    fn bundled_file_matches_built_in_chart() {
        let parsed: TypeChartFile =
            serde_json::from_str(include_str!("../../resources/types.json")).unwrap();
        assert_eq!(TypeChart::from_entries(&parsed.entries), TypeChart::default());
        assert_eq!(TypeChart::default().entries().len(), 9);
    }

    #[tokio::test]
    async fn chart_resolves_asynchronously() {
        let chart = TypeChart::default();
        assert_eq!(chart.effectiveness(Water, Fire).await.unwrap(), 2.0);
    }
}
