use crate::combat::{BattleManager, TypeChart};
use crate::config::Config;
use crate::monsters::TeamRepository;
use std::sync::Arc;

// Shared application state
pub struct AppState {
    pub config: Config,
    pub team_repository: Arc<TeamRepository>,
    pub type_chart: Arc<TypeChart>,
    pub battle_manager: Arc<BattleManager>,
}

impl AppState {
    pub fn new(config: Config, team_repository: Arc<TeamRepository>, type_chart: Arc<TypeChart>) -> Arc<Self> {
        let battle_manager = Arc::new(BattleManager::new(
            team_repository.clone(),
            type_chart.clone(),
            config.battle.clone(),
        ));

        Arc::new(AppState {
            config,
            team_repository,
            type_chart,
            battle_manager,
        })
    }

    /// Load teams and the type chart from the paths in `config`
    pub fn from_config(config: Config) -> Arc<Self> {
        let team_repository = TeamRepository::new(&config.roster.teams_path);
        let type_chart = TypeChart::load(&config.roster.type_chart_path);
        Self::new(config, team_repository, type_chart)
    }
}
