use thiserror::Error;

use crate::battle::FighterId;

/// Failures of a single battle operation. Nothing is changed when one is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("no fighter with id {0} in this battle")]
    InvalidTarget(FighterId),
    #[error("{name} has max health {health_max}; a health bar needs a positive maximum")]
    ZeroMaxHealth { name: String, health_max: i32 },
    #[error("{name} is at zero health and may not attack")]
    DefeatedAttacker { name: String },
    #[error("{name} is at zero health and may not be attacked")]
    DefeatedTarget { name: String },
    #[error("{name} is not a hero and cannot change weapons")]
    NotAHero { name: String },
}

/// Problems found while building or replaying a scripted scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("unknown fighter `{0}`")]
    UnknownFighter(String),
    #[error("unknown weapon `{0}`")]
    UnknownWeapon(String),
    #[error("enemy `{0}` needs a weapon")]
    EnemyWithoutWeapon(String),
    #[error("duplicate {kind} name `{name}`")]
    Duplicate { kind: &'static str, name: String },
    #[error("action {index} failed: {source}")]
    Action {
        index: usize,
        #[source]
        source: BattleError,
    },
    #[error(transparent)]
    Battle(#[from] BattleError),
}
