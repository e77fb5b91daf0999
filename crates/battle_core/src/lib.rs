//! Turn-driven text battles: weapons, fighters, and the health bars that
//! show how they are holding up.

pub mod battle;
pub mod character;
pub mod config;
pub mod error;
pub mod event;
pub mod health_bar;
pub mod report;
pub mod scenario;
pub mod weapon;

pub use battle::{Battle, Fighter, FighterId};
pub use character::{attack, Combatant, Enemy, Hero, Stats};
pub use config::{ActionConfig, FighterConfig, Role, Rules, ScenarioConfig};
pub use error::{BattleError, ScenarioError};
pub use event::BattleEvent;
pub use health_bar::{BarStyle, Color, HealthBar, RenderedBar};
pub use report::{FighterSummary, Transcript, TranscriptEntry};
pub use scenario::{build_battle, run_scenario, RunOptions};
pub use weapon::{Weapon, FISTS};
