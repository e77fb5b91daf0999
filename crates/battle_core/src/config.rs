use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ScenarioError;
use crate::health_bar::BarStyle;
use crate::weapon::{Weapon, FISTS};

/// What a battle allows once somebody reaches zero health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub defeated_can_attack: bool,
    pub defeated_can_be_targeted: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            defeated_can_attack: true,
            defeated_can_be_targeted: true,
        }
    }
}

impl Rules {
    /// Fighters at zero health can neither act nor be hit.
    pub fn strict() -> Self {
        Self {
            defeated_can_attack: false,
            defeated_can_be_targeted: false,
        }
    }
}

/// A scripted battle loaded from TOML.
#[derive(Debug, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub rules: Rules,
    #[serde(default)]
    pub health_bar: BarStyle,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    pub fighters: Vec<FighterConfig>,
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

impl ScenarioConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_toml(&data).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        let cfg: ScenarioConfig = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Looks a weapon up by name. `Fists` always resolves to the shared one.
    pub fn weapon(&self, name: &str) -> Result<&Weapon, ScenarioError> {
        self.weapons
            .iter()
            .find(|w| w.name() == name)
            .or_else(|| (name == FISTS.name()).then_some(&FISTS))
            .ok_or_else(|| ScenarioError::UnknownWeapon(name.to_owned()))
    }

    /// Checks every name the actions refer to before anything runs.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let mut seen = HashSet::new();
        for weapon in &self.weapons {
            if !seen.insert(weapon.name()) {
                return Err(ScenarioError::Duplicate {
                    kind: "weapon",
                    name: weapon.name().to_owned(),
                });
            }
        }

        let mut fighters = HashSet::new();
        for fighter in &self.fighters {
            if !fighters.insert(fighter.name.as_str()) {
                return Err(ScenarioError::Duplicate {
                    kind: "fighter",
                    name: fighter.name.clone(),
                });
            }
            match (&fighter.role, &fighter.weapon) {
                (Role::Enemy, None) => {
                    return Err(ScenarioError::EnemyWithoutWeapon(fighter.name.clone()))
                }
                (_, Some(weapon)) => {
                    self.weapon(weapon)?;
                }
                (Role::Hero, None) => {}
            }
        }

        let known = |name: &str| {
            if fighters.contains(name) {
                Ok(())
            } else {
                Err(ScenarioError::UnknownFighter(name.to_owned()))
            }
        };
        for action in &self.actions {
            match action {
                ActionConfig::Attack { attacker, target } => {
                    known(attacker.as_str())?;
                    known(target.as_str())?;
                }
                ActionConfig::Equip { hero, weapon } => {
                    known(hero.as_str())?;
                    self.weapon(weapon)?;
                }
                ActionConfig::Drop { hero } => known(hero.as_str())?,
                ActionConfig::Update { fighter } | ActionConfig::Draw { fighter } => {
                    known(fighter.as_str())?
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hero,
    Enemy,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hero => "hero",
            Role::Enemy => "enemy",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FighterConfig {
    pub name: String,
    pub health: i32,
    pub role: Role,
    /// Required for enemies; heroes fall back to fists.
    #[serde(default)]
    pub weapon: Option<String>,
    /// Palette name overriding the role's bar color.
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionConfig {
    Attack { attacker: String, target: String },
    Equip { hero: String, weapon: String },
    Drop { hero: String },
    Update { fighter: String },
    Draw { fighter: String },
}
