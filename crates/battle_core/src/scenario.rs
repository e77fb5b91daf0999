//! Replays a scripted [`ScenarioConfig`] against a fresh [`Battle`].
//!
//! Actions run strictly in file order. The runner never decides who acts.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::battle::{Battle, FighterId};
use crate::character::{Enemy, Hero};
use crate::config::{ActionConfig, Role, ScenarioConfig};
use crate::error::{BattleError, ScenarioError};
use crate::health_bar::Color;
use crate::report::{Transcript, TranscriptEntry};
use crate::weapon::FISTS;

pub struct RunOptions {
    pub run_id: String,
    /// Overrides `health_bar.colored` from the scenario when set.
    pub colored: Option<bool>,
}

impl RunOptions {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            colored: None,
        }
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = Some(colored);
        self
    }
}

/// Builds the battle described by `config` without running any action.
pub fn build_battle(config: &ScenarioConfig) -> Result<Battle<'_>, ScenarioError> {
    let mut battle = Battle::new(config.rules, config.health_bar);
    for fighter in &config.fighters {
        let color = fighter.color.as_deref().map(Color::from_name);
        match fighter.role {
            Role::Hero => {
                let weapon = match &fighter.weapon {
                    Some(name) => config.weapon(name)?,
                    None => &FISTS,
                };
                let hero = Hero::with_weapon(fighter.name.clone(), fighter.health, weapon);
                battle.add(hero, color)?;
            }
            Role::Enemy => {
                let name = fighter
                    .weapon
                    .as_deref()
                    .ok_or_else(|| ScenarioError::EnemyWithoutWeapon(fighter.name.clone()))?;
                let enemy = Enemy::new(fighter.name.clone(), fighter.health, config.weapon(name)?);
                battle.add(enemy, color)?;
            }
        }
    }
    Ok(battle)
}

/// Runs every action and collects the output.
pub fn run_scenario(
    config: &ScenarioConfig,
    options: &RunOptions,
) -> Result<Transcript, ScenarioError> {
    let mut battle = build_battle(config)?;
    if let Some(colored) = options.colored {
        battle.set_colored(colored);
    }

    let ids: HashMap<&str, FighterId> = config
        .fighters
        .iter()
        .enumerate()
        .map(|(index, fighter)| (fighter.name.as_str(), FighterId::new(index)))
        .collect();
    let id = |name: &str| {
        ids.get(name)
            .copied()
            .ok_or_else(|| ScenarioError::UnknownFighter(name.to_owned()))
    };

    info!(
        target: "battle_core.scenario",
        run_id = %options.run_id,
        fighters = battle.len(),
        actions = config.actions.len(),
        "scenario started"
    );

    let mut entries = Vec::new();
    for (index, action) in config.actions.iter().enumerate() {
        debug!(target: "battle_core.scenario", index, ?action, "running action");
        let at = |source: BattleError| ScenarioError::Action { index, source };
        match action {
            ActionConfig::Attack { attacker, target } => {
                let event = battle
                    .attack(id(attacker.as_str())?, id(target.as_str())?)
                    .map_err(at)?;
                entries.push(TranscriptEntry::Event(event));
            }
            ActionConfig::Equip { hero, weapon } => {
                let event = battle
                    .equip(id(hero.as_str())?, config.weapon(weapon)?)
                    .map_err(at)?;
                entries.push(TranscriptEntry::Event(event));
            }
            ActionConfig::Drop { hero } => {
                let event = battle.drop_weapon(id(hero.as_str())?).map_err(at)?;
                entries.push(TranscriptEntry::Event(event));
            }
            ActionConfig::Update { fighter } => {
                battle.update_bar(id(fighter.as_str())?).map_err(at)?;
            }
            ActionConfig::Draw { fighter } => {
                let rendered = battle.draw(id(fighter.as_str())?).map_err(at)?;
                entries.push(TranscriptEntry::Render {
                    fighter: fighter.clone(),
                    rendered,
                });
            }
        }
    }

    info!(target: "battle_core.scenario", run_id = %options.run_id, entries = entries.len(), "scenario finished");
    Ok(Transcript::new(options.run_id.clone(), entries, &battle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUEL: &str = r#"
[health_bar]
colored = false

[[weapons]]
name = "Club"
damage = 5

[[weapons]]
name = "Sword"
damage = 20

[[fighters]]
name = "Aria"
health = 100
role = "hero"

[[fighters]]
name = "Goblin"
health = 30
role = "enemy"
weapon = "Club"

[[actions]]
kind = "attack"
attacker = "Aria"
target = "Goblin"

[[actions]]
kind = "draw"
fighter = "Goblin"

[[actions]]
kind = "equip"
hero = "Aria"
weapon = "Sword"

[[actions]]
kind = "attack"
attacker = "Aria"
target = "Goblin"

[[actions]]
kind = "drop"
hero = "Aria"
"#;

    #[test]
    fn duel_produces_expected_lines() {
        let config = ScenarioConfig::from_toml(DUEL).unwrap();
        let transcript = run_scenario(&config, &RunOptions::new("duel")).unwrap();

        assert_eq!(
            vec![
                "Aria attacks Goblin with Fists for 5 damage.".to_string(),
                "Goblin's Health: 25/30".to_string(),
                format!("│{}{}│", "█".repeat(17), "░".repeat(3)),
                "Aria equipped Sword!".to_string(),
                "Aria attacks Goblin with Sword for 20 damage.".to_string(),
                "Aria dropped Sword.".to_string(),
            ],
            transcript.lines()
        );
        assert_eq!(4, transcript.events().count());

        let goblin = &transcript.fighters[1];
        assert_eq!(5, goblin.health);
        assert_eq!("enemy", goblin.role);
        assert_eq!("Fists", transcript.fighters[0].weapon);
    }

    #[test]
    fn colored_option_overrides_scenario() {
        let config = ScenarioConfig::from_toml(DUEL).unwrap();
        let transcript = run_scenario(&config, &RunOptions::new("duel").colored(true)).unwrap();
        let bar = &transcript.lines()[2];
        assert!(bar.starts_with("│\x1b[91m"));
        assert!(bar.ends_with("\x1b[0m│"));
    }

    #[test]
    fn failing_action_reports_its_index() {
        let strict = format!(
            "[rules]\ndefeated_can_be_targeted = false\n{}\n{}",
            DUEL.replace("health = 30", "health = 5"),
            "[[actions]]\nkind = \"attack\"\nattacker = \"Aria\"\ntarget = \"Goblin\"\n"
        );
        let config = ScenarioConfig::from_toml(&strict).unwrap();
        let err = run_scenario(&config, &RunOptions::new("strict")).unwrap_err();

        assert!(matches!(
            err,
            ScenarioError::Action {
                index: 3,
                source: BattleError::DefeatedTarget { .. }
            }
        ));
    }

    #[test]
    fn hero_can_start_with_a_declared_weapon() {
        let config = ScenarioConfig::from_toml(
            &DUEL.replace("role = \"hero\"", "role = \"hero\"\nweapon = \"Club\""),
        )
        .unwrap();
        let battle = build_battle(&config).unwrap();
        let aria = battle.fighter(FighterId::new(0)).unwrap();
        assert_eq!("Club", crate::Combatant::weapon(aria).name());
        assert!(aria.as_hero().is_some());
    }
}
