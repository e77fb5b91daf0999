//! Fixed battles used as regression anchors.

use battle_core::{BarStyle, Battle, BattleError, Enemy, FighterId, Hero, Rules, Weapon};
use serde_json::json;

pub const BAR_LENGTH: usize = 20;

/// Weapons the fixtures fight with. Kept outside the battles so fighters can
/// borrow them.
pub struct Armory {
    pub club: Weapon,
    pub sword: Weapon,
    pub axe: Weapon,
}

impl Default for Armory {
    fn default() -> Self {
        Self {
            club: Weapon::new("Club", 5),
            sword: Weapon::new("Sword", 20),
            axe: Weapon::new("Axe", 15),
        }
    }
}

pub fn plain_style() -> BarStyle {
    BarStyle {
        colored: false,
        ..BarStyle::default()
    }
}

/// A hero and one enemy in a fresh battle.
pub struct Duel<'w> {
    pub battle: Battle<'w>,
    pub hero: FighterId,
    pub foe: FighterId,
}

/// Aria (100, fists) against Goblin (30, club).
pub fn aria_vs_goblin(armory: &Armory) -> Result<Duel<'_>, BattleError> {
    let mut battle = Battle::new(Rules::default(), plain_style());
    let hero = battle.add_hero(Hero::new("Aria", 100))?;
    let foe = battle.add_enemy(Enemy::new("Goblin", 30, &armory.club))?;
    Ok(Duel { battle, hero, foe })
}

/// A 10-health hero facing a 15-damage axe.
pub fn fragile_hero(armory: &Armory) -> Result<Duel<'_>, BattleError> {
    let mut battle = Battle::new(Rules::default(), plain_style());
    let hero = battle.add_hero(Hero::new("Aria", 10))?;
    let foe = battle.add_enemy(Enemy::new("Orc", 40, &armory.axe))?;
    Ok(Duel { battle, hero, foe })
}

/// Health of every fighter, keyed by name.
pub fn health_trace(battle: &Battle<'_>) -> serde_json::Value {
    use battle_core::Combatant;

    let fighters: serde_json::Map<String, serde_json::Value> = battle
        .iter()
        .map(|(_, f)| (f.name().to_owned(), json!([f.health(), f.health_max()])))
        .collect();
    serde_json::Value::Object(fighters)
}
