use std::fmt;

use serde::{Deserialize, Serialize};

/// Something that happened during a battle, in the order it happened.
///
/// The [`Display`](fmt::Display) form is the line printed to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BattleEvent {
    Attack {
        attacker: String,
        target: String,
        weapon: String,
        damage: i32,
        target_health: i32,
    },
    Equip {
        hero: String,
        weapon: String,
    },
    Drop {
        hero: String,
        weapon: String,
    },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::Attack {
                attacker,
                target,
                weapon,
                damage,
                ..
            } => write!(
                f,
                "{attacker} attacks {target} with {weapon} for {damage} damage."
            ),
            BattleEvent::Equip { hero, weapon } => write!(f, "{hero} equipped {weapon}!"),
            BattleEvent::Drop { hero, weapon } => write!(f, "{hero} dropped {weapon}."),
        }
    }
}
