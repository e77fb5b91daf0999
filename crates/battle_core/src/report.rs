use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::battle::{Battle, Fighter};
use crate::character::Combatant;
use crate::config::Role;
use crate::event::BattleEvent;
use crate::health_bar::RenderedBar;

/// Everything a scenario run produced, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub id: String,
    pub timestamp: String,
    pub entries: Vec<TranscriptEntry>,
    pub fighters: Vec<FighterSummary>,
}

impl Transcript {
    pub fn new(id: impl Into<String>, entries: Vec<TranscriptEntry>, battle: &Battle<'_>) -> Self {
        Self {
            id: id.into(),
            timestamp: Utc::now().to_rfc3339(),
            entries,
            fighters: battle
                .iter()
                .map(|(_, fighter)| FighterSummary::from(fighter))
                .collect(),
        }
    }

    /// The text a player would have seen, one element per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in &self.entries {
            match entry {
                TranscriptEntry::Event(event) => lines.push(event.to_string()),
                TranscriptEntry::Render { rendered, .. } => {
                    lines.extend(rendered.lines().map(str::to_owned));
                }
            }
        }
        lines
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn events(&self) -> impl Iterator<Item = &BattleEvent> {
        self.entries.iter().filter_map(|entry| match entry {
            TranscriptEntry::Event(event) => Some(event),
            TranscriptEntry::Render { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum TranscriptEntry {
    Event(BattleEvent),
    Render {
        fighter: String,
        rendered: RenderedBar,
    },
}

/// Final state of one fighter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterSummary {
    pub name: String,
    pub role: String,
    pub health: i32,
    pub health_max: i32,
    pub weapon: String,
}

impl From<&Fighter<'_>> for FighterSummary {
    fn from(fighter: &Fighter<'_>) -> Self {
        let role = match fighter.as_hero() {
            Some(_) => Role::Hero,
            None => Role::Enemy,
        };
        Self {
            name: fighter.name().to_owned(),
            role: role.as_str().to_owned(),
            health: fighter.health(),
            health_max: fighter.health_max(),
            weapon: fighter.weapon().name().to_owned(),
        }
    }
}
