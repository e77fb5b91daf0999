//! Snapshot-based text health bars.
//!
//! A bar remembers the health it saw at the last [`HealthBar::update`] and
//! renders from that snapshot only. Callers that want fresh numbers must
//! update before drawing.

use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::battle::FighterId;
use crate::character::Combatant;
use crate::error::BattleError;

pub const SYMBOL_REMAINING: char = '█';
pub const SYMBOL_LOST: char = '░';
pub const BARRIER: char = '│';
pub const DEFAULT_LENGTH: usize = 20;

/// Fixed terminal palette for bar colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Purple,
    Blue,
    Blue2,
    Blue3,
    Green,
    Green2,
    Yellow,
    Gray,
    #[default]
    Default,
}

impl Color {
    /// Resolves a palette name. Anything unknown maps to [`Color::Default`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "red" => Color::Red,
            "purple" => Color::Purple,
            "blue" => Color::Blue,
            "blue2" => Color::Blue2,
            "blue3" => Color::Blue3,
            "green" => Color::Green,
            "green2" => Color::Green2,
            "yellow" => Color::Yellow,
            "gray" => Color::Gray,
            _ => Color::Default,
        }
    }

    pub fn ansi(self) -> &'static str {
        match self {
            Color::Red => "\x1b[91m",
            Color::Purple => "\x1b[95m",
            Color::Blue | Color::Blue3 => "\x1b[94m",
            Color::Blue2 => "\x1b[96m",
            Color::Green | Color::Green2 => "\x1b[92m",
            Color::Yellow => "\x1b[93m",
            Color::Gray => "\x1b[90m",
            Color::Default => "\x1b[0m",
        }
    }
}

/// How a bar looks, independent of whose health it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarStyle {
    pub length: NonZeroUsize,
    pub colored: bool,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            length: NonZeroUsize::new(DEFAULT_LENGTH).unwrap_or(NonZeroUsize::MIN),
            colored: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthBar {
    entity: FighterId,
    length: NonZeroUsize,
    max_value: i32,
    current_value: i32,
    is_colored: bool,
    color: Color,
}

impl HealthBar {
    /// Snapshots `combatant`'s health. Its `health_max` must be positive.
    pub fn new<'w, C>(
        entity: FighterId,
        combatant: &C,
        style: BarStyle,
        color: Color,
    ) -> Result<Self, BattleError>
    where
        C: Combatant<'w> + ?Sized,
    {
        ensure_positive_max(combatant)?;
        Ok(Self {
            entity,
            length: style.length,
            max_value: combatant.health_max(),
            current_value: combatant.health(),
            is_colored: style.colored,
            color,
        })
    }

    pub fn entity(&self) -> FighterId {
        self.entity
    }

    pub fn length(&self) -> usize {
        self.length.get()
    }

    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    pub fn current_value(&self) -> i32 {
        self.current_value
    }

    pub fn is_colored(&self) -> bool {
        self.is_colored
    }

    pub fn set_colored(&mut self, colored: bool) {
        self.is_colored = colored;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Re-reads the observed entity's health into the snapshot.
    pub fn update<'w, C>(&mut self, combatant: &C) -> Result<(), BattleError>
    where
        C: Combatant<'w> + ?Sized,
    {
        ensure_positive_max(combatant)?;
        self.current_value = combatant.health();
        debug!(
            target: "battle_core.health_bar",
            entity = self.entity.index(),
            current = self.current_value,
            max = self.max_value,
            "health bar updated"
        );
        Ok(())
    }

    /// Filled glyph count, rounded half away from zero.
    pub fn remaining_glyphs(&self) -> usize {
        // max_value is positive; u128 holds 2 * i32::MAX * usize::MAX.
        let max = u128::from(self.max_value.unsigned_abs());
        let current = u128::from(self.current_value.clamp(0, self.max_value).unsigned_abs());
        let length = self.length.get() as u128;
        let remaining = (2 * current * length + max) / (2 * max);
        usize::try_from(remaining).unwrap_or(self.length.get())
    }

    pub fn lost_glyphs(&self) -> usize {
        self.length.get() - self.remaining_glyphs()
    }

    /// Renders the snapshot under `name`. Nothing is printed.
    pub fn draw(&self, name: &str) -> RenderedBar {
        let remaining = self.remaining_glyphs();
        let lost = self.length.get() - remaining;

        let mut bar = String::new();
        bar.push(BARRIER);
        if self.is_colored {
            bar.push_str(self.color.ansi());
        }
        bar.extend(std::iter::repeat(SYMBOL_REMAINING).take(remaining));
        bar.extend(std::iter::repeat(SYMBOL_LOST).take(lost));
        if self.is_colored {
            bar.push_str(Color::Default.ansi());
        }
        bar.push(BARRIER);

        RenderedBar {
            caption: format!(
                "{name}'s Health: {}/{}",
                self.current_value, self.max_value
            ),
            bar,
        }
    }
}

fn ensure_positive_max<'w, C>(combatant: &C) -> Result<(), BattleError>
where
    C: Combatant<'w> + ?Sized,
{
    if combatant.health_max() <= 0 {
        return Err(BattleError::ZeroMaxHealth {
            name: combatant.name().to_owned(),
            health_max: combatant.health_max(),
        });
    }
    Ok(())
}

/// The two output lines of a drawn bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedBar {
    pub caption: String,
    pub bar: String,
}

impl RenderedBar {
    pub fn lines(&self) -> [&str; 2] {
        [&self.caption, &self.bar]
    }
}

impl fmt::Display for RenderedBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.caption, self.bar)
    }
}
