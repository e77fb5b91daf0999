//! Fighters and the damage rule they share.
//!
//! Heroes and enemies carry the same [`Stats`] and expose them through the
//! [`Combatant`] capability. Attacking is a free function over that trait.

use tracing::info;

use crate::event::BattleEvent;
use crate::health_bar::Color;
use crate::weapon::{Weapon, FISTS};

/// Data every fighter has, regardless of role.
#[derive(Debug, Clone)]
pub struct Stats<'w> {
    name: String,
    health: i32,
    health_max: i32,
    weapon: &'w Weapon,
}

impl<'w> Stats<'w> {
    /// Starts at full health: `health_max` is the starting `health`.
    pub fn new(name: impl Into<String>, health: i32, weapon: &'w Weapon) -> Self {
        Self {
            name: name.into(),
            health,
            health_max: health,
            weapon,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn health_max(&self) -> i32 {
        self.health_max
    }

    pub fn weapon(&self) -> &'w Weapon {
        self.weapon
    }

    /// Applies `damage` and keeps health inside `0..=health_max`.
    fn take_damage(&mut self, damage: i32) {
        let upper = self.health_max.max(0);
        self.health = self.health.saturating_sub(damage).clamp(0, upper);
    }
}

/// The capability set shared by every kind of fighter.
pub trait Combatant<'w> {
    fn stats(&self) -> &Stats<'w>;

    fn stats_mut(&mut self) -> &mut Stats<'w>;

    /// Palette entry used for this fighter's health bar unless overridden.
    fn bar_color(&self) -> Color;

    fn name<'a>(&'a self) -> &'a str
    where
        'w: 'a,
    {
        self.stats().name()
    }

    fn health(&self) -> i32 {
        self.stats().health()
    }

    fn health_max(&self) -> i32 {
        self.stats().health_max()
    }

    fn weapon(&self) -> &'w Weapon {
        self.stats().weapon()
    }

    fn is_defeated(&self) -> bool {
        self.health() <= 0
    }
}

/// Player-controlled fighter that can swap weapons.
#[derive(Debug, Clone)]
pub struct Hero<'w> {
    stats: Stats<'w>,
    default_weapon: &'w Weapon,
}

impl<'w> Hero<'w> {
    /// A hero starting with the shared [`FISTS`].
    pub fn new(name: impl Into<String>, health: i32) -> Self {
        Self::with_weapon(name, health, &FISTS)
    }

    /// A hero whose starting weapon (and drop fallback) is `weapon`.
    pub fn with_weapon(name: impl Into<String>, health: i32, weapon: &'w Weapon) -> Self {
        Self {
            stats: Stats::new(name, health, weapon),
            default_weapon: weapon,
        }
    }

    pub fn default_weapon(&self) -> &'w Weapon {
        self.default_weapon
    }

    pub fn equip(&mut self, weapon: &'w Weapon) -> BattleEvent {
        self.stats.weapon = weapon;
        info!(target: "battle_core.combat", hero = %self.stats.name, weapon = weapon.name(), "weapon equipped");
        BattleEvent::Equip {
            hero: self.stats.name.clone(),
            weapon: weapon.name().to_owned(),
        }
    }

    /// Puts away the current weapon and goes back to the starting one.
    pub fn drop_weapon(&mut self) -> BattleEvent {
        let dropped = self.stats.weapon.name().to_owned();
        self.stats.weapon = self.default_weapon;
        info!(target: "battle_core.combat", hero = %self.stats.name, weapon = %dropped, "weapon dropped");
        BattleEvent::Drop {
            hero: self.stats.name.clone(),
            weapon: dropped,
        }
    }
}

impl<'w> Combatant<'w> for Hero<'w> {
    fn stats(&self) -> &Stats<'w> {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut Stats<'w> {
        &mut self.stats
    }

    fn bar_color(&self) -> Color {
        Color::Green
    }
}

/// Computer-controlled fighter. Its weapon is fixed at construction.
#[derive(Debug, Clone)]
pub struct Enemy<'w> {
    stats: Stats<'w>,
}

impl<'w> Enemy<'w> {
    pub fn new(name: impl Into<String>, health: i32, weapon: &'w Weapon) -> Self {
        Self {
            stats: Stats::new(name, health, weapon),
        }
    }
}

impl<'w> Combatant<'w> for Enemy<'w> {
    fn stats(&self) -> &Stats<'w> {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut Stats<'w> {
        &mut self.stats
    }

    fn bar_color(&self) -> Color {
        Color::Red
    }
}

/// `attacker` hits `target` once with its current weapon.
///
/// Does not touch any health bar; [`Battle::attack`](crate::Battle::attack)
/// pairs the hit with the target's bar update.
pub fn attack<'w, A, T>(attacker: &A, target: &mut T) -> BattleEvent
where
    A: Combatant<'w> + ?Sized,
    T: Combatant<'w> + ?Sized,
{
    strike(attacker.name(), attacker.weapon(), target)
}

pub(crate) fn strike<'w, T>(attacker: &str, weapon: &Weapon, target: &mut T) -> BattleEvent
where
    T: Combatant<'w> + ?Sized,
{
    let stats = target.stats_mut();
    stats.take_damage(weapon.damage());
    info!(
        target: "battle_core.combat",
        attacker,
        defender = %stats.name,
        weapon = weapon.name(),
        damage = weapon.damage(),
        health = stats.health,
        max = stats.health_max,
        "attack resolved"
    );
    BattleEvent::Attack {
        attacker: attacker.to_owned(),
        target: stats.name.clone(),
        weapon: weapon.name().to_owned(),
        damage: weapon.damage(),
        target_health: stats.health,
    }
}
