//! A combat session: fighters, their health bars, and the rules between them.
//!
//! Fighters and bars are stored side by side and paired by [`FighterId`], so
//! neither side holds a reference to the other.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::character::{strike, Combatant, Enemy, Hero, Stats};
use crate::config::Rules;
use crate::error::BattleError;
use crate::event::BattleEvent;
use crate::health_bar::{BarStyle, Color, HealthBar, RenderedBar};
use crate::weapon::Weapon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FighterId(usize);

impl FighterId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum Fighter<'w> {
    Hero(Hero<'w>),
    Enemy(Enemy<'w>),
}

impl<'w> Fighter<'w> {
    pub fn as_hero(&self) -> Option<&Hero<'w>> {
        match self {
            Fighter::Hero(hero) => Some(hero),
            Fighter::Enemy(_) => None,
        }
    }

    fn hero_mut(&mut self) -> Result<&mut Hero<'w>, BattleError> {
        match self {
            Fighter::Hero(hero) => Ok(hero),
            Fighter::Enemy(enemy) => Err(BattleError::NotAHero {
                name: enemy.name().to_owned(),
            }),
        }
    }
}

impl<'w> Combatant<'w> for Fighter<'w> {
    fn stats(&self) -> &Stats<'w> {
        match self {
            Fighter::Hero(hero) => hero.stats(),
            Fighter::Enemy(enemy) => enemy.stats(),
        }
    }

    fn stats_mut(&mut self) -> &mut Stats<'w> {
        match self {
            Fighter::Hero(hero) => hero.stats_mut(),
            Fighter::Enemy(enemy) => enemy.stats_mut(),
        }
    }

    fn bar_color(&self) -> Color {
        match self {
            Fighter::Hero(hero) => hero.bar_color(),
            Fighter::Enemy(enemy) => enemy.bar_color(),
        }
    }
}

impl<'w> From<Hero<'w>> for Fighter<'w> {
    fn from(hero: Hero<'w>) -> Self {
        Fighter::Hero(hero)
    }
}

impl<'w> From<Enemy<'w>> for Fighter<'w> {
    fn from(enemy: Enemy<'w>) -> Self {
        Fighter::Enemy(enemy)
    }
}

#[derive(Debug, Default)]
pub struct Battle<'w> {
    rules: Rules,
    style: BarStyle,
    fighters: Vec<Fighter<'w>>,
    bars: Vec<HealthBar>,
}

impl<'w> Battle<'w> {
    pub fn new(rules: Rules, style: BarStyle) -> Self {
        Self {
            rules,
            style,
            fighters: Vec::new(),
            bars: Vec::new(),
        }
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn add_hero(&mut self, hero: Hero<'w>) -> Result<FighterId, BattleError> {
        self.add(hero, None)
    }

    pub fn add_enemy(&mut self, enemy: Enemy<'w>) -> Result<FighterId, BattleError> {
        self.add(enemy, None)
    }

    /// Registers a fighter and builds its bar, colored by role unless
    /// `color` says otherwise.
    pub fn add(
        &mut self,
        fighter: impl Into<Fighter<'w>>,
        color: Option<Color>,
    ) -> Result<FighterId, BattleError> {
        let fighter = fighter.into();
        let id = FighterId(self.fighters.len());
        let color = color.unwrap_or_else(|| fighter.bar_color());
        let bar = HealthBar::new(id, &fighter, self.style, color)?;
        info!(
            target: "battle_core.combat",
            id = id.index(),
            name = fighter.name(),
            health = fighter.health(),
            weapon = fighter.weapon().name(),
            "fighter joined"
        );
        self.fighters.push(fighter);
        self.bars.push(bar);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.fighters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty()
    }

    pub fn fighter(&self, id: FighterId) -> Result<&Fighter<'w>, BattleError> {
        self.fighters
            .get(id.0)
            .ok_or(BattleError::InvalidTarget(id))
    }

    pub fn bar(&self, id: FighterId) -> Result<&HealthBar, BattleError> {
        self.bars.get(id.0).ok_or(BattleError::InvalidTarget(id))
    }

    pub fn find(&self, name: &str) -> Option<FighterId> {
        self.fighters
            .iter()
            .position(|f| f.name() == name)
            .map(FighterId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FighterId, &Fighter<'w>)> {
        self.fighters
            .iter()
            .enumerate()
            .map(|(index, fighter)| (FighterId(index), fighter))
    }

    /// Turns color codes on or off for every bar.
    pub fn set_colored(&mut self, colored: bool) {
        for bar in &mut self.bars {
            bar.set_colored(colored);
        }
    }

    /// `attacker` hits `target`, and the target's bar picks up the result.
    pub fn attack(
        &mut self,
        attacker: FighterId,
        target: FighterId,
    ) -> Result<BattleEvent, BattleError> {
        let source = self.fighter(attacker)?;
        let defender = self.fighter(target)?;

        if !self.rules.defeated_can_attack && source.is_defeated() {
            warn!(target: "battle_core.combat", attacker = source.name(), "defeated fighter tried to attack");
            return Err(BattleError::DefeatedAttacker {
                name: source.name().to_owned(),
            });
        }
        if !self.rules.defeated_can_be_targeted && defender.is_defeated() {
            warn!(target: "battle_core.combat", defender = defender.name(), "defeated fighter was targeted");
            return Err(BattleError::DefeatedTarget {
                name: defender.name().to_owned(),
            });
        }

        let attacker_name = source.name().to_owned();
        let weapon = source.weapon();
        let event = strike(&attacker_name, weapon, &mut self.fighters[target.0]);
        self.bars[target.0].update(&self.fighters[target.0])?;
        Ok(event)
    }

    pub fn equip(
        &mut self,
        hero: FighterId,
        weapon: &'w Weapon,
    ) -> Result<BattleEvent, BattleError> {
        let hero = self
            .fighters
            .get_mut(hero.0)
            .ok_or(BattleError::InvalidTarget(hero))?
            .hero_mut()?;
        Ok(hero.equip(weapon))
    }

    pub fn drop_weapon(&mut self, hero: FighterId) -> Result<BattleEvent, BattleError> {
        let hero = self
            .fighters
            .get_mut(hero.0)
            .ok_or(BattleError::InvalidTarget(hero))?
            .hero_mut()?;
        Ok(hero.drop_weapon())
    }

    /// Refreshes one bar's snapshot from its fighter.
    pub fn update_bar(&mut self, id: FighterId) -> Result<(), BattleError> {
        let fighter = self
            .fighters
            .get(id.0)
            .ok_or(BattleError::InvalidTarget(id))?;
        self.bars[id.0].update(fighter)
    }

    /// Renders the bar's current snapshot; does not update it first.
    pub fn draw(&self, id: FighterId) -> Result<RenderedBar, BattleError> {
        let fighter = self.fighter(id)?;
        Ok(self.bars[id.0].draw(fighter.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapon::FISTS;

    fn plain() -> BarStyle {
        BarStyle {
            colored: false,
            ..BarStyle::default()
        }
    }

    #[test]
    fn attack_updates_the_target_bar() {
        let club = Weapon::new("Club", 5);
        let mut battle = Battle::new(Rules::default(), plain());
        let aria = battle.add_hero(Hero::new("Aria", 100)).unwrap();
        let goblin = battle.add_enemy(Enemy::new("Goblin", 30, &club)).unwrap();

        let event = battle.attack(aria, goblin).unwrap();

        assert_eq!("Aria attacks Goblin with Fists for 5 damage.", event.to_string());
        assert_eq!(25, battle.fighter(goblin).unwrap().health());
        assert_eq!(25, battle.bar(goblin).unwrap().current_value());
        assert_eq!(17, battle.bar(goblin).unwrap().remaining_glyphs());
        assert_eq!(100, battle.bar(aria).unwrap().current_value());
        assert_eq!(Some(goblin), battle.find("Goblin"));
        assert_eq!(None, battle.find("Dragon"));
    }

    #[test]
    fn bars_follow_role_colors() {
        let club = Weapon::new("Club", 5);
        let mut battle = Battle::default();
        let aria = battle.add_hero(Hero::new("Aria", 100)).unwrap();
        let goblin = battle.add_enemy(Enemy::new("Goblin", 30, &club)).unwrap();
        let imp = battle
            .add(Enemy::new("Imp", 12, &club), Some(Color::Purple))
            .unwrap();

        assert_eq!(Color::Green, battle.bar(aria).unwrap().color());
        assert_eq!(Color::Red, battle.bar(goblin).unwrap().color());
        assert_eq!(Color::Purple, battle.bar(imp).unwrap().color());
    }

    #[test]
    fn unknown_ids_are_invalid_targets() {
        let mut battle = Battle::default();
        let aria = battle.add_hero(Hero::new("Aria", 100)).unwrap();
        let ghost = FighterId::new(7);

        assert_eq!(
            Err(BattleError::InvalidTarget(ghost)),
            battle.attack(aria, ghost)
        );
        assert_eq!(
            Err(BattleError::InvalidTarget(ghost)),
            battle.attack(ghost, aria)
        );
        assert_eq!(
            Err(BattleError::InvalidTarget(ghost)),
            battle.draw(ghost)
        );
        assert_eq!(
            Err(BattleError::InvalidTarget(ghost)),
            battle.equip(ghost, &FISTS)
        );
        assert_eq!(
            Err(BattleError::InvalidTarget(ghost)),
            battle.drop_weapon(ghost)
        );
        assert_eq!(
            Err(BattleError::InvalidTarget(ghost)),
            battle.update_bar(ghost)
        );
        assert!(matches!(
            battle.fighter(ghost),
            Err(BattleError::InvalidTarget(id)) if id == ghost
        ));
    }

    #[test]
    fn zero_max_health_fighter_is_refused() {
        let mut battle = Battle::default();
        let err = battle.add_hero(Hero::new("Husk", 0)).unwrap_err();
        assert!(matches!(err, BattleError::ZeroMaxHealth { .. }));
        assert!(battle.is_empty());
    }

    #[test]
    fn permissive_rules_allow_hitting_the_fallen() {
        let hammer = Weapon::new("Hammer", 50);
        let mut battle = Battle::new(Rules::default(), plain());
        let aria = battle.add_hero(Hero::new("Aria", 10)).unwrap();
        let ogre = battle.add_enemy(Enemy::new("Ogre", 80, &hammer)).unwrap();

        battle.attack(ogre, aria).unwrap();
        battle.attack(ogre, aria).unwrap();
        battle.attack(aria, ogre).unwrap();

        assert_eq!(0, battle.fighter(aria).unwrap().health());
        assert_eq!(75, battle.fighter(ogre).unwrap().health());
    }

    #[test]
    fn strict_rules_stop_the_fallen() {
        let hammer = Weapon::new("Hammer", 50);
        let mut battle = Battle::new(Rules::strict(), plain());
        assert_eq!(Rules::strict(), battle.rules());
        let aria = battle.add_hero(Hero::new("Aria", 10)).unwrap();
        let ogre = battle.add_enemy(Enemy::new("Ogre", 80, &hammer)).unwrap();

        battle.attack(ogre, aria).unwrap();

        assert!(matches!(
            battle.attack(ogre, aria),
            Err(BattleError::DefeatedTarget { .. })
        ));
        assert!(matches!(
            battle.attack(aria, ogre),
            Err(BattleError::DefeatedAttacker { .. })
        ));
        assert_eq!(80, battle.fighter(ogre).unwrap().health());
    }

    #[test]
    fn equip_attack_drop_round_trip() {
        let sword = Weapon::new("Sword", 20);
        let club = Weapon::new("Club", 5);
        let mut battle = Battle::new(Rules::default(), plain());
        let aria = battle.add_hero(Hero::new("Aria", 100)).unwrap();
        let goblin = battle.add_enemy(Enemy::new("Goblin", 30, &club)).unwrap();
        let before = battle.fighter(aria).unwrap().weapon();

        battle.equip(aria, &sword).unwrap();
        battle.attack(aria, goblin).unwrap();
        let dropped = battle.drop_weapon(aria).unwrap();

        assert_eq!(10, battle.fighter(goblin).unwrap().health());
        assert_eq!("Aria dropped Sword.", dropped.to_string());
        assert!(std::ptr::eq(before, battle.fighter(aria).unwrap().weapon()));
        assert!(std::ptr::eq(&FISTS, battle.fighter(aria).unwrap().weapon()));
    }

    #[test]
    fn enemies_cannot_change_weapons() {
        let club = Weapon::new("Club", 5);
        let sword = Weapon::new("Sword", 20);
        let mut battle = Battle::default();
        let goblin = battle.add_enemy(Enemy::new("Goblin", 30, &club)).unwrap();

        assert!(matches!(
            battle.equip(goblin, &sword),
            Err(BattleError::NotAHero { .. })
        ));
        assert!(matches!(
            battle.drop_weapon(goblin),
            Err(BattleError::NotAHero { .. })
        ));
    }

    #[test]
    fn self_attack_uses_own_weapon() {
        let mut battle = Battle::new(Rules::default(), plain());
        let aria = battle.add_hero(Hero::new("Aria", 20)).unwrap();

        battle.attack(aria, aria).unwrap();

        assert_eq!(15, battle.fighter(aria).unwrap().health());
        assert_eq!(15, battle.bar(aria).unwrap().current_value());
    }

    #[test]
    fn draw_shows_the_hit_from_attack() {
        let club = Weapon::new("Club", 5);
        let mut battle = Battle::new(Rules::default(), plain());
        let aria = battle.add_hero(Hero::new("Aria", 20)).unwrap();
        let goblin = battle.add_enemy(Enemy::new("Goblin", 30, &club)).unwrap();

        battle.attack(goblin, aria).unwrap();
        let rendered = battle.draw(aria).unwrap();

        assert_eq!("Aria's Health: 15/20", rendered.caption);
        assert_eq!(
            format!("│{}{}│", "█".repeat(15), "░".repeat(5)),
            rendered.bar
        );
    }
}
