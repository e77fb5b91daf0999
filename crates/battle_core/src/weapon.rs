use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Bare-handed weapon every character starts with unless told otherwise.
pub static FISTS: Weapon = Weapon::from_static("Fists", 5);

/// Immutable name + damage pair. Characters hold it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    name: Cow<'static, str>,
    damage: i32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, damage: i32) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            damage,
        }
    }

    pub const fn from_static(name: &'static str, damage: i32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            damage,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Damage dealt per hit. Negative values are not rejected.
    pub fn damage(&self) -> i32 {
        self.damage
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} dmg)", self.name, self.damage)
    }
}
