use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

pub const DIE_FACES: u8 = 6;

/// Two dice and the picture their total resolved to when rolled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    dice: (u8, u8),
    picture: Option<Picture>,
}

impl DiceRoll {
    pub fn new(dice: (u8, u8), difficulty: Difficulty) -> Result<Self> {
        for die in [dice.0, dice.1] {
            if !(1..=DIE_FACES).contains(&die) {
                return Err(GameError::InvalidDie(die));
            }
        }
        Ok(Self {
            dice,
            picture: difficulty.picture_for_sum(dice.0 + dice.1),
        })
    }

    pub(crate) fn roll(rng: &mut SmallRng, difficulty: Difficulty) -> Self {
        let dice = (
            rng.random_range(1..=DIE_FACES),
            rng.random_range(1..=DIE_FACES),
        );
        Self {
            dice,
            picture: difficulty.picture_for_sum(dice.0 + dice.1),
        }
    }

    pub const fn dice(&self) -> (u8, u8) {
        self.dice
    }

    pub const fn total(&self) -> u8 {
        self.dice.0 + self.dice.1
    }

    pub const fn picture(&self) -> Option<Picture> {
        self.picture
    }
}

/// Unicode die face for a value in 1..=6.
pub const fn die_face(value: u8) -> char {
    match value {
        1 => '⚀',
        2 => '⚁',
        3 => '⚂',
        4 => '⚃',
        5 => '⚄',
        6 => '⚅',
        _ => '🎲',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_dice() {
        assert_eq!(
            DiceRoll::new((0, 3), Difficulty::Standard),
            Err(GameError::InvalidDie(0))
        );
        assert_eq!(
            DiceRoll::new((4, 7), Difficulty::Standard),
            Err(GameError::InvalidDie(7))
        );
    }

    #[test]
    fn resolves_picture_from_total_only() {
        let a = DiceRoll::new((1, 4), Difficulty::Standard).unwrap();
        let b = DiceRoll::new((3, 2), Difficulty::Standard).unwrap();

        assert_eq!(a.total(), 5);
        assert_eq!(a.picture(), Some(Picture::Owl));
        assert_eq!(a.picture(), b.picture());
        assert_ne!(a.dice(), b.dice());
    }

    #[test]
    fn extremes_are_dead_when_restricted() {
        let snake_eyes = DiceRoll::new((1, 1), Difficulty::Restricted).unwrap();
        let boxcars = DiceRoll::new((6, 6), Difficulty::Restricted).unwrap();

        assert_eq!(snake_eyes.total(), 2);
        assert_eq!(snake_eyes.picture(), None);
        assert_eq!(boxcars.picture(), None);
    }

    #[test]
    fn seeded_rolls_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let roll = DiceRoll::roll(&mut rng, Difficulty::Standard);
            let (a, b) = roll.dice();
            assert!((1..=6).contains(&a));
            assert!((1..=6).contains(&b));
            assert_eq!(roll.picture(), Picture::from_sum(roll.total()));
        }
    }
}
