use core::fmt;
use serde::{Deserialize, Serialize};

/// Dice totals that can be rolled with two six-sided dice.
pub const MIN_TOTAL: u8 = 2;
pub const MAX_TOTAL: u8 = 12;

/// One of the eleven pictures, each tied to a single dice total.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Picture {
    Mushroom,
    Frog,
    PineCone,
    Owl,
    Flowers,
    Fox,
    BrownLeaf,
    Snake,
    GreenLeaves,
    RedSquirrel,
    Tree,
}

impl Picture {
    /// Every picture in ascending total order.
    pub const ALL: [Self; 11] = [
        Self::Mushroom,
        Self::Frog,
        Self::PineCone,
        Self::Owl,
        Self::Flowers,
        Self::Fox,
        Self::BrownLeaf,
        Self::Snake,
        Self::GreenLeaves,
        Self::RedSquirrel,
        Self::Tree,
    ];

    /// Picture for a total under the full catalog, ignoring difficulty.
    pub const fn from_sum(total: u8) -> Option<Self> {
        if total < MIN_TOTAL || total > MAX_TOTAL {
            return None;
        }
        Some(Self::ALL[(total - MIN_TOTAL) as usize])
    }

    /// The dice total that maps to this picture.
    pub const fn sum(self) -> u8 {
        self as u8 + MIN_TOTAL
    }

    pub const fn name(self) -> &'static str {
        use Picture::*;
        match self {
            Mushroom => "Mushroom",
            Frog => "Frog",
            PineCone => "Pine Cone",
            Owl => "Owl",
            Flowers => "Flowers",
            Fox => "Fox",
            BrownLeaf => "Brown Leaf",
            Snake => "Snake",
            GreenLeaves => "Green Leaves",
            RedSquirrel => "Red Squirrel",
            Tree => "Tree",
        }
    }

    pub const fn emoji(self) -> &'static str {
        use Picture::*;
        match self {
            Mushroom => "🍄",
            Frog => "🐸",
            PineCone => "🌰",
            Owl => "🦉",
            Flowers => "🌼",
            Fox => "🦊",
            BrownLeaf => "🍁",
            Snake => "🐍",
            GreenLeaves => "🍃",
            RedSquirrel => "🐿️",
            Tree => "🌲",
        }
    }
}

impl fmt::Display for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.name())
    }
}

/// Controls which pictures may appear on boards.
///
/// Restricted play drops the pictures of the two extreme totals, which are the
/// least likely to be rolled. Those totals can still come up on the dice, they
/// just never resolve to a picture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Standard,
    Restricted,
}

impl Difficulty {
    pub const fn is_excluded(self, picture: Picture) -> bool {
        match self {
            Self::Standard => false,
            Self::Restricted => {
                let total = picture.sum();
                total == MIN_TOTAL || total == MAX_TOTAL
            }
        }
    }

    pub const fn picture_for_sum(self, total: u8) -> Option<Picture> {
        match Picture::from_sum(total) {
            Some(picture) if !self.is_excluded(picture) => Some(picture),
            _ => None,
        }
    }

    pub fn allows(self, picture: Picture) -> bool {
        !self.is_excluded(picture)
    }

    /// The pool boards are sampled from, in ascending total order.
    pub fn pictures(self) -> impl Iterator<Item = Picture> + Clone {
        Picture::ALL
            .into_iter()
            .filter(move |&picture| self.allows(picture))
    }

    /// Every total with the picture it resolves to, as printed on the dice key.
    pub fn dice_key(self) -> impl Iterator<Item = (u8, Option<Picture>)> {
        (MIN_TOTAL..=MAX_TOTAL).map(move |total| (total, self.picture_for_sum(total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_and_pictures_are_inverse() {
        for total in MIN_TOTAL..=MAX_TOTAL {
            let picture = Picture::from_sum(total).unwrap();
            assert_eq!(picture.sum(), total);
        }
        assert_eq!(Picture::from_sum(3), Some(Picture::Frog));
        assert_eq!(Picture::from_sum(5), Some(Picture::Owl));
        assert_eq!(Picture::from_sum(1), None);
        assert_eq!(Picture::from_sum(13), None);
    }

    #[test]
    fn standard_catalog_covers_every_total() {
        assert_eq!(Difficulty::Standard.pictures().count(), 11);
        assert_eq!(Difficulty::Standard.picture_for_sum(2), Some(Picture::Mushroom));
        assert_eq!(Difficulty::Standard.picture_for_sum(12), Some(Picture::Tree));
    }

    #[test]
    fn restricted_catalog_drops_the_extremes() {
        let difficulty = Difficulty::Restricted;

        assert_eq!(difficulty.picture_for_sum(2), None);
        assert_eq!(difficulty.picture_for_sum(12), None);
        assert_eq!(difficulty.picture_for_sum(7), Some(Picture::Fox));
        assert_eq!(difficulty.pictures().count(), 9);
        assert!(!difficulty.allows(Picture::Mushroom));
        assert!(!difficulty.allows(Picture::Tree));
    }

    #[test]
    fn dice_key_lists_dead_totals() {
        let dead = Difficulty::Restricted
            .dice_key()
            .filter(|(_, picture)| picture.is_none())
            .map(|(total, _)| total);

        assert!(dead.eq([2, 12]));
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Picture::RedSquirrel).unwrap();
        assert_eq!(json, "\"red_squirrel\"");
    }
}
