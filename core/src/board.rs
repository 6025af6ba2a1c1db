use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of squares on a 3×3 board.
pub const BOARD_SIZE: usize = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    Mouse,
    Gruffalo,
}

impl Player {
    pub const BOTH: [Self; 2] = [Self::Mouse, Self::Gruffalo];

    pub const fn other(self) -> Self {
        match self {
            Self::Mouse => Self::Gruffalo,
            Self::Gruffalo => Self::Mouse,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mouse => "Mouse",
            Self::Gruffalo => "Gruffalo",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Mouse => 0,
            Self::Gruffalo => 1,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::Mouse
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per side, indexed by [`Player`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerPlayer<T>([T; 2]);

impl<T> PerPlayer<T> {
    pub const fn new(mouse: T, gruffalo: T) -> Self {
        Self([mouse, gruffalo])
    }

    pub fn from_fn(mut f: impl FnMut(Player) -> T) -> Self {
        Self::new(f(Player::Mouse), f(Player::Gruffalo))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::BOTH.into_iter().zip(self.0.iter())
    }

    pub fn map<U>(self, mut f: impl FnMut(Player, T) -> U) -> PerPlayer<U> {
        let [mouse, gruffalo] = self.0;
        PerPlayer::new(f(Player::Mouse, mouse), f(Player::Gruffalo, gruffalo))
    }
}

impl<T> Index<Player> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        &self.0[player.index()]
    }
}

impl<T> IndexMut<Player> for PerPlayer<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        &mut self.0[player.index()]
    }
}

/// Nine distinct pictures in display order, row by row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "[Picture; BOARD_SIZE]", try_from = "Vec<Picture>")]
pub struct Board {
    pictures: [Picture; BOARD_SIZE],
}

impl Board {
    pub fn new(pictures: &[Picture]) -> Result<Self> {
        let pictures: [Picture; BOARD_SIZE] =
            pictures
                .try_into()
                .map_err(|_| GameError::InvalidBoardSize {
                    required: BOARD_SIZE,
                    actual: pictures.len(),
                })?;

        let mut seen = BTreeSet::new();
        for &picture in &pictures {
            if !seen.insert(picture) {
                return Err(GameError::DuplicatePicture(picture));
            }
        }

        Ok(Self { pictures })
    }

    /// The boards from the printed game.
    pub const fn classic(player: Player) -> Self {
        use Picture::*;
        let pictures = match player {
            Player::Mouse => [
                Frog,
                PineCone,
                Tree,
                Fox,
                GreenLeaves,
                Flowers,
                Mushroom,
                Snake,
                RedSquirrel,
            ],
            Player::Gruffalo => [
                Owl,
                Tree,
                Frog,
                Mushroom,
                PineCone,
                GreenLeaves,
                Flowers,
                BrownLeaf,
                RedSquirrel,
            ],
        };
        Self { pictures }
    }

    pub fn pictures(&self) -> &[Picture] {
        &self.pictures
    }

    pub fn len(&self) -> usize {
        self.pictures.len()
    }

    pub fn contains(&self, picture: Picture) -> bool {
        self.pictures.contains(&picture)
    }

    pub fn check_difficulty(&self, difficulty: Difficulty) -> Result<()> {
        match self.pictures.iter().find(|&&p| !difficulty.allows(p)) {
            Some(&picture) => Err(GameError::PictureNotInPool(picture)),
            None => Ok(()),
        }
    }
}

impl From<Board> for [Picture; BOARD_SIZE] {
    fn from(board: Board) -> Self {
        board.pictures
    }
}

impl TryFrom<Vec<Picture>> for Board {
    type Error = GameError;

    fn try_from(pictures: Vec<Picture>) -> Result<Self> {
        Self::new(&pictures)
    }
}

/// Covered overlay for one side's board during a single game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerState {
    board: Board,
    covered: BTreeSet<Picture>,
    last_covered: Option<Picture>,
    pending: Option<PendingDecision>,
}

impl PlayerState {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            covered: BTreeSet::new(),
            last_covered: None,
            pending: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn covered(&self) -> &BTreeSet<Picture> {
        &self.covered
    }

    pub fn covered_count(&self) -> usize {
        self.covered.len()
    }

    pub fn last_covered(&self) -> Option<Picture> {
        self.last_covered
    }

    pub fn pending(&self) -> Option<&PendingDecision> {
        self.pending.as_ref()
    }

    pub fn is_covered(&self, picture: Picture) -> bool {
        self.covered.contains(&picture)
    }

    pub fn has_won(&self) -> bool {
        self.covered.len() == self.board.len()
    }

    pub fn classify(&self, roll: &DiceRoll) -> Classification {
        use Classification::*;
        match roll.picture() {
            None => NoPicture,
            Some(picture) if !self.board.contains(picture) => NotOnBoard(picture),
            Some(picture) if self.is_covered(picture) => AlreadyCovered(picture),
            Some(picture) => Coverable(picture),
        }
    }

    /// Callers must have classified the picture as coverable first.
    pub(crate) fn cover(&mut self, picture: Picture) {
        debug_assert!(self.board.contains(picture));
        let inserted = self.covered.insert(picture);
        debug_assert!(inserted, "{picture} covered twice");
        self.last_covered = Some(picture);
    }

    pub(crate) fn set_pending(&mut self, decision: PendingDecision) {
        debug_assert!(self.pending.is_none());
        self.pending = Some(decision);
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingDecision> {
        self.pending.take()
    }

    pub(crate) fn clear(&mut self) {
        self.covered.clear();
        self.last_covered = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(total: u8) -> DiceRoll {
        let first = total.saturating_sub(DIE_FACES).max(1);
        DiceRoll::new((first, total - first), Difficulty::Standard).unwrap()
    }

    #[test]
    fn board_rejects_wrong_size() {
        let err = Board::new(&Picture::ALL[..8]).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidBoardSize {
                required: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn board_rejects_duplicates() {
        let mut pictures: Vec<Picture> = Picture::ALL[..9].to_vec();
        pictures[8] = Picture::Frog;
        assert_eq!(
            Board::new(&pictures),
            Err(GameError::DuplicatePicture(Picture::Frog))
        );
    }

    #[test]
    fn deserializing_a_board_validates_it() {
        let board = Board::classic(Player::Gruffalo);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        let frogs = serde_json::to_string(&[Picture::Frog; BOARD_SIZE]).unwrap();
        assert!(serde_json::from_str::<Board>(&frogs).is_err());
        let short = serde_json::to_string(&Picture::ALL[..4]).unwrap();
        assert!(serde_json::from_str::<Board>(&short).is_err());
    }

    #[test]
    fn classic_boards_need_standard_difficulty() {
        let board = Board::classic(Player::Mouse);
        assert_eq!(board.check_difficulty(Difficulty::Standard), Ok(()));
        assert_eq!(
            board.check_difficulty(Difficulty::Restricted),
            Err(GameError::PictureNotInPool(Picture::Tree))
        );
        assert_eq!(Board::new(board.pictures()), Ok(board));
    }

    #[test]
    fn classification_precedence() {
        let mut state = PlayerState::new(Board::classic(Player::Mouse));

        assert_eq!(state.classify(&roll(3)), Classification::Coverable(Picture::Frog));
        assert_eq!(state.classify(&roll(5)), Classification::NotOnBoard(Picture::Owl));

        state.cover(Picture::Frog);
        assert_eq!(
            state.classify(&roll(3)),
            Classification::AlreadyCovered(Picture::Frog)
        );
        assert_eq!(state.last_covered(), Some(Picture::Frog));

        let dead = DiceRoll::new((1, 1), Difficulty::Restricted).unwrap();
        assert_eq!(state.classify(&dead), Classification::NoPicture);
    }

    #[test]
    fn wins_only_when_every_square_is_covered() {
        let board = Board::classic(Player::Gruffalo);
        let mut state = PlayerState::new(board);

        for (i, &picture) in board.pictures().iter().enumerate() {
            assert!(!state.has_won());
            state.cover(picture);
            assert_eq!(state.covered_count(), i + 1);
        }
        assert!(state.has_won());

        state.clear();
        assert_eq!(state.covered_count(), 0);
        assert_eq!(state.last_covered(), None);
    }

    #[test]
    fn per_player_indexing() {
        let mut counts = PerPlayer::new(0, 0);
        counts[Player::Gruffalo] += 2;

        assert_eq!(counts[Player::Mouse], 0);
        assert_eq!(counts[Player::Gruffalo], 2);
        assert_eq!(Player::Mouse.other(), Player::Gruffalo);
    }
}
