use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Result<PerPlayer<Board>>;
}

/// Hands out the fixed boards from the printed game.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ClassicBoards;

impl BoardGenerator for ClassicBoards {
    fn generate(self, difficulty: Difficulty) -> Result<PerPlayer<Board>> {
        let boards = PerPlayer::from_fn(Board::classic);
        for (_, board) in boards.iter() {
            board.check_difficulty(difficulty)?;
        }
        Ok(boards)
    }
}
