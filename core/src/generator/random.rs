use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Picks `size` distinct pictures from `pool`, uniformly and without replacement.
pub fn sample_distinct(pool: &[Picture], size: usize, rng: &mut SmallRng) -> Result<Vec<Picture>> {
    if pool.len() < size {
        log::warn!(
            "Picture pool too small, requested {} but only has {}",
            size,
            pool.len()
        );
        return Err(GameError::PoolTooSmall {
            available: pool.len(),
            required: size,
        });
    }

    let mut remaining = pool.to_vec();
    let mut picked = Vec::with_capacity(size);
    while picked.len() < size {
        let index = rng.random_range(0..remaining.len());
        picked.push(remaining.remove(index));
    }
    Ok(picked)
}

/// Samples each side's board independently from the difficulty's pool.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Result<PerPlayer<Board>> {
        let pool: Vec<Picture> = difficulty.pictures().collect();
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mouse = Board::new(&sample_distinct(&pool, BOARD_SIZE, &mut rng)?)?;
        let gruffalo = Board::new(&sample_distinct(&pool, BOARD_SIZE, &mut rng)?)?;
        log::debug!("generated {:?} boards from seed {}", difficulty, self.seed);

        Ok(PerPlayer::new(mouse, gruffalo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    #[test]
    fn sample_is_distinct_and_from_pool() {
        let mut rng = SmallRng::seed_from_u64(11);
        let pool: Vec<Picture> = Difficulty::Standard.pictures().collect();

        for _ in 0..50 {
            let picked = sample_distinct(&pool, 9, &mut rng).unwrap();
            let unique: BTreeSet<_> = picked.iter().copied().collect();
            assert_eq!(picked.len(), 9);
            assert_eq!(unique.len(), 9);
            assert!(picked.iter().all(|p| pool.contains(p)));
        }
    }

    #[test]
    fn sample_refuses_small_pool() {
        let mut rng = SmallRng::seed_from_u64(0);
        let pool = [Picture::Frog, Picture::Fox];

        assert_eq!(
            sample_distinct(&pool, 3, &mut rng),
            Err(GameError::PoolTooSmall {
                available: 2,
                required: 3
            })
        );
    }

    #[test]
    fn restricted_boards_use_the_nine_middle_pictures() {
        let boards = RandomBoardGenerator::new(42)
            .generate(Difficulty::Restricted)
            .unwrap();

        for (_, board) in boards.iter() {
            assert_eq!(board.check_difficulty(Difficulty::Restricted), Ok(()));
            assert!(!board.contains(Picture::Mushroom));
            assert!(!board.contains(Picture::Tree));
        }
    }

    #[test]
    fn same_seed_same_boards() {
        let a = RandomBoardGenerator::new(5).generate(Difficulty::Standard);
        let b = RandomBoardGenerator::new(5).generate(Difficulty::Standard);
        assert_eq!(a, b);
    }

    #[test]
    fn classic_boards_only_fit_standard_play() {
        let boards = ClassicBoards.generate(Difficulty::Standard).unwrap();
        assert_eq!(boards[Player::Mouse], Board::classic(Player::Mouse));
        assert!(ClassicBoards.generate(Difficulty::Restricted).is_err());
    }
}
