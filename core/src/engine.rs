use alloc::vec::Vec;
use rand::prelude::*;

use crate::*;

/// Whole state of one bingo game: both boards, whose turn it is, and the
/// outcome once somebody fills their board.
///
/// Every transition runs to completion inside a single method call. Rejected
/// calls return an error and leave the session untouched.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    players: PerPlayer<PlayerState>,
    active: Player,
    winner: Option<Player>,
    last_roll: Option<(Player, DiceRoll)>,
    epoch: u64,
    turn: u32,
    rng: SmallRng,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(config: GameConfig, boards: PerPlayer<Board>, seed: u64) -> Result<Self> {
        for (player, board) in boards.iter() {
            board.check_difficulty(config.difficulty).inspect_err(|err| {
                log::warn!("{} board does not fit {:?}: {}", player, config.difficulty, err);
            })?;
        }

        Ok(Self {
            config,
            players: boards.map(|_, board| PlayerState::new(board)),
            active: config.mode.starting_player(),
            winner: None,
            last_roll: None,
            epoch: 0,
            turn: 0,
            rng: SmallRng::seed_from_u64(seed),
            events: Vec::new(),
        })
    }

    pub fn generate(config: GameConfig, generator: impl BoardGenerator, seed: u64) -> Result<Self> {
        let boards = generator.generate(config.difficulty)?;
        Self::new(config, boards, seed)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn player(&self, player: Player) -> &PlayerState {
        &self.players[player]
    }

    pub fn board(&self, player: Player) -> &Board {
        self.players[player].board()
    }

    pub fn is_covered(&self, player: Player, picture: Picture) -> bool {
        self.players[player].is_covered(picture)
    }

    pub fn has_won(&self, player: Player) -> bool {
        self.players[player].has_won()
    }

    pub fn pending(&self, player: Player) -> Option<&PendingDecision> {
        self.players[player].pending()
    }

    pub fn last_roll(&self) -> Option<(Player, DiceRoll)> {
        self.last_roll
    }

    /// Bumped whenever the game is reset, so work scheduled earlier can tell
    /// it belongs to a previous game.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of turns completed in the current game.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn picture_for_sum(&self, total: u8) -> Option<Picture> {
        self.config.difficulty.picture_for_sum(total)
    }

    /// Drains the notifications produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn submit_roll(&mut self, player: Player) -> Result<TurnOutcome> {
        self.check_can_roll(player)?;
        let roll = DiceRoll::roll(&mut self.rng, self.config.difficulty);
        Ok(self.resolve_roll(player, roll))
    }

    /// Same as [`Self::submit_roll`] with the dice supplied by the caller.
    pub fn submit_roll_with(&mut self, player: Player, dice: (u8, u8)) -> Result<TurnOutcome> {
        self.check_can_roll(player)?;
        let roll = DiceRoll::new(dice, self.config.difficulty)?;
        Ok(self.resolve_roll(player, roll))
    }

    pub fn confirm_cover(&mut self, player: Player, picture: Picture) -> Result<TurnOutcome> {
        let pending = self.check_pending(player)?;
        let Classification::Coverable(expected) = pending.classification else {
            return Err(GameError::WrongDecision {
                expected: pending.resolution(),
            });
        };
        if expected != picture {
            return Err(GameError::PictureMismatch {
                expected,
                requested: picture,
            });
        }

        self.players[player].take_pending();
        Ok(self.apply_cover(player, picture))
    }

    pub fn confirm_pass(&mut self, player: Player) -> Result<TurnOutcome> {
        let pending = self.check_pending(player)?;
        if pending.resolution() != Resolution::AwaitingPass {
            return Err(GameError::WrongDecision {
                expected: pending.resolution(),
            });
        }

        self.players[player].take_pending();
        Ok(self.apply_pass(player))
    }

    /// Clears both boards and starts over with the same pictures.
    pub fn reset_game(&mut self) {
        for player in Player::BOTH {
            self.players[player].clear();
        }
        self.active = self.config.mode.starting_player();
        self.winner = None;
        self.last_roll = None;
        self.turn = 0;
        self.epoch = self.epoch.wrapping_add(1);
        log::debug!("game reset, {} starts", self.active);
        self.emit(GameEvent::GameReset);
    }

    /// Replaces both boards and resets. On error the current boards stay.
    pub fn regenerate_boards(
        &mut self,
        difficulty: Difficulty,
        generator: impl BoardGenerator,
    ) -> Result<()> {
        let boards = generator.generate(difficulty).inspect_err(|err| {
            log::warn!("keeping current boards: {}", err);
        })?;

        self.config.difficulty = difficulty;
        self.players = boards.map(|_, board| PlayerState::new(board));
        self.reset_game();
        Ok(())
    }

    /// Switching difficulty deals new random boards, since the old ones may
    /// hold pictures that can no longer be rolled.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        if difficulty == self.config.difficulty {
            return Ok(());
        }
        let seed = self.rng.random_range(0..=u64::MAX);
        self.regenerate_boards(difficulty, RandomBoardGenerator::new(seed))
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.config.mode = mode;
        self.reset_game();
    }

    pub fn set_confirm_policy(&mut self, confirm: ConfirmPolicy) {
        self.config.confirm = confirm;
    }

    fn resolve_roll(&mut self, player: Player, roll: DiceRoll) -> TurnOutcome {
        let classification = self.players[player].classify(&roll);
        log::debug!(
            "{} rolled {} + {} = {}: {:?}",
            player,
            roll.dice().0,
            roll.dice().1,
            roll.total(),
            classification
        );

        self.last_roll = Some((player, roll));
        self.emit(GameEvent::RollResolved {
            player,
            roll,
            classification,
        });

        if self.config.waits_for(player) {
            let decision = PendingDecision {
                roll,
                classification,
            };
            self.players[player].set_pending(decision);
            return TurnOutcome::AwaitingDecision(decision);
        }

        match classification {
            Classification::Coverable(picture) => self.apply_cover(player, picture),
            _ => self.apply_pass(player),
        }
    }

    fn apply_cover(&mut self, player: Player, picture: Picture) -> TurnOutcome {
        self.players[player].cover(picture);
        self.emit(GameEvent::CoverApplied { player, picture });

        if self.players[player].has_won() {
            self.end_game(player);
            TurnOutcome::Won(picture)
        } else {
            self.end_turn(player);
            TurnOutcome::Covered(picture)
        }
    }

    fn apply_pass(&mut self, player: Player) -> TurnOutcome {
        self.emit(GameEvent::PassApplied { player });
        self.end_turn(player);
        TurnOutcome::Passed
    }

    fn end_turn(&mut self, player: Player) {
        self.active = player.other();
        self.turn = self.turn.saturating_add(1);
        self.emit(GameEvent::TurnChanged {
            player: self.active,
        });
    }

    fn end_game(&mut self, player: Player) {
        if self.winner.is_some() {
            return;
        }
        log::debug!("{} wins after {} turns", player, self.turn);
        self.winner = Some(player);
        self.emit(GameEvent::GameWon { player });
    }

    fn emit(&mut self, event: GameEvent) {
        log::trace!("event: {:?}", event);
        self.events.push(event);
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.is_game_over() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn check_can_roll(&self, player: Player) -> Result<()> {
        self.check_not_finished()?;
        if self.players[player].pending().is_some() {
            return Err(GameError::DecisionPending(player));
        }
        if player != self.active {
            return Err(GameError::NotYourTurn {
                active: self.active,
            });
        }
        Ok(())
    }

    fn check_pending(&self, player: Player) -> Result<PendingDecision> {
        self.check_not_finished()?;
        if player != self.active {
            return Err(GameError::NotYourTurn {
                active: self.active,
            });
        }
        self.players[player]
            .pending()
            .copied()
            .ok_or(GameError::NoPendingDecision(player))
    }
}
