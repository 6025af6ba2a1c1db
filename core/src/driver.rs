use core::time::Duration;

use crate::*;

/// Pause before the computer rolls, so the human can follow the turn change.
pub const COMPUTER_TURN_DELAY: Duration = Duration::from_millis(600);

/// A computer turn waiting for its delay to run out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTurn {
    player: Player,
    epoch: u64,
    turn: u32,
}

impl ScheduledTurn {
    pub const fn player(&self) -> Player {
        self.player
    }

    pub const fn delay(&self) -> Duration {
        COMPUTER_TURN_DELAY
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StaleReason {
    Cancelled,
    GameReset,
    GameOver,
    NotComputerTurn,
    TurnAdvanced,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Wake {
    Played(TurnOutcome),
    Stale(StaleReason),
}

/// Plays the computer side in one-player games.
///
/// The driver never blocks: [`OpponentDriver::schedule`] hands out a ticket
/// that the caller fires after [`COMPUTER_TURN_DELAY`] through
/// [`OpponentDriver::wake`]. Anything that happened in between (a reset, a
/// mode switch, new boards) turns the ticket into a no-op.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OpponentDriver {
    scheduled: Option<ScheduledTurn>,
}

impl OpponentDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled(&self) -> Option<ScheduledTurn> {
        self.scheduled
    }

    /// Returns a ticket when the session now waits on the computer and no
    /// ticket for this exact turn is outstanding.
    pub fn schedule(&mut self, session: &GameSession) -> Option<ScheduledTurn> {
        let Some(turn) = Self::due_turn(session) else {
            if let Some(stale) = self.scheduled.take() {
                log::trace!("dropping computer turn ticket {:?}", stale);
            }
            return None;
        };

        if self.scheduled == Some(turn) {
            return None;
        }
        log::debug!(
            "{} rolls in {}ms",
            turn.player,
            COMPUTER_TURN_DELAY.as_millis()
        );
        self.scheduled = Some(turn);
        Some(turn)
    }

    pub fn cancel(&mut self) -> Option<ScheduledTurn> {
        self.scheduled.take()
    }

    /// Fires a ticket once its delay has passed.
    pub fn wake(&mut self, session: &mut GameSession, turn: ScheduledTurn) -> Wake {
        if self.scheduled != Some(turn) {
            return self.stale(StaleReason::Cancelled);
        }
        self.scheduled = None;

        if let Err(reason) = Self::validate(session, turn) {
            return self.stale(reason);
        }

        match session.submit_roll(turn.player) {
            Ok(outcome) => Wake::Played(outcome),
            Err(err) => {
                log::warn!("computer roll rejected: {}", err);
                Wake::Stale(StaleReason::NotComputerTurn)
            }
        }
    }

    fn stale(&self, reason: StaleReason) -> Wake {
        log::debug!("skipping stale computer turn: {:?}", reason);
        Wake::Stale(reason)
    }

    fn due_turn(session: &GameSession) -> Option<ScheduledTurn> {
        let player = session.active_player();
        let due = !session.is_game_over()
            && session.mode().is_computer(player)
            && session.pending(player).is_none();

        due.then_some(ScheduledTurn {
            player,
            epoch: session.epoch(),
            turn: session.turn(),
        })
    }

    fn validate(session: &GameSession, turn: ScheduledTurn) -> core::result::Result<(), StaleReason> {
        if session.epoch() != turn.epoch {
            return Err(StaleReason::GameReset);
        }
        if session.is_game_over() {
            return Err(StaleReason::GameOver);
        }
        if !session.mode().is_computer(turn.player) || session.active_player() != turn.player {
            return Err(StaleReason::NotComputerTurn);
        }
        if session.turn() != turn.turn {
            return Err(StaleReason::TurnAdvanced);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_player() -> GameSession {
        let config = GameConfig::new(
            Mode::OnePlayer {
                human: Player::Mouse,
            },
            Difficulty::Standard,
        );
        GameSession::generate(config, ClassicBoards, 21).unwrap()
    }

    fn pass_human_turn(session: &mut GameSession) {
        // Owl is not on the mouse's classic board.
        session.submit_roll_with(Player::Mouse, (2, 3)).unwrap();
        session.confirm_pass(Player::Mouse).unwrap();
    }

    fn dice_for(total: u8) -> (u8, u8) {
        let first = total.saturating_sub(DIE_FACES).max(1);
        (first, total - first)
    }

    #[test]
    fn nothing_scheduled_while_the_human_is_up() {
        let mut driver = OpponentDriver::new();
        let session = one_player();

        assert_eq!(driver.schedule(&session), None);
    }

    #[test]
    fn schedules_once_per_computer_turn() {
        let mut driver = OpponentDriver::new();
        let mut session = one_player();
        pass_human_turn(&mut session);

        let ticket = driver.schedule(&session).unwrap();
        assert_eq!(ticket.player(), Player::Gruffalo);
        assert_eq!(ticket.delay(), Duration::from_millis(600));
        assert_eq!(driver.schedule(&session), None);

        let Wake::Played(outcome) = driver.wake(&mut session, ticket) else {
            panic!("computer should have played");
        };
        assert!(outcome.ends_turn());
        assert_eq!(session.pending(Player::Gruffalo), None);
        assert_eq!(session.active_player(), Player::Mouse);
        assert_eq!(driver.scheduled(), None);
    }

    #[test]
    fn reset_during_the_delay_makes_the_ticket_stale() {
        let mut driver = OpponentDriver::new();
        let mut session = one_player();
        pass_human_turn(&mut session);
        let ticket = driver.schedule(&session).unwrap();

        session.reset_game();

        assert_eq!(
            driver.wake(&mut session, ticket),
            Wake::Stale(StaleReason::GameReset)
        );
        assert_eq!(session.player(Player::Gruffalo).covered_count(), 0);
        assert_eq!(session.last_roll(), None);
    }

    #[test]
    fn mode_switch_during_the_delay_makes_the_ticket_stale() {
        let mut driver = OpponentDriver::new();
        let mut session = one_player();
        pass_human_turn(&mut session);
        let ticket = driver.schedule(&session).unwrap();

        session.set_mode(Mode::TwoPlayer);

        assert_eq!(
            driver.wake(&mut session, ticket),
            Wake::Stale(StaleReason::GameReset)
        );
        assert_eq!(driver.schedule(&session), None);
    }

    #[test]
    fn validation_catches_a_session_that_moved_on() {
        let mut session = one_player();
        pass_human_turn(&mut session);
        let ticket = OpponentDriver::due_turn(&session).unwrap();

        session.submit_roll(Player::Gruffalo).unwrap();
        pass_human_turn(&mut session);

        assert_eq!(
            OpponentDriver::validate(&session, ticket),
            Err(StaleReason::TurnAdvanced)
        );
    }

    #[test]
    fn win_during_the_delay_makes_the_ticket_stale() {
        let mut driver = OpponentDriver::new();
        let mut session = one_player();
        let gruffalo_board = *session.board(Player::Gruffalo);
        let (last, rest) = gruffalo_board.pictures().split_last().unwrap();

        for &picture in rest {
            pass_human_turn(&mut session);
            session
                .submit_roll_with(Player::Gruffalo, dice_for(picture.sum()))
                .unwrap();
        }
        pass_human_turn(&mut session);
        let ticket = driver.schedule(&session).unwrap();

        let outcome = session
            .submit_roll_with(Player::Gruffalo, dice_for(last.sum()))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::Won(*last));
        let boards = PerPlayer::from_fn(|player| session.player(player).clone());
        let last_roll = session.last_roll();

        assert_eq!(
            driver.wake(&mut session, ticket),
            Wake::Stale(StaleReason::GameOver)
        );
        assert_eq!(
            PerPlayer::from_fn(|player| session.player(player).clone()),
            boards
        );
        assert_eq!(session.last_roll(), last_roll);
        assert_eq!(session.winner(), Some(Player::Gruffalo));
    }

    #[test]
    fn cancelled_ticket_does_nothing() {
        let mut driver = OpponentDriver::new();
        let mut session = one_player();
        pass_human_turn(&mut session);
        let ticket = driver.schedule(&session).unwrap();

        assert_eq!(driver.cancel(), Some(ticket));
        assert_eq!(
            driver.wake(&mut session, ticket),
            Wake::Stale(StaleReason::Cancelled)
        );
        assert_eq!(session.active_player(), Player::Gruffalo);
    }

    #[test]
    fn plays_a_whole_game_against_the_human() {
        let mut driver = OpponentDriver::new();
        let mut session = one_player();

        while !session.is_game_over() {
            if let Some(ticket) = driver.schedule(&session) {
                assert!(matches!(driver.wake(&mut session, ticket), Wake::Played(_)));
                continue;
            }
            match session.submit_roll(Player::Mouse).unwrap() {
                TurnOutcome::AwaitingDecision(decision) => match decision.classification {
                    Classification::Coverable(picture) => {
                        session.confirm_cover(Player::Mouse, picture).unwrap();
                    }
                    _ => {
                        session.confirm_pass(Player::Mouse).unwrap();
                    }
                },
                outcome => panic!("human roll resolved without a decision: {outcome:?}"),
            }
        }

        assert!(session.winner().is_some());
        assert_eq!(driver.schedule(&session), None);
    }
}
