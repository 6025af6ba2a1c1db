use serde::{Deserialize, Serialize};

use crate::*;

/// Notifications queued by [`GameSession`] for presentation layers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RollResolved {
        player: Player,
        roll: DiceRoll,
        classification: Classification,
    },
    CoverApplied {
        player: Player,
        picture: Picture,
    },
    PassApplied {
        player: Player,
    },
    TurnChanged {
        player: Player,
    },
    GameWon {
        player: Player,
    },
    GameReset,
}

impl GameEvent {
    pub fn dispatch<O: GameObserver + ?Sized>(&self, observer: &mut O) {
        use GameEvent::*;
        match *self {
            RollResolved {
                player,
                roll,
                classification,
            } => observer.on_roll_resolved(player, &roll, classification),
            CoverApplied { player, picture } => observer.on_cover_applied(player, picture),
            PassApplied { player } => observer.on_pass_applied(player),
            TurnChanged { player } => observer.on_turn_changed(player),
            GameWon { player } => observer.on_game_won(player),
            GameReset => observer.on_game_reset(),
        }
    }
}

/// Fire-and-forget callbacks, every method defaults to doing nothing.
pub trait GameObserver {
    fn on_roll_resolved(
        &mut self,
        _player: Player,
        _roll: &DiceRoll,
        _classification: Classification,
    ) {
    }

    fn on_cover_applied(&mut self, _player: Player, _picture: Picture) {}

    fn on_pass_applied(&mut self, _player: Player) {}

    fn on_turn_changed(&mut self, _player: Player) {}

    fn on_game_won(&mut self, _player: Player) {}

    fn on_game_reset(&mut self) {}
}

pub trait GameObserverExt: GameObserver {
    fn observe_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            event.dispatch(self);
        }
    }
}

impl<O: GameObserver> GameObserverExt for O {}
