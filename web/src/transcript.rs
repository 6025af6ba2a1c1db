use crate::game::{self, Classification, DiceRoll, GameObserver, PerPlayer, Picture, Player};

const START_TEXT: &str = "Roll the dice to begin!";

/// Text shown under one board, rebuilt on every roll by that side.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BoardLog {
    roll: Option<DiceRoll>,
    action: String,
}

impl BoardLog {
    fn new() -> Self {
        Self {
            roll: None,
            action: String::new(),
        }
    }

    pub(crate) fn dice(&self) -> Option<(u8, u8)> {
        self.roll.map(|roll| roll.dice())
    }

    pub(crate) fn text(&self) -> String {
        let Some(roll) = self.roll else {
            return START_TEXT.to_string();
        };
        let (a, b) = roll.dice();
        let picture = roll
            .picture()
            .map_or_else(|| "-".to_string(), |picture| picture.to_string());
        format!(
            "Dice: {a} + {b}\nTotal: {}\nPicture: {picture}\nAction: {}",
            roll.total(),
            self.action
        )
    }
}

/// Game log plus per-board roll summaries, fed from the session's events.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Transcript {
    lines: Vec<String>,
    boards: PerPlayer<BoardLog>,
}

impl Transcript {
    pub(crate) fn new(intro: impl Into<String>) -> Self {
        Self {
            lines: vec![intro.into()],
            boards: PerPlayer::from_fn(|_| BoardLog::new()),
        }
    }

    pub(crate) fn intro(mode: game::Mode) -> String {
        match mode {
            game::Mode::TwoPlayer => "2-player mode. Mouse starts.".to_string(),
            game::Mode::OnePlayer { human } => format!("1-player mode. You play {human}."),
        }
    }

    pub(crate) fn note(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub(crate) fn lines(&self) -> &[String] {
        &self.lines
    }

    pub(crate) fn board(&self, player: Player) -> &BoardLog {
        &self.boards[player]
    }

    fn set_action(&mut self, player: Player, action: impl Into<String>) {
        self.boards[player].action = action.into();
    }
}

impl GameObserver for Transcript {
    fn on_roll_resolved(&mut self, player: Player, roll: &DiceRoll, classification: Classification) {
        use Classification::*;

        let (a, b) = roll.dice();
        self.note(format!("{player} rolled {a} + {b} = {}.", roll.total()));

        let action = match classification {
            NoPicture => {
                self.note("No picture for this total.");
                "No picture for this total".to_string()
            }
            NotOnBoard(picture) => {
                self.note(format!("{picture} is NOT on {player}'s board."));
                "Not on board".to_string()
            }
            AlreadyCovered(picture) => {
                self.note(format!("{picture} is ALREADY covered."));
                "Already covered".to_string()
            }
            Coverable(picture) => format!("Tap {picture} to cover it"),
        };
        self.boards[player].roll = Some(*roll);
        self.set_action(player, action);
    }

    fn on_cover_applied(&mut self, player: Player, picture: Picture) {
        self.note(format!("{player} covers {picture}."));
        self.set_action(player, format!("{picture} covered"));
    }

    fn on_game_won(&mut self, player: Player) {
        self.note(format!("*** {player} shouts \"Gruffalo Bingo!\" ***"));
        self.set_action(player, "🎉 Gruffalo Bingo!");
    }

    fn on_game_reset(&mut self) {
        self.lines.clear();
        self.note("Game reset.");
        self.boards = PerPlayer::from_fn(|_| BoardLog::new());
    }
}
