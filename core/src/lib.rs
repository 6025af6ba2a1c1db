#![no_std]

extern crate alloc;

use core::fmt;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use dice::*;
pub use driver::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use picture::*;

mod board;
mod dice;
mod driver;
mod engine;
mod error;
mod event;
mod generator;
mod picture;

/// Who controls each side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    TwoPlayer,
    OnePlayer { human: Player },
}

impl Mode {
    pub const fn computer(self) -> Option<Player> {
        match self {
            Self::TwoPlayer => None,
            Self::OnePlayer { human } => Some(human.other()),
        }
    }

    pub const fn is_computer(self, player: Player) -> bool {
        match self.computer() {
            Some(computer) => computer as u8 == player as u8,
            None => false,
        }
    }

    /// Side that rolls first after a reset.
    pub const fn starting_player(self) -> Player {
        match self {
            Self::TwoPlayer => Player::Mouse,
            Self::OnePlayer { human } => human,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::TwoPlayer
    }
}

/// Whether human rolls stop for an explicit cover tap or pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmPolicy {
    #[default]
    Required,
    Automatic,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub confirm: ConfirmPolicy,
}

impl GameConfig {
    pub const fn new(mode: Mode, difficulty: Difficulty) -> Self {
        Self {
            mode,
            difficulty,
            confirm: ConfirmPolicy::Required,
        }
    }

    pub const fn with_confirm(self, confirm: ConfirmPolicy) -> Self {
        Self { confirm, ..self }
    }

    pub const fn waits_for(&self, player: Player) -> bool {
        matches!(self.confirm, ConfirmPolicy::Required) && !self.mode.is_computer(player)
    }
}

/// How a roll relates to the roller's board, checked in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    NoPicture,
    NotOnBoard(Picture),
    AlreadyCovered(Picture),
    Coverable(Picture),
}

impl Classification {
    pub const fn resolution(self) -> Resolution {
        match self {
            Self::Coverable(_) => Resolution::AwaitingCover,
            Self::NoPicture | Self::NotOnBoard(_) | Self::AlreadyCovered(_) => {
                Resolution::AwaitingPass
            }
        }
    }

    pub const fn picture(self) -> Option<Picture> {
        match self {
            Self::NoPicture => None,
            Self::NotOnBoard(picture) | Self::AlreadyCovered(picture) | Self::Coverable(picture) => {
                Some(picture)
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    AwaitingCover,
    AwaitingPass,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AwaitingCover => "a cover",
            Self::AwaitingPass => "a pass",
        })
    }
}

/// A human roll held until the roller confirms what to do with it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDecision {
    pub roll: DiceRoll,
    pub classification: Classification,
}

impl PendingDecision {
    pub const fn resolution(&self) -> Resolution {
        self.classification.resolution()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    AwaitingDecision(PendingDecision),
    Covered(Picture),
    Passed,
    Won(Picture),
}

impl TurnOutcome {
    pub const fn ends_turn(self) -> bool {
        !matches!(self, Self::AwaitingDecision(_))
    }
}
