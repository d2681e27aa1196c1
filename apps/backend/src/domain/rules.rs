use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_PLAYERS: usize = 4;
pub const MAX_PLAYERS: usize = 6;

/// Cards revealed to each player when a round is dealt.
pub const INITIAL_REVEAL: usize = 4;

/// Bonus for hitting a prediction exactly (on top of the prediction itself).
pub const EXACT_PREDICTION_BONUS: u32 = 10;

/// Seat count for a game, validated to 4..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerCount(usize);

impl PlayerCount {
    pub fn new(count: usize) -> Result<Self, DomainError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!("A game needs {MIN_PLAYERS} to {MAX_PLAYERS} players, not {count}"),
            ));
        }
        Ok(Self(count))
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// Number of rounds in a game: one per player.
    pub const fn total_rounds(self) -> u8 {
        self.0 as u8
    }

    /// Cards dealt to each player: 13, 10 or 8.
    pub const fn hand_size(self) -> u8 {
        (52 - Self::removed_twos(self.0)) as u8 / self.0 as u8
    }

    const fn removed_twos(count: usize) -> usize {
        match count {
            5 => 2,
            6 => 4,
            _ => 0,
        }
    }
}

pub fn valid_prediction_range(hand_size: u8) -> RangeInclusive<u8> {
    0..=hand_size
}

/// Table rules chosen by the host when starting a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Require players to follow the leading suit when they can.
    pub must_follow_suit: bool,
}
