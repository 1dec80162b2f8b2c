//! Move token grammar.
//!
//! A move token is a face letter optionally followed by `'` (inverse) or `2`
//! (double), for 18 legal tokens in total.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use strum::{EnumIter, IntoEnumIterator};

use crate::{Face, ParseMoveError};

/// Direction and amount of a face turn.
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Quarter turn clockwise as seen from outside the face (no suffix).
    Clockwise,
    /// Quarter turn counterclockwise as seen from outside the face (`'`).
    CounterClockwise,
    /// Half turn (`2`).
    Double,
}
impl Turn {
    /// Returns the token suffix for this turn.
    pub fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Double => "2",
        }
    }
    /// Returns the signed number of counterclockwise quarter turns.
    pub fn quarter_turns(self) -> i32 {
        match self {
            Turn::Clockwise => -1,
            Turn::CounterClockwise => 1,
            Turn::Double => -2,
        }
    }
    /// Returns the signed rotation angle in degrees around the face's outward
    /// normal.
    pub fn degrees(self) -> f32 {
        self.quarter_turns() as f32 * 90.0
    }
    /// Returns the turn that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Double => Turn::Double,
        }
    }
}

/// One face turn, such as `R`, `R'`, or `R2`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveToken {
    /// Face to turn.
    pub face: Face,
    /// Direction and amount.
    pub turn: Turn,
}
impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.symbol(), self.turn.suffix())
    }
}
impl FromStr for MoveToken {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = chars.next().and_then(Face::from_symbol);
        let turn = match chars.as_str() {
            "" => Some(Turn::Clockwise),
            "'" => Some(Turn::CounterClockwise),
            "2" => Some(Turn::Double),
            _ => None,
        };
        match (face, turn) {
            (Some(face), Some(turn)) => Ok(MoveToken { face, turn }),
            _ => Err(ParseMoveError(s.to_owned())),
        }
    }
}
impl MoveToken {
    /// Constructs a move token.
    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    /// Returns all 18 legal move tokens.
    pub fn all() -> impl Iterator<Item = MoveToken> {
        Face::iter()
            .cartesian_product(Turn::iter())
            .map(|(face, turn)| MoveToken { face, turn })
    }

    /// Returns the token that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            face: self.face,
            turn: self.turn.inverse(),
        }
    }

    /// Returns the signed rotation angle in degrees around the face's outward
    /// normal. A plain turn is -90, an inverse turn is +90, and a double turn
    /// is -180.
    pub fn degrees(self) -> f32 {
        self.turn.degrees()
    }
}

/// Parses a whitespace-separated move sequence. Empty segments are ignored.
pub fn parse_moves(s: &str) -> Result<Vec<MoveToken>, ParseMoveError> {
    s.split_ascii_whitespace().map(str::parse).collect()
}

/// Returns the sequence that undoes `moves`: reversed, with each token
/// inverted.
pub fn invert_sequence(moves: &[MoveToken]) -> Vec<MoveToken> {
    moves.iter().rev().map(|m| m.inverse()).collect()
}

/// Formats a move sequence separated by spaces.
pub fn format_moves<'a>(moves: impl IntoIterator<Item = &'a MoveToken>) -> String {
    moves.into_iter().join(" ")
}
