use thiserror::Error;

use crate::Face;

/// Error returned when a face cannot be resolved to 9 pieces.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("face {face} resolves to {found} pieces instead of 9")]
pub struct IncompleteFaceError {
    /// Face that was requested.
    pub face: Face,
    /// Number of pieces found on that face.
    pub found: usize,
}

/// Error returned when a string is not one of the 18 legal move tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized move token {0:?}")]
pub struct ParseMoveError(pub String);

/// Error returned by the move engine.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A transaction is already open.
    #[error("a move is already in progress")]
    Busy,
    /// The face to turn could not be resolved.
    #[error(transparent)]
    IncompleteFace(#[from] IncompleteFaceError),
}

/// Error returned when a facelet string does not describe a cube.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceletStringError {
    #[error("expected 54 facelets, got {0}")]
    WrongLength(usize),
    #[error("unknown facelet color {0:?}")]
    UnknownColor(char),
    #[error("color {color} appears {count} times instead of 9")]
    WrongCount { color: Face, count: usize },
    #[error("center of face {face} has color {color}")]
    CenterMismatch { face: Face, color: Face },
    #[error("no piece has colors {colors:?}")]
    UnknownPiece { colors: Vec<Face> },
    #[error("piece with colors {colors:?} appears more than once")]
    DuplicatePiece { colors: Vec<Face> },
}
