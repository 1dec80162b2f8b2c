//! Virtual 3x3x3 Rubik's cube: piece state, facelet resolution, and an
//! animated move engine.
//!
//! The cube is a [`PieceRegistry`] of 27 cubies. Face turns are applied by a
//! [`MoveEngine`], one transaction at a time, and the cube's stickers are read
//! back as a [`FaceletState`] whose string form is the standard 54-character
//! facelet string (faces in U, R, F, D, L, B order).

mod engine;
mod errors;
mod facelets;
mod geometry;
pub mod interpolate;
mod notation;
mod registry;
#[cfg(test)]
mod tests;

/// Re-export of `cgmath`.
pub use cgmath;
pub use engine::*;
pub use errors::*;
pub use facelets::*;
pub use geometry::{Axis, Face, GridVec, Orientation, Sign};
pub use notation::*;
pub use registry::*;
