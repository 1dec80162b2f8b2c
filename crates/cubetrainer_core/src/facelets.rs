//! Facelet resolution: reading the cube's stickers face by face, and the
//! 54-character facelet string used as solver input.

use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;
use smallvec::SmallVec;
use strum::IntoEnumIterator;

use crate::{
    Face, FaceletStringError, GridVec, IncompleteFaceError, Orientation, PieceId, PieceRegistry,
};

/// Number of stickers on the cube.
pub const FACELET_COUNT: usize = 54;

/// Solved facelet string.
pub const SOLVED_STATE: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

/// Sticker seen at one slot of a face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceletRef {
    /// Piece that the sticker belongs to.
    pub piece: PieceId,
    /// Color of the sticker.
    pub color: Face,
}

/// The 9 stickers on one face in reading order, top-left to bottom-right as
/// seen from outside that face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceReading {
    /// Face that was read.
    pub face: Face,
    /// Stickers in reading order. Index 4 is the center.
    pub facelets: [FaceletRef; 9],
}
impl FaceReading {
    /// Returns the sticker colors in reading order.
    pub fn colors(&self) -> [Face; 9] {
        self.facelets.map(|f| f.color)
    }
}

/// Snapshot of every sticker on the cube, in U, R, F, D, L, B face order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceletState {
    faces: [FaceReading; 6],
}
impl fmt::Display for FaceletState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
impl FaceletState {
    /// Reads every face of the cube.
    pub fn capture(registry: &PieceRegistry) -> Result<Self, IncompleteFaceError> {
        let [u, r, f, d, l, b] = Face::ALL.map(|face| registry.capture_face(face));
        Ok(Self {
            faces: [u?, r?, f?, d?, l?, b?],
        })
    }

    /// Returns the reading of one face.
    pub fn face(&self, face: Face) -> &FaceReading {
        &self.faces[face as usize]
    }
    /// Returns the readings of all faces in U, R, F, D, L, B order.
    pub fn faces(&self) -> &[FaceReading; 6] {
        &self.faces
    }

    /// Iterates over the facelet string characters.
    pub fn chars(&self) -> impl '_ + Iterator<Item = char> {
        self.faces
            .iter()
            .flat_map(|reading| reading.facelets.iter())
            .map(|f| f.color.symbol())
    }
    /// Returns the 54-character facelet string: faces in U, R, F, D, L, B
    /// order, each read row by row, one color letter per sticker.
    pub fn to_state_string(&self) -> String {
        self.chars().collect()
    }

    /// Returns whether every face shows a single color.
    pub fn is_solved(&self) -> bool {
        self.faces
            .iter()
            .all(|reading| reading.colors().iter().all_equal())
    }
}

impl PieceRegistry {
    /// Reads the 9 stickers on a face. The reading reflects the placement of
    /// pieces at the time of the call.
    pub fn capture_face(&self, face: Face) -> Result<FaceReading, IncompleteFaceError> {
        let facelets = self.resolve_face(face)?;
        Ok(FaceReading { face, facelets })
    }

    /// Returns the 54-character facelet string.
    pub fn state_string(&self) -> Result<String, IncompleteFaceError> {
        Ok(FaceletState::capture(self)?.to_state_string())
    }

    /// Constructs a registry from a 54-character facelet string.
    ///
    /// Each cubie is identified by its set of colors, and its orientation by
    /// where those colors appear. Whether the resulting cube is solvable is
    /// not checked.
    pub fn from_facelets(s: &str) -> Result<Self, FaceletStringError> {
        let colors: Vec<Face> = s
            .chars()
            .map(|c| Face::from_symbol(c).ok_or(FaceletStringError::UnknownColor(c)))
            .collect::<Result<_, _>>()?;
        if colors.len() != FACELET_COUNT {
            return Err(FaceletStringError::WrongLength(colors.len()));
        }
        let counts = colors.iter().counts();
        for color in Face::iter() {
            let count = counts.get(&color).copied().unwrap_or(0);
            if count != 9 {
                return Err(FaceletStringError::WrongCount { color, count });
            }
        }
        for face in Face::iter() {
            let color = colors[face as usize * 9 + 4];
            if color != face {
                return Err(FaceletStringError::CenterMismatch { face, color });
            }
        }

        // Sticker color at each outward-facing grid slot.
        let color_at = |face: Face, pos: GridVec| -> Option<Face> {
            let index = face.grid_positions().iter().position(|&p| p == pos)?;
            Some(colors[face as usize * 9 + index])
        };

        let mut registry = PieceRegistry::solved();
        let mut seen = HashSet::new();
        let positions = registry.pieces().map(|(_, p)| p.home).collect_vec();
        for pos in positions {
            let stickers: SmallVec<[(Face, Face); 3]> = Face::iter()
                .filter_map(|face| Some((face, color_at(face, pos)?)))
                .collect();
            let piece_colors = stickers.iter().map(|&(_, color)| color).collect_vec();
            let unknown = || FaceletStringError::UnknownPiece {
                colors: piece_colors.clone(),
            };

            if !piece_colors.iter().map(|c| c.axis()).all_unique() {
                return Err(unknown());
            }
            let home = piece_colors
                .iter()
                .fold([0; 3], |acc, c| crate::geometry::add(acc, c.normal()));

            let orientation = match stickers.as_slice() {
                [] | [_] => Some(Orientation::IDENTITY),
                [(f1, c1), (f2, c2), ..] => Orientation::from_pairs(
                    [c1.normal(), c2.normal()],
                    [f1.normal(), f2.normal()],
                ),
            }
            .filter(|o| {
                stickers
                    .iter()
                    .all(|(face, color)| o.transform(color.normal()) == face.normal())
            })
            .ok_or_else(unknown)?;

            if !seen.insert(home) {
                return Err(FaceletStringError::DuplicatePiece {
                    colors: piece_colors,
                });
            }
            if let Some(id) = registry.piece_with_home(home) {
                registry.set_orientation(id, orientation);
            }
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{MoveToken, parse_moves};

    #[test]
    fn test_solved_state_string() {
        let registry = PieceRegistry::solved();
        assert_eq!(registry.state_string().unwrap(), SOLVED_STATE);
        assert!(FaceletState::capture(&registry).unwrap().is_solved());
    }

    #[test]
    fn test_known_turns() {
        let cases = [
            ("R", "UUFUUFUUFRRRRRRRRRFFDFFDFFDDDBDDBDDBLLLLLLLLLUBBUBBUBB"),
            ("U", "UUUUUUUUUBBBRRRRRRRRRFFFFFFDDDDDDDDDFFFLLLLLLLLLBBBBBB"),
            ("F", "UUUUUULLLURRURRURRFFFFFFFFFRRRDDDDDDLLDLLDLLDBBBBBBBBB"),
        ];
        for (token, expected) in cases {
            let mut registry = PieceRegistry::solved();
            registry.apply_move(token.parse::<MoveToken>().unwrap()).unwrap();
            assert_eq!(registry.state_string().unwrap(), expected, "{token}");
        }
    }

    #[test]
    fn test_from_facelets_roundtrip() {
        let mut registry = PieceRegistry::solved();
        for m in parse_moves("R U F' D2 L B' U2 R'").unwrap() {
            registry.apply_move(m).unwrap();
        }
        let s = registry.state_string().unwrap();
        let loaded = PieceRegistry::from_facelets(&s).unwrap();
        assert_eq!(loaded.state_string().unwrap(), s);
        assert!(loaded.is_consistent());
        assert_eq!(PieceRegistry::from_facelets(SOLVED_STATE).unwrap(), PieceRegistry::solved());
    }

    #[test]
    fn test_from_facelets_rejects_bad_input() {
        assert_eq!(
            PieceRegistry::from_facelets("UUU"),
            Err(FaceletStringError::WrongLength(3)),
        );
        let unknown = SOLVED_STATE.replacen('U', "X", 1);
        assert_eq!(
            PieceRegistry::from_facelets(&unknown),
            Err(FaceletStringError::UnknownColor('X')),
        );
        let miscounted = SOLVED_STATE.replacen('U', "R", 1);
        assert_eq!(
            PieceRegistry::from_facelets(&miscounted),
            Err(FaceletStringError::WrongCount {
                color: Face::U,
                count: 8,
            }),
        );
        // Swap the U and R centers.
        let mut chars = SOLVED_STATE.chars().collect_vec();
        chars.swap(4, 13);
        let swapped: String = chars.into_iter().collect();
        assert_eq!(
            PieceRegistry::from_facelets(&swapped),
            Err(FaceletStringError::CenterMismatch {
                face: Face::U,
                color: Face::R,
            }),
        );
    }

    #[test]
    fn test_from_facelets_rejects_impossible_piece() {
        // Swap two stickers of the UFR corner, mirroring it.
        let mut chars = SOLVED_STATE.chars().collect_vec();
        chars.swap(8, 9);
        let twisted: String = chars.into_iter().collect();
        assert!(matches!(
            PieceRegistry::from_facelets(&twisted),
            Err(FaceletStringError::UnknownPiece { .. }),
        ));
    }
}
