//! Piece registry: the 27 cubies, their stickers, and their placement.

use std::fmt;

use cgmath::Quaternion;
use itertools::Itertools;
use smallvec::SmallVec;
use strum::IntoEnumIterator;

use crate::{Face, FaceletRef, GridVec, IncompleteFaceError, MoveToken, Orientation};

/// Index of a piece in a [`PieceRegistry`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);
impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of cubie, determined by its number of stickers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// Hidden cubie at the center of the cube.
    Core,
    /// Face center (1 sticker).
    Center,
    /// Edge (2 stickers).
    Edge,
    /// Corner (3 stickers).
    Corner,
}

/// Sticker on a piece.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Facelet {
    /// Outward normal of the sticker when the piece is in its home orientation.
    pub home_normal: GridVec,
    /// Color of the sticker.
    pub color: Face,
}

/// Frame that a piece's transform is currently relative to.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Permanent frame of the whole cube.
    #[default]
    Root,
    /// Temporary pivot of a face turn in progress.
    Pivot(Face),
}

/// Temporary frame that a face's pieces rotate with during a turn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pivot {
    /// Face being turned.
    pub face: Face,
    /// Rotation of the pivot relative to the cube's root frame.
    pub rotation: Quaternion<f32>,
}
impl Pivot {
    /// Constructs a pivot for `face` with no rotation.
    pub fn new(face: Face) -> Self {
        Self {
            face,
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }
}

/// One of the 27 cubies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// Grid position when solved.
    pub home: GridVec,
    /// Stickers on the piece.
    pub facelets: SmallVec<[Facelet; 3]>,
    /// Rotation relative to the cube's root frame, excluding any pivot.
    pub orientation: Orientation,
    /// Frame the piece is currently attached to.
    pub frame: Frame,
}
impl Piece {
    /// Constructs a piece in its home position, with one sticker on each side
    /// of the cube that it touches.
    pub fn solved(home: GridVec) -> Self {
        let facelets = Face::iter()
            .filter(|face| home[face.axis() as usize] == face.sign().int())
            .map(|color| Facelet {
                home_normal: color.normal(),
                color,
            })
            .collect();
        Self {
            home,
            facelets,
            orientation: Orientation::IDENTITY,
            frame: Frame::Root,
        }
    }

    /// Returns what kind of piece this is.
    pub fn kind(&self) -> PieceKind {
        match self.facelets.len() {
            0 => PieceKind::Core,
            1 => PieceKind::Center,
            2 => PieceKind::Edge,
            _ => PieceKind::Corner,
        }
    }

    /// Returns the current grid position of the piece in the root frame.
    pub fn position(&self) -> GridVec {
        self.orientation.transform(self.home)
    }

    /// Returns the color of the sticker facing outward from `face`, if the
    /// piece has one.
    pub fn color_facing(&self, face: Face) -> Option<Face> {
        self.facelets
            .iter()
            .find(|f| self.orientation.transform(f.home_normal) == face.normal())
            .map(|f| f.color)
    }

    /// Returns whether every sticker on the piece faces the side of its color.
    pub fn is_solved(&self) -> bool {
        self.facelets
            .iter()
            .all(|f| self.orientation.transform(f.home_normal) == f.color.normal())
    }
}

/// Owner of all pieces of the cube and their placement.
///
/// A new registry is empty; faces cannot be resolved until it has been
/// populated, e.g. with [`PieceRegistry::solved()`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PieceRegistry {
    pieces: Vec<Piece>,
}
impl PieceRegistry {
    /// Number of pieces in a complete cube.
    pub const PIECE_COUNT: usize = 27;

    /// Constructs an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
    /// Constructs a registry containing a solved cube.
    pub fn solved() -> Self {
        let coords = -1..=1;
        let pieces = itertools::iproduct!(coords.clone(), coords.clone(), coords)
            .map(|(x, y, z)| Piece::solved([x, y, z]))
            .collect();
        Self { pieces }
    }
    /// Constructs a registry from a list of pieces.
    pub fn from_pieces(pieces: Vec<Piece>) -> Self {
        Self { pieces }
    }

    /// Returns whether the registry contains any pieces.
    pub fn is_initialized(&self) -> bool {
        !self.pieces.is_empty()
    }
    /// Returns the number of pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }
    /// Returns whether there are no pieces.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Returns a piece.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }
    /// Iterates over all pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, p)| (PieceId(i), p))
    }
    /// Returns the piece at a grid position.
    pub fn piece_at(&self, pos: GridVec) -> Option<PieceId> {
        self.pieces().find(|(_, p)| p.position() == pos).map(|(id, _)| id)
    }

    /// Returns the piece whose solved position is `home`.
    pub fn piece_with_home(&self, home: GridVec) -> Option<PieceId> {
        self.pieces().find(|(_, p)| p.home == home).map(|(id, _)| id)
    }
    pub(crate) fn set_orientation(&mut self, id: PieceId, orientation: Orientation) {
        if let Some(piece) = self.pieces.get_mut(id.0) {
            piece.orientation = orientation;
        }
    }

    /// Resolves a face to its 9 stickers in reading order.
    pub(crate) fn resolve_face(&self, face: Face) -> Result<[FaceletRef; 9], IncompleteFaceError> {
        let found = face
            .grid_positions()
            .into_iter()
            .filter_map(|pos| {
                let piece = self.piece_at(pos)?;
                let color = self.piece(piece)?.color_facing(face)?;
                Some(FaceletRef { piece, color })
            })
            .collect_vec();
        let n = found.len();
        found
            .try_into()
            .map_err(|_| IncompleteFaceError { face, found: n })
    }

    /// Returns the 9 pieces on a face in reading order. Index 4 is the face's
    /// center piece.
    pub fn face_group(&self, face: Face) -> Result<[PieceId; 9], IncompleteFaceError> {
        Ok(self.resolve_face(face)?.map(|f| f.piece))
    }

    /// Attaches `pieces` to a temporary pivot frame for `face`. Their
    /// root-relative orientation is kept so that the displayed transform is
    /// the pivot's rotation composed with it.
    pub fn reparent_subset(&mut self, pieces: &[PieceId], face: Face) {
        for &id in pieces {
            if let Some(piece) = self.pieces.get_mut(id.0) {
                debug_assert_eq!(piece.frame, Frame::Root, "piece {id} is already detached");
                piece.frame = Frame::Pivot(face);
            }
        }
    }

    /// Reattaches `pieces` to the root frame, baking in the pivot's rotation
    /// snapped to the nearest quarter turn. Returns the snapped rotation.
    pub fn restore_parent(&mut self, pieces: &[PieceId], pivot: &Pivot) -> Orientation {
        let snapped = Orientation::nearest(pivot.rotation);
        for &id in pieces {
            if let Some(piece) = self.pieces.get_mut(id.0) {
                piece.orientation = snapped * piece.orientation;
                piece.frame = Frame::Root;
            }
        }
        snapped
    }

    /// Spins a piece in place. Used for face centers, which never leave their
    /// face.
    pub fn spin_in_place(&mut self, id: PieceId, rotation: Orientation) {
        if let Some(piece) = self.pieces.get_mut(id.0) {
            piece.orientation = rotation * piece.orientation;
        }
    }

    /// Applies a whole face turn instantly.
    pub fn apply_move(&mut self, token: MoveToken) -> Result<(), IncompleteFaceError> {
        let group = self.face_group(token.face)?;
        let rotation = Orientation::quarter_turns(token.face, token.turn.quarter_turns());
        for id in group {
            self.spin_in_place(id, rotation);
        }
        Ok(())
    }

    /// Returns whether every sticker faces the side of its color.
    pub fn is_solved(&self) -> bool {
        self.pieces.iter().all(Piece::is_solved)
    }

    /// Returns whether the registry describes a physically valid cube: 27
    /// pieces at distinct grid positions, all attached to the root frame, each
    /// with exactly one sticker on every face it touches.
    pub fn is_consistent(&self) -> bool {
        self.pieces.len() == Self::PIECE_COUNT
            && self.pieces.iter().map(Piece::position).all_unique()
            && self.pieces.iter().all(|piece| {
                let pos = piece.position();
                let touched = pos.iter().filter(|&&c| c != 0).count();
                piece.frame == Frame::Root
                    && piece.facelets.len() == touched
                    && Face::iter()
                        .filter(|face| pos[face.axis() as usize] == face.sign().int())
                        .all(|face| piece.color_facing(face).is_some())
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_solved_multiplicity() {
        let registry = PieceRegistry::solved();
        assert_eq!(registry.len(), 27);
        let counts = registry.pieces().map(|(_, p)| p.kind()).counts();
        assert_eq!(counts[&PieceKind::Core], 1);
        assert_eq!(counts[&PieceKind::Center], 6);
        assert_eq!(counts[&PieceKind::Edge], 12);
        assert_eq!(counts[&PieceKind::Corner], 8);
        assert!(registry.is_consistent());
        assert!(registry.is_solved());
    }

    #[test]
    fn test_face_group_center_is_index_4() {
        let registry = PieceRegistry::solved();
        for face in Face::iter() {
            let group = registry.face_group(face).unwrap();
            let center = registry.piece(group[4]).unwrap();
            assert_eq!(center.kind(), PieceKind::Center);
            assert_eq!(center.position(), face.normal());
        }
    }

    #[test]
    fn test_empty_registry_has_incomplete_faces() {
        let registry = PieceRegistry::new();
        assert!(!registry.is_initialized());
        assert_eq!(
            registry.face_group(Face::U),
            Err(IncompleteFaceError {
                face: Face::U,
                found: 0,
            }),
        );
    }

    #[test]
    fn test_missing_piece_is_incomplete() {
        let mut pieces = PieceRegistry::solved().pieces().map(|(_, p)| p.clone()).collect_vec();
        pieces.retain(|p| p.home != [1, 1, 1]);
        let registry = PieceRegistry::from_pieces(pieces);
        assert_eq!(
            registry.face_group(Face::R),
            Err(IncompleteFaceError {
                face: Face::R,
                found: 8,
            }),
        );
        assert!(registry.face_group(Face::L).is_ok());
        assert!(!registry.is_consistent());
    }

    #[test]
    fn test_piece_ids_do_not_wrap() {
        let pieces = std::iter::repeat_n(Piece::solved([1, 1, 1]), 300).collect_vec();
        let registry = PieceRegistry::from_pieces(pieces);
        let ids = registry.pieces().map(|(id, _)| id).collect_vec();
        assert_eq!(ids.len(), 300);
        assert_eq!(ids.iter().unique().count(), 300);
        assert_eq!(ids[299], PieceId(299));
        assert!(registry.piece(PieceId(299)).is_some());
        assert!(registry.piece(PieceId(300)).is_none());
    }

    #[test]
    fn test_reparent_and_restore() {
        let mut registry = PieceRegistry::solved();
        let group = registry.face_group(Face::F).unwrap();
        let ring = [0, 1, 2, 3, 5, 6, 7, 8].map(|i| group[i]);
        registry.reparent_subset(&ring, Face::F);
        assert!(!registry.is_consistent());

        let mut pivot = Pivot::new(Face::F);
        pivot.rotation = Orientation::quarter_turns(Face::F, -1).to_quaternion();
        let snapped = registry.restore_parent(&ring, &pivot);
        registry.spin_in_place(group[4], snapped);
        assert!(registry.is_consistent());

        let mut expected = PieceRegistry::solved();
        expected.apply_move("F".parse().unwrap()).unwrap();
        assert_eq!(registry, expected);
    }
}
