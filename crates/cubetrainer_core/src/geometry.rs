//! Grid geometry of a 3x3x3 cube: axes, faces, and exact quarter-turn
//! orientations.
//!
//! Coordinates use a right-handed frame with X pointing right, Y pointing up,
//! and Z pointing towards the viewer (out of the front face). Every cubie sits
//! at a grid point with coordinates in `{-1, 0, 1}`.

use std::fmt;
use std::ops::Mul;
use std::sync::LazyLock;

use cgmath::{InnerSpace, Matrix3, Quaternion, Vector3};
use itertools::Itertools;
use strum::{EnumIter, IntoEnumIterator};

/// Integer point or direction on the cube grid.
pub type GridVec = [i8; 3];

/// Returns the sum of two grid vectors.
pub fn add(a: GridVec, b: GridVec) -> GridVec {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Returns a grid vector multiplied by a scalar.
pub fn scale(v: GridVec, s: i8) -> GridVec {
    [v[0] * s, v[1] * s, v[2] * s]
}

/// Returns the cross product of two grid vectors.
pub fn cross(a: GridVec, b: GridVec) -> GridVec {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// 3-dimensional axis.
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl Axis {
    /// Returns the unit grid vector along this axis.
    pub fn unit(self) -> GridVec {
        let mut ret = [0; 3];
        ret[self as usize] = 1;
        ret
    }
}

/// Sign of a face along its axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    Pos = 1,
}
impl Sign {
    /// Returns the sign as an integer, either `-1` or `1`.
    pub fn int(self) -> i8 {
        self as i8
    }
}

/// One of the six faces of the cube.
///
/// Faces double as the six sticker colors: a sticker's color is named after
/// the face it occupies when the cube is solved. Discriminants follow the
/// facelet string order (U, R, F, D, L, B).
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    /// Up.
    U = 0,
    /// Right.
    R = 1,
    /// Front.
    F = 2,
    /// Down.
    D = 3,
    /// Left.
    L = 4,
    /// Back.
    B = 5,
}
impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl Face {
    /// Number of faces on a cube.
    pub const COUNT: usize = 6;
    /// All faces in facelet string order.
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    /// Returns the face with the given single-letter symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        Face::iter().find(|f| f.symbol() == c)
    }
    /// Returns the single-letter symbol for this face.
    pub fn symbol(self) -> char {
        use Face::*;

        match self {
            U => 'U',
            R => 'R',
            F => 'F',
            D => 'D',
            L => 'L',
            B => 'B',
        }
    }
    /// Returns the human-friendly name of this face.
    pub fn name(self) -> &'static str {
        use Face::*;

        match self {
            U => "Up",
            R => "Right",
            F => "Front",
            D => "Down",
            L => "Left",
            B => "Back",
        }
    }

    /// Returns the axis perpendicular to this face.
    pub fn axis(self) -> Axis {
        use Face::*;

        match self {
            R | L => Axis::X,
            U | D => Axis::Y,
            F | B => Axis::Z,
        }
    }
    /// Returns the sign of this face along its perpendicular axis.
    pub fn sign(self) -> Sign {
        use Face::*;

        match self {
            R | U | F => Sign::Pos,
            L | D | B => Sign::Neg,
        }
    }
    /// Returns the face on the opposite side of the cube.
    #[must_use]
    pub fn opposite(self) -> Self {
        use Face::*;

        match self {
            U => D,
            R => L,
            F => B,
            D => U,
            L => R,
            B => F,
        }
    }

    /// Returns the outward unit normal of this face, which is also the grid
    /// position of its center cubie.
    pub fn normal(self) -> GridVec {
        scale(self.axis().unit(), self.sign().int())
    }
    /// Returns the face whose outward normal is `v`, if there is one.
    pub fn from_normal(v: GridVec) -> Option<Self> {
        Face::iter().find(|f| f.normal() == v)
    }
    /// Returns the outward unit normal of this face as a float vector.
    pub fn vector(self) -> Vector3<f32> {
        let [x, y, z] = self.normal();
        Vector3::new(x as f32, y as f32, z as f32)
    }

    /// Returns the `(right, down)` directions of this face's reading order, as
    /// seen from outside the cube.
    ///
    /// U is read with B at the top and D with F at the top; the four side faces
    /// are read with U at the top.
    pub fn reading_basis(self) -> (GridVec, GridVec) {
        use Face::*;

        match self {
            U => ([1, 0, 0], [0, 0, 1]),
            R => ([0, 0, -1], [0, -1, 0]),
            F => ([1, 0, 0], [0, -1, 0]),
            D => ([1, 0, 0], [0, 0, -1]),
            L => ([0, 0, 1], [0, -1, 0]),
            B => ([-1, 0, 0], [0, -1, 0]),
        }
    }
    /// Returns the grid positions of the 9 cubies on this face in reading
    /// order. Index 4 is the center.
    pub fn grid_positions(self) -> [GridVec; 9] {
        let (right, down) = self.reading_basis();
        std::array::from_fn(|i| {
            let row = (i / 3) as i8 - 1;
            let col = (i % 3) as i8 - 1;
            add(self.normal(), add(scale(right, col), scale(down, row)))
        })
    }
}

/// Every proper rotation of the cube onto itself.
static ALL_ORIENTATIONS: LazyLock<Vec<Orientation>> = LazyLock::new(|| {
    let generators = [
        Orientation::quarter_turns(Face::R, 1),
        Orientation::quarter_turns(Face::U, 1),
    ];
    let mut ret = vec![Orientation::IDENTITY];
    let mut i = 0;
    while i < ret.len() {
        for &g in &generators {
            let next = g * ret[i];
            if !ret.contains(&next) {
                ret.push(next);
            }
        }
        i += 1;
    }
    ret
});

/// Exact rotation of the cube grid, stored as a signed permutation matrix.
///
/// Composition is exact, so a piece that has been turned any number of times
/// never accumulates floating-point drift.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Orientation([[i8; 3]; 3]);
impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
impl Mul for Orientation {
    type Output = Self;

    /// Composes two orientations. `(a * b)` applies `b` first, then `a`.
    fn mul(self, rhs: Self) -> Self {
        let mut ret = [[0; 3]; 3];
        for (i, j) in (0..3).cartesian_product(0..3) {
            ret[i][j] = (0..3).map(|k| self.0[i][k] * rhs.0[k][j]).sum();
        }
        Self(ret)
    }
}
impl Orientation {
    /// Identity rotation.
    pub const IDENTITY: Self = Self([[1, 0, 0], [0, 1, 0], [0, 0, 1]]);

    /// Returns all 24 rotations of the cube.
    pub fn all() -> &'static [Orientation] {
        &ALL_ORIENTATIONS
    }

    /// Returns the rotation by `quarter_turns * 90` degrees around the outward
    /// normal of `face`. Positive is counterclockwise as seen from outside
    /// that face.
    pub fn quarter_turns(face: Face, quarter_turns: i32) -> Self {
        let (c, s) = match quarter_turns.rem_euclid(4) {
            0 => (1, 0),
            1 => (0, 1),
            2 => (-1, 0),
            _ => (0, -1),
        };
        let a = face.normal();
        // Rodrigues' rotation formula; exact because every term is an integer.
        let skew = [[0, -a[2], a[1]], [a[2], 0, -a[0]], [-a[1], a[0], 0]];
        let mut ret = [[0; 3]; 3];
        for (i, j) in (0..3).cartesian_product(0..3) {
            let identity = if i == j { c } else { 0 };
            ret[i][j] = identity + s * skew[i][j] + (1 - c) * a[i] * a[j];
        }
        Self(ret)
    }

    /// Builds an orientation from the images of the X, Y, and Z unit vectors.
    /// Returns `None` if the result is not a proper rotation of the cube.
    pub fn from_columns(x: GridVec, y: GridVec, z: GridVec) -> Option<Self> {
        let mut ret = [[0; 3]; 3];
        for (j, col) in [x, y, z].into_iter().enumerate() {
            for i in 0..3 {
                ret[i][j] = col[i];
            }
        }
        let ret = Self(ret);
        Self::all().contains(&ret).then_some(ret)
    }

    /// Returns the rotation that sends `from[0]` to `to[0]` and `from[1]` to
    /// `to[1]`, if there is one. All four vectors must be axis-aligned units.
    pub fn from_pairs(from: [GridVec; 2], to: [GridVec; 2]) -> Option<Self> {
        let from = [from[0], from[1], cross(from[0], from[1])];
        let to = [to[0], to[1], cross(to[0], to[1])];
        let column = |j: usize| -> GridVec {
            (0..3).fold([0; 3], |acc, k| add(acc, scale(to[k], from[k][j])))
        };
        Self::from_columns(column(0), column(1), column(2))
    }

    /// Applies the rotation to a grid vector.
    pub fn transform(self, v: GridVec) -> GridVec {
        std::array::from_fn(|i| (0..3).map(|k| self.0[i][k] * v[k]).sum())
    }

    /// Returns the inverse rotation.
    #[must_use]
    pub fn inverse(self) -> Self {
        let m = self.0;
        Self(std::array::from_fn(|i| std::array::from_fn(|j| m[j][i])))
    }

    /// Returns whether this is the identity rotation.
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Returns the rotation as a float matrix.
    pub fn to_matrix3(self) -> Matrix3<f32> {
        let col = |j: usize| {
            Vector3::new(
                self.0[0][j] as f32,
                self.0[1][j] as f32,
                self.0[2][j] as f32,
            )
        };
        Matrix3::from_cols(col(0), col(1), col(2))
    }
    /// Returns the rotation as a unit quaternion.
    pub fn to_quaternion(self) -> Quaternion<f32> {
        Quaternion::from(self.to_matrix3())
    }

    /// Snaps an arbitrary rotation to the nearest rotation of the cube.
    pub fn nearest(q: Quaternion<f32>) -> Self {
        let q = q.normalize();
        Self::all()
            .iter()
            .copied()
            .max_by(|a, b| {
                let da = a.to_quaternion().dot(q).abs();
                let db = b.to_quaternion().dot(q).abs();
                da.total_cmp(&db)
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Deg, Rotation3};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cube_has_24_rotations() {
        assert_eq!(Orientation::all().len(), 24);
    }

    #[test]
    fn test_quarter_turn_directions() {
        // Clockwise U sends the front to the left.
        let u = Orientation::quarter_turns(Face::U, -1);
        assert_eq!(u.transform(Face::F.normal()), Face::L.normal());
        // Clockwise R sends the front to the top.
        let r = Orientation::quarter_turns(Face::R, -1);
        assert_eq!(r.transform(Face::F.normal()), Face::U.normal());
        // Clockwise L sends the front to the bottom.
        let l = Orientation::quarter_turns(Face::L, -1);
        assert_eq!(l.transform(Face::F.normal()), Face::D.normal());
    }

    #[test]
    fn test_quarter_turns_compose() {
        for face in Face::iter() {
            let q = Orientation::quarter_turns(face, 1);
            assert_eq!(q * q, Orientation::quarter_turns(face, 2));
            assert_eq!(q * q * q * q, Orientation::IDENTITY);
            assert_eq!(q.inverse(), Orientation::quarter_turns(face, -1));
        }
    }

    #[test]
    fn test_quaternion_matches_exact_rotation() {
        for face in Face::iter() {
            for quarter_turns in -2..=2 {
                let exact = Orientation::quarter_turns(face, quarter_turns);
                let q = Quaternion::from_axis_angle(face.vector(), Deg(90.0 * quarter_turns as f32));
                assert_eq!(Orientation::nearest(q), exact);
            }
        }
    }

    #[test]
    fn test_from_pairs() {
        let r = Orientation::quarter_turns(Face::R, -1);
        let from = [Face::F.normal(), Face::R.normal()];
        let to = from.map(|v| r.transform(v));
        assert_eq!(Orientation::from_pairs(from, to), Some(r));
        // Parallel vectors don't determine a rotation.
        assert_eq!(
            Orientation::from_pairs([Face::F.normal(), Face::B.normal()], to),
            None,
        );
    }

    #[test]
    fn test_nearest_snaps_drift() {
        let target = Orientation::quarter_turns(Face::F, -1);
        let q = Quaternion::from_axis_angle(Face::F.vector(), Deg(-89.3));
        assert_eq!(Orientation::nearest(q), target);
    }

    #[test]
    fn test_reading_order_corners() {
        assert_eq!(Face::U.grid_positions()[0], [-1, 1, -1]);
        assert_eq!(Face::R.grid_positions()[0], [1, 1, 1]);
        assert_eq!(Face::F.grid_positions()[0], [-1, 1, 1]);
        assert_eq!(Face::D.grid_positions()[0], [-1, -1, 1]);
        assert_eq!(Face::L.grid_positions()[0], [-1, 1, -1]);
        assert_eq!(Face::B.grid_positions()[0], [1, 1, -1]);
        for face in Face::iter() {
            assert_eq!(face.grid_positions()[4], face.normal());
        }
    }
}
