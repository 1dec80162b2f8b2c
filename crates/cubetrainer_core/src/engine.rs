//! Move engine: performs one face turn at a time as an animated transaction.
//!
//! A transaction detaches the 8 non-center pieces of a face onto a pivot,
//! rotates the pivot at a fixed angular rate, and then reattaches the pieces
//! with their rotation snapped to an exact quarter turn.

use cgmath::{Deg, Quaternion, Rotation3};

use crate::interpolate::InterpolateFn;
use crate::{
    EngineError, Face, FaceletState, Frame, IncompleteFaceError, MoveToken, PieceId,
    PieceRegistry, Pivot,
};

/// Default angular speed of a turn, in degrees per second.
pub const DEFAULT_TWIST_SPEED: f32 = 300.0;
/// Default angular distance from the target at which a turn snaps, in degrees.
pub const DEFAULT_SNAP_EPSILON: f32 = 1.0;

/// Phase of the move engine.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EnginePhase {
    /// No transaction is open.
    #[default]
    Idle,
    /// Pieces are being detached onto the pivot.
    Detaching,
    /// The pivot is rotating toward its target angle.
    Rotating,
    /// Pieces are being reattached to the cube.
    Reattaching,
}

/// State of a face turn in progress.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transaction {
    /// Move being executed.
    pub token: MoveToken,
    /// Center piece of the face, which spins in place.
    pub center: PieceId,
    /// Pieces attached to the pivot.
    pub pieces: [PieceId; 8],
    /// Pivot that the pieces rotate with.
    pub pivot: Pivot,
    /// Signed target angle in degrees.
    pub target_degrees: f32,
    /// Signed angle reached so far in degrees. Accumulated in `f64` so that
    /// tiny time steps still make progress.
    pub current_degrees: f64,
}
impl Transaction {
    /// Returns the fraction of the turn completed, from 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        if self.target_degrees == 0.0 {
            1.0
        } else {
            (self.current_degrees / f64::from(self.target_degrees)).clamp(0.0, 1.0) as f32
        }
    }

    fn face(&self) -> Face {
        self.token.face
    }

    fn set_angle(&mut self, degrees: f64) {
        self.current_degrees = degrees;
        self.pivot.rotation =
            Quaternion::from_axis_angle(self.face().vector(), Deg(degrees as f32));
    }
}

/// Move that finished on the latest call to [`MoveEngine::advance()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CompletedMove {
    /// Move that was applied.
    pub token: MoveToken,
    /// Facelets captured after reattaching, or the error if some face could
    /// not be read. The move has been applied either way.
    pub state: Result<FaceletState, IncompleteFaceError>,
}

/// Executes one face turn at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveEngine {
    phase: EnginePhase,
    transaction: Option<Transaction>,
    /// Angular speed in degrees per second. A non-positive or non-finite speed
    /// completes every turn on the next call to [`MoveEngine::advance()`], as
    /// does an invalid time step.
    pub twist_speed: f32,
    /// Angular distance from the target in degrees at which a turn snaps to
    /// its target.
    pub snap_epsilon: f32,
}
impl Default for MoveEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TWIST_SPEED, DEFAULT_SNAP_EPSILON)
    }
}
impl MoveEngine {
    /// Constructs an idle move engine.
    pub fn new(twist_speed: f32, snap_epsilon: f32) -> Self {
        Self {
            phase: EnginePhase::Idle,
            transaction: None,
            twist_speed,
            snap_epsilon,
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }
    /// Returns whether no transaction is open.
    pub fn is_idle(&self) -> bool {
        self.phase == EnginePhase::Idle
    }
    /// Returns the open transaction, if any.
    pub fn transaction(&self) -> Option<&Transaction> {
        self.transaction.as_ref()
    }
    /// Returns the fraction of the current turn completed, or `None` if idle.
    pub fn progress(&self) -> Option<f32> {
        Some(self.transaction.as_ref()?.progress())
    }

    /// Opens a transaction for `token`: detaches the face's 8 outer pieces onto
    /// a pivot and starts rotating.
    ///
    /// If the face cannot be resolved, nothing is detached and the engine
    /// stays idle.
    pub fn begin(&mut self, token: MoveToken, registry: &mut PieceRegistry) -> Result<(), EngineError> {
        if !self.is_idle() {
            return Err(EngineError::Busy);
        }

        self.phase = EnginePhase::Detaching;
        let group = match registry.face_group(token.face) {
            Ok(group) => group,
            Err(e) => {
                self.phase = EnginePhase::Idle;
                return Err(e.into());
            }
        };
        let center = group[4];
        let pieces = [0, 1, 2, 3, 5, 6, 7, 8].map(|i| group[i]);
        registry.reparent_subset(&pieces, token.face);
        log::trace!("begin {token} on pieces {pieces:?}");

        self.transaction = Some(Transaction {
            token,
            center,
            pieces,
            pivot: Pivot::new(token.face),
            target_degrees: token.degrees(),
            current_degrees: 0.0,
        });
        self.phase = EnginePhase::Rotating;
        Ok(())
    }

    /// Rotates the open transaction by `dt` seconds' worth of angle. When the
    /// angle reaches the target, reattaches the pieces, captures the facelets,
    /// and returns to idle.
    ///
    /// Returns the completed move, if one finished.
    pub fn advance(&mut self, dt: f32, registry: &mut PieceRegistry) -> Option<CompletedMove> {
        let t = self.transaction.as_mut()?;

        let speed_is_valid = self.twist_speed.is_finite() && self.twist_speed > 0.0;
        let step = f64::from(self.twist_speed) * f64::from(dt);
        let target = f64::from(t.target_degrees);
        let remaining = target - t.current_degrees;
        if !speed_is_valid || step.is_nan() || step < 0.0 || step >= remaining.abs() {
            t.set_angle(target);
        } else {
            t.set_angle(t.current_degrees + step.copysign(remaining));
        }

        if (target - t.current_degrees).abs() > f64::from(self.snap_epsilon) {
            return None;
        }
        t.set_angle(target);

        self.phase = EnginePhase::Reattaching;
        let t = *t;
        self.transaction = None;
        let snapped = registry.restore_parent(&t.pieces, &t.pivot);
        registry.spin_in_place(t.center, snapped);
        self.phase = EnginePhase::Idle;
        log::trace!("completed {}", t.token);

        Some(CompletedMove {
            token: t.token,
            state: FaceletState::capture(registry),
        })
    }

    /// Returns the displayed rotation of a piece relative to the cube's root
    /// frame, including the rotation of the pivot if the piece is attached to
    /// one. `interpolate` shapes the displayed progress of the turn.
    pub fn piece_rotation(
        &self,
        registry: &PieceRegistry,
        piece: PieceId,
        interpolate: InterpolateFn,
    ) -> Option<Quaternion<f32>> {
        let p = registry.piece(piece)?;
        let base = p.orientation.to_quaternion();
        let pivot = match (p.frame, &self.transaction) {
            (Frame::Pivot(_), Some(t)) => Some(t),
            (Frame::Root, Some(t)) if t.center == piece => Some(t),
            _ => None,
        };
        Some(match pivot {
            Some(t) => {
                let degrees = t.target_degrees * interpolate(t.progress());
                Quaternion::from_axis_angle(t.face().vector(), Deg(degrees)) * base
            }
            None => base,
        })
    }
}
