use itertools::Itertools;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use strum::IntoEnumIterator;

use crate::*;

impl Arbitrary for MoveToken {
    type Parameters = ();

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        proptest::sample::select(MoveToken::all().collect_vec()).boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

fn apply_all(registry: &mut PieceRegistry, moves: &[MoveToken]) {
    for &m in moves {
        registry.apply_move(m).unwrap();
    }
}

/// Applies moves through the move engine, one frame at a time.
fn animate_all(registry: &mut PieceRegistry, moves: &[MoveToken], dt: f32) {
    let mut engine = MoveEngine::default();
    for &m in moves {
        engine.begin(m, registry).unwrap();
        while engine.advance(dt, registry).is_none() {}
    }
}

#[test]
fn test_four_quarter_turns_are_identity() {
    for face in Face::iter() {
        let mut registry = PieceRegistry::solved();
        let u = MoveToken::new(face, Turn::Clockwise);
        apply_all(&mut registry, &[u; 4]);
        assert_eq!(registry.state_string().unwrap(), SOLVED_STATE, "{face}");
        assert_eq!(registry, PieceRegistry::solved());
    }
}

#[test]
fn test_double_turn_is_two_quarter_turns() {
    for face in Face::iter() {
        let mut a = PieceRegistry::solved();
        let mut b = PieceRegistry::solved();
        apply_all(&mut a, &[MoveToken::new(face, Turn::Double)]);
        apply_all(&mut b, &[MoveToken::new(face, Turn::Clockwise); 2]);
        assert_eq!(a.state_string().unwrap(), b.state_string().unwrap(), "{face}");
    }
}

#[test]
fn test_r_then_r_prime() {
    let mut registry = PieceRegistry::solved();
    animate_all(&mut registry, &parse_moves("R R'").unwrap(), 1.0 / 60.0);
    assert_eq!(registry.state_string().unwrap(), SOLVED_STATE);
}

#[test]
fn test_sexy_move_has_order_six() {
    let moves = parse_moves("R U R' U'").unwrap();
    let mut registry = PieceRegistry::solved();
    for i in 1..=6 {
        apply_all(&mut registry, &moves);
        assert_eq!(registry.is_solved(), i == 6);
    }
}

proptest! {
    #[test]
    fn proptest_inverse_sequence_restores_state(moves: Vec<MoveToken>) {
        let mut registry = PieceRegistry::solved();
        apply_all(&mut registry, &parse_moves("F U2 L'").unwrap());
        let before = registry.state_string().unwrap();

        apply_all(&mut registry, &moves);
        apply_all(&mut registry, &invert_sequence(&moves));
        prop_assert_eq!(registry.state_string().unwrap(), before);
    }

    #[test]
    fn proptest_state_string_letter_counts(moves: Vec<MoveToken>) {
        let mut registry = PieceRegistry::solved();
        apply_all(&mut registry, &moves);
        let s = registry.state_string().unwrap();
        prop_assert_eq!(s.len(), FACELET_COUNT);
        let counts = s.chars().counts();
        for face in Face::iter() {
            prop_assert_eq!(counts.get(&face.symbol()).copied(), Some(9));
        }
        prop_assert!(registry.is_consistent());
        // Centers never leave their face.
        for face in Face::iter() {
            prop_assert_eq!(s.chars().nth(face as usize * 9 + 4), Some(face.symbol()));
        }
    }

    #[test]
    fn proptest_animated_matches_instant(
        moves in prop::collection::vec(any::<MoveToken>(), 0..8),
        fps in 10.0_f32..240.0,
    ) {
        let mut instant = PieceRegistry::solved();
        let mut animated = PieceRegistry::solved();
        apply_all(&mut instant, &moves);
        animate_all(&mut animated, &moves, 1.0 / fps);
        prop_assert_eq!(animated, instant);
    }

    #[test]
    fn proptest_facelet_string_roundtrip(moves: Vec<MoveToken>) {
        let mut registry = PieceRegistry::solved();
        apply_all(&mut registry, &moves);
        let s = registry.state_string().unwrap();
        let loaded = PieceRegistry::from_facelets(&s).unwrap();
        prop_assert_eq!(loaded.state_string().unwrap(), s);
    }
}
