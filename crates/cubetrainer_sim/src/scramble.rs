//! Seeded random scrambles.

use cubetrainer_core::MoveToken;
use cubetrainer_prefs::ScramblePreferences;
use itertools::Itertools;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Parameters to deterministically generate a scramble.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScrambleParams {
    /// Minimum number of moves (inclusive).
    pub min_moves: u32,
    /// Maximum number of moves (exclusive).
    pub max_moves: u32,
    /// Random seed. The same seed always produces the same scramble.
    pub seed: String,
}
impl ScrambleParams {
    /// Constructs scramble parameters with a seed from the OS random number
    /// generator.
    pub fn random(min_moves: u32, max_moves: u32) -> Self {
        let seed = rand::rng().random::<u64>().to_string();
        Self {
            min_moves,
            max_moves,
            seed,
        }
    }
    /// Constructs scramble parameters with a random seed and the move count
    /// range from `prefs`.
    pub fn from_prefs(prefs: &ScramblePreferences) -> Self {
        Self::random(prefs.min_moves, prefs.max_moves)
    }

    /// Generates the scramble: a uniformly random number of moves in
    /// `min_moves..max_moves`, each chosen uniformly from all 18 move tokens.
    pub fn generate(&self) -> Result<Vec<MoveToken>, ScrambleError> {
        let Self {
            min_moves,
            max_moves,
            seed,
        } = self;
        if min_moves >= max_moves {
            return Err(ScrambleError::InvalidRange {
                min: *min_moves,
                max: *max_moves,
            });
        }

        let mut sha256 = Sha256::new();
        sha256.update(min_moves.to_le_bytes());
        sha256.update(max_moves.to_le_bytes());
        sha256.update(seed.len().to_le_bytes());
        sha256.update(seed.as_bytes());
        let mut rng = rand_chacha::ChaCha12Rng::from_seed(sha256.finalize().into());

        let alphabet = MoveToken::all().collect_vec();
        let count = rng.random_range(*min_moves..*max_moves);
        let moves = std::iter::from_fn(|| alphabet.choose(&mut rng).copied())
            .take(count as usize)
            .collect_vec();
        log::debug!("generated {}-move scramble from seed {seed:?}", moves.len());
        Ok(moves)
    }
}

/// Error returned when scramble parameters are invalid.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScrambleError {
    /// The move count range is empty.
    #[error("invalid scramble length range {min}..{max}")]
    InvalidRange {
        /// Minimum number of moves.
        min: u32,
        /// Maximum number of moves.
        max: u32,
    },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn params(seed: &str) -> ScrambleParams {
        ScrambleParams {
            min_moves: 10,
            max_moves: 30,
            seed: seed.to_owned(),
        }
    }

    #[test]
    fn test_same_seed_same_scramble() {
        assert_eq!(params("abc").generate(), params("abc").generate());
        assert_ne!(params("abc").generate(), params("abd").generate());
    }

    #[test]
    fn test_invalid_range() {
        let mut p = params("x");
        p.max_moves = 10;
        assert_eq!(p.generate(), Err(ScrambleError::InvalidRange { min: 10, max: 10 }));
    }

    #[test]
    fn test_single_length_range() {
        let p = ScrambleParams {
            min_moves: 5,
            max_moves: 6,
            seed: "fixed".to_owned(),
        };
        assert_eq!(p.generate().unwrap().len(), 5);
    }

    proptest! {
        #[test]
        fn proptest_scramble_length_in_range(seed: String) {
            let moves = params(&seed).generate().unwrap();
            prop_assert!((10..30).contains(&moves.len()));
        }
    }
}
