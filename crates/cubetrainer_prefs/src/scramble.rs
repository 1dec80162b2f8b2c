use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScramblePreferences {
    /// Minimum number of moves in a scramble (inclusive).
    pub min_moves: u32,
    /// Maximum number of moves in a scramble (exclusive).
    pub max_moves: u32,
}
impl Default for ScramblePreferences {
    fn default() -> Self {
        Self {
            min_moves: 10,
            max_moves: 30,
        }
    }
}
