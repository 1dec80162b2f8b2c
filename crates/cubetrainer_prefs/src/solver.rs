use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SolverPreferences {
    /// External solver program. It receives the facelet string as its last
    /// argument and prints a space-separated solution.
    pub command: Option<PathBuf>,
    /// Extra arguments passed before the facelet string.
    pub args: Vec<String>,
    /// Whether to solve the cube once as soon as it is ready.
    pub solve_on_start: bool,
}
