//! Solver that runs an external program.

use std::path::PathBuf;
use std::process::Command;

use cubetrainer_prefs::SolverPreferences;
use cubetrainer_sim::{Solver, SolverError};

/// Runs an external program with the facelet string as its last argument and
/// reads the solution from its standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSolver {
    pub command: PathBuf,
    pub args: Vec<String>,
}
impl ProcessSolver {
    /// Returns the solver configured in `prefs`, if any.
    pub fn from_prefs(prefs: &SolverPreferences) -> Option<Self> {
        Some(Self {
            command: prefs.command.clone()?,
            args: prefs.args.clone(),
        })
    }
}
impl Solver for ProcessSolver {
    fn solve(&mut self, facelets: &str) -> Result<String, SolverError> {
        log::debug!("Running solver {}", self.command.display());
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(facelets)
            .output()
            .map_err(|e| SolverError::Io(format!("{}: {e}", self.command.display())))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => output.status.to_string(),
                s => s.to_owned(),
            };
            return Err(SolverError::NoSolution(message));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
