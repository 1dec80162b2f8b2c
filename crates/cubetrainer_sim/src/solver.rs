//! Adapter between the cube and an external solving algorithm.

use cubetrainer_core::{FaceletState, MoveToken, parse_moves};

use crate::MoveQueue;

/// External solving algorithm.
///
/// A solver receives the 54-character facelet string and returns a
/// space-separated move sequence that solves it.
pub trait Solver {
    /// Solves the cube described by `facelets`.
    fn solve(&mut self, facelets: &str) -> Result<String, SolverError>;
}
impl<F: FnMut(&str) -> Result<String, SolverError>> Solver for F {
    fn solve(&mut self, facelets: &str) -> Result<String, SolverError> {
        self(facelets)
    }
}

/// Error from an external solver.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The solver reported that there is no solution.
    #[error("no solution: {0}")]
    NoSolution(String),
    /// The solver's output contained something other than move tokens.
    #[error("malformed solver output: unrecognized token {token:?}")]
    Malformed {
        /// First token that could not be parsed.
        token: String,
    },
    /// The solver could not be run.
    #[error("error running solver: {0}")]
    Io(String),
    /// No solver is configured.
    #[error("no solver configured")]
    Unavailable,
}

/// Parses solver output into move tokens. Output starting with `Error` is
/// treated as a report that there is no solution.
pub fn parse_solution(output: &str) -> Result<Vec<MoveToken>, SolverError> {
    let output = output.trim();
    if output.starts_with("Error") {
        return Err(SolverError::NoSolution(output.to_owned()));
    }
    parse_moves(output).map_err(|e| SolverError::Malformed { token: e.0 })
}

/// Invokes a [`Solver`] when a solve has been requested and enqueues its
/// solution.
pub struct SolverAdapter {
    solver: Option<Box<dyn Solver>>,
    pending: bool,
}
impl Default for SolverAdapter {
    fn default() -> Self {
        Self::new(None)
    }
}
impl std::fmt::Debug for SolverAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverAdapter")
            .field("has_solver", &self.solver.is_some())
            .field("pending", &self.pending)
            .finish()
    }
}
impl SolverAdapter {
    /// Constructs a solver adapter.
    pub fn new(solver: Option<Box<dyn Solver>>) -> Self {
        Self {
            solver,
            pending: false,
        }
    }

    /// Sets the solver.
    pub fn set_solver(&mut self, solver: Box<dyn Solver>) {
        self.solver = Some(solver);
    }
    /// Returns whether a solver is configured.
    pub fn has_solver(&self) -> bool {
        self.solver.is_some()
    }

    /// Requests a solve. Repeated requests before the solve runs are merged
    /// into one.
    pub fn request(&mut self) {
        self.pending = true;
    }
    /// Returns whether a solve has been requested but not yet run.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Runs the pending solve request on `state` and enqueues the solution.
    ///
    /// On failure, nothing is enqueued. Either way, the request is consumed.
    pub fn run(
        &mut self,
        state: &FaceletState,
        queue: &mut MoveQueue,
    ) -> Result<Vec<MoveToken>, SolverError> {
        self.pending = false;
        let solver = self.solver.as_mut().ok_or(SolverError::Unavailable)?;

        let facelets = state.to_state_string();
        log::info!("Solving {facelets}");
        let solution = parse_solution(&solver.solve(&facelets)?)?;
        log::info!("Solution: {}", cubetrainer_core::format_moves(&solution));

        queue.enqueue(solution.iter().map(|m| m.to_string()));
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use cubetrainer_core::PieceRegistry;
    use pretty_assertions::assert_eq;

    use super::*;

    fn solved_state() -> FaceletState {
        FaceletState::capture(&PieceRegistry::solved()).unwrap()
    }

    #[test]
    fn test_parse_solution() {
        assert_eq!(
            parse_solution("  R U2  F' \n"),
            Ok(parse_moves("R U2 F'").unwrap()),
        );
        assert_eq!(parse_solution(""), Ok(vec![]));
        assert_eq!(
            parse_solution("R Q U"),
            Err(SolverError::Malformed {
                token: "Q".to_owned(),
            }),
        );
        assert_eq!(
            parse_solution("Error 8: probably parity"),
            Err(SolverError::NoSolution("Error 8: probably parity".to_owned())),
        );
    }

    #[test]
    fn test_run_enqueues_solution() {
        let mut adapter = SolverAdapter::new(Some(Box::new(|s: &str| -> Result<String, SolverError> {
            assert_eq!(s.len(), 54);
            Ok("U R2 B'".to_owned())
        })));
        let mut queue = MoveQueue::new();
        queue.enqueue(["F"]);
        adapter.request();
        assert!(adapter.is_pending());
        adapter.run(&solved_state(), &mut queue).unwrap();
        assert!(!adapter.is_pending());
        assert_eq!(queue.iter().collect::<Vec<_>>(), ["F", "U", "R2", "B'"]);
    }

    #[test]
    fn test_failure_leaves_queue_untouched() {
        let mut queue = MoveQueue::new();
        queue.enqueue(["F"]);

        let mut adapter = SolverAdapter::new(Some(Box::new(|_: &str| -> Result<String, SolverError> {
            Ok("R X".to_owned())
        })));
        adapter.request();
        assert!(adapter.run(&solved_state(), &mut queue).is_err());
        assert!(!adapter.is_pending());

        let mut adapter = SolverAdapter::default();
        adapter.request();
        assert_eq!(
            adapter.run(&solved_state(), &mut queue),
            Err(SolverError::Unavailable),
        );

        assert_eq!(queue.iter().collect::<Vec<_>>(), ["F"]);
    }
}
