//! Frame-driven simulation of a virtual Rubik's cube.
//!
//! [`CubeSimulation`] owns the cube, the move engine, and a FIFO
//! [`MoveQueue`]. Each call to [`CubeSimulation::tick()`] dispatches at most
//! one queued move, and only when no move is in progress.

mod queue;
mod scramble;
mod simulation;
mod solver;
mod visualizer;

pub use queue::MoveQueue;
pub use scramble::{ScrambleError, ScrambleParams};
pub use simulation::{CubeSimulation, TickEvents};
pub use solver::{Solver, SolverAdapter, SolverError, parse_solution};
pub use visualizer::Visualizer;
