use std::path::PathBuf;

use cubetrainer_core::{PieceRegistry, format_moves, parse_moves};
use cubetrainer_prefs::Preferences;
use cubetrainer_sim::{CubeSimulation, ScrambleParams, SolverError};
use eyre::{Context, Result, eyre};
use itertools::Itertools;

use crate::net::{self, NetPrinter};
use crate::process_solver::ProcessSolver;

/// Virtual Rubik's cube simulator
///
/// Facelet strings list 54 stickers in U, R, F, D, L, B face order, each face
/// read row by row.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to load instead of the default location.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

/// Starting cube for a subcommand.
#[derive(clap::Args, Debug)]
pub(crate) struct CubeArgs {
    /// Start from this facelet string instead of a solved cube.
    #[arg(long)]
    facelets: Option<String>,
    /// Print the net without colors.
    #[arg(long)]
    plain: bool,
}

/// Highest frame rate accepted by `run`.
const MAX_FPS: f32 = 1000.0;

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print the facelet string and net after applying moves.
    State {
        #[command(flatten)]
        cube: CubeArgs,
        /// Moves to apply, such as `R U R' U'`.
        moves: Vec<String>,
    },
    /// Generate a scramble and print the resulting state.
    Scramble {
        #[command(flatten)]
        cube: CubeArgs,
        /// Seed for the scramble. Random if omitted.
        #[arg(long)]
        seed: Option<String>,
        /// Minimum number of moves (inclusive).
        #[arg(long)]
        min: Option<u32>,
        /// Maximum number of moves (exclusive).
        #[arg(long)]
        max: Option<u32>,
    },
    /// Animate a move sequence frame by frame, printing the net after each
    /// move.
    Run {
        #[command(flatten)]
        cube: CubeArgs,
        /// Frames per second.
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        /// Moves to apply. Unrecognized moves are skipped.
        moves: Vec<String>,
    },
    /// Solve the cube with the external solver and play the solution.
    Solve {
        #[command(flatten)]
        cube: CubeArgs,
        /// Solver program, overriding preferences. It receives the facelet
        /// string as its last argument.
        #[arg(long)]
        solver: Option<PathBuf>,
        /// Moves to apply before solving.
        moves: Vec<String>,
    },
    /// Print the current preferences as YAML.
    Prefs {
        /// Also write them to the preferences file.
        #[arg(long)]
        save: bool,
    },
}

pub(crate) fn exec(
    subcommand: Subcommand,
    prefs: Preferences,
    prefs_path: Option<PathBuf>,
) -> Result<()> {
    match subcommand {
        Subcommand::State { cube, moves } => {
            let mut sim = load_cube(&cube, &prefs)?;
            sim.enqueue_moves(&parse_moves(&moves.join(" "))?);
            sim.catch_up();
            print_state(&sim, cube.plain)
        }

        Subcommand::Scramble {
            cube,
            seed,
            min,
            max,
        } => {
            let mut sim = load_cube(&cube, &prefs)?;
            let mut params = ScrambleParams::from_prefs(&prefs.scramble);
            if let Some(seed) = seed {
                params.seed = seed;
            }
            params.min_moves = min.unwrap_or(params.min_moves);
            params.max_moves = max.unwrap_or(params.max_moves);

            let scramble = sim.scramble_with(&params)?;
            sim.catch_up();
            println!("{}", format_moves(&scramble));
            print_state(&sim, cube.plain)
        }

        Subcommand::Run { cube, fps, moves } => {
            if !(fps > 0.0 && fps <= MAX_FPS) {
                return Err(eyre!("frames per second must be between 0 and {MAX_FPS}"));
            }
            let mut sim = load_cube(&cube, &prefs)?;
            sim.add_visualizer(Box::new(NetPrinter::new(!cube.plain)));
            sim.enqueue(moves.iter().flat_map(|m| m.split_ascii_whitespace()));

            let dt = 1.0 / fps;
            let mut frames = 0_u64;
            while sim.is_busy() || !sim.queue().is_empty() {
                sim.tick(dt);
                frames += 1;
            }
            println!();
            println!(
                "{} moves in {frames} frames ({:.2} s)",
                sim.history().len(),
                frames as f32 * dt,
            );
            Ok(())
        }

        Subcommand::Solve {
            cube,
            solver,
            moves,
        } => {
            let mut solver_prefs = prefs.solver.clone();
            if solver.is_some() {
                solver_prefs.command = solver;
            }
            let solver = ProcessSolver::from_prefs(&solver_prefs)
                .ok_or(SolverError::Unavailable)
                .wrap_err("set `solver.command` in preferences or pass --solver")?;

            let mut sim = load_cube(&cube, &prefs)?;
            sim.set_solver(Box::new(solver));
            sim.enqueue_moves(&parse_moves(&moves.join(" "))?);
            sim.catch_up();

            let before = sim.history().len();
            sim.request_solve();
            if let Some(Err(e)) = sim.tick(0.0).solve {
                return Err(e).wrap_err("error solving cube");
            }
            sim.catch_up();
            let solution = &sim.history()[before..];
            println!("{}", format_moves(solution));
            print_state(&sim, cube.plain)?;
            if !sim.registry().is_solved() {
                return Err(eyre!("cube is not solved"));
            }
            Ok(())
        }

        Subcommand::Prefs { save } => {
            print!("{}", serde_norway::to_string(&prefs)?);
            if save {
                let path = prefs_path.ok_or_else(|| eyre!("no preferences file path"))?;
                prefs.save(&path)?;
                log::info!("Saved preferences to {}", path.display());
            }
            Ok(())
        }
    }
}

fn load_cube(args: &CubeArgs, prefs: &Preferences) -> Result<CubeSimulation> {
    let registry = match &args.facelets {
        Some(s) => PieceRegistry::from_facelets(s.trim()).wrap_err("invalid facelet string")?,
        None => PieceRegistry::solved(),
    };
    let mut sim = CubeSimulation::with_registry(registry, prefs);
    sim.initialize()?;
    Ok(sim)
}

fn print_state(sim: &CubeSimulation, plain: bool) -> Result<()> {
    let state = sim.state().ok_or_else(|| eyre!("cube is not initialized"))?;
    println!("{state}");
    print!("{}", net::render(state, !plain));
    let pending = sim.queue().iter().join(" ");
    if !pending.is_empty() {
        log::warn!("Moves left in queue: {pending}");
    }
    Ok(())
}
