//! Virtual Rubik's cube simulator.

mod cli;
mod net;
mod process_solver;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();

    color_eyre::install()?;

    let prefs_path = match args.prefs {
        Some(path) => Some(path),
        None => cubetrainer_prefs::prefs_file_path()
            .inspect_err(|e| log::warn!("{e}"))
            .ok(),
    };
    let prefs = cubetrainer_prefs::Preferences::load(prefs_path.as_deref());

    cli::exec(args.subcommand, prefs, prefs_path)
}
