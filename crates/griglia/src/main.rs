mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "griglia",
    version,
    about = "Grid-based window positioning toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Show the grid dimensions chosen for a window count
    Optimal {
        /// Number of windows to lay out
        count: usize,
    },
    /// Compute the slot rectangles for a grid
    Plan(commands::plan::PlanArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Optimal { count } => commands::optimal::execute(count),
        Commands::Plan(args) => commands::plan::execute(&args),
    }
}
