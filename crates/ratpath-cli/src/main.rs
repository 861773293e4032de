use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ratpath_cli::commands::density::{handle_density, DensityCommandArgs};
use ratpath_cli::commands::route::{handle_route, RouteCommandArgs};
use ratpath_cli::commands::walk::{handle_walk, WalkCommandArgs, DEFAULT_MAX_TURNS};
use ratpath_cli::logging::{init_logging, LogFormat, LoggingConfig};
use ratpath_cli::output::OutputFormat;
use ratpath_lib::{FrontierKind, Strategy, Vertex, DEFAULT_WINDOW_RADIUS};

#[derive(Parser, Debug)]
#[command(author, version, about = "Maze routing and cheese-hunting agent utilities")]
struct Cli {
    /// Log output format; falls back to RATPATH_LOG_FORMAT, then text.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route to the nearest cheese or a chosen cell.
    Route {
        /// Maze description (JSON).
        #[arg(long)]
        maze: PathBuf,
        /// Starting cell (defaults to the maze start).
        #[arg(long)]
        from: Option<Vertex>,
        /// Target cell (defaults to the nearest cheese).
        #[arg(long)]
        to: Option<Vertex>,
        /// Priority frontier used by the traversal.
        #[arg(long, default_value_t = FrontierKind::BinaryHeap)]
        frontier: FrontierKind,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Score how clustered each cheese is.
    Density {
        /// Maze description (JSON).
        #[arg(long)]
        maze: PathBuf,
        /// Half-side of the scoring window, in cells.
        #[arg(long, default_value_t = DEFAULT_WINDOW_RADIUS)]
        radius: usize,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Replay the agent on a static maze until the cheese runs out.
    Walk {
        /// Maze description (JSON).
        #[arg(long)]
        maze: PathBuf,
        /// Agent configuration (JSON).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Target selection strategy (nearest, density-aware, sweep).
        #[arg(long)]
        strategy: Option<Strategy>,
        /// Maximum number of decision cycles.
        #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
        max_turns: usize,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::resolve(cli.log_format));

    match cli.command {
        Command::Route {
            maze,
            from,
            to,
            frontier,
            format,
        } => handle_route(&RouteCommandArgs {
            maze,
            from,
            to,
            frontier,
            format,
        }),
        Command::Density {
            maze,
            radius,
            format,
        } => handle_density(&DensityCommandArgs {
            maze,
            radius,
            format,
        }),
        Command::Walk {
            maze,
            config,
            strategy,
            max_turns,
            format,
        } => handle_walk(&WalkCommandArgs {
            maze,
            config,
            strategy,
            max_turns,
            format,
        }),
    }
}
