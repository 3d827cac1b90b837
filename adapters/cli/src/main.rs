#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for creating, editing and solving maze layouts.

mod config;
mod layout_transfer;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use maze_search_core::{Command, Event, GridError, SearchAlgorithm, SearchOutcome, Tile};
use maze_search_system_pathfinding as pathfinding;
use maze_search_world::{self as world, query, Maze};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::Config, layout_transfer::MazeLayout};

/// Create, edit and solve square-grid mazes.
///
/// LAYOUT arguments accept either a `maze:v1:...` transfer string or
/// `@path/to/layout.json`.
#[derive(Parser, Debug)]
#[command(name = "maze-search", version, about, long_about = None)]
struct Cli {
    /// TOML file providing default settings
    #[arg(long, global = true, env = "MAZE_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Print a fresh layout
    New {
        /// Tiles per side; defaults to the configured size
        #[arg(long)]
        size: Option<u32>,
        /// Leave the border open and put the endpoints in opposite corners
        #[arg(long)]
        open: bool,
    },
    /// Toggle walls on the given tiles and print the updated layout
    Toggle {
        /// Layout to edit
        layout: String,
        /// Tiles written as `x,y`
        #[arg(required = true, allow_hyphen_values = true, value_parser = parse_tile)]
        tiles: Vec<Tile>,
    },
    /// Move the start tile and print the updated layout
    SetStart {
        /// Layout to edit
        layout: String,
        /// Tile written as `x,y`
        #[arg(allow_hyphen_values = true, value_parser = parse_tile)]
        tile: Tile,
    },
    /// Move the goal tile and print the updated layout
    SetGoal {
        /// Layout to edit
        layout: String,
        /// Tile written as `x,y`
        #[arg(allow_hyphen_values = true, value_parser = parse_tile)]
        tile: Tile,
    },
    /// Remove every wall and print the updated layout
    Clear {
        /// Layout to edit
        layout: String,
    },
    /// Search for a path from start to goal
    Solve {
        /// Layout to search
        layout: String,
        /// Traversal to run; defaults to the configured algorithm
        #[arg(long, value_enum)]
        algorithm: Option<AlgorithmArg>,
        /// Also print tiles in the order the search discovered them
        #[arg(long)]
        show_visited: bool,
    },
    /// Print a layout as JSON
    Export {
        /// Layout to export
        layout: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    /// Depth-first search
    Dfs,
    /// Breadth-first search
    Bfs,
}

impl From<AlgorithmArg> for SearchAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Dfs => SearchAlgorithm::DepthFirst,
            AlgorithmArg::Bfs => SearchAlgorithm::BreadthFirst,
        }
    }
}

/// Entry point for the maze search command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.command {
        CliCommand::New { size, open } => {
            let size = size.unwrap_or(config.default_size);
            let maze = if open {
                open_maze(size)?
            } else {
                Maze::with_border(size).context("could not create bordered maze")?
            };
            print_layout(&maze);
        }
        CliCommand::Toggle { layout, tiles } => {
            let commands = tiles.into_iter().map(|tile| Command::ToggleWall { tile });
            edit(&layout, commands)?;
        }
        CliCommand::SetStart { layout, tile } => edit(&layout, [Command::SetStart { tile }])?,
        CliCommand::SetGoal { layout, tile } => edit(&layout, [Command::SetGoal { tile }])?,
        CliCommand::Clear { layout } => edit(&layout, [Command::ClearWalls])?,
        CliCommand::Solve {
            layout,
            algorithm,
            show_visited,
        } => {
            let maze = load_maze(&layout)?;
            let algorithm = algorithm.map_or(config.algorithm, SearchAlgorithm::from);
            let outcome = pathfinding::search(algorithm, query::maze_view(&maze));
            print_outcome(&outcome, show_visited);
        }
        CliCommand::Export { layout } => {
            let maze = load_maze(&layout)?;
            let json = serde_json::to_string_pretty(&MazeLayout::from_maze(&maze))
                .context("failed to serialize layout")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_maze(size: u32) -> Result<Maze> {
    let far = i32::try_from(size)
        .map_err(|_| GridError::InvalidSideLength { side_length: size })
        .context("could not create open maze")?
        .saturating_sub(1);
    Maze::new(size, Tile::new(0, 0), Tile::new(far, far)).context("could not create open maze")
}

fn load_maze(layout: &str) -> Result<Maze> {
    let layout = if let Some(path) = layout.strip_prefix('@') {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout file {path}"))?;
        serde_json::from_str::<MazeLayout>(&contents)
            .with_context(|| format!("failed to parse layout file {path}"))?
    } else {
        MazeLayout::decode(layout).context("failed to decode layout string")?
    };

    layout.into_maze().context("layout describes an invalid maze")
}

fn edit<I>(layout: &str, commands: I) -> Result<()>
where
    I: IntoIterator<Item = Command>,
{
    let mut maze = load_maze(layout)?;
    let mut events = Vec::new();

    for command in commands {
        world::apply(&mut maze, command, &mut events);
        if let Some(Event::CommandRejected { command, reason }) = events.last() {
            return Err(*reason).with_context(|| format!("could not apply {command:?}"));
        }
    }

    tracing::info!(applied = events.len(), "layout edited");
    print_layout(&maze);
    Ok(())
}

fn print_layout(maze: &Maze) {
    println!("{}", MazeLayout::from_maze(maze).encode());
}

fn print_outcome(outcome: &SearchOutcome, show_visited: bool) {
    match outcome.path() {
        Some(path) => {
            println!("path {} edges", path.len().saturating_sub(1));
            print_tiles(path);
        }
        None => println!("no path"),
    }

    if show_visited {
        let visited = outcome.visited();
        println!("visited {} tiles", visited.len());
        print_tiles(visited);
    }
}

fn print_tiles(tiles: &[Tile]) {
    for tile in tiles {
        println!("{},{}", tile.x(), tile.y());
    }
}

fn parse_tile(value: &str) -> Result<Tile, String> {
    let invalid = || format!("expected a tile written as `x,y`, got `{value}`");
    let (x, y) = value.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(Tile::new(x, y))
}
