#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze search engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative maze, and the pathfinding system. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point and broadcasts [`Event`] values describing what
//! changed. Searches never touch the maze directly; they read an immutable
//! [`MazeView`] and report a [`SearchOutcome`].

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of the grid created by the editor when none is requested.
pub const DEFAULT_SIDE_LENGTH: u32 = 15;

/// Largest side length whose tiles all have representable coordinates.
pub const MAX_SIDE_LENGTH: u32 = i32::MAX.unsigned_abs();

/// Location of a single square tile expressed as `x` (column) and `y` (row).
///
/// Coordinates are signed so that out-of-range input, including negative
/// values, can be represented and rejected by validation instead of being
/// silently wrapped. Tiles serialize as a two-element `[x, y]` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Tile {
    x: i32,
    y: i32,
}

impl Tile {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Reports whether the tile lies inside a square grid of `side_length` tiles.
    #[must_use]
    pub fn is_within(self, side_length: u32) -> bool {
        let side = i64::from(side_length);
        (0..side).contains(&i64::from(self.x)) && (0..side).contains(&i64::from(self.y))
    }

    /// Tile reached by moving one step in `direction`, if the coordinate does not overflow.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Tile> {
        let (dx, dy) = direction.offset();
        Some(Tile::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Orthogonal neighbours of the tile in [`Direction::NEIGHBOR_ORDER`].
    ///
    /// Bounds are not checked; callers filter against their grid.
    pub fn neighbors(self) -> impl Iterator<Item = Tile> {
        Direction::NEIGHBOR_ORDER
            .into_iter()
            .filter_map(move |direction| self.step(direction))
    }

    /// Computes the Manhattan distance between two tiles.
    #[must_use]
    pub fn manhattan_distance(self, other: Tile) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }

    /// Reports whether the two tiles share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: Tile) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<[i32; 2]> for Tile {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Tile> for [i32; 2] {
    fn from(tile: Tile) -> Self {
        [tile.x, tile.y]
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal directions connecting orthogonally adjacent tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward increasing `x`.
    East,
    /// Movement toward decreasing `x`.
    West,
    /// Movement toward increasing `y`.
    South,
    /// Movement toward decreasing `y`.
    North,
}

impl Direction {
    /// Fixed neighbour expansion order: `+x`, `-x`, `+y`, `-y`.
    ///
    /// Depth-first search explores neighbours in exactly this order, so the
    /// path it returns on ties depends on it.
    pub const NEIGHBOR_ORDER: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    /// Coordinate delta applied when stepping in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::South => (0, 1),
            Self::North => (0, -1),
        }
    }
}

/// Commands that express all permissible maze mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Flips the wall state of a tile.
    ToggleWall {
        /// Tile whose wall state should be inverted.
        tile: Tile,
    },
    /// Moves the search start to a new tile.
    SetStart {
        /// Tile that becomes the new start.
        tile: Tile,
    },
    /// Moves the search goal to a new tile.
    SetGoal {
        /// Tile that becomes the new goal.
        tile: Tile,
    },
    /// Removes every wall from the grid.
    ClearWalls,
    /// Walls the perimeter of the grid, sparing the start and goal tiles.
    EncloseBorder,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that a tile's wall state flipped.
    WallToggled {
        /// Tile that changed.
        tile: Tile,
        /// Whether the tile is a wall after the toggle.
        wall: bool,
    },
    /// Confirms that the start tile moved.
    StartMoved {
        /// Previous start tile.
        from: Tile,
        /// Current start tile.
        to: Tile,
    },
    /// Confirms that the goal tile moved.
    GoalMoved {
        /// Previous goal tile.
        from: Tile,
        /// Current goal tile.
        to: Tile,
    },
    /// Confirms that all walls were removed.
    WallsCleared {
        /// Number of walls that were removed.
        removed: usize,
    },
    /// Confirms that the perimeter was walled.
    BorderEnclosed {
        /// Number of walls that were added.
        added: usize,
    },
    /// Reports that a command was rejected and the maze was left untouched.
    CommandRejected {
        /// Command that failed.
        command: Command,
        /// Specific reason the command failed.
        reason: GridError,
    },
}

/// Reasons a maze construction or mutation may be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridError {
    /// The tile lies outside `[0, side_length)` on at least one axis.
    #[error("tile {tile} is outside the {side_length}x{side_length} grid")]
    InvalidTile {
        /// Offending tile.
        tile: Tile,
        /// Side length of the grid the tile was checked against.
        side_length: u32,
    },
    /// A grid must contain at least one tile per side and no more than
    /// [`MAX_SIDE_LENGTH`].
    #[error("side length {side_length} is not a valid grid size")]
    InvalidSideLength {
        /// Rejected side length.
        side_length: u32,
    },
    /// Walls may never occupy the start or goal tile.
    #[error("tile {tile} cannot be both a wall and a search endpoint")]
    EndpointBlocked {
        /// Tile where the wall and the endpoint would coincide.
        tile: Tile,
    },
}

/// Read-only snapshot of a maze used by the pathfinding system.
#[derive(Clone, Copy, Debug)]
pub struct MazeView<'a> {
    side_length: u32,
    start: Tile,
    goal: Tile,
    walls: &'a BTreeSet<Tile>,
}

impl<'a> MazeView<'a> {
    /// Captures a new view backed by the provided wall set.
    #[must_use]
    pub fn new(side_length: u32, start: Tile, goal: Tile, walls: &'a BTreeSet<Tile>) -> Self {
        Self {
            side_length,
            start,
            goal,
            walls,
        }
    }

    /// Number of tiles along each side of the grid.
    #[must_use]
    pub const fn side_length(&self) -> u32 {
        self.side_length
    }

    /// Tile the search departs from.
    #[must_use]
    pub const fn start(&self) -> Tile {
        self.start
    }

    /// Tile the search tries to reach.
    #[must_use]
    pub const fn goal(&self) -> Tile {
        self.goal
    }

    /// Reports whether the tile is walled.
    #[must_use]
    pub fn is_wall(&self, tile: Tile) -> bool {
        self.walls.contains(&tile)
    }

    /// Wall set captured by the view.
    #[must_use]
    pub fn walls(&self) -> &'a BTreeSet<Tile> {
        self.walls
    }
}

/// Traversal strategies offered by the pathfinding system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchAlgorithm {
    /// Depth-first traversal; finds a path, not necessarily the shortest.
    #[serde(rename = "dfs", alias = "depth_first")]
    DepthFirst,
    /// Breadth-first traversal; finds a path with the fewest edges.
    #[default]
    #[serde(rename = "bfs", alias = "breadth_first")]
    BreadthFirst,
}

impl SearchAlgorithm {
    /// Short identifier used in logs and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DepthFirst => "dfs",
            Self::BreadthFirst => "bfs",
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single search.
///
/// `visited` lists tiles in the order they were first discovered and is kept
/// for both arms so that exhausted searches can still be replayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The goal was reached.
    Found {
        /// Tiles from start to goal inclusive.
        path: Vec<Tile>,
        /// Discovery order of every tile explored before termination.
        visited: Vec<Tile>,
    },
    /// Every reachable tile was explored without reaching the goal.
    NotFound {
        /// Discovery order of every reachable tile.
        visited: Vec<Tile>,
    },
}

impl SearchOutcome {
    /// Path from start to goal, if one was found.
    #[must_use]
    pub fn path(&self) -> Option<&[Tile]> {
        match self {
            Self::Found { path, .. } => Some(path),
            Self::NotFound { .. } => None,
        }
    }

    /// Tiles in the order the search discovered them.
    #[must_use]
    pub fn visited(&self) -> &[Tile] {
        match self {
            Self::Found { visited, .. } | Self::NotFound { visited } => visited,
        }
    }

    /// Reports whether the goal was reached.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Number of edges in the found path.
    #[must_use]
    pub fn edge_count(&self) -> Option<usize> {
        self.path().map(|path| path.len().saturating_sub(1))
    }
}
