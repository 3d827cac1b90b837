#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze state management.
//!
//! The [`Maze`] owns the wall set and the search endpoints. Every mutator
//! validates its input before touching state, so a rejected call never
//! leaves a partially applied change behind.

use std::collections::BTreeSet;

use maze_search_core::{Command, Event, GridError, Tile, MAX_SIDE_LENGTH};

/// Square maze holding walls plus the start and goal tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    side_length: u32,
    start: Tile,
    goal: Tile,
    walls: BTreeSet<Tile>,
}

impl Maze {
    /// Creates an open maze with the provided endpoints.
    pub fn new(side_length: u32, start: Tile, goal: Tile) -> Result<Self, GridError> {
        if side_length == 0 || side_length > MAX_SIDE_LENGTH {
            return Err(GridError::InvalidSideLength { side_length });
        }

        let maze = Self {
            side_length,
            start,
            goal,
            walls: BTreeSet::new(),
        };
        maze.validate_tile(start)?;
        maze.validate_tile(goal)?;
        Ok(maze)
    }

    /// Creates the editor's default layout: start at `(1, 1)`, goal at
    /// `(N - 2, N - 2)` and every perimeter tile walled.
    pub fn with_border(side_length: u32) -> Result<Self, GridError> {
        let side = i32::try_from(side_length)
            .ok()
            .filter(|&side| side >= 3)
            .ok_or(GridError::InvalidSideLength { side_length })?;

        let far = side - 2;
        let mut maze = Self::new(side_length, Tile::new(1, 1), Tile::new(far, far))?;
        let _ = maze.enclose_border();
        Ok(maze)
    }

    /// Rebuilds a maze from previously captured parts.
    ///
    /// Every wall is validated and the endpoint policy is enforced, so decoded
    /// layouts cannot smuggle in state that the mutators would refuse.
    pub fn from_parts<I>(
        side_length: u32,
        start: Tile,
        goal: Tile,
        walls: I,
    ) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = Tile>,
    {
        let mut maze = Self::new(side_length, start, goal)?;
        for tile in walls {
            maze.validate_tile(tile)?;
            maze.ensure_not_endpoint(tile)?;
            let _ = maze.walls.insert(tile);
        }
        Ok(maze)
    }

    /// Number of tiles along each side of the grid.
    #[must_use]
    pub const fn side_length(&self) -> u32 {
        self.side_length
    }

    /// Tile searches depart from.
    #[must_use]
    pub const fn start(&self) -> Tile {
        self.start
    }

    /// Tile searches try to reach.
    #[must_use]
    pub const fn goal(&self) -> Tile {
        self.goal
    }

    /// Fails with [`GridError::InvalidTile`] unless the tile lies inside the grid.
    pub fn validate_tile(&self, tile: Tile) -> Result<(), GridError> {
        if tile.is_within(self.side_length) {
            Ok(())
        } else {
            Err(GridError::InvalidTile {
                tile,
                side_length: self.side_length,
            })
        }
    }

    /// Reports whether the tile is walled.
    #[must_use]
    pub fn is_wall(&self, tile: Tile) -> bool {
        self.walls.contains(&tile)
    }

    /// Inverts the wall state of a tile and returns whether it is now a wall.
    pub fn toggle_wall(&mut self, tile: Tile) -> Result<bool, GridError> {
        self.validate_tile(tile)?;
        if self.walls.remove(&tile) {
            return Ok(false);
        }

        self.ensure_not_endpoint(tile)?;
        let _ = self.walls.insert(tile);
        Ok(true)
    }

    /// Moves the start tile.
    pub fn set_start(&mut self, tile: Tile) -> Result<(), GridError> {
        self.validate_endpoint(tile)?;
        self.start = tile;
        Ok(())
    }

    /// Moves the goal tile.
    pub fn set_goal(&mut self, tile: Tile) -> Result<(), GridError> {
        self.validate_endpoint(tile)?;
        self.goal = tile;
        Ok(())
    }

    /// Removes every wall and returns how many were removed.
    pub fn clear_walls(&mut self) -> usize {
        let removed = self.walls.len();
        self.walls.clear();
        removed
    }

    /// Walls every perimeter tile not occupied by an endpoint.
    ///
    /// Returns the number of walls that were added; tiles that were already
    /// walled are left as they are.
    pub fn enclose_border(&mut self) -> usize {
        // `new` bounds the side length to the coordinate range.
        let Ok(side) = i32::try_from(self.side_length) else {
            return 0;
        };
        let last = side - 1;
        let perimeter: Vec<Tile> = (0..=last)
            .flat_map(|index| {
                [
                    Tile::new(index, 0),
                    Tile::new(index, last),
                    Tile::new(0, index),
                    Tile::new(last, index),
                ]
            })
            .collect();

        let mut added = 0;
        for tile in perimeter {
            if tile == self.start || tile == self.goal {
                continue;
            }
            if self.walls.insert(tile) {
                added += 1;
            }
        }
        added
    }

    fn validate_endpoint(&self, tile: Tile) -> Result<(), GridError> {
        self.validate_tile(tile)?;
        if self.is_wall(tile) {
            return Err(GridError::EndpointBlocked { tile });
        }
        Ok(())
    }

    fn ensure_not_endpoint(&self, tile: Tile) -> Result<(), GridError> {
        if tile == self.start || tile == self.goal {
            return Err(GridError::EndpointBlocked { tile });
        }
        Ok(())
    }
}

/// Applies the provided command to the maze, reporting the outcome as events.
///
/// Rejected commands emit [`Event::CommandRejected`] and leave the maze untouched.
pub fn apply(maze: &mut Maze, command: Command, out_events: &mut Vec<Event>) {
    let result = match command {
        Command::ToggleWall { tile } => maze
            .toggle_wall(tile)
            .map(|wall| Event::WallToggled { tile, wall }),
        Command::SetStart { tile } => {
            let from = maze.start;
            maze
                .set_start(tile)
                .map(|()| Event::StartMoved { from, to: tile })
        }
        Command::SetGoal { tile } => {
            let from = maze.goal;
            maze
                .set_goal(tile)
                .map(|()| Event::GoalMoved { from, to: tile })
        }
        Command::ClearWalls => Ok(Event::WallsCleared {
            removed: maze.clear_walls(),
        }),
        Command::EncloseBorder => Ok(Event::BorderEnclosed {
            added: maze.enclose_border(),
        }),
    };

    match result {
        Ok(event) => {
            tracing::debug!(?command, ?event, "command applied");
            out_events.push(event);
        }
        Err(reason) => {
            tracing::warn!(?command, %reason, "command rejected");
            out_events.push(Event::CommandRejected { command, reason });
        }
    }
}

/// Query functions that provide read-only access to the maze state.
pub mod query {
    use std::collections::BTreeSet;

    use super::Maze;
    use maze_search_core::{MazeView, Tile};

    /// Number of tiles along each side of the grid.
    #[must_use]
    pub fn side_length(maze: &Maze) -> u32 {
        maze.side_length
    }

    /// Tile searches depart from.
    #[must_use]
    pub fn start(maze: &Maze) -> Tile {
        maze.start
    }

    /// Tile searches try to reach.
    #[must_use]
    pub fn goal(maze: &Maze) -> Tile {
        maze.goal
    }

    /// Reports whether the tile is walled.
    #[must_use]
    pub fn is_wall(maze: &Maze, tile: Tile) -> bool {
        maze.walls.contains(&tile)
    }

    /// Provides read-only access to the wall set in sorted order.
    #[must_use]
    pub fn walls(maze: &Maze) -> &BTreeSet<Tile> {
        &maze.walls
    }

    /// Captures the snapshot consumed by the pathfinding system.
    #[must_use]
    pub fn maze_view(maze: &Maze) -> MazeView<'_> {
        MazeView::new(maze.side_length, maze.start, maze.goal, &maze.walls)
    }
}
