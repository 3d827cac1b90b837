//! Adjacency graph derived from the maze's wall set.

use std::collections::{BTreeMap, BTreeSet};

use maze_search_core::Tile;

/// Snapshot adjacency structure linking each open tile to its open neighbours.
///
/// Wall tiles never appear, neither as keys nor inside a neighbour list.
/// Neighbour lists follow [`maze_search_core::Direction::NEIGHBOR_ORDER`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyMap {
    links: BTreeMap<Tile, Vec<Tile>>,
}

impl AdjacencyMap {
    /// Open neighbours of the tile, or `None` if the tile is walled or out of range.
    #[must_use]
    pub fn neighbors(&self, tile: Tile) -> Option<&[Tile]> {
        self.links.get(&tile).map(Vec::as_slice)
    }

    /// Reports whether the tile is an open node of the graph.
    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        self.links.contains_key(&tile)
    }

    /// Number of open tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Reports whether every tile is walled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterates over open tiles and their neighbours in tile order.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, &[Tile])> {
        self.links
            .iter()
            .map(|(tile, neighbors)| (*tile, neighbors.as_slice()))
    }
}

/// Builds a fresh adjacency graph for a square grid.
///
/// Every call enumerates the whole grid, so the result always reflects the
/// wall set it was given. Cost is proportional to the number of tiles.
#[must_use]
pub fn build_graph(side_length: u32, walls: &BTreeSet<Tile>) -> AdjacencyMap {
    let Ok(side) = i32::try_from(side_length) else {
        tracing::warn!(side_length, "grid is too large for tile coordinates");
        return AdjacencyMap::default();
    };
    let is_open = |tile: Tile| tile.is_within(side_length) && !walls.contains(&tile);

    let mut links = BTreeMap::new();
    for x in 0..side {
        for y in 0..side {
            let tile = Tile::new(x, y);
            if !is_open(tile) {
                continue;
            }

            let neighbors: Vec<Tile> = tile.neighbors().filter(|&next| is_open(next)).collect();
            let _ = links.insert(tile, neighbors);
        }
    }

    AdjacencyMap { links }
}
