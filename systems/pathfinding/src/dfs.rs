use std::collections::HashSet;

use maze_search_core::{SearchOutcome, Tile};

use crate::graph::AdjacencyMap;

/// Pending exploration step. Each frame owns the path leading to its parent,
/// so backtracking never disturbs sibling branches.
struct Frame {
    tile: Tile,
    path: Vec<Tile>,
}

pub(crate) fn depth_first(graph: &AdjacencyMap, start: Tile, goal: Tile) -> SearchOutcome {
    let mut visited = Vec::new();
    if !graph.contains(start) {
        return SearchOutcome::NotFound { visited };
    }

    let mut discovered = HashSet::new();
    let mut stack = vec![Frame {
        tile: start,
        path: Vec::new(),
    }];

    while let Some(Frame { tile, mut path }) = stack.pop() {
        if !discovered.insert(tile) {
            continue;
        }

        visited.push(tile);
        path.push(tile);
        if tile == goal {
            return SearchOutcome::Found { path, visited };
        }

        let neighbors = graph.neighbors(tile).unwrap_or_default();
        // Reversed so the first neighbour in order is popped first.
        for &next in neighbors.iter().rev() {
            if discovered.contains(&next) {
                continue;
            }
            stack.push(Frame {
                tile: next,
                path: path.clone(),
            });
        }
    }

    SearchOutcome::NotFound { visited }
}
