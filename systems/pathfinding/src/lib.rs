#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure pathfinding system that searches a maze snapshot.
//!
//! Every search rebuilds the adjacency graph from the [`MazeView`] it is
//! handed, so results always reflect the wall set at the time of the call.
//! Both traversals expand neighbours in
//! [`Direction::NEIGHBOR_ORDER`](maze_search_core::Direction::NEIGHBOR_ORDER),
//! which makes repeated searches over an unchanged maze identical.

mod bfs;
mod dfs;
mod graph;

use maze_search_core::{MazeView, SearchAlgorithm, SearchOutcome};

pub use graph::{build_graph, AdjacencyMap};

/// Runs a depth-first search from the view's start to its goal.
///
/// The returned path is simple but not necessarily the shortest.
#[must_use]
pub fn dfs(view: MazeView<'_>) -> SearchOutcome {
    search(SearchAlgorithm::DepthFirst, view)
}

/// Runs a breadth-first search from the view's start to its goal.
///
/// The returned path has the fewest edges of any path in the maze.
#[must_use]
pub fn bfs(view: MazeView<'_>) -> SearchOutcome {
    search(SearchAlgorithm::BreadthFirst, view)
}

/// Runs the requested traversal over a freshly built graph.
#[must_use]
pub fn search(algorithm: SearchAlgorithm, view: MazeView<'_>) -> SearchOutcome {
    let graph = build_graph(view.side_length(), view.walls());
    let (start, goal) = (view.start(), view.goal());

    let outcome = match algorithm {
        SearchAlgorithm::DepthFirst => dfs::depth_first(&graph, start, goal),
        SearchAlgorithm::BreadthFirst => bfs::breadth_first(&graph, start, goal),
    };

    tracing::debug!(
        %algorithm,
        %start,
        %goal,
        found = outcome.is_found(),
        edges = ?outcome.edge_count(),
        visited = outcome.visited().len(),
        "search finished"
    );
    outcome
}
