use std::collections::{HashSet, VecDeque};

use maze_search_core::{SearchOutcome, Tile};

use crate::graph::AdjacencyMap;

pub(crate) fn breadth_first(graph: &AdjacencyMap, start: Tile, goal: Tile) -> SearchOutcome {
    if !graph.contains(start) {
        return SearchOutcome::NotFound {
            visited: Vec::new(),
        };
    }

    let mut visited = vec![start];
    if start == goal {
        return SearchOutcome::Found {
            path: vec![start],
            visited,
        };
    }

    let mut discovered = HashSet::from([start]);
    let mut queue = VecDeque::from([vec![start]]);

    while let Some(path) = queue.pop_front() {
        let Some(&last) = path.last() else {
            continue;
        };

        for &next in graph.neighbors(last).unwrap_or_default() {
            if !discovered.insert(next) {
                continue;
            }

            visited.push(next);
            let mut extended = path.clone();
            extended.push(next);
            if next == goal {
                return SearchOutcome::Found {
                    path: extended,
                    visited,
                };
            }
            queue.push_back(extended);
        }
    }

    SearchOutcome::NotFound { visited }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::graph::build_graph;

    #[test]
    fn visits_in_frontier_order() {
        let graph = build_graph(3, &BTreeSet::new());

        let outcome = breadth_first(&graph, Tile::new(1, 1), Tile::new(2, 2));

        assert_eq!(
            outcome.visited(),
            &[
                Tile::new(1, 1),
                Tile::new(2, 1),
                Tile::new(0, 1),
                Tile::new(1, 2),
                Tile::new(1, 0),
                Tile::new(2, 2),
            ]
        );
        assert_eq!(
            outcome.path(),
            Some(&[Tile::new(1, 1), Tile::new(2, 1), Tile::new(2, 2)][..])
        );
    }

    #[test]
    fn goes_around_walls() {
        let walls: BTreeSet<Tile> = [Tile::new(1, 0), Tile::new(1, 1)].into_iter().collect();
        let graph = build_graph(3, &walls);

        let outcome = breadth_first(&graph, Tile::new(0, 0), Tile::new(2, 0));

        assert_eq!(outcome.edge_count(), Some(6));
    }

    #[test]
    fn walled_start_is_not_found() {
        let walls: BTreeSet<Tile> = [Tile::new(1, 1)].into_iter().collect();
        let graph = build_graph(2, &walls);

        let outcome = breadth_first(&graph, Tile::new(1, 1), Tile::new(1, 1));

        assert_eq!(outcome, SearchOutcome::NotFound { visited: Vec::new() });
    }
}
