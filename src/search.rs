//! The A* search loop as an explicit state value. A [Search] is created from a grid and a
//! [Heuristic], then advanced one expansion at a time with [Search::step] until it reaches
//! [SearchStatus::Found] or [SearchStatus::NoPath].
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::coordinate::Coordinate;
use crate::errors::SearchError;
use crate::grid::{move_cost, Grid};
use crate::heuristic::Heuristic;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Handle of a node in the search arena. Handles are handed out in discovery order, so a smaller
/// handle means the node was seen earlier.
pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    Open,
    Closed,
}

/// An entry of the search tree. The parent always has a smaller [NodeId] than the node itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub point: Coordinate,
    /// Cost of the best known route from the start.
    pub g: u32,
    /// `g` plus the heuristic estimate to the end.
    pub f: u32,
    pub parent: Option<NodeId>,
    pub status: NodeStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Searching,
    /// A neighbour of the current node is the end cell.
    Found,
    /// The open set ran out without meeting the end cell.
    NoPath,
}

/// Heap entry for an open node. Entries are never removed when a node gets a cheaper route;
/// instead a new entry is pushed and the old one is skipped once its `f` no longer matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    index: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimate first, then the node discovered first
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug)]
pub struct Search<'g> {
    grid: &'g Grid,
    heuristic: Heuristic,
    end: Coordinate,
    nodes: FxIndexMap<Coordinate, SearchNode>,
    open: BinaryHeap<OpenEntry>,
    current: NodeId,
    steps: usize,
    status: SearchStatus,
}

impl<'g> Search<'g> {
    /// Sets up a search from the grid's start to its end. The start becomes the current node and
    /// the only member of the open set.
    pub fn new(grid: &'g Grid, heuristic: Heuristic) -> Result<Search<'g>, SearchError> {
        let start = grid.start().ok_or(SearchError::MissingStart)?;
        let end = grid.end().ok_or(SearchError::MissingEnd)?;
        let mut nodes = FxIndexMap::default();
        nodes.insert(
            start,
            SearchNode {
                point: start,
                g: 0,
                f: heuristic.estimate(&start, &end),
                parent: None,
                status: NodeStatus::Open,
            },
        );
        Ok(Search {
            grid,
            heuristic,
            end,
            nodes,
            open: BinaryHeap::new(),
            current: 0,
            steps: 0,
            status: SearchStatus::Searching,
        })
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Number of expansions performed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn start(&self) -> Coordinate {
        self.nodes[0].point
    }

    pub fn end(&self) -> Coordinate {
        self.end
    }

    /// The node being expanded next, or, once the search is [Found](SearchStatus::Found), the
    /// node right before the end.
    pub fn current(&self) -> &SearchNode {
        &self.nodes[self.current]
    }

    pub fn node(&self, point: &Coordinate) -> Option<&SearchNode> {
        self.nodes.get(point)
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get_index(id).map(|(_, node)| node)
    }

    /// All nodes discovered so far, in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &SearchNode> {
        self.nodes.values()
    }

    pub fn open_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| n.status == NodeStatus::Open)
            .count()
    }

    pub fn closed_count(&self) -> usize {
        self.nodes.len() - self.open_count()
    }

    /// Expands the current node: relaxes its neighbours, then either stops because the end is
    /// adjacent, or closes the node and picks the open node with the smallest `f` as the next
    /// current one. Calling this on a finished search does nothing.
    pub fn step(&mut self) -> SearchStatus {
        if self.status != SearchStatus::Searching {
            return self.status;
        }
        self.steps += 1;
        let current = self.current;
        let (point, g) = {
            let node = &self.nodes[current];
            (node.point, node.g)
        };

        for (neighbour, move_cost) in self.grid.neighborhood_points_and_cost(&point) {
            if neighbour == self.end {
                debug!("End {} is adjacent to {} after {} steps", self.end, point, self.steps);
                self.status = SearchStatus::Found;
                return self.status;
            }
            let new_g = g + move_cost;
            let f = new_g + self.heuristic.estimate(&neighbour, &self.end);
            let index = match self.nodes.entry(neighbour) {
                Vacant(e) => {
                    let index = e.index();
                    e.insert(SearchNode {
                        point: neighbour,
                        g: new_g,
                        f,
                        parent: Some(current),
                        status: NodeStatus::Open,
                    });
                    index
                }
                Occupied(mut e) => {
                    let node = e.get_mut();
                    if node.status == NodeStatus::Closed || node.g <= new_g {
                        continue;
                    }
                    node.g = new_g;
                    node.f = f;
                    node.parent = Some(current);
                    e.index()
                }
            };
            self.open.push(OpenEntry { f, index });
        }

        self.nodes[current].status = NodeStatus::Closed;
        while let Some(OpenEntry { f, index }) = self.open.pop() {
            let node = &self.nodes[index];
            if node.status == NodeStatus::Open && node.f == f {
                self.current = index;
                return self.status;
            }
        }
        debug!("Open set exhausted after {} steps", self.steps);
        self.status = SearchStatus::NoPath;
        self.status
    }

    /// Ends an unfinished search as [NoPath](SearchStatus::NoPath) without expanding further,
    /// for when the end is already known to be unreachable.
    pub fn abandon(&mut self) -> SearchStatus {
        if self.status == SearchStatus::Searching {
            debug!("Search abandoned after {} steps", self.steps);
            self.status = SearchStatus::NoPath;
        }
        self.status
    }

    /// Steps until the search is finished.
    pub fn run(&mut self) -> SearchStatus {
        while self.step() == SearchStatus::Searching {}
        self.status
    }

    /// The route from the start to the end, excluding the start and ending with the end. Only
    /// available once the search is [Found](SearchStatus::Found).
    pub fn path(&self) -> Option<Vec<Coordinate>> {
        if self.status != SearchStatus::Found {
            return None;
        }
        let mut path = std::iter::successors(Some(self.current), |&ix| self.nodes[ix].parent)
            .map(|ix| &self.nodes[ix])
            .filter(|node| node.parent.is_some())
            .map(|node| node.point)
            .collect::<Vec<Coordinate>>();
        path.reverse();
        path.push(self.end);
        Some(path)
    }

    /// Total cost of [path](Self::path): the cost to the node before the end plus the final move.
    pub fn cost(&self) -> Option<u32> {
        (self.status == SearchStatus::Found).then(|| {
            let last = self.current();
            last.g + move_cost(&last.point, &self.end)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn open_entries_pop_smallest_f_then_oldest() {
        let mut heap = BinaryHeap::new();
        for (f, index) in [(7, 1), (6, 3), (7, 0), (6, 2)] {
            heap.push(OpenEntry { f, index });
        }
        let order = std::iter::from_fn(|| heap.pop())
            .map(|e| e.index)
            .collect::<Vec<_>>();
        assert_eq!(order, vec![2, 3, 0, 1]);
    }

    #[test]
    fn missing_endpoints() {
        let mut grid = Grid::new(3);
        assert_eq!(
            Search::new(&grid, Heuristic::Diagonal).err(),
            Some(SearchError::MissingStart)
        );
        grid.set(c(0, 0), crate::grid::CellState::Start).unwrap();
        assert_eq!(
            Search::new(&grid, Heuristic::Diagonal).err(),
            Some(SearchError::MissingEnd)
        );
    }

    /// Steps through the 3x3 diagonal case one expansion at a time.
    #[test]
    fn step_by_step() {
        let grid: Grid = "S..\n...\n..E".parse().unwrap();
        let mut search = Search::new(&grid, Heuristic::Diagonal).unwrap();
        assert_eq!(search.current().point, c(0, 0));
        assert_eq!(search.open_count(), 1);

        assert_eq!(search.step(), SearchStatus::Searching);
        assert_eq!(search.steps(), 1);
        assert_eq!(search.closed_count(), 1);
        assert_eq!(search.open_count(), 3);
        assert_eq!(search.node(&c(0, 1)).map(|n| (n.g, n.f)), Some((2, 7)));
        assert_eq!(search.node(&c(1, 0)).map(|n| (n.g, n.f)), Some((2, 7)));
        assert_eq!(search.node(&c(1, 1)).map(|n| (n.g, n.f)), Some((3, 6)));
        assert_eq!(search.current().point, c(1, 1));
        assert_eq!(search.path(), None);

        assert_eq!(search.step(), SearchStatus::Found);
        assert_eq!(search.steps(), 2);
        assert_eq!(search.path(), Some(vec![c(1, 1), c(2, 2)]));
        assert_eq!(search.cost(), Some(6));
        // Finished searches stay put
        assert_eq!(search.step(), SearchStatus::Found);
        assert_eq!(search.steps(), 2);
    }

    #[test]
    fn abandon_only_ends_unfinished_searches() {
        let grid: Grid = "S...\n....\n....\n...E".parse().unwrap();
        let mut search = Search::new(&grid, Heuristic::Diagonal).unwrap();
        search.step();
        assert_eq!(search.abandon(), SearchStatus::NoPath);
        assert_eq!(search.step(), SearchStatus::NoPath);
        assert_eq!(search.steps(), 1);
        assert_eq!(search.path(), None);
        assert_eq!(search.cost(), None);

        let mut search = Search::new(&grid, Heuristic::Diagonal).unwrap();
        assert_eq!(search.run(), SearchStatus::Found);
        assert_eq!(search.abandon(), SearchStatus::Found);
        assert!(search.path().is_some());
    }

    /// A node reached again through a cheaper route gets its cost and parent replaced.
    #[test]
    fn relaxation_replaces_parent() {
        // (0, 2) is first seen from (1, 1) at cost 6 and later from (0, 1) at cost 4.
        let grid: Grid = "S...\n....\n..#.\n...E".parse().unwrap();
        let mut search = Search::new(&grid, Heuristic::Diagonal).unwrap();
        assert_eq!(search.step(), SearchStatus::Searching);
        assert_eq!(search.node(&c(0, 2)), None);
        assert_eq!(search.step(), SearchStatus::Searching);
        let first = search.node(&c(0, 2)).cloned().unwrap();
        assert_eq!((first.g, first.parent), (6, Some(3)));
        assert_eq!(search.node_by_id(3).map(|n| n.point), Some(c(1, 1)));

        assert_eq!(search.run(), SearchStatus::Found);
        assert_eq!(search.steps(), 7);
        let relaxed = search.node(&c(0, 2)).unwrap();
        assert_eq!((relaxed.g, relaxed.f), (4, 11));
        assert_eq!(search.node_by_id(relaxed.parent.unwrap()).map(|n| n.point), Some(c(0, 1)));
        assert_eq!(
            search.path(),
            Some(vec![c(1, 1), c(1, 2), c(2, 3), c(3, 3)])
        );
        assert_eq!(search.cost(), Some(10));
        for node in search.nodes() {
            if let Some(parent) = node.parent {
                let parent = search.node_by_id(parent).unwrap();
                assert!(parent.point.is_adjacent_to(&node.point));
                assert_eq!(parent.g + move_cost(&parent.point, &node.point), node.g);
            }
        }
    }

    #[test]
    fn enclosed_end_exhausts_open_set() {
        let grid: Grid = "S....\n.###.\n.#E#.\n.###.\n.....".parse().unwrap();
        let mut search = Search::new(&grid, Heuristic::Diagonal).unwrap();
        assert_eq!(search.run(), SearchStatus::NoPath);
        assert_eq!(search.steps(), 16);
        assert_eq!(search.closed_count(), 16);
        assert_eq!(search.path(), None);
        assert_eq!(search.cost(), None);
    }
}
