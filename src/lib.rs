//! # grid_astar
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search on a square grid of blocked
//! and unblocked cells with 8-connected movement. Lateral moves cost [MOVE_LATERAL], diagonal
//! moves [MOVE_DIAGONAL]. The cost estimate is one of a fixed set of [Heuristic]s, some of which
//! are admissible and some of which trade optimality for fewer expansions.
//!
//! A [Grid] holds the cells together with a single start and end. A [PathEngine] borrows a grid,
//! runs the search and reports the route (excluding the start, ending with the end), its total
//! cost, the number of expanded nodes and the time it took. The same loop is available one
//! expansion at a time through [Search].
//!
//! The search stops as soon as the end shows up among the neighbours of the node being
//! expanded, so the end itself is never expanded.
pub mod components;
pub mod coordinate;
pub mod engine;
pub mod errors;
pub mod grid;
pub mod heuristic;
pub mod search;

pub use components::Components;
pub use coordinate::Coordinate;
pub use engine::{path_cost, EngineState, FoundPath, PathEngine, SearchOutcome, SearchStats};
pub use errors::{GridError, HeuristicParseError, SearchError};
pub use grid::{move_cost, CellState, Grid, DEFAULT_GRID_SIZE, MOVE_DIAGONAL, MOVE_LATERAL};
pub use heuristic::Heuristic;
pub use search::{NodeId, NodeStatus, Search, SearchNode, SearchStatus};
