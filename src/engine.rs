use itertools::Itertools;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

use crate::components::Components;
use crate::coordinate::Coordinate;
use crate::errors::SearchError;
use crate::grid::{move_cost, Grid};
use crate::heuristic::Heuristic;
use crate::search::Search;

/// Sum of the move costs along `start`, `path[0]`, ..., `path[n - 1]`. Returns [None] if two
/// consecutive coordinates are not adjacent.
pub fn path_cost(start: Coordinate, path: &[Coordinate]) -> Option<u32> {
    std::iter::once(&start)
        .chain(path)
        .tuple_windows()
        .map(|(a, b)| a.is_adjacent_to(b).then(|| move_cost(a, b)))
        .sum()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of nodes expanded.
    pub steps: usize,
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundPath {
    /// Excludes the start, ends with the end.
    pub path: Vec<Coordinate>,
    pub cost: u32,
    pub stats: SearchStats,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(FoundPath),
    /// The end cannot be reached from the start.
    NoPath(SearchStats),
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&[Coordinate]> {
        match self {
            SearchOutcome::Found(found) => Some(&found.path),
            SearchOutcome::NoPath(_) => None,
        }
    }

    pub fn cost(&self) -> Option<u32> {
        match self {
            SearchOutcome::Found(found) => Some(found.cost),
            SearchOutcome::NoPath(_) => None,
        }
    }

    pub fn stats(&self) -> SearchStats {
        match self {
            SearchOutcome::Found(found) => found.stats,
            SearchOutcome::NoPath(stats) => *stats,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No grid bound.
    Idle,
    /// A grid is bound and a search can be run.
    Ready,
    Found,
    NoPath,
}

/// Runs A* searches over a bound [Grid] with the selected [Heuristic]. The grid is borrowed for
/// as long as it is bound, so it cannot change underneath a search.
///
/// ```
/// use grid_astar::{CellState, Coordinate, Grid, Heuristic, PathEngine};
///
/// let mut grid = Grid::new(3);
/// grid.set(Coordinate::new(0, 0), CellState::Start).unwrap();
/// grid.set(Coordinate::new(2, 2), CellState::End).unwrap();
/// let mut engine = PathEngine::new(Heuristic::Diagonal);
/// engine.bind(&grid).unwrap();
/// let outcome = engine.find_path().unwrap();
/// assert_eq!(outcome.cost(), Some(6));
/// ```
#[derive(Clone, Debug)]
pub struct PathEngine<'g> {
    pub heuristic: Heuristic,
    /// Checks connected components before searching, so an unreachable end is reported without
    /// flood-filling the grid.
    pub check_reachability: bool,
    grid: Option<&'g Grid>,
    search: Option<Search<'g>>,
    state: EngineState,
    last_run: Option<SearchStats>,
}

impl Default for PathEngine<'_> {
    fn default() -> Self {
        PathEngine::new(Heuristic::default())
    }
}

impl<'g> PathEngine<'g> {
    pub fn new(heuristic: Heuristic) -> PathEngine<'g> {
        PathEngine {
            heuristic,
            check_reachability: false,
            grid: None,
            search: None,
            state: EngineState::Idle,
            last_run: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Statistics of the last completed run, if any.
    pub fn last_run(&self) -> Option<SearchStats> {
        self.last_run
    }

    /// The search of the last run, or the prepared one after [bind](Self::bind).
    pub fn search(&self) -> Option<&Search<'g>> {
        self.search.as_ref()
    }

    /// Binds a grid, which must have both a start and an end. On error the engine stays as it
    /// was.
    pub fn bind(&mut self, grid: &'g Grid) -> Result<(), SearchError> {
        let search = Search::new(grid, self.heuristic).map_err(|e| {
            warn!("Refusing to bind grid: {}", e);
            e
        })?;
        debug!(
            "Bound {}x{} grid from {} to {}",
            grid.size(),
            grid.size(),
            search.start(),
            search.end()
        );
        self.grid = Some(grid);
        self.search = Some(search);
        self.state = EngineState::Ready;
        Ok(())
    }

    /// Drops the bound grid and all search state.
    pub fn reset(&mut self) {
        self.grid = None;
        self.search = None;
        self.state = EngineState::Idle;
    }

    /// Searches the bound grid from start to end. Can be called repeatedly; each call starts
    /// from scratch with the current [heuristic](Self::heuristic).
    pub fn find_path(&mut self) -> Result<SearchOutcome, SearchError> {
        let grid = self.grid.ok_or_else(|| {
            warn!("find_path called without a bound grid");
            SearchError::NoGridBound
        })?;
        let start_time = Instant::now();
        let mut search = match self.search.take() {
            Some(search) if search.steps() == 0 && search.heuristic() == self.heuristic => search,
            _ => Search::new(grid, self.heuristic)?,
        };

        if self.check_reachability
            && !Components::generate(grid).reachable(&search.start(), &search.end())
        {
            info!("{} is not reachable from {}", search.end(), search.start());
            search.abandon();
            return Ok(self.finish(search, start_time));
        }

        search.run();
        Ok(self.finish(search, start_time))
    }

    fn finish(&mut self, search: Search<'g>, start_time: Instant) -> SearchOutcome {
        let found = search.path().zip(search.cost());
        let stats = SearchStats {
            steps: search.steps(),
            elapsed: start_time.elapsed(),
        };
        self.last_run = Some(stats);
        self.search = Some(search);
        match found {
            Some((path, cost)) => {
                info!(
                    "{}: path of {} cells, cost {}, {} steps in {:?}",
                    self.heuristic,
                    path.len(),
                    cost,
                    stats.steps,
                    stats.elapsed
                );
                self.state = EngineState::Found;
                SearchOutcome::Found(FoundPath { path, cost, stats })
            }
            None => {
                info!("{}: no path after {} steps", self.heuristic, stats.steps);
                self.state = EngineState::NoPath;
                SearchOutcome::NoPath(stats)
            }
        }
    }
}
