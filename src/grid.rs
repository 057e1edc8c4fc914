use core::fmt;
use std::str::FromStr;

use grid_util::grid::{Grid as _, SimpleGrid};
use grid_util::point::Point;
use itertools::iproduct;
use smallvec::SmallVec;

use crate::coordinate::Coordinate;
use crate::errors::GridError;

/// Side length used by [Grid::default].
pub const DEFAULT_GRID_SIZE: usize = 20;
/// Cost of a move between two cells sharing a row or column.
pub const MOVE_LATERAL: u32 = 2;
/// Cost of a move between two diagonally adjacent cells.
pub const MOVE_DIAGONAL: u32 = 3;

/// Row and column offsets in the order neighbours are visited. Their product (minus `(0, 0)`)
/// gives the 8-neighbourhood; the order determines which of several equally good nodes is
/// discovered, and hence expanded, first.
const NEIGHBOUR_OFFSETS: [isize; 3] = [0, -1, 1];

/// The classification of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Block,
    Start,
    End,
    Path,
}

impl CellState {
    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Block => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Path => '*',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<CellState> {
        match symbol {
            '.' => Some(CellState::Empty),
            '#' => Some(CellState::Block),
            'S' => Some(CellState::Start),
            'E' => Some(CellState::End),
            '*' => Some(CellState::Path),
            _ => None,
        }
    }
}

/// Cost of moving between two adjacent cells.
pub fn move_cost(from: &Coordinate, to: &Coordinate) -> u32 {
    if from.is_lateral_to(to) {
        MOVE_LATERAL
    } else {
        MOVE_DIAGONAL
    }
}

/// A square map of [CellState]s with at most one start and one end cell, stored in a
/// [SimpleGrid] with the column as `x` and the row as `y`. The start and end positions are cached
/// so they can be read without scanning the grid; every write keeps the cache consistent with the
/// cells.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: SimpleGrid<CellState>,
    start: Option<Coordinate>,
    end: Option<Coordinate>,
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(DEFAULT_GRID_SIZE)
    }
}

impl Grid {
    /// Creates an empty `size` x `size` grid.
    pub fn new(size: usize) -> Grid {
        Grid {
            cells: SimpleGrid::new(size, size, CellState::Empty),
            start: None,
            end: None,
        }
    }

    pub fn size(&self) -> usize {
        self.cells.width()
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.start
    }

    pub fn end(&self) -> Option<Coordinate> {
        self.end
    }

    fn point(&self, coord: Coordinate) -> Option<Point> {
        let x = i32::try_from(coord.col).ok()?;
        let y = i32::try_from(coord.row).ok()?;
        self.cells.index_in_bounds(x, y).then(|| Point::new(x, y))
    }

    fn checked_point(&self, coord: Coordinate) -> Result<Point, GridError> {
        self.point(coord).ok_or(GridError::OutOfBounds {
            coord,
            size: self.size(),
        })
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        self.point(coord).is_some()
    }

    /// Row-major position of `coord` in the underlying storage.
    pub fn index(&self, coord: &Coordinate) -> Option<usize> {
        self.point(*coord).map(|p| self.cells.get_ix_point(&p))
    }

    pub fn get(&self, coord: Coordinate) -> Result<CellState, GridError> {
        let point = self.checked_point(coord)?;
        self.cells
            .get_point(point)
            .copied()
            .ok_or(GridError::OutOfBounds {
                coord,
                size: self.size(),
            })
    }

    /// Writes a cell whose coordinate is already known to be in bounds.
    fn write(&mut self, coord: Coordinate, state: CellState) {
        if let Some(point) = self.point(coord) {
            if let Some(cell) = self.cells.get_point_mut(point) {
                *cell = state;
            }
        }
    }

    /// Writes a cell. Placing a [CellState::Start] or [CellState::End] removes the previous one,
    /// and overwriting the current start or end forgets it.
    pub fn set(&mut self, coord: Coordinate, state: CellState) -> Result<(), GridError> {
        match self.get(coord)? {
            CellState::Start => self.start = None,
            CellState::End => self.end = None,
            _ => {}
        }
        let previous = match state {
            CellState::Start => self.start.replace(coord),
            CellState::End => self.end.replace(coord),
            _ => None,
        };
        if let Some(previous) = previous {
            self.write(previous, CellState::Empty);
        }
        self.write(coord, state);
        Ok(())
    }

    /// Blocked cells and positions outside the grid cannot be moved onto.
    pub fn is_blocked(&self, coord: Coordinate) -> bool {
        self.get(coord).map_or(true, |state| state == CellState::Block)
    }

    /// Flips a cell the way an editor brush does: empty and path cells become blocks, anything
    /// else is cleared. Returns the new state.
    pub fn toggle_block(&mut self, coord: Coordinate) -> Result<CellState, GridError> {
        let new_state = match self.get(coord)? {
            CellState::Empty | CellState::Path => CellState::Block,
            CellState::Block | CellState::Start | CellState::End => CellState::Empty,
        };
        self.set(coord, new_state)?;
        Ok(new_state)
    }

    /// Resets every cell to [CellState::Empty], including start and end.
    pub fn clear(&mut self) {
        let size = self.size();
        self.cells = SimpleGrid::new(size, size, CellState::Empty);
        self.start = None;
        self.end = None;
    }

    /// Removes a previously drawn path, leaving all other cells untouched.
    pub fn clear_path(&mut self) {
        let path = self
            .cells()
            .filter(|(_, state)| *state == CellState::Path)
            .map(|(coord, _)| coord)
            .collect::<Vec<Coordinate>>();
        for coord in path {
            self.write(coord, CellState::Empty);
        }
    }

    /// Draws a path onto the grid. Start and end cells keep their state. Every coordinate is
    /// checked before anything is written.
    pub fn mark_path(&mut self, path: &[Coordinate]) -> Result<(), GridError> {
        let states = path
            .iter()
            .map(|c| self.get(*c))
            .collect::<Result<Vec<CellState>, GridError>>()?;
        for (coord, state) in path.iter().zip(states) {
            if !matches!(state, CellState::Start | CellState::End) {
                self.write(*coord, CellState::Path);
            }
        }
        Ok(())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, CellState)> + '_ {
        let size = self.size();
        iproduct!(0..size, 0..size)
            .map(|(row, col)| Coordinate::new(row, col))
            .filter_map(move |coord| self.get(coord).ok().map(|state| (coord, state)))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells().filter(|(_, s)| *s == state).count()
    }

    /// The in-bounds, unblocked cells around `pos` paired with the cost of moving there.
    pub fn neighborhood_points_and_cost(
        &self,
        pos: &Coordinate,
    ) -> SmallVec<[(Coordinate, u32); 8]> {
        iproduct!(NEIGHBOUR_OFFSETS, NEIGHBOUR_OFFSETS)
            .filter(|&(d_row, d_col)| d_row != 0 || d_col != 0)
            .filter_map(|(d_row, d_col)| pos.offset(d_row, d_col))
            .filter(|p| !self.is_blocked(*p))
            .map(|p| (p, move_cost(pos, &p)))
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let size = self.size();
        for row in 0..size {
            let line = (0..size)
                .filter_map(|col| self.get(Coordinate::new(row, col)).ok())
                .map(CellState::symbol)
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the text form written by [Display](fmt::Display): one line per row, one symbol per
/// cell. Blank lines and surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<&str>>();
        let size = lines.len();
        let mut grid = Grid::new(size);
        for (row, line) in lines.into_iter().enumerate() {
            let cols = line.chars().count();
            if cols != size {
                return Err(GridError::NotSquare { rows: size, cols });
            }
            for (col, symbol) in line.chars().enumerate() {
                let state = CellState::from_symbol(symbol)
                    .ok_or(GridError::UnknownCell { symbol, row, col })?;
                grid.set(Coordinate::new(row, col), state)?;
            }
        }
        Ok(grid)
    }
}
