use thiserror::Error;

use crate::coordinate::Coordinate;

/// Errors raised by [Grid](crate::grid::Grid) reads, writes and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("coordinate {coord} is outside of a {size}x{size} grid")]
    OutOfBounds { coord: Coordinate, size: usize },
    #[error("grid text is not square: {rows} rows but a row of length {cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("unknown cell symbol {symbol:?} at ({row}, {col})")]
    UnknownCell { symbol: char, row: usize, col: usize },
}

/// Misuse of a [PathEngine](crate::engine::PathEngine). Not finding a path is not an error, see
/// [SearchOutcome::NoPath](crate::engine::SearchOutcome::NoPath).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no grid has been bound to the engine")]
    NoGridBound,
    #[error("the grid has no start cell")]
    MissingStart,
    #[error("the grid has no end cell")]
    MissingEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown heuristic {0:?}")]
pub struct HeuristicParseError(pub String);
