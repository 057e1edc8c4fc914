use core::fmt;
use std::str::FromStr;

use crate::coordinate::Coordinate;
use crate::errors::HeuristicParseError;
use crate::grid::{MOVE_DIAGONAL, MOVE_LATERAL};

/// Estimates of the remaining cost from a cell to the end cell. All estimates are in the same
/// units as [MOVE_LATERAL] and [MOVE_DIAGONAL].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Lateral steps only. Overestimates whenever a diagonal shortcut exists.
    #[default]
    Manhattan,
    /// Takes as many diagonal steps as possible before going straight; exact on an empty grid.
    Diagonal,
    /// Straight-line distance, rounded down, in lateral steps.
    Euclidean,
    /// No estimate at all, turning the search into Dijkstra's algorithm.
    Dijkstra,
    /// A constant 1, below the cheapest possible move.
    Unit,
    /// Half the difference between the row and column distance, rounded up, in lateral steps.
    Custom,
}

impl Heuristic {
    /// Every variant, in the order a selection list shows them.
    pub const ALL: [Heuristic; 6] = [
        Heuristic::Manhattan,
        Heuristic::Diagonal,
        Heuristic::Euclidean,
        Heuristic::Dijkstra,
        Heuristic::Unit,
        Heuristic::Custom,
    ];

    pub fn estimate(&self, from: &Coordinate, to: &Coordinate) -> u32 {
        let (dr, dc) = from.deltas(to);
        match self {
            Heuristic::Manhattan => (dr + dc) * MOVE_LATERAL,
            Heuristic::Diagonal => {
                let (short, long) = (dr.min(dc), dr.max(dc));
                MOVE_DIAGONAL * short + MOVE_LATERAL * (long - short)
            }
            Heuristic::Euclidean => {
                let squared = (dr as u64).pow(2) + (dc as u64).pow(2);
                (squared as f64).sqrt().floor() as u32 * MOVE_LATERAL
            }
            Heuristic::Dijkstra => 0,
            Heuristic::Unit => 1,
            Heuristic::Custom => dr.abs_diff(dc).div_ceil(2) * MOVE_LATERAL,
        }
    }

    /// Whether the estimate never exceeds the true remaining cost.
    pub fn is_admissible(&self) -> bool {
        !matches!(self, Heuristic::Manhattan | Heuristic::Custom)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Manhattan => "Manhattan Method",
            Heuristic::Diagonal => "Diagonal Method",
            Heuristic::Euclidean => "Euclidean Method",
            Heuristic::Dijkstra => "Dijkstra's Method",
            Heuristic::Unit => "Unit Method",
            Heuristic::Custom => "Custom Method",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either the display name or the bare variant name, ignoring case.
impl FromStr for Heuristic {
    type Err = HeuristicParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Heuristic::ALL
            .into_iter()
            .find(|h| {
                h.name().eq_ignore_ascii_case(wanted)
                    || format!("{:?}", h).eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| HeuristicParseError(s.to_owned()))
    }
}
