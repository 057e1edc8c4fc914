use log::debug;
use petgraph::unionfind::UnionFind;

use crate::coordinate::Coordinate;
use crate::grid::Grid;

/// 8-connected components of the unblocked cells of a [Grid], stored in a [UnionFind] structure
/// over the grid's storage indices. Lets a caller tell ahead of a search whether the end can be
/// reached at all.
#[derive(Clone, Debug)]
pub struct Components<'g> {
    grid: &'g Grid,
    components: UnionFind<usize>,
}

impl<'g> Components<'g> {
    /// Links up every unblocked cell with its unblocked neighbours.
    pub fn generate(grid: &'g Grid) -> Components<'g> {
        let size = grid.size();
        let mut components = UnionFind::new(size * size);
        for (point, _) in grid.cells().filter(|(p, _)| !grid.is_blocked(*p)) {
            let Some(parent_ix) = grid.index(&point) else {
                continue;
            };
            for (n, _) in grid.neighborhood_points_and_cost(&point) {
                if let Some(ix) = grid.index(&n) {
                    components.union(parent_ix, ix);
                }
            }
        }
        debug!("Generated connected components for a {size}x{size} grid");
        Components { grid, components }
    }

    /// Retrieves the component id a given [Coordinate] belongs to.
    pub fn get_component(&self, point: &Coordinate) -> Option<usize> {
        self.grid.index(point).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Coordinate, goal: &Coordinate) -> bool {
        match (self.grid.index(start), self.grid.index(goal)) {
            (Some(s), Some(g)) => self.components.equiv(s, g),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following grid:
        //  ___
        // |.#.|
        // |.#.|
        // |.#.|
        //  ___
        let grid: Grid = ".#.\n.#.\n.#.".parse().unwrap();
        let components = Components::generate(&grid);
        let left = Coordinate::new(0, 0);
        assert!(components.reachable(&left, &Coordinate::new(2, 0)));
        assert!(!components.reachable(&left, &Coordinate::new(0, 2)));
        assert!(!components.reachable(&left, &Coordinate::new(1, 1)));
        assert!(!components.reachable(&left, &Coordinate::new(3, 0)));
        assert_eq!(
            components.get_component(&left),
            components.get_component(&Coordinate::new(1, 0))
        );
        assert_ne!(
            components.get_component(&left),
            components.get_component(&Coordinate::new(2, 2))
        );
        assert_eq!(components.get_component(&Coordinate::new(0, 3)), None);
    }

    /// Diagonal moves squeeze between two blocks that only touch at a corner.
    #[test]
    fn diagonal_gap_is_connected() {
        let grid: Grid = ".#\n#.".parse().unwrap();
        let components = Components::generate(&grid);
        assert!(components.reachable(&Coordinate::new(0, 0), &Coordinate::new(1, 1)));
    }
}
