use grid_astar::{CellState, Coordinate, Grid, Heuristic, PathEngine};

// Compares every heuristic on the same 20x20 grid. Inadmissible heuristics usually expand fewer
// nodes and may settle for a longer route.

fn main() {
    const N: usize = 20;
    let mut grid = Grid::new(N);
    for row in 0..14 {
        grid.set(Coordinate::new(row, 6), CellState::Block).unwrap();
        grid.set(Coordinate::new(N - 1 - row, 13), CellState::Block).unwrap();
    }
    grid.set(Coordinate::new(1, 1), CellState::Start).unwrap();
    grid.set(Coordinate::new(N - 2, N - 2), CellState::End).unwrap();
    println!("{}", grid);

    let mut engine = PathEngine::default();
    engine.bind(&grid).unwrap();
    println!("{:<20}{:>8}{:>8}{:>12}", "heuristic", "cost", "steps", "admissible");
    for heuristic in Heuristic::ALL {
        engine.heuristic = heuristic;
        let outcome = engine.find_path().unwrap();
        let cost = outcome
            .cost()
            .map_or_else(|| "-".to_owned(), |c| c.to_string());
        println!(
            "{:<20}{:>8}{:>8}{:>12}",
            heuristic.name(),
            cost,
            outcome.stats().steps,
            heuristic.is_admissible()
        );
    }
}
