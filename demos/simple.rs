use grid_astar::{Grid, Heuristic, PathEngine, SearchOutcome};

// In this example a path is found on a 5x5 grid with shape
//  _____
// |S    |
// |###  |
// |   # |
// | # #E|
// |     |
//  _____
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood

fn main() {
    let mut grid: Grid = "S....\n###..\n...#.\n.#.#E\n....."
        .parse()
        .expect("grid text is valid");
    println!("{}", grid);
    let outcome = {
        let mut engine = PathEngine::new(Heuristic::Diagonal);
        engine.bind(&grid).expect("grid has a start and an end");
        engine.find_path().expect("a grid is bound")
    };
    match outcome {
        SearchOutcome::Found(found) => {
            println!("Path (cost {}):", found.cost);
            for p in &found.path {
                println!("{}", p);
            }
            grid.mark_path(&found.path).expect("path lies on the grid");
            println!("\n{}", grid);
        }
        SearchOutcome::NoPath(_) => println!("No path found"),
    }
}
