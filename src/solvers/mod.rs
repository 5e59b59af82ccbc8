use std::{
    collections::{HashMap, HashSet},
    str::FromStr,
    sync::atomic::{AtomicBool, Ordering},
};

mod frontier;

use frontier::Frontier;

use crate::{
    error::MazeError,
    maze::{Coord, Maze, manhattan},
    trace::ExplorationTrace,
};

/// Ordered cells from start to goal. Empty when no path was found.
pub type Path = Vec<Coord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solver {
    Dfs,
    Bfs,
    Greedy,
    AStar,
}

impl Solver {
    /// Available maze solvers
    pub const ALL: [Solver; 4] = [Solver::Dfs, Solver::Bfs, Solver::Greedy, Solver::AStar];

    /// Frontier priority of a cell reached with travel cost `g` and heuristic `h`.
    /// Lower pops first. Only the priority-queue solvers look at it.
    fn priority(self, g: usize, h: usize) -> usize {
        match self {
            Solver::Dfs | Solver::Bfs => 0,
            Solver::Greedy => h,
            Solver::AStar => g + h,
        }
    }

    /// Whether a discovered cell is pushed again when reached more cheaply.
    fn relaxes(self) -> bool {
        matches!(self, Solver::AStar)
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Solver::Dfs => "dfs",
            Solver::Bfs => "bfs",
            Solver::Greedy => "greedy",
            Solver::AStar => "astar",
        }
    }
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Greedy => write!(f, "Greedy Best-First Search"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

impl FromStr for Solver {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" => Ok(Solver::Dfs),
            "bfs" => Ok(Solver::Bfs),
            "greedy" => Ok(Solver::Greedy),
            "astar" | "a*" => Ok(Solver::AStar),
            _ => Err(MazeError::UnknownSolver(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// The goal was reached and the path reconstructed
    Found,
    /// The frontier ran empty before the goal was reached
    NoPathFound,
    /// The cancellation flag was raised; the trace is partial
    Cancelled,
}

/// Result of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub solver: Solver,
    pub status: SearchStatus,
    pub path: Path,
    pub trace: ExplorationTrace,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }

    /// Number of cells the search expanded.
    pub fn explored(&self) -> usize {
        self.trace.len()
    }
}

/// Search `maze` for a path from `start` to `goal`.
pub fn run_search(
    maze: &Maze,
    start: Coord,
    goal: Coord,
    solver: Solver,
) -> Result<SearchOutcome, MazeError> {
    run_search_with_cancel(maze, start, goal, solver, None)
}

/// Same as [`run_search`], checking `cancel` after every expansion.
///
/// A raised flag stops the run with [`SearchStatus::Cancelled`], the trace so far and an
/// empty path.
pub fn run_search_with_cancel(
    maze: &Maze,
    start: Coord,
    goal: Coord,
    solver: Solver,
    cancel: Option<&AtomicBool>,
) -> Result<SearchOutcome, MazeError> {
    for coord in [start, goal] {
        if !maze.is_in_bounds(coord) {
            return Err(MazeError::OutOfBounds {
                coord,
                width: maze.width(),
                height: maze.height(),
            });
        }
    }

    let mut frontier = Frontier::for_solver(solver);
    let mut trace = ExplorationTrace::new();
    // Best known travel cost of every discovered cell
    let mut costs: HashMap<Coord, usize> = HashMap::from([(start, 0)]);
    let mut parents: HashMap<Coord, Coord> = HashMap::new();
    let mut expanded: HashSet<Coord> = HashSet::new();

    frontier.push(start, solver.priority(0, manhattan(start, goal)));

    let status = loop {
        let Some(current) = frontier.pop() else {
            break SearchStatus::NoPathFound;
        };
        // Stale entry of a cell that was pushed again more cheaply
        if !expanded.insert(current) {
            continue;
        }
        trace.record(current, frontier.len());

        if current == goal {
            break SearchStatus::Found;
        }

        let new_cost = costs.get(&current).copied().unwrap_or_default() + 1; // Uniform cost for each step
        for next in maze.open_neighbors(current) {
            let improves = match costs.get(&next) {
                None => true,
                Some(&existing_cost) => {
                    solver.relaxes() && new_cost < existing_cost && !expanded.contains(&next)
                }
            };
            if !improves {
                continue;
            }
            costs.insert(next, new_cost);
            parents.insert(next, current);
            frontier.push(next, solver.priority(new_cost, manhattan(next, goal)));
        }

        if cancel.is_some_and(|flag| flag.load(Ordering::Acquire)) {
            break SearchStatus::Cancelled;
        }
    };

    let path = match status {
        SearchStatus::Found => reconstruct_path(&parents, start, goal),
        SearchStatus::NoPathFound | SearchStatus::Cancelled => Vec::new(),
    };
    tracing::debug!(
        "[search] {} from {:?} to {:?}: {:?}, explored {}, path length {}",
        solver,
        start,
        goal,
        status,
        trace.len(),
        path.len()
    );

    Ok(SearchOutcome {
        solver,
        status,
        path,
        trace,
    })
}

/// Backtrack predecessor links from `goal` to `start`.
fn reconstruct_path(parents: &HashMap<Coord, Coord>, start: Coord, goal: Coord) -> Path {
    let mut path = vec![goal];
    let mut child = goal;
    while child != start {
        match parents.get(&child) {
            Some(&parent) => {
                path.push(parent);
                child = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::generate_maze;

    fn assert_valid_path(maze: &Maze, outcome: &SearchOutcome, start: Coord, goal: Coord) {
        let path = &outcome.path;
        assert_eq!(path.first(), Some(&start), "{} path must start at start", outcome.solver);
        assert_eq!(path.last(), Some(&goal), "{} path must end at goal", outcome.solver);
        for pair in path.windows(2) {
            assert!(maze.is_open(pair[0], pair[1]).unwrap());
        }
        let unique = path.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), path.len(), "{} path repeats a cell", outcome.solver);
    }

    #[test]
    fn test_all_solvers_find_valid_paths() {
        for multiple_solutions in [false, true] {
            for seed in 0..5 {
                let maze = generate_maze(15, 9, multiple_solutions, Some(seed)).unwrap();
                let (start, goal) = ((0, 0), (14, 8));
                for solver in Solver::ALL {
                    let outcome = run_search(&maze, start, goal, solver).unwrap();
                    assert!(outcome.is_found());
                    assert_valid_path(&maze, &outcome, start, goal);
                    assert!(outcome.explored() <= maze.cell_count());
                }
            }
        }
    }

    #[test]
    fn test_bfs_and_astar_are_optimal() {
        for multiple_solutions in [false, true] {
            for seed in 10..20 {
                let maze = generate_maze(17, 13, multiple_solutions, Some(seed)).unwrap();
                let (start, goal) = ((0, 12), (16, 0));
                let shortest = maze.distance(start, goal).unwrap() + 1;
                let lengths = Solver::ALL.map(|solver| {
                    run_search(&maze, start, goal, solver).unwrap().path.len()
                });
                let [dfs, bfs, greedy, astar] = lengths;
                assert_eq!(bfs, shortest);
                assert_eq!(astar, shortest);
                assert!(dfs >= shortest);
                assert!(greedy >= shortest);
                if !multiple_solutions {
                    // A tree has exactly one simple path
                    assert_eq!(dfs, shortest);
                    assert_eq!(greedy, shortest);
                }
            }
        }
    }

    #[test]
    fn test_five_by_five_bfs() {
        let maze = generate_maze(5, 5, false, Some(2024)).unwrap();
        let outcome = run_search(&maze, (0, 0), (4, 4), Solver::Bfs).unwrap();
        assert!(outcome.is_found());
        // Manhattan lower bound of 8 steps, and grid parity keeps every path length odd
        assert!(outcome.path.len() >= 9);
        assert_eq!(outcome.path.len() % 2, 1);
        assert!(outcome.explored() <= 25);
    }

    #[test]
    fn test_start_is_goal() {
        let maze = generate_maze(1, 1, false, Some(0)).unwrap();
        for solver in Solver::ALL {
            let outcome = run_search(&maze, (0, 0), (0, 0), solver).unwrap();
            assert_eq!(outcome.status, SearchStatus::Found);
            assert_eq!(outcome.path, vec![(0, 0)]);
            assert_eq!(outcome.explored(), 1);
        }
    }

    #[test]
    fn test_disconnected_maze_reports_no_path() {
        let maze = Maze::new(4, 4).unwrap();
        for solver in Solver::ALL {
            let outcome = run_search(&maze, (0, 0), (3, 3), solver).unwrap();
            assert_eq!(outcome.status, SearchStatus::NoPathFound);
            assert!(outcome.path.is_empty());
            assert_eq!(outcome.explored(), 1);
        }
    }

    #[test]
    fn test_out_of_bounds_endpoints() {
        let maze = Maze::new(3, 3).unwrap();
        assert!(matches!(
            run_search(&maze, (0, 0), (3, 0), Solver::Bfs),
            Err(MazeError::OutOfBounds { coord: (3, 0), .. })
        ));
    }

    #[test]
    fn test_traces_are_deterministic() {
        let maze = generate_maze(21, 21, true, Some(77)).unwrap();
        for solver in Solver::ALL {
            let first = run_search(&maze, (0, 0), (20, 20), solver).unwrap();
            let second = run_search(&maze, (0, 0), (20, 20), solver).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_trace_has_no_repeated_cells() {
        let maze = generate_maze(21, 15, true, Some(5)).unwrap();
        for solver in Solver::ALL {
            let outcome = run_search(&maze, (10, 7), (0, 14), solver).unwrap();
            let unique = outcome.trace.cells().collect::<HashSet<_>>();
            assert_eq!(unique.len(), outcome.explored());
            assert_eq!(outcome.trace.records()[0].cell, (10, 7));
        }
    }

    #[test]
    fn test_open_corridor_orders() {
        // Corridor along the top row, plus a dead end hanging off (0, 0)
        let mut maze = Maze::new(3, 2).unwrap();
        for (a, b) in [((0, 0), (1, 0)), ((1, 0), (2, 0)), ((0, 0), (0, 1)), ((0, 1), (1, 1))] {
            maze.set_open(a, b, true).unwrap();
        }
        let bfs = run_search(&maze, (0, 0), (2, 0), Solver::Bfs).unwrap();
        assert_eq!(
            bfs.trace.cells().collect::<Vec<_>>(),
            vec![(0, 0), (1, 0), (0, 1), (2, 0)]
        );
        // Neighbors are pushed right before down, so the stack pops down first
        let dfs = run_search(&maze, (0, 0), (2, 0), Solver::Dfs).unwrap();
        assert_eq!(
            dfs.trace.cells().collect::<Vec<_>>(),
            vec![(0, 0), (0, 1), (1, 1), (1, 0), (2, 0)]
        );
        assert_eq!(dfs.path, vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_cancelled_search_keeps_partial_trace() {
        let maze = generate_maze(9, 9, false, Some(1)).unwrap();
        let cancel = AtomicBool::new(true);
        let outcome = run_search_with_cancel(&maze, (0, 0), (8, 8), Solver::AStar, Some(&cancel))
            .unwrap();
        assert_eq!(outcome.status, SearchStatus::Cancelled);
        assert_eq!(outcome.explored(), 1);
        assert!(outcome.path.is_empty());
    }

    #[test]
    fn test_parse_solver() {
        assert_eq!("BFS".parse::<Solver>(), Ok(Solver::Bfs));
        assert_eq!("a*".parse::<Solver>(), Ok(Solver::AStar));
        assert_eq!("greedy".parse::<Solver>(), Ok(Solver::Greedy));
        assert!("dijkstra".parse::<Solver>().is_err());
        for solver in Solver::ALL {
            assert_eq!(solver.short_name().parse::<Solver>(), Ok(solver));
        }
    }
}
