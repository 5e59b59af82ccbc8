//! Wilson's-algorithm maze generation, raced by four classic solvers.
//!
//! [`generate_maze`] carves a uniform spanning tree into a rectangular grid, optionally
//! knocking down extra walls for multiple solutions. [`run_search`] runs one of DFS, BFS,
//! greedy best-first or A* over the finished maze and returns the path together with an
//! ordered exploration trace. [`race`] runs several of them concurrently over one shared maze.

pub mod config;
pub mod error;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod race;
pub mod solvers;
pub mod trace;

pub use config::{GoalPlacement, RunConfig};
pub use error::MazeError;
pub use generators::{GenerationReport, generate_maze, generate_maze_with_report};
pub use maze::{Coord, Maze};
pub use race::race;
pub use solvers::{SearchOutcome, SearchStatus, Solver, run_search, run_search_with_cancel};
pub use trace::ExplorationTrace;

/// A generated maze and the outcome of every solver raced over it.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub maze: Maze,
    pub generation: GenerationReport,
    pub start: Coord,
    pub goal: Coord,
    pub outcomes: Vec<SearchOutcome>,
}

impl RunReport {
    pub fn outcome(&self, solver: Solver) -> Option<&SearchOutcome> {
        self.outcomes.iter().find(|o| o.solver == solver)
    }
}

/// Generate a maze from `config`, place the goal and race the configured solvers.
pub fn run(config: &RunConfig) -> Result<RunReport, MazeError> {
    let (maze, generation) = generate_maze_with_report(
        config.width,
        config.height,
        config.multiple_solutions,
        config.seed,
    )?;
    let start = config.start;
    if !maze.is_in_bounds(start) {
        return Err(MazeError::OutOfBounds {
            coord: start,
            width: maze.width(),
            height: maze.height(),
        });
    }
    let goal = config.goal.resolve(&maze, start)?;
    let outcomes = race(&maze, start, goal, &config.solvers, None)?;
    Ok(RunReport {
        maze,
        generation,
        start,
        goal,
        outcomes,
    })
}
