use std::sync::atomic::AtomicBool;

use crate::{
    error::MazeError,
    maze::{Coord, Maze},
    solvers::{SearchOutcome, Solver, run_search_with_cancel},
};

/// Run every solver in `solvers` on its own thread over the same maze.
///
/// The maze is shared read-only and each thread owns its frontier and trace, so no locking is
/// involved. Outcomes are returned in the order of `solvers`. A panic in a search thread is
/// resumed on the caller.
pub fn race(
    maze: &Maze,
    start: Coord,
    goal: Coord,
    solvers: &[Solver],
    cancel: Option<&AtomicBool>,
) -> Result<Vec<SearchOutcome>, MazeError> {
    tracing::debug!("[race] starting {} solvers", solvers.len());
    let outcomes = std::thread::scope(|scope| {
        let handles = solvers
            .iter()
            .map(|&solver| {
                scope.spawn(move || run_search_with_cancel(maze, start, goal, solver, cancel))
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(outcome) => outcome,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    for outcome in &outcomes {
        tracing::info!(
            "[race] {}: {:?}, explored {}, path length {}",
            outcome.solver,
            outcome.status,
            outcome.explored(),
            outcome.path.len()
        );
    }
    Ok(outcomes)
}
