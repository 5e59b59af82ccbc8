use std::time::Instant;

use mazerace::{Solver, generate_maze, race};

fn main() -> Result<(), mazerace::MazeError> {
    let _log_guard = mazerace::logging::init(None, false);

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);
    let (width, height) = (u8::MAX, u8::MAX);

    for iteration in 0..num_iters {
        let started = Instant::now();
        let maze = generate_maze(width, height, true, Some(iteration as u64))?;
        let generated = started.elapsed();

        let outcomes = race(&maze, (0, 0), (width - 1, height - 1), &Solver::ALL, None)?;
        tracing::info!(
            "[profile] iteration {}: generated in {:?}, solved in {:?}, explored {:?}",
            iteration,
            generated,
            started.elapsed() - generated,
            outcomes.iter().map(|o| o.explored()).collect::<Vec<_>>()
        );
    }
    Ok(())
}
