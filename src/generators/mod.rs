use rand::{SeedableRng, rngs::StdRng};

mod braid;
mod wilson;

use crate::{
    error::MazeError,
    maze::{Edge, Maze},
};

/// Fraction of the walls left standing after the spanning tree that the multi-solution pass
/// knocks down.
pub const CYCLE_FRACTION: f64 = 0.125;

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// What happened while a maze was generated, in carving order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Number of random walks started
    pub walks: usize,
    /// Number of loops erased across all walks
    pub erased_loops: usize,
    /// Spanning tree edges in the order they were carved
    pub tree_edges: Vec<Edge>,
    /// Extra edges opened by the multi-solution pass
    pub cycle_edges: Vec<Edge>,
}

/// Generate a `width x height` maze with Wilson's algorithm.
///
/// With `multiple_solutions`, a fraction of the remaining walls is removed afterwards so the
/// maze contains cycles. The same `seed` always yields the same maze.
pub fn generate_maze(
    width: u8,
    height: u8,
    multiple_solutions: bool,
    seed: Option<u64>,
) -> Result<Maze, MazeError> {
    generate_maze_with_report(width, height, multiple_solutions, seed).map(|(maze, _)| maze)
}

/// Same as [`generate_maze`], also returning the carving log.
pub fn generate_maze_with_report(
    width: u8,
    height: u8,
    multiple_solutions: bool,
    seed: Option<u64>,
) -> Result<(Maze, GenerationReport), MazeError> {
    let mut maze = Maze::new(width, height)?;
    let mut rng = get_rng(seed);

    let mut report = wilson::wilson(&mut maze, &mut rng)?;
    wilson::verify_connected(&maze)?;

    if multiple_solutions {
        report.cycle_edges = braid::add_cycles(&mut maze, &mut rng, CYCLE_FRACTION)?;
    }

    tracing::info!(
        "[generate] {}x{} maze ready: {} walks, {} erased loops, {} tree edges, {} cycle edges",
        width,
        height,
        report.walks,
        report.erased_loops,
        report.tree_edges.len(),
        report.cycle_edges.len()
    );
    Ok((maze, report))
}
