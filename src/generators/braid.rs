use rand::{rngs::StdRng, seq::index};

use crate::{
    error::MazeError,
    maze::{Edge, Maze},
};

/// Open `round(fraction * closed)` of the maze's closed walls, chosen uniformly without
/// replacement. Only ever adds passages, so a connected maze stays connected.
/// Returns the opened edges in the order they were chosen.
pub(super) fn add_cycles(
    maze: &mut Maze,
    rng: &mut StdRng,
    fraction: f64,
) -> Result<Vec<Edge>, MazeError> {
    let closed = maze
        .edges()
        .filter(|&edge| !maze.edge_is_open(edge))
        .collect::<Vec<_>>();
    let amount = ((closed.len() as f64 * fraction).round() as usize).min(closed.len());

    let chosen = index::sample(rng, closed.len(), amount)
        .into_iter()
        .map(|i| closed[i])
        .collect::<Vec<_>>();
    for edge in &chosen {
        maze.set_open(edge.a, edge.b, true)?;
    }

    tracing::debug!(
        "[braid] opened {} of {} closed walls",
        chosen.len(),
        closed.len()
    );
    Ok(chosen)
}
