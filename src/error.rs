use thiserror::Error;

use crate::maze::Coord;

/// Errors raised while building or querying a maze.
///
/// A search that exhausts its frontier is not an error, see
/// [`SearchStatus::NoPathFound`](crate::solvers::SearchStatus::NoPathFound).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}, both must be at least 1")]
    InvalidDimensions { width: u8, height: u8 },

    #[error("cells {a:?} and {b:?} are not adjacent")]
    InvalidEdge { a: Coord, b: Coord },

    #[error("coordinate {coord:?} is outside the {width}x{height} maze")]
    OutOfBounds { coord: Coord, width: u8, height: u8 },

    #[error("generated maze is disconnected: reached {reached} of {total} cells")]
    DisconnectedMaze { reached: usize, total: usize },

    #[error("invalid coordinate {0:?}, expected \"x,y\"")]
    InvalidCoord(String),

    #[error("unknown solver {0:?}, expected one of dfs, bfs, greedy, astar")]
    UnknownSolver(String),

    #[error("invalid goal {0:?}, expected \"corner\", \"furthest\" or \"x,y\"")]
    InvalidGoal(String),
}
