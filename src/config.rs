use std::str::FromStr;

use crate::{
    error::MazeError,
    maze::{Coord, Maze},
    solvers::Solver,
};

/// Where the goal cell goes once the maze exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalPlacement {
    /// The bottom-right cell
    #[default]
    Corner,
    /// The cell farthest from the start through the maze
    Furthest,
    /// A fixed cell
    At(Coord),
}

impl GoalPlacement {
    pub fn resolve(&self, maze: &Maze, start: Coord) -> Result<Coord, MazeError> {
        let goal = match *self {
            GoalPlacement::Corner => (maze.width() - 1, maze.height() - 1),
            GoalPlacement::Furthest => maze
                .furthest_from(start)
                .map(|(cell, _)| cell)
                .unwrap_or(start),
            GoalPlacement::At(coord) => coord,
        };
        if !maze.is_in_bounds(goal) {
            return Err(MazeError::OutOfBounds {
                coord: goal,
                width: maze.width(),
                height: maze.height(),
            });
        }
        Ok(goal)
    }
}

impl FromStr for GoalPlacement {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "corner" => Ok(GoalPlacement::Corner),
            "furthest" => Ok(GoalPlacement::Furthest),
            other => parse_coord(other)
                .map(GoalPlacement::At)
                .map_err(|_| MazeError::InvalidGoal(s.to_string())),
        }
    }
}

/// Parse `"x,y"` into a cell coordinate.
pub fn parse_coord(s: &str) -> Result<Coord, MazeError> {
    let invalid = || MazeError::InvalidCoord(s.to_string());
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<u8>().map_err(|_| invalid())?;
    let y = y.trim().parse::<u8>().map_err(|_| invalid())?;
    Ok((x, y))
}

/// Everything needed to generate one maze and race solvers over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub width: u8,
    pub height: u8,
    /// Knock down extra walls so the maze has cycles
    pub multiple_solutions: bool,
    /// Seed for reproducible mazes. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub start: Coord,
    pub goal: GoalPlacement,
    pub solvers: Vec<Solver>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: 21,
            height: 21,
            multiple_solutions: false,
            seed: None,
            start: (0, 0),
            goal: GoalPlacement::Corner,
            solvers: Solver::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("3,4"), Ok((3, 4)));
        assert_eq!(parse_coord(" 10 , 0 "), Ok((10, 0)));
        assert!(parse_coord("3").is_err());
        assert!(parse_coord("3,x").is_err());
        assert!(parse_coord("256,1").is_err());
    }

    #[test]
    fn test_parse_goal() {
        assert_eq!("corner".parse::<GoalPlacement>(), Ok(GoalPlacement::Corner));
        assert_eq!("Furthest".parse::<GoalPlacement>(), Ok(GoalPlacement::Furthest));
        assert_eq!("2,5".parse::<GoalPlacement>(), Ok(GoalPlacement::At((2, 5))));
        assert_eq!(
            "middle".parse::<GoalPlacement>(),
            Err(MazeError::InvalidGoal("middle".to_string()))
        );
    }

    #[test]
    fn test_resolve_goal() {
        let mut maze = Maze::new(3, 2).unwrap();
        maze.set_open((0, 0), (1, 0), true).unwrap();
        assert_eq!(GoalPlacement::Corner.resolve(&maze, (0, 0)), Ok((2, 1)));
        assert_eq!(GoalPlacement::Furthest.resolve(&maze, (0, 0)), Ok((1, 0)));
        // Nothing reachable: the goal collapses onto the start
        assert_eq!(GoalPlacement::Furthest.resolve(&maze, (2, 1)), Ok((2, 1)));
        assert!(GoalPlacement::At((3, 0)).resolve(&maze, (0, 0)).is_err());
    }

    #[test]
    fn test_default_races_everything() {
        let config = RunConfig::default();
        assert_eq!(config.solvers, Solver::ALL.to_vec());
        assert_eq!(config.goal, GoalPlacement::Corner);
    }
}
