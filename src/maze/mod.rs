pub mod grid;
pub mod tile;

use std::collections::VecDeque;
use std::fmt;

use crate::error::MazeError;
pub use grid::Grid;
pub use tile::Tile;

/// Cell coordinate `(x, y)` in maze space.
pub type Coord = (u8, u8);

/// An unordered pair of axis-adjacent cells. `a` is always left of or above `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: Coord,
    pub b: Coord,
}

impl Edge {
    /// Builds an edge from two cells in either order. Adjacency is not checked.
    pub fn new(c1: Coord, c2: Coord) -> Self {
        if (c1.1, c1.0) <= (c2.1, c2.0) {
            Edge { a: c1, b: c2 }
        } else {
            Edge { a: c2, b: c1 }
        }
    }
}

/// Manhattan distance between two cells.
pub fn manhattan(a: Coord, b: Coord) -> usize {
    a.0.abs_diff(b.0) as usize + a.1.abs_diff(b.1) as usize
}

/// A rectangular maze of `width x height` cells with a wall between every pair of adjacent
/// cells until the generator carves it open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    width: u8,
    height: u8,
}

impl Maze {
    /// Creates a new maze with the given width and height.
    /// Every cell is open and every wall between cells is closed.
    pub fn new(width: u8, height: u8) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        // n cells in each dimension -> n + 1 walls -> 2n + 1 total
        let grid_height = height as u16 * 2 + 1;
        let grid_width = width as u16 * 2 + 1;
        let mut grid = Grid::new(grid_width, grid_height, Tile::Wall);
        (0..height).for_each(|y| {
            (0..width).for_each(|x| {
                grid.set(Self::cell_raster_coord((x, y)), Tile::Open);
            });
        });
        Ok(Maze {
            grid,
            width,
            height,
        })
    }

    /// Returns the height of the maze in cells.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Returns the width of the maze in cells.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Returns `(width, height)` in cells.
    pub fn dimensions(&self) -> (u8, u8) {
        (self.width, self.height)
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Read-only wall bitmap, one tile per raster position.
    pub fn raster(&self) -> &Grid {
        &self.grid
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    /// Row-major index of a cell, for per-cell lookup tables.
    pub fn cell_index(&self, coord: Coord) -> usize {
        coord.1 as usize * self.width as usize + coord.0 as usize
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y)))
    }

    /// Raster position of a cell.
    pub fn cell_raster_coord(coord: Coord) -> (u16, u16) {
        (coord.0 as u16 * 2 + 1, coord.1 as u16 * 2 + 1)
    }

    /// Raster position of the wall between two adjacent cells: the midpoint of
    /// `(2a + 1)` and `(2b + 1)` on each axis.
    pub fn wall_raster_coord(a: Coord, b: Coord) -> (u16, u16) {
        (a.0 as u16 + b.0 as u16 + 1, a.1 as u16 + b.1 as u16 + 1)
    }

    fn check_edge(&self, a: Coord, b: Coord) -> Result<(), MazeError> {
        for coord in [a, b] {
            if !self.is_in_bounds(coord) {
                return Err(MazeError::OutOfBounds {
                    coord,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        if manhattan(a, b) != 1 {
            return Err(MazeError::InvalidEdge { a, b });
        }
        Ok(())
    }

    /// Get the in-bounds neighbors of a cell, regardless of walls.
    /// Neighbors are yielded left, right, up, down.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let in_bounds = self.is_in_bounds(coord);
        let (x, y) = coord;
        [
            // NOTE: When x < 1 or y < 1, x - 1 or y - 1 wraps to u8::MAX, which is never a valid
            // index. When x + 1 or y + 1 would exceed u8::MAX, it saturates to u8::MAX, which
            // is filtered the same way since the largest dimension is u8::MAX.
            (x.wrapping_sub(1), y),
            (x.saturating_add(1), y),
            (x, y.wrapping_sub(1)),
            (x, y.saturating_add(1)),
        ]
        .into_iter()
        .filter(move |&c| in_bounds && self.is_in_bounds(c))
    }

    /// Checks whether the passage between two adjacent cells is open.
    pub fn is_open(&self, a: Coord, b: Coord) -> Result<bool, MazeError> {
        self.check_edge(a, b)?;
        Ok(!self.grid[Self::wall_raster_coord(a, b)].is_wall())
    }

    /// Opens (`open = true`) or closes the wall between two adjacent cells.
    /// Returns `true` if the wall state changed.
    pub fn set_open(&mut self, a: Coord, b: Coord, open: bool) -> Result<bool, MazeError> {
        self.check_edge(a, b)?;
        let wall_coord = Self::wall_raster_coord(a, b);
        let tile = if open { Tile::Open } else { Tile::Wall };
        if self.grid[wall_coord] == tile {
            return Ok(false);
        }
        self.grid.set(wall_coord, tile);
        Ok(true)
    }

    /// Same as [`Maze::is_open`] for an edge produced by [`Maze::edges`].
    pub(crate) fn edge_is_open(&self, edge: Edge) -> bool {
        !self.grid[Self::wall_raster_coord(edge.a, edge.b)].is_wall()
    }

    /// Neighbors reachable from `coord` through an open passage.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.neighbors(coord)
            .filter(move |&n| !self.grid[Self::wall_raster_coord(coord, n)].is_wall())
    }

    /// Every pair of adjacent cells exactly once, row by row.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let (width, height) = (self.width, self.height);
        self.cells()
            .flat_map(move |(x, y)| {
                [
                    (x + 1 < width).then(|| Edge {
                        a: (x, y),
                        b: (x + 1, y),
                    }),
                    (y + 1 < height).then(|| Edge {
                        a: (x, y),
                        b: (x, y + 1),
                    }),
                ]
            })
            .flatten()
    }

    pub fn open_edge_count(&self) -> usize {
        self.edges().filter(|&e| self.edge_is_open(e)).count()
    }

    /// Breadth-first distances from `from` over open passages. Cells that cannot be reached
    /// stay `None`. Also returns the cells in discovery order. Indexed by [`Maze::cell_index`].
    fn distances_from(&self, from: Coord) -> (Vec<Option<usize>>, Vec<Coord>) {
        let mut distances = vec![None; self.cell_count()];
        // Cells in the order they were discovered
        let mut order = Vec::new();
        if !self.is_in_bounds(from) {
            return (distances, order);
        }
        distances[self.cell_index(from)] = Some(0);
        order.push(from);
        let mut queue = VecDeque::from([(from, 0)]);
        while let Some((cell, distance)) = queue.pop_front() {
            for next in self.open_neighbors(cell) {
                let slot = &mut distances[self.cell_index(next)];
                if slot.is_none() {
                    *slot = Some(distance + 1);
                    order.push(next);
                    queue.push_back((next, distance + 1));
                }
            }
        }
        (distances, order)
    }

    /// Number of cells reachable from `from`, including `from` itself.
    pub fn reachable_count(&self, from: Coord) -> usize {
        self.distances_from(from).1.len()
    }

    /// The reachable cell farthest from `from` and its distance in steps.
    /// Ties go to the cell discovered first.
    pub fn furthest_from(&self, from: Coord) -> Option<(Coord, usize)> {
        let (distances, order) = self.distances_from(from);
        let mut furthest: Option<(Coord, usize)> = None;
        for cell in order {
            let distance = distances[self.cell_index(cell)].unwrap_or_default();
            if furthest.is_none_or(|(_, best)| distance > best) {
                furthest = Some((cell, distance));
            }
        }
        furthest
    }

    /// Shortest-path distance in steps between two cells, if connected.
    pub fn distance(&self, from: Coord, to: Coord) -> Option<usize> {
        if !self.is_in_bounds(to) {
            return None;
        }
        self.distances_from(from).0[self.cell_index(to)]
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
