use std::fmt;

use super::tile::Tile;

/// Row-major raster of tiles. A maze of `w x h` cells is stored as a `(2w + 1) x (2h + 1)`
/// grid: cells sit at odd/odd positions and the tile between two cells is their wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[Tile]>,
    width: u16,
    height: u16,
}

impl Grid {
    pub fn new(width: u16, height: u16, tile: Tile) -> Self {
        let data = vec![tile; width as usize * height as usize].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.data
    }

    fn ravel_index(&self, x: u16, y: u16) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        y as usize * self.width as usize + x as usize
    }

    pub fn set(&mut self, coord: (u16, u16), tile: Tile) {
        let idx = self.ravel_index(coord.0, coord.1);
        self.data[idx] = tile;
    }
}

impl std::ops::Index<(u16, u16)> for Grid {
    type Output = Tile;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self[(x, y)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
