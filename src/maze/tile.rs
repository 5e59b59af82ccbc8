use crossterm::style::{Color, Stylize};

use std::fmt;

/// A single raster position of the maze.
///
/// The maze itself only ever stores [`Tile::Wall`] and [`Tile::Open`]. The remaining variants
/// are painted onto a copy of the raster when a search result is drawn.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// A wall between two cells, or the outer boundary.
    #[default]
    Wall,
    /// A cell, or a carved passage between two cells.
    Open,
    /// A cell that a search removed from its frontier.
    Explored,
    /// Part of the reconstructed path.
    Route,
    /// The starting cell of a search.
    Start,
    /// The goal cell of a search.
    Goal,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const TILE_WIDTH: u16 = 2;

    pub fn is_wall(&self) -> bool {
        matches!(self, Tile::Wall)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Open => "  ".with(Color::Reset),
            Tile::Explored => "* ".with(Color::Blue),
            Tile::Route => "🟨".with(Color::Yellow),
            Tile::Start => "🟩".with(Color::Green),
            Tile::Goal => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::TILE_WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
