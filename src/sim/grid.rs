//! Read-only tile grid queried by the simulation
//!
//! Columns run left to right from x = 0, rows bottom to top from y = 0
//! (row 0 sits on the ground line). Every lookup is bounds-checked: anything
//! outside `[0, width) × [0, height)` is open air.

use super::tile::TileKind;

/// Anything the simulation can query for tiles
pub trait TileSource {
    /// Level width in columns
    fn width(&self) -> usize;

    /// Level height in rows
    fn height(&self) -> usize;

    /// Tile at (col, row), `None` for empty cells and out-of-range coordinates
    fn tile_at(&self, col: i64, row: i64) -> Option<TileKind>;

    fn is_solid(&self, col: i64, row: i64) -> bool {
        self.tile_at(col, row).is_some_and(|t| t.is_solid())
    }

    fn is_hazard(&self, col: i64, row: i64) -> bool {
        self.tile_at(col, row).is_some_and(|t| t.is_hazard())
    }

    fn is_circle_portal(&self, col: i64, row: i64) -> bool {
        self.tile_at(col, row).is_some_and(|t| t.is_circle_portal())
    }

    fn is_triangle_portal(&self, col: i64, row: i64) -> bool {
        self.tile_at(col, row).is_some_and(|t| t.is_triangle_portal())
    }

    fn is_upside_down_portal(&self, col: i64, row: i64) -> bool {
        self.tile_at(col, row).is_some_and(|t| t.is_upside_down_portal())
    }

    fn is_right_side_up_portal(&self, col: i64, row: i64) -> bool {
        self.tile_at(col, row).is_some_and(|t| t.is_right_side_up_portal())
    }

    fn is_yellow_pad(&self, col: i64, row: i64) -> bool {
        self.tile_at(col, row).is_some_and(|t| t.is_yellow_pad())
    }

    fn is_yellow_pad_inverted(&self, col: i64, row: i64) -> bool {
        self.tile_at(col, row).is_some_and(|t| t.is_yellow_pad_inverted())
    }

    fn is_yellow_ring(&self, col: i64, row: i64) -> bool {
        self.tile_at(col, row).is_some_and(|t| t.is_yellow_ring())
    }
}

/// Dense column-major grid
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<TileKind>>,
}

impl TileGrid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Build a grid just large enough for the given tiles, like a level file
    /// sized by its largest coordinates. `min_width` pads the level end.
    pub fn from_tiles<I>(min_width: usize, tiles: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, TileKind)>,
    {
        let tiles: Vec<_> = tiles.into_iter().collect();
        let width = tiles
            .iter()
            .map(|&(col, _, _)| col + 1)
            .max()
            .unwrap_or(0)
            .max(min_width);
        let height = tiles.iter().map(|&(_, row, _)| row + 1).max().unwrap_or(0);

        let mut grid = Self::new(width, height);
        for (col, row, kind) in tiles {
            grid.set(col, row, Some(kind));
        }
        grid
    }

    #[inline]
    fn index(&self, col: i64, row: i64) -> Option<usize> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then_some(col * self.height + row)
    }

    /// Place or clear a tile; out-of-range writes are ignored and reported
    pub fn set(&mut self, col: usize, row: usize, tile: Option<TileKind>) -> bool {
        match self.index(col as i64, row as i64) {
            Some(i) => {
                self.cells[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Number of non-empty cells
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl TileSource for TileGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn tile_at(&self, col: i64, row: i64) -> Option<TileKind> {
        self.index(col, row).and_then(|i| self.cells[i])
    }
}
