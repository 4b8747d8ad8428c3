//! Default terrain for a freshly started village.
//!
//! The grid is split into contiguous column bands, one terrain per band,
//! identical on every row. For the reference 57-column grid the bands are:
//!
//! | Columns | Width | Terrain |
//! |---------|-------|---------|
//! | 0-10    | 11    | Woods   |
//! | 11-22   | 12    | Rocky   |
//! | 23-34   | 12    | Field   |
//! | 35-46   | 12    | Scrub   |
//! | 47-56   | 10    | Crag    |
//!
//! Other widths scale the reference boundaries proportionally. Generation
//! uses no randomness, so the same dimensions always yield the same grid.

use village_types::{Cell, GridPos, Terrain};

use crate::grid::Grid;

/// Width of the reference layout.
pub const REFERENCE_COLS: u32 = 57;

/// Default row count.
pub const DEFAULT_ROWS: u32 = 41;

/// Reference bands as `(terrain, width)`.
const REFERENCE_BANDS: [(Terrain, u32); 5] = [
    (Terrain::Woods, 11),
    (Terrain::Rocky, 12),
    (Terrain::Field, 12),
    (Terrain::Scrub, 12),
    (Terrain::Crag, 10),
];

/// Rows and columns of the village grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    /// Number of rows.
    pub rows: u32,
    /// Number of columns.
    pub cols: u32,
}

impl GridDimensions {
    /// Create a dimension pair.
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Whether `pos` falls inside the grid.
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, REFERENCE_COLS)
    }
}

/// One band: an inclusive column range with a single terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainBand {
    /// Terrain for every column in the band.
    pub terrain: Terrain,
    /// First column, inclusive.
    pub first_col: u32,
    /// Last column, inclusive.
    pub last_col: u32,
}

impl TerrainBand {
    /// Whether `col` lies in this band.
    pub const fn contains(&self, col: u32) -> bool {
        col >= self.first_col && col <= self.last_col
    }
}

/// Ordered, contiguous column bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainBands {
    bands: Vec<TerrainBand>,
}

impl TerrainBands {
    /// Lay bands out left to right starting at column 0.
    ///
    /// Zero-width entries are skipped.
    pub fn from_widths<I>(widths: I) -> Self
    where
        I: IntoIterator<Item = (Terrain, u32)>,
    {
        let mut bands = Vec::new();
        let mut next: u32 = 0;
        for (terrain, width) in widths {
            if width == 0 {
                continue;
            }
            let last_col = next.saturating_add(width.saturating_sub(1));
            bands.push(TerrainBand {
                terrain,
                first_col: next,
                last_col,
            });
            next = last_col.saturating_add(1);
        }
        Self { bands }
    }

    /// The reference 57-column layout.
    pub fn reference() -> Self {
        Self::from_widths(REFERENCE_BANDS)
    }

    /// Bands for a grid `cols` wide.
    ///
    /// Each reference boundary is scaled by `cols / 57` (floored), so the
    /// five bands always partition `0..cols` in the reference order.
    pub fn for_width(cols: u32) -> Self {
        if cols == REFERENCE_COLS {
            return Self::reference();
        }

        let mut widths = Vec::with_capacity(REFERENCE_BANDS.len());
        let mut cumulative: u64 = 0;
        let mut previous_end: u64 = 0;
        for (terrain, width) in REFERENCE_BANDS {
            cumulative = cumulative.saturating_add(u64::from(width));
            let end = cumulative
                .saturating_mul(u64::from(cols))
                .checked_div(u64::from(REFERENCE_COLS))
                .unwrap_or(0);
            let scaled = u32::try_from(end.saturating_sub(previous_end)).unwrap_or(u32::MAX);
            widths.push((terrain, scaled));
            previous_end = end;
        }
        Self::from_widths(widths)
    }

    /// The terrain for `col`, or [`Terrain::Field`] if no band covers it.
    pub fn terrain_at(&self, col: u32) -> Terrain {
        self.bands
            .iter()
            .find(|band| band.contains(col))
            .map_or(Terrain::Field, |band| band.terrain)
    }

    /// The bands, left to right.
    pub fn bands(&self) -> &[TerrainBand] {
        &self.bands
    }

    /// Total columns covered.
    pub fn width(&self) -> u32 {
        self.bands
            .last()
            .map_or(0, |band| band.last_col.saturating_add(1))
    }
}

impl Default for TerrainBands {
    fn default() -> Self {
        Self::reference()
    }
}

/// Build the default grid: every coordinate in `dims`, unbuilt, with terrain
/// from `bands`.
pub fn generate_terrain(dims: GridDimensions, bands: &TerrainBands) -> Grid {
    let column_terrain: Vec<Terrain> = (0..dims.cols).map(|col| bands.terrain_at(col)).collect();

    let mut grid = Grid::new();
    for row in 0..dims.rows {
        for (col, terrain) in (0..dims.cols).zip(column_terrain.iter().copied()) {
            let pos = GridPos::new(row, col);
            grid.insert(Cell::new(pos, terrain));
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use village_types::BuildingState;

    use super::*;

    fn terrain_at(grid: &Grid, row: u32, col: u32) -> Option<Terrain> {
        grid.get(GridPos::new(row, col)).map(|c| c.terrain)
    }

    #[test]
    fn reference_bands_match_layout() {
        let bands = TerrainBands::reference();
        let ranges: Vec<(Terrain, u32, u32)> = bands
            .bands()
            .iter()
            .map(|b| (b.terrain, b.first_col, b.last_col))
            .collect();
        assert_eq!(
            ranges,
            vec![
                (Terrain::Woods, 0, 10),
                (Terrain::Rocky, 11, 22),
                (Terrain::Field, 23, 34),
                (Terrain::Scrub, 35, 46),
                (Terrain::Crag, 47, 56),
            ]
        );
        assert_eq!(bands.width(), 57);
    }

    #[test]
    fn reference_sample_columns() {
        let bands = TerrainBands::reference();
        assert_eq!(bands.terrain_at(0), Terrain::Woods);
        assert_eq!(bands.terrain_at(10), Terrain::Woods);
        assert_eq!(bands.terrain_at(11), Terrain::Rocky);
        assert_eq!(bands.terrain_at(15), Terrain::Rocky);
        assert_eq!(bands.terrain_at(30), Terrain::Field);
        assert_eq!(bands.terrain_at(40), Terrain::Scrub);
        assert_eq!(bands.terrain_at(50), Terrain::Crag);
        assert_eq!(bands.terrain_at(56), Terrain::Crag);
    }

    #[test]
    fn column_outside_bands_falls_back_to_field() {
        let bands = TerrainBands::reference();
        assert_eq!(bands.terrain_at(57), Terrain::Field);
        assert_eq!(bands.terrain_at(u32::MAX), Terrain::Field);
    }

    #[test]
    fn scaled_bands_partition_width() {
        for cols in [1, 5, 10, 23, 56, 58, 100, 114] {
            let bands = TerrainBands::for_width(cols);
            assert_eq!(bands.width(), cols, "width {cols}");
            let mut expected_first = 0;
            for band in bands.bands() {
                assert_eq!(band.first_col, expected_first, "width {cols}");
                assert!(band.last_col >= band.first_col);
                expected_first = band.last_col.saturating_add(1);
            }
        }
    }

    #[test]
    fn doubled_width_doubles_bands() {
        let bands = TerrainBands::for_width(114);
        let widths: Vec<u32> = bands
            .bands()
            .iter()
            .map(|b| b.last_col.saturating_sub(b.first_col).saturating_add(1))
            .collect();
        assert_eq!(widths, vec![22, 24, 24, 24, 20]);
    }

    #[test]
    fn generated_grid_covers_dimensions() {
        let dims = GridDimensions::default();
        let grid = generate_terrain(dims, &TerrainBands::for_width(dims.cols));
        assert_eq!(grid.len(), 41 * 57);
        assert_eq!(terrain_at(&grid, 0, 0), Some(Terrain::Woods));
        assert_eq!(terrain_at(&grid, 40, 15), Some(Terrain::Rocky));
        assert_eq!(terrain_at(&grid, 20, 30), Some(Terrain::Field));
        assert_eq!(terrain_at(&grid, 7, 40), Some(Terrain::Scrub));
        assert_eq!(terrain_at(&grid, 40, 56), Some(Terrain::Crag));
        assert_eq!(terrain_at(&grid, 41, 0), None);
        assert!(grid.cells().all(|c| !c.is_built()));
    }

    #[test]
    fn generation_is_stable() {
        let dims = GridDimensions::new(12, 57);
        let bands = TerrainBands::reference();
        let contents = |grid: &Grid| -> Vec<(GridPos, Terrain, BuildingState)> {
            grid.cells().map(|c| (c.pos, c.terrain, c.building)).collect()
        };
        assert_eq!(
            contents(&generate_terrain(dims, &bands)),
            contents(&generate_terrain(dims, &bands))
        );
    }

    #[test]
    fn zero_sized_grid_is_empty() {
        let grid = generate_terrain(GridDimensions::new(0, 57), &TerrainBands::reference());
        assert!(grid.is_empty());
    }

    #[test]
    fn dimensions_contain() {
        let dims = GridDimensions::default();
        assert!(dims.contains(GridPos::new(40, 56)));
        assert!(!dims.contains(GridPos::new(41, 0)));
        assert!(!dims.contains(GridPos::new(0, 57)));
    }
}
