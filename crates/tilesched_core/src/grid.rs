//! Region grid: block coordinates to region cells

use crate::error::GridError;
use crate::region::RegionCoord;
use glam::IVec2;

/// Default region edge length in blocks.
pub const DEFAULT_REGION_SIZE: i32 = 512;

/// Uniform grid partitioning a world's horizontal plane into region cells.
///
/// A cell spans `cell_size` blocks per axis, starting at `offset`. Cell
/// lookup uses Euclidean division, so negative block coordinates land in
/// negative cells (block -1 is in cell -1, not cell 0).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Grid {
    cell_size: IVec2,
    offset: IVec2,
}

impl Grid {
    /// Create a grid. Both cell size components must be positive.
    pub fn new(cell_size: IVec2, offset: IVec2) -> Result<Self, GridError> {
        if cell_size.x <= 0 || cell_size.y <= 0 {
            return Err(GridError::NonPositiveCellSize {
                x: cell_size.x,
                z: cell_size.y,
            });
        }
        Ok(Self { cell_size, offset })
    }

    pub fn cell_size(&self) -> IVec2 {
        self.cell_size
    }

    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// Region cell containing the given block (x, z).
    pub fn cell(&self, block: IVec2) -> RegionCoord {
        let local = block.as_i64vec2() - self.offset.as_i64vec2();
        RegionCoord::new(
            local.x.div_euclid(self.cell_size.x as i64) as i32,
            local.y.div_euclid(self.cell_size.y as i64) as i32,
        )
    }

    /// First block (lowest x, z) of a region cell.
    pub fn cell_min(&self, cell: RegionCoord) -> IVec2 {
        IVec2::new(cell.x, cell.z) * self.cell_size + self.offset
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cell_size: IVec2::splat(DEFAULT_REGION_SIZE),
            offset: IVec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_maps_blocks_to_512_cells() {
        let grid = Grid::default();
        assert_eq!(grid.cell(IVec2::new(0, 0)), RegionCoord::new(0, 0));
        assert_eq!(grid.cell(IVec2::new(511, 511)), RegionCoord::new(0, 0));
        assert_eq!(grid.cell(IVec2::new(512, -1)), RegionCoord::new(1, -1));
        assert_eq!(grid.cell(IVec2::new(-512, -513)), RegionCoord::new(-1, -2));
    }

    #[test]
    fn offset_shifts_cell_boundaries() {
        let grid = Grid::new(IVec2::new(16, 32), IVec2::new(8, -8)).unwrap();
        assert_eq!(grid.cell(IVec2::new(8, -8)), RegionCoord::new(0, 0));
        assert_eq!(grid.cell(IVec2::new(7, -9)), RegionCoord::new(-1, -1));
        assert_eq!(grid.cell(IVec2::new(24, 24)), RegionCoord::new(1, 1));
        assert_eq!(grid.cell_min(RegionCoord::new(1, 1)), IVec2::new(24, 24));
    }

    #[test]
    fn cell_min_round_trips_through_cell() {
        let grid = Grid::new(IVec2::new(100, 100), IVec2::new(3, 3)).unwrap();
        let cell = RegionCoord::new(-4, 7);
        assert_eq!(grid.cell(grid.cell_min(cell)), cell);
    }

    #[test]
    fn rejects_non_positive_cell_size() {
        assert_eq!(
            Grid::new(IVec2::new(0, 16), IVec2::ZERO),
            Err(GridError::NonPositiveCellSize { x: 0, z: 16 })
        );
        assert!(Grid::new(IVec2::new(16, -1), IVec2::ZERO).is_err());
    }
}
