//! Collision volumes derived from a finished wall layout.
//!
//! Grid column `x` maps to world x and grid row `y` to world z; tile `(x, y)`
//! is centred on `(x * floor_size, 0, y * floor_size)`. Floors sit just below
//! `y = 0` and walls rise from it.

use glam::Vec3;
use neuropath_common::{BoundingBox, Direction, GridCoord};

use crate::config::GeometryConfig;
use crate::grid::Grid;

/// A wall volume together with the cell side it was emitted for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallBox {
    pub cell: GridCoord,
    pub side: Direction,
    pub bounds: BoundingBox,
}

/// Floor and wall boxes for a completed maze. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeGeometry {
    config: GeometryConfig,
    /// Grid size in cells.
    extent: (u32, u32),
    floors: Vec<BoundingBox>,
    walls: Vec<WallBox>,
    wall_bounds: Vec<BoundingBox>,
}

impl MazeGeometry {
    /// Emit one floor box per cell and one wall box per standing wall flag.
    ///
    /// An interior wall that survived carving is held by both adjoining cells
    /// and therefore yields two coincident boxes; a cleared wall yields none.
    pub fn derive(grid: &Grid, config: GeometryConfig) -> Self {
        let mut floors = Vec::with_capacity(grid.len());
        let mut walls = Vec::new();

        for cell in grid.cells() {
            let center = tile_center(cell.coord, &config);
            floors.push(floor_box(center, &config));
            for side in Direction::ALL {
                if cell.has_wall(side) {
                    walls.push(WallBox {
                        cell: cell.coord,
                        side,
                        bounds: wall_box(center, side, &config),
                    });
                }
            }
        }

        let wall_bounds = walls.iter().map(|w| w.bounds).collect();
        Self {
            config,
            extent: (grid.cols(), grid.rows()),
            floors,
            walls,
            wall_bounds,
        }
    }

    /// Dimensions the boxes were built with.
    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// One box per tile, row-major.
    pub fn floor_boxes(&self) -> &[BoundingBox] {
        &self.floors
    }

    /// One box per standing wall flag; surviving interior walls appear twice.
    pub fn wall_boxes(&self) -> &[BoundingBox] {
        &self.wall_bounds
    }

    /// One box per physical wall.
    ///
    /// Keeps every top and left flag, plus right flags in the last column and
    /// bottom flags in the last row. Interior walls are owned by the cell
    /// below or to the right of them.
    pub fn unique_wall_boxes(&self) -> impl Iterator<Item = &WallBox> {
        let (cols, rows) = self.extent;
        self.walls.iter().filter(move |w| match w.side {
            Direction::Top | Direction::Left => true,
            Direction::Right => w.cell.x + 1 == cols,
            Direction::Bottom => w.cell.y + 1 == rows,
        })
    }

    /// Wall boxes with the cell and side that emitted them.
    pub fn walls(&self) -> &[WallBox] {
        &self.walls
    }

    /// World-space centre of a tile at floor level.
    pub fn cell_center(&self, coord: GridCoord) -> Vec3 {
        tile_center(coord, &self.config)
    }

    /// Where a player entering the maze should stand: the origin tile centre.
    pub fn spawn_point(&self) -> Vec3 {
        self.cell_center(GridCoord::new(0, 0))
    }

    /// True when `body` touches any wall.
    pub fn collides(&self, body: &BoundingBox) -> bool {
        self.wall_bounds.iter().any(|w| w.intersects(body))
    }

    pub fn colliding_walls<'a>(&'a self, body: &'a BoundingBox) -> impl Iterator<Item = &'a WallBox> {
        self.walls.iter().filter(move |w| w.bounds.intersects(body))
    }
}

fn tile_center(coord: GridCoord, config: &GeometryConfig) -> Vec3 {
    Vec3::new(
        coord.x as f32 * config.floor_size,
        0.0,
        coord.y as f32 * config.floor_size,
    )
}

fn floor_box(center: Vec3, config: &GeometryConfig) -> BoundingBox {
    let half = config.floor_size * 0.5;
    BoundingBox::new(
        Vec3::new(center.x - half, -config.floor_thickness, center.z - half),
        Vec3::new(center.x + half, 0.0, center.z + half),
    )
}

fn wall_box(center: Vec3, side: Direction, config: &GeometryConfig) -> BoundingBox {
    let half = config.floor_size * 0.5;
    let t = config.wall_thickness * 0.5;
    let h = config.wall_height;
    match side {
        Direction::Top | Direction::Bottom => {
            let z = if side == Direction::Top {
                center.z - half
            } else {
                center.z + half
            };
            BoundingBox::new(
                Vec3::new(center.x - half, 0.0, z - t),
                Vec3::new(center.x + half, h, z + t),
            )
        }
        Direction::Left | Direction::Right => {
            let x = if side == Direction::Left {
                center.x - half
            } else {
                center.x + half
            };
            BoundingBox::new(
                Vec3::new(x - t, 0.0, center.z - half),
                Vec3::new(x + t, h, center.z + half),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeConfig;
    use crate::grid::CellIndex;

    fn closed_grid(cols: u32, rows: u32) -> Grid {
        Grid::new(MazeConfig::cells(cols, rows)).unwrap()
    }

    #[test]
    fn closed_grid_emits_every_wall() {
        let grid = closed_grid(3, 2);
        let geometry = MazeGeometry::derive(&grid, GeometryConfig::default());
        assert_eq!(geometry.floor_boxes().len(), 6);
        assert_eq!(geometry.wall_boxes().len(), 24);
    }

    #[test]
    fn cleared_wall_emits_nothing_from_either_side() {
        let mut grid = closed_grid(2, 1);
        grid.remove_wall_between(CellIndex(0), CellIndex(1));
        let geometry = MazeGeometry::derive(&grid, GeometryConfig::default());

        assert_eq!(geometry.wall_boxes().len(), 6);
        assert!(!geometry.walls().iter().any(|w| {
            (w.cell == GridCoord::new(0, 0) && w.side == Direction::Right)
                || (w.cell == GridCoord::new(1, 0) && w.side == Direction::Left)
        }));
    }

    #[test]
    fn unique_walls_count_each_physical_wall_once() {
        let mut grid = closed_grid(3, 2);
        // 3 columns x 3 horizontal lines + 4 vertical lines x 2 rows
        let geometry = MazeGeometry::derive(&grid, GeometryConfig::default());
        assert_eq!(geometry.unique_wall_boxes().count(), 17);

        grid.remove_wall_between(CellIndex(0), CellIndex(1));
        grid.remove_wall_between(CellIndex(1), CellIndex(4));
        let geometry = MazeGeometry::derive(&grid, GeometryConfig::default());
        assert_eq!(geometry.wall_boxes().len(), 24 - 4);
        assert_eq!(geometry.unique_wall_boxes().count(), 15);

        let mut seen: Vec<BoundingBox> = Vec::new();
        for wall in geometry.unique_wall_boxes() {
            assert!(!seen.contains(&wall.bounds), "duplicate at {}", wall.cell);
            seen.push(wall.bounds);
        }
    }

    #[test]
    fn floor_tile_placement() {
        let grid = closed_grid(2, 2);
        let geometry = MazeGeometry::derive(&grid, GeometryConfig::default());
        let floor = geometry.floor_boxes()[3];
        assert_eq!(floor.min, Vec3::new(1.0, -0.1, 1.0));
        assert_eq!(floor.max, Vec3::new(3.0, 0.0, 3.0));
    }

    #[test]
    fn wall_boxes_sit_on_tile_edges() {
        let grid = closed_grid(1, 1);
        let config = GeometryConfig::default();
        let geometry = MazeGeometry::derive(&grid, config);
        let find = |side| {
            geometry
                .walls()
                .iter()
                .find(|w| w.side == side)
                .unwrap()
                .bounds
        };

        let top = find(Direction::Top);
        assert_eq!(top.min, Vec3::new(-1.0, 0.0, -1.1));
        assert_eq!(top.max, Vec3::new(1.0, 2.0, -0.9));

        let right = find(Direction::Right);
        assert_eq!(right.min, Vec3::new(0.9, 0.0, -1.0));
        assert_eq!(right.max, Vec3::new(1.1, 2.0, 1.0));

        let bottom = find(Direction::Bottom);
        assert_eq!(bottom.center().z, 1.0);
        assert_eq!(bottom.size().x, config.floor_size);

        let left = find(Direction::Left);
        assert_eq!(left.center().x, -1.0);
        assert_eq!(left.size().z, config.floor_size);
    }

    #[test]
    fn spawn_point_is_origin_tile() {
        let grid = closed_grid(3, 3);
        let geometry = MazeGeometry::derive(&grid, GeometryConfig::default());
        assert_eq!(geometry.spawn_point(), Vec3::ZERO);
        assert_eq!(geometry.cell_center(GridCoord::new(2, 1)), Vec3::new(4.0, 0.0, 2.0));
    }

    #[test]
    fn player_box_collides_only_near_walls() {
        let grid = closed_grid(1, 1);
        let geometry = MazeGeometry::derive(&grid, GeometryConfig::default());
        let size = Vec3::new(0.3, 1.0, 0.3);

        let centred = BoundingBox::from_base(geometry.spawn_point(), size);
        assert!(!geometry.collides(&centred));

        let against_right = BoundingBox::from_base(Vec3::new(0.85, 0.0, 0.0), size);
        assert!(geometry.collides(&against_right));
        let hits: Vec<Direction> = geometry
            .colliding_walls(&against_right)
            .map(|w| w.side)
            .collect();
        assert_eq!(hits, vec![Direction::Right]);
    }
}
