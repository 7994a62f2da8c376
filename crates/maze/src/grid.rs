use neuropath_common::{Direction, GridCoord};

use crate::config::MazeConfig;

/// Handle into the grid's cell storage (row-major position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(pub usize);

/// One grid position.
///
/// `parent` points at the cell this one was first reached from. Parents are
/// always visited earlier, so the links form a tree rooted at the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub coord: GridCoord,
    pub visited: bool,
    /// `[top, right, bottom, left]`, `true` while the wall stands.
    pub walls: [bool; 4],
    pub parent: Option<CellIndex>,
}

impl Cell {
    fn closed(coord: GridCoord) -> Self {
        Self {
            coord,
            visited: false,
            walls: [true; 4],
            parent: None,
        }
    }

    pub fn has_wall(&self, side: Direction) -> bool {
        self.walls[side.index()]
    }

    /// Wall flags packed as bits: top = 1, right = 2, bottom = 4, left = 8.
    pub fn wall_mask(&self) -> u8 {
        self.walls
            .iter()
            .enumerate()
            .filter(|(_, w)| **w)
            .fold(0, |mask, (i, _)| mask | (1 << i))
    }
}

/// Errors from building a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("{width}x{height} with cell size {cell_size} yields no cells")]
    EmptyGrid {
        width: u32,
        height: u32,
        cell_size: u32,
    },
}

/// Fixed `rows × cols` arena of cells addressed by `y * cols + x`.
///
/// The shape never changes after construction; only cell contents do.
#[derive(Debug, Clone)]
pub struct Grid {
    cols: u32,
    rows: u32,
    cell_size: u32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(config: MazeConfig) -> Result<Self, MazeError> {
        if config.cell_size == 0 {
            return Err(MazeError::ZeroCellSize);
        }
        let cols = config.width / config.cell_size;
        let rows = config.height / config.cell_size;
        if cols == 0 || rows == 0 {
            return Err(MazeError::EmptyGrid {
                width: config.width,
                height: config.height,
                cell_size: config.cell_size,
            });
        }

        let cells = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| Cell::closed(GridCoord::new(x, y))))
            .collect();

        Ok(Self {
            cols,
            rows,
            cell_size: config.cell_size,
            cells,
        })
    }

    /// Width in cells.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Height in cells.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Cell edge length in pixels.
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at an index handed out by this grid.
    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index.0]
    }

    pub(crate) fn cell_mut(&mut self, index: CellIndex) -> &mut Cell {
        &mut self.cells[index.0]
    }

    /// The maze entrance, top-left.
    pub fn origin(&self) -> CellIndex {
        CellIndex(0)
    }

    /// The maze exit, last cell in row-major order.
    pub fn terminal(&self) -> CellIndex {
        CellIndex(self.cells.len() - 1)
    }

    /// Row-major index of `coord`, or `None` when out of bounds.
    pub fn index_of(&self, coord: GridCoord) -> Option<CellIndex> {
        (coord.x < self.cols && coord.y < self.rows)
            .then(|| CellIndex(coord.y as usize * self.cols as usize + coord.x as usize))
    }

    /// Grid coordinate of an index.
    pub fn coord_of(&self, index: CellIndex) -> GridCoord {
        self.cells[index.0].coord
    }

    /// Cell at `coord`, if in bounds.
    pub fn cell_at(&self, coord: GridCoord) -> Option<&Cell> {
        self.index_of(coord).map(|i| self.cell(i))
    }

    /// Adjacent cell on `side`, or `None` at the grid edge.
    pub fn neighbor(&self, index: CellIndex, side: Direction) -> Option<CellIndex> {
        let coord = self.coord_of(index);
        let (dx, dy) = side.offset();
        let x = coord.x as i64 + dx;
        let y = coord.y as i64 + dy;
        if x < 0 || y < 0 {
            return None;
        }
        self.index_of(GridCoord::new(x as u32, y as u32))
    }

    /// In-bounds neighbors in top, right, bottom, left order.
    pub fn neighbors(&self, index: CellIndex) -> impl Iterator<Item = (Direction, CellIndex)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |side| self.neighbor(index, side).map(|n| (side, n)))
    }

    /// True when `a` and `b` are adjacent and the wall between them is gone.
    pub fn is_open_between(&self, a: CellIndex, b: CellIndex) -> bool {
        let Some(side) = self.coord_of(a).direction_to(self.coord_of(b)) else {
            return false;
        };
        !self.cell(a).has_wall(side) && !self.cell(b).has_wall(side.opposite())
    }

    /// Clear the pair of wall flags shared by two axis-adjacent cells.
    ///
    /// Returns false (and changes nothing) when the cells are not adjacent.
    pub(crate) fn remove_wall_between(&mut self, a: CellIndex, b: CellIndex) -> bool {
        let Some(side) = self.coord_of(a).direction_to(self.coord_of(b)) else {
            return false;
        };
        self.cell_mut(a).walls[side.index()] = false;
        self.cell_mut(b).walls[side.opposite().index()] = false;
        true
    }

    /// Number of carved passages between cells. Boundary openings are not counted.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                [Direction::Right, Direction::Bottom]
                    .into_iter()
                    .filter(|side| {
                        !cell.has_wall(*side) && self.neighbor(CellIndex(i), *side).is_some()
                    })
                    .count()
            })
            .sum()
    }

    /// Number of cells the generator has reached.
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|c| c.visited).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cols: u32, rows: u32) -> Grid {
        Grid::new(MazeConfig::cells(cols, rows)).unwrap()
    }

    #[test]
    fn dimensions_from_screen_size() {
        let g = Grid::new(MazeConfig::default()).unwrap();
        assert_eq!(g.cols(), 40);
        assert_eq!(g.rows(), 22);
        assert_eq!(g.cell_size(), 20);
        assert_eq!(g.len(), 880);
    }

    #[test]
    fn cells_start_closed_and_unvisited() {
        let g = grid(3, 2);
        for cell in g.cells() {
            assert!(!cell.visited);
            assert_eq!(cell.walls, [true; 4]);
            assert_eq!(cell.wall_mask(), 0b1111);
            assert!(cell.parent.is_none());
        }
    }

    #[test]
    fn row_major_layout() {
        let g = grid(4, 3);
        assert_eq!(g.index_of(GridCoord::new(1, 2)), Some(CellIndex(9)));
        assert_eq!(g.coord_of(CellIndex(9)), GridCoord::new(1, 2));
        assert_eq!(g.coord_of(g.terminal()), GridCoord::new(3, 2));
        assert_eq!(g.index_of(GridCoord::new(4, 0)), None);
    }

    #[test]
    fn zero_cell_size_rejected() {
        let err = Grid::new(MazeConfig::new(100, 100, 0)).unwrap_err();
        assert_eq!(err, MazeError::ZeroCellSize);
    }

    #[test]
    fn undersized_screen_rejected() {
        let err = Grid::new(MazeConfig::new(10, 100, 20)).unwrap_err();
        assert!(matches!(err, MazeError::EmptyGrid { .. }));
    }

    #[test]
    fn neighbor_respects_bounds() {
        let g = grid(3, 3);
        let corner = g.origin();
        assert_eq!(g.neighbor(corner, Direction::Top), None);
        assert_eq!(g.neighbor(corner, Direction::Left), None);
        assert_eq!(g.neighbor(corner, Direction::Right), Some(CellIndex(1)));
        assert_eq!(g.neighbor(corner, Direction::Bottom), Some(CellIndex(3)));

        let last = g.terminal();
        assert_eq!(g.neighbor(last, Direction::Right), None);
        assert_eq!(g.neighbor(last, Direction::Bottom), None);
    }

    #[test]
    fn neighbors_in_fixed_order() {
        let g = grid(3, 3);
        let sides: Vec<Direction> = g.neighbors(CellIndex(4)).map(|(d, _)| d).collect();
        assert_eq!(sides, Direction::ALL.to_vec());
    }

    #[test]
    fn wall_removal_is_symmetric() {
        let mut g = grid(2, 2);
        assert!(g.remove_wall_between(CellIndex(0), CellIndex(1)));
        assert!(!g.cell(CellIndex(0)).has_wall(Direction::Right));
        assert!(!g.cell(CellIndex(1)).has_wall(Direction::Left));
        assert!(g.is_open_between(CellIndex(1), CellIndex(0)));

        assert!(g.remove_wall_between(CellIndex(3), CellIndex(1)));
        assert!(!g.cell(CellIndex(3)).has_wall(Direction::Top));
        assert!(!g.cell(CellIndex(1)).has_wall(Direction::Bottom));
        assert_eq!(g.passage_count(), 2);
    }

    #[test]
    fn diagonal_wall_removal_is_refused() {
        let mut g = grid(2, 2);
        assert!(!g.remove_wall_between(CellIndex(0), CellIndex(3)));
        assert_eq!(g.passage_count(), 0);
    }
}
