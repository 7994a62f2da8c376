use neuropath_common::GridCoord;

use crate::grid::{CellIndex, Grid};

/// Errors from reconstructing the start-to-end route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("maze generation has not completed")]
    NotCompleted,
    #[error("parent links loop back at {at}")]
    ParentCycle { at: GridCoord },
    #[error("parent links end at {at} instead of the origin")]
    Detached { at: GridCoord },
}

/// Ordered cells from the origin to the terminal cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    cells: Vec<CellIndex>,
    coords: Vec<GridCoord>,
}

impl Path {
    /// Walk parent links back from the terminal cell and reverse.
    ///
    /// The walk is bounded by the cell count, so a corrupted parent chain is
    /// reported instead of looping forever. Only meaningful on a finished
    /// grid; callers go through `MazeGenerator::resolve_path`.
    pub(crate) fn resolve(grid: &Grid) -> Result<Self, PathError> {
        let mut cells = Vec::new();
        let mut current = Some(grid.terminal());

        while let Some(index) = current {
            if cells.len() == grid.len() {
                return Err(PathError::ParentCycle {
                    at: grid.coord_of(index),
                });
            }
            cells.push(index);
            current = grid.cell(index).parent;
        }

        match cells.last() {
            Some(&root) if root != grid.origin() => {
                return Err(PathError::Detached {
                    at: grid.coord_of(root),
                });
            }
            _ => {}
        }

        cells.reverse();
        let coords = cells.iter().map(|i| grid.coord_of(*i)).collect();
        Ok(Self { cells, coords })
    }

    /// Path as grid indices, origin first.
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    pub fn coords(&self) -> &[GridCoord] {
        &self.coords
    }

    /// Number of cells, both ends included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<GridCoord> {
        self.coords.first().copied()
    }

    pub fn end(&self) -> Option<GridCoord> {
        self.coords.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeConfig;

    fn grid(cols: u32, rows: u32) -> Grid {
        Grid::new(MazeConfig::cells(cols, rows)).unwrap()
    }

    fn link(grid: &mut Grid, child: usize, parent: usize) {
        grid.cell_mut(CellIndex(child)).parent = Some(CellIndex(parent));
    }

    #[test]
    fn straight_corridor() {
        let mut g = grid(3, 1);
        link(&mut g, 1, 0);
        link(&mut g, 2, 1);
        let path = Path::resolve(&g).unwrap();
        assert_eq!(
            path.coords(),
            &[
                GridCoord::new(0, 0),
                GridCoord::new(1, 0),
                GridCoord::new(2, 0)
            ]
        );
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn single_cell_path() {
        let g = grid(1, 1);
        let path = Path::resolve(&g).unwrap();
        assert_eq!(path.start(), Some(GridCoord::new(0, 0)));
        assert_eq!(path.end(), Some(GridCoord::new(0, 0)));
    }

    #[test]
    fn cycle_is_detected() {
        let mut g = grid(2, 2);
        link(&mut g, 3, 2);
        link(&mut g, 2, 3);
        let err = Path::resolve(&g).unwrap_err();
        assert!(matches!(err, PathError::ParentCycle { .. }));
    }

    #[test]
    fn chain_not_reaching_origin_is_detached() {
        let mut g = grid(2, 2);
        link(&mut g, 3, 1);
        let err = Path::resolve(&g).unwrap_err();
        assert_eq!(
            err,
            PathError::Detached {
                at: GridCoord::new(1, 0)
            }
        );
    }

    #[test]
    fn default_path_is_empty() {
        let path = Path::default();
        assert!(path.is_empty());
        assert_eq!(path.start(), None);
    }
}
