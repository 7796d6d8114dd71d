//! The sampling universe: every grid cell that may be drawn.
//!
//! [`Universe::build`] flattens a [`ClassGrid`] in row-major order into
//! `(position, class)` cells, discarding cells that hold the drop value or the
//! grid's nodata code.
use std::collections::BTreeMap;

use glam::DVec2;

use super::{ClassCode, ClassGrid};

/// One eligible cell: its centre position and class code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniverseCell {
    pub position: DVec2,
    pub class: ClassCode,
}

/// Relative frequency of a class within the universe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassRatio {
    pub class: ClassCode,
    pub count: usize,
    pub proportion: f64,
}

#[derive(Clone, Debug)]
pub struct Universe {
    cells: Vec<UniverseCell>,
    dropped: usize,
    missing: usize,
}

impl Universe {
    pub fn build(grid: &ClassGrid, drop_value: ClassCode) -> Self {
        let nodata = grid.nodata();
        let transform = grid.transform();
        let mut cells = Vec::with_capacity(grid.len());
        let mut dropped = 0;
        let mut missing = 0;

        for ((row, col), &class) in grid.data().indexed_iter() {
            if class == drop_value {
                dropped += 1;
                continue;
            }
            if nodata == Some(class) {
                missing += 1;
                continue;
            }
            cells.push(UniverseCell {
                position: transform.cell_center(row, col),
                class,
            });
        }

        Self {
            cells,
            dropped,
            missing,
        }
    }

    pub fn cells(&self) -> &[UniverseCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells removed because they held the drop value.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of cells removed because they held the grid's nodata code.
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Distinct classes in ascending order.
    pub fn classes(&self) -> Vec<ClassCode> {
        self.strata().into_keys().collect()
    }

    /// Cell indices per class, each list in row-major order.
    pub fn strata(&self) -> BTreeMap<ClassCode, Vec<usize>> {
        let mut strata: BTreeMap<ClassCode, Vec<usize>> = BTreeMap::new();
        for (i, cell) in self.cells.iter().enumerate() {
            strata.entry(cell.class).or_default().push(i);
        }
        strata
    }

    /// Class proportions ordered by descending count, ties by ascending class code.
    pub fn class_ratios(&self) -> Vec<ClassRatio> {
        let total = self.cells.len();
        if total == 0 {
            return Vec::new();
        }

        let mut counts: BTreeMap<ClassCode, usize> = BTreeMap::new();
        for cell in &self.cells {
            *counts.entry(cell.class).or_insert(0) += 1;
        }

        let mut ratios: Vec<ClassRatio> = counts
            .into_iter()
            .map(|(class, count)| ClassRatio {
                class,
                count,
                proportion: count as f64 / total as f64,
            })
            .collect();
        // Stable sort keeps ascending code order among equal counts.
        ratios.sort_by(|a, b| b.count.cmp(&a.count));
        ratios
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::grid::GeoTransform;

    fn grid() -> ClassGrid {
        ClassGrid::new(array![[0, 1, 1, 2], [2, 2, 9, 3], [2, 1, 0, 0]])
            .with_transform(GeoTransform::north_up(DVec2::new(0.0, 3.0), 1.0))
            .with_nodata(9)
    }

    #[test]
    fn build_skips_drop_and_nodata_cells() {
        let universe = Universe::build(&grid(), 0);
        assert_eq!(universe.len(), 8);
        assert_eq!(universe.dropped(), 3);
        assert_eq!(universe.missing(), 1);
        assert!(universe.cells().iter().all(|c| c.class != 0 && c.class != 9));
    }

    #[test]
    fn cells_follow_row_major_order_with_centres() {
        let universe = Universe::build(&grid(), 0);
        let first = universe.cells()[0];
        assert_eq!(first.class, 1);
        assert_eq!(first.position, DVec2::new(1.5, 2.5));
        let last = universe.cells()[universe.len() - 1];
        assert_eq!(last.class, 1);
        assert_eq!(last.position, DVec2::new(1.5, 0.5));
    }

    #[test]
    fn class_ratios_sorted_by_count_then_code() {
        let universe = Universe::build(&grid(), 0);
        let ratios = universe.class_ratios();
        let order: Vec<_> = ratios.iter().map(|r| r.class).collect();
        assert_eq!(order, vec![2, 1, 3]);
        assert_eq!(ratios[0].count, 4);
        assert!((ratios[0].proportion - 0.5).abs() < 1e-12);
        let sum: f64 = ratios.iter().map(|r| r.proportion).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn strata_partition_the_universe() {
        let universe = Universe::build(&grid(), 0);
        let strata = universe.strata();
        assert_eq!(universe.classes(), vec![1, 2, 3]);
        let total: usize = strata.values().map(Vec::len).sum();
        assert_eq!(total, universe.len());
        for (class, members) in &strata {
            assert!(members.iter().all(|&i| universe.cells()[i].class == *class));
        }
    }

    #[test]
    fn different_drop_value_keeps_zero_cells() {
        let universe = Universe::build(&grid(), 3);
        assert_eq!(universe.dropped(), 1);
        assert!(universe.classes().contains(&0));
    }

    #[test]
    fn empty_universe_has_no_ratios() {
        let universe = Universe::build(&ClassGrid::new(array![[0, 0], [0, 0]]), 0);
        assert!(universe.is_empty());
        assert!(universe.class_ratios().is_empty());
    }
}
