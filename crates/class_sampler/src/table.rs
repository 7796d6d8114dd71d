//! Sampled point tables.
//!
//! A [`SampleTable`] is the result of a sampling run: one [`SamplePoint`] per drawn
//! cell, in the order strata were processed, tagged with the CRS of the source grid.
use std::collections::BTreeMap;
use std::path::Path;

use glam::DVec2;

use crate::error::Result;
use crate::export;
use crate::grid::{ClassCode, SpatialRef};

/// A sampled location and the class of the cell it was drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    pub class: ClassCode,
    /// Point geometry in the grid's coordinate system.
    pub position: DVec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SampleTable {
    class_field: String,
    crs: Option<SpatialRef>,
    points: Vec<SamplePoint>,
}

impl SampleTable {
    pub fn new(
        class_field: impl Into<String>,
        crs: Option<SpatialRef>,
        points: Vec<SamplePoint>,
    ) -> Self {
        Self {
            class_field: class_field.into(),
            crs,
            points,
        }
    }

    /// Name of the class attribute column.
    pub fn class_field(&self) -> &str {
        &self.class_field
    }

    pub fn crs(&self) -> Option<&SpatialRef> {
        self.crs.as_ref()
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<SamplePoint> {
        self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn coordinates(&self) -> Vec<DVec2> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Number of rows per class.
    pub fn class_counts(&self) -> BTreeMap<ClassCode, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.points {
            *counts.entry(p.class).or_insert(0) += 1;
        }
        counts
    }

    /// Writes the table to `path`, choosing the format from the file extension.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        export::write_table(self, path.as_ref())
    }
}

impl<'a> IntoIterator for &'a SampleTable {
    type Item = &'a SamplePoint;
    type IntoIter = std::slice::Iter<'a, SamplePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
