//! Classified grids and their spatial reference.
//!
//! A [`ClassGrid`] is a single-band 2-D array of [`ClassCode`]s with a
//! [`GeoTransform`] that places each cell in map coordinates, plus an optional
//! [`SpatialRef`] that is carried through to sampled output. The [`universe`]
//! submodule flattens a grid into the set of cells eligible for sampling.
use std::collections::BTreeMap;
use std::fmt;

use glam::DVec2;
use ndarray::{Array2, ArrayD, ArrayView2};

use crate::error::{Error, Result};

pub mod universe;

pub use universe::{ClassRatio, Universe, UniverseCell};

/// Integer class code stored in every grid cell.
///
/// Grid values, the drop value, and manual sample-count keys all share this type.
pub type ClassCode = i32;

/// Coordinate reference system attached to a grid and to the tables sampled from it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpatialRef {
    /// An EPSG registry code, e.g. `32736` for UTM zone 36S.
    Epsg(u32),
    /// A well-known-text CRS definition.
    Wkt(String),
}

impl SpatialRef {
    /// OGC URN for EPSG codes, as used by the GeoJSON `crs` member.
    pub fn ogc_urn(&self) -> Option<String> {
        match self {
            SpatialRef::Epsg(code) => Some(format!("urn:ogc:def:crs:EPSG::{code}")),
            SpatialRef::Wkt(_) => None,
        }
    }
}

impl fmt::Display for SpatialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpatialRef::Epsg(code) => write!(f, "EPSG:{code}"),
            SpatialRef::Wkt(wkt) => f.write_str(wkt),
        }
    }
}

/// Affine placement of grid cells in map coordinates (no rotation terms).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoTransform {
    /// Map position of the outer corner of cell `(row 0, col 0)`.
    pub origin: DVec2,
    /// Signed cell size. North-up rasters use a negative `y`.
    pub pixel_size: DVec2,
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self {
            origin: DVec2::ZERO,
            pixel_size: DVec2::ONE,
        }
    }
}

impl GeoTransform {
    pub fn new(origin: DVec2, pixel_size: DVec2) -> Self {
        Self { origin, pixel_size }
    }

    /// North-up transform with square cells, anchored at the upper-left corner.
    pub fn north_up(upper_left: DVec2, cell_size: f64) -> Self {
        Self {
            origin: upper_left,
            pixel_size: DVec2::new(cell_size, -cell_size),
        }
    }

    /// Map coordinate of the centre of cell `(row, col)`.
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> DVec2 {
        DVec2::new(
            self.origin.x + (col as f64 + 0.5) * self.pixel_size.x,
            self.origin.y + (row as f64 + 0.5) * self.pixel_size.y,
        )
    }

    /// Converts a map position to `(row, col)` indices, which may lie outside the grid.
    ///
    /// Returns `None` when the position does not map to a finite cell index.
    pub fn position_to_index(&self, p: DVec2) -> Option<(isize, isize)> {
        let col = ((p.x - self.origin.x) / self.pixel_size.x).floor();
        let row = ((p.y - self.origin.y) / self.pixel_size.y).floor();
        if !row.is_finite() || !col.is_finite() {
            return None;
        }
        Some((row as isize, col as isize))
    }

    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v != 0.0;
        if !ok(self.pixel_size.x) || !ok(self.pixel_size.y) {
            return Err(Error::invalid(format!(
                "pixel size must be finite and non-zero, got ({}, {})",
                self.pixel_size.x, self.pixel_size.y
            )));
        }
        if !self.origin.is_finite() {
            return Err(Error::invalid("grid origin must be finite"));
        }
        Ok(())
    }
}

/// A classified single-band raster held in memory.
#[derive(Clone, Debug)]
pub struct ClassGrid {
    data: Array2<ClassCode>,
    transform: GeoTransform,
    spatial_ref: Option<SpatialRef>,
    nodata: Option<ClassCode>,
}

impl ClassGrid {
    /// Wraps a `(rows, cols)` array with the default unit transform.
    pub fn new(data: Array2<ClassCode>) -> Self {
        Self {
            data,
            transform: GeoTransform::default(),
            spatial_ref: None,
            nodata: None,
        }
    }

    /// Builds a grid from row-major values.
    pub fn from_vec(rows: usize, cols: usize, values: Vec<ClassCode>) -> Result<Self> {
        let data = Array2::from_shape_vec((rows, cols), values).map_err(|e| {
            Error::invalid(format!("cannot shape values into a {rows}x{cols} grid: {e}"))
        })?;
        Ok(Self::new(data))
    }

    /// Builds a grid from an array of any rank after collapsing its singleton axes.
    ///
    /// A band axis of length one (`(1, rows, cols)`) is the usual case. When only one
    /// non-singleton axis remains, it becomes the column axis if it was the last axis
    /// of the input and the row axis otherwise.
    pub fn from_dyn(data: ArrayD<ClassCode>) -> Result<Self> {
        let shape = data.shape().to_vec();
        let kept: Vec<(usize, usize)> = shape
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, len)| len != 1)
            .collect();

        let dims = match kept.as_slice() {
            [] => (1, 1),
            [(axis, len)] => {
                if *axis + 1 == shape.len() {
                    (1, *len)
                } else {
                    (*len, 1)
                }
            }
            [(_, rows), (_, cols)] => (*rows, *cols),
            _ => {
                return Err(Error::invalid(format!(
                    "classified grid must have at most two non-singleton dimensions, got shape {shape:?}"
                )))
            }
        };

        // `iter` walks in logical row-major order regardless of memory layout.
        let values: Vec<ClassCode> = data.iter().copied().collect();
        Self::from_vec(dims.0, dims.1, values)
    }

    pub fn with_transform(mut self, transform: GeoTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_spatial_ref(mut self, spatial_ref: SpatialRef) -> Self {
        self.spatial_ref = Some(spatial_ref);
        self
    }

    /// Marks a code as missing data. Such cells never enter the sampling universe.
    pub fn with_nodata(mut self, nodata: ClassCode) -> Self {
        self.nodata = Some(nodata);
        self
    }

    pub fn data(&self) -> ArrayView2<'_, ClassCode> {
        self.data.view()
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    pub fn spatial_ref(&self) -> Option<&SpatialRef> {
        self.spatial_ref.as_ref()
    }

    pub fn nodata(&self) -> Option<ClassCode> {
        self.nodata
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<ClassCode> {
        self.data.get((row, col)).copied()
    }

    pub fn cell_center(&self, row: usize, col: usize) -> DVec2 {
        self.transform.cell_center(row, col)
    }

    /// Class of the cell containing a map position, or `None` outside the grid.
    pub fn class_at(&self, p: DVec2) -> Option<ClassCode> {
        let (row, col) = self.transform.position_to_index(p)?;
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    /// Cell counts per code, including any drop or nodata codes.
    pub fn class_counts(&self) -> BTreeMap<ClassCode, usize> {
        let mut counts = BTreeMap::new();
        for &code in self.data.iter() {
            *counts.entry(code).or_insert(0) += 1;
        }
        counts
    }
}
