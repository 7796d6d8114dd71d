//! Shared helpers for the executable examples: tracing setup and synthetic classified grids.
use class_sampler::prelude::*;
use glam::DVec2;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Parameters of a synthetic Voronoi-patch landcover map.
#[derive(Debug, Clone)]
pub struct LandcoverSpec {
    pub rows: usize,
    pub cols: usize,
    /// Class codes to scatter; repeated codes get proportionally more area.
    pub classes: Vec<ClassCode>,
    /// Number of patch seeds.
    pub patches: usize,
    /// Width of the border filled with `background`.
    pub border: usize,
    pub background: ClassCode,
    pub cell_size: f64,
    pub upper_left: DVec2,
    pub epsg: u32,
    pub seed: u64,
}

impl Default for LandcoverSpec {
    fn default() -> Self {
        Self {
            rows: 200,
            cols: 200,
            classes: vec![1, 1, 1, 2, 2, 3, 4, 5],
            patches: 40,
            border: 5,
            background: 0,
            cell_size: 30.0,
            upper_left: DVec2::new(600_000.0, 7_100_000.0),
            epsg: 32736,
            seed: 2025,
        }
    }
}

/// Builds a classified grid where each cell takes the class of its nearest patch seed.
pub fn synthetic_landcover(spec: &LandcoverSpec) -> ClassGrid {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let mut unit = || (rng.next_u32() as f64) / (u32::MAX as f64 + 1.0);

    let seeds: Vec<(DVec2, ClassCode)> = (0..spec.patches.max(1))
        .map(|i| {
            let p = DVec2::new(unit() * spec.cols as f64, unit() * spec.rows as f64);
            let class = match spec.classes.len() {
                0 => spec.background,
                n => spec.classes[i % n],
            };
            (p, class)
        })
        .collect();

    let data = Array2::from_shape_fn((spec.rows, spec.cols), |(row, col)| {
        let inside = row >= spec.border
            && col >= spec.border
            && row + spec.border < spec.rows
            && col + spec.border < spec.cols;
        if !inside {
            return spec.background;
        }
        let p = DVec2::new(col as f64 + 0.5, row as f64 + 0.5);
        seeds
            .iter()
            .min_by(|a, b| a.0.distance_squared(p).total_cmp(&b.0.distance_squared(p)))
            .map_or(spec.background, |(_, class)| *class)
    });

    ClassGrid::new(data)
        .with_transform(GeoTransform::north_up(spec.upper_left, spec.cell_size))
        .with_spatial_ref(SpatialRef::Epsg(spec.epsg))
}

/// Logs per-class counts of the grid and of a sampled table side by side.
pub fn log_summary(grid: &ClassGrid, table: &SampleTable) {
    let area = grid.class_counts();
    let sampled = table.class_counts();
    for (class, cells) in &area {
        info!(
            "class {:>3}: {:>6} cells, {:>4} samples",
            class,
            cells,
            sampled.get(class).copied().unwrap_or(0)
        );
    }
    info!("total samples: {}", table.len());
}
