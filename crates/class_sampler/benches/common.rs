use std::time::Duration;

use class_sampler::grid::{ClassCode, ClassGrid};
use criterion::{Criterion, Throughput};
use ndarray::Array2;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Square grid of vertical class bands, `classes` wide, with a background border.
pub fn banded_grid(size: usize, classes: ClassCode) -> ClassGrid {
    let band = (size / classes.max(1) as usize).max(1);
    let data = Array2::from_shape_fn((size, size), |(row, col)| {
        if row == 0 || col == 0 {
            0
        } else {
            ((col / band) as ClassCode).min(classes - 1) + 1
        }
    });
    ClassGrid::new(data)
}
