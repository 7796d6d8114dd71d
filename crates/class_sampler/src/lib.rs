#![forbid(unsafe_code)]
//! class_sampler: Random sample points from classified rasters for accuracy assessment.
//!
//! Modules:
//! - grid: classified grids, spatial reference, and the sampling universe
//! - sampling: strategies (proportional, equal, random, manual), configuration, runner, events
//! - table: sampled point tables
//! - export: GeoJSON and CSV writers
//!
//! For examples and docs, see README and docs.rs.
pub mod error;
pub mod export;
pub mod grid;
pub mod sampling;
pub mod table;

/// Convenient re-exports for common types. Import with `use class_sampler::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::export::{write_table, OutputFormat};
    pub use crate::grid::{ClassCode, ClassGrid, ClassRatio, GeoTransform, SpatialRef, Universe};
    pub use crate::sampling::events::{
        EventSink, FilterSink, FnSink, MultiSink, SamplingEvent, SamplingEventKind, VecSink,
    };
    pub use crate::sampling::{
        round_count, sample, sample_with_events, SamplePlan, Sampler, SamplingConfig,
        ShortfallPolicy, StrategyKind, Stratum, StratumId,
    };
    pub use crate::table::{SamplePoint, SampleTable};
}
