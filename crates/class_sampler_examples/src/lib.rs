#![forbid(unsafe_code)]

mod landscape;

pub use landscape::{init_tracing, log_summary, synthetic_landcover, LandcoverSpec};
