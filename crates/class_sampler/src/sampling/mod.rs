//! Stratified and unconditional sampling of a classified grid.
//!
//! - [`strategy`]: strategy selector and shortfall policy
//! - [`config`]: run configuration and validation
//! - [`plan`]: how many cells to draw from each stratum
//! - [`runner`]: draws cells and assembles the output table
//! - [`events`]: structured observation of a run
use rand::seq::index::{self, IndexVec};
use rand::Rng;

pub mod config;
pub mod events;
pub mod plan;
pub mod runner;
pub mod strategy;

pub use config::SamplingConfig;
pub use plan::{SamplePlan, Stratum, StratumId};
pub use runner::{sample, sample_with_events, Sampler};
pub use strategy::{ShortfallPolicy, StrategyKind};

/// Rounds a fractional sample count half-to-even, clamping negatives and NaN to zero.
#[inline]
pub fn round_count(x: f64) -> usize {
    if !x.is_finite() || x <= 0.0 {
        return 0;
    }
    x.round_ties_even() as usize
}

/// Draws `k` distinct indices from `0..population` in draw order.
///
/// Callers must ensure `k <= population`.
pub(crate) fn draw_without_replacement<R: Rng + ?Sized>(
    rng: &mut R,
    population: usize,
    k: usize,
) -> IndexVec {
    debug_assert!(k <= population, "cannot draw {k} from {population}");
    index::sample(rng, population, k)
}
