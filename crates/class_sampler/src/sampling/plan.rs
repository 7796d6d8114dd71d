//! Per-stratum sample allocation.
//!
//! A [`SamplePlan`] lists, in processing order, how many cells each stratum should
//! contribute and how many it actually holds. Building the plan is pure; drawing
//! happens in [`crate::sampling::runner`].
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::grid::{ClassCode, Universe};
use crate::sampling::config::SamplingConfig;
use crate::sampling::round_count;
use crate::sampling::strategy::StrategyKind;

/// Identifies the population a draw is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StratumId {
    /// Cells of a single class.
    Class(ClassCode),
    /// Every cell in the universe.
    All,
}

impl fmt::Display for StratumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StratumId::Class(class) => write!(f, "class {class}"),
            StratumId::All => f.write_str("all classes"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stratum {
    pub id: StratumId,
    /// Number of cells to draw.
    pub requested: usize,
    /// Number of cells the stratum holds.
    pub available: usize,
}

impl Stratum {
    /// `true` when the stratum cannot satisfy the request without replacement.
    pub fn is_short(&self) -> bool {
        self.requested > self.available
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SamplePlan {
    pub strategy: StrategyKind,
    pub strata: Vec<Stratum>,
}

impl SamplePlan {
    /// Allocates sample counts over the universe according to `config.strategy`.
    pub fn for_universe(universe: &Universe, config: &SamplingConfig) -> Result<Self> {
        let ratios = universe.class_ratios();
        let counts: BTreeMap<ClassCode, usize> =
            ratios.iter().map(|r| (r.class, r.count)).collect();

        let strata = match config.strategy {
            StrategyKind::StratifiedRandom => ratios
                .iter()
                .map(|r| Stratum {
                    id: StratumId::Class(r.class),
                    requested: config
                        .min_per_class
                        .max(round_count(config.target_count as f64 * r.proportion)),
                    available: r.count,
                })
                .collect(),
            StrategyKind::EqualStratifiedRandom => {
                let per_class = if counts.is_empty() {
                    0
                } else {
                    round_count(config.target_count as f64 / counts.len() as f64)
                };
                counts
                    .iter()
                    .map(|(&class, &available)| Stratum {
                        id: StratumId::Class(class),
                        requested: per_class,
                        available,
                    })
                    .collect()
            }
            StrategyKind::Random => vec![Stratum {
                id: StratumId::All,
                requested: config.target_count,
                available: universe.len(),
            }],
            StrategyKind::Manual => {
                let requested = config.manual_counts.as_ref().ok_or_else(|| {
                    Error::invalid(
                        "must supply a mapping of {class: number_of_points} when sampling is 'manual'",
                    )
                })?;
                check_manual_classes(&counts, requested)?;
                requested
                    .iter()
                    .map(|(&class, &count)| Stratum {
                        id: StratumId::Class(class),
                        requested: count,
                        available: counts.get(&class).copied().unwrap_or(0),
                    })
                    .collect()
            }
        };

        Ok(Self {
            strategy: config.strategy,
            strata,
        })
    }

    /// Sum of requested counts over all strata.
    pub fn requested_total(&self) -> usize {
        self.strata.iter().map(|s| s.requested).sum()
    }
}

fn check_manual_classes(
    present: &BTreeMap<ClassCode, usize>,
    requested: &BTreeMap<ClassCode, usize>,
) -> Result<()> {
    if requested.keys().all(|class| present.contains_key(class)) {
        return Ok(());
    }
    let grid_classes: Vec<ClassCode> = present.keys().copied().collect();
    let requested_classes: Vec<ClassCode> = requested.keys().copied().collect();
    Err(Error::invalid(format!(
        "some or all of the classes in the manual sample counts do not match the classes in the grid; \
         grid classes: {grid_classes:?}, requested classes: {requested_classes:?}"
    )))
}
