//! Configuration for a sampling run.
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::grid::ClassCode;
use crate::sampling::strategy::{ShortfallPolicy, StrategyKind};

pub const DEFAULT_MIN_PER_CLASS: usize = 5;
pub const DEFAULT_CLASS_FIELD: &str = "class";
pub const DEFAULT_DROP_VALUE: ClassCode = 0;

/// Name reserved for the point geometry column of exported tables.
pub const GEOMETRY_FIELD: &str = "geometry";

/// Configuration for sampling a classified grid.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplingConfig {
    /// Total number of points to sample. Not used by [`StrategyKind::Manual`].
    pub target_count: usize,
    /// Lower bound on the per-class count under [`StrategyKind::StratifiedRandom`].
    pub min_per_class: usize,
    /// Allocation strategy.
    pub strategy: StrategyKind,
    /// Requested count per class. Required by [`StrategyKind::Manual`], ignored otherwise.
    pub manual_counts: Option<BTreeMap<ClassCode, usize>>,
    /// If set, the sampled table is written here; the extension picks the format.
    pub output_path: Option<PathBuf>,
    /// Name of the class attribute in the output table.
    pub class_field: String,
    /// Class code excluded from sampling.
    pub drop_value: ClassCode,
    /// Overrides the strategy's own shortfall handling when set.
    pub shortfall: Option<ShortfallPolicy>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            target_count: 0,
            min_per_class: DEFAULT_MIN_PER_CLASS,
            strategy: StrategyKind::default(),
            manual_counts: None,
            output_path: None,
            class_field: DEFAULT_CLASS_FIELD.to_owned(),
            drop_value: DEFAULT_DROP_VALUE,
            shortfall: None,
        }
    }
}

impl SamplingConfig {
    /// Creates a new [`SamplingConfig`] for the given total count and strategy.
    pub fn new(target_count: usize, strategy: StrategyKind) -> Self {
        Self {
            target_count,
            strategy,
            ..Default::default()
        }
    }

    /// Creates a [`StrategyKind::Manual`] configuration from `(class, count)` pairs.
    pub fn manual(counts: impl IntoIterator<Item = (ClassCode, usize)>) -> Self {
        Self::new(0, StrategyKind::Manual).with_manual_counts(counts)
    }

    /// Sets the minimum sample count per class.
    pub fn with_min_per_class(mut self, min_per_class: usize) -> Self {
        self.min_per_class = min_per_class;
        self
    }

    /// Sets the per-class counts used by [`StrategyKind::Manual`].
    pub fn with_manual_counts(mut self, counts: impl IntoIterator<Item = (ClassCode, usize)>) -> Self {
        self.manual_counts = Some(counts.into_iter().collect());
        self
    }

    /// Sets the path the sampled table is written to.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Sets the class attribute name.
    pub fn with_class_field(mut self, class_field: impl Into<String>) -> Self {
        self.class_field = class_field.into();
        self
    }

    /// Sets the class code excluded from sampling.
    pub fn with_drop_value(mut self, drop_value: ClassCode) -> Self {
        self.drop_value = drop_value;
        self
    }

    /// Applies one shortfall policy to every strategy.
    pub fn with_shortfall_policy(mut self, policy: ShortfallPolicy) -> Self {
        self.shortfall = Some(policy);
        self
    }

    /// The shortfall policy in effect for this configuration.
    pub fn shortfall_policy(&self) -> ShortfallPolicy {
        self.shortfall
            .unwrap_or_else(|| self.strategy.default_shortfall())
    }

    /// Validates the configuration, returning an error if invalid.
    ///
    /// Manual keys are checked against the grid later, once its classes are known.
    pub fn validate(&self) -> Result<()> {
        if self.class_field.trim().is_empty() {
            return Err(Error::invalid("class_field must not be empty"));
        }
        if self.class_field == GEOMETRY_FIELD {
            return Err(Error::invalid(format!(
                "class_field must not be '{GEOMETRY_FIELD}'"
            )));
        }

        if self.strategy == StrategyKind::Manual {
            match &self.manual_counts {
                None => {
                    return Err(Error::invalid(
                        "must supply a mapping of {class: number_of_points} when sampling is 'manual'",
                    ))
                }
                Some(counts) if counts.is_empty() => {
                    return Err(Error::invalid(
                        "manual sample counts must name at least one class",
                    ))
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}
