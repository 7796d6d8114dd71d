//! Sampling strategy selector and the policy for undersized classes.
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How sample counts are allocated across classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrategyKind {
    /// Each class gets a share proportional to its area, never below the per-class minimum.
    #[default]
    StratifiedRandom,
    /// Each class gets the same share of the target count.
    EqualStratifiedRandom,
    /// Cells are drawn from the whole grid without regard to class.
    Random,
    /// Each class gets an explicitly requested count.
    Manual,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::StratifiedRandom,
        StrategyKind::EqualStratifiedRandom,
        StrategyKind::Random,
        StrategyKind::Manual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::StratifiedRandom => "stratified_random",
            StrategyKind::EqualStratifiedRandom => "equal_stratified_random",
            StrategyKind::Random => "random",
            StrategyKind::Manual => "manual",
        }
    }

    /// Policy applied when no explicit [`ShortfallPolicy`] is configured.
    ///
    /// Proportional and random draws fail on a shortfall while the equal and manual
    /// strategies skip the undersized class.
    pub fn default_shortfall(self) -> ShortfallPolicy {
        match self {
            StrategyKind::StratifiedRandom | StrategyKind::Random => ShortfallPolicy::Fail,
            StrategyKind::EqualStratifiedRandom | StrategyKind::Manual => ShortfallPolicy::Skip,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = StrategyKind::ALL.iter().map(|k| k.as_str()).collect();
                Error::invalid(format!(
                    "unknown sampling strategy '{s}', expected one of {names:?}"
                ))
            })
    }
}

/// What to do when a stratum holds fewer cells than requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShortfallPolicy {
    /// Abort the run with [`Error::PopulationShortfall`].
    Fail,
    /// Leave the stratum out of the output and emit a warning.
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_name() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.as_str().parse::<StrategyKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn unknown_name_is_invalid_argument() {
        let err = "bogus".parse::<StrategyKind>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref msg) if msg.contains("bogus")));
        assert!(err.to_string().contains("equal_stratified_random"));
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Random".parse::<StrategyKind>().is_err());
        assert!(" manual".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn default_shortfall_per_strategy() {
        assert_eq!(
            StrategyKind::StratifiedRandom.default_shortfall(),
            ShortfallPolicy::Fail
        );
        assert_eq!(StrategyKind::Random.default_shortfall(), ShortfallPolicy::Fail);
        assert_eq!(
            StrategyKind::EqualStratifiedRandom.default_shortfall(),
            ShortfallPolicy::Skip
        );
        assert_eq!(StrategyKind::Manual.default_shortfall(), ShortfallPolicy::Skip);
    }
}
