//! High-level runner that draws sample points from a classified grid.
//!
//! The pipeline is: flatten the grid into a [`Universe`], allocate counts with a
//! [`SamplePlan`], draw each stratum without replacement, assemble a
//! [`SampleTable`], and optionally write it to disk.
use std::collections::BTreeMap;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::export;
use crate::grid::{ClassCode, ClassGrid, Universe};
use crate::sampling::config::SamplingConfig;
use crate::sampling::draw_without_replacement;
use crate::sampling::events::{EventSink, SamplingEvent, SamplingEventKind};
use crate::sampling::plan::{SamplePlan, Stratum, StratumId};
use crate::sampling::strategy::ShortfallPolicy;
use crate::table::{SamplePoint, SampleTable};

/// Reusable sampler holding a validated configuration.
#[derive(Debug, Clone)]
pub struct Sampler {
    /// Configuration applied to every run.
    pub config: SamplingConfig,
}

impl Sampler {
    pub fn try_new(config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Samples `grid`, returning the assembled table.
    pub fn run(&self, grid: &ClassGrid, rng: &mut impl Rng) -> Result<SampleTable> {
        sample(grid, &self.config, rng)
    }

    pub fn run_with_events(
        &self,
        grid: &ClassGrid,
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) -> Result<SampleTable> {
        sample_with_events(grid, &self.config, rng, sink)
    }
}

/// Samples `grid` according to `config` using `rng` as the only source of randomness.
pub fn sample<R: Rng>(
    grid: &ClassGrid,
    config: &SamplingConfig,
    rng: &mut R,
) -> Result<SampleTable> {
    sample_with_events(grid, config, rng, &mut ())
}

pub fn sample_with_events<R: Rng>(
    grid: &ClassGrid,
    config: &SamplingConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<SampleTable> {
    config.validate()?;
    grid.transform().validate()?;

    let policy = config.shortfall_policy();
    if sink.wants(SamplingEventKind::RunStarted) {
        sink.send(SamplingEvent::RunStarted {
            strategy: config.strategy,
            target_count: config.target_count,
            shortfall: policy,
        });
    }

    let universe = Universe::build(grid, config.drop_value);
    debug!(
        "Universe has {} cells ({} dropped, {} missing).",
        universe.len(),
        universe.dropped(),
        universe.missing()
    );
    if sink.wants(SamplingEventKind::UniverseBuilt) {
        sink.send(SamplingEvent::UniverseBuilt {
            cells: universe.len(),
            dropped: universe.dropped(),
            missing: universe.missing(),
            classes: universe.classes(),
        });
    }

    let plan = SamplePlan::for_universe(&universe, config)?;
    // The single `All` stratum draws straight from the universe.
    let strata = if plan
        .strata
        .iter()
        .any(|s| matches!(s.id, StratumId::Class(_)))
    {
        universe.strata()
    } else {
        BTreeMap::new()
    };

    let mut points: Vec<SamplePoint> = Vec::with_capacity(plan.requested_total());
    for stratum in &plan.strata {
        if stratum.is_short() {
            match policy {
                ShortfallPolicy::Fail => {
                    return Err(Error::PopulationShortfall {
                        stratum: stratum.id,
                        requested: stratum.requested,
                        available: stratum.available,
                    });
                }
                ShortfallPolicy::Skip => {
                    warn!(
                        "Requested {} sample points but {} has only {} cells; skipping.",
                        stratum.requested, stratum.id, stratum.available
                    );
                    if sink.wants(SamplingEventKind::StratumSkipped) {
                        sink.send(SamplingEvent::StratumSkipped {
                            stratum: stratum.id,
                            requested: stratum.requested,
                            available: stratum.available,
                        });
                    }
                    continue;
                }
            }
        }

        draw_stratum(&universe, &strata, stratum, rng, &mut points);
        info!(
            "{}: sampled at {} coordinates.",
            capitalize(&stratum.id.to_string()),
            stratum.requested
        );
        if sink.wants(SamplingEventKind::StratumSampled) {
            sink.send(SamplingEvent::StratumSampled {
                stratum: stratum.id,
                count: stratum.requested,
            });
        }
    }

    let table = SampleTable::new(
        config.class_field.clone(),
        grid.spatial_ref().cloned(),
        points,
    );

    if let Some(path) = &config.output_path {
        export::write_table(&table, path)?;
        info!(
            "Wrote {} sample points to '{}'.",
            table.len(),
            path.display()
        );
        if sink.wants(SamplingEventKind::TableWritten) {
            sink.send(SamplingEvent::TableWritten {
                path: path.clone(),
                rows: table.len(),
            });
        }
    }

    if sink.wants(SamplingEventKind::RunFinished) {
        sink.send(SamplingEvent::RunFinished { rows: table.len() });
    }

    Ok(table)
}

/// Appends `stratum.requested` distinct cells of the stratum to `out`.
fn draw_stratum<R: Rng>(
    universe: &Universe,
    strata: &BTreeMap<ClassCode, Vec<usize>>,
    stratum: &Stratum,
    rng: &mut R,
    out: &mut Vec<SamplePoint>,
) {
    let cells = universe.cells();
    let members: Option<&[usize]> = match stratum.id {
        StratumId::Class(class) => Some(strata.get(&class).map_or(&[][..], Vec::as_slice)),
        StratumId::All => None,
    };
    let population = members.map_or(cells.len(), <[usize]>::len);

    for pick in draw_without_replacement(rng, population, stratum.requested) {
        let idx = members.map_or(pick, |m| m[pick]);
        let cell = cells[idx];
        out.push(SamplePoint {
            class: cell.class,
            position: cell.position,
        });
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
