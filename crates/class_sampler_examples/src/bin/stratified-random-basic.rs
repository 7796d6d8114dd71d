use class_sampler::prelude::*;
use class_sampler_examples::{init_tracing, log_summary, synthetic_landcover, LandcoverSpec};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let grid = synthetic_landcover(&LandcoverSpec::default());

    // Area-proportional allocation; rare classes still get at least 10 points.
    let config = SamplingConfig::new(500, StrategyKind::StratifiedRandom)
        .with_min_per_class(10)
        .with_output_path("sample_points.shp");

    let mut rng = StdRng::seed_from_u64(2025);
    let table = sample(&grid, &config, &mut rng)?;
    log_summary(&grid, &table);

    Ok(())
}
