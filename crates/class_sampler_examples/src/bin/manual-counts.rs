use class_sampler::prelude::*;
use class_sampler_examples::{init_tracing, log_summary, synthetic_landcover, LandcoverSpec};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let grid = synthetic_landcover(&LandcoverSpec::default());

    // Heavier sampling of the classes under review, none for class 1.
    let config = SamplingConfig::manual([(2, 60), (3, 40), (4, 40), (5, 25)])
        .with_class_field("landcover")
        .with_output_path("manual-counts.csv");

    let mut rng = StdRng::seed_from_u64(11);
    let table = sample(&grid, &config, &mut rng)?;
    log_summary(&grid, &table);

    // A class code that is not on the map is rejected before any draws.
    let bad = SamplingConfig::manual([(2, 10), (42, 10)]);
    if let Err(e) = sample(&grid, &bad, &mut rng) {
        tracing::info!("expected failure: {e}");
    }

    Ok(())
}
