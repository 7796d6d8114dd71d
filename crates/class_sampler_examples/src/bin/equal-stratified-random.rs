use class_sampler::prelude::*;
use class_sampler_examples::{init_tracing, log_summary, synthetic_landcover, LandcoverSpec};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // One tiny class (code 9) that cannot supply its equal share.
    let spec = LandcoverSpec {
        classes: vec![1, 2, 3, 4],
        ..Default::default()
    };
    let mut grid_values = synthetic_landcover(&spec).data().to_owned();
    grid_values[[10, 10]] = 9;
    grid_values[[10, 11]] = 9;
    let grid = ClassGrid::new(grid_values)
        .with_transform(GeoTransform::north_up(spec.upper_left, spec.cell_size))
        .with_spatial_ref(SpatialRef::Epsg(spec.epsg));

    let config = SamplingConfig::new(250, StrategyKind::EqualStratifiedRandom)
        .with_output_path("equal-stratified-random.geojson");

    let mut sink = VecSink::new();
    let mut rng = StdRng::seed_from_u64(7);
    let table = Sampler::try_new(config)?.run_with_events(&grid, &mut rng, &mut sink)?;
    log_summary(&grid, &table);

    for stratum in sink.skipped() {
        warn!("{stratum} is absent from the output.");
    }

    Ok(())
}
