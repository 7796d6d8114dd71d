use class_sampler::prelude::*;
use class_sampler_examples::{init_tracing, synthetic_landcover, LandcoverSpec};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let grid = synthetic_landcover(&LandcoverSpec {
        rows: 120,
        cols: 80,
        ..Default::default()
    });

    // Strategy names usually arrive as text from a config file or notebook.
    let strategy: StrategyKind = "random".parse()?;
    let config = SamplingConfig::new(300, strategy).with_output_path("random-with-events.geojson");

    let mut sink = FnSink::new(|event| match event {
        SamplingEvent::UniverseBuilt {
            cells,
            dropped,
            classes,
            ..
        } => info!("universe: {cells} cells, {dropped} dropped, classes {classes:?}"),
        SamplingEvent::TableWritten { path, rows } => {
            info!("wrote {rows} rows to {}", path.display())
        }
        _ => {}
    });

    let mut rng = StdRng::seed_from_u64(99);
    let table = sample_with_events(&grid, &config, &mut rng, &mut sink)?;
    info!("{} points, CRS {:?}", table.len(), table.crs());

    Ok(())
}
