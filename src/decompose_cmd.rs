//! Decompose command: forward transform and per-band statistics.

use anyhow::Result;
use tracing::{info, info_span};

use crate::cli::RunArgs;
use crate::config;
use crate::convert;
use crate::engine::Engine;
use crate::report::{self, BandReport, DecomposeReport, TransformSummary};

/// Run the forward transform and report every sub-band.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("decompose").entered();
    let config = config::load(&args.config)?;
    let engine = Engine::from_config(&config)?;
    let image = convert::build_input_image(&config.input, args.seed)?;
    info!(shape = ?image.shape(), pattern = %config.input.pattern, "input generated");

    let decomposition = engine.forward(&image)?;
    let coefficients: Vec<f64> = decomposition
        .bands
        .iter()
        .flat_map(|band| band.image().iter().copied())
        .collect();

    let report = DecomposeReport {
        transform: TransformSummary::new(engine.config(), engine.mode().name(), image.shape()),
        entropy: wavebank_stats::shannon_entropy(&coefficients),
        bands: decomposition
            .bands
            .iter()
            .enumerate()
            .map(|(index, band)| BandReport::new(index, band))
            .collect(),
        tree: decomposition.tree.map(|tree| tree.into_flags()),
    };
    report::write(&report, args.output.as_deref())
}
