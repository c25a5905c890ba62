//! Roundtrip command: forward then inverse, checking the reconstruction.

use anyhow::{Result, bail};
use tracing::{info, info_span, warn};

use crate::cli::RoundtripArgs;
use crate::config;
use crate::convert;
use crate::engine::Engine;
use crate::report::{self, RoundtripReport, TransformSummary};

/// Run forward and inverse transforms and compare against the input.
pub fn run(args: RoundtripArgs) -> Result<()> {
    let _cmd = info_span!("roundtrip").entered();
    if !args.tolerance.is_finite() || args.tolerance < 0.0 {
        bail!("tolerance must be finite and non-negative, got {}", args.tolerance);
    }
    let config = config::load(&args.run.config)?;
    let engine = Engine::from_config(&config)?;
    let image = convert::build_input_image(&config.input, args.run.seed)?;

    let decomposition = engine.forward(&image)?;
    let rebuilt = engine.inverse(&decomposition)?;
    if rebuilt.shape() != image.shape() {
        bail!(
            "rebuilt image has shape {:?}, input was {:?}",
            rebuilt.shape(),
            image.shape()
        );
    }

    let input: Vec<f64> = image.iter().copied().collect();
    let output: Vec<f64> = rebuilt.iter().copied().collect();
    let difference: Vec<f64> = input.iter().zip(&output).map(|(a, b)| a - b).collect();
    let max_abs_error = wavebank_stats::max_abs_difference(&input, &output);
    let peak = wavebank_stats::max_abs(&input);
    let relative_error = if peak > 0.0 { max_abs_error / peak } else { max_abs_error };
    let passed = relative_error <= args.tolerance;

    let report = RoundtripReport {
        transform: TransformSummary::new(engine.config(), engine.mode().name(), image.shape()),
        bands: decomposition.bands.len(),
        max_abs_error,
        l2_error: wavebank_stats::l2_norm(&difference),
        relative_error,
        tolerance: args.tolerance,
        passed,
    };
    report::write(&report, args.run.output.as_deref())?;

    if !passed {
        warn!(relative_error, tolerance = args.tolerance, "round trip out of tolerance");
        bail!(
            "relative reconstruction error {relative_error:e} exceeds tolerance {:e}",
            args.tolerance
        );
    }
    info!(relative_error, "round trip within tolerance");
    Ok(())
}
