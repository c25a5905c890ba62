//! Synopsis command: pyramid forward, mosaic layout and split-back check.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use wavebank_wavelet::PyramidTransform;

use crate::cli::RunArgs;
use crate::config;
use crate::convert::{self, Mode};
use crate::report::{self, RectangleReport, SynopsisReport, TransformSummary};

/// Lay the pyramid sub-bands out as one image and check they split back.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("synopsis").entered();
    let config = config::load(&args.config)?;
    if convert::parse_mode(&config.transform.mode)? != Mode::Pyramid {
        bail!("synopsis needs [transform].mode = \"pyramid\"");
    }
    let transform = convert::build_transform_config(&config.transform)?;
    if transform.subsample_factor() != config.synopsis.ratio {
        bail!(
            "synopsis ratio {} must equal the sub-sample factor {}",
            config.synopsis.ratio,
            transform.subsample_factor()
        );
    }
    let image = convert::build_input_image(&config.input, args.seed)?;
    let pyramid = PyramidTransform::new(transform)?;
    let bands = pyramid
        .forward(&image)
        .context("pyramid forward transform failed")?;

    let layout = convert::build_synopsis_layout(&config.synopsis, image.shape(), pyramid.config().levels());
    let rectangles = layout.rectangles().context("invalid synopsis layout")?;
    let mosaic = layout.to_synopsis(&bands).context("failed to assemble synopsis")?;
    let split = layout
        .to_sub_bands(&mosaic)
        .context("failed to split synopsis")?;
    let bit_exact = split.len() == bands.len()
        && split.iter().zip(&bands).all(|(a, b)| {
            a.image() == b.image() && a.level() == b.level() && a.orientation() == b.orientation()
        });
    info!(rectangles = rectangles.len(), bit_exact, "synopsis checked");

    let report = SynopsisReport {
        transform: TransformSummary::new(pyramid.config(), Mode::Pyramid.name(), image.shape()),
        ratio: layout.ratio(),
        rectangles: rectangles
            .iter()
            .zip(&bands)
            .enumerate()
            .map(|(index, (rect, band))| RectangleReport::new(index, band, rect))
            .collect(),
        bit_exact,
    };
    report::write(&report, args.output.as_deref())?;
    if !bit_exact {
        bail!("synopsis did not split back into the original sub-bands");
    }
    Ok(())
}
