use tracing_subscriber::EnvFilter;

/// Library crates whose spans and events feed the log.
const LIBRARY_TARGETS: &[&str] = &[
    "wavebank_filter",
    "wavebank_region",
    "wavebank_synopsis",
    "wavebank_wavelet",
];

/// Target of the binary's own events (config, reports, round-trip verdicts).
const BINARY_TARGET: &str = "wavebank";

const LEVELS: [&str; 4] = ["warn", "info", "debug", "trace"];

fn level(step: u8) -> &'static str {
    LEVELS[usize::from(step).min(LEVELS.len() - 1)]
}

/// Builds the default directive string for a `-v` count.
///
/// The binary runs one step ahead of the libraries, so `-v` shows the run
/// summary without per-band chatter and per-slab `trace!` events only appear
/// from `-vvvv` on.
///
/// | `-v` count | `wavebank` | library crates |
/// |------------|------------|----------------|
/// | 0 | warn | warn |
/// | 1 | info | warn |
/// | 2 | debug | info |
/// | 3 | trace | debug |
/// | 4+ | trace | trace |
pub fn default_filter(verbosity: u8) -> String {
    let library = level(verbosity.saturating_sub(1));
    std::iter::once(format!("{BINARY_TARGET}={}", level(verbosity)))
        .chain(LIBRARY_TARGETS.iter().map(|t| format!("{t}={library}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the stderr subscriber. Stdout is reserved for JSON reports.
///
/// `RUST_LOG` overrides [`default_filter`] if set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .init();
}
