//! The analysis driver: matches discovered histogram files to the fixed
//! detector array, normalizes each spectrum, and collects results keyed
//! by detector index. One forward pass, no state shared across
//! detectors.

mod discovery;

pub use discovery::{DiscoveredHistograms, discover_histogram_files};

use crate::config::BeamlineConfig;
use crate::domain::{AnalysisResult, NormalizedSpectrum};
use crate::modules::histogram::read_histogram_file;
use crate::modules::normalize::{classify_edges, integrate_flux, normalize_spectrum};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One summary row per processed detector, in detector order.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorReport {
    pub detector_index: usize,
    pub detector_name: &'static str,
    pub bin_count: usize,
    pub integrated_flux: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisOutcome {
    pub results: BTreeMap<usize, NormalizedSpectrum>,
    pub reports: Vec<DetectorReport>,
    /// Detectors whose edge sequence fit neither recorded convention.
    pub flagged_detectors: usize,
    /// Histogram lines dropped by the best-effort parser, summed over
    /// all processed files.
    pub discarded_lines: usize,
}

impl AnalysisOutcome {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Runs the per-detector pass over the discovered histogram files.
///
/// A detector with no matching file, an empty histogram, or a flagged
/// edge layout is omitted from the results; an unreadable matched file
/// is fatal.
pub fn analyze_histograms(
    files: &[PathBuf],
    config: &BeamlineConfig,
    event_count: f64,
) -> AnalysisResult<AnalysisOutcome> {
    let mut outcome = AnalysisOutcome::default();
    let detector_volume_cm3 = config.detector_volume_cm3();

    for detector_index in 0..config.detector_count() {
        let Some(detector_name) = config.detector_name(detector_index) else {
            continue;
        };
        let Some(path) = matching_file(files, detector_name) else {
            tracing::debug!(detector = detector_name, "no histogram file; detector omitted");
            continue;
        };

        let parsed = read_histogram_file(path)?;
        outcome.discarded_lines += parsed.discarded_lines;
        if parsed.discarded_lines > 0 {
            tracing::debug!(
                detector = detector_name,
                discarded = parsed.discarded_lines,
                "skipped malformed histogram lines"
            );
        }

        let histogram = parsed.histogram;
        if histogram.is_empty() {
            tracing::debug!(detector = detector_name, "empty histogram; detector omitted");
            continue;
        }

        if classify_edges(histogram.edges.len(), histogram.contents.len()).is_none() {
            outcome.flagged_detectors += 1;
            tracing::warn!(
                detector = detector_name,
                edges = histogram.edges.len(),
                bins = histogram.contents.len(),
                "edge sequence fits neither convention; detector omitted"
            );
            continue;
        }

        let spectrum = normalize_spectrum(&histogram, event_count, detector_volume_cm3)?;
        outcome.reports.push(DetectorReport {
            detector_index,
            detector_name,
            bin_count: spectrum.bin_count(),
            integrated_flux: integrate_flux(&spectrum),
        });
        outcome.results.insert(detector_index, spectrum);
    }

    Ok(outcome)
}

/// First sorted file whose name contains the detector name. Exact names
/// sort ahead of their prefixed variants, so `Dtctr1` selects
/// `..._Dtctr1.csv` over `..._Dtctr10.csv`.
fn matching_file<'a>(files: &'a [PathBuf], detector_name: &str) -> Option<&'a PathBuf> {
    files.iter().find(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().contains(detector_name))
            .unwrap_or(false)
    })
}
