mod parser;

use crate::config::BeamlineConfig;
use crate::domain::{AnalysisResult, HitRecord};
use std::path::Path;

/// Per-detector digest of the raw hits table, used when pre-binned
/// histograms are unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorHitSummary {
    pub detector_index: usize,
    pub detector_name: &'static str,
    pub hit_count: usize,
    pub energy_min_mev: f64,
    pub energy_max_mev: f64,
}

/// Reads the header-labeled hits ntuple. Malformed rows are fatal; there
/// is no row-level recovery on this path.
pub fn read_ntuple_file(path: &Path) -> AnalysisResult<Vec<HitRecord>> {
    parser::read_hit_rows(path)
}

/// Groups hits by detector id and reports count and energy range per
/// configured detector. Detectors with no hits, and hits whose id falls
/// outside the configured array, are omitted.
pub fn summarize_hits(hits: &[HitRecord], config: &BeamlineConfig) -> Vec<DetectorHitSummary> {
    let mut summaries = Vec::new();

    for detector_index in 0..config.detector_count() {
        let mut hit_count = 0;
        let mut energy_min_mev = f64::INFINITY;
        let mut energy_max_mev = f64::NEG_INFINITY;

        for hit in hits {
            if hit.det_id == detector_index as i64 {
                hit_count += 1;
                energy_min_mev = energy_min_mev.min(hit.energy_mev);
                energy_max_mev = energy_max_mev.max(hit.energy_mev);
            }
        }

        if hit_count > 0 {
            let detector_name = config
                .detector_name(detector_index)
                .unwrap_or("(unnamed detector)");
            summaries.push(DetectorHitSummary {
                detector_index,
                detector_name,
                hit_count,
                energy_min_mev,
                energy_max_mev,
            });
        }
    }

    summaries
}
