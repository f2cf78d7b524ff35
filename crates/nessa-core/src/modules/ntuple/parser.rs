use crate::domain::{AnalysisResult, HitRecord, NessaError};
use serde::Deserialize;
use std::path::Path;

/// One row of the raw hits ntuple, as labeled by the Geant4 analysis
/// manager header.
#[derive(Debug, Deserialize)]
pub(super) struct HitRow {
    #[serde(rename = "DetID")]
    det_id: i64,
    #[serde(rename = "Energy_MeV")]
    energy_mev: f64,
    #[serde(rename = "TrackLength_cm")]
    track_length_cm: f64,
    #[serde(rename = "Weight")]
    weight: f64,
}

impl From<HitRow> for HitRecord {
    fn from(row: HitRow) -> Self {
        Self {
            det_id: row.det_id,
            energy_mev: row.energy_mev,
            track_length_cm: row.track_length_cm,
            weight: row.weight,
        }
    }
}

pub(super) fn read_hit_rows(path: &Path) -> AnalysisResult<Vec<HitRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| {
            NessaError::io_system(
                "IO.NTUPLE_READ",
                format!("failed to open ntuple '{}': {}", path.display(), source),
            )
        })?;

    let mut records = Vec::new();
    for row in reader.deserialize::<HitRow>() {
        let row = row.map_err(|source| {
            NessaError::input_validation(
                "INPUT.NTUPLE_ROW",
                format!("malformed ntuple row in '{}': {}", path.display(), source),
            )
        })?;
        records.push(row.into());
    }

    Ok(records)
}
