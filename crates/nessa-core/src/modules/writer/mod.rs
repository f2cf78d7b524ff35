use crate::config::{BeamlineConfig, spectrum_output_name};
use crate::domain::{AnalysisResult, NessaError, NormalizedSpectrum};
use crate::modules::serialization::{format_scientific_f64, write_text_artifact};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Serializes every detector's normalized spectrum to
/// `nspect_<name>_normalized.dat` in `output_dir`. Returns the written
/// paths in detector order. Write failures are fatal.
pub fn write_normalized_spectra(
    output_dir: &Path,
    results: &BTreeMap<usize, NormalizedSpectrum>,
    config: &BeamlineConfig,
    event_count: f64,
) -> AnalysisResult<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (&detector_index, spectrum) in results {
        let Some(detector_name) = config.detector_name(detector_index) else {
            continue;
        };
        let path = output_dir.join(spectrum_output_name(detector_name));
        let content = render_spectrum_file(detector_name, event_count, spectrum);
        write_text_artifact(&path, &content).map_err(|source| {
            NessaError::io_system(
                "IO.SPECTRUM_WRITE",
                format!(
                    "failed to write normalized spectrum '{}': {}",
                    path.display(),
                    source
                ),
            )
        })?;
        written.push(path);
    }

    Ok(written)
}

/// One spectrum file: a comment header naming the detector and run size,
/// then `low  high  flux` rows in fixed-width scientific notation. A bin
/// edge the input never recorded is written as zero.
pub fn render_spectrum_file(
    detector_name: &str,
    event_count: f64,
    spectrum: &NormalizedSpectrum,
) -> String {
    let mut content = String::new();
    content.push_str(&format!("# NESSA Geant4: {detector_name}\n"));
    content.push_str(&format!("# N_events = {event_count:.0}\n"));
    content.push_str("# Energy_low[MeV]  Energy_high[MeV]  Flux[1/cm2/MeV/source]\n");

    for (bin, flux) in spectrum.flux.iter().enumerate() {
        let low = spectrum.edges.get(bin).copied().unwrap_or(0.0);
        let high = spectrum.edges.get(bin + 1).copied().unwrap_or(0.0);
        content.push_str(&format!(
            "{}  {}  {}\n",
            format_scientific_f64(low, 6),
            format_scientific_f64(high, 6),
            format_scientific_f64(*flux, 6),
        ));
    }

    content
}
