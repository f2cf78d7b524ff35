//! Flux normalization.
//!
//! Raw bin contents hold `sum(weight * trackLength_cm)` per energy bin.
//! The PHITS-equivalent track-length flux is
//! `Phi(E) = content / (N_events * V_detector * dE)`.

use crate::domain::{AnalysisResult, EdgeConvention, Histogram, NessaError, NormalizedSpectrum};

/// Floor for degenerate bin widths; keeps the division defined without
/// promoting broken bins to visible flux.
pub const WIDTH_EPSILON: f64 = 1.0e-30;

/// Classifies an edge sequence against its contents. `None` marks an
/// input where neither recorded Geant4 layout applies.
pub fn classify_edges(edges_len: usize, contents_len: usize) -> Option<EdgeConvention> {
    if edges_len == contents_len + 1 {
        Some(EdgeConvention::Boundaries)
    } else if edges_len == contents_len {
        Some(EdgeConvention::LowEdges)
    } else {
        None
    }
}

/// Per-bin energy widths, length-matched to `bin_count`.
///
/// Under `LowEdges` the final bin has no recorded upper boundary; it
/// reuses the last consecutive width (or the epsilon floor when the
/// sequence holds a single edge). Non-positive widths collapse to the
/// epsilon floor.
pub fn bin_widths(edges: &[f64], bin_count: usize, convention: EdgeConvention) -> Vec<f64> {
    let mut widths: Vec<f64> = edges
        .windows(2)
        .take(bin_count)
        .map(|pair| pair[1] - pair[0])
        .collect();

    if convention == EdgeConvention::LowEdges && widths.len() < bin_count {
        let filler = widths.last().copied().unwrap_or(WIDTH_EPSILON);
        widths.resize(bin_count, filler);
    }

    for width in &mut widths {
        if *width <= 0.0 {
            *width = WIDTH_EPSILON;
        }
    }
    widths
}

/// Converts raw bin contents into flux per unit area, energy, and source
/// particle. Pure: identical inputs always produce identical output.
pub fn normalize_spectrum(
    histogram: &Histogram,
    event_count: f64,
    detector_volume_cm3: f64,
) -> AnalysisResult<NormalizedSpectrum> {
    let convention =
        classify_edges(histogram.edges.len(), histogram.contents.len()).ok_or_else(|| {
            NessaError::computation(
                "RUN.EDGE_CONVENTION",
                format!(
                    "edge sequence of length {} fits neither convention for {} bins",
                    histogram.edges.len(),
                    histogram.contents.len()
                ),
            )
        })?;

    let widths = bin_widths(&histogram.edges, histogram.contents.len(), convention);
    let flux = histogram
        .contents
        .iter()
        .zip(&widths)
        .map(|(content, width)| content / (event_count * detector_volume_cm3 * width))
        .collect();

    Ok(NormalizedSpectrum {
        edges: histogram.edges.clone(),
        contents: histogram.contents.clone(),
        flux,
    })
}

/// Integrates flux over energy: `sum(flux[i] * dE[i])` with real widths
/// when the spectrum carries full boundaries, unit widths otherwise.
pub fn integrate_flux(spectrum: &NormalizedSpectrum) -> f64 {
    if spectrum.edges.len() > spectrum.flux.len() {
        spectrum
            .edges
            .windows(2)
            .take(spectrum.flux.len())
            .zip(&spectrum.flux)
            .map(|(pair, flux)| flux * (pair[1] - pair[0]))
            .sum()
    } else {
        spectrum.flux.iter().sum()
    }
}
