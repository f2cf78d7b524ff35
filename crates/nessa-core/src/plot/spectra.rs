use crate::config::BeamlineConfig;
use crate::domain::{AnalysisResult, NessaError, NormalizedSpectrum};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::BTreeMap;
use std::path::Path;

const GRID_WIDTH_PX: u32 = 1800;
const GRID_HEIGHT_PX: u32 = 1000;

/// Energy window shared by every panel, matching the simulated source
/// range (thermal tail up to the 14 MeV generator line with headroom).
const ENERGY_MIN_MEV: f64 = 1.0e-10;
const ENERGY_MAX_MEV: f64 = 20.0;

/// Renders the fixed 2x3 grid of log-log spectra for the preselected
/// detectors. Panels for detectors absent from `results` carry a
/// "no data" placeholder.
pub fn render_spectrum_grid(
    path: &Path,
    results: &BTreeMap<usize, NormalizedSpectrum>,
    config: &BeamlineConfig,
    event_count: f64,
) -> AnalysisResult<()> {
    draw_grid(path, results, config, event_count).map_err(|source| {
        NessaError::computation(
            "RUN.SPECTRA_PLOT",
            format!(
                "failed to render spectrum grid '{}': {}",
                path.display(),
                source
            ),
        )
    })
}

fn draw_grid(
    path: &Path,
    results: &BTreeMap<usize, NormalizedSpectrum>,
    config: &BeamlineConfig,
    event_count: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (GRID_WIDTH_PX, GRID_HEIGHT_PX)).into_drawing_area();
    root.fill(&WHITE)?;

    let title = format!(
        "NESSA Neutron Beamline - Geant4 Simulation: Energy Spectra (N = {event_count:.0e} source neutrons)"
    );
    let root = root.titled(&title, ("sans-serif", 32))?;

    let areas = root.split_evenly((2, 3));
    for (area, panel) in areas.iter().zip(config.spectrum_panels()) {
        match results.get(&panel.detector_index) {
            Some(spectrum) => draw_panel(area, panel.label, spectrum)?,
            None => {
                let name = config
                    .detector_name(panel.detector_index)
                    .unwrap_or("(unnamed detector)");
                draw_placeholder(area, name)?;
            }
        }
    }

    root.present()?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    label: &str,
    spectrum: &NormalizedSpectrum,
) -> Result<(), Box<dyn std::error::Error>> {
    let points: Vec<(f64, f64)> = spectrum
        .bin_centers()
        .into_iter()
        .zip(spectrum.flux.iter().copied())
        .filter(|(center, flux)| *center > 0.0 && *flux > 0.0)
        .collect();

    let (flux_min, flux_max) = if points.is_empty() {
        (1.0e-12, 1.0)
    } else {
        let min = points.iter().map(|(_, flux)| *flux).fold(f64::INFINITY, f64::min);
        let max = points
            .iter()
            .map(|(_, flux)| *flux)
            .fold(f64::NEG_INFINITY, f64::max);
        (min * 0.5, max * 2.0)
    };

    let mut chart = ChartBuilder::on(area)
        .caption(label, ("sans-serif", 20))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(
            (ENERGY_MIN_MEV..ENERGY_MAX_MEV).log_scale(),
            (flux_min..flux_max).log_scale(),
        )?;

    chart
        .configure_mesh()
        .x_desc("Neutron Energy [MeV]")
        .y_desc("Flux [1/cm²/MeV/source]")
        .x_label_formatter(&|value| format!("{value:.0e}"))
        .y_label_formatter(&|value| format!("{value:.0e}"))
        .label_style(("sans-serif", 15))
        .draw()?;

    if !points.is_empty() {
        chart.draw_series(LineSeries::new(points, BLUE.stroke_width(1)))?;
    }

    Ok(())
}

fn draw_placeholder(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    detector_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = area.dim_in_pixel();
    let style = ("sans-serif", 24)
        .into_text_style(area)
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(
        format!("No data for {detector_name}"),
        (width as i32 / 2, height as i32 / 2),
        style,
    ))?;
    Ok(())
}
