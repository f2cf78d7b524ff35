use crate::config::{BeamlineConfig, COLLIMATOR_EXIT_Y_CM, COLLIMATOR_WALL_Y_CM};
use crate::domain::{AnalysisResult, NessaError, NormalizedSpectrum};
use crate::modules::normalize::integrate_flux;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::collections::BTreeMap;
use std::path::Path;

const PROFILE_WIDTH_PX: u32 = 1000;
const PROFILE_HEIGHT_PX: u32 = 600;

/// Renders integrated flux versus detector position for the beamline
/// detectors. Returns `false` without producing a file when no beamline
/// detector has a spectrum.
pub fn render_flux_profile(
    path: &Path,
    results: &BTreeMap<usize, NormalizedSpectrum>,
    config: &BeamlineConfig,
) -> AnalysisResult<bool> {
    let mut points = Vec::new();
    for detector_index in 0..config.beamline_detector_count() {
        let Some(spectrum) = results.get(&detector_index) else {
            continue;
        };
        let Some(y_cm) = config.detector_y_cm(detector_index) else {
            continue;
        };
        points.push((y_cm, integrate_flux(spectrum)));
    }

    if points.is_empty() {
        return Ok(false);
    }

    draw_profile(path, &points).map_err(|source| {
        NessaError::computation(
            "RUN.PROFILE_PLOT",
            format!(
                "failed to render flux profile '{}': {}",
                path.display(),
                source
            ),
        )
    })?;
    Ok(true)
}

fn draw_profile(path: &Path, points: &[(f64, f64)]) -> Result<(), Box<dyn std::error::Error>> {
    // The x axis is drawn mirrored (negated positions, relabeled) so the
    // source side sits on the right, as beamline plots are read.
    let mirrored: Vec<(f64, f64)> = points
        .iter()
        .filter(|(_, flux)| *flux > 0.0)
        .map(|(y_cm, flux)| (-y_cm, *flux))
        .collect();

    let reference_marks = [
        (-COLLIMATOR_WALL_Y_CM, RGBColor(128, 128, 128), "Collimator wall"),
        (-COLLIMATOR_EXIT_Y_CM, GREEN, "Collimator exit"),
    ];

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    for x in mirrored
        .iter()
        .map(|(x, _)| *x)
        .chain(reference_marks.iter().map(|(x, _, _)| *x))
    {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
    }

    let (flux_min, flux_max) = if mirrored.is_empty() {
        (1.0e-12, 1.0)
    } else {
        let min = mirrored.iter().map(|(_, flux)| *flux).fold(f64::INFINITY, f64::min);
        let max = mirrored
            .iter()
            .map(|(_, flux)| *flux)
            .fold(f64::NEG_INFINITY, f64::max);
        (min * 0.5, max * 2.0)
    };

    let root = BitMapBackend::new(path, (PROFILE_WIDTH_PX, PROFILE_HEIGHT_PX)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "NESSA: Neutron Flux Profile Along Beamline",
            ("sans-serif", 26),
        )
        .margin(15)
        .x_label_area_size(55)
        .y_label_area_size(85)
        .build_cartesian_2d((x_min - 5.0)..(x_max + 5.0), (flux_min..flux_max).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Y position along beamline [cm]")
        .y_desc("Integrated neutron flux [1/cm²/source]")
        .x_label_formatter(&|value| format!("{:.0}", -value))
        .y_label_formatter(&|value| format!("{value:.0e}"))
        .label_style(("sans-serif", 18))
        .draw()?;

    if !mirrored.is_empty() {
        chart.draw_series(LineSeries::new(mirrored.clone(), RED.stroke_width(1)))?;
        chart.draw_series(PointSeries::of_element(
            mirrored.iter().copied(),
            4,
            &RED,
            &|center, size, style| Circle::new(center, size, style.filled()),
        ))?;
    }

    for (x, color, label) in reference_marks {
        chart
            .draw_series(DashedLineSeries::new(
                vec![(x, flux_min), (x, flux_max)],
                6,
                4,
                color.stroke_width(1),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::render_flux_profile;
    use crate::config::BeamlineConfig;
    use crate::domain::NormalizedSpectrum;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn spectrum(flux: f64) -> NormalizedSpectrum {
        NormalizedSpectrum {
            edges: vec![0.0, 1.0],
            contents: vec![flux],
            flux: vec![flux],
        }
    }

    #[test]
    fn profile_is_rendered_when_beamline_detectors_have_flux() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("NESSA_flux_profile.png");
        let config = BeamlineConfig::default();

        let mut results = BTreeMap::new();
        results.insert(0, spectrum(3.0e-5));
        results.insert(10, spectrum(8.0e-4));
        results.insert(19, spectrum(2.0e-3));

        let written =
            render_flux_profile(&path, &results, &config).expect("profile should render");
        assert!(written);

        let metadata = fs::metadata(&path).expect("plot file should exist");
        assert!(metadata.len() > 0);
    }

    #[test]
    fn monitor_detectors_alone_produce_no_profile() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("NESSA_flux_profile.png");
        let config = BeamlineConfig::default();

        // DtcIn1/DtcIn2 sit outside the beamline range and are excluded.
        let mut results = BTreeMap::new();
        results.insert(20, spectrum(1.0e-4));
        results.insert(21, spectrum(1.0e-4));

        let written =
            render_flux_profile(&path, &results, &config).expect("profile should no-op");
        assert!(!written);
        assert!(!path.exists());
    }
}
