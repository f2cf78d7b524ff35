//! Fixed NESSA beamline configuration.
//!
//! The detector array is defined statically by the simulation geometry:
//! 20 beamline detectors spaced along the collimator axis plus two
//! monitor detectors near the source and off-axis. Components receive
//! this table explicitly rather than reading ambient globals.

use std::f64::consts::PI;

pub const DETECTOR_COUNT: usize = 22;
pub const BEAMLINE_DETECTOR_COUNT: usize = 20;

pub const DET_RADIUS_CM: f64 = 1.0;
pub const DET_HEIGHT_CM: f64 = 1.0;

pub const DEFAULT_EVENT_COUNT: f64 = 1.0e6;

pub const HIST_PATTERN_PRIMARY: &str = "NESSA_spectra_h1_*.csv";
pub const HIST_PATTERN_FALLBACK: &str = "NESSA_spectra*h1*.csv";
pub const NTUPLE_FILE_NAME: &str = "NESSA_spectra_nt_Hits.csv";

pub const SPECTRA_PLOT_FILE_NAME: &str = "NESSA_neutron_spectra.png";
pub const PROFILE_PLOT_FILE_NAME: &str = "NESSA_flux_profile.png";

pub const COLLIMATOR_WALL_Y_CM: f64 = -115.0;
pub const COLLIMATOR_EXIT_Y_CM: f64 = -75.0;

pub const DETECTOR_NAMES: [&str; DETECTOR_COUNT] = [
    "Dtctr1", "Dtctr2", "Dtctr3", "Dtctr4", "Dtctr5", "Dtctr6", "Dtctr7", "Dtctr8", "Dtctr9",
    "Dtctr10", "Dtctr11", "Dtctr12", "Dtctr13", "Dtctr14", "Dtctr15", "Dtctr16", "Dtctr17",
    "Dtctr18", "Dtctr19", "Dtctr20", "DtcIn1", "DtcIn2",
];

pub const DETECTOR_Y_POSITIONS_CM: [f64; DETECTOR_COUNT] = [
    -110.0, -105.0, -100.0, -95.0, -90.0, -85.0, -80.0, -74.5, -70.0, -65.0, -60.0, -55.0, -50.0,
    -45.0, -40.0, -35.0, -30.0, -25.0, -20.0, -15.0, -150.0, -170.0,
];

/// One panel of the fixed 2x3 spectrum figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrumPanel {
    pub detector_index: usize,
    pub label: &'static str,
}

pub const SPECTRUM_PANELS: [SpectrumPanel; 6] = [
    SpectrumPanel {
        detector_index: 0,
        label: "Dtctr1 (post-collimator, y=-110)",
    },
    SpectrumPanel {
        detector_index: 4,
        label: "Dtctr5 (y=-90)",
    },
    SpectrumPanel {
        detector_index: 9,
        label: "Dtctr10 (y=-65)",
    },
    SpectrumPanel {
        detector_index: 14,
        label: "Dtctr15 (y=-40)",
    },
    SpectrumPanel {
        detector_index: 20,
        label: "DtcIn1 (near source, y=-150)",
    },
    SpectrumPanel {
        detector_index: 21,
        label: "DtcIn2 (off-axis, y=-170)",
    },
];

/// Immutable beamline geometry table passed explicitly to the pipeline,
/// writer, and plot renderers.
#[derive(Debug, Clone)]
pub struct BeamlineConfig {
    detector_names: &'static [&'static str; DETECTOR_COUNT],
    detector_y_cm: &'static [f64; DETECTOR_COUNT],
    detector_radius_cm: f64,
    detector_height_cm: f64,
}

impl Default for BeamlineConfig {
    fn default() -> Self {
        Self {
            detector_names: &DETECTOR_NAMES,
            detector_y_cm: &DETECTOR_Y_POSITIONS_CM,
            detector_radius_cm: DET_RADIUS_CM,
            detector_height_cm: DET_HEIGHT_CM,
        }
    }
}

impl BeamlineConfig {
    pub fn detector_count(&self) -> usize {
        self.detector_names.len()
    }

    pub fn beamline_detector_count(&self) -> usize {
        BEAMLINE_DETECTOR_COUNT
    }

    pub fn detector_name(&self, index: usize) -> Option<&'static str> {
        self.detector_names.get(index).copied()
    }

    pub fn detector_y_cm(&self, index: usize) -> Option<f64> {
        self.detector_y_cm.get(index).copied()
    }

    pub fn detector_volume_cm3(&self) -> f64 {
        PI * self.detector_radius_cm * self.detector_radius_cm * self.detector_height_cm
    }

    pub fn spectrum_panels(&self) -> &'static [SpectrumPanel; 6] {
        &SPECTRUM_PANELS
    }
}

pub fn spectrum_output_name(detector_name: &str) -> String {
    format!("nspect_{detector_name}_normalized.dat")
}

#[cfg(test)]
mod tests {
    use super::{
        BEAMLINE_DETECTOR_COUNT, BeamlineConfig, DETECTOR_COUNT, DETECTOR_NAMES,
        DETECTOR_Y_POSITIONS_CM, SPECTRUM_PANELS, spectrum_output_name,
    };

    #[test]
    fn table_lengths_match_detector_count() {
        assert_eq!(DETECTOR_NAMES.len(), DETECTOR_COUNT);
        assert_eq!(DETECTOR_Y_POSITIONS_CM.len(), DETECTOR_COUNT);
        assert!(BEAMLINE_DETECTOR_COUNT < DETECTOR_COUNT);
    }

    #[test]
    fn detector_volume_matches_unit_cylinder() {
        let config = BeamlineConfig::default();
        assert!((config.detector_volume_cm3() - std::f64::consts::PI).abs() <= 1.0e-12);
    }

    #[test]
    fn beamline_detectors_precede_monitor_detectors() {
        let config = BeamlineConfig::default();
        assert_eq!(config.detector_name(0), Some("Dtctr1"));
        assert_eq!(config.detector_name(19), Some("Dtctr20"));
        assert_eq!(config.detector_name(20), Some("DtcIn1"));
        assert_eq!(config.detector_name(21), Some("DtcIn2"));
        assert_eq!(config.detector_name(22), None);
        assert_eq!(config.detector_y_cm(0), Some(-110.0));
        assert_eq!(config.detector_y_cm(21), Some(-170.0));
    }

    #[test]
    fn spectrum_panels_reference_configured_detectors() {
        for panel in &SPECTRUM_PANELS {
            assert!(panel.detector_index < DETECTOR_COUNT);
            let name = DETECTOR_NAMES[panel.detector_index];
            assert!(panel.label.starts_with(name));
        }
    }

    #[test]
    fn spectrum_output_name_follows_convention() {
        assert_eq!(
            spectrum_output_name("Dtctr7"),
            "nspect_Dtctr7_normalized.dat"
        );
    }
}
