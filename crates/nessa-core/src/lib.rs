//! Core library for the NESSA Geant4 spectra post-processor.
//!
//! Converts per-detector energy histograms written by the beamline
//! simulation into normalized flux spectra and renders the diagnostic
//! plots. All processing is a single forward pass with no shared state
//! between detectors.

pub mod config;
pub mod domain;
pub mod modules;
pub mod pipeline;
pub mod plot;
