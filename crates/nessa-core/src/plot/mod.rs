//! Diagnostic plot rendering.

mod profile;
mod spectra;

pub use profile::render_flux_profile;
pub use spectra::render_spectrum_grid;
