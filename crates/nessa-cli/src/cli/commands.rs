use super::helpers::parse_event_count;
use super::{Cli, CliError};
use nessa_core::config::{
    BeamlineConfig, DEFAULT_EVENT_COUNT, HIST_PATTERN_PRIMARY, NTUPLE_FILE_NAME,
    PROFILE_PLOT_FILE_NAME, SPECTRA_PLOT_FILE_NAME,
};
use nessa_core::modules::ntuple::{read_ntuple_file, summarize_hits};
use nessa_core::modules::writer::write_normalized_spectra;
use nessa_core::pipeline::{analyze_histograms, discover_histogram_files};
use nessa_core::plot::{render_flux_profile, render_spectrum_grid};
use std::path::Path;

pub(super) fn run_analyze_command(cli: Cli) -> Result<i32, CliError> {
    let event_count = match cli.events.as_deref() {
        Some(raw) => parse_event_count(raw)?,
        None => DEFAULT_EVENT_COUNT,
    };
    let work_dir = cli.work_dir;
    let config = BeamlineConfig::default();

    println!("{}", "=".repeat(70));
    println!("NESSA Geant4 Simulation Post-Processing");
    println!("{}", "=".repeat(70));

    let discovered = discover_histogram_files(&work_dir).map_err(CliError::Analysis)?;
    if discovered.used_fallback_pattern {
        println!("No histogram CSV files found ({HIST_PATTERN_PRIMARY})");
        println!("Looking for alternative naming...");
    }

    if discovered.files.is_empty() {
        println!();
        println!("ERROR: No output files found!");
        println!("Run the simulation first: ./nessa_sim macros/run.mac");
        println!();
        println!("Alternatively, process the ntuple directly...");

        let ntuple_path = work_dir.join(NTUPLE_FILE_NAME);
        if ntuple_path.exists() {
            println!("Found ntuple: {NTUPLE_FILE_NAME}");
            return run_ntuple_fallback(&ntuple_path, &config);
        }
        return Ok(0);
    }

    println!();
    println!("Number of source events: {event_count:.2e}");
    println!("Detector volume: {:.4} cm³", config.detector_volume_cm3());
    println!("Found {} histogram files", discovered.files.len());
    println!();

    let outcome =
        analyze_histograms(&discovered.files, &config, event_count).map_err(CliError::Analysis)?;
    tracing::debug!(
        detectors = outcome.results.len(),
        flagged = outcome.flagged_detectors,
        discarded_lines = outcome.discarded_lines,
        "analysis pass complete"
    );
    for report in &outcome.reports {
        println!(
            "  {}: {} bins, integrated flux = {:.3e} 1/cm²/source",
            report.detector_name, report.bin_count, report.integrated_flux
        );
    }

    if outcome.is_empty() {
        println!();
        println!("No valid histogram data found.");
        return Ok(0);
    }

    let spectra_path = work_dir.join(SPECTRA_PLOT_FILE_NAME);
    render_spectrum_grid(&spectra_path, &outcome.results, &config, event_count)
        .map_err(CliError::Analysis)?;
    println!("Spectra plot saved: {}", spectra_path.display());

    let profile_path = work_dir.join(PROFILE_PLOT_FILE_NAME);
    let profile_written =
        render_flux_profile(&profile_path, &outcome.results, &config).map_err(CliError::Analysis)?;
    if profile_written {
        println!("Flux profile plot saved: {}", profile_path.display());
    }

    write_normalized_spectra(&work_dir, &outcome.results, &config, event_count)
        .map_err(CliError::Analysis)?;
    println!();
    println!("Normalized spectra saved as nspect_*_normalized.dat");

    Ok(0)
}

fn run_ntuple_fallback(ntuple_path: &Path, config: &BeamlineConfig) -> Result<i32, CliError> {
    println!();
    println!("Processing ntuple: {}", ntuple_path.display());

    let hits = read_ntuple_file(ntuple_path).map_err(CliError::Analysis)?;
    println!("Total hits: {}", hits.len());

    for summary in summarize_hits(&hits, config) {
        println!(
            "  {}: {} hits, E range: {:.4e} - {:.4e} MeV",
            summary.detector_name,
            summary.hit_count,
            summary.energy_min_mev,
            summary.energy_max_mev
        );
    }

    Ok(0)
}
