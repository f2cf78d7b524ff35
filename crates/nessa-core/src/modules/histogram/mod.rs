mod parser;

use crate::domain::{AnalysisResult, NessaError, ParsedHistogram};
use std::fs;
use std::path::Path;

/// Reads one detector's Geant4 CSV histogram.
///
/// A missing or unreadable file is fatal; malformed lines inside a
/// readable file are skipped by the parser and reported through
/// [`ParsedHistogram::discarded_lines`].
pub fn read_histogram_file(path: &Path) -> AnalysisResult<ParsedHistogram> {
    let source = fs::read_to_string(path).map_err(|source| {
        NessaError::io_system(
            "IO.HIST_READ",
            format!(
                "failed to read histogram file '{}': {}",
                path.display(),
                source
            ),
        )
    })?;

    Ok(parser::parse_histogram_source(&source))
}
