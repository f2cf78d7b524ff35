use crate::config::{HIST_PATTERN_FALLBACK, HIST_PATTERN_PRIMARY};
use crate::domain::{AnalysisResult, NessaError};
use globset::Glob;
use std::fs;
use std::path::{Path, PathBuf};

/// Histogram files found in the work directory, sorted by file name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscoveredHistograms {
    pub files: Vec<PathBuf>,
    /// The primary `NESSA_spectra_h1_*.csv` pattern matched nothing and
    /// the looser fallback pattern was consulted.
    pub used_fallback_pattern: bool,
}

pub fn discover_histogram_files(work_dir: &Path) -> AnalysisResult<DiscoveredHistograms> {
    let file_names = list_file_names(work_dir)?;

    let primary = match_pattern(&file_names, HIST_PATTERN_PRIMARY)?;
    if !primary.is_empty() {
        return Ok(DiscoveredHistograms {
            files: to_paths(work_dir, primary),
            used_fallback_pattern: false,
        });
    }

    let fallback = match_pattern(&file_names, HIST_PATTERN_FALLBACK)?;
    Ok(DiscoveredHistograms {
        files: to_paths(work_dir, fallback),
        used_fallback_pattern: true,
    })
}

fn list_file_names(work_dir: &Path) -> AnalysisResult<Vec<String>> {
    let entries = fs::read_dir(work_dir).map_err(|source| {
        NessaError::io_system(
            "IO.WORK_DIR_SCAN",
            format!(
                "failed to scan work directory '{}': {}",
                work_dir.display(),
                source
            ),
        )
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| {
            NessaError::io_system(
                "IO.WORK_DIR_SCAN",
                format!(
                    "failed to scan work directory '{}': {}",
                    work_dir.display(),
                    source
                ),
            )
        })?;
        let is_file = entry
            .file_type()
            .map(|file_type| file_type.is_file())
            .unwrap_or(false);
        if is_file {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names)
}

fn match_pattern(file_names: &[String], pattern: &str) -> AnalysisResult<Vec<String>> {
    let matcher = Glob::new(pattern)
        .map_err(|source| {
            NessaError::internal(
                "INTERNAL.HIST_PATTERN",
                format!("invalid histogram pattern '{pattern}': {source}"),
            )
        })?
        .compile_matcher();

    Ok(file_names
        .iter()
        .filter(|name| matcher.is_match(Path::new(name)))
        .cloned()
        .collect())
}

fn to_paths(work_dir: &Path, file_names: Vec<String>) -> Vec<PathBuf> {
    file_names
        .into_iter()
        .map(|name| work_dir.join(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::discover_histogram_files;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &std::path::Path, name: &str) {
        fs::write(dir.join(name), "# empty\n").expect("fixture should be staged");
    }

    #[test]
    fn primary_pattern_matches_are_sorted_by_file_name() {
        let temp = TempDir::new().expect("tempdir should be created");
        touch(temp.path(), "NESSA_spectra_h1_Dtctr2.csv");
        touch(temp.path(), "NESSA_spectra_h1_Dtctr1.csv");
        touch(temp.path(), "NESSA_spectra_nt_Hits.csv");
        touch(temp.path(), "unrelated.txt");

        let discovered =
            discover_histogram_files(temp.path()).expect("discovery should succeed");

        assert!(!discovered.used_fallback_pattern);
        let names: Vec<_> = discovered
            .files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "NESSA_spectra_h1_Dtctr1.csv".to_string(),
                "NESSA_spectra_h1_Dtctr2.csv".to_string(),
            ]
        );
    }

    #[test]
    fn fallback_pattern_is_consulted_when_primary_matches_nothing() {
        let temp = TempDir::new().expect("tempdir should be created");
        touch(temp.path(), "NESSA_spectra_run2_h1_Dtctr1.csv");

        let discovered =
            discover_histogram_files(temp.path()).expect("discovery should succeed");

        assert!(discovered.used_fallback_pattern);
        assert_eq!(discovered.files.len(), 1);
    }

    #[test]
    fn empty_directory_discovers_nothing() {
        let temp = TempDir::new().expect("tempdir should be created");
        let discovered =
            discover_histogram_files(temp.path()).expect("discovery should succeed");
        assert!(discovered.files.is_empty());
        assert!(discovered.used_fallback_pattern);
    }

    #[test]
    fn missing_directory_is_a_fatal_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = discover_histogram_files(&temp.path().join("absent"))
            .expect_err("missing directory should fail");
        assert_eq!(error.placeholder(), "IO.WORK_DIR_SCAN");
    }
}
