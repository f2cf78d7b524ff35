use crate::domain::{Histogram, ParsedHistogram};

/// Best-effort filter over Geant4 CSV histogram text.
///
/// Data lines are `binLowEdge,binContent,binError`. Comment lines (`#`),
/// axis-label lines (leading `,`), and blank lines are skipped without
/// counting; an unparseable line is discarded and counted. A lone
/// numeric field is the final upper bin boundary, giving the
/// `n_bins + 1` edge layout.
pub(super) fn parse_histogram_source(source: &str) -> ParsedHistogram {
    let mut histogram = Histogram::default();
    let mut discarded_lines = 0;

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(',') {
            continue;
        }

        if !line.contains(',') {
            match parse_field(line) {
                Some(edge) => histogram.edges.push(edge),
                None => discarded_lines += 1,
            }
            continue;
        }

        match parse_data_line(line) {
            Some((edge, content, error)) => {
                histogram.edges.push(edge);
                histogram.contents.push(content);
                histogram.errors.push(error);
            }
            None => discarded_lines += 1,
        }
    }

    ParsedHistogram {
        histogram,
        discarded_lines,
    }
}

fn parse_data_line(line: &str) -> Option<(f64, f64, f64)> {
    let mut fields = line.split(',');
    let edge = parse_field(fields.next()?)?;
    let content = parse_field(fields.next()?)?;
    let error = parse_field(fields.next()?)?;
    Some((edge, content, error))
}

fn parse_field(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_histogram_source;

    #[test]
    fn well_formed_lines_fill_all_three_sequences() {
        let parsed = parse_histogram_source(
            "# class tools::histo::h1d\n\
             1.0e-9,0.0,0.0\n\
             1.0e-8,12.5,0.3\n\
             1.0e-7,40.0,1.1\n",
        );

        assert_eq!(parsed.histogram.edges, vec![1.0e-9, 1.0e-8, 1.0e-7]);
        assert_eq!(parsed.histogram.contents, vec![0.0, 12.5, 40.0]);
        assert_eq!(parsed.histogram.errors, vec![0.0, 0.3, 1.1]);
        assert_eq!(parsed.discarded_lines, 0);
    }

    #[test]
    fn comment_axis_and_blank_lines_are_skipped_without_counting() {
        let parsed = parse_histogram_source(
            "# title Dtctr1\n\
             ,entries,Sw\n\
             \n\
             0.5,3.0,0.1\n",
        );

        assert_eq!(parsed.histogram.bin_count(), 1);
        assert_eq!(parsed.discarded_lines, 0);
    }

    #[test]
    fn malformed_lines_are_discarded_and_counted() {
        let parsed = parse_histogram_source(
            "0.5,3.0,0.1\n\
             not-a-number,3.0,0.1\n\
             1.5,4.0\n\
             2.5,5.0,nan-ish,extra\n",
        );

        // The third field of the last line fails to parse as f64.
        assert_eq!(parsed.histogram.edges, vec![0.5]);
        assert_eq!(parsed.discarded_lines, 3);
    }

    #[test]
    fn trailing_fields_beyond_three_are_ignored() {
        let parsed = parse_histogram_source("0.5,3.0,0.1,999\n");
        assert_eq!(parsed.histogram.edges, vec![0.5]);
        assert_eq!(parsed.histogram.contents, vec![3.0]);
        assert_eq!(parsed.histogram.errors, vec![0.1]);
        assert_eq!(parsed.discarded_lines, 0);
    }

    #[test]
    fn lone_trailing_field_closes_the_final_bin() {
        let parsed = parse_histogram_source(
            "0.0,10.0,0.5\n\
             1.0,20.0,0.8\n\
             2.0\n",
        );

        assert_eq!(parsed.histogram.edges, vec![0.0, 1.0, 2.0]);
        assert_eq!(parsed.histogram.contents, vec![10.0, 20.0]);
        assert_eq!(parsed.discarded_lines, 0);
    }

    #[test]
    fn comment_only_source_yields_empty_sequences() {
        let parsed = parse_histogram_source("# header\n# more header\n\n,label\n");
        assert!(parsed.histogram.is_empty());
        assert!(parsed.histogram.edges.is_empty());
        assert!(parsed.histogram.errors.is_empty());
        assert_eq!(parsed.discarded_lines, 0);
    }
}
