use super::CliError;

/// Parses the source-event count argument. Any float-parseable value is
/// accepted and truncated to a whole count of events, so `2.5e6` means
/// 2,500,000 primaries.
pub(super) fn parse_event_count(raw: &str) -> Result<f64, CliError> {
    let parsed: f64 = raw.trim().parse().map_err(|_| {
        CliError::Usage(format!(
            "invalid event count '{raw}'; expected a number such as 1000000 or 2.5e6"
        ))
    })?;

    let truncated = parsed.trunc();
    if !truncated.is_finite() || truncated < 1.0 {
        return Err(CliError::Usage(format!(
            "invalid event count '{raw}'; expected a positive number of source events"
        )));
    }

    Ok(truncated)
}

#[cfg(test)]
mod tests {
    use super::parse_event_count;
    use crate::cli::CliError;

    #[test]
    fn whole_and_float_counts_are_accepted() {
        assert_eq!(parse_event_count("1000000").expect("integer count"), 1.0e6);
        assert_eq!(parse_event_count("2.5e6").expect("float count"), 2.5e6);
        assert_eq!(parse_event_count(" 42 ").expect("padded count"), 42.0);
    }

    #[test]
    fn fractional_counts_are_truncated() {
        assert_eq!(parse_event_count("99.9").expect("fractional count"), 99.0);
    }

    #[test]
    fn non_numeric_and_non_positive_counts_are_usage_errors() {
        for raw in ["many", "", "0", "-5", "0.4", "nan", "inf"] {
            let error = parse_event_count(raw).expect_err("count should be rejected");
            assert!(matches!(error, CliError::Usage(_)), "raw input: {raw:?}");
        }
    }
}
