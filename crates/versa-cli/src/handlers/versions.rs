//! Version command handlers: parse, compare and sort

use crate::cli::{CompareArgs, ParseArgs, SortArgs};
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{ComparisonReport, OutputWriter, SortReport, VersionReport};
use versa_core::versioning::{parse_all, sort_versions};
use versa_core::{ParseMode, Version};

/// `--strict` wins over the configured mode
fn parse_mode(strict: bool, config: &Config) -> ParseMode {
    if strict {
        ParseMode::Strict
    } else {
        config.parsing.mode
    }
}

/// Handle the parse command
pub fn handle_parse(args: ParseArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let mode = parse_mode(args.strict, config);
    tracing::debug!(count = args.versions.len(), ?mode, "Parsing versions");

    let reports = args
        .versions
        .iter()
        .map(|text| Version::parse_with(text, mode).map(|version| VersionReport::new(text, &version)))
        .collect::<versa_core::Result<Vec<_>>>()?;

    output.versions(&reports)
}

/// Handle the compare command
pub fn handle_compare(args: CompareArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let mode = parse_mode(args.strict, config);
    let left = Version::parse_with(&args.left, mode)?;
    let right = Version::parse_with(&args.right, mode)?;

    let ordering = Version::compare(&left, &right);
    tracing::debug!(%left, %right, ?ordering, "Compared versions");

    // Inputs, not renderings: `1.2.0.5` renders as `1.2`
    let report = ComparisonReport::new(args.left, args.right, Some(ordering));
    output.comparison(&report)
}

/// Handle the sort command
pub fn handle_sort(args: SortArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("sort", &format!("{} versions", args.versions.len()));
    let mode = parse_mode(args.strict, config);

    let mut versions = parse_all(args.versions.iter().map(String::as_str), mode)?;
    sort_versions(&mut versions);
    if args.reverse {
        versions.reverse();
    }
    tracing::debug!(elapsed_us = timer.elapsed().as_micros() as u64, "Sorted versions");

    let report = SortReport {
        versions: versions.iter().map(Version::to_string).collect(),
        reverse: args.reverse,
    };
    output.sorted(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::config::ConfigBuilder;
    use crate::error::Error;
    use crate::output::tests::writer;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_reports_components() {
        let (mut out, buffer) = writer(OutputFormat::Json);
        let args = ParseArgs {
            versions: strings(&["1.2.0.5", "3.4.5"]),
            strict: false,
        };
        handle_parse(args, &Config::default(), &mut out).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(parsed[0]["version"], "1.2");
        assert_eq!(parsed[1]["build"], 5);
        assert_eq!(parsed[1]["revision"], serde_json::Value::Null);
    }

    #[test]
    fn test_parse_mode_from_flag_and_config() {
        let lenient = Config::default();
        let strict = ConfigBuilder::new().parse_mode(ParseMode::Strict).build();

        let (mut out, _) = writer(OutputFormat::Human);
        let args = || ParseArgs {
            versions: strings(&["v1.2"]),
            strict: false,
        };
        assert!(handle_parse(args(), &lenient, &mut out).is_ok());
        assert!(matches!(
            handle_parse(args(), &strict, &mut out),
            Err(Error::Core(_))
        ));

        let flagged = ParseArgs { strict: true, ..args() };
        assert!(handle_parse(flagged, &lenient, &mut out).is_err());
    }

    #[test]
    fn test_compare_human() {
        let (mut out, buffer) = writer(OutputFormat::Human);
        let args = CompareArgs {
            left: "2.10.3".into(),
            right: "2.9.99".into(),
            strict: false,
        };
        handle_compare(args, &Config::default(), &mut out).unwrap();
        assert_eq!(buffer.contents(), "2.10.3 > 2.9.99  (1)\n");
    }

    #[test]
    fn test_compare_labels_with_inputs() {
        let (mut out, buffer) = writer(OutputFormat::Human);
        let args = CompareArgs {
            left: "1.2.0.5".into(),
            right: "1.2.0.6".into(),
            strict: false,
        };
        handle_compare(args, &Config::default(), &mut out).unwrap();
        assert_eq!(buffer.contents(), "1.2.0.5 < 1.2.0.6  (-1)\n");

        let (mut out, buffer) = writer(OutputFormat::Json);
        let args = CompareArgs {
            left: "1.0".into(),
            right: "1.0.0".into(),
            strict: false,
        };
        handle_compare(args, &Config::default(), &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(parsed["left"], "1.0");
        assert_eq!(parsed["right"], "1.0.0");
        assert_eq!(parsed["relation"], "less");
    }

    #[test]
    fn test_compare_rejects_bad_segment_count() {
        let (mut out, _) = writer(OutputFormat::Human);
        let args = CompareArgs {
            left: "1".into(),
            right: "1.0".into(),
            strict: false,
        };
        let err = handle_compare(args, &Config::default(), &mut out).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_sort_ascending_and_reverse() {
        let (mut out, buffer) = writer(OutputFormat::Human);
        let args = SortArgs {
            versions: strings(&["1.2", "1.0", "1.2.1", "1.10"]),
            reverse: false,
            strict: false,
        };
        handle_sort(args, &Config::default(), &mut out).unwrap();
        assert_eq!(buffer.contents(), "1.0\n1.2\n1.2.1\n1.10\n");

        let (mut out, buffer) = writer(OutputFormat::Json);
        let args = SortArgs {
            versions: strings(&["1.2", "1.0", "1.2.1"]),
            reverse: true,
            strict: false,
        };
        handle_sort(args, &Config::default(), &mut out).unwrap();
        assert_eq!(
            buffer.contents().trim_end(),
            r#"{"versions":["1.2.1","1.2","1.0"],"reverse":true}"#
        );
    }
}
