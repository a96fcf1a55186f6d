//! Generic value comparison handler

use crate::cli::ValuesArgs;
use crate::config::Config;
use crate::error::{Error, ErrorContext, Result};
use crate::output::{format_value_compact, ComparisonReport, OutputWriter};
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;
use versa_core::{Value, ValueComparator};

/// Handle the values command
pub fn handle_values(args: ValuesArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let left_doc = load_operand(&args.left)?;
    let right_doc = load_operand(&args.right)?;

    let mut comparator_config = config.comparator;
    if let Some(max_depth) = args.max_depth {
        comparator_config.max_depth = max_depth;
    }
    let comparator = ValueComparator::with_config(comparator_config);

    let left_label = format_value_compact(&left_doc);
    let right_label = format_value_compact(&right_doc);
    let left = Value::from(left_doc);
    let right = Value::from(right_doc);

    let comparison = comparator.compare(&left, &right);
    let equal = comparator.equals(&left, &right);
    tracing::debug!(?comparison, equal, "Compared values");

    let report = ComparisonReport::new(left_label, right_label, comparison).with_equality(equal);
    output.comparison(&report)?;

    if comparison.is_none() && args.fail_incomparable {
        return Err(Error::Incomparable {
            left: report.left,
            right: report.right,
        });
    }
    Ok(())
}

/// Read an operand from a `.json`/`.yaml`/`.yml` file, or parse it as inline JSON
fn load_operand(operand: &str) -> Result<JsonValue> {
    let path = Path::new(operand);
    let extension = path.extension().and_then(|s| s.to_str());

    match extension {
        Some("json") | Some("yaml") | Some("yml") => {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Reading {}", path.display()))?;
            let is_yaml = extension != Some("json");

            if is_yaml {
                serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "YAML".to_string(),
                })
            } else {
                serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "JSON".to_string(),
                })
            }
        }
        _ => serde_json::from_str(operand).map_err(|_| {
            Error::invalid_args(format!(
                "'{}' is neither a .json/.yaml file nor inline JSON",
                operand
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::tests::writer;
    use tempfile::TempDir;

    fn args(left: &str, right: &str) -> ValuesArgs {
        ValuesArgs {
            left: left.to_string(),
            right: right.to_string(),
            fail_incomparable: false,
            max_depth: None,
        }
    }

    #[test]
    fn test_inline_values() {
        let (mut out, buffer) = writer(OutputFormat::Json);
        handle_values(args(r#"{"a": 1}"#, r#"{"b": 0}"#), &Config::default(), &mut out).unwrap();

        let parsed: JsonValue = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(parsed["relation"], "less");
        assert_eq!(parsed["result"], -1);
        assert_eq!(parsed["equal"], false);
    }

    #[test]
    fn test_files_in_both_formats() {
        let dir = TempDir::new().unwrap();
        let left = dir.path().join("left.json");
        let right = dir.path().join("right.yaml");
        fs::write(&left, r#"{"name": "pkg", "deps": [1, 2]}"#).unwrap();
        fs::write(&right, "name: pkg\ndeps:\n  - 1\n  - 2\n").unwrap();

        let (mut out, buffer) = writer(OutputFormat::Yaml);
        let args = args(left.to_str().unwrap(), right.to_str().unwrap());
        handle_values(args, &Config::default(), &mut out).unwrap();

        assert!(buffer.contents().contains("relation: equal"));
        assert!(buffer.contents().contains("equal: true"));
    }

    #[test]
    fn test_incomparable_reported_and_optionally_failed() {
        let (mut out, buffer) = writer(OutputFormat::Human);
        handle_values(args("true", "[1]"), &Config::default(), &mut out).unwrap();
        assert!(buffer.contents().contains("incomparable"));
        assert!(buffer.contents().contains("equal: yes"));

        let failing = ValuesArgs {
            fail_incomparable: true,
            ..args("true", "[1]")
        };
        let err = handle_values(failing, &Config::default(), &mut out).unwrap_err();
        assert!(matches!(err, Error::Incomparable { .. }));
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_depth_override() {
        let deep = "[[[[1]]]]";
        let (mut out, buffer) = writer(OutputFormat::Json);
        let shallow = ValuesArgs {
            max_depth: Some(2),
            ..args(deep, deep)
        };
        handle_values(shallow, &Config::default(), &mut out).unwrap();

        let parsed: JsonValue = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(parsed["relation"], "incomparable");
    }

    #[test]
    fn test_bad_operands() {
        assert!(matches!(
            load_operand("missing.json"),
            Err(Error::FileNotFound { .. })
        ));
        assert!(matches!(load_operand("not json"), Err(Error::InvalidArgs(_))));

        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.yaml");
        fs::write(&broken, "a: [unclosed").unwrap();
        assert!(matches!(
            load_operand(broken.to_str().unwrap()),
            Err(Error::InvalidFormat { .. })
        ));
    }
}
