//! Interactive prompt session for collecting patient features
//!
//! Prompts for each of the eleven features in model order, re-prompting on
//! non-numeric or out-of-range input with the field-specific message.

use anyhow::{bail, Result};
use colored::Colorize;
use predictor_lib::{FeatureField, PatientFeatures, FEATURES, FEATURE_COUNT};
use std::io::{BufRead, Write};

use crate::output::format_range;

const BANNER_WIDTH: usize = 70;

/// Parse one input line for a field, validating against its range
pub fn parse_line(field: &FeatureField, line: &str) -> Result<f64, String> {
    let value: f64 = line
        .trim()
        .parse()
        .map_err(|_| "Invalid input! Please enter a numeric value.".to_string())?;

    field.validate(value).map_err(|_| {
        format!(
            "Value out of range! Please enter a value between {:.1} and {:.1}",
            field.min, field.max
        )
    })?;

    Ok(value)
}

/// Print the feature information banner
pub fn print_feature_info<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(writer, "HEART DISEASE PREDICTION SYSTEM")?;
    writeln!(writer, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(writer, "\nFeature Information:")?;
    writeln!(writer, "{}", "-".repeat(BANNER_WIDTH))?;
    for field in &FEATURES {
        writeln!(
            writer,
            "{:25} | Range: {}",
            field.label,
            format_range(field.min, field.max)
        )?;
    }
    writeln!(writer, "\n{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(writer, "Please enter patient information:")?;
    writeln!(writer, "{}", "=".repeat(BANNER_WIDTH))?;
    Ok(())
}

/// Collect all eleven features interactively
pub fn collect_features<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<PatientFeatures> {
    let mut values = [0.0; FEATURE_COUNT];

    for (i, field) in FEATURES.iter().enumerate() {
        writeln!(writer, "\n{}", field.label.bold())?;
        writeln!(writer, "  Description: {}", field.guidance)?;

        loop {
            write!(writer, "  Enter value: ")?;
            writer.flush()?;

            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                bail!("Input ended before all {} features were provided", FEATURE_COUNT);
            }

            match parse_line(field, &line) {
                Ok(value) => {
                    values[i] = value;
                    break;
                }
                Err(message) => {
                    writeln!(writer, "  {} {}", "⚠".yellow().bold(), message)?;
                }
            }
        }
    }

    Ok(PatientFeatures::from_vector(values))
}

/// Print the result block for a completed prediction
pub fn print_result<W: Write>(
    writer: &mut W,
    result_line: &str,
    confidence: &str,
    model_version: &str,
) -> std::io::Result<()> {
    writeln!(writer, "\n{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(writer, "PREDICTION RESULT")?;
    writeln!(writer, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(writer, "\n{}", result_line)?;
    writeln!(writer, "\nConfidence Score: {}", confidence)?;
    writeln!(writer, "Model Version: {}", model_version)?;
    writeln!(writer, "\n{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(
        writer,
        "Note: This prediction comes from a pre-trained SVM model."
    )?;
    writeln!(
        writer,
        "Please consult a medical professional for accurate diagnosis."
    )?;
    writeln!(writer, "{}", "=".repeat(BANNER_WIDTH))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use predictor_lib::schema::field_by_name;
    use std::io::Cursor;

    #[test]
    fn test_parse_line_valid() {
        let age = field_by_name("age").unwrap();
        assert_eq!(parse_line(age, "54\n"), Ok(54.0));
        assert_eq!(parse_line(age, "  54.5  "), Ok(54.5));
    }

    #[test]
    fn test_parse_line_non_numeric() {
        let age = field_by_name("age").unwrap();
        let err = parse_line(age, "fifty").unwrap_err();
        assert!(err.contains("numeric"));
    }

    #[test]
    fn test_parse_line_out_of_range() {
        let sex = field_by_name("sex").unwrap();
        let err = parse_line(sex, "2").unwrap_err();
        assert!(err.contains("between 0.0 and 1.0"));
    }

    #[test]
    fn test_parse_line_boundaries() {
        let thallium = field_by_name("thallium").unwrap();
        assert_eq!(parse_line(thallium, "0"), Ok(0.0));
        assert_eq!(parse_line(thallium, "7"), Ok(7.0));
        assert!(parse_line(thallium, "8").is_err());
    }

    #[test]
    fn test_collect_features_happy_path() {
        let input = "54\n1\n2\n240\n0\n150\n0\n1.2\n1\n0\n3\n";
        let mut reader = Cursor::new(input);
        let mut out = Vec::new();

        let features = collect_features(&mut reader, &mut out).unwrap();
        assert_eq!(features.age, 54.0);
        assert_eq!(features.cholesterol, 240.0);
        assert_eq!(features.thallium, 3.0);
    }

    #[test]
    fn test_collect_features_reprompts_on_bad_input() {
        // Bad age twice, then valid, then the remaining ten fields
        let input = "abc\n200\n54\n1\n2\n240\n0\n150\n0\n1.2\n1\n0\n3\n";
        let mut reader = Cursor::new(input);
        let mut out = Vec::new();

        let features = collect_features(&mut reader, &mut out).unwrap();
        assert_eq!(features.age, 54.0);

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Invalid input"));
        assert!(transcript.contains("out of range"));
    }

    #[test]
    fn test_collect_features_fails_on_eof() {
        let input = "54\n1\n";
        let mut reader = Cursor::new(input);
        let mut out = Vec::new();

        assert!(collect_features(&mut reader, &mut out).is_err());
    }

    #[test]
    fn test_feature_info_lists_all_fields() {
        let mut out = Vec::new();
        print_feature_info(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for field in &FEATURES {
            assert!(text.contains(field.label), "missing {}", field.label);
        }
    }
}
