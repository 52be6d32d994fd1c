//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Color the result line: a positive label is the alarming one
pub fn color_result(label: u8, text: &str) -> String {
    if label == 1 {
        format!("{} {}", "⚠".red().bold(), text.red().bold())
    } else {
        format!("{} {}", "✓".green().bold(), text.green().bold())
    }
}

/// Format a confidence score the way the prediction service reports it
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.4}", confidence)
}

/// Format an inclusive range for display
pub fn format_range(min: f64, max: f64) -> String {
    format!("{:.1} - {:.1}", min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(1.23456), "1.2346");
        assert_eq!(format_confidence(0.0), "0.0000");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(0.0, 120.0), "0.0 - 120.0");
    }

    #[test]
    fn test_color_result_carries_text() {
        assert!(color_result(1, "Heart Disease Detected").contains("Heart Disease Detected"));
        assert!(color_result(0, "No Heart Disease Detected").contains("No Heart Disease Detected"));
    }
}
