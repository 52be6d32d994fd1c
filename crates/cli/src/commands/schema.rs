//! Feature schema command

use anyhow::Result;
use predictor_lib::FEATURES;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::output::{format_range, OutputFormat};

/// Row for the feature schema table
#[derive(Tabled, Serialize)]
struct FeatureRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Print the feature schema
pub fn run(format: OutputFormat) -> Result<()> {
    let rows: Vec<FeatureRow> = FEATURES
        .iter()
        .map(|f| FeatureRow {
            field: f.name.to_string(),
            range: format_range(f.min, f.max),
            description: f.guidance.to_string(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{}", table);
            println!("\nTotal: {} features", rows.len());
        }
    }

    Ok(())
}
