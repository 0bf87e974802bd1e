//! `rootfix rules` - show the effective rewrite rules

use anyhow::Result;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::config::CliConfig;

/// Table-friendly rule row
#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Matched statement")]
    search: String,
}

/// JSON rule entry
#[derive(Debug, Serialize)]
struct RuleReport {
    from: String,
    to: String,
    search: String,
    replacement: String,
}

/// Execute rules command
pub fn execute(config: CliConfig, format: String) -> Result<()> {
    let rewrites = config.rewrites()?;

    if format.to_lowercase() == "json" {
        let reports: Vec<RuleReport> = rewrites
            .iter()
            .map(|r| RuleReport {
                from: r.source().to_string(),
                to: r.target().to_string(),
                search: r.search_stmt(),
                replacement: r.target_stmt(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        let rows: Vec<RuleRow> = rewrites
            .iter()
            .map(|r| RuleRow {
                from: r.source().to_string(),
                to: r.target().to_string(),
                search: r.search_stmt().trim_end().to_string(),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::modern()));
    }

    Ok(())
}
