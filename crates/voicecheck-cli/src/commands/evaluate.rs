//! The `voicecheck evaluate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use voicecheck_core::FeedbackReport;

pub fn execute(text: String, config_path: Option<PathBuf>, format: String) -> Result<()> {
    let (_, engine) = super::build_engine(config_path.as_deref())?;
    let report = engine.evaluate_text(text);
    tracing::debug!(cycle_id = %report.cycle_id, tier = ?report.tier, "evaluated text");

    match format.as_str() {
        "text" => {
            println!("{}", report.text);
            println!("\n{}", keyword_table(&report));
        }
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn keyword_table(report: &FeedbackReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Keyword", "Status"]);

    for keyword in &report.evaluation.matched_keywords {
        table.add_row(vec![Cell::new(keyword), Cell::new("found")]);
    }
    for keyword in &report.evaluation.missing_keywords {
        table.add_row(vec![Cell::new(keyword), Cell::new("missing")]);
    }

    table
}
