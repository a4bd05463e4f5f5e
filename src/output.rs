use analytics::ValueChainReport;
use analyzer::{ALL_CLEAR_MESSAGE, Recommendation};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use report::table::{HEADERS, row_cells};
use serde::Serialize;

/// Builds the terminal version of the seven-column metrics table.
pub fn metrics_table(analysis: &ValueChainReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(HEADERS.iter().map(|h| Cell::new(h).add_attribute(Attribute::Bold)));

    for m in &analysis.metrics {
        table.add_row(row_cells(m));
    }
    // Everything but the actor name is numeric.
    for index in 1..HEADERS.len() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

/// One-line description of the chain as a whole.
pub fn summary_line(analysis: &ValueChainReport) -> String {
    let s = &analysis.summary;
    let title = analysis.title.as_deref().unwrap_or("Value chain");
    match (s.farm_gate_price, s.retail_price) {
        (Some(farm_gate), Some(retail)) => format!(
            "{}: {} actors, farm-gate price {}, retail price {}, total added value {}",
            title, s.actor_count, farm_gate, retail, s.total_added_value
        ),
        _ => format!("{}: no actors", title),
    }
}

/// Prints the table, the summary and the recommendations to stdout.
pub fn print_analysis(analysis: &ValueChainReport, recommendations: &[Recommendation]) {
    println!("{}", metrics_table(analysis));
    println!("{}", summary_line(analysis));
    println!();
    println!("Recommendations:");
    if recommendations.is_empty() {
        println!("  {}", ALL_CLEAR_MESSAGE);
    }
    for rec in recommendations {
        println!("  - {}", rec);
    }
}

#[derive(Serialize)]
struct JsonRecommendation<'a> {
    #[serde(flatten)]
    recommendation: &'a Recommendation,
    message: String,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    analysis: &'a ValueChainReport,
    recommendations: Vec<JsonRecommendation<'a>>,
}

/// Serializes the analysis and its recommendations as pretty JSON.
pub fn to_json(analysis: &ValueChainReport, recommendations: &[Recommendation]) -> serde_json::Result<String> {
    let output = JsonOutput {
        analysis,
        recommendations: recommendations
            .iter()
            .map(|r| JsonRecommendation {
                recommendation: r,
                message: r.to_string(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output)
}
