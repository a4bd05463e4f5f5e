//! The seven-column metrics table shared by the PDF and the terminal output.

use core_types::ActorMetrics;

pub const HEADERS: [&str; 7] = [
    "Actor",
    "Buying Price",
    "Selling Price",
    "Gross Income",
    "Gross Margin (%)",
    "Added Value",
    "Value Share (%)",
];

/// Column widths in the PDF, in millimetres.
pub const COLUMN_WIDTHS_MM: [f32; 7] = [40.0, 25.0, 25.0, 25.0, 30.0, 25.0, 30.0];

/// Formats one metrics record as table cells. Percentages carry a `%` suffix.
pub fn row_cells(m: &ActorMetrics) -> [String; 7] {
    [
        m.name.clone(),
        m.cost.to_string(),
        m.revenue.to_string(),
        m.gross_income.to_string(),
        format!("{:.2}%", m.gross_margin_pct),
        format!("{:.2}", m.added_value),
        format!("{:.2}%", m.value_share_pct),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_percentages_with_two_places() {
        let m = ActorMetrics {
            name: "Processor".to_string(),
            cost: dec!(10),
            revenue: dec!(25),
            gross_income: dec!(15),
            gross_margin_pct: dec!(60),
            added_value: dec!(15),
            value_share_pct: dec!(37.5),
        };
        assert_eq!(
            row_cells(&m),
            ["Processor", "10", "25", "15", "60.00%", "15.00", "37.50%"].map(String::from)
        );
    }
}
