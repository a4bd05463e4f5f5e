use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The derived economic metrics for one actor in the chain.
///
/// This struct is the output of the metric calculator and the data transfer
/// object consumed by the table, chart, recommendation and report layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorMetrics {
    pub name: String,
    /// Buying price, copied from the input actor.
    pub cost: Decimal,
    /// Selling price, copied from the input actor.
    pub revenue: Decimal,

    // I. Actor-level profitability
    pub gross_income: Decimal,
    pub gross_margin_pct: Decimal, // Zero when the actor sells at zero

    // II. Position within the chain
    pub added_value: Decimal,
    pub value_share_pct: Decimal, // Zero when the retail price is zero
}
