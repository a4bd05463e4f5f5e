use core_types::ActorMetrics;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The complete result of analysing one value chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueChainReport {
    pub title: Option<String>,
    /// One entry per input actor, in chain order.
    pub metrics: Vec<ActorMetrics>,
    pub summary: ChainSummary,
}

/// Chain-level figures derived from the same pass as the per-actor metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSummary {
    pub actor_count: usize,
    /// Selling price of the last actor. `None` for an empty chain.
    pub retail_price: Option<Decimal>,
    /// Selling price of the first actor. `None` for an empty chain.
    pub farm_gate_price: Option<Decimal>,
    pub total_gross_income: Decimal,
    pub total_added_value: Decimal,
}

impl ChainSummary {
    /// Creates a zeroed-out summary, which is also the summary of an empty chain.
    pub fn new() -> Self {
        Self {
            actor_count: 0,
            retail_price: None,
            farm_gate_price: None,
            total_gross_income: Decimal::ZERO,
            total_added_value: Decimal::ZERO,
        }
    }
}

impl Default for ChainSummary {
    fn default() -> Self {
        Self::new()
    }
}
