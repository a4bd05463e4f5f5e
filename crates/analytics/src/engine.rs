use crate::report::{ChainSummary, ValueChainReport};
use core_types::{Actor, ActorMetrics, ValueChain};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// Number of decimal places kept on the rounded metrics.
const METRIC_DP: u32 = 2;

/// Computes the per-actor metrics for an ordered chain of actors.
///
/// The retail price is the selling price of the last actor. For an empty chain
/// it falls back to one, which only matters as a divisor and produces an
/// empty result anyway. Percentages whose divisor is zero are reported as zero.
///
/// Never panics: a result that would overflow `Decimal` saturates at
/// `Decimal::MAX` or `Decimal::MIN`. Amounts accepted by the input layer
/// (see `core_types::check_amount`) never get that far.
///
/// The output has exactly one entry per actor, in the same order.
pub fn compute_metrics(actors: &[Actor]) -> Vec<ActorMetrics> {
    let retail_price = actors.last().map_or(Decimal::ONE, |a| a.revenue);

    let mut prev_revenue = Decimal::ZERO;
    let mut metrics = Vec::with_capacity(actors.len());

    for actor in actors {
        let gross_income = actor.revenue.saturating_sub(actor.cost);
        let gross_margin = percentage(gross_income, actor.revenue);
        let added_value = actor.revenue.saturating_sub(prev_revenue);
        let value_share = percentage(added_value, retail_price);

        metrics.push(ActorMetrics {
            name: actor.name.clone(),
            cost: actor.cost,
            revenue: actor.revenue,
            gross_income,
            gross_margin_pct: round2(gross_margin),
            added_value: round2(added_value),
            value_share_pct: round2(value_share),
        });

        prev_revenue = actor.revenue;
    }

    metrics
}

/// `part / whole * 100`, or zero when `whole` is zero. Saturates on overflow.
fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(dec!(100)),
        None if part.is_sign_negative() != whole.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(METRIC_DP, RoundingStrategy::MidpointNearestEven)
}

fn saturating_total(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |total, v| total.saturating_add(v))
}

/// A stateless calculator for deriving value chain metrics.
#[derive(Debug, Default)]
pub struct ValueChainEngine {}

impl ValueChainEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for analysing a value chain.
    ///
    /// # Arguments
    ///
    /// * `chain` - The ordered actors, farm-gate first and final retail last.
    ///
    /// # Returns
    ///
    /// A `ValueChainReport` holding the per-actor metrics and the chain summary.
    pub fn calculate(&self, chain: &ValueChain) -> ValueChainReport {
        let metrics = compute_metrics(chain.actors());
        let summary = self.summarize(chain.actors(), &metrics);

        tracing::debug!(
            actors = summary.actor_count,
            retail_price = ?summary.retail_price,
            "Computed value chain metrics."
        );

        ValueChainReport {
            title: chain.title.clone(),
            metrics,
            summary,
        }
    }

    /// Derives the chain-level figures.
    fn summarize(&self, actors: &[Actor], metrics: &[ActorMetrics]) -> ChainSummary {
        let mut summary = ChainSummary::new();
        summary.actor_count = actors.len();
        summary.retail_price = actors.last().map(|a| a.revenue);
        summary.farm_gate_price = actors.first().map(|a| a.revenue);
        summary.total_gross_income = saturating_total(metrics.iter().map(|m| m.gross_income));
        summary.total_added_value = saturating_total(metrics.iter().map(|m| m.added_value));
        summary
    }
}
