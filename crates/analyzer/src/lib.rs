use configuration::Thresholds;
use core_types::ActorMetrics;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Message shown by the renderers when no actor is flagged.
pub const ALL_CLEAR_MESSAGE: &str = "All actors have reasonable margins and value shares.";

/// The metric that triggered a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    LowGrossMargin,
    LowValueShare,
}

/// A single textual warning about one actor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub actor: String,
    pub kind: RecommendationKind,
    /// The offending percentage, as it appears in the metrics.
    pub value: Decimal,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RecommendationKind::LowGrossMargin => write!(
                f,
                "Actor '{}' has a low gross margin ({:.2}%). Consider reducing input costs or increasing selling price.",
                self.actor, self.value
            ),
            RecommendationKind::LowValueShare => write!(
                f,
                "Actor '{}' has a small value share ({:.2}%). Consider improving value addition strategies.",
                self.actor, self.value
            ),
        }
    }
}

/// Derives threshold-based recommendations from computed metrics.
#[derive(Debug, Clone, Default)]
pub struct Advisor {
    thresholds: Thresholds,
}

impl Advisor {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Checks every actor against both thresholds.
    ///
    /// Output follows the input order. An actor contributes zero, one or two
    /// recommendations, margin before value share.
    pub fn derive(&self, metrics: &[ActorMetrics]) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        for m in metrics {
            if m.gross_margin_pct < self.thresholds.low_margin_pct {
                recommendations.push(Recommendation {
                    actor: m.name.clone(),
                    kind: RecommendationKind::LowGrossMargin,
                    value: m.gross_margin_pct,
                });
            }
            if m.value_share_pct < self.thresholds.low_value_share_pct {
                recommendations.push(Recommendation {
                    actor: m.name.clone(),
                    kind: RecommendationKind::LowValueShare,
                    value: m.value_share_pct,
                });
            }
        }

        tracing::debug!(count = recommendations.len(), "Derived recommendations.");
        recommendations
    }
}

/// Derives recommendations using the default thresholds (20% margin, 10% value share).
pub fn derive_recommendations(metrics: &[ActorMetrics]) -> Vec<Recommendation> {
    Advisor::default().derive(metrics)
}
