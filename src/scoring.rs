use serde::Serialize;

use crate::config::{ScoringConfig, WeightVector};
use crate::error::ScoringError;
use crate::kra::{Kra, KraTotals};

/// Every intermediate of a final-score computation, kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub rank_category: String,
    pub raw: KraTotals,
    pub capped: KraTotals,
    pub weights: WeightVector,
    pub contributions: KraTotals,
    pub final_score: f64,
}

/// Clips a raw KRA total to its ceiling. Values below the cap, negatives
/// included, pass through unchanged.
pub fn cap(raw: f64, total_cap: f64) -> f64 {
    raw.min(total_cap)
}

/// Caps each raw KRA total, weights it by the rank category's weight vector
/// and sums the result. The sum is not clamped.
pub fn compute_final_score(
    config: &ScoringConfig,
    raw: &KraTotals,
    rank_category: &str,
) -> Result<ScoreBreakdown, ScoringError> {
    if let Some((kra, value)) = raw.iter().find(|(_, v)| !v.is_finite()) {
        return Err(ScoringError::NonFiniteScore {
            kra: Some(kra),
            value,
        });
    }

    let capped: KraTotals = raw
        .iter()
        .map(|(kra, value)| (kra, cap(value, config.caps.total_cap(kra))))
        .collect();

    let Some(weights) = config.weights_for(rank_category) else {
        tracing::warn!(category = rank_category, "no KRA weights configured for rank category");
        return Err(ScoringError::UnknownRankCategory {
            category: rank_category.to_string(),
        });
    };

    let contributions: KraTotals = Kra::ALL
        .into_iter()
        .map(|kra| (kra, capped.get(kra) * weights.get(kra)))
        .collect();
    let final_score = contributions.sum();

    Ok(ScoreBreakdown {
        rank_category: rank_category.to_string(),
        raw: *raw,
        capped,
        weights: *weights,
        contributions,
        final_score,
    })
}

pub fn final_score(
    config: &ScoringConfig,
    raw: &KraTotals,
    rank_category: &str,
) -> Result<f64, ScoringError> {
    compute_final_score(config, raw, rank_category).map(|b| b.final_score)
}
