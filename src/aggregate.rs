use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::kra::{Kra, KraTotals};
use crate::scoring::cap;

/// A piece of evidence filed under one KRA. `score` stays `None` until an
/// evaluator has scored it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub kra: Kra,
    /// Sub-cap name within the KRA, e.g. `instructional_materials`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionCounts {
    pub scored: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub totals: KraTotals,
    pub counts: BTreeMap<Kra, SubmissionCounts>,
}

impl AggregateSummary {
    pub fn pending(&self) -> usize {
        self.counts.values().map(|c| c.pending).sum()
    }
}

/// Sums evaluator scores per KRA into raw totals. Categories with a
/// configured sub-cap are clipped to it; the KRA's total cap is left to the
/// scoring step.
pub fn aggregate(
    submissions: &[Submission],
    config: &ScoringConfig,
) -> Result<AggregateSummary, ScoringError> {
    let mut per_category: BTreeMap<(Kra, Option<&str>), f64> = BTreeMap::new();
    let mut counts: BTreeMap<Kra, SubmissionCounts> =
        Kra::ALL.iter().map(|k| (*k, SubmissionCounts::default())).collect();

    for submission in submissions {
        let entry = counts.entry(submission.kra).or_default();
        let Some(score) = submission.score else {
            entry.pending += 1;
            continue;
        };
        if !score.is_finite() {
            return Err(ScoringError::NonFiniteScore {
                kra: Some(submission.kra),
                value: score,
            });
        }
        if score < 0.0 {
            return Err(ScoringError::NegativeScore {
                kra: submission.kra,
                value: score,
            });
        }
        entry.scored += 1;
        *per_category
            .entry((submission.kra, submission.category.as_deref()))
            .or_insert(0.0) += score;
    }

    let mut totals = KraTotals::default();
    for ((kra, category), sum) in per_category {
        let sub_cap = category.and_then(|c| config.caps.get(kra).sub_caps.get(c));
        let counted = match sub_cap {
            Some(limit) => cap(sum, *limit),
            None => sum,
        };
        totals.set(kra, totals.get(kra) + counted);
    }

    Ok(AggregateSummary { totals, counts })
}
