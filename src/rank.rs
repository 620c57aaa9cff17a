use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

use crate::config::RankThreshold;
use crate::error::ScoringError;

/// The outcome of mapping a final score onto the threshold table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankResolution {
    Rank {
        title: String,
        threshold: f64,
    },
    /// The score is below every configured threshold.
    BelowLowestTier {
        lowest_title: Option<String>,
        lowest_threshold: Option<f64>,
    },
}

impl RankResolution {
    pub fn title(&self) -> Option<&str> {
        match self {
            RankResolution::Rank { title, .. } => Some(title.as_str()),
            RankResolution::BelowLowestTier { .. } => None,
        }
    }

    pub fn threshold(&self) -> Option<f64> {
        match self {
            RankResolution::Rank { threshold, .. } => Some(*threshold),
            RankResolution::BelowLowestTier { .. } => None,
        }
    }

    pub fn is_below_lowest_tier(&self) -> bool {
        matches!(self, RankResolution::BelowLowestTier { .. })
    }

    /// The string stored as the application's highest attainable rank.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RankResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankResolution::Rank { title, .. } => write!(f, "{title}"),
            RankResolution::BelowLowestTier {
                lowest_title: Some(title),
                ..
            } => write!(f, "Below '{title}' Threshold"),
            RankResolution::BelowLowestTier {
                lowest_title: None, ..
            } => write!(f, "Below Lowest Threshold"),
        }
    }
}

/// Walks `thresholds` in table order (highest tier first) and returns the
/// first tier whose threshold the score meets or exceeds.
pub fn resolve_rank(
    thresholds: &[RankThreshold],
    score: f64,
) -> Result<RankResolution, ScoringError> {
    if !score.is_finite() {
        tracing::warn!(score = score, "refusing to resolve rank for non-finite score");
        return Err(ScoringError::NonFiniteScore {
            kra: None,
            value: score,
        });
    }

    if let Some(tier) = thresholds.iter().find(|t| score >= t.threshold) {
        return Ok(RankResolution::Rank {
            title: tier.title.clone(),
            threshold: tier.threshold,
        });
    }

    let lowest = thresholds.last();
    Ok(RankResolution::BelowLowestTier {
        lowest_title: lowest.map(|t| t.title.clone()),
        lowest_threshold: lowest.map(|t| t.threshold),
    })
}

fn rank_step_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<category>.*?\S)\s+(?:X|IX|IV|V?I{1,3}|V)$")
            .expect("valid rank step regex")
    })
}

/// Strips a trailing roman-numeral step from a rank title:
/// `"Assistant Professor II"` becomes `"Assistant Professor"`. Titles without
/// a step are returned trimmed.
pub fn rank_category_of(title: &str) -> &str {
    let title = title.trim();
    rank_step_pattern()
        .captures(title)
        .and_then(|caps| caps.name("category"))
        .map(|m| m.as_str())
        .unwrap_or(title)
}
