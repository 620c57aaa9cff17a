use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregate::{aggregate, AggregateSummary, Submission};
use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::kra::{Kra, KraTotals};
use crate::rank::{rank_category_of, resolve_rank, RankResolution};
use crate::scoring::{compute_final_score, ScoreBreakdown};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Draft,
    PendingEvaluation,
    Evaluated,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationStatus::Draft => write!(f, "draft"),
            ApplicationStatus::PendingEvaluation => write!(f, "pending evaluation"),
            ApplicationStatus::Evaluated => write!(f, "evaluated"),
        }
    }
}

const UNSET_RANK: &str = "Unset";

fn unset_rank() -> String {
    UNSET_RANK.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    #[serde(default)]
    pub applicant: String,
    /// Full rank title held by the applicant, e.g. `"Associate Professor III"`.
    #[serde(default = "unset_rank")]
    pub faculty_rank: String,
    /// Overrides the category derived from `faculty_rank`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_category: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub kra1_score: Option<f64>,
    #[serde(default)]
    pub kra2_score: Option<f64>,
    #[serde(default)]
    pub kra3_score: Option<f64>,
    #[serde(default)]
    pub kra4_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submissions: Vec<Submission>,
    #[serde(default)]
    pub final_score: Option<f64>,
    #[serde(default)]
    pub highest_attainable_rank: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finalization {
    pub breakdown: ScoreBreakdown,
    pub rank: RankResolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<AggregateSummary>,
}

impl Application {
    pub fn new(id: &str, faculty_rank: &str) -> Self {
        Application {
            id: id.to_string(),
            applicant: String::new(),
            faculty_rank: faculty_rank.to_string(),
            rank_category: None,
            status: ApplicationStatus::Draft,
            kra1_score: None,
            kra2_score: None,
            kra3_score: None,
            kra4_score: None,
            submissions: Vec::new(),
            final_score: None,
            highest_attainable_rank: None,
        }
    }

    pub fn rank_category(&self) -> &str {
        match &self.rank_category {
            Some(category) => category.trim(),
            None => rank_category_of(&self.faculty_rank),
        }
    }

    /// Stored per-KRA scores, absent ones read as zero.
    pub fn raw_scores(&self) -> KraTotals {
        KraTotals::new(
            self.kra1_score.unwrap_or(0.0),
            self.kra2_score.unwrap_or(0.0),
            self.kra3_score.unwrap_or(0.0),
            self.kra4_score.unwrap_or(0.0),
        )
    }

    pub fn set_raw_scores(&mut self, totals: &KraTotals) {
        for (kra, value) in totals.iter() {
            let slot = match kra {
                Kra::Kra1 => &mut self.kra1_score,
                Kra::Kra2 => &mut self.kra2_score,
                Kra::Kra3 => &mut self.kra3_score,
                Kra::Kra4 => &mut self.kra4_score,
            };
            *slot = Some(value);
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.status == ApplicationStatus::Evaluated
    }

    /// False when the applicant's rank is blank or still `"Unset"`.
    pub fn has_rank(&self) -> bool {
        let category = self.rank_category();
        !category.is_empty() && category != UNSET_RANK
    }

    fn ensure_rank(&self) -> Result<(), ScoringError> {
        if self.has_rank() {
            return Ok(());
        }
        tracing::warn!(application = %self.id, "applicant has no faculty rank assigned");
        Err(ScoringError::RankNotAssigned {
            application: self.id.clone(),
        })
    }

    /// KRAs with no evidence filed under them, in KRA order.
    pub fn missing_kras(&self) -> Vec<Kra> {
        Kra::ALL
            .into_iter()
            .filter(|kra| !self.submissions.iter().any(|s| s.kra == *kra))
            .collect()
    }

    /// Moves a draft to pending evaluation. The applicant must hold a rank
    /// and have filed at least one submission under every KRA.
    pub fn submit(&mut self) -> Result<(), ScoringError> {
        if self.status != ApplicationStatus::Draft {
            return Err(ScoringError::NotADraft {
                application: self.id.clone(),
                status: self.status,
            });
        }
        self.ensure_rank()?;

        let missing = self.missing_kras();
        if !missing.is_empty() {
            return Err(ScoringError::MissingKraSubmissions {
                application: self.id.clone(),
                missing,
            });
        }

        self.status = ApplicationStatus::PendingEvaluation;
        tracing::info!(application = %self.id, "application submitted for evaluation");
        Ok(())
    }

    /// Like [`Application::submit`], but also refuses when `existing` already
    /// holds another application of the same applicant pending evaluation.
    pub fn submit_alongside(&mut self, existing: &[Application]) -> Result<(), ScoringError> {
        let duplicate = existing.iter().any(|other| {
            other.id != self.id
                && other.applicant == self.applicant
                && other.status == ApplicationStatus::PendingEvaluation
        });
        if duplicate {
            return Err(ScoringError::AlreadyPending {
                applicant: self.applicant.clone(),
            });
        }
        self.submit()
    }

    /// Computes and records the final score and highest attainable rank.
    ///
    /// An application can only be finalized once. When it carries
    /// submissions, the raw KRA scores are re-aggregated from them first.
    /// Nothing is written back unless every step succeeds.
    pub fn finalize(&mut self, config: &ScoringConfig) -> Result<Finalization, ScoringError> {
        if self.is_finalized() {
            tracing::warn!(application = %self.id, "application already evaluated, not rescoring");
            return Err(ScoringError::AlreadyFinalized {
                application: self.id.clone(),
            });
        }
        self.ensure_rank()?;

        let summary = if self.submissions.is_empty() {
            None
        } else {
            Some(aggregate(&self.submissions, config)?)
        };
        let raw = summary
            .as_ref()
            .map(|s| s.totals)
            .unwrap_or_else(|| self.raw_scores());

        let breakdown = compute_final_score(config, &raw, self.rank_category())?;
        let rank = resolve_rank(&config.thresholds, breakdown.final_score)?;

        if summary.is_some() {
            self.set_raw_scores(&raw);
        }
        self.final_score = Some(breakdown.final_score);
        self.highest_attainable_rank = Some(rank.label());
        self.status = ApplicationStatus::Evaluated;

        tracing::info!(
            application = %self.id,
            final_score = breakdown.final_score,
            rank = %rank,
            "application finalized"
        );

        Ok(Finalization {
            breakdown,
            rank,
            aggregate: summary,
        })
    }
}
