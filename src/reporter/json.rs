use std::time::Duration;

use serde::Serialize;

use crate::application::ApplicationStatus;
use crate::engine::{ApplicationOutcome, EngineResult};
use crate::error::ScoringError;
use crate::scoring::ScoreBreakdown;

use super::Reporter;

pub struct JsonReporter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    version: &'static str,
    summary: SummaryJson,
    results: Vec<ResultJson<'a>>,
}

#[derive(Serialize)]
struct SummaryJson {
    applications: usize,
    finalized: usize,
    failed: usize,
    elapsed_ms: u128,
}

#[derive(Serialize)]
struct ResultJson<'a> {
    id: &'a str,
    applicant: &'a str,
    faculty_rank: &'a str,
    rank_category: &'a str,
    status: ApplicationStatus,
    final_score: Option<f64>,
    highest_attainable_rank: Option<&'a str>,
    below_lowest_tier: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<&'a ScoreBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorJson>,
}

#[derive(Serialize)]
struct ErrorJson {
    kind: &'static str,
    message: String,
}

fn error_kind(e: &ScoringError) -> &'static str {
    match e {
        ScoringError::UnknownRankCategory { .. } => "configuration",
        ScoringError::NonFiniteScore { .. } | ScoringError::NegativeScore { .. } => {
            "invalid_input"
        }
        ScoringError::RankNotAssigned { .. } => "rank_missing",
        ScoringError::MissingKraSubmissions { .. } => "missing_submissions",
        ScoringError::AlreadyFinalized { .. }
        | ScoringError::NotADraft { .. }
        | ScoringError::AlreadyPending { .. } => "status",
    }
}

fn result_json(outcome: &ApplicationOutcome, verbose: bool) -> ResultJson<'_> {
    let app = &outcome.application;
    let (breakdown, below_lowest_tier, error) = match &outcome.result {
        Ok(f) => (
            verbose.then_some(&f.breakdown),
            f.rank.is_below_lowest_tier(),
            None,
        ),
        Err(e) => (
            None,
            false,
            Some(ErrorJson {
                kind: error_kind(e),
                message: e.to_string(),
            }),
        ),
    };
    ResultJson {
        id: &app.id,
        applicant: &app.applicant,
        faculty_rank: &app.faculty_rank,
        rank_category: app.rank_category(),
        status: app.status,
        final_score: app.final_score,
        highest_attainable_rank: app.highest_attainable_rank.as_deref(),
        below_lowest_tier,
        breakdown,
        error,
    }
}

impl Reporter for JsonReporter {
    fn format(&self, result: &EngineResult, verbose: bool, elapsed: Duration) -> String {
        let output = JsonOutput {
            version: env!("CARGO_PKG_VERSION"),
            summary: SummaryJson {
                applications: result.outcomes.len(),
                finalized: result.finalized(),
                failed: result.failed(),
                elapsed_ms: elapsed.as_millis(),
            },
            results: result
                .outcomes
                .iter()
                .map(|o| result_json(o, verbose))
                .collect(),
        };
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}
