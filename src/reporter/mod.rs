pub mod cli;
pub mod json;

use std::time::Duration;

use crate::engine::EngineResult;

pub trait Reporter {
    fn format(&self, result: &EngineResult, verbose: bool, elapsed: Duration) -> String;
}

/// One `<id> <final score>` line per application; failed ones print `error`.
pub fn score_only(result: &EngineResult) -> String {
    let mut out = String::new();
    for outcome in &result.outcomes {
        match &outcome.result {
            Ok(f) => out.push_str(&format!(
                "{} {:.2}\n",
                outcome.application.id, f.breakdown.final_score
            )),
            Err(_) => out.push_str(&format!("{} error\n", outcome.application.id)),
        }
    }
    out
}
