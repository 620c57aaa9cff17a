use std::time::Duration;

use owo_colors::OwoColorize;

use crate::engine::EngineResult;
use crate::rank::RankResolution;

use super::Reporter;

pub struct CliReporter;

impl Reporter for CliReporter {
    fn format(&self, result: &EngineResult, verbose: bool, elapsed: Duration) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "\n  {} v{}\n\n",
            "kra-ranker".bold(),
            env!("CARGO_PKG_VERSION")
        ));
        out.push_str(&format!("  Source: {}\n", result.source_name));
        out.push_str(&format!(
            "  {} finalized, {} failed ({} ms)\n",
            result.finalized().to_string().green(),
            result.failed().to_string().red(),
            elapsed.as_millis()
        ));

        for outcome in &result.outcomes {
            let app = &outcome.application;
            out.push_str(&format!(
                "\n  {} {} {}\n",
                "──".dimmed(),
                app.id,
                "─".repeat(50 - app.id.len().min(49)).dimmed()
            ));
            if !app.applicant.is_empty() {
                out.push_str(&format!("  Applicant: {}\n", app.applicant));
            }
            out.push_str(&format!(
                "  Rank: {} ({})\n",
                app.faculty_rank,
                app.rank_category().dimmed()
            ));

            let finalization = match &outcome.result {
                Ok(f) => f,
                Err(e) => {
                    out.push_str(&format!("  {}  {}\n", "ERROR".red().bold(), e));
                    continue;
                }
            };

            out.push_str(&format!(
                "  Final score: {}\n",
                format!("{:.2}", finalization.breakdown.final_score).bold()
            ));
            let rank_colored = match &finalization.rank {
                RankResolution::Rank { .. } => finalization.rank.label().green().to_string(),
                RankResolution::BelowLowestTier { .. } => {
                    finalization.rank.label().yellow().to_string()
                }
            };
            out.push_str(&format!("  Highest attainable rank: {}\n", rank_colored));

            if verbose {
                let b = &finalization.breakdown;
                out.push_str(&format!(
                    "    {:<34} {:>8} {:>8} {:>6} {:>8}\n",
                    "KRA".dimmed(),
                    "raw".dimmed(),
                    "capped".dimmed(),
                    "weight".dimmed(),
                    "points".dimmed()
                ));
                for (kra, raw) in b.raw.iter() {
                    out.push_str(&format!(
                        "    {:<34} {:>8.2} {:>8.2} {:>6.2} {:>8.2}\n",
                        kra.to_string(),
                        raw,
                        b.capped.get(kra),
                        b.weights.get(kra),
                        b.contributions.get(kra)
                    ));
                }
                if let Some(summary) = &finalization.aggregate {
                    let pending = summary.pending();
                    if pending > 0 {
                        out.push_str(&format!(
                            "    {}: {} submissions not yet scored\n",
                            "Note".cyan(),
                            pending
                        ));
                    }
                }
            }
        }
        out.push('\n');
        out
    }
}
