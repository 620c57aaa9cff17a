use std::path::Path;

use rayon::prelude::*;

use crate::application::{Application, Finalization};
use crate::config::ScoringConfig;
use crate::error::{EngineError, ScoringError};

pub struct ApplicationOutcome {
    pub application: Application,
    pub result: Result<Finalization, ScoringError>,
}

pub struct EngineResult {
    pub outcomes: Vec<ApplicationOutcome>,
    pub source_name: String,
}

impl EngineResult {
    pub fn finalized(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.finalized()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    pub fn applications(&self) -> Vec<&Application> {
        self.outcomes.iter().map(|o| &o.application).collect()
    }
}

/// Reads a JSON array of applications from `path` and finalizes each one.
pub fn run(path: &Path, config: &ScoringConfig) -> Result<EngineResult, EngineError> {
    let applications = load_applications(path)?;
    let source_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    Ok(EngineResult {
        outcomes: finalize_all(applications, config),
        source_name,
    })
}

pub fn load_applications(path: &Path) -> Result<Vec<Application>, EngineError> {
    let contents = std::fs::read_to_string(path).map_err(|source| EngineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| EngineError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Applications share no state, so they are scored in parallel. Output keeps
/// input order and a failure in one does not stop the others.
pub fn finalize_all(
    applications: Vec<Application>,
    config: &ScoringConfig,
) -> Vec<ApplicationOutcome> {
    applications
        .into_par_iter()
        .map(|mut application| {
            let result = application.finalize(config);
            if let Err(e) = &result {
                tracing::warn!(application = %application.id, error = %e, "finalization failed");
            }
            ApplicationOutcome {
                application,
                result,
            }
        })
        .collect()
}

/// Writes the (possibly updated) application records back out as JSON.
pub fn write_applications(path: &Path, result: &EngineResult) -> Result<(), EngineError> {
    let json =
        serde_json::to_string_pretty(&result.applications()).map_err(EngineError::Serialize)?;
    std::fs::write(path, json).map_err(|source| EngineError::Write {
        path: path.to_path_buf(),
        source,
    })
}
