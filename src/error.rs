use std::path::PathBuf;

use thiserror::Error;

use crate::application::ApplicationStatus;
use crate::kra::Kra;

/// Failures of the scoring core. None of these are transient: retrying with
/// the same inputs reproduces the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("no KRA weights configured for rank category '{category}'")]
    UnknownRankCategory { category: String },

    #[error("{}score must be a finite number, got {value}", kra_prefix(.kra))]
    NonFiniteScore { kra: Option<Kra>, value: f64 },

    #[error("{kra} score must not be negative, got {value}")]
    NegativeScore { kra: Kra, value: f64 },

    #[error("application {application} has already been evaluated")]
    AlreadyFinalized { application: String },

    #[error("application {application} has no faculty rank assigned")]
    RankNotAssigned { application: String },

    #[error("application {application} has no submissions for {}", kra_list(.missing))]
    MissingKraSubmissions { application: String, missing: Vec<Kra> },

    #[error("application {application} is {status}, only drafts can be submitted")]
    NotADraft {
        application: String,
        status: ApplicationStatus,
    },

    #[error("applicant {applicant} already has an application pending evaluation")]
    AlreadyPending { applicant: String },
}

fn kra_prefix(kra: &Option<Kra>) -> String {
    match kra {
        Some(kra) => format!("{} ", kra),
        None => String::new(),
    }
}

fn kra_list(kras: &[Kra]) -> String {
    kras.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ScoringError {
    /// True for errors caused by the configuration tables rather than the input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ScoringError::UnknownRankCategory { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ScoringError::NonFiniteScore { .. }
                | ScoringError::NegativeScore { .. }
                | ScoringError::RankNotAssigned { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid scoring configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read applications {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse applications {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write applications {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize applications: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
