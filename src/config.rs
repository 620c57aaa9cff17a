use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;
use crate::kra::Kra;

pub const CONFIG_FILE_NAME: &str = "kra-ranker.toml";

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// The read-only tables the scoring engine is parameterised by. Built once at
/// startup and passed by reference to every scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub caps: KraCapTable,
    pub weights: BTreeMap<String, WeightVector>,
    pub thresholds: Vec<RankThreshold>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KraCapTable {
    pub kra1: KraCap,
    pub kra2: KraCap,
    pub kra3: KraCap,
    pub kra4: KraCap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KraCap {
    pub total_cap: f64,
    #[serde(default)]
    pub sub_caps: BTreeMap<String, f64>,
    /// Points addable beyond `total_cap` for leadership roles. Informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_hire_bonus: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub kra1: f64,
    pub kra2: f64,
    pub kra3: f64,
    pub kra4: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankThreshold {
    pub title: String,
    pub threshold: f64,
}

impl KraCapTable {
    pub fn get(&self, kra: Kra) -> &KraCap {
        match kra {
            Kra::Kra1 => &self.kra1,
            Kra::Kra2 => &self.kra2,
            Kra::Kra3 => &self.kra3,
            Kra::Kra4 => &self.kra4,
        }
    }

    pub fn total_cap(&self, kra: Kra) -> f64 {
        self.get(kra).total_cap
    }
}

impl WeightVector {
    pub fn new(kra1: f64, kra2: f64, kra3: f64, kra4: f64) -> Self {
        WeightVector {
            kra1,
            kra2,
            kra3,
            kra4,
        }
    }

    pub fn get(&self, kra: Kra) -> f64 {
        match kra {
            Kra::Kra1 => self.kra1,
            Kra::Kra2 => self.kra2,
            Kra::Kra3 => self.kra3,
            Kra::Kra4 => self.kra4,
        }
    }

    pub fn sum(&self) -> f64 {
        Kra::ALL.iter().map(|k| self.get(*k)).sum()
    }
}

impl RankThreshold {
    pub fn new(title: &str, threshold: f64) -> Self {
        RankThreshold {
            title: title.to_string(),
            threshold,
        }
    }
}

fn cap(total_cap: f64, sub_caps: &[(&str, f64)]) -> KraCap {
    KraCap {
        total_cap,
        sub_caps: sub_caps
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect(),
        bonus: None,
        new_hire_bonus: None,
    }
}

impl Default for KraCapTable {
    fn default() -> Self {
        KraCapTable {
            kra1: cap(
                40.0,
                &[
                    ("instructional_materials", 30.0),
                    ("mentorship_services", 10.0),
                ],
            ),
            kra2: cap(
                100.0,
                &[
                    ("research_outputs", 100.0),
                    ("inventions", 100.0),
                    ("creative_works", 100.0),
                ],
            ),
            kra3: KraCap {
                bonus: Some(20.0),
                ..cap(
                    100.0,
                    &[
                        ("service_to_institution", 30.0),
                        ("service_to_community", 50.0),
                        ("extension_involvement", 20.0),
                    ],
                )
            },
            kra4: KraCap {
                new_hire_bonus: Some(20.0),
                ..cap(
                    100.0,
                    &[
                        ("professional_organizations", 20.0),
                        ("continuing_development", 60.0),
                        ("awards_and_recognitions", 20.0),
                    ],
                )
            },
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let weights = [
            ("Instructor", WeightVector::new(0.80, 0.10, 0.05, 0.05)),
            ("Assistant Professor", WeightVector::new(0.60, 0.20, 0.10, 0.10)),
            ("Associate Professor", WeightVector::new(0.40, 0.30, 0.15, 0.15)),
            ("Professor", WeightVector::new(0.30, 0.40, 0.15, 0.15)),
        ]
        .into_iter()
        .map(|(category, w)| (category.to_string(), w))
        .collect();

        let thresholds = [
            ("Professor V", 595.0),
            ("Professor IV", 562.0),
            ("Professor III", 529.0),
            ("Professor II", 496.0),
            ("Professor I", 463.0),
            ("Associate Professor V", 430.0),
            ("Associate Professor IV", 397.0),
            ("Associate Professor III", 364.0),
            ("Associate Professor II", 331.0),
            ("Associate Professor I", 298.0),
            ("Assistant Professor IV", 265.0),
            ("Assistant Professor III", 232.0),
            ("Assistant Professor II", 199.0),
            ("Assistant Professor I", 166.0),
            ("Instructor III", 133.0),
            ("Instructor II", 100.0),
            ("Instructor I", 66.0),
        ]
        .into_iter()
        .map(|(title, threshold)| RankThreshold::new(title, threshold))
        .collect();

        ScoringConfig {
            caps: KraCapTable::default(),
            weights,
            thresholds,
        }
    }
}

impl ScoringConfig {
    /// Loads `kra-ranker.toml` from `dir`, or the reference tables if the
    /// file does not exist.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            tracing::debug!("no {CONFIG_FILE_NAME} in {}, using reference tables", dir.display());
            return Ok(ScoringConfig::default());
        }
        Self::from_file(&config_path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ScoringConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            categories = config.weights.len(),
            tiers = config.thresholds.len(),
            "loaded scoring configuration"
        );
        Ok(config)
    }

    pub fn weights_for(&self, rank_category: &str) -> Option<&WeightVector> {
        self.weights.get(rank_category)
    }

    /// The last (lowest) entry of the threshold table.
    pub fn lowest_tier(&self) -> Option<&RankThreshold> {
        self.thresholds.last()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for kra in Kra::ALL {
            let cap = self.caps.get(kra);
            if !cap.total_cap.is_finite() || cap.total_cap < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} total_cap must be a non-negative number, got {}",
                    kra.slug(),
                    cap.total_cap
                )));
            }
            if let Some((name, value)) = cap
                .sub_caps
                .iter()
                .find(|(_, v)| !v.is_finite() || **v < 0.0)
            {
                return Err(ConfigError::Invalid(format!(
                    "{} sub-cap '{name}' must be a non-negative number, got {value}",
                    kra.slug()
                )));
            }
        }

        if self.weights.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one rank category weight vector is required".to_string(),
            ));
        }
        for (category, weights) in &self.weights {
            for kra in Kra::ALL {
                let w = weights.get(kra);
                if !w.is_finite() || w < 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "weight {} for '{category}' must be a non-negative number, got {w}",
                        kra.slug()
                    )));
                }
            }
            let sum = weights.sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(ConfigError::Invalid(format!(
                    "weights for '{category}' sum to {sum}, expected 1.0"
                )));
            }
        }

        if self.thresholds.is_empty() {
            return Err(ConfigError::Invalid(
                "rank threshold table must not be empty".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        let mut previous: Option<&RankThreshold> = None;
        for entry in &self.thresholds {
            if !entry.threshold.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "threshold for '{}' must be finite, got {}",
                    entry.title, entry.threshold
                )));
            }
            if !seen.insert(entry.title.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "rank title '{}' appears more than once",
                    entry.title
                )));
            }
            if let Some(prev) = previous {
                if entry.threshold > prev.threshold {
                    return Err(ConfigError::Invalid(format!(
                        "thresholds must not increase: '{}' ({}) follows '{}' ({})",
                        entry.title, entry.threshold, prev.title, prev.threshold
                    )));
                }
            }
            previous = Some(entry);
        }
        Ok(())
    }
}
