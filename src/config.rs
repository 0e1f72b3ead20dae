//! YAML Configuration File Support for molfp
//!
//! Loads the fingerprint and evaluation settings from one YAML document.
//! Every field has a default, so a file only needs the keys it changes.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # molfp configuration
//! version: "1.0"
//! name: "screening benchmark"
//!
//! fingerprint:
//!   version: 1
//!   kind: "scaffold"
//!   size: 1024
//!   max_depth: 7
//!   path_limit: 42000
//!   respect_ring_matches: true
//!   respect_formal_charges: false
//!   hash_pseudo_atoms: false
//!   ring_bits: 0
//!   seed: 6840335472815112193
//!   use_parallel: true
//!
//! evaluation:
//!   version: 1
//!   interval: 50
//!   use_parallel: true
//!   record_false_negatives: true
//! ```

use std::fs;
use std::path::Path;

use fingerprint::{
    FingerprintConfig, FingerprintError, FingerprintKind, Fingerprinter, DEFAULT_MAX_DEPTH,
    DEFAULT_PATH_LIMIT, DEFAULT_SEED, DEFAULT_SIZE,
};
use screening::EvaluationConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MolfpConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub fingerprint: FingerprintYamlConfig,

    #[serde(default)]
    pub evaluation: EvaluationYamlConfig,
}

impl MolfpConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: MolfpConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.fingerprint.validate()?;
        self.evaluation.validate()?;
        Ok(())
    }

    /// Build a generator for the `fingerprint` section.
    pub fn fingerprinter(&self) -> Result<Fingerprinter, FingerprintError> {
        Fingerprinter::new(self.fingerprint.to_config())
    }
}

impl Default for MolfpConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            fingerprint: FingerprintYamlConfig::default(),
            evaluation: EvaluationYamlConfig::default(),
        }
    }
}

/// Fingerprint YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FingerprintYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub kind: FingerprintKind,

    #[serde(default = "default_size")]
    pub size: usize,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_path_limit")]
    pub path_limit: usize,

    #[serde(default)]
    pub respect_ring_matches: bool,

    #[serde(default)]
    pub respect_formal_charges: bool,

    #[serde(default)]
    pub hash_pseudo_atoms: bool,

    #[serde(default)]
    pub ring_bits: usize,

    #[serde(default)]
    pub bloom_expected_items: Option<usize>,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default)]
    pub use_parallel: bool,
}

impl FingerprintYamlConfig {
    pub fn to_config(&self) -> FingerprintConfig {
        FingerprintConfig {
            version: self.version,
            kind: self.kind,
            size: self.size,
            max_depth: self.max_depth,
            path_limit: self.path_limit,
            respect_ring_matches: self.respect_ring_matches,
            respect_formal_charges: self.respect_formal_charges,
            hash_pseudo_atoms: self.hash_pseudo_atoms,
            ring_bits: self.ring_bits,
            bloom_expected_items: self.bloom_expected_items,
            seed: self.seed,
            use_parallel: self.use_parallel,
        }
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("fingerprint: {err}")))
    }
}

impl Default for FingerprintYamlConfig {
    fn default() -> Self {
        Self::from(&FingerprintConfig::default())
    }
}

impl From<&FingerprintConfig> for FingerprintYamlConfig {
    fn from(cfg: &FingerprintConfig) -> Self {
        Self {
            version: cfg.version,
            kind: cfg.kind,
            size: cfg.size,
            max_depth: cfg.max_depth,
            path_limit: cfg.path_limit,
            respect_ring_matches: cfg.respect_ring_matches,
            respect_formal_charges: cfg.respect_formal_charges,
            hash_pseudo_atoms: cfg.hash_pseudo_atoms,
            ring_bits: cfg.ring_bits,
            bloom_expected_items: cfg.bloom_expected_items,
            seed: cfg.seed,
            use_parallel: cfg.use_parallel,
        }
    }
}

/// Evaluation harness YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub interval: usize,

    #[serde(default)]
    pub use_parallel: bool,

    #[serde(default = "true_value")]
    pub record_false_negatives: bool,
}

impl EvaluationYamlConfig {
    pub fn to_config(&self) -> EvaluationConfig {
        EvaluationConfig {
            version: self.version,
            interval: self.interval,
            use_parallel: self.use_parallel,
            record_false_negatives: self.record_false_negatives,
        }
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("evaluation: {err}")))
    }
}

impl Default for EvaluationYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            interval: 0,
            use_parallel: false,
            record_false_negatives: true,
        }
    }
}

fn default_version() -> u32 {
    1
}
fn default_size() -> usize {
    DEFAULT_SIZE
}
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
fn default_path_limit() -> usize {
    DEFAULT_PATH_LIMIT
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn true_value() -> bool {
    true
}
