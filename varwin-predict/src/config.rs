//! Run configuration and the output registry.

use std::fs::{File, read_to_string};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reporter::{Reporter, TsvReporter};

/// Output flavor. Every variant maps to a statically known reporter
/// constructor in [`build_reporter`]; adding a format means adding a
/// variant here, not resolving anything at runtime.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tsv,
    #[serde(rename = "tsv.gz")]
    TsvGz,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct EvaluatorConfig {
    /// Window length in bases.
    pub seq_len: usize,
    /// Variants per prediction batch.
    pub batch_size: usize,
    #[serde(default)]
    pub output: OutputFormat,
}

#[derive(Error, Debug)]
pub enum EvaluatorConfigError {
    #[error("seq_len must be at least 1")]
    ZeroSeqLen,
    #[error("batch_size must be at least 1")]
    ZeroBatchSize,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type EvaluatorConfigResult<T> = std::result::Result<T, EvaluatorConfigError>;

impl EvaluatorConfig {
    /// Read and validate a TOML configuration file.
    pub fn from_toml(path: &Path) -> EvaluatorConfigResult<Self> {
        let raw = read_to_string(path)?;
        let config: EvaluatorConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> EvaluatorConfigResult<()> {
        if self.seq_len == 0 {
            return Err(EvaluatorConfigError::ZeroSeqLen);
        }
        if self.batch_size == 0 {
            return Err(EvaluatorConfigError::ZeroBatchSize);
        }
        Ok(())
    }
}

/// Build the reporter for an output format writing to `path`.
pub fn build_reporter(
    format: OutputFormat,
    path: &Path,
) -> EvaluatorConfigResult<Box<dyn Reporter>> {
    let file = File::create(path)?;
    let reporter = match format {
        OutputFormat::Tsv => TsvReporter::new(Box::new(file)),
        OutputFormat::TsvGz => {
            TsvReporter::new(Box::new(GzEncoder::new(file, Compression::default())))
        }
    };
    Ok(Box::new(reporter))
}
