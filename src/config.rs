//! TOML configuration for the `prime-oracle` binary.
//!
//! ```toml
//! max_sieve_limit = 1000000000
//! threads = 0      # 0 = all logical cores
//! json = false
//! ```
//!
//! Every key is optional. Command-line flags (and their `PRIME_ORACLE_*`
//! environment fallbacks) are layered on top with [`OracleConfig::with_overrides`].

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::sieve::DEFAULT_MAX_SIEVE_LIMIT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OracleConfig {
    /// Largest bound the sieve will allocate for.
    pub max_sieve_limit: i64,
    /// Rayon worker threads for batch checks (0 = all cores).
    pub threads: usize,
    /// Emit JSON instead of plain text.
    pub json: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            max_sieve_limit: DEFAULT_MAX_SIEVE_LIMIT,
            threads: 0,
            json: false,
        }
    }
}

impl OracleConfig {
    /// Replace fields with any values given on the command line.
    pub fn with_overrides(
        mut self,
        max_sieve_limit: Option<i64>,
        threads: Option<usize>,
        json: bool,
    ) -> Self {
        if let Some(max) = max_sieve_limit {
            self.max_sieve_limit = max;
        }
        if let Some(t) = threads {
            self.threads = t;
        }
        self.json |= json;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_sieve_limit < 2 {
            bail!(
                "max_sieve_limit must be at least 2, got {}",
                self.max_sieve_limit
            );
        }
        Ok(())
    }
}

/// Parse a configuration from a TOML string.
pub fn parse_toml(content: &str) -> Result<OracleConfig> {
    let config: OracleConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Parse a configuration from a TOML file path.
pub fn parse_toml_file(path: &Path) -> Result<OracleConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_toml(&content).with_context(|| format!("parsing config {}", path.display()))
}
