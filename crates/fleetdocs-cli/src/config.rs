//! `fleetdocs.toml` configuration.
//!
//! Every section is optional. A missing config file yields the defaults, and
//! command-line flags override whatever the file says.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "fleetdocs.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FleetDocsConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the JSON inputs live. Relative paths resolve against the config
/// file's directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    #[serde(default = "default_documents_path")]
    pub documents: PathBuf,
    #[serde(default = "default_fleet_path")]
    pub fleet: PathBuf,
    /// Absent means "no records yet": every applicable document is untracked.
    #[serde(default)]
    pub compliance: Option<PathBuf>,
}

fn default_documents_path() -> PathBuf {
    PathBuf::from("data/documents.json")
}

fn default_fleet_path() -> PathBuf {
    PathBuf::from("data/fleet.json")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            documents: default_documents_path(),
            fleet: default_fleet_path(),
            compliance: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => bail!("unknown output format '{other}' (expected table, json or csv)"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

impl FleetDocsConfig {
    /// Load `path`, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let mut config = Self::parse(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.data.rebase(base);
        }
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }
}

impl DataConfig {
    fn rebase(&mut self, base: &Path) {
        let join = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        };
        self.documents = join(&self.documents);
        self.fleet = join(&self.fleet);
        self.compliance = self.compliance.as_ref().map(join);
    }
}
