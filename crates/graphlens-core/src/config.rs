//! Configuration loaded from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// How textual filter operands are read when compared against timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// `2024-03-01`, `2024-03-01T12:30:00`, `2024-03-01 12:30:00`.
    #[default]
    Iso,
    /// `01.03.2024`, `01.03.2024 12:30:00`, `01/03/2024`.
    Dmy,
}

impl DateFormat {
    /// chrono patterns carrying both a date and a time of day.
    pub fn datetime_patterns(self) -> &'static [&'static str] {
        match self {
            Self::Iso => &[
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%d %H:%M:%S%.f",
                "%Y-%m-%dT%H:%M",
                "%Y-%m-%d %H:%M",
            ],
            Self::Dmy => &[
                "%d.%m.%Y %H:%M:%S%.f",
                "%d.%m.%Y %H:%M",
                "%d/%m/%Y %H:%M:%S%.f",
                "%d/%m/%Y %H:%M",
            ],
        }
    }

    /// chrono patterns carrying only a calendar date (midnight is implied).
    pub fn date_patterns(self) -> &'static [&'static str] {
        match self {
            Self::Iso => &["%Y-%m-%d"],
            Self::Dmy => &["%d.%m.%Y", "%d/%m/%Y"],
        }
    }
}

impl FromStr for DateFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "iso" | "ymd" => Ok(Self::Iso),
            "dmy" | "day-month-year" => Ok(Self::Dmy),
            other => Err(Error::Config(format!("unknown date format: {other}"))),
        }
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Iso => write!(f, "iso"),
            Self::Dmy => write!(f, "dmy"),
        }
    }
}

/// Top-level GraphLens configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphLensConfig {
    /// HTTP server port.
    pub port: u16,
    /// Date format used by filters on timestamp attributes.
    pub date_format: DateFormat,
    /// Visualizer selected at startup.
    pub visualizer: String,
    /// JSON graph file loaded into the first workspace at startup.
    pub data_file: Option<PathBuf>,
}

impl Default for GraphLensConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            date_format: DateFormat::Iso,
            visualizer: "text".to_string(),
            data_file: None,
        }
    }
}

impl GraphLensConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid PORT: {p}")))?,
            None => defaults.port,
        };

        let date_format = match lookup("GRAPHLENS_DATE_FORMAT") {
            Some(f) => f.parse()?,
            None => defaults.date_format,
        };

        let visualizer = lookup("GRAPHLENS_VISUALIZER")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.visualizer);

        let data_file = lookup("GRAPHLENS_DATA_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        debug!(port, %date_format, %visualizer, "configuration resolved");

        Ok(Self {
            port,
            date_format,
            visualizer,
            data_file,
        })
    }
}
