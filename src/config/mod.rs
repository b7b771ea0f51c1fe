// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the theory facade.
//!
//! A config file sets the reference tuning, the preferred spelling for
//! notes built from numbers, and any custom scales or chords to register
//! on top of the built-in dictionaries. YAML and TOML are both accepted.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dictionary::{CustomDefinition, DictEntry};

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TheoryConfig {
    /// Frequency of A4 in Hz, used to pick the key for a frequency lookup.
    /// `Note::frequency()` itself is always relative to 440 Hz.
    #[serde(default = "default_tuning")]
    pub tuning: f64,
    /// Spell notes built from MIDI numbers or frequencies with sharps
    #[serde(default = "default_prefer_sharps")]
    pub prefer_sharps: bool,
    /// Custom scales
    #[serde(default)]
    pub scales: Vec<CustomDefinition>,
    /// Custom chords
    #[serde(default)]
    pub chords: Vec<CustomDefinition>,
}

fn default_tuning() -> f64 {
    440.0
}
fn default_prefer_sharps() -> bool {
    true
}

impl Default for TheoryConfig {
    fn default() -> Self {
        Self {
            tuning: default_tuning(),
            prefer_sharps: default_prefer_sharps(),
            scales: Vec::new(),
            chords: Vec::new(),
        }
    }
}

impl TheoryConfig {
    /// Load a configuration file; `.toml` files are read as TOML, anything else as YAML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents)?,
            _ => Self::from_yaml(&contents)?,
        };
        debug!(
            path = %path.display(),
            scales = config.scales.len(),
            chords = config.chords.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Parse a configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Check tuning and custom dictionary entries
    pub fn validate(&self) -> Result<()> {
        if !(self.tuning.is_finite() && self.tuning > 0.0) {
            bail!("tuning must be a positive frequency, got {}", self.tuning);
        }
        for (kind, defs) in [("scale", &self.scales), ("chord", &self.chords)] {
            for def in defs {
                if def.name.trim().is_empty() {
                    bail!("custom {} has an empty name", kind);
                }
                if def.intervals.is_empty() {
                    bail!("custom {} {:?} has no intervals", kind, def.name);
                }
                DictEntry::try_from(def)
                    .with_context(|| format!("Invalid custom {}: {:?}", kind, def.name))?;
            }
        }
        Ok(())
    }
}

/// Load a config file and validate it
pub fn validate_config<P: AsRef<Path>>(path: P) -> Result<TheoryConfig> {
    let config = TheoryConfig::load(path)?;
    config.validate()?;
    Ok(config)
}
