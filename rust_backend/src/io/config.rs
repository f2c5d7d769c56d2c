//! Generator configuration file support.
//!
//! This module provides utilities for reading generator settings from TOML
//! configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::parsing::columns::DetectedColumns;
use crate::parsing::ColumnMap;

/// Generator configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub columns: ColumnsSection,
    #[serde(default)]
    pub generation: GenerationSettings,
}

/// Column name overrides.
///
/// Fields left out of the file stay `None`; the effective mapping then
/// falls back to the detected column, and past that to the standard
/// export headers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnsSection {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub teachers: Option<String>,
}

/// Generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default)]
    pub include_shared: bool,
    /// Teachers to generate for; empty means all discovered teachers.
    #[serde(default)]
    pub teachers: Vec<String>,
}

impl GeneratorConfig {
    /// Load generator configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: GeneratorConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Build the effective column mapping.
    ///
    /// Configured names win over detected ones; a field set in neither
    /// place keeps the standard export header.
    pub fn column_map(&self, detected: &DetectedColumns) -> ColumnMap {
        let defaults = ColumnMap::default();

        fn pick(configured: &Option<String>, detected: &Option<String>, fallback: String) -> String {
            configured
                .clone()
                .or_else(|| detected.clone())
                .unwrap_or(fallback)
        }

        ColumnMap {
            date: pick(&self.columns.date, &detected.date, defaults.date),
            start: pick(&self.columns.start, &detected.start, defaults.start),
            end: pick(&self.columns.end, &detected.end, defaults.end),
            group: pick(&self.columns.group, &detected.group, defaults.group),
            room: pick(&self.columns.room, &detected.room, defaults.room),
            description: pick(
                &self.columns.description,
                &detected.description,
                defaults.description,
            ),
            teachers: pick(&self.columns.teachers, &detected.teachers, defaults.teachers),
        }
    }
}
