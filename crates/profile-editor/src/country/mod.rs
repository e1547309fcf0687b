/*
[INPUT]:  Built-in ISO 3166 table or a YAML/JSON country file
[OUTPUT]: Code-to-name lookups for the country selector
[POS]:    Country directory - static enumerated list
[UPDATE]: When changing country file format or lookup rules
*/

mod list;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// One selectable country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    #[serde(alias = "Code")]
    pub code: String,
    #[serde(alias = "Name")]
    pub name: String,
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("country entry {index} has an empty code")]
    EmptyCode { index: usize },
    #[error("duplicate country code: {0}")]
    DuplicateCode(String),
}

/// Ordered, immutable list of countries queried by exact code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDirectory {
    countries: Vec<Country>,
}

impl CountryDirectory {
    /// Directory backed by the built-in ISO table
    pub fn builtin() -> Self {
        let countries = list::COUNTRIES
            .iter()
            .map(|(code, name)| Country {
                code: (*code).to_string(),
                name: (*name).to_string(),
            })
            .collect();
        Self { countries }
    }

    pub fn from_entries(countries: Vec<Country>) -> std::result::Result<Self, DirectoryError> {
        let mut seen = HashSet::new();
        for (index, country) in countries.iter().enumerate() {
            if country.code.is_empty() {
                return Err(DirectoryError::EmptyCode { index });
            }
            if !seen.insert(country.code.as_str()) {
                return Err(DirectoryError::DuplicateCode(country.code.clone()));
            }
        }
        Ok(Self { countries })
    }

    /// Load a list of `{code, name}` entries; JSON files parse as YAML too
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read country file {}", path.display()))?;
        let entries: Vec<Country> = serde_yaml::from_str(&content)
            .with_context(|| format!("parse country file {}", path.display()))?;
        let directory = Self::from_entries(entries)?;
        info!(path = %path.display(), count = directory.len(), "country directory loaded");
        Ok(directory)
    }

    pub fn entries(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn lookup(&self, code: &str) -> Option<&Country> {
        self.countries.iter().find(|country| country.code == code)
    }

    /// Display name for a code; unknown and empty codes have none
    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.lookup(code).map(|country| country.name.as_str())
    }

    pub fn position(&self, code: &str) -> Option<usize> {
        self.countries.iter().position(|country| country.code == code)
    }
}

impl Default for CountryDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}
