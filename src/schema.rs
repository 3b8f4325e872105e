//! Tense schema: the short tense ids users write in the request file, mapped to
//! the tense names found in scraped conjugation tables.
//!
//! The built-in schema is `schema/tenses.yaml`, embedded at compile time. A
//! different file can be supplied with `--schema`.

use crate::error::ConfigError;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Request-file sentinel meaning "every tense in the schema"
pub const ALL_TENSES: &str = "all";

const BUILTIN_SCHEMA: &str = include_str!("../schema/tenses.yaml");

static BUILTIN: OnceCell<TenseSchema> = OnceCell::new();

#[derive(Debug, Clone, Deserialize)]
pub struct TenseEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TenseSchema {
    tenses: Vec<TenseEntry>,
}

impl TenseSchema {
    /// The embedded schema, parsed once per process
    pub fn builtin() -> Result<&'static TenseSchema, ConfigError> {
        BUILTIN.get_or_try_init(|| TenseSchema::from_yaml(BUILTIN_SCHEMA))
    }

    pub fn load(path: &Path) -> Result<TenseSchema, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        TenseSchema::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<TenseSchema, ConfigError> {
        let schema: TenseSchema = serde_yaml::from_str(contents)?;
        schema.validate()?;
        Ok(schema)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tenses.is_empty() {
            return Err(ConfigError::Schema("no tenses defined".to_string()));
        }

        let mut seen = HashSet::new();
        for entry in &self.tenses {
            if entry.id == ALL_TENSES {
                return Err(ConfigError::Schema(format!(
                    "\"{}\" is reserved and cannot be a tense id",
                    ALL_TENSES
                )));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(ConfigError::Schema(format!("duplicate tense id \"{}\"", entry.id)));
            }
        }
        Ok(())
    }

    /// Canonical tense name for a short id
    pub fn canonical_name(&self, id: &str) -> Option<&str> {
        self.tenses
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.name.as_str())
    }

    /// Every canonical name, in schema order
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.tenses.iter().map(|entry| entry.name.as_str())
    }

    /// Check a requested id without resolving it
    pub fn check_id(&self, id: &str) -> Result<(), ConfigError> {
        if id == ALL_TENSES || self.canonical_name(id).is_some() {
            Ok(())
        } else {
            Err(self.unknown(id))
        }
    }

    /// Resolve requested ids to canonical names, expanding `all`.
    /// Duplicates are dropped, first occurrence wins.
    pub fn resolve<S: AsRef<str>>(&self, requested: &[S]) -> Result<Vec<String>, ConfigError> {
        let mut names: Vec<String> = Vec::new();

        for id in requested {
            let id = id.as_ref();
            if id == ALL_TENSES {
                for name in self.all_names() {
                    if !names.iter().any(|n| n == name) {
                        names.push(name.to_string());
                    }
                }
            } else {
                let name = self.canonical_name(id).ok_or_else(|| self.unknown(id))?;
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }

        Ok(names)
    }

    fn unknown(&self, id: &str) -> ConfigError {
        let known: Vec<&str> = self.tenses.iter().map(|entry| entry.id.as_str()).collect();
        ConfigError::UnknownTense {
            id: id.to_string(),
            known: known.join(", "),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests for the tense schema
// ─────────────────────────────────────────────────────────────────────────────
