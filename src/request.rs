//! The study request file: which tenses and verbs to quiz.
//!
//! ```text
//! present, past perfect, imperfect subjunctive
//! comer
//! levantarse
//! ```
//!
//! Line 1 lists tense ids from the tense schema (or `all`); every following
//! line is one infinitive.

use crate::error::ConfigError;
use crate::schema::TenseSchema;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static! {
    // Tense ids are comma-space separated; tolerate stray spacing around commas
    static ref TENSE_SEPARATOR: Regex = Regex::new(r"\s*,\s*").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    tenses: Vec<String>,
    verbs: Vec<String>,
}

impl RequestSpec {
    /// Read and validate a request file. Unknown tense ids fail here, before
    /// any page is fetched.
    pub fn load(path: &Path, schema: &TenseSchema) -> Result<RequestSpec, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        RequestSpec::parse(&contents, path, schema)
    }

    /// `origin` only labels error messages
    pub fn parse(contents: &str, origin: &Path, schema: &TenseSchema) -> Result<RequestSpec, ConfigError> {
        let mut lines = contents.lines().map(str::trim_end);

        let tense_line = match lines.next() {
            Some(line) if !line.trim().is_empty() => line.trim(),
            _ => return Err(ConfigError::MissingTenseLine(origin.to_path_buf())),
        };

        let tenses: Vec<String> = TENSE_SEPARATOR
            .split(tense_line)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        for id in &tenses {
            schema.check_id(id)?;
        }

        let verbs: Vec<String> = lines
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if verbs.is_empty() {
            return Err(ConfigError::NoVerbs(origin.to_path_buf()));
        }

        Ok(RequestSpec { tenses, verbs })
    }

    pub fn tenses(&self) -> &[String] {
        &self.tenses
    }

    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests for request parsing
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod request_tests {
    use super::*;

    fn parse(contents: &str) -> Result<RequestSpec, ConfigError> {
        RequestSpec::parse(contents, Path::new("study-verbs.txt"), TenseSchema::builtin().unwrap())
    }

    #[test]
    fn tenses_and_verbs_parsed() {
        let spec = parse("present, past perfect\ncomer\nlevantarse\n").unwrap();
        assert_eq!(spec.tenses(), ["present", "past perfect"]);
        assert_eq!(spec.verbs(), ["comer", "levantarse"]);
    }

    #[test]
    fn trailing_whitespace_stripped() {
        let spec = parse("present, future  \r\ncomer \t\nhablar\r\n").unwrap();
        assert_eq!(spec.tenses(), ["present", "future"]);
        assert_eq!(spec.verbs(), ["comer", "hablar"]);
    }

    #[test]
    fn all_sentinel_accepted() {
        let spec = parse("all\nvivir").unwrap();
        assert_eq!(spec.tenses(), ["all"]);
    }

    #[test]
    fn loose_comma_spacing_accepted() {
        let spec = parse("present,future ,  conditional\nvivir").unwrap();
        assert_eq!(spec.tenses(), ["present", "future", "conditional"]);
    }

    #[test]
    fn blank_verb_lines_skipped() {
        let spec = parse("present\n\ncomer\n\n").unwrap();
        assert_eq!(spec.verbs(), ["comer"]);
    }

    #[test]
    fn unknown_tense_rejected() {
        let err = parse("present, pluperfect\ncomer").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTense { ref id, .. } if id == "pluperfect"));
    }

    #[test]
    fn empty_file_rejected() {
        assert!(matches!(parse(""), Err(ConfigError::MissingTenseLine(_))));
        assert!(matches!(parse("   \ncomer"), Err(ConfigError::MissingTenseLine(_))));
    }

    #[test]
    fn no_verbs_rejected() {
        assert!(matches!(parse("present\n"), Err(ConfigError::NoVerbs(_))));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("study-verbs.txt");
        fs::write(&path, "imperfect subjunctive\nser\n").unwrap();
        let spec = RequestSpec::load(&path, TenseSchema::builtin().unwrap()).unwrap();
        assert_eq!(spec.tenses(), ["imperfect subjunctive"]);
        assert_eq!(spec.verbs(), ["ser"]);
    }

    #[test]
    fn load_missing_file_rejected() {
        let err = RequestSpec::load(Path::new("/nonexistent/study-verbs.txt"), TenseSchema::builtin().unwrap())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
