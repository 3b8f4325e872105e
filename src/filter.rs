//! Narrowing a scraped conjugation table to the requested tenses

use crate::error::ConfigError;
use crate::schema::TenseSchema;
use crate::table::{ConjugationTable, VerbConjugations};
use std::collections::HashSet;

/// Keep only the tenses whose canonical name matches a requested id.
///
/// `all` requests every tense in the schema. Every verb of `full` appears in
/// the result, with an empty mapping when none of its tenses survive.
pub fn filter_tenses<S: AsRef<str>>(
    full: &ConjugationTable,
    requested: &[S],
    schema: &TenseSchema,
) -> Result<ConjugationTable, ConfigError> {
    let names = schema.resolve(requested)?;
    let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();

    Ok(full
        .iter()
        .map(|(verb, conjugations)| {
            let kept: VerbConjugations = conjugations
                .iter()
                .filter(|(tense, _)| wanted.contains(tense.as_str()))
                .map(|(tense, row)| (tense.clone(), row.clone()))
                .collect();
            (verb.clone(), kept)
        })
        .collect())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests for tense filtering
// ─────────────────────────────────────────────────────────────────────────────
