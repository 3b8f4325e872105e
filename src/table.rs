use std::collections::BTreeMap;

/// Pronoun label → conjugated form
pub type TenseRow = BTreeMap<String, String>;

/// Canonical tense name → row of forms
pub type VerbConjugations = BTreeMap<String, TenseRow>;

/// Infinitive → its conjugations
pub type ConjugationTable = BTreeMap<String, VerbConjugations>;
