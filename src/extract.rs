//! Conjugation extraction from WordReference conjugation pages.
//!
//! A page is a list of mood groups (`div.aa`, named by an `<h4>`), each holding
//! tense blocks (`table.neoConj`). A block's first `<th>` names the tense; its
//! `th[scope=row]` cells are pronouns and its `<td>` cells the forms, paired by
//! position.

use crate::error::ParseError;
use crate::normalize::{
    clean_fragment, normalize_conjugated_form, normalize_pronoun_label, normalize_tense_label,
};
use crate::table::VerbConjugations;
use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;
use log::{debug, warn};

const MOOD_GROUP: &str = "div.aa";
const GROUP_HEADING: &str = "h4";
const TENSE_BLOCK: &str = "table.neoConj";
const TENSE_HEADING: &str = "th";
const PRONOUN_CELL: &str = "th[scope=row]";
const FORM_CELL: &str = "td";

/// Heading of the mood group whose tense blocks need a "subjuntivo " prefix
const SUBJUNCTIVE_GROUP: &str = "Subjuntivo";

/// One tense block after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
struct TenseBlock {
    name: String,
    rows: Vec<(String, String)>,
}

/// Parse a conjugation page into tense → pronoun → form.
///
/// Malformed groups and blocks are logged and skipped; a page with no mood
/// groups yields an empty mapping.
pub fn extract_conjugations(html: &str) -> VerbConjugations {
    let document = kuchiki::parse_html().one(html);

    let blocks: Vec<TenseBlock> = match document.select(MOOD_GROUP) {
        Ok(groups) => groups
            .filter_map(|group| match read_group(group.as_node()) {
                Ok(blocks) => Some(blocks),
                Err(e) => {
                    warn!("Skipping mood group: {}", e);
                    None
                }
            })
            .flatten()
            .collect(),
        Err(()) => Vec::new(),
    };

    let mut conjugations = VerbConjugations::new();
    for block in blocks {
        // later duplicates of a (tense, pronoun) key overwrite earlier ones
        conjugations.entry(block.name).or_default().extend(block.rows);
    }
    conjugations
}

fn read_group(group: &NodeRef) -> Result<Vec<TenseBlock>, ParseError> {
    let heading = group
        .select_first(GROUP_HEADING)
        .map_err(|()| ParseError::MissingGroupHeading)?;
    let group_name = clean_fragment(&heading.as_node().text_contents());

    let blocks = match group.select(TENSE_BLOCK) {
        Ok(tables) => tables
            .filter_map(|table| match read_tense_block(table.as_node(), &group_name) {
                Ok(block) if block.rows.is_empty() => {
                    debug!("Tense block \"{}\" has no rows", block.name);
                    None
                }
                Ok(block) => Some(block),
                Err(e) => {
                    warn!("Skipping tense block: {}", e);
                    None
                }
            })
            .collect(),
        Err(()) => Vec::new(),
    };

    Ok(blocks)
}

fn read_tense_block(table: &NodeRef, group_name: &str) -> Result<TenseBlock, ParseError> {
    let heading = table
        .select_first(TENSE_HEADING)
        .map_err(|()| ParseError::MissingTenseHeading {
            group: group_name.to_string(),
        })?;

    let mut name = normalize_tense_label(&clean_fragment(&heading.as_node().text_contents()));
    if group_name == SUBJUNCTIVE_GROUP {
        name = format!("subjuntivo {}", name);
    }

    let pronouns = cell_texts(table, PRONOUN_CELL);
    let forms = cell_texts(table, FORM_CELL);
    if pronouns.len() != forms.len() {
        debug!(
            "Tense \"{}\": {} pronouns vs {} forms, keeping the overlap",
            name,
            pronouns.len(),
            forms.len()
        );
    }

    let rows = pronouns
        .iter()
        .zip(forms.iter())
        .map(|(pronoun, form)| {
            (
                normalize_pronoun_label(pronoun),
                normalize_conjugated_form(form),
            )
        })
        .collect();

    Ok(TenseBlock { name, rows })
}

fn cell_texts(node: &NodeRef, selector: &str) -> Vec<String> {
    match node.select(selector) {
        Ok(cells) => cells
            .map(|cell| clean_fragment(&cell.as_node().text_contents()))
            .collect(),
        Err(()) => Vec::new(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests for conjugation extraction
// ─────────────────────────────────────────────────────────────────────────────
