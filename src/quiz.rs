//! Flashcard quiz over (verb, tense, pronoun) items.
//!
//! Every item starts unseen and becomes seen once answered correctly; there is
//! no way back. Draws are uniform over the whole item space, seen or not, so
//! already-mastered items can come up again. The session ends as soon as every
//! item has been seen.

use crate::table::ConjugationTable;
use log::debug;
use rand::seq::IteratorRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::io;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub verb: String,
    pub tense: String,
    pub pronoun: String,
}

impl Item {
    pub fn new(verb: &str, tense: &str, pronoun: &str) -> Self {
        Self {
            verb: verb.to_string(),
            tense: tense.to_string(),
            pronoun: pronoun.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub seen: bool,
    pub incorrect: u32,
}

pub type IncorrectCounts = BTreeMap<Item, u32>;

/// Per-item progress. The key set is fixed at construction.
#[derive(Debug, Clone)]
pub struct QuizState {
    progress: BTreeMap<Item, Progress>,
}

impl QuizState {
    /// Track every (verb, tense, pronoun) of the table as unseen with no errors
    pub fn new(table: &ConjugationTable) -> Self {
        let progress = table
            .iter()
            .flat_map(|(verb, conjugations)| {
                conjugations.iter().flat_map(move |(tense, row)| {
                    row.keys()
                        .map(move |pronoun| (Item::new(verb, tense, pronoun), Progress::default()))
                })
            })
            .collect();
        Self { progress }
    }

    pub fn len(&self) -> usize {
        self.progress.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.progress.is_empty()
    }

    #[cfg(test)]
    pub fn progress(&self, item: &Item) -> Option<Progress> {
        self.progress.get(item).copied()
    }

    #[cfg(test)]
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.progress.keys()
    }

    /// True once every item has been answered correctly at least once
    pub fn is_complete(&self) -> bool {
        self.progress.values().all(|p| p.seen)
    }

    /// Uniform draw over all items, regardless of seen state
    pub fn pick_next<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Item> {
        self.progress.keys().choose(rng)
    }

    /// Exact comparison, no case or accent folding. A miss bumps the item's
    /// incorrect count; a hit marks it seen. Untracked items are never added.
    pub fn record_attempt(&mut self, item: &Item, response: &str, correct_answer: &str) -> bool {
        let correct = response == correct_answer;
        if let Some(progress) = self.progress.get_mut(item) {
            if correct {
                progress.seen = true;
            } else {
                progress.incorrect += 1;
            }
        }
        correct
    }

    /// Incorrect count of every item, zeros included
    pub fn incorrect_counts(&self) -> IncorrectCounts {
        self.progress
            .iter()
            .map(|(item, p)| (item.clone(), p.incorrect))
            .collect()
    }
}

/// The "ask the user" side of a session
pub trait Prompter {
    /// Ask for the form of `item`; returns the raw response line
    fn ask(&mut self, item: &Item) -> io::Result<String>;

    /// Tell the user whether the last response was right
    fn verdict(&mut self, item: &Item, correct: bool) -> io::Result<()>;
}

fn answer_for<'a>(table: &'a ConjugationTable, item: &Item) -> Option<&'a str> {
    table
        .get(&item.verb)?
        .get(&item.tense)?
        .get(&item.pronoun)
        .map(String::as_str)
}

/// Quiz until every item of `table` has been answered correctly.
///
/// Each draw re-asks the same item until the response matches. Prompter
/// errors (including end of input) end the session early.
pub fn run_session<P, R>(table: &ConjugationTable, prompter: &mut P, rng: &mut R) -> io::Result<QuizState>
where
    P: Prompter + ?Sized,
    R: Rng + ?Sized,
{
    let mut state = QuizState::new(table);
    let mut draws = 0usize;

    while !state.is_complete() {
        let item = match state.pick_next(rng) {
            Some(item) => item.clone(),
            None => break,
        };
        let answer = match answer_for(table, &item) {
            Some(answer) => answer,
            None => continue,
        };
        draws += 1;
        debug!("Draw {}: {}/{}/{}", draws, item.verb, item.tense, item.pronoun);

        loop {
            let response = prompter.ask(&item)?;
            let correct = state.record_attempt(&item, &response, answer);
            prompter.verdict(&item, correct)?;
            if correct {
                break;
            }
        }
    }

    debug!("Session complete after {} draws over {} items", draws, state.len());
    Ok(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests for the quiz tracker
// ─────────────────────────────────────────────────────────────────────────────
