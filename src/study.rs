//! The verb study run: request file → scrape → filter → quiz → analysis

use crate::error::Result;
use crate::filter::filter_tenses;
use crate::quiz::{run_session, Prompter};
use crate::report::{build_report, write_report};
use crate::request::RequestSpec;
use crate::schema::TenseSchema;
use crate::scrape::{scrape_table, Fetcher};
use crate::table::ConjugationTable;
use log::info;
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Files and switches for one study run
#[derive(Debug, Clone)]
pub struct StudyConfig {
    pub verbs_path: PathBuf,
    pub analysis_path: PathBuf,
    pub dump_path: Option<PathBuf>,
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyOutcome {
    pub items: usize,
    pub report: String,
}

/// Run one full verb session. Configuration and fetch errors surface before
/// the first question; the analysis file is only written once every item
/// has been answered.
pub fn study_verbs<P, R>(
    config: &StudyConfig,
    schema: &TenseSchema,
    fetcher: &dyn Fetcher,
    prompter: &mut P,
    rng: &mut R,
) -> Result<StudyOutcome>
where
    P: Prompter + ?Sized,
    R: Rng + ?Sized,
{
    let request = RequestSpec::load(&config.verbs_path, schema)?;
    info!(
        "Studying {} verb(s), tenses: {}",
        request.verbs().len(),
        request.tenses().join(", ")
    );

    let full = scrape_table(fetcher, request.verbs(), config.quiet)?;
    let filtered = filter_tenses(&full, request.tenses(), schema)?;

    if let Some(path) = &config.dump_path {
        dump_table(path, &filtered)?;
        info!("Dataset written to {}", path.display());
    }

    let state = run_session(&filtered, prompter, rng)?;
    let report = build_report(&state.incorrect_counts());
    write_report(&config.analysis_path, &report)?;
    info!("Analysis written to {}", config.analysis_path.display());

    Ok(StudyOutcome {
        items: state.len(),
        report,
    })
}

fn dump_table(path: &Path, table: &ConjugationTable) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, table)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// End-to-end tests with canned pages and scripted answers
// ─────────────────────────────────────────────────────────────────────────────
