use clap::Parser;
use colored::Colorize;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

mod error;
mod extract;
mod filter;
mod normalize;
mod quiz;
mod report;
mod request;
mod schema;
mod scrape;
mod study;
mod table;
mod terminal;

use error::Result;
use schema::TenseSchema;
use scrape::{HttpFetcher, CONJUGATOR_URL};
use study::{study_verbs, StudyConfig};
use terminal::Terminal;

#[derive(Parser)]
#[command(name = "sin-ingles")]
#[command(about = "Spanish verb conjugation flashcards scraped from WordReference")]
struct Args {
    /// Request file: tense ids (or "all") on line 1, one infinitive per following line
    #[arg(long, default_value = "study-verbs.txt")]
    verbs: PathBuf,

    /// Analysis report, overwritten after every verb session
    #[arg(long, default_value = "verbs-analysis.txt")]
    analysis: PathBuf,

    /// Path to a tense schema YAML file (default: the built-in schema/tenses.yaml)
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Conjugation page URL; the infinitive is sent as the `v` query parameter
    #[arg(long, default_value = CONJUGATOR_URL)]
    base_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Write the filtered conjugation dataset as JSON before quizzing
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Seed for the question draw (reproducible sessions)
    #[arg(long)]
    seed: Option<u64>,

    /// Quiet mode - no scraping progress
    #[arg(short, long)]
    quiet: bool,
}

/// The top-level command loop. `study` runs one verb session.
fn run_menu<R, W, F>(term: &mut Terminal<R, W>, mut study: F) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&mut Terminal<R, W>) -> Result<()>,
{
    loop {
        let command = match term.read_line("¿qué te gustaría hacer? ".magenta())? {
            Some(command) => command,
            None => {
                term.say("¡adiós!")?;
                return Ok(());
            }
        };

        match command.as_str() {
            "pruebame" => {
                let prompt = format!("\t{}", "¿qué probarás? (verbos o vocabulario) ".yellow());
                match term.read_line(prompt)?.as_deref() {
                    Some("verbos") => study(term)?,
                    Some("vocabulario") => term.say(format!("\t{}", "¡no quiero probar ahora, señor!".white()))?,
                    Some(_) => term.say(format!("\t{}", "¡no comprende!".red()))?,
                    None => {
                        term.say("¡adiós!")?;
                        return Ok(());
                    }
                }
            }
            "q" => {
                term.say("¡adiós!\n")?;
                return Ok(());
            }
            _ => term.say("¡no comprende!".red())?,
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let schema: Cow<TenseSchema> = match &args.schema {
        Some(path) => Cow::Owned(TenseSchema::load(path)?),
        None => Cow::Borrowed(TenseSchema::builtin()?),
    };

    let fetcher = HttpFetcher::new(&args.base_url, Duration::from_secs(args.timeout))?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let config = StudyConfig {
        verbs_path: args.verbs.clone(),
        analysis_path: args.analysis.clone(),
        dump_path: args.dump.clone(),
        quiet: args.quiet,
    };

    let stdin = io::stdin();
    let mut term = Terminal::new(stdin.lock(), io::stdout());

    run_menu(&mut term, |term| {
        let outcome = study_verbs(&config, &schema, &fetcher, term, &mut rng)?;
        info!(
            "Session over {} items, {} missed",
            outcome.items,
            outcome.report.lines().count()
        );
        Ok(())
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests for the command menu
// ─────────────────────────────────────────────────────────────────────────────
