#![forbid(unsafe_code)]

//! `nihongo-ctl`: local CLI companion for `nihongo-api`.
//!
//! Works directly against the `SQLite` store: loads reference data from a
//! JSON seed file and runs drills or answer checks from the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use nihongo_api::conjugation::validate;
use nihongo_api::drill::{
    DrillRequest, RandomDrillGenerator, RandomDrillRequest, SentenceDrillGenerator,
};
use nihongo_api::models::{JlptLevel, WordType};
use nihongo_api::persistence::db;
use nihongo_api::persistence::seed::{self, SeedData};
use nihongo_api::persistence::verb_repo::VerbRepo;
use nihongo_api::{AppError, Result};

const DEFAULT_MAX_ATTEMPTS: usize = 100;

#[derive(Debug, Parser)]
#[command(
    name = "nihongo-ctl",
    about = "Local CLI for the nihongo-api data store",
    version,
    long_about = None
)]
struct Cli {
    /// `SQLite` database file (must match the server's `db_path`).
    #[arg(long, default_value = "nihongo.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upsert verbs, drill data, sentences, grammar topics and kanji from a JSON file.
    Seed {
        /// Path to the seed file.
        file: PathBuf,
    },

    /// Print a sentence drill.
    Drill {
        /// JLPT level (N5..N1).
        #[arg(long, default_value = "N5")]
        level: String,
        /// Comma-separated word types; empty means all.
        #[arg(long, default_value = "")]
        word_types: String,
        /// Number of questions.
        #[arg(long, default_value_t = 5)]
        count: usize,
    },

    /// Print a random conjugation drill.
    Random {
        /// Optional JLPT level.
        #[arg(long)]
        level: Option<String>,
        /// Number of items.
        #[arg(long, default_value_t = 5)]
        count: usize,
    },

    /// Check one answer.
    Check {
        /// Dictionary form, e.g. 食べる.
        dictionary_form: String,
        /// Conjugation key, e.g. `te_form`.
        form_key: String,
        /// Learner input.
        input: String,
    },
}

fn main() {
    let args = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("Failed to start runtime: {err}");
            std::process::exit(1);
        }
    };

    match runtime.block_on(run(args)) {
        Ok(output) => println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default()),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

async fn run(args: Cli) -> Result<serde_json::Value> {
    let db = Arc::new(db::connect(&args.db).await?);

    match args.command {
        Command::Seed { file } => {
            let data = SeedData::load_from_path(&file)?;
            let report = seed::apply(&db, &data).await?;
            Ok(serde_json::to_value(report)?)
        }
        Command::Drill {
            level,
            word_types,
            count,
        } => {
            let request = DrillRequest {
                level: level.parse::<JlptLevel>()?,
                word_types: WordType::parse_list(&word_types)?,
                count,
            };
            let questions = SentenceDrillGenerator::new(db, DEFAULT_MAX_ATTEMPTS)
                .generate(&request)
                .await?;
            Ok(serde_json::to_value(questions)?)
        }
        Command::Random { level, count } => {
            let request = RandomDrillRequest {
                level: level.as_deref().map(str::parse::<JlptLevel>).transpose()?,
                count,
                ..RandomDrillRequest::default()
            };
            let items = RandomDrillGenerator::new(db, DEFAULT_MAX_ATTEMPTS)
                .generate(&request)
                .await?;
            Ok(serde_json::to_value(items)?)
        }
        Command::Check {
            dictionary_form,
            form_key,
            input,
        } => {
            let verb = VerbRepo::new(db)
                .get_by_dictionary_form(&dictionary_form)
                .await?;
            let expected = verb.conjugation(&form_key).ok_or_else(|| {
                AppError::NotFound(format!("form {form_key} not found for {dictionary_form}"))
            })?;
            Ok(serde_json::to_value(validate(expected, &input))?)
        }
    }
}
