use std::fs;
use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use jlpt_quiz::config::DEFAULT_QUESTION_COUNT;
use jlpt_quiz::{
    QuestionSource, Quiz, QuizConfig, QuizError, VocabularyPool, load_bank_from_json,
    load_surface_list_from_json, load_vocabulary_from_json,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["vocabulary", "bank"])))]
struct Args {
    /// JSON vocabulary list; options are generated from the other words
    #[arg(short, long)]
    vocabulary: Option<PathBuf>,

    /// JSON question bank with ready-made options
    #[arg(short, long)]
    bank: Option<PathBuf>,

    /// Number of questions per session
    #[arg(short, long, default_value_t = DEFAULT_QUESTION_COUNT)]
    count: usize,

    /// Seed for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// JSON list of unfamiliar words to drill (vocabulary only)
    #[arg(short, long)]
    unfamiliar: Option<PathBuf>,

    /// Write the last session result to this file as JSON
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), QuizError> {
    let source = load_source(&args)?;
    let config = QuizConfig {
        question_count: args.count,
        seed: args.seed,
        export_path: args.export,
    };

    let result = Quiz::new(source, &config).run()?;

    if let (Some(path), Some(result)) = (&config.export_path, &result) {
        fs::write(path, serde_json::to_string_pretty(result)?)?;
        log::info!("result written to {}", path.display());
    }

    Ok(())
}

fn load_source(args: &Args) -> Result<QuestionSource, QuizError> {
    match (&args.vocabulary, &args.bank) {
        (_, Some(path)) => {
            if args.unfamiliar.is_some() {
                log::warn!("--unfamiliar only applies to vocabulary lists, ignoring it");
            }
            Ok(QuestionSource::Bank(load_bank_from_json(path)?))
        }
        (Some(path), None) => {
            let mut pool = VocabularyPool::new(load_vocabulary_from_json(path)?)?;
            if let Some(list) = &args.unfamiliar {
                let surfaces = load_surface_list_from_json(list)?;
                pool.focus_on_surface_forms(&surfaces);
                log::info!(
                    "drilling {} unfamiliar words against {} distractor candidates",
                    pool.question_indices().len(),
                    pool.len()
                );
            }
            Ok(QuestionSource::Vocabulary(pool))
        }
        (None, None) => unreachable!("clap requires a vocabulary list or a question bank"),
    }
}
