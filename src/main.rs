//! guesswork CLI: play the word-guessing game and inspect the catalog.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use serde_json::Value;

use guesswork::answer::{AnswerState, parse_token};
use guesswork::config::GameConfig;
use guesswork::engine::Engine;
use guesswork::game::{Turn, Verdict};

#[derive(Parser)]
#[command(name = "guesswork", version, about = "Adaptive word-guessing engine")]
struct Cli {
    /// JSON word catalog.
    #[arg(long, global = true, default_value = "data/words.json")]
    catalog: PathBuf,

    /// Game configuration (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base number of questions (clamped to 5..=18).
    #[arg(long, global = true)]
    total_questions: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on the terminal.
    Play,

    /// Show catalog statistics.
    Info {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show how one attribute is covered by the catalog.
    Attr {
        /// Attribute id, e.g. "aquatique".
        key: String,
    },

    /// Rank words against a set of answers.
    Rank {
        /// Answers as comma-separated key=value pairs, e.g. "vivant=oui,animal=1".
        #[arg(long, default_value = "")]
        answers: String,

        /// Number of words to show.
        #[arg(long, default_value = "25")]
        top: usize,
    },

    /// Suggest the next question for a set of answers.
    Next {
        /// Answers as comma-separated key=value pairs.
        #[arg(long, default_value = "")]
        answers: String,

        /// Questions already asked (comma-separated), on top of the answered ones.
        #[arg(long, default_value = "")]
        asked: String,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(total) = cli.total_questions {
        config.total_questions = total;
    }
    let engine = Engine::from_path(&cli.catalog, config)?;

    match cli.command {
        Commands::Play => play(&engine)?,

        Commands::Info { json } => {
            let info = engine.info();
            if json {
                print_json(&info)?;
            } else {
                println!("{info}");
            }
        }

        Commands::Attr { key } => {
            let report = engine.attribute_report(&key)?;
            print_json(&report)?;
        }

        Commands::Rank { answers, top } => {
            let answers = parse_answers(&answers)?;
            print_json(&engine.rank_top(&answers, top))?;
        }

        Commands::Next { answers, asked } => {
            let answers = parse_answers(&answers)?;
            let mut asked_set: BTreeSet<String> = split_list(&asked).map(str::to_string).collect();
            asked_set.extend(answers.keys().map(str::to_string));
            print_json(&engine.suggest_next(&answers, &asked_set))?;
        }
    }

    Ok(())
}

fn play(engine: &Engine) -> Result<()> {
    let mut rng = rand::thread_rng();
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = std::io::stdout();

    println!("Pensez à un mot. Répondez par oui / non (tout autre réponse = je ne sais pas).");
    let (mut session, mut question) = engine.start()?;
    loop {
        let marker = if question.is_tiebreaker { " (départage)" } else { "" };
        println!(
            "[{}/{}]{marker} {}",
            question.number, question.total, question.text
        );
        print!("> ");
        stdout.flush().into_diagnostic()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line.into_diagnostic()?;
        let raw = Value::String(line.trim().to_string());

        let (next, turn) = engine.answer(session, Some(&question.id), &raw, &mut rng)?;
        session = next;
        match turn {
            Turn::Ask(q) => question = q,
            Turn::Done(verdict) => {
                print_verdict(&verdict);
                return Ok(());
            }
        }
    }
}

fn print_verdict(verdict: &Verdict) {
    println!("Je pense à : {}", verdict.prediction);
    if let Some(message) = verdict.message() {
        println!("{message}");
    } else if verdict.candidates.len() > 1 {
        println!("Autres pistes : {}", verdict.candidates.join(", "));
    }
    println!(
        "({}, écart {:.2}, {} questions)",
        verdict.reason, verdict.debug.gap, verdict.debug.questions_asked
    );
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty())
}

/// Parse "k=v,k=v" where each value is an answer token.
fn parse_answers(s: &str) -> Result<AnswerState> {
    let mut answers = AnswerState::new();
    for pair in split_list(s) {
        let Some((key, value)) = pair.split_once('=') else {
            miette::bail!("expected key=value, got \"{pair}\"");
        };
        let Some(answer) = parse_token(value) else {
            miette::bail!("\"{value}\" is not a yes/no answer for \"{}\"", key.trim());
        };
        answers.set(key.trim(), answer);
    }
    Ok(answers)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}
