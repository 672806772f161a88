#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use jobvocab::app_config::{self, Config, SourceKind};
use jobvocab::exam::Question;
use jobvocab::session::{KeyValueStore, SqliteStore};
use jobvocab::source::{self, ExamSource};
use jobvocab::{Controller, ExamLoader, PageView, Redirect, SessionNavigator};

/// CLI Wrapper for SourceKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSourceKind {
    Http,
    Directory,
}

impl From<CliSourceKind> for SourceKind {
    fn from(cli_kind: CliSourceKind) -> Self {
        match cli_kind {
            CliSourceKind::Http => SourceKind::Http,
            CliSourceKind::Directory => SourceKind::Directory,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the available exams (home dashboard)
    Home,

    /// Select an exam to practice
    Start {
        /// Exam path as listed in the index
        #[arg(value_name = "EXAM_PATH")]
        path: String,

        /// Title to store; looked up from the exam when omitted
        #[arg(long)]
        title: Option<String>,
    },

    /// Select the merged vocab bank
    Vocab,

    /// Show the page selected by the stored session
    Open,

    /// Print the stored session flags
    Session,

    /// Generate shell completions for jobvocab
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Job Vocab BD - vocabulary practice from job exam question banks
#[derive(Parser, Debug)]
#[command(name = "jobvocab")]
#[command(version)]
#[command(about = "Practice job exam vocabulary from static JSON exam files")]
#[command(long_about = "jobvocab fetches an exam index and the exam files it lists, shows the
exam dashboard, and lets you practice a single exam or the merged vocab bank.

EXAMPLES:
    jobvocab home                                  # List exams from the configured source
    jobvocab --source-type directory --source ./site/data home
    jobvocab start data/bcs_44.json                # Select an exam, then...
    jobvocab open                                  # ...show its questions
    jobvocab vocab && jobvocab open --json         # Merged vocab bank as JSON
    jobvocab completions bash > jobvocab.bash

CONFIGURATION:
    Configuration is stored in jobvocab.json by default. If the file doesn't
    exist, a default one is created. Command line options override it.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", global = true, default_value = "jobvocab.json")]
    config_path: String,

    /// Where exam files are read from
    #[arg(long, global = true, value_enum)]
    source_type: Option<CliSourceKind>,

    /// Base URL or directory holding the exam files
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Index file path relative to the source
    #[arg(short, long, global = true)]
    index: Option<String>,

    /// Session store file
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "jobvocab", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&cli)?;

    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let source = source::from_config(&config.source)
        .context("Failed to set up the exam source")?;
    let store = match &config.session.store_path {
        Some(path) => SqliteStore::open(path),
        None => SqliteStore::open_default(),
    }
    .context("Failed to open the session store")?;

    let controller = Controller::new(
        ExamLoader::new(source, config.source.index_file.clone()),
        SessionNavigator::new(store),
    );

    run_command(&cli, &controller).await
}

// Config file first, then command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(kind) = &cli.source_type {
        config.source.kind = kind.clone().into();
    }

    if let Some(location) = &cli.source {
        config.source.location = location.clone();
    }

    if let Some(index) = &cli.index {
        config.source.index_file = index.clone();
    }

    if let Some(store) = &cli.store {
        config.session.store_path = Some(store.clone());
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    Ok(config)
}

async fn run_command<S, K>(cli: &CommandLineOptions, controller: &Controller<S, K>) -> Result<()>
where
    S: ExamSource,
    K: KeyValueStore,
{
    match &cli.command {
        Commands::Home => {
            let view = with_spinner(cli.json, "Loading exams...", controller.home()).await;
            print_view(&view, cli.json)
        }
        Commands::Start { path, title } => {
            let redirect = controller.start_exam(path, title.as_deref()).await?;
            print_redirect(redirect, cli.json)
        }
        Commands::Vocab => {
            let redirect = controller.start_vocab_bank()?;
            print_redirect(redirect, cli.json)
        }
        Commands::Open => {
            let view = with_spinner(cli.json, "Loading questions...", controller.open_page()).await?;
            print_view(&view, cli.json)
        }
        Commands::Session => {
            let state = controller.session()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                println!("currentExamPath:  {}", state.current_exam_path.as_deref().unwrap_or("-"));
                println!("currentExamTitle: {}", state.current_exam_title.as_deref().unwrap_or("-"));
                println!(
                    "appMode:          {}",
                    state.app_mode.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string())
                );
            }
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

// Spinner on stderr while one fetch-aggregate cycle runs
async fn with_spinner<F: Future>(hidden: bool, message: &'static str, work: F) -> F::Output {
    let spinner = if hidden {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };

    spinner.set_message(message);
    let output = work.await;
    spinner.finish_and_clear();
    output
}

fn print_redirect(redirect: Redirect, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "redirect": redirect.target() }));
    } else {
        println!("-> {}", redirect.target());
    }
    Ok(())
}

fn print_view(view: &PageView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    match view {
        PageView::Home { exams } => {
            if exams.is_empty() {
                println!("No exams found.");
            }
            for exam in exams {
                println!(
                    "{}  [{}] {} ({} questions)",
                    exam.info.date.as_deref().unwrap_or("----------"),
                    exam.info.category.as_deref().unwrap_or("general"),
                    exam.info.title.as_deref().unwrap_or(&exam.path),
                    exam.question_count
                );
                println!("    {}", exam.path);
            }
        }
        PageView::Practice { title, questions, .. } => {
            println!("{}", title);
            if questions.is_empty() {
                println!("No questions found.");
            }
            for (i, question) in questions.iter().enumerate() {
                print_question(i + 1, question, None);
            }
        }
        PageView::Vocab { title, entries } => {
            println!("{}", title);
            if entries.is_empty() {
                println!("No questions found.");
            }
            for (i, entry) in entries.iter().enumerate() {
                print_question(i + 1, &entry.question, Some(&entry.source_exam));
            }
        }
    }

    Ok(())
}

// Questions are free-form; show the first prompt-like field and any answer
fn print_question(number: usize, question: &Question, source_exam: Option<&str>) {
    let prompt = ["question", "prompt", "word", "q"]
        .iter()
        .find_map(|key| question.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| serde_json::Value::Object(question.clone()).to_string());

    match source_exam {
        Some(exam) if !exam.is_empty() => println!("{:>4}. {}  [{}]", number, prompt, exam),
        _ => println!("{:>4}. {}", number, prompt),
    }

    if let Some(options) = question.get("options").and_then(|v| v.as_array()) {
        let options: Vec<String> = options
            .iter()
            .map(|o| o.as_str().map(str::to_string).unwrap_or_else(|| o.to_string()))
            .collect();
        println!("      {}", options.join(" | "));
    }

    if let Some(answer) = question.get("answer") {
        let answer = answer.as_str().map(str::to_string).unwrap_or_else(|| answer.to_string());
        println!("      answer: {}", answer);
    }
}
