// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! rougekit CLI tool

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use rougekit::{
    DictionaryTokenizer, RougeKind, RougeScores, Scorer, ScorerConfig, Tokenizer,
    UnicodeWordTokenizer, WhitespaceTokenizer,
};
use rougekit_eval::{load_jsonl, score_corpus, GradedReport, Measure, Sample};
use tracing_subscriber::EnvFilter;

type SharedScorer = Scorer<Arc<dyn Tokenizer>>;

#[derive(Parser)]
#[command(name = "rougekit")]
#[command(about = "ROUGE-1/2/L scoring for short answers", long_about = None)]
struct Cli {
    /// Scorer configuration file (YAML, or JSON by extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Tokenizer to split text with
    #[arg(long, global = true, value_enum, default_value_t = TokenizerKind::Whitespace)]
    tokenizer: TokenizerKind,

    /// Word list for the dictionary tokenizer, one word per line
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TokenizerKind {
    /// Split on whitespace
    Whitespace,
    /// Unicode word boundaries
    Unicode,
    /// Longest-match over a word list
    Dictionary,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one candidate against one reference
    Score {
        /// Gold reference text
        reference: String,

        /// Candidate text
        candidate: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a JSON Lines dataset
    Eval {
        /// Dataset path
        #[arg(short, long)]
        dataset: PathBuf,

        /// Number of parallel threads
        #[arg(short, long)]
        parallel: Option<usize>,

        /// Metric that decides pass/fail
        #[arg(short, long, default_value = "rougeL")]
        metric: RougeKind,

        /// Score component compared to the threshold
        #[arg(long, default_value = "f1")]
        measure: Measure,

        /// Minimum value to pass
        #[arg(short, long, default_value_t = rougekit_eval::DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Print the report and pass rate as one JSON document
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let scorer = build_scorer(&cli)?;

    match cli.command {
        Commands::Score {
            reference,
            candidate,
            json,
        } => {
            let scores = scorer.score(&reference, &candidate)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&scores)?);
            } else {
                print_scores(&scores);
            }
        }
        Commands::Eval {
            dataset,
            parallel,
            metric,
            measure,
            threshold,
            json,
        } => {
            let samples = load_jsonl(&dataset)
                .with_context(|| format!("loading {}", dataset.display()))?;
            tracing::info!(samples = samples.len(), "dataset loaded");

            let graded = grade_corpus(&scorer, &samples, parallel, metric, measure, threshold)?;

            if json {
                println!("{}", render_json(&graded)?);
            } else {
                let rate = &graded.pass_rate;
                println!(
                    "{} {}",
                    style("Dataset:").bold(),
                    style(dataset.display()).dim()
                );
                println!("{} {}", style("Samples:").bold(), graded.report.len());
                print_scores(&graded.report.average);
                println!(
                    "{} {}/{} ({:.1}%) with {} {} >= {:.3}",
                    style("Passed:").bold().green(),
                    rate.passed,
                    rate.total,
                    rate.accuracy() * 100.0,
                    rate.metric,
                    rate.measure.name(),
                    rate.threshold
                );
            }
        }
    }

    Ok(())
}

fn build_scorer(cli: &Cli) -> anyhow::Result<SharedScorer> {
    let tokenizer: Arc<dyn Tokenizer> = match cli.tokenizer {
        TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer),
        TokenizerKind::Unicode => Arc::new(UnicodeWordTokenizer),
        TokenizerKind::Dictionary => {
            let path = cli
                .dictionary
                .as_deref()
                .context("--tokenizer dictionary requires --dictionary FILE")?;
            Arc::new(load_dictionary(path)?)
        }
    };

    let config = match &cli.config {
        Some(path) => ScorerConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScorerConfig::default(),
    };

    Ok(Scorer::with_tokenizer(tokenizer).with_config(config))
}

/// Score the corpus once and grade from the stored scores.
///
/// The graded metric is added to the scorer's metrics when missing.
fn grade_corpus(
    scorer: &SharedScorer,
    samples: &[Sample],
    threads: Option<usize>,
    metric: RougeKind,
    measure: Measure,
    threshold: f64,
) -> anyhow::Result<GradedReport> {
    let report = if scorer.config().enabled(metric) {
        score_corpus(scorer, samples, threads)?
    } else {
        let mut metrics = scorer.config().metrics.clone();
        metrics.push(metric);
        let config = scorer.config().clone().with_metrics(metrics);
        score_corpus(&scorer.clone().with_config(config), samples, threads)?
    };
    let pass_rate = report.pass_rate(metric, measure, threshold);
    Ok(GradedReport { report, pass_rate })
}

fn render_json(graded: &GradedReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(graded)?)
}

fn load_dictionary(path: &Path) -> anyhow::Result<DictionaryTokenizer> {
    let dictionary = DictionaryTokenizer::from_path(path)
        .with_context(|| format!("loading dictionary {}", path.display()))?;
    tracing::info!(words = dictionary.len(), "dictionary loaded");
    Ok(dictionary)
}

fn print_scores(scores: &RougeScores) {
    for (metric, score) in scores.iter() {
        println!(
            "{}: {}",
            style(metric.name().to_uppercase()).cyan().bold(),
            score
        );
    }
}
