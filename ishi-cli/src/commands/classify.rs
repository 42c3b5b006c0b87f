//! Classify command implementation

use anyhow::{Context, Result};
use clap::Args;
use ishi_core::{Analyzer, Classifier, KnpCommand};
use rayon::prelude::*;
use std::io;
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{parse_items, resolve_patterns, FileReader, InputFormat, InputItem};
use crate::output::{JsonFormatter, OutputFormat, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;

/// Arguments for classification
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Input files or patterns (supports glob); stdin when omitted
    #[arg(value_name = "FILE")]
    pub input: Vec<String>,

    /// Input format
    #[arg(short, long, value_enum, default_value = "text")]
    pub input_format: InputFormat,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "ISHI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Lexicon file replacing the bundled lexicon
    #[arg(short, long, value_name = "FILE")]
    pub lexicon: Option<PathBuf>,

    /// Analyzer timeout per sentence in seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Classify inputs in parallel (output order is preserved)
    #[arg(short, long)]
    pub parallel: bool,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ClassifyArgs {
    /// Execute the classify command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting classification");
        log::debug!("Arguments: {:?}", self);

        let config = self.load_config()?;
        let core_config = config.classifier_config()?;
        let lexicon = core_config
            .load_lexicon()
            .context("Failed to load lexicon")?;
        log::info!("Using lexicon `{}`", lexicon.name());

        let classifier = Classifier::new(&lexicon, KnpCommand::new(core_config.analyzer));

        let items = self.read_items()?;
        log::info!("Classifying {} inputs", items.len());

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_sentences(items.len() as u64);

        let verdicts: Vec<bool> = if self.parallel {
            items
                .par_iter()
                .map(|item| classify_item(&classifier, item, &progress))
                .collect::<Result<_>>()?
        } else {
            items
                .iter()
                .map(|item| classify_item(&classifier, item, &progress))
                .collect::<Result<_>>()?
        };
        progress.finish();

        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::stdout()),
            OutputFormat::Json => Box::new(JsonFormatter::new(
                io::stdout(),
                config.output.pretty_json,
            )),
        };

        for (item, volition) in items.iter().zip(verdicts) {
            formatter.format_verdict(&item.label(), volition)?;
        }
        formatter.finish()?;

        log::info!("Classification complete");
        Ok(())
    }

    /// Configuration file merged with command-line overrides
    fn load_config(&self) -> Result<CliConfig> {
        let config = match &self.config {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                CliConfig::load(path)?
            }
            None => CliConfig::default(),
        };

        Ok(config
            .with_timeout(self.timeout)
            .with_lexicon(self.lexicon.clone()))
    }

    fn read_items(&self) -> Result<Vec<InputItem>> {
        if self.input.is_empty() {
            log::debug!("Reading from stdin");
            let content = FileReader::read_stdin()?;
            return parse_items(&content, self.input_format, "stdin");
        }

        let mut items = Vec::new();
        for path in resolve_patterns(&self.input)? {
            log::debug!("Reading {}", path.display());
            let content = FileReader::read_text(&path)?;
            items.extend(parse_items(
                &content,
                self.input_format,
                &path.display().to_string(),
            )?);
        }
        Ok(items)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }

        Ok(())
    }
}

fn classify_item<A: Analyzer>(
    classifier: &Classifier<'_, A>,
    item: &InputItem,
    progress: &ProgressReporter,
) -> Result<bool> {
    let verdict = match item {
        InputItem::Text(text) => classifier.classify(text),
        InputItem::Parsed(sentence) => classifier.classify(sentence),
    };
    progress.sentence_completed();

    verdict.map_err(|e| {
        CliError::ClassificationError {
            input: item.label(),
            reason: e.to_string(),
        }
        .into()
    })
}
