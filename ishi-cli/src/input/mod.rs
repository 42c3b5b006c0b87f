//! Input handling module
//!
//! Inputs come from files (glob patterns allowed) or stdin. Raw text holds
//! one sentence per line; KNP input holds `EOS`-terminated analyzer output.

pub mod file_reader;
pub mod glob_resolver;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;

use anyhow::{Context, Result};
use ishi_core::analysis::knp;
use ishi_core::ParsedSentence;

/// Format of the input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// One raw sentence per line, analyzed with Juman++/KNP
    Text,
    /// KNP `-tab` output, one verdict per sentence
    Knp,
}

/// One unit of work for the classifier
#[derive(Debug, Clone, PartialEq)]
pub enum InputItem {
    Text(String),
    Parsed(ParsedSentence),
}

impl InputItem {
    /// Label used in output and error messages
    pub fn label(&self) -> String {
        match self {
            InputItem::Text(text) => text.clone(),
            InputItem::Parsed(sentence) => sentence.surface(),
        }
    }
}

/// Split one input document into work items
pub fn parse_items(content: &str, format: InputFormat, source: &str) -> Result<Vec<InputItem>> {
    match format {
        InputFormat::Text => Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| InputItem::Text(line.to_string()))
            .collect()),
        InputFormat::Knp => {
            let sentences = knp::parse_document(content)
                .with_context(|| format!("Failed to parse KNP output from {source}"))?;
            Ok(sentences.into_iter().map(InputItem::Parsed).collect())
        }
    }
}
