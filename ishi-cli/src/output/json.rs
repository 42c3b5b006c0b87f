//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs verdicts as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    verdicts: Vec<VerdictData>,
}

/// Data structure for JSON output
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictData {
    /// The input sentence
    pub input: String,
    /// Whether the governing predicate is volitional
    pub volition: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            verdicts: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_verdict(&mut self, input: &str, volition: bool) -> Result<()> {
        self.verdicts.push(VerdictData {
            input: input.to_string(),
            volition,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.verdicts)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.verdicts)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(pretty: bool) -> String {
        let mut buffer = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buffer, pretty);
            formatter.format_verdict("自然言語処理の勉強をする", true).unwrap();
            formatter.format_verdict("自然言語処理は楽しい", false).unwrap();
            formatter.finish().unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_json_array() {
        let output = render(false);
        assert_eq!(
            output,
            "[{\"input\":\"自然言語処理の勉強をする\",\"volition\":true},{\"input\":\"自然言語処理は楽しい\",\"volition\":false}]\n"
        );
    }

    #[test]
    fn test_pretty_output_round_trips() {
        let parsed: Vec<VerdictData> = serde_json::from_str(&render(true)).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].volition);
        assert_eq!(parsed[1].input, "自然言語処理は楽しい");
    }

    #[test]
    fn test_empty_input_is_empty_array() {
        let mut buffer = Vec::new();
        JsonFormatter::new(&mut buffer, false).finish().unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[]\n");
    }
}
