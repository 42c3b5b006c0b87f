//! Juman++ | KNP process pipeline
//!
//! Raw text is written to the morphological analyzer, whose output is piped
//! straight into the dependency parser. The parser's `-tab` output is read
//! back and handed to [`super::knp::parse_sentence`].

use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::{knp, Analyzer, ParsedSentence};
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;

/// Poll interval while waiting for the pipeline to finish
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Analyzer backed by external Juman++ and KNP processes
#[derive(Debug, Clone)]
pub struct KnpCommand {
    config: AnalyzerConfig,
}

impl Default for KnpCommand {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl KnpCommand {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Run the pipeline and return the raw `-tab` output
    pub fn run(&self, text: &str) -> Result<String, AnalyzerError> {
        let start = Instant::now();
        tracing::debug!(
            juman = ?self.config.juman,
            knp = ?self.config.knp,
            "invoking analyzer"
        );

        let mut juman = spawn(&self.config.juman, Stdio::piped(), Stdio::piped())?;
        let juman_out = juman
            .stdout
            .take()
            .ok_or_else(|| AnalyzerError::Io(std::io::Error::other("juman stdout not captured")))?;

        let mut knp = match spawn(&self.config.knp, Stdio::from(juman_out), Stdio::piped()) {
            Ok(child) => child,
            Err(e) => {
                terminate(&mut juman);
                return Err(e);
            }
        };

        let stdout = drain(knp.stdout.take());
        let knp_stderr = drain(knp.stderr.take());
        let juman_stderr = drain(juman.stderr.take());

        // Input ends with a newline so that line-based analyzers flush
        let input = feed(juman.stdin.take(), format!("{text}\n"));

        let knp_status = match wait_with_timeout(&mut knp, self.config.timeout, start) {
            Ok(status) => status,
            Err(e) => {
                terminate(&mut knp);
                terminate(&mut juman);
                return Err(e);
            }
        };
        let juman_status = match wait_with_timeout(&mut juman, self.config.timeout, start) {
            Ok(status) => status,
            Err(e) => {
                terminate(&mut juman);
                return Err(e);
            }
        };

        let written = input.map_or(Ok(()), |h| h.join().unwrap_or(Ok(())));
        let stdout = collect(stdout);
        let knp_stderr = collect(knp_stderr);
        let juman_stderr = collect(juman_stderr);

        if !juman_status.success() {
            return Err(failure(juman_status, &juman_stderr));
        }
        if !knp_status.success() {
            return Err(failure(knp_status, &knp_stderr));
        }
        written?;

        tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "analyzer finished");
        Ok(String::from_utf8(stdout)?)
    }
}

impl Analyzer for KnpCommand {
    fn analyze(&self, text: &str) -> Result<ParsedSentence, AnalyzerError> {
        let output = self.run(text)?;
        Ok(knp::parse_sentence(&output)?)
    }
}

fn spawn(command: &[String], stdin: Stdio, stdout: Stdio) -> Result<Child, AnalyzerError> {
    let (program, args) = command.split_first().ok_or_else(|| AnalyzerError::Spawn {
        command: String::new(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command line"),
    })?;

    Command::new(program)
        .args(args)
        .stdin(stdin)
        .stdout(stdout)
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| AnalyzerError::Spawn {
            command: program.clone(),
            source,
        })
}

/// Write the input on a helper thread so a stalled analyzer cannot block
/// the timeout loop; the pipe closes when the thread ends
fn feed<W: Write + Send + 'static>(
    stdin: Option<W>,
    input: String,
) -> Option<JoinHandle<std::io::Result<()>>> {
    stdin.map(|mut stdin| thread::spawn(move || stdin.write_all(input.as_bytes())))
}

/// Read a child stream to the end on a helper thread
fn drain<R: Read + Send + 'static>(stream: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    stream.map(|mut stream| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stream.read_to_end(&mut buffer);
            buffer
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .map(|h| h.join().unwrap_or_default())
        .unwrap_or_default()
}

fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
    start: Instant,
) -> Result<ExitStatus, AnalyzerError> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if start.elapsed() >= timeout {
            return Err(AnalyzerError::Timeout(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn failure(status: ExitStatus, stderr: &[u8]) -> AnalyzerError {
    AnalyzerError::Failed {
        status: status.to_string(),
        stderr: String::from_utf8_lossy(stderr).trim().to_string(),
    }
}
