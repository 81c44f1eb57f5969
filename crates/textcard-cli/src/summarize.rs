//! Optional text summarization before rendering.
//!
//! The compositor never knows whether its text was summarized. Summarizers
//! are plain `text -> text` functions; the real one is an external program.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

use textcard_core::{TextcardError, TextcardResult};

/// Length bounds forwarded to the summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLimits {
    pub max_length: u32,
    pub min_length: u32,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self {
            max_length: 30,
            min_length: 10,
        }
    }
}

pub trait Summarizer {
    fn summarize(&self, text: &str, limits: SummaryLimits) -> TextcardResult<String>;
}

/// Returns the text unchanged.
pub struct Passthrough;

impl Summarizer for Passthrough {
    fn summarize(&self, text: &str, _limits: SummaryLimits) -> TextcardResult<String> {
        Ok(text.to_string())
    }
}

/// Runs an external program: text on stdin, summary on stdout.
///
/// Limits are passed as `TEXTCARD_MAX_LENGTH` and `TEXTCARD_MIN_LENGTH` in the
/// child's environment.
pub struct CommandSummarizer {
    program: String,
    args: Vec<String>,
}

impl CommandSummarizer {
    /// Build from a command line, split on whitespace.
    pub fn from_command_line(command: &str) -> TextcardResult<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| TextcardError::Summarize("summary command is empty".into()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl Summarizer for CommandSummarizer {
    fn summarize(&self, text: &str, limits: SummaryLimits) -> TextcardResult<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("TEXTCARD_MAX_LENGTH", limits.max_length.to_string())
            .env("TEXTCARD_MIN_LENGTH", limits.min_length.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                TextcardError::Summarize(format!("failed to start '{}': {}", self.program, e))
            })?;

        // Feed stdin from its own thread while this one drains stdout and
        // stderr, so neither side can stall on a full pipe.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = text.to_owned();
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output()?;
        let written = match writer {
            Some(handle) => handle.join().map_err(|_| {
                TextcardError::Summarize(format!("stdin writer for '{}' panicked", self.program))
            })?,
            None => Ok(()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TextcardError::Summarize(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        // A summarizer may exit without reading all of its input.
        if let Err(e) = written {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(TextcardError::Summarize(format!(
                    "failed to write to '{}': {}",
                    self.program, e
                )));
            }
        }

        let summary = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if summary.is_empty() {
            return Err(TextcardError::Summarize(format!(
                "'{}' produced an empty summary",
                self.program
            )));
        }
        Ok(summary)
    }
}
