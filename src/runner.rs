//! Execution & Verification Engine
//!
//! Runs one invocation record to completion, then compares every
//! (expected, actual) pair after normalization. There is no timeout: a hung
//! tool hangs the run.

use crate::error::SuiteError;
use crate::record::{Comparison, InvocationRecord};
use serde::Serialize;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Result of one comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonStatus {
    Match,
    /// First differing line (1-based) after normalization
    Mismatch {
        line: usize,
        expected: Option<String>,
        actual: Option<String>,
    },
    MissingExpected { path: PathBuf },
    MissingActual { path: PathBuf },
    Unreadable { path: PathBuf, reason: String },
}

impl ComparisonStatus {
    pub fn is_match(&self) -> bool {
        matches!(self, ComparisonStatus::Match)
    }

    /// One-line description for the run log
    pub fn describe(&self) -> String {
        match self {
            ComparisonStatus::Match => "match".to_string(),
            ComparisonStatus::Mismatch {
                line,
                expected,
                actual,
            } => format!(
                "first difference at line {}: expected {:?}, got {:?}",
                line, expected, actual
            ),
            ComparisonStatus::MissingExpected { path } => {
                format!("missing golden file {}", path.display())
            }
            ComparisonStatus::MissingActual { path } => {
                format!("missing actual file {}", path.display())
            }
            ComparisonStatus::Unreadable { path, reason } => {
                format!("cannot read {}: {}", path.display(), reason)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonOutcome {
    pub expected: PathBuf,
    pub actual: PathBuf,
    #[serde(flatten)]
    pub status: ComparisonStatus,
}

/// Verdict for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOutcome {
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub exit_success: bool,
    pub comparisons: Vec<ComparisonOutcome>,
}

impl RecordOutcome {
    /// Passes iff the process exited cleanly and every comparison matched
    pub fn passed(&self) -> bool {
        self.exit_success && self.comparisons.iter().all(|c| c.status.is_match())
    }

    pub fn failure_reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        if !self.exit_success {
            reasons.push(match self.exit_code {
                Some(code) => format!("return code is {}, expected 0", code),
                None => "terminated by signal".to_string(),
            });
        }
        reasons.extend(
            self.comparisons
                .iter()
                .filter(|c| !c.status.is_match())
                .map(|c| c.status.describe()),
        );
        reasons
    }
}

/// Seam between the suite and the process layer
pub trait Executor {
    /// Run `record` and judge it. `Err` is an unexpected fault that aborts
    /// the whole run; a failing test is an `Ok` outcome that did not pass.
    fn execute(&mut self, record: &InvocationRecord) -> Result<RecordOutcome, SuiteError>;
}

/// Spawns the real tool
#[derive(Debug, Default)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn execute(&mut self, record: &InvocationRecord) -> Result<RecordOutcome, SuiteError> {
        let status = run_process(record)?;
        if !status.success() {
            tracing::warn!(
                target: "RUNNER",
                code = ?status.code(),
                "{} exited unsuccessfully",
                record.program.display()
            );
        }

        // Outputs are still compared after a bad exit so the report says
        // whether they were produced at all.
        let comparisons = record.comparisons.iter().map(compare).collect();
        Ok(RecordOutcome {
            exit_code: status.code(),
            exit_success: status.success(),
            comparisons,
        })
    }
}

fn run_process(record: &InvocationRecord) -> Result<std::process::ExitStatus, SuiteError> {
    create_parent(&record.redirect_stdout)?;
    for comparison in &record.comparisons {
        create_parent(&comparison.actual)?;
    }

    let stdout = File::create(&record.redirect_stdout).map_err(|source| {
        SuiteError::PrepareOutput {
            path: record.redirect_stdout.clone(),
            source,
        }
    })?;

    tracing::debug!(target: "RUNNER", "spawning {}", record.command_line());
    Command::new(&record.program)
        .args(&record.args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .status()
        .map_err(|source| SuiteError::Spawn {
            program: record.program.clone(),
            source,
        })
}

fn create_parent(path: &Path) -> Result<(), SuiteError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| SuiteError::PrepareOutput {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Read both sides, normalize them with the same pipeline and compare
pub fn compare(comparison: &Comparison) -> ComparisonOutcome {
    let status = match (
        read_side(&comparison.expected),
        read_side(&comparison.actual),
    ) {
        (Side::Missing, _) => ComparisonStatus::MissingExpected {
            path: comparison.expected.clone(),
        },
        (_, Side::Missing) => ComparisonStatus::MissingActual {
            path: comparison.actual.clone(),
        },
        (Side::Unreadable(reason), _) => ComparisonStatus::Unreadable {
            path: comparison.expected.clone(),
            reason,
        },
        (_, Side::Unreadable(reason)) => ComparisonStatus::Unreadable {
            path: comparison.actual.clone(),
            reason,
        },
        (Side::Read(expected), Side::Read(actual)) => {
            compare_contents(comparison, expected, actual)
        }
    };

    if !status.is_match() {
        tracing::info!(
            target: "RUNNER",
            expected = %comparison.expected.display(),
            actual = %comparison.actual.display(),
            "{}",
            status.describe()
        );
    }

    ComparisonOutcome {
        expected: comparison.expected.clone(),
        actual: comparison.actual.clone(),
        status,
    }
}

enum Side {
    Read(Content),
    Missing,
    Unreadable(String),
}

enum Content {
    Text(String),
    /// Not valid UTF-8; only byte-identical files match
    Binary(Vec<u8>),
}

impl Content {
    fn into_bytes(self) -> Vec<u8> {
        match self {
            Content::Text(text) => text.into_bytes(),
            Content::Binary(bytes) => bytes,
        }
    }
}

fn read_side(path: &Path) -> Side {
    match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => Side::Read(Content::Text(text)),
            Err(e) => Side::Read(Content::Binary(e.into_bytes())),
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => Side::Missing,
        Err(e) => Side::Unreadable(e.to_string()),
    }
}

fn compare_contents(
    comparison: &Comparison,
    expected: Content,
    actual: Content,
) -> ComparisonStatus {
    if let (Content::Text(expected), Content::Text(actual)) = (&expected, &actual) {
        let expected = comparison.transforms.apply(expected);
        let actual = comparison.transforms.apply(actual);
        return diff_texts(&expected, &actual);
    }

    // Text transforms cannot apply; fall back to raw bytes
    let invalid = if matches!(expected, Content::Binary(_)) {
        &comparison.expected
    } else {
        &comparison.actual
    };
    if expected.into_bytes() == actual.into_bytes() {
        ComparisonStatus::Match
    } else {
        ComparisonStatus::Unreadable {
            path: invalid.clone(),
            reason: "invalid UTF-8".to_string(),
        }
    }
}

/// Exact comparison, reporting the first differing line
pub fn diff_texts(expected: &str, actual: &str) -> ComparisonStatus {
    if expected == actual {
        return ComparisonStatus::Match;
    }
    let mut expected_lines = expected.split_inclusive('\n');
    let mut actual_lines = actual.split_inclusive('\n');
    let mut line = 1;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (Some(e), Some(a)) if e == a => line += 1,
            (e, a) => {
                return ComparisonStatus::Mismatch {
                    line,
                    expected: e.map(|s| s.strip_suffix('\n').unwrap_or(s).to_string()),
                    actual: a.map(|s| s.strip_suffix('\n').unwrap_or(s).to_string()),
                };
            }
        }
    }
}
