//! Test suite - owns the records of one run and drives their execution
//!
//! Records are executed strictly one after another. Human-readable status
//! goes to stdout (command line, then `OK`/`FAILED`, then a summary block);
//! structured detail goes through `tracing`.

use crate::builder::TestCaseBuilder;
use crate::error::SuiteError;
use crate::paths::SuitePaths;
use crate::record::{CaseSpec, InvocationRecord};
use crate::run_dir::RunTempDir;
use crate::runner::{Executor, RecordOutcome};
use crate::scenario::ParameterTable;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Per-record line of the run report
#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    pub case: CaseSpec,
    pub command_line: String,
    pub passed: bool,
    pub failure_reasons: Vec<String>,
}

/// Aggregate result of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub failed: usize,
    pub successful: usize,
    pub records: Vec<RecordReport>,
}

impl RunSummary {
    fn record(&mut self, record: &InvocationRecord, outcome: &RecordOutcome) {
        let passed = outcome.passed();
        self.total += 1;
        if passed {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.records.push(RecordReport {
            case: record.case,
            command_line: record.command_line(),
            passed,
            failure_reasons: outcome.failure_reasons(),
        });
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn print(&self) {
        println!("==============================");
        println!("     total tests: {}", self.total);
        println!("    failed tests: {}", self.failed);
        println!("successful tests: {}", self.successful);
        println!("==============================");
    }
}

/// Suite settings that do not vary per record
#[derive(Debug, Clone)]
pub struct SuiteSettings {
    pub source_root: PathBuf,
    pub binary_root: PathBuf,
    pub app_test_dir: PathBuf,
    pub program: String,
    pub relative_binary_path: PathBuf,
}

pub struct TestSuite {
    settings: SuiteSettings,
    table: ParameterTable,
    paths: SuitePaths,
    run_dir: RunTempDir,
    records: Vec<InvocationRecord>,
}

impl TestSuite {
    /// Acquire the run's temp directory and prepare an empty suite
    pub fn new(settings: SuiteSettings, table: ParameterTable) -> Result<Self, SuiteError> {
        let run_dir = RunTempDir::acquire()?;
        Ok(Self::with_run_dir(settings, table, run_dir))
    }

    pub fn with_run_dir(
        settings: SuiteSettings,
        table: ParameterTable,
        run_dir: RunTempDir,
    ) -> Self {
        let paths = SuitePaths::new(
            &settings.source_root,
            &settings.binary_root,
            &settings.app_test_dir,
            run_dir.path(),
        );
        Self {
            settings,
            table,
            paths,
            run_dir,
            records: Vec::new(),
        }
    }

    pub fn paths(&self) -> &SuitePaths {
        &self.paths
    }

    pub fn temp_dir(&self) -> &Path {
        self.run_dir.path()
    }

    pub fn records(&self) -> &[InvocationRecord] {
        &self.records
    }

    fn builder(&self) -> TestCaseBuilder<'_> {
        TestCaseBuilder::new(
            &self.table,
            &self.paths,
            self.settings.program.clone(),
            self.settings.relative_binary_path.clone(),
        )
    }

    /// Build and queue the record for `case`
    pub fn add_case(&mut self, case: CaseSpec) -> Result<(), SuiteError> {
        let record = self.builder().build(&case)?;
        self.records.push(record);
        Ok(())
    }

    /// Queue an already built record
    pub fn push_record(&mut self, record: InvocationRecord) {
        self.records.push(record);
    }

    /// Execute every record in order, then remove the temp directory.
    ///
    /// Failing records are counted and the run continues. An `Err` from the
    /// executor stops the run; it is returned after cleanup.
    pub fn run(self, executor: &mut dyn Executor) -> Result<RunSummary, SuiteError> {
        let TestSuite {
            records, run_dir, ..
        } = self;

        println!("Executing test for stellar");
        println!("=========================");
        println!();

        let summary = run_dir.scope(|_| {
            let mut summary = RunSummary::default();
            for record in &records {
                println!("{}", record.command_line());
                let outcome = executor.execute(record)?;
                if outcome.passed() {
                    println!("OK");
                } else {
                    println!("FAILED");
                    for reason in outcome.failure_reasons() {
                        tracing::warn!(target: "SUITE", case = ?record.case, "{}", reason);
                    }
                }
                summary.record(record, &outcome);
            }
            Ok(summary)
        })?;

        summary.print();
        tracing::info!(
            target: "SUITE",
            total = summary.total,
            failed = summary.failed,
            successful = summary.successful,
            "run finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{Alphabet, OutputFormat, Strand};
    use crate::runner::{ComparisonOutcome, ComparisonStatus};
    use crate::scenario::ScenarioId;

    /// Fails every record whose index is listed; faults at `fault_at`
    struct ScriptedExecutor {
        calls: usize,
        failing: Vec<usize>,
        fault_at: Option<usize>,
    }

    impl Executor for ScriptedExecutor {
        fn execute(&mut self, _record: &InvocationRecord) -> Result<RecordOutcome, SuiteError> {
            let index = self.calls;
            self.calls += 1;
            if self.fault_at == Some(index) {
                return Err(SuiteError::Config("executor fault".to_string()));
            }
            let status = if self.failing.contains(&index) {
                ComparisonStatus::Mismatch {
                    line: 1,
                    expected: Some("a".to_string()),
                    actual: Some("b".to_string()),
                }
            } else {
                ComparisonStatus::Match
            };
            Ok(RecordOutcome {
                exit_code: Some(0),
                exit_success: true,
                comparisons: vec![ComparisonOutcome {
                    expected: PathBuf::from("gold"),
                    actual: PathBuf::from("actual"),
                    status,
                }],
            })
        }
    }

    fn suite_with(n: usize) -> TestSuite {
        let settings = SuiteSettings {
            source_root: PathBuf::from("/src"),
            binary_root: PathBuf::from("/build"),
            app_test_dir: PathBuf::from("test/cli"),
            program: "stellar".to_string(),
            relative_binary_path: PathBuf::from("."),
        };
        let mut suite = TestSuite::new(settings, ParameterTable::stellar_defaults()).unwrap();
        let records: Vec<_> = {
            let builder = suite.builder();
            ScenarioId::ALL
                .iter()
                .cycle()
                .take(n)
                .map(|id| {
                    let case = CaseSpec::new(*id, Alphabet::Dna, Strand::Both, OutputFormat::Gff);
                    builder
                        .build_with_program(&case, PathBuf::from("/build/stellar"))
                        .unwrap()
                })
                .collect()
        };
        for record in records {
            suite.push_record(record);
        }
        suite
    }

    fn run_counts(n: usize, failing: Vec<usize>) {
        let suite = suite_with(n);
        let temp = suite.temp_dir().to_path_buf();
        let f = failing.len();
        let mut executor = ScriptedExecutor {
            calls: 0,
            failing,
            fault_at: None,
        };

        let summary = suite.run(&mut executor).unwrap();

        assert_eq!(summary.total, n);
        assert_eq!(summary.failed, f);
        assert_eq!(summary.successful, n - f);
        assert_eq!(summary.has_failures(), f > 0);
        assert_eq!(summary.records.len(), n);
        assert!(!temp.exists(), "temp dir must be removed");
    }

    #[test]
    fn test_all_pass() {
        run_counts(7, vec![]);
    }

    #[test]
    fn test_some_fail() {
        run_counts(9, vec![0, 4, 8]);
    }

    #[test]
    fn test_all_fail() {
        run_counts(3, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_run() {
        run_counts(0, vec![]);
    }

    #[test]
    fn test_fault_propagates_after_cleanup() {
        let suite = suite_with(5);
        let temp = suite.temp_dir().to_path_buf();
        let mut executor = ScriptedExecutor {
            calls: 0,
            failing: vec![0],
            fault_at: Some(2),
        };

        let result = suite.run(&mut executor);

        assert!(matches!(result, Err(SuiteError::Config(msg)) if msg == "executor fault"));
        assert_eq!(executor.calls, 3, "no record runs after the fault");
        assert!(!temp.exists());
    }

    #[test]
    fn test_failed_record_report_carries_reasons() {
        let suite = suite_with(2);
        let mut executor = ScriptedExecutor {
            calls: 0,
            failing: vec![1],
            fault_at: None,
        };
        let summary = suite.run(&mut executor).unwrap();
        assert!(summary.records[0].passed);
        assert!(!summary.records[1].passed);
        assert_eq!(summary.records[1].failure_reasons.len(), 1);
        assert!(
            summary.records[1]
                .command_line
                .starts_with("/build/stellar --alphabet dna")
        );
    }
}
