//! Matrix Driver - alphabet × strand × format × scenario
//!
//! Every cell of the selected dimensions runs all seven scenarios. `e-1` is
//! run with short flags, the rest with long flags, so both encodings are
//! checked against the same golden files.

use crate::error::SuiteError;
use crate::flags::{Alphabet, OutputFormat, Strand};
use crate::record::CaseSpec;
use crate::runner::Executor;
use crate::scenario::{ParameterTable, ScenarioId};
use crate::suite::{RunSummary, SuiteSettings, TestSuite};
use serde::Serialize;

/// Which values of each dimension to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixSelection {
    pub alphabets: Vec<Alphabet>,
    pub strands: Vec<Strand>,
    pub formats: Vec<OutputFormat>,
}

impl Default for MatrixSelection {
    fn default() -> Self {
        Self {
            alphabets: Alphabet::ALL.to_vec(),
            strands: Strand::ALL.to_vec(),
            formats: OutputFormat::ALL.to_vec(),
        }
    }
}

impl MatrixSelection {
    pub fn case_count(&self) -> usize {
        self.alphabets.len() * self.strands.len() * self.formats.len() * ScenarioId::ALL.len()
    }
}

/// All cases of `selection`, in execution order
pub fn plan_cases(selection: &MatrixSelection) -> Vec<CaseSpec> {
    let mut cases = Vec::with_capacity(selection.case_count());
    for &alphabet in &selection.alphabets {
        for &strand in &selection.strands {
            for &format in &selection.formats {
                for scenario in ScenarioId::ALL {
                    cases.push(CaseSpec::new(scenario, alphabet, strand, format));
                }
            }
        }
    }
    cases
}

/// Build every planned record, then run them all.
///
/// A record that cannot be built (missing executable) aborts the run before
/// anything executes; the temp directory is still removed.
pub fn run_matrix(
    settings: SuiteSettings,
    selection: &MatrixSelection,
    executor: &mut dyn Executor,
) -> Result<RunSummary, SuiteError> {
    println!("alphabets: {:?}", names(&selection.alphabets));
    println!("database_strands: {:?}", names(&selection.strands));
    println!("output_extensions: {:?}", names(&selection.formats));
    println!();

    let mut suite = TestSuite::new(settings, ParameterTable::stellar_defaults())?;
    for case in plan_cases(selection) {
        suite.add_case(case)?;
    }
    tracing::info!(
        target: "SUITE",
        records = suite.records().len(),
        temp_dir = %suite.temp_dir().display(),
        "test matrix built"
    );
    suite.run(executor)
}

fn names<T: std::fmt::Display>(values: &[T]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
