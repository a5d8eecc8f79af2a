//! Invocation records - fully resolved units of work

use crate::flags::{Alphabet, FlagEncoding, OutputFormat, Strand};
use crate::scenario::ScenarioId;
use crate::transform::TransformPipeline;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One cell of the test matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseSpec {
    pub scenario: ScenarioId,
    pub alphabet: Alphabet,
    pub strand: Strand,
    pub format: OutputFormat,
    /// Spelling of the alphabet and strand flags. Scenario arguments always
    /// use the scenario's own encoding, see [`ScenarioId::encoding`].
    pub encoding: FlagEncoding,
}

impl CaseSpec {
    /// Case run with the scenario's own encoding
    pub fn new(
        scenario: ScenarioId,
        alphabet: Alphabet,
        strand: Strand,
        format: OutputFormat,
    ) -> Self {
        Self {
            scenario,
            alphabet,
            strand,
            format,
            encoding: scenario.encoding(),
        }
    }

    /// Override the dimension flag encoding only
    pub fn with_encoding(mut self, encoding: FlagEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// An (expected, actual) file pair compared after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub expected: PathBuf,
    pub actual: PathBuf,
    pub transforms: TransformPipeline,
}

/// Everything needed to run one test and judge its result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRecord {
    pub case: CaseSpec,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub redirect_stdout: PathBuf,
    pub comparisons: Vec<Comparison>,
}

impl InvocationRecord {
    /// Space-joined command line, as printed in the run log
    pub fn command_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.to_string_lossy().into_owned());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_spec_defaults_to_scenario_encoding() {
        let case = CaseSpec::new(
            ScenarioId::E1,
            Alphabet::Dna,
            Strand::Both,
            OutputFormat::Gff,
        );
        assert_eq!(case.encoding, FlagEncoding::Short);
        let long = case.with_encoding(FlagEncoding::Long);
        assert_eq!(long.encoding, FlagEncoding::Long);
        assert_eq!(long.scenario, ScenarioId::E1);
    }

    #[test]
    fn test_command_line() {
        let record = InvocationRecord {
            case: CaseSpec::new(
                ScenarioId::E4,
                Alphabet::Char,
                Strand::Forward,
                OutputFormat::Txt,
            ),
            program: PathBuf::from("/build/bin/stellar"),
            args: vec!["--forward".to_string(), "a.fa".to_string()],
            redirect_stdout: PathBuf::from("/tmp/x/e-4.txt.stdout"),
            comparisons: Vec::new(),
        };
        assert_eq!(record.command_line(), "/build/bin/stellar --forward a.fa");
    }
}
