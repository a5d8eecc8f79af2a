//! Parameter Table - Named scenarios and their fixed tool arguments
//!
//! Every scenario pins the aligner's tunable knobs (error rate, minimal
//! match length, seeding parameters, verbosity) to the values the golden
//! outputs were recorded with. The table is built once at startup and then
//! only read.

use crate::error::SuiteError;
use crate::flags::FlagEncoding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One of the recorded scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScenarioId {
    #[serde(rename = "e-1")]
    E1,
    #[serde(rename = "5e-2")]
    FiveE2,
    #[serde(rename = "25e-3")]
    TwentyFiveE3,
    #[serde(rename = "75e-3")]
    SeventyFiveE3,
    #[serde(rename = "e-4")]
    E4,
    #[serde(rename = "minLen20")]
    MinLen20,
    #[serde(rename = "minLen150")]
    MinLen150,
}

impl ScenarioId {
    /// Scenarios in the order the matrix runs them
    pub const ALL: [ScenarioId; 7] = [
        ScenarioId::E1,
        ScenarioId::FiveE2,
        ScenarioId::TwentyFiveE3,
        ScenarioId::SeventyFiveE3,
        ScenarioId::E4,
        ScenarioId::MinLen20,
        ScenarioId::MinLen150,
    ];

    /// Name used for output and golden file names
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::E1 => "e-1",
            ScenarioId::FiveE2 => "5e-2",
            ScenarioId::TwentyFiveE3 => "25e-3",
            ScenarioId::SeventyFiveE3 => "75e-3",
            ScenarioId::E4 => "e-4",
            ScenarioId::MinLen20 => "minLen20",
            ScenarioId::MinLen150 => "minLen150",
        }
    }

    /// Error-rate key of the simulated input pair this scenario reads
    pub fn error_rate(&self) -> &'static str {
        match self {
            ScenarioId::MinLen20 | ScenarioId::MinLen150 => ScenarioId::FiveE2.name(),
            other => other.name(),
        }
    }

    /// Encoding the scenario is run with. `e-1` is the short-flag guard.
    pub fn encoding(&self) -> FlagEncoding {
        match self {
            ScenarioId::E1 => FlagEncoding::Short,
            _ => FlagEncoding::Long,
        }
    }

    /// Tool parameters recorded for this scenario
    pub fn params(&self) -> ScenarioParams {
        let base = ScenarioParams::default();
        match self {
            ScenarioId::E1 => ScenarioParams {
                epsilon: "0.1",
                ..base
            },
            ScenarioId::FiveE2 => base,
            ScenarioId::TwentyFiveE3 => ScenarioParams {
                epsilon: "0.025",
                ..base
            },
            ScenarioId::SeventyFiveE3 => ScenarioParams {
                epsilon: "0.075",
                ..base
            },
            ScenarioId::E4 => ScenarioParams {
                epsilon: "0.0001",
                ..base
            },
            ScenarioId::MinLen20 => ScenarioParams {
                min_length: 20,
                ..base
            },
            ScenarioId::MinLen150 => ScenarioParams {
                min_length: 150,
                ..base
            },
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioId {
    type Err = SuiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| SuiteError::UnknownScenario(s.to_string()))
    }
}

// ============================================================
// Parameters
// ============================================================

/// Tunable knobs of the aligner
///
/// `epsilon` stays textual so the argument reproduces the recorded command
/// line exactly (`0.0001`, not `1e-4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioParams {
    pub epsilon: &'static str,
    pub min_length: u32,
    pub x_drop: u32,
    pub kmer: u32,
    pub num_matches: u32,
    pub sort_thresh: u32,
    pub verbose: bool,
    /// Keeps timing lines out of the log so it can be diffed
    pub suppress_runtime_printing: bool,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            epsilon: "0.05",
            min_length: 50,
            x_drop: 10,
            kmer: 7,
            num_matches: 5000,
            sort_thresh: 10000,
            verbose: true,
            suppress_runtime_printing: true,
        }
    }
}

impl ScenarioParams {
    /// Render the parameters as argument tokens in `encoding`
    pub fn to_args(&self, encoding: FlagEncoding) -> Vec<String> {
        let short = encoding == FlagEncoding::Short;
        let flag = |s: &str, l: &str| if short { s.to_string() } else { l.to_string() };

        let mut args = vec![
            flag("-e", "--epsilon"),
            self.epsilon.to_string(),
            flag("-l", "--minLength"),
            self.min_length.to_string(),
            flag("-x", "--xDrop"),
            self.x_drop.to_string(),
            flag("-k", "--kmer"),
            self.kmer.to_string(),
            flag("-n", "--numMatches"),
            self.num_matches.to_string(),
            flag("-s", "--sortThresh"),
            self.sort_thresh.to_string(),
        ];
        if self.verbose {
            args.push(flag("-v", "--verbose"));
        }
        if self.suppress_runtime_printing {
            args.push(flag("-no-rt", "--suppress-runtime-printing"));
        }
        args
    }
}

// ============================================================
// Table
// ============================================================

/// Immutable scenario → arguments table
#[derive(Debug, Clone)]
pub struct ParameterTable {
    entries: BTreeMap<ScenarioId, Vec<String>>,
}

impl ParameterTable {
    /// Table with every recorded scenario, each rendered in its own encoding
    pub fn stellar_defaults() -> Self {
        Self::from_entries(
            ScenarioId::ALL
                .iter()
                .map(|id| (*id, id.params().to_args(id.encoding()))),
        )
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (ScenarioId, Vec<String>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Arguments for `id`; a miss is an error, never an empty command
    pub fn args(&self, id: ScenarioId) -> Result<&[String], SuiteError> {
        self.entries
            .get(&id)
            .map(Vec::as_slice)
            .ok_or_else(|| SuiteError::UnknownScenario(id.name().to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
