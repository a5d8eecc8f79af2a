//! stellar_cli_tests - Regression-test driver for the stellar CLI
//!
//! Runs the aligner over a matrix of alphabets, database strands, output
//! formats and parameter scenarios, and compares every output against the
//! recorded golden files after stripping host-specific noise.
//!
//! # Modules
//!
//! - [`scenario`] - Parameter table (scenario → fixed tool arguments)
//! - [`flags`] - Dimension values and their short/long flag encodings
//! - [`transform`] - Output normalization pipeline
//! - [`paths`] - File layout conventions and executable lookup
//! - [`record`] - Invocation records
//! - [`builder`] - Test case builder
//! - [`runner`] - Process execution and normalized comparison
//! - [`run_dir`] - Scoped temp directory
//! - [`suite`] - Sequential execution and tallying
//! - [`matrix`] - Cross-product driver
//! - [`report`] - JSON run report
//! - [`config`] / [`logging`] - Ambient configuration and tracing setup

pub mod error;

// Leaves
pub mod flags;
pub mod scenario;
pub mod transform;

// Records and their construction
pub mod builder;
pub mod paths;
pub mod record;

// Execution
pub mod matrix;
pub mod run_dir;
pub mod runner;
pub mod suite;

// Ambient
pub mod config;
pub mod logging;
pub mod report;

// Convenient re-exports at crate root
pub use builder::TestCaseBuilder;
pub use error::SuiteError;
pub use flags::{Alphabet, FlagEncoding, OutputFormat, Strand};
pub use matrix::{MatrixSelection, plan_cases, run_matrix};
pub use record::{CaseSpec, Comparison, InvocationRecord};
pub use runner::{Executor, ProcessExecutor, RecordOutcome};
pub use scenario::{ParameterTable, ScenarioId};
pub use suite::{RunSummary, SuiteSettings, TestSuite};
pub use transform::{Transform, TransformPipeline};
