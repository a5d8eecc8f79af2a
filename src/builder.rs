//! Test Case Builder - CaseSpec → InvocationRecord
//!
//! Argument order is fixed: dimension flags, scenario arguments, `--out`,
//! then the two positional inputs. The tool reads its inputs by position,
//! and the golden outputs were recorded with exactly this order.

use crate::error::SuiteError;
use crate::paths::{self, InputSide, SuitePaths};
use crate::record::{CaseSpec, Comparison, InvocationRecord};
use crate::scenario::ParameterTable;
use crate::transform::TransformPipeline;
use std::path::{Path, PathBuf};

pub const OUT_FLAG: &str = "--out";

pub struct TestCaseBuilder<'a> {
    table: &'a ParameterTable,
    paths: &'a SuitePaths,
    program: String,
    relative_binary_path: PathBuf,
    transforms: TransformPipeline,
}

impl<'a> TestCaseBuilder<'a> {
    pub fn new(
        table: &'a ParameterTable,
        paths: &'a SuitePaths,
        program: impl Into<String>,
        relative_binary_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            table,
            paths,
            program: program.into(),
            relative_binary_path: relative_binary_path.into(),
            transforms: TransformPipeline::for_run(&paths.app_test_dir, &paths.temp_dir),
        }
    }

    pub fn transforms(&self) -> &TransformPipeline {
        &self.transforms
    }

    /// Build the record for `case`.
    ///
    /// Fails when the executable cannot be found: a missing binary means
    /// the environment is broken, not that the case failed.
    pub fn build(&self, case: &CaseSpec) -> Result<InvocationRecord, SuiteError> {
        let program = paths::locate_binary(
            &self.paths.binary_root,
            &self.relative_binary_path,
            &self.program,
        )?;
        self.build_with_program(case, program)
    }

    /// Same as [`build`](Self::build) with an already located executable
    pub fn build_with_program(
        &self,
        case: &CaseSpec,
        program: PathBuf,
    ) -> Result<InvocationRecord, SuiteError> {
        let scenario_args = self.table.args(case.scenario)?;

        let output_dir = self.paths.output_dir(case.alphabet, case.strand);
        let golden_dir = self.paths.golden_dir(case.alphabet, case.strand);
        let output_name = paths::output_file_name(case.scenario, case.format);
        let stdout_name = paths::stdout_file_name(case.scenario, case.format);

        let actual_output = output_dir.join(&output_name);
        let actual_stdout = output_dir.join(&stdout_name);

        let mut args = case.encoding.dimension_flags(case.alphabet, case.strand);
        args.extend(scenario_args.iter().cloned());
        args.push(OUT_FLAG.to_string());
        args.push(path_arg(&actual_output));
        args.push(path_arg(
            &self.paths.input_path(InputSide::First, case.scenario),
        ));
        args.push(path_arg(
            &self.paths.input_path(InputSide::Second, case.scenario),
        ));

        let comparisons = vec![
            Comparison {
                expected: golden_dir.join(&stdout_name),
                actual: actual_stdout.clone(),
                transforms: self.transforms.clone(),
            },
            Comparison {
                expected: golden_dir.join(&output_name),
                actual: actual_output,
                transforms: self.transforms.clone(),
            },
        ];

        Ok(InvocationRecord {
            case: *case,
            program,
            args,
            redirect_stdout: actual_stdout,
            comparisons,
        })
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
