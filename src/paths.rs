//! Path conventions for inputs, golden outputs and run outputs
//!
//! Layout consumed:
//!
//! ```text
//! <source>/test/cli/512_simSeq1_<errorRate>.fa
//! <source>/test/cli/512_simSeq2_<errorRate>.fa
//! <source>/test/cli/gold_standard/<alphabet>_<strand>/<scenario>.<ext>
//! <source>/test/cli/gold_standard/<alphabet>_<strand>/<scenario>.<ext>.stdout
//! <temp>/<alphabet>_<strand>/<scenario>.<ext>[.stdout]
//! ```

use crate::error::SuiteError;
use crate::flags::{Alphabet, OutputFormat, Strand};
use crate::scenario::ScenarioId;
use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};

pub const GOLD_STANDARD_DIR: &str = "gold_standard";

/// Which of the two simulated sequence files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSide {
    /// `512_simSeq1_*`, passed as the database
    First,
    /// `512_simSeq2_*`, passed as the query
    Second,
}

/// Subdirectory shared by all records of one (alphabet, strand) cell
pub fn run_subdir(alphabet: Alphabet, strand: Strand) -> String {
    format!("{}_{}", alphabet.as_str(), strand.as_str())
}

pub fn input_fasta(side: InputSide, scenario: ScenarioId) -> String {
    let index = match side {
        InputSide::First => 1,
        InputSide::Second => 2,
    };
    format!("512_simSeq{}_{}.fa", index, scenario.error_rate())
}

pub fn output_file_name(scenario: ScenarioId, format: OutputFormat) -> String {
    format!("{}.{}", scenario.name(), format.extension())
}

/// Captured standard output sits next to the output file
pub fn stdout_file_name(scenario: ScenarioId, format: OutputFormat) -> String {
    format!("{}.stdout", output_file_name(scenario, format))
}

/// Resolved directories of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuitePaths {
    pub source_root: PathBuf,
    pub binary_root: PathBuf,
    /// `<source>/<app_test_dir>`, holding inputs and golden files
    pub app_test_dir: PathBuf,
    /// Root of the run's scratch outputs
    pub temp_dir: PathBuf,
}

impl SuitePaths {
    pub fn new(
        source_root: impl Into<PathBuf>,
        binary_root: impl Into<PathBuf>,
        app_test_dir: impl AsRef<Path>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        let source_root = source_root.into();
        Self {
            app_test_dir: source_root.join(app_test_dir),
            source_root,
            binary_root: binary_root.into(),
            temp_dir: temp_dir.into(),
        }
    }

    pub fn input_path(&self, side: InputSide, scenario: ScenarioId) -> PathBuf {
        self.app_test_dir.join(input_fasta(side, scenario))
    }

    pub fn golden_dir(&self, alphabet: Alphabet, strand: Strand) -> PathBuf {
        self.app_test_dir
            .join(GOLD_STANDARD_DIR)
            .join(run_subdir(alphabet, strand))
    }

    pub fn output_dir(&self, alphabet: Alphabet, strand: Strand) -> PathBuf {
        self.temp_dir.join(run_subdir(alphabet, strand))
    }
}

// ============================================================
// Executable lookup
// ============================================================

/// Candidate locations for `program`, in search order
pub fn binary_candidates(binary_root: &Path, relative_path: &Path, program: &str) -> Vec<PathBuf> {
    let file_name = format!("{}{}", program, EXE_SUFFIX);
    let mut dirs = vec![
        binary_root.join(relative_path),
        binary_root.join("bin"),
        binary_root.to_path_buf(),
    ];
    for profile in ["release", "debug", "Release", "Debug"] {
        dirs.push(binary_root.join(profile));
    }

    let mut candidates: Vec<PathBuf> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let candidate = dir.join(&file_name);
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

/// First existing file among [`binary_candidates`]
pub fn locate_binary(
    binary_root: &Path,
    relative_path: &Path,
    program: &str,
) -> Result<PathBuf, SuiteError> {
    let searched = binary_candidates(binary_root, relative_path, program);
    match searched.iter().find(|p| p.is_file()) {
        Some(found) => Ok(found.clone()),
        None => Err(SuiteError::BinaryNotFound {
            program: program.to_string(),
            binary_root: binary_root.to_path_buf(),
            searched,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_name_builders() {
        assert_eq!(run_subdir(Alphabet::Dna5, Strand::Reverse), "dna5_reverse");
        assert_eq!(
            input_fasta(InputSide::First, ScenarioId::E1),
            "512_simSeq1_e-1.fa"
        );
        assert_eq!(
            input_fasta(InputSide::Second, ScenarioId::MinLen150),
            "512_simSeq2_5e-2.fa"
        );
        assert_eq!(
            output_file_name(ScenarioId::TwentyFiveE3, OutputFormat::Txt),
            "25e-3.txt"
        );
        assert_eq!(
            stdout_file_name(ScenarioId::E1, OutputFormat::Gff),
            "e-1.gff.stdout"
        );
    }

    #[test]
    fn test_suite_paths_layout() {
        let paths = SuitePaths::new("/src", "/build", "test/cli", "/tmp/run");
        assert_eq!(paths.app_test_dir, PathBuf::from("/src/test/cli"));
        assert_eq!(
            paths.input_path(InputSide::First, ScenarioId::E4),
            PathBuf::from("/src/test/cli/512_simSeq1_e-4.fa")
        );
        assert_eq!(
            paths.golden_dir(Alphabet::Dna, Strand::Both),
            PathBuf::from("/src/test/cli/gold_standard/dna_both")
        );
        assert_eq!(
            paths.output_dir(Alphabet::Char, Strand::Forward),
            PathBuf::from("/tmp/run/char_forward")
        );
    }

    #[test]
    fn test_binary_candidates_order_without_duplicates() {
        let root = Path::new("/build");
        let candidates = binary_candidates(root, Path::new("."), "stellar");
        let exe = format!("stellar{}", EXE_SUFFIX);
        assert_eq!(candidates[0], root.join(".").join(&exe));
        assert_eq!(candidates[1], root.join("bin").join(&exe));
        // `./stellar` and `stellar` are the same location
        assert_eq!(candidates.len(), 6);

        let nested = binary_candidates(root, Path::new("apps/stellar"), "stellar");
        assert_eq!(nested.len(), 7);
        let again = binary_candidates(root, Path::new("bin"), "stellar");
        assert_eq!(again.len(), 6, "bin/ is only searched once");
    }

    #[test]
    fn test_locate_binary_prefers_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let exe = format!("stellar{}", EXE_SUFFIX);
        fs::create_dir_all(dir.path().join("apps/stellar")).unwrap();
        fs::create_dir_all(dir.path().join("bin")).unwrap();
        fs::write(dir.path().join("apps/stellar").join(&exe), b"").unwrap();
        fs::write(dir.path().join("bin").join(&exe), b"").unwrap();

        let found = locate_binary(dir.path(), Path::new("apps/stellar"), "stellar").unwrap();
        assert_eq!(found, dir.path().join("apps/stellar").join(&exe));

        let fallback = locate_binary(dir.path(), Path::new("."), "stellar").unwrap();
        assert_eq!(fallback, dir.path().join("bin").join(&exe));
    }

    #[test]
    fn test_locate_binary_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory with the program's name is not an executable
        fs::create_dir_all(dir.path().join("bin").join("stellar")).unwrap();

        match locate_binary(dir.path(), Path::new("."), "stellar") {
            Err(SuiteError::BinaryNotFound {
                program, searched, ..
            }) => {
                assert_eq!(program, "stellar");
                assert_eq!(searched.len(), 6);
            }
            other => panic!("expected BinaryNotFound, got {:?}", other),
        }
    }
}
