//! Output Normalizer - Text transforms applied before comparison
//!
//! The tool echoes absolute paths into its log and formats floating point
//! values through the platform's printf and line endings, so the raw output
//! differs between machines. Each transform rewrites one kind of host noise
//! into a canonical form. Transforms are pure and idempotent, and a pipeline
//! applies them in order: line endings are unified first, then paths are
//! stripped so that later transforms only ever see relative file names.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::path::{MAIN_SEPARATOR, Path};

/// Matches a standalone number in scientific notation.
///
/// Group 1 is the character before the number (kept as is). A number glued
/// to a word character, like the `5e-2` in `simSeq2_5e-2.fa`, is not a
/// standalone value and is left alone.
static SCIENTIFIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|[^\w.])([-+]?)(\d+(?:\.\d*)?|\.\d+)[eE]([-+]?)(\d+)\b")
        .expect("scientific notation pattern is valid")
});

/// A single text normalization step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Rewrite `\r\n` as `\n`
    NormalizeLineEndings,
    /// Remove every occurrence of a literal prefix, e.g. `/tmp/run.x1/`
    StripPrefix(String),
    /// Canonicalize scientific notation: `1E-5`, `1.0e-005` → `1e-05`
    NormalizeScientificExponents,
}

impl Transform {
    /// Prefix-stripping transform for `dir`, including the trailing
    /// separator so the remainder is a clean relative path
    pub fn strip_dir(dir: &Path) -> Self {
        let mut prefix = dir.to_string_lossy().into_owned();
        if !prefix.ends_with(MAIN_SEPARATOR) {
            prefix.push(MAIN_SEPARATOR);
        }
        Transform::StripPrefix(prefix)
    }

    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Transform::NormalizeLineEndings => {
                if text.contains("\r\n") {
                    Cow::Owned(text.replace("\r\n", "\n"))
                } else {
                    Cow::Borrowed(text)
                }
            }
            Transform::StripPrefix(prefix) => {
                if prefix.is_empty() || !text.contains(prefix.as_str()) {
                    Cow::Borrowed(text)
                } else {
                    Cow::Owned(text.replace(prefix.as_str(), ""))
                }
            }
            Transform::NormalizeScientificExponents => {
                SCIENTIFIC_RE.replace_all(text, |caps: &Captures| {
                    format!(
                        "{}{}{}",
                        &caps[1],
                        &caps[2],
                        canonical_scientific(&caps[3], &caps[4], &caps[5])
                    )
                })
            }
        }
    }
}

/// Canonical spelling of `mantissa e sign digits`
fn canonical_scientific(mantissa: &str, sign: &str, digits: &str) -> String {
    let mantissa = match mantissa.split_once('.') {
        Some((int_part, frac)) => {
            let frac = frac.trim_end_matches('0');
            match (int_part.is_empty(), frac.is_empty()) {
                (true, true) => "0".to_string(),
                (false, true) => int_part.to_string(),
                (_, false) => format!("{}.{}", int_part, frac),
            }
        }
        None => mantissa.to_string(),
    };
    let sign = if sign == "-" { "-" } else { "+" };
    let digits = digits.trim_start_matches('0');
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

/// Ordered list of transforms shared by both sides of every comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformPipeline {
    transforms: Vec<Transform>,
}

impl TransformPipeline {
    pub fn new(transforms: Vec<Transform>) -> Self {
        Self { transforms }
    }

    /// Standard pipeline for a run: unify line endings, strip the test data
    /// directory and the run's temp directory, then canonicalize exponents
    pub fn for_run(app_test_dir: &Path, temp_dir: &Path) -> Self {
        Self::new(vec![
            Transform::NormalizeLineEndings,
            Transform::strip_dir(app_test_dir),
            Transform::strip_dir(temp_dir),
            Transform::NormalizeScientificExponents,
        ])
    }

    pub fn apply(&self, text: &str) -> String {
        self.transforms
            .iter()
            .fold(text.to_string(), |acc, t| t.apply(&acc).into_owned())
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn exponents(text: &str) -> String {
        Transform::NormalizeScientificExponents
            .apply(text)
            .into_owned()
    }

    #[test]
    fn test_exponent_spellings_are_equivalent() {
        assert_eq!(exponents("1e-05"), "1e-05");
        assert_eq!(exponents("1E-5"), "1e-05");
        assert_eq!(exponents("1.0e-005"), "1e-05");
    }

    #[test]
    fn test_exponent_mantissa_and_sign() {
        assert_eq!(exponents("2.50E+003"), "2.5e+03");
        assert_eq!(exponents("3e7"), "3e+07");
        assert_eq!(exponents("-4.125e-120"), "-4.125e-120");
        assert_eq!(exponents("1e0"), "1e+00");
        assert_eq!(exponents(".5e-1"), ".5e-01");
    }

    #[test]
    fn test_exponents_inside_columns() {
        let line = "chr1\tStellar\teps\t1\t100\t9.5E-005\t+\t.\tseq2;3.2e-7,1e-010";
        assert_eq!(
            exponents(line),
            "chr1\tStellar\teps\t1\t100\t9.5e-05\t+\t.\tseq2;3.2e-07,1e-10"
        );
    }

    #[test]
    fn test_exponents_leave_identifiers_alone() {
        let text = "512_simSeq2_5e-2.fa minLen20 e-1.gff";
        assert_eq!(exponents(text), text);
        // plain decimals are untouched
        assert_eq!(exponents("epsilon 0.05 minLength 50"), "epsilon 0.05 minLength 50");
    }

    #[test]
    fn test_strip_dir_leaves_no_separator_residue() {
        let temp = PathBuf::from("/tmp/stellar-cli-tests.Xy12");
        let strip = Transform::strip_dir(&temp);
        let text = "Writing to /tmp/stellar-cli-tests.Xy12/dna_both/e-1.gff\n";
        assert_eq!(strip.apply(text), "Writing to dna_both/e-1.gff\n");
    }

    #[test]
    fn test_strip_dir_accepts_trailing_separator() {
        let with = Transform::strip_dir(Path::new("/src/test/cli/"));
        let without = Transform::strip_dir(Path::new("/src/test/cli"));
        assert_eq!(with, without);
    }

    #[test]
    fn test_strip_borrows_when_absent() {
        let strip = Transform::StripPrefix("/nowhere/".to_string());
        assert!(matches!(strip.apply("nothing here"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_pipeline_order_and_idempotence() {
        let pipeline = TransformPipeline::for_run(
            Path::new("/src/test/cli"),
            Path::new("/tmp/run.1e5"),
        );
        assert_eq!(pipeline.len(), 4);

        let raw = "Database: /src/test/cli/512_simSeq1_e-1.fa\r\n\
                   Output: /tmp/run.1e5/dna_both/e-1.gff\r\n\
                   eps=1.0E-005 min=5E+1\n";
        let once = pipeline.apply(raw);
        assert_eq!(
            once,
            "Database: 512_simSeq1_e-1.fa\n\
             Output: dna_both/e-1.gff\n\
             eps=1e-05 min=5e+01\n"
        );
        assert_eq!(pipeline.apply(&once), once);
    }

    #[test]
    fn test_line_endings() {
        let crlf = Transform::NormalizeLineEndings;
        assert_eq!(crlf.apply("a\r\nb\r\n"), "a\nb\n");
        // a lone carriage return is content, not a line ending
        assert_eq!(crlf.apply("a\rb\n"), "a\rb\n");
        assert!(matches!(crlf.apply("a\nb\n"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = TransformPipeline::default();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply("1E-5"), "1E-5");
    }
}
