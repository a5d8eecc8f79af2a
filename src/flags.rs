//! Flag Resolver - Dimension values and their argument encodings
//!
//! The tool accepts the same options in a short spelling (`-a dna`, `-f`)
//! and a long spelling (`--alphabet dna`, `--forward`). Both encodings must
//! drive the tool identically, so the matrix runs at least one scenario
//! through each of them against the same golden files.

use crate::error::SuiteError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================
// Dimension values
// ============================================================

/// Sequence alphabet the tool is asked to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    Dna,
    Dna5,
    Protein,
    Char,
}

impl Alphabet {
    pub const ALL: [Alphabet; 4] = [
        Alphabet::Dna,
        Alphabet::Dna5,
        Alphabet::Protein,
        Alphabet::Char,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Alphabet::Dna => "dna",
            Alphabet::Dna5 => "dna5",
            Alphabet::Protein => "protein",
            Alphabet::Char => "char",
        }
    }
}

/// Which database strand(s) the tool searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    Forward,
    Reverse,
    Both,
}

impl Strand {
    pub const ALL: [Strand; 3] = [Strand::Forward, Strand::Reverse, Strand::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Forward => "forward",
            Strand::Reverse => "reverse",
            Strand::Both => "both",
        }
    }
}

/// Output file format, selected by the extension of the `--out` path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Gff,
    Txt,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Gff, OutputFormat::Txt];

    /// File extension, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Gff => "gff",
            OutputFormat::Txt => "txt",
        }
    }
}

macro_rules! impl_dimension_text {
    ($ty:ty, $axis:literal, $name:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.$name())
            }
        }

        impl FromStr for $ty {
            type Err = SuiteError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.$name() == s)
                    .ok_or_else(|| SuiteError::InvalidDimension {
                        axis: $axis,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_dimension_text!(Alphabet, "alphabet", as_str);
impl_dimension_text!(Strand, "database strand", as_str);
impl_dimension_text!(OutputFormat, "output extension", extension);

// ============================================================
// Encodings
// ============================================================

/// Spelling used for flags on the tool's command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagEncoding {
    Short,
    Long,
}

impl FlagEncoding {
    /// Tokens selecting `alphabet`.
    ///
    /// The short encoding leaves `dna5` out entirely since it is the tool's
    /// default alphabet; the long encoding always spells it out.
    pub fn alphabet_flags(&self, alphabet: Alphabet) -> Vec<String> {
        let (flag, omit_default) = match self {
            FlagEncoding::Short => ("-a", true),
            FlagEncoding::Long => ("--alphabet", false),
        };
        if omit_default && alphabet == Alphabet::Dna5 {
            return Vec::new();
        }
        vec![flag.to_string(), alphabet.as_str().to_string()]
    }

    /// Tokens selecting `strand`; searching both strands is the default and
    /// resolves to nothing in either encoding.
    pub fn strand_flags(&self, strand: Strand) -> Vec<String> {
        let flag = match (self, strand) {
            (_, Strand::Both) => return Vec::new(),
            (FlagEncoding::Short, Strand::Forward) => "-f",
            (FlagEncoding::Short, Strand::Reverse) => "-r",
            (FlagEncoding::Long, Strand::Forward) => "--forward",
            (FlagEncoding::Long, Strand::Reverse) => "--reverse",
        };
        vec![flag.to_string()]
    }

    /// Alphabet flags followed by strand flags, the order the tool was
    /// invoked with when the golden outputs were recorded
    pub fn dimension_flags(&self, alphabet: Alphabet, strand: Strand) -> Vec<String> {
        let mut tokens = self.alphabet_flags(alphabet);
        tokens.extend(self.strand_flags(strand));
        tokens
    }
}

impl fmt::Display for FlagEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagEncoding::Short => f.write_str("short"),
            FlagEncoding::Long => f.write_str("long"),
        }
    }
}
