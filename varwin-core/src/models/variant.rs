use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::StrandParseError;

/// Strand a variant was called on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl Strand {
    pub fn is_reverse(&self) -> bool {
        matches!(self, Strand::Reverse)
    }

    pub fn as_char(&self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl FromStr for Strand {
    type Err = StrandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            other => Err(StrandParseError(other.to_string())),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single genetic variant, as supplied by an upstream loader.
///
/// Positions are 1-based, following VCF convention. Alleles are plain base
/// strings; the alternate may carry a `*` or `-` deletion marker. Records
/// are immutable once constructed and consumed exactly once by the
/// evaluation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub chrom: String,
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt_allele: String,
    pub strand: Strand,
}

impl Variant {
    pub fn new<S: Into<String>>(
        chrom: S,
        pos: u64,
        id: S,
        ref_allele: S,
        alt_allele: S,
        strand: Strand,
    ) -> Self {
        Variant {
            chrom: chrom.into(),
            pos,
            id: id.into(),
            ref_allele: ref_allele.into(),
            alt_allele: alt_allele.into(),
            strand,
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} ({}) {}>{} [{}]",
            self.chrom, self.pos, self.id, self.ref_allele, self.alt_allele, self.strand
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strand_parses_plus_and_minus() {
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("-".parse::<Strand>().unwrap(), Strand::Reverse);
    }

    #[test]
    fn strand_rejects_anything_else() {
        let err = ".".parse::<Strand>().unwrap_err();
        assert_eq!(err, StrandParseError(".".to_string()));
    }

    #[test]
    fn strand_displays_as_its_token() {
        assert_eq!(Strand::Forward.to_string(), "+");
        assert_eq!(Strand::Reverse.to_string(), "-");
    }

    #[test]
    fn variant_display_is_readable() {
        let v = Variant::new("chr1", 100, "rs1", "A", "T", Strand::Forward);
        assert_eq!(v.to_string(), "chr1:100 (rs1) A>T [+]");
    }
}
