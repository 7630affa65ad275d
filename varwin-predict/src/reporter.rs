//! Reporter interface and the tab-separated score writer.

use std::io::{BufWriter, Write};

use anyhow::Result;
use ndarray::ArrayView2;

use varwin_core::{Strand, Variant};

/// Identity and per-variant quality flags persisted with every score row.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chrom: String,
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt_allele: String,
    pub strand: Strand,
    /// False when the declared reference disagreed with the genome.
    pub ref_match: bool,
    /// True when the retrieved reference window contained unknown bases.
    pub contains_unknown: bool,
}

impl VariantRecord {
    pub fn from_variant(variant: &Variant, ref_match: bool, contains_unknown: bool) -> Self {
        VariantRecord {
            chrom: variant.chrom.clone(),
            pos: variant.pos,
            id: variant.id.clone(),
            ref_allele: variant.ref_allele.clone(),
            alt_allele: variant.alt_allele.clone(),
            strand: variant.strand,
            ref_match,
            contains_unknown,
        }
    }
}

/// Consumer of per-batch prediction output.
pub trait Reporter {
    /// Called once per flushed batch; score rows are ordered as the input
    /// variants.
    fn handle_batch(
        &mut self,
        alt_scores: ArrayView2<f32>,
        records: &[VariantRecord],
        ref_scores: Option<ArrayView2<f32>>,
    ) -> Result<()>;

    /// Called for variants that could not be windowed. Default is a no-op.
    fn handle_unresolved(&mut self, _variant: &Variant) -> Result<()> {
        Ok(())
    }

    /// Called exactly once after the final batch.
    fn finalize(&mut self) -> Result<()>;
}

/// Tab-separated score writer: identity columns, quality flags, then the
/// alternate scores and (when supplied) the reference scores.
pub struct TsvReporter {
    writer: BufWriter<Box<dyn Write>>,
    wrote_header: bool,
}

impl TsvReporter {
    pub fn new(sink: Box<dyn Write>) -> Self {
        TsvReporter {
            writer: BufWriter::new(sink),
            wrote_header: false,
        }
    }

    fn write_header(&mut self, n_classes: usize, with_ref: bool) -> Result<()> {
        let mut cols: Vec<String> = [
            "chrom",
            "pos",
            "id",
            "ref",
            "alt",
            "strand",
            "ref_match",
            "contains_unk",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        for i in 0..n_classes {
            cols.push(format!("alt_{i}"));
        }
        if with_ref {
            for i in 0..n_classes {
                cols.push(format!("ref_{i}"));
            }
        }
        writeln!(self.writer, "{}", cols.join("\t"))?;
        Ok(())
    }
}

impl Reporter for TsvReporter {
    fn handle_batch(
        &mut self,
        alt_scores: ArrayView2<f32>,
        records: &[VariantRecord],
        ref_scores: Option<ArrayView2<f32>>,
    ) -> Result<()> {
        if !self.wrote_header {
            self.write_header(alt_scores.ncols(), ref_scores.is_some())?;
            self.wrote_header = true;
        }
        for (i, record) in records.iter().enumerate() {
            write!(
                self.writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                record.chrom,
                record.pos,
                record.id,
                record.ref_allele,
                record.alt_allele,
                record.strand,
                record.ref_match,
                record.contains_unknown,
            )?;
            for v in alt_scores.row(i).iter() {
                write!(self.writer, "\t{v}")?;
            }
            if let Some(ref_scores) = ref_scores {
                for v in ref_scores.row(i).iter() {
                    write!(self.writer, "\t{v}")?;
                }
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn record(id: &str, ref_match: bool) -> VariantRecord {
        VariantRecord {
            chrom: "chr1".to_string(),
            pos: 100,
            id: id.to_string(),
            ref_allele: "A".to_string(),
            alt_allele: "T".to_string(),
            strand: Strand::Forward,
            ref_match,
            contains_unknown: false,
        }
    }

    #[test]
    fn writes_header_flags_and_both_score_halves() {
        let buf = SharedBuf::default();
        let mut reporter = TsvReporter::new(Box::new(buf.clone()));

        let alt = arr2(&[[0.5f32, 1.0], [0.25, 0.0]]);
        let refs = arr2(&[[0.125f32, 1.0], [0.75, 0.0]]);
        let records = vec![record("rs1", true), record("rs2", false)];
        reporter
            .handle_batch(alt.view(), &records, Some(refs.view()))
            .unwrap();
        reporter.finalize().unwrap();

        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "chrom\tpos\tid\tref\talt\tstrand\tref_match\tcontains_unk\talt_0\talt_1\tref_0\tref_1"
        );
        assert_eq!(
            lines[1],
            "chr1\t100\trs1\tA\tT\t+\ttrue\tfalse\t0.5\t1\t0.125\t1"
        );
        assert_eq!(
            lines[2],
            "chr1\t100\trs2\tA\tT\t+\tfalse\tfalse\t0.25\t0\t0.75\t0"
        );
    }

    #[test]
    fn omits_reference_columns_when_absent() {
        let buf = SharedBuf::default();
        let mut reporter = TsvReporter::new(Box::new(buf.clone()));

        let alt = arr2(&[[1.0f32]]);
        reporter
            .handle_batch(alt.view(), &[record("rs1", true)], None)
            .unwrap();
        reporter.finalize().unwrap();

        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(
            out.lines().next().unwrap(),
            "chrom\tpos\tid\tref\talt\tstrand\tref_match\tcontains_unk\talt_0"
        );
    }
}
