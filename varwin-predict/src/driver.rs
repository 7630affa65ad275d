//! Streaming evaluation: one window pair per variant, fixed-size
//! prediction batches.

use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{Array2, ArrayView2, Axis, s, stack};

use varwin_core::{Variant, WindowGeometry};
use varwin_genome::{
    GenomeAccessor, complement_encoding, reverse_complement_encoding, sequence_to_encoding,
};

use crate::compose::compose_alt;
use crate::errors::EvaluatorError;
use crate::predictor::Predictor;
use crate::reconcile::reconcile;
use crate::reporter::{Reporter, VariantRecord};

/// Counters for one evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationSummary {
    /// Variants pulled from the input.
    pub processed: u64,
    /// Variants whose declared reference disagreed with the genome.
    pub mismatched: u64,
    /// Variants whose reference window contained unknown bases.
    pub with_unknown: u64,
    /// Variants that could not be windowed and were routed to exclusion
    /// reporting instead of prediction.
    pub unresolved: u64,
}

/// Parallel per-batch buffers, owned exclusively by the driver and emptied
/// on every flush.
struct BatchBuffers {
    refs: Vec<Array2<f32>>,
    alts: Vec<Array2<f32>>,
    records: Vec<VariantRecord>,
}

impl BatchBuffers {
    fn with_capacity(capacity: usize) -> Self {
        BatchBuffers {
            refs: Vec::with_capacity(capacity),
            alts: Vec::with_capacity(capacity),
            records: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, ref_window: Array2<f32>, alt_window: Array2<f32>, record: VariantRecord) {
        self.refs.push(ref_window);
        self.alts.push(alt_window);
        self.records.push(record);
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn clear(&mut self) {
        self.refs.clear();
        self.alts.clear();
        self.records.clear();
    }
}

/// Streaming variant evaluator.
///
/// Pulls variants one at a time, builds the reference and alternate
/// windows for each, and hands fixed-size batches to the prediction
/// interface, distributing the scores to every reporter. Strictly
/// single-threaded: accumulation never overlaps a flush, and the flush is
/// a blocking call.
pub struct VariantEvaluator<G, P> {
    geometry: WindowGeometry,
    batch_size: usize,
    genome: G,
    predictor: P,
    reporters: Vec<Box<dyn Reporter>>,
}

impl<G: GenomeAccessor, P: Predictor> VariantEvaluator<G, P> {
    pub fn new(
        geometry: WindowGeometry,
        batch_size: usize,
        genome: G,
        predictor: P,
        reporters: Vec<Box<dyn Reporter>>,
    ) -> Self {
        VariantEvaluator {
            geometry,
            batch_size,
            genome,
            predictor,
            reporters,
        }
    }

    /// Evaluate a stream of variants in input order.
    ///
    /// Variants that cannot be windowed (unknown chromosome, window off
    /// the sequence) are routed to every reporter's exclusion hook and
    /// counted, never silently dropped. A final partial batch is flushed
    /// unconditionally, then every reporter is finalized exactly once.
    pub fn evaluate<I>(&mut self, variants: I) -> Result<EvaluationSummary>
    where
        I: IntoIterator<Item = Variant>,
    {
        let mut summary = EvaluationSummary::default();
        let mut buffers = BatchBuffers::with_capacity(self.batch_size);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed}] {msg} ({per_sec})")
                .unwrap()
                .tick_strings(&["-", "\\", "|", "/"]),
        );
        spinner.set_message("Evaluating variants...");
        let mut step_time = Instant::now();

        for variant in variants {
            summary.processed += 1;

            match self.window_variant(&variant) {
                Ok((ref_window, alt_window, record)) => {
                    if !record.ref_match {
                        summary.mismatched += 1;
                    }
                    if record.contains_unknown {
                        summary.with_unknown += 1;
                    }
                    buffers.push(ref_window, alt_window, record);
                }
                Err(EvaluatorError::Genome(err)) => {
                    summary.unresolved += 1;
                    eprintln!("Skipping variant {variant}: {err}");
                    for reporter in self.reporters.iter_mut() {
                        reporter.handle_unresolved(&variant)?;
                    }
                }
                Err(err) => {
                    return Err(err).context(format!("failed to window variant {variant}"));
                }
            }

            if buffers.len() >= self.batch_size {
                self.flush(&mut buffers)?;
            }

            spinner.inc(1);
            if summary.processed % 1000 == 0 {
                spinner.set_message(format!(
                    "Processed {} variants ({:?} for the last 1000)",
                    summary.processed,
                    step_time.elapsed()
                ));
                step_time = Instant::now();
            }
        }

        if !buffers.is_empty() {
            self.flush(&mut buffers)?;
        }
        for reporter in self.reporters.iter_mut() {
            reporter.finalize()?;
        }
        spinner.finish_and_clear();

        Ok(summary)
    }

    /// Build the (reference window, alternate window, record) triple for
    /// one variant. Positive-strand coordinates throughout; the uniform
    /// reverse-complement of both windows is the very last step.
    fn window_variant(
        &self,
        variant: &Variant,
    ) -> Result<(Array2<f32>, Array2<f32>, VariantRecord), EvaluatorError> {
        let ref_len = variant.ref_allele.len();
        let anchor = self.geometry.anchor(variant.pos, ref_len);
        let (start, end) = self.geometry.range(anchor);

        let (window, contains_unknown) =
            self.genome
                .encoding_for_range(&variant.chrom, start, end, true)?;

        let mut declared_ref = sequence_to_encoding(variant.ref_allele.as_bytes());
        if variant.strand.is_reverse() {
            declared_ref = complement_encoding(declared_ref.view());
        }

        let recon = reconcile(self.geometry, &declared_ref, window);
        if let Some(genome_bases) = &recon.genome_bases {
            eprintln!(
                "Warning: declared reference for {variant} does not match the genome \
                 (found {genome_bases}); the declared allele will be used"
            );
        }
        if contains_unknown {
            eprintln!("Warning: reference window for {variant} contains unknown base(s)");
        }
        let mut ref_window = recon.window;

        let mut alt_window = compose_alt(
            &self.genome,
            self.geometry,
            &variant.chrom,
            variant.pos,
            &variant.ref_allele,
            &variant.alt_allele,
            start,
            end,
            &ref_window,
            variant.strand,
        )?;

        if variant.strand.is_reverse() {
            ref_window = reverse_complement_encoding(ref_window.view());
            alt_window = reverse_complement_encoding(alt_window.view());
        }

        let record = VariantRecord::from_variant(variant, recon.matched, contains_unknown);
        Ok((ref_window, alt_window, record))
    }

    /// Hand the buffered batch to the predictor and distribute the scores.
    /// Reference windows occupy the first half of the stacked batch,
    /// alternate windows the second.
    fn flush(&mut self, buffers: &mut BatchBuffers) -> Result<()> {
        let n = buffers.len();
        let views: Vec<ArrayView2<f32>> = buffers
            .refs
            .iter()
            .chain(buffers.alts.iter())
            .map(|w| w.view())
            .collect();
        let batch = stack(Axis(0), &views).context("windows in a batch must share one shape")?;

        let scores = self
            .predictor
            .predict(&batch)
            .context("prediction interface failed")?;
        if scores.nrows() != 2 * n {
            return Err(EvaluatorError::ScoreShapeMismatch {
                rows: scores.nrows(),
                expected: 2 * n,
            }
            .into());
        }

        let ref_scores = scores.slice(s![..n, ..]);
        let alt_scores = scores.slice(s![n.., ..]);
        for reporter in self.reporters.iter_mut() {
            reporter.handle_batch(alt_scores, &buffers.records, Some(ref_scores))?;
        }
        buffers.clear();
        Ok(())
    }
}
