//! Histogram computation over ice water path values
//!
//! Histograms are computed on a fixed set of ascending bin edges and
//! normalized either to probability mass (count share) or probability
//! density (count per bin width per sample). The canonical scheme for ice
//! water path is 70 logarithmically spaced edges between 1e-5 and 1e2 kg/m².

use crate::errors::{IwpHistError, Result};
use crate::loader::AnnualDataset;
use chrono::Datelike;
use ndarray::{Array1, ArrayView1};

/// Ordered ascending bin edges shared between histograms
#[derive(Debug, Clone, PartialEq)]
pub struct BinScheme {
    edges: Vec<f64>,
}

impl BinScheme {
    /// Logarithmically spaced edges: `num_edges` points from `10^lo_exp`
    /// to `10^hi_exp` inclusive, giving `num_edges - 1` bins
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two edges are requested or the
    /// exponents are not strictly increasing.
    pub fn log_spaced(lo_exp: f64, hi_exp: f64, num_edges: usize) -> Result<Self> {
        if num_edges < 2 {
            return Err(IwpHistError::HistogramError(format!(
                "at least 2 bin edges are required, got {}",
                num_edges
            )));
        }
        if lo_exp >= hi_exp {
            return Err(IwpHistError::HistogramError(format!(
                "bin exponents must be increasing, got {} to {}",
                lo_exp, hi_exp
            )));
        }
        let step = (hi_exp - lo_exp) / (num_edges - 1) as f64;
        let edges = (0..num_edges)
            .map(|i| 10f64.powf(lo_exp + step * i as f64))
            .collect();
        Ok(Self { edges })
    }

    /// The edge values, ascending
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins (one less than the number of edges)
    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.edges.len() - 1
    }
}

/// How bin counts are turned into heights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Count per bin divided by the number of finite samples
    /// (probability mass)
    Count,
    /// Count per bin divided by bin width times total sample count
    /// (probability density, integrates to one when nothing falls
    /// outside the edges)
    Density,
}

/// A computed histogram on a fixed bin scheme
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<u64>,
    heights: Vec<f64>,
    samples: usize,
}

impl Histogram {
    /// Counts finite values into bins and normalizes
    ///
    /// Bins are half-open `[lo, hi)` with the last bin closed. Values below
    /// the lowest edge (exact zeros against log bins in particular), above
    /// the highest edge, or non-finite are not counted. Finite values still
    /// enter the [`Normalization::Count`] denominator; every input value,
    /// finite or not, enters the [`Normalization::Density`] denominator.
    #[must_use]
    pub fn compute(
        values: ArrayView1<'_, f64>,
        scheme: &BinScheme,
        normalization: Normalization,
    ) -> Self {
        let edges = scheme.edges.clone();
        let num_bins = edges.len() - 1;
        let highest = edges[num_bins];

        let mut counts = vec![0u64; num_bins];
        let mut finite = 0usize;
        let samples = values.len();

        for &v in values.iter() {
            if !v.is_finite() {
                continue;
            }
            finite += 1;
            if v < edges[0] || v > highest {
                continue;
            }
            // First edge above v, minus one; a value equal to the highest
            // edge lands past the end and is clamped into the last bin.
            let idx = edges.partition_point(|&e| e <= v);
            counts[(idx - 1).min(num_bins - 1)] += 1;
        }

        let heights = match normalization {
            Normalization::Count => {
                if finite == 0 {
                    vec![0.0; num_bins]
                } else {
                    counts.iter().map(|&c| c as f64 / finite as f64).collect()
                }
            }
            Normalization::Density => {
                if samples == 0 {
                    vec![0.0; num_bins]
                } else {
                    counts
                        .iter()
                        .zip(edges.windows(2))
                        .map(|(&c, w)| c as f64 / ((w[1] - w[0]) * samples as f64))
                        .collect()
                }
            }
        };

        Self {
            edges,
            counts,
            heights,
            samples,
        }
    }

    /// Raw count per bin
    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Normalized height per bin
    #[must_use]
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Number of input values, including non-finite ones
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// Number of bins
    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.heights.len()
    }

    /// Stairs-style step sequence of ((edge_lo, edge_hi), height) per bin
    pub fn steps(&self) -> impl Iterator<Item = ((f64, f64), f64)> + '_ {
        self.edges
            .windows(2)
            .zip(self.heights.iter())
            .map(|(w, &h)| ((w[0], w[1]), h))
    }
}

/// Density histograms of one year partitioned by calendar month
///
/// Returns twelve (month, histogram) pairs on the shared scheme, months 1
/// through 12 in order. A month with no profiles yields an all-zero
/// histogram rather than an error.
#[must_use]
pub fn monthly_histograms(dataset: &AnnualDataset, scheme: &BinScheme) -> Vec<(u32, Histogram)> {
    (1u32..=12)
        .map(|month| {
            let values: Array1<f64> = dataset
                .time
                .iter()
                .zip(dataset.iwp.iter())
                .filter(|(t, _)| t.month() == month)
                .map(|(_, &v)| v)
                .collect::<Vec<f64>>()
                .into();
            (
                month,
                Histogram::compute(values.view(), scheme, Normalization::Density),
            )
        })
        .collect()
}
