//! Per-year summary statistics
//!
//! Scalars derived from an [`AnnualDataset`]: how many profiles survived
//! the tropics filter and what share of them report an ice water path of
//! exactly zero.

use crate::loader::AnnualDataset;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Scalar summary of one year of profiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    /// Row count of the filtered table
    pub profile_count: usize,
    /// Share of profiles with an ice water path of exactly zero, in [0, 1]
    pub zero_fraction: f64,
}

/// Computes the summary for a single year
///
/// A direct ratio, no smoothing. An empty year yields a count of zero and
/// a zero fraction of 0.0 rather than NaN.
#[must_use]
pub fn summarize(dataset: &AnnualDataset) -> SummaryStats {
    let profile_count = dataset.len();
    if profile_count == 0 {
        return SummaryStats {
            profile_count: 0,
            zero_fraction: 0.0,
        };
    }
    let zeros = dataset.iwp.iter().filter(|&&v| v == 0.0).count();
    SummaryStats {
        profile_count,
        zero_fraction: zeros as f64 / profile_count as f64,
    }
}

/// Computes summaries for all loaded years in parallel, keyed by year
#[must_use]
pub fn summarize_years(datasets: &BTreeMap<i32, AnnualDataset>) -> BTreeMap<i32, SummaryStats> {
    datasets
        .par_iter()
        .map(|(&year, dataset)| (year, summarize(dataset)))
        .collect()
}
