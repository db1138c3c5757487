//! Unit tests for the histogram and statistics modules
//!
//! These tests cover the aggregation layer without touching NetCDF files
//! or rendering, so the math can be checked against hand-computed values.

use chrono::{TimeZone, Utc};
use iwp_hist::{
    errors::IwpHistError,
    histogram::{monthly_histograms, BinScheme, Histogram, Normalization},
    loader::{AnnualDataset, IWP_SCALE},
    parallel::ParallelConfig,
    stats::{summarize, summarize_years},
};
use ndarray::Array1;
use std::collections::BTreeMap;

/// Builds a dataset directly, one timestamp per value, all in the tropics
fn synthetic_dataset(year: i32, months: &[u32], iwp_grams: &[f64]) -> AnnualDataset {
    assert_eq!(months.len(), iwp_grams.len());
    let time = months
        .iter()
        .map(|&m| Utc.with_ymd_and_hms(year, m, 15, 0, 0, 0).unwrap())
        .collect();
    let n = iwp_grams.len();
    AnnualDataset {
        year,
        time,
        lat: Array1::zeros(n),
        lon: Array1::zeros(n),
        iwp: Array1::from(iwp_grams.iter().map(|&v| v * IWP_SCALE).collect::<Vec<f64>>()),
    }
}

#[test]
fn test_error_types() {
    let var_err = IwpHistError::VariableNotFound {
        var: "ice_water_path".to_string(),
    };
    assert!(format!("{}", var_err).contains("Variable 'ice_water_path' not found"));

    let time_err = IwpHistError::TimeDecodeError {
        message: "no units".to_string(),
    };
    assert!(format!("{}", time_err).contains("Time decode error: no units"));

    let hist_err = IwpHistError::HistogramError("bad edges".to_string());
    assert!(format!("{}", hist_err).contains("Histogram error: bad edges"));

    let year_err = IwpHistError::YearNotLoaded { year: 2012 };
    assert!(format!("{}", year_err).contains("Year 2012 was not loaded"));
}

#[test]
fn test_log_spaced_bin_scheme() {
    let bins = BinScheme::log_spaced(-5.0, 2.0, 70).expect("valid scheme");
    assert_eq!(bins.edges().len(), 70);
    assert_eq!(bins.num_bins(), 69);

    // First and last edges hit the decade limits
    assert!((bins.edges()[0] - 1e-5).abs() < 1e-18);
    assert!((bins.edges()[69] - 1e2).abs() < 1e-10);

    // Strictly ascending
    for w in bins.edges().windows(2) {
        assert!(w[0] < w[1]);
    }
}

#[test]
fn test_bin_scheme_rejects_bad_input() {
    assert!(matches!(
        BinScheme::log_spaced(-5.0, 2.0, 1),
        Err(IwpHistError::HistogramError(_))
    ));
    assert!(matches!(
        BinScheme::log_spaced(2.0, -5.0, 70),
        Err(IwpHistError::HistogramError(_))
    ));
    assert!(BinScheme::log_spaced(-5.0, -5.0, 70).is_err());
}

#[test]
fn test_count_normalization_keeps_zeros_in_denominator() {
    let bins = BinScheme::log_spaced(-5.0, 2.0, 70).unwrap();

    // Two exact zeros fall below the lowest log edge and are not counted,
    // but they still divide the in-range mass.
    let values = Array1::from(vec![0.0, 0.0, 5e-3, 1e-2]);
    let hist = Histogram::compute(values.view(), &bins, Normalization::Count);

    let mass: f64 = hist.heights().iter().sum();
    assert!((mass - 0.5).abs() < 1e-12);
    assert_eq!(hist.counts().iter().sum::<u64>(), 2);
    assert_eq!(hist.sample_count(), 4);
}

#[test]
fn test_density_integrates_to_one() {
    let bins = BinScheme::log_spaced(-5.0, 2.0, 70).unwrap();

    // All values inside the edge range
    let values = Array1::from(vec![2e-5, 1e-3, 1e-3, 0.5, 3.0, 40.0, 99.0]);
    let hist = Histogram::compute(values.view(), &bins, Normalization::Density);

    let integral: f64 = hist
        .steps()
        .map(|((lo, hi), height)| (hi - lo) * height)
        .sum();
    assert!((integral - 1.0).abs() < 1e-9, "integral was {}", integral);
}

#[test]
fn test_density_denominator_counts_every_sample() {
    let bins = BinScheme::log_spaced(-5.0, 2.0, 70).unwrap();

    // One in-range value plus one NaN: the NaN is not binned but still
    // doubles the density denominator.
    let values = Array1::from(vec![1.0, f64::NAN]);
    let hist = Histogram::compute(values.view(), &bins, Normalization::Density);

    let integral: f64 = hist
        .steps()
        .map(|((lo, hi), height)| (hi - lo) * height)
        .sum();
    assert!((integral - 0.5).abs() < 1e-9);
}

#[test]
fn test_count_normalization_skips_nan_in_denominator() {
    let bins = BinScheme::log_spaced(-5.0, 2.0, 70).unwrap();

    let values = Array1::from(vec![1.0, f64::NAN]);
    let hist = Histogram::compute(values.view(), &bins, Normalization::Count);

    let mass: f64 = hist.heights().iter().sum();
    assert!((mass - 1.0).abs() < 1e-12);
}

#[test]
fn test_empty_input_yields_zero_histogram() {
    let bins = BinScheme::log_spaced(-5.0, 2.0, 70).unwrap();
    let values: Array1<f64> = Array1::from(Vec::new());

    for normalization in [Normalization::Count, Normalization::Density] {
        let hist = Histogram::compute(values.view(), &bins, normalization);
        assert_eq!(hist.num_bins(), 69);
        assert!(hist.heights().iter().all(|&h| h == 0.0));
    }
}

#[test]
fn test_highest_edge_is_closed() {
    let bins = BinScheme::log_spaced(-5.0, 2.0, 70).unwrap();
    let top = *bins.edges().last().unwrap();

    let values = Array1::from(vec![top]);
    let hist = Histogram::compute(values.view(), &bins, Normalization::Count);

    assert_eq!(hist.counts()[68], 1);
    assert_eq!(hist.counts().iter().sum::<u64>(), 1);
}

#[test]
fn test_values_above_range_are_excluded() {
    let bins = BinScheme::log_spaced(-5.0, 2.0, 70).unwrap();

    let values = Array1::from(vec![1e3, 1.0]);
    let hist = Histogram::compute(values.view(), &bins, Normalization::Count);

    assert_eq!(hist.counts().iter().sum::<u64>(), 1);
    // Both values are finite, so the out-of-range one stays in the denominator
    let mass: f64 = hist.heights().iter().sum();
    assert!((mass - 0.5).abs() < 1e-12);
}

#[test]
fn test_monthly_histograms_cover_all_months() {
    let bins = BinScheme::log_spaced(-5.0, 2.0, 70).unwrap();

    // Profiles only in January and March; the other ten months must come
    // back as zero histograms, not errors.
    let dataset = synthetic_dataset(2012, &[1, 1, 3], &[5.0, 10.0, 20.0]);
    let monthly = monthly_histograms(&dataset, &bins);

    assert_eq!(monthly.len(), 12);
    assert_eq!(
        monthly.iter().map(|(m, _)| *m).collect::<Vec<u32>>(),
        (1..=12).collect::<Vec<u32>>()
    );

    for (month, hist) in &monthly {
        match month {
            1 => assert_eq!(hist.counts().iter().sum::<u64>(), 2),
            3 => assert_eq!(hist.counts().iter().sum::<u64>(), 1),
            _ => {
                assert_eq!(hist.sample_count(), 0);
                assert!(hist.heights().iter().all(|&h| h == 0.0));
            }
        }
    }
}

#[test]
fn test_monthly_histograms_on_empty_year() {
    let bins = BinScheme::log_spaced(-5.0, 2.0, 70).unwrap();
    let dataset = synthetic_dataset(2012, &[], &[]);

    let monthly = monthly_histograms(&dataset, &bins);
    assert_eq!(monthly.len(), 12);
    assert!(monthly
        .iter()
        .all(|(_, h)| h.heights().iter().all(|&v| v == 0.0)));
}

#[test]
fn test_summary_stats_example() {
    // IWP of [0, 0, 5, 10] g/m²: half the profiles are exact zeros
    let dataset = synthetic_dataset(2008, &[7, 8, 9, 10], &[0.0, 0.0, 5.0, 10.0]);
    let summary = summarize(&dataset);

    assert_eq!(summary.profile_count, 4);
    assert!((summary.zero_fraction - 0.5).abs() < 1e-12);
}

#[test]
fn test_summary_stats_bounds() {
    let dataset = synthetic_dataset(2010, &[1, 2, 3], &[1.0, 2.0, 3.0]);
    let summary = summarize(&dataset);
    assert_eq!(summary.profile_count, dataset.len());
    assert!((0.0..=1.0).contains(&summary.zero_fraction));
    assert_eq!(summary.zero_fraction, 0.0);
}

#[test]
fn test_summary_stats_empty_year() {
    let dataset = synthetic_dataset(2011, &[], &[]);
    let summary = summarize(&dataset);
    assert_eq!(summary.profile_count, 0);
    assert_eq!(summary.zero_fraction, 0.0);
}

#[test]
fn test_summarize_years_keyed_by_year() {
    let mut datasets = BTreeMap::new();
    datasets.insert(2008, synthetic_dataset(2008, &[7, 8], &[0.0, 4.0]));
    datasets.insert(2009, synthetic_dataset(2009, &[7], &[3.0]));

    let stats = summarize_years(&datasets);
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[&2008].profile_count, 2);
    assert!((stats[&2008].zero_fraction - 0.5).abs() < 1e-12);
    assert_eq!(stats[&2009].profile_count, 1);
    assert_eq!(stats[&2009].zero_fraction, 0.0);
}

#[test]
fn test_parallel_config() {
    let default_config = ParallelConfig::default();
    assert!(default_config.num_threads.is_none());

    let config_4 = ParallelConfig::with_threads(4);
    assert_eq!(config_4.num_threads, Some(4));

    let all_cores_config = ParallelConfig::all_cores();
    assert!(all_cores_config.num_threads.is_some());
    assert!(all_cores_config.num_threads.unwrap() > 0);

    assert!(default_config.current_threads() > 0);
}
