//! iwp-hist: ice water path histograms and summary statistics
//!
//! A small Rust library and CLI for analyzing satellite-derived ice water
//! path (IWP) observations. One NetCDF file per year is loaded, filtered to
//! the tropical latitude band, and reduced to normalized histograms
//! (annual and per-month) and per-year summary statistics, each rendered
//! as a PNG figure.
//!
//! ## Key Features
//!
//! - **Annual loading**: July-to-July NetCDF files read into column tables
//! - **Histograms**: probability mass or density on log-spaced bins
//! - **Summary statistics**: profile counts and zero fractions per year
//! - **Figures**: monthly panels, interannual overlay, per-year bar charts
//! - **Parallel Processing**: per-year work spread over cores with Rayon
//!
//! ## Module Organization
//!
//! - [`loader`]: annual NetCDF files to filtered column tables
//! - [`histogram`]: bin schemes, normalization, monthly partitioning
//! - [`stats`]: per-year scalar summaries
//! - [`plot`]: PNG rendering of the computed results
//! - [`parallel`]: parallel processing configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use iwp_hist::prelude::*;
//!
//! let source = NetcdfSource::new("/data/cloudsat");
//! let year = source.load_year(2008).unwrap();
//!
//! let bins = BinScheme::log_spaced(-5.0, 2.0, 70).unwrap();
//! let hist = Histogram::compute(year.iwp.view(), &bins, Normalization::Density);
//! println!("{} profiles, {} bins", year.len(), hist.num_bins());
//! ```
//!
//! The aggregation layer is deliberately independent of the rendering
//! layer so histogram and statistics logic can be tested without
//! producing images.

// Core modules
pub mod cli;
pub mod errors;
pub mod histogram;
pub mod loader;
pub mod parallel;
pub mod plot;
pub mod stats;

// Direct re-exports for the public API
pub use errors::{IwpHistError, Result};
pub use histogram::{monthly_histograms, BinScheme, Histogram, Normalization};
pub use loader::{AnnualDataset, DataSource, NetcdfSource};
pub use stats::{summarize, summarize_years, SummaryStats};

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::errors::{IwpHistError, Result};
    pub use crate::histogram::{monthly_histograms, BinScheme, Histogram, Normalization};
    pub use crate::loader::{AnnualDataset, DataSource, NetcdfSource};
    pub use crate::parallel::ParallelConfig;
    pub use crate::stats::{summarize, summarize_years, SummaryStats};
}
