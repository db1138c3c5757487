//! Defines command-line interface options using `clap` for the iwp-hist application.

use clap::Parser;
use std::path::PathBuf;

/// A CLI tool for ice water path histograms and statistics
#[derive(Parser, Debug)]
#[command(
    version,
    name = "iwp-hist",
    about = "Histograms and summary statistics for tropical ice water path observations"
)]
pub struct Args {
    /// Directory holding the annual <year>-07-01_<year+1>-07-01_fwp.nc files
    #[arg(short, long, default_value = "/work/bm1183/m301049/cloudsat")]
    pub data_dir: PathBuf,

    /// Directory where rendered figures are written
    #[arg(short, long, default_value = "plots")]
    pub output_dir: PathBuf,

    /// Years to load, formatted as <first>:<last> (inclusive)
    #[arg(long, default_value = "2006:2018", value_parser = parse_year_span)]
    pub years: YearSpan,

    /// Years shown in the 2x2 monthly histogram figure, comma separated
    #[arg(long, default_value = "2012,2013,2014,2015", value_parser = parse_year_list)]
    pub monthly_years: YearList,

    /// Number of threads to use for parallel processing. Defaults to number of CPU cores.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Inclusive range of years to load
#[derive(Debug, Clone)]
pub struct YearSpan {
    pub first: i32,
    pub last: i32,
}

impl YearSpan {
    /// Iterate the years of the span in ascending order
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.first..=self.last
    }
}

/// Explicit list of years for the monthly figure
#[derive(Debug, Clone)]
pub struct YearList(pub Vec<i32>);

fn parse_year_span(s: &str) -> Result<YearSpan, String> {
    let parts: Vec<&str> = s.split(':').collect();
    match parts.as_slice() {
        [first, last] => {
            let first = first
                .parse::<i32>()
                .map_err(|_| format!("Invalid first year '{}'", first))?;
            let last = last
                .parse::<i32>()
                .map_err(|_| format!("Invalid last year '{}'", last))?;
            if first > last {
                return Err(format!("Year span is reversed: {}:{}", first, last));
            }
            Ok(YearSpan { first, last })
        }
        _ => Err("Invalid format: Expected '<first>:<last>'.".to_string()),
    }
}

fn parse_year_list(s: &str) -> Result<YearList, String> {
    let years = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| format!("Invalid year '{}'", part))
        })
        .collect::<Result<Vec<i32>, String>>()?;
    if years.is_empty() {
        return Err("At least one year is required".to_string());
    }
    Ok(YearList(years))
}
