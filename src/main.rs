//! Entry point for the iwp-hist application.
//! Handles CLI parsing, parallel per-year loading, aggregation, and figure rendering.

use clap::Parser;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;

use iwp_hist::cli::Args;
use iwp_hist::histogram::BinScheme;
use iwp_hist::loader::{AnnualDataset, DataSource, NetcdfSource};
use iwp_hist::parallel::ParallelConfig;
use iwp_hist::plot;
use iwp_hist::stats::summarize_years;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    println!(
        r#"
------------------------------------------------------------------
        iwp-hist: tropical ice water path statistics
------------------------------------------------------------------
"#
    );

    ParallelConfig::new(args.threads).setup_global_pool()?;
    fs::create_dir_all(&args.output_dir)?;

    let source = NetcdfSource::new(&args.data_dir);
    println!(
        "🚀 Loading years {}-{} from {}",
        args.years.first,
        args.years.last,
        args.data_dir.display()
    );

    let datasets: BTreeMap<i32, AnnualDataset> = args
        .years
        .years()
        .collect::<Vec<i32>>()
        .into_par_iter()
        .map(|year| source.load_year(year).map(|dataset| (year, dataset)))
        .collect::<iwp_hist::Result<_>>()?;

    let stats = summarize_years(&datasets);
    if args.verbose {
        for (year, summary) in &stats {
            println!(
                "   {}: {} profiles, {:.1}% zeros",
                year,
                summary.profile_count,
                summary.zero_fraction * 100.0
            );
        }
    }

    let bins = BinScheme::log_spaced(-5.0, 2.0, 70)?;

    let monthly_path = args.output_dir.join("2c_ice_monthly.png");
    plot::render_monthly_panels(&datasets, &args.monthly_years.0, &bins, &monthly_path)?;
    println!("✅ Saved {}", monthly_path.display());

    let zeros_path = args.output_dir.join("2c_ice_zeros.png");
    plot::render_zero_fraction_bars(&stats, &zeros_path)?;
    println!("✅ Saved {}", zeros_path.display());

    let profiles_path = args.output_dir.join("2c_ice_n_profiles.png");
    plot::render_profile_count_bars(&stats, &profiles_path)?;
    println!("✅ Saved {}", profiles_path.display());

    let interannual_path = args.output_dir.join("2c_ice_interannual.png");
    plot::render_interannual(&datasets, &bins, &interannual_path)?;
    println!("✅ Saved {}", interannual_path.display());

    Ok(())
}
