//! Loading of annual ice water path files
//!
//! One NetCDF file per year holds the satellite profiles between the first
//! of July of that year and the first of July of the next. This module reads
//! such a file into a column table, converts the ice water path from g/m² to
//! kg/m² and keeps only profiles inside the tropical latitude band.

use crate::errors::{IwpHistError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use ndarray::Array1;
use netcdf::AttributeValue;
use std::path::{Path, PathBuf};

/// Southern edge of the tropical latitude band, degrees north
pub const TROPICS_LAT_MIN: f64 = -30.0;

/// Northern edge of the tropical latitude band, degrees north
pub const TROPICS_LAT_MAX: f64 = 30.0;

/// Scale factor applied to the stored ice water path (g/m² to kg/m²)
pub const IWP_SCALE: f64 = 1e-3;

/// Column table of satellite profiles for one year
///
/// All columns share the profile dimension. Built once per year at load
/// time and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualDataset {
    /// The year the file starts in
    pub year: i32,
    /// Observation timestamp per profile, UTC
    pub time: Vec<DateTime<Utc>>,
    /// Latitude per profile, degrees north
    pub lat: Array1<f64>,
    /// Longitude per profile, degrees east
    pub lon: Array1<f64>,
    /// Ice water path per profile, kg/m²
    pub iwp: Array1<f64>,
}

impl AnnualDataset {
    /// Number of profiles in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.iwp.len()
    }

    /// Whether the table holds no profiles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iwp.is_empty()
    }
}

/// Source of annual profile tables, keyed by year
pub trait DataSource {
    /// Load the table for a single year
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed. There is no
    /// retry or recovery; the caller is expected to abort the run.
    fn load_year(&self, year: i32) -> Result<AnnualDataset>;
}

/// NetCDF-backed [`DataSource`] reading annual `fwp` files from a directory
#[derive(Debug, Clone)]
pub struct NetcdfSource {
    dir: PathBuf,
}

impl NetcdfSource {
    /// Create a source reading from the given directory
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the annual file for a year, named by the July-to-July convention
    #[must_use]
    pub fn year_path(&self, year: i32) -> PathBuf {
        self.dir
            .join(format!("{}-07-01_{}-07-01_fwp.nc", year, year + 1))
    }
}

impl DataSource for NetcdfSource {
    fn load_year(&self, year: i32) -> Result<AnnualDataset> {
        let path = self.year_path(year);
        let file = netcdf::open(&path)?;

        let lat = read_column(&file, "lat")?;
        let lon = read_column(&file, "lon")?;
        let iwp = read_column(&file, "ice_water_path")?;
        let seconds = read_column(&file, "time")?;
        let epoch = time_epoch(&file, &path)?;

        let n = iwp.len();
        if lat.len() != n || lon.len() != n || seconds.len() != n {
            return Err(IwpHistError::DatasetError(format!(
                "column lengths disagree in {}: lat={} lon={} time={} ice_water_path={}",
                path.display(),
                lat.len(),
                lon.len(),
                seconds.len(),
                n
            )));
        }

        // Tropics mask, inclusive on both edges. NaN latitudes fail the
        // range test and are dropped with the extratropical rows.
        let mut time_kept = Vec::new();
        let mut lat_kept = Vec::new();
        let mut lon_kept = Vec::new();
        let mut iwp_kept = Vec::new();
        for i in 0..n {
            if (TROPICS_LAT_MIN..=TROPICS_LAT_MAX).contains(&lat[i]) {
                time_kept.push(epoch + Duration::milliseconds((seconds[i] * 1e3).round() as i64));
                lat_kept.push(lat[i]);
                lon_kept.push(lon[i]);
                iwp_kept.push(iwp[i] * IWP_SCALE);
            }
        }

        Ok(AnnualDataset {
            year,
            time: time_kept,
            lat: Array1::from(lat_kept),
            lon: Array1::from(lon_kept),
            iwp: Array1::from(iwp_kept),
        })
    }
}

/// Reads a one-dimensional variable as f64 values
fn read_column(file: &netcdf::File, name: &str) -> Result<Vec<f64>> {
    let var = file
        .variable(name)
        .ok_or_else(|| IwpHistError::VariableNotFound {
            var: name.to_string(),
        })?;
    Ok(var.get_values::<f64, _>(..)?)
}

/// Resolves the epoch of the `time` variable from its `units` attribute
///
/// The files carry `units = "seconds since <date>"`. Anything else is a
/// fatal error; the run does not guess an epoch.
fn time_epoch(file: &netcdf::File, path: &Path) -> Result<DateTime<Utc>> {
    let var = file
        .variable("time")
        .ok_or_else(|| IwpHistError::VariableNotFound {
            var: "time".to_string(),
        })?;

    let units = match var.attribute("units") {
        Some(attr) => match attr.value()? {
            AttributeValue::Str(s) => s,
            other => {
                return Err(IwpHistError::TimeDecodeError {
                    message: format!(
                        "'units' attribute of 'time' in {} is not a string: {:?}",
                        path.display(),
                        other
                    ),
                })
            }
        },
        None => {
            return Err(IwpHistError::TimeDecodeError {
                message: format!(
                    "variable 'time' in {} has no 'units' attribute",
                    path.display()
                ),
            })
        }
    };

    let reference = units.strip_prefix("seconds since ").ok_or_else(|| {
        IwpHistError::TimeDecodeError {
            message: format!("unsupported time units '{}' in {}", units, path.display()),
        }
    })?;
    let reference = reference.trim();

    let naive = NaiveDateTime::parse_from_str(reference, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| {
            NaiveDate::parse_from_str(reference, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|e| IwpHistError::TimeDecodeError {
            message: format!(
                "cannot parse time reference '{}' in {}: {}",
                reference,
                path.display(),
                e
            ),
        })?;

    Ok(Utc.from_utc_datetime(&naive))
}
