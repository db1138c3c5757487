//! Centralized error handling for iwp-hist
//!
//! This module provides structured error types used throughout the crate,
//! enabling better error context and type safety.

use std::fmt;

/// Main error type for iwp-hist operations
#[derive(Debug)]
pub enum IwpHistError {
    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// Variable not found in NetCDF file
    VariableNotFound { var: String },

    /// Time axis could not be decoded to calendar timestamps
    TimeDecodeError { message: String },

    /// Columns of an annual file disagree on length
    DatasetError(String),

    /// Invalid histogram bin specification
    HistogramError(String),

    /// Figure rendering errors
    PlotError(String),

    /// Requested year was not loaded
    YearNotLoaded { year: i32 },

    /// Thread pool configuration error
    ThreadPoolError(String),
}

impl fmt::Display for IwpHistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IwpHistError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            IwpHistError::IoError(e) => write!(f, "I/O error: {}", e),
            IwpHistError::VariableNotFound { var } => {
                write!(f, "Variable '{}' not found in file", var)
            }
            IwpHistError::TimeDecodeError { message } => {
                write!(f, "Time decode error: {}", message)
            }
            IwpHistError::DatasetError(msg) => write!(f, "Dataset error: {}", msg),
            IwpHistError::HistogramError(msg) => write!(f, "Histogram error: {}", msg),
            IwpHistError::PlotError(msg) => write!(f, "Plot error: {}", msg),
            IwpHistError::YearNotLoaded { year } => {
                write!(f, "Year {} was not loaded", year)
            }
            IwpHistError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
        }
    }
}

impl std::error::Error for IwpHistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IwpHistError::NetCDFError(e) => Some(e),
            IwpHistError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<netcdf::Error> for IwpHistError {
    fn from(error: netcdf::Error) -> Self {
        IwpHistError::NetCDFError(error)
    }
}

impl From<std::io::Error> for IwpHistError {
    fn from(error: std::io::Error) -> Self {
        IwpHistError::IoError(error)
    }
}

/// Result type alias for iwp-hist operations
pub type Result<T> = std::result::Result<T, IwpHistError>;
