//! Core conversion logic, independent of the CLI.

pub mod config;
pub mod converter;
pub mod currency;
pub mod error;
pub mod log;
pub mod prefs;
pub mod rates;
pub mod state;

// Re-export main types for cleaner imports
pub use converter::Converter;
pub use error::ConvertError;
pub use rates::{RateProvider, RateTable};
pub use state::{ConversionState, convert};
