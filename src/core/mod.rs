//! Core types, abstractions and ambient setup

pub mod config;
pub mod log;
pub mod preferences;
pub mod rates;
pub mod source;

// Re-export main types for cleaner imports
pub use preferences::Preferences;
pub use rates::{RateTable, StoreState};
pub use source::{FetchError, RateSource};
