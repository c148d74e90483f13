// Largest Banks ETL - Core Library
// Exposes all pipeline stages for use in the CLI binary and tests

pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod progress;
pub mod rates;
pub mod transform;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{EtlError, Result};
pub use extract::{extract, extract_from_html, BankRecord, BankTable, Extraction};
pub use load::{canonical_queries, run_query, save_csv, save_table, ResultSet};
pub use progress::ProgressLog;
pub use rates::ExchangeRates;
pub use transform::{round2, transform};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
