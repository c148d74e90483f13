// Pipeline configuration
// All run-level entities (URL, paths, table name) travel in one struct
// instead of process-wide globals

use std::path::PathBuf;

/// Configuration for a single pipeline run.
///
/// `Default` carries the canonical entities: the archived snapshot of the
/// Wikipedia largest-banks page, the local exchange-rate CSV, and the
/// output locations.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Page to scrape. Must serve static, already-rendered HTML.
    pub source_url: String,

    /// Input CSV with `Currency` and `Rate` columns.
    pub exchange_rate_csv: PathBuf,

    /// Where the finished table is written as CSV.
    pub output_csv: PathBuf,

    /// SQLite database file.
    pub db_path: PathBuf,

    /// Relational table name, replaced on every run.
    pub table_name: String,

    /// Append-only milestone log.
    pub log_file: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_url:
                "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks"
                    .to_string(),
            exchange_rate_csv: PathBuf::from("./exchange_rate.csv"),
            output_csv: PathBuf::from("./Largest_banks_data.csv"),
            db_path: PathBuf::from("Banks.db"),
            table_name: "Largest_banks".to_string(),
            log_file: PathBuf::from("./code_log.txt"),
        }
    }
}
