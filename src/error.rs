// Error taxonomy for the ETL pipeline
// None of these are caught internally - any failure aborts the run

use thiserror::Error;

/// Everything that can stop a pipeline run.
///
/// There is no partial-success state: an error at any stage terminates the
/// run, and any half-written CSV or database table must be treated as
/// invalid by the operator.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Network or transport failure, including non-success HTTP status.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Expected HTML structure absent, or a cell failed numeric parsing.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// A currency the transformer needs is absent from the rate table.
    #[error("no exchange rate for currency {0}")]
    MissingRate(String),

    /// File read or write failure.
    #[error("file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Database connection or write failure.
    #[error("storage operation failed: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl From<csv::Error> for EtlError {
    fn from(err: csv::Error) -> Self {
        // Surface the underlying I/O error when there is one; everything
        // else is a malformed delimited file.
        match err.into_kind() {
            csv::ErrorKind::Io(io) => EtlError::Io(io),
            other => EtlError::Parse(format!("malformed CSV: {:?}", other)),
        }
    }
}

/// Convenience alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_rate_message_names_currency() {
        let err = EtlError::MissingRate("INR".to_string());
        assert_eq!(err.to_string(), "no exchange rate for currency INR");
    }

    #[test]
    fn test_fetch_message_includes_url() {
        let err = EtlError::Fetch {
            url: "http://example.com".to_string(),
            reason: "HTTP status 404".to_string(),
        };
        assert!(err.to_string().contains("http://example.com"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_csv_io_error_maps_to_io() {
        let result = csv::Reader::from_path("/nonexistent/rates.csv");
        let err: EtlError = result.err().unwrap().into();
        assert!(matches!(err, EtlError::Io(_)));
    }
}
