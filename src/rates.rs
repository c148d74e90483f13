// Exchange-rate table
// Static multipliers against USD, loaded wholesale from a CSV file

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{EtlError, Result};

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,

    #[serde(rename = "Rate")]
    rate: f64,
}

/// Mapping from currency code to a positive multiplier against USD.
///
/// Every currency the transformer references must be present, otherwise
/// transformation fails with [`EtlError::MissingRate`].
#[derive(Debug, Clone, Default)]
pub struct ExchangeRates {
    rates: HashMap<String, f64>,
}

impl ExchangeRates {
    /// Load the whole table from a CSV with `Currency` and `Rate` columns,
    /// one row per currency code.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;

        let mut rates = HashMap::new();
        for result in reader.deserialize() {
            let row: RateRow = result?;
            rates.insert(row.currency, row.rate);
        }

        Ok(Self { rates })
    }

    /// Build a table directly from code/rate pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            rates: pairs
                .into_iter()
                .map(|(code, rate)| (code.into(), rate))
                .collect(),
        }
    }

    /// Multiplier for `code`, or [`EtlError::MissingRate`] if absent.
    pub fn get(&self, code: &str) -> Result<f64> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| EtlError::MissingRate(code.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_from_csv_loads_all_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exchange_rate.csv");
        fs::write(&path, "Currency,Rate\nEUR,0.93\nGBP,0.8\nINR,82.95\n").unwrap();

        let rates = ExchangeRates::from_csv(&path).unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates.get("GBP").unwrap(), 0.8);
        assert_eq!(rates.get("EUR").unwrap(), 0.93);
        assert_eq!(rates.get("INR").unwrap(), 82.95);
    }

    #[test]
    fn test_get_missing_currency_fails() {
        let rates = ExchangeRates::from_pairs([("GBP", 0.8)]);
        let err = rates.get("INR").err().unwrap();
        assert!(matches!(err, EtlError::MissingRate(code) if code == "INR"));
    }

    #[test]
    fn test_from_csv_missing_file_is_io_error() {
        let err = ExchangeRates::from_csv(Path::new("/nonexistent/exchange_rate.csv"))
            .err()
            .unwrap();
        assert!(matches!(err, EtlError::Io(_)));
    }

    #[test]
    fn test_from_csv_non_numeric_rate_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exchange_rate.csv");
        fs::write(&path, "Currency,Rate\nGBP,not-a-number\n").unwrap();

        let err = ExchangeRates::from_csv(&path).err().unwrap();
        assert!(matches!(err, EtlError::Parse(_)));
    }
}
