// Extraction stage
// Fetches the largest-banks page and pulls (name, market cap USD) rows
// out of the first table body

use log::{debug, warn};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::error::{EtlError, Result};

// ============================================================================
// CORE TYPES
// ============================================================================

/// One bank row of the final table.
///
/// Extraction fills `name` and `market_cap_usd`; the three converted
/// columns stay `None` until the transform stage runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "MC_USD_Billion")]
    pub market_cap_usd: f64,

    #[serde(rename = "MC_GBP_Billion")]
    pub market_cap_gbp: Option<f64>,

    #[serde(rename = "MC_EUR_Billion")]
    pub market_cap_eur: Option<f64>,

    #[serde(rename = "MC_INR_Billion")]
    pub market_cap_inr: Option<f64>,
}

impl BankRecord {
    /// A freshly extracted record, before any currency conversion.
    pub fn new(name: impl Into<String>, market_cap_usd: f64) -> Self {
        BankRecord {
            name: name.into(),
            market_cap_usd,
            market_cap_gbp: None,
            market_cap_eur: None,
            market_cap_inr: None,
        }
    }
}

/// Ordered rows. Insertion order = extraction order = page row order.
/// Duplicate names are preserved as-is.
pub type BankTable = Vec<BankRecord>;

/// Extraction output: the table plus how many structurally malformed rows
/// were dropped on the way (rows with cells but no bank link).
#[derive(Debug)]
pub struct Extraction {
    pub table: BankTable,
    pub skipped_rows: usize,
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Fetch `url` and scrape the bank table out of it.
///
/// The page must be static, already-rendered HTML - no script execution
/// happens here. Transport failures and non-success statuses fail with
/// [`EtlError::Fetch`]; a page without the expected table fails with
/// [`EtlError::Parse`].
pub fn extract(url: &str) -> Result<Extraction> {
    let response = reqwest::blocking::get(url).map_err(|e| EtlError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(EtlError::Fetch {
            url: url.to_string(),
            reason: format!("HTTP status {}", status),
        });
    }

    let html = response.text().map_err(|e| EtlError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    debug!("fetched {} bytes from {}", html.len(), url);

    extract_from_html(&html)
}

/// Scrape an in-memory document. Separated from [`extract`] so tests run
/// without a network.
///
/// Walks the first `tbody` in document order. Per row:
/// - zero `td` cells: header or separator row, skipped
/// - no `a` element in the second cell, or no third cell: structurally
///   malformed, skipped silently but counted
/// - third-cell text with newlines stripped must parse as `f64`, otherwise
///   the whole run fails with [`EtlError::Parse`] naming the row
pub fn extract_from_html(html: &str) -> Result<Extraction> {
    let document = Html::parse_document(html);
    let tbody = selector("tbody")?;
    let tr = selector("tr")?;
    let td = selector("td")?;
    let anchor = selector("a")?;

    let body = document
        .select(&tbody)
        .next()
        .ok_or_else(|| EtlError::Parse("no <tbody> element in document".to_string()))?;

    let mut table = BankTable::new();
    let mut skipped_rows = 0;

    for (index, row) in body.select(&tr).enumerate() {
        let cells: Vec<_> = row.select(&td).collect();
        if cells.is_empty() {
            // Header row (th cells only)
            continue;
        }

        // Bank name comes from the link nested in the second cell
        let name = cells
            .get(1)
            .and_then(|cell| cell.select(&anchor).next())
            .map(|link| link.text().collect::<String>().trim().to_string())
            .filter(|name| !name.is_empty());

        let (name, cap_cell) = match (name, cells.get(2)) {
            (Some(name), Some(cell)) => (name, cell),
            _ => {
                skipped_rows += 1;
                continue;
            }
        };

        let raw = cap_cell.text().collect::<String>();
        let cleaned = raw.replace('\n', "");
        let cleaned = cleaned.trim();
        let market_cap_usd: f64 = cleaned.parse().map_err(|_| {
            EtlError::Parse(format!(
                "row {}: market cap {:?} is not a number",
                index, cleaned
            ))
        })?;

        table.push(BankRecord::new(name, market_cap_usd));
    }

    if skipped_rows > 0 {
        warn!("skipped {} malformed table rows", skipped_rows);
    }

    Ok(Extraction {
        table,
        skipped_rows,
    })
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| EtlError::Parse(format!("bad selector {:?}: {}", css, e)))
}

// ============================================================================
// TESTS
// ============================================================================
