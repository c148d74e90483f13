// Load stage
// Writes the finished table to a CSV file and a SQLite table, and runs
// the read-only reporting queries

use rusqlite::types::Value;
use rusqlite::{params, Connection};
use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::extract::BankRecord;

// ============================================================================
// CSV OUTPUT
// ============================================================================

/// Serialize the table, derived columns included, to a delimited file with
/// a header row. Re-running overwrites the prior file.
pub fn save_csv(table: &[BankRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    for record in table {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

// ============================================================================
// RELATIONAL STORE
// ============================================================================

/// Replace the named table with the contents of `table`.
///
/// Drop-and-recreate semantics: whatever the table held before this call
/// is gone afterwards. Rows are inserted in table order inside a single
/// transaction.
pub fn save_table(table: &[BankRecord], conn: &Connection, table_name: &str) -> Result<()> {
    conn.execute_batch(&format!(
        "DROP TABLE IF EXISTS {name};
         CREATE TABLE {name} (
             Name TEXT,
             MC_USD_Billion REAL,
             MC_GBP_Billion REAL,
             MC_EUR_Billion REAL,
             MC_INR_Billion REAL
         );",
        name = table_name
    ))?;

    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {} (Name, MC_USD_Billion, MC_GBP_Billion, MC_EUR_Billion, MC_INR_Billion)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            table_name
        ))?;

        for record in table {
            stmt.execute(params![
                record.name,
                record.market_cap_usd,
                record.market_cap_gbp,
                record.market_cap_eur,
                record.market_cap_inr,
            ])?;
        }
    }
    tx.commit()?;

    Ok(())
}

// ============================================================================
// QUERIES
// ============================================================================

/// Rows returned by a read-only query.
#[derive(Debug)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns.join("\t"))?;
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(format_value).collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => r.to_string(),
        Value::Text(t) => t.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

/// Execute a read-only query and collect every row. No mutation occurs
/// through this path.
pub fn run_query(query: &str, conn: &Connection) -> Result<ResultSet> {
    let mut stmt = conn.prepare(query)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
    let column_count = columns.len();

    let rows = stmt
        .query_map([], |row| {
            (0..column_count)
                .map(|i| row.get::<_, Value>(i))
                .collect::<std::result::Result<Vec<Value>, _>>()
        })?
        .collect::<std::result::Result<Vec<Vec<Value>>, _>>()?;

    Ok(ResultSet { columns, rows })
}

/// The three fixed reporting queries, in run order: the whole table, the
/// average GBP market cap, and the names of the top five banks.
pub fn canonical_queries(table_name: &str) -> [String; 3] {
    [
        format!("SELECT * FROM {}", table_name),
        format!("SELECT AVG(MC_GBP_Billion) FROM {}", table_name),
        format!("SELECT Name FROM {} LIMIT 5", table_name),
    ]
}

// ============================================================================
// TESTS
// ============================================================================
