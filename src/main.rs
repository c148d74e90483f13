use anyhow::{Context, Result};
use rusqlite::Connection;

use largest_banks_etl::{
    canonical_queries, extract, run_query, save_csv, save_table, transform, ExchangeRates,
    PipelineConfig, ProgressLog,
};

/// One linear ETL pass: scrape, convert, persist, report. Any failure
/// aborts the run; the milestone log records forward progress only.
fn main() -> Result<()> {
    env_logger::init();

    let config = PipelineConfig::default();
    let progress = ProgressLog::new(&config.log_file);

    progress.record("Preliminaries complete. Initiating ETL process")?;

    // 1. Extract
    progress.record("Extraction Process Started")?;
    println!("🌐 Fetching {}", config.source_url);
    let extraction = extract(&config.source_url)?;
    println!(
        "✓ Extracted {} banks ({} malformed rows skipped)",
        extraction.table.len(),
        extraction.skipped_rows
    );
    progress.record("Extraction Process Complete")?;
    progress.record("Data extraction complete. Initiating Transformation process")?;

    // 2. Transform
    let rates = ExchangeRates::from_csv(&config.exchange_rate_csv)
        .with_context(|| format!("loading {}", config.exchange_rate_csv.display()))?;
    let table = transform(extraction.table, &rates)?;
    println!("✓ Converted market caps to GBP, EUR, INR");
    progress.record("Data transformation complete. Initiating loading process")?;

    // 3. Load
    save_csv(&table, &config.output_csv)?;
    println!("✓ Saved table to {}", config.output_csv.display());
    progress.record("Data saved to CSV file")?;

    let conn = Connection::open(&config.db_path)
        .with_context(|| format!("opening {}", config.db_path.display()))?;
    progress.record("SQL Connection initiated.")?;

    save_table(&table, &conn, &config.table_name)?;
    println!(
        "✓ Loaded {} rows into table {}",
        table.len(),
        config.table_name
    );
    progress.record("Data loaded to Database as table. Running the query")?;

    // 4. Reporting queries
    for query in canonical_queries(&config.table_name) {
        println!("\n{}", query);
        let result = run_query(&query, &conn)?;
        println!("{}", result);
        progress.record("Query Execution Complete")?;
    }

    progress.record("Process Complete.")?;

    // Explicitly close the connection at the end of the run
    conn.close().map_err(|(_, e)| e)?;

    Ok(())
}
