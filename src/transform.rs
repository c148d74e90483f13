// Transformation stage
// Derives GBP, EUR and INR market-cap columns from the USD figure

use crate::error::Result;
use crate::extract::BankTable;
use crate::rates::ExchangeRates;

/// Add the three converted market-cap columns to every record.
///
/// Consumes the table and returns a new one; `name` and `market_cap_usd`
/// are never altered. Derived values are always recomputed from
/// `market_cap_usd`, so applying this twice with the same rates yields the
/// same table as applying it once.
///
/// Fails with [`crate::EtlError::MissingRate`] before touching any record
/// if one of GBP, EUR or INR is absent from `rates`.
pub fn transform(table: BankTable, rates: &ExchangeRates) -> Result<BankTable> {
    let gbp = rates.get("GBP")?;
    let eur = rates.get("EUR")?;
    let inr = rates.get("INR")?;

    Ok(table
        .into_iter()
        .map(|mut record| {
            record.market_cap_gbp = Some(round2(record.market_cap_usd * gbp));
            record.market_cap_eur = Some(round2(record.market_cap_usd * eur));
            record.market_cap_inr = Some(round2(record.market_cap_usd * inr));
            record
        })
        .collect())
}

/// Round to two decimal places with ties going to the even digit
/// (banker's rounding).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;
    use crate::extract::BankRecord;

    fn sample_rates() -> ExchangeRates {
        ExchangeRates::from_pairs([("GBP", 0.8), ("EUR", 0.93), ("INR", 82.5)])
    }

    #[test]
    fn test_transform_converts_to_all_three_currencies() {
        let table = vec![BankRecord::new("Bank A", 100.0)];
        let table = transform(table, &sample_rates()).unwrap();

        assert_eq!(table[0].market_cap_gbp, Some(80.0));
        assert_eq!(table[0].market_cap_eur, Some(93.0));
        assert_eq!(table[0].market_cap_inr, Some(8250.0));
    }

    #[test]
    fn test_transform_preserves_name_and_usd_column() {
        let table = vec![BankRecord::new("Bank A", 432.92)];
        let table = transform(table, &sample_rates()).unwrap();

        assert_eq!(table[0].name, "Bank A");
        assert_eq!(table[0].market_cap_usd, 432.92);
    }

    #[test]
    fn test_transform_preserves_row_order() {
        let table = vec![
            BankRecord::new("First", 3.0),
            BankRecord::new("Second", 2.0),
            BankRecord::new("Third", 1.0),
        ];
        let table = transform(table, &sample_rates()).unwrap();
        let names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_transform_is_idempotent_on_derived_columns() {
        let rates = sample_rates();
        let table = vec![BankRecord::new("Bank A", 432.92)];

        let once = transform(table.clone(), &rates).unwrap();
        let twice = transform(once.clone(), &rates).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_transform_missing_rate_fails_before_touching_records() {
        let rates = ExchangeRates::from_pairs([("GBP", 0.8), ("EUR", 0.93)]);
        let table = vec![BankRecord::new("Bank A", 100.0)];

        let err = transform(table, &rates).err().unwrap();
        assert!(matches!(err, EtlError::MissingRate(code) if code == "INR"));
    }

    #[test]
    fn test_round2_ties_go_to_even() {
        // 0.125 and 0.375 are exactly representable, so *100 lands
        // exactly on the .5 boundary
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
    }

    #[test]
    fn test_round2_plain_cases() {
        assert_eq!(round2(432.92 * 0.8), 346.34);
        assert_eq!(round2(100.0), 100.0);
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
    }
}
