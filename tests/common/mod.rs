#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use discount_ledger::models::Transaction;
use discount_ledger::persistence::JsonFileStore;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Helper to create a transaction from its textual date and time
pub fn make_transaction(
    date: &str,
    time: &str,
    original: Decimal,
    discount: Decimal,
    final_amount: Decimal,
) -> Transaction {
    Transaction::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        NaiveTime::parse_from_str(time, "%H:%M:%S").unwrap(),
        original,
        discount,
        final_amount,
    )
}

/// Helper to create a transaction with fixed amounts 100 / 10% / 90
pub fn make_at(date: &str, time: &str) -> Transaction {
    make_transaction(
        date,
        time,
        Decimal::ONE_HUNDRED,
        Decimal::TEN,
        Decimal::from(90),
    )
}

/// Parse "YYYY-MM-DD HH:MM:SS"
pub fn instant(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// Store backed by a fresh scratch directory; keep the `TempDir` alive
pub fn temp_store() -> (TempDir, JsonFileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    (dir, store)
}

/// Route tracing output through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_make_transaction() {
        let tx = make_transaction("2024-01-01", "08:15:00", dec!(50), dec!(20), dec!(40));
        assert_eq!(tx.date, "2024-01-01");
        assert_eq!(tx.time, "08:15:00");
        assert_eq!(tx.final_amount, dec!(40));
        assert_eq!(tx.id, None);
    }

    #[test]
    fn test_temp_store_starts_without_document() {
        let (_dir, store) = temp_store();
        assert!(!store.path().exists());
    }
}
