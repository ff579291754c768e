use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::discount::round_cents;
use crate::error::Result;
use crate::models::Transaction;

/// One line of the history table
#[derive(Serialize)]
struct HistoryRow {
    date: String,
    when: &'static str,
    original_amount: String,
    discount: Decimal,
    final_amount: String,
}

impl From<&Transaction> for HistoryRow {
    fn from(tx: &Transaction) -> Self {
        Self {
            date: tx.date.clone(),
            when: tx.meal_period().label(),
            original_amount: format!("{:.2}", round_cents(tx.original_amount)),
            discount: tx.discount,
            final_amount: format!("{:.2}", round_cents(tx.final_amount)),
        }
    }
}

/// Write the history table as CSV, one row per transaction in the given order
pub fn write_history<'a, I, W>(transactions: I, writer: W) -> Result<()>
where
    I: IntoIterator<Item = &'a Transaction>,
    W: Write,
{
    // Header is written by hand so an empty history still gets one
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(["date", "when", "original_amount", "discount", "final_amount"])?;
    for tx in transactions {
        csv_writer.serialize(HistoryRow::from(tx))?;
    }

    csv_writer.flush()?;
    Ok(())
}
