pub mod app;
pub mod clock;
pub mod config;
pub mod discount;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod payment;
pub mod persistence;

use std::io::Write;

use error::Result;
use filter::HistoryFilter;
use persistence::TransactionStore;

/// Export the stored transactions that pass `filter` as CSV
pub fn export_history<S, W>(store: &S, filter: &HistoryFilter, writer: W) -> Result<()>
where
    S: TransactionStore,
    W: Write,
{
    let transactions = store.list_all()?;
    export::write_history(filter.apply(&transactions), writer)
}
