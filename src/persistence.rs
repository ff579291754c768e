use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{LedgerError, Result};
use crate::models::Transaction;

/// Document name used when none is configured
pub const DEFAULT_DOCUMENT: &str = "transactions.json";

/// Durable collection of recorded transactions
///
/// Every mutation reads the whole collection, changes it and writes the whole
/// collection back. Implementations assume a single writer and do no locking.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use discount_ledger::models::Transaction;
/// use discount_ledger::persistence::{MemoryStore, TransactionStore};
/// use rust_decimal_macros::dec;
///
/// let mut store = MemoryStore::new();
/// let at = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let tx = Transaction::new(at.date(), at.time(), dec!(100), dec!(10), dec!(90));
///
/// store.append(&tx).unwrap();
/// assert_eq!(store.list_all().unwrap(), vec![tx.clone()]);
///
/// assert_eq!(store.delete_matching(&tx).unwrap(), 1);
/// assert!(store.list_all().unwrap().is_empty());
/// ```
pub trait TransactionStore {
    /// Append a record at the end of the collection, creating the document if needed
    ///
    /// Records sharing a `(date, time)` slot are allowed and accumulate.
    fn append(&mut self, tx: &Transaction) -> Result<()>;

    /// All records in insertion order; empty when no document exists yet
    fn list_all(&self) -> Result<Vec<Transaction>>;

    /// Remove every record in the same `(date, time)` slot as `tx`
    ///
    /// Amounts and ids are ignored. The collection is rewritten even when
    /// nothing matched; a missing document stays missing.
    ///
    /// # Returns
    ///
    /// Number of records removed
    fn delete_matching(&mut self, tx: &Transaction) -> Result<usize>;

    /// Remove the record carrying `id`; records without an id never match
    fn delete_by_id(&mut self, id: Uuid) -> Result<usize>;
}

/// Ledger kept as one JSON array on disk
///
/// Writes go to `<document>.tmp` next to the ledger and are renamed over it,
/// so a reader sees either the previous or the new collection.
///
/// A document that exists but does not parse is reported as
/// [`LedgerError::Corrupt`] and is never overwritten.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    tmp_path: PathBuf,
}

impl JsonFileStore {
    /// Store using [`DEFAULT_DOCUMENT`] inside `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_document(dir, DEFAULT_DOCUMENT)
    }

    pub fn with_document(dir: impl AsRef<Path>, document: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            path: dir.join(document),
            tmp_path: dir.join(format!("{}.tmp", document)),
        }
    }

    /// Location of the ledger document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document; `None` when it does not exist
    fn load(&self) -> Result<Option<Vec<Transaction>>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let transactions: Vec<Transaction> =
            serde_json::from_slice(&bytes).map_err(|source| {
                warn!(path = %self.path.display(), error = %source, "Ledger document is corrupt");
                LedgerError::Corrupt {
                    path: self.path.clone(),
                    source,
                }
            })?;

        debug!(path = %self.path.display(), count = transactions.len(), "Loaded ledger");
        Ok(Some(transactions))
    }

    fn write(&self, transactions: &[Transaction]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_vec(transactions)?;

        let mut file = File::create(&self.tmp_path)?;
        file.write_all(&json)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&self.tmp_path, &self.path)?;

        debug!(path = %self.path.display(), count = transactions.len(), "Wrote ledger");
        Ok(())
    }

    /// Load, drop records matching `remove`, write back; no-op without a document
    fn remove_where<F>(&self, mut remove: F) -> Result<usize>
    where
        F: FnMut(&Transaction) -> bool,
    {
        let Some(mut transactions) = self.load()? else {
            return Ok(0);
        };

        let before = transactions.len();
        transactions.retain(|tx| !remove(tx));
        let removed = before - transactions.len();

        self.write(&transactions)?;

        if removed > 0 {
            info!(path = %self.path.display(), removed, "Deleted transactions");
        }
        Ok(removed)
    }
}

impl TransactionStore for JsonFileStore {
    fn append(&mut self, tx: &Transaction) -> Result<()> {
        let mut transactions = match self.load()? {
            Some(transactions) => transactions,
            None => {
                info!(path = %self.path.display(), "Creating ledger document");
                Vec::new()
            }
        };

        transactions.push(tx.clone());
        self.write(&transactions)
    }

    fn list_all(&self) -> Result<Vec<Transaction>> {
        Ok(self.load()?.unwrap_or_default())
    }

    fn delete_matching(&mut self, tx: &Transaction) -> Result<usize> {
        self.remove_where(|stored| stored.same_slot(tx))
    }

    fn delete_by_id(&mut self, id: Uuid) -> Result<usize> {
        self.remove_where(|stored| stored.id == Some(id))
    }
}

/// In-memory ledger with the same semantics as [`JsonFileStore`]
///
/// Counts full-collection writes so callers can observe rewrites.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// `None` until the first append, mirroring a missing document
    transactions: Option<Vec<Transaction>>,
    write_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of full-collection writes performed so far
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    fn remove_where<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(&Transaction) -> bool,
    {
        let Some(transactions) = self.transactions.as_mut() else {
            return 0;
        };

        let before = transactions.len();
        transactions.retain(|tx| !remove(tx));
        self.write_count += 1;
        before - transactions.len()
    }
}

impl TransactionStore for MemoryStore {
    fn append(&mut self, tx: &Transaction) -> Result<()> {
        self.transactions
            .get_or_insert_with(Vec::new)
            .push(tx.clone());
        self.write_count += 1;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.clone().unwrap_or_default())
    }

    fn delete_matching(&mut self, tx: &Transaction) -> Result<usize> {
        Ok(self.remove_where(|stored| stored.same_slot(tx)))
    }

    fn delete_by_id(&mut self, id: Uuid) -> Result<usize> {
        Ok(self.remove_where(|stored| stored.id == Some(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at(h: u32, m: u32, s: u32) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Transaction::new(
            date,
            chrono::NaiveTime::from_hms_opt(h, m, s).unwrap(),
            dec!(100),
            dec!(10),
            dec!(90),
        )
    }

    #[test]
    fn test_memory_store_starts_absent() {
        let mut store = MemoryStore::new();

        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.delete_matching(&at(8, 0, 0)).unwrap(), 0);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_memory_store_rewrites_on_unmatched_delete() {
        let mut store = MemoryStore::new();
        store.append(&at(8, 0, 0)).unwrap();

        assert_eq!(store.delete_matching(&at(9, 0, 0)).unwrap(), 0);
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.list_all().unwrap(), vec![at(8, 0, 0)]);
    }

    #[test]
    fn test_file_store_paths() {
        let store = JsonFileStore::with_document("/data", "ledger.json");

        assert_eq!(store.path(), Path::new("/data/ledger.json"));
        assert_eq!(store.tmp_path, Path::new("/data/ledger.json.tmp"));
        assert_eq!(
            JsonFileStore::new("/data").path(),
            Path::new("/data/transactions.json")
        );
    }
}
