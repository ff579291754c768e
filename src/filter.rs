use chrono::NaiveDate;

use crate::models::transaction::DATE_FORMAT;
use crate::models::Transaction;

/// Date and meal-period filter applied to the history table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub date: Option<NaiveDate>,
    /// Free-form label text, compared case-insensitively
    pub meal: Option<String>,
}

impl HistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Filter by meal label; blank text clears the meal filter
    ///
    /// Surrounding whitespace is ignored, so " lunch" filters like "lunch".
    pub fn meal(mut self, label: &str) -> Self {
        self.set_meal(label);
        self
    }

    pub fn set_meal(&mut self, label: &str) {
        let label = label.trim();
        self.meal = (!label.is_empty()).then(|| label.to_string());
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        let date_ok = self
            .date
            .map_or(true, |date| tx.date == date.format(DATE_FORMAT).to_string());
        let meal_ok = self
            .meal
            .as_deref()
            .map_or(true, |label| tx.meal_period().matches_label(label));
        date_ok && meal_ok
    }

    /// Matching records in their original order
    pub fn apply<'a>(&'a self, transactions: &'a [Transaction]) -> impl Iterator<Item = &'a Transaction> + 'a {
        transactions.iter().filter(move |tx| self.matches(tx))
    }
}
