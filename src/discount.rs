use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{LedgerError, Result};
use crate::models::Transaction;

/// Decimal places kept on the final amount
pub const FINAL_AMOUNT_SCALE: u32 = 2;

/// Parse user-entered text as a decimal number
///
/// Surrounding whitespace is ignored; anything else non-numeric is rejected.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| LedgerError::InvalidInput(format!("'{}' is not a number", input)))
}

/// Round to cents, half away from zero like a `%.2f` display
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(FINAL_AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// `original - original * discount / 100`, rounded to cents half away from zero
///
/// The discount is not range-checked: above 100 yields a negative amount.
/// Inputs too large for a `Decimal` are rejected as invalid.
pub fn final_amount(original: Decimal, discount_percent: Decimal) -> Result<Decimal> {
    let reduced = original
        .checked_mul(discount_percent)
        .and_then(|off| off.checked_div(Decimal::ONE_HUNDRED))
        .and_then(|off| original.checked_sub(off))
        .ok_or_else(|| LedgerError::InvalidInput("amount out of range".into()))?;

    Ok(round_cents(reduced))
}

/// Validated discount calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub original: Decimal,
    pub discount: Decimal,
    pub final_amount: Decimal,
}

impl Quote {
    pub fn new(original: Decimal, discount: Decimal) -> Result<Self> {
        Ok(Self {
            original,
            discount,
            final_amount: final_amount(original, discount)?,
        })
    }

    /// Build a quote from the two form fields
    pub fn from_input(amount: &str, discount: &str) -> Result<Self> {
        let original = parse_amount(amount)?;
        let discount = parse_amount(discount)?;
        Self::new(original, discount)
    }

    /// Final amount as shown to the user, always with two decimals
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.final_amount)
    }

    /// Record this quote as a transaction stamped at `at`
    pub fn into_transaction(self, at: NaiveDateTime) -> Transaction {
        Transaction::recorded_at(at, self.original, self.discount, self.final_amount)
    }
}
