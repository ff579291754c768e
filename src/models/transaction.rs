use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::meal::{classify, MealPeriod};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One recorded discount calculation, stamped with the moment it was saved
///
/// `date` and `time` hold the stored text as-is ("YYYY-MM-DD", "HH:MM:SS").
/// They are not validated on load, so a record with an odd time still lists
/// and classifies as [`MealPeriod::Other`].
///
/// Records are matched for deletion by their `(date, time)` slot, not by `id`.
/// Documents written before ids existed carry no `id` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub date: String,
    pub time: String,
    #[serde(rename = "originalAmount", with = "amount")]
    pub original_amount: Decimal,
    /// Discount in percent
    #[serde(with = "amount")]
    pub discount: Decimal,
    #[serde(rename = "finalAmount", with = "amount")]
    pub final_amount: Decimal,
}

impl Transaction {
    /// Create a record without a generated id
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        original_amount: Decimal,
        discount: Decimal,
        final_amount: Decimal,
    ) -> Self {
        Self {
            id: None,
            date: date.format(DATE_FORMAT).to_string(),
            // Formatting drops sub-second precision
            time: time.format(TIME_FORMAT).to_string(),
            original_amount,
            discount,
            final_amount,
        }
    }

    /// Create a record stamped at `at` with a freshly generated id
    pub fn recorded_at(
        at: NaiveDateTime,
        original_amount: Decimal,
        discount: Decimal,
        final_amount: Decimal,
    ) -> Self {
        Self {
            id: Some(Uuid::new_v4()),
            ..Self::new(at.date(), at.time(), original_amount, discount, final_amount)
        }
    }

    /// Attach an explicit id
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// True when both records were stamped in the same second
    pub fn same_slot(&self, other: &Transaction) -> bool {
        self.date == other.date && self.time == other.time
    }

    /// Meal period of the stored time; `Other` when it does not parse
    pub fn meal_period(&self) -> MealPeriod {
        classify(&self.time)
    }
}

/// Amounts are JSON numbers, as the legacy ledger wrote them
///
/// Reading never fails on range: numbers beyond what a `Decimal` holds
/// saturate to `Decimal::MAX`/`MIN`, and tiny ones round to zero.
mod amount {
    use std::str::FromStr;

    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::warn;

    pub fn serialize<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(amount.to_f64().unwrap_or_default())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Ok(from_f64(value))
    }

    pub(super) fn from_f64(value: f64) -> Decimal {
        // f64 Display is the shortest exact-roundtrip text, never exponent form
        if let Ok(decimal) = Decimal::from_str(&value.to_string()) {
            return decimal;
        }

        let saturated = if value.abs() < 1.0 {
            Decimal::ZERO
        } else if value.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        };
        warn!(value, %saturated, "Stored amount outside decimal range");
        saturated
    }
}
