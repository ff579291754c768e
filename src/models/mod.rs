pub mod meal;
pub mod transaction;

pub use meal::MealPeriod;
pub use transaction::Transaction;
