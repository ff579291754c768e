use chrono::NaiveDate;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::PaymentSettings;
use crate::discount::{parse_amount, Quote};
use crate::error::Result;
use crate::filter::HistoryFilter;
use crate::models::{MealPeriod, Transaction};
use crate::payment::PaymentRequest;
use crate::persistence::TransactionStore;

/// Text shown in place of the final amount when the form does not parse
pub const INVALID_INPUT: &str = "Invalid input";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Home,
    CreateTransaction,
    History,
}

/// Discount form on the create-transaction screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountForm {
    pub amount: String,
    pub discount: String,
    /// Formatted final amount, [`INVALID_INPUT`], or empty before calculating
    pub output: String,
    /// Payment URI shown as a QR code; the dialog is open while this is set
    pub payment_payload: Option<String>,
}

/// History table with its filter and row selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryView {
    pub transactions: Vec<Transaction>,
    pub filter: HistoryFilter,
    pub selected: Vec<Transaction>,
}

impl HistoryView {
    /// Rows passing the filter, paired with their meal period
    pub fn visible(&self) -> Vec<(&Transaction, MealPeriod)> {
        self.filter
            .apply(&self.transactions)
            .map(|tx| (tx, tx.meal_period()))
            .collect()
    }

    pub fn is_selected(&self, tx: &Transaction) -> bool {
        self.selected.contains(tx)
    }

    /// Delete is only offered while something is selected
    pub fn can_delete(&self) -> bool {
        !self.selected.is_empty()
    }
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub screen: Screen,
    pub form: DiscountForm,
    pub history: HistoryView,
}

/// User intents fed into [`Ledger::update`]
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Navigate(Screen),
    AmountChanged(String),
    DiscountChanged(String),
    Calculate,
    GenerateQr,
    DismissQr,
    /// Save the calculated transaction (if valid) and return home
    Done,
    SetDateFilter(Option<NaiveDate>),
    SetMealFilter(String),
    ToggleSelected(Transaction),
    DeleteSelected,
}

/// Store, clock and payee wired together behind the update function
///
/// `update` never mutates the state it is given: on a storage error the
/// caller keeps its previous state and can show the error.
pub struct Ledger<S: TransactionStore, C: Clock> {
    store: S,
    clock: C,
    payment: PaymentSettings,
}

impl<S: TransactionStore, C: Clock> Ledger<S, C> {
    pub fn new(store: S, clock: C, payment: PaymentSettings) -> Self {
        Self {
            store,
            clock,
            payment,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Compute the state that follows `message`
    ///
    /// `DeleteSelected` deletes one slot at a time. When a deletion fails the
    /// earlier ones are already written, so the returned error leaves the
    /// caller's history stale; send `Navigate(Screen::History)` to reload it.
    pub fn update(&mut self, state: &AppState, message: Message) -> Result<AppState> {
        let mut next = state.clone();

        match message {
            Message::Navigate(screen) => self.navigate(&mut next, screen)?,
            Message::AmountChanged(text) => next.form.amount = text,
            Message::DiscountChanged(text) => next.form.discount = text,
            Message::Calculate => {
                next.form.output = match Quote::from_input(&next.form.amount, &next.form.discount) {
                    Ok(quote) => quote.display_amount(),
                    Err(_) => INVALID_INPUT.to_string(),
                };
                next.form.payment_payload = None;
            }
            Message::GenerateQr => {
                if let Ok(amount) = parse_amount(&next.form.output) {
                    let request = PaymentRequest::from_settings(&self.payment, amount)?;
                    next.form.payment_payload = Some(request.uri());
                }
            }
            Message::DismissQr => next.form.payment_payload = None,
            Message::Done => {
                self.save_form(&next.form)?;
                self.navigate(&mut next, Screen::Home)?;
            }
            Message::SetDateFilter(date) => next.history.filter.date = date,
            Message::SetMealFilter(text) => next.history.filter.set_meal(&text),
            Message::ToggleSelected(tx) => {
                let selected = &mut next.history.selected;
                match selected.iter().position(|s| *s == tx) {
                    Some(index) => {
                        selected.remove(index);
                    }
                    None => selected.push(tx),
                }
            }
            Message::DeleteSelected => {
                if next.history.can_delete() {
                    let mut removed = 0;
                    for tx in &next.history.selected {
                        removed += self.store.delete_matching(tx)?;
                    }
                    info!(removed, "Deleted selected transactions");
                    self.reload_history(&mut next)?;
                }
            }
        }

        Ok(next)
    }

    fn navigate(&mut self, state: &mut AppState, screen: Screen) -> Result<()> {
        match screen {
            Screen::Home | Screen::CreateTransaction => state.form = DiscountForm::default(),
            Screen::History => self.reload_history(state)?,
        }
        state.screen = screen;
        Ok(())
    }

    fn reload_history(&mut self, state: &mut AppState) -> Result<()> {
        state.history.transactions = self.store.list_all()?;
        state.history.selected.clear();
        Ok(())
    }

    /// Append the form's transaction when amount, discount and output all parse
    ///
    /// The saved final amount is the displayed output, not a fresh calculation.
    fn save_form(&mut self, form: &DiscountForm) -> Result<()> {
        let parsed = (
            parse_amount(&form.amount),
            parse_amount(&form.discount),
            parse_amount(&form.output),
        );

        let (Ok(original), Ok(discount), Ok(final_amount)) = parsed else {
            debug!("Form incomplete, nothing recorded");
            return Ok(());
        };

        let tx = Transaction::recorded_at(self.clock.now(), original, discount, final_amount);
        self.store.append(&tx)?;

        info!(date = %tx.date, time = %tx.time, final_amount = %tx.final_amount, "Recorded transaction");
        Ok(())
    }
}
