use std::fmt;

use rust_decimal::Decimal;

use crate::config::PaymentSettings;
use crate::error::{LedgerError, Result};

/// Edge length in pixels of the square QR image the payload is rendered into
pub const QR_IMAGE_SIZE: u32 = 512;

/// Payment link handed to the QR encoder
///
/// Renders as `<scheme>://pay?pa=<recipient>&am=<amount>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    scheme: String,
    recipient: String,
    amount: Decimal,
}

impl PaymentRequest {
    pub fn new(scheme: &str, recipient: &str, amount: Decimal) -> Result<Self> {
        let scheme = scheme.trim();
        let recipient = recipient.trim();

        if scheme.is_empty() {
            return Err(LedgerError::InvalidInput("payment scheme is empty".into()));
        }
        if recipient.is_empty() {
            return Err(LedgerError::InvalidInput("payment recipient is empty".into()));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            recipient: recipient.to_string(),
            amount,
        })
    }

    pub fn from_settings(settings: &PaymentSettings, amount: Decimal) -> Result<Self> {
        Self::new(&settings.scheme, &settings.recipient, amount)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Text payload to encode
    pub fn uri(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://pay?pa={}&am={}",
            self.scheme,
            self.recipient,
            self.amount.normalize()
        )
    }
}
