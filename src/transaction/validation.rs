/// Input checks for transfers typed in by a user. The engine itself accepts any
/// transaction; these run at the shell boundary before anything reaches it.
use crate::error::{ChainError, Result};
use crate::transaction::types::Transaction;

/// Builds a transaction from raw text fields, trimming surrounding whitespace.
///
/// Sender and recipient must be non-empty and the amount must read as a finite
/// decimal number. The amount is stored as the trimmed text, not re-rendered.
pub fn parse_transfer(sender: &str, recipient: &str, amount: &str) -> Result<Transaction> {
    let sender = sender.trim();
    let recipient = recipient.trim();
    let amount = amount.trim();

    if sender.is_empty() {
        return Err(ChainError::InvalidInput("sender must not be empty".to_string()));
    }
    if recipient.is_empty() {
        return Err(ChainError::InvalidInput("recipient must not be empty".to_string()));
    }
    validate_amount(amount)?;

    Ok(Transaction::new(sender, recipient, amount))
}

fn validate_amount(amount: &str) -> Result<()> {
    match amount.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(()),
        _ => Err(ChainError::InvalidInput(format!(
            "amount '{}' is not a decimal number",
            amount
        ))),
    }
}
