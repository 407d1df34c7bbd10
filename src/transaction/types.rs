/// Transaction types for powledger
use serde::{Deserialize, Serialize};
use std::fmt;

/// A proposed transfer. Identifiers are opaque and the amount is kept exactly
/// as it was given; the ledger records transfers, it does not keep balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: String,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Transaction {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.sender, self.recipient, self.amount)
    }
}

/// One record in a block's transaction list.
///
/// Serialized untagged so a transfer hashes as `{"amount","recipient","sender"}`
/// and the tamper marker as `{"corrupted":true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LedgerEntry {
    Transfer(Transaction),
    Tampered { corrupted: bool },
}

impl LedgerEntry {
    /// The sentinel written over a block's entries by `corrupt`.
    pub fn tamper_marker() -> Self {
        LedgerEntry::Tampered { corrupted: true }
    }

    pub fn is_tampered(&self) -> bool {
        matches!(self, LedgerEntry::Tampered { .. })
    }

    pub fn as_transfer(&self) -> Option<&Transaction> {
        match self {
            LedgerEntry::Transfer(tx) => Some(tx),
            LedgerEntry::Tampered { .. } => None,
        }
    }
}

impl From<Transaction> for LedgerEntry {
    fn from(tx: Transaction) -> Self {
        LedgerEntry::Transfer(tx)
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LedgerEntry::Transfer(tx) => tx.fmt(f),
            LedgerEntry::Tampered { corrupted } => write!(f, "<corrupted: {}>", corrupted),
        }
    }
}
