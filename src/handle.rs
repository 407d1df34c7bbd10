//! Shared access to one ledger from several threads.
//!
//! Every mutation goes through a single writer lock, mining included. Readers
//! validate a cloned snapshot so they never walk a chain that is being
//! extended underneath them.

use crate::blockchain::{validate_chain, Block, Blockchain};
use crate::error::Result;
use crate::intake;
use crate::transaction::Transaction;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct LedgerHandle {
    inner: Arc<RwLock<Blockchain>>,
}

impl LedgerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&self, transaction: Transaction) -> u64 {
        intake::submit(transaction, &mut self.inner.write())
    }

    pub fn corrupt(&self, index: u64) -> Result<()> {
        intake::corrupt(&mut self.inner.write(), index)
    }

    pub fn create_block(&self, proof: u64, prev_hash: impl Into<String>) -> Block {
        self.inner.write().create_block(proof, prev_hash).clone()
    }

    pub fn latest_block(&self) -> Block {
        self.inner.read().latest_block().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Block> {
        self.inner.read().blocks().to_vec()
    }

    /// Validates a snapshot taken under the read lock; the lock is released
    /// before the walk starts.
    pub fn is_valid(&self) -> bool {
        let blocks = self.snapshot();
        validate_chain(&blocks)
    }

    /// Runs `f` with shared access to the chain.
    pub fn read<R>(&self, f: impl FnOnce(&Blockchain) -> R) -> R {
        f(&self.inner.read())
    }
}

impl From<Blockchain> for LedgerHandle {
    fn from(chain: Blockchain) -> Self {
        LedgerHandle {
            inner: Arc::new(RwLock::new(chain)),
        }
    }
}
