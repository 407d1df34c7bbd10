//! Transaction intake: batches transfers into the latest block and rolls over
//! to a freshly mined block once it is full.

use crate::blockchain::Blockchain;
use crate::error::Result;
use crate::transaction::{LedgerEntry, Transaction};
use tracing::{debug, info, warn};

/// Entries a block takes before the next submission mines a new one.
pub const BLOCK_CAPACITY: usize = 2;

/// Records `transaction` in the latest block, mining a new block first when the
/// latest one already holds [`BLOCK_CAPACITY`] entries.
///
/// Returns the index of the block the transaction landed in.
pub fn submit(transaction: Transaction, chain: &mut Blockchain) -> u64 {
    if chain.latest_block().transactions().len() >= BLOCK_CAPACITY {
        let block = chain.mine_block();
        debug!(index = block.index(), "latest block full, rolled over");
    }

    let block = chain.latest_block_mut();
    debug!(index = block.index(), tx = %transaction, "transaction recorded");
    block.transactions_mut().push(LedgerEntry::Transfer(transaction));
    block.index()
}

/// Overwrites the entries of block `index` (1-based) with the tamper marker and
/// recomputes that block's stored hash.
///
/// The successor's `prev_hash` is left untouched, so the tamper shows up as a
/// linkage break when the chain is validated. Valid indices are `1..=len`:
/// `len` addresses the tip, which has no successor, so corrupting it goes
/// undetected. `0` or anything above `len` is rejected and nothing changes.
pub fn corrupt(chain: &mut Blockchain, index: u64) -> Result<()> {
    let block = chain.block_mut(index).map_err(|e| {
        warn!(index, error = %e, "corrupt rejected");
        e
    })?;
    block.overwrite_entries_and_rehash(vec![LedgerEntry::tamper_marker()]);
    info!(index, hash = %block.hash(), "block corrupted");
    Ok(())
}
