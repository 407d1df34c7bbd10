use crate::blockchain::core::chain::Block;
use crate::error::{ChainError, Result};
use crate::miner::is_valid_proof;
use tracing::warn;

/// Checks every consecutive pair of blocks and reports the first broken link.
///
/// The genesis block is trusted as is. For each later block the recorded
/// `prev_hash` must equal the predecessor's *stored* hash, and its proof must
/// solve the puzzle against the predecessor's proof. A block's stored hash is
/// never compared with a recompute of its live content, so entries edited in
/// place without a rehash go unnoticed; `corrupt` rehashes the block and is
/// caught through the successor's stale `prev_hash` instead.
pub fn verify_chain(chain: &[Block]) -> Result<()> {
    for pair in chain.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);

        if curr.prev_hash() != prev.hash() {
            return Err(ChainError::InvalidBlockLinkage {
                index: curr.index(),
            });
        }

        if !is_valid_proof(prev.proof(), curr.proof()) {
            return Err(ChainError::InvalidProofOfWork {
                index: curr.index(),
            });
        }
    }
    Ok(())
}

/// `true` when [`verify_chain`] finds no broken link.
pub fn validate_chain(chain: &[Block]) -> bool {
    match verify_chain(chain) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "chain validation failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Blockchain;

    fn two_block_chain() -> Vec<Block> {
        let mut chain = Blockchain::new();
        chain.mine_block();
        chain.blocks().to_vec()
    }

    #[test]
    fn test_genesis_only_chain_is_valid() {
        let chain = Blockchain::new();
        assert!(validate_chain(chain.blocks()));
        assert!(validate_chain(&[]));
    }

    #[test]
    fn test_mined_chain_is_valid() {
        let blocks = two_block_chain();
        assert_eq!(verify_chain(&blocks), Ok(()));
    }

    #[test]
    fn test_wrong_prev_hash_is_linkage_error() {
        let mut blocks = two_block_chain();
        blocks[1] = Block::new(2, 533, "not-the-genesis-hash");
        assert_eq!(
            verify_chain(&blocks),
            Err(ChainError::InvalidBlockLinkage { index: 2 })
        );
        assert!(!validate_chain(&blocks));
    }

    #[test]
    fn test_bad_proof_is_proof_of_work_error() {
        let mut blocks = two_block_chain();
        let genesis_hash = blocks[0].hash().to_string();
        blocks[1] = Block::new(2, 2, genesis_hash);
        assert_eq!(
            verify_chain(&blocks),
            Err(ChainError::InvalidProofOfWork { index: 2 })
        );
    }

    #[test]
    fn test_max_proof_is_rejected_not_overflowed() {
        let mut chain = Blockchain::new();
        let genesis_hash = chain.latest_block().hash().to_string();
        chain.create_block(u64::MAX, genesis_hash);

        assert_eq!(
            verify_chain(chain.blocks()),
            Err(ChainError::InvalidProofOfWork { index: 2 })
        );
        assert!(!validate_chain(chain.blocks()));
        assert!(!chain.is_valid());
    }

    #[test]
    fn test_linkage_checked_before_proof() {
        let mut blocks = two_block_chain();
        blocks[1] = Block::new(2, 2, "bogus");
        assert_eq!(
            verify_chain(&blocks),
            Err(ChainError::InvalidBlockLinkage { index: 2 })
        );
    }
}
