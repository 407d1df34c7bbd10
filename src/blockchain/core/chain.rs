use crate::error::{ChainError, Result};
use crate::miner;
use crate::transaction::LedgerEntry;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

pub const GENESIS_PROOF: u64 = 1;
pub const GENESIS_PREV_HASH: &str = "0";

/// Hashed view of a block: every field except the stored hash itself.
#[derive(Serialize)]
struct CanonicalBlock<'a> {
    index: u64,
    prev_hash: &'a str,
    proof: u64,
    timestamp: &'a str,
    transactions: &'a [LedgerEntry],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: String,
    proof: u64,
    prev_hash: String,
    transactions: Vec<LedgerEntry>,
    hash: String,
}

impl Block {
    /// Builds a block stamped with the current local time, no entries, and its
    /// hash computed from that initial content.
    pub fn new(index: u64, proof: u64, prev_hash: impl Into<String>) -> Self {
        let timestamp = chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S%.6f")
            .to_string();

        let mut block = Block {
            index,
            timestamp,
            proof,
            prev_hash: prev_hash.into(),
            transactions: Vec::new(),
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn proof(&self) -> u64 {
        self.proof
    }

    pub fn prev_hash(&self) -> &str {
        &self.prev_hash
    }

    pub fn transactions(&self) -> &[LedgerEntry] {
        &self.transactions
    }

    /// Entries can be edited in place. The stored hash is left as it was.
    pub fn transactions_mut(&mut self) -> &mut Vec<LedgerEntry> {
        &mut self.transactions
    }

    /// The hash recorded when the block was created (or last corrupted).
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Canonical hash of the block's current content.
    ///
    /// Lowercase hex SHA-256 over compact JSON of `index`, `prev_hash`, `proof`,
    /// `timestamp` and `transactions`, with object keys sorted at every level.
    pub fn compute_hash(&self) -> String {
        hex::encode(Sha256::digest(self.canonical_json()))
    }

    fn canonical_json(&self) -> Vec<u8> {
        let canonical = CanonicalBlock {
            index: self.index,
            prev_hash: &self.prev_hash,
            proof: self.proof,
            timestamp: &self.timestamp,
            transactions: &self.transactions,
        };
        // `Value` objects are BTreeMaps, so the round trip sorts every key.
        // Both steps only fail on non-string map keys or a failing `Serialize`
        // impl; `CanonicalBlock` holds `u64`, `&str` and derived `LedgerEntry`.
        serde_json::to_value(&canonical)
            .and_then(|value| serde_json::to_vec(&value))
            .expect("CanonicalBlock serializes to JSON")
    }

    pub(crate) fn overwrite_entries_and_rehash(&mut self, entries: Vec<LedgerEntry>) {
        self.transactions = entries;
        self.hash = self.compute_hash();
    }
}

/// Ledger engine: the ordered, append-only sequence of blocks.
#[derive(Debug, Clone)]
pub struct Blockchain {
    blocks: Vec<Block>,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Blockchain {
    /// Create a chain holding only the genesis block.
    pub fn new() -> Self {
        let mut blockchain = Blockchain { blocks: Vec::new() };
        blockchain.create_block(GENESIS_PROOF, GENESIS_PREV_HASH);
        blockchain
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: the genesis block is created with the chain.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn latest_block(&self) -> &Block {
        self.blocks
            .last()
            .expect("chain always holds the genesis block")
    }

    pub fn latest_block_mut(&mut self) -> &mut Block {
        self.blocks
            .last_mut()
            .expect("chain always holds the genesis block")
    }

    /// Looks a block up by its 1-based `index`.
    pub fn block(&self, index: u64) -> Option<&Block> {
        let position = usize::try_from(index).ok()?.checked_sub(1)?;
        self.blocks.get(position)
    }

    pub fn block_mut(&mut self, index: u64) -> Result<&mut Block> {
        let len = self.blocks.len();
        usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|position| self.blocks.get_mut(position))
            .ok_or(ChainError::InvalidIndex { index, len })
    }

    /// Appends a block with the next index and returns it.
    pub fn create_block(&mut self, proof: u64, prev_hash: impl Into<String>) -> &Block {
        let index = self.blocks.len() as u64 + 1;
        let block = Block::new(index, proof, prev_hash);
        info!(index, proof, hash = %block.hash(), "block created");
        self.blocks.push(block);
        self.latest_block()
    }

    /// Solves the puzzle seeded by the latest block's proof and appends a block
    /// linked to the latest block's stored hash.
    pub fn mine_block(&mut self) -> &Block {
        let latest = self.latest_block();
        let prev_hash = latest.hash().to_string();
        let proof = miner::find_proof(latest.proof());
        self.create_block(proof, prev_hash)
    }

    pub fn hash(block: &Block) -> String {
        block.compute_hash()
    }

    pub fn find_proof(prev_proof: u64) -> u64 {
        miner::find_proof(prev_proof)
    }

    pub fn is_valid(&self) -> bool {
        super::validation::validate_chain(&self.blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Transaction;

    #[test]
    fn test_genesis_block() {
        let chain = Blockchain::new();
        assert_eq!(chain.len(), 1);
        assert!(!chain.is_empty());

        let genesis = chain.latest_block();
        assert_eq!(genesis.index(), 1);
        assert_eq!(genesis.proof(), GENESIS_PROOF);
        assert_eq!(genesis.prev_hash(), "0");
        assert!(genesis.transactions().is_empty());
        assert_eq!(genesis.hash(), genesis.compute_hash());
    }

    #[test]
    fn test_hash_is_64_hex_chars() {
        let block = Block::new(1, 1, "0");
        assert_eq!(block.hash().len(), 64);
        assert!(block.hash().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_is_deterministic() {
        let block = Block::new(3, 533, "abc");
        let copy = block.clone();
        assert_eq!(block.compute_hash(), block.compute_hash());
        assert_eq!(block.compute_hash(), copy.compute_hash());
        assert_eq!(Blockchain::hash(&block), block.compute_hash());
    }

    #[test]
    fn test_hash_matches_sorted_key_json() {
        let json = r#"{"hash":"","index":2,"prev_hash":"ff","proof":533,"timestamp":"2024-01-01 00:00:00.000000","transactions":[{"amount":"1","recipient":"B","sender":"A"}]}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        let expected_input = r#"{"index":2,"prev_hash":"ff","proof":533,"timestamp":"2024-01-01 00:00:00.000000","transactions":[{"amount":"1","recipient":"B","sender":"A"}]}"#;
        assert_eq!(block.canonical_json(), expected_input.as_bytes());
        assert_eq!(
            block.compute_hash(),
            hex::encode(Sha256::digest(expected_input.as_bytes()))
        );
    }

    #[test]
    fn test_hash_changes_with_content() {
        let mut block = Block::new(1, 1, "0");
        let before = block.compute_hash();
        block
            .transactions_mut()
            .push(Transaction::new("A", "B", "1").into());
        assert_ne!(block.compute_hash(), before);
        // Stored hash stays at its creation value.
        assert_eq!(block.hash(), before);
    }

    #[test]
    fn test_create_block_appends_with_next_index() {
        let mut chain = Blockchain::new();
        let genesis_hash = chain.latest_block().hash().to_string();
        let block = chain.create_block(533, genesis_hash.clone());
        assert_eq!(block.index(), 2);
        assert_eq!(block.proof(), 533);
        assert_eq!(block.prev_hash(), genesis_hash);
        assert!(block.transactions().is_empty());
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_mine_block_links_to_latest() {
        let mut chain = Blockchain::new();
        let genesis_hash = chain.latest_block().hash().to_string();
        let mined = chain.mine_block().clone();
        assert_eq!(mined.proof(), 533);
        assert_eq!(mined.prev_hash(), genesis_hash);
        assert!(chain.is_valid());
    }

    #[test]
    fn test_block_lookup_is_one_based() {
        let mut chain = Blockchain::new();
        chain.mine_block();
        assert_eq!(chain.block(1).map(Block::index), Some(1));
        assert_eq!(chain.block(2).map(Block::index), Some(2));
        assert!(chain.block(0).is_none());
        assert!(chain.block(3).is_none());
        assert_eq!(
            chain.block_mut(3).unwrap_err(),
            ChainError::InvalidIndex { index: 3, len: 2 }
        );
    }
}
