//! Proof-of-work puzzle.
//!
//! A proof `p` is valid against the previous proof `q` when
//! `sha256_hex(decimal(p² − q²))` starts with [`DIFFICULTY_PREFIX`]. The
//! difficulty is fixed; there is no retargeting.

use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::debug;

/// Number of leading zero nibbles a puzzle hash must have.
pub const DIFFICULTY: usize = 4;

/// Hex prefix a puzzle hash must start with.
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Hex SHA-256 of the decimal rendering of `proof² − prev_proof²`.
///
/// The square of any `u64` fits in a `u128`. The difference is rendered as a
/// sign and a `u128` magnitude, so every pair of proofs hashes without overflow.
pub fn proof_hash(prev_proof: u64, proof: u64) -> String {
    let square = u128::from(proof) * u128::from(proof);
    let prev_square = u128::from(prev_proof) * u128::from(prev_proof);
    let operation = if square >= prev_square {
        (square - prev_square).to_string()
    } else {
        format!("-{}", prev_square - square)
    };
    hex::encode(Sha256::digest(operation.as_bytes()))
}

pub fn meets_difficulty(hash: &str) -> bool {
    hash.starts_with(DIFFICULTY_PREFIX)
}

/// Whether `proof` solves the puzzle seeded by `prev_proof`.
pub fn is_valid_proof(prev_proof: u64, proof: u64) -> bool {
    meets_difficulty(&proof_hash(prev_proof, proof))
}

/// Finds the smallest proof `>= 1` solving the puzzle seeded by `prev_proof`.
///
/// Unbounded linear search with no yield points; expected cost is about 16^4
/// hash evaluations.
pub fn find_proof(prev_proof: u64) -> u64 {
    let start_time = Instant::now();
    let mut new_proof: u64 = 1;
    while !is_valid_proof(prev_proof, new_proof) {
        new_proof += 1;
    }
    debug!(
        prev_proof,
        proof = new_proof,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "proof found"
    );
    new_proof
}

/// Same search as [`find_proof`], checking `cancel` before every attempt.
///
/// Returns `None` once `cancel` is raised. When it never is, the result equals
/// `find_proof(prev_proof)`.
pub fn find_proof_until(prev_proof: u64, cancel: &AtomicBool) -> Option<u64> {
    let mut new_proof: u64 = 1;
    loop {
        if cancel.load(Ordering::Relaxed) {
            debug!(prev_proof, attempts = new_proof - 1, "proof search cancelled");
            return None;
        }
        if is_valid_proof(prev_proof, new_proof) {
            return Some(new_proof);
        }
        new_proof += 1;
    }
}
