//! powledger - an in-memory, append-only ledger secured by proof-of-work
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Ledger Engine
//! - [`blockchain`] - Blocks, the chain, canonical hashing and chain validation
//! - [`miner`] - Proof-of-work puzzle and proof search
//!
//! ## Transaction Intake
//! - [`transaction`] - Transaction types and input checks
//! - [`intake`] - Batching transfers into blocks, rollover and tampering
//! - [`handle`] - Single-writer shared access for multi-threaded callers
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`cli`] - Interactive menu shell

#![forbid(unsafe_code)]

// ============================================================================
// Ledger Engine
// ============================================================================
pub mod blockchain;
pub mod miner;

// ============================================================================
// Transaction Intake
// ============================================================================
pub mod handle;
pub mod intake;
pub mod transaction;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod cli;
pub mod config;
pub mod error;
