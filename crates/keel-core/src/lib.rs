//! # keel-core — Foundational Types for the Keel Protection Stack
//!
//! This crate is the bedrock of the Keel protection-information stack. It
//! defines the types shared between the checksum engines and the storage
//! I/O layer that feeds them. Every other crate in the workspace depends
//! on `keel-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Identity as a typed triple.** A [`Seed`] is `{container, key,
//!    unit_offset}` — three `u64`s with a deterministic fixed-width
//!    encoding. No bare byte strings for identity binding.
//!
//! 2. **Borrowed, read-only buffer vectors.** [`BufferVec`] holds `&[u8]`
//!    segments owned by the caller. The checksum engines never copy or
//!    mutate payload data.
//!
//! 3. **Structured errors.** [`CksumError`] variants carry the diagnostic
//!    fields (segment count, algorithm tag) needed to locate a failing
//!    unit without re-running the computation.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `keel-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Plain-data public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod bufvec;
pub mod error;
pub mod seed;

// Re-export primary types for ergonomic imports.
pub use bufvec::BufferVec;
pub use error::CksumError;
pub use seed::{Seed, SEED_ENCODED_LEN};
