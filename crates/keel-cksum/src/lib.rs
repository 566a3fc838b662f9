//! # keel-cksum — Protection-Information Checksum Engines
//!
//! Computes and verifies per-data-unit integrity digests for the Keel
//! object store. Each stored data unit (and, separately, each key-value
//! pair) is protected by an MD5 digest that can be seeded with the
//! unit's logical identity, so identical bytes at different placements
//! still produce different protection values.
//!
//! The heart of the crate is the incremental, context-chained protocol:
//! units of one object are hashed as a chain, each call deriving its
//! state from the previous unit's un-finalized context. A single call
//! can emit both the running seeded digest and an unseeded per-unit
//! digest, without re-hashing earlier units.
//!
//! - [`compute_md5`] / [`compute_md5_inc_context`] — the engines.
//! - [`compute_pi`] — dispatch over the [`ProtectionInfo`] variant.
//! - [`verify_unit`] — fail-closed recomputation and constant-time
//!   comparison.
//! - [`size_of_pi`] / [`max_pi_size`] — record sizing for allocation
//!   code.
//!
//! ## Crate Policy
//!
//! - All operations are synchronous, CPU-only, and free of shared
//!   mutable state; concurrent chains for *different* objects need no
//!   coordination, while one object's chain is inherently sequential
//!   and must be serialized by the caller.
//! - No mocking of digest computation in tests — all tests run the real
//!   MD5 primitive.
//! - No `unsafe` code; no `panic!()` or `.unwrap()` outside tests.

pub mod context;
pub mod engine;
pub mod pi;
pub mod verify;

// Re-export primary types for ergonomic imports.
pub use context::{HashContext, HASH_CONTEXT_WIRE_SIZE, MD5_DIGEST_SIZE};
pub use engine::{compute_md5, compute_md5_inc_context, compute_pi, CalcFlags};
pub use pi::{
    max_pi_size, size_of_pi, Md5IncContextPi, Md5Pi, PiHeader, PiType, ProtectionInfo,
    MD5_INC_CONTEXT_PI_SIZE, MD5_PI_SIZE,
};
pub use verify::verify_unit;
