//! # Hash Context — Opaque Chainable Digest State
//!
//! A [`HashContext`] is the un-finalized accumulator of the digest
//! primitive: not a digest value, but the intermediate state that one
//! unit's computation hands to the next. The type is deliberately opaque
//! — callers can clone it, fold bytes into it, and take a digest snapshot,
//! but never observe its internal layout.
//!
//! ## Copy Discipline
//!
//! Finalizing a digest destroys the primitive's internal state, so
//! [`HashContext::finish`] always finalizes a clone and leaves `self`
//! untouched. This is what lets a chain emit a per-unit digest while the
//! running context keeps advancing.

use md5::{Digest, Md5};

/// Digest length of the wired-in algorithm, in bytes.
pub const MD5_DIGEST_SIZE: usize = 16;

/// Declared wire footprint of a carried hash context, in bytes.
///
/// Matches the canonical MD5 state layout: 4 x u32 chaining values,
/// 2 x u32 message length, a 64-byte block buffer and a u32 fill count.
/// Used for size accounting only; the in-memory state never leaves the
/// [`HashContext`] wrapper.
pub const HASH_CONTEXT_WIRE_SIZE: usize = 92;

/// Opaque, fixed-size internal state of the digest primitive.
#[derive(Clone, Default)]
pub struct HashContext(Md5);

impl HashContext {
    /// Create a fresh context: the state every chain starts from.
    pub fn fresh() -> Self {
        Self(Md5::new())
    }

    /// Fold bytes into the accumulator, advancing the state in place.
    pub fn fold(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    /// Take a digest snapshot of the current state.
    ///
    /// Finalization runs on an internal clone; `self` remains usable for
    /// further folding afterwards.
    pub fn finish(&self) -> [u8; MD5_DIGEST_SIZE] {
        let digest = self.0.clone().finalize();
        let mut out = [0u8; MD5_DIGEST_SIZE];
        out.copy_from_slice(&digest);
        out
    }
}

impl std::fmt::Debug for HashContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The internal state is opaque by contract.
        f.write_str("HashContext(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_empty_digest() {
        // RFC 1321 test suite: MD5("") = d41d8cd98f00b204e9800998ecf8427e
        let ctx = HashContext::fresh();
        assert_eq!(
            ctx.finish().to_vec(),
            hex::decode("d41d8cd98f00b204e9800998ecf8427e").unwrap()
        );
    }

    #[test]
    fn test_fold_matches_rfc1321_vectors() {
        // RFC 1321 test suite: MD5("abc") = 900150983cd24fb0d6963f7d28e17f72
        let mut ctx = HashContext::fresh();
        ctx.fold(b"abc");
        assert_eq!(
            ctx.finish().to_vec(),
            hex::decode("900150983cd24fb0d6963f7d28e17f72").unwrap()
        );

        // MD5("message digest") = f96b697d7cb7938d525a2f31aaf161d0
        let mut ctx = HashContext::fresh();
        ctx.fold(b"message digest");
        assert_eq!(
            ctx.finish().to_vec(),
            hex::decode("f96b697d7cb7938d525a2f31aaf161d0").unwrap()
        );
    }

    #[test]
    fn test_finish_is_non_destructive() {
        let mut ctx = HashContext::fresh();
        ctx.fold(b"ab");
        let first = ctx.finish();
        // A second snapshot of the same state must agree, and the state
        // must still accept further folds.
        assert_eq!(ctx.finish(), first);
        ctx.fold(b"c");

        let mut whole = HashContext::fresh();
        whole.fold(b"abc");
        assert_eq!(ctx.finish(), whole.finish());
    }

    #[test]
    fn test_clone_forks_the_state() {
        let mut ctx = HashContext::fresh();
        ctx.fold(b"shared prefix|");
        let mut fork = ctx.clone();
        ctx.fold(b"left");
        fork.fold(b"right");
        assert_ne!(ctx.finish(), fork.finish());
    }

    #[test]
    fn test_split_folds_match_single_fold() {
        let mut split = HashContext::fresh();
        split.fold(b"hello ");
        split.fold(b"world");
        let mut whole = HashContext::fresh();
        whole.fold(b"hello world");
        assert_eq!(split.finish(), whole.finish());
    }
}
