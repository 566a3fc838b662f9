//! # Checksum Engines and Dispatch
//!
//! Two engines compute protection digests over a caller-supplied buffer
//! vector:
//!
//! - [`compute_md5`] — single shot, no state survives the call.
//! - [`compute_md5_inc_context`] — the chain-advance primitive. Each
//!   call clones the record's stored previous context, folds this unit's
//!   data into the clone, and hands the advanced state back through
//!   `curr_context`. The caller persists that value as the next unit's
//!   previous context; this module never stores it across calls, so
//!   ownership of chain state is explicit and external.
//!
//! [`compute_pi`] routes a [`ProtectionInfo`] record to the matching
//! engine by exhaustive match over its variant.
//!
//! ## Aliasing Rules
//!
//! The stored previous context inside the record is only ever read —
//! data folding happens on clones. The one exception is a `unit_zero`
//! call, which replaces it wholesale with a fresh state. This keeps the
//! canonical chain state forkable: a unit can be verified in isolation
//! without disturbing the chain.

use serde::{Deserialize, Serialize};

use keel_core::{BufferVec, CksumError, Seed};

use crate::context::{HashContext, MD5_DIGEST_SIZE};
use crate::pi::{Md5IncContextPi, Md5Pi, ProtectionInfo};

/// Per-call engine behavior switches.
///
/// Two independent booleans rather than a bit-mask: starting a chain and
/// suppressing finalization are unrelated concerns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcFlags {
    /// This is the first unit of a chain: (re)initialize the context
    /// from scratch instead of reusing a carried-in one.
    pub unit_zero: bool,
    /// Advance internal state but leave the record's digest untouched.
    /// Used when only context propagation, not a value, is needed.
    pub skip_finalize: bool,
}

impl CalcFlags {
    /// No flags set: continue the chain and finalize as usual.
    pub fn none() -> Self {
        Self::default()
    }

    /// First unit of a chain.
    pub fn unit_zero() -> Self {
        Self {
            unit_zero: true,
            ..Self::default()
        }
    }

    /// Advance state without producing a digest this call.
    pub fn skip_finalize() -> Self {
        Self {
            skip_finalize: true,
            ..Self::default()
        }
    }
}

/// Compute a single-shot protection digest into `pi`.
///
/// Folds every buffer segment in order, then the encoded seed if one is
/// present, and finalizes into the record's digest unless
/// `skip_finalize` is set. The simple variant carries no cross-call
/// state, so every call starts from a fresh context; `unit_zero` is
/// accepted for interface symmetry with the chained engine.
pub fn compute_md5(
    pi: &mut Md5Pi,
    seed: Option<&Seed>,
    bufvec: &BufferVec<'_>,
    flags: CalcFlags,
) -> Result<(), CksumError> {
    pi.refresh();

    let mut context = HashContext::fresh();
    for segment in bufvec.segments() {
        context.fold(segment);
    }
    if let Some(seed) = seed {
        context.fold(&seed.encode());
    }
    if !flags.skip_finalize {
        pi.digest = context.finish();
    }
    Ok(())
}

/// Advance an incremental chain by one unit.
///
/// The record's stored previous context is the chain state as of the end
/// of unit N-1. This call:
///
/// 1. On `unit_zero`, replaces the stored previous context with a fresh
///    state, discarding any prior chain.
/// 2. Clones the stored previous context into `curr_context` — the
///    stored value itself is never advanced by data folding.
/// 3. Folds every buffer segment, in order, into `curr_context`. The
///    result is the chain state including this unit's data and excluding
///    any seed; it becomes the next unit's previous context.
/// 4. If `unseeded_digest` is supplied, snapshots `curr_context` into it
///    without disturbing the context (finalization is destructive to the
///    primitive, so the snapshot runs on a disposable clone).
/// 5. Takes a disposable clone of `curr_context`, folds in the encoded
///    seed if one is present, and finalizes it into the record's digest
///    unless `skip_finalize` is set. That is the chained, identity-bound
///    protection value.
///
/// Persisting `curr_context` for the next call is the caller's job.
pub fn compute_md5_inc_context(
    pi: &mut Md5IncContextPi,
    seed: Option<&Seed>,
    bufvec: &BufferVec<'_>,
    flags: CalcFlags,
    curr_context: &mut HashContext,
    unseeded_digest: Option<&mut [u8; MD5_DIGEST_SIZE]>,
) -> Result<(), CksumError> {
    pi.refresh();

    if flags.unit_zero {
        pi.prev_context = HashContext::fresh();
    }

    *curr_context = pi.prev_context.clone();
    for segment in bufvec.segments() {
        curr_context.fold(segment);
    }

    if let Some(out) = unseeded_digest {
        *out = curr_context.finish();
    }

    let mut seeded = curr_context.clone();
    if let Some(seed) = seed {
        seeded.fold(&seed.encode());
    }
    if !flags.skip_finalize {
        pi.digest = seeded.finish();
    }
    Ok(())
}

/// Compute a protection digest, dispatching on the record's variant.
///
/// The chained variant requires `curr_context`; passing `None` for it is
/// a contract violation reported as [`CksumError::MissingContext`]. The
/// simple variant ignores both optional outputs.
pub fn compute_pi(
    pi: &mut ProtectionInfo,
    seed: Option<&Seed>,
    bufvec: &BufferVec<'_>,
    flags: CalcFlags,
    curr_context: Option<&mut HashContext>,
    unseeded_digest: Option<&mut [u8; MD5_DIGEST_SIZE]>,
) -> Result<(), CksumError> {
    match pi {
        ProtectionInfo::Md5(record) => compute_md5(record, seed, bufvec, flags),
        ProtectionInfo::Md5IncContext(record) => {
            let curr = curr_context.ok_or(CksumError::MissingContext {
                segments: bufvec.segment_count(),
            })?;
            compute_md5_inc_context(record, seed, bufvec, flags, curr, unseeded_digest)
        }
    }
}
