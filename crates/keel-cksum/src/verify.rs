//! # Unit Verification
//!
//! Recomputes a unit's protection digest from the record's stored
//! previous context and the supplied data, and compares it against the
//! stored digest value. Only the context-chained variant carries enough
//! state to recompute a unit in isolation.
//!
//! ## Fail-Closed Contract
//!
//! Any inability to verify — wrong record variant, computation error —
//! reports as verification failure, never as "unknown". A mismatch is a
//! data-integrity event, not an error: the caller owns the escalation
//! policy (retry, read another replica, alert).
//!
//! The digest comparison is constant-time: this check guards integrity
//! in adversarial placement scenarios, not just bit rot.

use subtle::ConstantTimeEq;

use keel_core::{BufferVec, Seed};

use crate::context::HashContext;
use crate::engine::{compute_md5_inc_context, CalcFlags};
use crate::pi::{Md5IncContextPi, ProtectionInfo};

/// Verify one data unit against its protection record.
///
/// Re-derives the seeded digest from the record's stored previous
/// context and the supplied buffer vector, using disposable scratch
/// state throughout — the record under verification is never mutated.
/// Returns `true` only on an exact digest match.
pub fn verify_unit(pi: &ProtectionInfo, seed: Option<&Seed>, bufvec: &BufferVec<'_>) -> bool {
    match pi {
        ProtectionInfo::Md5(_) => {
            // The simple variant has no carried context to replay from.
            tracing::error!(
                "cannot verify a single-shot protection record in isolation"
            );
            false
        }
        ProtectionInfo::Md5IncContext(stored) => {
            let mut scratch = Md5IncContextPi::new();
            scratch.prev_context = stored.prev_context.clone();

            let mut curr = HashContext::fresh();
            if compute_md5_inc_context(
                &mut scratch,
                seed,
                bufvec,
                CalcFlags::none(),
                &mut curr,
                None,
            )
            .is_err()
            {
                return false;
            }

            let matched = bool::from(stored.digest.ct_eq(&scratch.digest));
            if !matched {
                match seed {
                    Some(seed) => tracing::error!(
                        container = seed.container,
                        key = seed.key,
                        unit_offset = seed.unit_offset,
                        "protection digest mismatch"
                    ),
                    None => tracing::error!("protection digest mismatch (unseeded)"),
                }
            }
            matched
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::MD5_DIGEST_SIZE;
    use crate::pi::Md5Pi;

    fn computed_record(
        seed: Option<&Seed>,
        data: &[u8],
    ) -> (Md5IncContextPi, HashContext) {
        let mut pi = Md5IncContextPi::new();
        let mut curr = HashContext::fresh();
        compute_md5_inc_context(
            &mut pi,
            seed,
            &BufferVec::single(data),
            CalcFlags::unit_zero(),
            &mut curr,
            None,
        )
        .unwrap();
        (pi, curr)
    }

    #[test]
    fn test_roundtrip_verifies() {
        let seed = Seed::new(0x1001, 0x42, 0);
        let (pi, _) = computed_record(Some(&seed), b"unit zero data");
        let pi = ProtectionInfo::Md5IncContext(pi);
        assert!(verify_unit(
            &pi,
            Some(&seed),
            &BufferVec::single(b"unit zero data")
        ));
    }

    #[test]
    fn test_roundtrip_verifies_unseeded() {
        let (pi, _) = computed_record(None, b"kv payload");
        let pi = ProtectionInfo::Md5IncContext(pi);
        assert!(verify_unit(&pi, None, &BufferVec::single(b"kv payload")));
    }

    #[test]
    fn test_later_unit_verifies_against_carried_context() {
        let seed1 = Seed::new(0x1001, 0x42, 0);
        let (mut pi, curr) = computed_record(Some(&seed1), b"unit zero data");

        // Advance the chain to unit one.
        pi.prev_context = curr.clone();
        let seed2 = Seed::new(0x1001, 0x42, 0x1000);
        let mut curr2 = HashContext::fresh();
        compute_md5_inc_context(
            &mut pi,
            Some(&seed2),
            &BufferVec::single(b"unit one data"),
            CalcFlags::none(),
            &mut curr2,
            None,
        )
        .unwrap();

        let record = ProtectionInfo::Md5IncContext(pi);
        assert!(verify_unit(
            &record,
            Some(&seed2),
            &BufferVec::single(b"unit one data")
        ));
        // The same record does not vouch for different payloads.
        assert!(!verify_unit(
            &record,
            Some(&seed2),
            &BufferVec::single(b"unit zero data")
        ));
    }

    #[test]
    fn test_flipped_data_byte_fails() {
        let seed = Seed::new(1, 2, 3);
        let (pi, _) = computed_record(Some(&seed), b"sensitive bytes");
        let pi = ProtectionInfo::Md5IncContext(pi);

        let mut corrupted = b"sensitive bytes".to_vec();
        corrupted[7] ^= 0x01;
        assert!(!verify_unit(&pi, Some(&seed), &BufferVec::single(&corrupted)));
    }

    #[test]
    fn test_wrong_seed_fails() {
        let seed = Seed::new(1, 2, 3);
        let (pi, _) = computed_record(Some(&seed), b"misplaced unit");
        let pi = ProtectionInfo::Md5IncContext(pi);

        // Same bytes, different claimed placement.
        let misdirected = Seed::new(1, 2, 4);
        assert!(!verify_unit(
            &pi,
            Some(&misdirected),
            &BufferVec::single(b"misplaced unit")
        ));
    }

    #[test]
    fn test_flipped_digest_byte_fails() {
        let (mut pi, _) = computed_record(None, b"payload");
        pi.digest[0] ^= 0x80;
        let pi = ProtectionInfo::Md5IncContext(pi);
        assert!(!verify_unit(&pi, None, &BufferVec::single(b"payload")));
    }

    #[test]
    fn test_simple_variant_fails_closed() {
        let pi = ProtectionInfo::Md5(Md5Pi::new());
        assert!(!verify_unit(&pi, None, &BufferVec::empty()));
    }

    #[test]
    fn test_verification_does_not_disturb_the_chain() {
        let seed = Seed::new(9, 9, 0);
        let (pi, curr) = computed_record(Some(&seed), b"unit zero data");
        let prev_snapshot = pi.prev_context.finish();
        let record = ProtectionInfo::Md5IncContext(pi.clone());

        assert!(verify_unit(
            &record,
            Some(&seed),
            &BufferVec::single(b"unit zero data")
        ));

        // The stored previous context is still the clean chain state.
        if let ProtectionInfo::Md5IncContext(inner) = &record {
            assert_eq!(inner.prev_context.finish(), prev_snapshot);
        }
        // And the chain can continue from the previously emitted context.
        let mut next = pi;
        next.prev_context = curr;
        let mut curr2 = HashContext::fresh();
        let mut unseeded = [0u8; MD5_DIGEST_SIZE];
        compute_md5_inc_context(
            &mut next,
            None,
            &BufferVec::single(b"unit one data"),
            CalcFlags::none(),
            &mut curr2,
            Some(&mut unseeded),
        )
        .unwrap();

        let mut whole = HashContext::fresh();
        whole.fold(b"unit zero data");
        whole.fold(b"unit one data");
        assert_eq!(unseeded, whole.finish());
    }
}
