//! # Protection Information Records
//!
//! A protection-information (PI) record binds a digest value to a data
//! unit or key-value pair. Records are tagged by algorithm variant:
//!
//! - [`Md5Pi`] — a single seeded digest, no cross-call state.
//! - [`Md5IncContextPi`] — a digest plus the carried hash context that
//!   chains one unit's computation into the next.
//!
//! [`ProtectionInfo`] is the sum over all variants; dispatch is an
//! exhaustive `match`, so adding an algorithm is a compile-checked
//! extension rather than a runtime tag switch.
//!
//! ## Size Invariant
//!
//! Every record header declares the exact encoded size of its concrete
//! variant, stored in round-off units. The field is recomputed by every
//! constructor and every engine call — never cached stale. Allocation
//! code sizes PI buffers from [`size_of_pi`] and [`max_pi_size`] before
//! calling into the engines.

use serde::{Deserialize, Serialize};

use keel_core::CksumError;

use crate::context::{HashContext, HASH_CONTEXT_WIRE_SIZE, MD5_DIGEST_SIZE};

/// Granularity of the header size field, in bytes.
pub const PI_ROUNDOFF_BYTES: u32 = 4;

/// Encoded header footprint: one tag byte plus one size byte.
pub const PI_HEADER_SIZE: u32 = 2;

/// Trailing pad of the simple record, zero-filled before use.
const MD5_PI_PAD: usize = 2;

/// Trailing pad of the incremental-context record, zero-filled before use.
const MD5_INC_CONTEXT_PI_PAD: usize = 2;

/// Exact encoded size of an [`Md5Pi`]: header + digest + pad.
pub const MD5_PI_SIZE: u32 =
    PI_HEADER_SIZE + MD5_DIGEST_SIZE as u32 + MD5_PI_PAD as u32;

/// Exact encoded size of an [`Md5IncContextPi`]: header + carried
/// context + digest + pad.
pub const MD5_INC_CONTEXT_PI_SIZE: u32 = PI_HEADER_SIZE
    + HASH_CONTEXT_WIRE_SIZE as u32
    + MD5_DIGEST_SIZE as u32
    + MD5_INC_CONTEXT_PI_PAD as u32;

/// The algorithm variant a PI record is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PiType {
    /// Single-shot MD5 digest, no cross-call state.
    Md5 = 1,
    /// MD5 digest chained through a carried hash context.
    Md5IncContext = 2,
}

impl PiType {
    /// The on-wire tag byte for this variant.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Resolve a raw header tag byte to a known variant.
    ///
    /// Unknown tags are rejected explicitly; an unimplemented algorithm
    /// must never verify as a silent no-op.
    pub fn from_tag(tag: u8) -> Result<Self, CksumError> {
        match tag {
            1 => Ok(Self::Md5),
            2 => Ok(Self::Md5IncContext),
            _ => Err(CksumError::UnsupportedAlgorithm { tag }),
        }
    }

    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Md5IncContext => "md5-inc-context",
        }
    }
}

impl std::fmt::Display for PiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact encoded size of a PI record of the given variant, in bytes.
pub fn size_of_pi(ty: PiType) -> u32 {
    match ty {
        PiType::Md5 => MD5_PI_SIZE,
        PiType::Md5IncContext => MD5_INC_CONTEXT_PI_SIZE,
    }
}

/// Maximum encoded size across all known variants, in bytes.
pub fn max_pi_size() -> u32 {
    MD5_PI_SIZE.max(MD5_INC_CONTEXT_PI_SIZE)
}

/// Common record header: algorithm tag plus declared size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiHeader {
    /// Algorithm variant of the record this header fronts.
    pub tag: PiType,
    /// Declared record size in [`PI_ROUNDOFF_BYTES`] units.
    pub size_units: u8,
}

impl PiHeader {
    fn recomputed(tag: PiType) -> Self {
        Self {
            tag,
            size_units: (size_of_pi(tag) / PI_ROUNDOFF_BYTES) as u8,
        }
    }
}

/// Single-shot protection record: one seeded digest, no carried state.
#[derive(Debug, Clone)]
pub struct Md5Pi {
    /// Record header; size recomputed on every construction.
    pub header: PiHeader,
    /// The seeded digest value.
    pub digest: [u8; MD5_DIGEST_SIZE],
    /// Trailing pad, always zero-filled.
    pub pad: [u8; MD5_PI_PAD],
}

impl Md5Pi {
    /// Create a fresh record with a zeroed digest and pad.
    pub fn new() -> Self {
        Self {
            header: PiHeader::recomputed(PiType::Md5),
            digest: [0u8; MD5_DIGEST_SIZE],
            pad: [0u8; MD5_PI_PAD],
        }
    }

    /// Re-establish the header size and zero the pad.
    ///
    /// Engine calls run this before touching the digest, so the declared
    /// size can never go stale and pad bytes are zero before use.
    pub(crate) fn refresh(&mut self) {
        self.header = PiHeader::recomputed(PiType::Md5);
        self.pad = [0u8; MD5_PI_PAD];
    }
}

impl Default for Md5Pi {
    fn default() -> Self {
        Self::new()
    }
}

/// Incremental protection record: a seeded digest plus the carried
/// context that chains this unit's computation into the next.
#[derive(Debug, Clone)]
pub struct Md5IncContextPi {
    /// Record header; size recomputed on every construction.
    pub header: PiHeader,
    /// Hash state as of the end of the *previous* unit. Engine calls
    /// only read it; it is replaced wholesale on a `unit_zero` re-chain
    /// or by the caller copying an advanced context back in.
    pub prev_context: HashContext,
    /// The seeded, chained digest value.
    pub digest: [u8; MD5_DIGEST_SIZE],
    /// Trailing pad, always zero-filled.
    pub pad: [u8; MD5_INC_CONTEXT_PI_PAD],
}

impl Md5IncContextPi {
    /// Create a fresh record: zeroed digest and pad, fresh context.
    pub fn new() -> Self {
        Self {
            header: PiHeader::recomputed(PiType::Md5IncContext),
            prev_context: HashContext::fresh(),
            digest: [0u8; MD5_DIGEST_SIZE],
            pad: [0u8; MD5_INC_CONTEXT_PI_PAD],
        }
    }

    /// Re-establish the header size and zero the pad.
    pub(crate) fn refresh(&mut self) {
        self.header = PiHeader::recomputed(PiType::Md5IncContext);
        self.pad = [0u8; MD5_INC_CONTEXT_PI_PAD];
    }
}

impl Default for Md5IncContextPi {
    fn default() -> Self {
        Self::new()
    }
}

/// A protection-information record of any known algorithm variant.
#[derive(Debug, Clone)]
pub enum ProtectionInfo {
    /// Single-shot MD5 record.
    Md5(Md5Pi),
    /// Context-chained MD5 record.
    Md5IncContext(Md5IncContextPi),
}

impl ProtectionInfo {
    /// The algorithm variant of this record.
    pub fn pi_type(&self) -> PiType {
        match self {
            Self::Md5(_) => PiType::Md5,
            Self::Md5IncContext(_) => PiType::Md5IncContext,
        }
    }

    /// The digest value carried by this record.
    pub fn digest(&self) -> &[u8; MD5_DIGEST_SIZE] {
        match self {
            Self::Md5(pi) => &pi.digest,
            Self::Md5IncContext(pi) => &pi.digest,
        }
    }

    /// Exact encoded size of this record, in bytes.
    pub fn encoded_size(&self) -> u32 {
        size_of_pi(self.pi_type())
    }
}
