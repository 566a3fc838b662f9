//! # Buffer Vector — Scattered Read-Only Payload
//!
//! A [`BufferVec`] is the ordered sequence of byte segments the storage
//! I/O layer hands to a checksum engine. The segments stay owned by the
//! caller for the duration of the call; the engines only ever read them.
//! An empty vector (zero segments) is valid and means "no data to hash
//! this call" — used when only a seed or a carried context must be
//! folded in.

/// An ordered sequence of borrowed byte segments.
#[derive(Debug, Clone, Default)]
pub struct BufferVec<'a> {
    segments: Vec<&'a [u8]>,
}

impl<'a> BufferVec<'a> {
    /// Create a buffer vector from ordered segments.
    pub fn new(segments: Vec<&'a [u8]>) -> Self {
        Self { segments }
    }

    /// Create an empty buffer vector (zero segments).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a buffer vector holding a single segment.
    pub fn single(segment: &'a [u8]) -> Self {
        Self {
            segments: vec![segment],
        }
    }

    /// Iterate the segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.segments.iter().copied()
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total payload length across all segments, in bytes.
    pub fn total_len(&self) -> usize {
        self.segments.iter().map(|s| s.len()).sum()
    }

    /// Returns `true` if the vector holds no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<'a> From<&'a [u8]> for BufferVec<'a> {
    fn from(segment: &'a [u8]) -> Self {
        Self::single(segment)
    }
}

impl<'a> FromIterator<&'a [u8]> for BufferVec<'a> {
    fn from_iter<I: IntoIterator<Item = &'a [u8]>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
