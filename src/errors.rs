//! The error taxonomy for encoding, decoding, and dictionary construction.
//!
//! Every failure is local to the call that produced it: there are no retries
//! and no partial results. Decoding a malformed buffer always fails before
//! any out-of-bounds read can happen.

use failure::Fail;

#[derive(Clone, Debug, PartialEq, Eq, Fail)]
/// Everything that can go wrong in this crate.
pub enum Error {
    /// A value was not of the variant a conversion expected.
    ///
    /// This is the boundary error: host types are mapped in and out of
    /// [`Value`](crate::Value) before they ever reach the codec, and this is
    /// how that mapping reports a mismatch.
    #[fail(display = "expected `{}`, found `{}`", expected, found)]
    UnsupportedType {
        /// The variant the conversion wanted.
        expected: &'static str,
        /// The variant it got.
        found: &'static str,
    },

    /// The decoder hit a lead byte with no assigned meaning.
    #[fail(display = "unknown tag byte {} at offset {}", tag, offset)]
    UnknownTag {
        /// The offending byte.
        tag: u8,
        /// Where it was found.
        offset: usize,
    },

    /// The top-level value ended before the buffer did.
    #[fail(
        display = "trailing data after offset {} in a buffer of {} bytes",
        consumed, total
    )]
    TrailingData {
        /// Bytes consumed by the top-level value.
        consumed: usize,
        /// Total buffer length.
        total: usize,
    },

    /// The buffer ended in the middle of a value.
    #[fail(display = "tried to read {} bytes but only {} remained", wanted, have)]
    UnexpectedEnd {
        /// Bytes the decoder needed.
        wanted: usize,
        /// Bytes that were left.
        have: usize,
    },

    /// A varint ran past its 5-byte bound.
    #[fail(display = "varint at offset {} exceeds 5 bytes", offset)]
    VarintOverflow {
        /// Offset of the varint's first byte.
        offset: usize,
    },

    /// An object key was neither a valid dictionary index nor a valid
    /// length-prefixed string.
    #[fail(display = "malformed object key at offset {}", offset)]
    InvalidKeyEncoding {
        /// Offset of the key's first byte.
        offset: usize,
    },

    /// Input nesting exceeded the decoder's recursion guard.
    #[fail(display = "nesting deeper than {} levels", limit)]
    NestingTooDeep {
        /// The configured depth limit.
        limit: usize,
    },

    /// A dictionary source supplied 64 or more keys, colliding with the
    /// reserved index range.
    #[fail(display = "dictionary has {} keys, the limit is 63", count)]
    DictionaryTooLarge {
        /// Number of keys in the source.
        count: usize,
    },

    /// A dictionary source listed the same key twice.
    #[fail(display = "duplicate dictionary key `{}`", key)]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
}
