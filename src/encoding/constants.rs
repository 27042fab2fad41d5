/// `false` constant.
pub(crate) const CON_FALSE: u8 = 1;
/// `true` constant.
pub(crate) const CON_TRUE: u8 = 2;
/// `null` constant.
pub(crate) const CON_NULL: u8 = 3;

/// First inline-length string tag; tags 4..=19 carry lengths 0..=15.
pub(crate) const STR_BASE: u8 = 4;
/// Varint-length string tag, for byte lengths of 16 and up.
pub(crate) const STR_BIG: u8 = 20;

/// Integer in `[0, 256)`; one payload byte.
pub(crate) const INT_POS: u8 = 21;
/// Integer in `[-256, 0)`; one payload byte holding `value + 256`.
pub(crate) const INT_NEG: u8 = 22;
/// Fallback double; eight IEEE-754 little-endian payload bytes.
pub(crate) const DOUBLE: u8 = 28;

/// First inline-length array tag; tags 30..=45 carry lengths 0..=15.
pub(crate) const ARR_BASE: u8 = 30;
/// Varint-length array tag, for 16 elements and up.
pub(crate) const ARR_BIG: u8 = 46;

/// First inline-count object tag; tags 50..=65 carry counts 0..=15.
pub(crate) const MAP_BASE: u8 = 50;
/// Varint-count object tag, for 16 pairs and up.
pub(crate) const MAP_BIG: u8 = 66;

/// Largest length or count that fits inline in a tag byte.
pub(crate) const INLINE_MAX: usize = 15;
/// Subtracted from a length or count before it goes into a varint.
pub(crate) const BIG_OFFSET: u64 = 16;

/// Object keys below this byte are dictionary indices.
pub(crate) const KEY_INDEX_LIMIT: u8 = 64;
/// Added to a non-dictionary key's byte length before varint encoding.
pub(crate) const KEY_LEN_OFFSET: u64 = 64;

/// Decoder recursion guard.
pub(crate) const MAX_DEPTH: usize = 128;
