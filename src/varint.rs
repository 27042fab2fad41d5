//! Base-128 variable-length unsigned integers.
//!
//! Values are split into 7-bit groups, least significant first; the high bit
//! of each encoded byte is a continuation flag. An encoded varint is at most
//! [`MAX_BYTES`] bytes long (35 payload bits), which bounds pathological
//! inputs and catches corrupted streams early.

use crate::errors::Error;
use smallvec::{smallvec, SmallVec};

/// Upper bound on the encoded length of a varint.
pub const MAX_BYTES: usize = 5;

const CONTINUATION: u8 = 0b1000_0000;
const PAYLOAD: u8 = 0b0111_1111;

/// Encodes a non-negative integer as a base-128 varint.
///
/// Total for all values below `2^35`; lengths and counts (the only things
/// this crate encodes as varints) cannot exceed that bound.
///
/// # Example
///
/// ```
/// use fastbjson::varint;
///
/// assert_eq!(varint::encode(0).as_slice(), &[0]);
/// assert_eq!(varint::encode(300).as_slice(), &[0b1010_1100, 0b0000_0010]);
/// ```
pub fn encode(mut v: u64) -> SmallVec<[u8; MAX_BYTES]> {
    debug_assert!(v < 1 << 35);

    let mut out = smallvec![];
    loop {
        let group = (v & u64::from(PAYLOAD)) as u8;
        v >>= 7;
        if v == 0 {
            out.push(group);
            return out;
        }
        out.push(group | CONTINUATION);
    }
}

/// Decodes a base-128 varint starting at `at`, returning the number of bytes
/// consumed and the value.
///
/// Fails with [`Error::VarintOverflow`] when a fifth byte still carries the
/// continuation flag, and with [`Error::UnexpectedEnd`] when the buffer ends
/// before the flag clears.
///
/// # Example
///
/// ```
/// use fastbjson::varint;
///
/// let buf = [0b1010_1100, 0b0000_0010];
/// assert_eq!(varint::decode(&buf, 0).unwrap(), (2, 300));
/// ```
pub fn decode(buf: &[u8], at: usize) -> Result<(usize, u64), Error> {
    let mut value: u64 = 0;
    let mut used: usize = 0;

    loop {
        if used == MAX_BYTES {
            return Err(Error::VarintOverflow { offset: at });
        }

        let byte = match buf.get(at + used) {
            Some(b) => *b,
            None => return Err(Error::UnexpectedEnd { wanted: 1, have: 0 }),
        };

        value |= u64::from(byte & PAYLOAD) << (7 * used as u32);
        used += 1;

        if byte & CONTINUATION == 0 {
            return Ok((used, value));
        }
    }
}
