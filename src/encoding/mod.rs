//! The binary encoder and decoder.
//!
//! Both directions are pure functions over their input and the shared,
//! read-only [`KeyDictionary`]: no I/O, no suspension, no state carried
//! between calls. Encoding is total; decoding returns a [`Result`] and fails
//! fast on any malformed or truncated buffer.
//!
//! # Example
//!
//! ```
//! use fastbjson::prelude::*;
//!
//! let keys = KeyDictionary::parse("id\nname\n").unwrap();
//!
//! let v = Value::Object(VecMap::from(vec![
//!     (Bytes::from("id"), Value::from(7)),
//!     (Bytes::from("tags"), Value::from(vec!["a", "b"])),
//! ]));
//!
//! let bytes = encode_full(&v, &keys);
//! assert_eq!(decode(&bytes, &keys).unwrap(), v);
//! ```

use crate::{
    errors::Error,
    varint,
    vecmap::VecMap,
    wellknown::KeyDictionary,
    Value::{self, *},
};
use bytes::Bytes;

pub mod ser;
pub use ser::*;
mod de;
use de::Decoder;
mod constants;
use constants::*;

/// Encodes a value into its binary representation, appending to `out`.
pub fn encode<T: Ser>(t: &T, keys: &KeyDictionary, out: &mut Vec<u8>) { t.ser(out, keys) }

/// Encodes a value into a fresh vector of bytes.
///
/// # Example
///
/// ```
/// use fastbjson::prelude::*;
///
/// let keys = KeyDictionary::default();
/// assert_eq!(encode_full(&Value::Null, &keys), vec![3]);
/// ```
pub fn encode_full<T: Ser>(t: &T, keys: &KeyDictionary) -> Vec<u8> {
    let mut out = Vec::new();
    t.ser(&mut out, keys);
    out
}

/// Decodes one complete buffer into a [`Value`].
///
/// The buffer must hold exactly one encoded value: leftover bytes after it
/// fail with [`Error::TrailingData`], and every other malformation fails
/// with the matching [`Error`] variant.
///
/// # Example
///
/// ```
/// use fastbjson::prelude::*;
///
/// let keys = KeyDictionary::default();
/// assert_eq!(decode(&[2], &keys).unwrap(), Value::Bool(true));
/// assert!(decode(&[2, 2], &keys).is_err());
/// ```
pub fn decode(buf: &[u8], keys: &KeyDictionary) -> Result<Value, Error> {
    let (consumed, value) = Decoder::new(keys).value_at(buf, 0, 0)?;
    if consumed != buf.len() {
        return Err(Error::TrailingData { consumed, total: buf.len() });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> KeyDictionary { KeyDictionary::parse("k\nid\nname\n").unwrap() }

    fn round_trip(v: Value, keys: &KeyDictionary) {
        let enc = encode_full(&v, keys);
        assert_eq!(decode(&enc, keys).unwrap(), v);
    }

    #[test]
    fn constants() {
        let keys = dict();

        assert_eq!(encode_full(&Value::from(false), &keys), vec![1]);
        assert_eq!(encode_full(&Value::from(true), &keys), vec![2]);
        assert_eq!(encode_full(&Null, &keys), vec![3]);
    }

    #[test]
    fn compact_int_boundaries() {
        let keys = dict();

        assert_eq!(encode_full(&Value::from(0), &keys), vec![21, 0]);
        assert_eq!(encode_full(&Value::from(255), &keys), vec![21, 255]);
        assert_eq!(encode_full(&Value::from(-1), &keys), vec![22, 255]);
        assert_eq!(encode_full(&Value::from(-256), &keys), vec![22, 0]);

        // one past either compact range falls back to a double
        assert_eq!(encode_full(&Value::from(256), &keys)[0], 28);
        assert_eq!(encode_full(&Value::from(-257), &keys)[0], 28);
        assert_eq!(encode_full(&Value::from(256), &keys).len(), 9);

        for &i in &[0i64, 1, 127, 255, -1, -128, -256] {
            round_trip(Value::from(i), &keys);
        }
    }

    #[test]
    fn int_fallback_loses_intness() {
        let keys = dict();

        let enc = encode_full(&Value::from(256), &keys);
        assert_eq!(decode(&enc, &keys).unwrap(), Float(256.0));

        let enc = encode_full(&Value::from(-257), &keys);
        assert_eq!(decode(&enc, &keys).unwrap(), Float(-257.0));
    }

    #[test]
    fn doubles() {
        let keys = dict();

        let enc = encode_full(&Value::from(1.5), &keys);
        assert_eq!(enc[0], 28);
        assert_eq!(enc[1..], u64::to_le_bytes(1.5f64.to_bits())[..]);

        for &f in &[0.0, -0.0, 3.0, 1e300, f64::INFINITY, f64::NAN] {
            round_trip(Value::from(f), &keys);
        }
    }

    #[test]
    fn string_length_boundary() {
        let keys = dict();

        let s15 = Value::from("a".repeat(15));
        let enc = encode_full(&s15, &keys);
        assert_eq!(enc[0], 19);
        assert_eq!(enc.len(), 16);
        round_trip(s15, &keys);

        let s16 = Value::from("a".repeat(16));
        let enc = encode_full(&s16, &keys);
        assert_eq!(enc[0], 20);
        assert_eq!(enc[1], 0); // varint(16 - 16)
        assert_eq!(enc.len(), 18);
        round_trip(s16, &keys);

        round_trip(Value::from(""), &keys);
        round_trip(Value::from("日本語のテキスト"), &keys);
    }

    #[test]
    fn array_size_boundaries() {
        let keys = dict();

        for &n in &[0usize, 1, 15, 16, 100, 1000] {
            let v = Value::Array(vec![Null; n]);
            let enc = encode_full(&v, &keys);
            if n <= 15 {
                assert_eq!(enc[0] as usize, 30 + n);
            } else {
                assert_eq!(enc[0], 46);
                assert_eq!(varint::decode(&enc, 1).unwrap().1 as usize, n - 16);
            }
            round_trip(v, &keys);
        }
    }

    #[test]
    fn object_size_boundaries() {
        let keys = dict();

        for &n in &[0usize, 1, 15, 16, 100, 1000] {
            let pairs: Vec<(Bytes, Value)> = (0..n)
                .map(|i| (Bytes::from(format!("key{}", i)), Value::from(i as i64)))
                .collect();
            let v = Value::Object(VecMap::from(pairs));

            let enc = encode_full(&v, &keys);
            if n <= 15 {
                assert_eq!(enc[0] as usize, 50 + n);
            } else {
                assert_eq!(enc[0], 66);
                assert_eq!(varint::decode(&enc, 1).unwrap().1 as usize, n - 16);
            }
            round_trip(v, &keys);
        }
    }

    #[test]
    fn wellknown_key_is_one_byte() {
        let keys = dict();

        let v = Value::Object(VecMap::from(vec![(Bytes::from("k"), Value::from(1))]));
        assert_eq!(encode_full(&v, &keys), vec![51, 0, 21, 1]);
        round_trip(v, &keys);
    }

    #[test]
    fn non_dictionary_key_is_length_prefixed() {
        let keys = dict();

        let v = Value::Object(VecMap::from(vec![(Bytes::from("zz"), Value::from(1))]));
        assert_eq!(encode_full(&v, &keys), vec![51, 2 + 64, b'z', b'z', 21, 1]);
        round_trip(v, &keys);
    }

    #[test]
    fn dictionary_changes_the_wire_not_the_value() {
        let keys = dict();
        let empty = KeyDictionary::default();

        let v = Value::Object(VecMap::from(vec![(Bytes::from("id"), Value::from(9))]));
        let with_dict = encode_full(&v, &keys);
        let without = encode_full(&v, &empty);

        assert!(with_dict.len() < without.len());
        assert_eq!(decode(&with_dict, &keys).unwrap(), v);
        assert_eq!(decode(&without, &empty).unwrap(), v);
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let keys = dict();

        // two kv-pairs, both key "a"
        let buf = vec![52, 1 + 64, b'a', 21, 1, 1 + 64, b'a', 21, 2];
        let expect = Value::Object(VecMap::from(vec![(Bytes::from("a"), Value::from(2))]));
        assert_eq!(decode(&buf, &keys).unwrap(), expect);
    }

    #[test]
    fn trailing_data_is_rejected() {
        let keys = dict();

        assert_eq!(
            decode(&[3, 3], &keys).unwrap_err(),
            Error::TrailingData { consumed: 1, total: 2 }
        );
    }

    #[test]
    fn reserved_tags_are_rejected() {
        let keys = dict();

        for &tag in &[0u8, 23, 24, 25, 26, 27, 29, 47, 48, 49, 67, 128, 255] {
            assert_eq!(
                decode(&[tag], &keys).unwrap_err(),
                Error::UnknownTag { tag, offset: 0 }
            );
        }
    }

    #[test]
    fn truncated_buffers_are_rejected() {
        let keys = dict();

        // inline string of length 3 with only two payload bytes
        assert_eq!(
            decode(&[7, b'a', b'b'], &keys).unwrap_err(),
            Error::UnexpectedEnd { wanted: 3, have: 2 }
        );
        // int tag with no payload byte
        assert!(decode(&[21], &keys).is_err());
        // double tag with a short payload
        assert!(decode(&[28, 0, 0, 0], &keys).is_err());
        // array promising two elements but holding one
        assert!(decode(&[32, 3], &keys).is_err());
        // empty buffer
        assert!(decode(&[], &keys).is_err());
    }

    #[test]
    fn oversized_varint_is_rejected() {
        let keys = dict();

        let buf = [20, 0x80, 0x80, 0x80, 0x80, 0x80, 1];
        assert_eq!(
            decode(&buf, &keys).unwrap_err(),
            Error::VarintOverflow { offset: 1 }
        );
    }

    #[test]
    fn bad_keys_are_rejected() {
        let keys = dict();

        // index 9 with a three-entry dictionary
        assert_eq!(
            decode(&[51, 9, 21, 1], &keys).unwrap_err(),
            Error::InvalidKeyEncoding { offset: 1 }
        );
        // varint key length below 64
        assert_eq!(
            decode(&[51, 0x80, 0x00, 21, 1], &keys).unwrap_err(),
            Error::InvalidKeyEncoding { offset: 1 }
        );
    }

    #[test]
    fn nesting_guard_trips() {
        let keys = dict();

        // 200 single-element arrays around a null
        let mut buf = vec![31u8; 200];
        buf.push(3);
        assert_eq!(
            decode(&buf, &keys).unwrap_err(),
            Error::NestingTooDeep { limit: 128 }
        );

        // 100 levels is fine
        let mut buf = vec![31u8; 100];
        buf.push(3);
        assert!(decode(&buf, &keys).is_ok());
    }

    #[test]
    fn deep_but_legal_nesting_round_trips() {
        let keys = dict();

        let mut v = Value::from(1);
        for _ in 0..100 {
            v = Value::Array(vec![v]);
        }
        round_trip(v, &keys);
    }
}
