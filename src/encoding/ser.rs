use super::*;

/// An output sink for encoded bytes.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self }
}

/// Convenience methods for [`Serializer`], one per wire shape.
///
/// None of these can fail: every [`Value`] has exactly one encoding.
pub trait SerializerExt: Serializer {
    /// Add a `null`.
    fn put_null(&mut self);
    /// Add a boolean.
    fn put_bool(&mut self, b: bool);
    /// Add an integer, using a compact one-byte form when the value lies in
    /// `[-256, 256)` and the double fallback otherwise.
    fn put_int(&mut self, i: i64);
    /// Add a double as eight IEEE-754 little-endian bytes.
    fn put_double(&mut self, f: f64);
    /// Add a string with an inline or varint length prefix.
    fn put_str(&mut self, s: &[u8]);
    /// Add an object key: a dictionary index byte when `key` is well-known,
    /// a shifted varint length plus raw bytes otherwise.
    fn put_key(&mut self, key: &[u8], keys: &KeyDictionary);
    /// Add an array: tag, length, then each element in sequence.
    fn put_arr<T: Ser>(&mut self, v: &[T], keys: &KeyDictionary);
    /// Add an object: tag, pair count, then each kv-pair.
    fn put_map<T: Ser>(&mut self, m: &VecMap<Bytes, T>, keys: &KeyDictionary);
}

// Tag byte for a container or string: inline lengths fold into the tag,
// larger ones follow it as varint(len - 16).
macro_rules! tag_and_len {
    ($base:expr, $big:expr, $len:expr, $out:ident) => {
        if $len <= INLINE_MAX {
            $out.put_u8($base + $len as u8);
        } else {
            $out.put_u8($big);
            $out.put_slice(&varint::encode($len as u64 - BIG_OFFSET));
        }
    };
}

impl<S: Serializer> SerializerExt for S {
    #[inline]
    fn put_null(&mut self) { self.put_u8(CON_NULL) }

    #[inline]
    fn put_bool(&mut self, b: bool) {
        if b {
            self.put_u8(CON_TRUE)
        } else {
            self.put_u8(CON_FALSE)
        }
    }

    #[inline]
    fn put_int(&mut self, i: i64) {
        if 0 <= i && i < 256 {
            self.put_u8(INT_POS);
            self.put_u8(i as u8);
        } else if -256 <= i && i < 0 {
            self.put_u8(INT_NEG);
            self.put_u8((i + 256) as u8);
        } else {
            // out of compact range; precision trade-off per the format
            self.put_double(i as f64);
        }
    }

    #[inline]
    fn put_double(&mut self, f: f64) {
        self.put_u8(DOUBLE);
        self.put_slice(&u64::to_le_bytes(f.to_bits()));
    }

    #[inline]
    fn put_str(&mut self, s: &[u8]) {
        tag_and_len!(STR_BASE, STR_BIG, s.len(), self);
        self.put_slice(s);
    }

    #[inline]
    fn put_key(&mut self, key: &[u8], keys: &KeyDictionary) {
        match keys.index_of(key) {
            Some(i) => self.put_u8(i),
            None => {
                self.put_slice(&varint::encode(key.len() as u64 + KEY_LEN_OFFSET));
                self.put_slice(key);
            }
        }
    }

    fn put_arr<T: Ser>(&mut self, v: &[T], keys: &KeyDictionary) {
        tag_and_len!(ARR_BASE, ARR_BIG, v.len(), self);
        for t in v {
            t.ser(self, keys);
        }
    }

    fn put_map<T: Ser>(&mut self, m: &VecMap<Bytes, T>, keys: &KeyDictionary) {
        tag_and_len!(MAP_BASE, MAP_BIG, m.len(), self);
        for (k, v) in m.iter() {
            self.put_key(k, keys);
            v.ser(self, keys);
        }
    }
}

/// A value that can be encoded.
pub trait Ser {
    /// Write `self` to a [`Serializer`], collapsing any object key found in
    /// `keys` to its dictionary index.
    fn ser<S: Serializer>(&self, s: &mut S, keys: &KeyDictionary);
}

impl Ser for Value {
    fn ser<S: Serializer>(&self, s: &mut S, keys: &KeyDictionary) {
        match self {
            Null => s.put_null(),
            Bool(b) => s.put_bool(*b),
            Int(i) => s.put_int(*i),
            Float(f) => s.put_double(*f),
            Str(bs) => s.put_str(bs),
            Array(a) => s.put_arr(a, keys),
            Object(m) => s.put_map(m, keys),
        }
    }
}

impl<'a, T: Ser> Ser for &'a T {
    fn ser<S: Serializer>(&self, s: &mut S, keys: &KeyDictionary) { (*self).ser(s, keys) }
}
