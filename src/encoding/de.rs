use super::*;

/// One entry of the dispatch table: decodes the value whose tag sits at
/// `at`, returning the bytes consumed and the value.
type Unpacker = fn(&Decoder, &[u8], usize, usize) -> Result<(usize, Value), Error>;

/// A single decode pass over one complete buffer.
///
/// Holds nothing but the shared [`KeyDictionary`]; all position state lives
/// on the stack, so a `Decoder` can be reused and shared freely.
pub(crate) struct Decoder<'a> {
    keys: &'a KeyDictionary,
}

/// Lead-byte dispatch, mirroring the tag table exactly. Every slot not
/// assigned below rejects its byte, so coverage of the reserved ranges
/// (0, 23..=27, 29, 47..=49, 67..=255) is exhaustive by construction.
static DISPATCH: [Unpacker; 256] = dispatch_table();

const fn dispatch_table() -> [Unpacker; 256] {
    let mut table: [Unpacker; 256] = [unknown_tag; 256];

    table[CON_FALSE as usize] = con_false;
    table[CON_TRUE as usize] = con_true;
    table[CON_NULL as usize] = con_null;

    let mut i = 0;
    while i <= INLINE_MAX {
        table[STR_BASE as usize + i] = str_inline;
        table[ARR_BASE as usize + i] = arr_inline;
        table[MAP_BASE as usize + i] = map_inline;
        i += 1;
    }

    table[STR_BIG as usize] = str_big;
    table[INT_POS as usize] = int_pos;
    table[INT_NEG as usize] = int_neg;
    table[DOUBLE as usize] = double;
    table[ARR_BIG as usize] = arr_big;
    table[MAP_BIG as usize] = map_big;

    table
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(keys: &'a KeyDictionary) -> Decoder<'a> { Decoder { keys } }

    /// Decodes the value whose tag sits at `at`. `depth` is the current
    /// nesting level; descending past [`MAX_DEPTH`] fails rather than
    /// exhausting the stack on adversarial input.
    pub(crate) fn value_at(
        &self,
        buf: &[u8],
        at: usize,
        depth: usize,
    ) -> Result<(usize, Value), Error> {
        if depth > MAX_DEPTH {
            return Err(Error::NestingTooDeep { limit: MAX_DEPTH });
        }
        let tag = read_byte(buf, at)?;
        DISPATCH[tag as usize](self, buf, at, depth)
    }

    /// Decodes one object key at `at`.
    ///
    /// A lead byte below 64 is a dictionary index; anything else starts a
    /// varint holding the key's byte length shifted up by 64.
    fn read_key(&self, buf: &[u8], at: usize) -> Result<(usize, Bytes), Error> {
        let lead = read_byte(buf, at)?;
        if lead < KEY_INDEX_LIMIT {
            match self.keys.key_at(lead) {
                Some(key) => Ok((1, key.clone())),
                None => Err(Error::InvalidKeyEncoding { offset: at }),
            }
        } else {
            let (used, n) = varint::decode(buf, at)?;
            if n < KEY_LEN_OFFSET {
                // a length this small would have been a bare index byte
                return Err(Error::InvalidKeyEncoding { offset: at });
            }
            let len = (n - KEY_LEN_OFFSET) as usize;
            let payload = read_exact(buf, at + used, len)?;
            Ok((used + len, Bytes::from(payload)))
        }
    }

    /// Reads `count` consecutive values starting at `at`.
    fn read_elements(
        &self,
        buf: &[u8],
        at: usize,
        count: usize,
        depth: usize,
    ) -> Result<(usize, Vec<Value>), Error> {
        // each element takes at least one byte, so a count beyond the bytes
        // remaining can never succeed; don't let it size the allocation
        let mut elems = Vec::with_capacity(count.min(buf.len().saturating_sub(at)));
        let mut used = 0;
        for _ in 0..count {
            let (n, elem) = self.value_at(buf, at + used, depth + 1)?;
            used += n;
            elems.push(elem);
        }
        Ok((used, elems))
    }

    /// Reads `count` consecutive kv-pairs starting at `at`. Duplicate keys
    /// resolve last-write-wins when the pairs become a [`VecMap`].
    fn read_pairs(
        &self,
        buf: &[u8],
        at: usize,
        count: usize,
        depth: usize,
    ) -> Result<(usize, VecMap<Bytes, Value>), Error> {
        let mut pairs = Vec::with_capacity(count.min(buf.len().saturating_sub(at) / 2));
        let mut used = 0;
        for _ in 0..count {
            let (kn, key) = self.read_key(buf, at + used)?;
            used += kn;
            let (vn, value) = self.value_at(buf, at + used, depth + 1)?;
            used += vn;
            pairs.push((key, value));
        }
        Ok((used, VecMap::from(pairs)))
    }
}

fn read_byte(buf: &[u8], at: usize) -> Result<u8, Error> {
    match buf.get(at) {
        Some(b) => Ok(*b),
        None => Err(Error::UnexpectedEnd { wanted: 1, have: 0 }),
    }
}

fn read_exact(buf: &[u8], at: usize, len: usize) -> Result<&[u8], Error> {
    let have = buf.len().saturating_sub(at);
    match at.checked_add(len).and_then(|end| buf.get(at..end)) {
        Some(slice) => Ok(slice),
        None => Err(Error::UnexpectedEnd { wanted: len, have }),
    }
}

fn unknown_tag(_: &Decoder, buf: &[u8], at: usize, _: usize) -> Result<(usize, Value), Error> {
    Err(Error::UnknownTag { tag: buf[at], offset: at })
}

fn con_false(_: &Decoder, _: &[u8], _: usize, _: usize) -> Result<(usize, Value), Error> {
    Ok((1, Bool(false)))
}

fn con_true(_: &Decoder, _: &[u8], _: usize, _: usize) -> Result<(usize, Value), Error> {
    Ok((1, Bool(true)))
}

fn con_null(_: &Decoder, _: &[u8], _: usize, _: usize) -> Result<(usize, Value), Error> {
    Ok((1, Null))
}

fn str_inline(_: &Decoder, buf: &[u8], at: usize, _: usize) -> Result<(usize, Value), Error> {
    let len = (buf[at] - STR_BASE) as usize;
    let payload = read_exact(buf, at + 1, len)?;
    Ok((1 + len, Str(Bytes::from(payload))))
}

fn str_big(_: &Decoder, buf: &[u8], at: usize, _: usize) -> Result<(usize, Value), Error> {
    let (used, n) = varint::decode(buf, at + 1)?;
    let len = (n + BIG_OFFSET) as usize;
    let payload = read_exact(buf, at + 1 + used, len)?;
    Ok((1 + used + len, Str(Bytes::from(payload))))
}

fn int_pos(_: &Decoder, buf: &[u8], at: usize, _: usize) -> Result<(usize, Value), Error> {
    let byte = read_byte(buf, at + 1)?;
    Ok((2, Int(i64::from(byte))))
}

fn int_neg(_: &Decoder, buf: &[u8], at: usize, _: usize) -> Result<(usize, Value), Error> {
    let byte = read_byte(buf, at + 1)?;
    Ok((2, Int(i64::from(byte) - 256)))
}

fn double(_: &Decoder, buf: &[u8], at: usize, _: usize) -> Result<(usize, Value), Error> {
    let payload = read_exact(buf, at + 1, 8)?;
    let mut bits = [0u8; 8];
    bits.copy_from_slice(payload);
    Ok((9, Float(f64::from_bits(u64::from_le_bytes(bits)))))
}

fn arr_inline(dec: &Decoder, buf: &[u8], at: usize, depth: usize) -> Result<(usize, Value), Error> {
    let count = (buf[at] - ARR_BASE) as usize;
    let (used, elems) = dec.read_elements(buf, at + 1, count, depth)?;
    Ok((1 + used, Array(elems)))
}

fn arr_big(dec: &Decoder, buf: &[u8], at: usize, depth: usize) -> Result<(usize, Value), Error> {
    let (len_used, n) = varint::decode(buf, at + 1)?;
    let count = (n + BIG_OFFSET) as usize;
    let (used, elems) = dec.read_elements(buf, at + 1 + len_used, count, depth)?;
    Ok((1 + len_used + used, Array(elems)))
}

fn map_inline(dec: &Decoder, buf: &[u8], at: usize, depth: usize) -> Result<(usize, Value), Error> {
    let count = (buf[at] - MAP_BASE) as usize;
    let (used, pairs) = dec.read_pairs(buf, at + 1, count, depth)?;
    Ok((1 + used, Object(pairs)))
}

fn map_big(dec: &Decoder, buf: &[u8], at: usize, depth: usize) -> Result<(usize, Value), Error> {
    let (len_used, n) = varint::decode(buf, at + 1)?;
    let count = (n + BIG_OFFSET) as usize;
    let (used, pairs) = dec.read_pairs(buf, at + 1 + len_used, count, depth)?;
    Ok((1 + len_used + used, Object(pairs)))
}
