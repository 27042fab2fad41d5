//! The dictionary of well-known object keys.
//!
//! Keys that appear over and over in a data set can be registered in a
//! [`KeyDictionary`]; the encoder then collapses each of them to a single
//! index byte instead of a length-prefixed string. The dictionary is built
//! once, at process start, from a line-oriented text source, and is shared
//! read-only by every encode and decode call afterwards.
//!
//! Index bytes live in `0..64`, which is carved out of the object-key length
//! space; a source with 64 or more keys is rejected at construction.
//!
//! # Source format
//!
//! One candidate key per line. Anything from a `#` onward is a comment and
//! is discarded along with the whitespace immediately preceding it; trailing
//! whitespace is stripped; lines left empty are skipped.
//!
//! ```text
//! id        # the most common key of all
//! name
//! created_at
//! ```
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use fastbjson::wellknown::KeyDictionary;
//!
//! let keys = KeyDictionary::parse("id\nname\n# a comment\n\ncreated_at\n").unwrap();
//!
//! assert_eq!(keys.len(), 3);
//! assert_eq!(keys.index_of(b"name"), Some(1));
//! assert_eq!(keys.key_at(2).unwrap(), &Bytes::from("created_at"));
//! assert_eq!(keys.index_of(b"missing"), None);
//! ```

use crate::errors::Error;
use bytes::Bytes;
use std::{collections::HashMap, fs, path::Path};

/// Highest count of keys a dictionary may hold.
pub const MAX_KEYS: usize = 63;

#[derive(Clone, Debug, Default)]
/// An ordered, deduplicated list of well-known object keys with
/// bidirectional key ↔ index lookup.
pub struct KeyDictionary {
    /// Keys in source order; the position is the wire index.
    ids: Vec<Bytes>,
    /// Reverse lookup from key bytes to wire index.
    index: HashMap<Vec<u8>, u8>,
}

impl KeyDictionary {
    /// Builds a dictionary from a line-oriented source.
    ///
    /// Fails with [`Error::DictionaryTooLarge`] when 64 or more keys survive
    /// comment stripping, and with [`Error::DuplicateKey`] when a key is
    /// listed twice.
    pub fn parse(src: &str) -> Result<KeyDictionary, Error> {
        let keys: Vec<&str> = src
            .lines()
            .map(|line| {
                match line.find('#') {
                    Some(i) => line[..i].trim_end(),
                    None => line.trim_end(),
                }
            })
            .filter(|key| !key.is_empty())
            .collect();

        if keys.len() > MAX_KEYS {
            return Err(Error::DictionaryTooLarge { count: keys.len() });
        }

        let mut ids = Vec::with_capacity(keys.len());
        let mut index = HashMap::with_capacity(keys.len());

        for (i, key) in keys.iter().enumerate() {
            if index.insert(key.as_bytes().to_vec(), i as u8).is_some() {
                return Err(Error::DuplicateKey { key: (*key).to_string() });
            }
            ids.push(Bytes::from(key.as_bytes()));
        }

        Ok(KeyDictionary { ids, index })
    }

    /// Reads a dictionary source from a file. Thin wrapper around
    /// [`KeyDictionary::parse`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<KeyDictionary, failure::Error> {
        let src = fs::read_to_string(path)?;
        Ok(KeyDictionary::parse(&src)?)
    }

    /// Returns the wire index of `key`, if it is well-known. The result is
    /// always below 64.
    pub fn index_of(&self, key: &[u8]) -> Option<u8> { self.index.get(key).copied() }

    /// Returns the key at wire index `index`, if the dictionary is that
    /// large.
    pub fn key_at(&self, index: u8) -> Option<&Bytes> { self.ids.get(index as usize) }

    /// Returns the number of keys.
    pub fn len(&self) -> usize { self.ids.len() }

    /// Indicates whether the dictionary holds no keys at all.
    pub fn is_empty(&self) -> bool { self.ids.is_empty() }
}
