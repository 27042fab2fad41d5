//! # fastbjson
//!
//! A compact binary encoding for JSON-compatible values. It trades JSON's
//! human readability for smaller output and faster parsing: every value
//! starts with a single tag byte, small lengths ride along inside the tag,
//! large lengths use a base-128 varint, and object keys registered in a
//! shared [`KeyDictionary`] collapse to one byte.
//!
//! # Usage
//!
//! Data is converted into [`Value`] at the boundary, then handed to the
//! codec together with the dictionary:
//!
//! ```
//! use fastbjson::prelude::*;
//!
//! // built once at startup, immutable afterwards
//! let keys = KeyDictionary::parse("id\nname\n").unwrap();
//!
//! let record = Value::Object(VecMap::from(vec![
//!     (Bytes::from("id"), Value::from(42)),
//!     (Bytes::from("name"), Value::from("deep thought")),
//! ]));
//!
//! let bytes = encode_full(&record, &keys);
//!
//! // both well-known keys cost one byte each on the wire
//! let back = decode(&bytes, &keys).unwrap();
//! assert_eq!(back, record);
//! ```
//!
//! Encoding never fails; decoding returns a [`Result`] and rejects any
//! malformed, truncated, or oversized input with a specific
//! [`Error`](errors::Error).
//!
//! # An overview of the value model
//!
//! [`Value`] covers exactly the JSON data model: `null`, booleans, numbers,
//! UTF-8 strings, arrays, and string-keyed objects. Numbers are either an
//! [`Int`](Value::Int) or a [`Float`](Value::Float); integers have compact
//! one-byte wire forms in `[0, 256)` and `[-256, 0)` and degrade to IEEE-754
//! doubles outside those ranges. Objects are [`VecMap`]s, so their equality
//! ignores insertion order, and duplicate keys in a decoded stream resolve
//! last-write-wins.
//!
//! # Wire format
//!
//! The first byte of every encoded value is its *tag*:
//!
//! | Tag    | Meaning                      | Payload                             |
//! | ---    | ---                          | ---                                 |
//! | 1      | `false`                      | none                                |
//! | 2      | `true`                       | none                                |
//! | 3      | `null`                       | none                                |
//! | 4..19  | string, length `tag - 4`     | raw UTF-8 bytes                     |
//! | 20     | string, length ≥ 16          | varint(`len - 16`), raw UTF-8 bytes |
//! | 21     | integer in `[0, 256)`        | one byte, the value                 |
//! | 22     | integer in `[-256, 0)`       | one byte, `value + 256`             |
//! | 28     | double                       | 8 bytes, IEEE-754 little-endian     |
//! | 30..45 | array, length `tag - 30`     | the elements                        |
//! | 46     | array, length ≥ 16           | varint(`len - 16`), the elements    |
//! | 50..65 | object, key-count `tag - 50` | the kv-pairs                        |
//! | 66     | object, key-count ≥ 16       | varint(`count - 16`), the kv-pairs  |
//!
//! All other tag bytes are reserved and rejected.
//!
//! A kv-pair is a key followed by a recursively encoded value. A key whose
//! string is in the dictionary at index `i` is the single byte `i`
//! (`0 ≤ i < 64`); any other key is `varint(byte_length + 64)` followed by
//! its raw UTF-8 bytes.
//!
//! Varints are base-128, least-significant group first, high bit as the
//! continuation flag, at most 5 bytes; see [`varint`].

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    unreachable_pub,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

pub mod encoding;
pub mod errors;
pub mod prelude;
mod util;
pub mod varint;
pub mod vecmap;
pub mod wellknown;

use bytes::Bytes;
use errors::Error;
use vecmap::VecMap;

#[derive(Clone, Debug)]
/// [`Value`] and its variants: the closed set of encodable data.
///
/// # Example
///
/// ```
/// use fastbjson::prelude::*;
///
/// let b = Value::Bool(true);
///
/// let val = match b {
///     Value::Bool(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Value {
    /// Null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer. Values in `[-256, 256)` have a compact wire form; anything
    /// outside rides in a double and loses its integer-ness on decode.
    Int(i64),
    /// Double-precision float.
    Float(f64),
    /// UTF-8 string, stored as raw bytes.
    Str(Bytes),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// String-keyed mapping with unique keys and order-insensitive
    /// equality.
    Object(VecMap<Bytes, Value>),
}

use Value::*;

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            // bitwise, so NaN == NaN and 0.0 != -0.0; decode(encode(v))
            // stays an identity for every float
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Str(a), Str(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Object(a), Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// The variant's name, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Null => "Null",
            Bool(_) => "Bool",
            Int(_) => "Int",
            Float(_) => "Float",
            Str(_) => "Str",
            Array(_) => "Array",
            Object(_) => "Object",
        }
    }

    /// Converts a bytestring literal to a [`Value`].
    ///
    /// # Example
    ///
    /// ```
    /// use fastbjson::Value;
    ///
    /// let greeting = Value::from_static(b"hello world");
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Value { Str(Bytes::from_static(bytes)) }

    /// Indicates whether a value is [`Null`].
    ///
    /// # Example
    ///
    /// ```
    /// use fastbjson::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Bool(false).is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    /// Tries to read a value as a [`bool`].
    ///
    /// # Example
    ///
    /// ```
    /// use fastbjson::Value;
    ///
    /// assert!(Value::from(true).to_bool().unwrap());
    /// assert!(Value::Null.to_bool().is_err());
    /// ```
    pub fn to_bool(&self) -> Result<bool, Error> {
        match self {
            Bool(b) => Ok(*b),
            other => Err(other.mismatch("Bool")),
        }
    }

    /// Tries to read a value as an [`i64`].
    pub fn to_int(&self) -> Result<i64, Error> {
        match self {
            Int(i) => Ok(*i),
            other => Err(other.mismatch("Int")),
        }
    }

    /// Tries to read a value as an [`f64`].
    pub fn to_float(&self) -> Result<f64, Error> {
        match self {
            Float(f) => Ok(*f),
            other => Err(other.mismatch("Float")),
        }
    }

    /// Tries to read a value as a string.
    ///
    /// # Example
    ///
    /// ```
    /// use bytes::Bytes;
    /// use fastbjson::Value;
    ///
    /// let s = Value::from("word");
    ///
    /// assert_eq!(s.to_str().unwrap(), &Bytes::from("word"));
    /// ```
    pub fn to_str(&self) -> Result<&Bytes, Error> {
        match self {
            Str(s) => Ok(s),
            other => Err(other.mismatch("Str")),
        }
    }

    /// Tries to read a value as a vector of values.
    pub fn to_vec(&self) -> Result<&Vec<Value>, Error> {
        match self {
            Array(a) => Ok(a),
            other => Err(other.mismatch("Array")),
        }
    }

    /// Tries to read a value as a map.
    pub fn to_vecmap(&self) -> Result<&VecMap<Bytes, Value>, Error> {
        match self {
            Object(m) => Ok(m),
            other => Err(other.mismatch("Object")),
        }
    }

    /// Consumes a value, converting it into a vector of values.
    ///
    /// # Example
    ///
    /// ```
    /// use fastbjson::Value;
    ///
    /// let elems = Value::from(vec![1, 2, 3]).into_vec().unwrap();
    ///
    /// assert_eq!(elems.len(), 3);
    /// ```
    pub fn into_vec(self) -> Result<Vec<Value>, Error> {
        match self {
            Array(a) => Ok(a),
            other => Err(other.mismatch("Array")),
        }
    }

    /// Consumes a value, converting it into a map.
    pub fn into_vecmap(self) -> Result<VecMap<Bytes, Value>, Error> {
        match self {
            Object(m) => Ok(m),
            other => Err(other.mismatch("Object")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::UnsupportedType { expected, found: self.type_name() }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        fn fmt_bytes(bytes: &Bytes) -> String {
            match std::str::from_utf8(bytes) {
                Ok(s) => format!("{:?}", s),
                Err(_) => {
                    let mut out: String = "b\"".to_owned();
                    bytes.iter().for_each(|c| out.push_str(&format!("{:02x}", c)));
                    out.push('"');
                    out
                }
            }
        }

        match self {
            Null => write!(f, "null"),
            Bool(b) => write!(f, "{}", b),
            Int(i) => write!(f, "{}", i),
            Float(x) => write!(f, "{}", x),
            Str(s) => write!(f, "{}", fmt_bytes(s)),
            Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Object(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", fmt_bytes(k), v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// bool
from_fn!(Value, bool, Bool);
try_from_ctor!(Value, bool, Bool);

// integers
from_fn!(Value, i64, Int);
try_from_ctor!(Value, i64, Int);
from_as!(Value, i8, i64);
from_as!(Value, i16, i64);
from_as!(Value, i32, i64);
from_as!(Value, u8, i64);
from_as!(Value, u16, i64);
from_as!(Value, u32, i64);

// floats
from_fn!(Value, f64, Float);
try_from_ctor!(Value, f64, Float);
from_as!(Value, f32, f64);

// strings
from_fn!(Value, Bytes, Str);
try_from_ctor!(Value, Bytes, Str);
compose_from!(Value, Bytes, String);

impl From<&str> for Value {
    fn from(s: &str) -> Value { Str(Bytes::from(s)) }
}

// containers
try_from_ctor!(Value, Vec<Value>, Array);
try_from_ctor!(Value, VecMap<Bytes, Value>, Object);

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { Array(v.into_iter().map(T::into).collect()) }
}

impl From<VecMap<Bytes, Value>> for Value {
    fn from(m: VecMap<Bytes, Value>) -> Value { Object(m) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn trivial_conversions() {
        assert!(Null.is_null());

        assert_eq!(Value::from(5).to_int().unwrap(), 5);

        assert!(Value::from(true).to_bool().unwrap());

        assert_eq!(
            Value::from("word").to_str().unwrap(),
            &Bytes::from("word")
        );

        assert_eq!(
            Value::from(1).to_bool().unwrap_err(),
            Error::UnsupportedType { expected: "Bool", found: "Int" }
        );
    }

    #[test]
    fn try_from_extracts() {
        let v: Vec<Value> = Value::from(vec![0, 1, 2]).into_vec().unwrap();
        assert_eq!(v.len(), 3);

        assert_eq!(i64::try_from(Value::from(9)).unwrap(), 9);
        assert!(bool::try_from(Value::Null).is_err());
    }

    #[test]
    fn float_equality_is_bitwise() {
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_ne!(Value::from(0.0), Value::from(-0.0));
        assert_ne!(Value::from(1.0), Value::from(1));
    }

    #[test]
    fn display_is_json_flavoured() {
        let v = Value::Object(VecMap::from(vec![(
            Bytes::from("xs"),
            Value::from(vec![1, 2]),
        )]));
        assert_eq!(format!("{}", v), "{\"xs\": [1, 2]}");
    }
}
