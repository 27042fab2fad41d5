//! Re-exports of everything a typical user touches.

pub use crate::{
    encoding::{decode, encode, encode_full, Ser, Serializer, SerializerExt},
    errors::Error,
    varint,
    vecmap::VecMap,
    wellknown::KeyDictionary,
    Value,
};
pub use bytes::Bytes;
pub use std::convert::TryFrom;
