#[macro_export]
/// Helper macro to compose `From` implementations.
macro_rules! compose_from {
    ($to:tt, $mid:tt, $from:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self { Self::from($mid::from(f)) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_as {
    ($to:tt, $from:ty, $as:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $to::from(f as $as) }
        }
    };
}

#[macro_export]
/// Helper macro implementing `TryFrom` for single-field enum constructors.
macro_rules! try_from_ctor {
    ($from:tt, $to:ty, $ctor:tt) => {
        impl std::convert::TryFrom<$from> for $to {
            type Error = $crate::errors::Error;

            fn try_from(from: $from) -> Result<$to, Self::Error> {
                match from {
                    $from::$ctor(t) => Ok(t),
                    other => Err($crate::errors::Error::UnsupportedType {
                        expected: stringify!($ctor),
                        found: other.type_name(),
                    }),
                }
            }
        }
    };
}
