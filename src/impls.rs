/*!
Implementations of [`Decode`] for various primitive and standard library
types
 */

use std::{path::PathBuf, time::Duration};

use argot_parser::literal;

use crate::value::{Decode, Flavor, ValueError};

macro_rules! signed {
    ($($type:ident)*) => {
        $(
            impl Decode for $type {
                const TYPE: &'static str = stringify!($type);

                fn decode(raw: &str) -> Result<Self, ValueError> {
                    literal::parse_int(raw, <$type>::BITS)
                        .map(|value| value as $type)
                        .map_err(|err| ValueError::literal(Self::TYPE, raw, err))
                }
            }
        )*
    };
}

macro_rules! unsigned {
    ($($type:ident)*) => {
        $(
            impl Decode for $type {
                const TYPE: &'static str = stringify!($type);

                fn decode(raw: &str) -> Result<Self, ValueError> {
                    literal::parse_uint(raw, <$type>::BITS)
                        .map(|value| value as $type)
                        .map_err(|err| ValueError::literal(Self::TYPE, raw, err))
                }
            }
        )*
    };
}

/// Types with no special literal rules; any [`FromStr`][std::str::FromStr]
/// failure is a syntax error.
macro_rules! from_str {
    ($($type:ident $(:: $path:ident)* => $name:literal,)*) => {
        $(
            impl Decode for $type $(:: $path)* {
                const TYPE: &'static str = $name;

                fn decode(raw: &str) -> Result<Self, ValueError> {
                    raw.parse().map_err(|_| ValueError::syntax(Self::TYPE, raw))
                }
            }
        )*
    };
}

signed! { i8 i16 i32 i64 isize }
unsigned! { u8 u16 u32 u64 usize }

from_str! {
    char => "char",
    std::net::IpAddr => "address",
    std::net::SocketAddr => "socket",
}

impl Decode for f32 {
    const TYPE: &'static str = "f32";

    fn decode(raw: &str) -> Result<Self, ValueError> {
        literal::parse_f32(raw).map_err(|err| ValueError::literal(Self::TYPE, raw, err))
    }
}

impl Decode for f64 {
    const TYPE: &'static str = "f64";

    fn decode(raw: &str) -> Result<Self, ValueError> {
        literal::parse_f64(raw).map_err(|err| ValueError::literal(Self::TYPE, raw, err))
    }
}

impl Decode for bool {
    const TYPE: &'static str = "bool";
    const FLAVOR: Flavor = Flavor::Bool;

    fn decode(raw: &str) -> Result<Self, ValueError> {
        literal::parse_bool(raw).ok_or_else(|| ValueError::syntax(Self::TYPE, raw))
    }
}

impl Decode for String {
    const TYPE: &'static str = "string";
    const FLAVOR: Flavor = Flavor::String;

    #[inline]
    fn decode(raw: &str) -> Result<Self, ValueError> {
        Ok(raw.to_owned())
    }
}

impl Decode for PathBuf {
    const TYPE: &'static str = "path";

    #[inline]
    fn decode(raw: &str) -> Result<Self, ValueError> {
        Ok(PathBuf::from(raw))
    }
}

/// Durations can't be negative, except for a signed zero
impl Decode for Duration {
    const TYPE: &'static str = "duration";

    fn decode(raw: &str) -> Result<Self, ValueError> {
        match literal::parse_duration(raw) {
            Ok((true, nanos)) if nanos > 0 => Err(ValueError::range(Self::TYPE, raw)),
            Ok((_, nanos)) => Ok(Duration::from_nanos(nanos)),
            Err(err) => Err(ValueError::literal(Self::TYPE, raw, err)),
        }
    }
}
