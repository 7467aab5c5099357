/*!
Recognizers for the literal forms that [`Tokens`][crate::Tokens] treats as
data even though they may start with a `-`: numbers and durations. The typed
decoders in `argot` reuse the same routines, so a token is classified as a
number exactly when some numeric decoder would accept it.
*/

/// Why a literal was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralError {
    /// The text isn't a literal of the requested kind at all
    Syntax,

    /// The text is well-formed, but its value doesn't fit
    Range,
}

/**
Parse a boolean literal. Accepts the usual spellings of true and false
(`1`, `t`, `true`, `y`, `yes`, `on`, and their `0`/`f`/`false`/`n`/`no`/`off`
counterparts) in lower, upper, and title case.
*/
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" | "y" | "Y" | "yes" | "YES" | "Yes" | "on"
        | "ON" | "On" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" | "n" | "N" | "no" | "NO" | "No" | "off"
        | "OFF" | "Off" => Some(false),
        _ => None,
    }
}

/// Split a base prefix (`0x`, `0o`, `0b`, or a bare leading `0` for octal)
/// off of an unsigned integer literal.
fn split_radix(s: &str) -> (u32, &str) {
    match s.as_bytes() {
        [b'0', b'x' | b'X', _, ..] => (16, &s[2..]),
        [b'0', b'o' | b'O', _, ..] => (8, &s[2..]),
        [b'0', b'b' | b'B', _, ..] => (2, &s[2..]),
        [b'0', ..] => (8, &s[1..]),
        _ => (10, s),
    }
}

/// Underscores may only separate digits, or follow a base prefix.
fn underscores_ok(s: &str) -> bool {
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    let bytes = s.as_bytes();

    // '^' start, '0' digit or prefix, '_' underscore, '!' anything else
    let mut saw = b'^';
    let mut hex = false;
    let mut i = 0;

    if let [b'0', prefix, ..] = bytes {
        let prefix = prefix.to_ascii_lowercase();
        if matches!(prefix, b'b' | b'o' | b'x') {
            i = 2;
            saw = b'0';
            hex = prefix == b'x';
        }
    }

    for &b in &bytes[i..] {
        if b.is_ascii_digit() || (hex && b.is_ascii_hexdigit()) {
            saw = b'0';
        } else if b == b'_' {
            if saw != b'0' {
                return false;
            }
            saw = b'_';
        } else {
            if saw == b'_' {
                return false;
            }
            saw = b'!';
        }
    }

    saw != b'_'
}

/**
Parse an unsigned integer literal that must fit in `bits` bits. The base is
taken from the prefix: `0x` hexadecimal, `0o` or a bare leading `0` octal,
`0b` binary, otherwise decimal. Underscores may separate digits.
*/
pub fn parse_uint(s: &str, bits: u32) -> Result<u64, LiteralError> {
    if s.is_empty() {
        return Err(LiteralError::Syntax);
    }

    let (radix, digits) = split_radix(s);
    let max = match bits {
        64.. => u64::MAX,
        bits => (1 << bits) - 1,
    };

    let mut value: u64 = 0;
    let mut underscores = false;

    for c in digits.chars() {
        if c == '_' {
            underscores = true;
            continue;
        }

        let digit = c.to_digit(radix).ok_or(LiteralError::Syntax)?;

        value = value
            .checked_mul(u64::from(radix))
            .and_then(|value| value.checked_add(u64::from(digit)))
            .filter(|&value| value <= max)
            .ok_or(LiteralError::Range)?;
    }

    if underscores && !underscores_ok(s) {
        return Err(LiteralError::Syntax);
    }

    Ok(value)
}

/// Parse a signed integer literal that must fit in `bits` bits. Same rules as
/// [`parse_uint`], with an optional leading `+` or `-`.
pub fn parse_int(s: &str, bits: u32) -> Result<i64, LiteralError> {
    let (negative, magnitude) = match s.as_bytes().first() {
        None => return Err(LiteralError::Syntax),
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        Some(_) => (false, s),
    };

    let magnitude = parse_uint(magnitude, 64)?;
    let cutoff = 1u64 << (bits.min(64) - 1);

    match negative {
        false if magnitude >= cutoff => Err(LiteralError::Range),
        true if magnitude > cutoff => Err(LiteralError::Range),
        false => Ok(magnitude as i64),
        true => Ok((magnitude as i64).wrapping_neg()),
    }
}

/// A finite decimal literal never contains an `i`; `inf` and `infinity` do.
fn spells_infinity(s: &str) -> bool {
    s.bytes().any(|b| b.eq_ignore_ascii_case(&b'i'))
}

/// Parse a 64-bit floating point literal. A finite literal too large to be
/// represented is a [`Range`][LiteralError::Range] error.
pub fn parse_f64(s: &str) -> Result<f64, LiteralError> {
    let value: f64 = s.parse().map_err(|_| LiteralError::Syntax)?;

    match value.is_infinite() && !spells_infinity(s) {
        true => Err(LiteralError::Range),
        false => Ok(value),
    }
}

/// Parse a 32-bit floating point literal. See [`parse_f64`].
pub fn parse_f32(s: &str) -> Result<f32, LiteralError> {
    let value: f32 = s.parse().map_err(|_| LiteralError::Syntax)?;

    match value.is_infinite() && !spells_infinity(s) {
        true => Err(LiteralError::Range),
        false => Ok(value),
    }
}

/// True if any of the numeric parsers would accept `s`.
pub fn is_number(s: &str) -> bool {
    parse_int(s, 64).is_ok() || parse_f64(s).is_ok() || parse_uint(s, 64).is_ok()
}

/// The largest magnitude a duration can have, in nanoseconds.
const DURATION_LIMIT: u64 = 1 << 63;

fn unit_nanos(unit: &str) -> Option<u64> {
    Some(match unit {
        "ns" => 1,
        "us" | "\u{b5}s" | "\u{3bc}s" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 60 * 60 * 1_000_000_000,
        _ => return None,
    })
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn whole_value(digits: &str) -> Result<u64, LiteralError> {
    digits.bytes().try_fold(0u64, |value, b| {
        value
            .checked_mul(10)
            .and_then(|value| value.checked_add(u64::from(b - b'0')))
            .filter(|&value| value <= DURATION_LIMIT)
            .ok_or(LiteralError::Range)
    })
}

/// Digits after the decimal point; precision beyond 63 bits is dropped.
fn fraction_value(digits: &str) -> (u64, f64) {
    let mut value: u64 = 0;
    let mut scale = 1.0;

    for b in digits.bytes() {
        let next = value
            .checked_mul(10)
            .and_then(|value| value.checked_add(u64::from(b - b'0')))
            .filter(|&value| value <= DURATION_LIMIT);

        match next {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => break,
        }
    }

    (value, scale)
}

/**
Parse a duration literal such as `300ms`, `-1.5h`, or `2h45m`. Valid units
are `ns`, `us` (or `µs`), `ms`, `s`, `m`, and `h`; a bare `0` needs no unit.

Returns whether the duration is negative, along with its magnitude in
nanoseconds.
*/
pub fn parse_duration(s: &str) -> Result<(bool, u64), LiteralError> {
    let (negative, mut rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    if rest == "0" {
        return Ok((negative, 0));
    }

    if rest.is_empty() {
        return Err(LiteralError::Syntax);
    }

    let mut total: u64 = 0;

    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (fraction, after) = match after.strip_prefix('.') {
            Some(after) => split_digits(after),
            None => ("", after),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(LiteralError::Syntax);
        }

        let unit_end = after
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_end);
        rest = after;

        let unit = unit_nanos(unit).ok_or(LiteralError::Syntax)?;

        let mut value = whole_value(whole)?
            .checked_mul(unit)
            .filter(|&value| value <= DURATION_LIMIT)
            .ok_or(LiteralError::Range)?;

        if !fraction.is_empty() {
            let (digits, scale) = fraction_value(fraction);
            let extra = (digits as f64 * (unit as f64 / scale)) as u64;

            value = value
                .checked_add(extra)
                .filter(|&value| value <= DURATION_LIMIT)
                .ok_or(LiteralError::Range)?;
        }

        total = total
            .checked_add(value)
            .filter(|&total| total <= DURATION_LIMIT)
            .ok_or(LiteralError::Range)?;
    }

    if !negative && total == DURATION_LIMIT {
        return Err(LiteralError::Range);
    }

    Ok((negative, total))
}

/// True if `s` is a well-formed duration literal.
pub fn is_duration(s: &str) -> bool {
    parse_duration(s).is_ok()
}
