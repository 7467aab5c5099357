/*!
The value binder heuristics: when a matched flag may take the next token as
its value, and what a boolean flag's value is when it has none.
*/

use std::borrow::Cow;

use argot_parser::{is_data, literal::parse_bool};

use crate::value::{Value, is_bool_like, is_string_like};

/**
Decide whether a flag with no inline value should take `next` as its value.

- An empty token is only taken by string-like values.
- A token that looks like a flag is never taken.
- A boolean-like flag only takes boolean literals, so `-v file` leaves `file`
  to be parsed on its own.
*/
pub fn should_borrow(value: &dyn Value, next: &str) -> bool {
    if next.is_empty() {
        is_string_like(value)
    } else if !is_data(next) {
        false
    } else if is_bool_like(value) {
        parse_bool(next).is_some()
    } else {
        true
    }
}

/// The token actually handed to [`Value::set`]. A bare boolean flag is
/// `"true"` and an empty one (`-v=`) is `"false"`; anything else missing a
/// value gets the empty string.
pub fn resolve<'a>(value: &dyn Value, raw: Option<Cow<'a, str>>) -> Cow<'a, str> {
    match (raw, is_bool_like(value)) {
        (None, true) => Cow::Borrowed("true"),
        (Some(raw), true) if raw.is_empty() => Cow::Borrowed("false"),
        (Some(raw), _) => raw,
        (None, false) => Cow::Borrowed(""),
    }
}
