/*!
The flag matcher: resolves one flag token into the declared flags it names.
A long token names at most one flag; a short token may be a POSIX bundle
(`-abc`) naming several, and a non-boolean flag in a bundle swallows the rest
of the bundle as its value (`-ofile` is `-o=file`).
*/

use std::borrow::Cow;

use argot_parser::{Dashes, FlagToken, PopulatedStr};

use crate::{parser::Options, registry::Flags, value::is_bool_like};

/// A flag token, or part of one, that matched nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unknown<'arg> {
    Short(char),
    Long(&'arg str),

    /// A whole short token that couldn't be resolved without bundling.
    Bundle(&'arg str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'arg> {
    Matched {
        idx: usize,

        /// The inline value, if the token carried one for this flag
        value: Option<Cow<'arg, str>>,

        /// Whether this flag may take the next token as its value. Only the
        /// last flag in a bundle can.
        can_borrow: bool,
    },
    Unknown(Unknown<'arg>),
}

fn single_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    chars.next().filter(|_| chars.as_str().is_empty())
}

/// Attach the inline value split off by `=` to the remainder of a bundle
fn reattach<'arg>(rest: &'arg str, inline: Option<&'arg str>) -> Cow<'arg, str> {
    match inline {
        None => Cow::Borrowed(rest),
        Some(inline) => Cow::Owned(format!("{rest}={inline}")),
    }
}

pub fn resolve<'arg>(
    token: FlagToken<'arg>,
    options: Options,
    flags: &Flags,
) -> Vec<Resolution<'arg>> {
    let universal = options.contains(Options::UNIVERSAL);

    if token.dashes == Dashes::Double || universal {
        return vec![resolve_long(token, universal, flags)];
    }

    match PopulatedStr::new(token.name) {
        None => Vec::new(),
        Some(bundle) if options.contains(Options::DISABLE_POSIX_STYLE) => {
            vec![resolve_single_short(bundle, token.value, options, flags)]
        }
        Some(bundle) => resolve_bundle(bundle, token.value, options, flags),
    }
}

fn resolve_long<'arg>(token: FlagToken<'arg>, universal: bool, flags: &Flags) -> Resolution<'arg> {
    let idx = flags.get_long(token.name).or_else(|| match universal {
        true => single_char(token.name).and_then(|short| flags.get_short(short)),
        false => None,
    });

    match idx {
        Some(idx) => Resolution::Matched {
            idx,
            value: token.value.map(Cow::Borrowed),
            can_borrow: true,
        },
        None => Resolution::Unknown(Unknown::Long(token.name)),
    }
}

/// True if the flag at `idx` would take `rest` as its inline value
fn takes_inline(idx: usize, rest: &str, options: Options, flags: &Flags) -> bool {
    !rest.is_empty()
        && !options.contains(Options::DISABLE_INLINE_VALUE)
        && !is_bool_like(&*flags.get(idx).decl.value)
}

/// Without bundling, a short token names exactly one flag, possibly with an
/// inline value glued on.
fn resolve_single_short<'arg>(
    bundle: &'arg PopulatedStr,
    inline: Option<&'arg str>,
    options: Options,
    flags: &Flags,
) -> Resolution<'arg> {
    let (short, rest) = bundle.split_first();

    match flags.get_short(short) {
        Some(idx) if rest.is_empty() => Resolution::Matched {
            idx,
            value: inline.map(Cow::Borrowed),
            can_borrow: true,
        },
        Some(idx) if takes_inline(idx, rest, options, flags) => Resolution::Matched {
            idx,
            value: Some(reattach(rest, inline)),
            can_borrow: false,
        },
        Some(_) => Resolution::Unknown(Unknown::Bundle(bundle.get())),
        None if rest.is_empty() => Resolution::Unknown(Unknown::Short(short)),
        None => Resolution::Unknown(Unknown::Bundle(bundle.get())),
    }
}

fn resolve_bundle<'arg>(
    bundle: &'arg PopulatedStr,
    inline: Option<&'arg str>,
    options: Options,
    flags: &Flags,
) -> Vec<Resolution<'arg>> {
    let mut resolutions = Vec::new();
    let mut remaining = Some(bundle);

    while let Some(bundle) = remaining {
        let (short, rest) = bundle.split_first();
        remaining = PopulatedStr::new(rest);

        let last = rest.is_empty();

        let Some(idx) = flags.get_short(short) else {
            resolutions.push(Resolution::Unknown(Unknown::Short(short)));
            continue;
        };

        let value = if takes_inline(idx, rest, options, flags) {
            remaining = None;
            Some(reattach(rest, inline))
        } else if last {
            inline.map(Cow::Borrowed)
        } else {
            None
        };

        resolutions.push(Resolution::Matched {
            idx,
            value,
            can_borrow: last,
        });
    }

    resolutions
}
