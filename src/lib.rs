/*!
A small, dynamic command-line argument parser. Argot is a way to handle
(command-line) arguments when the set of flags isn't known until runtime:
declarations are registered on a [`Parser`] as values, subcommands can swap
the whole declaration set mid-parse, and every token is bound to exactly one
declared flag or argument (or rejected with a precise error).

The usual entry points are:

- [`FlagBuilder`], [`ArgBuilder`], and [`RestBuilder`], which declare a flag,
  positional argument, or catch-all on anything that implements [`Register`]
  and hand back a [`Slot`] that receives the parsed value.
- [`Parser::parse`], which runs the token stream against the declarations,
  optionally consulting a [`Commander`] for subcommands.
- [`#[derive(Decode)]`][Decode], which turns a fieldless enum into a value
  that accepts one of its (kebab-case) variant names.

The low level token classification lives in the `argot-parser` crate.
*/

mod binder;
pub mod declare;
pub mod errors;
pub mod help;
mod impls;
mod matcher;
pub mod parser;
mod registry;
pub mod value;

use std::fmt::{self, Display};

pub use argot_derive::Decode;

pub use declare::{Arg, ArgBuilder, Flag, FlagBuilder, RestArgs, RestBuilder};
pub use errors::{DeclarationError, Error, Reason};
pub use parser::{Commander, Options, Parser, Register};
pub use value::{Slot, SlotVec, Value, ValueError};

/// The set of tags that identify a particular flag (`-short`, `--long`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tags {
    /// This flag uses only a long tag
    Long { long: String },

    /// This flag uses only a short tag
    Short { short: char },

    /// This flag uses both a long and short tag
    LongShort { long: String, short: char },
}

impl Tags {
    /// Build a set of tags from an optional short and long name. Returns
    /// [`None`] if both are absent.
    #[must_use]
    pub fn new(short: Option<char>, long: Option<&str>) -> Option<Self> {
        match (short, long) {
            (None, None) => None,
            (Some(short), None) => Some(Tags::Short { short }),
            (None, Some(long)) => Some(Tags::Long { long: long.to_owned() }),
            (Some(short), Some(long)) => Some(Tags::LongShort {
                long: long.to_owned(),
                short,
            }),
        }
    }

    /// Get the long tag, if any
    #[inline]
    #[must_use]
    pub fn long(&self) -> Option<&str> {
        match self {
            Tags::Long { long } | Tags::LongShort { long, .. } => Some(long),
            Tags::Short { .. } => None,
        }
    }

    /// Get the short tag, if any
    #[inline]
    #[must_use]
    pub fn short(&self) -> Option<char> {
        match *self {
            Tags::Short { short } | Tags::LongShort { short, .. } => Some(short),
            Tags::Long { .. } => None,
        }
    }
}

/// Quoted names, short first: `'v'`, `'verbose'`, or `'v' 'verbose'`
impl Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tags::Long { long } => write!(f, "'{long}'"),
            Tags::Short { short } => write!(f, "'{short}'"),
            Tags::LongShort { long, short } => write!(f, "'{short}' '{long}'"),
        }
    }
}
