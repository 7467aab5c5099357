/*!
The value contract: what a flag, positional argument, or rest catch-all binds
its tokens to.

A [`Value`] absorbs one raw token at a time. It can also advertise that it's
boolean-like (a bare flag means `true`, and only boolean literals may follow
it) or string-like (an empty next token is a legitimate value) through the
[`BoolFlag`] and [`StringFlag`] capabilities. Most values are [`Slot`]s or
[`SlotVec`]s wrapping a type that implements [`Decode`].
*/

use std::{
    cell::{Ref, RefCell},
    fmt::{self, Display},
    rc::Rc,
};

use argot_parser::literal::LiteralError;
use joinery::JoinableIterator;
use thiserror::Error;

/// Why a raw token couldn't be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueErrorKind {
    /// The token isn't a valid literal of the type at all
    Syntax,

    /// The token is well formed, but out of range for the type
    Range,

    /// The token isn't one of a fixed set of names
    Choice(&'static [&'static str]),
}

impl Display for ValueErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ValueErrorKind::Syntax => f.write_str("invalid syntax"),
            ValueErrorKind::Range => f.write_str("value out of range"),
            ValueErrorKind::Choice(choices) => {
                write!(f, "expected one of {}", choices.iter().join_with(", "))
            }
        }
    }
}

/// A raw token failed to decode into a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parsing {type_name} {input:?}: {kind}")]
pub struct ValueError {
    pub type_name: &'static str,
    pub input: String,
    pub kind: ValueErrorKind,
}

impl ValueError {
    #[must_use]
    pub fn new(type_name: &'static str, input: &str, kind: ValueErrorKind) -> Self {
        Self {
            type_name,
            input: input.to_owned(),
            kind,
        }
    }

    #[must_use]
    pub fn syntax(type_name: &'static str, input: &str) -> Self {
        Self::new(type_name, input, ValueErrorKind::Syntax)
    }

    #[must_use]
    pub fn range(type_name: &'static str, input: &str) -> Self {
        Self::new(type_name, input, ValueErrorKind::Range)
    }

    #[must_use]
    pub fn choice(type_name: &'static str, input: &str, choices: &'static [&'static str]) -> Self {
        Self::new(type_name, input, ValueErrorKind::Choice(choices))
    }

    pub(crate) fn literal(type_name: &'static str, input: &str, error: LiteralError) -> Self {
        match error {
            LiteralError::Syntax => Self::syntax(type_name, input),
            LiteralError::Range => Self::range(type_name, input),
        }
    }
}

/**
A value that can absorb raw tokens from the command line. Flags and
positional arguments call [`set`][Value::set] at most once per occurrence;
rest args call it once per extra token.
*/
pub trait Value {
    /// Absorb a single raw token.
    fn set(&mut self, raw: &str) -> Result<(), ValueError>;

    /// A short name for the kind of value, used as a placeholder in usage
    /// messages (`<i32>`, `<duration>`).
    fn type_name(&self) -> &'static str;

    /// Probe for the boolean-like capability
    fn as_bool_flag(&self) -> Option<&dyn BoolFlag> {
        None
    }

    /// Probe for the string-like capability
    fn as_string_flag(&self) -> Option<&dyn StringFlag> {
        None
    }

    /// The complete set of accepted tokens, for values that have one
    fn choices(&self) -> Option<&'static [&'static str]> {
        None
    }
}

/// A value that doesn't need a token: a bare flag means `"true"`.
pub trait BoolFlag {
    fn is_bool_flag(&self) -> bool;
}

/// A value for which an empty next token is a meaningful value.
pub trait StringFlag {
    fn is_string_flag(&self) -> bool;
}

/// True if `value` has the boolean-like capability and answers yes.
#[must_use]
pub fn is_bool_like(value: &dyn Value) -> bool {
    value.as_bool_flag().is_some_and(|flag| flag.is_bool_flag())
}

/// True if `value` has the string-like capability and answers yes.
#[must_use]
pub fn is_string_like(value: &dyn Value) -> bool {
    value
        .as_string_flag()
        .is_some_and(|flag| flag.is_string_flag())
}

/// Which of the capabilities a [`Decode`] type's [`Slot`] advertises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Plain,
    Bool,
    String,
}

/**
A type that can be decoded from a single raw token. Implemented for the
primitive numeric types, [`bool`], [`String`], [`PathBuf`][std::path::PathBuf],
and [`Duration`][std::time::Duration]; `#[derive(Decode)]` implements it for
fieldless enums.
*/
pub trait Decode: Sized {
    /// The name used in error and usage messages
    const TYPE: &'static str;

    const FLAVOR: Flavor = Flavor::Plain;

    /// For types that only accept a fixed set of names
    const CHOICES: Option<&'static [&'static str]> = None;

    fn decode(raw: &str) -> Result<Self, ValueError>;
}

/**
A shared cell that receives a decoded value. The parser holds one handle and
the caller keeps another; after [`parse`][crate::Parser::parse], the
caller's handle sees whatever was bound.
*/
#[derive(Debug, Default)]
pub struct Slot<T>(Rc<RefCell<T>>);

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Slot<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self(Rc::new(RefCell::new(initial)))
    }

    /// Borrow the current value
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Replace the current value, returning the old one
    pub fn replace(&self, value: T) -> T {
        self.0.replace(value)
    }
}

impl<T: Clone> Slot<T> {
    /// Get a copy of the current value
    #[must_use]
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T: Decode> Value for Slot<T> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        let value = T::decode(raw)?;
        *self.0.borrow_mut() = value;
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        T::TYPE
    }

    fn as_bool_flag(&self) -> Option<&dyn BoolFlag> {
        match T::FLAVOR {
            Flavor::Bool => Some(self),
            _ => None,
        }
    }

    fn as_string_flag(&self) -> Option<&dyn StringFlag> {
        match T::FLAVOR {
            Flavor::String => Some(self),
            _ => None,
        }
    }

    fn choices(&self) -> Option<&'static [&'static str]> {
        T::CHOICES
    }
}

impl<T: Decode> BoolFlag for Slot<T> {
    fn is_bool_flag(&self) -> bool {
        T::FLAVOR == Flavor::Bool
    }
}

impl<T: Decode> StringFlag for Slot<T> {
    fn is_string_flag(&self) -> bool {
        T::FLAVOR == Flavor::String
    }
}

/// Like [`Slot`], but each token is appended. Used for rest args.
#[derive(Debug, Default)]
pub struct SlotVec<T>(Rc<RefCell<Vec<T>>>);

impl<T> Clone for SlotVec<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> SlotVec<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn borrow(&self) -> Ref<'_, Vec<T>> {
        self.0.borrow()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return everything collected so far
    pub fn take(&self) -> Vec<T> {
        self.0.take()
    }
}

impl<T: Clone> SlotVec<T> {
    #[must_use]
    pub fn get(&self) -> Vec<T> {
        self.0.borrow().clone()
    }
}

impl<T: Decode> Value for SlotVec<T> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        let value = T::decode(raw)?;
        self.0.borrow_mut().push(value);
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        T::TYPE
    }

    fn choices(&self) -> Option<&'static [&'static str]> {
        T::CHOICES
    }
}
