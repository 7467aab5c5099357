/*!
Error types for [`argot`][crate]. Declaration problems are captured at
registration time and surfaced by [`Parser::parse`][crate::Parser::parse];
everything else is a parse-time error that aborts the parse immediately.
 */

use std::fmt::Display;

use lazy_format::lazy_format;
use thiserror::Error;

use crate::{Tags, value::ValueError};

/// What went wrong with a declaration, or with the token that tried to use it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Reason {
    #[error("missing name")]
    MissingName,

    #[error("invalid name")]
    InvalidName,

    #[error("duplicate")]
    Duplicate,

    /// A required flag or argument never received a value
    #[error("not provided")]
    NotProvided,

    #[error("required after optional")]
    RequiredAfterOptional,

    #[error("arg after rest")]
    ArgAfterRest,

    /// A flag or positional token matched nothing that was declared
    #[error("unknown")]
    Unknown,

    /// A flag token whose name starts with `-`, `=`, a space, or a comma
    #[error("invalid syntax")]
    Syntax,
}

fn quoted(name: &str) -> impl Display + '_ {
    lazy_format!(match (name) {
        "" => "",
        name => "'{name}': ",
    })
}

fn quoted_tags(tags: &Option<Tags>) -> impl Display + '_ {
    lazy_format!(match (tags) {
        None => "",
        Some(tags) => "{tags}: ",
    })
}

/**
An error tied to a single declared element. These are produced by the
[`Register`][crate::Register] methods, remembered by the parser, and also
reported when a required element is never provided.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// The reported tags are the offending flag's, or for a duplicate, those
    /// of the flag that was registered first.
    #[error("flag error: {}{reason}", quoted_tags(.tags))]
    Flag { tags: Option<Tags>, reason: Reason },

    #[error("arg error: {}{reason}", quoted(.name))]
    Arg { name: String, reason: Reason },

    #[error("rest args error: {}{reason}", quoted(.name))]
    RestArgs { name: String, reason: Reason },
}

/// A failure reported by a [`Commander`][crate::Commander].
pub type CommandError = Box<dyn std::error::Error + Send + Sync>;

/// Anything that can go wrong in [`Parser::parse`][crate::Parser::parse]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    /// An unknown or malformed flag. `name` is the text after the dashes,
    /// with any inline value removed.
    #[error("parse flag error: '{name}': {reason}")]
    ParseFlag { name: String, reason: Reason },

    /// A positional token with nowhere to go
    #[error("parse arg error: '{arg}': {reason}")]
    ParseArg { arg: String, reason: Reason },

    #[error("flag {}{source}", quoted_tags(.flag))]
    FlagValue {
        flag: Option<Tags>,
        source: ValueError,
    },

    #[error("arg '{name}': {source}")]
    ArgValue { name: String, source: ValueError },

    #[error("rest args '{name}': {source}")]
    RestValue { name: String, source: ValueError },

    #[error(transparent)]
    Command(CommandError),
}

impl Error {
    /// The underlying [`Reason`], for errors that have one
    #[must_use]
    pub fn reason(&self) -> Option<Reason> {
        match *self {
            Error::Declaration(
                DeclarationError::Flag { reason, .. }
                | DeclarationError::Arg { reason, .. }
                | DeclarationError::RestArgs { reason, .. },
            )
            | Error::ParseFlag { reason, .. }
            | Error::ParseArg { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// The underlying [`ValueError`], for decoding failures
    #[must_use]
    pub fn value_error(&self) -> Option<&ValueError> {
        match self {
            Error::FlagValue { source, .. }
            | Error::ArgValue { source, .. }
            | Error::RestValue { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_messages() {
        let err = DeclarationError::Flag {
            tags: Tags::new(Some('a'), Some("all")),
            reason: Reason::Duplicate,
        };
        assert_eq!(err.to_string(), "flag error: 'a' 'all': duplicate");

        let err = DeclarationError::Flag {
            tags: None,
            reason: Reason::MissingName,
        };
        assert_eq!(err.to_string(), "flag error: missing name");
    }

    #[test]
    fn arg_messages() {
        let err = DeclarationError::Arg {
            name: String::new(),
            reason: Reason::MissingName,
        };
        assert_eq!(err.to_string(), "arg error: missing name");

        let err = Error::from(DeclarationError::RestArgs {
            name: "files".to_owned(),
            reason: Reason::Duplicate,
        });
        assert_eq!(err.to_string(), "rest args error: 'files': duplicate");
        assert_eq!(err.reason(), Some(Reason::Duplicate));
    }

    #[test]
    fn parse_messages() {
        let err = Error::ParseFlag {
            name: "-test".to_owned(),
            reason: Reason::Syntax,
        };
        assert_eq!(err.to_string(), "parse flag error: '-test': invalid syntax");

        let err = Error::ParseArg {
            arg: "extra".to_owned(),
            reason: Reason::Unknown,
        };
        assert_eq!(err.to_string(), "parse arg error: 'extra': unknown");
        assert!(err.value_error().is_none());
    }
}
