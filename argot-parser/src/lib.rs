#![no_std]

/*!
Low-level classification of command-line tokens. Takes care of telling flags
apart from data, splitting `--flag=value` forms, and honoring the `--`
terminator. No flag lookup or value handling happens here; usually this is
too low level to use directly.

[argot-parser][crate] operates entirely on borrowed data. The ubiquitous
`'arg` lifetime refers to the borrowed command line.
*/

mod cluster;
pub mod literal;

use core::iter::Peekable;

pub use cluster::PopulatedStr;

/// How many dashes a flag token was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dashes {
    Single,
    Double,
}

impl Dashes {
    #[inline]
    #[must_use]
    pub fn count(self) -> usize {
        match self {
            Dashes::Single => 1,
            Dashes::Double => 2,
        }
    }
}

/**
A token that will be treated as one or more flags: its dashes are stripped
and a `=value` suffix, if present, is split off. Given `--path=out.txt`, the
name is `path` and the value is `out.txt`; given `-abc`, the name is `abc`
and there is no value.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagToken<'arg> {
    pub dashes: Dashes,
    pub name: &'arg str,
    pub value: Option<&'arg str>,
}

impl<'arg> FlagToken<'arg> {
    /**
    Build a flag token from the text after its dashes. Fails, returning the
    body itself, if the body is empty or starts with a character no flag name
    can start with (`-`, `=`, a space, or a comma).
    */
    pub fn parse(dashes: Dashes, body: &'arg str) -> Result<Self, &'arg str> {
        match body.as_bytes().first() {
            None | Some(b'-' | b'=' | b' ' | b',') => Err(body),
            Some(_) => Ok(match split_once(body, b'=') {
                Some((name, value)) => Self {
                    dashes,
                    name,
                    value: Some(value),
                },
                None => Self {
                    dashes,
                    name: body,
                    value: None,
                },
            }),
        }
    }
}

/// A single classified command-line token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'arg> {
    /// A command name, positional value, or rest value, depending on what the
    /// caller is expecting.
    Data(&'arg str),

    /// One or more flags.
    Flag(FlagToken<'arg>),

    /// A dashed token whose body can't be a flag name, such as `---x` or
    /// `-=x`. Holds the text after the dashes.
    Malformed(&'arg str),
}

/**
True if `token` is data even though flags haven't been terminated: it's empty,
doesn't start with a dash, is exactly `-`, or is a number or duration literal
like `-5` or `-1.5s`.
*/
#[must_use]
pub fn is_data(token: &str) -> bool {
    token.is_empty()
        || !token.starts_with('-')
        || token == "-"
        || literal::is_number(token)
        || literal::is_duration(token)
}

/**
A `Tokens` is the main entry point into `argot_parser`. Each call to
[`next_token`][Tokens::next_token] classifies the next raw argument. The
first bare `--` is swallowed, and every argument after it is data.

Flags that take values can look at the following raw argument with
[`peek`][Tokens::peek] and consume it with [`take_if`][Tokens::take_if]; the
decision of whether to do so belongs to the caller, since only it knows
what kind of value a flag expects.
*/
#[derive(Debug, Clone)]
pub struct Tokens<'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    args: Peekable<I>,
    terminated: bool,
}

impl<'arg, I> Tokens<'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    /// Create a new [`Tokens`] from the command line, *excluding* the program
    /// name.
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            args: args.into_iter().peekable(),
            terminated: false,
        }
    }

    /// True once a bare `--` has been seen.
    #[inline]
    #[must_use]
    pub fn terminated(&self) -> bool {
        self.terminated
    }

    pub fn next_token(&mut self) -> Option<Token<'arg>> {
        loop {
            let arg = self.args.next()?;

            if self.terminated || is_data(arg) {
                return Some(Token::Data(arg));
            }

            let (dashes, body) = match arg.strip_prefix("--") {
                Some("") => {
                    self.terminated = true;
                    continue;
                }
                Some(body) => (Dashes::Double, body),
                None => (Dashes::Single, &arg[1..]),
            };

            return Some(match FlagToken::parse(dashes, body) {
                Ok(flag) => Token::Flag(flag),
                Err(body) => Token::Malformed(body),
            });
        }
    }

    /// Look at the next raw argument without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Option<&'arg str> {
        self.args.peek().copied()
    }

    /// Consume the next raw argument as a flag value, if `accept` approves of
    /// it.
    #[inline]
    pub fn take_if(&mut self, accept: impl FnOnce(&'arg str) -> bool) -> Option<&'arg str> {
        self.args.next_if(|&arg| accept(arg))
    }
}

fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    // `delimiter` is ASCII, so both halves are on char boundaries
    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens<'a>(args: &'a [&'a str]) -> Tokens<'a, impl Iterator<Item = &'a str>> {
        Tokens::new(args.iter().copied())
    }

    fn flag<'a>(dashes: Dashes, name: &'a str, value: Option<&'a str>) -> Token<'a> {
        Token::Flag(FlagToken {
            dashes,
            name,
            value,
        })
    }

    #[test]
    fn data() {
        for s in ["", "-", "file", "-5", "-0x1F", "-1.5", "-1.5h", "-0"] {
            assert!(is_data(s), "{s}");
        }

        for s in ["-t", "--test", "--", "-abc", "--5"] {
            assert!(!is_data(s), "{s}");
        }
    }

    #[test]
    fn flags() {
        let args = [
            "-a",
            "--long",
            "--path=out.txt",
            "-abc=x=y",
            "--empty=",
            "plain",
        ];
        let mut tokens = tokens(&args);

        assert_eq!(tokens.next_token(), Some(flag(Dashes::Single, "a", None)));
        assert_eq!(tokens.next_token(), Some(flag(Dashes::Double, "long", None)));
        assert_eq!(
            tokens.next_token(),
            Some(flag(Dashes::Double, "path", Some("out.txt")))
        );
        assert_eq!(
            tokens.next_token(),
            Some(flag(Dashes::Single, "abc", Some("x=y")))
        );
        assert_eq!(
            tokens.next_token(),
            Some(flag(Dashes::Double, "empty", Some("")))
        );
        assert_eq!(tokens.next_token(), Some(Token::Data("plain")));
        assert_eq!(tokens.next_token(), None);
    }

    #[test]
    fn malformed() {
        let args = ["---test", "--=val", "-- val", "-,x", "-=5"];
        let mut tokens = tokens(&args);

        assert_eq!(tokens.next_token(), Some(Token::Malformed("-test")));
        assert_eq!(tokens.next_token(), Some(Token::Malformed("=val")));
        assert_eq!(tokens.next_token(), Some(Token::Malformed(" val")));
        assert_eq!(tokens.next_token(), Some(Token::Malformed(",x")));
        assert_eq!(tokens.next_token(), Some(Token::Malformed("=5")));
    }

    #[test]
    fn terminator() {
        let args = ["-a", "--", "-b", "--", "--c=d"];
        let mut tokens = tokens(&args);

        assert_eq!(tokens.next_token(), Some(flag(Dashes::Single, "a", None)));
        assert!(!tokens.terminated());
        assert_eq!(tokens.next_token(), Some(Token::Data("-b")));
        assert!(tokens.terminated());
        assert_eq!(tokens.next_token(), Some(Token::Data("--")));
        assert_eq!(tokens.next_token(), Some(Token::Data("--c=d")));
        assert_eq!(tokens.next_token(), None);
    }

    #[test]
    fn lookahead() {
        let args = ["--name", "value", "--other"];
        let mut tokens = tokens(&args);

        assert_eq!(tokens.next_token(), Some(flag(Dashes::Double, "name", None)));
        assert_eq!(tokens.peek(), Some("value"));
        assert_eq!(tokens.take_if(|arg| arg.starts_with('-')), None);
        assert_eq!(tokens.take_if(is_data), Some("value"));
        assert_eq!(tokens.take_if(is_data), None);
        assert_eq!(
            tokens.next_token(),
            Some(flag(Dashes::Double, "other", None))
        );
        assert_eq!(tokens.peek(), None);
    }
}
