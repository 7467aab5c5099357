/*!
The parse engine. A [`Parser`] owns the current declaration scope and drives
the token stream through classification, flag matching, value binding, and
positional binding, then checks that every required element was provided.
*/

use std::{borrow::Cow, fmt::Display};

use argot_parser::{Token, Tokens};
use bitflags::bitflags;
use lazy_format::lazy_format;
use tracing::{debug, trace};

use crate::{
    binder,
    declare::{Arg, Flag, RestArgs},
    errors::{CommandError, DeclarationError, Error, Reason},
    matcher::{self, Resolution, Unknown},
    registry::Scope,
};

bitflags! {
    /// Switches that change how tokens are interpreted
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Options: u8 {
        /// Single-dash tokens are long flags too (`-name`), falling back to a
        /// short flag lookup for one-character names.
        const UNIVERSAL = 1 << 0;

        /// Record unknown flags in [`Parser::unknown`] instead of failing.
        const IGNORE_UNKNOWN_FLAGS = 1 << 1;

        /// Skip positional tokens that have nowhere to go instead of failing.
        const IGNORE_UNKNOWN_ARGS = 1 << 2;

        /// Don't bundle short flags; `-abc` must name a single flag.
        const DISABLE_POSIX_STYLE = 1 << 3;

        /// Don't split `-ovalue` into `-o` and `value`.
        const DISABLE_INLINE_VALUE = 1 << 4;
    }
}

/**
Anything that flags, args, and rest args can be registered on. Each method
validates the declaration and returns the problem, if any; a [`Parser`]
also remembers the first problem of each kind and reports it from
[`parse`][Parser::parse].
*/
pub trait Register {
    fn register_flag(&mut self, flag: Flag) -> Result<(), DeclarationError>;
    fn register_arg(&mut self, arg: Arg) -> Result<(), DeclarationError>;
    fn register_rest_args(&mut self, rest: RestArgs) -> Result<(), DeclarationError>;
}

/**
Supplies subcommands to a parse. Before the first positional token, each data
token is offered to [`is_command`][Commander::is_command]; if it's a command,
the parser discards every declaration made so far and calls
[`set_command`][Commander::set_command] to register the command's own.
*/
pub trait Commander {
    /// Must not have side effects.
    fn is_command(&self, name: &str) -> bool;

    /// Install the declarations for the command `name`. Only called after
    /// `is_command` returned true for the same name. An error here ends the
    /// parse with [`Error::Command`].
    fn set_command(&mut self, name: &str, registry: &mut dyn Register)
    -> Result<(), CommandError>;
}

#[derive(Debug, Default)]
pub struct Parser {
    options: Options,
    scope: Scope,
    unknown: Vec<String>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> Options {
        self.options
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    /// The flags in the current scope, in registration order
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.scope.flags.iter().map(|flag| &flag.decl)
    }

    /// The positional args in the current scope, in binding order
    pub fn args(&self) -> impl Iterator<Item = &Arg> {
        self.scope.args.iter().map(|arg| &arg.decl)
    }

    pub fn rest(&self) -> Option<&RestArgs> {
        self.scope.rest.as_ref()
    }

    /// Flags skipped by the most recent parse because of
    /// [`IGNORE_UNKNOWN_FLAGS`][Options::IGNORE_UNKNOWN_FLAGS], rendered the
    /// way they'd be written.
    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }

    /// Render a long flag name: `--name`, or `-name` in universal mode.
    /// Renders nothing for an empty name.
    pub fn format_long_flag<'a>(&self, long: &'a str) -> impl Display + 'a {
        let universal = self.options.contains(Options::UNIVERSAL);

        lazy_format!(match ((long, universal)) {
            ("", _) => "",
            (long, true) => "-{long}",
            (long, false) => "--{long}",
        })
    }

    /// Render a short flag name: `-s`.
    pub fn format_short_flag(&self, short: char) -> impl Display {
        lazy_format!("-{short}")
    }

    /**
    Parse `tokens` (excluding the program name) against the current
    declarations, offering data tokens to `commander` if one is given.

    Fails immediately if a registration failed. Otherwise the parse stops at
    the first problem, and values bound before it remain bound.
    */
    pub fn parse<S: AsRef<str>>(
        &mut self,
        mut commander: Option<&mut dyn Commander>,
        tokens: &[S],
    ) -> Result<(), Error> {
        self.check_declarations()?;
        self.unknown.clear();

        let mut tokens = Tokens::new(tokens.iter().map(|token| token.as_ref()));

        // Commands are only recognized until the first positional token. The
        // cursor is never reset, even by a command.
        let mut positional = false;
        let mut cursor = 0;

        while let Some(token) = tokens.next_token() {
            trace!(?token, "classified token");

            match token {
                Token::Data(data) => {
                    if !positional
                        && let Some(commander) = commander.as_deref_mut()
                        && commander.is_command(data)
                    {
                        self.enter_command(commander, data)?;
                        continue;
                    }

                    positional = true;
                    self.bind_positional(cursor, data)?;
                    cursor += 1;
                }
                Token::Malformed(body) => {
                    return Err(Error::ParseFlag {
                        name: body.to_owned(),
                        reason: Reason::Syntax,
                    });
                }
                Token::Flag(flag) => {
                    for resolution in matcher::resolve(flag, self.options, &self.scope.flags) {
                        match resolution {
                            Resolution::Matched {
                                idx,
                                value,
                                can_borrow,
                            } => self.bind_flag(idx, value, can_borrow, &mut tokens)?,
                            Resolution::Unknown(unknown) => self.unknown_flag(unknown)?,
                        }
                    }
                }
            }
        }

        self.check_required()
    }

    fn check_declarations(&self) -> Result<(), Error> {
        match self.scope.sticky_error() {
            Some(err) => Err(err.clone().into()),
            None => Ok(()),
        }
    }

    fn enter_command(&mut self, commander: &mut dyn Commander, name: &str) -> Result<(), Error> {
        debug!(command = name, "entering command");

        self.scope = Scope::default();
        commander.set_command(name, self).map_err(Error::Command)?;

        // The command's own declarations may have failed
        self.check_declarations()
    }

    fn bind_positional(&mut self, cursor: usize, data: &str) -> Result<(), Error> {
        if let Some(arg) = self.scope.args.nth_mut(cursor) {
            trace!(arg = %arg.decl.name, value = data, "binding arg");

            arg.decl
                .value
                .set(data)
                .map_err(|source| Error::ArgValue {
                    name: arg.decl.name.clone(),
                    source,
                })?;

            arg.satisfied = true;
        } else if let Some(rest) = &mut self.scope.rest {
            trace!(rest = %rest.name, value = data, "binding rest arg");

            rest.value.set(data).map_err(|source| Error::RestValue {
                name: rest.name.clone(),
                source,
            })?;
        } else if self.options.contains(Options::IGNORE_UNKNOWN_ARGS) {
            debug!(arg = data, "ignoring unknown arg");
        } else {
            return Err(Error::ParseArg {
                arg: data.to_owned(),
                reason: Reason::Unknown,
            });
        }

        Ok(())
    }

    fn bind_flag<'arg, I>(
        &mut self,
        idx: usize,
        value: Option<Cow<'arg, str>>,
        can_borrow: bool,
        tokens: &mut Tokens<'arg, I>,
    ) -> Result<(), Error>
    where
        I: Iterator<Item = &'arg str>,
    {
        let flag = self.scope.flags.get_mut(idx);

        let value = match value {
            Some(value) => Some(value),
            None if can_borrow => tokens
                .take_if(|next| binder::should_borrow(&*flag.decl.value, next))
                .map(Cow::Borrowed),
            None => None,
        };

        let raw = binder::resolve(&*flag.decl.value, value);
        trace!(flag = ?flag.decl.tags(), value = %raw, "binding flag");

        flag.decl.value.set(&raw).map_err(|source| Error::FlagValue {
            flag: flag.decl.tags(),
            source,
        })?;

        flag.satisfied = true;
        Ok(())
    }

    fn unknown_flag(&mut self, unknown: Unknown<'_>) -> Result<(), Error> {
        if !self.options.contains(Options::IGNORE_UNKNOWN_FLAGS) {
            return Err(Error::ParseFlag {
                name: match unknown {
                    Unknown::Short(short) => short.to_string(),
                    Unknown::Long(name) | Unknown::Bundle(name) => name.to_owned(),
                },
                reason: Reason::Unknown,
            });
        }

        let rendered = match unknown {
            Unknown::Short(short) => self.format_short_flag(short).to_string(),
            Unknown::Long(name) => self.format_long_flag(name).to_string(),
            Unknown::Bundle(name) => format!("-{name}"),
        };

        debug!(flag = %rendered, "ignoring unknown flag");
        self.unknown.push(rendered);
        Ok(())
    }

    /// Flags first, then args, each in registration order
    fn check_required(&self) -> Result<(), Error> {
        if let Some(flag) = self
            .scope
            .flags
            .iter()
            .find(|flag| flag.decl.required && !flag.satisfied)
        {
            return Err(DeclarationError::Flag {
                tags: flag.decl.tags(),
                reason: Reason::NotProvided,
            }
            .into());
        }

        if let Some(arg) = self
            .scope
            .args
            .iter()
            .find(|arg| arg.decl.required && !arg.satisfied)
        {
            return Err(DeclarationError::Arg {
                name: arg.decl.name.clone(),
                reason: Reason::NotProvided,
            }
            .into());
        }

        Ok(())
    }
}

impl Register for Parser {
    fn register_flag(&mut self, flag: Flag) -> Result<(), DeclarationError> {
        self.scope.add_flag(flag)
    }

    fn register_arg(&mut self, arg: Arg) -> Result<(), DeclarationError> {
        self.scope.add_arg(arg)
    }

    fn register_rest_args(&mut self, rest: RestArgs) -> Result<(), DeclarationError> {
        self.scope.set_rest(rest)
    }
}
