/*!
The declaration registry: the flags, args, and rest catch-all that make up a
single parse scope, plus the first registration error of each kind.
*/

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    declare::{Arg, Flag, RestArgs},
    errors::{DeclarationError, Reason},
};

/// A declaration, along with whether a token has been bound to it in the
/// current parse.
#[derive(Debug)]
pub struct Declared<T> {
    pub decl: T,
    pub satisfied: bool,
}

impl<T> Declared<T> {
    fn new(decl: T) -> Self {
        Self {
            decl,
            satisfied: false,
        }
    }
}

/// Characters that may never start a name
fn forbidden_first(c: char) -> bool {
    matches!(c, '-' | '=' | ' ' | ',')
}

/// Characters that may never appear anywhere in a name
fn forbidden(c: char) -> bool {
    matches!(c, '=' | ' ' | ',')
}

/// Shared by long flags, args, and rest args.
pub fn valid_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        None => false,
        Some(first) => !forbidden_first(first) && !chars.any(forbidden),
    }
}

pub fn valid_short(short: char) -> bool {
    !forbidden_first(short)
}

#[derive(Debug, Default)]
pub struct Flags {
    data: Vec<Declared<Flag>>,
    long: HashMap<String, usize>,
    short: HashMap<char, usize>,
}

impl Flags {
    pub fn get_long(&self, name: &str) -> Option<usize> {
        self.long.get(name).copied()
    }

    pub fn get_short(&self, name: char) -> Option<usize> {
        self.short.get(&name).copied()
    }

    /// Find a flag that collides with either name, checking the long name
    /// first.
    fn find(&self, long: Option<&str>, short: Option<char>) -> Option<&Flag> {
        long.and_then(|long| self.get_long(long))
            .or_else(|| short.and_then(|short| self.get_short(short)))
            .map(|idx| &self.data[idx].decl)
    }

    fn add(&mut self, flag: Flag) {
        let idx = self.data.len();

        if let Some(ref long) = flag.long {
            self.long.insert(long.clone(), idx);
        }

        if let Some(short) = flag.short {
            self.short.insert(short, idx);
        }

        self.data.push(Declared::new(flag));
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut Declared<Flag> {
        &mut self.data[idx]
    }

    pub fn get(&self, idx: usize) -> &Declared<Flag> {
        &self.data[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declared<Flag>> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// Positional args, in registration order
#[derive(Debug, Default)]
pub struct Args {
    data: IndexMap<String, Declared<Arg>>,
}

impl Args {
    pub fn nth_mut(&mut self, idx: usize) -> Option<&mut Declared<Arg>> {
        self.data.get_index_mut(idx).map(|(_, arg)| arg)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declared<Arg>> {
        self.data.values()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/**
One complete declaration set. A command transition replaces the whole scope,
so nothing registered before the command survives it.
*/
#[derive(Debug, Default)]
pub struct Scope {
    pub flags: Flags,
    pub args: Args,
    pub rest: Option<RestArgs>,
    last_arg_optional: bool,

    flag_error: Option<DeclarationError>,
    arg_error: Option<DeclarationError>,
    rest_error: Option<DeclarationError>,
}

/// Remember `result`'s error, unless an earlier one is already remembered.
fn capture(
    sticky: &mut Option<DeclarationError>,
    result: Result<(), DeclarationError>,
) -> Result<(), DeclarationError> {
    if let Err(ref err) = result
        && sticky.is_none()
    {
        debug!(%err, "captured declaration error");
        *sticky = Some(err.clone());
    }

    result
}

impl Scope {
    /// The first registration error, checking flags, then args, then rest.
    pub fn sticky_error(&self) -> Option<&DeclarationError> {
        self.flag_error
            .as_ref()
            .or(self.arg_error.as_ref())
            .or(self.rest_error.as_ref())
    }

    pub fn add_flag(&mut self, flag: Flag) -> Result<(), DeclarationError> {
        let result = self.try_add_flag(flag);
        capture(&mut self.flag_error, result)
    }

    pub fn add_arg(&mut self, arg: Arg) -> Result<(), DeclarationError> {
        let result = self.try_add_arg(arg);
        capture(&mut self.arg_error, result)
    }

    pub fn set_rest(&mut self, rest: RestArgs) -> Result<(), DeclarationError> {
        let result = self.try_set_rest(rest);
        capture(&mut self.rest_error, result)
    }

    fn try_add_flag(&mut self, flag: Flag) -> Result<(), DeclarationError> {
        let error = |tags, reason| DeclarationError::Flag { tags, reason };

        if flag.short.is_none() && flag.long.is_none() {
            return Err(error(None, Reason::MissingName));
        }

        let short_ok = flag.short.is_none_or(valid_short);
        let long_ok = flag.long.as_deref().is_none_or(valid_name);

        if !(short_ok && long_ok) {
            return Err(error(flag.tags(), Reason::InvalidName));
        }

        if let Some(existing) = self.flags.find(flag.long.as_deref(), flag.short) {
            return Err(error(existing.tags(), Reason::Duplicate));
        }

        self.flags.add(flag);
        Ok(())
    }

    fn try_add_arg(&mut self, arg: Arg) -> Result<(), DeclarationError> {
        let error = |name: &str, reason| DeclarationError::Arg {
            name: name.to_owned(),
            reason,
        };

        if arg.required && self.last_arg_optional {
            return Err(error(&arg.name, Reason::RequiredAfterOptional));
        }

        if self.rest.is_some() {
            return Err(error(&arg.name, Reason::ArgAfterRest));
        }

        if arg.name.is_empty() {
            return Err(error("", Reason::MissingName));
        }

        if !valid_name(&arg.name) {
            return Err(error(&arg.name, Reason::InvalidName));
        }

        if self.args.data.contains_key(&arg.name) {
            return Err(error(&arg.name, Reason::Duplicate));
        }

        self.last_arg_optional |= !arg.required;
        self.args.data.insert(arg.name.clone(), Declared::new(arg));
        Ok(())
    }

    fn try_set_rest(&mut self, rest: RestArgs) -> Result<(), DeclarationError> {
        let error = |name: &str, reason| DeclarationError::RestArgs {
            name: name.to_owned(),
            reason,
        };

        if rest.name.is_empty() {
            return Err(error("", Reason::MissingName));
        }

        if !valid_name(&rest.name) {
            return Err(error(&rest.name, Reason::InvalidName));
        }

        if self.rest.is_some() {
            return Err(error(&rest.name, Reason::Duplicate));
        }

        self.rest = Some(rest);
        Ok(())
    }
}
