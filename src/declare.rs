/*!
Declared flags, positional arguments, and rest catch-alls, along with
builders that register them. The builders don't return registration errors;
the parser remembers the first one of each kind and reports it from
[`parse`][crate::Parser::parse], so a whole block of declarations can be
written without checking each call.
*/

use std::fmt::{self, Debug};

use crate::{
    Tags,
    errors::DeclarationError,
    parser::Register,
    value::{Decode, Slot, SlotVec, Value},
};

/// A flag, identified by a short name, a long name, or both.
pub struct Flag {
    pub short: Option<char>,
    pub long: Option<String>,
    pub value: Box<dyn Value>,
    pub usage: String,
    pub required: bool,
}

impl Flag {
    #[must_use]
    pub fn tags(&self) -> Option<Tags> {
        Tags::new(self.short, self.long.as_deref())
    }
}

impl Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("value", &self.value.type_name())
            .field("usage", &self.usage)
            .field("required", &self.required)
            .finish()
    }
}

/// A positional argument. Args bind in registration order.
pub struct Arg {
    pub name: String,
    pub value: Box<dyn Value>,
    pub usage: String,
    pub required: bool,
}

impl Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arg")
            .field("name", &self.name)
            .field("value", &self.value.type_name())
            .field("usage", &self.usage)
            .field("required", &self.required)
            .finish()
    }
}

/// Catch-all for positional tokens beyond the declared [`Arg`]s
pub struct RestArgs {
    pub name: String,
    pub value: Box<dyn Value>,
    pub usage: String,
}

impl Debug for RestArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestArgs")
            .field("name", &self.name)
            .field("value", &self.value.type_name())
            .field("usage", &self.usage)
            .finish()
    }
}

/**
Builder for a [`Flag`]. `FlagBuilder::new("v")` declares the short flag
`-v`; any longer name is a long flag. Add the other form with
[`short`][Self::short] or [`long`][Self::long].

```
use argot::{FlagBuilder, Parser};

let mut parser = Parser::new();
let verbose = FlagBuilder::new("verbose").short('v').bind::<bool>(&mut parser);
let jobs = FlagBuilder::new("j").usage("parallel jobs").bind::<u32>(&mut parser);

parser.parse(None, &["-vj", "4"]).unwrap();
assert!(verbose.get());
assert_eq!(jobs.get(), 4);
```
*/
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct FlagBuilder {
    short: Option<char>,
    long: Option<String>,
    usage: String,
    required: bool,
}

impl FlagBuilder {
    pub fn new(name: &str) -> Self {
        let mut chars = name.chars();

        match (chars.next(), chars.next()) {
            (None, _) => Self::default(),
            (Some(short), None) => Self {
                short: Some(short),
                ..Self::default()
            },
            (Some(_), Some(_)) => Self {
                long: Some(name.to_owned()),
                ..Self::default()
            },
        }
    }

    pub fn short(self, short: char) -> Self {
        Self {
            short: Some(short),
            ..self
        }
    }

    pub fn long(self, long: impl Into<String>) -> Self {
        Self {
            long: Some(long.into()),
            ..self
        }
    }

    pub fn usage(self, usage: impl Into<String>) -> Self {
        Self {
            usage: usage.into(),
            ..self
        }
    }

    pub fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub fn build(self, value: impl Value + 'static) -> Flag {
        Flag {
            short: self.short,
            long: self.long,
            value: Box::new(value),
            usage: self.usage,
            required: self.required,
        }
    }

    /// Register the flag with a custom [`Value`].
    pub fn register(
        self,
        registry: &mut (impl Register + ?Sized),
        value: impl Value + 'static,
    ) -> Result<(), DeclarationError> {
        registry.register_flag(self.build(value))
    }

    /// Register the flag, returning the [`Slot`] it binds to. The slot starts
    /// out holding `T::default()`.
    pub fn bind<T>(self, registry: &mut (impl Register + ?Sized)) -> Slot<T>
    where
        T: Decode + Default + 'static,
    {
        self.bind_with(registry, T::default())
    }

    /// Register the flag, returning a [`Slot`] that starts out holding
    /// `initial`.
    pub fn bind_with<T>(self, registry: &mut (impl Register + ?Sized), initial: T) -> Slot<T>
    where
        T: Decode + 'static,
    {
        let slot = Slot::new(initial);
        let _ = self.register(registry, slot.clone());
        slot
    }
}

/// Builder for a positional [`Arg`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ArgBuilder {
    name: String,
    usage: String,
    required: bool,
}

impl ArgBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn usage(self, usage: impl Into<String>) -> Self {
        Self {
            usage: usage.into(),
            ..self
        }
    }

    pub fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub fn build(self, value: impl Value + 'static) -> Arg {
        Arg {
            name: self.name,
            value: Box::new(value),
            usage: self.usage,
            required: self.required,
        }
    }

    pub fn register(
        self,
        registry: &mut (impl Register + ?Sized),
        value: impl Value + 'static,
    ) -> Result<(), DeclarationError> {
        registry.register_arg(self.build(value))
    }

    pub fn bind<T>(self, registry: &mut (impl Register + ?Sized)) -> Slot<T>
    where
        T: Decode + Default + 'static,
    {
        let slot = Slot::<T>::default();
        let _ = self.register(registry, slot.clone());
        slot
    }
}

/// Builder for [`RestArgs`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct RestBuilder {
    name: String,
    usage: String,
}

impl RestBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: String::new(),
        }
    }

    pub fn usage(self, usage: impl Into<String>) -> Self {
        Self {
            usage: usage.into(),
            ..self
        }
    }

    pub fn build(self, value: impl Value + 'static) -> RestArgs {
        RestArgs {
            name: self.name,
            value: Box::new(value),
            usage: self.usage,
        }
    }

    pub fn register(
        self,
        registry: &mut (impl Register + ?Sized),
        value: impl Value + 'static,
    ) -> Result<(), DeclarationError> {
        registry.register_rest_args(self.build(value))
    }

    /// Register the catch-all, returning the [`SlotVec`] that collects every
    /// extra positional token.
    pub fn bind<T>(self, registry: &mut (impl Register + ?Sized)) -> SlotVec<T>
    where
        T: Decode + 'static,
    {
        let slot = SlotVec::new();
        let _ = self.register(registry, slot.clone());
        slot
    }
}
