/*!
Usage messages, rendered from whatever a [`Parser`] currently has declared.
After a command transition, that's the command's own flags and args.

```text
Synopsis:
  tool [OPTIONS] --jobs <u32> <input> [extra...]

Arguments:
  <input>
          File to read
  [extra...]

Options:
  -v, --verbose
          Print more
  -q      Quiet
      --jobs <u32>
          Parallel jobs
```
*/

use std::{
    fmt::Display,
    io::{self, Write as _},
};

use indent_write::io::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::{
    declare::{Arg, Flag, RestArgs},
    parser::Parser,
    value::{Value, is_bool_like},
};

/// Descriptions are wrapped to fit in this many columns, indentation
/// included.
const WIDTH: usize = 80;

/// Indentation of a description under its item
const DESCRIPTION_INDENT: &str = "        ";

/// Indentation of a section body under its header
const SECTION_INDENT: &str = "  ";

/// `<type>`, or `{a|b|c}` for values with a fixed set of choices
fn placeholder(value: &dyn Value) -> impl Display + '_ {
    let type_name = value.type_name();

    lazy_format!(match (value.choices()) {
        Some(choices) => ("{{{}}}", choices.iter().join_with("|")),
        None => "<{type_name}>",
    })
}

/// The placeholder for a flag's value, unless it's a boolean flag
fn flag_argument(flag: &Flag) -> Option<impl Display + '_> {
    match is_bool_like(&*flag.value) {
        true => None,
        false => Some(placeholder(&*flag.value)),
    }
}

fn option_item<'a>(parser: &'a Parser, flag: &'a Flag) -> impl Display + 'a {
    let short = flag.short.map(|short| parser.format_short_flag(short));
    let long = flag.long.as_deref().map(|long| parser.format_long_flag(long));

    let tags = lazy_format!(match ((&short, &long)) {
        (Some(short), Some(long)) => "{short}, {long}",
        (Some(short), None) => "{short}",
        (None, Some(long)) => "    {long}",
        (None, None) => "",
    });

    let argument = flag_argument(flag);

    lazy_format!(match (&argument) {
        None => "{tags}",
        Some(argument) => "{tags} {argument}",
    })
}

/// Required flags appear in the synopsis by their long name, if they have one
fn option_synopsis<'a>(parser: &'a Parser, flag: &'a Flag) -> impl Display + 'a {
    let long = flag.long.as_deref().map(|long| parser.format_long_flag(long));
    let short = flag.short.map(|short| parser.format_short_flag(short));

    let tag = lazy_format!(match ((&long, &short)) {
        (Some(long), _) => "{long}",
        (None, Some(short)) => "{short}",
        (None, None) => "",
    });

    let argument = flag_argument(flag);

    lazy_format!(match (&argument) {
        None => "{tag}",
        Some(argument) => "{tag} {argument}",
    })
}

fn arg_item(arg: &Arg) -> impl Display + '_ {
    let name = arg.name.as_str();

    lazy_format!(match (arg.required) {
        true => "<{name}>",
        false => "[{name}]",
    })
}

fn rest_item(rest: &RestArgs) -> impl Display + '_ {
    lazy_format!("[{}...]", rest.name)
}

/**
Write a usage message for the parser's current declarations. `program` is
shown at the start of the synopsis; include any command names in it.
*/
pub fn write_usage(out: &mut impl io::Write, program: &str, parser: &Parser) -> io::Result<()> {
    section(out, "Synopsis", |mut out| {
        write!(out, "{program}")?;

        if parser.flags().any(|flag| !flag.required) {
            write!(out, " [OPTIONS]")?;
        }

        parser
            .flags()
            .filter(|flag| flag.required)
            .try_for_each(|flag| write!(out, " {}", option_synopsis(parser, flag)))?;

        parser
            .args()
            .try_for_each(|arg| write!(out, " {}", arg_item(arg)))?;

        if let Some(rest) = parser.rest() {
            write!(out, " {}", rest_item(rest))?;
        }

        writeln!(out)
    })?;

    let arguments = parser
        .args()
        .map(|arg| (arg_item(arg).to_string(), arg.usage.as_str()))
        .chain(
            parser
                .rest()
                .map(|rest| (rest_item(rest).to_string(), rest.usage.as_str())),
        );

    maybe_section(out, "Arguments", arguments, |out, (item, usage)| {
        describe(out, item, usage)
    })?;

    maybe_section(out, "Options", parser.flags(), |out, flag| {
        describe(out, option_item(parser, flag), &flag.usage)
    })
}

/// Write the `header`, then an indented `body`.
fn section<O: io::Write + ?Sized, T>(
    out: &mut O,
    header: &str,
    body: impl FnOnce(IndentWriter<&mut O>) -> io::Result<T>,
) -> io::Result<T> {
    writeln!(out, "{header}:")?;
    body(IndentWriter::new(SECTION_INDENT, out))
}

/// Write a section, preceded by a blank line, only if the iterator is not
/// empty.
fn maybe_section<O: io::Write + ?Sized, I: IntoIterator>(
    out: &mut O,
    header: &str,
    items: I,
    body: impl Fn(&mut IndentWriter<&mut O>, I::Item) -> io::Result<()>,
) -> io::Result<()> {
    let mut items = items.into_iter();

    match items.next() {
        None => Ok(()),
        Some(first) => {
            writeln!(out)?;
            section(out, header, |mut out| {
                body(&mut out, first)?;
                items.try_for_each(|item| body(&mut out, item))
            })
        }
    }
}

/// Describe an item by printing the item, followed by the indented
/// description. If the item is short enough and the description is a single
/// line, the whole thing is printed on one line instead.
fn describe(
    out: &mut (impl io::Write + ?Sized),
    item: impl Display,
    description: &str,
) -> io::Result<()> {
    /// Counts the bytes that flow through it, to see how much room the item
    /// left on its line
    struct IoByteCounter<'a, T: io::Write + ?Sized> {
        inner: &'a mut T,
        count: &'a mut usize,
    }

    impl<T: io::Write + ?Sized> io::Write for IoByteCounter<'_, T> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = self.inner.write(buf)?;
            *self.count += n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }
    }

    let mut count = 0;

    {
        let mut out = IoByteCounter {
            inner: &mut *out,
            count: &mut count,
        };
        write!(out, "{item}")?;
    }

    let width = WIDTH - SECTION_INDENT.len() - DESCRIPTION_INDENT.len();
    let description = textwrap::fill(description, width);

    if description.is_empty() {
        writeln!(out)
    } else if let Some(space) = DESCRIPTION_INDENT.len().checked_sub(count)
        && space >= 2
        && !description.contains('\n')
    {
        (0..space).try_for_each(|_| out.write_all(b" "))?;
        writeln!(out, "{description}")
    } else {
        let mut out = IndentWriter::new(DESCRIPTION_INDENT, out);
        writeln!(out, "\n{description}")
    }
}
