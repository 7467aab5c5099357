use std::time::Duration;

use argot::{
    ArgBuilder, Error, FlagBuilder, Parser, Reason,
    value::{Decode, ValueErrorKind},
};

/// Parse `args` with a single flag, `-x` / `--name`, of type `T`.
fn single<T>(args: &[&str]) -> Result<T, Error>
where
    T: Decode + Default + Clone + 'static,
{
    let mut parser = Parser::new();
    let slot = FlagBuilder::new("name").short('x').bind::<T>(&mut parser);
    parser.parse(None, args)?;
    Ok(slot.get())
}

fn value_kind<T>(args: &[&str]) -> Option<ValueErrorKind>
where
    T: Decode + Default + Clone + std::fmt::Debug + 'static,
{
    let err = single::<T>(args).unwrap_err();
    err.value_error().map(|err| err.kind)
}

#[test]
fn bool_flag() {
    let cases: &[(&[&str], bool)] = &[
        (&[], false),
        (&["-x"], true),
        (&["--name"], true),
        (&["-x=false"], false),
        (&["--name=0"], false),
        (&["--name=yes"], true),
        (&["-x", "false"], false),
        (&["-x", "off"], false),
        (&["--name", "T"], true),
        (&["--name="], false),
        (&["-x", "-x=no"], false),
    ];

    for &(args, expected) in cases {
        assert_eq!(single::<bool>(args).unwrap(), expected, "{args:?}");
    }
}

#[test]
fn bool_flag_leaves_data_alone() {
    let err = single::<bool>(&["-x", "maybe"]).unwrap_err();
    assert_eq!(err.to_string(), "parse arg error: 'maybe': unknown");

    assert_eq!(
        value_kind::<bool>(&["--name=maybe"]),
        Some(ValueErrorKind::Syntax)
    );
}

#[test]
fn int_flag() {
    let cases: &[(&[&str], i32)] = &[
        (&["-x", "12"], 12),
        (&["-x12"], 12),
        (&["-x=-12"], -12),
        (&["-x", "-12"], -12),
        (&["--name", "+7"], 7),
        (&["--name=0x1F"], 31),
        (&["--name", "0b101"], 5),
        (&["--name", "0o17"], 15),
        (&["--name", "017"], 15),
        (&["--name", "0x_ff"], 255),
        (&["--name", "1_000"], 1000),
        (&["--name", "-2147483648"], i32::MIN),
    ];

    for &(args, expected) in cases {
        assert_eq!(single::<i32>(args).unwrap(), expected, "{args:?}");
    }
}

#[test]
fn int_flag_errors() {
    assert_eq!(value_kind::<i32>(&["-x"]), Some(ValueErrorKind::Syntax));
    assert_eq!(value_kind::<i32>(&["-x", "1__000"]), Some(ValueErrorKind::Syntax));
    assert_eq!(value_kind::<i32>(&["-x", "1.5"]), Some(ValueErrorKind::Syntax));
    assert_eq!(
        value_kind::<i32>(&["-x", "2147483648"]),
        Some(ValueErrorKind::Range)
    );
    assert_eq!(value_kind::<i8>(&["-x", "-129"]), Some(ValueErrorKind::Range));
}

#[test]
fn uint_flag() {
    assert_eq!(single::<u8>(&["-x", "255"]).unwrap(), 255);
    assert_eq!(single::<u64>(&["--name=0xFFFFFFFFFFFFFFFF"]).unwrap(), u64::MAX);
    assert_eq!(value_kind::<u8>(&["-x", "256"]), Some(ValueErrorKind::Range));

    // A negative number is still data, so it's taken, and then rejected
    assert_eq!(value_kind::<u32>(&["-x", "-1"]), Some(ValueErrorKind::Syntax));
}

#[test]
fn float_flag() {
    assert_eq!(single::<f64>(&["-x", "1.5e3"]).unwrap(), 1500.0);
    assert_eq!(single::<f64>(&["-x", "-0.25"]).unwrap(), -0.25);
    assert_eq!(single::<f32>(&["--name=2"]).unwrap(), 2.0);
    assert!(single::<f64>(&["-x", "-inf"]).unwrap().is_infinite());
    assert!(single::<f64>(&["-x", "NaN"]).unwrap().is_nan());

    assert_eq!(value_kind::<f64>(&["-x", "1e400"]), Some(ValueErrorKind::Range));
    assert_eq!(value_kind::<f32>(&["-x", "1e39"]), Some(ValueErrorKind::Range));
    assert_eq!(value_kind::<f64>(&["-x", "one"]), Some(ValueErrorKind::Syntax));
}

#[test]
fn string_flag() {
    let cases: &[(&[&str], &str)] = &[
        (&["-x", "value"], "value"),
        (&["-xvalue"], "value"),
        (&["-x", ""], ""),
        (&["--name", ""], ""),
        (&["--name=a=b"], "a=b"),
        (&["-x=="], "="),
        (&["-x", "-5"], "-5"),
        (&["-x"], ""),
    ];

    for &(args, expected) in cases {
        assert_eq!(single::<String>(args).unwrap(), expected, "{args:?}");
    }
}

#[test]
fn duration_flag() {
    let cases: &[(&[&str], Duration)] = &[
        (&["-x", "1h30m"], Duration::from_secs(90 * 60)),
        (&["-x", "1.5s"], Duration::from_millis(1500)),
        (&["--name=250ms"], Duration::from_millis(250)),
        (&["-x", "0"], Duration::ZERO),
        (&["-x", "3\u{b5}s"], Duration::from_micros(3)),
    ];

    for &(args, expected) in cases {
        assert_eq!(single::<Duration>(args).unwrap(), expected, "{args:?}");
    }

    assert_eq!(
        value_kind::<Duration>(&["-x", "-3m"]),
        Some(ValueErrorKind::Range)
    );
    assert_eq!(
        value_kind::<Duration>(&["-x", "5"]),
        Some(ValueErrorKind::Syntax)
    );
    assert_eq!(
        value_kind::<Duration>(&["-x", "3days"]),
        Some(ValueErrorKind::Syntax)
    );
}

#[test]
fn last_occurrence_wins() {
    assert_eq!(single::<i32>(&["-x", "1", "--name", "2", "-x3"]).unwrap(), 3);
}

#[test]
fn value_error_message() {
    let err = single::<u8>(&["--name", "300"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"flag 'x' 'name': parsing u8 "300": value out of range"#
    );
}

mod bundles {
    use super::*;

    /// `-a`, `-b` bool, `-t` string, `-n` int
    struct Bundle {
        parser: Parser,
        a: argot::Slot<bool>,
        b: argot::Slot<bool>,
        t: argot::Slot<String>,
        n: argot::Slot<i64>,
    }

    fn bundle() -> Bundle {
        let mut parser = Parser::new();

        Bundle {
            a: FlagBuilder::new("a").bind(&mut parser),
            b: FlagBuilder::new("b").bind(&mut parser),
            t: FlagBuilder::new("t").bind(&mut parser),
            n: FlagBuilder::new("n").bind(&mut parser),
            parser,
        }
    }

    #[test]
    fn booleans() {
        let mut cli = bundle();
        cli.parser.parse(None, &["-ab"]).unwrap();
        assert!(cli.a.get());
        assert!(cli.b.get());
    }

    #[test]
    fn inline_value_ends_the_bundle() {
        let mut cli = bundle();
        cli.parser.parse(None, &["-atbn"]).unwrap();
        assert!(cli.a.get());
        assert!(!cli.b.get());
        assert_eq!(cli.t.get(), "bn");
    }

    #[test]
    fn inline_value_keeps_equals() {
        let mut cli = bundle();
        cli.parser.parse(None, &["-atxyz=q"]).unwrap();
        assert!(cli.a.get());
        assert_eq!(cli.t.get(), "xyz=q");

        let mut cli = bundle();
        cli.parser.parse(None, &["-t==go=test"]).unwrap();
        assert_eq!(cli.t.get(), "=go=test");
    }

    #[test]
    fn last_flag_borrows() {
        let mut cli = bundle();
        cli.parser.parse(None, &["-abn", "-42"]).unwrap();
        assert!(cli.a.get());
        assert!(cli.b.get());
        assert_eq!(cli.n.get(), -42);
    }

    #[test]
    fn last_flag_takes_equals_value() {
        let mut cli = bundle();
        cli.parser.parse(None, &["-abt=value"]).unwrap();
        assert!(cli.a.get());
        assert!(cli.b.get());
        assert_eq!(cli.t.get(), "value");

        let mut cli = bundle();
        cli.parser.parse(None, &["-ba=false"]).unwrap();
        assert!(cli.b.get());
        assert!(!cli.a.get());
    }

    #[test]
    fn flags_are_never_borrowed() {
        let mut cli = bundle();
        cli.parser.parse(None, &["-t", "-b"]).unwrap();
        assert_eq!(cli.t.get(), "");
        assert!(cli.b.get());
    }

    #[test]
    fn unknown_short_in_bundle() {
        let mut cli = bundle();
        let err = cli.parser.parse(None, &["-azb"]).unwrap_err();
        assert_eq!(err.to_string(), "parse flag error: 'z': unknown");

        // Everything before the unknown flag is still bound
        assert!(cli.a.get());
        assert!(!cli.b.get());
    }

    #[test]
    fn disable_inline_value() {
        let mut cli = bundle();
        cli.parser
            .set_options(argot::Options::DISABLE_INLINE_VALUE);

        cli.parser.parse(None, &["-tab"]).unwrap();
        assert!(cli.a.get());
        assert!(cli.b.get());
        assert_eq!(cli.t.get(), "");

        let mut cli = bundle();
        cli.parser
            .set_options(argot::Options::DISABLE_INLINE_VALUE);
        cli.parser.parse(None, &["-bt", "text"]).unwrap();
        assert_eq!(cli.t.get(), "text");
    }

    #[test]
    fn disable_posix_style() {
        let mut cli = bundle();
        cli.parser.set_options(argot::Options::DISABLE_POSIX_STYLE);

        let err = cli.parser.parse(None, &["-ab"]).unwrap_err();
        assert_eq!(err.to_string(), "parse flag error: 'ab': unknown");

        // A lone short flag and a glued value still work
        cli.parser.parse(None, &["-a", "-tvalue"]).unwrap();
        assert!(cli.a.get());
        assert_eq!(cli.t.get(), "value");
    }
}

#[test]
fn syntax_errors() {
    let cases: &[(&str, &str)] = &[
        ("---test", "-test"),
        ("--=value", "=value"),
        ("-=x", "=x"),
        ("-- x", " x"),
        ("--,x", ",x"),
    ];

    for &(token, name) in cases {
        let mut parser = Parser::new();
        let err = parser.parse(None, &[token]).unwrap_err();

        match err {
            Error::ParseFlag {
                name: ref reported,
                reason: Reason::Syntax,
            } => assert_eq!(reported, name, "{token:?}"),
            err => panic!("{token:?}: unexpected error {err}"),
        }
    }
}

#[test]
fn terminator() {
    let mut parser = Parser::new();
    let flag = FlagBuilder::new("v").bind::<bool>(&mut parser);
    let first = ArgBuilder::new("first").bind::<String>(&mut parser);
    let second = ArgBuilder::new("second").bind::<String>(&mut parser);

    parser.parse(None, &["--", "-v", "--"]).unwrap();
    assert!(!flag.get());
    assert_eq!(first.get(), "-v");
    assert_eq!(second.get(), "--");
}

#[test]
fn lone_dash_is_data() {
    let mut parser = Parser::new();
    let input = ArgBuilder::new("input").bind::<String>(&mut parser);

    parser.parse(None, &["-"]).unwrap();
    assert_eq!(input.get(), "-");
}

#[test]
fn unknown_flags() {
    let mut parser = Parser::new();
    FlagBuilder::new("known").bind::<bool>(&mut parser);

    let err = parser.parse(None, &["--known", "--other=3"]).unwrap_err();
    assert_eq!(err.to_string(), "parse flag error: 'other': unknown");
    assert_eq!(err.reason(), Some(Reason::Unknown));

    let err = parser.parse(None, &["-k"]).unwrap_err();
    assert_eq!(err.to_string(), "parse flag error: 'k': unknown");
}
