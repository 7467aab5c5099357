use argot::{
    ArgBuilder, Decode, FlagBuilder, Parser, help,
    value::{Decode as _, Flavor, ValueErrorKind},
};

#[derive(Decode, Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Color {
    #[default]
    Auto,
    Always,
    NeverEver,
    #[argot(rename = "off")]
    Disabled,
}

#[derive(Decode, Debug, Clone, Copy, PartialEq, Eq)]
#[argot(name = "level")]
enum LogLevel {
    Info,
    Debug,
}

#[derive(Decode, Debug, Default, Clone, PartialEq)]
struct Port(u16);

#[derive(Decode, Debug, Default, Clone, PartialEq)]
struct Label {
    text: String,
}

#[test]
fn kebab_case_names() {
    assert_eq!(Color::decode("auto"), Ok(Color::Auto));
    assert_eq!(Color::decode("always"), Ok(Color::Always));
    assert_eq!(Color::decode("never-ever"), Ok(Color::NeverEver));
    assert_eq!(Color::decode("off"), Ok(Color::Disabled));

    assert_eq!(Color::TYPE, "color");
    assert_eq!(
        Color::CHOICES,
        Some(&["auto", "always", "never-ever", "off"][..])
    );
}

#[test]
fn names_are_exact() {
    for raw in ["Auto", "AUTO", "disabled", "never_ever", ""] {
        let err = Color::decode(raw).unwrap_err();
        assert!(matches!(err.kind, ValueErrorKind::Choice(_)), "{raw:?}");
    }

    let err = LogLevel::decode("trace").unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"parsing level "trace": expected one of info, debug"#
    );
}

#[test]
fn newtypes_decode_like_their_field() {
    assert_eq!(Port::decode("8080"), Ok(Port(8080)));
    assert_eq!(Port::TYPE, "u16");
    assert_eq!(
        Port::decode("70000").unwrap_err().kind,
        ValueErrorKind::Range
    );

    assert_eq!(
        Label::decode(""),
        Ok(Label {
            text: String::new()
        })
    );
    assert!(matches!(Label::FLAVOR, Flavor::String));
}

#[test]
fn derived_values_bind() {
    let mut parser = Parser::new();
    let color = FlagBuilder::new("color").bind::<Color>(&mut parser);
    let port = ArgBuilder::new("port").bind::<Port>(&mut parser);

    parser.parse(None, &["--color", "never-ever", "443"]).unwrap();
    assert_eq!(color.get(), Color::NeverEver);
    assert_eq!(port.get(), Port(443));

    let err = parser.parse(None, &["--color=sometimes"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"flag 'color': parsing color "sometimes": expected one of auto, always, never-ever, off"#
    );
}

#[test]
fn choices_in_usage() {
    let mut parser = Parser::new();
    FlagBuilder::new("color")
        .usage("When to use color")
        .bind::<Color>(&mut parser);

    let mut out = Vec::new();
    help::write_usage(&mut out, "tool", &parser).unwrap();
    let usage = String::from_utf8(out).unwrap();

    assert!(
        usage.contains("--color {auto|always|never-ever|off}"),
        "{usage}"
    );
}
