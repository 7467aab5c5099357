mod error;

use std::{
    fmt::Display,
    io::{self, Write},
    time::Duration,
};

use anyhow::Context as _;
use argot::{
    ArgBuilder, Commander, FlagBuilder, Parser, Register, RestBuilder, Slot, SlotVec,
    errors::CommandError, help,
};
use lazy_format::lazy_format;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::DemoError;

#[derive(argot::Decode, Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Format {
    #[default]
    Table,
    Json,
    #[argot(rename = "yml")]
    Yaml,
}

struct User {
    name: &'static str,
    email: &'static str,
    admin: bool,
    last_seen: Duration,
}

const USERS: &[User] = &[
    User {
        name: "alice",
        email: "alice@example.com",
        admin: true,
        last_seen: Duration::from_secs(2 * 60 * 60),
    },
    User {
        name: "bob",
        email: "bob@example.com",
        admin: false,
        last_seen: Duration::from_secs(3 * 24 * 60 * 60),
    },
    User {
        name: "carol",
        email: "carol@example.org",
        admin: false,
        last_seen: Duration::from_secs(15 * 60),
    },
];

/// Flags that every command accepts. They're registered again after each
/// command transition, since a transition discards everything before it.
struct Globals {
    help: Slot<bool>,
    verbose: Slot<bool>,
}

impl Globals {
    fn register(registry: &mut (impl Register + ?Sized)) -> Self {
        Self {
            help: FlagBuilder::new("help")
                .short('h')
                .usage("Print this message")
                .bind(registry),
            verbose: FlagBuilder::new("verbose")
                .short('v')
                .usage("Print more detail")
                .bind(registry),
        }
    }
}

enum Command {
    Root,
    User,
    Create {
        name: Slot<String>,
        email: Slot<String>,
        admin: Slot<bool>,
    },
    Delete {
        name: Slot<String>,
        force: Slot<bool>,
    },
    List {
        format: Slot<Format>,
        limit: Slot<usize>,
        active_within: Slot<Duration>,
        prefixes: SlotVec<String>,
    },
}

struct Cli {
    program: String,
    globals: Globals,
    command: Command,
}

impl Cli {
    fn new(parser: &mut Parser) -> Self {
        Self {
            program: "argot-demo".to_owned(),
            globals: Globals::register(parser),
            command: Command::Root,
        }
    }

    fn run(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let verbose = self.globals.verbose.get();

        match self.command {
            Command::Root => Err(DemoError::MissingCommand { expected: "user" }.into()),
            Command::User => Err(DemoError::MissingCommand {
                expected: "create, delete, list",
            }
            .into()),
            Command::Create {
                ref name,
                ref email,
                ref admin,
            } => {
                let name = name.get();

                if find_user(&name).is_some() {
                    return Err(DemoError::UserExists(name).into());
                }

                writeln!(out, "created user {name}")?;

                if verbose {
                    let email = email.get();
                    let email = lazy_format!(match (email.as_str()) {
                        "" => "(none)",
                        email => "{email}",
                    });

                    writeln!(out, "  email: {email}")?;
                    writeln!(out, "  admin: {}", admin.get())?;
                }

                Ok(())
            }
            Command::Delete {
                ref name,
                ref force,
            } => {
                let name = name.get();

                match find_user(&name) {
                    Some(user) => writeln!(out, "deleted user {}", user.name)?,
                    None if force.get() => writeln!(out, "no user {name:?}, nothing deleted")?,
                    None => return Err(DemoError::NoSuchUser(name).into()),
                }

                Ok(())
            }
            Command::List {
                ref format,
                ref limit,
                ref active_within,
                ref prefixes,
            } => {
                let format = format.get();
                let active_within = active_within.get();
                let prefixes = prefixes.get();
                let limit = match limit.get() {
                    0 => usize::MAX,
                    limit => limit,
                };

                debug!(?format, ?active_within, ?prefixes, "listing users");

                USERS
                    .iter()
                    .filter(|user| {
                        prefixes.is_empty()
                            || prefixes
                                .iter()
                                .any(|prefix| user.name.starts_with(prefix.as_str()))
                    })
                    .filter(|user| active_within.is_zero() || user.last_seen <= active_within)
                    .take(limit)
                    .try_for_each(|user| writeln!(out, "{}", render(user, format, verbose)))?;

                Ok(())
            }
        }
    }
}

impl Commander for Cli {
    fn is_command(&self, name: &str) -> bool {
        matches!(
            (&self.command, name),
            (Command::Root, "user") | (Command::User, "create" | "delete" | "list")
        )
    }

    fn set_command(&mut self, name: &str, registry: &mut dyn Register) -> Result<(), CommandError> {
        let globals = Globals::register(registry);

        let command = match (&self.command, name) {
            (Command::Root, "user") => Command::User,
            (Command::User, "create") => Command::Create {
                email: FlagBuilder::new("email")
                    .short('e')
                    .usage("Contact address for the new user")
                    .bind(registry),
                admin: FlagBuilder::new("admin")
                    .usage("Grant administrator rights")
                    .bind(registry),
                name: ArgBuilder::new("name")
                    .usage("Name of the user to create")
                    .required()
                    .bind(registry),
            },
            (Command::User, "delete") => Command::Delete {
                force: FlagBuilder::new("force")
                    .short('f')
                    .usage("Succeed even if the user doesn't exist")
                    .bind(registry),
                name: ArgBuilder::new("name")
                    .usage("Name of the user to delete")
                    .required()
                    .bind(registry),
            },
            (Command::User, "list") => Command::List {
                format: FlagBuilder::new("format")
                    .usage("Output format")
                    .bind(registry),
                limit: FlagBuilder::new("limit")
                    .short('n')
                    .usage("Show at most this many users; 0 shows all of them")
                    .bind(registry),
                active_within: FlagBuilder::new("active-within")
                    .usage("Only show users seen within this long, like 90m or 2h")
                    .bind(registry),
                prefixes: RestBuilder::new("prefix")
                    .usage("Only show users whose names start with one of these")
                    .bind(registry),
            },
            _ => return Err(DemoError::UnknownCommand(name.to_owned()).into()),
        };

        debug!(command = name, "registered command");

        self.program.push(' ');
        self.program.push_str(name);
        self.globals = globals;
        self.command = command;

        Ok(())
    }
}

fn find_user(name: &str) -> Option<&'static User> {
    USERS.iter().find(|user| user.name == name)
}

fn render(user: &User, format: Format, verbose: bool) -> impl Display {
    let &User {
        name, email, admin, ..
    } = user;

    lazy_format!(match ((format, verbose)) {
        (Format::Table, false) => "{name}",
        (Format::Table, true) => "{name:<8}{email:<24}{admin}",
        (Format::Json, _) => "{{\"name\": {name:?}, \"email\": {email:?}, \"admin\": {admin}}}",
        (Format::Yaml, _) => "- name: {name}\n  email: {email}\n  admin: {admin}",
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut parser = Parser::new();
    let mut cli = Cli::new(&mut parser);

    let parsed = parser.parse(Some(&mut cli), &args);
    let mut out = io::stdout().lock();

    // Help wins over a missing required arg
    if cli.globals.help.get() {
        help::write_usage(&mut out, &cli.program, &parser)?;
        return Ok(());
    }

    parsed.context("invalid command line")?;
    cli.run(&mut out)
}
