#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("no command given; expected one of: {expected}")]
    MissingCommand { expected: &'static str },

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("no such user {0:?}")]
    NoSuchUser(String),

    #[error("user {0:?} already exists")]
    UserExists(String),
}
