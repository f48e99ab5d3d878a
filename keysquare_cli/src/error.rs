use keysquare::InvalidArgument;

#[derive(Debug, PartialEq, Eq)]
/// Error type for one line of input.
pub enum CommandError {
    UnknownCommand { command: String },
    Usage { usage: &'static str },
    InvalidArgument(InvalidArgument),
    NotInSinglePlayer { command: &'static str },
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::InvalidArgument(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidArgument> for CommandError {
    fn from(err: InvalidArgument) -> Self {
        CommandError::InvalidArgument(err)
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::UnknownCommand { command } => {
                write!(f, "Unknown command '{}', type 'h' for help", command)
            }
            CommandError::Usage { usage } => write!(f, "{}", usage),
            CommandError::InvalidArgument(err) => write!(f, "{}", err),
            CommandError::NotInSinglePlayer { command } => {
                write!(f, "'{}' is not available in single-player mode", command)
            }
        }
    }
}
