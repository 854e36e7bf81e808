use std::fmt;

use thiserror::Error;

use crate::types::ValueType;

/// How an argument was referred to on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgRef {
    Name(String),
    Char(char),
}

impl fmt::Display for ArgRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "--{name}"),
            Self::Char(c) => write!(f, "-{c}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown argument `{0}`")]
    UnknownArgument(ArgRef),

    #[error("argument `{0}` is declared more than once")]
    DuplicateName(String),

    #[error("short alias `-{0}` is declared more than once")]
    DuplicateChar(char),

    #[error("no value parser registered for type `{0}`")]
    UnrecognizedType(ValueType),

    #[error("invalid value for argument `{name}`")]
    ArgumentValue {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("unexpected argument `{token}`: all {declared} positional arguments are taken")]
    PositionalOverflow { token: String, declared: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
