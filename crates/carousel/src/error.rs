use crate::config::ConfigError;
use html::{DomError, Id};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CarouselError {
    Config(ConfigError),
    /// A method name that has no corresponding command.
    UnknownMethod(String),
    InvalidArguments {
        method: &'static str,
        reason: String,
    },
    /// The container id is not a live element in the document.
    UnknownContainer(Id),
    NotInitialized(Id),
    PositionOutOfRange {
        position: usize,
        item_count: usize,
    },
    Dom(DomError),
}

impl fmt::Display for CarouselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarouselError::Config(err) => write!(f, "streamRotate: {err}"),
            CarouselError::UnknownMethod(name) => {
                write!(f, "streamRotate: the method {name} does not exist")
            }
            CarouselError::InvalidArguments { method, reason } => {
                write!(f, "streamRotate: invalid arguments for {method}: {reason}")
            }
            CarouselError::UnknownContainer(id) => {
                write!(f, "streamRotate: node {} is not an element in this document", id.0)
            }
            CarouselError::NotInitialized(id) => {
                write!(f, "streamRotate: container {} is not initialized", id.0)
            }
            CarouselError::PositionOutOfRange {
                position,
                item_count,
            } => write!(
                f,
                "streamRotate: position {position} is out of range for {item_count} items"
            ),
            CarouselError::Dom(err) => write!(f, "streamRotate: {err}"),
        }
    }
}

impl std::error::Error for CarouselError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CarouselError::Config(err) => Some(err),
            CarouselError::Dom(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for CarouselError {
    fn from(err: ConfigError) -> Self {
        CarouselError::Config(err)
    }
}

impl From<DomError> for CarouselError {
    fn from(err: DomError) -> Self {
        CarouselError::Dom(err)
    }
}
