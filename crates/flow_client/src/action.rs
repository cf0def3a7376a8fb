//! Dotted action identifiers, e.g. `products.add_item`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SEPARATOR: char = '.';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionIdError {
    #[error("action identifier {0:?} has no '.' separator")]
    MissingSeparator(String),

    #[error("action identifier {0:?} has more than one '.' separator")]
    TooManySeparators(String),

    #[error("action identifier {0:?} has an empty namespace")]
    EmptyNamespace(String),

    #[error("action identifier {0:?} has an empty command")]
    EmptyCommand(String),
}

/// A parsed `<namespace>.<command>` pair.
///
/// Exactly one separator is accepted and both halves must be non-empty.
/// Anything else is rejected up front instead of reaching the server as
/// a half-filled envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionId {
    namespace: String,
    command: String,
}

impl ActionId {
    pub fn new(
        namespace: impl Into<String>,
        command: impl Into<String>,
    ) -> Result<Self, ActionIdError> {
        Self::parse(&format!("{}{}{}", namespace.into(), SEPARATOR, command.into()))
    }

    pub fn parse(raw: &str) -> Result<Self, ActionIdError> {
        let mut parts = raw.split(SEPARATOR);
        let (Some(namespace), Some(command)) = (parts.next(), parts.next()) else {
            return Err(ActionIdError::MissingSeparator(raw.to_string()));
        };
        if parts.next().is_some() {
            return Err(ActionIdError::TooManySeparators(raw.to_string()));
        }
        if namespace.is_empty() {
            return Err(ActionIdError::EmptyNamespace(raw.to_string()));
        }
        if command.is_empty() {
            return Err(ActionIdError::EmptyCommand(raw.to_string()));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            command: command.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl FromStr for ActionId {
    type Err = ActionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, SEPARATOR, self.command)
    }
}
