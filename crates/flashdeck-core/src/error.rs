// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// The broad category of a failure, used by callers to decide how to
/// present it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad credentials, or a command that needs a session without one.
    AuthFailure,
    /// A client-side required-field check failed before submission.
    ValidationFailure,
    /// A non-2xx response or a transport error.
    NetworkFailure,
    /// The requested flashcard set does not exist.
    NotFound,
    /// A quiz or viewer was asked to start over an empty card list.
    NoCards,
    /// An operation was attempted in a state that does not allow it.
    InvalidState,
    /// Local persistence failed.
    Storage,
    Other,
}

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    kind: ErrorKind,
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Other, msg)
    }

    pub fn with_kind(kind: ErrorKind, msg: impl Into<String>) -> Self {
        ErrorReport {
            kind,
            message: msg.into(),
        }
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::AuthFailure, msg)
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::ValidationFailure, msg)
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::NetworkFailure, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::NotFound, msg)
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Storage, msg)
    }

    pub fn no_cards() -> Self {
        Self::with_kind(ErrorKind::NoCards, "this set has no cards")
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            kind: ErrorKind::Storage,
            message: format!("I/O error: {value}"),
        }
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport {
            kind: ErrorKind::Other,
            message: format!("JSON error: {value}"),
        }
    }
}

impl From<toml::de::Error> for ErrorReport {
    fn from(value: toml::de::Error) -> Self {
        ErrorReport {
            kind: ErrorKind::ValidationFailure,
            message: format!("TOML error: {value}"),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport::new(msg))
}
