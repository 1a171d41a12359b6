// Copyright 2024 The DocAssert Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;

use crate::compare::mismatch::Mismatch;

/// The validation itself is misconfigured.
///
/// These errors abort the validation and are never reported as content
/// mismatches.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An expected leaf references a matcher nobody registered.
    #[error("unknown validation matcher '{name}' used for field '{field}'")]
    UnknownMatcher { name: String, field: String },

    /// An ignore path could not be parsed.
    #[error("invalid ignore path '{path}': {reason}")]
    InvalidIgnorePath { path: String, reason: String },

    /// A matcher rejected its control arguments.
    #[error("{matcher} matcher is misconfigured for field '{field}': {source}")]
    Matcher {
        matcher: String,
        field: String,
        #[source]
        source: MatcherError,
    },

    /// A validator configuration document could not be read.
    #[error("failed to read validator config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by matcher implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatcherError {
    #[error("expected {expected} argument(s) but got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("invalid argument '{value}': {reason}")]
    InvalidArgument { value: String, reason: String },

    /// A nested expression names an unregistered matcher.
    #[error("unknown matcher '{0}'")]
    Unknown(String),
}

impl MatcherError {
    pub fn invalid_argument(value: impl Into<String>, reason: impl Into<String>) -> Self {
        MatcherError::InvalidArgument {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Either kind of failure a validation can end with.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// The documents differ.
    #[error("{0}")]
    Mismatch(Mismatch),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<Mismatch> for AssertionError {
    fn from(mismatch: Mismatch) -> Self {
        AssertionError::Mismatch(mismatch)
    }
}
