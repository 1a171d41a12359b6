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

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

use tracing::debug;

mod compare;
mod config;
mod domain;
mod error;
mod matcher;

pub use compare::ignore::IgnorePathSet;
pub use compare::mismatch::{build_mismatch, Mismatch, MismatchKind};
pub use compare::CompareMode;
pub use config::ValidatorConfig;
pub use domain::{Scalar, TreeValue, ValidationResult};
pub use error::{AssertionError, ConfigError, MatcherError};
pub use matcher::{
    Expression, MatchContext, Matcher, MatcherLibrary, MatcherRegistry, BUILTIN_PREFIX,
};

/// Builder for a validation.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tree_assert::{CompareMode, TreeValue, Validator};
///
/// let actual = TreeValue::from(json!({ "id": 7, "name": "Lorem", "tags": ["a", "b", "c"] }));
/// let expected = TreeValue::from(json!({ "name": "@EqualsIgnoreCase('lorem')@", "tags": ["c", "a"] }));
///
/// let result = Validator::new()
///     .with_compare_mode(CompareMode::Inclusive)
///     .with_ignore_path("$.id")
///     .validate(&actual, &expected)
///     .unwrap();
/// assert!(result.is_passed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator<'a> {
    compare_mode: CompareMode,
    ignore_paths: Vec<String>,
    matchers: Option<&'a MatcherRegistry>,
}

impl<'a> Validator<'a> {
    /// Constructs a strict validator with the built-in matchers and no
    /// ignore paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how documents are compared.
    pub fn with_compare_mode(mut self, compare_mode: CompareMode) -> Self {
        self.compare_mode = compare_mode;
        self
    }

    /// Shorthand for [`CompareMode::Strict`] or [`CompareMode::Inclusive`].
    pub fn strict(self, strict: bool) -> Self {
        self.with_compare_mode(CompareMode::from_strict(strict))
    }

    /// Adds a path pattern whose subtree is skipped.
    ///
    /// Patterns are parsed when a validation starts; a malformed one makes
    /// that validation fail with [`ConfigError::InvalidIgnorePath`].
    pub fn with_ignore_path(mut self, path: impl Into<String>) -> Self {
        self.ignore_paths.push(path.into());
        self
    }

    /// Uses `matchers` instead of the built-in registry.
    pub fn with_matchers(mut self, matchers: &'a MatcherRegistry) -> Self {
        self.matchers = Some(matchers);
        self
    }

    /// Compares `actual` against `expected`.
    ///
    /// Content differences come back as [`ValidationResult::Failed`]; an
    /// `Err` means the validation itself is misconfigured.
    pub fn validate(
        &self,
        actual: &TreeValue,
        expected: &TreeValue,
    ) -> Result<ValidationResult, ConfigError> {
        let ignore_paths = IgnorePathSet::parse(&self.ignore_paths)?;
        let matchers = self.matchers.unwrap_or_else(|| MatcherRegistry::builtin());

        run(
            actual,
            expected,
            compare::Config {
                compare_mode: self.compare_mode,
                ignore_paths: &ignore_paths,
                matchers,
            },
        )
    }

    /// Like [`Validator::validate`] but with both failure kinds as errors.
    pub fn assert(&self, actual: &TreeValue, expected: &TreeValue) -> Result<(), AssertionError> {
        self.validate(actual, expected)?.into_result()?;
        Ok(())
    }
}

/// Validates `actual` against `expected` in one call.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tree_assert::{validate, IgnorePathSet, MatcherRegistry, TreeValue};
///
/// let ignore = IgnorePathSet::parse(["$..created"]).unwrap();
/// let result = validate(
///     &TreeValue::from(json!({ "a": 1, "b": 2 })),
///     &TreeValue::from(json!({ "a": 1 })),
///     true,
///     &ignore,
///     MatcherRegistry::builtin(),
/// )
/// .unwrap();
///
/// let mismatch = result.mismatch().unwrap();
/// assert_eq!(mismatch.path(), "$");
/// assert!(mismatch.to_string().starts_with("Number of entries is not equal in element: '$'"));
/// ```
pub fn validate(
    actual: &TreeValue,
    expected: &TreeValue,
    strict: bool,
    ignore_paths: &IgnorePathSet,
    matchers: &MatcherRegistry,
) -> Result<ValidationResult, ConfigError> {
    run(
        actual,
        expected,
        compare::Config {
            compare_mode: CompareMode::from_strict(strict),
            ignore_paths,
            matchers,
        },
    )
}

fn run(
    actual: &TreeValue,
    expected: &TreeValue,
    config: compare::Config<'_>,
) -> Result<ValidationResult, ConfigError> {
    debug!(
        compare_mode = ?config.compare_mode,
        ignore_paths = config.ignore_paths.len(),
        "validating document"
    );

    match compare::compare(actual, expected, &config) {
        Ok(()) => Ok(ValidationResult::Passed),
        Err(AssertionError::Mismatch(mismatch)) => {
            debug!(path = mismatch.path(), "validation failed");
            Ok(ValidationResult::Failed(mismatch))
        }
        Err(AssertionError::Config(err)) => {
            debug!(error = %err, "validation aborted");
            Err(err)
        }
    }
}
