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

use serde::Deserialize;

use crate::compare::CompareMode;
use crate::error::ConfigError;
use crate::Validator;

/// The tunables of a validation in serializable form.
///
/// # Examples
///
/// ```
/// use tree_assert::ValidatorConfig;
///
/// let config = ValidatorConfig::from_json_str(r#"{"strict": false, "ignore_paths": ["$..id"]}"#).unwrap();
/// assert!(!config.strict);
/// assert_eq!(config.ignore_paths, vec!["$..id".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Require equal key sets and array lengths. Defaults to `true`.
    pub strict: bool,
    /// Ignore path patterns such as `$.id` or `$..timestamp`.
    pub ignore_paths: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            strict: true,
            ignore_paths: vec![],
        }
    }
}

impl ValidatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn compare_mode(&self) -> CompareMode {
        CompareMode::from_strict(self.strict)
    }

    /// A validator using the built-in matchers and this configuration.
    pub fn validator(&self) -> Validator<'_> {
        self.ignore_paths.iter().fold(
            Validator::new().with_compare_mode(self.compare_mode()),
            |validator, path| validator.with_ignore_path(path),
        )
    }
}
