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

use super::path::{JSONPath, Path, PathPattern};
use crate::error::ConfigError;

/// Paths exempt from comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnorePathSet {
    patterns: Vec<PathPattern>,
}

impl IgnorePathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every pattern, failing on the first malformed one.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_assert::IgnorePathSet;
    ///
    /// let ignore = IgnorePathSet::parse(["$..id", "$.items[*].created"]).unwrap();
    /// assert_eq!(ignore.len(), 2);
    /// assert!(IgnorePathSet::parse(["items"]).is_err());
    /// ```
    pub fn parse<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .try_fold(Self::new(), |set, pattern| set.with_pattern(pattern.as_ref()))
    }

    /// Adds a single pattern.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let pattern = pattern.jsonpath()?;
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Checks if the given path should be ignored.
    pub(crate) fn to_ignore(&self, path: &Path) -> bool {
        self.patterns.iter().any(|p| p.prefixes(path))
    }
}
