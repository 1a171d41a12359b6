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

use std::fmt;

use super::misc::Indent;
use super::path::Path;
use crate::domain::TreeValue;

/// What went wrong at the mismatching node.
///
/// The rendered wording is relied upon by callers asserting on messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
    /// Leaf values differ.
    Values { expected: String, actual: String },
    /// Node kinds differ, e.g. `string` against `object`.
    Types {
        expected: &'static str,
        actual: &'static str,
    },
    /// Collections have a different number of entries.
    EntryCount { expected: String, actual: String },
    /// An expected object key is absent from the actual object.
    MissingEntry { key: String, actual_keys: String },
    /// An expected array item has no unconsumed equal item in the actual array.
    MissingItem { item: String, actual: String },
    /// A matcher expression rejected the actual value.
    Matcher {
        name: String,
        received: String,
        control: String,
    },
}

/// A validation failure: where it happened and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    path: String,
    kind: MismatchKind,
    expected: TreeValue,
    actual: TreeValue,
}

/// Builds the canonical `expected ... but was ...` message for a path.
///
/// # Examples
///
/// ```
/// let message = tree_assert::build_mismatch("$.id", "42", "43");
/// assert_eq!(message, "Values not equal for entry: '$.id', expected '42' but was '43'");
/// ```
pub fn build_mismatch(path: &str, expected: &str, actual: &str) -> String {
    format!(
        "Values not equal for entry: '{}', expected '{}' but was '{}'",
        path, expected, actual
    )
}

impl Mismatch {
    pub(crate) fn new(
        path: &Path,
        kind: MismatchKind,
        expected: &TreeValue,
        actual: &TreeValue,
    ) -> Self {
        Self {
            path: path.to_string(),
            kind,
            expected: expected.clone(),
            actual: actual.clone(),
        }
    }

    /// Rendered location of the mismatching node, e.g. `$.items[2].name`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> &MismatchKind {
        &self.kind
    }

    /// The expected node at [`Mismatch::path`].
    pub fn expected(&self) -> &TreeValue {
        &self.expected
    }

    /// The actual node at [`Mismatch::path`].
    pub fn actual(&self) -> &TreeValue {
        &self.actual
    }

    /// The one-line message.
    pub fn message(&self) -> String {
        match &self.kind {
            MismatchKind::Values { expected, actual } => {
                build_mismatch(&self.path, expected, actual)
            }
            MismatchKind::Types { expected, actual } => format!(
                "Type mismatch for entry: '{}', expected '{}' but was '{}'",
                self.path, expected, actual
            ),
            MismatchKind::EntryCount { expected, actual } => format!(
                "Number of entries is not equal in element: '{}', expected '{}' but was '{}'",
                self.path, expected, actual
            ),
            MismatchKind::MissingEntry { key, actual_keys } => format!(
                "Missing JSON entry, expected '{}' to be in '{}'",
                key, actual_keys
            ),
            MismatchKind::MissingItem { item, actual } => format!(
                "An item in '{}' is missing, expected '{}' to be in '{}'",
                self.path, item, actual
            ),
            MismatchKind::Matcher {
                name,
                received,
                control,
            } => format!(
                "{} failed for field '{}': Received value is '{}', control value is '{}'",
                name, self.path, received, control
            ),
        }
    }
}

/// `{}` renders the one-line message, `{:#}` appends both nodes pretty printed.
impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message())?;

        if f.alternate() {
            writeln!(f)?;
            writeln!(f, "    expected:")?;
            writeln!(f, "{}", self.expected.to_pretty_string().indent(8))?;
            writeln!(f, "    actual:")?;
            write!(f, "{}", self.actual.to_pretty_string().indent(8))?;
        }

        Ok(())
    }
}

impl std::error::Error for Mismatch {}
