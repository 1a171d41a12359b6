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

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::compare::mismatch::Mismatch;

/// A parsed document node.
///
/// Object keys keep their insertion order so diagnostics list them the way
/// the document was written; equality ignores that order.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeValue {
    Object(IndexMap<String, TreeValue>),
    Array(Vec<TreeValue>),
    Scalar(Scalar),
    Null,
}

/// Leaf values other than `null`.
#[derive(Debug, Clone)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
}

impl TreeValue {
    /// Shorthand for a string leaf.
    pub fn string(value: impl Into<String>) -> Self {
        TreeValue::Scalar(Scalar::String(value.into()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TreeValue::Null)
    }

    /// Name of the node kind as used in type mismatch messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TreeValue::Object(_) => "object",
            TreeValue::Array(_) => "array",
            TreeValue::Scalar(scalar) => scalar.kind(),
            TreeValue::Null => "null",
        }
    }

    /// The string form handed to matchers and embedded in messages.
    ///
    /// Strings are returned without quotes, every other node is rendered as
    /// compact JSON.
    pub fn to_natural_string(&self) -> String {
        match self {
            TreeValue::Scalar(Scalar::String(value)) => value.clone(),
            other => other.to_string(),
        }
    }

    /// Pretty printed JSON, used by the multi-line failure report.
    pub fn to_pretty_string(&self) -> String {
        let json = Value::from(self);
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
    }
}

impl Scalar {
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::String(_) => "string",
            Scalar::Number(_) => "number",
            Scalar::Bool(_) => "boolean",
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::String(lhs), Scalar::String(rhs)) => lhs == rhs,
            (Scalar::Number(lhs), Scalar::Number(rhs)) => numbers_equal(lhs, rhs),
            (Scalar::Bool(lhs), Scalar::Bool(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

/// Numeric equality that ignores the textual representation, so `5` and
/// `5.0` are the same number.
fn numbers_equal(lhs: &Number, rhs: &Number) -> bool {
    if let (Some(lhs), Some(rhs)) = (lhs.as_i64(), rhs.as_i64()) {
        return lhs == rhs;
    }

    if let (Some(lhs), Some(rhs)) = (lhs.as_u64(), rhs.as_u64()) {
        return lhs == rhs;
    }

    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(lhs), Some(rhs)) => lhs == rhs,
        _ => false,
    }
}

impl Display for TreeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self))
    }
}

impl From<Value> for TreeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => TreeValue::Null,
            Value::Bool(value) => TreeValue::Scalar(Scalar::Bool(value)),
            Value::Number(value) => TreeValue::Scalar(Scalar::Number(value)),
            Value::String(value) => TreeValue::Scalar(Scalar::String(value)),
            Value::Array(items) => TreeValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(entries) => TreeValue::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

impl From<&TreeValue> for Value {
    fn from(value: &TreeValue) -> Self {
        match value {
            TreeValue::Null => Value::Null,
            TreeValue::Scalar(Scalar::Bool(value)) => Value::Bool(*value),
            TreeValue::Scalar(Scalar::Number(value)) => Value::Number(value.clone()),
            TreeValue::Scalar(Scalar::String(value)) => Value::String(value.clone()),
            TreeValue::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            TreeValue::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Outcome of a single validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Passed,
    /// The first mismatch found; validation stops there.
    Failed(Mismatch),
}

impl ValidationResult {
    pub fn is_passed(&self) -> bool {
        matches!(self, ValidationResult::Passed)
    }

    /// The failure, if any.
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            ValidationResult::Passed => None,
            ValidationResult::Failed(mismatch) => Some(mismatch),
        }
    }

    /// Converts into a `Result` so failures can be propagated with `?`.
    pub fn into_result(self) -> Result<(), Mismatch> {
        match self {
            ValidationResult::Passed => Ok(()),
            ValidationResult::Failed(mismatch) => Err(mismatch),
        }
    }
}
