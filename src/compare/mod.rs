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

pub mod ignore;
pub mod mismatch;
mod misc;
pub mod path;

use indexmap::IndexMap;
use tracing::trace;

use crate::domain::{Scalar, TreeValue};
use crate::error::AssertionError;
use crate::matcher::{Expression, MatcherRegistry};
use ignore::IgnorePathSet;
use misc::KeyList;
use mismatch::{Mismatch, MismatchKind};
use path::{Key, Path};

/// Mode for how documents should be compared.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CompareMode {
    /// The "actual" document may be a superset of "expected": extra object
    /// keys are ignored and a longer actual array only has to contain the
    /// expected items.
    Inclusive,
    /// Object key sets and array lengths must be equal.
    #[default]
    Strict,
}

impl CompareMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            CompareMode::Strict
        } else {
            CompareMode::Inclusive
        }
    }
}

/// Everything a single validation run reads besides the two documents.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Config<'a> {
    pub(crate) compare_mode: CompareMode,
    pub(crate) ignore_paths: &'a IgnorePathSet,
    pub(crate) matchers: &'a MatcherRegistry,
}

impl<'a> Config<'a> {
    fn to_ignore(&self, path: &Path) -> bool {
        self.ignore_paths.to_ignore(path)
    }
}

/// Walks both trees from the root and stops at the first failure.
pub(crate) fn compare<'a>(
    actual: &'a TreeValue,
    expected: &'a TreeValue,
    config: &Config<'_>,
) -> Result<(), AssertionError> {
    compare_with(actual, expected, config, &Path::Root)
}

fn compare_with<'a>(
    actual: &'a TreeValue,
    expected: &'a TreeValue,
    config: &Config<'_>,
    path: &Path<'a>,
) -> Result<(), AssertionError> {
    if config.to_ignore(path) {
        trace!(path = %path, "skipping ignored path");
        return Ok(());
    }

    let folder = CompareFolder {
        actual,
        path,
        config,
    };

    fold_tree(expected, &folder)
}

struct CompareFolder<'a, 'b> {
    actual: &'a TreeValue,
    path: &'b Path<'a>,
    config: &'b Config<'b>,
}

impl<'a, 'b> CompareFolder<'a, 'b> {
    fn fail(&self, kind: MismatchKind, expected: &TreeValue) -> Result<(), AssertionError> {
        Err(Mismatch::new(self.path, kind, expected, self.actual).into())
    }

    fn type_mismatch(&self, expected: &TreeValue) -> Result<(), AssertionError> {
        self.fail(
            MismatchKind::Types {
                expected: expected.kind(),
                actual: self.actual.kind(),
            },
            expected,
        )
    }

    fn is_strict(&self) -> bool {
        self.config.compare_mode == CompareMode::Strict
    }

    fn on_matcher(&self, expr: &Expression, expected: &TreeValue) -> Result<(), AssertionError> {
        let field = self.path.to_string();
        let received = self.actual.to_natural_string();

        if self.config.matchers.dispatch(expr, &field, &received)? {
            return Ok(());
        }

        self.fail(
            MismatchKind::Matcher {
                name: expr.name().to_string(),
                received,
                control: expr.control_value(),
            },
            expected,
        )
    }

    fn on_null(&self, expected: &TreeValue) -> Result<(), AssertionError> {
        match self.actual {
            TreeValue::Null => Ok(()),
            TreeValue::Scalar(Scalar::String(value)) if value.is_empty() => Ok(()),
            TreeValue::Scalar(_) | TreeValue::Array(_) | TreeValue::Object(_) => self.fail(
                MismatchKind::Values {
                    expected: "null".to_string(),
                    actual: self.actual.to_natural_string(),
                },
                expected,
            ),
        }
    }

    fn on_scalar(&self, scalar: &Scalar, expected: &TreeValue) -> Result<(), AssertionError> {
        match self.actual {
            TreeValue::Scalar(actual) if actual.kind() == scalar.kind() => {
                if actual == scalar {
                    Ok(())
                } else {
                    self.fail(
                        MismatchKind::Values {
                            expected: expected.to_natural_string(),
                            actual: self.actual.to_natural_string(),
                        },
                        expected,
                    )
                }
            }
            TreeValue::Scalar(_) | TreeValue::Array(_) | TreeValue::Object(_) | TreeValue::Null => {
                self.type_mismatch(expected)
            }
        }
    }

    fn on_array(&self, items: &'a [TreeValue], expected: &TreeValue) -> Result<(), AssertionError> {
        let actual = match self.actual {
            TreeValue::Array(actual) => actual,
            TreeValue::Object(_) | TreeValue::Scalar(_) | TreeValue::Null => {
                return self.type_mismatch(expected)
            }
        };

        let count_mismatch = || {
            self.fail(
                MismatchKind::EntryCount {
                    expected: expected.to_string(),
                    actual: self.actual.to_string(),
                },
                expected,
            )
        };

        if actual.len() < items.len() {
            return count_mismatch();
        }

        let compared_len = if self.is_strict() {
            self.compared_len(actual, items.len())
        } else {
            actual.len()
        };

        if compared_len == items.len() {
            for (idx, (actual, expected)) in actual.iter().zip(items).enumerate() {
                let path = self.path.append(Key::Idx(idx));
                compare_with(actual, expected, self.config, &path)?;
            }
            return Ok(());
        }

        if self.is_strict() {
            return count_mismatch();
        }

        // Each actual item may satisfy one expected item only.
        let mut consumed = vec![false; actual.len()];
        for item in items {
            let found = actual.iter().enumerate().position(|(idx, candidate)| {
                let path = self.path.append(Key::Idx(idx));
                !consumed[idx] && same_tree(candidate, item, self.config, &path)
            });

            match found {
                Some(idx) => consumed[idx] = true,
                None => {
                    return self.fail(
                        MismatchKind::MissingItem {
                            item: item.to_natural_string(),
                            actual: self.actual.to_string(),
                        },
                        expected,
                    )
                }
            }
        }

        Ok(())
    }

    fn on_object(
        &self,
        entries: &'a IndexMap<String, TreeValue>,
        expected: &TreeValue,
    ) -> Result<(), AssertionError> {
        let actual = match self.actual {
            TreeValue::Object(actual) => actual,
            TreeValue::Array(_) | TreeValue::Scalar(_) | TreeValue::Null => {
                return self.type_mismatch(expected)
            }
        };

        if self.is_strict() {
            let expected_keys = self.compared_keys(entries);
            let actual_keys = self.compared_keys(actual);

            if expected_keys.len() != actual_keys.len() {
                return self.fail(
                    MismatchKind::EntryCount {
                        expected: expected_keys.key_list(),
                        actual: actual_keys.key_list(),
                    },
                    expected,
                );
            }
        }

        for (key, expected_value) in entries {
            let path = self.path.append(Key::Field(key));

            match actual.get(key) {
                Some(actual_value) => {
                    compare_with(actual_value, expected_value, self.config, &path)?
                }
                None if self.config.to_ignore(&path) => continue,
                None if !self.is_strict() && expected_value.is_null() => continue,
                None => {
                    let actual_keys = actual.keys().collect::<Vec<_>>();
                    return self.fail(
                        MismatchKind::MissingEntry {
                            key: key.clone(),
                            actual_keys: actual_keys.key_list(),
                        },
                        expected,
                    );
                }
            }
        }

        Ok(())
    }

    // Trailing items whose path is ignored take no part in the strict length
    // check, but the expected items are always compared.
    fn compared_len(&self, actual: &[TreeValue], expected_len: usize) -> usize {
        (expected_len..actual.len())
            .rev()
            .find(|idx| !self.config.to_ignore(&self.path.append(Key::Idx(*idx))))
            .map_or(expected_len, |idx| idx + 1)
    }

    // Keys whose child path is ignored take no part in the strict key count.
    fn compared_keys<'m>(&self, entries: &'m IndexMap<String, TreeValue>) -> Vec<&'m str> {
        entries
            .keys()
            .map(String::as_str)
            .filter(|key| !self.config.to_ignore(&self.path.append(Key::Field(key))))
            .collect()
    }
}

// Exact structural equality used to locate array items. Ignored paths are
// equal whatever they hold; matcher expressions are plain strings here.
fn same_tree<'a>(
    actual: &'a TreeValue,
    expected: &'a TreeValue,
    config: &Config<'_>,
    path: &Path<'a>,
) -> bool {
    if config.to_ignore(path) {
        return true;
    }

    match (actual, expected) {
        (TreeValue::Object(actual), TreeValue::Object(expected)) => {
            let compared = |entries: &'a IndexMap<String, TreeValue>| {
                entries
                    .keys()
                    .filter(|key| !config.to_ignore(&path.append(Key::Field(key))))
                    .count()
            };

            compared(actual) == compared(expected)
                && expected.iter().all(|(key, expected)| {
                    let path = path.append(Key::Field(key));
                    match actual.get(key) {
                        Some(actual) => same_tree(actual, expected, config, &path),
                        None => config.to_ignore(&path),
                    }
                })
        }
        (TreeValue::Array(actual), TreeValue::Array(expected)) => {
            actual.len() == expected.len()
                && actual.iter().zip(expected).enumerate().all(|(idx, (actual, expected))| {
                    same_tree(actual, expected, config, &path.append(Key::Idx(idx)))
                })
        }
        (TreeValue::Scalar(actual), TreeValue::Scalar(expected)) => actual == expected,
        (TreeValue::Null, TreeValue::Null) => true,
        (TreeValue::Object(_), _)
        | (TreeValue::Array(_), _)
        | (TreeValue::Scalar(_), _)
        | (TreeValue::Null, _) => false,
    }
}

// Dispatches on the kind of the expected node.
fn fold_tree<'a>(
    expected: &'a TreeValue,
    folder: &CompareFolder<'a, '_>,
) -> Result<(), AssertionError> {
    match expected {
        TreeValue::Scalar(scalar) => match scalar {
            Scalar::String(value) => match Expression::parse(value) {
                Some(expr) => folder.on_matcher(&expr, expected),
                None => folder.on_scalar(scalar, expected),
            },
            Scalar::Number(_) | Scalar::Bool(_) => folder.on_scalar(scalar, expected),
        },
        TreeValue::Null => folder.on_null(expected),
        TreeValue::Array(items) => folder.on_array(items, expected),
        TreeValue::Object(entries) => folder.on_object(entries, expected),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::{json, Value};
    use std::fs;

    fn load_json_from_file(file_path: &str) -> TreeValue {
        let data = fs::read_to_string(file_path).expect("Unable to read file");
        serde_json::from_str::<Value>(&data)
            .expect("Unable to parse file")
            .into()
    }

    fn diff(
        actual: Value,
        expected: Value,
        compare_mode: CompareMode,
        ignore: &[&str],
    ) -> Option<Mismatch> {
        let ignore_paths = IgnorePathSet::parse(ignore).unwrap();
        let config = Config {
            compare_mode,
            ignore_paths: &ignore_paths,
            matchers: MatcherRegistry::builtin(),
        };
        let actual = TreeValue::from(actual);
        let expected = TreeValue::from(expected);

        match compare(&actual, &expected, &config) {
            Ok(()) => None,
            Err(AssertionError::Mismatch(mismatch)) => Some(mismatch),
            Err(AssertionError::Config(err)) => panic!("unexpected config error: {}", err),
        }
    }

    fn inclusive(actual: Value, expected: Value) -> Option<Mismatch> {
        diff(actual, expected, CompareMode::Inclusive, &[])
    }

    fn strict(actual: Value, expected: Value) -> Option<Mismatch> {
        diff(actual, expected, CompareMode::Strict, &[])
    }

    #[test]
    fn test_leaf_values() {
        for mode in [CompareMode::Inclusive, CompareMode::Strict] {
            assert!(diff(json!(null), json!(null), mode, &[]).is_none());
            assert!(diff(json!(true), json!(true), mode, &[]).is_none());
            assert!(diff(json!(false), json!(true), mode, &[]).is_some());
            assert!(diff(json!(1), json!(1), mode, &[]).is_none());
            assert!(diff(json!(2), json!(1), mode, &[]).is_some());
            assert!(diff(json!(1), json!(1.0), mode, &[]).is_none());
            assert!(diff(json!(1.0), json!(1), mode, &[]).is_none());
            assert!(diff(json!("a"), json!("a"), mode, &[]).is_none());
            assert!(diff(json!("a"), json!("A"), mode, &[]).is_some());
        }

        let m = strict(json!(43), json!(42)).unwrap();
        assert_eq!(
            m.to_string(),
            "Values not equal for entry: '$', expected '42' but was '43'"
        );
    }

    #[test]
    fn test_scalar_kind_mismatch() {
        let m = strict(json!("5"), json!(5)).unwrap();
        assert_eq!(
            m.to_string(),
            "Type mismatch for entry: '$', expected 'number' but was 'string'"
        );

        let m = strict(json!({ "a": { "b": 1 } }), json!({ "a": "x" })).unwrap();
        assert_eq!(
            m.to_string(),
            "Type mismatch for entry: '$.a', expected 'string' but was 'object'"
        );

        let m = strict(json!({ "a": null }), json!({ "a": true })).unwrap();
        assert_eq!(
            m.to_string(),
            "Type mismatch for entry: '$.a', expected 'boolean' but was 'null'"
        );
    }

    #[test]
    fn test_null() {
        assert!(strict(json!(""), json!(null)).is_none());
        assert!(inclusive(json!({}), json!({ "a": null })).is_none());

        let m = strict(json!({}), json!({ "a": null })).unwrap();
        assert_eq!(
            m.to_string(),
            "Number of entries is not equal in element: '$', expected '[a]' but was '[]'"
        );

        let m = strict(json!({ "a": "x" }), json!({ "a": null })).unwrap();
        assert_eq!(
            m.to_string(),
            "Values not equal for entry: '$.a', expected 'null' but was 'x'"
        );

        let m = strict(json!([1]), json!(null)).unwrap();
        assert_eq!(
            m.to_string(),
            "Values not equal for entry: '$', expected 'null' but was '[1]'"
        );
    }

    #[test]
    fn test_array() {
        assert!(inclusive(json!([]), json!([])).is_none());
        assert!(inclusive(json!([1]), json!([])).is_none());
        assert!(inclusive(json!([1]), json!([1])).is_none());
        assert!(inclusive(json!([1, 2]), json!([1])).is_none());
        assert!(inclusive(json!([1]), json!([1, 2])).is_some());
        assert!(inclusive(json!([1, 3]), json!([1, 2])).is_some());
        assert!(inclusive(json!(1), json!([1])).is_some());
        assert!(inclusive(json!([1]), json!(1)).is_some());
    }

    #[test]
    fn test_array_strict() {
        assert!(strict(json!([]), json!([])).is_none());
        assert!(strict(json!([1, 2]), json!([1, 2])).is_none());

        let m = strict(json!([1]), json!([1, 2])).unwrap();
        assert_eq!(
            m.to_string(),
            "Number of entries is not equal in element: '$', expected '[1,2]' but was '[1]'"
        );

        let m = strict(json!({ "list": [1, 2] }), json!({ "list": [1] })).unwrap();
        assert_eq!(
            m.to_string(),
            "Number of entries is not equal in element: '$.list', expected '[1]' but was '[1,2]'"
        );
    }

    #[test]
    fn test_equal_length_arrays_compare_by_position() {
        for mode in [CompareMode::Inclusive, CompareMode::Strict] {
            let m = diff(json!([1, 3, 2]), json!([1, 2, 3]), mode, &[]).unwrap();
            assert_eq!(m.path(), "$[1]");
            assert_eq!(
                m.to_string(),
                "Values not equal for entry: '$[1]', expected '2' but was '3'"
            );
        }
    }

    #[test]
    fn test_array_containment_consumes_items() {
        assert!(inclusive(json!([1, 2, 1]), json!([2, 1])).is_none());
        assert!(inclusive(json!([1, 2, 1]), json!([1, 2])).is_none());
        assert!(inclusive(json!([1, 2, 1]), json!([1, 1])).is_none());
        assert!(inclusive(
            json!([{ "id": 2, "tags": ["b"] }, { "id": 1 }, 7]),
            json!([{ "tags": ["b"], "id": 2.0 }, 7])
        )
        .is_none());

        let m = inclusive(json!([1, 2, 1]), json!([2, 2])).unwrap();
        assert_eq!(
            m.to_string(),
            "An item in '$' is missing, expected '2' to be in '[1,2,1]'"
        );

        // Located items need exact equality, matcher expressions are literal here.
        let m = inclusive(json!(["abc", "x", "y"]), json!(["@Contains('b')@"])).unwrap();
        assert_eq!(
            m.to_string(),
            "An item in '$' is missing, expected '@Contains('b')@' to be in '[\"abc\",\"x\",\"y\"]'"
        );

        // Nested objects are not matched partially.
        assert!(inclusive(json!([{ "a": 1, "b": 2 }, 3]), json!([{ "a": 1 }])).is_some());

        assert!(inclusive(json!([1, 2, 2, 1]), json!([1, 1, 2, 1])).is_some());
    }

    #[test]
    fn test_array_containment_skips_ignored_paths() {
        let actual = json!({ "items": [
            { "id": 1, "ts": "a" },
            { "id": 2, "ts": "b" },
            { "id": 3, "ts": "c" }
        ] });
        let expected = json!({ "items": [{ "id": 1, "ts": "x" }] });

        for ignore in ["$..ts", "$.items[*].ts"] {
            let m = diff(actual.clone(), expected.clone(), CompareMode::Inclusive, &[ignore]);
            assert!(m.is_none());
        }
        assert!(inclusive(actual.clone(), expected).is_some());

        // Ignored keys missing on either side do not break the match.
        let expected = json!({ "items": [{ "id": 2 }, { "id": 3, "ts": "c", "extra": 1 }] });
        let ignore = ["$.items[*].ts", "$.items[*].extra"];
        assert!(diff(actual.clone(), expected, CompareMode::Inclusive, &ignore).is_none());

        let expected = json!({ "items": [{ "id": 4, "ts": "a" }] });
        let m = diff(actual, expected, CompareMode::Inclusive, &["$..ts"]).unwrap();
        assert_eq!(m.path(), "$.items");
    }

    #[test]
    fn test_object() {
        assert!(inclusive(json!({}), json!({})).is_none());
        assert!(inclusive(json!({ "a": 1 }), json!({ "a": 1 })).is_none());
        assert!(inclusive(json!({ "a": 1, "b": 123 }), json!({ "a": 1 })).is_none());
        assert!(inclusive(json!({ "a": { "b": true } }), json!({ "a": {} })).is_none());
        assert!(inclusive(json!({ "a": 1 }), json!({ "a": 2 })).is_some());

        let m = inclusive(json!({ "a": 1 }), json!({ "b": 1 })).unwrap();
        assert_eq!(m.to_string(), "Missing JSON entry, expected 'b' to be in '[a]'");

        let m = inclusive(json!({}), json!({ "text": "x" })).unwrap();
        assert_eq!(m.to_string(), "Missing JSON entry, expected 'text' to be in '[]'");
    }

    #[test]
    fn test_object_strict() {
        let m = strict(json!({ "a": 1, "b": 2 }), json!({ "a": 1 })).unwrap();
        assert_eq!(
            m.to_string(),
            "Number of entries is not equal in element: '$', expected '[a]' but was '[a, b]'"
        );

        let m = strict(json!({ "a": 1, "c": 2 }), json!({ "a": 1, "b": 2 })).unwrap();
        assert_eq!(m.to_string(), "Missing JSON entry, expected 'b' to be in '[a, c]'");

        let json = json!({ "b": 1, "a": [1, { "c": null }] });
        assert!(strict(json.clone(), json).is_none());

        assert!(strict(json!({ "a": 1, "b": 2 }), json!({ "b": 2, "a": 1 })).is_none());
    }

    #[test]
    fn test_matcher_leaves() {
        assert!(strict(
            json!({ "test": "Lorem" }),
            json!({ "test": "@EqualsIgnoreCase('lorem')@" })
        )
        .is_none());
        assert!(strict(json!({ "n": 42 }), json!({ "n": "@GreaterThan(41)@" })).is_none());
        assert!(
            strict(json!({ "o": { "x": [1] } }), json!({ "o": "@Contains('[1]')@" })).is_none()
        );
        assert!(strict(json!({ "a": null }), json!({ "a": "@Null()@" })).is_none());

        let m = strict(
            json!({ "test": "Lorem" }),
            json!({ "test": "@EqualsIgnoreCase('lorem ipsum')@" }),
        )
        .unwrap();
        assert_eq!(
            m.to_string(),
            "EqualsIgnoreCase failed for field '$.test': Received value is 'Lorem', control value is 'lorem ipsum'"
        );
    }

    #[test]
    fn test_unknown_matcher_is_config_error() {
        let ignore_paths = IgnorePathSet::new();
        let config = Config {
            compare_mode: CompareMode::Strict,
            ignore_paths: &ignore_paths,
            matchers: MatcherRegistry::builtin(),
        };
        let actual = TreeValue::from(json!({ "a": "x", "b": 1 }));
        let expected = TreeValue::from(json!({ "a": "@Nope()@", "b": 2 }));

        match compare(&actual, &expected, &config) {
            Err(AssertionError::Config(err)) => assert_eq!(
                err.to_string(),
                "unknown validation matcher 'Nope' used for field '$.a'"
            ),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_ignore_paths() {
        let actual = json!({ "id": 1, "name": "John" });
        let expected = json!({ "id": 2, "name": "John" });
        assert!(diff(actual, expected, CompareMode::Strict, &["$.id"]).is_none());

        let actual = json!({ "a": { "b": [{ "c": 0 }, { "c": 1 }] } });
        let expected = json!({ "a": { "b": [{ "c": 0 }, { "c": 2 }] } });
        assert!(diff(actual, expected, CompareMode::Strict, &["$.a.b[*].c"]).is_none());

        let actual = json!({ "a": { "b": { "d": { "e": 3 } } } });
        let expected = json!({ "a": { "b": { "d": { "e": 4 } } } });
        assert!(diff(actual, expected, CompareMode::Strict, &["$.a.b.d.e"]).is_none());

        let actual = json!({ "a": { "x": 1, "y": 2, "z": 3 } });
        let expected = json!({ "a": { "x": 2, "y": 3, "z": 3 } });
        assert!(diff(actual, expected, CompareMode::Strict, &["$.a.x", "$.a.y"]).is_none());

        let actual = json!({ "a": { "b": 1, "c": 2 } });
        let expected = json!({ "a": { "b": 1, "c": 3 } });
        assert!(diff(actual, expected, CompareMode::Strict, &["$.a.d"]).is_some());
    }

    #[test]
    fn test_ignored_subtrees_are_not_visited() {
        let actual = json!({ "foo": [1, 2] });
        let expected = json!({ "foo": "anything" });
        assert!(diff(actual, expected, CompareMode::Strict, &["$.foo"]).is_none());

        // Would be an unknown matcher if it were visited.
        let actual = json!({ "foo": 1 });
        let expected = json!({ "foo": "@Nope()@" });
        assert!(diff(actual, expected, CompareMode::Strict, &["$.foo"]).is_none());

        let actual = json!({ "a": [{ "index": 1, "v": "x" }, { "index": 9, "v": "y" }] });
        let expected = json!({ "a": [{ "index": 5, "v": "x" }, { "index": 6, "v": "y" }] });
        assert!(diff(actual, expected, CompareMode::Strict, &["$..index"]).is_none());

        assert!(diff(json!(1), json!("x"), CompareMode::Strict, &["$"]).is_none());
    }

    #[test]
    fn test_ignored_keys_leave_strict_key_count() {
        let actual = json!({ "id": 7, "name": "John" });
        let expected = json!({ "name": "John" });
        assert!(diff(actual.clone(), expected.clone(), CompareMode::Strict, &["$.id"]).is_none());
        assert!(diff(actual, expected, CompareMode::Strict, &[]).is_some());

        let actual = json!({ "name": "John" });
        let expected = json!({ "id": 7, "name": "John" });
        assert!(diff(actual, expected, CompareMode::Strict, &["$.id"]).is_none());
    }

    #[test]
    fn test_ignored_items_leave_strict_length() {
        assert!(diff(json!([1, 2, 3]), json!([1, 2]), CompareMode::Strict, &["$[2]"]).is_none());
        let m = diff(json!([1, 2, 3, 4]), json!([1, 2]), CompareMode::Strict, &["$[2:]"]);
        assert!(m.is_none());
        assert!(diff(json!([1, 2, 3]), json!([1, 2]), CompareMode::Strict, &[]).is_some());

        let actual = json!({ "list": [1, 2, 3] });
        let expected = json!({ "list": [1, 5] });
        let m = diff(actual, expected, CompareMode::Strict, &["$.list[2]"]).unwrap();
        assert_eq!(
            m.to_string(),
            "Values not equal for entry: '$.list[1]', expected '5' but was '2'"
        );

        // Only trailing ignored items are dropped.
        let m = diff(json!([1, 2, 3, 4]), json!([1, 2]), CompareMode::Strict, &["$[2]"]).unwrap();
        assert_eq!(
            m.to_string(),
            "Number of entries is not equal in element: '$', expected '[1,2]' but was '[1,2,3,4]'"
        );
    }

    #[test]
    fn test_path_of_nested_mismatch() {
        let actual = json!({ "root": { "element": { "sub-element": "A" } } });
        let expected = json!({ "root": { "element": { "sub-element": "B" } } });
        let m = strict(actual, expected).unwrap();
        assert_eq!(m.path(), "$.root.element.sub-element");
        assert_eq!(
            m.to_string(),
            "Values not equal for entry: '$.root.element.sub-element', expected 'B' but was 'A'"
        );
    }

    #[test]
    fn test_first_failure_wins() {
        let actual = json!({ "a": 1, "b": 1, "c": 1 });
        let expected = json!({ "a": 1, "b": 2, "c": 3 });
        let m = strict(actual, expected).unwrap();
        assert_eq!(m.path(), "$.b");
    }

    #[test]
    fn test_complex_jsons() {
        let actual = load_json_from_file("tests/data/actual.json");
        let expected = load_json_from_file("tests/data/expected.json");
        let run = |mode: CompareMode, ignore: &[&str]| {
            diff(Value::from(&actual), Value::from(&expected), mode, ignore)
        };

        let m = run(CompareMode::Inclusive, &[]).unwrap();
        assert_eq!(m.path(), "$.user.name");

        let m = run(CompareMode::Inclusive, &["$.user.name"]).unwrap();
        assert_eq!(m.path(), "$.user.profile.age");

        let m = run(CompareMode::Inclusive, &["$.user.name", "$.user.profile.age"]).unwrap();
        assert_eq!(m.path(), "$.user.comments[1].timestamp");

        let ignore = ["$.user.name", "$.user.profile.age", "$.user.comments[*].timestamp"];
        assert!(run(CompareMode::Inclusive, &ignore).is_none());

        let m = run(CompareMode::Strict, &ignore).unwrap();
        assert_eq!(m.path(), "$.user.profile");
        assert_eq!(
            m.to_string(),
            "Number of entries is not equal in element: '$.user.profile', expected '[email]' but was '[email, city]'"
        );

        let ignore = [
            "$.user.name",
            "$.user.profile.age",
            "$.user.profile.city",
            "$.user.comments[*].timestamp",
        ];
        let m = run(CompareMode::Strict, &ignore).unwrap();
        assert_eq!(m.path(), "$.user.tags");

        let ignore = ["$.user.name", "$..age", "$..city", "$..timestamp", "$.user.tags"];
        assert!(run(CompareMode::Strict, &ignore).is_none());
    }
}
