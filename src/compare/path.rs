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

use crate::error::ConfigError;

/// Location of a node inside the document being compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Path<'a> {
    Root,
    Keys(Vec<Key<'a>>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key<'a> {
    Idx(usize),
    Field(&'a str),
}

/// One step of an ignore pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Field(String),
    Idx(usize),
    IdxRange(usize, usize),
    IdxRangeStart(usize),
    IdxRangeEnd(usize),
    /// `*`, `[*]` or `[:]`: any key or index.
    Wildcard,
    /// `..`: zero or more steps.
    Descendants,
}

/// A parsed ignore path such as `$.a.b[*].c` or `$..index`.
///
/// A pattern ignores every path it matches a prefix of, so ignoring a node
/// ignores its whole subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    selectors: Vec<Selector>,
}

// Keeps the `"$.a.b".jsonpath()` call style for building patterns.
pub trait JSONPath {
    fn jsonpath(&self) -> Result<PathPattern, ConfigError>;
}

impl JSONPath for str {
    fn jsonpath(&self) -> Result<PathPattern, ConfigError> {
        PathPattern::from_jsonpath(self)
    }
}

impl<'a> fmt::Display for Key<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Key::Idx(idx) => write!(f, "[{}]", idx),
            Key::Field(key) if is_plain(key) => write!(f, ".{}", key),
            Key::Field(key) => write!(f, "['{}']", key.replace('\'', "\\'")),
        }
    }
}

fn is_plain(key: &str) -> bool {
    !key.is_empty()
        && !key
            .chars()
            .any(|c| matches!(c, '.' | '[' | ']' | '\'' | '"') || c.is_whitespace())
}

impl<'a> Path<'a> {
    pub(crate) fn append(&self, next: Key<'a>) -> Path<'a> {
        match self {
            Path::Root => Path::Keys(vec![next]),
            Path::Keys(list) => {
                let mut copy = list.clone();
                copy.push(next);
                Path::Keys(copy)
            }
        }
    }

    pub(crate) fn keys(&self) -> &[Key<'a>] {
        match self {
            Path::Root => &[],
            Path::Keys(keys) => keys,
        }
    }
}

impl<'a> fmt::Display for Path<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "$")?;
        for key in self.keys() {
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl Selector {
    fn accepts(&self, key: &Key) -> bool {
        match (self, key) {
            (Selector::Wildcard, _) => true,
            (Selector::Field(expected), Key::Field(actual)) => expected == actual,
            (Selector::Idx(expected), Key::Idx(actual)) => expected == actual,
            (Selector::IdxRange(start, end), Key::Idx(idx)) => start <= idx && idx < end,
            (Selector::IdxRangeStart(start), Key::Idx(idx)) => start <= idx,
            (Selector::IdxRangeEnd(end), Key::Idx(idx)) => idx < end,
            _ => false,
        }
    }
}

impl PathPattern {
    pub(crate) fn from_jsonpath(jsonpath: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidIgnorePath {
            path: jsonpath.to_string(),
            reason: reason.to_string(),
        };

        let mut rest = jsonpath
            .strip_prefix('$')
            .ok_or_else(|| invalid("path must start with '$'"))?;
        let mut selectors = Vec::new();

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix("..") {
                selectors.push(Selector::Descendants);
                if after.is_empty() || after.starts_with('[') {
                    rest = after;
                    continue;
                }

                let (name, tail) = split_name(after);
                if name.is_empty() {
                    return Err(invalid("empty segment after '..'"));
                }
                selectors.push(Self::parse_name(name));
                rest = tail;
            } else if let Some(after) = rest.strip_prefix('.') {
                let (name, tail) = split_name(after);
                if name.is_empty() {
                    return Err(invalid("empty segment"));
                }
                selectors.push(Self::parse_name(name));
                rest = tail;
            } else if let Some(after) = rest.strip_prefix('[') {
                let (selector, tail) = Self::parse_bracket(after).map_err(invalid)?;
                selectors.push(selector);
                rest = tail;
            } else {
                return Err(invalid("expected '.', '..' or '['"));
            }
        }

        Ok(Self {
            source: jsonpath.to_string(),
            selectors,
        })
    }

    fn parse_name(name: &str) -> Selector {
        if name == "*" {
            Selector::Wildcard
        } else {
            Selector::Field(name.to_string())
        }
    }

    // `input` starts right after the opening bracket.
    fn parse_bracket(input: &str) -> Result<(Selector, &str), &'static str> {
        if let Some(quote) = input.chars().next().filter(|c| *c == '\'' || *c == '"') {
            let body = &input[1..];
            let close = body.find(quote).ok_or("unterminated quoted key")?;
            let tail = body[close + 1..]
                .strip_prefix(']')
                .ok_or("expected ']' after quoted key")?;
            return Ok((Selector::Field(body[..close].to_string()), tail));
        }

        let close = input.find(']').ok_or("unterminated '['")?;
        let token = input[..close].trim();
        let tail = &input[close + 1..];

        if token.is_empty() {
            return Err("empty brackets");
        }

        if token == "*" || token == ":" {
            return Ok((Selector::Wildcard, tail));
        }

        let parse_idx = |raw: &str| raw.trim().parse::<usize>().map_err(|_| "invalid index");

        if let Some((start, end)) = token.split_once(':') {
            let selector = match (start.trim().is_empty(), end.trim().is_empty()) {
                (false, false) => Selector::IdxRange(parse_idx(start)?, parse_idx(end)?),
                (false, true) => Selector::IdxRangeStart(parse_idx(start)?),
                (true, false) => Selector::IdxRangeEnd(parse_idx(end)?),
                (true, true) => Selector::Wildcard,
            };
            return Ok((selector, tail));
        }

        Ok((Selector::Idx(parse_idx(token)?), tail))
    }

    #[cfg(test)]
    pub(crate) fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Whether this pattern covers `path`, either exactly or as an ancestor.
    pub(crate) fn prefixes(&self, path: &Path) -> bool {
        prefixes(&self.selectors, path.keys())
    }
}

fn prefixes(selectors: &[Selector], keys: &[Key]) -> bool {
    match selectors.split_first() {
        None => true,
        Some((Selector::Descendants, rest)) => {
            (0..=keys.len()).any(|skip| prefixes(rest, &keys[skip..]))
        }
        Some((selector, rest)) => match keys.split_first() {
            Some((key, remaining)) => selector.accepts(key) && prefixes(rest, remaining),
            None => false,
        },
    }
}

// Splits a dotted segment name from whatever follows it.
fn split_name(input: &str) -> (&str, &str) {
    let end = input.find(['.', '[']).unwrap_or(input.len());
    input.split_at(end)
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
