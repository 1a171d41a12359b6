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

//! Inline matcher expressions.
//!
//! An expected leaf written as `@Name(arg0, arg1)@` is not compared
//! literally. The named matcher receives the actual value as a string and
//! decides on its own whether it passes.

mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::error::{ConfigError, MatcherError};

pub use builtin::BUILTIN_PREFIX;

/// Shorthand that behaves like `@Ignore()@`.
const IGNORE_PLACEHOLDER: &str = "@ignore@";

/// A parsed `@[lib:]Name(args)@` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    library: Option<String>,
    name: String,
    args: Vec<String>,
}

impl Expression {
    /// Recognizes a matcher expression, returning `None` for plain strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_assert::Expression;
    ///
    /// let expr = Expression::parse("@core:Contains('foo', 'bar')@").unwrap();
    /// assert_eq!(expr.library(), Some("core"));
    /// assert_eq!(expr.name(), "Contains");
    /// assert_eq!(expr.args(), ["foo", "bar"]);
    ///
    /// assert!(Expression::parse("foo@example.com").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        if input == IGNORE_PLACEHOLDER {
            return Some(Self {
                library: None,
                name: "Ignore".to_string(),
                args: vec![],
            });
        }

        let captures = expression_regex().captures(input)?;
        Some(Self {
            library: captures.get(1).map(|m| m.as_str().to_string()),
            name: captures[2].to_string(),
            args: split_args(&captures[3])?,
        })
    }

    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Arguments as shown in failure messages.
    pub fn control_value(&self) -> String {
        self.args.join(", ")
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.library {
            Some(library) => write!(f, "{}:{}", library, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

fn expression_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^@(?:([A-Za-z_][A-Za-z0-9_]*):)?([A-Za-z_][A-Za-z0-9_]*)\((.*)\)@$")
            .expect("matcher expression regex is valid")
    })
}

// Splits on top-level commas. Commas inside quotes or parentheses (which
// covers nested expressions) stay in their argument. Unbalanced parentheses
// outside quotes mean the envelope spans several expressions, e.g.
// `@A('x')@ and @B('y')@`, so the input is not a single expression.
fn split_args(raw: &str) -> Option<Vec<String>> {
    if raw.trim().is_empty() {
        return Some(vec![]);
    }

    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    for c in raw.chars() {
        match (c, quote) {
            ('\'' | '"', None) => quote = Some(c),
            (c, Some(open)) if c == open => quote = None,
            ('(', None) => depth += 1,
            (')', None) => depth = depth.checked_sub(1)?,
            (',', None) if depth == 0 => {
                args.push(unquote(&current));
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    if depth != 0 {
        return None;
    }
    args.push(unquote(&current));

    Some(args)
}

fn unquote(arg: &str) -> String {
    let arg = arg.trim();
    for quote in ['\'', '"'] {
        if arg.len() >= 2 && arg.starts_with(quote) && arg.ends_with(quote) {
            return arg[1..arg.len() - 1].to_string();
        }
    }
    arg.to_string()
}

/// What a matcher gets to know about the node it validates.
pub struct MatchContext<'a> {
    /// Rendered path of the node, e.g. `$.user.name`.
    pub field: &'a str,
    /// Registry the expression was resolved against, for nested expressions.
    pub registry: &'a MatcherRegistry,
}

/// A named assertion usable as `@Name(args)@`.
///
/// Returning `Ok(false)` fails the validation; an `Err` means the control
/// arguments themselves are unusable and aborts it.
pub trait Matcher: Send + Sync {
    fn validate(
        &self,
        actual: &str,
        args: &[String],
        ctx: &MatchContext<'_>,
    ) -> Result<bool, MatcherError>;
}

impl<F> Matcher for F
where
    F: Fn(&str, &[String]) -> Result<bool, MatcherError> + Send + Sync,
{
    fn validate(
        &self,
        actual: &str,
        args: &[String],
        _ctx: &MatchContext<'_>,
    ) -> Result<bool, MatcherError> {
        self(actual, args)
    }
}

/// Matchers registered under a common prefix.
pub struct MatcherLibrary {
    prefix: String,
    matchers: HashMap<String, Box<dyn Matcher>>,
}

impl MatcherLibrary {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            matchers: HashMap::new(),
        }
    }

    /// Registers `matcher` under `name`, replacing a previous one.
    pub fn with_matcher(
        mut self,
        name: impl Into<String>,
        matcher: impl Matcher + 'static,
    ) -> Self {
        self.matchers.insert(name.into(), Box::new(matcher));
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn get(&self, name: &str) -> Option<&dyn Matcher> {
        self.matchers.get(name).map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl fmt::Debug for MatcherLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.matchers.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("MatcherLibrary")
            .field("prefix", &self.prefix)
            .field("matchers", &names)
            .finish()
    }
}

/// All matcher libraries available to a validation.
///
/// Libraries are registered up front and only read while validating, so a
/// registry can be shared between threads once it is built.
#[derive(Debug, Default)]
pub struct MatcherRegistry {
    libraries: Vec<MatcherLibrary>,
}

impl MatcherRegistry {
    /// An empty registry. Expressions fail to resolve until libraries are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in library.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(builtin::library());
        registry
    }

    /// The shared built-in registry used when a validator is given none.
    pub fn builtin() -> &'static MatcherRegistry {
        static BUILTIN: OnceLock<MatcherRegistry> = OnceLock::new();
        BUILTIN.get_or_init(MatcherRegistry::with_builtins)
    }

    pub fn register(&mut self, library: MatcherLibrary) {
        debug!(
            prefix = library.prefix(),
            matchers = library.len(),
            "registering matcher library"
        );
        self.libraries.push(library);
    }

    pub fn with_library(mut self, library: MatcherLibrary) -> Self {
        self.register(library);
        self
    }

    /// Resolves an expression to its matcher.
    ///
    /// A prefixed expression only looks at the library with that prefix;
    /// otherwise libraries are searched in registration order and the first
    /// one defining the name wins.
    pub fn lookup(&self, expr: &Expression) -> Option<&dyn Matcher> {
        match expr.library() {
            Some(prefix) => self
                .libraries
                .iter()
                .filter(|library| library.prefix() == prefix)
                .find_map(|library| library.get(expr.name())),
            None => self
                .libraries
                .iter()
                .find_map(|library| library.get(expr.name())),
        }
    }

    /// Runs the matcher named by `expr` against `actual`.
    pub(crate) fn dispatch(
        &self,
        expr: &Expression,
        field: &str,
        actual: &str,
    ) -> Result<bool, ConfigError> {
        let matcher = self
            .lookup(expr)
            .ok_or_else(|| ConfigError::UnknownMatcher {
                name: expr.to_string(),
                field: field.to_string(),
            })?;

        trace!(matcher = %expr, field, "dispatching matcher");

        let ctx = MatchContext {
            field,
            registry: self,
        };
        matcher
            .validate(actual, expr.args(), &ctx)
            .map_err(|source| match source {
                MatcherError::Unknown(name) => ConfigError::UnknownMatcher {
                    name,
                    field: field.to_string(),
                },
                source => ConfigError::Matcher {
                    matcher: expr.to_string(),
                    field: field.to_string(),
                    source,
                },
            })
    }
}
