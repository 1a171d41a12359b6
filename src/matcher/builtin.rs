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

use regex::Regex;

use super::{Expression, MatchContext, Matcher, MatcherLibrary};
use crate::error::MatcherError;

/// Prefix of the built-in library, e.g. `@core:Contains('x')@`.
pub const BUILTIN_PREFIX: &str = "core";

pub(super) fn library() -> MatcherLibrary {
    MatcherLibrary::new(BUILTIN_PREFIX)
        .with_matcher("Ignore", ignore)
        .with_matcher("Contains", contains)
        .with_matcher("ContainsIgnoreCase", contains_ignore_case)
        .with_matcher("EqualsIgnoreCase", equals_ignore_case)
        .with_matcher("StartsWith", starts_with)
        .with_matcher("EndsWith", ends_with)
        .with_matcher("Matches", matches)
        .with_matcher("GreaterThan", greater_than)
        .with_matcher("LowerThan", lower_than)
        .with_matcher("IsNumber", is_number)
        .with_matcher("Empty", empty)
        .with_matcher("NotEmpty", not_empty)
        .with_matcher("Null", null)
        .with_matcher("NotNull", not_null)
        .with_matcher("StringLength", string_length)
        .with_matcher("Trim", trim)
        .with_matcher("TrimAllWhitespaces", trim_all_whitespaces)
        .with_matcher("IgnoreNewLine", ignore_new_line)
        .with_matcher("Not", Not)
}

fn single_arg(args: &[String]) -> Result<&str, MatcherError> {
    match args {
        [single] => Ok(single.as_str()),
        _ => Err(MatcherError::Arity {
            expected: 1,
            actual: args.len(),
        }),
    }
}

fn no_args(args: &[String]) -> Result<(), MatcherError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(MatcherError::Arity {
            expected: 0,
            actual: args.len(),
        })
    }
}

fn number_arg(args: &[String]) -> Result<f64, MatcherError> {
    let raw = single_arg(args)?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| MatcherError::invalid_argument(raw, "not a number"))
}

fn ignore(_actual: &str, _args: &[String]) -> Result<bool, MatcherError> {
    Ok(true)
}

fn contains(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    Ok(actual.contains(single_arg(args)?))
}

fn contains_ignore_case(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    Ok(actual
        .to_lowercase()
        .contains(&single_arg(args)?.to_lowercase()))
}

fn equals_ignore_case(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    Ok(actual.to_lowercase() == single_arg(args)?.to_lowercase())
}

fn starts_with(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    Ok(actual.starts_with(single_arg(args)?))
}

fn ends_with(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    Ok(actual.ends_with(single_arg(args)?))
}

// The whole value has to match, not just a substring.
fn matches(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    let pattern = single_arg(args)?;
    let re = Regex::new(&format!("^(?:{})$", pattern))
        .map_err(|e| MatcherError::invalid_argument(pattern, e.to_string()))?;
    Ok(re.is_match(actual))
}

fn greater_than(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    let control = number_arg(args)?;
    Ok(actual
        .trim()
        .parse::<f64>()
        .map_or(false, |actual| actual > control))
}

fn lower_than(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    let control = number_arg(args)?;
    Ok(actual
        .trim()
        .parse::<f64>()
        .map_or(false, |actual| actual < control))
}

fn is_number(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    no_args(args)?;
    Ok(actual
        .trim()
        .parse::<f64>()
        .map_or(false, |number| number.is_finite()))
}

fn empty(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    no_args(args)?;
    Ok(actual.is_empty())
}

fn not_empty(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    no_args(args)?;
    Ok(!actual.is_empty())
}

fn null(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    no_args(args)?;
    Ok(actual == "null")
}

fn not_null(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    no_args(args)?;
    Ok(actual != "null")
}

fn string_length(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    let raw = single_arg(args)?;
    let length = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| MatcherError::invalid_argument(raw, "not a length"))?;
    Ok(actual.chars().count() == length)
}

fn trim(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    Ok(actual.trim() == single_arg(args)?.trim())
}

fn trim_all_whitespaces(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    Ok(strip(actual) == strip(single_arg(args)?))
}

fn ignore_new_line(actual: &str, args: &[String]) -> Result<bool, MatcherError> {
    let strip = |s: &str| s.replace(['\r', '\n'], "");
    Ok(strip(actual) == strip(single_arg(args)?))
}

/// `@Not(@Contains('x')@)@`: passes when the nested expression fails.
struct Not;

impl Matcher for Not {
    fn validate(
        &self,
        actual: &str,
        args: &[String],
        ctx: &MatchContext<'_>,
    ) -> Result<bool, MatcherError> {
        let raw = single_arg(args)?;
        let inner = Expression::parse(raw)
            .ok_or_else(|| MatcherError::invalid_argument(raw, "not a matcher expression"))?;
        let matcher = ctx
            .registry
            .lookup(&inner)
            .ok_or_else(|| MatcherError::Unknown(inner.to_string()))?;

        Ok(!matcher.validate(actual, inner.args(), ctx)?)
    }
}
