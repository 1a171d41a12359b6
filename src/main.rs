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

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use tree_assert::{TreeValue, ValidationResult, ValidatorConfig};

#[doc(hidden)]
#[macro_export]
macro_rules! handle_error {
    ($code:expr, $msg:expr, $($arg:tt)*) => {
        println!($msg, $($arg)*);
        std::process::exit($code);
    };

    ($code:expr, $msg:expr) => {
        println!($msg);
        std::process::exit($code);
    };
}

#[doc(hidden)]
struct Code;

impl Code {
    const SUCCESS: i32 = 0;
    const INVALID_ARGUMENT: i32 = 2;
    const DOC_PARSING_ERROR: i32 = 3;
    const VALIDATION_ERROR: i32 = 4;
    const CONFIG_ERROR: i32 = 5;
}

#[doc(hidden)]
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON document to validate
    actual: PathBuf,

    /// JSON document holding the expectations
    expected: PathBuf,

    /// Require equal key sets and array lengths (default)
    #[clap(long, conflicts_with = "lenient")]
    strict: bool,

    /// Allow extra keys and extra array items in the actual document
    #[clap(long)]
    lenient: bool,

    /// Path pattern to leave out of the comparison, e.g. '$..id'
    #[clap(short, long = "ignore")]
    ignore: Vec<String>,

    /// Validator configuration file in the JSON format
    #[clap(short, long)]
    config: Option<PathBuf>,
}

fn read_document(path: &Path) -> Result<TreeValue, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let json = serde_json::from_str::<Value>(&content)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(json.into())
}

#[doc(hidden)]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    handle_error!(Code::INVALID_ARGUMENT, "Error: {}: {}", path.display(), e);
                }
            };
            match ValidatorConfig::from_json_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    handle_error!(Code::CONFIG_ERROR, "Error: {}", e);
                }
            }
        }
        None => ValidatorConfig::default(),
    };

    if cli.strict {
        config.strict = true;
    }
    if cli.lenient {
        config.strict = false;
    }
    config.ignore_paths.extend(cli.ignore);

    let actual = match read_document(&cli.actual) {
        Ok(doc) => doc,
        Err(e) => {
            handle_error!(Code::DOC_PARSING_ERROR, "Error parsing file: {}", e);
        }
    };
    let expected = match read_document(&cli.expected) {
        Ok(doc) => doc,
        Err(e) => {
            handle_error!(Code::DOC_PARSING_ERROR, "Error parsing file: {}", e);
        }
    };

    match config.validator().validate(&actual, &expected) {
        Ok(ValidationResult::Passed) => {
            println!("validation passed");
            std::process::exit(Code::SUCCESS);
        }
        Ok(ValidationResult::Failed(mismatch)) => {
            handle_error!(Code::VALIDATION_ERROR, "validation failed: {:#}", mismatch);
        }
        Err(e) => {
            handle_error!(Code::CONFIG_ERROR, "Error: {}", e);
        }
    }
}
