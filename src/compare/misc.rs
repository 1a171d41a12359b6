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

pub trait Indent {
    fn indent(&self, level: u32) -> String;
}

impl<T> Indent for T
where
    T: ToString,
{
    fn indent(&self, level: u32) -> String {
        let indent = " ".repeat(level as usize);

        self.to_string()
            .lines()
            .map(|line| format!("{}{}", indent, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders keys as `[a, b]` for entry mismatch messages.
pub trait KeyList {
    fn key_list(&self) -> String;
}

impl<S> KeyList for [S]
where
    S: AsRef<str>,
{
    fn key_list(&self) -> String {
        let keys = self.iter().map(|k| k.as_ref()).collect::<Vec<_>>();
        format!("[{}]", keys.join(", "))
    }
}
