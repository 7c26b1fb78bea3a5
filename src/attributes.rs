// This file is part of the terraform-provider-jamfpro project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Dynamically typed attribute bags, the shape Terraform state takes before it
//! is bound to a schema.

use std::collections::BTreeMap;

use serde::Serialize;

/// Flat key/value container for configuration or state.
///
/// Keys are ordered so that two bags built from the same record serialize to
/// the same bytes.
pub type AttributeBag = BTreeMap<String, AttrValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    String(String),
    Number(i64),
    Bool(bool),
    List(Vec<AttributeBag>),
}

impl AttrValue {
    /// Name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::String(_) => "string",
            AttrValue::Number(_) => "number",
            AttrValue::Bool(_) => "bool",
            AttrValue::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeBag]> {
        match self {
            AttrValue::List(l) => Some(l),
            _ => None,
        }
    }

    /// Semantic equality against a documented default
    pub fn is_default(&self, default: &DefaultValue) -> bool {
        match (self, default) {
            (AttrValue::String(s), DefaultValue::Str(d)) => s == d,
            (AttrValue::Number(n), DefaultValue::Int(d)) => n == d,
            (AttrValue::Bool(b), DefaultValue::Bool(d)) => b == d,
            _ => false,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        AttrValue::String(value.clone())
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<Vec<AttributeBag>> for AttrValue {
    fn from(value: Vec<AttributeBag>) -> Self {
        AttrValue::List(value)
    }
}

/// Documented zero value of a single attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Str(&'static str),
    Int(i64),
    Bool(bool),
}

/// Default value of every attribute of a block, keyed by output key
pub type DefaultsTable = &'static [(&'static str, DefaultValue)];

/// Check whether every attribute of `block` equals its default.
///
/// A key missing from `defaults` never counts as default.
pub fn all_default(block: &AttributeBag, defaults: DefaultsTable) -> bool {
    block.iter().all(|(key, value)| {
        defaults
            .iter()
            .find(|(name, _)| name == key)
            .is_some_and(|(_, default)| value.is_default(default))
    })
}

/// Build an [`AttributeBag`] from `key => value` pairs.
macro_rules! bag {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut bag = $crate::attributes::AttributeBag::new();
        $(bag.insert(String::from($key), $crate::attributes::AttrValue::from($value));)*
        bag
    }};
}
pub(crate) use bag;

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: DefaultsTable = &[
        ("mode", DefaultValue::Str("none")),
        ("count", DefaultValue::Int(0)),
        ("enabled", DefaultValue::Bool(false)),
    ];

    #[test]
    fn defaults_compare_by_value() {
        let block = bag! {
            "mode" => "none",
            "count" => 0i64,
            "enabled" => false,
        };
        assert!(all_default(&block, DEFAULTS));
    }

    #[test]
    fn single_difference_is_not_default() {
        let block = bag! {
            "mode" => "none",
            "count" => 3i64,
            "enabled" => false,
        };
        assert!(!all_default(&block, DEFAULTS));
    }

    #[test]
    fn kind_mismatch_is_not_default() {
        let block = bag! { "count" => "0" };
        assert!(!all_default(&block, DEFAULTS));
    }

    #[test]
    fn key_without_default_is_not_default() {
        let block = bag! { "mode" => "none", "extra" => "" };
        assert!(!all_default(&block, DEFAULTS));
    }
}
