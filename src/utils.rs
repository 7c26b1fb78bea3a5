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

use std::borrow::Cow;

use tf_provider::value::{Value, ValueList, ValueNumber, ValueString};
use tf_provider::{AttributePath, Diagnostics, Schema};

pub(crate) trait WithSchema {
    fn schema() -> Schema;
}

pub(crate) trait WithValidate {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath);
}

pub(crate) trait WithNormalize {
    fn normalize(&mut self, diags: &mut Diagnostics);
}

/// Known string value, or `default` for null and unknown values
pub(crate) fn string_or<T: AsRef<str>>(value: &Value<T>, default: String) -> String {
    match value {
        Value::Value(s) => s.as_ref().to_owned(),
        _ => default,
    }
}

pub(crate) fn number_or(value: &ValueNumber, default: i64) -> i64 {
    match value {
        Value::Value(n) => *n,
        _ => default,
    }
}

pub(crate) fn bool_or(value: &Value<bool>, default: bool) -> bool {
    match value {
        Value::Value(b) => *b,
        _ => default,
    }
}

/// Known string value, or `""` for null and unknown values
pub(crate) fn string_or_default<T: AsRef<str>>(value: &Value<T>) -> String {
    string_or(value, String::new())
}

pub(crate) fn number_or_default(value: &ValueNumber) -> i64 {
    number_or(value, 0)
}

pub(crate) fn bool_or_default(value: &Value<bool>) -> bool {
    bool_or(value, false)
}

/// Known entries of a list block
pub(crate) fn entries<'a, T>(blocks: &'a ValueList<Value<T>>) -> impl Iterator<Item = &'a T> {
    let entries: &[Value<T>] = match blocks {
        Value::Value(entries) => entries,
        _ => &[],
    };
    entries.iter().filter_map(|entry| match entry {
        Value::Value(entry) => Some(entry),
        _ => None,
    })
}

/// Wrap entries into a known list block
#[cfg(test)]
pub(crate) fn list_of<T>(entries: impl IntoIterator<Item = T>) -> ValueList<Value<T>> {
    Value::Value(entries.into_iter().map(Value::Value).collect())
}

/// Refreshed string: a null attribute stays null while the API reports `""`
pub(crate) fn refreshed_string<'a>(prior: &ValueString<'a>, value: String) -> ValueString<'a> {
    if value.is_empty() && prior.is_null() {
        Value::Null
    } else {
        Value::Value(Cow::Owned(value))
    }
}

/// Refreshed number: a null attribute stays null while the API reports `0`
pub(crate) fn refreshed_number(prior: &ValueNumber, value: i64) -> ValueNumber {
    if value == 0 && prior.is_null() {
        Value::Null
    } else {
        Value::Value(value)
    }
}

/// Refreshed flag: a null attribute stays null while the API reports `false`
pub(crate) fn refreshed_bool(prior: &Value<bool>, value: bool) -> Value<bool> {
    if !value && prior.is_null() {
        Value::Null
    } else {
        Value::Value(value)
    }
}

/// Parse the numeric API id stored in the `id` attribute.
///
/// Reports an error and returns `None` if the id is not known or not a number.
pub(crate) fn parse_id(diags: &mut Diagnostics, id: &ValueString<'_>) -> Option<i64> {
    let Value::Value(id) = id else {
        diags.error_short("Resource id is not known", AttributePath::new("id"));
        return None;
    };
    match id.parse() {
        Ok(id) => Some(id),
        Err(err) => {
            diags.error(
                "Resource id is not a valid number",
                format!("`{id}`: {err}"),
                AttributePath::new("id"),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_values_read_as_zero() {
        assert_eq!(string_or_default(&ValueString::Null), "");
        assert_eq!(string_or_default(&ValueString::Unknown), "");
        assert_eq!(number_or_default(&Value::Null), 0);
        assert!(!bool_or_default(&Value::Unknown));
    }

    #[test]
    fn null_values_fall_back_to_the_given_default() {
        assert_eq!(string_or(&ValueString::Null, "none".to_owned()), "none");
        assert_eq!(string_or(&Value::Value(Cow::from("")), "none".to_owned()), "");
        assert_eq!(number_or(&Value::Unknown, 5), 5);
        assert!(bool_or(&Value::Null, true));
        assert!(!bool_or(&Value::Value(false), true));
    }

    #[test]
    fn refresh_keeps_unset_attributes_null() {
        assert_eq!(refreshed_string(&Value::Null, String::new()), Value::Null);
        assert_eq!(
            refreshed_string(&Value::Null, "x".to_owned()),
            Value::Value(Cow::from("x"))
        );
        assert_eq!(
            refreshed_string(&Value::Value(Cow::from("x")), String::new()),
            Value::Value(Cow::from(""))
        );
        assert_eq!(refreshed_number(&Value::Null, 0), Value::Null);
        assert_eq!(refreshed_number(&Value::Value(3), 0), Value::Value(0));
        assert_eq!(refreshed_bool(&Value::Null, false), Value::Null);
        assert_eq!(refreshed_bool(&Value::Value(true), false), Value::Value(false));
    }

    #[test]
    fn entries_skip_unknown_items() {
        let blocks = Value::Value(vec![Value::Value(1), Value::Unknown, Value::Value(3)]);
        assert_eq!(entries(&blocks).copied().collect::<Vec<i64>>(), vec![1, 3]);
        assert_eq!(entries::<i64>(&Value::Null).count(), 0);
    }

    #[test]
    fn id_must_be_numeric() {
        let mut diags = Diagnostics::default();
        assert_eq!(parse_id(&mut diags, &Value::Value(Cow::from("12"))), Some(12));
        assert!(diags.errors.is_empty());

        assert_eq!(parse_id(&mut diags, &Value::Value(Cow::from("abc"))), None);
        assert_eq!(parse_id(&mut diags, &Value::Unknown), None);
        assert_eq!(diags.errors.len(), 2);
    }
}
