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

use tf_provider::value::Value;
use tf_provider::{AttributePath, Diagnostics};

use crate::utils::WithValidate;

use super::state::PackageState;

impl<'a> WithValidate for PackageState<'a> {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        let required = [
            ("package_file_path", &self.package_file_path),
            ("name", &self.name),
        ];
        for (name, value) in required {
            if let Value::Value(value) = value {
                if value.is_empty() {
                    diags.error_short(
                        format!("`{name}` is required and cannot be empty"),
                        attr_path.clone().attribute(name),
                    );
                }
            }
        }
        if let Value::Value(priority) = self.priority {
            if !(1..=20).contains(&priority) {
                diags.error(
                    "`priority` is out of range",
                    format!("`priority` must be between 1 and 20, got {priority}"),
                    attr_path.attribute("priority"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    #[test]
    fn unknown_values_are_not_checked() {
        let state = PackageState {
            package_file_path: Value::Unknown,
            name: Value::Value(Cow::from("Firefox")),
            ..Default::default()
        };
        let mut diags = Diagnostics::default();
        state.validate(&mut diags, AttributePath::default());
        assert!(diags.errors.is_empty());
    }

    #[test]
    fn empty_required_values_are_rejected() {
        let state = PackageState {
            package_file_path: Value::Value(Cow::from("")),
            name: Value::Value(Cow::from("")),
            priority: Value::Value(0),
            ..Default::default()
        };
        let mut diags = Diagnostics::default();
        state.validate(&mut diags, AttributePath::default());
        assert_eq!(diags.errors.len(), 3);
    }
}
