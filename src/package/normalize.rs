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
use std::path::Path;

use tf_provider::{value::Value, Diagnostics};

use crate::utils::WithNormalize;

use super::state::PackageState;

impl<'a> WithNormalize for PackageState<'a> {
    fn normalize(&mut self, _diags: &mut Diagnostics) {
        if self.id.is_null() {
            self.id = Value::Unknown;
        }
        if self.filename.is_null() {
            self.filename = match &self.package_file_path {
                Value::Value(path) => Path::new::<str>(path)
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map_or(Value::Null, |name| Value::Value(Cow::Owned(name.to_owned()))),
                Value::Null => Value::Null,
                Value::Unknown => Value::Unknown,
            };
        }
    }
}
