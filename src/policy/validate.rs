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

use tf_provider::value::{Value, ValueList};
use tf_provider::{AttributePath, Diagnostics};

use crate::utils::WithValidate;

use super::state::{AccountMaintenanceState, PayloadsState, PolicyState};

fn count<T>(blocks: &ValueList<Value<T>>) -> usize {
    match blocks {
        Value::Value(blocks) => blocks.len(),
        _ => 0,
    }
}

fn at_most_one(diags: &mut Diagnostics, count: usize, attr_path: AttributePath, name: &str) {
    if count > 1 {
        diags.error(
            format!("Too many `{name}` blocks"),
            format!("At most one `{name}` block is allowed, got {count}"),
            attr_path,
        );
    }
}

fn each<'a, T>(blocks: &'a ValueList<Value<T>>) -> impl Iterator<Item = (i64, &'a T)> {
    let blocks: &[Value<T>] = match blocks {
        Value::Value(blocks) => blocks,
        _ => &[],
    };
    blocks
        .iter()
        .enumerate()
        .filter_map(|(i, block)| match block {
            Value::Value(block) => Some((i as i64, block)),
            _ => None,
        })
}

impl<'a> WithValidate for PolicyState<'a> {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if let Value::Value(name) = &self.name {
            if name.is_empty() {
                diags.error_short(
                    "`name` cannot be empty",
                    attr_path.clone().attribute("name"),
                );
            }
        }

        at_most_one(
            diags,
            count(&self.payloads),
            attr_path.clone().attribute("payloads"),
            "payloads",
        );
        for (i, payloads) in each(&self.payloads) {
            payloads.validate(diags, attr_path.clone().attribute("payloads").index(i));
        }
    }
}

impl WithValidate for PayloadsState {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        for (name, len) in [
            ("disk_encryption", count(&self.disk_encryption)),
            ("packages", count(&self.packages)),
            ("account_maintenance", count(&self.account_maintenance)),
            ("files_processes", count(&self.files_processes)),
            ("user_interaction", count(&self.user_interaction)),
            ("reboot", count(&self.reboot)),
            ("maintenance", count(&self.maintenance)),
        ] {
            at_most_one(diags, len, attr_path.clone().attribute(name), name);
        }

        for (i, reboot) in each(&self.reboot) {
            if let Value::Value(minutes) = reboot.minutes_until_reboot {
                if minutes < 0 {
                    diags.error_short(
                        "`minutes_until_reboot` cannot be negative",
                        attr_path
                            .clone()
                            .attribute("reboot")
                            .index(i)
                            .attribute("minutes_until_reboot"),
                    );
                }
            }
        }

        for (i, account_maintenance) in each(&self.account_maintenance) {
            account_maintenance.validate(
                diags,
                attr_path.clone().attribute("account_maintenance").index(i),
            );
        }
    }
}

impl WithValidate for AccountMaintenanceState {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        for (name, len) in [
            ("local_accounts", count(&self.local_accounts)),
            ("directory_bindings", count(&self.directory_bindings)),
            ("management_account", count(&self.management_account)),
            (
                "open_firmware_efi_password",
                count(&self.open_firmware_efi_password),
            ),
        ] {
            at_most_one(diags, len, attr_path.clone().attribute(name), name);
        }
    }
}
