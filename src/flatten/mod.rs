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

//! Flattening of policy responses into Terraform state.
//!
//! Every payload block is described by a row of [`PAYLOAD_BLOCKS`]: its state
//! key, the function building its candidate entries, and the
//! [`EmissionPolicy`] deciding whether those entries reach the state at all.

use tf_provider::{AttributePath, Diagnostics};
use tracing::{debug, trace};

use crate::attributes::{all_default, AttrValue, AttributeBag, DefaultsTable};
use crate::client::ResourcePolicy;
use crate::policy::PolicyState;

mod payloads;

pub use payloads::{
    DEFAULT_REBOOT_MESSAGE, DISK_ENCRYPTION_DEFAULTS, FILES_PROCESSES_DEFAULTS,
    MAINTENANCE_DEFAULTS, MANAGEMENT_ACCOUNT_DEFAULTS, OPEN_FIRMWARE_EFI_PASSWORD_DEFAULTS,
    REBOOT_DEFAULTS, USER_INTERACTION_DEFAULTS,
};

/// Rule deciding whether a flattened block is written into the state
#[derive(Debug, Clone, Copy)]
pub enum EmissionPolicy {
    /// Omit the block when every attribute equals its default
    SuppressOnAllDefault(DefaultsTable),
    /// Emit the block when there is at least one entry
    EmitOnNonEmpty,
    /// Emit the block when its inner sub-blocks produced anything
    Composite,
}

impl EmissionPolicy {
    pub fn admits(&self, entries: &[AttributeBag]) -> bool {
        match self {
            EmissionPolicy::SuppressOnAllDefault(defaults) => entries
                .iter()
                .any(|entry| !all_default(entry, defaults)),
            EmissionPolicy::EmitOnNonEmpty => !entries.is_empty(),
            EmissionPolicy::Composite => entries.iter().any(|entry| !entry.is_empty()),
        }
    }
}

/// One payload block of a policy
pub struct PayloadBlock {
    pub key: &'static str,
    pub policy: EmissionPolicy,
    pub flatten: fn(&ResourcePolicy) -> Vec<AttributeBag>,
}

/// Payload blocks, in the order they are flattened
pub const PAYLOAD_BLOCKS: &[PayloadBlock] = &[
    PayloadBlock {
        key: "disk_encryption",
        policy: EmissionPolicy::SuppressOnAllDefault(DISK_ENCRYPTION_DEFAULTS),
        flatten: payloads::disk_encryption,
    },
    PayloadBlock {
        key: "packages",
        policy: EmissionPolicy::EmitOnNonEmpty,
        flatten: payloads::packages,
    },
    PayloadBlock {
        key: "scripts",
        policy: EmissionPolicy::EmitOnNonEmpty,
        flatten: payloads::scripts,
    },
    PayloadBlock {
        key: "printers",
        policy: EmissionPolicy::EmitOnNonEmpty,
        flatten: payloads::printers,
    },
    PayloadBlock {
        key: "dock_items",
        policy: EmissionPolicy::EmitOnNonEmpty,
        flatten: payloads::dock_items,
    },
    PayloadBlock {
        key: "account_maintenance",
        policy: EmissionPolicy::Composite,
        flatten: payloads::account_maintenance,
    },
    PayloadBlock {
        key: "files_processes",
        policy: EmissionPolicy::SuppressOnAllDefault(FILES_PROCESSES_DEFAULTS),
        flatten: payloads::files_processes,
    },
    PayloadBlock {
        key: "user_interaction",
        policy: EmissionPolicy::SuppressOnAllDefault(USER_INTERACTION_DEFAULTS),
        flatten: payloads::user_interaction,
    },
    PayloadBlock {
        key: "reboot",
        policy: EmissionPolicy::SuppressOnAllDefault(REBOOT_DEFAULTS),
        flatten: payloads::reboot,
    },
    PayloadBlock {
        key: "maintenance",
        policy: EmissionPolicy::SuppressOnAllDefault(MAINTENANCE_DEFAULTS),
        flatten: payloads::maintenance,
    },
];

/// Flatten every payload of `resp`.
///
/// The result always holds exactly one map, possibly empty.
pub fn flatten_payloads(resp: &ResourcePolicy) -> Vec<AttributeBag> {
    let mut out = AttributeBag::new();

    for block in PAYLOAD_BLOCKS {
        let entries = (block.flatten)(resp);
        if block.policy.admits(&entries) {
            trace!(block = block.key, ?entries, "adding payload to state");
            out.insert(block.key.to_owned(), AttrValue::List(entries));
        } else {
            debug!(block = block.key, "payload is not configured, skipping state");
        }
    }

    vec![out]
}

/// Flatten the payloads of `resp` and store them in `state`.
///
/// A state that cannot hold the flattened payloads is reported in `diags`.
pub fn state_payloads(state: &mut PolicyState<'_>, resp: &ResourcePolicy, diags: &mut Diagnostics) {
    let out = flatten_payloads(resp);

    if let Err(err) = state.set_payloads(out) {
        diags.error(
            "Failed to store policy payloads in state",
            err.to_string(),
            AttributePath::new("payloads"),
        );
    }
}

#[cfg(test)]
mod tests {
    use tf_provider::value::Value;

    use super::*;
    use crate::attributes::bag;
    use crate::client::models::{
        PolicyAccount, PolicyAccountMaintenance, PolicyManagementAccount, PolicyPackage,
        PolicyScript,
    };
    use crate::utils::entries;

    /// Unconfigured policy that also reports its single-item account parts
    fn default_policy() -> ResourcePolicy {
        ResourcePolicy {
            account_maintenance: PolicyAccountMaintenance {
                management_account: Some(Default::default()),
                open_firmware_efi_password: Some(Default::default()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn payloads(resp: &ResourcePolicy) -> AttributeBag {
        let mut out = flatten_payloads(resp);
        assert_eq!(out.len(), 1);
        out.remove(0)
    }

    fn single<'a>(payloads: &'a AttributeBag, key: &str) -> &'a AttributeBag {
        let entries = payloads[key].as_list().unwrap();
        assert_eq!(entries.len(), 1);
        &entries[0]
    }

    #[test]
    fn default_policy_has_no_payload() {
        assert!(payloads(&default_policy()).is_empty());
    }

    #[test]
    fn unconfigured_policy_has_no_payload() {
        assert!(payloads(&ResourcePolicy::default()).is_empty());
    }

    #[test]
    fn single_change_emits_every_field() {
        let cases: [(&str, DefaultsTable, fn(&mut ResourcePolicy)); 5] = [
            (
                "disk_encryption",
                DISK_ENCRYPTION_DEFAULTS,
                |resp: &mut ResourcePolicy| resp.disk_encryption.auth_restart = true,
            ),
            (
                "files_processes",
                FILES_PROCESSES_DEFAULTS,
                |resp: &mut ResourcePolicy| resp.files_processes.kill_process = true,
            ),
            (
                "user_interaction",
                USER_INTERACTION_DEFAULTS,
                |resp: &mut ResourcePolicy| resp.user_interaction.allow_deferral_minutes = 30,
            ),
            (
                "reboot",
                REBOOT_DEFAULTS,
                |resp: &mut ResourcePolicy| resp.reboot.file_vault_2_reboot = true,
            ),
            (
                "maintenance",
                MAINTENANCE_DEFAULTS,
                |resp: &mut ResourcePolicy| resp.maintenance.recon = true,
            ),
        ];
        let suppressed = PAYLOAD_BLOCKS
            .iter()
            .filter(|block| matches!(block.policy, EmissionPolicy::SuppressOnAllDefault(_)))
            .map(|block| block.key)
            .collect::<Vec<_>>();
        assert_eq!(
            cases.iter().map(|(key, _, _)| *key).collect::<Vec<_>>(),
            suppressed
        );

        for (key, defaults, change) in cases {
            let mut resp = default_policy();
            change(&mut resp);

            let out = payloads(&resp);
            assert_eq!(out.keys().collect::<Vec<_>>(), vec![key]);
            let block = single(&out, key);
            assert_eq!(block.len(), defaults.len(), "{key}");
            let changed = defaults
                .iter()
                .filter(|(field, default)| !block[*field].is_default(default))
                .count();
            assert_eq!(changed, 1, "{key}");
        }
    }

    #[test]
    fn reboot_default_message_is_suppressed() {
        let out = payloads(&default_policy());
        assert!(!out.contains_key("reboot"));
    }

    #[test]
    fn reboot_with_custom_timer_keeps_default_message() {
        let mut resp = default_policy();
        resp.reboot.minutes_until_reboot = 10;

        let out = payloads(&resp);
        let reboot = single(&out, "reboot");
        assert_eq!(reboot["message"], AttrValue::from(DEFAULT_REBOOT_MESSAGE));
        assert_eq!(reboot["minutes_until_reboot"], AttrValue::Number(10));
        assert_eq!(reboot.len(), REBOOT_DEFAULTS.len());
    }

    #[test]
    fn default_account_maintenance_is_absent() {
        let mut resp = default_policy();
        resp.account_maintenance.accounts = Vec::new();
        resp.account_maintenance.directory_bindings = Vec::new();

        let out = payloads(&resp);
        assert!(!out.contains_key("account_maintenance"));
    }

    #[test]
    fn account_maintenance_emits_only_configured_parts() {
        let mut resp = default_policy();
        resp.account_maintenance.accounts = vec![PolicyAccount {
            action: "Create".into(),
            username: "admin".into(),
            admin: true,
            ..Default::default()
        }];

        let out = payloads(&resp);
        let account_maintenance = single(&out, "account_maintenance");
        assert_eq!(
            account_maintenance.keys().collect::<Vec<_>>(),
            vec!["local_accounts"]
        );
        let accounts = single(account_maintenance, "local_accounts")["account"]
            .as_list()
            .unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0]["username"], AttrValue::from("admin"));
        assert_eq!(accounts[0]["admin"], AttrValue::Bool(true));
        assert_eq!(accounts[0].len(), 11);
    }

    #[test]
    fn management_account_without_open_firmware() {
        let mut resp = default_policy();
        resp.account_maintenance.management_account = Some(PolicyManagementAccount {
            action: "doNotChange".into(),
            managed_password: String::new(),
            managed_password_length: 12,
        });
        resp.account_maintenance.open_firmware_efi_password = None;

        let out = payloads(&resp);
        let account_maintenance = single(&out, "account_maintenance");
        assert_eq!(
            single(account_maintenance, "management_account"),
            &bag! {
                "action" => "doNotChange",
                "managed_password" => "",
                "managed_password_length" => 12i64,
            }
        );
        assert!(!account_maintenance.contains_key("open_firmware_efi_password"));
    }

    #[test]
    fn script_parameters_are_sparse() {
        let mut resp = default_policy();
        resp.scripts = vec![PolicyScript {
            id: 42,
            priority: "After".into(),
            parameter5: "foo".into(),
            ..Default::default()
        }];

        let out = payloads(&resp);
        let scripts = out["scripts"].as_list().unwrap();
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].contains_key("parameter5"));
        assert!(!scripts[0].contains_key("parameter4"));
        assert_eq!(scripts[0]["id"], AttrValue::Number(42));
    }

    #[test]
    fn packages_need_a_package() {
        let mut resp = default_policy();
        resp.package_configuration.distribution_point = "default".into();
        assert!(!payloads(&resp).contains_key("packages"));

        resp.package_configuration.packages = vec![PolicyPackage {
            id: 7,
            action: "Install".into(),
            fill_user_template: true,
            fill_existing_users: false,
        }];
        let out = payloads(&resp);
        let packages = single(&out, "packages");
        assert_eq!(packages["distribution_point"], AttrValue::from("default"));
        assert_eq!(
            packages["package"].as_list().unwrap(),
            &[bag! {
                "id" => 7i64,
                "action" => "Install",
                "fill_user_template" => true,
                "fill_existing_user_template" => false,
            }]
        );
    }

    #[test]
    fn flattening_is_idempotent() {
        let mut resp = default_policy();
        resp.reboot.file_vault_2_reboot = true;
        resp.scripts = vec![PolicyScript {
            id: 1,
            parameter11: "x".into(),
            ..Default::default()
        }];

        let first = serde_json::to_string(&flatten_payloads(&resp)).unwrap();
        let second = serde_json::to_string(&flatten_payloads(&resp)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn blocks_are_flattened_in_order() {
        let keys = PAYLOAD_BLOCKS.iter().map(|block| block.key).collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                "disk_encryption",
                "packages",
                "scripts",
                "printers",
                "dock_items",
                "account_maintenance",
                "files_processes",
                "user_interaction",
                "reboot",
                "maintenance",
            ]
        );
    }

    #[test]
    fn flattened_payloads_are_committed_to_state() {
        let mut state = PolicyState::default();
        let mut diags = Diagnostics::default();
        let mut resp = default_policy();
        resp.reboot.minutes_until_reboot = 1;

        state_payloads(&mut state, &resp, &mut diags);
        assert!(diags.errors.is_empty());

        let payloads: Vec<_> = entries(&state.payloads).collect();
        assert_eq!(payloads.len(), 1);
        let reboot: Vec<_> = entries(&payloads[0].reboot).collect();
        assert_eq!(reboot.len(), 1);
        assert_eq!(reboot[0].minutes_until_reboot, Value::Value(1));
        assert_eq!(entries(&payloads[0].maintenance).count(), 0);
    }
}
