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

use tracing::debug;

use crate::attributes::{all_default, bag, AttrValue, AttributeBag, DefaultValue, DefaultsTable};
use crate::client::ResourcePolicy;

pub use crate::client::models::DEFAULT_REBOOT_MESSAGE;

pub const DISK_ENCRYPTION_DEFAULTS: DefaultsTable = &[
    ("action", DefaultValue::Str("none")),
    ("disk_encryption_configuration_id", DefaultValue::Int(0)),
    ("auth_restart", DefaultValue::Bool(false)),
    ("remediate_key_type", DefaultValue::Str("")),
    (
        "remediate_disk_encryption_configuration_id",
        DefaultValue::Int(0),
    ),
];

pub const MANAGEMENT_ACCOUNT_DEFAULTS: DefaultsTable = &[
    ("action", DefaultValue::Str("doNotChange")),
    ("managed_password", DefaultValue::Str("")),
    ("managed_password_length", DefaultValue::Int(0)),
];

pub const OPEN_FIRMWARE_EFI_PASSWORD_DEFAULTS: DefaultsTable = &[
    ("of_mode", DefaultValue::Str("none")),
    ("of_password", DefaultValue::Str("")),
];

pub const FILES_PROCESSES_DEFAULTS: DefaultsTable = &[
    ("search_by_path", DefaultValue::Str("")),
    ("delete_file", DefaultValue::Bool(false)),
    ("locate_file", DefaultValue::Str("")),
    ("update_locate_database", DefaultValue::Bool(false)),
    ("spotlight_search", DefaultValue::Str("")),
    ("search_for_process", DefaultValue::Str("")),
    ("kill_process", DefaultValue::Bool(false)),
    ("run_command", DefaultValue::Str("")),
];

pub const USER_INTERACTION_DEFAULTS: DefaultsTable = &[
    ("message_start", DefaultValue::Str("")),
    ("allow_user_to_defer", DefaultValue::Bool(false)),
    ("allow_deferral_until_utc", DefaultValue::Str("")),
    ("allow_deferral_minutes", DefaultValue::Int(0)),
    ("message_finish", DefaultValue::Str("")),
];

pub const REBOOT_DEFAULTS: DefaultsTable = &[
    ("message", DefaultValue::Str(DEFAULT_REBOOT_MESSAGE)),
    ("specify_startup", DefaultValue::Str("")),
    ("startup_disk", DefaultValue::Str("Current Startup Disk")),
    ("no_user_logged_in", DefaultValue::Str("Do not restart")),
    ("user_logged_in", DefaultValue::Str("Do not restart")),
    ("minutes_until_reboot", DefaultValue::Int(5)),
    ("start_reboot_timer_immediately", DefaultValue::Bool(false)),
    ("file_vault_2_reboot", DefaultValue::Bool(false)),
];

pub const MAINTENANCE_DEFAULTS: DefaultsTable = &[
    ("recon", DefaultValue::Bool(false)),
    ("reset_name", DefaultValue::Bool(false)),
    ("install_all_cached_packages", DefaultValue::Bool(false)),
    ("heal", DefaultValue::Bool(false)),
    ("prebindings", DefaultValue::Bool(false)),
    ("permissions", DefaultValue::Bool(false)),
    ("byhost", DefaultValue::Bool(false)),
    ("system_cache", DefaultValue::Bool(false)),
    ("user_cache", DefaultValue::Bool(false)),
    ("verify", DefaultValue::Bool(false)),
];

pub(super) fn disk_encryption(resp: &ResourcePolicy) -> Vec<AttributeBag> {
    let disk_encryption = &resp.disk_encryption;
    vec![bag! {
        "action" => &disk_encryption.action,
        "disk_encryption_configuration_id" => disk_encryption.disk_encryption_configuration_id,
        "auth_restart" => disk_encryption.auth_restart,
        "remediate_key_type" => &disk_encryption.remediate_key_type,
        "remediate_disk_encryption_configuration_id" => disk_encryption.remediate_disk_encryption_configuration_id,
    }]
}

pub(super) fn packages(resp: &ResourcePolicy) -> Vec<AttributeBag> {
    let configuration = &resp.package_configuration;
    if configuration.packages.is_empty() {
        return Vec::new();
    }

    let packages = configuration
        .packages
        .iter()
        .map(|package| {
            bag! {
                "id" => package.id,
                "action" => &package.action,
                "fill_user_template" => package.fill_user_template,
                "fill_existing_user_template" => package.fill_existing_users,
            }
        })
        .collect::<Vec<_>>();

    vec![bag! {
        "distribution_point" => &configuration.distribution_point,
        "package" => packages,
    }]
}

pub(super) fn scripts(resp: &ResourcePolicy) -> Vec<AttributeBag> {
    resp.scripts
        .iter()
        .map(|script| {
            let mut entry = bag! {
                "id" => script.id,
                "priority" => &script.priority,
            };
            let parameters = [
                ("parameter4", &script.parameter4),
                ("parameter5", &script.parameter5),
                ("parameter6", &script.parameter6),
                ("parameter7", &script.parameter7),
                ("parameter8", &script.parameter8),
                ("parameter9", &script.parameter9),
                ("parameter10", &script.parameter10),
                ("parameter11", &script.parameter11),
            ];
            for (key, value) in parameters {
                if !value.is_empty() {
                    entry.insert(key.to_owned(), AttrValue::from(value));
                }
            }
            entry
        })
        .collect()
}

pub(super) fn printers(resp: &ResourcePolicy) -> Vec<AttributeBag> {
    resp.printers
        .iter()
        .map(|printer| {
            bag! {
                "id" => printer.id,
                "name" => &printer.name,
                "action" => &printer.action,
                "make_default" => printer.make_default,
            }
        })
        .collect()
}

pub(super) fn dock_items(resp: &ResourcePolicy) -> Vec<AttributeBag> {
    resp.dock_items
        .iter()
        .map(|dock_item| {
            bag! {
                "id" => dock_item.id,
                "name" => &dock_item.name,
                "action" => &dock_item.action,
            }
        })
        .collect()
}

pub(super) fn account_maintenance(resp: &ResourcePolicy) -> Vec<AttributeBag> {
    let account_maintenance = &resp.account_maintenance;
    let mut out = AttributeBag::new();

    let accounts = account_maintenance
        .accounts
        .iter()
        .map(|account| {
            bag! {
                "action" => &account.action,
                "username" => &account.username,
                "realname" => &account.realname,
                "password" => &account.password,
                "archive_home_directory" => account.archive_home_directory,
                "archive_home_directory_to" => &account.archive_home_directory_to,
                "home" => &account.home,
                "hint" => &account.hint,
                "picture" => &account.picture,
                "admin" => account.admin,
                "filevault_enabled" => account.filevault_enabled,
            }
        })
        .collect::<Vec<_>>();
    if !accounts.is_empty() {
        out.insert(
            "local_accounts".to_owned(),
            AttrValue::List(vec![bag! { "account" => accounts }]),
        );
    }

    let bindings = account_maintenance
        .directory_bindings
        .iter()
        .map(|binding| {
            bag! {
                "id" => binding.id,
                "name" => &binding.name,
            }
        })
        .collect::<Vec<_>>();
    if !bindings.is_empty() {
        out.insert(
            "directory_bindings".to_owned(),
            AttrValue::List(vec![bag! { "binding" => bindings }]),
        );
    }

    if let Some(management_account) = &account_maintenance.management_account {
        let entry = bag! {
            "action" => &management_account.action,
            "managed_password" => &management_account.managed_password,
            "managed_password_length" => management_account.managed_password_length,
        };
        if all_default(&entry, MANAGEMENT_ACCOUNT_DEFAULTS) {
            debug!("management account is not configured, skipping state");
        } else {
            out.insert("management_account".to_owned(), AttrValue::List(vec![entry]));
        }
    }

    if let Some(open_firmware) = &account_maintenance.open_firmware_efi_password {
        let entry = bag! {
            "of_mode" => &open_firmware.of_mode,
            "of_password" => &open_firmware.of_password,
        };
        if all_default(&entry, OPEN_FIRMWARE_EFI_PASSWORD_DEFAULTS) {
            debug!("open firmware/EFI password is not configured, skipping state");
        } else {
            out.insert(
                "open_firmware_efi_password".to_owned(),
                AttrValue::List(vec![entry]),
            );
        }
    }

    vec![out]
}

pub(super) fn files_processes(resp: &ResourcePolicy) -> Vec<AttributeBag> {
    let files_processes = &resp.files_processes;
    vec![bag! {
        "search_by_path" => &files_processes.search_by_path,
        "delete_file" => files_processes.delete_file,
        "locate_file" => &files_processes.locate_file,
        "update_locate_database" => files_processes.update_locate_database,
        "spotlight_search" => &files_processes.spotlight_search,
        "search_for_process" => &files_processes.search_for_process,
        "kill_process" => files_processes.kill_process,
        "run_command" => &files_processes.run_command,
    }]
}

pub(super) fn user_interaction(resp: &ResourcePolicy) -> Vec<AttributeBag> {
    let user_interaction = &resp.user_interaction;
    vec![bag! {
        "message_start" => &user_interaction.message_start,
        "allow_user_to_defer" => user_interaction.allow_user_to_defer,
        "allow_deferral_until_utc" => &user_interaction.allow_deferral_until_utc,
        "allow_deferral_minutes" => user_interaction.allow_deferral_minutes,
        "message_finish" => &user_interaction.message_finish,
    }]
}

pub(super) fn reboot(resp: &ResourcePolicy) -> Vec<AttributeBag> {
    let reboot = &resp.reboot;
    vec![bag! {
        "message" => &reboot.message,
        "specify_startup" => &reboot.specify_startup,
        "startup_disk" => &reboot.startup_disk,
        "no_user_logged_in" => &reboot.no_user_logged_in,
        "user_logged_in" => &reboot.user_logged_in,
        "minutes_until_reboot" => reboot.minutes_until_reboot,
        "start_reboot_timer_immediately" => reboot.start_reboot_timer_immediately,
        "file_vault_2_reboot" => reboot.file_vault_2_reboot,
    }]
}

pub(super) fn maintenance(resp: &ResourcePolicy) -> Vec<AttributeBag> {
    let maintenance = &resp.maintenance;
    vec![bag! {
        "recon" => maintenance.recon,
        "reset_name" => maintenance.reset_name,
        "install_all_cached_packages" => maintenance.install_all_cached_packages,
        "heal" => maintenance.heal,
        "prebindings" => maintenance.prebindings,
        "permissions" => maintenance.permissions,
        "byhost" => maintenance.byhost,
        "system_cache" => maintenance.system_cache,
        "user_cache" => maintenance.user_cache,
        "verify" => maintenance.verify,
    }]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::client::models::{PolicyManagementAccount, PolicyOpenFirmwareEfiPassword};

    fn keys(block: &AttributeBag) -> BTreeSet<&str> {
        block.keys().map(String::as_str).collect()
    }

    fn table_keys(defaults: DefaultsTable) -> BTreeSet<&'static str> {
        defaults.iter().map(|(key, _)| *key).collect()
    }

    #[test]
    fn defaults_tables_match_flattened_keys() {
        let resp = ResourcePolicy::default();
        let cases: [(fn(&ResourcePolicy) -> Vec<AttributeBag>, DefaultsTable); 5] = [
            (disk_encryption, DISK_ENCRYPTION_DEFAULTS),
            (files_processes, FILES_PROCESSES_DEFAULTS),
            (user_interaction, USER_INTERACTION_DEFAULTS),
            (reboot, REBOOT_DEFAULTS),
            (maintenance, MAINTENANCE_DEFAULTS),
        ];
        for (flatten, defaults) in cases {
            let entries = flatten(&resp);
            assert_eq!(entries.len(), 1);
            assert_eq!(keys(&entries[0]), table_keys(defaults));
        }
    }

    #[test]
    fn account_defaults_tables_match_flattened_keys() {
        let mut resp = ResourcePolicy::default();
        resp.account_maintenance.management_account = Some(PolicyManagementAccount {
            action: "reset".into(),
            ..Default::default()
        });
        resp.account_maintenance.open_firmware_efi_password =
            Some(PolicyOpenFirmwareEfiPassword {
                of_mode: "command".into(),
                ..Default::default()
            });

        let out = account_maintenance(&resp);
        let management_account = &out[0]["management_account"].as_list().unwrap()[0];
        let open_firmware = &out[0]["open_firmware_efi_password"].as_list().unwrap()[0];
        assert_eq!(
            keys(management_account),
            table_keys(MANAGEMENT_ACCOUNT_DEFAULTS)
        );
        assert_eq!(
            keys(open_firmware),
            table_keys(OPEN_FIRMWARE_EFI_PASSWORD_DEFAULTS)
        );
    }

    #[test]
    fn every_defaults_table_is_all_default() {
        for defaults in [
            DISK_ENCRYPTION_DEFAULTS,
            MANAGEMENT_ACCOUNT_DEFAULTS,
            OPEN_FIRMWARE_EFI_PASSWORD_DEFAULTS,
            FILES_PROCESSES_DEFAULTS,
            USER_INTERACTION_DEFAULTS,
            REBOOT_DEFAULTS,
            MAINTENANCE_DEFAULTS,
        ] {
            let block = defaults
                .iter()
                .map(|(key, default)| {
                    let value = match *default {
                        DefaultValue::Str(s) => AttrValue::from(s),
                        DefaultValue::Int(n) => AttrValue::from(n),
                        DefaultValue::Bool(b) => AttrValue::from(b),
                    };
                    (key.to_string(), value)
                })
                .collect::<AttributeBag>();
            assert!(all_default(&block, defaults));
        }
    }

    #[test]
    fn empty_lists_produce_no_entries() {
        let resp = ResourcePolicy::default();
        assert!(packages(&resp).is_empty());
        assert!(scripts(&resp).is_empty());
        assert!(printers(&resp).is_empty());
        assert!(dock_items(&resp).is_empty());
        assert_eq!(account_maintenance(&resp), vec![AttributeBag::new()]);
    }
}
