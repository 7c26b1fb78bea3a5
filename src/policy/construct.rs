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

use crate::client::models::{
    PolicyAccount, PolicyAccountMaintenance, PolicyDirectoryBinding, PolicyDiskEncryption,
    PolicyDockItem, PolicyFilesProcesses, PolicyGeneral, PolicyMaintenance,
    PolicyManagementAccount, PolicyOpenFirmwareEfiPassword, PolicyPackage,
    PolicyPackageConfiguration, PolicyPrinter, PolicyReboot, PolicyScript,
    PolicyUserInteraction,
};
use crate::client::ResourcePolicy;
use crate::utils::{
    bool_or, bool_or_default, entries, number_or, number_or_default, string_or, string_or_default,
};

use super::state::{
    AccountMaintenanceState, DiskEncryptionState, FilesProcessesState, MaintenanceState,
    ManagementAccountState, OpenFirmwareEfiPasswordState, PackagesState, PayloadsState,
    PolicyState, RebootState, UserInteractionState,
};

impl<'a> PolicyState<'a> {
    /// Build the API request for this policy.
    ///
    /// Every field is copied. Payloads and fields left null are sent with the
    /// value Jamf Pro documents for an unconfigured payload.
    pub fn to_request(&self) -> ResourcePolicy {
        let mut policy = ResourcePolicy {
            general: PolicyGeneral {
                name: string_or_default(&self.name),
                enabled: bool_or_default(&self.enabled),
                frequency: string_or_default(&self.frequency),
                trigger_checkin: bool_or_default(&self.trigger_checkin),
                trigger_other: string_or_default(&self.trigger_other),
            },
            ..Default::default()
        };
        if let Some(payloads) = entries(&self.payloads).next() {
            payloads.fill(&mut policy);
        }
        policy
    }
}

impl PayloadsState {
    fn fill(&self, policy: &mut ResourcePolicy) {
        if let Some(disk_encryption) = entries(&self.disk_encryption).next() {
            policy.disk_encryption = disk_encryption.into();
        }
        if let Some(packages) = entries(&self.packages).next() {
            policy.package_configuration = packages.into();
        }
        policy.scripts = entries(&self.scripts)
            .map(|script| PolicyScript {
                id: number_or_default(&script.id),
                priority: string_or_default(&script.priority),
                parameter4: string_or_default(&script.parameter4),
                parameter5: string_or_default(&script.parameter5),
                parameter6: string_or_default(&script.parameter6),
                parameter7: string_or_default(&script.parameter7),
                parameter8: string_or_default(&script.parameter8),
                parameter9: string_or_default(&script.parameter9),
                parameter10: string_or_default(&script.parameter10),
                parameter11: string_or_default(&script.parameter11),
            })
            .collect();
        policy.printers = entries(&self.printers)
            .map(|printer| PolicyPrinter {
                id: number_or_default(&printer.id),
                name: string_or_default(&printer.name),
                action: string_or_default(&printer.action),
                make_default: bool_or_default(&printer.make_default),
            })
            .collect();
        policy.dock_items = entries(&self.dock_items)
            .map(|dock_item| PolicyDockItem {
                id: number_or_default(&dock_item.id),
                name: string_or_default(&dock_item.name),
                action: string_or_default(&dock_item.action),
            })
            .collect();
        if let Some(account_maintenance) = entries(&self.account_maintenance).next() {
            policy.account_maintenance = account_maintenance.into();
        }
        if let Some(files_processes) = entries(&self.files_processes).next() {
            policy.files_processes = files_processes.into();
        }
        if let Some(user_interaction) = entries(&self.user_interaction).next() {
            policy.user_interaction = user_interaction.into();
        }
        if let Some(reboot) = entries(&self.reboot).next() {
            policy.reboot = reboot.into();
        }
        if let Some(maintenance) = entries(&self.maintenance).next() {
            policy.maintenance = maintenance.into();
        }
    }
}

impl From<&DiskEncryptionState> for PolicyDiskEncryption {
    fn from(value: &DiskEncryptionState) -> Self {
        let defaults = Self::default();
        Self {
            action: string_or(&value.action, defaults.action),
            disk_encryption_configuration_id: number_or(
                &value.disk_encryption_configuration_id,
                defaults.disk_encryption_configuration_id,
            ),
            auth_restart: bool_or(&value.auth_restart, defaults.auth_restart),
            remediate_key_type: string_or(&value.remediate_key_type, defaults.remediate_key_type),
            remediate_disk_encryption_configuration_id: number_or(
                &value.remediate_disk_encryption_configuration_id,
                defaults.remediate_disk_encryption_configuration_id,
            ),
        }
    }
}

impl From<&PackagesState> for PolicyPackageConfiguration {
    fn from(value: &PackagesState) -> Self {
        Self {
            distribution_point: string_or_default(&value.distribution_point),
            packages: entries(&value.package)
                .map(|package| PolicyPackage {
                    id: number_or_default(&package.id),
                    action: string_or_default(&package.action),
                    fill_user_template: bool_or_default(&package.fill_user_template),
                    fill_existing_users: bool_or_default(&package.fill_existing_user_template),
                })
                .collect(),
        }
    }
}

impl From<&AccountMaintenanceState> for PolicyAccountMaintenance {
    fn from(value: &AccountMaintenanceState) -> Self {
        Self {
            accounts: entries(&value.local_accounts)
                .flat_map(|local_accounts| entries(&local_accounts.account))
                .map(|account| PolicyAccount {
                    action: string_or_default(&account.action),
                    username: string_or_default(&account.username),
                    realname: string_or_default(&account.realname),
                    password: string_or_default(&account.password),
                    archive_home_directory: bool_or_default(&account.archive_home_directory),
                    archive_home_directory_to: string_or_default(
                        &account.archive_home_directory_to,
                    ),
                    home: string_or_default(&account.home),
                    hint: string_or_default(&account.hint),
                    picture: string_or_default(&account.picture),
                    admin: bool_or_default(&account.admin),
                    filevault_enabled: bool_or_default(&account.filevault_enabled),
                })
                .collect(),
            directory_bindings: entries(&value.directory_bindings)
                .flat_map(|bindings| entries(&bindings.binding))
                .map(|binding| PolicyDirectoryBinding {
                    id: number_or_default(&binding.id),
                    name: string_or_default(&binding.name),
                })
                .collect(),
            management_account: entries(&value.management_account)
                .next()
                .map(PolicyManagementAccount::from),
            open_firmware_efi_password: entries(&value.open_firmware_efi_password)
                .next()
                .map(PolicyOpenFirmwareEfiPassword::from),
        }
    }
}

impl From<&ManagementAccountState> for PolicyManagementAccount {
    fn from(value: &ManagementAccountState) -> Self {
        let defaults = Self::default();
        Self {
            action: string_or(&value.action, defaults.action),
            managed_password: string_or(&value.managed_password, defaults.managed_password),
            managed_password_length: number_or(
                &value.managed_password_length,
                defaults.managed_password_length,
            ),
        }
    }
}

impl From<&OpenFirmwareEfiPasswordState> for PolicyOpenFirmwareEfiPassword {
    fn from(value: &OpenFirmwareEfiPasswordState) -> Self {
        let defaults = Self::default();
        Self {
            of_mode: string_or(&value.of_mode, defaults.of_mode),
            of_password: string_or(&value.of_password, defaults.of_password),
        }
    }
}

impl From<&FilesProcessesState> for PolicyFilesProcesses {
    fn from(value: &FilesProcessesState) -> Self {
        Self {
            search_by_path: string_or_default(&value.search_by_path),
            delete_file: bool_or_default(&value.delete_file),
            locate_file: string_or_default(&value.locate_file),
            update_locate_database: bool_or_default(&value.update_locate_database),
            spotlight_search: string_or_default(&value.spotlight_search),
            search_for_process: string_or_default(&value.search_for_process),
            kill_process: bool_or_default(&value.kill_process),
            run_command: string_or_default(&value.run_command),
        }
    }
}

impl From<&UserInteractionState> for PolicyUserInteraction {
    fn from(value: &UserInteractionState) -> Self {
        Self {
            message_start: string_or_default(&value.message_start),
            allow_user_to_defer: bool_or_default(&value.allow_user_to_defer),
            allow_deferral_until_utc: string_or_default(&value.allow_deferral_until_utc),
            allow_deferral_minutes: number_or_default(&value.allow_deferral_minutes),
            message_finish: string_or_default(&value.message_finish),
        }
    }
}

impl From<&RebootState> for PolicyReboot {
    fn from(value: &RebootState) -> Self {
        let defaults = Self::default();
        Self {
            message: string_or(&value.message, defaults.message),
            specify_startup: string_or(&value.specify_startup, defaults.specify_startup),
            startup_disk: string_or(&value.startup_disk, defaults.startup_disk),
            no_user_logged_in: string_or(&value.no_user_logged_in, defaults.no_user_logged_in),
            user_logged_in: string_or(&value.user_logged_in, defaults.user_logged_in),
            minutes_until_reboot: number_or(
                &value.minutes_until_reboot,
                defaults.minutes_until_reboot,
            ),
            start_reboot_timer_immediately: bool_or(
                &value.start_reboot_timer_immediately,
                defaults.start_reboot_timer_immediately,
            ),
            file_vault_2_reboot: bool_or(&value.file_vault_2_reboot, defaults.file_vault_2_reboot),
        }
    }
}

impl From<&MaintenanceState> for PolicyMaintenance {
    fn from(value: &MaintenanceState) -> Self {
        Self {
            recon: bool_or_default(&value.recon),
            reset_name: bool_or_default(&value.reset_name),
            install_all_cached_packages: bool_or_default(&value.install_all_cached_packages),
            heal: bool_or_default(&value.heal),
            prebindings: bool_or_default(&value.prebindings),
            permissions: bool_or_default(&value.permissions),
            byhost: bool_or_default(&value.byhost),
            system_cache: bool_or_default(&value.system_cache),
            user_cache: bool_or_default(&value.user_cache),
            verify: bool_or_default(&value.verify),
        }
    }
}
