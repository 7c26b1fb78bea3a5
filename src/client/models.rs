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

//! Records exchanged with the Jamf Pro API.

use serde::{Deserialize, Serialize};

/// Package definition, sent on create/update and returned on read
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePackage {
    pub name: String,
    pub filename: String,
    pub category: String,
    pub info: String,
    pub notes: String,
    pub priority: i64,
    pub reboot_required: bool,
    pub fill_user_template: bool,
    pub fill_existing_users: bool,
    pub boot_volume_required: bool,
    pub allow_uninstalled: bool,
    pub os_requirements: String,
    pub required_processor: String,
    pub switch_with_package: String,
    pub install_if_reported_available: bool,
    pub reinstall_option: String,
    pub triggering_files: String,
    pub send_notification: bool,
}

/// Message shown before a restart when none is configured
pub const DEFAULT_REBOOT_MESSAGE: &str = "This computer will restart in 5 minutes. Please save anything you are working on and log out by choosing Log Out from the bottom of the Apple menu.";

/// Policy definition with one sub-record per payload category.
///
/// Sub-records default to the values Jamf Pro documents for an unconfigured
/// payload, not to zero values.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePolicy {
    pub general: PolicyGeneral,
    pub disk_encryption: PolicyDiskEncryption,
    pub package_configuration: PolicyPackageConfiguration,
    pub scripts: Vec<PolicyScript>,
    pub printers: Vec<PolicyPrinter>,
    pub dock_items: Vec<PolicyDockItem>,
    pub account_maintenance: PolicyAccountMaintenance,
    pub files_processes: PolicyFilesProcesses,
    pub user_interaction: PolicyUserInteraction,
    pub reboot: PolicyReboot,
    pub maintenance: PolicyMaintenance,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyGeneral {
    pub name: String,
    pub enabled: bool,
    pub frequency: String,
    pub trigger_checkin: bool,
    pub trigger_other: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyDiskEncryption {
    pub action: String,
    pub disk_encryption_configuration_id: i64,
    pub auth_restart: bool,
    pub remediate_key_type: String,
    pub remediate_disk_encryption_configuration_id: i64,
}

impl Default for PolicyDiskEncryption {
    fn default() -> Self {
        Self {
            action: "none".to_owned(),
            disk_encryption_configuration_id: 0,
            auth_restart: false,
            remediate_key_type: String::new(),
            remediate_disk_encryption_configuration_id: 0,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyPackageConfiguration {
    pub distribution_point: String,
    pub packages: Vec<PolicyPackage>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyPackage {
    pub id: i64,
    pub action: String,
    pub fill_user_template: bool,
    pub fill_existing_users: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyScript {
    pub id: i64,
    pub priority: String,
    pub parameter4: String,
    pub parameter5: String,
    pub parameter6: String,
    pub parameter7: String,
    pub parameter8: String,
    pub parameter9: String,
    pub parameter10: String,
    pub parameter11: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyPrinter {
    pub id: i64,
    pub name: String,
    pub action: String,
    pub make_default: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyDockItem {
    pub id: i64,
    pub name: String,
    pub action: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyAccountMaintenance {
    pub accounts: Vec<PolicyAccount>,
    pub directory_bindings: Vec<PolicyDirectoryBinding>,
    pub management_account: Option<PolicyManagementAccount>,
    pub open_firmware_efi_password: Option<PolicyOpenFirmwareEfiPassword>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyAccount {
    pub action: String,
    pub username: String,
    pub realname: String,
    pub password: String,
    pub archive_home_directory: bool,
    pub archive_home_directory_to: String,
    pub home: String,
    pub hint: String,
    pub picture: String,
    pub admin: bool,
    pub filevault_enabled: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyDirectoryBinding {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyManagementAccount {
    pub action: String,
    pub managed_password: String,
    pub managed_password_length: i64,
}

impl Default for PolicyManagementAccount {
    fn default() -> Self {
        Self {
            action: "doNotChange".to_owned(),
            managed_password: String::new(),
            managed_password_length: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyOpenFirmwareEfiPassword {
    pub of_mode: String,
    pub of_password: String,
}

impl Default for PolicyOpenFirmwareEfiPassword {
    fn default() -> Self {
        Self {
            of_mode: "none".to_owned(),
            of_password: String::new(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyFilesProcesses {
    pub search_by_path: String,
    pub delete_file: bool,
    pub locate_file: String,
    pub update_locate_database: bool,
    pub spotlight_search: String,
    pub search_for_process: String,
    pub kill_process: bool,
    pub run_command: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyUserInteraction {
    pub message_start: String,
    pub allow_user_to_defer: bool,
    pub allow_deferral_until_utc: String,
    pub allow_deferral_minutes: i64,
    pub message_finish: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyReboot {
    pub message: String,
    pub specify_startup: String,
    pub startup_disk: String,
    pub no_user_logged_in: String,
    pub user_logged_in: String,
    pub minutes_until_reboot: i64,
    pub start_reboot_timer_immediately: bool,
    pub file_vault_2_reboot: bool,
}

impl Default for PolicyReboot {
    fn default() -> Self {
        Self {
            message: DEFAULT_REBOOT_MESSAGE.to_owned(),
            specify_startup: String::new(),
            startup_disk: "Current Startup Disk".to_owned(),
            no_user_logged_in: "Do not restart".to_owned(),
            user_logged_in: "Do not restart".to_owned(),
            minutes_until_reboot: 5,
            start_reboot_timer_immediately: false,
            file_vault_2_reboot: false,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyMaintenance {
    pub recon: bool,
    pub reset_name: bool,
    pub install_all_cached_packages: bool,
    pub heal: bool,
    pub prebindings: bool,
    pub permissions: bool,
    pub byhost: bool,
    pub system_cache: bool,
    pub user_cache: bool,
    pub verify: bool,
}
