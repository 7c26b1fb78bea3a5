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

use serde::{Deserialize, Serialize};
use tf_provider::map;
use tf_provider::schema::{
    Attribute, AttributeConstraint, AttributeType, Block, Description, NestedBlock, Schema,
};
use tf_provider::value::{Value, ValueList, ValueNumber, ValueString};

use crate::attributes::{AttrValue, AttributeBag};
use crate::error::StateCommitError;
use crate::utils::WithSchema;

/// Typed attribute that a flattened value can be stored into
pub(crate) trait StateField: Sized {
    fn attr_type() -> AttributeType;
    fn from_attr(path: &str, value: Option<&AttrValue>) -> Result<Self, StateCommitError>;
}

impl StateField for Value<String> {
    fn attr_type() -> AttributeType {
        AttributeType::String
    }
    fn from_attr(path: &str, value: Option<&AttrValue>) -> Result<Self, StateCommitError> {
        match value {
            None => Ok(Value::Null),
            Some(AttrValue::String(s)) => Ok(Value::Value(s.clone())),
            Some(_) => Err(StateCommitError::WrongType {
                path: path.to_owned(),
                expected: "string",
            }),
        }
    }
}

impl StateField for ValueNumber {
    fn attr_type() -> AttributeType {
        AttributeType::Number
    }
    fn from_attr(path: &str, value: Option<&AttrValue>) -> Result<Self, StateCommitError> {
        match value {
            None => Ok(Value::Null),
            Some(AttrValue::Number(n)) => Ok(Value::Value(*n)),
            Some(_) => Err(StateCommitError::WrongType {
                path: path.to_owned(),
                expected: "number",
            }),
        }
    }
}

impl StateField for Value<bool> {
    fn attr_type() -> AttributeType {
        AttributeType::Bool
    }
    fn from_attr(path: &str, value: Option<&AttrValue>) -> Result<Self, StateCommitError> {
        match value {
            None => Ok(Value::Null),
            Some(AttrValue::Bool(b)) => Ok(Value::Value(*b)),
            Some(_) => Err(StateCommitError::WrongType {
                path: path.to_owned(),
                expected: "bool",
            }),
        }
    }
}

/// Nested block that a flattened map can be stored into
pub(crate) trait StateBlock: Sized {
    fn block() -> Block;
    fn from_bag(path: &str, bag: &AttributeBag) -> Result<Self, StateCommitError>;
}

/// Store a flattened list into a list block; a missing key is an empty list.
pub(crate) fn blocks_from_attr<T: StateBlock>(
    path: &str,
    value: Option<&AttrValue>,
) -> Result<ValueList<Value<T>>, StateCommitError> {
    match value {
        None => Ok(Value::Value(Vec::new())),
        Some(AttrValue::List(entries)) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| T::from_bag(&format!("{path}.{i}"), entry).map(Value::Value))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Value),
        Some(_) => Err(StateCommitError::WrongType {
            path: path.to_owned(),
            expected: "list",
        }),
    }
}

/// Declare a payload block: its state struct, its schema and how a flattened
/// map is stored into it.
macro_rules! state_block {
    (@sensitive) => { false };
    (@sensitive sensitive) => { true };
    (
        $(#[$meta:meta])*
        $name:ident => $desc:literal {
            $($field:ident: $ty:ty => $field_desc:literal $([$flag:ident])?,)*
        }
        $(blocks {
            $($block:ident: $block_ty:ty,)*
        })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            $(pub $field: $ty,)*
            $($(pub $block: ValueList<Value<$block_ty>>,)*)?
        }

        impl StateBlock for $name {
            fn block() -> Block {
                let mut block = Block {
                    description: Description::plain($desc),
                    ..Default::default()
                };
                $(block.attributes.insert(
                    stringify!($field).to_owned(),
                    Attribute {
                        attr_type: <$ty as StateField>::attr_type(),
                        description: Description::plain($field_desc),
                        constraint: AttributeConstraint::OptionalComputed,
                        sensitive: state_block!(@sensitive $($flag)?),
                        deprecated: false,
                    },
                );)*
                $($(block.blocks.insert(
                    stringify!($block).to_owned(),
                    NestedBlock::List(<$block_ty as StateBlock>::block()),
                );)*)?
                block
            }

            fn from_bag(path: &str, bag: &AttributeBag) -> Result<Self, StateCommitError> {
                const KEYS: &[&str] = &[$(stringify!($field),)* $($(stringify!($block),)*)?];
                if let Some(key) = bag.keys().find(|key| !KEYS.contains(&key.as_str())) {
                    return Err(StateCommitError::UnknownKey {
                        path: path.to_owned(),
                        key: key.clone(),
                    });
                }
                Ok(Self {
                    $($field: <$ty as StateField>::from_attr(
                        &format!("{path}.{}", stringify!($field)),
                        bag.get(stringify!($field)),
                    )?,)*
                    $($($block: blocks_from_attr(
                        &format!("{path}.{}", stringify!($block)),
                        bag.get(stringify!($block)),
                    )?,)*)?
                })
            }
        }
    };
}

state_block! {
    PayloadsState => "Payloads deployed by the policy" {}
    blocks {
        disk_encryption: DiskEncryptionState,
        packages: PackagesState,
        scripts: ScriptState,
        printers: PrinterState,
        dock_items: DockItemState,
        account_maintenance: AccountMaintenanceState,
        files_processes: FilesProcessesState,
        user_interaction: UserInteractionState,
        reboot: RebootState,
        maintenance: MaintenanceState,
    }
}

state_block! {
    DiskEncryptionState => "Disk encryption settings" {
        action: Value<String> => "Disk encryption action: `none`, `apply` or `remediate`",
        disk_encryption_configuration_id: ValueNumber => "Disk encryption configuration to apply",
        auth_restart: Value<bool> => "Allow authenticated restart",
        remediate_key_type: Value<String> => "Key type to remediate: `Individual`, `Institutional` or `Individual And Institutional`",
        remediate_disk_encryption_configuration_id: ValueNumber => "Disk encryption configuration to remediate",
    }
}

state_block! {
    PackagesState => "Packages deployed by the policy" {
        distribution_point: Value<String> => "Distribution point to download the packages from",
    }
    blocks {
        package: PackageItemState,
    }
}

state_block! {
    PackageItemState => "Package deployed by the policy" {
        id: ValueNumber => "Package id",
        action: Value<String> => "Action to perform: `Install`, `Cache` or `Install Cached`",
        fill_user_template: Value<bool> => "Fill the user template",
        fill_existing_user_template: Value<bool> => "Fill existing user home directories",
    }
}

state_block! {
    /// Script run by a policy; parameters left empty are not stored.
    ScriptState => "Script run by the policy" {
        id: ValueNumber => "Script id",
        priority: Value<String> => "When to run the script: `Before` or `After`",
        parameter4: Value<String> => "Script parameter 4",
        parameter5: Value<String> => "Script parameter 5",
        parameter6: Value<String> => "Script parameter 6",
        parameter7: Value<String> => "Script parameter 7",
        parameter8: Value<String> => "Script parameter 8",
        parameter9: Value<String> => "Script parameter 9",
        parameter10: Value<String> => "Script parameter 10",
        parameter11: Value<String> => "Script parameter 11",
    }
}

state_block! {
    PrinterState => "Printer mapped by the policy" {
        id: ValueNumber => "Printer id",
        name: Value<String> => "Printer name",
        action: Value<String> => "Action to perform: `install` or `uninstall`",
        make_default: Value<bool> => "Make the printer the default one",
    }
}

state_block! {
    DockItemState => "Dock item managed by the policy" {
        id: ValueNumber => "Dock item id",
        name: Value<String> => "Dock item name",
        action: Value<String> => "Action to perform: `Add To Beginning`, `Add To End` or `Remove`",
    }
}

state_block! {
    AccountMaintenanceState => "Local accounts, directory bindings and firmware settings" {}
    blocks {
        local_accounts: LocalAccountsState,
        directory_bindings: DirectoryBindingsState,
        management_account: ManagementAccountState,
        open_firmware_efi_password: OpenFirmwareEfiPasswordState,
    }
}

state_block! {
    LocalAccountsState => "Local accounts managed by the policy" {}
    blocks {
        account: AccountState,
    }
}

state_block! {
    AccountState => "Local account" {
        action: Value<String> => "Action to perform: `Create`, `Reset`, `Delete` or `DisableFileVault`",
        username: Value<String> => "Account short name",
        realname: Value<String> => "Account full name",
        password: Value<String> => "Account password" [sensitive],
        archive_home_directory: Value<bool> => "Archive the home directory on deletion",
        archive_home_directory_to: Value<String> => "Where to archive the home directory",
        home: Value<String> => "Home directory path",
        hint: Value<String> => "Password hint",
        picture: Value<String> => "Account picture path",
        admin: Value<bool> => "Give the account admin privileges",
        filevault_enabled: Value<bool> => "Allow the account to unlock FileVault",
    }
}

state_block! {
    DirectoryBindingsState => "Directory bindings applied by the policy" {}
    blocks {
        binding: DirectoryBindingState,
    }
}

state_block! {
    DirectoryBindingState => "Directory binding" {
        id: ValueNumber => "Directory binding id",
        name: Value<String> => "Directory binding name",
    }
}

state_block! {
    ManagementAccountState => "Management account password settings" {
        action: Value<String> => "Action to perform: `doNotChange`, `specified`, `random`, `reset`, `fileVaultEnable` or `fileVaultDisable`",
        managed_password: Value<String> => "Password to set" [sensitive],
        managed_password_length: ValueNumber => "Length of a random password",
    }
}

state_block! {
    OpenFirmwareEfiPasswordState => "Open firmware/EFI password settings" {
        of_mode: Value<String> => "Firmware password mode: `none` or `command`",
        of_password: Value<String> => "Firmware password" [sensitive],
    }
}

state_block! {
    FilesProcessesState => "File and process actions" {
        search_by_path: Value<String> => "Path of a file to search for",
        delete_file: Value<bool> => "Delete the file found",
        locate_file: Value<String> => "Name of a file to locate",
        update_locate_database: Value<bool> => "Update the locate database before searching",
        spotlight_search: Value<String> => "Spotlight query",
        search_for_process: Value<String> => "Name of a process to search for",
        kill_process: Value<bool> => "Kill the process found",
        run_command: Value<String> => "Command to run as root",
    }
}

state_block! {
    UserInteractionState => "Messages and deferral settings" {
        message_start: Value<String> => "Message displayed before the policy runs",
        allow_user_to_defer: Value<bool> => "Let the user defer the policy",
        allow_deferral_until_utc: Value<String> => "Date until which the policy can be deferred",
        allow_deferral_minutes: ValueNumber => "Deferral duration in minutes",
        message_finish: Value<String> => "Message displayed after the policy ran",
    }
}

state_block! {
    RebootState => "Restart settings" {
        message: Value<String> => "Message displayed before restarting",
        specify_startup: Value<String> => "Startup volume to boot into",
        startup_disk: Value<String> => "Startup disk: `Current Startup Disk`, `Currently Selected Startup Disk (No Bless)`, `macOS Installer` or `Specify Local Startup Disk`",
        no_user_logged_in: Value<String> => "Behavior when no user is logged in",
        user_logged_in: Value<String> => "Behavior when a user is logged in",
        minutes_until_reboot: ValueNumber => "Minutes before restarting",
        start_reboot_timer_immediately: Value<bool> => "Start the restart timer without waiting for the user",
        file_vault_2_reboot: Value<bool> => "Perform an authenticated restart on FileVault 2 computers",
    }
}

state_block! {
    MaintenanceState => "Maintenance tasks" {
        recon: Value<bool> => "Update the inventory",
        reset_name: Value<bool> => "Reset the computer name",
        install_all_cached_packages: Value<bool> => "Install all cached packages",
        heal: Value<bool> => "Heal the management framework",
        prebindings: Value<bool> => "Update prebindings",
        permissions: Value<bool> => "Fix disk permissions",
        byhost: Value<bool> => "Fix ByHost files",
        system_cache: Value<bool> => "Flush system caches",
        user_cache: Value<bool> => "Flush user caches",
        verify: Value<bool> => "Verify the startup disk",
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyState<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub enabled: Value<bool>,
    pub frequency: ValueString<'a>,
    pub trigger_checkin: Value<bool>,
    pub trigger_other: ValueString<'a>,
    pub payloads: ValueList<Value<PayloadsState>>,
}

impl<'a> PolicyState<'a> {
    /// Replace the payloads with a flattened response.
    ///
    /// The state is left untouched when the payloads do not fit its schema.
    pub fn set_payloads(&mut self, payloads: Vec<AttributeBag>) -> Result<(), StateCommitError> {
        self.payloads = blocks_from_attr("payloads", Some(&AttrValue::List(payloads)))?;
        Ok(())
    }
}

impl<'a> WithSchema for PolicyState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                attributes: map! {
                    "id" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Policy id"),
                        constraint: AttributeConstraint::Computed,
                        sensitive: false,
                        deprecated: false,
                    },
                    "name" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Policy name"),
                        constraint: AttributeConstraint::Required,
                        sensitive: false,
                        deprecated: false,
                    },
                    "enabled" => Attribute {
                        attr_type: AttributeType::Bool,
                        description: Description::plain("Whether the policy runs"),
                        constraint: AttributeConstraint::Optional,
                        sensitive: false,
                        deprecated: false,
                    },
                    "frequency" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("How often the policy runs, e.g. `Once per computer` or `Ongoing`"),
                        constraint: AttributeConstraint::Optional,
                        sensitive: false,
                        deprecated: false,
                    },
                    "trigger_checkin" => Attribute {
                        attr_type: AttributeType::Bool,
                        description: Description::plain("Run the policy on recurring check-in"),
                        constraint: AttributeConstraint::Optional,
                        sensitive: false,
                        deprecated: false,
                    },
                    "trigger_other" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Custom event triggering the policy"),
                        constraint: AttributeConstraint::Optional,
                        sensitive: false,
                        deprecated: false,
                    },
                },
                blocks: map! {
                    "payloads" => NestedBlock::List(PayloadsState::block()),
                },
                description: Description::plain("Jamf Pro policy"),
                ..Default::default()
            },
        }
    }
}
