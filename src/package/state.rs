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
    Attribute, AttributeConstraint, AttributeType, Block, Description, Schema,
};
use tf_provider::value::{Value, ValueNumber, ValueString};

use crate::attributes::{bag, AttributeBag};
use crate::client::ResourcePackage;
use crate::utils::{
    bool_or_default, number_or_default, refreshed_bool, refreshed_number, refreshed_string,
    string_or_default, WithSchema,
};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageState<'a> {
    pub id: ValueString<'a>,
    pub package_file_path: ValueString<'a>,
    pub name: ValueString<'a>,
    pub filename: ValueString<'a>,
    pub category: ValueString<'a>,
    pub info: ValueString<'a>,
    pub notes: ValueString<'a>,
    pub priority: ValueNumber,
    pub reboot_required: Value<bool>,
    pub fill_user_template: Value<bool>,
    pub fill_existing_users: Value<bool>,
    pub boot_volume_required: Value<bool>,
    pub allow_uninstalled: Value<bool>,
    pub os_requirements: ValueString<'a>,
    pub required_processor: ValueString<'a>,
    pub switch_with_package: ValueString<'a>,
    pub install_if_reported_available: Value<bool>,
    pub reinstall_option: ValueString<'a>,
    pub triggering_files: ValueString<'a>,
    pub send_notification: Value<bool>,
}

impl<'a> PackageState<'a> {
    /// Attributes of the package, null values replaced by their zero value
    pub fn to_attributes(&self) -> AttributeBag {
        bag! {
            "package_file_path" => string_or_default(&self.package_file_path),
            "name" => string_or_default(&self.name),
            "filename" => string_or_default(&self.filename),
            "category" => string_or_default(&self.category),
            "info" => string_or_default(&self.info),
            "notes" => string_or_default(&self.notes),
            "priority" => number_or_default(&self.priority),
            "reboot_required" => bool_or_default(&self.reboot_required),
            "fill_user_template" => bool_or_default(&self.fill_user_template),
            "fill_existing_users" => bool_or_default(&self.fill_existing_users),
            "boot_volume_required" => bool_or_default(&self.boot_volume_required),
            "allow_uninstalled" => bool_or_default(&self.allow_uninstalled),
            "os_requirements" => string_or_default(&self.os_requirements),
            "required_processor" => string_or_default(&self.required_processor),
            "switch_with_package" => string_or_default(&self.switch_with_package),
            "install_if_reported_available" => bool_or_default(&self.install_if_reported_available),
            "reinstall_option" => string_or_default(&self.reinstall_option),
            "triggering_files" => string_or_default(&self.triggering_files),
            "send_notification" => bool_or_default(&self.send_notification),
        }
    }

    /// Refresh the state from the package stored in Jamf Pro
    pub(super) fn set_package(&mut self, package: ResourcePackage) {
        self.name = Value::Value(package.name.into());
        self.filename = Value::Value(package.filename.into());
        self.category = refreshed_string(&self.category, package.category);
        self.info = refreshed_string(&self.info, package.info);
        self.notes = refreshed_string(&self.notes, package.notes);
        self.priority = refreshed_number(&self.priority, package.priority);
        self.reboot_required = refreshed_bool(&self.reboot_required, package.reboot_required);
        self.fill_user_template =
            refreshed_bool(&self.fill_user_template, package.fill_user_template);
        self.fill_existing_users =
            refreshed_bool(&self.fill_existing_users, package.fill_existing_users);
        self.boot_volume_required =
            refreshed_bool(&self.boot_volume_required, package.boot_volume_required);
        self.allow_uninstalled = refreshed_bool(&self.allow_uninstalled, package.allow_uninstalled);
        self.os_requirements = refreshed_string(&self.os_requirements, package.os_requirements);
        self.required_processor =
            refreshed_string(&self.required_processor, package.required_processor);
        self.switch_with_package =
            refreshed_string(&self.switch_with_package, package.switch_with_package);
        self.install_if_reported_available = refreshed_bool(
            &self.install_if_reported_available,
            package.install_if_reported_available,
        );
        self.reinstall_option = refreshed_string(&self.reinstall_option, package.reinstall_option);
        self.triggering_files = refreshed_string(&self.triggering_files, package.triggering_files);
        self.send_notification = refreshed_bool(&self.send_notification, package.send_notification);
    }
}

fn optional(attr_type: AttributeType, description: &str) -> Attribute {
    Attribute {
        attr_type,
        description: Description::plain(description),
        constraint: AttributeConstraint::Optional,
        sensitive: false,
        deprecated: false,
    }
}

impl<'a> WithSchema for PackageState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                attributes: map! {
                    "id" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Package id"),
                        constraint: AttributeConstraint::Computed,
                        sensitive: false,
                        deprecated: false,
                    },
                    "package_file_path" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Local path of the package file to upload"),
                        constraint: AttributeConstraint::Required,
                        sensitive: false,
                        deprecated: false,
                    },
                    "name" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Display name of the package"),
                        constraint: AttributeConstraint::Required,
                        sensitive: false,
                        deprecated: false,
                    },
                    "filename" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("File name of the package, defaults to the base name of `package_file_path`"),
                        constraint: AttributeConstraint::OptionalComputed,
                        sensitive: false,
                        deprecated: false,
                    },
                    "category" => optional(AttributeType::String, "Category of the package"),
                    "info" => optional(AttributeType::String, "Information displayed to the user"),
                    "notes" => optional(AttributeType::String, "Notes about the package"),
                    "priority" => optional(AttributeType::Number, "Install priority, from 1 to 20"),
                    "reboot_required" => optional(AttributeType::Bool, "Restart the computer after installing"),
                    "fill_user_template" => optional(AttributeType::Bool, "Fill the user template"),
                    "fill_existing_users" => optional(AttributeType::Bool, "Fill existing user home directories"),
                    "boot_volume_required" => optional(AttributeType::Bool, "Install on the boot volume"),
                    "allow_uninstalled" => optional(AttributeType::Bool, "Allow the package to be uninstalled"),
                    "os_requirements" => optional(AttributeType::String, "Operating system versions the package requires"),
                    "required_processor" => optional(AttributeType::String, "Processor architecture the package requires"),
                    "switch_with_package" => optional(AttributeType::String, "Package to install when the processor requirement is not met"),
                    "install_if_reported_available" => optional(AttributeType::Bool, "Install only if reported available by software update"),
                    "reinstall_option" => optional(AttributeType::String, "Reinstall behavior"),
                    "triggering_files" => optional(AttributeType::String, "Files triggering the installation"),
                    "send_notification" => optional(AttributeType::Bool, "Notify the user on installation"),
                },
                description: Description::plain("Jamf Pro package"),
                ..Default::default()
            },
        }
    }
}
