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

use crate::attributes::{AttrValue, AttributeBag};
use crate::client::ResourcePackage;
use crate::error::ValidationError;

fn get<T>(
    attributes: &AttributeBag,
    field: &'static str,
    expected: &'static str,
    extract: impl FnOnce(&AttrValue) -> Option<T>,
) -> Result<Option<T>, ValidationError> {
    match attributes.get(field) {
        None => Ok(None),
        Some(value) => extract(value)
            .map(Some)
            .ok_or(ValidationError::WrongType { field, expected }),
    }
}

fn string(attributes: &AttributeBag, field: &'static str) -> Result<String, ValidationError> {
    get(attributes, field, "string", |value| value.as_str().map(str::to_owned))
        .map(Option::unwrap_or_default)
}

fn number(attributes: &AttributeBag, field: &'static str) -> Result<i64, ValidationError> {
    get(attributes, field, "number", AttrValue::as_number).map(Option::unwrap_or_default)
}

fn flag(attributes: &AttributeBag, field: &'static str) -> Result<bool, ValidationError> {
    get(attributes, field, "bool", AttrValue::as_bool).map(Option::unwrap_or_default)
}

fn required_string(
    attributes: &AttributeBag,
    field: &'static str,
) -> Result<String, ValidationError> {
    let value = string(attributes, field)?;
    if value.is_empty() {
        Err(ValidationError::MissingRequired { field })
    } else {
        Ok(value)
    }
}

/// Path of the package file to upload to the cloud distribution point
pub fn construct_package_file_path(attributes: &AttributeBag) -> Result<String, ValidationError> {
    required_string(attributes, "package_file_path")
}

/// Build the package definition sent to Jamf Pro
pub fn construct_package(attributes: &AttributeBag) -> Result<ResourcePackage, ValidationError> {
    Ok(ResourcePackage {
        name: required_string(attributes, "name")?,
        filename: string(attributes, "filename")?,
        category: string(attributes, "category")?,
        info: string(attributes, "info")?,
        notes: string(attributes, "notes")?,
        priority: number(attributes, "priority")?,
        reboot_required: flag(attributes, "reboot_required")?,
        fill_user_template: flag(attributes, "fill_user_template")?,
        fill_existing_users: flag(attributes, "fill_existing_users")?,
        boot_volume_required: flag(attributes, "boot_volume_required")?,
        allow_uninstalled: flag(attributes, "allow_uninstalled")?,
        os_requirements: string(attributes, "os_requirements")?,
        required_processor: string(attributes, "required_processor")?,
        switch_with_package: string(attributes, "switch_with_package")?,
        install_if_reported_available: flag(attributes, "install_if_reported_available")?,
        reinstall_option: string(attributes, "reinstall_option")?,
        triggering_files: string(attributes, "triggering_files")?,
        send_notification: flag(attributes, "send_notification")?,
    })
}
