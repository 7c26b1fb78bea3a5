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

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
pub(crate) mod memory;
pub mod models;

pub use models::{ResourcePackage, ResourcePolicy};

/// Resolved provider configuration handed to the client
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub instance_url: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Access to a Jamf Pro instance
#[async_trait]
pub trait Client: Send + Sync + 'static {
    /// Set up credentials before any other call
    async fn configure(&self, config: &ClientConfig) -> Result<()>;

    /// Upload a package file to the cloud distribution point
    async fn upload_package(&self, file_path: &str) -> Result<()>;

    /// Create a package, returning its id
    async fn create_package(&self, package: &ResourcePackage) -> Result<i64>;

    /// Fetch a package, `None` if it does not exist
    async fn get_package(&self, id: i64) -> Result<Option<ResourcePackage>>;

    async fn update_package(&self, id: i64, package: &ResourcePackage) -> Result<()>;

    async fn delete_package(&self, id: i64) -> Result<()>;

    /// Create a policy, returning its id
    async fn create_policy(&self, policy: &ResourcePolicy) -> Result<i64>;

    /// Fetch a policy, `None` if it does not exist
    async fn get_policy(&self, id: i64) -> Result<Option<ResourcePolicy>>;

    async fn update_policy(&self, id: i64, policy: &ResourcePolicy) -> Result<()>;

    async fn delete_policy(&self, id: i64) -> Result<()>;
}
