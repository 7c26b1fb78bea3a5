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

use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::{Client, ClientConfig, ResourcePackage, ResourcePolicy};

#[derive(Debug, Default)]
struct Store {
    config: Option<ClientConfig>,
    next_id: i64,
    uploads: Vec<String>,
    packages: BTreeMap<i64, ResourcePackage>,
    policies: BTreeMap<i64, ResourcePolicy>,
}

/// Client keeping everything in memory
#[derive(Debug, Default)]
pub(crate) struct MemoryClient {
    store: Mutex<Store>,
}

impl MemoryClient {
    fn with_store<R>(&self, f: impl FnOnce(&mut Store) -> R) -> Result<R> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| anyhow!("memory client store is poisoned"))?;
        Ok(f(&mut store))
    }

    pub(crate) fn config(&self) -> Option<ClientConfig> {
        self.with_store(|store| store.config.clone()).ok().flatten()
    }

    pub(crate) fn uploads(&self) -> Vec<String> {
        self.with_store(|store| store.uploads.clone())
            .unwrap_or_default()
    }

    pub(crate) fn package(&self, id: i64) -> Option<ResourcePackage> {
        self.with_store(|store| store.packages.get(&id).cloned())
            .ok()
            .flatten()
    }

    pub(crate) fn policy(&self, id: i64) -> Option<ResourcePolicy> {
        self.with_store(|store| store.policies.get(&id).cloned())
            .ok()
            .flatten()
    }

    pub(crate) fn insert_policy(&self, policy: ResourcePolicy) -> i64 {
        self.with_store(|store| {
            store.next_id += 1;
            store.policies.insert(store.next_id, policy);
            store.next_id
        })
        .unwrap_or_default()
    }
}

#[async_trait]
impl Client for MemoryClient {
    async fn configure(&self, config: &ClientConfig) -> Result<()> {
        if config.client_secret == "invalid" {
            return Err(anyhow!("authentication failed"));
        }
        self.with_store(|store| store.config = Some(config.clone()))
    }

    async fn upload_package(&self, file_path: &str) -> Result<()> {
        self.with_store(|store| store.uploads.push(file_path.to_owned()))
    }

    async fn create_package(&self, package: &ResourcePackage) -> Result<i64> {
        self.with_store(|store| {
            store.next_id += 1;
            store.packages.insert(store.next_id, package.clone());
            store.next_id
        })
    }

    async fn get_package(&self, id: i64) -> Result<Option<ResourcePackage>> {
        self.with_store(|store| store.packages.get(&id).cloned())
    }

    async fn update_package(&self, id: i64, package: &ResourcePackage) -> Result<()> {
        self.with_store(|store| match store.packages.get_mut(&id) {
            Some(stored) => {
                *stored = package.clone();
                Ok(())
            }
            None => Err(anyhow!("package {id} does not exist")),
        })?
    }

    async fn delete_package(&self, id: i64) -> Result<()> {
        self.with_store(|store| store.packages.remove(&id))?
            .map(|_| ())
            .ok_or_else(|| anyhow!("package {id} does not exist"))
    }

    async fn create_policy(&self, policy: &ResourcePolicy) -> Result<i64> {
        Ok(self.insert_policy(policy.clone()))
    }

    async fn get_policy(&self, id: i64) -> Result<Option<ResourcePolicy>> {
        self.with_store(|store| store.policies.get(&id).cloned())
    }

    async fn update_policy(&self, id: i64, policy: &ResourcePolicy) -> Result<()> {
        self.with_store(|store| match store.policies.get_mut(&id) {
            Some(stored) => {
                *stored = policy.clone();
                Ok(())
            }
            None => Err(anyhow!("policy {id} does not exist")),
        })?
    }

    async fn delete_policy(&self, id: i64) -> Result<()> {
        self.with_store(|store| store.policies.remove(&id))?
            .map(|_| ())
            .ok_or_else(|| anyhow!("policy {id} does not exist"))
    }
}
