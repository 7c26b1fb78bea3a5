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

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;

use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{schema::Schema, AttributePath, Diagnostics, Resource};

use crate::client::{Client, ResourcePackage};
use crate::error::ValidationError;
use crate::utils::{parse_id, WithNormalize, WithSchema, WithValidate};

use super::construct::{construct_package, construct_package_file_path};
use super::state::PackageState;

pub struct PackageResource<C: Client> {
    pub(super) client: Arc<C>,
}

impl<C: Client> PackageResource<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: Client> std::fmt::Debug for PackageResource<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageResource").finish_non_exhaustive()
    }
}

fn report(diags: &mut Diagnostics, err: ValidationError) {
    diags.error(
        "Invalid package definition",
        err.to_string(),
        AttributePath::new(err.field()),
    );
}

#[async_trait]
impl<C> Resource for PackageResource<C>
where
    C: Client,
{
    type State<'a> = PackageState<'a>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(PackageState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags, Default::default());

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let id = parse_id(diags, &state.id)?;

        match self.client.get_package(id).await {
            Ok(Some(package)) => {
                let mut state = state;
                state.set_package(package);
                Some((state, private_state))
            }
            Ok(None) => {
                diags.error(
                    "Package not found",
                    format!("Package {id} does not exist anymore"),
                    AttributePath::new("id"),
                );
                None
            }
            Err(err) => {
                diags.error(
                    "Failed to read package",
                    err.to_string(),
                    AttributePath::new("id"),
                );
                None
            }
        }
    }

    async fn plan_create<'a>(
        &self,
        diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        state.id = Value::Unknown;
        state.normalize(diags);

        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(
        Self::State<'a>,
        Self::PrivateState<'a>,
        Vec<tf_provider::AttributePath>,
    )> {
        let mut trigger_replace = Vec::new();
        // Imported packages have no known file path to compare against
        if !prior_state.package_file_path.is_null()
            && prior_state.package_file_path != proposed_state.package_file_path
        {
            trigger_replace.push(AttributePath::new("package_file_path"));
        }

        let mut state = proposed_state;
        state.id = prior_state.id;
        state.normalize(diags);

        Some((state, prior_private_state, trigger_replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        _prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        Some(())
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = planned_state;
        state.normalize(diags);

        let attributes = state.to_attributes();
        let constructed = construct_package_file_path(&attributes)
            .and_then(|path| Ok((path, construct_package(&attributes)?)));
        let (file_path, package) = match constructed {
            Ok(constructed) => constructed,
            Err(err) => {
                report(diags, err);
                return None;
            }
        };

        if let Err(err) = self.client.upload_package(&file_path).await {
            diags.error(
                "Failed to upload package file",
                err.to_string(),
                AttributePath::new("package_file_path"),
            );
            return None;
        }

        match self.client.create_package(&package).await {
            Ok(id) => {
                state.id = Value::Value(Cow::Owned(id.to_string()));
                Some((state, private_state))
            }
            Err(err) => {
                diags.root_error("Failed to create package", err.to_string());
                None
            }
        }
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let id = parse_id(diags, &prior_state.id)?;

        let mut state = planned_state;
        state.normalize(diags);
        state.id = prior_state.id;

        let package: ResourcePackage = match construct_package(&state.to_attributes()) {
            Ok(package) => package,
            Err(err) => {
                report(diags, err);
                return None;
            }
        };

        if let Err(err) = self.client.update_package(id, &package).await {
            diags.error(
                "Failed to update package",
                err.to_string(),
                AttributePath::new("id"),
            );
            return None;
        }

        Some((state, private_state))
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let id = parse_id(diags, &state.id)?;

        if let Err(err) = self.client.delete_package(id).await {
            diags.error(
                "Failed to destroy package",
                err.to_string(),
                AttributePath::new("id"),
            );
            return None;
        }
        Some(())
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let state = PackageState {
            id: Value::Value(Cow::Owned(id)),
            ..Default::default()
        };
        parse_id(diags, &state.id)?;

        Some((state, Default::default()))
    }
}
