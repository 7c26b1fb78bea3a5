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

use crate::client::models::PolicyGeneral;
use crate::client::Client;
use crate::flatten::state_payloads;
use crate::utils::{
    parse_id, refreshed_bool, refreshed_string, WithNormalize, WithSchema, WithValidate,
};

use super::state::PolicyState;

pub struct PolicyResource<C: Client> {
    pub(super) client: Arc<C>,
}

impl<C: Client> PolicyResource<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: Client> std::fmt::Debug for PolicyResource<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyResource").finish_non_exhaustive()
    }
}

#[async_trait]
impl<C> Resource for PolicyResource<C>
where
    C: Client,
{
    type State<'a> = PolicyState<'a>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(PolicyState::schema())
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

        let policy = match self.client.get_policy(id).await {
            Ok(Some(policy)) => policy,
            Ok(None) => {
                diags.error(
                    "Policy not found",
                    format!("Policy {id} does not exist anymore"),
                    AttributePath::new("id"),
                );
                return None;
            }
            Err(err) => {
                diags.error("Failed to read policy", err.to_string(), AttributePath::new("id"));
                return None;
            }
        };

        let mut state = state;
        state.set_general(&policy.general);
        state_payloads(&mut state, &policy, diags);

        Some((state, private_state))
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
        let mut state = proposed_state;
        state.id = prior_state.id;
        state.normalize(diags);

        Some((state, prior_private_state, Vec::new()))
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

        match self.client.create_policy(&state.to_request()).await {
            Ok(id) => {
                state.id = Value::Value(Cow::Owned(id.to_string()));
                Some((state, private_state))
            }
            Err(err) => {
                diags.root_error("Failed to create policy", err.to_string());
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

        if let Err(err) = self.client.update_policy(id, &state.to_request()).await {
            diags.error(
                "Failed to update policy",
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

        if let Err(err) = self.client.delete_policy(id).await {
            diags.error(
                "Failed to destroy policy",
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
        let mut state = PolicyState {
            id: Value::Value(Cow::Owned(id)),
            ..Default::default()
        };
        parse_id(diags, &state.id)?;
        state.normalize(diags);

        Some((state, Default::default()))
    }
}

impl<'a> PolicyState<'a> {
    fn set_general(&mut self, general: &PolicyGeneral) {
        self.name = Value::Value(Cow::Owned(general.name.clone()));
        self.enabled = refreshed_bool(&self.enabled, general.enabled);
        self.frequency = refreshed_string(&self.frequency, general.frequency.clone());
        self.trigger_checkin = refreshed_bool(&self.trigger_checkin, general.trigger_checkin);
        self.trigger_other = refreshed_string(&self.trigger_other, general.trigger_other.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::MemoryClient;
    use crate::client::models::{PolicyMaintenance, PolicyScript};
    use crate::client::ResourcePolicy;
    use crate::policy::state::{MaintenanceState, PayloadsState};
    use crate::utils::{entries, list_of};

    fn resource() -> (Arc<MemoryClient>, PolicyResource<MemoryClient>) {
        let client = Arc::new(MemoryClient::default());
        (client.clone(), PolicyResource::new(client))
    }

    fn config() -> PolicyState<'static> {
        PolicyState {
            name: Value::Value(Cow::from("Inventory")),
            enabled: Value::Value(true),
            payloads: list_of([PayloadsState {
                maintenance: list_of([MaintenanceState {
                    recon: Value::Value(true),
                    ..Default::default()
                }]),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_sends_the_planned_policy() {
        let (client, resource) = resource();
        let mut diags = Diagnostics::default();

        let (planned, private_state) = resource
            .plan_create(&mut diags, config(), config(), Value::Null)
            .await
            .unwrap();
        assert!(planned.id.is_unknown());

        let (state, _) = resource
            .create(&mut diags, planned, config(), private_state, Value::Null)
            .await
            .unwrap();
        assert!(diags.errors.is_empty());

        let id = parse_id(&mut diags, &state.id).unwrap();
        let policy = client.policy(id).unwrap();
        assert_eq!(policy.general.name, "Inventory");
        assert!(policy.general.enabled);
        assert!(policy.maintenance.recon);
    }

    #[tokio::test]
    async fn read_after_create_shows_only_configured_payloads() {
        let (_, resource) = resource();
        let mut diags = Diagnostics::default();
        let (state, private_state) = resource
            .create(&mut diags, config(), config(), Value::Null, Value::Null)
            .await
            .unwrap();

        let (state, _) = resource
            .read(&mut diags, state, private_state, Value::Null)
            .await
            .unwrap();
        assert!(diags.errors.is_empty());

        let payloads = entries(&state.payloads).collect::<Vec<_>>();
        assert_eq!(payloads.len(), 1);
        let maintenance = entries(&payloads[0].maintenance).collect::<Vec<_>>();
        assert_eq!(maintenance.len(), 1);
        assert_eq!(maintenance[0].recon, Value::Value(true));
        for (name, count) in [
            ("disk_encryption", entries(&payloads[0].disk_encryption).count()),
            ("packages", entries(&payloads[0].packages).count()),
            ("account_maintenance", entries(&payloads[0].account_maintenance).count()),
            ("files_processes", entries(&payloads[0].files_processes).count()),
            ("user_interaction", entries(&payloads[0].user_interaction).count()),
            ("reboot", entries(&payloads[0].reboot).count()),
        ] {
            assert_eq!(count, 0, "{name}");
        }
    }

    #[tokio::test]
    async fn read_flattens_payloads() {
        let (client, resource) = resource();
        let mut policy = ResourcePolicy::default();
        policy.general.name = "Scripts".to_owned();
        policy.scripts = vec![PolicyScript {
            id: 9,
            priority: "Before".to_owned(),
            parameter4: "alpha".to_owned(),
            ..Default::default()
        }];
        let id = client.insert_policy(policy);

        let mut diags = Diagnostics::default();
        let (state, _) = resource
            .import(&mut diags, id.to_string())
            .await
            .unwrap();
        let (state, _) = resource
            .read(&mut diags, state, Value::Null, Value::Null)
            .await
            .unwrap();
        assert!(diags.errors.is_empty());
        assert_eq!(state.name, Value::Value(Cow::from("Scripts")));
        assert!(state.enabled.is_null());

        let payloads = entries(&state.payloads).next().unwrap();
        assert_eq!(payloads.reboot, Value::Value(Vec::new()));
        assert_eq!(payloads.disk_encryption, Value::Value(Vec::new()));
        let scripts = entries(&payloads.scripts).collect::<Vec<_>>();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].id, Value::Value(9));
        assert_eq!(scripts[0].parameter4, Value::Value("alpha".to_owned()));
        assert_eq!(scripts[0].parameter5, Value::Null);
    }

    #[tokio::test]
    async fn update_replaces_the_policy() {
        let (client, resource) = resource();
        let mut diags = Diagnostics::default();
        let (state, private_state) = resource
            .create(&mut diags, config(), config(), Value::Null, Value::Null)
            .await
            .unwrap();

        let mut proposed = config();
        proposed.payloads = list_of([PayloadsState::default()]);
        let (planned, private_state, replace) = resource
            .plan_update(
                &mut diags,
                state.clone(),
                proposed.clone(),
                proposed.clone(),
                private_state,
                Value::Null,
            )
            .await
            .unwrap();
        assert!(replace.is_empty());
        assert_eq!(planned.id, state.id);

        resource
            .update(&mut diags, state.clone(), planned, proposed, private_state, Value::Null)
            .await
            .unwrap();
        assert!(diags.errors.is_empty());

        let id = parse_id(&mut diags, &state.id).unwrap();
        assert_eq!(client.policy(id).unwrap().maintenance, PolicyMaintenance::default());
    }

    #[tokio::test]
    async fn missing_policy_is_an_error() {
        let (_, resource) = resource();
        let mut diags = Diagnostics::default();
        let state = PolicyState {
            id: Value::Value(Cow::from("404")),
            ..Default::default()
        };

        assert!(resource
            .read(&mut diags, state.clone(), Value::Null, Value::Null)
            .await
            .is_none());
        assert!(resource
            .destroy(&mut diags, state, Value::Null)
            .await
            .is_none());
        assert_eq!(diags.errors.len(), 2);
    }

    #[tokio::test]
    async fn destroy_removes_the_policy() {
        let (client, resource) = resource();
        let id = client.insert_policy(ResourcePolicy::default());
        let mut diags = Diagnostics::default();
        let state = PolicyState {
            id: Value::Value(Cow::Owned(id.to_string())),
            ..Default::default()
        };

        resource
            .destroy(&mut diags, state, Value::Null)
            .await
            .unwrap();
        assert!(client.policy(id).is_none());
    }
}
