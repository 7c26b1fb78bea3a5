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

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tf_provider::schema::{
    Attribute, AttributeConstraint, AttributeType, Block, Description, Schema,
};
use tf_provider::value::{Value, ValueEmpty, ValueString};
use tf_provider::{map, AttributePath, Diagnostics, Provider};

use crate::client::{Client, ClientConfig};
use crate::package::PackageResource;
use crate::policy::PolicyResource;

const INSTANCE_URL_VAR: &str = "JAMFPRO_INSTANCE_URL";
const CLIENT_ID_VAR: &str = "JAMFPRO_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "JAMFPRO_CLIENT_SECRET";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig<'a> {
    pub instance_url: ValueString<'a>,
    pub client_id: ValueString<'a>,
    pub client_secret: ValueString<'a>,
}

/// Configured value, or the environment variable when the attribute is null
fn resolve(
    value: &ValueString<'_>,
    var: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Value<String> {
    match value {
        Value::Value(value) => Value::Value(value.to_string()),
        Value::Null => lookup(var).map_or(Value::Null, Value::Value),
        Value::Unknown => Value::Unknown,
    }
}

impl<'a> ProviderConfig<'a> {
    fn resolved(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> [(&'static str, Value<String>); 3] {
        [
            ("instance_url", resolve(&self.instance_url, INSTANCE_URL_VAR, &lookup)),
            ("client_id", resolve(&self.client_id, CLIENT_ID_VAR, &lookup)),
            ("client_secret", resolve(&self.client_secret, CLIENT_SECRET_VAR, &lookup)),
        ]
    }

    /// Check every setting, reporting the missing ones
    fn check(&self, diags: &mut Diagnostics, lookup: impl Fn(&str) -> Option<String>) {
        for (name, value) in self.resolved(lookup) {
            match value {
                Value::Value(value) if value.is_empty() => diags.error_short(
                    format!("`{name}` cannot be empty"),
                    AttributePath::new(name),
                ),
                Value::Value(value) if name == "instance_url" && !value.starts_with("https://") => {
                    diags.error(
                        "Invalid instance URL",
                        format!("`{value}` must start with https://"),
                        AttributePath::new(name),
                    )
                }
                Value::Null => diags.error(
                    format!("Missing `{name}`"),
                    format!("Set `{name}` in the provider block or through the environment"),
                    AttributePath::new(name),
                ),
                _ => (),
            }
        }
    }

    fn to_client_config(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<ClientConfig> {
        let [instance_url, client_id, client_secret] =
            self.resolved(lookup).map(|(_, value)| value);
        match (instance_url, client_id, client_secret) {
            (Value::Value(instance_url), Value::Value(client_id), Value::Value(client_secret)) => {
                Some(ClientConfig {
                    instance_url: instance_url.trim_end_matches('/').to_owned(),
                    client_id,
                    client_secret,
                })
            }
            _ => None,
        }
    }
}

fn environment(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

pub struct JamfProProvider<C: Client> {
    client: Arc<C>,
}

impl<C: Client> JamfProProvider<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl<C: Client> std::fmt::Debug for JamfProProvider<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JamfProProvider").finish_non_exhaustive()
    }
}

fn setting(description: &str, sensitive: bool) -> Attribute {
    Attribute {
        attr_type: AttributeType::String,
        description: Description::plain(description),
        constraint: AttributeConstraint::Optional,
        sensitive,
        deprecated: false,
    }
}

#[async_trait]
impl<C: Client> Provider for JamfProProvider<C> {
    type Config<'a> = ProviderConfig<'a>;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: Block {
                attributes: map! {
                    "instance_url" => setting("Base URL of the Jamf Pro instance, defaults to $JAMFPRO_INSTANCE_URL", false),
                    "client_id" => setting("API client id, defaults to $JAMFPRO_CLIENT_ID", false),
                    "client_secret" => setting("API client secret, defaults to $JAMFPRO_CLIENT_SECRET", true),
                },
                description: Description::plain("jamfpro"),
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        config.check(diags, environment);

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        let Some(config) = config.to_client_config(environment) else {
            diags.root_error(
                "Provider configuration is incomplete",
                "`instance_url`, `client_id` and `client_secret` must all be known",
            );
            return None;
        };
        debug!(
            %terraform_version,
            instance_url = %config.instance_url,
            "configuring Jamf Pro client"
        );

        if let Err(err) = self.client.configure(&config).await {
            diags.root_error("Failed to configure the Jamf Pro client", err.to_string());
            return None;
        }
        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn tf_provider::resource::DynamicResource>>> {
        Some(map! {
            "package" => PackageResource::new(self.client.clone()),
            "policy" => PolicyResource::new(self.client.clone()),
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn tf_provider::data_source::DynamicDataSource>>> {
        Some(HashMap::new())
    }
}
