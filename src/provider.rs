// This file is part of the terraform-provider-meraki project
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
use std::env;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::data_source::DynamicDataSource;
use tf_provider::resource::DynamicResource;
use tf_provider::{
    map, Attribute, AttributeConstraint, AttributePath, AttributeType, Block, Description,
    Diagnostics, Provider, Schema, Value, ValueEmpty,
};
use url::Url;

use crate::api::{ApiDataSource, ApiResource};
use crate::client::{
    Client, ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_REQUESTS_PER_SECOND,
};
use crate::utils::ReportDiagnostics;
use crate::{data_sources, resources};

pub const ENV_API_KEY: &str = "MERAKI_DASHBOARD_API_KEY";
pub const ENV_BASE_URL: &str = "MERAKI_BASE_URL";
pub const ENV_DEBUG: &str = "MERAKI_DEBUG";
pub const ENV_REQUESTS_PER_SECOND: &str = "MERAKI_REQUESTS_PER_SECOND";
pub const ENV_MAX_RETRIES: &str = "MERAKI_MAX_RETRIES";

/// Client shared by the provider with its resources and data sources
///
/// Resources are instantiated before the provider is configured: they get an empty handle
/// that is filled by `configure`.
#[derive(Debug, Clone, Default)]
pub struct ClientHandle(Arc<RwLock<Option<Client>>>);

impl ClientHandle {
    pub fn set(&self, client: Client) {
        let mut guard = match self.0.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(client);
    }

    /// Configured client, or a diagnostic if the provider is not configured yet
    pub fn get(&self, diags: &mut Diagnostics) -> Option<Client> {
        let client = match self.0.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        if client.is_none() {
            diags.root_error(
                "Provider is not configured",
                "The provider must be configured before resources and data sources are used",
            );
        }
        client
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    pub meraki_dashboard_api_key: Value<String>,
    pub meraki_base_url: Value<String>,
    pub meraki_debug: Value<bool>,
    pub meraki_requests_per_second: Value<i64>,
    pub meraki_max_retries: Value<i64>,
}

#[derive(Debug, Default, Clone)]
pub struct MerakiProvider {
    client: ClientHandle,
}

impl MerakiProvider {
    pub fn client(&self) -> &ClientHandle {
        &self.client
    }
}

/// Value of the attribute, or of the environment variable when the attribute is null
fn setting<T: FromStr + Clone>(
    diags: &mut Diagnostics,
    value: &Value<T>,
    variable: &str,
    attribute: &'static str,
) -> Option<Option<T>> {
    match value {
        Value::Value(value) => Some(Some(value.clone())),
        Value::Unknown => {
            diags.error_short(
                "Provider attribute must be known at configuration time",
                AttributePath::new(attribute),
            );
            None
        }
        Value::Null => match env::var(variable) {
            Ok(raw) if !raw.trim().is_empty() => match raw.trim().parse() {
                Ok(value) => Some(Some(value)),
                Err(_) => {
                    diags.root_error(
                        format!("Invalid environment variable {variable}"),
                        format!("Cannot parse {raw:?}"),
                    );
                    None
                }
            },
            _ => Some(None),
        },
    }
}

fn check_base_url(diags: &mut Diagnostics, base_url: &str, attribute: AttributePath) {
    match Url::parse(base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => (),
        Ok(url) => diags.error(
            "Invalid base URL",
            format!("Unsupported scheme {:?}, expected http or https", url.scheme()),
            attribute,
        ),
        Err(err) => diags.error("Invalid base URL", err.to_string(), attribute),
    }
}

/// Resolve the configuration of the client from the provider block and the environment
pub fn client_config(diags: &mut Diagnostics, config: &ProviderConfig) -> Option<ClientConfig> {
    let api_key = setting(
        diags,
        &config.meraki_dashboard_api_key,
        ENV_API_KEY,
        "meraki_dashboard_api_key",
    );
    let base_url = setting(diags, &config.meraki_base_url, ENV_BASE_URL, "meraki_base_url");
    let debug = setting(diags, &config.meraki_debug, ENV_DEBUG, "meraki_debug");
    let requests_per_second = setting(
        diags,
        &config.meraki_requests_per_second,
        ENV_REQUESTS_PER_SECOND,
        "meraki_requests_per_second",
    );
    let max_retries = setting(
        diags,
        &config.meraki_max_retries,
        ENV_MAX_RETRIES,
        "meraki_max_retries",
    );
    let (api_key, base_url, debug, requests_per_second, max_retries) =
        (api_key?, base_url?, debug?, requests_per_second?, max_retries?);

    let Some(api_key) = api_key.filter(|key| !key.is_empty()) else {
        diags.error(
            "Missing dashboard API key",
            format!("Set meraki_dashboard_api_key or the {ENV_API_KEY} environment variable"),
            AttributePath::new("meraki_dashboard_api_key"),
        );
        return None;
    };

    let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
    check_base_url(diags, &base_url, AttributePath::new("meraki_base_url"));

    let requests_per_second = match requests_per_second {
        None => DEFAULT_REQUESTS_PER_SECOND,
        Some(rps) => match u32::try_from(rps) {
            Ok(rps) if rps > 0 => rps,
            _ => {
                diags.error(
                    "Invalid requests per second",
                    format!("Must be a positive integer, got {rps}"),
                    AttributePath::new("meraki_requests_per_second"),
                );
                return None;
            }
        },
    };
    let max_retries = match max_retries {
        None => DEFAULT_MAX_RETRIES,
        Some(retries) => match u32::try_from(retries) {
            Ok(retries) => retries,
            Err(_) => {
                diags.error(
                    "Invalid max retries",
                    format!("Must be a non negative integer, got {retries}"),
                    AttributePath::new("meraki_max_retries"),
                );
                return None;
            }
        },
    };

    if !diags.errors.is_empty() {
        return None;
    }

    Some(ClientConfig {
        base_url,
        api_key,
        requests_per_second,
        max_retries,
        debug: debug.unwrap_or_default(),
        ..Default::default()
    })
}

#[async_trait]
impl Provider for MerakiProvider {
    type Config<'a> = ProviderConfig;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: Block {
                version: 1,
                description: Description::plain("Manage the Meraki dashboard"),
                attributes: map! {
                    "meraki_dashboard_api_key" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain(format!(
                            "Dashboard API key, defaults to the {ENV_API_KEY} environment variable"
                        )),
                        constraint: AttributeConstraint::Optional,
                        sensitive: true,
                        ..Default::default()
                    },
                    "meraki_base_url" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain(format!(
                            "Dashboard API URL, defaults to the {ENV_BASE_URL} environment variable or {DEFAULT_BASE_URL}"
                        )),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                    "meraki_debug" => Attribute {
                        attr_type: AttributeType::Bool,
                        description: Description::plain(format!(
                            "Log request and response bodies, defaults to the {ENV_DEBUG} environment variable"
                        )),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                    "meraki_requests_per_second" => Attribute {
                        attr_type: AttributeType::Number,
                        description: Description::plain(format!(
                            "Maximum number of requests per second, defaults to the {ENV_REQUESTS_PER_SECOND} environment variable or {DEFAULT_REQUESTS_PER_SECOND}"
                        )),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                    "meraki_max_retries" => Attribute {
                        attr_type: AttributeType::Number,
                        description: Description::plain(format!(
                            "Maximum number of retries of a rate limited request, defaults to the {ENV_MAX_RETRIES} environment variable or {DEFAULT_MAX_RETRIES}"
                        )),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                },
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        if let Value::Value(rps) = config.meraki_requests_per_second {
            if rps <= 0 {
                diags.error_short(
                    "Requests per second must be positive",
                    AttributePath::new("meraki_requests_per_second"),
                );
            }
        }
        if let Value::Value(retries) = config.meraki_max_retries {
            if retries < 0 {
                diags.error_short(
                    "Max retries must not be negative",
                    AttributePath::new("meraki_max_retries"),
                );
            }
        }
        if let Value::Value(base_url) = &config.meraki_base_url {
            check_base_url(diags, base_url, AttributePath::new("meraki_base_url"));
        }
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
        let config = client_config(diags, &config)?;
        tracing::info!(%terraform_version, base_url = %config.base_url, "configuring provider");
        let client = Client::new(config).report(diags, "ConfigureProvider")?;
        self.client.set(client);
        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicResource>>> {
        use resources::*;
        let client = &self.client;
        Some(map! {
            "organizations" => ApiResource::<Organizations>::new(client.clone()),
            "organizations_admins" => ApiResource::<OrganizationsAdmins>::new(client.clone()),
            "networks" => ApiResource::<Networks>::new(client.clone()),
            "devices" => ApiResource::<Devices>::new(client.clone()),
            "devices_blink_leds" => ApiResource::<DevicesBlinkLeds>::new(client.clone()),
            "devices_camera_quality_and_retention" =>
                ApiResource::<DevicesCameraQualityAndRetention>::new(client.clone()),
            "devices_cellular_gateway_lan" =>
                ApiResource::<DevicesCellularGatewayLan>::new(client.clone()),
            "networks_appliance_content_filtering" =>
                ApiResource::<NetworksApplianceContentFiltering>::new(client.clone()),
            "networks_appliance_firewall_l3_firewall_rules" =>
                ApiResource::<NetworksApplianceFirewallL3FirewallRules>::new(client.clone()),
            "networks_switch_settings" => ApiResource::<NetworksSwitchSettings>::new(client.clone()),
            "networks_wireless_ssids" => ApiResource::<NetworksWirelessSsids>::new(client.clone()),
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicDataSource>>> {
        use data_sources::*;
        let client = &self.client;
        Some(map! {
            "organizations" => ApiDataSource::<Organizations>::new(client.clone()),
            "networks" => ApiDataSource::<Networks>::new(client.clone()),
            "devices" => ApiDataSource::<Devices>::new(client.clone()),
            "networks_appliance_content_filtering" =>
                ApiDataSource::<NetworksApplianceContentFiltering>::new(client.clone()),
            "networks_sm_devices" => ApiDataSource::<NetworksSmDevices>::new(client.clone()),
            "networks_wireless_ssids" => ApiDataSource::<NetworksWirelessSsids>::new(client.clone()),
        })
    }
}
