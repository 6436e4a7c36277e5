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

use serde_json::Value as Json;
use tf_provider::{AttributePath, Diagnostics, Value};

use crate::api::{import_parts, segment, Lifecycle, ResourceEndpoint};
use crate::model::{model, Set};
use crate::utils::strings_of;

const PRODUCT_TYPES: &[&str] = &[
    "appliance",
    "camera",
    "cellularGateway",
    "secureConnect",
    "sensor",
    "switch",
    "systemsManager",
    "wireless",
    "wirelessController",
];

model! {
    pub struct Network {
        /// Network ID
        network_id: String => Id("id"), Computed;
        /// Organization ID
        organization_id: String => Path("organizationId"), Required;
        /// Name of the network
        name: String => Body("name"), Required;
        /// Product types of the network, cannot be changed
        product_types: Set<String> => Body("productTypes"), Required;
        /// Timezone of the network
        time_zone: String => Body("timeZone"), OptionalComputed;
        /// Network tags
        tags: Set<String> => Body("tags"), OptionalComputed;
        /// Notes for the network
        notes: String => Body("notes"), OptionalComputed;
        /// Enrollment string of the network
        enrollment_string: String => Body("enrollmentString"), Optional;
        /// URL of the network in the dashboard
        url: String => Body("url"), Computed;
        /// Whether the network is bound to a configuration template
        is_bound_to_config_template: bool => Body("isBoundToConfigTemplate"), Computed;
    }
}

pub struct Networks;

impl ResourceEndpoint for Networks {
    type State = Network;

    const NAME: &'static str = "Network";
    const DESCRIPTION: &'static str = "Network of an organization";
    const LIFECYCLE: Lifecycle = Lifecycle::Collection;
    const IMPORT_FORMAT: &'static str = "networkId";

    fn item_path(state: &Network) -> Option<String> {
        Some(format!("/networks/{}", segment(&state.network_id)?))
    }

    fn create_path(state: &Network) -> Option<String> {
        Some(format!(
            "/organizations/{}/networks",
            segment(&state.organization_id)?
        ))
    }

    fn update_body(mut body: Json) -> Json {
        if let Some(body) = body.as_object_mut() {
            body.remove("productTypes");
        }
        body
    }

    fn requires_replace(prior: &Network, planned: &Network) -> Vec<AttributePath> {
        if prior.product_types != planned.product_types {
            vec![AttributePath::new("product_types")]
        } else {
            Vec::new()
        }
    }

    /// The organization is read back from the network
    fn import(id: &str) -> Option<Network> {
        let [network_id] = import_parts(id, 1)?[..] else {
            return None;
        };
        Some(Network {
            network_id: Value::Value(network_id.to_owned()),
            ..Default::default()
        })
    }

    fn validate(state: &Network, diags: &mut Diagnostics) {
        if let Value::Value(product_types) = &state.product_types {
            if product_types.is_empty() {
                diags.error_short(
                    "At least one product type is required",
                    AttributePath::new("product_types"),
                );
            }
        }
        for (_, product_type) in strings_of(state.product_types.iter().flat_map(Set::iter)) {
            if !PRODUCT_TYPES.contains(&product_type) {
                diags.error(
                    format!("Invalid product type `{product_type}`"),
                    format!("Product types must be among: {}", PRODUCT_TYPES.join(", ")),
                    AttributePath::new("product_types"),
                );
            }
        }
    }
}
