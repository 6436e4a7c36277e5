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

use tf_provider::Value;

use crate::api::{segment, DataSourceEndpoint, Fetch, Method};
use crate::model::model;

model! {
    pub struct NetworkItem {
        /// Network ID
        id: String => Body("id"), Computed;
        /// Organization ID
        organization_id: String => Body("organizationId"), Computed;
        /// Name of the network
        name: String => Body("name"), Computed;
        /// Product types of the network
        product_types: Vec<Value<String>> => Body("productTypes"), Computed;
        /// Timezone of the network
        time_zone: String => Body("timeZone"), Computed;
        /// Network tags
        tags: Vec<Value<String>> => Body("tags"), Computed;
        /// Enrollment string of the network
        enrollment_string: String => Body("enrollmentString"), Computed;
        /// URL of the network in the dashboard
        url: String => Body("url"), Computed;
        /// Notes for the network
        notes: String => Body("notes"), Computed;
        /// Whether the network is bound to a configuration template
        is_bound_to_config_template: bool => Body("isBoundToConfigTemplate"), Computed;
    }
}

model! {
    pub struct NetworksState {
        /// Organization ID, list its networks when set
        organization_id: String => Path("organizationId"), Optional;
        /// Network ID, read a single network when set
        network_id: String => Path("networkId"), Optional;
        /// Only networks bound to this configuration template
        config_template_id: String => Query("configTemplateId"), Optional;
        /// Only networks bound, or not bound, to a configuration template
        is_bound_to_config_template: bool => Query("isBoundToConfigTemplate"), Optional;
        /// Only networks with these tags
        tags: Vec<Value<String>> => Query("tags"), Optional;
        /// How `tags` are matched: withAnyTags or withAllTags
        tags_filter_type: String => Query("tagsFilterType"), Optional;
        /// Number of entries per page, between 3 and 100000
        per_page: i64 => Query("perPage"), Optional;
        /// Start the list after this network ID
        starting_after: String => Query("startingAfter"), Optional;
        /// End the list before this network ID
        ending_before: String => Query("endingBefore"), Optional;
        /// Network read with `network_id`
        item: NetworkItem => Local("item"), Computed;
        /// Networks of the organization
        items: Vec<Value<NetworkItem>> => Local("items"), Computed;
    }
}

pub struct Networks;

impl DataSourceEndpoint for Networks {
    type State = NetworksState;
    type Item = NetworkItem;

    const NAME: &'static str = "Networks";
    const DESCRIPTION: &'static str = "Networks of an organization";

    fn methods(state: &NetworksState) -> Vec<Method> {
        vec![
            Method {
                present: vec![
                    state.organization_id.is_value(),
                    state.config_template_id.is_value(),
                    state.is_bound_to_config_template.is_value(),
                    state.tags.is_value(),
                    state.tags_filter_type.is_value(),
                    state.per_page.is_value(),
                    state.starting_after.is_value(),
                    state.ending_before.is_value(),
                ],
                fetch: Fetch::All(
                    segment(&state.organization_id)
                        .map(|id| format!("/organizations/{id}/networks")),
                ),
                requires: "organization_id",
            },
            Method {
                present: vec![state.network_id.is_value()],
                fetch: Fetch::One(segment(&state.network_id).map(|id| format!("/networks/{id}"))),
                requires: "network_id",
            },
        ]
    }

    fn store(
        state: &mut NetworksState,
        item: Value<NetworkItem>,
        items: Value<Vec<Value<NetworkItem>>>,
    ) {
        state.item = item;
        state.items = items;
    }
}

model! {
    pub struct SmDeviceItem {
        /// Device ID
        id: String => Body("id"), Computed;
        /// Name of the device
        name: String => Body("name"), Computed;
        /// Tags of the device
        tags: Vec<Value<String>> => Body("tags"), Computed;
        /// SSID the device is connected to
        ssid: String => Body("ssid"), Computed;
        /// Wi-Fi MAC address of the device
        wifi_mac: String => Body("wifiMac"), Computed;
        /// Operating system of the device
        os_name: String => Body("osName"), Computed;
        /// Model of the device
        system_model: String => Body("systemModel"), Computed;
        /// UUID of the device
        uuid: String => Body("uuid"), Computed;
        /// Serial number of the device
        serial_number: String => Body("serialNumber"), Computed;
        /// IP of the device
        ip: String => Body("ip"), Computed;
        /// Notes for the device
        notes: String => Body("notes"), Computed;
    }
}

model! {
    pub struct NetworksSmDevicesState {
        /// Network ID
        network_id: String => Path("networkId"), Required;
        /// Additional fields to read, eg: ip, systemType, notes
        fields: Vec<Value<String>> => Query("fields"), Optional;
        /// Only devices with these Wi-Fi MAC addresses
        wifi_macs: Vec<Value<String>> => Query("wifiMacs"), Optional;
        /// Only devices with these serial numbers
        serials: Vec<Value<String>> => Query("serials"), Optional;
        /// Only devices with these IDs
        ids: Vec<Value<String>> => Query("ids"), Optional;
        /// Only devices with these UUIDs
        uuids: Vec<Value<String>> => Query("uuids"), Optional;
        /// Only devices with these system types
        system_types: Vec<Value<String>> => Query("systemTypes"), Optional;
        /// Scope of the devices: a filter followed by tags
        scope: Vec<Value<String>> => Query("scope"), Optional;
        /// Number of entries per page, between 3 and 1000
        per_page: i64 => Query("perPage"), Optional;
        /// Start the list after this device ID
        starting_after: String => Query("startingAfter"), Optional;
        /// End the list before this device ID
        ending_before: String => Query("endingBefore"), Optional;
        /// Devices enrolled in the network
        items: Vec<Value<SmDeviceItem>> => Local("items"), Computed;
    }
}

pub struct NetworksSmDevices;

impl DataSourceEndpoint for NetworksSmDevices {
    type State = NetworksSmDevicesState;
    type Item = SmDeviceItem;

    const NAME: &'static str = "NetworkSmDevices";
    const DESCRIPTION: &'static str = "Devices enrolled in the systems manager of a network";

    fn methods(state: &NetworksSmDevicesState) -> Vec<Method> {
        vec![Method {
            present: vec![state.network_id.is_value()],
            fetch: Fetch::All(
                segment(&state.network_id).map(|id| format!("/networks/{id}/sm/devices")),
            ),
            requires: "network_id",
        }]
    }

    fn store(
        state: &mut NetworksSmDevicesState,
        _item: Value<SmDeviceItem>,
        items: Value<Vec<Value<SmDeviceItem>>>,
    ) {
        state.items = items;
    }
}
