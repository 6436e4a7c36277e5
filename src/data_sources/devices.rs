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
    pub struct DeviceItem {
        /// Serial number of the device
        serial: String => Body("serial"), Computed;
        /// Name of the device
        name: String => Body("name"), Computed;
        /// MAC address of the device
        mac: String => Body("mac"), Computed;
        /// Model of the device
        model: String => Body("model"), Computed;
        /// Product type of the device
        product_type: String => Body("productType"), Computed;
        /// Network the device belongs to
        network_id: String => Body("networkId"), Computed;
        /// LAN IP of the device
        lan_ip: String => Body("lanIp"), Computed;
        /// Firmware version of the device
        firmware: String => Body("firmware"), Computed;
        /// Tags of the device
        tags: Vec<Value<String>> => Body("tags"), Computed;
        /// Latitude of the device
        lat: f64 => Body("lat"), Computed;
        /// Longitude of the device
        lng: f64 => Body("lng"), Computed;
        /// Physical address of the device
        address: String => Body("address"), Computed;
        /// Notes for the device
        notes: String => Body("notes"), Computed;
        /// URL of the device in the dashboard
        url: String => Body("url"), Computed;
    }
}

model! {
    pub struct DevicesState {
        /// Organization ID, list its devices when set
        organization_id: String => Path("organizationId"), Optional;
        /// Serial number, read a single device when set
        serial: String => Path("serial"), Optional;
        /// Only devices of these networks
        network_ids: Vec<Value<String>> => Query("networkIds"), Optional;
        /// Only devices of these product types
        product_types: Vec<Value<String>> => Query("productTypes"), Optional;
        /// Only devices with these serial numbers
        serials: Vec<Value<String>> => Query("serials"), Optional;
        /// Only devices with these models
        models: Vec<Value<String>> => Query("models"), Optional;
        /// Only devices with these tags
        tags: Vec<Value<String>> => Query("tags"), Optional;
        /// How `tags` are matched: withAnyTags or withAllTags
        tags_filter_type: String => Query("tagsFilterType"), Optional;
        /// Only devices whose name contains this string
        name: String => Query("name"), Optional;
        /// Only devices whose MAC address contains this string
        mac: String => Query("mac"), Optional;
        /// Number of entries per page, between 3 and 1000
        per_page: i64 => Query("perPage"), Optional;
        /// Start the list after this serial number
        starting_after: String => Query("startingAfter"), Optional;
        /// End the list before this serial number
        ending_before: String => Query("endingBefore"), Optional;
        /// Device read with `serial`
        item: DeviceItem => Local("item"), Computed;
        /// Devices of the organization
        items: Vec<Value<DeviceItem>> => Local("items"), Computed;
    }
}

pub struct Devices;

impl DataSourceEndpoint for Devices {
    type State = DevicesState;
    type Item = DeviceItem;

    const NAME: &'static str = "Devices";
    const DESCRIPTION: &'static str = "Devices claimed by an organization";

    fn methods(state: &DevicesState) -> Vec<Method> {
        vec![
            Method {
                present: vec![
                    state.organization_id.is_value(),
                    state.network_ids.is_value(),
                    state.product_types.is_value(),
                    state.serials.is_value(),
                    state.models.is_value(),
                    state.tags.is_value(),
                    state.tags_filter_type.is_value(),
                    state.name.is_value(),
                    state.mac.is_value(),
                    state.per_page.is_value(),
                    state.starting_after.is_value(),
                    state.ending_before.is_value(),
                ],
                fetch: Fetch::All(
                    segment(&state.organization_id)
                        .map(|id| format!("/organizations/{id}/devices")),
                ),
                requires: "organization_id",
            },
            Method {
                present: vec![state.serial.is_value()],
                fetch: Fetch::One(segment(&state.serial).map(|serial| format!("/devices/{serial}"))),
                requires: "serial",
            },
        ]
    }

    fn store(
        state: &mut DevicesState,
        item: Value<DeviceItem>,
        items: Value<Vec<Value<DeviceItem>>>,
    ) {
        state.item = item;
        state.items = items;
    }
}
