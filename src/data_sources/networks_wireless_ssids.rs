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
    pub struct WirelessSsidItem {
        /// Number of the SSID
        number: i64 => Body("number"), Computed;
        /// Name of the SSID
        name: String => Body("name"), Computed;
        /// Whether the SSID is enabled
        enabled: bool => Body("enabled"), Computed;
        /// Association control method of the SSID
        auth_mode: String => Body("authMode"), Computed;
        /// Encryption of the SSID
        encryption_mode: String => Body("encryptionMode"), Computed;
        /// WPA version of the SSID
        wpa_encryption_mode: String => Body("wpaEncryptionMode"), Computed;
        /// Passkey of the SSID
        psk: String => Body("psk"), Computed, sensitive;
        /// Client IP assignment mode
        ip_assignment_mode: String => Body("ipAssignmentMode"), Computed;
        /// Splash page of the SSID
        splash_page: String => Body("splashPage"), Computed;
        /// Whether the SSID is advertised
        visible: bool => Body("visible"), Computed;
        /// Whether the SSID is broadcast by all the access points
        available_on_all_aps: bool => Body("availableOnAllAps"), Computed;
        /// Band selection of the SSID
        band_selection: String => Body("bandSelection"), Computed;
        /// Minimum bitrate in Mbps
        min_bitrate: f64 => Body("minBitrate"), Computed;
        /// Upload bandwidth limit of each client in Kbps
        per_client_bandwidth_limit_up: i64 => Body("perClientBandwidthLimitUp"), Computed;
        /// Download bandwidth limit of each client in Kbps
        per_client_bandwidth_limit_down: i64 => Body("perClientBandwidthLimitDown"), Computed;
        /// Whether the SSID is listed to network administrators
        ssid_admin_accessible: bool => Body("ssidAdminAccessible"), Computed;
    }
}

model! {
    pub struct WirelessSsidsState {
        /// Network ID
        network_id: String => Path("networkId"), Required;
        /// Number of the SSID, read a single SSID when set
        number: i64 => Path("number"), Optional;
        /// SSID read with `number`
        item: WirelessSsidItem => Local("item"), Computed;
        /// SSIDs of the network
        items: Vec<Value<WirelessSsidItem>> => Local("items"), Computed;
    }
}

pub struct NetworksWirelessSsids;

impl DataSourceEndpoint for NetworksWirelessSsids {
    type State = WirelessSsidsState;
    type Item = WirelessSsidItem;

    const NAME: &'static str = "NetworkWirelessSsids";
    const DESCRIPTION: &'static str = "Wireless SSIDs of a network";

    /// The item comes first: it wins when both methods are complete
    fn methods(state: &WirelessSsidsState) -> Vec<Method> {
        let network_id = segment(&state.network_id);
        vec![
            Method {
                present: vec![state.network_id.is_value(), state.number.is_value()],
                fetch: Fetch::One(
                    network_id
                        .clone()
                        .zip(segment(&state.number))
                        .map(|(id, number)| format!("/networks/{id}/wireless/ssids/{number}")),
                ),
                requires: "network_id, number",
            },
            Method {
                present: vec![state.network_id.is_value()],
                fetch: Fetch::All(network_id.map(|id| format!("/networks/{id}/wireless/ssids"))),
                requires: "network_id",
            },
        ]
    }

    fn store(
        state: &mut WirelessSsidsState,
        item: Value<WirelessSsidItem>,
        items: Value<Vec<Value<WirelessSsidItem>>>,
    ) {
        state.item = item;
        state.items = items;
    }
}
