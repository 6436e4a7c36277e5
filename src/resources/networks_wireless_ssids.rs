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

use serde_json::{json, Value as Json};
use tf_provider::{AttributePath, Diagnostics, Value};

use crate::api::{import_parts, segment, Lifecycle, ResourceEndpoint};
use crate::model::model;
use crate::utils::check_one_of;

/// SSIDs are numbered from 0 to 14
pub const SSID_SLOTS: i64 = 15;

const AUTH_MODES: &[&str] = &[
    "open",
    "open-enhanced",
    "open-with-radius",
    "open-with-nac",
    "psk",
    "8021x-meraki",
    "8021x-nac",
    "8021x-radius",
    "8021x-google",
    "8021x-localradius",
    "ipsk-with-radius",
    "ipsk-without-radius",
    "ipsk-with-nac",
];

const IP_ASSIGNMENT_MODES: &[&str] = &[
    "NAT mode",
    "Bridge mode",
    "Layer 3 roaming",
    "Ethernet over GRE",
    "Layer 3 roaming with a concentrator",
    "VPN",
];

model! {
    pub struct WirelessSsid {
        /// Network ID
        network_id: String => Path("networkId"), Required;
        /// Number of the SSID, between 0 and 14
        number: i64 => Path("number"), Required;
        /// Name of the SSID
        name: String => Body("name"), Required;
        /// Whether the SSID is enabled
        enabled: bool => Body("enabled"), OptionalComputed;
        /// Association control method of the SSID
        auth_mode: String => Body("authMode"), OptionalComputed;
        /// Encryption of the SSID: wep or wpa
        encryption_mode: String => Body("encryptionMode"), OptionalComputed;
        /// WPA version of the SSID
        wpa_encryption_mode: String => Body("wpaEncryptionMode"), OptionalComputed;
        /// Passkey of the SSID when the authentication mode is psk
        psk: String => Body("psk"), Optional, sensitive;
        /// Client IP assignment mode
        ip_assignment_mode: String => Body("ipAssignmentMode"), OptionalComputed;
        /// Whether the SSID is advertised
        visible: bool => Body("visible"), OptionalComputed;
        /// Whether the SSID is broadcast by all the access points
        available_on_all_aps: bool => Body("availableOnAllAps"), OptionalComputed;
        /// Band selection of the SSID
        band_selection: String => Body("bandSelection"), OptionalComputed;
        /// Minimum bitrate in Mbps
        min_bitrate: f64 => Body("minBitrate"), OptionalComputed;
        /// Upload bandwidth limit of each client in Kbps, 0 for unlimited
        per_client_bandwidth_limit_up: i64 => Body("perClientBandwidthLimitUp"), OptionalComputed;
        /// Download bandwidth limit of each client in Kbps, 0 for unlimited
        per_client_bandwidth_limit_down: i64 => Body("perClientBandwidthLimitDown"), OptionalComputed;
        /// Upload bandwidth limit of the SSID in Kbps, 0 for unlimited
        per_ssid_bandwidth_limit_up: i64 => Body("perSsidBandwidthLimitUp"), OptionalComputed;
        /// Download bandwidth limit of the SSID in Kbps, 0 for unlimited
        per_ssid_bandwidth_limit_down: i64 => Body("perSsidBandwidthLimitDown"), OptionalComputed;
        /// Whether the SSID is listed to network administrators
        ssid_admin_accessible: bool => Body("ssidAdminAccessible"), Computed;
    }
}

pub struct NetworksWirelessSsids;

impl ResourceEndpoint for NetworksWirelessSsids {
    type State = WirelessSsid;

    const NAME: &'static str = "NetworkWirelessSsid";
    const DESCRIPTION: &'static str =
        "Wireless SSID of a network, the SSID is reset to its defaults on destroy";
    const LIFECYCLE: Lifecycle = Lifecycle::Settings;
    const IMPORT_FORMAT: &'static str = "networkId,number";

    fn item_path(state: &WirelessSsid) -> Option<String> {
        Some(format!(
            "/networks/{}/wireless/ssids/{}",
            segment(&state.network_id)?,
            segment(&state.number)?
        ))
    }

    fn destroy_body(state: &WirelessSsid) -> Option<Json> {
        let number = state.number.as_ref_option()?;
        Some(json!({
            "name": format!("Unconfigured SSID {}", number + 1),
            "enabled": false,
            "authMode": "open",
        }))
    }

    fn import(id: &str) -> Option<WirelessSsid> {
        let [network_id, number] = import_parts(id, 2)?[..] else {
            return None;
        };
        let number = number.parse::<i64>().ok()?;
        Some(WirelessSsid {
            network_id: Value::Value(network_id.to_owned()),
            number: Value::Value(number),
            ..Default::default()
        })
    }

    fn validate(state: &WirelessSsid, diags: &mut Diagnostics) {
        if let Value::Value(number) = state.number {
            if !(0..SSID_SLOTS).contains(&number) {
                diags.error(
                    format!("Invalid SSID number {number}"),
                    format!("SSID numbers are between 0 and {}", SSID_SLOTS - 1),
                    AttributePath::new("number"),
                );
            }
        }
        check_one_of(
            diags,
            &state.auth_mode,
            AUTH_MODES,
            AttributePath::new("auth_mode"),
        );
        check_one_of(
            diags,
            &state.encryption_mode,
            &["wep", "wpa"],
            AttributePath::new("encryption_mode"),
        );
        check_one_of(
            diags,
            &state.ip_assignment_mode,
            IP_ASSIGNMENT_MODES,
            AttributePath::new("ip_assignment_mode"),
        );
        check_one_of(
            diags,
            &state.band_selection,
            &["Dual band operation", "5 GHz band only", "Dual band operation with Band Steering"],
            AttributePath::new("band_selection"),
        );
        if state.auth_mode.as_ref_option().map(String::as_str) == Some("psk")
            && state.psk.is_null()
        {
            diags.error_short(
                "A passkey is required when the authentication mode is psk",
                AttributePath::new("psk"),
            );
        }
    }
}
