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

use tf_provider::{AttributePath, Diagnostics, Value};

use crate::api::{import_one, segment, Lifecycle, ResourceEndpoint};
use crate::model::model;
use crate::utils::check_one_of;

model! {
    /// Power supply mode of a switch
    pub struct PowerException {
        /// Serial number of the switch
        serial: String => Body("serial"), Required;
        /// Power type: combined, redundant or useNetworkSetting
        power_type: String => Body("powerType"), Required;
    }
}

model! {
    /// Toggle of a switch feature
    pub struct Toggle {
        /// Whether the feature is enabled
        enabled: bool => Body("enabled"), OptionalComputed;
    }
}

model! {
    pub struct SwitchSettings {
        /// Network ID
        network_id: String => Path("networkId"), Required;
        /// Management VLAN
        vlan: i64 => Body("vlan"), OptionalComputed;
        /// Use combined power as the default power supply mode
        use_combined_power: bool => Body("useCombinedPower"), OptionalComputed;
        /// Switches with a specific power supply mode
        power_exceptions: Vec<Value<PowerException>> => Body("powerExceptions"), OptionalComputed;
        /// Uplink client sampling of the switches
        uplink_client_sampling: Toggle => Body("uplinkClientSampling"), OptionalComputed;
        /// MAC blocklist of the switches
        mac_blocklist: Toggle => Body("macBlocklist"), OptionalComputed;
    }
}

pub struct NetworksSwitchSettings;

impl ResourceEndpoint for NetworksSwitchSettings {
    type State = SwitchSettings;

    const NAME: &'static str = "NetworkSwitchSettings";
    const DESCRIPTION: &'static str = "Switch settings of a network";
    const LIFECYCLE: Lifecycle = Lifecycle::Settings;
    const IMPORT_FORMAT: &'static str = "networkId";

    fn item_path(state: &SwitchSettings) -> Option<String> {
        Some(format!(
            "/networks/{}/switch/settings",
            segment(&state.network_id)?
        ))
    }

    fn import(id: &str) -> Option<SwitchSettings> {
        import_one(id, |settings: &mut SwitchSettings, network_id| {
            settings.network_id = network_id
        })
    }

    fn validate(state: &SwitchSettings, diags: &mut Diagnostics) {
        if let Value::Value(vlan) = state.vlan {
            if !(1..=4094).contains(&vlan) {
                diags.error_short("VLAN must be between 1 and 4094", AttributePath::new("vlan"));
            }
        }
        for (i, exception) in state.power_exceptions.iter().flatten().enumerate() {
            if let Value::Value(exception) = exception {
                check_one_of(
                    diags,
                    &exception.power_type,
                    &["combined", "redundant", "useNetworkSetting"],
                    AttributePath::new("power_exceptions")
                        .index(i as i64)
                        .attribute("power_type"),
                );
            }
        }
    }
}
