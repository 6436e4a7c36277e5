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

//! Dashboard endpoints managed as Terraform resources

mod devices;
mod networks;
mod networks_appliance;
mod networks_switch_settings;
mod networks_wireless_ssids;
mod organizations;

pub use devices::{
    BlinkLeds, CameraQualityAndRetention, CellularGatewayLan, Device, Devices, DevicesBlinkLeds,
    DevicesCameraQualityAndRetention, DevicesCellularGatewayLan, FixedIpAssignment,
    ReservedIpRange,
};
pub use networks::{Network, Networks};
pub use networks_appliance::{
    ContentFiltering, FirewallRule, L3FirewallRules, NetworksApplianceContentFiltering,
    NetworksApplianceFirewallL3FirewallRules,
};
pub use networks_switch_settings::{
    NetworksSwitchSettings, PowerException, SwitchSettings, Toggle,
};
pub use networks_wireless_ssids::{NetworksWirelessSsids, WirelessSsid, SSID_SLOTS};
pub use organizations::{
    AdminNetwork, AdminTag, Organization, OrganizationAdmin, OrganizationApi, Organizations,
    OrganizationsAdmins,
};
