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

//! Dashboard endpoints read as Terraform data sources

mod devices;
mod networks;
mod networks_appliance;
mod networks_wireless_ssids;
mod organizations;

pub use devices::{DeviceItem, Devices, DevicesState};
pub use networks::{
    NetworkItem, Networks, NetworksSmDevices, NetworksSmDevicesState, NetworksState, SmDeviceItem,
};
pub use networks_appliance::{
    ContentFilteringItem, ContentFilteringState, NetworksApplianceContentFiltering, UrlCategory,
};
pub use networks_wireless_ssids::{NetworksWirelessSsids, WirelessSsidItem, WirelessSsidsState};
pub use organizations::{
    OrganizationApiItem, OrganizationItem, OrganizationLicensing, Organizations,
    OrganizationsState,
};
