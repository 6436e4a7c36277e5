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

use std::ops::RangeInclusive;

use serde_json::{json, Value as Json};
use tf_provider::{AttributePath, Diagnostics, Value};

use crate::api::{import_one, segment, Lifecycle, ResourceEndpoint};
use crate::model::{model, Set};
use crate::utils::check_one_of;

fn check_range(
    diags: &mut Diagnostics,
    value: &Value<i64>,
    range: RangeInclusive<i64>,
    attribute: &'static str,
) {
    if let Value::Value(value) = value {
        if !range.contains(value) {
            diags.error(
                format!("Invalid value {value}"),
                format!(
                    "Attribute must be between {} and {}",
                    range.start(),
                    range.end()
                ),
                AttributePath::new(attribute),
            );
        }
    }
}

model! {
    pub struct Device {
        /// Serial number of the device
        serial: String => Path("serial"), Required;
        /// Name of the device
        name: String => Body("name"), OptionalComputed;
        /// Tags of the device
        tags: Set<String> => Body("tags"), OptionalComputed;
        /// Latitude of the device
        lat: f64 => Body("lat"), OptionalComputed;
        /// Longitude of the device
        lng: f64 => Body("lng"), OptionalComputed;
        /// Physical address of the device
        address: String => Body("address"), OptionalComputed;
        /// Notes for the device
        notes: String => Body("notes"), OptionalComputed;
        /// Floor plan the device is on
        floor_plan_id: String => Body("floorPlanId"), OptionalComputed;
        /// Network the device belongs to
        network_id: String => Id("networkId"), Computed;
        /// Model of the device
        model: String => Id("model"), Computed;
        /// MAC address of the device
        mac: String => Id("mac"), Computed;
        /// Firmware version of the device
        firmware: String => Body("firmware"), Computed;
        /// LAN IP of the device
        lan_ip: String => Body("lanIp"), Computed;
    }
}

pub struct Devices;

impl ResourceEndpoint for Devices {
    type State = Device;

    const NAME: &'static str = "Device";
    const DESCRIPTION: &'static str = "Attributes of a claimed device";
    const LIFECYCLE: Lifecycle = Lifecycle::Settings;
    const IMPORT_FORMAT: &'static str = "serial";

    fn item_path(state: &Device) -> Option<String> {
        Some(format!("/devices/{}", segment(&state.serial)?))
    }

    fn import(id: &str) -> Option<Device> {
        import_one(id, |device: &mut Device, serial| device.serial = serial)
    }

    fn validate(state: &Device, diags: &mut Diagnostics) {
        if let Value::Value(lat) = state.lat {
            if !(-90.0..=90.0).contains(&lat) {
                diags.error_short("Latitude must be between -90 and 90", AttributePath::new("lat"));
            }
        }
        if let Value::Value(lng) = state.lng {
            if !(-180.0..=180.0).contains(&lng) {
                diags.error_short(
                    "Longitude must be between -180 and 180",
                    AttributePath::new("lng"),
                );
            }
        }
    }
}

model! {
    pub struct BlinkLeds {
        /// Serial number of the device
        serial: String => Path("serial"), Required;
        /// Duration in seconds, between 5 and 120
        duration: i64 => Body("duration"), OptionalComputed;
        /// Period in milliseconds, between 100 and 1000
        period: i64 => Body("period"), OptionalComputed;
        /// Duty cycle in percent, between 10 and 90
        duty: i64 => Body("duty"), OptionalComputed;
    }
}

pub struct DevicesBlinkLeds;

impl ResourceEndpoint for DevicesBlinkLeds {
    type State = BlinkLeds;

    const NAME: &'static str = "DeviceBlinkLeds";
    const DESCRIPTION: &'static str =
        "Blink the LEDs of a device, any change blinks them again";
    const LIFECYCLE: Lifecycle = Lifecycle::Action;

    fn item_path(state: &BlinkLeds) -> Option<String> {
        Some(format!("/devices/{}/blinkLeds", segment(&state.serial)?))
    }

    fn validate(state: &BlinkLeds, diags: &mut Diagnostics) {
        check_range(diags, &state.duration, 5..=120, "duration");
        check_range(diags, &state.period, 100..=1000, "period");
        check_range(diags, &state.duty, 10..=90, "duty");
    }
}

model! {
    /// Fixed IP of a client
    pub struct FixedIpAssignment {
        /// MAC address of the client
        mac: String => Body("mac"), Required;
        /// Name of the client
        name: String => Body("name"), Optional;
        /// IP assigned to the client
        ip: String => Body("ip"), Required;
    }
}

model! {
    /// Range excluded from DHCP
    pub struct ReservedIpRange {
        /// First IP of the range
        start: String => Body("start"), Required;
        /// Last IP of the range
        end: String => Body("end"), Required;
        /// Comment on the range
        comment: String => Body("comment"), Optional;
    }
}

model! {
    pub struct CellularGatewayLan {
        /// Serial number of the device
        serial: String => Path("serial"), Required;
        /// Name of the device
        device_name: String => Body("deviceName"), Computed;
        /// LAN IP of the device
        device_lan_ip: String => Body("deviceLanIp"), Computed;
        /// Subnet of the device LAN
        device_subnet: String => Body("deviceSubnet"), Computed;
        /// Fixed IP assignments of the DHCP server
        fixed_ip_assignments: Vec<Value<FixedIpAssignment>> => Body("fixedIpAssignments"), OptionalComputed;
        /// Reserved IP ranges of the DHCP server
        reserved_ip_ranges: Vec<Value<ReservedIpRange>> => Body("reservedIpRanges"), OptionalComputed;
    }
}

pub struct DevicesCellularGatewayLan;

impl ResourceEndpoint for DevicesCellularGatewayLan {
    type State = CellularGatewayLan;

    const NAME: &'static str = "DeviceCellularGatewayLan";
    const DESCRIPTION: &'static str = "LAN settings of a cellular gateway";
    const LIFECYCLE: Lifecycle = Lifecycle::Settings;
    const IMPORT_FORMAT: &'static str = "serial";

    fn item_path(state: &CellularGatewayLan) -> Option<String> {
        Some(format!(
            "/devices/{}/cellularGateway/lan",
            segment(&state.serial)?
        ))
    }

    fn destroy_body(_state: &CellularGatewayLan) -> Option<Json> {
        Some(json!({
            "fixedIpAssignments": [],
            "reservedIpRanges": [],
        }))
    }

    fn import(id: &str) -> Option<CellularGatewayLan> {
        import_one(id, |lan: &mut CellularGatewayLan, serial| lan.serial = serial)
    }
}

model! {
    pub struct CameraQualityAndRetention {
        /// Serial number of the camera
        serial: String => Path("serial"), Required;
        /// Quality and retention profile of the camera
        profile_id: String => Body("profileId"), OptionalComputed;
        /// Keep only the footage with motion
        motion_based_retention_enabled: bool => Body("motionBasedRetentionEnabled"), OptionalComputed;
        /// Record audio
        audio_recording_enabled: bool => Body("audioRecordingEnabled"), OptionalComputed;
        /// Restrict the bandwidth to the minimum
        restricted_bandwidth_mode_enabled: bool => Body("restrictedBandwidthModeEnabled"), OptionalComputed;
        /// Video quality: Standard, High or Enhanced
        quality: String => Body("quality"), OptionalComputed;
        /// Video resolution, eg: 1280x720
        resolution: String => Body("resolution"), OptionalComputed;
        /// Version of the motion detector: 1 or 2
        motion_detector_version: i64 => Body("motionDetectorVersion"), OptionalComputed;
    }
}

pub struct DevicesCameraQualityAndRetention;

impl ResourceEndpoint for DevicesCameraQualityAndRetention {
    type State = CameraQualityAndRetention;

    const NAME: &'static str = "DeviceCameraQualityAndRetention";
    const DESCRIPTION: &'static str = "Quality and retention settings of a camera";
    const LIFECYCLE: Lifecycle = Lifecycle::Settings;
    const IMPORT_FORMAT: &'static str = "serial";

    fn item_path(state: &CameraQualityAndRetention) -> Option<String> {
        Some(format!(
            "/devices/{}/camera/qualityAndRetention",
            segment(&state.serial)?
        ))
    }

    fn import(id: &str) -> Option<CameraQualityAndRetention> {
        import_one(id, |camera: &mut CameraQualityAndRetention, serial| {
            camera.serial = serial
        })
    }

    fn validate(state: &CameraQualityAndRetention, diags: &mut Diagnostics) {
        check_one_of(
            diags,
            &state.quality,
            &["Standard", "High", "Enhanced"],
            AttributePath::new("quality"),
        );
        check_range(
            diags,
            &state.motion_detector_version,
            1..=2,
            "motion_detector_version",
        );
    }
}
