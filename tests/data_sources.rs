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

mod common;

use mockito::{Matcher, Server};
use serde_json::json;
use terraform_provider_meraki::api::ApiDataSource;
use terraform_provider_meraki::data_sources::{
    ContentFilteringState, NetworksApplianceContentFiltering, NetworksWirelessSsids, Organizations,
    OrganizationsState, WirelessSsidsState,
};
use tf_provider::{DataSource, Diagnostics, Value};

#[tokio::test(flavor = "multi_thread")]
async fn lists_follow_pagination() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", "/api/v1/organizations")
        .match_query(Matcher::UrlEncoded("perPage".into(), "2".into()))
        .with_status(200)
        .with_header(
            "link",
            &format!(
                "<{}/api/v1/organizations?perPage=2&startingAfter=O_2>; rel=next",
                server.url()
            ),
        )
        .with_body(
            json!([
                { "id": "O_1", "name": "My organization", "url": "https://dashboard.meraki.com/o/1" },
                { "id": "O_2", "name": "Other organization", "api": { "enabled": true } },
            ])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/api/v1/organizations")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("perPage".into(), "2".into()),
            Matcher::UrlEncoded("startingAfter".into(), "O_2".into()),
        ]))
        .with_status(200)
        .with_body(json!([{ "id": "O_3", "name": "Last organization" }]).to_string())
        .expect(1)
        .create_async()
        .await;

    let data_source = ApiDataSource::<Organizations>::new(common::handle(&server));
    let config = OrganizationsState {
        per_page: Value::Value(2),
        ..Default::default()
    };
    let mut diags = Diagnostics::default();
    let state = data_source
        .read(&mut diags, Value::Value(config), Default::default())
        .await
        .unwrap();
    assert!(diags.errors.is_empty(), "{:?}", common::summaries(&diags));
    first.assert_async().await;
    second.assert_async().await;

    let state = state.as_ref_option().unwrap();
    assert!(state.item.is_null());
    let items = state.items.as_ref_option().unwrap();
    assert_eq!(items.len(), 3);
    let second_organization = items[1].as_ref_option().unwrap();
    assert_eq!(
        second_organization.api.as_ref_option().unwrap().enabled,
        Value::Value(true)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn single_items_are_read() {
    let mut server = Server::new_async().await;
    let _get = server
        .mock("GET", "/api/v1/networks/L_1/wireless/ssids/0")
        .with_status(200)
        .with_body(
            json!({
                "number": 0,
                "name": "My SSID",
                "enabled": true,
                "authMode": "psk",
                "psk": "deadbeef",
                "minBitrate": 11,
                "visible": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let data_source = ApiDataSource::<NetworksWirelessSsids>::new(common::handle(&server));
    let config = WirelessSsidsState {
        network_id: Value::Value("L_1".into()),
        number: Value::Value(0),
        ..Default::default()
    };
    let mut diags = Diagnostics::default();
    let state = data_source
        .read(&mut diags, Value::Value(config), Default::default())
        .await
        .unwrap();
    assert!(diags.errors.is_empty(), "{:?}", common::summaries(&diags));

    let state = state.as_ref_option().unwrap();
    assert!(state.items.is_null());
    let ssid = state.item.as_ref_option().unwrap();
    assert_eq!(ssid.name, Value::Value("My SSID".into()));
    assert_eq!(ssid.min_bitrate, Value::Value(11.0));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_parameters_are_reported() {
    let server = Server::new_async().await;
    let data_source =
        ApiDataSource::<NetworksApplianceContentFiltering>::new(common::handle(&server));
    let mut diags = Diagnostics::default();
    let state = data_source
        .read(
            &mut diags,
            Value::Value(ContentFilteringState::default()),
            Default::default(),
        )
        .await;
    assert!(state.is_none());
    assert_eq!(
        diags.errors[0].summary,
        "Failure when executing GetNetworkApplianceContentFiltering"
    );
    assert!(diags.errors[0].detail.contains("network_id"));
}
