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

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;
use terraform_provider_meraki::{Client, ClientConfig, ClientError, MerakiProvider, ProviderConfig};
use tf_provider::{Diagnostics, Provider, Value};
use tokio::net::TcpListener;

fn unreachable_client(base_url: String) -> Client {
    Client::new(ClientConfig {
        base_url,
        api_key: common::API_KEY.to_owned(),
        requests_per_second: 0,
        max_retries: 1,
        timeout: Duration::from_millis(200),
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(5),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn rate_limited_requests_are_retried() {
    let mut server = Server::new_async().await;
    let limited = server
        .mock("GET", "/api/v1/organizations")
        .with_status(429)
        .with_header("retry-after", "0")
        .with_body(r#"{"errors":["API rate limit exceeded for organization"]}"#)
        .expect(2)
        .create_async()
        .await;
    let ok = server
        .mock("GET", "/api/v1/organizations")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let client = common::client(&server);
    let response = client.get("/organizations", &[]).await.unwrap();
    assert_eq!(response, json!([]));
    limited.assert_async().await;
    ok.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn rate_limiting_gives_up_after_max_retries() {
    let mut server = Server::new_async().await;
    let limited = server
        .mock("GET", "/api/v1/organizations")
        .with_status(429)
        .with_header("retry-after", "0")
        .expect(3)
        .create_async()
        .await;

    let client = common::client(&server);
    let err = client.get("/organizations", &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::RateLimited(2)), "{err}");
    assert_eq!(err.status(), Some(429));
    limited.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn server_errors_are_retried_with_backoff() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("PUT", "/api/v1/devices/Q234-ABCD-5678")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;
    let ok = server
        .mock("PUT", "/api/v1/devices/Q234-ABCD-5678")
        .with_status(200)
        .with_body(r#"{"serial":"Q234-ABCD-5678","name":"My AP"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = common::client(&server);
    let response = client
        .put("/devices/Q234-ABCD-5678", &json!({ "name": "My AP" }))
        .await
        .unwrap();
    assert_eq!(response["name"], "My AP");
    failing.assert_async().await;
    ok.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn client_errors_are_not_retried() {
    let mut server = Server::new_async().await;
    let bad_request = server
        .mock("POST", "/api/v1/organizations")
        .with_status(400)
        .with_body(r#"{"errors":["Name is too long","Name has invalid characters"]}"#)
        .expect(1)
        .create_async()
        .await;
    let unauthorized = server
        .mock("GET", "/api/v1/organizations")
        .with_status(401)
        .with_body(r#"{"errors":["Invalid API key"]}"#)
        .create_async()
        .await;

    let client = common::client(&server);
    let err = client
        .post("/organizations", &json!({ "name": "x" }))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Dashboard API returned HTTP 400: Name is too long; Name has invalid characters"
    );
    bad_request.assert_async().await;

    let err = client.get("/organizations", &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(ref message) if message == "Invalid API key"));
    unauthorized.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn redirections_are_followed() {
    let mut server = Server::new_async().await;
    let redirect = server
        .mock("GET", "/api/v1/organizations/123")
        .with_status(307)
        .with_header("location", "/shard/api/v1/organizations/123")
        .create_async()
        .await;
    let target = server
        .mock("GET", "/shard/api/v1/organizations/123")
        .match_header("authorization", common::bearer().as_str())
        .with_status(200)
        .with_body(r#"{"id":"123","name":"My organization"}"#)
        .create_async()
        .await;

    let client = common::client(&server);
    let response = client.get("/organizations/123", &[]).await.unwrap();
    assert_eq!(response["id"], "123");
    redirect.assert_async().await;
    target.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn see_other_redirections_switch_to_get() {
    let mut server = Server::new_async().await;
    let redirect = server
        .mock("POST", "/api/v1/devices/Q234-ABCD-5678/liveTools/ping")
        .match_body(Matcher::Json(json!({ "target": "75.75.75.75" })))
        .with_status(303)
        .with_header("location", "/api/v1/devices/Q234-ABCD-5678/liveTools/ping/1")
        .expect(1)
        .create_async()
        .await;
    let target = server
        .mock("GET", "/api/v1/devices/Q234-ABCD-5678/liveTools/ping/1")
        .match_body("")
        .with_status(200)
        .with_body(r#"{"pingId":"1","status":"complete"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = common::client(&server);
    let response = client
        .post(
            "/devices/Q234-ABCD-5678/liveTools/ping",
            &json!({ "target": "75.75.75.75" }),
        )
        .await
        .unwrap();
    assert_eq!(response["status"], "complete");
    redirect.assert_async().await;
    target.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn timeouts_are_retried() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicUsize::new(0));
    let accepted = connections.clone();
    tokio::spawn(async move {
        let mut silent = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            accepted.fetch_add(1, Ordering::SeqCst);
            silent.push(socket);
        }
    });

    let client = unreachable_client(format!("http://{address}"));
    let err = client.get("/organizations", &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::Request(ref err) if err.is_timeout()), "{err}");
    assert_eq!(connections.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_errors_are_reported_after_retries() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let client = unreachable_client(format!("http://{address}"));
    let err = client.get("/organizations", &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::Request(ref err) if err.is_connect()), "{err}");
}

#[tokio::test(flavor = "multi_thread")]
async fn provider_configures_its_resources() {
    let mut server = Server::new_async().await;
    let get = server
        .mock("GET", "/api/v1/devices/Q234-ABCD-5678")
        .match_header("authorization", common::bearer().as_str())
        .with_status(200)
        .with_body(r#"{"serial":"Q234-ABCD-5678","name":"My AP","model":"MR34"}"#)
        .create_async()
        .await;

    let provider = MerakiProvider::default();
    let mut diags = Diagnostics::default();
    let resources: HashMap<_, _> = provider.get_resources(&mut diags).unwrap();
    assert!(resources.contains_key("networks_wireless_ssids"));
    assert!(resources.contains_key("devices_blink_leds"));
    let data_sources = provider.get_data_sources(&mut diags).unwrap();
    assert!(data_sources.contains_key("networks_sm_devices"));

    let config = ProviderConfig {
        meraki_dashboard_api_key: Value::Value(common::API_KEY.to_owned()),
        meraki_base_url: Value::Value(server.url()),
        meraki_requests_per_second: Value::Value(100),
        ..Default::default()
    };
    assert!(provider
        .configure(&mut diags, "1.9.0".to_owned(), config)
        .await
        .is_some());
    assert!(diags.errors.is_empty(), "{:?}", common::summaries(&diags));

    let client: Client = provider.client().get(&mut diags).unwrap();
    assert_eq!(client.config().requests_per_second, 100);
    let device = client.get("/devices/Q234-ABCD-5678", &[]).await.unwrap();
    assert_eq!(device["model"], "MR34");
    get.assert_async().await;
}
