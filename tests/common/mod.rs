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

#![allow(dead_code)]

use std::time::Duration;

use mockito::ServerGuard;
use terraform_provider_meraki::provider::ClientHandle;
use terraform_provider_meraki::{Client, ClientConfig};
use tf_provider::Diagnostics;

pub const API_KEY: &str = "75dd5334bef4d2bc96f26138c163c0a3fa0b5ca6";

pub fn client_config(server: &ServerGuard) -> ClientConfig {
    ClientConfig {
        base_url: server.url(),
        api_key: API_KEY.to_owned(),
        requests_per_second: 0,
        max_retries: 2,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(5),
        ..Default::default()
    }
}

pub fn client(server: &ServerGuard) -> Client {
    Client::new(client_config(server)).unwrap()
}

pub fn handle(server: &ServerGuard) -> ClientHandle {
    let handle = ClientHandle::default();
    handle.set(client(server));
    handle
}

pub fn bearer() -> String {
    format!("Bearer {API_KEY}")
}

pub fn summaries(diags: &Diagnostics) -> Vec<String> {
    diags
        .errors
        .iter()
        .map(|diag| format!("{}: {}", diag.summary, diag.detail))
        .collect()
}
