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

use std::env;

use anyhow::Result;
use terraform_provider_meraki::MerakiProvider;
use tf_provider::serve;
use tracing_subscriber::EnvFilter;

/// Log to stderr, stdout carries the plugin handshake
///
/// When `PLUGIN_LOG_FILE` is set, the plugin server installs its own file subscriber.
fn init_logging() {
    if env::var_os("PLUGIN_LOG_FILE").is_some() {
        return;
    }
    let filter = ["TF_LOG_PROVIDER", "TF_LOG"]
        .into_iter()
        .find_map(|variable| env::var(variable).ok().filter(|level| !level.is_empty()))
        .and_then(|level| EnvFilter::try_new(level.to_lowercase()).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    serve("meraki", MerakiProvider::default()).await
}
