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

//! Terraform provider for the Meraki dashboard API
//!
//! Every dashboard endpoint is described by a typed [`model`] and an endpoint description
//! ([`api::ResourceEndpoint`] or [`api::DataSourceEndpoint`]). The generic adapters of [`api`]
//! turn those descriptions into Terraform resources and data sources, and talk to the
//! dashboard through the rate limited [`Client`].

pub mod api;
pub mod client;
pub mod data_sources;
pub mod model;
pub mod provider;
pub mod resources;

mod utils;

pub use client::{Client, ClientConfig, ClientError};
pub use provider::{MerakiProvider, ProviderConfig};
