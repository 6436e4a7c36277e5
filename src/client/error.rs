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

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Dashboard API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Too many requests, gave up after {0} retries")]
    RateLimited(u32),

    #[error("Too many redirections")]
    Redirect,

    #[error("Missing dashboard API key")]
    MissingApiKey,
}

impl ClientError {
    /// HTTP status returned by the dashboard, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Auth(_) => Some(401),
            ClientError::RateLimited(_) => Some(429),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// Human readable message of an error response
///
/// The dashboard reports errors as `{ "errors": ["...", "..."] }`.
pub(crate) fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { errors }) if !errors.is_empty() => errors.join("; "),
        _ if !body.trim().is_empty() => body.trim().to_owned(),
        _ => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_owned(),
    }
}
