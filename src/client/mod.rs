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

//! HTTP client for the Meraki dashboard API

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK, LOCATION, RETRY_AFTER,
};
use reqwest::{redirect, Method, Response, StatusCode};
use serde_json::Value as Json;
use url::Url;

mod error;
mod limiter;
mod link;

pub use error::ClientError;

use error::error_message;
use limiter::RateLimiter;
use link::link_target;

pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com";
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;
pub const DEFAULT_MAX_RETRIES: u32 = 5;

const API_PREFIX: &str = "/api/v1";
const USER_AGENT: &str = concat!("terraform-provider-meraki/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: u32 = 10;
const MAX_PAGES: usize = 1000;

/// Settings of a [`Client`]
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub requests_per_second: u32,
    pub max_retries: u32,
    /// Log request and response bodies
    pub debug: bool,
    pub timeout: Duration,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            max_retries: DEFAULT_MAX_RETRIES,
            debug: false,
            timeout: Duration::from_secs(60),
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("requests_per_second", &self.requests_per_second)
            .field("max_retries", &self.max_retries)
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Dashboard API client
///
/// Clones share the same connection pool and rate limiter.
#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    config: ClientConfig,
    limiter: RateLimiter,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if config.api_key.is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        let base_url = config.base_url.trim_end_matches('/');
        let base_url = base_url.strip_suffix(API_PREFIX).unwrap_or(base_url);
        let base_url = Url::parse(&format!("{base_url}{API_PREFIX}"))?
            .as_str()
            .trim_end_matches('/')
            .to_owned();

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| ClientError::Auth("API key contains invalid characters".to_owned()))?;
        authorization.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // Redirections are followed by `execute`
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        tracing::debug!(%base_url, ?config, "dashboard client created");

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                limiter: RateLimiter::new(config.requests_per_second),
                config,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Full URL of an API path
    pub fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ClientError> {
        let path = path.strip_prefix(API_PREFIX).unwrap_or(path);
        let separator = if path.starts_with('/') { "" } else { "/" };
        let mut url = Url::parse(&format!("{}{separator}{path}", self.inner.base_url))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Json, ClientError> {
        let url = self.url(path, query)?;
        let (json, _) = self.execute(Method::GET, url, None).await?;
        Ok(json)
    }

    /// Get every page of a list, following the `Link: <...>; rel=next` headers
    pub async fn get_all(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Vec<Json>, ClientError> {
        let mut url = Some(self.url(path, query)?);
        let mut items = Vec::new();
        let mut pages = 0;
        while let Some(current) = url.take() {
            let (json, next) = self.execute(Method::GET, current, None).await?;
            match json {
                Json::Array(page) => items.extend(page),
                Json::Null => (),
                json => items.push(json),
            }
            pages += 1;
            if pages >= MAX_PAGES {
                tracing::warn!(path, pages, "stopped following pagination");
                break;
            }
            url = next;
        }
        Ok(items)
    }

    pub async fn put(&self, path: &str, body: &Json) -> Result<Json, ClientError> {
        let url = self.url(path, &[])?;
        let (json, _) = self.execute(Method::PUT, url, Some(body)).await?;
        Ok(json)
    }

    pub async fn post(&self, path: &str, body: &Json) -> Result<Json, ClientError> {
        let url = self.url(path, &[])?;
        let (json, _) = self.execute(Method::POST, url, Some(body)).await?;
        Ok(json)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let url = self.url(path, &[])?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Send a request, retrying on rate limiting and server errors
    ///
    /// Returns the parsed body and the URL of the next page if any.
    async fn execute(
        &self,
        mut method: Method,
        mut url: Url,
        mut body: Option<&Json>,
    ) -> Result<(Json, Option<Url>), ClientError> {
        let config = &self.inner.config;
        let mut attempt = 0;
        let mut redirects = 0;

        loop {
            self.inner.limiter.acquire().await;
            if config.debug {
                tracing::debug!(%method, %url, body = ?body, "dashboard request");
            } else {
                tracing::trace!(%method, %url, "dashboard request");
            }

            let mut request = self.inner.http.request(method.clone(), url.clone());
            if let Some(body) = body {
                request = request.json(body);
            }

            let delay = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return self.parse_response(url, response).await;
                    }
                    if status.is_redirection() {
                        if let Some(location) = response
                            .headers()
                            .get(LOCATION)
                            .and_then(|location| location.to_str().ok())
                        {
                            redirects += 1;
                            if redirects > MAX_REDIRECTS {
                                return Err(ClientError::Redirect);
                            }
                            url = url.join(location)?;
                            if !matches!(
                                status,
                                StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT
                            ) && method != Method::HEAD
                            {
                                method = Method::GET;
                                body = None;
                            }
                            tracing::debug!(%method, %url, "following redirection");
                            continue;
                        }
                    }

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        if attempt >= config.max_retries {
                            return Err(ClientError::RateLimited(attempt));
                        }
                        retry_after(&response).unwrap_or(Duration::from_secs(1))
                    } else if status.is_server_error() && attempt < config.max_retries {
                        self.backoff(attempt)
                    } else {
                        return Err(self.error_response(response).await);
                    }
                }
                Err(err)
                    if (err.is_timeout() || err.is_connect()) && attempt < config.max_retries =>
                {
                    tracing::debug!(%url, "{err}");
                    self.backoff(attempt)
                }
                Err(err) => return Err(err.into()),
            };

            attempt += 1;
            tracing::info!(
                %method,
                %url,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "retrying dashboard request"
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn parse_response(
        &self,
        url: Url,
        response: Response,
    ) -> Result<(Json, Option<Url>), ClientError> {
        let next = response
            .headers()
            .get(LINK)
            .and_then(|link| link.to_str().ok())
            .and_then(|link| link_target(link, "next"))
            .map(|next| url.join(next))
            .transpose()?;
        let status = response.status();
        let text = response.text().await?;
        if self.inner.config.debug {
            tracing::debug!(%url, status = status.as_u16(), body = %text, "dashboard response");
        }

        let json = if text.trim().is_empty() {
            Json::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok((json, next))
    }

    async fn error_response(&self, response: Response) -> ClientError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if self.inner.config.debug {
            tracing::debug!(status = status.as_u16(), body = %text, "dashboard error");
        }
        let message = error_message(status, &text);
        if status == StatusCode::UNAUTHORIZED {
            ClientError::Auth(message)
        } else {
            ClientError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let config = &self.inner.config;
        config
            .initial_backoff
            .saturating_mul(1u32 << attempt.min(16))
            .min(config.max_backoff)
    }
}

fn retry_after(response: &Response) -> Option<Duration> {
    let seconds: f64 = response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()?;
    (seconds.is_finite() && seconds >= 0.0).then(|| Duration::from_secs_f64(seconds))
}

#[cfg(test)]
mod tests {
    use super::{Client, ClientConfig, ClientError};

    fn client(base_url: &str) -> Client {
        Client::new(ClientConfig {
            base_url: base_url.to_owned(),
            api_key: "secret".to_owned(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn api_prefix_is_added_once() {
        let expected = "https://api.meraki.com/api/v1/organizations";
        for base_url in [
            "https://api.meraki.com",
            "https://api.meraki.com/",
            "https://api.meraki.com/api/v1",
            "https://api.meraki.com/api/v1/",
        ] {
            let client = client(base_url);
            assert_eq!(client.url("/organizations", &[]).unwrap().as_str(), expected);
            assert_eq!(client.url("organizations", &[]).unwrap().as_str(), expected);
            assert_eq!(
                client.url("/api/v1/organizations", &[]).unwrap().as_str(),
                expected
            );
        }
    }

    #[test]
    fn query_is_encoded() {
        let client = client("https://api.meraki.com");
        let url = client
            .url(
                "/organizations/1/devices",
                &[
                    ("networkIds[]".to_owned(), "N_1".to_owned()),
                    ("name".to_owned(), "a b".to_owned()),
                ],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.meraki.com/api/v1/organizations/1/devices?networkIds%5B%5D=N_1&name=a+b"
        );
    }

    #[test]
    fn api_key_is_required() {
        let err = Client::new(ClientConfig::default()).unwrap_err();
        assert!(matches!(err, ClientError::MissingApiKey));
    }

    #[test]
    fn api_key_is_not_logged() {
        let config = ClientConfig {
            api_key: "secret".to_owned(),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn backoff_is_capped() {
        let client = client("https://api.meraki.com");
        assert_eq!(client.backoff(0).as_millis(), 500);
        assert_eq!(client.backoff(2).as_millis(), 2000);
        assert_eq!(client.backoff(10).as_secs(), 30);
        assert_eq!(client.backoff(100).as_secs(), 30);
    }
}
