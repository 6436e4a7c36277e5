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

use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value as Json;
use tf_provider::{AttributePath, Diagnostics, Resource, Schema, Value, ValueEmpty};

use crate::client::{Client, ClientError};
use crate::model::{Element, Model};
use crate::provider::ClientHandle;
use crate::utils::{find_by_key, merge_json, ReportDiagnostics};

/// How the dashboard object behind a resource lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Singleton settings: created and updated with PUT, destroy resets or forgets them
    Settings,
    /// Objects created with POST, updated with PUT and deleted with DELETE
    Collection,
    /// One-shot POST: nothing to read back, any change replaces the resource
    Action,
}

/// How to read the object back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// GET the object itself
    Item(String),
    /// GET a list and pick the item whose `key` is `value`
    Find {
        path: String,
        key: &'static str,
        value: String,
    },
}

/// Dashboard endpoint exposed as a Terraform resource
pub trait ResourceEndpoint: Send + Sync + 'static {
    type State: Model;

    /// Operation suffix in diagnostics, eg: `NetworkApplianceContentFiltering`
    const NAME: &'static str;
    const DESCRIPTION: &'static str;
    const LIFECYCLE: Lifecycle;
    /// Format of the import identifier, empty if import is not supported
    const IMPORT_FORMAT: &'static str = "";

    /// Path of the object, `None` while its identifiers are not known
    fn item_path(state: &Self::State) -> Option<String>;

    /// Path the object is created with
    fn create_path(state: &Self::State) -> Option<String> {
        Self::item_path(state)
    }

    fn lookup(state: &Self::State) -> Option<Lookup> {
        Self::item_path(state).map(Lookup::Item)
    }

    /// Body sent on destroy for [`Lifecycle::Settings`], nothing is sent if `None`
    fn destroy_body(state: &Self::State) -> Option<Json> {
        _ = state;
        None
    }

    /// State built from an import identifier
    fn import(id: &str) -> Option<Self::State> {
        _ = id;
        None
    }

    /// Hook to clean a dashboard response before it is read
    fn normalize_response(response: Json) -> Json {
        response
    }

    /// Hook to remove the attributes the dashboard only accepts on creation
    fn update_body(body: Json) -> Json {
        body
    }

    /// Body attributes that cannot be updated in place
    fn requires_replace(prior: &Self::State, planned: &Self::State) -> Vec<AttributePath> {
        _ = (prior, planned);
        Vec::new()
    }

    fn validate(state: &Self::State, diags: &mut Diagnostics) {
        _ = (state, diags);
    }
}

/// Terraform resource driven by a [`ResourceEndpoint`]
///
/// The state is wrapped in a [`Value`] so that a read can report the object as gone.
pub struct ApiResource<E> {
    client: ClientHandle,
    endpoint: PhantomData<fn() -> E>,
}

impl<E> ApiResource<E> {
    pub fn new(client: ClientHandle) -> Self {
        Self {
            client,
            endpoint: PhantomData,
        }
    }
}

impl<E: ResourceEndpoint> ApiResource<E> {
    fn missing_identifier(diags: &mut Diagnostics) {
        diags.root_error(
            format!("Missing identifier for {}", E::NAME),
            "The attributes identifying the object are not known",
        );
    }

    fn path(diags: &mut Diagnostics, path: Option<String>) -> Option<String> {
        if path.is_none() {
            Self::missing_identifier(diags);
        }
        path
    }

    /// Fetch the object, `None` if the dashboard does not know it anymore
    async fn fetch(client: &Client, lookup: Lookup) -> Result<Option<Json>, ClientError> {
        let response = match lookup {
            Lookup::Item(path) => match client.get(&path, &[]).await {
                Ok(response) => response,
                Err(err) if err.is_not_found() => return Ok(None),
                Err(err) => return Err(err),
            },
            Lookup::Find { path, key, value } => {
                let items = match client.get_all(&path, &[]).await {
                    Ok(items) => items,
                    Err(err) if err.is_not_found() => return Ok(None),
                    Err(err) => return Err(err),
                };
                match find_by_key(&items, key, &value, false) {
                    Some(item) => item.clone(),
                    None => return Ok(None),
                }
            }
        };
        Ok(Some(E::normalize_response(response)))
    }

    /// Send the state, then fill its unknowns with the response
    async fn apply(
        &self,
        diags: &mut Diagnostics,
        mut state: E::State,
        operation: &str,
        create: bool,
    ) -> Option<E::State> {
        let client = self.client.get(diags)?;
        let body = Json::Object(state.to_body());
        let body = if create { body } else { E::update_body(body) };

        let response = match (E::LIFECYCLE, create) {
            (Lifecycle::Settings, _) | (Lifecycle::Collection, false) => {
                let path = Self::path(diags, E::item_path(&state))?;
                tracing::info!(%path, "PUT {}", E::NAME);
                client.put(&path, &body).await
            }
            (Lifecycle::Collection, true) | (Lifecycle::Action, _) => {
                let path = Self::path(diags, E::create_path(&state))?;
                tracing::info!(%path, "POST {}", E::NAME);
                client.post(&path, &body).await
            }
        }
        .report(diags, operation)?;

        let merged = merge_json(body, E::normalize_response(response), false);
        state.reconcile(E::State::from_body(&merged));
        state.resolve_unknown();
        Some(state)
    }
}

#[async_trait]
impl<E: ResourceEndpoint> Resource for ApiResource<E> {
    type State<'a> = Value<E::State>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(E::State::schema(E::DESCRIPTION))
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        if let Value::Value(config) = &config {
            E::validate(config, diags);
        }
        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let Value::Value(mut state) = state else {
            return Some((state, private_state));
        };
        if E::LIFECYCLE == Lifecycle::Action {
            return Some((Value::Value(state), private_state));
        }

        let client = self.client.get(diags)?;
        let Some(lookup) = E::lookup(&state) else {
            Self::missing_identifier(diags);
            return None;
        };
        let operation = format!("Get{}", E::NAME);
        match Self::fetch(&client, lookup).await.report(diags, &operation)? {
            Some(response) => {
                state.refresh(&response);
                Some((Value::Value(state), private_state))
            }
            None => {
                tracing::warn!("{} not found, removing it from the state", E::NAME);
                Some((Value::Null, private_state))
            }
        }
    }

    async fn plan_create<'a>(
        &self,
        _diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let Value::Value(mut state) = proposed_state else {
            return Some((proposed_state, Default::default()));
        };
        state.plan_computed(&config_state.unwrap_or_default(), true);
        Some((Value::Value(state), Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        _diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>, Vec<AttributePath>)> {
        let (prior, mut state) = match (prior_state, proposed_state) {
            (Value::Value(prior), Value::Value(proposed)) => (prior, proposed),
            (_, proposed) => return Some((proposed, prior_private_state, vec![])),
        };
        if prior == state {
            return Some((Value::Value(state), prior_private_state, vec![]));
        }

        let mut trigger_replace = prior.changed_fields(&state, E::LIFECYCLE != Lifecycle::Action);
        if E::LIFECYCLE != Lifecycle::Action {
            trigger_replace.extend(E::requires_replace(&prior, &state));
        }
        state.plan_computed(&config_state.unwrap_or_default(), !trigger_replace.is_empty());
        Some((Value::Value(state), prior_private_state, trigger_replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        _prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        Some(())
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let Value::Value(state) = planned_state else {
            diags.root_error_short(format!("Missing planned state for {}", E::NAME));
            return None;
        };
        let operation = match E::LIFECYCLE {
            Lifecycle::Settings => format!("Update{}", E::NAME),
            Lifecycle::Collection | Lifecycle::Action => format!("Create{}", E::NAME),
        };
        let state = self.apply(diags, state, &operation, true).await?;
        Some((Value::Value(state), planned_private_state))
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let Value::Value(mut state) = planned_state else {
            diags.root_error_short(format!("Missing planned state for {}", E::NAME));
            return None;
        };
        if E::LIFECYCLE == Lifecycle::Action {
            state.resolve_unknown();
            return Some((Value::Value(state), planned_private_state));
        }
        let operation = format!("Update{}", E::NAME);
        let state = self.apply(diags, state, &operation, false).await?;
        Some((Value::Value(state), planned_private_state))
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let Value::Value(state) = prior_state else {
            return Some(());
        };
        let operation = format!("Delete{}", E::NAME);

        match E::LIFECYCLE {
            Lifecycle::Action => Some(()),
            Lifecycle::Settings => {
                let Some(body) = E::destroy_body(&state) else {
                    tracing::info!("{} removed from the state only", E::NAME);
                    return Some(());
                };
                let client = self.client.get(diags)?;
                let path = Self::path(diags, E::item_path(&state))?;
                tracing::info!(%path, "PUT {} back to its defaults", E::NAME);
                match client.put(&path, &body).await {
                    Err(err) if err.is_not_found() => Some(()),
                    result => result.map(|_| ()).report(diags, &operation),
                }
            }
            Lifecycle::Collection => {
                let client = self.client.get(diags)?;
                let path = Self::path(diags, E::item_path(&state))?;
                tracing::info!(%path, "DELETE {}", E::NAME);
                match client.delete(&path).await {
                    Err(err) if err.is_not_found() => Some(()),
                    result => result.report(diags, &operation),
                }
            }
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        if E::IMPORT_FORMAT.is_empty() {
            diags.root_error_short("Import is not supported");
            return None;
        }
        match E::import(&id) {
            Some(state) => Some((Value::Value(state), Default::default())),
            None => {
                diags.root_error(
                    "Unexpected Import Identifier",
                    format!(
                        "Expected import identifier with format: {}. Got: {id:?}",
                        E::IMPORT_FORMAT
                    ),
                );
                None
            }
        }
    }
}
