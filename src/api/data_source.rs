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
use tf_provider::{DataSource, Diagnostics, Schema, Value, ValueEmpty};

use crate::model::{Field, Model};
use crate::provider::ClientHandle;
use crate::utils::{pick_method, ReportDiagnostics};

/// Request of a data source method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
    /// GET a single object
    One(Option<String>),
    /// GET every page of a list, with the query parameters of the state
    All(Option<String>),
}

/// One of the ways a data source can be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Whether each parameter of the method is given
    pub present: Vec<bool>,
    /// Request to send, the path is `None` if a required parameter is missing
    pub fetch: Fetch,
    /// Parameters required by the method, for diagnostics
    pub requires: &'static str,
}

/// Dashboard endpoints exposed as a Terraform data source
pub trait DataSourceEndpoint: Send + Sync + 'static {
    type State: Model;
    type Item: Model;

    /// Operation suffix in diagnostics, eg: `NetworkWirelessSsids`
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    /// Candidate methods, the most complete one is used
    fn methods(state: &Self::State) -> Vec<Method>;

    /// Store the result of a [`Fetch::One`] or a [`Fetch::All`]
    fn store(state: &mut Self::State, item: Value<Self::Item>, items: Value<Vec<Value<Self::Item>>>);
}

/// Method used to read a data source, among the candidates of the endpoint
pub fn select_method<E: DataSourceEndpoint>(state: &E::State) -> Option<Method> {
    let methods = E::methods(state);
    let presence = methods
        .iter()
        .map(|method| method.present.clone())
        .collect::<Vec<_>>();
    let index = pick_method(&presence)?;
    methods.into_iter().nth(index)
}

/// Terraform data source driven by a [`DataSourceEndpoint`]
pub struct ApiDataSource<E> {
    client: ClientHandle,
    endpoint: PhantomData<fn() -> E>,
}

impl<E> ApiDataSource<E> {
    pub fn new(client: ClientHandle) -> Self {
        Self {
            client,
            endpoint: PhantomData,
        }
    }
}

#[async_trait]
impl<E: DataSourceEndpoint> DataSource for ApiDataSource<E> {
    type State<'a> = Value<E::State>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(E::State::schema(E::DESCRIPTION))
    }

    async fn validate<'a>(&self, _diags: &mut Diagnostics, _config: Self::State<'a>) -> Option<()> {
        Some(())
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let Value::Value(mut state) = config else {
            return Some(config);
        };

        let Some(method) = select_method::<E>(&state) else {
            diags.root_error_short(format!("No method to read {}", E::NAME));
            return None;
        };
        tracing::debug!(?method, "reading {}", E::NAME);

        let operation = format!("Get{}", E::NAME);
        match method.fetch {
            Fetch::One(Some(path)) => {
                let client = self.client.get(diags)?;
                let response = client.get(&path, &[]).await.report(diags, &operation)?;
                let item = <Value<E::Item> as Field>::from_json(Some(&response));
                E::store(&mut state, item, Value::Null);
            }
            Fetch::All(Some(path)) => {
                let client = self.client.get(diags)?;
                let response = client
                    .get_all(&path, &state.query())
                    .await
                    .report(diags, &operation)?;
                let items = response
                    .iter()
                    .map(|item| <Value<E::Item> as Field>::from_json(Some(item)))
                    .collect::<Vec<_>>();
                E::store(&mut state, Value::Null, Value::Value(items));
            }
            Fetch::One(None) | Fetch::All(None) => {
                diags.root_error(
                    format!("Failure when executing {operation}"),
                    format!("Missing required attributes: {}", method.requires),
                );
                return None;
            }
        }

        Some(Value::Value(state))
    }
}
