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

use tf_provider::Value;

use crate::api::{segment, DataSourceEndpoint, Fetch, Method};
use crate::model::model;

model! {
    /// URL category
    pub struct UrlCategory {
        /// Category ID
        id: String => Body("id"), Computed;
        /// Category name
        name: String => Body("name"), Computed;
    }
}

model! {
    pub struct ContentFilteringItem {
        /// Allowed URL patterns
        allowed_url_patterns: Vec<Value<String>> => Body("allowedUrlPatterns"), Computed;
        /// Blocked URL patterns
        blocked_url_patterns: Vec<Value<String>> => Body("blockedUrlPatterns"), Computed;
        /// Blocked URL categories
        blocked_url_categories: Vec<Value<UrlCategory>> => Body("blockedUrlCategories"), Computed;
        /// Size of the category lists
        url_category_list_size: String => Body("urlCategoryListSize"), Computed;
    }
}

model! {
    pub struct ContentFilteringState {
        /// Network ID
        network_id: String => Path("networkId"), Required;
        /// Content filtering settings of the network
        item: ContentFilteringItem => Local("item"), Computed;
    }
}

pub struct NetworksApplianceContentFiltering;

impl DataSourceEndpoint for NetworksApplianceContentFiltering {
    type State = ContentFilteringState;
    type Item = ContentFilteringItem;

    const NAME: &'static str = "NetworkApplianceContentFiltering";
    const DESCRIPTION: &'static str = "Content filtering settings of an appliance network";

    fn methods(state: &ContentFilteringState) -> Vec<Method> {
        vec![Method {
            present: vec![state.network_id.is_value()],
            fetch: Fetch::One(
                segment(&state.network_id)
                    .map(|id| format!("/networks/{id}/appliance/contentFiltering")),
            ),
            requires: "network_id",
        }]
    }

    fn store(
        state: &mut ContentFilteringState,
        item: Value<ContentFilteringItem>,
        _items: Value<Vec<Value<ContentFilteringItem>>>,
    ) {
        state.item = item;
    }
}
