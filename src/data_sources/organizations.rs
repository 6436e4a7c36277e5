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
    /// API settings of an organization
    pub struct OrganizationApiItem {
        /// Whether API access is enabled
        enabled: bool => Body("enabled"), Computed;
    }
}

model! {
    /// Licensing of an organization
    pub struct OrganizationLicensing {
        /// Licensing model: co-term, per-device or subscription
        model: String => Body("model"), Computed;
    }
}

model! {
    pub struct OrganizationItem {
        /// Organization ID
        id: String => Body("id"), Computed;
        /// Name of the organization
        name: String => Body("name"), Computed;
        /// URL of the organization in the dashboard
        url: String => Body("url"), Computed;
        /// API settings
        api: OrganizationApiItem => Body("api"), Computed;
        /// Licensing settings
        licensing: OrganizationLicensing => Body("licensing"), Computed;
    }
}

model! {
    pub struct OrganizationsState {
        /// Organization ID, read a single organization when set
        organization_id: String => Path("organizationId"), Optional;
        /// Number of entries per page, between 1 and 9000
        per_page: i64 => Query("perPage"), Optional;
        /// Start the list after this organization ID
        starting_after: String => Query("startingAfter"), Optional;
        /// End the list before this organization ID
        ending_before: String => Query("endingBefore"), Optional;
        /// Organization read with `organization_id`
        item: OrganizationItem => Local("item"), Computed;
        /// Organizations the API key has access to
        items: Vec<Value<OrganizationItem>> => Local("items"), Computed;
    }
}

pub struct Organizations;

impl DataSourceEndpoint for Organizations {
    type State = OrganizationsState;
    type Item = OrganizationItem;

    const NAME: &'static str = "Organizations";
    const DESCRIPTION: &'static str = "Organizations the API key has access to";

    fn methods(state: &OrganizationsState) -> Vec<Method> {
        vec![
            Method {
                present: vec![
                    state.per_page.is_value(),
                    state.starting_after.is_value(),
                    state.ending_before.is_value(),
                ],
                fetch: Fetch::All(Some("/organizations".to_owned())),
                requires: "",
            },
            Method {
                present: vec![state.organization_id.is_value()],
                fetch: Fetch::One(
                    segment(&state.organization_id).map(|id| format!("/organizations/{id}")),
                ),
                requires: "organization_id",
            },
        ]
    }

    fn store(
        state: &mut OrganizationsState,
        item: Value<OrganizationItem>,
        items: Value<Vec<Value<OrganizationItem>>>,
    ) {
        state.item = item;
        state.items = items;
    }
}

#[cfg(test)]
mod tests {
    use tf_provider::Value;

    use super::{Organizations, OrganizationsState};
    use crate::api::{select_method, Fetch};

    #[test]
    fn organizations_are_listed_by_default() {
        let method = select_method::<Organizations>(&Default::default()).unwrap();
        assert_eq!(method.fetch, Fetch::All(Some("/organizations".to_owned())));

        let state = OrganizationsState {
            organization_id: Value::Value("123".into()),
            ..Default::default()
        };
        let method = select_method::<Organizations>(&state).unwrap();
        assert_eq!(method.fetch, Fetch::One(Some("/organizations/123".to_owned())));
    }
}
