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

use serde_json::Value as Json;
use tf_provider::{AttributePath, Diagnostics, Value};

use crate::api::{import_parts, segment, Lifecycle, Lookup, ResourceEndpoint};
use crate::model::model;
use crate::utils::check_one_of;

const ORG_ACCESS: &[&str] = &["full", "read-only", "enterprise", "none"];
const TARGET_ACCESS: &[&str] = &["full", "read-only", "guest-ambassador", "monitor-only"];

model! {
    /// API access of an organization
    pub struct OrganizationApi {
        /// Enable API access
        enabled: bool => Body("enabled"), Required;
    }
}

model! {
    pub struct Organization {
        /// Organization ID
        organization_id: String => Id("id"), Computed;
        /// Name of the organization
        name: String => Body("name"), Required;
        /// URL of the organization in the dashboard
        url: String => Body("url"), Computed;
        /// API related settings
        api: OrganizationApi => Body("api"), OptionalComputed;
    }
}

pub struct Organizations;

impl ResourceEndpoint for Organizations {
    type State = Organization;

    const NAME: &'static str = "Organization";
    const DESCRIPTION: &'static str = "Dashboard organization";
    const LIFECYCLE: Lifecycle = Lifecycle::Collection;
    const IMPORT_FORMAT: &'static str = "organizationId";

    fn item_path(state: &Organization) -> Option<String> {
        Some(format!("/organizations/{}", segment(&state.organization_id)?))
    }

    fn create_path(_state: &Organization) -> Option<String> {
        Some("/organizations".to_owned())
    }

    fn import(id: &str) -> Option<Organization> {
        let [organization_id] = import_parts(id, 1)?[..] else {
            return None;
        };
        Some(Organization {
            organization_id: Value::Value(organization_id.to_owned()),
            ..Default::default()
        })
    }
}

model! {
    /// Access of an administrator on tagged networks
    pub struct AdminTag {
        /// Network tag
        tag: String => Body("tag"), Required;
        /// Access level on the tagged networks
        access: String => Body("access"), Required;
    }
}

model! {
    /// Access of an administrator on a network
    pub struct AdminNetwork {
        /// Network ID
        id: String => Body("id"), Required;
        /// Access level on the network
        access: String => Body("access"), Required;
    }
}

model! {
    pub struct OrganizationAdmin {
        /// Organization ID
        organization_id: String => Path("organizationId"), Required;
        /// Administrator ID
        admin_id: String => Id("id"), Computed;
        /// Email of the administrator, cannot be changed
        email: String => Body("email"), Required;
        /// Name of the administrator
        name: String => Body("name"), Required;
        /// Access level on the organization
        org_access: String => Body("orgAccess"), Required;
        /// Authentication method: Email or Cisco SecureX Sign-On
        authentication_method: String => Body("authenticationMethod"), OptionalComputed;
        /// Access on tagged networks
        tags: Vec<Value<AdminTag>> => Body("tags"), OptionalComputed;
        /// Access on networks
        networks: Vec<Value<AdminNetwork>> => Body("networks"), OptionalComputed;
        /// Status of the account
        account_status: String => Body("accountStatus"), Computed;
        /// Whether the administrator has an API key
        has_api_key: bool => Body("hasApiKey"), Computed;
        /// Whether two-factor authentication is enabled
        two_factor_auth_enabled: bool => Body("twoFactorAuthEnabled"), Computed;
        /// Time of the last activity
        last_active: String => Body("lastActive"), Computed;
    }
}

pub struct OrganizationsAdmins;

impl ResourceEndpoint for OrganizationsAdmins {
    type State = OrganizationAdmin;

    const NAME: &'static str = "OrganizationAdmin";
    const DESCRIPTION: &'static str = "Dashboard administrator of an organization";
    const LIFECYCLE: Lifecycle = Lifecycle::Collection;
    const IMPORT_FORMAT: &'static str = "organizationId,adminId";

    fn item_path(state: &OrganizationAdmin) -> Option<String> {
        Some(format!(
            "/organizations/{}/admins/{}",
            segment(&state.organization_id)?,
            segment(&state.admin_id)?
        ))
    }

    fn create_path(state: &OrganizationAdmin) -> Option<String> {
        Some(format!(
            "/organizations/{}/admins",
            segment(&state.organization_id)?
        ))
    }

    /// Admins can only be listed
    fn lookup(state: &OrganizationAdmin) -> Option<Lookup> {
        Some(Lookup::Find {
            path: Self::create_path(state)?,
            key: "id",
            value: state.admin_id.as_ref_option()?.clone(),
        })
    }

    fn update_body(mut body: Json) -> Json {
        if let Some(body) = body.as_object_mut() {
            body.remove("email");
        }
        body
    }

    fn requires_replace(prior: &OrganizationAdmin, planned: &OrganizationAdmin) -> Vec<AttributePath> {
        if prior.email != planned.email {
            vec![AttributePath::new("email")]
        } else {
            Vec::new()
        }
    }

    fn import(id: &str) -> Option<OrganizationAdmin> {
        let [organization_id, admin_id] = import_parts(id, 2)?[..] else {
            return None;
        };
        Some(OrganizationAdmin {
            organization_id: Value::Value(organization_id.to_owned()),
            admin_id: Value::Value(admin_id.to_owned()),
            ..Default::default()
        })
    }

    fn validate(state: &OrganizationAdmin, diags: &mut Diagnostics) {
        check_one_of(
            diags,
            &state.org_access,
            ORG_ACCESS,
            AttributePath::new("org_access"),
        );
        for (i, tag) in state.tags.iter().flatten().enumerate() {
            if let Value::Value(tag) = tag {
                check_one_of(
                    diags,
                    &tag.access,
                    TARGET_ACCESS,
                    AttributePath::new("tags").index(i as i64).attribute("access"),
                );
            }
        }
        for (i, network) in state.networks.iter().flatten().enumerate() {
            if let Value::Value(network) = network {
                check_one_of(
                    diags,
                    &network.access,
                    TARGET_ACCESS,
                    AttributePath::new("networks").index(i as i64).attribute("access"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tf_provider::{Diagnostics, Value};

    use super::{OrganizationAdmin, Organizations, OrganizationsAdmins};
    use crate::api::{Lookup, ResourceEndpoint};
    use crate::model::Model;

    #[test]
    fn organization_paths() {
        let organization = Organizations::import("123").unwrap();
        assert_eq!(
            Organizations::item_path(&organization).as_deref(),
            Some("/organizations/123")
        );
        assert_eq!(
            Organizations::create_path(&Default::default()).as_deref(),
            Some("/organizations")
        );
        assert!(Organizations::item_path(&Default::default()).is_none());
        assert!(Organizations::import("1,2").is_none());
    }

    #[test]
    fn admins_are_found_in_the_list() {
        let admin = OrganizationsAdmins::import("123,A1").unwrap();
        assert_eq!(
            OrganizationsAdmins::lookup(&admin),
            Some(Lookup::Find {
                path: "/organizations/123/admins".to_owned(),
                key: "id",
                value: "A1".to_owned(),
            })
        );
    }

    #[test]
    fn admin_email_is_not_updated() {
        let body = OrganizationsAdmins::update_body(json!({
            "email": "miles@meraki.com",
            "name": "Miles",
        }));
        assert_eq!(body, json!({ "name": "Miles" }));

        let prior = OrganizationAdmin::from_body(&json!({ "email": "a@meraki.com" }));
        let planned = OrganizationAdmin::from_body(&json!({ "email": "b@meraki.com" }));
        assert_eq!(OrganizationsAdmins::requires_replace(&prior, &planned).len(), 1);
        assert!(OrganizationsAdmins::requires_replace(&prior, &prior).is_empty());
    }

    #[test]
    fn admin_access_is_validated() {
        let mut diags = Diagnostics::default();
        let admin = OrganizationAdmin::from_body(&json!({
            "orgAccess": "none",
            "tags": [{ "tag": "west", "access": "read-only" }],
            "networks": [{ "id": "N_1", "access": "admin" }],
        }));
        OrganizationsAdmins::validate(&admin, &mut diags);
        assert_eq!(diags.errors.len(), 1);

        let mut diags = Diagnostics::default();
        let admin = OrganizationAdmin {
            org_access: Value::Unknown,
            ..admin
        };
        OrganizationsAdmins::validate(&admin, &mut diags);
        assert_eq!(diags.errors.len(), 1);
    }
}
