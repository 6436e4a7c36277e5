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

use serde_json::{json, Value as Json};
use tf_provider::{AttributePath, Diagnostics, Value};

use crate::api::{import_one, segment, Lifecycle, ResourceEndpoint};
use crate::model::{model, IdRef};
use crate::utils::{check_one_of, strings_of};

/// Comment of the rule the dashboard appends to every L3 rule list
const DEFAULT_RULE: &str = "Default rule";

model! {
    pub struct ContentFiltering {
        /// Network ID
        network_id: String => Path("networkId"), Required;
        /// URL patterns to allow
        allowed_url_patterns: Vec<Value<String>> => Body("allowedUrlPatterns"), OptionalComputed;
        /// URL patterns to block
        blocked_url_patterns: Vec<Value<String>> => Body("blockedUrlPatterns"), OptionalComputed;
        /// IDs of the URL categories to block
        blocked_url_categories: Vec<Value<IdRef>> => Body("blockedUrlCategories"), OptionalComputed;
        /// Size of the category lists: topSites or fullList
        url_category_list_size: String => Body("urlCategoryListSize"), OptionalComputed;
    }
}

pub struct NetworksApplianceContentFiltering;

impl ResourceEndpoint for NetworksApplianceContentFiltering {
    type State = ContentFiltering;

    const NAME: &'static str = "NetworkApplianceContentFiltering";
    const DESCRIPTION: &'static str = "Content filtering settings of an appliance network";
    const LIFECYCLE: Lifecycle = Lifecycle::Settings;
    const IMPORT_FORMAT: &'static str = "networkId";

    fn item_path(state: &ContentFiltering) -> Option<String> {
        Some(format!(
            "/networks/{}/appliance/contentFiltering",
            segment(&state.network_id)?
        ))
    }

    fn import(id: &str) -> Option<ContentFiltering> {
        import_one(id, |filtering: &mut ContentFiltering, network_id| {
            filtering.network_id = network_id
        })
    }

    fn validate(state: &ContentFiltering, diags: &mut Diagnostics) {
        check_one_of(
            diags,
            &state.url_category_list_size,
            &["topSites", "fullList"],
            AttributePath::new("url_category_list_size"),
        );
        for (attribute, patterns) in [
            ("allowed_url_patterns", &state.allowed_url_patterns),
            ("blocked_url_patterns", &state.blocked_url_patterns),
        ] {
            for (i, pattern) in strings_of(patterns.iter().flatten()) {
                if pattern.trim().is_empty() {
                    diags.error_short(
                        "URL patterns must not be empty",
                        AttributePath::new(attribute).index(i as i64),
                    );
                }
            }
        }
    }
}

model! {
    /// Layer 3 firewall rule
    pub struct FirewallRule {
        /// Description of the rule
        comment: String => Body("comment"), Optional;
        /// Policy of the rule: allow or deny
        policy: String => Body("policy"), Required;
        /// Protocol of the rule: tcp, udp, icmp, icmp6 or any
        protocol: String => Body("protocol"), Required;
        /// Source ports, a comma separated list or Any
        src_port: String => Body("srcPort"), OptionalComputed;
        /// Source CIDRs, a comma separated list or Any
        src_cidr: String => Body("srcCidr"), Required;
        /// Destination ports, a comma separated list or Any
        dest_port: String => Body("destPort"), OptionalComputed;
        /// Destination CIDRs, a comma separated list or Any
        dest_cidr: String => Body("destCidr"), Required;
        /// Log the matches of the rule to syslog
        syslog_enabled: bool => Body("syslogEnabled"), OptionalComputed;
    }
}

model! {
    pub struct L3FirewallRules {
        /// Network ID
        network_id: String => Path("networkId"), Required;
        /// Ordered list of rules, without the default rule
        rules: Vec<Value<FirewallRule>> => Body("rules"), OptionalComputed;
        /// Log the matches of the default rule to syslog
        syslog_default_rule: bool => Body("syslogDefaultRule"), OptionalComputed;
    }
}

pub struct NetworksApplianceFirewallL3FirewallRules;

impl ResourceEndpoint for NetworksApplianceFirewallL3FirewallRules {
    type State = L3FirewallRules;

    const NAME: &'static str = "NetworkApplianceFirewallL3FirewallRules";
    const DESCRIPTION: &'static str = "Layer 3 firewall rules of an appliance network";
    const LIFECYCLE: Lifecycle = Lifecycle::Settings;
    const IMPORT_FORMAT: &'static str = "networkId";

    fn item_path(state: &L3FirewallRules) -> Option<String> {
        Some(format!(
            "/networks/{}/appliance/firewall/l3FirewallRules",
            segment(&state.network_id)?
        ))
    }

    fn destroy_body(_state: &L3FirewallRules) -> Option<Json> {
        Some(json!({ "rules": [] }))
    }

    fn import(id: &str) -> Option<L3FirewallRules> {
        import_one(id, |rules: &mut L3FirewallRules, network_id| {
            rules.network_id = network_id
        })
    }

    fn normalize_response(mut response: Json) -> Json {
        if let Some(rules) = response.get_mut("rules").and_then(Json::as_array_mut) {
            rules.retain(|rule| rule.get("comment").and_then(Json::as_str) != Some(DEFAULT_RULE));
        }
        response
    }

    fn validate(state: &L3FirewallRules, diags: &mut Diagnostics) {
        for (i, rule) in state.rules.iter().flatten().enumerate() {
            let Value::Value(rule) = rule else {
                continue;
            };
            let path = AttributePath::new("rules").index(i as i64);
            check_one_of(
                diags,
                &rule.policy,
                &["allow", "deny"],
                path.clone().attribute("policy"),
            );
            check_one_of(
                diags,
                &rule.protocol,
                &["tcp", "udp", "icmp", "icmp6", "any"],
                path.attribute("protocol"),
            );
        }
    }
}
