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

use std::fmt::Display;

use serde_json::Value as Json;
use tf_provider::{AttributePath, Diagnostics, Value};

use crate::model::Element;

/// Report the error of a failed call into the diagnostics
pub(crate) trait ReportDiagnostics {
    type Output;
    fn report(self, diags: &mut Diagnostics, operation: &str) -> Option<Self::Output>;
}

impl<T, E: Display> ReportDiagnostics for Result<T, E> {
    type Output = T;
    fn report(self, diags: &mut Diagnostics, operation: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!(operation, "{err}");
                diags.root_error(
                    format!("Failure when executing {operation}"),
                    err.to_string(),
                );
                None
            }
        }
    }
}

/// Select the method whose parameters are the most supplied
///
/// `methods[i][j]` tells if the parameter `j` of the method `i` has been given.
/// The score of a method is the share of its parameters that are given, a method without
/// parameters scores zero. Ties are resolved in favor of the first method.
pub fn pick_method(methods: &[Vec<bool>]) -> Option<usize> {
    let mut selected = None;
    let mut best = f64::NEG_INFINITY;
    for (i, present) in methods.iter().enumerate() {
        let score = if present.is_empty() {
            0.0
        } else {
            present.iter().filter(|&&given| given).count() as f64 / present.len() as f64
        };
        if score > best {
            best = score;
            selected = Some(i);
        }
    }
    selected
}

/// Find the first object of `items` whose `key` matches `value`
pub fn find_by_key<'a>(
    items: &'a [Json],
    key: &str,
    value: &str,
    case_insensitive: bool,
) -> Option<&'a Json> {
    items.iter().find(|item| {
        item.get(key)
            .and_then(String::from_json)
            .is_some_and(|found| {
                if case_insensitive {
                    found.eq_ignore_ascii_case(value)
                } else {
                    found == value
                }
            })
    })
}

/// Deep merge of `overlay` into `base`
///
/// Objects are merged key by key, any other value of `overlay` replaces `base`.
/// Nulls from `overlay` are ignored unless `keep_null` is set.
pub fn merge_json(base: Json, overlay: Json, keep_null: bool) -> Json {
    match (base, overlay) {
        (Json::Object(mut base), Json::Object(overlay)) => {
            for (key, value) in overlay {
                if value.is_null() && !keep_null {
                    continue;
                }
                let merged = match base.remove(&key) {
                    Some(previous) => merge_json(previous, value, keep_null),
                    None => value,
                };
                base.insert(key, merged);
            }
            Json::Object(base)
        }
        (base, Json::Null) if !keep_null => base,
        (_, overlay) => overlay,
    }
}

/// Known strings of a list, with their position in the list
pub fn strings_of<'a>(
    items: impl IntoIterator<Item = &'a Value<String>>,
) -> Vec<(usize, &'a str)> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| Some((i, item.as_ref_option()?.as_str())))
        .collect()
}

/// Check that a known string attribute is one of the allowed values
pub(crate) fn check_one_of(
    diags: &mut Diagnostics,
    value: &Value<String>,
    allowed: &[&str],
    attribute: AttributePath,
) {
    if let Value::Value(value) = value {
        if !allowed.contains(&value.as_str()) {
            diags.error(
                format!("Invalid value `{value}`"),
                format!("Attribute must be one of: {}", allowed.join(", ")),
                attribute,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tf_provider::{AttributePath, Diagnostics, Value};

    use super::{check_one_of, find_by_key, merge_json, pick_method, strings_of};

    #[test]
    fn pick_method_prefers_the_most_complete() {
        let methods = vec![vec![true, false, false, false], vec![true]];
        assert_eq!(pick_method(&methods), Some(1));

        let methods = vec![vec![true, true], vec![false]];
        assert_eq!(pick_method(&methods), Some(0));
    }

    #[test]
    fn pick_method_ties_keep_the_first() {
        let methods = vec![vec![false], vec![false, false]];
        assert_eq!(pick_method(&methods), Some(0));

        let methods = vec![vec![], vec![false]];
        assert_eq!(pick_method(&methods), Some(0));

        assert_eq!(pick_method(&[]), None);
    }

    #[test]
    fn find_by_key_compares_as_strings() {
        let items = vec![
            json!({ "id": 1, "name": "Alpha" }),
            json!({ "id": "2", "name": "beta" }),
        ];
        assert_eq!(find_by_key(&items, "id", "1", false), Some(&items[0]));
        assert_eq!(find_by_key(&items, "name", "BETA", true), Some(&items[1]));
        assert_eq!(find_by_key(&items, "name", "BETA", false), None);
        assert_eq!(find_by_key(&items, "missing", "1", false), None);
    }

    #[test]
    fn merge_json_overlays_objects() {
        let base = json!({ "a": 1, "b": { "c": 2, "d": 3 }, "e": [1, 2] });
        let overlay = json!({ "b": { "c": 20, "x": null }, "e": [3], "f": null });
        assert_eq!(
            merge_json(base.clone(), overlay.clone(), false),
            json!({ "a": 1, "b": { "c": 20, "d": 3 }, "e": [3] })
        );
        assert_eq!(
            merge_json(base, overlay, true),
            json!({ "a": 1, "b": { "c": 20, "d": 3, "x": null }, "e": [3], "f": null })
        );
        assert_eq!(merge_json(json!(1), json!(null), false), json!(1));
    }

    #[test]
    fn strings_of_keeps_positions() {
        let list = vec![
            Value::Null,
            Value::Value("a".to_owned()),
            Value::Unknown,
            Value::Value("b".to_owned()),
        ];
        assert_eq!(strings_of(&list), vec![(1, "a"), (3, "b")]);
        let unknown: Value<Vec<Value<String>>> = Value::Unknown;
        assert!(strings_of(unknown.iter().flatten()).is_empty());
    }

    #[test]
    fn check_one_of_ignores_unknown() {
        let mut diags = Diagnostics::default();
        check_one_of(
            &mut diags,
            &Value::Unknown,
            &["allow", "deny"],
            AttributePath::new("policy"),
        );
        check_one_of(
            &mut diags,
            &Value::Value("allow".to_owned()),
            &["allow", "deny"],
            AttributePath::new("policy"),
        );
        assert!(diags.errors.is_empty());

        check_one_of(
            &mut diags,
            &Value::Value("drop".to_owned()),
            &["allow", "deny"],
            AttributePath::new("policy"),
        );
        assert_eq!(diags.errors.len(), 1);
    }
}
