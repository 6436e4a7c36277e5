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

//! Generic Terraform resources and data sources backed by dashboard endpoints

use tf_provider::Value;

mod data_source;
mod resource;

pub use data_source::{select_method, ApiDataSource, DataSourceEndpoint, Fetch, Method};
pub use resource::{ApiResource, Lifecycle, Lookup, ResourceEndpoint};

/// Percent-encoded path segment of a known, non-empty value
pub fn segment<T: ToString>(value: &Value<T>) -> Option<String> {
    match value {
        Value::Value(value) => {
            let value = value.to_string();
            (!value.is_empty()).then(|| urlencoding::encode(&value).into_owned())
        }
        Value::Null | Value::Unknown => None,
    }
}

/// Split an import identifier made of `count` comma separated parts
pub fn import_parts(id: &str, count: usize) -> Option<Vec<&str>> {
    let parts = id.split(',').map(str::trim).collect::<Vec<_>>();
    (parts.len() == count && parts.iter().all(|part| !part.is_empty())).then_some(parts)
}

/// Build a state from an import identifier made of a single part
pub fn import_one<T: Default>(id: &str, set: impl FnOnce(&mut T, Value<String>)) -> Option<T> {
    let [part] = import_parts(id, 1)?[..] else {
        return None;
    };
    let mut state = T::default();
    set(&mut state, Value::Value(part.to_owned()));
    Some(state)
}

#[cfg(test)]
mod tests {
    use tf_provider::Value;

    use super::{import_one, import_parts, segment};

    #[test]
    fn import_identifiers_are_split() {
        assert_eq!(import_parts("L_1, 3", 2), Some(vec!["L_1", "3"]));
        assert_eq!(import_parts("L_1", 1), Some(vec!["L_1"]));
        assert_eq!(import_parts("L_1,", 2), None);
        assert_eq!(import_parts("L_1,3,4", 2), None);
        assert_eq!(import_parts("", 1), None);
    }

    #[test]
    fn single_part_imports() {
        let id: Option<Value<String>> = import_one(" L_1 ", |id: &mut Value<String>, part| *id = part);
        assert_eq!(id, Some(Value::Value("L_1".to_owned())));
        assert_eq!(import_one("L_1,2", |id: &mut Value<String>, part| *id = part), None);
    }

    #[test]
    fn segments_are_encoded() {
        assert_eq!(segment(&Value::Value("L_1".to_owned())), Some("L_1".to_owned()));
        assert_eq!(
            segment(&Value::Value("a/b c".to_owned())),
            Some("a%2Fb%20c".to_owned())
        );
        assert_eq!(segment(&Value::Value(3i64)), Some("3".to_owned()));
        assert_eq!(segment(&Value::Value(String::new())), None);
        assert_eq!(segment::<String>(&Value::Unknown), None);
    }
}
