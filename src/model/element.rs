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

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as Json};
use tf_provider::{AttributeType, Value};

use super::{Element, Field};

impl Element for String {
    fn attr_type() -> AttributeType {
        AttributeType::String
    }

    fn to_json(&self) -> Option<Json> {
        Some(Json::String(self.clone()))
    }

    fn from_json(json: &Json) -> Option<Self> {
        match json {
            Json::String(s) => Some(s.clone()),
            Json::Number(n) => Some(n.to_string()),
            Json::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl Element for i64 {
    fn attr_type() -> AttributeType {
        AttributeType::Number
    }

    fn to_json(&self) -> Option<Json> {
        Some(Json::from(*self))
    }

    fn from_json(json: &Json) -> Option<Self> {
        match json {
            Json::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Json::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl Element for f64 {
    fn attr_type() -> AttributeType {
        AttributeType::Number
    }

    fn to_json(&self) -> Option<Json> {
        Number::from_f64(*self).map(Json::Number)
    }

    fn from_json(json: &Json) -> Option<Self> {
        match json {
            Json::Number(n) => n.as_f64(),
            Json::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl Element for bool {
    fn attr_type() -> AttributeType {
        AttributeType::Bool
    }

    fn to_json(&self) -> Option<Json> {
        Some(Json::Bool(*self))
    }

    fn from_json(json: &Json) -> Option<Self> {
        match json {
            Json::Bool(b) => Some(*b),
            Json::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Json::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

impl<T: Element> Element for Vec<Value<T>> {
    fn attr_type() -> AttributeType {
        match T::attr_type() {
            AttributeType::AttributeSingle(attributes) => AttributeType::AttributeList(attributes),
            attr_type => AttributeType::List(Box::new(attr_type)),
        }
    }

    fn to_json(&self) -> Option<Json> {
        Some(Json::Array(
            self.iter()
                .map(|item| item.to_json().unwrap_or(Json::Null))
                .collect(),
        ))
    }

    fn from_json(json: &Json) -> Option<Self> {
        json.as_array()
            .map(|items| items.iter().map(|item| Field::from_json(Some(item))).collect())
    }

    fn reconcile(&mut self, remote: Self) {
        if self.len() == remote.len() {
            for (planned, remote) in self.iter_mut().zip(remote) {
                planned.reconcile(remote);
            }
        }
    }

    fn resolve_unknown(&mut self) {
        for item in self {
            item.resolve_unknown();
        }
    }
}

/// Unordered collection, stored as a Terraform set
///
/// Equality ignores the order of the items: the dashboard answers with its own ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Set<T>(pub Vec<Value<T>>);

impl<T> Default for Set<T> {
    fn default() -> Self {
        Set(Vec::new())
    }
}

impl<T> Set<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, Value<T>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> FromIterator<Value<T>> for Set<T> {
    fn from_iter<I: IntoIterator<Item = Value<T>>>(iter: I) -> Self {
        Set(iter.into_iter().collect())
    }
}

impl<T: PartialEq> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().all(|item| other.0.contains(item))
            && other.0.iter().all(|item| self.0.contains(item))
    }
}

impl<T: Element + PartialEq> Element for Set<T> {
    fn attr_type() -> AttributeType {
        match T::attr_type() {
            AttributeType::AttributeSingle(attributes) => AttributeType::AttributeSet(attributes),
            attr_type => AttributeType::Set(Box::new(attr_type)),
        }
    }

    fn to_json(&self) -> Option<Json> {
        self.0.to_json()
    }

    fn from_json(json: &Json) -> Option<Self> {
        Vec::<Value<T>>::from_json(json).map(Set)
    }

    fn resolve_unknown(&mut self) {
        self.0.resolve_unknown();
    }
}

/// Reference to a dashboard object by its ID
///
/// Written as a plain string, but the dashboard may answer with `{ "id": ..., "name": ... }`
/// objects instead of the IDs it was given.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdRef(pub String);

impl Element for IdRef {
    fn attr_type() -> AttributeType {
        AttributeType::String
    }

    fn to_json(&self) -> Option<Json> {
        Some(Json::String(self.0.clone()))
    }

    fn from_json(json: &Json) -> Option<Self> {
        match json {
            Json::Object(object) => object.get("id").and_then(Self::from_json),
            json => String::from_json(json).map(IdRef),
        }
    }
}
