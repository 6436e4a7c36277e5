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

//! Typed Terraform state and its mapping to the dashboard JSON
//!
//! Every resource and data source state is a [`Model`]: a struct of [`Value`] fields
//! generated by the [`model!`] macro. A model knows its Terraform schema, how to build
//! a request body from itself, and how to refresh itself from a response.

use std::collections::HashMap;
use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value as Json};
use tf_provider::{Attribute, AttributePath, AttributeType, Block, Description, Schema, Value};

mod element;

pub use element::{IdRef, Set};

/// Where a field of a model lives on the wire
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Location {
    /// Sent in request bodies and read from responses
    Body,
    /// Part of the URL; refreshed from responses only when they carry it
    Path,
    /// Sent as a query parameter, never read back
    Query,
    /// Only read from responses (identifiers generated by the dashboard)
    Id,
    /// Only kept in the Terraform state
    Local,
}

/// Type that can be stored in a [`Value`] and converted from/to JSON
pub trait Element: Sized + Clone {
    /// Terraform type of the element
    fn attr_type() -> AttributeType;
    /// JSON representation, `None` if nothing is known
    fn to_json(&self) -> Option<Json>;
    /// Parse the JSON representation, `None` if the JSON has an incompatible shape
    fn from_json(json: &Json) -> Option<Self>;
    /// Fill the unknown parts of `self` with `remote`
    fn reconcile(&mut self, remote: Self) {
        _ = remote;
    }
    /// Replace the remaining unknown parts by nulls
    fn resolve_unknown(&mut self) {}
}

/// Field of a model: a [`Value`] around an [`Element`]
pub trait Field: Sized {
    fn attr_type() -> AttributeType;
    fn to_json(&self) -> Option<Json>;
    fn from_json(json: Option<&Json>) -> Self;
    fn reconcile(&mut self, remote: Self);
    fn resolve_unknown(&mut self);
}

impl<T: Element> Field for Value<T> {
    fn attr_type() -> AttributeType {
        T::attr_type()
    }

    fn to_json(&self) -> Option<Json> {
        match self {
            Value::Value(value) => value.to_json(),
            Value::Null | Value::Unknown => None,
        }
    }

    fn from_json(json: Option<&Json>) -> Self {
        match json {
            None | Some(Json::Null) => Value::Null,
            Some(json) => T::from_json(json).into(),
        }
    }

    fn reconcile(&mut self, remote: Self) {
        if self.is_unknown() {
            *self = remote;
        } else if let (Value::Value(planned), Value::Value(remote)) = (self, remote) {
            planned.reconcile(remote);
        }
    }

    fn resolve_unknown(&mut self) {
        if self.is_unknown() {
            *self = Value::Null;
        } else if let Value::Value(value) = self {
            value.resolve_unknown();
        }
    }
}

/// Struct generated by [`model!`]
pub trait Model:
    Element + Default + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Terraform attributes of the model
    fn attributes() -> HashMap<String, Attribute>;

    /// Request body: known `Body` fields that are not computed
    fn to_body(&self) -> Map<String, Json>;

    /// Query parameters built from the known `Query` fields
    fn query(&self) -> Vec<(String, String)>;

    /// Overwrite the fields read from the dashboard with `json`
    fn refresh(&mut self, json: &Json);

    /// Build a model from a response
    fn from_body(json: &Json) -> Self {
        let mut model = Self::default();
        model.refresh(json);
        model
    }

    /// Mark the computed fields left out of `config` as unknown
    ///
    /// Path and Id fields identify the remote object: they are only marked when `creating`.
    fn plan_computed(&mut self, config: &Self, creating: bool);

    /// Attributes that differ between `self` and `other`
    fn changed_fields(&self, other: &Self, only_path: bool) -> Vec<AttributePath>;

    /// Schema of a resource or data source using this model as state
    fn schema(description: &str) -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: Self::attributes(),
                description: Description::plain(description),
                ..Default::default()
            },
        }
    }
}

/// Expand a JSON value into query parameters
///
/// Arrays use the dashboard convention `key[]=a&key[]=b`.
pub fn query_pairs(key: &str, json: &Json) -> Vec<(String, String)> {
    fn scalar(json: &Json) -> Option<String> {
        match json {
            Json::String(s) => Some(s.clone()),
            Json::Number(n) => Some(n.to_string()),
            Json::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
    match json {
        Json::Array(items) => items
            .iter()
            .filter_map(scalar)
            .map(|item| (format!("{key}[]"), item))
            .collect(),
        json => scalar(json)
            .map(|value| (key.to_owned(), value))
            .into_iter()
            .collect(),
    }
}

/// Generate a [`Model`] struct
///
/// ```ignore
/// model! {
///     /// Content filtering settings
///     pub struct ContentFiltering {
///         /// Network ID
///         network_id: String => Path("networkId"), Required;
///         /// Blocked URL patterns
///         blocked_url_patterns: Vec<Value<String>> => Body("blockedUrlPatterns"), OptionalComputed;
///         /// Pre-shared key
///         psk: String => Body("psk"), Optional, sensitive;
///     }
/// }
/// ```
///
/// Each field becomes a `Value<T>` named after the Terraform attribute, mapped to the given
/// JSON key. The doc comment of each field is used as the attribute description.
macro_rules! model {
    (@sensitive) => { false };
    (@sensitive sensitive) => { true };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:literal])+
                $field:ident : $ty:ty => $loc:ident ( $json:literal ) , $constraint:ident $(, $flag:ident)? ;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[doc = $doc])+
                pub $field: ::tf_provider::Value<$ty>,
            )*
        }

        impl $crate::model::Element for $name {
            fn attr_type() -> ::tf_provider::AttributeType {
                ::tf_provider::AttributeType::AttributeSingle(
                    <Self as $crate::model::Model>::attributes(),
                )
            }
            fn to_json(&self) -> Option<::serde_json::Value> {
                Some(::serde_json::Value::Object(
                    <Self as $crate::model::Model>::to_body(self),
                ))
            }
            fn from_json(json: &::serde_json::Value) -> Option<Self> {
                json.is_object()
                    .then(|| <Self as $crate::model::Model>::from_body(json))
            }
            #[allow(unused_variables)]
            fn reconcile(&mut self, remote: Self) {
                $(
                    $crate::model::Field::reconcile(&mut self.$field, remote.$field);
                )*
            }
            fn resolve_unknown(&mut self) {
                $(
                    $crate::model::Field::resolve_unknown(&mut self.$field);
                )*
            }
        }

        impl $crate::model::Model for $name {
            fn attributes() -> ::std::collections::HashMap<String, ::tf_provider::Attribute> {
                #[allow(unused_mut)]
                let mut attributes = ::std::collections::HashMap::new();
                $(
                    attributes.insert(
                        stringify!($field).to_owned(),
                        ::tf_provider::Attribute {
                            attr_type: <::tf_provider::Value<$ty> as $crate::model::Field>::attr_type(),
                            description: ::tf_provider::Description::plain(
                                concat!($($doc),+).trim(),
                            ),
                            constraint: ::tf_provider::AttributeConstraint::$constraint,
                            sensitive: $crate::model::model!(@sensitive $($flag)?),
                            ..Default::default()
                        },
                    );
                )*
                attributes
            }

            fn to_body(&self) -> ::serde_json::Map<String, ::serde_json::Value> {
                #[allow(unused_mut)]
                let mut body = ::serde_json::Map::new();
                $(
                    if $crate::model::Location::$loc == $crate::model::Location::Body
                        && ::tf_provider::AttributeConstraint::$constraint
                            != ::tf_provider::AttributeConstraint::Computed
                    {
                        if let Some(json) = $crate::model::Field::to_json(&self.$field) {
                            body.insert($json.to_owned(), json);
                        }
                    }
                )*
                body
            }

            fn query(&self) -> Vec<(String, String)> {
                #[allow(unused_mut)]
                let mut query = Vec::new();
                $(
                    if $crate::model::Location::$loc == $crate::model::Location::Query {
                        if let Some(json) = $crate::model::Field::to_json(&self.$field) {
                            query.extend($crate::model::query_pairs($json, &json));
                        }
                    }
                )*
                query
            }

            #[allow(unused_variables)]
            fn refresh(&mut self, json: &::serde_json::Value) {
                $(
                    match $crate::model::Location::$loc {
                        $crate::model::Location::Body | $crate::model::Location::Id => {
                            self.$field = $crate::model::Field::from_json(json.get($json));
                        }
                        $crate::model::Location::Path => {
                            if let Some(value) = json.get($json).filter(|value| !value.is_null()) {
                                self.$field = $crate::model::Field::from_json(Some(value));
                            }
                        }
                        $crate::model::Location::Query | $crate::model::Location::Local => (),
                    }
                )*
            }

            #[allow(unused_variables)]
            fn plan_computed(&mut self, config: &Self, creating: bool) {
                $(
                    if matches!(
                        ::tf_provider::AttributeConstraint::$constraint,
                        ::tf_provider::AttributeConstraint::Computed
                            | ::tf_provider::AttributeConstraint::OptionalComputed
                    ) && config.$field.is_null()
                        && (creating
                            || matches!(
                                $crate::model::Location::$loc,
                                $crate::model::Location::Body | $crate::model::Location::Query
                            ))
                    {
                        self.$field = ::tf_provider::Value::Unknown;
                    }
                )*
            }

            #[allow(unused_variables)]
            fn changed_fields(
                &self,
                other: &Self,
                only_path: bool,
            ) -> Vec<::tf_provider::AttributePath> {
                #[allow(unused_mut)]
                let mut changed = Vec::new();
                $(
                    if (!only_path || $crate::model::Location::$loc == $crate::model::Location::Path)
                        && self.$field != other.$field
                    {
                        changed.push(::tf_provider::AttributePath::new(stringify!($field)));
                    }
                )*
                changed
            }
        }
    };
}

pub(crate) use model;
