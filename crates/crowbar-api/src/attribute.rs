//! The `Attribute` record.
//!
//! An attribute names one piece of configuration data and where it lives:
//! `map` is a `/`-separated path into the JSON blobs the admin node keeps on
//! nodes, roles and deployments. Attributes are published by barclamps and
//! usually belong to a role.

use crate::{
    ids::ResourceId,
    log,
    log::Topic,
    resource::{Field, Resource},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

/// Declared keys, in the order the admin node renders them.
pub const FIELDS: [&str; 9] = [
    "map",
    "description",
    "role_id",
    "created_at",
    "updated_at",
    "barclamp_id",
    "order",
    "id",
    "name",
];

///
/// AttributeError
///

#[derive(Debug, ThisError)]
pub enum AttributeError {
    #[error("attribute '{name}' has an empty map")]
    EmptyMap { name: String },

    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

///
/// AttributeEnum
///
/// Enumerations the API publishes for attributes. None are defined yet; the
/// type is attached to [`Attribute`] through [`Resource::Enums`].
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttributeEnum {}

///
/// Attribute
///
/// Client-side mirror of one attribute record.
///
/// Building from a mapping adopts exactly the keys of that mapping: declared
/// keys missing from the input stay [`Field::Absent`] instead of being filled
/// with defaults, and undeclared keys are kept verbatim in `extra`. Only
/// [`Attribute::new`] exposes the full declared shape.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub map: Field<String>,
    pub description: Field<String>,
    pub role_id: Field<ResourceId>,
    pub created_at: Field<String>,
    pub updated_at: Field<String>,
    pub barclamp_id: Field<ResourceId>,
    pub order: Field<i64>,
    pub id: Field<ResourceId>,
    pub name: Field<String>,
    pub extra: BTreeMap<String, Value>,
}

impl Attribute {
    /// Declared shape with every field present but unset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: Field::Unset,
            description: Field::Unset,
            role_id: Field::Unset,
            created_at: Field::Unset,
            updated_at: Field::Unset,
            barclamp_id: Field::Unset,
            order: Field::Unset,
            id: Field::Unset,
            name: Field::Unset,
            extra: BTreeMap::new(),
        }
    }

    /// Adopt a mapping; the input is left untouched.
    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self::from_owned_map(map.clone())
    }

    #[must_use]
    pub fn from_owned_map(map: Map<String, Value>) -> Self {
        let mut attr = Self::empty();

        for (key, value) in map {
            match key.as_str() {
                "map" => attr.map = Field::from_json(value),
                "description" => attr.description = Field::from_json(value),
                "role_id" => attr.role_id = Field::from_json(value),
                "created_at" => attr.created_at = Field::from_json(value),
                "updated_at" => attr.updated_at = Field::from_json(value),
                "barclamp_id" => attr.barclamp_id = Field::from_json(value),
                "order" => attr.order = Field::from_json(value),
                "id" => attr.id = Field::from_json(value),
                "name" => attr.name = Field::from_json(value),
                _ => {
                    attr.extra.insert(key, value);
                }
            }
        }

        attr
    }

    pub fn from_value(value: Value) -> Result<Self, AttributeError> {
        match value {
            Value::Object(map) => Ok(Self::from_owned_map(map)),
            other => Err(AttributeError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    // no declared field present
    fn empty() -> Self {
        Self {
            map: Field::Absent,
            description: Field::Absent,
            role_id: Field::Absent,
            created_at: Field::Absent,
            updated_at: Field::Absent,
            barclamp_id: Field::Absent,
            order: Field::Absent,
            id: Field::Absent,
            name: Field::Absent,
            extra: BTreeMap::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Field introspection
    // -------------------------------------------------------------------------

    /// Keys this record exposes: present declared fields plus `extra` keys.
    #[must_use]
    pub fn field_names(&self) -> BTreeSet<&str> {
        let mut names: BTreeSet<&str> = self.extra.keys().map(String::as_str).collect();
        for key in FIELDS {
            if self.declared(key) == Some(true) {
                names.insert(key);
            }
        }

        names
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.declared(key)
            .unwrap_or_else(|| self.extra.contains_key(key))
    }

    /// JSON value under `key`. `None` means the record does not carry the
    /// key; an unset field is `Some(Value::Null)`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "map" => self.map.to_json(),
            "description" => self.description.to_json(),
            "role_id" => self.role_id.to_json(),
            "created_at" => self.created_at.to_json(),
            "updated_at" => self.updated_at.to_json(),
            "barclamp_id" => self.barclamp_id.to_json(),
            "order" => self.order.to_json(),
            "id" => self.id.to_json(),
            "name" => self.name.to_json(),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Render back into the mapping this record was built from.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut out: Map<String, Value> = FIELDS
            .iter()
            .filter_map(|key| self.get(key).map(|v| ((*key).to_string(), v)))
            .collect();

        for (key, value) in &self.extra {
            out.insert(key.clone(), value.clone());
        }

        out
    }

    // presence of a declared field; None for undeclared keys
    fn declared(&self, key: &str) -> Option<bool> {
        let present = match key {
            "map" => self.map.is_present(),
            "description" => self.description.is_present(),
            "role_id" => self.role_id.is_present(),
            "created_at" => self.created_at.is_present(),
            "updated_at" => self.updated_at.is_present(),
            "barclamp_id" => self.barclamp_id.is_present(),
            "order" => self.order.is_present(),
            "id" => self.id.is_present(),
            "name" => self.name.is_present(),
            _ => return None,
        };

        Some(present)
    }

    // -------------------------------------------------------------------------
    // Map paths
    // -------------------------------------------------------------------------

    /// Segments of `map`. Interior empty segments are kept (`a//b` is
    /// `["a", "", "b"]`); trailing ones are dropped, so `""` has none.
    #[must_use]
    pub fn map_keys(&self) -> Vec<&str> {
        let Some(map) = self.map.value() else {
            return Vec::new();
        };

        let mut keys: Vec<&str> = map.split('/').collect();
        while keys.last().is_some_and(|k| k.is_empty()) {
            keys.pop();
        }

        keys
    }

    /// Value the attribute falls back to when data does not carry it,
    /// published by the server as `{"default": {"value": ...}}`.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.extra.get("default").and_then(|d| d.get("value"))
    }

    /// Nest `value` under the map path: `a/b` with `1` is `{"a":{"b":1}}`.
    pub fn template(&self, value: Value) -> Result<Value, AttributeError> {
        let keys = self.map_keys();
        if keys.is_empty() {
            return Err(AttributeError::EmptyMap {
                name: self.display_name(),
            });
        }

        Ok(keys.iter().rev().fold(value, |inner, key| {
            let mut level = Map::new();
            level.insert((*key).to_string(), inner);
            Value::Object(level)
        }))
    }

    /// Value at the map path inside `data`, without the default fallback.
    /// An explicit `null` counts as missing.
    #[must_use]
    pub fn lookup<'a>(&self, data: &'a Value) -> Option<&'a Value> {
        self.walk(data).filter(|v| !v.is_null())
    }

    /// Value at the map path inside `data`, falling back to the default.
    #[must_use]
    pub fn value_from(&self, data: &Value) -> Option<Value> {
        if let Some(found) = self.lookup(data) {
            log!(Topic::Attribute, Debug, "got {}: {found}", self.display_name());
            return Some(found.clone());
        }

        let fallback = self.default_value().cloned();
        if let Some(value) = &fallback {
            log!(
                Topic::Attribute,
                Debug,
                "got {}: default {value}",
                self.display_name()
            );
        }

        fallback
    }

    /// [`Attribute::value_from`] nested back under the map path; a missing
    /// value with no default nests `null`.
    pub fn extract(&self, data: &Value) -> Result<Value, AttributeError> {
        self.template(self.value_from(data).unwrap_or(Value::Null))
    }

    /// Merge `value` into `data` at the map path. Returns false when `data`
    /// already held exactly that value; the default is not consulted.
    pub fn set_on(&self, data: &mut Value, value: Value) -> Result<bool, AttributeError> {
        if !data.is_object() {
            return Err(AttributeError::NotAnObject {
                found: json_kind(data),
            });
        }

        if self.walk(data) == Some(&value) {
            return Ok(false);
        }

        let patch = self.template(value)?;
        deep_merge(data, patch);

        Ok(true)
    }

    // raw node at the map path, null included
    fn walk<'a>(&self, data: &'a Value) -> Option<&'a Value> {
        let keys = self.map_keys();
        if keys.is_empty() {
            return None;
        }

        keys.iter().try_fold(data, |node, key| node.get(key))
    }

    fn display_name(&self) -> String {
        match &self.name {
            Field::Value(name) => name.clone(),
            _ => self.id.value().map(ToString::to_string).unwrap_or_default(),
        }
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for Attribute {
    const RESOURCE_TYPE: &'static str = "Attribute";

    type Enums = AttributeEnum;
}

impl From<Map<String, Value>> for Attribute {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_owned_map(map)
    }
}

impl TryFrom<Value> for Attribute {
    type Error = AttributeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Attribute {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from_owned_map)
    }
}

///
/// helpers
///

// objects merge key by key, anything else is replaced
fn deep_merge(into: &mut Value, from: Value) {
    match (into, from) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, value) in src {
                match dst.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        dst.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn ntp_servers() -> Attribute {
        Attribute::from_map(&obj(json!({
            "id": 12,
            "name": "ntp_servers",
            "map": "ntp/servers",
            "default": { "value": ["pool.ntp.org"] },
        })))
    }

    #[test]
    fn new_exposes_nine_unset_fields() {
        let attr = Attribute::new();

        let names: Vec<&str> = attr.field_names().into_iter().collect();
        let mut expected = FIELDS.to_vec();
        expected.sort_unstable();
        assert_eq!(names, expected);

        for key in FIELDS {
            assert_eq!(attr.get(key), Some(Value::Null), "{key} should be unset");
        }
        assert!(attr.extra.is_empty());
    }

    #[test]
    fn mapping_replaces_declared_shape() {
        let attr = Attribute::from_map(&obj(json!({ "id": "42", "name": "foo" })));

        let names: Vec<&str> = attr.field_names().into_iter().collect();
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(attr.id, Field::Value(ResourceId::Key("42".to_string())));
        assert_eq!(attr.name, Field::Value("foo".to_string()));
        assert!(attr.description.is_absent());
        assert!(!attr.contains("description"));
        assert_eq!(attr.get("description"), None);
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let attr = Attribute::from_map(&obj(json!({ "id": "42", "name": "foo", "extra": 7 })));

        assert!(attr.contains("extra"));
        assert_eq!(attr.get("extra"), Some(json!(7)));
        assert_eq!(attr.field_names().len(), 3);
    }

    #[test]
    fn empty_mapping_exposes_nothing() {
        let attr = Attribute::from_map(&Map::new());

        assert!(attr.field_names().is_empty());
        assert_ne!(attr, Attribute::new());
    }

    #[test]
    fn fields_round_trip_to_keys() {
        let input = obj(json!({
            "map": "ntp/servers",
            "order": 1000,
            "role_id": 3,
            "created_at": "2014-06-01T10:00:00.000Z",
            "writable": true,
        }));
        let attr = Attribute::from_map(&input);

        let keys: BTreeSet<&str> = input.keys().map(String::as_str).collect();
        assert_eq!(attr.field_names(), keys);
        assert_eq!(attr.to_map(), input);
    }

    #[test]
    fn unexpected_types_are_not_coerced() {
        let input = obj(json!({ "order": "first", "id": -1, "created_at": 1_401_616_800 }));
        let attr = Attribute::from_map(&input);

        assert_eq!(attr.order, Field::Raw(json!("first")));
        assert_eq!(attr.id, Field::Raw(json!(-1)));
        assert_eq!(attr.created_at, Field::Raw(json!(1_401_616_800)));
        assert_eq!(attr.to_map(), input);
    }

    #[test]
    fn equal_mappings_build_equal_records() {
        let a = Attribute::from_map(&obj(json!({ "id": 1, "name": "a" })));
        let b = Attribute::from_map(&obj(json!({ "id": 1, "name": "a" })));
        let c = Attribute::from_map(&obj(json!({ "id": 1, "name": "b" })));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn construction_does_not_mutate_input() {
        let input = obj(json!({ "id": 5, "name": "dns_domain", "schema": { "type": "str" } }));
        let snapshot = input.clone();

        let first = Attribute::from_map(&input);
        let second = Attribute::from_map(&input);

        assert_eq!(input, snapshot);
        assert_eq!(first, second);
        assert_eq!(first.field_names(), second.field_names());
    }

    #[test]
    fn serde_matches_from_map() {
        let value = json!({ "id": 9, "name": "hint", "description": null, "x": [1, 2] });

        let decoded: Attribute = serde_json::from_value(value.clone()).expect("decodes");
        assert_eq!(decoded, Attribute::from_map(&obj(value.clone())));
        assert_eq!(decoded.description, Field::Unset);
        assert_eq!(serde_json::to_value(&decoded).expect("encodes"), value);
    }

    #[test]
    fn from_value_rejects_non_objects() {
        let err = Attribute::from_value(json!([1, 2])).unwrap_err();

        assert!(matches!(err, AttributeError::NotAnObject { found: "an array" }));
    }

    #[test]
    fn template_nests_value_under_map() {
        let attr = ntp_servers();

        let nested = attr.template(json!(["10.0.0.1"])).expect("has a map");
        assert_eq!(nested, json!({ "ntp": { "servers": ["10.0.0.1"] } }));
    }

    #[test]
    fn template_requires_a_map() {
        let attr = Attribute::from_map(&obj(json!({ "name": "orphan", "map": "" })));

        let err = attr.template(json!(1)).unwrap_err();
        assert_eq!(err.to_string(), "attribute 'orphan' has an empty map");
        assert!(Attribute::new().template(json!(1)).is_err());
    }

    #[test]
    fn value_from_walks_map_then_falls_back_to_default() {
        let attr = ntp_servers();

        let data = json!({ "ntp": { "servers": ["10.0.0.1"] } });
        assert_eq!(attr.value_from(&data), Some(json!(["10.0.0.1"])));

        let missing = json!({ "ntp": {} });
        assert_eq!(attr.value_from(&missing), Some(json!(["pool.ntp.org"])));

        let explicit_null = json!({ "ntp": { "servers": null } });
        assert_eq!(attr.value_from(&explicit_null), Some(json!(["pool.ntp.org"])));

        let no_default = Attribute::from_map(&obj(json!({ "map": "dns/domain" })));
        assert_eq!(no_default.value_from(&missing), None);
    }

    #[test]
    fn extract_renests_value_under_map() {
        let attr = Attribute::from_map(&obj(json!({ "name": "b", "map": "a/b" })));

        let nested = attr.extract(&json!({ "a": { "b": 1, "c": 2 } })).expect("has a map");
        assert_eq!(nested, json!({ "a": { "b": 1 } }));

        let missing = attr.extract(&json!({})).expect("has a map");
        assert_eq!(missing, json!({ "a": { "b": null } }));

        let defaulted = ntp_servers().extract(&json!({})).expect("has a map");
        assert_eq!(defaulted, json!({ "ntp": { "servers": ["pool.ntp.org"] } }));
    }

    #[test]
    fn extract_requires_a_map() {
        let err = Attribute::new().extract(&json!({})).unwrap_err();

        assert!(matches!(err, AttributeError::EmptyMap { .. }));
    }

    #[test]
    fn map_keys_keep_interior_empty_segments() {
        let attr = Attribute::from_map(&obj(json!({ "map": "a//b/" })));

        assert_eq!(attr.map_keys(), vec!["a", "", "b"]);
        assert_eq!(
            attr.template(json!(1)).expect("has a map"),
            json!({ "a": { "": { "b": 1 } } })
        );
        assert!(Attribute::from_map(&obj(json!({ "map": "" }))).map_keys().is_empty());
    }

    #[test]
    fn set_on_merges_without_clobbering_siblings() {
        let attr = ntp_servers();
        let mut data = json!({ "ntp": { "mode": "client" }, "dns": { "domain": "lab" } });

        let changed = attr.set_on(&mut data, json!(["10.0.0.2"])).expect("object");
        assert!(changed);
        assert_eq!(
            data,
            json!({
                "ntp": { "mode": "client", "servers": ["10.0.0.2"] },
                "dns": { "domain": "lab" },
            })
        );

        let unchanged = attr.set_on(&mut data, json!(["10.0.0.2"])).expect("object");
        assert!(!unchanged);
    }

    #[test]
    fn set_on_null_over_existing_null_is_unchanged() {
        let attr = Attribute::from_map(&obj(json!({ "map": "a/b" })));
        let mut data = json!({ "a": { "b": null } });

        let changed = attr.set_on(&mut data, Value::Null).expect("object");

        assert!(!changed);
        assert_eq!(data, json!({ "a": { "b": null } }));
    }

    #[test]
    fn set_on_writes_default_value_when_data_lacks_it() {
        let attr = ntp_servers();
        let mut data = json!({});

        let changed = attr.set_on(&mut data, json!(["pool.ntp.org"])).expect("object");

        assert!(changed);
        assert_eq!(data, json!({ "ntp": { "servers": ["pool.ntp.org"] } }));
    }

    #[test]
    fn set_on_rejects_non_object_data() {
        let attr = ntp_servers();
        let mut data = json!("flat");

        let err = attr.set_on(&mut data, json!(1)).unwrap_err();
        assert!(matches!(err, AttributeError::NotAnObject { found: "a string" }));
    }

    #[test]
    fn attribute_resource_type_tag() {
        assert_eq!(<Attribute as Resource>::RESOURCE_TYPE, "Attribute");
        assert_eq!(std::mem::size_of::<<Attribute as Resource>::Enums>(), 0);
    }
}
