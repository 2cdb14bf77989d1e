use crowbar_api::Attribute;
use serde_json::{Map, Value, json};

///
/// Fake
///
/// Deterministic attribute records derived from a numeric seed, shaped like
/// what the admin node returns.
///

pub struct Fake;

impl Fake {
    /// JSON object for attribute `seed`.
    #[must_use]
    pub fn attribute_json(seed: u32) -> Value {
        json!({
            "id": seed,
            "name": format!("attrib_{seed}"),
            "description": format!("test attribute {seed}"),
            "map": format!("test/attrib_{seed}"),
            "role_id": seed % 7 + 1,
            "barclamp_id": 1,
            "order": i64::from(seed) * 100,
            "created_at": "2014-06-01T10:00:00.000Z",
            "updated_at": "2014-06-01T10:00:00.000Z",
        })
    }

    #[must_use]
    pub fn attribute_map(seed: u32) -> Map<String, Value> {
        match Self::attribute_json(seed) {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[must_use]
    pub fn attribute(seed: u32) -> Attribute {
        Attribute::from_owned_map(Self::attribute_map(seed))
    }
}

///
/// TESTS
///
