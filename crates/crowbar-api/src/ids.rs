//!
//! Identifiers used to address records on the admin node. The API accepts a
//! numeric database id or a unique string key (usually the record name)
//! anywhere a single record is addressed.
//!

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

///
/// ResourceId
///

#[derive(Clone, Debug, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(u64),
    Key(String),
}

impl ResourceId {
    #[must_use]
    pub const fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Key(_) => None,
        }
    }

    /// Path segment for this id, with `/` escaped so a key can never
    /// address a different collection.
    #[must_use]
    pub fn to_path_segment(&self) -> String {
        self.to_string().replace('/', "%2F")
    }
}

impl From<&str> for ResourceId {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

///
/// TESTS
///
