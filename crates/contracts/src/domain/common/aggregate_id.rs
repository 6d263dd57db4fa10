use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Identifier of a backend-owned record
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Value as it appears in form fields and URLs
    fn as_string(&self) -> String;

    /// Parse from a form field or URL segment
    fn from_string(s: &str) -> Result<Self, String>;
}

impl AggregateId for i64 {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map_err(|e| format!("Invalid id '{}': {}", s, e))
    }
}
