use crate::errors::QueryError;
use serde::Serialize;
use wire_value::Map;

/// Options attached to a call and handed to the callback untouched
pub type QueryOptions = serde_json::Map<String, serde_json::Value>;

/// A finished tree together with the options of the call that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryItem {
    pub structure: Map,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<QueryOptions>,
}

impl QueryItem {
    pub fn new(structure: Map) -> Self {
        Self {
            structure,
            options: None,
        }
    }

    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Wire JSON of the structure alone
    pub fn to_json(&self) -> serde_json::Value {
        wire_value::serialize::map_to_json(&self.structure)
    }

    /// Wire JSON text of the whole item
    pub fn to_json_string(&self) -> Result<String, QueryError> {
        Ok(serde_json::to_string(self)?)
    }
}
