use crate::framework::{ResourceEntity, ResourceError};
use serde_json::{Map, Value};

/// A review request, the top of the resource chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewRequest {
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Set by the server once published.
    pub public: bool,
}

impl ReviewRequest {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::default()
        }
    }
}

impl ResourceEntity for ReviewRequest {
    type Id = u64;
    const NAMESPACE: &'static str = "review_request";

    fn parse_fields(&mut self, payload: &Map<String, Value>) -> Result<(), ResourceError> {
        self.summary = payload.get("summary").and_then(Value::as_str).map(str::to_string);
        self.description = payload
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);
        self.public = payload.get("public").and_then(Value::as_bool).unwrap_or(false);
        Ok(())
    }

    fn to_json(&self) -> Map<String, Value> {
        let mut data = Map::new();
        if let Some(summary) = &self.summary {
            data.insert("summary".into(), Value::from(summary.as_str()));
        }
        if let Some(description) = &self.description {
            data.insert("description".into(), Value::from(description.as_str()));
        }
        data
    }
}
