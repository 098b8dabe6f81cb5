use crate::framework::{ResourceEntity, ResourceError};
use serde_json::{Map, Value};

/// A review on a review request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Review {
    pub body_top: Option<String>,
    pub ship_it: bool,
    pub public: bool,
}

impl ResourceEntity for Review {
    type Id = u64;
    const NAMESPACE: &'static str = "review";

    fn parse_fields(&mut self, payload: &Map<String, Value>) -> Result<(), ResourceError> {
        self.body_top = payload.get("body_top").and_then(Value::as_str).map(str::to_string);
        self.ship_it = payload.get("ship_it").and_then(Value::as_bool).unwrap_or(false);
        self.public = payload.get("public").and_then(Value::as_bool).unwrap_or(false);
        Ok(())
    }

    fn to_json(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("ship_it".into(), Value::Bool(self.ship_it));
        data.insert("public".into(), Value::Bool(self.public));
        data.insert(
            "body_top".into(),
            self.body_top.as_deref().map_or(Value::Null, Value::from),
        );
        data
    }
}
