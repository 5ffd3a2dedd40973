//! JSON schema generation for MCP tool listings.

use schemars::generate::SchemaSettings;
use schemars::transform::AddNullable;
use schemars::{JsonSchema, Schema};
use serde_json::{Map, Value};

fn settings() -> SchemaSettings {
    SchemaSettings::draft2020_12().with_transform(AddNullable::default())
}

/// Root schema for `T` as a JSON object, as MCP `inputSchema` expects.
pub fn object_schema_for<T: JsonSchema>() -> Map<String, Value> {
    let root: Schema = settings().into_generator().into_root_schema_for::<T>();
    match serde_json::to_value(&root) {
        Ok(Value::Object(map)) => map,
        _ => {
            let mut map = Map::new();
            map.insert("type".into(), Value::String("object".into()));
            map
        }
    }
}

/// Output schema for `T`, or `None` when the root is not an object.
///
/// MCP requires `outputSchema` to describe an object.
pub fn output_schema_for<T: JsonSchema>() -> Option<Map<String, Value>> {
    let map = object_schema_for::<T>();
    let is_object = match map.get("type") {
        Some(Value::String(t)) => t == "object",
        None => map.contains_key("properties"),
        Some(_) => false,
    };
    is_object.then_some(map)
}
