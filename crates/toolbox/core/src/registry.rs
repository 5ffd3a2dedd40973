//! Tool registry: a name-keyed lookup table of type-erased tools.

use crate::context::ToolContext;
use crate::error::ToolError;
use crate::fmt::TextFormat;
use crate::schema::{object_schema_for, output_schema_for};
use crate::tool::{Tool, ToolAnnotations};
use futures::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::marker::PhantomData;
use std::sync::Arc;

/// Result of a JSON dispatch: the serialized output plus its text rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedResult {
    /// The JSON-serialized output data.
    pub data: Value,
    /// Human-readable rendering from the output's [`TextFormat`] impl.
    pub text: String,
}

/// Type-erased tool for dynamic dispatch.
pub trait ErasedTool: Send + Sync {
    /// Get the tool's name.
    fn name(&self) -> &'static str;

    /// Get the tool's description.
    fn description(&self) -> &'static str;

    /// Behaviour hints for clients.
    fn annotations(&self) -> ToolAnnotations;

    /// Get the input JSON schema.
    fn input_schema(&self) -> Map<String, Value>;

    /// Get the output JSON schema, when the output is an object.
    fn output_schema(&self) -> Option<Map<String, Value>>;

    /// Call the tool with JSON arguments.
    fn call_json(
        &self,
        args: Value,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<FormattedResult, ToolError>>;
}

/// Registry of tools, keyed by tool name.
///
/// Built once at startup and shared read-only (`Arc<ToolRegistry>`) by every
/// call.
pub struct ToolRegistry {
    map: BTreeMap<String, Arc<dyn ErasedTool>>,
}

impl ToolRegistry {
    /// Create a new registry builder.
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// List all tool names in the registry, sorted.
    pub fn list_names(&self) -> Vec<String> {
        self.map.keys().cloned().collect()
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ErasedTool>> {
        self.map.get(name)
    }

    /// Create a subset registry containing only the specified tools.
    ///
    /// Tools not found in the registry are silently ignored.
    pub fn subset<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Self {
        let allowed: HashSet<&str> = names.into_iter().collect();
        let map = self
            .map
            .iter()
            .filter(|(k, _)| allowed.contains(k.as_str()))
            .map(|(k, v)| (k.clone(), Arc::clone(v)))
            .collect();
        Self { map }
    }

    /// Dispatch a tool call using JSON arguments.
    pub async fn dispatch_json(
        &self,
        name: &str,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<FormattedResult, ToolError> {
        let entry = self
            .map
            .get(name)
            .ok_or_else(|| ToolError::invalid_input(format!("Unknown tool: {name}")))?;

        let started = std::time::Instant::now();
        let result = entry.call_json(args, ctx).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &result {
            Ok(_) => tracing::info!(
                tool = name,
                call_id = ctx.call_id(),
                duration_ms,
                "tool call succeeded"
            ),
            Err(e) => tracing::warn!(
                tool = name,
                call_id = ctx.call_id(),
                duration_ms,
                kind = e.kind().as_str(),
                error = %e,
                "tool call failed"
            ),
        }
        result
    }

    /// Check if a tool is registered by name.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Builder for constructing a [`ToolRegistry`].
#[derive(Default)]
pub struct ToolRegistryBuilder {
    items: Vec<Arc<dyn ErasedTool>>,
}

struct Erased<T: Tool> {
    tool: Arc<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ErasedTool for Erased<T>
where
    T: Tool,
    T::Input: DeserializeOwned + schemars::JsonSchema,
    T::Output: Serialize + schemars::JsonSchema + TextFormat,
{
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn description(&self) -> &'static str {
        T::DESCRIPTION
    }

    fn annotations(&self) -> ToolAnnotations {
        T::ANNOTATIONS
    }

    fn input_schema(&self) -> Map<String, Value> {
        object_schema_for::<T::Input>()
    }

    fn output_schema(&self) -> Option<Map<String, Value>> {
        output_schema_for::<T::Output>()
    }

    fn call_json(
        &self,
        args: Value,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<FormattedResult, ToolError>> {
        let input: T::Input = match serde_json::from_value(args) {
            Ok(input) => input,
            Err(e) => {
                let err = ToolError::invalid_input(format!("{}: {e}", T::NAME));
                return Box::pin(async move { Err(err) });
            }
        };

        let fut = self.tool.call(input, ctx);
        Box::pin(async move {
            let out = fut.await?;
            let text = out.fmt_text();
            let data = serde_json::to_value(&out).map_err(ToolError::internal)?;
            Ok(FormattedResult { data, text })
        })
    }
}

impl ToolRegistryBuilder {
    /// Register a tool.
    ///
    /// The input must be deserializable with a JSON schema; the output must be
    /// serializable with a JSON schema and implement [`TextFormat`].
    #[must_use]
    pub fn register<T>(mut self, tool: T) -> Self
    where
        T: Tool,
        T::Input: DeserializeOwned + schemars::JsonSchema,
        T::Output: Serialize + schemars::JsonSchema + TextFormat,
    {
        self.items.push(Arc::new(Erased {
            tool: Arc::new(tool),
            _marker: PhantomData,
        }));
        self
    }

    /// Build the registry. Later registrations win on duplicate names.
    pub fn finish(self) -> ToolRegistry {
        let map = self
            .items
            .into_iter()
            .map(|erased| (erased.name().to_string(), erased))
            .collect();
        ToolRegistry { map }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone)]
    struct GreetTool;

    #[derive(Deserialize, schemars::JsonSchema)]
    struct GreetInput {
        name: String,
    }

    #[derive(Serialize, schemars::JsonSchema)]
    struct GreetOutput {
        greeting: String,
    }

    impl TextFormat for GreetOutput {
        fn fmt_text(&self) -> String {
            self.greeting.clone()
        }
    }

    impl Tool for GreetTool {
        type Input = GreetInput;
        type Output = GreetOutput;
        const NAME: &'static str = "greet";
        const DESCRIPTION: &'static str = "Greet someone";

        fn call(
            &self,
            input: Self::Input,
            _ctx: &ToolContext,
        ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
            Box::pin(async move {
                if input.name.is_empty() {
                    return Err(ToolError::invalid_input("name must not be empty"));
                }
                Ok(GreetOutput {
                    greeting: format!("Hello, {}!", input.name),
                })
            })
        }
    }

    fn registry() -> ToolRegistry {
        ToolRegistry::builder().register(GreetTool).finish()
    }

    #[test]
    fn builder_registers_by_name() {
        let reg = registry();
        assert!(reg.contains("greet"));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.list_names(), vec!["greet"]);
        assert_eq!(reg.get("greet").unwrap().description(), "Greet someone");
    }

    #[test]
    fn subset_filters_names() {
        let reg = registry();
        assert_eq!(reg.subset(["greet"]).len(), 1);
        assert!(reg.subset(["nonexistent"]).is_empty());
    }

    #[test]
    fn schemas_are_objects() {
        let reg = registry();
        let tool = reg.get("greet").unwrap();
        assert_eq!(tool.input_schema()["type"], "object");
        assert!(tool.output_schema().is_some());
    }

    #[tokio::test]
    async fn dispatch_returns_data_and_text() {
        let reg = registry();
        let out = reg
            .dispatch_json("greet", serde_json::json!({"name": "World"}), &ToolContext::new())
            .await
            .unwrap();
        assert_eq!(out.data, serde_json::json!({"greeting": "Hello, World!"}));
        assert_eq!(out.text, "Hello, World!");
    }

    #[tokio::test]
    async fn dispatch_maps_bad_arguments_to_invalid_input() {
        let reg = registry();
        let err = reg
            .dispatch_json("greet", serde_json::json!({"nom": 1}), &ToolContext::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn dispatch_unknown_tool_is_invalid_input() {
        let err = registry()
            .dispatch_json("nope", serde_json::json!({}), &ToolContext::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unknown tool: nope"));
    }

    #[tokio::test]
    async fn dispatch_propagates_tool_errors() {
        let err = registry()
            .dispatch_json("greet", serde_json::json!({"name": ""}), &ToolContext::new())
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::invalid_input("name must not be empty"));
    }
}
