//! MCP server handler backed by a `ToolRegistry`.

use rmcp::model as m;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use toolbox_core::{ToolContext, ToolError, ToolRegistry};
use tracing::Instrument;

/// Output mode for tool results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Return results as formatted text only. Default.
    #[default]
    Text,
    /// Also publish `output_schema` and populate `structured_content`.
    Structured,
}

/// MCP server handler backed by a [`ToolRegistry`].
///
/// - **Text** mode (default): results are the tool's `TextFormat` rendering.
/// - **Structured** mode: `list_tools` publishes output schemas and
///   `call_tool` also returns the JSON output as `structured_content`.
///
/// Errors are always returned as `is_error: true` results carrying the error
/// text and a `{"error": {"kind", "message"}}` structured body, never as
/// protocol errors.
#[derive(Clone)]
pub struct RegistryServer {
    registry: Arc<ToolRegistry>,
    allowlist: Option<Arc<HashSet<String>>>,
    output_mode: OutputMode,
    name: String,
    version: String,
    instructions: Option<String>,
}

impl RegistryServer {
    /// Create a new server from a registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            allowlist: None,
            output_mode: OutputMode::default(),
            name: "toolbox".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
        }
    }

    /// Only expose tools in this list.
    #[must_use]
    pub fn with_allowlist(mut self, allowlist: impl IntoIterator<Item = String>) -> Self {
        self.allowlist = Some(Arc::new(allowlist.into_iter().collect()));
        self
    }

    /// Set the output mode for tool results.
    #[must_use]
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Set the server name and version.
    #[must_use]
    pub fn with_info(mut self, name: &str, version: &str) -> Self {
        self.name = name.to_string();
        self.version = version.to_string();
        self
    }

    /// Set the instructions sent to clients on initialize.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Tool names visible to clients, respecting the allowlist.
    pub fn effective_tool_names(&self) -> Vec<String> {
        self.registry
            .list_names()
            .into_iter()
            .filter(|n| self.is_allowed(n))
            .collect()
    }

    fn is_allowed(&self, name: &str) -> bool {
        self.allowlist
            .as_ref()
            .is_none_or(|set| set.contains(name))
    }

    /// MCP tool descriptors for every visible tool.
    pub fn tools(&self) -> Vec<m::Tool> {
        self.effective_tool_names()
            .into_iter()
            .filter_map(|name| {
                let erased = self.registry.get(&name)?;
                let hints = erased.annotations();

                let output_schema = match self.output_mode {
                    OutputMode::Structured => erased.output_schema().map(Arc::new),
                    OutputMode::Text => None,
                };

                Some(m::Tool {
                    name: name.clone().into(),
                    title: Some(name),
                    description: Some(erased.description().into()),
                    input_schema: Arc::new(erased.input_schema()),
                    annotations: Some(m::ToolAnnotations {
                        read_only_hint: Some(hints.read_only),
                        destructive_hint: Some(false),
                        idempotent_hint: Some(hints.idempotent),
                        open_world_hint: Some(hints.open_world),
                        ..Default::default()
                    }),
                    output_schema,
                    icons: None,
                    meta: None,
                })
            })
            .collect()
    }

    /// Run one tool call and shape the outcome as an MCP result.
    pub async fn call(&self, name: &str, args: Value, ctx: &ToolContext) -> m::CallToolResult {
        let span = tracing::info_span!("tool_call", tool = name, call_id = ctx.call_id());

        async {
            if !self.is_allowed(name) {
                let err = ToolError::invalid_input(format!(
                    "Tool '{name}' not enabled on this server"
                ));
                return error_result(&err);
            }

            match self.registry.dispatch_json(name, args, ctx).await {
                Ok(res) => {
                    let structured_content = match self.output_mode {
                        OutputMode::Structured => Some(res.data),
                        OutputMode::Text => None,
                    };
                    m::CallToolResult {
                        content: vec![m::Content::text(res.text)],
                        structured_content,
                        is_error: Some(false),
                        meta: None,
                    }
                }
                Err(e) => error_result(&e),
            }
        }
        .instrument(span)
        .await
    }
}

fn error_result(err: &ToolError) -> m::CallToolResult {
    m::CallToolResult {
        content: vec![m::Content::text(err.to_string())],
        structured_content: Some(err.to_json()),
        is_error: Some(true),
        meta: None,
    }
}

// The trait signatures return `impl Future`
#[allow(clippy::manual_async_fn)]
impl ServerHandler for RegistryServer {
    fn get_info(&self) -> m::ServerInfo {
        m::ServerInfo {
            server_info: m::Implementation {
                name: self.name.clone(),
                title: Some(self.name.clone()),
                version: self.version.clone(),
                website_url: None,
                icons: None,
            },
            capabilities: m::ServerCapabilities::builder().enable_tools().build(),
            instructions: self.instructions.clone(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<m::ListToolsResult, m::ErrorData>> + Send + '_ {
        async move {
            Ok(m::ListToolsResult {
                tools: self.tools(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        req: m::CallToolRequestParam,
        ctx: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<m::CallToolResult, m::ErrorData>> + Send + '_ {
        async move {
            let args = Value::Object(req.arguments.unwrap_or_default());
            let tool_ctx = ToolContext::with_cancellation(ctx.ct.clone());
            Ok(self.call(&req.name, args, &tool_ctx).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowlist_filters_names() {
        let registry = Arc::new(ToolRegistry::builder().finish());
        let server = RegistryServer::new(registry)
            .with_allowlist(["tool_a".to_string(), "tool_b".to_string()]);

        assert!(server.is_allowed("tool_a"));
        assert!(server.is_allowed("tool_b"));
        assert!(!server.is_allowed("tool_c"));
    }

    #[test]
    fn no_allowlist_allows_everything() {
        let server = RegistryServer::new(Arc::new(ToolRegistry::builder().finish()));
        assert!(server.is_allowed("any_tool"));
        assert_eq!(server.output_mode(), OutputMode::Text);
    }

    #[test]
    fn info_carries_name_version_and_instructions() {
        let server = RegistryServer::new(Arc::new(ToolRegistry::builder().finish()))
            .with_info("my-server", "1.0.0")
            .with_instructions("Search the web");

        let info = server.get_info();
        assert_eq!(info.server_info.name, "my-server");
        assert_eq!(info.server_info.version, "1.0.0");
        assert_eq!(info.instructions.as_deref(), Some("Search the web"));
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn error_result_is_structured() {
        let res = error_result(&ToolError::Cancelled);
        assert_eq!(res.is_error, Some(true));
        assert_eq!(
            res.structured_content.unwrap()["error"]["kind"],
            "cancelled"
        );
    }
}
