//! The tool trait.

use crate::context::ToolContext;
use crate::error::ToolError;
use futures::future::BoxFuture;

/// Behaviour hints published with the tool listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolAnnotations {
    /// The tool does not modify its environment.
    pub read_only: bool,
    /// Repeating a call with the same input has no additional effect.
    pub idempotent: bool,
    /// The tool talks to systems outside the server.
    pub open_world: bool,
}

/// A tool callable by the host.
///
/// Each tool is a typed handler with a fixed signature: it takes its input by
/// value plus the call context and resolves to its output or a [`ToolError`].
/// Serde and schema bounds live on [`crate::ToolRegistryBuilder::register`],
/// not here, so tools can be called natively in tests.
///
/// # Example
///
/// ```ignore
/// use toolbox_core::{BoxFuture, Tool, ToolContext, ToolError};
///
/// #[derive(Clone)]
/// struct Echo;
///
/// impl Tool for Echo {
///     type Input = String;
///     type Output = String;
///     const NAME: &'static str = "echo";
///     const DESCRIPTION: &'static str = "Echo the input";
///
///     fn call(&self, input: String, _ctx: &ToolContext)
///         -> BoxFuture<'static, Result<String, ToolError>>
///     {
///         Box::pin(async move { Ok(input) })
///     }
/// }
/// ```
pub trait Tool: Send + Sync + 'static {
    /// Input type for the tool.
    type Input: Send + 'static;

    /// Output type for the tool.
    type Output: Send + 'static;

    /// Unique name identifying the tool.
    const NAME: &'static str;

    /// Human-readable description of what the tool does.
    const DESCRIPTION: &'static str;

    /// Behaviour hints for clients.
    const ANNOTATIONS: ToolAnnotations = ToolAnnotations {
        read_only: false,
        idempotent: false,
        open_world: false,
    };

    /// Execute the tool with the given input and context.
    fn call(
        &self,
        input: Self::Input,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>>;
}
