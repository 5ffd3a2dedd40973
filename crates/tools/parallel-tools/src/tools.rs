//! Tool wrappers for the Parallel tools.
//!
//! Each tool delegates to the matching function on [`ParallelTools`] and runs
//! it under the call's cancellation token.

use std::sync::Arc;

use toolbox_core::{BoxFuture, Tool, ToolAnnotations, ToolContext, ToolError, ToolRegistry};

use crate::ParallelTools;
use crate::types::{
    ExtractInput, ExtractOutput, PingInput, PingOutput, SearchInput, SearchOutput,
};

const REMOTE_READ: ToolAnnotations = ToolAnnotations {
    read_only: true,
    idempotent: true,
    open_world: true,
};

// ============================================================================
// parallel_search
// ============================================================================

/// Tool for batch web search.
#[derive(Clone)]
pub struct SearchTool {
    tools: Arc<ParallelTools>,
}

impl SearchTool {
    pub fn new(tools: Arc<ParallelTools>) -> Self {
        Self { tools }
    }
}

impl Tool for SearchTool {
    type Input = SearchInput;
    type Output = SearchOutput;
    const NAME: &'static str = "parallel_search";
    const DESCRIPTION: &'static str = "Search the web using Parallel's Search API. \
        Takes one or more keyword queries run as a single batch and returns one result \
        group per query, each with title, url, publish date and excerpts.";
    const ANNOTATIONS: ToolAnnotations = REMOTE_READ;

    fn call(
        &self,
        input: Self::Input,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let tools = Arc::clone(&self.tools);
        let ctx = ctx.clone();
        Box::pin(async move {
            ctx.run_cancellable(crate::search::parallel_search(&tools, input))
                .await
        })
    }
}

// ============================================================================
// parallel_extract
// ============================================================================

/// Tool for extracting page content from URLs.
#[derive(Clone)]
pub struct ExtractTool {
    tools: Arc<ParallelTools>,
}

impl ExtractTool {
    pub fn new(tools: Arc<ParallelTools>) -> Self {
        Self { tools }
    }
}

impl Tool for ExtractTool {
    type Input = ExtractInput;
    type Output = ExtractOutput;
    const NAME: &'static str = "parallel_extract";
    const DESCRIPTION: &'static str = "Extract content from public web pages using \
        Parallel's Extract API. Returns one entry per URL in input order with title, \
        publish date, excerpts and/or full markdown content. URLs that cannot be \
        extracted are reported on their entry instead of failing the call.";
    const ANNOTATIONS: ToolAnnotations = REMOTE_READ;

    fn call(
        &self,
        input: Self::Input,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let tools = Arc::clone(&self.tools);
        let ctx = ctx.clone();
        Box::pin(async move {
            ctx.run_cancellable(crate::extract::parallel_extract(&tools, input))
                .await
        })
    }
}

// ============================================================================
// smoke_ping
// ============================================================================

/// Health check that never touches the remote API.
#[derive(Clone, Copy, Default)]
pub struct PingTool;

impl Tool for PingTool {
    type Input = PingInput;
    type Output = PingOutput;
    const NAME: &'static str = "smoke_ping";
    const DESCRIPTION: &'static str =
        "Echo a message back (default \"pong\"). Use to check the server is reachable.";
    const ANNOTATIONS: ToolAnnotations = ToolAnnotations {
        read_only: true,
        idempotent: true,
        open_world: false,
    };

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        Box::pin(async move {
            Ok(PingOutput {
                ok: true,
                message: input.message.unwrap_or_else(|| "pong".into()),
            })
        })
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Names of every tool [`build_registry`] registers.
pub const TOOL_NAMES: [&str; 3] = [SearchTool::NAME, ExtractTool::NAME, PingTool::NAME];

/// Build the registry of Parallel tools sharing one client.
pub fn build_registry(tools: Arc<ParallelTools>) -> ToolRegistry {
    ToolRegistry::builder()
        .register(SearchTool::new(Arc::clone(&tools)))
        .register(ExtractTool::new(tools))
        .register(PingTool)
        .finish()
}
