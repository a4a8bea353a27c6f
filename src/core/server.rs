//! MCP Server implementation and lifecycle management.
//!
//! [`McpServer`] owns the tool registry and dispatcher and answers MCP
//! protocol messages. Tool discovery and invocation are served from the
//! registry; the server exposes no resources or prompts.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::api::{HousecallClient, JsonObject};
use crate::domains::tools::{Dispatcher, ToolRegistry};

const INSTRUCTIONS: &str = "Housecall Pro MCP server. Tools cover jobs, customers, estimates, \
invoices, employees, dispatch, scheduling, payments, the price book, leads, webhooks, time \
tracking and company settings. List tools return every page aggregated as {<collection>, count}.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Routes tool calls to the registry.
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when the API client cannot be built, most notably when no API
    /// key is configured.
    pub fn new(config: Config) -> Result<Self> {
        let client = HousecallClient::new(&config.api)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a server around an already-built API client.
    pub fn with_client(config: Config, client: HousecallClient) -> Self {
        let registry = Arc::new(ToolRegistry::new(&client));
        info!("Server ready with {} tools", registry.len());

        Self {
            config: Arc::new(config),
            dispatcher: Dispatcher::new(registry),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.dispatcher.registry().len()
    }

    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// All tool descriptors as `{name, description, inputSchema}` (for HTTP transport).
    pub fn tool_descriptors(&self) -> Vec<Value> {
        self.dispatcher
            .registry()
            .tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": Value::Object(t.input_schema.as_ref().clone())
                })
            })
            .collect()
    }

    /// Invoke a tool by name (for HTTP transport). Never fails.
    pub async fn invoke_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        self.dispatcher.dispatch(name, arguments).await
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _request, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.dispatcher.registry().tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(self.invoke_tool(&request.name, request.arguments).await)
    }

    #[instrument(skip(self, _request, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: Vec::new(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        Err(McpError::resource_not_found(
            format!("Resource not found: {}", request.uri),
            None,
        ))
    }
}
