//! Tool handler plumbing.
//!
//! A tool is a [`ToolEntry`]: the rmcp [`Tool`] metadata advertised to
//! clients plus a [`ToolHandler`] that executes it. Domain modules build
//! their entries with [`api_tool`], which pairs a typed parameter struct
//! (whose JSON schema becomes the advertised input schema) with an async
//! closure over the shared [`HousecallClient`].

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::error::ToolError;
use crate::api::{HousecallClient, JsonObject};

/// Result of a single tool execution.
pub type ToolResult = Result<Value, ToolError>;

/// A partial name → operation set contributed by one domain.
pub type ToolSet = Vec<ToolEntry>;

/// Executes one tool against an argument bag.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: JsonObject) -> ToolResult;
}

/// A registered operation: metadata plus handler.
#[derive(Clone)]
pub struct ToolEntry {
    tool: Tool,
    handler: Arc<dyn ToolHandler>,
}

impl ToolEntry {
    pub fn new(tool: Tool, handler: Arc<dyn ToolHandler>) -> Self {
        Self { tool, handler }
    }

    pub fn name(&self) -> &str {
        &self.tool.name
    }

    pub fn description(&self) -> &str {
        self.tool.description.as_deref().unwrap_or_default()
    }

    /// Metadata advertised during capability discovery.
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub async fn call(&self, arguments: JsonObject) -> ToolResult {
        self.handler.call(arguments).await
    }
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("name", &self.tool.name)
            .finish_non_exhaustive()
    }
}

/// Handler that decodes the argument bag into `P` and runs an async closure.
struct ApiHandler<P, F> {
    client: HousecallClient,
    run: F,
    _params: PhantomData<fn() -> P>,
}

#[async_trait::async_trait]
impl<P, F, Fut> ToolHandler for ApiHandler<P, F>
where
    P: DeserializeOwned + Send + 'static,
    F: Fn(HousecallClient, P) -> Fut + Send + Sync,
    Fut: Future<Output = ToolResult> + Send,
{
    async fn call(&self, arguments: JsonObject) -> ToolResult {
        let params: P = serde_json::from_value(Value::Object(arguments))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        (self.run)(self.client.clone(), params).await
    }
}

/// Define a tool backed by the Housecall Pro client.
///
/// The input schema is generated from `P`; it is advertised only, the
/// dispatcher never checks arguments against it.
pub fn api_tool<P, F, Fut>(
    client: &HousecallClient,
    name: &'static str,
    description: &'static str,
    run: F,
) -> ToolEntry
where
    P: DeserializeOwned + JsonSchema + Send + 'static,
    F: Fn(HousecallClient, P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ToolResult> + Send + 'static,
{
    let tool = Tool::new(name, description, cached_schema_for_type::<P>());
    let handler = ApiHandler {
        client: client.clone(),
        run,
        _params: PhantomData,
    };
    ToolEntry::new(tool, Arc::new(handler))
}

// ============================================================================
// Payload helpers
// ============================================================================

/// Serialize parameters into a JSON object, dropping `null` fields.
pub fn to_object<T: Serialize>(params: &T) -> Result<JsonObject, ToolError> {
    match serde_json::to_value(params)? {
        Value::Object(mut map) => {
            map.retain(|_, v| !v.is_null());
            Ok(map)
        }
        other => Err(ToolError::execution_failed(format!(
            "expected parameters to serialize to an object, got {other}"
        ))),
    }
}

/// Request body built from parameters, minus the path identifiers in `exclude`.
pub fn body_without<T: Serialize>(params: &T, exclude: &[&str]) -> Result<Value, ToolError> {
    let mut map = to_object(params)?;
    for key in exclude {
        map.remove(*key);
    }
    Ok(Value::Object(map))
}

/// Request body built from all parameters.
pub fn body<T: Serialize>(params: &T) -> Result<Value, ToolError> {
    body_without(params, &[])
}

/// Wrap an aggregated collection as `{<key>: [...], count: n}`.
pub fn collection(key: &str, items: Vec<Value>) -> Value {
    let count = items.len();
    json!({ key: items, "count": count })
}
