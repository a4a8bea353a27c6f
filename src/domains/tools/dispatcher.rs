//! Tool dispatch by name.
//!
//! [`Dispatcher::dispatch`] never fails: every outcome, including unknown
//! tools and panics inside a handler, is rendered as a [`CallToolResult`]
//! envelope holding one pretty-printed JSON text item.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::{CallToolResult, Content};
use serde_json::{Value, json};
use tracing::{error, info, instrument, warn};

use super::error::ToolError;
use super::registry::ToolRegistry;
use crate::api::{ClassifiedError, ErrorKind, JsonObject};

/// Terminal state of one invocation.
#[derive(Debug)]
enum Outcome {
    Success(Value),
    NotFound(String),
    Failed(ClassifiedError),
}

/// Routes invocations to registered tools.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run the named tool and wrap its outcome in a result envelope.
    #[instrument(skip(self, arguments))]
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        render(self.execute(name, arguments.unwrap_or_default()).await)
    }

    async fn execute(&self, name: &str, arguments: JsonObject) -> Outcome {
        let Some(entry) = self.registry.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Outcome::NotFound(format!("Unknown tool: {name}"));
        };

        info!("Executing tool: {}", name);
        let result = AssertUnwindSafe(entry.call(arguments)).catch_unwind().await;

        match result {
            Ok(Ok(value)) => Outcome::Success(value),
            Ok(Err(err)) => {
                error!("Tool '{}' failed: {}", name, err);
                Outcome::Failed(classify(err))
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Tool '{}' panicked: {}", name, message);
                Outcome::Failed(ClassifiedError::execution(message, "handler panicked"))
            }
        }
    }
}

/// Down-rank anything without a classification to an execution error.
fn classify(err: ToolError) -> ClassifiedError {
    match err {
        ToolError::Api(classified) => classified,
        other => ClassifiedError::execution(other.to_string(), format!("{other:?}")),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Tool handler panicked".to_string()
    }
}

fn render(outcome: Outcome) -> CallToolResult {
    match outcome {
        Outcome::Success(value) => CallToolResult::success(vec![Content::text(pretty(&value))]),
        Outcome::NotFound(message) => error_envelope(json!({
            "error": "NotFound",
            "message": message,
        })),
        Outcome::Failed(err) => {
            let payload = match err.kind() {
                ErrorKind::Api | ErrorKind::Network => json!({
                    "error": err.kind(),
                    "message": err.message(),
                    "status": err.status(),
                }),
                ErrorKind::Execution => json!({
                    "error": err.kind(),
                    "message": err.message(),
                    "details": err.details(),
                }),
            };
            error_envelope(payload)
        }
    }
}

fn error_envelope(payload: Value) -> CallToolResult {
    CallToolResult::error(vec![Content::text(pretty(&payload))])
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
