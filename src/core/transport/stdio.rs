//! STDIO transport implementation.
//!
//! Serves the Housecall Pro tool catalogue over rmcp's stdin/stdout channel.
//! Logging must stay on stderr while this transport runs.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

pub struct StdioTransport;

impl StdioTransport {
    /// Serve until the client closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!(
            "{} ready on stdin/stdout with {} tools",
            server.name(),
            server.tool_count()
        );

        let session = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let reason = session
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;

        info!("STDIO session closed: {:?}", reason);
        Ok(())
    }
}
