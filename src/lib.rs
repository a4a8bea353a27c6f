//! Housecall Pro MCP Server Library
//!
//! Exposes the Housecall Pro REST API to Model Context Protocol clients as a
//! flat catalogue of tools.
//!
//! # Architecture
//!
//! - **api**: Authenticated HTTP client, error classification and pagination
//! - **core**: Configuration, startup errors, the MCP server and its transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: One tool per Housecall Pro operation, grouped by business domain
//!
//! # Example
//!
//! ```rust,no_run
//! use housecall_pro_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
