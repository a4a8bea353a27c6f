//! Tools domain module.
//!
//! Every Housecall Pro operation is exposed to MCP clients as a tool.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool definitions, one file per business domain
//! - `handlers.rs` - `ToolEntry`, the handler trait and payload helpers
//! - `registry.rs` - Immutable name → tool mapping built at startup
//! - `dispatcher.rs` - Runs a tool by name and renders the result envelope
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a parameter struct deriving `Deserialize`, `Serialize` and `JsonSchema`
//!    to the relevant file in `definitions/`
//! 2. Append an `api_tool(...)` entry to that file's `register` function
//!
//! New domains also need an entry in `definitions::DOMAINS`.

pub mod definitions;
mod dispatcher;
mod error;
mod handlers;
mod registry;

pub use dispatcher::Dispatcher;
pub use error::ToolError;
pub use handlers::*;
pub use registry::ToolRegistry;
