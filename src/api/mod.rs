//! Housecall Pro REST API access.
//!
//! - `client.rs` - the authenticated request primitive and verb helpers
//! - `pagination.rs` - page aggregation over collection endpoints
//! - `error.rs` - error classification shared by every call

mod client;
mod error;
mod pagination;

pub use client::{HousecallClient, JsonObject, with_query};
pub use error::{ApiResult, ClassifiedError, ClientError, ErrorKind};
pub use pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, Page, PageRequest};
