//! Shared parameter types and request helpers for domain tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolResult, collection, to_object};

/// Pagination controls accepted by every list tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PageParams {
    /// Page number (default: 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,

    /// Items per page (default: 50)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
}

/// Parameters for tools that take no arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Optional ISO 8601 date range used by report and schedule queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DateRange {
    /// Start date (ISO 8601)
    #[serde(default)]
    pub start_date: Option<String>,

    /// End date (ISO 8601)
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Payment method accepted by invoice and payment tools.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Check,
    Card,
    Ach,
    Other,
}

/// Delivery channel for messages sent to a customer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageChannel {
    Sms,
    Email,
}

/// A line item on an estimate or invoice.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LineItemInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
}

/// Fetch every page of `path` filtered by `params` and wrap the items as `{key: [...], count}`.
pub async fn list_all<P: Serialize>(
    client: &HousecallClient,
    path: &str,
    key: &str,
    params: &P,
) -> ToolResult {
    let query = to_object(params)?;
    let items: Vec<Value> = client.get_paginated(path, &query).await?;
    Ok(collection(key, items))
}

/// GET `path` with the non-null parameters as the query string.
pub async fn get_with_query<P: Serialize>(
    client: &HousecallClient,
    path: &str,
    params: &P,
) -> ToolResult {
    let query = to_object(params)?;
    Ok(client.get(path, Some(&query)).await?)
}
