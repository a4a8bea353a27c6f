//! Price book tools.
//!
//! The price book holds the catalogue of billable items and their
//! categories used when building estimates and invoices.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::common::{NoParams, PageParams, list_all};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body, body_without};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListItemsParams {
    /// Filter by category
    pub category: Option<String>,
    /// Search by name or description
    pub search: Option<String>,
    /// Filter by active status
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub paging: PageParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ItemIdParams {
    /// Price book item ID
    pub item_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateItemParams {
    /// Item name
    pub name: String,
    /// Item description
    pub description: Option<String>,
    /// Unit price
    pub unit_price: f64,
    /// Unit of measurement (e.g., "each", "hour")
    pub unit: Option<String>,
    /// Category name
    pub category: Option<String>,
    /// SKU / item code
    pub sku: Option<String>,
    /// Cost per unit (for profit tracking)
    pub cost: Option<f64>,
    /// Whether item is taxable
    pub taxable: Option<bool>,
    /// Whether item is active
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateItemParams {
    /// Price book item ID
    pub item_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<f64>,
    /// Cost per unit
    pub cost: Option<f64>,
    pub taxable: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateCategoryParams {
    /// Category name
    pub name: String,
    /// Category description
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PriceUpdate {
    pub item_id: String,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BulkUpdateParams {
    /// Array of item updates
    pub updates: Vec<PriceUpdate>,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_pricebook_items",
            "List all items in the price book",
            |client, p: ListItemsParams| async move {
                list_all(&client, "/pricebook/items", "items", &p).await
            },
        ),
        api_tool(
            client,
            "get_pricebook_item",
            "Get detailed information about a price book item",
            |client, p: ItemIdParams| async move {
                Ok(client.get(&format!("/pricebook/items/{}", p.item_id), None).await?)
            },
        ),
        api_tool(
            client,
            "create_pricebook_item",
            "Create a new price book item",
            |client, p: CreateItemParams| async move {
                Ok(client.post("/pricebook/items", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "update_pricebook_item",
            "Update an existing price book item",
            |client, p: UpdateItemParams| async move {
                let update = body_without(&p, &["item_id"])?;
                Ok(client
                    .patch(&format!("/pricebook/items/{}", p.item_id), Some(&update))
                    .await?)
            },
        ),
        api_tool(
            client,
            "delete_pricebook_item",
            "Delete a price book item",
            |client, p: ItemIdParams| async move {
                Ok(client.delete(&format!("/pricebook/items/{}", p.item_id)).await?)
            },
        ),
        api_tool(
            client,
            "list_pricebook_categories",
            "List all price book categories",
            |client, _p: NoParams| async move { Ok(client.get("/pricebook/categories", None).await?) },
        ),
        api_tool(
            client,
            "create_pricebook_category",
            "Create a new price book category",
            |client, p: CreateCategoryParams| async move {
                Ok(client.post("/pricebook/categories", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "bulk_update_prices",
            "Bulk update prices for multiple items",
            |client, p: BulkUpdateParams| async move {
                let updates = json!({ "updates": p.updates });
                Ok(client.post("/pricebook/bulk_update", Some(&updates)).await?)
            },
        ),
    ]
}
