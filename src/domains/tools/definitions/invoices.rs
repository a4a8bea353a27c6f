//! Invoice tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{LineItemInput, PageParams, PaymentMethod, list_all};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body, body_without};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceState {
    Draft,
    Sent,
    Viewed,
    Partial,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListInvoicesParams {
    /// Filter by customer ID
    pub customer_id: Option<String>,
    /// Filter by job ID
    pub job_id: Option<String>,
    /// Filter by status
    pub status: Option<InvoiceState>,
    /// Filter invoices created on or after this date (ISO 8601)
    pub start_date: Option<String>,
    /// Filter invoices created on or before this date (ISO 8601)
    pub end_date: Option<String>,
    #[serde(flatten)]
    pub paging: PageParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InvoiceIdParams {
    /// Invoice ID
    pub invoice_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateInvoiceParams {
    /// Job ID
    pub job_id: String,
    /// Array of line items
    pub line_items: Option<Vec<LineItemInput>>,
    /// Due date (ISO 8601)
    pub due_date: Option<String>,
    /// Send the invoice immediately after creation
    pub send_immediately: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SendInvoiceParams {
    /// Invoice ID
    pub invoice_id: String,
    /// Override customer email
    pub email: Option<String>,
    /// Custom message to include
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecordPaymentParams {
    /// Invoice ID
    pub invoice_id: String,
    /// Payment amount
    pub amount: f64,
    /// Payment method
    pub method: PaymentMethod,
    /// Payment reference (check number, transaction ID, etc.)
    pub reference: Option<String>,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_invoices",
            "List invoices with optional filters",
            |client, p: ListInvoicesParams| async move {
                list_all(&client, "/invoices", "invoices", &p).await
            },
        ),
        api_tool(
            client,
            "get_invoice",
            "Get detailed information about a specific invoice",
            |client, p: InvoiceIdParams| async move {
                Ok(client.get(&format!("/invoices/{}", p.invoice_id), None).await?)
            },
        ),
        api_tool(
            client,
            "create_invoice",
            "Create a new invoice",
            |client, p: CreateInvoiceParams| async move {
                Ok(client.post("/invoices", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "send_invoice",
            "Send an invoice to the customer",
            |client, p: SendInvoiceParams| async move {
                let options = body_without(&p, &["invoice_id"])?;
                Ok(client
                    .post(&format!("/invoices/{}/send", p.invoice_id), Some(&options))
                    .await?)
            },
        ),
        api_tool(
            client,
            "mark_invoice_paid",
            "Record a payment for an invoice",
            |client, p: RecordPaymentParams| async move {
                let payment = body_without(&p, &["invoice_id"])?;
                Ok(client
                    .post(&format!("/invoices/{}/payments", p.invoice_id), Some(&payment))
                    .await?)
            },
        ),
        api_tool(
            client,
            "list_invoice_payments",
            "List all payments for an invoice",
            |client, p: InvoiceIdParams| async move {
                Ok(client
                    .get(&format!("/invoices/{}/payments", p.invoice_id), None)
                    .await?)
            },
        ),
    ]
}
