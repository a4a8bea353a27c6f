//! Payment tools: recording, refunding and voiding payments, card
//! processing and saved payment methods.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{PageParams, PaymentMethod, list_all};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body, body_without};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListPaymentsParams {
    /// Filter by invoice ID
    pub invoice_id: Option<String>,
    /// Filter by customer ID
    pub customer_id: Option<String>,
    /// Filter by payment method
    pub method: Option<PaymentMethod>,
    /// Filter payments on or after this date (ISO 8601)
    pub start_date: Option<String>,
    /// Filter payments on or before this date (ISO 8601)
    pub end_date: Option<String>,
    #[serde(flatten)]
    pub paging: PageParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PaymentIdParams {
    /// Payment ID
    pub payment_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreatePaymentParams {
    /// Invoice ID
    pub invoice_id: String,
    /// Payment amount
    pub amount: f64,
    /// Payment method
    pub method: PaymentMethod,
    /// Payment reference (check number, transaction ID, etc.)
    pub reference: Option<String>,
    /// Payment date (ISO 8601), defaults to now
    pub payment_date: Option<String>,
    /// Payment notes
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RefundPaymentParams {
    /// Payment ID
    pub payment_id: String,
    /// Refund amount (defaults to full payment amount)
    pub amount: Option<f64>,
    /// Refund reason
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VoidPaymentParams {
    /// Payment ID
    pub payment_id: String,
    /// Void reason
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CardPaymentParams {
    /// Invoice ID
    pub invoice_id: String,
    /// Payment amount
    pub amount: f64,
    /// Tokenized card information
    pub card_token: String,
    /// Save card for future use
    pub save_card: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CustomerPaymentMethodsParams {
    /// Customer ID
    pub customer_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PaymentMethodIdParams {
    /// Payment method ID
    pub method_id: String,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_payments",
            "List all payments with optional filters",
            |client, p: ListPaymentsParams| async move {
                list_all(&client, "/payments", "payments", &p).await
            },
        ),
        api_tool(
            client,
            "get_payment",
            "Get detailed information about a specific payment",
            |client, p: PaymentIdParams| async move {
                Ok(client.get(&format!("/payments/{}", p.payment_id), None).await?)
            },
        ),
        api_tool(
            client,
            "create_payment",
            "Record a new payment for an invoice",
            |client, p: CreatePaymentParams| async move {
                Ok(client.post("/payments", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "refund_payment",
            "Process a refund for a payment",
            |client, p: RefundPaymentParams| async move {
                let refund = body_without(&p, &["payment_id"])?;
                Ok(client
                    .post(&format!("/payments/{}/refund", p.payment_id), Some(&refund))
                    .await?)
            },
        ),
        api_tool(
            client,
            "void_payment",
            "Void a payment (remove it completely)",
            |client, p: VoidPaymentParams| async move {
                let reason = body_without(&p, &["payment_id"])?;
                Ok(client
                    .post(&format!("/payments/{}/void", p.payment_id), Some(&reason))
                    .await?)
            },
        ),
        api_tool(
            client,
            "process_card_payment",
            "Process a credit card payment",
            |client, p: CardPaymentParams| async move {
                Ok(client.post("/payments/card", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "list_payment_methods",
            "List saved payment methods for a customer",
            |client, p: CustomerPaymentMethodsParams| async move {
                Ok(client
                    .get(&format!("/customers/{}/payment_methods", p.customer_id), None)
                    .await?)
            },
        ),
        api_tool(
            client,
            "delete_payment_method",
            "Delete a saved payment method",
            |client, p: PaymentMethodIdParams| async move {
                Ok(client.delete(&format!("/payment_methods/{}", p.method_id)).await?)
            },
        ),
    ]
}
