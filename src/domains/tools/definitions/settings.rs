//! Company settings tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::NoParams;
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompanyInfoParams {
    /// Company name
    pub name: Option<String>,
    /// Company phone number
    pub phone: Option<String>,
    /// Company email
    pub email: Option<String>,
    /// Company website
    pub website: Option<String>,
    /// Company address
    pub address: Option<Value>,
}

/// Opening hours per weekday, each `{ open: "08:00", close: "17:00" }`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BusinessHoursParams {
    /// Monday hours { open: "08:00", close: "17:00" }
    pub monday: Option<Value>,
    /// Tuesday hours
    pub tuesday: Option<Value>,
    /// Wednesday hours
    pub wednesday: Option<Value>,
    /// Thursday hours
    pub thursday: Option<Value>,
    /// Friday hours
    pub friday: Option<Value>,
    /// Saturday hours
    pub saturday: Option<Value>,
    /// Sunday hours
    pub sunday: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NotificationSettingsParams {
    /// Enable customer notifications
    pub customer_notifications: Option<bool>,
    /// Enable employee notifications
    pub employee_notifications: Option<bool>,
    /// Hours before job to send reminder
    pub reminder_hours: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TaxSettingsParams {
    /// Default tax rate (percentage)
    pub default_tax_rate: Option<f64>,
    /// Tax label (e.g., "Sales Tax", "VAT")
    pub tax_label: Option<String>,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "get_company_info",
            "Get company information and settings",
            |client, _p: NoParams| async move { Ok(client.get("/company", None).await?) },
        ),
        api_tool(
            client,
            "update_company_info",
            "Update company information",
            |client, p: CompanyInfoParams| async move {
                Ok(client.patch("/company", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "get_business_hours",
            "Get business operating hours",
            |client, _p: NoParams| async move {
                Ok(client.get("/company/business_hours", None).await?)
            },
        ),
        api_tool(
            client,
            "update_business_hours",
            "Update business operating hours",
            |client, p: BusinessHoursParams| async move {
                Ok(client.put("/company/business_hours", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "get_notification_settings",
            "Get notification settings",
            |client, _p: NoParams| async move {
                Ok(client.get("/company/notification_settings", None).await?)
            },
        ),
        api_tool(
            client,
            "update_notification_settings",
            "Update notification settings",
            |client, p: NotificationSettingsParams| async move {
                Ok(client
                    .patch("/company/notification_settings", Some(&body(&p)?))
                    .await?)
            },
        ),
        api_tool(
            client,
            "get_tax_settings",
            "Get tax calculation settings",
            |client, _p: NoParams| async move {
                Ok(client.get("/company/tax_settings", None).await?)
            },
        ),
        api_tool(
            client,
            "update_tax_settings",
            "Update tax calculation settings",
            |client, p: TaxSettingsParams| async move {
                Ok(client.patch("/company/tax_settings", Some(&body(&p)?)).await?)
            },
        ),
    ]
}
