//! Customer notification tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::common::{MessageChannel, PageParams, list_all};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Sms,
    Email,
    Push,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Queued,
    Sent,
    Delivered,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListNotificationsParams {
    /// Filter by notification type
    #[serde(rename = "type")]
    pub kind: Option<NotificationType>,
    /// Filter by status
    pub status: Option<DeliveryStatus>,
    #[serde(flatten)]
    pub paging: PageParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SendNotificationParams {
    /// Notification type
    #[serde(rename = "type")]
    pub kind: MessageChannel,
    /// Recipient (phone number for SMS, email address for email)
    pub recipient: String,
    /// Subject (email only)
    pub subject: Option<String>,
    /// Message content
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NotificationIdParams {
    /// Notification ID
    pub notification_id: String,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_notifications",
            "List notifications with optional filters",
            |client, p: ListNotificationsParams| async move {
                list_all(&client, "/notifications", "notifications", &p).await
            },
        ),
        api_tool(
            client,
            "send_notification",
            "Send a notification to a customer",
            |client, p: SendNotificationParams| async move {
                Ok(client.post("/notifications", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "mark_notification_read",
            "Mark a notification as read",
            |client, p: NotificationIdParams| async move {
                Ok(client
                    .patch(
                        &format!("/notifications/{}", p.notification_id),
                        Some(&json!({ "read": true })),
                    )
                    .await?)
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_field_keeps_wire_name() {
        let params: SendNotificationParams = serde_json::from_value(json!({
            "type": "sms",
            "recipient": "+15550100",
            "message": "Your technician is on the way",
        }))
        .unwrap();
        let sent = body(&params).unwrap();
        assert_eq!(sent["type"], "sms");
        assert!(sent.get("subject").is_none());
    }

    #[test]
    fn test_push_not_sendable() {
        let parsed = serde_json::from_value::<SendNotificationParams>(json!({
            "type": "push",
            "recipient": "x",
            "message": "y",
        }));
        assert!(parsed.is_err());
    }
}
