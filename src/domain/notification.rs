use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Advisory shown when the SMS provider accepts a send but returns no
/// delivery confirmation, and when the send call fails outright.
pub const SMS_DELIVERY_WARNING: &str = "Start the number with a country code. \
If it still fails, the number may not be verified with the SMS provider.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

impl Default for NotificationType {
    fn default() -> Self {
        Self::Info
    }
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "info" => Some(Self::Info),
            "success" => Some(Self::Success),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailNotification {
    pub id: i64,
    pub email_to: String,
    pub subject: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsLog {
    pub id: i64,
    pub to: String,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InAppNotification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl InAppNotification {
    /// Synthetic warning used for both SMS failure paths. Never sent to the
    /// remote service; the id is local so it cannot collide with a
    /// server-issued entry.
    pub fn sms_delivery_warning() -> Self {
        Self {
            id: format!("sms-warning-{}", Uuid::new_v4()),
            title: "SMS delivery uncertain".to_string(),
            message: SMS_DELIVERY_WARNING.to_string(),
            notification_type: NotificationType::Warning,
            read: false,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
