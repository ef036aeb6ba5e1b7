use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ApiError;
use crate::domain::notification::{
    EmailNotification, InAppNotification, NotificationType, SmsLog,
};

/// Typed client for the remote notification service.
#[derive(Clone)]
pub struct NotificationApi {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendEmailRequest {
    pub user_id: u64,
    pub email: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendSmsRequest {
    pub user_id: u64,
    pub to: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateInAppRequest {
    pub user_id: u64,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
}

/// Send-SMS response. A missing or null `sid` means the provider accepted
/// the request but confirmed nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct SmsReceipt {
    #[serde(default)]
    pub sid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationLists {
    pub email: Vec<EmailNotification>,
    pub sms: Vec<SmsLog>,
    pub inapp: Vec<InAppNotification>,
}

/// Result of one fetch-all cycle, tagged with the user it was issued for so
/// a late response can be discarded after the selection changed.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub for_user: u64,
    pub result: Result<NotificationLists, ApiError>,
}

#[derive(Deserialize)]
struct SmsLogPage {
    #[serde(default)]
    logs: Vec<SmsLog>,
}

impl NotificationApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_email(&self, user_id: u64) -> Result<Vec<EmailNotification>, ApiError> {
        const OP: &str = "list email notifications";
        let resp = self
            .http
            .get(self.url(&format!("/email/users/{}/notifications", user_id)))
            .send()
            .await
            .map_err(|err| ApiError::transport(OP, err))?;
        let resp = ok_or_status(OP, resp)?;
        resp.json().await.map_err(|err| ApiError::decode(OP, err))
    }

    pub async fn list_sms(&self, user_id: u64) -> Result<Vec<SmsLog>, ApiError> {
        const OP: &str = "list SMS logs";
        let resp = self
            .http
            .get(self.url(&format!("/sms/logs/{}", user_id)))
            .send()
            .await
            .map_err(|err| ApiError::transport(OP, err))?;
        let resp = ok_or_status(OP, resp)?;
        let page: SmsLogPage = resp.json().await.map_err(|err| ApiError::decode(OP, err))?;
        Ok(page.logs)
    }

    pub async fn list_inapp(&self, user_id: u64) -> Result<Vec<InAppNotification>, ApiError> {
        const OP: &str = "list in-app notifications";
        let resp = self
            .http
            .get(self.url(&format!("/inapp/user/{}", user_id)))
            .send()
            .await
            .map_err(|err| ApiError::transport(OP, err))?;
        let resp = ok_or_status(OP, resp)?;
        let value: Value = resp.json().await.map_err(|err| ApiError::decode(OP, err))?;
        // The service has been seen returning an object here; anything but a
        // sequence counts as an empty list.
        match value {
            Value::Array(_) => {
                serde_json::from_value(value).map_err(|err| ApiError::decode(OP, err))
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Issue the three list requests together. All three must succeed for
    /// the outcome to carry lists; one failure fails the whole refresh.
    pub async fn fetch_all(&self, user_id: u64) -> RefreshOutcome {
        let result = tokio::try_join!(
            self.list_email(user_id),
            self.list_sms(user_id),
            self.list_inapp(user_id),
        )
        .map(|(email, sms, inapp)| NotificationLists { email, sms, inapp });

        RefreshOutcome {
            for_user: user_id,
            result,
        }
    }

    pub async fn send_email(&self, req: &SendEmailRequest) -> Result<(), ApiError> {
        const OP: &str = "send email";
        let resp = self
            .http
            .post(self.url("/email/send_email"))
            .json(req)
            .send()
            .await
            .map_err(|err| ApiError::transport(OP, err))?;
        ok_or_status(OP, resp)?;
        Ok(())
    }

    pub async fn send_sms(&self, req: &SendSmsRequest) -> Result<SmsReceipt, ApiError> {
        const OP: &str = "send SMS";
        let resp = self
            .http
            .post(self.url("/sms/send"))
            .json(req)
            .send()
            .await
            .map_err(|err| ApiError::transport(OP, err))?;
        let resp = ok_or_status(OP, resp)?;
        resp.json().await.map_err(|err| ApiError::decode(OP, err))
    }

    pub async fn create_inapp(
        &self,
        req: &CreateInAppRequest,
    ) -> Result<InAppNotification, ApiError> {
        const OP: &str = "create in-app notification";
        let resp = self
            .http
            .post(self.url("/inapp/create"))
            .json(req)
            .send()
            .await
            .map_err(|err| ApiError::transport(OP, err))?;
        let resp = ok_or_status(OP, resp)?;
        resp.json().await.map_err(|err| ApiError::decode(OP, err))
    }

    pub async fn mark_read(&self, notification_id: &str) -> Result<(), ApiError> {
        const OP: &str = "mark notification read";
        let resp = self
            .http
            .put(self.url(&format!("/inapp/{}/mark-read", notification_id)))
            .send()
            .await
            .map_err(|err| ApiError::transport(OP, err))?;
        ok_or_status(OP, resp)?;
        Ok(())
    }

    pub async fn mark_all_read(&self, user_id: u64) -> Result<(), ApiError> {
        const OP: &str = "mark all notifications read";
        let resp = self
            .http
            .put(self.url(&format!("/inapp/user/{}/mark-all-read", user_id)))
            .send()
            .await
            .map_err(|err| ApiError::transport(OP, err))?;
        ok_or_status(OP, resp)?;
        Ok(())
    }
}

fn ok_or_status(op: &'static str, resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(ApiError::status(op, resp.status()))
    }
}
