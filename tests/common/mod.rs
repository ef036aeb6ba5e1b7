#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use time::OffsetDateTime;
use uuid::Uuid;

use herald::api::NotificationApi;
use herald::app::console::Console;
use herald::domain::notification::{
    EmailNotification, InAppNotification, NotificationType, SmsLog,
};

pub const TEST_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

// Endpoint tags for request counting and failure scripting.
pub const LIST_EMAIL: &str = "list_email";
pub const LIST_SMS: &str = "list_sms";
pub const LIST_INAPP: &str = "list_inapp";
pub const SEND_EMAIL: &str = "send_email";
pub const SEND_SMS: &str = "send_sms";
pub const CREATE_INAPP: &str = "create_inapp";
pub const MARK_READ: &str = "mark_read";
pub const MARK_ALL_READ: &str = "mark_all_read";

// ---------------------------------------------------------------------------
// Mock notification service
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct MockService {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    email: HashMap<u64, Vec<EmailNotification>>,
    sms: HashMap<u64, Vec<SmsLog>>,
    inapp: HashMap<u64, Vec<InAppNotification>>,
    next_sms_sid: Option<String>,
    next_email_id: i64,
    next_sms_id: i64,
    fail: HashMap<&'static str, u16>,
    hits: HashMap<&'static str, usize>,
    inapp_list_body: Option<Value>,
    sms_list_body: Option<Value>,
}

impl MockService {
    /// Record the hit and either fail as scripted or hand back the state.
    fn enter(&self, tag: &'static str) -> Result<MutexGuard<'_, Inner>, StatusCode> {
        let mut inner = self.inner.lock().unwrap();
        *inner.hits.entry(tag).or_insert(0) += 1;
        if let Some(status) = inner.fail.get(tag) {
            let status = StatusCode::from_u16(*status).unwrap();
            return Err(status);
        }
        Ok(inner)
    }

    pub fn seed_email(&self, user_id: u64, rows: Vec<EmailNotification>) {
        self.inner.lock().unwrap().email.insert(user_id, rows);
    }

    pub fn seed_sms(&self, user_id: u64, rows: Vec<SmsLog>) {
        self.inner.lock().unwrap().sms.insert(user_id, rows);
    }

    pub fn seed_inapp(&self, user_id: u64, rows: Vec<InAppNotification>) {
        self.inner.lock().unwrap().inapp.insert(user_id, rows);
    }

    /// `sid` returned by the next SMS sends; `None` serializes as null.
    pub fn set_next_sms_sid(&self, sid: Option<&str>) {
        self.inner.lock().unwrap().next_sms_sid = sid.map(str::to_string);
    }

    pub fn fail_with(&self, tag: &'static str, status: u16) {
        self.inner.lock().unwrap().fail.insert(tag, status);
    }

    pub fn succeed(&self, tag: &'static str) {
        self.inner.lock().unwrap().fail.remove(tag);
    }

    /// Raw body served by the in-app list endpoint instead of a sequence.
    pub fn set_inapp_list_body(&self, body: Value) {
        self.inner.lock().unwrap().inapp_list_body = Some(body);
    }

    /// Raw body served by the SMS log endpoint instead of `{logs: [...]}`.
    pub fn set_sms_list_body(&self, body: Value) {
        self.inner.lock().unwrap().sms_list_body = Some(body);
    }

    pub fn hits(&self, tag: &'static str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .hits
            .get(tag)
            .copied()
            .unwrap_or(0)
    }

    pub fn inapp_rows(&self, user_id: u64) -> Vec<InAppNotification> {
        self.inner
            .lock()
            .unwrap()
            .inapp
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn sms_rows(&self, user_id: u64) -> Vec<SmsLog> {
        self.inner
            .lock()
            .unwrap()
            .sms
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }
}

fn router(mock: MockService) -> Router {
    Router::new()
        .route("/email/users/:user_id/notifications", get(list_email))
        .route("/sms/logs/:user_id", get(list_sms))
        .route("/inapp/user/:user_id", get(list_inapp))
        .route("/email/send_email", post(send_email))
        .route("/sms/send", post(send_sms))
        .route("/inapp/create", post(create_inapp))
        .route("/inapp/:id/mark-read", put(mark_read))
        .route("/inapp/user/:user_id/mark-all-read", put(mark_all_read))
        .with_state(mock)
}

async fn list_email(
    State(mock): State<MockService>,
    Path(user_id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let inner = mock.enter(LIST_EMAIL)?;
    let rows = inner.email.get(&user_id).cloned().unwrap_or_default();
    Ok(Json(serde_json::to_value(rows).expect("serialize email rows")))
}

async fn list_sms(
    State(mock): State<MockService>,
    Path(user_id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let inner = mock.enter(LIST_SMS)?;
    if let Some(body) = inner.sms_list_body.clone() {
        return Ok(Json(body));
    }
    let rows = inner.sms.get(&user_id).cloned().unwrap_or_default();
    Ok(Json(json!({ "logs": rows })))
}

async fn list_inapp(
    State(mock): State<MockService>,
    Path(user_id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let inner = mock.enter(LIST_INAPP)?;
    if let Some(body) = inner.inapp_list_body.clone() {
        return Ok(Json(body));
    }
    let rows = inner.inapp.get(&user_id).cloned().unwrap_or_default();
    Ok(Json(serde_json::to_value(rows).expect("serialize in-app rows")))
}

async fn send_email(
    State(mock): State<MockService>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut inner = mock.enter(SEND_EMAIL)?;
    let user_id = body["user_id"].as_u64().unwrap_or(0);
    inner.next_email_id += 1;
    let row = EmailNotification {
        id: inner.next_email_id,
        email_to: body["email"].as_str().unwrap_or_default().to_string(),
        subject: body["subject"].as_str().unwrap_or_default().to_string(),
        created_at: OffsetDateTime::now_utc(),
    };
    inner.email.entry(user_id).or_default().insert(0, row);
    Ok(Json(json!({ "status": "queued" })))
}

async fn send_sms(
    State(mock): State<MockService>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut inner = mock.enter(SEND_SMS)?;
    let user_id = body["user_id"].as_u64().unwrap_or(0);
    inner.next_sms_id += 1;
    let row = SmsLog {
        id: inner.next_sms_id,
        to: body["to"].as_str().unwrap_or_default().to_string(),
        body: body["body"].as_str().unwrap_or_default().to_string(),
        created_at: OffsetDateTime::now_utc(),
    };
    inner.sms.entry(user_id).or_default().insert(0, row);
    Ok(Json(json!({ "sid": inner.next_sms_sid.clone() })))
}

async fn create_inapp(
    State(mock): State<MockService>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut inner = mock.enter(CREATE_INAPP)?;
    let user_id = body["user_id"].as_u64().unwrap_or(0);
    let notification = InAppNotification {
        id: Uuid::new_v4().to_string(),
        title: body["title"].as_str().unwrap_or_default().to_string(),
        message: body["message"].as_str().unwrap_or_default().to_string(),
        notification_type: body["notification_type"]
            .as_str()
            .and_then(NotificationType::parse)
            .unwrap_or_default(),
        read: false,
        created_at: OffsetDateTime::now_utc(),
    };
    inner
        .inapp
        .entry(user_id)
        .or_default()
        .insert(0, notification.clone());
    Ok(Json(
        serde_json::to_value(notification).expect("serialize created notification"),
    ))
}

async fn mark_read(
    State(mock): State<MockService>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let mut inner = mock.enter(MARK_READ)?;
    for rows in inner.inapp.values_mut() {
        for row in rows.iter_mut() {
            if row.id == id {
                row.read = true;
            }
        }
    }
    Ok(Json(json!({ "ok": true })))
}

async fn mark_all_read(
    State(mock): State<MockService>,
    Path(user_id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let mut inner = mock.enter(MARK_ALL_READ)?;
    if let Some(rows) = inner.inapp.get_mut(&user_id) {
        for row in rows.iter_mut() {
            row.read = true;
        }
    }
    Ok(Json(json!({ "ok": true })))
}

// ---------------------------------------------------------------------------
// Per-test harness
// ---------------------------------------------------------------------------

pub struct TestService {
    pub mock: MockService,
    pub base_url: String,
}

/// Spawn a fresh mock service on an ephemeral loopback port.
pub async fn spawn_service() -> TestService {
    let mock = MockService::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock listener address");
    let router = router(mock.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock service stopped");
    });

    TestService {
        mock,
        base_url: format!("http://{}", addr),
    }
}

impl TestService {
    pub fn api(&self) -> NotificationApi {
        NotificationApi::new(&self.base_url, TEST_HTTP_TIMEOUT).expect("build client")
    }

    pub fn console(&self) -> Console {
        Console::new(self.api())
    }
}

// ---------------------------------------------------------------------------
// Test data helpers
// ---------------------------------------------------------------------------

pub fn email_row(id: i64, recipient: &str, subject: &str) -> EmailNotification {
    EmailNotification {
        id,
        email_to: recipient.to_string(),
        subject: subject.to_string(),
        created_at: ts(id),
    }
}

pub fn sms_row(id: i64, to: &str, body: &str) -> SmsLog {
    SmsLog {
        id,
        to: to.to_string(),
        body: body.to_string(),
        created_at: ts(id),
    }
}

pub fn inapp_row(id: &str, title: &str, read: bool) -> InAppNotification {
    InAppNotification {
        id: id.to_string(),
        title: title.to_string(),
        message: format!("{} body", title),
        notification_type: NotificationType::Info,
        read,
        created_at: ts(7),
    }
}

fn ts(offset: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000 + offset).expect("timestamp")
}
