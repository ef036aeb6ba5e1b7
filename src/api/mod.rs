mod client;
mod error;

pub use client::{
    CreateInAppRequest, NotificationApi, NotificationLists, RefreshOutcome, SendEmailRequest,
    SendSmsRequest, SmsReceipt,
};
pub use error::ApiError;
