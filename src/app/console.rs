use crate::api::{
    CreateInAppRequest, NotificationApi, NotificationLists, RefreshOutcome, SendEmailRequest,
    SendSmsRequest,
};
use crate::app::forms::{EmailForm, InAppForm, SmsForm};
use crate::app::notices::Notices;
use crate::app::toast::{
    ScheduledDismiss, ToastState, ToastToken, INAPP_TOAST_TTL, SMS_WARNING_TOAST_TTL,
};
use crate::domain::notification::InAppNotification;

pub const DEFAULT_USER_ID: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Email,
    Sms,
    InApp,
    History,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::InApp => "inapp",
            Self::History => "history",
        }
    }
}

/// The whole console: selected user, active view, drafts, fetched lists,
/// toast, and pending notices. Mutation happens only through the action
/// handlers below; the UI loop owns the clock and feeds timer expiries
/// back in through [`Console::expire_toast`].
pub struct Console {
    api: NotificationApi,
    pub user_id: u64,
    pub active_tab: Tab,
    pub sending: bool,
    pub lists: NotificationLists,
    pub email_form: EmailForm,
    pub sms_form: SmsForm,
    pub inapp_form: InAppForm,
    pub toast: ToastState,
    pub notices: Notices,
}

impl Console {
    pub fn new(api: NotificationApi) -> Self {
        Self {
            api,
            user_id: DEFAULT_USER_ID,
            active_tab: Tab::Email,
            sending: false,
            lists: NotificationLists::default(),
            email_form: EmailForm::default(),
            sms_form: SmsForm::default(),
            inapp_form: InAppForm::default(),
            toast: ToastState::default(),
            notices: Notices::default(),
        }
    }

    pub fn api(&self) -> &NotificationApi {
        &self.api
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Switch the selected user and run one fetch-all cycle for it.
    pub async fn select_user(&mut self, user_id: u64) {
        self.user_id = user_id;
        self.refresh().await;
    }

    pub async fn refresh(&mut self) {
        let outcome = self.api.fetch_all(self.user_id).await;
        self.apply_refresh(outcome);
    }

    /// Apply a fetch-all outcome. The three lists replace together or not
    /// at all; an outcome for a user no longer selected is dropped, and a
    /// failed refresh keeps whatever is currently displayed.
    pub fn apply_refresh(&mut self, outcome: RefreshOutcome) {
        if outcome.for_user != self.user_id {
            tracing::debug!(
                user_id = outcome.for_user,
                "discarding refresh for a deselected user"
            );
            return;
        }
        match outcome.result {
            Ok(lists) => self.lists = lists,
            Err(err) => {
                tracing::error!(error = %err, "failed to refresh notification history");
            }
        }
    }

    /// Submit the email draft. The draft survives a failed send untouched.
    pub async fn send_email(&mut self) -> Option<ScheduledDismiss> {
        let req = SendEmailRequest {
            user_id: self.user_id,
            email: self.email_form.email.clone(),
            subject: self.email_form.subject.clone(),
            body: self.email_form.body.clone(),
        };
        self.sending = true;
        let result = self.api.send_email(&req).await;
        self.sending = false;

        match result {
            Ok(()) => {
                self.email_form.clear();
                self.refresh().await;
                self.notices
                    .success("Email sent. If it does not arrive, check the spam folder.");
            }
            Err(err) => self.notices.error(err.to_string()),
        }
        None
    }

    /// Submit the SMS draft. An accepted send without a provider `sid` is a
    /// soft failure: the draft still clears and history still refreshes,
    /// but a warning toast runs instead of a success acknowledgment. A
    /// failed call warns the same way, on top of the error notice.
    pub async fn send_sms(&mut self) -> Option<ScheduledDismiss> {
        let req = SendSmsRequest {
            user_id: self.user_id,
            to: self.sms_form.phone_number.clone(),
            body: self.sms_form.message.clone(),
        };
        self.sending = true;
        let result = self.api.send_sms(&req).await;
        self.sending = false;

        match result {
            Ok(receipt) => {
                self.sms_form.clear();
                self.refresh().await;
                if receipt.sid.is_some() {
                    self.notices.success("SMS sent.");
                    None
                } else {
                    Some(self.toast.show(
                        InAppNotification::sms_delivery_warning(),
                        SMS_WARNING_TOAST_TTL,
                    ))
                }
            }
            Err(err) => {
                self.notices.error(err.to_string());
                Some(self.toast.show(
                    InAppNotification::sms_delivery_warning(),
                    SMS_WARNING_TOAST_TTL,
                ))
            }
        }
    }

    /// Submit the in-app draft. The created entry goes straight to the top
    /// of the local list (no refetch) and into the toast.
    pub async fn send_inapp(&mut self) -> Option<ScheduledDismiss> {
        let req = CreateInAppRequest {
            user_id: self.user_id,
            title: self.inapp_form.title.clone(),
            message: self.inapp_form.message.clone(),
            notification_type: self.inapp_form.notification_type,
        };
        self.sending = true;
        let result = self.api.create_inapp(&req).await;
        self.sending = false;

        match result {
            Ok(created) => {
                self.lists.inapp.insert(0, created.clone());
                self.inapp_form.clear();
                Some(self.toast.show(created, INAPP_TOAST_TTL))
            }
            Err(err) => {
                self.notices.error(err.to_string());
                None
            }
        }
    }

    /// Mark one in-app entry read, remotely then locally. Dismisses the
    /// toast only when it is showing that entry.
    pub async fn mark_read(&mut self, notification_id: &str) {
        match self.api.mark_read(notification_id).await {
            Ok(()) => {
                if let Some(entry) = self
                    .lists
                    .inapp
                    .iter_mut()
                    .find(|entry| entry.id == notification_id)
                {
                    entry.read = true;
                }
                self.toast.dismiss_entry(notification_id);
            }
            Err(err) => self.notices.error(err.to_string()),
        }
    }

    /// Mark every in-app entry of the selected user read with one bulk
    /// call, and drop any visible toast.
    pub async fn mark_all_read(&mut self) {
        match self.api.mark_all_read(self.user_id).await {
            Ok(()) => {
                for entry in &mut self.lists.inapp {
                    entry.read = true;
                }
                self.toast.dismiss();
            }
            Err(err) => self.notices.error(err.to_string()),
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast.dismiss();
    }

    /// Timer callback from the UI loop; stale tokens are ignored.
    pub fn expire_toast(&mut self, token: ToastToken) -> bool {
        self.toast.expire(token)
    }
}
