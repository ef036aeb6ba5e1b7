use std::time::Duration;

use crate::domain::notification::InAppNotification;

pub const INAPP_TOAST_TTL: Duration = Duration::from_secs(5);
pub const SMS_WARNING_TOAST_TTL: Duration = Duration::from_secs(7);

/// Identity of one show event. Tokens increase monotonically; a timer
/// armed for an older token must not hide a newer toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastToken(u64);

#[derive(Debug, Clone)]
pub struct ActiveToast {
    pub entry: InAppNotification,
    pub token: ToastToken,
    pub ttl: Duration,
}

/// Instruction to the event loop: hide `token` after `after` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledDismiss {
    pub token: ToastToken,
    pub after: Duration,
}

#[derive(Debug, Default)]
pub struct ToastState {
    current: Option<ActiveToast>,
    issued: u64,
}

impl ToastState {
    /// Show `entry`, replacing whatever is visible, and hand back the
    /// dismissal the caller should schedule.
    pub fn show(&mut self, entry: InAppNotification, ttl: Duration) -> ScheduledDismiss {
        self.issued += 1;
        let token = ToastToken(self.issued);
        self.current = Some(ActiveToast { entry, token, ttl });
        ScheduledDismiss { token, after: ttl }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Timer expiry. Returns whether anything was hidden; a stale token is
    /// a no-op.
    pub fn expire(&mut self, token: ToastToken) -> bool {
        let matches = self
            .current
            .as_ref()
            .is_some_and(|active| active.token == token);
        if matches {
            self.current = None;
        }
        matches
    }

    /// Hide the toast only if it is showing this notification.
    pub fn dismiss_entry(&mut self, notification_id: &str) -> bool {
        let matches = self
            .current
            .as_ref()
            .is_some_and(|active| active.entry.id == notification_id);
        if matches {
            self.current = None;
        }
        matches
    }

    pub fn current(&self) -> Option<&ActiveToast> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }
}
