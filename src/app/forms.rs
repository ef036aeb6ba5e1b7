use crate::domain::notification::NotificationType;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailForm {
    pub email: String,
    pub subject: String,
    pub body: String,
}

impl EmailForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmsForm {
    pub phone_number: String,
    pub message: String,
}

impl SmsForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InAppForm {
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
}

impl InAppForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
