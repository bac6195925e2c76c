//! 用户可见的短暂提示（toast）

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
}

/// 提示出口，由界面层实现
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// 仅写日志的默认实现
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        let message = notification.message.as_str();
        match notification.level {
            NotificationLevel::Error => error!("[Notify] {}", message),
            NotificationLevel::Warning => warn!("[Notify] {}", message),
            NotificationLevel::Info | NotificationLevel::Success => info!("[Notify] {}", message),
        }
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    pub seen: std::cell::RefCell<Vec<Notification>>,
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}
