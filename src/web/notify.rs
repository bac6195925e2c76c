use wasm_bindgen::JsValue;

use crate::notify::{Notification, NotificationLevel, Notifier};

/// 把提示写到浏览器控制台，界面层未接入 toast 时使用
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let message = JsValue::from_str(&notification.message);
        match notification.level {
            NotificationLevel::Error => web_sys::console::error_1(&message),
            NotificationLevel::Warning => web_sys::console::warn_1(&message),
            NotificationLevel::Info | NotificationLevel::Success => {
                web_sys::console::log_1(&message)
            }
        }
    }
}
