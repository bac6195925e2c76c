//! window.history 封装
//!
//! 所有对浏览器 History API 的操作都集中在此模块。

use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::router::{History, Router};

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

impl BrowserHistory {
    pub fn new() -> Self {
        Self
    }
}

impl History for BrowserHistory {
    fn push(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
                    warn!(path, error = ?e, "[Router] pushState failed");
                }
            }
        }
    }

    fn replace(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(path)) {
                    warn!(path, error = ?e, "[Router] replaceState failed");
                }
            }
        }
    }

    fn location(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }
}

/// 初始化浏览器后退/前进按钮监听
pub fn listen_popstate(router: Rc<Router<BrowserHistory>>) {
    let closure = Closure::<dyn Fn()>::new(move || {
        let path = router.history().location();
        router.on_history_pop(&path);
    });

    if let Some(window) = web_sys::window() {
        if let Err(e) =
            window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
        {
            warn!(error = ?e, "[Router] failed to install popstate listener");
        }
    }

    // 泄漏闭包以保持监听器存活
    closure.forget();
}
