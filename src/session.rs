//! 会话模块
//!
//! 会话只有两个值：令牌与用户名，存放在一个键值槽中（浏览器里是 localStorage）。
//! `Session` 不缓存任何值，每次读取都直接访问槽，因此登出或 401 清除后，
//! 之后的所有读取（包括尚未发出的请求）立即看到的都是"未登录"。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::SessionError;

// =========================================================
// 存储槽 (Session Slot)
// =========================================================

/// 持久化键值槽
pub trait SessionSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn write(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// 进程内存中的槽，用于原生环境与测试
#[derive(Debug, Default)]
pub struct MemorySlot {
    entries: RefCell<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// 拒绝写入指定键的槽，用于测试写入失败
#[cfg(test)]
pub struct RejectingSlot {
    pub inner: MemorySlot,
    pub rejected_key: &'static str,
}

#[cfg(test)]
impl SessionSlot for RejectingSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SessionError> {
        if key == self.rejected_key {
            return Err(SessionError::Write("quota exceeded".into()));
        }
        self.inner.write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.inner.remove(key)
    }
}

// =========================================================
// 会话 (Session)
// =========================================================

/// 某一时刻的会话快照，供导航守卫使用
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub username: Option<String>,
}

impl SessionSnapshot {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: None,
        }
    }

    /// 令牌存在即视为已认证，令牌内容由控制器判定
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

pub struct Session {
    slot: Rc<dyn SessionSlot>,
    token_key: String,
    username_key: String,
}

impl Session {
    pub fn new(slot: Rc<dyn SessionSlot>, config: &ClientConfig) -> Self {
        Self {
            slot,
            token_key: config.token_key.clone(),
            username_key: config.username_key.clone(),
        }
    }

    /// 读取令牌；槽不可读时按未登录处理
    pub fn token(&self) -> Option<String> {
        self.read_non_empty(&self.token_key)
    }

    pub fn username(&self) -> Option<String> {
        self.read_non_empty(&self.username_key)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self.token(),
            username: self.username(),
        }
    }

    /// 登录成功后写入令牌
    ///
    /// 令牌最后写入；任一步失败都会清除会话，不会留下半登录状态。
    pub fn establish(&self, token: &str, username: Option<&str>) -> Result<(), SessionError> {
        if let Err(e) = self.write_all(token, username) {
            warn!(error = %e, "[Session] establish failed, clearing");
            self.clear();
            return Err(e);
        }
        info!(user = username.unwrap_or("-"), "[Session] established");
        Ok(())
    }

    fn write_all(&self, token: &str, username: Option<&str>) -> Result<(), SessionError> {
        match username {
            Some(name) => self.slot.write(&self.username_key, name)?,
            None => self.slot.remove(&self.username_key)?,
        }
        self.slot.write(&self.token_key, token)
    }

    /// 清除会话。尽力而为：单个键删除失败只记录日志
    pub fn clear(&self) {
        for key in [&self.token_key, &self.username_key] {
            if let Err(e) = self.slot.remove(key) {
                warn!(key = key.as_str(), error = %e, "[Session] failed to remove key");
            }
        }
        debug!("[Session] cleared");
    }

    fn read_non_empty(&self, key: &str) -> Option<String> {
        match self.slot.read(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key, error = %e, "[Session] slot unreadable, treating as signed out");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSlot;

    impl SessionSlot for BrokenSlot {
        fn read(&self, _key: &str) -> Result<Option<String>, SessionError> {
            Err(SessionError::Unavailable("storage disabled".into()))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), SessionError> {
            Err(SessionError::Write("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), SessionError> {
            Err(SessionError::Unavailable("storage disabled".into()))
        }
    }

    fn session_with(slot: Rc<dyn SessionSlot>) -> Session {
        Session::new(slot, &ClientConfig::default())
    }

    #[test]
    fn failed_establish_leaves_no_token() {
        for rejected_key in ["username", "token"] {
            let slot = Rc::new(RejectingSlot {
                inner: MemorySlot::new(),
                rejected_key,
            });
            let session = session_with(slot.clone());

            assert!(session.establish("abc123", Some("admin")).is_err());

            assert_eq!(session.snapshot(), SessionSnapshot::anonymous(), "{rejected_key}");
            assert_eq!(slot.inner.read("token").unwrap(), None);
        }
    }

    #[test]
    fn establish_then_clear() {
        let slot = Rc::new(MemorySlot::new());
        let session = session_with(slot.clone());
        assert!(!session.is_authenticated());

        session.establish("abc123", Some("admin")).unwrap();
        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert_eq!(session.username().as_deref(), Some("admin"));
        assert_eq!(slot.read("token").unwrap().as_deref(), Some("abc123"));

        session.clear();
        assert_eq!(session.snapshot(), SessionSnapshot::anonymous());
    }

    #[test]
    fn empty_token_is_absent() {
        let slot = Rc::new(MemorySlot::new());
        slot.write("token", "").unwrap();
        let session = session_with(slot);
        assert_eq!(session.token(), None);
        assert!(!session.snapshot().is_authenticated());
    }

    #[test]
    fn reads_are_never_cached() {
        let slot = Rc::new(MemorySlot::new());
        let session = session_with(slot.clone());
        session.establish("first", None).unwrap();
        slot.write("token", "second").unwrap();
        assert_eq!(session.token().as_deref(), Some("second"));
        slot.remove("token").unwrap();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn unreadable_slot_fails_closed() {
        let session = session_with(Rc::new(BrokenSlot));
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());
        assert!(session.establish("abc", None).is_err());
        // clear 不会 panic
        session.clear();
    }

    #[test]
    fn custom_keys_from_config() {
        let slot = Rc::new(MemorySlot::new());
        let config = ClientConfig {
            token_key: "wg_token".into(),
            ..ClientConfig::default()
        };
        let session = Session::new(slot.clone(), &config);
        session.establish("t", None).unwrap();
        assert_eq!(slot.read("wg_token").unwrap().as_deref(), Some("t"));
        assert_eq!(slot.read("token").unwrap(), None);
    }
}
