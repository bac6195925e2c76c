//! 客户端配置
//!
//! 所有字段都有默认值；`from_env` 读取环境变量覆盖，读不到或无法解析时回退到默认值。

use std::time::Duration;

use serde::{Deserialize, Serialize};
use wgdash_shared::{DEFAULT_TOKEN_KEY, DEFAULT_USERNAME_KEY};

/// 开发代理把 `/api` 前缀转发到控制器
pub const DEFAULT_BASE_PATH: &str = "/api";
/// 出站请求的超时上限
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const ENV_BASE_URL: &str = "WGDASH_BASE_URL";
const ENV_BASE_PATH: &str = "WGDASH_BASE_PATH";
const ENV_TIMEOUT_MS: &str = "WGDASH_TIMEOUT_MS";
const ENV_TOKEN_KEY: &str = "WGDASH_TOKEN_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// 控制器源地址；浏览器内同源部署时为空
    pub base_url: String,
    /// 所有请求路径的固定前缀
    pub base_path: String,
    pub timeout_ms: u64,
    pub token_key: String,
    pub username_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            username_key: DEFAULT_USERNAME_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 通过任意查找函数构造，便于在没有进程环境（wasm）或测试中使用
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            base_url: non_empty(ENV_BASE_URL).unwrap_or(defaults.base_url),
            base_path: non_empty(ENV_BASE_PATH).unwrap_or(defaults.base_path),
            timeout_ms: non_empty(ENV_TIMEOUT_MS)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.timeout_ms),
            token_key: non_empty(ENV_TOKEN_KEY).unwrap_or(defaults.token_key),
            username_key: defaults.username_key,
        }
    }

    /// 请求超时；`timeout_ms` 为 0 时回退到默认值
    pub fn timeout(&self) -> Duration {
        match self.timeout_ms {
            0 => Duration::from_millis(DEFAULT_TIMEOUT_MS),
            ms => Duration::from_millis(ms),
        }
    }

    /// 拼接完整请求地址：`base_url + base_path + path`
    pub fn endpoint_url(&self, path: &str) -> String {
        let base_url = self.base_url.trim_end_matches('/');
        let base_path = self.base_path.trim_matches('/');
        let path = path.trim_start_matches('/');

        let mut url = String::from(base_url);
        if !base_path.is_empty() {
            url.push('/');
            url.push_str(base_path);
        }
        url.push('/');
        url.push_str(path);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_path, "/api");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.token_key, "token");
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("WGDASH_BASE_URL", "https://vpn.example.com"),
            ("WGDASH_TIMEOUT_MS", "2500"),
            ("WGDASH_TOKEN_KEY", "wg_token"),
        ]));
        assert_eq!(config.base_url, "https://vpn.example.com");
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.token_key, "wg_token");
        assert_eq!(config.base_path, "/api");
    }

    #[test]
    fn invalid_timeout_falls_back() {
        for raw in ["abc", "0", "  "] {
            let config = ClientConfig::from_lookup(lookup_from(&[("WGDASH_TIMEOUT_MS", raw)]));
            assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS, "input {raw:?}");
        }
    }

    #[test]
    fn endpoint_url_joins_without_double_slashes() {
        let config = ClientConfig::new("http://localhost:8000/");
        assert_eq!(config.endpoint_url("/peers/7"), "http://localhost:8000/api/peers/7");

        let same_origin = ClientConfig::default();
        assert_eq!(same_origin.endpoint_url("peers"), "/api/peers");

        let no_prefix = ClientConfig {
            base_path: String::new(),
            ..ClientConfig::new("http://backend:8000")
        };
        assert_eq!(no_prefix.endpoint_url("/health"), "http://backend:8000/health");
    }

    #[test]
    fn deserializes_partial_config() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_ms": 500}"#).unwrap();
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.base_path, "/api");
    }

    #[test]
    fn zero_timeout_from_file_falls_back() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_ms": 0}"#).unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }
}
