use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 响应体的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    /// JSON 响应，解包后交给调用方
    #[default]
    Structured,
    /// 原始字节（配置文件、二维码图片），不做 JSON 解析
    Binary,
}

/// 请求体
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded`，保持字段顺序
    Form(Vec<(String, String)>),
}

// =========================================================
// 请求描述符 (Request Descriptor)
// =========================================================

/// 单次出站调用的完整描述
///
/// 每次调用构造一次，发送后即丢弃；客户端不会自动重试。
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// 相对路径（不含 base path），如 `/peers/7`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub headers: BTreeMap<String, String>,
    pub response_kind: ResponseKind,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: BTreeMap::new(),
            response_kind: ResponseKind::Structured,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// 直接附加已构造好的 JSON 值
    pub fn with_json_value(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// 序列化并附加 JSON 请求体
    pub fn with_json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, InvalidBody> {
        let value = serde_json::to_value(body).map_err(InvalidBody)?;
        Ok(self.with_json_value(value))
    }

    pub fn with_form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let pairs = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.body = Some(RequestBody::Form(pairs));
        self
    }

    pub fn with_response_kind(mut self, kind: ResponseKind) -> Self {
        self.response_kind = kind;
        self
    }

    /// 带查询串的路径，用于日志和测试断言
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

/// 请求体无法序列化
///
/// 在构造阶段产生，请求不会到达网络。
#[derive(Debug)]
pub struct InvalidBody(pub serde_json::Error);

impl fmt::Display for InvalidBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid request body: {}", self.0)
    }
}

impl std::error::Error for InvalidBody {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

// =========================================================
// 类型化端点 (Typed Endpoints)
// =========================================================

/// 返回结构化响应的端点，`R` 为响应体的 schema
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint<R> {
    descriptor: RequestDescriptor,
    _response: PhantomData<fn() -> R>,
}

impl<R> Endpoint<R> {
    pub fn new(descriptor: RequestDescriptor) -> Self {
        Self {
            descriptor: descriptor.with_response_kind(ResponseKind::Structured),
            _response: PhantomData,
        }
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    pub fn into_descriptor(self) -> RequestDescriptor {
        self.descriptor
    }
}

/// 返回原始字节的端点（文件下载）
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    descriptor: RequestDescriptor,
}

impl Download {
    pub fn new(descriptor: RequestDescriptor) -> Self {
        Self {
            descriptor: descriptor.with_response_kind(ResponseKind::Binary),
        }
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    pub fn into_descriptor(self) -> RequestDescriptor {
        self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_is_encoded_in_order() {
        let req = RequestDescriptor::get("/activities")
            .with_query("limit", 4)
            .with_query("q", "a b");
        assert_eq!(req.path_and_query(), "/activities?limit=4&q=a%20b");
    }

    #[test]
    fn endpoint_forces_structured_and_download_forces_binary() {
        let raw = RequestDescriptor::get("/x").with_response_kind(ResponseKind::Binary);
        let endpoint: Endpoint<serde_json::Value> = Endpoint::new(raw.clone());
        assert_eq!(endpoint.descriptor().response_kind, ResponseKind::Structured);

        let download = Download::new(RequestDescriptor::get("/x"));
        assert_eq!(download.descriptor().response_kind, ResponseKind::Binary);
    }

    #[test]
    fn json_body_is_attached() {
        let req = RequestDescriptor::post("/users")
            .with_json(&json!({"username": "bob"}))
            .unwrap();
        assert_eq!(req.body, Some(RequestBody::Json(json!({"username": "bob"}))));
    }

    #[test]
    fn unserializable_body_is_rejected() {
        use std::collections::HashMap;
        let mut bad: HashMap<(u8, u8), u8> = HashMap::new();
        bad.insert((1, 2), 3);
        assert!(RequestDescriptor::post("/x").with_json(&bad).is_err());
    }
}
