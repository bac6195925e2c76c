//! 调度客户端 (Dispatch Client)
//!
//! 所有出站调用的唯一出口：
//! 1. 请求阶段：每次调用时从会话槽读取令牌并附加 `Authorization` 头；
//! 2. 发送：恰好调用一次 [`HttpClient::send`]，不重试；
//! 3. 响应阶段：按状态码与响应模式归类为 [`Response`] 或 [`DispatchError`]。
//!
//! 401 的处理顺序是固定的：先清除会话，再跳转登录页。

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};
use wgdash_shared::{
    CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, CONTENT_TYPE_OCTET_STREAM, Download, Endpoint,
    HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, RequestBody, RequestDescriptor, ResponseKind,
};

use crate::config::ClientConfig;
use crate::error::DispatchError;
use crate::notify::{Notification, Notifier};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::route::AppRoute;
use crate::router::Navigator;
use crate::session::Session;


/// 文件下载的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPayload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// 成功调用的结果
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// 已解包的 JSON 响应体
    Structured(Value),
    /// 原始字节
    Binary(BinaryPayload),
}

pub struct DispatchClient<C: HttpClient> {
    http: C,
    config: ClientConfig,
    session: Rc<Session>,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
}

impl<C: HttpClient> DispatchClient<C> {
    pub fn new(
        http: C,
        config: ClientConfig,
        session: Rc<Session>,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            http,
            config,
            session,
            navigator,
            notifier,
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Rc<Session> {
        &self.session
    }

    /// 发送一次请求并归类结果
    pub async fn send(&self, descriptor: RequestDescriptor) -> Result<Response, DispatchError> {
        let request = self.prepare(&descriptor);
        debug!(
            method = %descriptor.method,
            path = %descriptor.path_and_query(),
            "[Dispatch] sending"
        );

        let response = match self.http.send(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = DispatchError::from(e);
                warn!(
                    method = %descriptor.method,
                    path = %descriptor.path,
                    error = %err,
                    "[Dispatch] transport failed"
                );
                self.notifier.notify(Notification::error(err.to_string()));
                return Err(err);
            }
        };

        debug!(
            method = %descriptor.method,
            path = %descriptor.path,
            status = response.status,
            "[Dispatch] finished"
        );

        if response.is_success() {
            return decode_success(descriptor.response_kind, response);
        }

        if response.status == 401 {
            info!(path = %descriptor.path, "[Dispatch] token rejected, signing out");
            self.session.clear();
            self.navigator.redirect(AppRoute::auth_failure_redirect());
            return Err(DispatchError::Unauthenticated);
        }

        let message = remote_message(&response);
        warn!(
            method = %descriptor.method,
            path = %descriptor.path,
            status = response.status,
            message = %message,
            "[Dispatch] remote error"
        );
        self.notifier.notify(Notification::error(message.clone()));
        Err(DispatchError::Remote {
            status: response.status,
            message,
        })
    }

    /// 发送结构化端点并反序列化为其 schema
    pub async fn call<R: DeserializeOwned>(&self, endpoint: Endpoint<R>) -> Result<R, DispatchError> {
        let path = endpoint.descriptor().path.clone();
        match self.send(endpoint.into_descriptor()).await? {
            Response::Structured(value) => serde_json::from_value(value).map_err(|e| {
                warn!(path = %path, error = %e, "[Dispatch] response does not match schema");
                DispatchError::Decode(e.to_string())
            }),
            Response::Binary(_) => Err(DispatchError::Decode(
                "expected a JSON body, got binary".to_string(),
            )),
        }
    }

    /// 下载文件，不做 JSON 解析
    pub async fn download(&self, download: Download) -> Result<BinaryPayload, DispatchError> {
        match self.send(download.into_descriptor()).await? {
            Response::Binary(payload) => Ok(payload),
            Response::Structured(_) => Err(DispatchError::Decode(
                "expected a binary body, got JSON".to_string(),
            )),
        }
    }

    /// 把描述符转换为传输层请求；令牌在此刻从会话槽读取
    fn prepare(&self, descriptor: &RequestDescriptor) -> HttpRequest {
        let url = self.config.endpoint_url(&descriptor.path_and_query());
        let mut request =
            HttpRequest::new(&url, descriptor.method).with_timeout(self.config.timeout());

        match &descriptor.body {
            Some(RequestBody::Json(value)) => {
                request = request
                    .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                    .with_body(value.to_string());
            }
            Some(RequestBody::Form(fields)) => {
                request = request
                    .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_FORM)
                    .with_body(encode_form(fields));
            }
            None => {}
        }

        for (k, v) in &descriptor.headers {
            request = request.with_header(k, v);
        }

        if let Some(token) = self.session.token() {
            request = request.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        request
    }
}

fn decode_success(kind: ResponseKind, response: HttpResponse) -> Result<Response, DispatchError> {
    match kind {
        ResponseKind::Binary => {
            let content_type = response
                .header(HEADER_CONTENT_TYPE)
                .unwrap_or(CONTENT_TYPE_OCTET_STREAM)
                .to_string();
            Ok(Response::Binary(BinaryPayload {
                bytes: response.body,
                content_type,
            }))
        }
        ResponseKind::Structured => {
            if response.body.iter().all(u8::is_ascii_whitespace) {
                return Ok(Response::Structured(Value::Null));
            }
            response
                .json::<Value>()
                .map(Response::Structured)
                .map_err(|e| DispatchError::Decode(e.to_string()))
        }
    }
}

/// 从错误响应体中提取控制器给出的说明：`detail`，其次 `msg`，其次 `message`
fn remote_message(response: &HttpResponse) -> String {
    response
        .json::<Value>()
        .ok()
        .and_then(|body| {
            ["detail", "msg", "message"]
                .iter()
                .find_map(|key| body.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("请求失败 (HTTP {})", response.status))
}

fn encode_form(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
