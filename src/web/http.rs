//! 浏览器 fetch 传输层
//!
//! 使用 `gloo-net` 发起请求，并与 `gloo-timers` 的定时器竞争以实现超时。

use std::time::Duration;

use futures::future::{Either, select};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use wgdash_shared::HttpMethod;

use crate::error::TransportError;
use crate::request::{HttpClient, HttpRequest, HttpResponse};

/// 基于 fetch 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    pub fn new() -> Self {
        Self
    }

    async fn fetch(req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder: RequestBuilder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };

        for (k, v) in &req.headers {
            builder = builder.header(k, v);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Connect(e.to_string()))?;

        let resp = request
            .send()
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        let headers = resp
            .headers()
            .entries()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        let body = resp
            .binary()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse {
            status: resp.status(),
            headers,
            body,
        })
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let Some(timeout) = req.timeout else {
            return Self::fetch(req).await;
        };

        let fetch = Box::pin(Self::fetch(req));
        let timer = Box::pin(TimeoutFuture::new(millis(timeout)));

        match select(fetch, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(TransportError::Timeout(timeout.as_millis() as u64)),
        }
    }
}

fn millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}
