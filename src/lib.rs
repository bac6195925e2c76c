//! wgdash 控制台客户端
//!
//! WireGuard 管理控制台的会话守卫与 API 调度：
//! - `route` / `guard` / `router`: 路由表、导航守卫与导航引擎
//! - `session`: 令牌的持久化与读取
//! - `dispatch`: 所有出站调用的唯一出口（附加令牌、归类错误、处理 401）
//! - `api`: 按业务分组的具名端点门面
//! - `auth`: 登录、登出与修改密码
//! - `app`: 把以上组件装配在一起

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod guard;
pub mod notify;
pub mod request;
pub mod route;
pub mod router;
pub mod session;

pub use api::WgDashApi;
pub use app::DashboardApp;
pub use config::ClientConfig;
pub use dispatch::{BinaryPayload, DispatchClient, Response};
pub use error::{AuthError, DispatchError, SessionError, TransportError};
pub use guard::{Decision, evaluate};
pub use notify::{LogNotifier, Notification, NotificationLevel, Notifier};
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub use route::{AppRoute, ROUTES, RouteDescriptor, RouteMeta, menu};
pub use router::{History, MemoryHistory, Navigator, Outcome, PendingNavigation, Router};
pub use session::{MemorySlot, Session, SessionSlot, SessionSnapshot};

#[cfg(not(target_arch = "wasm32"))]
pub use request::ReqwestHttpClient;

pub use wgdash_shared as shared;

// 浏览器 API 封装，仅在 wasm32 下编译
#[cfg(target_arch = "wasm32")]
pub mod web {
    mod boot;
    mod history;
    mod http;
    mod notify;
    mod storage;

    pub use boot::{BrowserApp, boot};
    pub use history::{BrowserHistory, listen_popstate};
    pub use http::FetchHttpClient;
    pub use notify::ConsoleNotifier;
    pub use storage::LocalStorageSlot;
}
