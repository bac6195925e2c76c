//! wgdash 共享协议定义
//!
//! 控制台与 WireGuard 控制器之间的契约：
//! - `models`: 控制器接收/返回的数据结构
//! - `protocol`: 请求描述符与类型化端点
//! - `endpoints`: 按业务分组的具名端点（纯函数）
//! - `date`: 控制器时间格式的 serde 适配

pub mod date;
pub mod endpoints;
pub mod models;
pub mod protocol;

pub use models::*;
pub use protocol::{
    Download, Endpoint, HttpMethod, InvalidBody, RequestBody, RequestDescriptor, ResponseKind,
};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";

/// 会话槽中保存令牌的键
pub const DEFAULT_TOKEN_KEY: &str = "token";
/// 会话槽中保存用户名的键
pub const DEFAULT_USERNAME_KEY: &str = "username";

/// 首页活动列表默认条数
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 4;

/// 创建/更新 ACL 时表示"全局规则"的 peer_id
pub const GLOBAL_ACL_PEER_ID: PeerId = -1;
