use thiserror::Error;
use wgdash_shared::InvalidBody;

// =========================================================
// 传输层错误
// =========================================================

/// `HttpClient` 实现返回的错误，统一归类为 [`DispatchError::Network`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("请求超时 ({0} ms)")]
    Timeout(u64),
    #[error("连接失败: {0}")]
    Connect(String),
    #[error("读取响应失败: {0}")]
    Body(String),
}

// =========================================================
// 调度错误
// =========================================================

/// 出站调用的错误分类
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// 传输失败或超时，调用方可自行重试
    #[error("网络错误: {0}")]
    Network(String),
    /// 控制器拒绝了会话令牌；会话已清除并跳转登录页
    #[error("登录已失效，请重新登录")]
    Unauthenticated,
    /// 控制器返回的业务错误，原样展示给用户
    #[error("{message}")]
    Remote { status: u16, message: String },
    /// 调用参数无法构造成请求，不会到达网络
    #[error("请求参数非法: {0}")]
    Validation(String),
    /// 2xx 响应体与端点 schema 不符
    #[error("响应解析失败: {0}")]
    Decode(String),
}

impl DispatchError {
    /// 只有网络错误值得调用方重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, DispatchError::Network(_))
    }

    /// 控制器返回的 HTTP 状态码（如有）
    pub fn status(&self) -> Option<u16> {
        match self {
            DispatchError::Unauthenticated => Some(401),
            DispatchError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for DispatchError {
    fn from(e: TransportError) -> Self {
        DispatchError::Network(e.to_string())
    }
}

impl From<InvalidBody> for DispatchError {
    fn from(e: InvalidBody) -> Self {
        DispatchError::Validation(e.to_string())
    }
}

// =========================================================
// 会话错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("会话存储不可用: {0}")]
    Unavailable(String),
    #[error("写入会话失败: {0}")]
    Write(String),
}

/// 登录流程的错误：请求失败或令牌无法持久化
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
