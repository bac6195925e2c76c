//! 导航守卫
//!
//! 纯函数：只看目标路由是否公开以及会话里是否有令牌，不做任何 I/O。

use crate::route::AppRoute;
use crate::session::SessionSnapshot;

/// 守卫的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Redirect(AppRoute),
}

/// **核心守卫逻辑**
///
/// | 目标 | 令牌 | 结果 |
/// |---|---|---|
/// | 公开 | 有 | 重定向首页 |
/// | 公开 | 无 | 放行 |
/// | 受保护 | 有 | 放行 |
/// | 受保护 | 无 | 重定向登录页 |
///
/// `current` 仅为与导航库的签名保持一致，不影响判定。
pub fn evaluate(
    target: &AppRoute,
    _current: Option<&AppRoute>,
    session: &SessionSnapshot,
) -> Decision {
    match (target.is_public(), session.is_authenticated()) {
        (true, true) => Decision::Redirect(AppRoute::auth_success_redirect()),
        (true, false) => Decision::Proceed,
        (false, true) => Decision::Proceed,
        (false, false) => Decision::Redirect(AppRoute::auth_failure_redirect()),
    }
}
