//! 认证模块
//!
//! 登录、登出与修改密码。会话的读写只经过 [`Session`]，
//! 导航只经过 [`Navigator`]，两者都由调用方注入。

use tracing::info;
use wgdash_shared::{Ack, Credentials, LoginResponse};

use crate::api::WgDashApi;
use crate::error::{AuthError, DispatchError};
use crate::request::HttpClient;
use crate::route::AppRoute;
use crate::router::Navigator;
use crate::session::Session;

/// 登录并保存令牌，成功后跳转首页
///
/// 用户名密码错误时控制器返回 400，错误原样向上传递。
pub async fn login<C: HttpClient>(
    api: &WgDashApi<C>,
    navigator: &dyn Navigator,
    credentials: &Credentials,
) -> Result<LoginResponse, AuthError> {
    let response = api.login(credentials).await?;
    api.client()
        .session()
        .establish(&response.access_token, Some(&credentials.username))?;
    info!(user = %credentials.username, "[Auth] logged in");
    navigator.redirect(AppRoute::auth_success_redirect());
    Ok(response)
}

/// 注销：先清除会话，再跳转登录页
pub fn logout(session: &Session, navigator: &dyn Navigator) {
    session.clear();
    info!("[Auth] logged out");
    navigator.redirect(AppRoute::auth_failure_redirect());
}

pub async fn change_password<C: HttpClient>(
    api: &WgDashApi<C>,
    new_password: &str,
) -> Result<Ack, DispatchError> {
    api.change_password(new_password).await
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;
    use wgdash_shared::HttpMethod;

    use super::*;
    use crate::config::ClientConfig;
    use crate::dispatch::DispatchClient;
    use crate::error::SessionError;
    use crate::notify::RecordingNotifier;
    use crate::request::MockHttpClient;
    use crate::session::{MemorySlot, RejectingSlot, SessionSlot};

    #[derive(Default)]
    struct RecordingNavigator {
        redirects: RefCell<Vec<AppRoute>>,
    }

    impl Navigator for RecordingNavigator {
        fn redirect(&self, route: AppRoute) {
            self.redirects.borrow_mut().push(route);
        }
    }

    struct TestContext {
        session: Rc<Session>,
        navigator: Rc<RecordingNavigator>,
        api: WgDashApi<MockHttpClient>,
    }

    impl TestContext {
        fn new() -> Self {
            Self::with_slot(Rc::new(MemorySlot::new()))
        }

        fn with_slot(slot: Rc<dyn SessionSlot>) -> Self {
            let config = ClientConfig::new("http://wg.test");
            let session = Rc::new(Session::new(slot, &config));
            let navigator = Rc::new(RecordingNavigator::default());
            let api = WgDashApi::new(DispatchClient::new(
                MockHttpClient::new(),
                config,
                session.clone(),
                navigator.clone(),
                Rc::new(RecordingNotifier::default()),
            ));
            Self {
                session,
                navigator,
                api,
            }
        }

        fn mock(&self) -> &MockHttpClient {
            self.api.client().http()
        }
    }

    #[tokio::test]
    async fn login_establishes_session_and_goes_home() {
        let ctx = TestContext::new();
        ctx.mock().mock_response(
            HttpMethod::Post,
            "http://wg.test/api/login",
            200,
            json!({"access_token": "abc123", "token_type": "bearer"}),
        );

        let credentials = Credentials::new("admin", "admin123");
        let response = login(&ctx.api, ctx.navigator.as_ref(), &credentials)
            .await
            .unwrap();

        assert_eq!(response.access_token, "abc123");
        assert_eq!(ctx.session.token().as_deref(), Some("abc123"));
        assert_eq!(ctx.session.username().as_deref(), Some("admin"));
        assert_eq!(*ctx.navigator.redirects.borrow(), vec![AppRoute::Dashboard]);
    }

    #[tokio::test]
    async fn wrong_password_leaves_session_empty() {
        let ctx = TestContext::new();
        ctx.mock().mock_response(
            HttpMethod::Post,
            "http://wg.test/api/login",
            400,
            json!({"detail": "用户名或密码错误"}),
        );

        let credentials = Credentials::new("admin", "wrong");
        let err = login(&ctx.api, ctx.navigator.as_ref(), &credentials)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "用户名或密码错误");
        assert!(!ctx.session.is_authenticated());
        assert!(ctx.navigator.redirects.borrow().is_empty());
    }

    #[tokio::test]
    async fn subsequent_calls_carry_the_new_token() {
        let ctx = TestContext::new();
        ctx.mock().mock_response(
            HttpMethod::Post,
            "http://wg.test/api/login",
            200,
            json!({"access_token": "fresh"}),
        );
        ctx.mock().mock_response(
            HttpMethod::Post,
            "http://wg.test/api/change-password",
            200,
            json!({"msg": "Password changed successfully"}),
        );

        login(&ctx.api, ctx.navigator.as_ref(), &Credentials::new("admin", "pw"))
            .await
            .unwrap();
        let ack = change_password(&ctx.api, "n3w-secret").await.unwrap();

        assert_eq!(ack.msg, "Password changed successfully");
        let req = ctx.mock().last_request().unwrap();
        assert_eq!(req.header("Authorization"), Some("Bearer fresh"));
        assert_eq!(req.body.as_deref(), Some(r#"{"new_password":"n3w-secret"}"#));
    }

    #[tokio::test]
    async fn unsaved_session_fails_login_without_token() {
        let ctx = TestContext::with_slot(Rc::new(RejectingSlot {
            inner: MemorySlot::new(),
            rejected_key: "username",
        }));
        ctx.mock().mock_response(
            HttpMethod::Post,
            "http://wg.test/api/login",
            200,
            json!({"access_token": "abc123"}),
        );

        let err = login(&ctx.api, ctx.navigator.as_ref(), &Credentials::new("admin", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Session(SessionError::Write(_))));
        assert!(!ctx.session.is_authenticated());
        assert_eq!(ctx.session.token(), None);
        assert!(ctx.navigator.redirects.borrow().is_empty());
    }

    #[test]
    fn logout_clears_then_redirects() {
        let ctx = TestContext::new();
        ctx.session.establish("abc123", Some("admin")).unwrap();

        logout(&ctx.session, ctx.navigator.as_ref());

        assert!(!ctx.session.is_authenticated());
        assert_eq!(ctx.session.username(), None);
        assert_eq!(*ctx.navigator.redirects.borrow(), vec![AppRoute::Login]);
    }
}
