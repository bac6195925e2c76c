//! 应用装配
//!
//! 把会话、路由器与 API 客户端组装在一起：
//! 路由器同时充当调度客户端的 [`Navigator`]，因此 401 引起的跳转
//! 与用户点击引起的跳转走同一条守卫流程。

use std::rc::Rc;

use wgdash_shared::{Credentials, LoginResponse};

use crate::api::WgDashApi;
use crate::auth;
use crate::config::ClientConfig;
use crate::dispatch::DispatchClient;
use crate::error::AuthError;
use crate::notify::Notifier;
use crate::request::HttpClient;
use crate::router::{History, Navigator, Outcome, Router};
use crate::session::{Session, SessionSlot};

pub struct DashboardApp<C: HttpClient, H: History + 'static> {
    session: Rc<Session>,
    router: Rc<Router<H>>,
    api: WgDashApi<C>,
}

impl<C: HttpClient, H: History + 'static> DashboardApp<C, H> {
    pub fn new(
        config: ClientConfig,
        http: C,
        slot: Rc<dyn SessionSlot>,
        history: H,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        // 1. 会话：所有读写都经过同一个槽
        let session = Rc::new(Session::new(slot, &config));

        // 2. 路由器：注入会话，守卫在每次导航时读取
        let router = Rc::new(Router::new(session.clone(), history));

        // 3. 调度客户端：路由器作为 401 的跳转出口
        let navigator: Rc<dyn Navigator> = router.clone();
        let client = DispatchClient::new(http, config, session.clone(), navigator, notifier);

        Self {
            session,
            router,
            api: WgDashApi::new(client),
        }
    }

    /// 对初始地址执行守卫
    pub fn start(&self) -> Outcome {
        self.router.start()
    }

    pub fn navigate(&self, path: &str) -> Outcome {
        self.router.navigate(path)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        auth::login(&self.api, self.router.as_ref(), credentials).await
    }

    pub fn logout(&self) {
        auth::logout(&self.session, self.router.as_ref());
    }

    pub fn api(&self) -> &WgDashApi<C> {
        &self.api
    }

    pub fn router(&self) -> &Rc<Router<H>> {
        &self.router
    }

    pub fn session(&self) -> &Rc<Session> {
        &self.session
    }
}
