use std::rc::Rc;

use tracing::info;

use super::{BrowserHistory, ConsoleNotifier, FetchHttpClient, LocalStorageSlot, listen_popstate};
use crate::app::DashboardApp;
use crate::config::ClientConfig;

pub type BrowserApp = DashboardApp<FetchHttpClient, BrowserHistory>;

/// 在浏览器中装配应用：localStorage 会话、fetch 传输、History 路由
///
/// 安装 popstate 监听后立即对当前地址执行一次守卫。
pub fn boot(config: ClientConfig) -> BrowserApp {
    let app = DashboardApp::new(
        config,
        FetchHttpClient::new(),
        Rc::new(LocalStorageSlot::new()),
        BrowserHistory::new(),
        Rc::new(ConsoleNotifier),
    );
    listen_popstate(app.router().clone());
    let outcome = app.start();
    info!(?outcome, "[Boot] initial navigation");
    app
}
