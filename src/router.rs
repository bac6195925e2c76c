//! 路由服务模块 - 核心引擎
//!
//! 实现了"请求 -> 验证(Guard) -> 处理 -> 加载"的导航流程。
//! 对浏览器 History 的操作通过 [`History`] 特性注入，
//! 因此同一套引擎既能跑在浏览器里，也能在原生测试中运行。

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, info};

use crate::guard::{self, Decision};
use crate::route::AppRoute;
use crate::session::Session;

// =========================================================
// History 抽象
// =========================================================

/// 浏览器历史记录栈
pub trait History {
    /// 推入新条目（对应 pushState）
    fn push(&self, path: &str);
    /// 替换当前条目（对应 replaceState，用于重定向）
    fn replace(&self, path: &str);
    /// 当前地址栏的 path
    fn location(&self) -> String;
}

/// 内存中的历史栈，用于原生环境与测试
#[derive(Debug)]
pub struct MemoryHistory {
    entries: RefCell<Vec<String>>,
    cursor: Cell<usize>,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: RefCell::new(vec![initial.to_string()]),
            cursor: Cell::new(0),
        }
    }

    /// 模拟浏览器后退按钮，返回新的当前 path
    pub fn back(&self) -> Option<String> {
        let cursor = self.cursor.get();
        if cursor == 0 {
            return None;
        }
        self.cursor.set(cursor - 1);
        Some(self.location())
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

impl History for MemoryHistory {
    fn push(&self, path: &str) {
        let mut entries = self.entries.borrow_mut();
        let next = self.cursor.get() + 1;
        entries.truncate(next);
        entries.push(path.to_string());
        self.cursor.set(next);
    }

    fn replace(&self, path: &str) {
        let mut entries = self.entries.borrow_mut();
        let cursor = self.cursor.get();
        entries[cursor] = path.to_string();
    }

    fn location(&self) -> String {
        self.entries.borrow()[self.cursor.get()].clone()
    }
}

// =========================================================
// 导航器
// =========================================================

/// 被动重定向的出口
///
/// 调度客户端在收到 401 后通过它跳转登录页，与守卫在导航时的主动检查相互独立。
pub trait Navigator {
    fn redirect(&self, route: AppRoute);
}

/// 一次导航的最终结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 守卫放行，已进入目标路由
    Entered(AppRoute),
    /// 守卫拒绝，已替换为重定向目标
    Redirected { from: AppRoute, to: AppRoute },
    /// 在提交前已有更新的导航开始，本次被丢弃
    Superseded,
}

/// 已开始但尚未提交的导航
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNavigation {
    generation: u64,
    pub target: AppRoute,
    push: bool,
}

/// 路由器服务
///
/// 持有当前路由与导航代数。每次 `begin` 递增代数，
/// `commit` 只接受最新一代，旧的判定直接丢弃（后写者胜）。
pub struct Router<H: History> {
    session: Rc<Session>,
    history: H,
    current: Cell<AppRoute>,
    generation: Cell<u64>,
}

impl<H: History> Router<H> {
    /// 创建路由服务，当前路由从地址栏解析；调用 [`Router::start`] 之前不做守卫检查
    pub fn new(session: Rc<Session>, history: H) -> Self {
        let initial = AppRoute::from_path(&history.location());
        Self {
            session,
            history,
            current: Cell::new(initial),
            generation: Cell::new(0),
        }
    }

    pub fn current_route(&self) -> AppRoute {
        self.current.get()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// 对初始地址（刷新、深链接）执行守卫
    pub fn start(&self) -> Outcome {
        let path = self.history.location();
        let pending = self.stamp(AppRoute::from_path(&path), false);
        self.commit(pending)
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) -> Outcome {
        let pending = self.begin(path);
        self.commit(pending)
    }

    /// 开始一次导航；此前所有未提交的导航随之作废
    pub fn begin(&self, path: &str) -> PendingNavigation {
        self.stamp(AppRoute::from_path(path), true)
    }

    /// 提交导航：按提交时刻的会话执行守卫并更新 History
    pub fn commit(&self, pending: PendingNavigation) -> Outcome {
        if pending.generation != self.generation.get() {
            debug!(target_route = %pending.target, "[Router] Navigation superseded.");
            return Outcome::Superseded;
        }

        let current = self.current.get();
        let snapshot = self.session.snapshot();

        match guard::evaluate(&pending.target, Some(&current), &snapshot) {
            Decision::Proceed => {
                if pending.push {
                    self.history.push(pending.target.to_path());
                } else if pending.target != AppRoute::NotFound
                    && self.history.location() != pending.target.to_path()
                {
                    // `/` 等别名地址改写为规范路径；未知地址保持原样
                    self.history.replace(pending.target.to_path());
                }
                self.current.set(pending.target);
                debug!(route = %pending.target, "[Router] Entered.");
                Outcome::Entered(pending.target)
            }
            Decision::Redirect(to) => {
                if to.is_public() {
                    info!(from = %pending.target, "[Router] Access Denied. Redirecting to Login.");
                } else {
                    info!(from = %pending.target, "[Router] Already authenticated. Redirecting to Dashboard.");
                }
                self.history.replace(to.to_path());
                self.current.set(to);
                Outcome::Redirected {
                    from: pending.target,
                    to,
                }
            }
        }
    }

    /// 浏览器后退/前进：地址栏已经变化，只在守卫拒绝时替换
    pub fn on_history_pop(&self, path: &str) -> Outcome {
        let pending = self.stamp(AppRoute::from_path(path), false);
        self.commit(pending)
    }

    fn stamp(&self, target: AppRoute, push: bool) -> PendingNavigation {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        PendingNavigation {
            generation,
            target,
            push,
        }
    }
}

impl<H: History> Navigator for Router<H> {
    fn redirect(&self, route: AppRoute) {
        if self.current.get() == route {
            debug!(route = %route, "[Router] Redirect target is current route, skipped.");
            return;
        }
        info!(route = %route, "[Router] Redirect requested.");
        self.navigate(route.to_path());
    }
}
