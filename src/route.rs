//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM。
//! 路由表是静态配置，启动时加载一次，之后不可变。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    /// 登录页面（唯一的公开路由）
    Login,
    /// 仪表盘（首页）
    Dashboard,
    /// 节点管理
    Nodes,
    /// 防火墙规则
    FirewallRules,
    /// 系统设置
    Settings,
    /// 页面未找到
    NotFound,
}

/// 菜单元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: &'static str,
    pub icon: &'static str,
}

/// 路由描述符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub route: AppRoute,
    pub path: &'static str,
    pub name: &'static str,
    pub is_public: bool,
    pub meta: Option<RouteMeta>,
}

/// 路由表
pub static ROUTES: [RouteDescriptor; 5] = [
    RouteDescriptor {
        route: AppRoute::Login,
        path: "/login",
        name: "Login",
        is_public: true,
        meta: None,
    },
    RouteDescriptor {
        route: AppRoute::Dashboard,
        path: "/dashboard",
        name: "Dashboard",
        is_public: false,
        meta: Some(RouteMeta {
            title: "Dashboard",
            icon: "Odometer",
        }),
    },
    RouteDescriptor {
        route: AppRoute::Nodes,
        path: "/nodes",
        name: "Nodes",
        is_public: false,
        meta: Some(RouteMeta {
            title: "Nodes",
            icon: "Share",
        }),
    },
    RouteDescriptor {
        route: AppRoute::FirewallRules,
        path: "/firewall-rules",
        name: "FirewallRules",
        is_public: false,
        meta: Some(RouteMeta {
            title: "Firewall Rules",
            icon: "Shield",
        }),
    },
    RouteDescriptor {
        route: AppRoute::Settings,
        path: "/settings",
        name: "Settings",
        is_public: false,
        meta: Some(RouteMeta {
            title: "Settings",
            icon: "Setting",
        }),
    },
];

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 查询串与片段被忽略；`/` 是布局根，静态重定向到仪表盘。
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::Dashboard;
        }
        ROUTES
            .iter()
            .find(|d| d.path == trimmed)
            .map(|d| d.route)
            .unwrap_or(Self::NotFound)
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self.descriptor() {
            Some(d) => d.path,
            None => "/404",
        }
    }

    pub fn descriptor(&self) -> Option<&'static RouteDescriptor> {
        ROUTES.iter().find(|d| d.route == *self)
    }

    /// 只有登录页是公开的
    pub fn is_public(&self) -> bool {
        self.descriptor().is_some_and(|d| d.is_public)
    }

    /// **核心守卫属性：该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !self.is_public()
    }

    pub fn title(&self) -> Option<&'static str> {
        self.descriptor().and_then(|d| d.meta).map(|m| m.title)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 已认证用户访问登录页时的重定向目标（首页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 侧边菜单：带元数据的受保护路由，按路由表顺序
pub fn menu() -> impl Iterator<Item = &'static RouteDescriptor> {
    ROUTES.iter().filter(|d| !d.is_public && d.meta.is_some())
}
