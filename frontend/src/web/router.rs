//! 路由服务模块
//!
//! 把核心 crate 的 `ViewRouter` 状态机放进信号中：
//! 页面通过 `dispatch` 发出导航动作，`RouterOutlet` 按 `mounted()` 渲染。
//! 视图模式从不读写 URL。

use leptos::prelude::*;
use streamflow::{NavAction, Screen, Session, Transition, ViewRouter};

/// 路由器服务
#[derive(Clone, Copy)]
pub struct RouterService {
    state: RwSignal<ViewRouter>,
}

impl RouterService {
    fn new(initial: ViewRouter) -> Self {
        Self {
            state: RwSignal::new(initial),
        }
    }

    /// **核心方法：发出导航动作**
    ///
    /// 被拒绝的转换只记录日志，页面保持不变。
    pub fn dispatch(&self, action: NavAction) -> Option<Transition> {
        let transition = self.state.try_update(|router| router.dispatch(action))?;
        match transition {
            Transition::Moved { from, to } => log::info!("[Router] {} -> {}", from, to),
            Transition::Stayed(view) => log::debug!("[Router] stayed on {}", view),
            Transition::Blocked { from, reason } => {
                log::warn!("[Router] blocked on {}: {:?}", from, reason)
            }
        }
        Some(transition)
    }

    /// 当前会话（不追踪）
    pub fn session(&self) -> Option<Session> {
        self.state.with_untracked(|r| r.session().cloned())
    }

    pub fn update_session(&self, session: Session) {
        self.state.update(|r| r.update_session(session));
    }

    fn screen(&self) -> Option<Screen> {
        self.state.with(|r| r.mounted())
    }
}

/// 提供路由服务到 Context
pub fn provide_router(initial: ViewRouter) -> RouterService {
    let router = RouterService::new(initial);
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    expect_context::<RouterService>()
}

/// 路由出口组件
///
/// 根据当前状态渲染对应的页面。需要会话却没有会话时（令牌被拒绝后）
/// 不挂载任何页面，只留下重新登录的入口。
#[component]
pub fn RouterOutlet(
    /// 页面匹配函数：接收当前页面，返回对应视图
    matcher: fn(Screen) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let screen = Memo::new(move |_| router.screen());

    move || match screen.get() {
        Some(screen) => matcher(screen),
        None => view! {
            <div class="hero min-h-screen">
                <div class="hero-content text-center">
                    <button class="btn btn-primary" on:click=move |_| {
                        router.dispatch(NavAction::Logout);
                    }>"Log in again"</button>
                </div>
            </div>
        }
        .into_any(),
    }
}
