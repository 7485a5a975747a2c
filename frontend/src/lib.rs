//! StreamFlow 前端应用
//!
//! 所有客户端逻辑都位于不依赖 DOM 的 `streamflow` crate，这里只做绑定：
//! - `web`: 核心 trait 的浏览器实现（fetch、LocalStorage、setTimeout、`<video>`）
//! - `web::router`: 视图状态机的信号封装
//! - `auth`: 会话持久化
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod dashboard;
    pub mod login;
    pub mod playback;
    pub mod profile;
    pub mod register;
    pub mod search;
    pub mod upload;
    mod video_card;
}
mod console;
mod web;

use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::playback::PlaybackPage;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::search::SearchPage;
use crate::components::upload::UploadPage;

use leptos::prelude::*;
use streamflow::{AppConfig, Screen, ViewRouter};
use web::router::{RouterOutlet, provide_router};

pub use console::init as init_logging;
pub use web::WindowEnv;

/// 页面匹配函数
///
/// 根据状态机给出的 Screen 返回对应的视图组件。
fn screen_matcher(screen: Screen) -> AnyView {
    match screen {
        Screen::Login => view! { <LoginPage /> }.into_any(),
        Screen::Register => view! { <RegisterPage /> }.into_any(),
        Screen::Dashboard(session) => view! { <DashboardPage session=session /> }.into_any(),
        Screen::Profile(session) => view! { <ProfilePage session=session /> }.into_any(),
        Screen::Upload(session) => view! { <UploadPage session=session /> }.into_any(),
        Screen::Search(_) => view! { <SearchPage /> }.into_any(),
        Screen::Playback { video, .. } => view! { <PlaybackPage video=video /> }.into_any(),
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(&config.app_name);
    }

    // 1. 提供运行时配置
    api::provide_services(config);

    // 2. 从 LocalStorage 恢复会话，决定初始页面
    let router = ViewRouter::from_restore(auth::restore_session());

    // 3. 提供路由服务
    provide_router(router);

    view! {
        <div class="min-h-screen bg-base-200">
            <RouterOutlet matcher=screen_matcher />
        </div>
    }
}
