use crate::api::use_services;
use crate::auth::{expire, logout, refresh};
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use streamflow::profile::{ProfileSummary, refresh_session};
use streamflow::{NavAction, Session};

#[component]
pub fn DashboardPage(session: Session) -> impl IntoView {
    let router = use_router();
    let services = use_services();

    let summary = ProfileSummary::from_session(&session);
    let (refreshing, set_refreshing) = signal(false);
    let (notification, set_notification) = signal(Option::<String>::None);

    let on_refresh = move |_| {
        let Some(current) = router.session() else {
            return;
        };
        let api = services.api();
        set_refreshing.set(true);
        spawn_local(async move {
            match refresh_session(&api, &current).await {
                Ok(updated) => refresh(&router, updated),
                Err(e) if e.is_unauthorized() => {
                    log::error!("{}", e);
                    expire(&router);
                }
                Err(e) => {
                    // 失败时保留原来的资料
                    log::error!("{}", e);
                    set_notification.set(Some(e.message().to_string()));
                }
            }
            set_refreshing.set(false);
        });
    };

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <div class="p-4 md:p-8 font-sans">
            <div class="max-w-3xl mx-auto space-y-8">
                <Show when=move || notification.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class="alert alert-error shadow-lg">
                            <span>{move || notification.get().unwrap_or_default()}</span>
                        </div>
                    </div>
                </Show>

                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1">
                        <a class="btn btn-ghost text-xl">{summary.greeting.clone()}</a>
                    </div>
                    <div class="flex-none gap-2">
                        <button on:click=move |_| logout(&router) class="btn btn-outline btn-error">
                            "Logout"
                        </button>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Your Profile"</h3>
                        <table class="table">
                            <tbody>
                                <tr><th>"User ID"</th><td>{summary.id.clone()}</td></tr>
                                <tr><th>"Email"</th><td>{summary.email.clone()}</td></tr>
                                <tr><th>"Member since"</th><td>{summary.member_since.clone()}</td></tr>
                                <tr><th>"Last login"</th><td>{summary.last_login.clone()}</td></tr>
                            </tbody>
                        </table>
                        <div class="card-actions justify-end">
                            <button on:click=on_refresh disabled=move || refreshing.get() class="btn btn-ghost">
                                {move || if refreshing.get() { "Refreshing..." } else { "Refresh Profile" }}
                            </button>
                        </div>
                    </div>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <button class="btn btn-primary" on:click=move |_| {
                        router.dispatch(NavAction::ViewProfile);
                    }>"My Profile"</button>
                    <button class="btn btn-secondary" on:click=move |_| {
                        router.dispatch(NavAction::GoToUpload);
                    }>"Upload New Content"</button>
                    <button class="btn btn-accent" on:click=move |_| {
                        router.dispatch(NavAction::WatchVideos);
                    }>"Watch videos"</button>
                </div>
            </div>
        </div>
    }
}
