use crate::api::use_services;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use streamflow::profile::{ProfileLists, ProfileVideo, load_profile_lists};
use streamflow::{NavAction, Session};
use streamflow_shared::date::format_count;

#[component]
fn VideoGrid(title: &'static str, videos: Signal<Vec<ProfileVideo>>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">{title}</h3>
                <Show
                    when=move || videos.with(|v| !v.is_empty())
                    fallback=|| view! { <p class="text-base-content/50">"Nothing here yet."</p> }
                >
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                        <For
                            each=move || videos.get()
                            key=|video| video.id.clone()
                            children=|video| {
                                let stats = format!(
                                    "{} likes • {} views",
                                    format_count(video.likes),
                                    format_count(video.views)
                                );
                                let comment = video.first_comment.map(|text| view! {
                                    <p class="text-xs italic text-base-content/60">"\u{201C}" {text} "\u{201D}"</p>
                                });
                                view! {
                                    <div class="space-y-1">
                                        <img src=video.thumbnail alt=video.title.clone() class="w-full aspect-video object-cover rounded" />
                                        <p class="text-sm font-medium">{video.title}</p>
                                        <p class="text-xs text-base-content/50">{stats}</p>
                                        {comment}
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
pub fn ProfilePage(session: Session) -> impl IntoView {
    let router = use_router();
    let services = use_services();

    let (lists, set_lists) = signal(ProfileLists::default());
    let (loading, set_loading) = signal(true);

    let api = services.api();
    let username = session.user.username.clone();
    spawn_local(async move {
        set_lists.set(load_profile_lists(&api, &username).await);
        set_loading.set(false);
    });

    let uploads = Signal::derive(move || lists.with(|l| l.uploads.clone()));
    let engaged = Signal::derive(move || lists.with(|l| l.engaged.clone()));

    view! {
        <div class="p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-6">
                <div class="flex items-center gap-4">
                    <button class="btn btn-ghost" on:click=move |_| {
                        router.dispatch(NavAction::Back);
                    }>"Back"</button>
                    <h1 class="text-2xl font-bold">{session.user.username.clone()}</h1>
                </div>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <div class="flex justify-center py-8"><span class="loading loading-spinner loading-lg text-primary"></span></div> }
                >
                    <VideoGrid title="My uploads" videos=uploads />
                    <VideoGrid title="Liked & commented" videos=engaged />
                </Show>
            </div>
        </div>
    }
}
