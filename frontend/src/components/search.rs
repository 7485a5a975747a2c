use super::video_card::VideoCardView;
use crate::api::use_services;
use crate::web::router::use_router;
use crate::web::{BrowserScheduler, BrowserSpawner};
use leptos::prelude::*;
use streamflow::NavAction;
use streamflow::search::{
    EMPTY_RESULTS, ResultSource, SearchController, SearchService, SearchUpdate,
};
use streamflow_shared::card::VideoCard;
use streamflow_shared::protocol::SearchMode;

#[component]
pub fn SearchPage() -> impl IntoView {
    let router = use_router();
    let services = use_services();

    let (query, set_query) = signal(String::new());
    let (videos, set_videos) = signal(Vec::<VideoCard>::new());
    let (source, set_source) = signal(ResultSource::Recommended);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<&'static str>::None);

    let controller = SearchController::new(
        SearchService::new(services.api(), SearchMode::default()),
        BrowserScheduler,
        BrowserSpawner,
        move |update| match update {
            SearchUpdate::Loading => set_loading.set(true),
            SearchUpdate::Loaded(results) => {
                set_error_msg.set(None);
                set_source.set(results.source);
                set_videos.set(results.videos);
                set_loading.set(false);
            }
            SearchUpdate::Failed(message) => {
                set_error_msg.set(Some(message));
                set_loading.set(false);
            }
        },
    );
    controller.load_initial();

    // 控制器持有 Rc 与定时器，只能存放在本地 arena 中
    let controller = StoredValue::new_local(controller);

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        set_query.set(value.clone());
        controller.with_value(|c| c.on_input(&value));
    };

    let on_select = Callback::new(move |card: VideoCard| {
        router.dispatch(NavAction::SelectVideo(card));
    });

    view! {
        <div class="p-4 md:p-8">
            <div class="max-w-7xl mx-auto space-y-6">
                <div class="flex items-center gap-4">
                    <button class="btn btn-ghost" on:click=move |_| {
                        router.dispatch(NavAction::Back);
                    }>"Back"</button>
                    <input
                        type="search"
                        placeholder="Search videos..."
                        class="input input-bordered w-full"
                        prop:value=query
                        on:input=on_input
                    />
                </div>

                <h2 class="text-2xl font-bold">{move || source.get().heading()}</h2>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <div class="flex justify-center py-8"><span class="loading loading-spinner loading-lg text-primary"></span></div> }
                >
                    <Show
                        when=move || videos.with(|v| !v.is_empty())
                        fallback=|| view! { <p class="text-center text-base-content/50 py-8">{EMPTY_RESULTS}</p> }
                    >
                        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
                            <For
                                each=move || videos.get()
                                key=|card| card.id.clone()
                                children=move |card| view! { <VideoCardView card=card on_select=on_select /> }
                            />
                        </div>
                    </Show>
                </Show>
            </div>
        </div>
    }
}
