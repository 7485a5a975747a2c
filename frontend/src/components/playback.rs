use crate::api::use_services;
use crate::web::VideoElement;
use crate::web::router::use_router;
use futures::StreamExt;
use leptos::ev;
use leptos::html::Video;
use leptos::prelude::*;
use leptos::task::spawn_local;
use streamflow::NavAction;
use streamflow::playback::{MediaControl, handle_key, is_text_entry};
use streamflow::social::{SocialPanel, SocialState};
use streamflow_shared::card::VideoCard;
use streamflow_shared::date::format_count;
use wasm_bindgen::JsCast;

#[component]
pub fn PlaybackPage(video: VideoCard) -> impl IntoView {
    let router = use_router();
    let services = use_services();

    let (likes, set_likes) = signal(0u64);
    let (comments, set_comments) = signal(Vec::<String>::new());
    let (comment_text, set_comment_text) = signal(String::new());
    let (social_error, set_social_error) = signal(Option::<String>::None);

    let (panel, mut failures) = SocialPanel::new(services.api(), &video.id);

    // 异步任务在页面卸载后才可能完成，只通过信号写回，卸载后写入为空操作
    let apply = move |state: SocialState| {
        set_likes.set(state.likes);
        set_comments.set(state.comments);
    };

    // 社交操作失败只做提示，不阻塞页面
    spawn_local(async move {
        while let Some(failure) = failures.next().await {
            set_social_error.set(Some(format!("Could not {}: {}", failure.action, failure.message)));
        }
    });

    // 尽力加载点赞数与评论
    {
        let panel = panel.clone();
        spawn_local(async move {
            panel.load().await;
            apply(panel.state());
        });
    }

    // 挂载后从 0 开始播放
    let video_ref = NodeRef::<Video>::new();
    Effect::new(move |_| {
        if let Some(el) = video_ref.get() {
            let media = VideoElement(el);
            media.set_current_time(0.0);
            media.play();
        }
    });

    // 快捷键绑定在 window 上，焦点在输入框中时不处理
    let keydown = window_event_listener(ev::keydown, move |ev| {
        let in_text_field = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .is_some_and(|el| is_text_entry(&el.tag_name()));
        if in_text_field {
            return;
        }
        if let Some(Some(el)) = video_ref.try_get_untracked() {
            if handle_key(&VideoElement(el), &ev.key()) {
                ev.prevent_default();
            }
        }
    });
    on_cleanup(move || keydown.remove());

    // 事件处理函数只在页面挂载期间触发
    let panel = StoredValue::new_local(panel);

    let on_play = move |_| {
        if let Some(record) = panel.with_value(|p| p.on_play()) {
            spawn_local(record);
        }
    };

    let on_like = move |_| {
        let (pending, state) = panel.with_value(|p| (p.like(), p.state()));
        apply(state);
        spawn_local(async move {
            let _ = pending.await;
        });
    };

    let on_comment = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = comment_text.get_untracked();
        let panel = panel.with_value(|p| p.clone());
        spawn_local(async move {
            if let Ok(true) = panel.comment(&text).await {
                set_comment_text.set(String::new());
                apply(panel.state());
            }
        });
    };

    let title = video.title.clone();
    let author = video.author.clone();
    let description = video.description.clone();
    let views = format_count(video.views);

    view! {
        <div class="p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-6">
                <div class="flex gap-2">
                    <button class="btn btn-ghost" on:click=move |_| {
                        router.dispatch(NavAction::Back);
                    }>"Back to videos"</button>
                    <button class="btn btn-ghost" on:click=move |_| {
                        router.dispatch(NavAction::GoDashboard);
                    }>"Dashboard"</button>
                </div>

                <video
                    node_ref=video_ref
                    src=video.src.clone()
                    controls=true
                    class="w-full rounded-box bg-black"
                    on:play=on_play
                ></video>

                <div class="space-y-2">
                    <h1 class="text-2xl font-bold">{title}</h1>
                    <p class="text-base-content/70">{author} " · " {views} " views"</p>
                    <p>{description}</p>
                </div>

                <div class="flex items-center gap-4">
                    <button class="btn btn-primary" on:click=on_like>
                        "Like " {move || format_count(likes.get())}
                    </button>
                    <Show when=move || social_error.get().is_some()>
                        <span class="text-sm text-warning">{move || social_error.get().unwrap_or_default()}</span>
                    </Show>
                </div>

                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">"Comments"</h3>
                        <form class="flex gap-2" on:submit=on_comment>
                            <input
                                type="text"
                                placeholder="Add a comment..."
                                class="input input-bordered w-full"
                                prop:value=comment_text
                                on:input=move |ev| set_comment_text.set(event_target_value(&ev))
                            />
                            <button class="btn">"Post"</button>
                        </form>
                        <ul class="space-y-2">
                            <For
                                each=move || comments.get().into_iter().enumerate()
                                key=|(i, _)| *i
                                children=move |(_, text)| view! { <li class="p-2 bg-base-200 rounded">{text}</li> }
                            />
                        </ul>
                    </div>
                </div>
            </div>
        </div>
    }
}
