use leptos::prelude::*;
use streamflow_shared::card::VideoCard;
use streamflow_shared::date::format_count;

/// 列表中的一张视频卡片
///
/// 只有传入 `on_select` 时卡片才可点击。
#[component]
pub fn VideoCardView(
    card: VideoCard,
    #[prop(optional)] on_select: Option<Callback<VideoCard>>,
) -> impl IntoView {
    let views = format!("{} views", format_count(card.views));
    let has_thumbnail = !card.thumbnail.is_empty();
    let thumbnail = card.thumbnail.clone();
    let src = card.src.clone();
    let title = card.title.clone();
    let author = card.author.clone();
    let description = card.description.clone();

    view! {
        <div
            class=if on_select.is_some() {
                "card bg-base-100 shadow-md hover:shadow-xl cursor-pointer transition-shadow"
            } else {
                "card bg-base-100 shadow-md"
            }
            on:click=move |_| {
                if let Some(on_select) = on_select {
                    on_select.run(card.clone());
                }
            }
        >
            <figure class="aspect-video bg-base-300">
                {if has_thumbnail {
                    view! { <img src=thumbnail alt=title.clone() class="w-full h-full object-cover" /> }.into_any()
                } else {
                    view! { <video src=src preload="metadata" muted=true class="w-full h-full object-cover"></video> }.into_any()
                }}
            </figure>
            <div class="card-body p-4">
                <h3 class="card-title text-base">{title}</h3>
                <p class="text-sm text-base-content/70">{author}</p>
                <p class="text-xs text-base-content/50">{views}</p>
                <p class="text-sm line-clamp-2">{description}</p>
            </div>
        </div>
    }
}
