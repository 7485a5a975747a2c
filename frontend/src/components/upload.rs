//! 上传页
//!
//! 表单状态全部由 `UploadDraft` 持有，组件只负责把 DOM 事件转交给它。

use super::video_card::VideoCardView;
use crate::api::use_services;
use crate::web::router::use_router;
use crate::web::{probe_duration, read_upload_file};
use leptos::prelude::*;
use leptos::task::spawn_local;
use streamflow::forms::UploadDraft;
use streamflow::{NavAction, Session};
use streamflow_shared::card::VideoCard;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

/// 页面顶部的提示
#[derive(Clone, Debug, PartialEq)]
enum Notice {
    Success(String),
    Failure(String),
}

#[component]
pub fn UploadPage(session: Session) -> impl IntoView {
    let router = use_router();
    let services = use_services();

    let draft = RwSignal::new(UploadDraft::default());
    let (uploading, set_uploading) = signal(false);
    let (reading_file, set_reading_file) = signal(false);
    let (notice, set_notice) = signal(Option::<Notice>::None);
    let (catalogue, set_catalogue) = signal(Vec::<VideoCard>::new());
    let file_input = NodeRef::<leptos::html::Input>::new();

    // 上传成功后递增版本号，触发目录重新加载
    let (catalogue_version, set_catalogue_version) = signal(0u32);
    Effect::new({
        let services = services.clone();
        move |_| {
            catalogue_version.track();
            let api = services.api();
            spawn_local(async move {
                match api.list_videos().await {
                    Ok(cards) => set_catalogue.set(cards),
                    Err(e) => log::warn!("{}", e.in_op("upload.catalogue")),
                }
            });
        }
    });

    // 3秒后清除提示
    Effect::new(move |_| {
        if notice.get().is_some() {
            set_timeout(
                move || set_notice.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));

        let Some(file) = file else {
            draft.update(|d| {
                d.begin_selection();
            });
            set_reading_file.set(false);
            return;
        };

        // 后选择的文件会让之前未完成的读取与探测作废
        let selection = draft.try_update(|d| d.begin_selection());
        let Some(selection) = selection else {
            return;
        };
        set_reading_file.set(true);
        spawn_local(async move {
            match read_upload_file(&file).await {
                Ok(upload) => {
                    if draft.try_update(|d| d.set_file_for(selection, Some(upload))) != Some(true) {
                        return;
                    }
                    // 探测失败时不带 duration 字段提交
                    let duration = probe_duration(&file).await;
                    draft.try_update(|d| d.set_duration_for(selection, duration));
                }
                Err(e) => {
                    log::error!("{}", e);
                    if draft.try_update(|d| d.set_file_for(selection, None)) != Some(true) {
                        return;
                    }
                    set_notice.set(Some(Notice::Failure(e.message().to_string())));
                }
            }
            if draft.try_with_untracked(|d| d.is_current(selection)) == Some(true) {
                set_reading_file.set(false);
            }
        });
    };

    let uploader = session.user.username.clone();
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let submission = match draft.with_untracked(|d| d.validate(&uploader)) {
            Ok(submission) => submission,
            Err(e) => {
                set_notice.set(Some(Notice::Failure(e.message().to_string())));
                return;
            }
        };

        set_uploading.set(true);
        let api = services.api();
        spawn_local(async move {
            match api.upload(&submission).await {
                Ok(()) => {
                    log::info!("Uploaded '{}'", submission.title);
                    set_notice.set(Some(Notice::Success("Video uploaded successfully!".into())));
                    draft.update(|d| d.reset());
                    // 页面可能已经卸载
                    if let Some(Some(input)) = file_input.try_get_untracked() {
                        input.set_value("");
                    }
                    set_catalogue_version.update(|v| *v += 1);
                }
                Err(e) => {
                    log::error!("{}", e);
                    set_notice.set(Some(Notice::Failure("Upload failed".into())));
                }
            }
            set_uploading.set(false);
        });
    };

    view! {
        <div class="p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-6">
                {move || notice.get().map(|n| {
                    let (class, text) = match n {
                        Notice::Success(text) => ("alert alert-success shadow-lg", text),
                        Notice::Failure(text) => ("alert alert-error shadow-lg", text),
                    };
                    view! {
                        <div class="toast toast-top toast-end z-50">
                            <div class=class><span>{text}</span></div>
                        </div>
                    }
                })}

                <div class="flex items-center gap-4">
                    <button class="btn btn-ghost" on:click=move |_| {
                        router.dispatch(NavAction::Back);
                    }>"Back"</button>
                    <h1 class="text-2xl font-bold">"Upload New Content"</h1>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body space-y-4" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="upload_file">
                                <span class="label-text">"Video file"</span>
                            </label>
                            <input
                                id="upload_file"
                                type="file"
                                accept="video/*"
                                node_ref=file_input
                                on:change=on_file_change
                                class="file-input file-input-bordered w-full"
                            />
                            <Show when=move || draft.with(|d| d.duration().is_some())>
                                <label class="label">
                                    <span class="label-text-alt text-base-content/50">
                                        {move || format!("Duration: {:.0}s", draft.with(|d| d.duration().unwrap_or_default()))}
                                    </span>
                                </label>
                            </Show>
                        </div>
                        <div class="form-control">
                            <label class="label" for="upload_title">
                                <span class="label-text">"Title"</span>
                            </label>
                            <input
                                id="upload_title"
                                type="text"
                                prop:value=move || draft.with(|d| d.title().to_string())
                                on:input=move |ev| draft.update(|d| d.set_title(&event_target_value(&ev)))
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="upload_description">
                                <span class="label-text">"Description"</span>
                            </label>
                            <textarea
                                id="upload_description"
                                prop:value=move || draft.with(|d| d.description().to_string())
                                on:input=move |ev| draft.update(|d| d.set_description(&event_target_value(&ev)))
                                class="textarea textarea-bordered w-full"
                            ></textarea>
                        </div>
                        <div class="card-actions justify-end">
                            <button
                                class="btn btn-primary"
                                disabled=move || uploading.get() || reading_file.get() || !draft.with(|d| d.can_submit())
                            >
                                {move || if uploading.get() {
                                    view! { <span class="loading loading-spinner"></span> "Uploading..." }.into_any()
                                } else {
                                    "Upload".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                <h2 class="text-xl font-bold">"Current videos"</h2>
                <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
                    <For
                        each=move || catalogue.get()
                        key=|card| card.id.clone()
                        children=|card| view! { <VideoCardView card=card /> }
                    />
                </div>
            </div>
        </div>
    }
}
