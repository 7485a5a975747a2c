use crate::api::use_services;
use crate::auth::sign_in;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use streamflow::forms::RegisterForm;
use streamflow::{NavAction, Session};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let router = use_router();
    let services = use_services();

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = RegisterForm {
            username: username.get(),
            email: email.get(),
            password: password.get(),
        };
        let req = match form.validate() {
            Ok(req) => req,
            Err(e) => {
                set_error_msg.set(Some(e.to_string()));
                return;
            }
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = services.api();
        spawn_local(async move {
            match api.register(&req).await {
                Ok(resp) => sign_in(&router, Session::from(resp)),
                Err(e) => {
                    log::error!("{}", e);
                    set_error_msg.set(Some(e.message().to_string()));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Register"</h1>
                    <p class="text-base-content/70">"Create an account to start sharing videos"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="reg_username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="reg_username"
                                type="text"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="reg_email"
                                type="email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="reg_password"
                                type="password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already have an account? "
                            <a class="link link-primary" on:click=move |_| {
                                router.dispatch(NavAction::SwitchToLogin);
                            }>"Login"</a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
