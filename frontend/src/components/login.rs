use crate::auth::{login, use_auth};
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mesa_shared::protocol::LoginRequest;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if username.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        // Submit stays disabled while the call is in flight; the store does
        // not deduplicate concurrent logins.
        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let credentials = LoginRequest {
                username: username.get_untracked(),
                password: password.get_untracked(),
            };
            if login(&auth, credentials).await {
                router.navigate("/dashboard");
            } else {
                let message = auth
                    .state
                    .get_untracked()
                    .error()
                    .unwrap_or("Authentication failed. Check your credentials and try again.")
                    .to_string();
                set_error_msg.set(Some(message));
            }
            set_is_submitting.set(false);
        });
    };

    let to_register = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate("/auth/register");
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Mesa Dashboard"</h1>
                    <p class="text-base-content/70">"Sign in to manage your restaurant"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                placeholder="restaurant"
                                autocomplete="username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                autocomplete="current-password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "No account yet? "
                            <a href="/auth/register" class="link link-primary" on:click=to_register>
                                "Register your restaurant"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
