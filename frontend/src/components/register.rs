use crate::api::MesaApi;
use crate::auth::use_auth;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mesa_shared::{Restaurant, WebSettings};

/// Registration creates a restaurant account via `POST /restaurants`.
/// This page stays reachable whether or not a session exists.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = MesaApi::new(use_auth());
    let router = use_router();

    let name = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let city = RwSignal::new(String::new());
    let country = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if name.get().is_empty() || username.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Name, username and password are required".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let restaurant = Restaurant {
                id: None,
                name: name.get_untracked(),
                address: address.get_untracked(),
                city: city.get_untracked(),
                country: country.get_untracked(),
                username: username.get_untracked(),
                password: Some(password.get_untracked()),
                web_settings: WebSettings::default(),
            };
            match api.create_restaurant(&restaurant).await {
                Ok(_) => router.navigate("/auth/login"),
                Err(err) => set_error_msg.set(Some(err.message)),
            }
            set_is_submitting.set(false);
        });
    };

    let to_login = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate("/auth/login");
    };

    let text_field = move |id: &'static str,
                           label: &'static str,
                           input_type: &'static str,
                           value: RwSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=input_type
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=value
                    class="input input-bordered"
                />
            </div>
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create your account"</h1>
                    <p class="text-base-content/70">"Register a restaurant to use the dashboard"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        {text_field("name", "Restaurant name", "text", name)}
                        {text_field("address", "Address", "text", address)}
                        {text_field("city", "City", "text", city)}
                        {text_field("country", "Country", "text", country)}
                        {text_field("reg-username", "Username", "text", username)}
                        {text_field("reg-password", "Password", "password", password)}

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                                } else {
                                    "Create account".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already registered? "
                            <a href="/auth/login" class="link link-primary" on:click=to_login>
                                "Sign in"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
