use crate::api::MesaApi;
use crate::auth::use_auth;
use crate::components::layout::DashboardShell;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mesa_shared::{Restaurant, WebSettings};

#[derive(Clone, Copy)]
struct SettingsFormState {
    name: RwSignal<String>,
    address: RwSignal<String>,
    city: RwSignal<String>,
    country: RwSignal<String>,
    primary_colour: RwSignal<String>,
    background_colour: RwSignal<String>,
}

impl SettingsFormState {
    fn from_profile(profile: &Restaurant) -> Self {
        Self {
            name: RwSignal::new(profile.name.clone()),
            address: RwSignal::new(profile.address.clone()),
            city: RwSignal::new(profile.city.clone()),
            country: RwSignal::new(profile.country.clone()),
            primary_colour: RwSignal::new(profile.web_settings.primary_colour.clone()),
            background_colour: RwSignal::new(profile.web_settings.background_colour.clone()),
        }
    }

    fn to_restaurant(&self, profile: &Restaurant) -> Restaurant {
        Restaurant {
            id: profile.id,
            name: self.name.get(),
            address: self.address.get(),
            city: self.city.get(),
            country: self.country.get(),
            username: profile.username.clone(),
            password: None,
            web_settings: WebSettings {
                primary_colour: self.primary_colour.get(),
                background_colour: self.background_colour.get(),
                ..profile.web_settings.clone()
            },
        }
    }
}

/// Profile of the authenticated restaurant, loaded from
/// `GET /restaurants/profile` and saved with `PUT /restaurants/{id}`.
#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = use_auth();
    let api = MesaApi::new(auth);

    let profile = RwSignal::new(Option::<Restaurant>::None);
    let (loading, set_loading) = signal(true);
    let saving = RwSignal::new(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    Effect::new(move |_| {
        let session = auth.state.get();
        if session.is_loading || !session.is_authenticated() {
            return;
        }
        set_loading.set(true);
        spawn_local(async move {
            match api.get_restaurant_profile().await {
                Ok(data) => {
                    profile.set(Some(data));
                    set_error_msg.set(None);
                }
                Err(err) => set_error_msg.set(Some(err.message)),
            }
            set_loading.set(false);
        });
    });

    let on_save = move |updated: Restaurant| {
        // Without a persisted id there is nothing to PUT against.
        let Some(id) = profile.with_untracked(|p| p.as_ref().and_then(|r| r.id)) else {
            set_error_msg.set(Some(
                "Could not identify the restaurant to update.".to_string(),
            ));
            return;
        };

        saving.set(true);
        set_success_msg.set(None);
        set_error_msg.set(None);
        spawn_local(async move {
            match api.update_restaurant(id, &updated).await {
                Ok(_) => {
                    // Keep the submitted values, as everywhere else.
                    profile.set(Some(updated));
                    set_success_msg.set(Some("Settings saved.".to_string()));
                }
                Err(err) => set_error_msg.set(Some(err.message)),
            }
            saving.set(false);
        });
    };

    view! {
        <DashboardShell>
            <header class="mb-8">
                <h1 class="text-3xl font-bold mb-2">"Settings"</h1>
                <p class="text-base-content/70">"Your restaurant profile and storefront appearance"</p>
            </header>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error mb-6">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>
            <Show when=move || success_msg.get().is_some()>
                <div role="alert" class="alert alert-success mb-6">
                    <span>{move || success_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || loading.get() && profile.with(|p| p.is_none())>
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || profile.with(|p| p.is_some())>
                {move || {
                    profile
                        .get_untracked()
                        .map(|initial| {
                            view! { <SettingsForm initial=initial on_save=on_save saving=saving /> }
                        })
                }}
            </Show>
        </DashboardShell>
    }
}

#[component]
fn SettingsForm(
    initial: Restaurant,
    #[prop(into)] on_save: Callback<Restaurant>,
    saving: RwSignal<bool>,
) -> impl IntoView {
    let state = SettingsFormState::from_profile(&initial);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_save.run(state.to_restaurant(&initial));
    };

    let field = move |id: &'static str, label: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type="text"
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=value
                    class="input input-bordered"
                />
            </div>
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">"Profile"</h3>
                {field("s-name", "Name", state.name)}
                {field("s-address", "Address", state.address)}
                {field("s-city", "City", state.city)}
                {field("s-country", "Country", state.country)}
                <div class="divider">"Appearance"</div>
                {field("s-primary", "Primary colour", state.primary_colour)}
                {field("s-background", "Background colour", state.background_colour)}
                <div class="card-actions justify-end mt-4">
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save settings" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
