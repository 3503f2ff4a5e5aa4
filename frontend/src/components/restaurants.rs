use crate::api::MesaApi;
use crate::auth::use_auth;
use crate::components::layout::DashboardShell;
use crate::controller::{CrudController, Mode};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mesa_shared::{Restaurant, WebSettings};

/// Form bindings. All fields are `RwSignal` so the struct stays `Copy` and
/// can be passed around freely (same pattern as the other entity forms).
#[derive(Clone, Copy)]
struct RestaurantFormState {
    name: RwSignal<String>,
    address: RwSignal<String>,
    city: RwSignal<String>,
    country: RwSignal<String>,
    username: RwSignal<String>,
    web_settings: RwSignal<WebSettings>,
}

impl RestaurantFormState {
    /// Copies the selected restaurant into the form; editing these signals
    /// cannot touch the list entry until a save succeeds.
    fn from_initial(initial: Option<&Restaurant>) -> Self {
        Self {
            name: RwSignal::new(initial.map(|r| r.name.clone()).unwrap_or_default()),
            address: RwSignal::new(initial.map(|r| r.address.clone()).unwrap_or_default()),
            city: RwSignal::new(initial.map(|r| r.city.clone()).unwrap_or_default()),
            country: RwSignal::new(initial.map(|r| r.country.clone()).unwrap_or_default()),
            username: RwSignal::new(initial.map(|r| r.username.clone()).unwrap_or_default()),
            web_settings: RwSignal::new(
                initial.map(|r| r.web_settings.clone()).unwrap_or_default(),
            ),
        }
    }

    fn to_restaurant(&self) -> Restaurant {
        Restaurant {
            id: None,
            name: self.name.get(),
            address: self.address.get(),
            city: self.city.get(),
            country: self.country.get(),
            username: self.username.get(),
            password: None,
            web_settings: self.web_settings.get(),
        }
    }
}

#[component]
fn RestaurantForm(
    ctrl: RwSignal<CrudController<Restaurant>>,
    #[prop(into)] on_save: Callback<Restaurant>,
    saving: RwSignal<bool>,
) -> impl IntoView {
    let state = RestaurantFormState::from_initial(
        ctrl.with_untracked(|c| c.selected().cloned()).as_ref(),
    );
    let is_update = ctrl.with_untracked(|c| c.editing_id()).is_some();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_save.run(state.to_restaurant());
    };
    let on_cancel = move |_| ctrl.update(|c| c.cancel());

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
                <h3 class="card-title">
                    {if is_update { "Edit restaurant" } else { "Add restaurant" }}
                </h3>
                {field("r-name", "Name", state.name)}
                {field("r-address", "Address", state.address)}
                {field("r-city", "City", state.city)}
                {field("r-country", "Country", state.country)}
                {field("r-username", "Username", state.username)}
                <div class="card-actions justify-end mt-4">
                    <button type="button" class="btn btn-ghost" on:click=on_cancel>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[component]
pub fn RestaurantsPage() -> impl IntoView {
    let auth = use_auth();
    let api = MesaApi::new(auth);
    let ctrl = RwSignal::new(CrudController::<Restaurant>::new());
    let saving = RwSignal::new(false);

    let load = move || {
        ctrl.update(|c| c.load_started());
        spawn_local(async move {
            let result = api.get_restaurants().await.map_err(|e| e.message);
            ctrl.update(|c| c.load_finished(result));
        });
    };

    // Fetch on mount and whenever the session becomes authenticated.
    Effect::new(move |_| {
        let session = auth.state.get();
        if !session.is_loading && session.is_authenticated() {
            load();
        }
    });

    let on_save = move |restaurant: Restaurant| {
        saving.set(true);
        spawn_local(async move {
            match ctrl.with_untracked(|c| c.editing_id()) {
                Some(id) => match api.update_restaurant(id, &restaurant).await {
                    // The list keeps the submitted form values, not the echo.
                    Ok(_) => ctrl.update(|c| c.update_saved(id, restaurant)),
                    Err(err) => ctrl.update(|c| c.save_failed(err.message)),
                },
                None => match api.create_restaurant(&restaurant).await {
                    Ok(created) => ctrl.update(|c| c.create_saved(created)),
                    Err(err) => ctrl.update(|c| c.save_failed(err.message)),
                },
            }
            saving.set(false);
        });
    };

    let is_empty = move || ctrl.with(|c| c.items().is_empty());
    let is_loading = move || ctrl.with(|c| c.is_loading());

    view! {
        <DashboardShell>
            <header class="mb-8">
                <h1 class="text-3xl font-bold mb-2">"Restaurants"</h1>
                <p class="text-base-content/70">"View and manage restaurant records"</p>
            </header>

            <Show when=move || ctrl.with(|c| c.error().is_some())>
                <div role="alert" class="alert alert-error mb-6">
                    <span>{move || ctrl.with(|c| c.error().unwrap_or_default().to_string())}</span>
                </div>
            </Show>

            <Show when=move || ctrl.with(|c| c.mode() == Mode::Edit)>
                <RestaurantForm ctrl=ctrl on_save=on_save saving=saving />
            </Show>

            <Show when=move || ctrl.with(|c| c.mode() == Mode::List)>
                <div class="mb-6">
                    <button class="btn btn-primary" on:click=move |_| ctrl.update(|c| c.create_new())>
                        "Add restaurant"
                    </button>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0 overflow-x-auto">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Address"</th>
                                    <th class="hidden md:table-cell">"City"</th>
                                    <th class="hidden md:table-cell">"Country"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || is_loading() && is_empty()>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Loading..."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || !is_loading() && is_empty()>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            "No restaurants yet. Add one to get started."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || ctrl.with(|c| c.items().to_vec())
                                    key=|r| r.id
                                    children=move |restaurant| {
                                        let row = restaurant.clone();
                                        view! {
                                            <tr>
                                                <td class="font-bold">{restaurant.name.clone()}</td>
                                                <td>{restaurant.address.clone()}</td>
                                                <td class="hidden md:table-cell">{restaurant.city.clone()}</td>
                                                <td class="hidden md:table-cell">{restaurant.country.clone()}</td>
                                                <td class="text-right">
                                                    <button
                                                        class="btn btn-ghost btn-sm"
                                                        on:click=move |_| ctrl.update(|c| c.select(&row))
                                                    >
                                                        "Edit"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </Show>
        </DashboardShell>
    }
}
