use crate::api::MesaApi;
use crate::auth::use_auth;
use crate::components::layout::DashboardShell;
use crate::controller::{CrudController, Mode};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mesa_shared::{Menu, MenuSections};

#[derive(Clone, Copy)]
struct MenuFormState {
    name: RwSignal<String>,
    menu_type: RwSignal<String>,
    collapse: RwSignal<bool>,
    restaurant_id: RwSignal<String>,
    /// Sections ride along unchanged; the form does not edit them.
    sections: RwSignal<MenuSections>,
}

impl MenuFormState {
    fn from_initial(initial: Option<&Menu>) -> Self {
        Self {
            name: RwSignal::new(initial.map(|m| m.name.clone()).unwrap_or_default()),
            menu_type: RwSignal::new(initial.map(|m| m.menu_type.clone()).unwrap_or_default()),
            collapse: RwSignal::new(initial.map(|m| m.collapse == 1).unwrap_or(false)),
            restaurant_id: RwSignal::new(
                initial.map(|m| m.restaurant_id.to_string()).unwrap_or_default(),
            ),
            sections: RwSignal::new(initial.map(|m| m.sections.clone()).unwrap_or_default()),
        }
    }

    fn to_menu(&self) -> Menu {
        Menu {
            id: None,
            restaurant_id: self.restaurant_id.get().trim().parse().unwrap_or(0),
            name: self.name.get(),
            menu_type: self.menu_type.get(),
            collapse: if self.collapse.get() { 1 } else { 0 },
            sections: self.sections.get(),
        }
    }
}

#[component]
fn MenuForm(
    ctrl: RwSignal<CrudController<Menu>>,
    #[prop(into)] on_save: Callback<Menu>,
    saving: RwSignal<bool>,
) -> impl IntoView {
    let state =
        MenuFormState::from_initial(ctrl.with_untracked(|c| c.selected().cloned()).as_ref());
    let is_update = ctrl.with_untracked(|c| c.editing_id()).is_some();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_save.run(state.to_menu());
    };
    let on_cancel = move |_| ctrl.update(|c| c.cancel());

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">{if is_update { "Edit menu" } else { "Add menu" }}</h3>
                <div class="form-control">
                    <label class="label" for="m-name">
                        <span class="label-text">"Name"</span>
                    </label>
                    <input
                        id="m-name"
                        type="text"
                        on:input=move |ev| state.name.set(event_target_value(&ev))
                        prop:value=state.name
                        class="input input-bordered"
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="m-type">
                        <span class="label-text">"Type"</span>
                    </label>
                    <input
                        id="m-type"
                        type="text"
                        placeholder="lunch, dinner, drinks..."
                        on:input=move |ev| state.menu_type.set(event_target_value(&ev))
                        prop:value=state.menu_type
                        class="input input-bordered"
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="m-restaurant">
                        <span class="label-text">"Restaurant id"</span>
                    </label>
                    <input
                        id="m-restaurant"
                        type="number"
                        on:input=move |ev| state.restaurant_id.set(event_target_value(&ev))
                        prop:value=state.restaurant_id
                        class="input input-bordered"
                    />
                </div>
                <div class="form-control">
                    <label class="label cursor-pointer justify-start gap-3">
                        <input
                            type="checkbox"
                            class="checkbox"
                            prop:checked=state.collapse
                            on:change=move |ev| state.collapse.set(event_target_checked(&ev))
                        />
                        <span class="label-text">"Collapsed by default"</span>
                    </label>
                </div>
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
pub fn MenusPage() -> impl IntoView {
    let auth = use_auth();
    let api = MesaApi::new(auth);
    let ctrl = RwSignal::new(CrudController::<Menu>::new());
    let saving = RwSignal::new(false);

    let load = move || {
        ctrl.update(|c| c.load_started());
        spawn_local(async move {
            let result = api.get_menus().await.map_err(|e| e.message);
            ctrl.update(|c| c.load_finished(result));
        });
    };

    Effect::new(move |_| {
        let session = auth.state.get();
        if !session.is_loading && session.is_authenticated() {
            load();
        }
    });

    let on_save = move |menu: Menu| {
        saving.set(true);
        spawn_local(async move {
            match ctrl.with_untracked(|c| c.editing_id()) {
                Some(id) => match api.update_menu(id, &menu).await {
                    Ok(_) => ctrl.update(|c| c.update_saved(id, menu)),
                    Err(err) => ctrl.update(|c| c.save_failed(err.message)),
                },
                None => match api.create_menu(&menu).await {
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
                <h1 class="text-3xl font-bold mb-2">"Menus"</h1>
                <p class="text-base-content/70">"Manage the menus offered by your restaurant"</p>
            </header>

            <Show when=move || ctrl.with(|c| c.error().is_some())>
                <div role="alert" class="alert alert-error mb-6">
                    <span>{move || ctrl.with(|c| c.error().unwrap_or_default().to_string())}</span>
                </div>
            </Show>

            <Show when=move || ctrl.with(|c| c.mode() == Mode::Edit)>
                <MenuForm ctrl=ctrl on_save=on_save saving=saving />
            </Show>

            <Show when=move || ctrl.with(|c| c.mode() == Mode::List)>
                <div class="mb-6">
                    <button class="btn btn-primary" on:click=move |_| ctrl.update(|c| c.create_new())>
                        "Add menu"
                    </button>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0 overflow-x-auto">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Type"</th>
                                    <th class="hidden md:table-cell">"Sections"</th>
                                    <th class="hidden md:table-cell">"State"</th>
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
                                            "No menus yet. Add one to get started."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || ctrl.with(|c| c.items().to_vec())
                                    key=|m| m.id
                                    children=move |menu| {
                                        let row = menu.clone();
                                        let section_count = menu.sections.sections.len();
                                        view! {
                                            <tr>
                                                <td class="font-bold">{menu.name.clone()}</td>
                                                <td>{menu.menu_type.clone()}</td>
                                                <td class="hidden md:table-cell">{section_count}</td>
                                                <td class="hidden md:table-cell">
                                                    <span class="badge badge-outline">
                                                        {if menu.collapse == 1 { "collapsed" } else { "expanded" }}
                                                    </span>
                                                </td>
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
