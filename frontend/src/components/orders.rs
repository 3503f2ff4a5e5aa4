use crate::api::MesaApi;
use crate::auth::use_auth;
use crate::components::layout::DashboardShell;
use crate::controller::{CrudController, Mode};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mesa_shared::{Order, OrderItems, OrderStatus};

fn status_badge_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "badge badge-warning",
        OrderStatus::Accepted => "badge badge-info",
        OrderStatus::Preparing => "badge badge-info badge-outline",
        OrderStatus::Ready => "badge badge-success badge-outline",
        OrderStatus::Delivered => "badge badge-success",
        OrderStatus::Completed => "badge badge-neutral",
        OrderStatus::Cancelled => "badge badge-error",
    }
}

fn format_total(total: f64) -> String {
    format!("${total:.2}")
}

#[derive(Clone, Copy)]
struct OrderFormState {
    restaurant_id: RwSignal<String>,
    customer_id: RwSignal<String>,
    total: RwSignal<String>,
    status: RwSignal<OrderStatus>,
    /// Item lines ride along unchanged; the form does not edit them.
    items: RwSignal<OrderItems>,
}

impl OrderFormState {
    fn from_initial(initial: Option<&Order>) -> Self {
        Self {
            restaurant_id: RwSignal::new(
                initial.map(|o| o.restaurant_id.to_string()).unwrap_or_default(),
            ),
            customer_id: RwSignal::new(
                initial.map(|o| o.customer_id.to_string()).unwrap_or_default(),
            ),
            total: RwSignal::new(initial.map(|o| o.total.to_string()).unwrap_or_default()),
            status: RwSignal::new(initial.map(|o| o.status).unwrap_or_default()),
            items: RwSignal::new(initial.map(|o| o.items.clone()).unwrap_or_default()),
        }
    }

    fn to_order(&self) -> Order {
        Order {
            id: None,
            restaurant_id: self.restaurant_id.get().trim().parse().unwrap_or(0),
            customer_id: self.customer_id.get().trim().parse().unwrap_or(0),
            items: self.items.get(),
            total: self.total.get().trim().parse().unwrap_or(0.0),
            status: self.status.get(),
        }
    }
}

#[component]
fn OrderForm(
    ctrl: RwSignal<CrudController<Order>>,
    #[prop(into)] on_save: Callback<Order>,
    saving: RwSignal<bool>,
) -> impl IntoView {
    let state =
        OrderFormState::from_initial(ctrl.with_untracked(|c| c.selected().cloned()).as_ref());
    let is_update = ctrl.with_untracked(|c| c.editing_id()).is_some();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_save.run(state.to_order());
    };
    let on_cancel = move |_| ctrl.update(|c| c.cancel());
    let on_status_change = move |ev: leptos::web_sys::Event| {
        if let Some(status) = OrderStatus::parse(&event_target_value(&ev)) {
            state.status.set(status);
        }
    };

    let number_field =
        move |id: &'static str, label: &'static str, value: RwSignal<String>| {
            view! {
                <div class="form-control">
                    <label class="label" for=id>
                        <span class="label-text">{label}</span>
                    </label>
                    <input
                        id=id
                        type="number"
                        step="0.01"
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
                <h3 class="card-title">{if is_update { "Edit order" } else { "Add order" }}</h3>
                {number_field("o-restaurant", "Restaurant id", state.restaurant_id)}
                {number_field("o-customer", "Customer id", state.customer_id)}
                {number_field("o-total", "Total", state.total)}
                <div class="form-control">
                    <label class="label" for="o-status">
                        <span class="label-text">"Status"</span>
                    </label>
                    <select id="o-status" class="select select-bordered" on:change=on_status_change>
                        {OrderStatus::ALL
                            .into_iter()
                            .map(|status| {
                                view! {
                                    <option
                                        value=status.as_str()
                                        selected=move || state.status.get() == status
                                    >
                                        {status.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
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

/// Read-only order view with one button per target status. The PUT body is
/// assembled from the locally known record; the button row is disabled
/// while an update is in flight.
#[component]
fn OrderDetail(
    ctrl: RwSignal<CrudController<Order>>,
    #[prop(into)] on_status: Callback<(i64, OrderStatus)>,
    updating: RwSignal<bool>,
) -> impl IntoView {
    let id = ctrl.with_untracked(|c| c.editing_id()).unwrap_or(0);
    // Track the list entry, not the selected copy: after a status change the
    // list holds the latest known record.
    let order = move || ctrl.with(|c| c.items().iter().find(|o| o.id == Some(id)).cloned());

    let on_close = move |_| ctrl.update(|c| c.cancel());

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                {move || order().map(|order| {
                    let item_count: i64 = order.items.items.iter().map(|i| i.quantity).sum();
                    view! {
                        <h3 class="card-title">{format!("Order #{id}")}</h3>
                        <div class="grid grid-cols-2 gap-2 text-sm my-2">
                            <p class="opacity-70">"Customer"</p>
                            <p>{order.customer_id}</p>
                            <p class="opacity-70">"Items"</p>
                            <p>{item_count}</p>
                            <p class="opacity-70">"Total"</p>
                            <p>{format_total(order.total)}</p>
                            <p class="opacity-70">"Status"</p>
                            <p>
                                <span class=status_badge_class(order.status)>
                                    {order.status.label()}
                                </span>
                            </p>
                        </div>
                        <div class="divider my-1">"Move to"</div>
                        <div class="flex flex-wrap gap-2">
                            {OrderStatus::ALL
                                .into_iter()
                                .map(|status| {
                                    let current = order.status;
                                    view! {
                                        <button
                                            class="btn btn-sm btn-outline"
                                            disabled=move || updating.get() || status == current
                                            on:click=move |_| on_status.run((id, status))
                                        >
                                            {status.label()}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })}
                <div class="card-actions justify-end mt-4">
                    <button class="btn btn-ghost" on:click=on_close>"Close"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    let auth = use_auth();
    let api = MesaApi::new(auth);
    let ctrl = RwSignal::new(CrudController::<Order>::new());
    let saving = RwSignal::new(false);
    let updating = RwSignal::new(false);

    let load = move || {
        ctrl.update(|c| c.load_started());
        spawn_local(async move {
            let result = api.get_orders().await.map_err(|e| e.message);
            ctrl.update(|c| c.load_finished(result));
        });
    };

    Effect::new(move |_| {
        let session = auth.state.get();
        if !session.is_loading && session.is_authenticated() {
            load();
        }
    });

    let on_save = move |order: Order| {
        saving.set(true);
        spawn_local(async move {
            match ctrl.with_untracked(|c| c.editing_id()) {
                Some(id) => match api.update_order(id, &order).await {
                    Ok(_) => ctrl.update(|c| c.update_saved(id, order)),
                    Err(err) => ctrl.update(|c| c.save_failed(err.message)),
                },
                None => match api.create_order(&order).await {
                    Ok(created) => ctrl.update(|c| c.create_saved(created)),
                    Err(err) => ctrl.update(|c| c.save_failed(err.message)),
                },
            }
            saving.set(false);
        });
    };

    // Status changes reuse the locally known record; an unknown id is a
    // local error and never reaches the network.
    let on_status = move |(id, status): (i64, OrderStatus)| {
        match ctrl.with_untracked(|c| c.status_payload(id, status)) {
            Err(message) => ctrl.update(|c| c.save_failed(message)),
            Ok(payload) => {
                updating.set(true);
                spawn_local(async move {
                    match api.update_order(id, &payload).await {
                        Ok(_) => ctrl.update(|c| c.status_applied(id, status)),
                        Err(err) => ctrl.update(|c| c.save_failed(err.message)),
                    }
                    updating.set(false);
                });
            }
        }
    };

    let is_empty = move || ctrl.with(|c| c.items().is_empty());
    let is_loading = move || ctrl.with(|c| c.is_loading());

    view! {
        <DashboardShell>
            <header class="mb-8">
                <h1 class="text-3xl font-bold mb-2">"Orders"</h1>
                <p class="text-base-content/70">"Track incoming orders and move them through the kitchen"</p>
            </header>

            <Show when=move || ctrl.with(|c| c.error().is_some())>
                <div role="alert" class="alert alert-error mb-6">
                    <span>{move || ctrl.with(|c| c.error().unwrap_or_default().to_string())}</span>
                </div>
            </Show>

            <Show when=move || ctrl.with(|c| c.mode() == Mode::Edit)>
                <OrderForm ctrl=ctrl on_save=on_save saving=saving />
            </Show>

            <Show when=move || ctrl.with(|c| c.mode() == Mode::Detail)>
                <OrderDetail ctrl=ctrl on_status=on_status updating=updating />
            </Show>

            <Show when=move || ctrl.with(|c| c.mode() == Mode::List)>
                <div class="mb-6">
                    <button class="btn btn-primary" on:click=move |_| ctrl.update(|c| c.create_new())>
                        "Add order"
                    </button>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0 overflow-x-auto">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Order"</th>
                                    <th class="hidden md:table-cell">"Customer"</th>
                                    <th>"Total"</th>
                                    <th>"Status"</th>
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
                                            "No orders yet."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || ctrl.with(|c| c.items().to_vec())
                                    key=|o| o.id
                                    children=move |order| {
                                        let row = order.clone();
                                        let edit_row = order.clone();
                                        let label = order
                                            .id
                                            .map(|id| format!("#{id}"))
                                            .unwrap_or_else(|| "-".to_string());
                                        view! {
                                            <tr>
                                                <td class="font-mono font-bold">{label}</td>
                                                <td class="hidden md:table-cell">{order.customer_id}</td>
                                                <td>{format_total(order.total)}</td>
                                                <td>
                                                    <span class=status_badge_class(order.status)>
                                                        {order.status.label()}
                                                    </span>
                                                </td>
                                                <td class="text-right">
                                                    <button
                                                        class="btn btn-ghost btn-sm"
                                                        on:click=move |_| ctrl.update(|c| c.view_details(&row))
                                                    >
                                                        "Details"
                                                    </button>
                                                    <button
                                                        class="btn btn-ghost btn-sm"
                                                        on:click=move |_| ctrl.update(|c| c.select(&edit_row))
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
