use crate::api::MesaApi;
use crate::auth::use_auth;
use crate::components::layout::DashboardShell;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mesa_shared::OrderStatus;

/// Landing page of the protected area: headline numbers plus shortcuts.
/// The two collection fetches run concurrently and may land in any order.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let api = MesaApi::new(auth);
    let router = use_router();

    let (menu_count, set_menu_count) = signal(Option::<usize>::None);
    let (order_count, set_order_count) = signal(Option::<usize>::None);
    let (pending_count, set_pending_count) = signal(Option::<usize>::None);
    let (notice, set_notice) = signal(Option::<String>::None);

    Effect::new(move |_| {
        let session = auth.state.get();
        if session.is_loading || !session.is_authenticated() {
            return;
        }

        spawn_local(async move {
            match api.get_menus().await {
                Ok(menus) => set_menu_count.set(Some(menus.len())),
                Err(err) => set_notice.set(Some(err.message)),
            }
        });
        spawn_local(async move {
            match api.get_orders().await {
                Ok(orders) => {
                    let pending = orders
                        .iter()
                        .filter(|o| o.status == OrderStatus::Pending)
                        .count();
                    set_order_count.set(Some(orders.len()));
                    set_pending_count.set(Some(pending));
                }
                Err(err) => set_notice.set(Some(err.message)),
            }
        });
    });

    let stat = move |title: &'static str, value: ReadSignal<Option<usize>>| {
        view! {
            <div class="stat">
                <div class="stat-title">{title}</div>
                <div class="stat-value text-primary">
                    {move || value.get().map(|v| v.to_string()).unwrap_or_else(|| "–".to_string())}
                </div>
            </div>
        }
    };

    let shortcut = move |route: AppRoute, title: &'static str, blurb: &'static str| {
        let on_click = move |ev: leptos::web_sys::MouseEvent| {
            ev.prevent_default();
            router.navigate(route.to_path());
        };
        view! {
            <a href=route.to_path() class="card bg-base-100 shadow-md hover:shadow-xl transition-shadow" on:click=on_click>
                <div class="card-body">
                    <h3 class="card-title">{title}</h3>
                    <p class="text-base-content/70">{blurb}</p>
                </div>
            </a>
        }
    };

    view! {
        <DashboardShell>
            <header class="mb-8">
                <h1 class="text-3xl font-bold mb-2">"Overview"</h1>
                <p class="text-base-content/70">"Everything about your restaurant at a glance"</p>
            </header>

            <Show when=move || notice.get().is_some()>
                <div role="alert" class="alert alert-error mb-6">
                    <span>{move || notice.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100 mb-8">
                {stat("Menus", menu_count)}
                {stat("Orders", order_count)}
                {stat("Pending orders", pending_count)}
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
                {shortcut(AppRoute::Restaurants, "Restaurants", "View and edit restaurant records")}
                {shortcut(AppRoute::Menus, "Menus", "Curate what you serve")}
                {shortcut(AppRoute::Orders, "Orders", "Track and advance incoming orders")}
                {shortcut(AppRoute::Settings, "Settings", "Your restaurant profile")}
            </div>
        </DashboardShell>
    }
}
