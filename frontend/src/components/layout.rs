use crate::auth::{logout, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;

#[component]
fn NavLink(to: AppRoute, label: &'static str) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to.to_path());
    };
    let is_active = move || router.current_route().get() == to;

    view! {
        <li>
            <a
                href=to.to_path()
                class=move || if is_active() { "active" } else { "" }
                on:click=on_click
            >
                {label}
            </a>
        </li>
    }
}

/// Shared chrome for all protected pages: navbar, section links, logout.
#[component]
pub fn DashboardShell(children: Children) -> impl IntoView {
    let auth = use_auth();

    let user_name = move || {
        auth.state
            .get()
            .user()
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "Restaurant".to_string())
    };

    // The router notices the cleared session and redirects to login.
    let on_logout = move |_| logout(&auth);

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-md px-4">
                <div class="flex-1 gap-2">
                    <span class="text-xl font-bold text-primary">"Mesa"</span>
                    <ul class="menu menu-horizontal px-1 hidden md:flex">
                        <NavLink to=AppRoute::Dashboard label="Overview" />
                        <NavLink to=AppRoute::Restaurants label="Restaurants" />
                        <NavLink to=AppRoute::Menus label="Menus" />
                        <NavLink to=AppRoute::Orders label="Orders" />
                        <NavLink to=AppRoute::Settings label="Settings" />
                    </ul>
                </div>
                <div class="flex-none gap-3">
                    <span class="text-sm opacity-70 hidden md:inline">{user_name}</span>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                        "Sign out"
                    </button>
                </div>
            </div>

            <main class="max-w-7xl mx-auto p-4 md:p-8">{children()}</main>
        </div>
    }
}
