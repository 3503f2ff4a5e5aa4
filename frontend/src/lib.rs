//! Mesa Dashboard frontend.
//!
//! Context-driven layering, decoupled through injected signals:
//! - `session` / `auth`: session state machine and its storage glue
//! - `web::route` / `web::router`: guard rules (domain) and History engine
//! - `api`: bearer-authenticated gateway with one normalized error shape
//! - `controller`: list/form state machine behind every CRUD page
//! - `components`: UI layer

mod api;
mod auth;
mod components {
    pub mod dashboard;
    pub mod layout;
    pub mod login;
    pub mod menus;
    pub mod orders;
    pub mod register;
    pub mod restaurants;
    pub mod settings;
}
mod controller;
mod session;
pub(crate) mod web;

use crate::auth::{AuthContext, init_auth, use_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::menus::MenusPage;
use crate::components::orders::OrdersPage;
use crate::components::register::RegisterPage;
use crate::components::restaurants::RestaurantsPage;
use crate::components::settings::SettingsPage;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet, use_router};

/// Maps a permitted route to its page.
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Restaurants => view! { <RestaurantsPage /> }.into_any(),
        AppRoute::Menus => view! { <MenusPage /> }.into_any(),
        AppRoute::Orders => view! { <OrdersPage /> }.into_any(),
        AppRoute::Settings => view! { <SettingsPage /> }.into_any(),
        AppRoute::ApiDocs => view! { <ApiDocsPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

/// Landing page: forwards to the dashboard or the login page once the
/// session state is known.
#[component]
fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    Effect::new(move |_| {
        let session = auth.state.get();
        if session.is_loading {
            return;
        }
        if session.is_authenticated() {
            router.navigate("/dashboard");
        } else {
            router.navigate("/auth/login");
        }
    });

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// Static reference of the REST surface the dashboard talks to.
#[component]
fn ApiDocsPage() -> impl IntoView {
    let endpoint = |method: &'static str, path: &'static str, desc: &'static str| {
        view! {
            <tr>
                <td><span class="badge badge-outline font-mono">{method}</span></td>
                <td class="font-mono text-sm">{path}</td>
                <td class="text-base-content/70">{desc}</td>
            </tr>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-3xl mx-auto card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h1 class="card-title text-2xl">"API reference"</h1>
                    <p class="text-base-content/70">
                        "All routes below the auth endpoints require an "
                        <code>"Authorization: Bearer"</code>
                        " token obtained from login."
                    </p>
                    <table class="table w-full mt-4">
                        <tbody>
                            {endpoint("POST", "/auth/login", "Authenticate a restaurant")}
                            {endpoint("GET", "/restaurants", "List restaurants")}
                            {endpoint("POST", "/restaurants", "Register a restaurant")}
                            {endpoint("PUT", "/restaurants/{id}", "Update a restaurant")}
                            {endpoint("GET", "/restaurants/profile", "Authenticated profile")}
                            {endpoint("GET", "/menus", "List menus")}
                            {endpoint("POST", "/menus", "Create a menu")}
                            {endpoint("PUT", "/menus/{id}", "Update a menu")}
                            {endpoint("GET", "/orders", "List orders")}
                            {endpoint("POST", "/orders", "Create an order")}
                            {endpoint("PUT", "/orders/{id}", "Update an order")}
                            {endpoint("GET", "/addresses", "List addresses")}
                            {endpoint("POST", "/addresses", "Create an address")}
                            {endpoint("PUT", "/addresses/{id}", "Update an address")}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // One session per app instance, injected everywhere via context.
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // Hydrate from the persisted token before the guard decides anything.
    init_auth(&auth_ctx);

    // The router only sees the derived status signal, not the session.
    let auth_status = auth_ctx.auth_status_signal();

    view! {
        <Router auth_status=auth_status>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
