//! Router engine over the History API.
//!
//! All `window.history` access is concentrated here. Navigation follows a
//! request -> guard -> load flow; the guard rules themselves live in
//! `web::route`. The auth signal is injected so this module knows nothing
//! about how sessions are stored.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, AuthStatus, GuardOutcome, decide};

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Used for redirects so the denied URL does not pollute the back stack.
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Router service shared through the Leptos context.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    auth_status: Signal<AuthStatus>,
}

impl RouterService {
    fn new(auth_status: Signal<AuthStatus>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            auth_status,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn auth_status(&self) -> Signal<AuthStatus> {
        self.auth_status
    }

    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        let status = self.auth_status.get_untracked();

        match decide(target, status) {
            GuardOutcome::RedirectTo(redirect) => {
                web_sys::console::log_1(
                    &format!("[Router] {} denied, redirecting to {}", target, redirect).into(),
                );
                if use_push {
                    push_history_state(redirect.to_path());
                } else {
                    replace_history_state(redirect.to_path());
                }
                self.set_route.set(redirect);
            }
            // While auth is unknown the outlet shows the placeholder; the
            // auth effect re-runs the guard once hydration finishes.
            GuardOutcome::Render | GuardOutcome::Placeholder => {
                if use_push {
                    push_history_state(target.to_path());
                } else {
                    replace_history_state(target.to_path());
                }
                self.set_route.set(target);
            }
        }
    }

    /// Back/forward buttons go through the same guard as normal navigation.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let auth_status = self.auth_status;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            match decide(target, auth_status.get_untracked()) {
                GuardOutcome::RedirectTo(redirect) => {
                    replace_history_state(redirect.to_path());
                    set_route.set(redirect);
                }
                GuardOutcome::Render | GuardOutcome::Placeholder => set_route.set(target),
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Leak the closure to keep the listener alive.
        closure.forget();
    }

    /// Re-runs the guard whenever the session state changes: login bounces
    /// the user off the login page, logout (including a 401 forced logout)
    /// bounces them off protected pages.
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let auth_status = self.auth_status;

        Effect::new(move |_| {
            let status = auth_status.get();
            if status == AuthStatus::Unknown {
                return;
            }
            let route = current_route.get_untracked();
            if let GuardOutcome::RedirectTo(redirect) = decide(route, status) {
                web_sys::console::log_1(
                    &format!("[Router] auth changed, redirecting to {}", redirect).into(),
                );
                replace_history_state(redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

fn provide_router(auth_status: Signal<AuthStatus>) -> RouterService {
    let router = RouterService::new(auth_status);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI components
// ============================================================================

/// Root router component; provides the service to the whole tree.
#[component]
pub fn Router(
    /// Session state as seen by the guard.
    auth_status: Signal<AuthStatus>,
    children: Children,
) -> impl IntoView {
    provide_router(auth_status);
    children()
}

/// Renders the view for the current route, the hydration placeholder, or
/// nothing at all while a redirect is in flight.
#[component]
pub fn RouterOutlet(
    /// Maps a permitted route to its view.
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        match decide(current, router.auth_status().get()) {
            GuardOutcome::Render => matcher(current),
            GuardOutcome::Placeholder => view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any(),
            // The auth effect issues the actual redirect.
            GuardOutcome::RedirectTo(_) => ().into_any(),
        }
    }
}
