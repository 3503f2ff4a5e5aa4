//! Authentication context - wires the session state machine to the token
//! store and the Leptos signal graph.
//!
//! The router consumes the derived auth-status signal; navigation after
//! login/logout happens there, never here.

use crate::api::MesaApi;
use crate::session::Session;
use crate::web::TokenStore;
use crate::web::route::AuthStatus;
use leptos::prelude::*;
use mesa_shared::protocol::LoginRequest;

/// Read/write signal pair shared through the Leptos context.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<Session>,
    pub set_state: WriteSignal<Session>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(Session::new());
        Self { state, set_state }
    }

    /// Tri-state view of the session for the route guard.
    pub fn auth_status_signal(&self) -> Signal<AuthStatus> {
        let state = self.state;
        Signal::derive(move || {
            let session = state.get();
            if session.is_loading {
                AuthStatus::Unknown
            } else if session.is_authenticated() {
                AuthStatus::Authenticated
            } else {
                AuthStatus::Unauthenticated
            }
        })
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Startup hydration: re-reads the persisted token and trusts it as-is.
/// Runs exactly once, before the guard leaves its unknown state.
pub fn init_auth(ctx: &AuthContext) {
    let stored = TokenStore::load();
    ctx.set_state.update(|session| session.restore(stored));
}

/// Sends the credentials and commits the resulting token to memory and
/// storage. A failure guarantees both stay cleared.
///
/// Concurrent calls are not deduplicated; callers disable the submit control
/// while one is in flight.
pub async fn login(ctx: &AuthContext, credentials: LoginRequest) -> bool {
    let api = MesaApi::new(*ctx);
    match api.login(&credentials).await {
        Ok(response) => {
            TokenStore::save(&response.token);
            ctx.set_state
                .update(|session| session.login_succeeded(response.token, &credentials.username));
            true
        }
        Err(err) => {
            TokenStore::clear();
            ctx.set_state.update(|session| session.login_failed(err.message));
            false
        }
    }
}

/// Clears the persisted and in-memory session. Idempotent; also invoked by
/// the gateway's 401 interceptor. The router redirects to the login page in
/// reaction to the state change.
pub fn logout(ctx: &AuthContext) {
    TokenStore::clear();
    ctx.set_state.update(|session| session.clear());
}
