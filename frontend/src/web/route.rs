//! Route definitions and guard rules - pure domain logic.
//!
//! No DOM or web_sys dependency. The router engine asks `decide` what to do
//! with a route; all redirect rules live here.

use std::fmt::Display;

/// Application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Landing page; forwards to login or dashboard depending on auth.
    #[default]
    Home,
    Login,
    Register,
    Dashboard,
    Restaurants,
    Menus,
    Orders,
    Settings,
    ApiDocs,
    NotFound,
}

impl AppRoute {
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Home,
            "/login" | "/auth/login" => Self::Login,
            "/auth/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/dashboard/restaurants" => Self::Restaurants,
            "/dashboard/menus" => Self::Menus,
            "/dashboard/orders" => Self::Orders,
            "/dashboard/settings" => Self::Settings,
            "/api-docs" => Self::ApiDocs,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/auth/login",
            Self::Register => "/auth/register",
            Self::Dashboard => "/dashboard",
            Self::Restaurants => "/dashboard/restaurants",
            Self::Menus => "/dashboard/menus",
            Self::Orders => "/dashboard/orders",
            Self::Settings => "/dashboard/settings",
            Self::ApiDocs => "/api-docs",
            Self::NotFound => "/404",
        }
    }

    /// Routes under `/dashboard` require an authenticated session.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Restaurants | Self::Menus | Self::Orders | Self::Settings
        )
    }

    /// Auth-only pages an authenticated user is bounced away from.
    ///
    /// Register is deliberately not included: it stays reachable regardless
    /// of auth state.
    pub fn redirects_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// What the session store currently reports to the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// Hydration not finished; nothing protected may render yet.
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// Guard verdict for one (route, auth) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    /// Show the neutral loading view, never protected content.
    Placeholder,
    RedirectTo(AppRoute),
}

/// Core guard rule, re-evaluated on every path or auth change.
pub fn decide(route: AppRoute, status: AuthStatus) -> GuardOutcome {
    match status {
        AuthStatus::Unknown => GuardOutcome::Placeholder,
        AuthStatus::Unauthenticated if route.requires_auth() => {
            GuardOutcome::RedirectTo(AppRoute::Login)
        }
        AuthStatus::Authenticated if route.redirects_when_authenticated() => {
            GuardOutcome::RedirectTo(AppRoute::Dashboard)
        }
        _ => GuardOutcome::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip_through_the_route_enum() {
        for route in [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Dashboard,
            AppRoute::Restaurants,
            AppRoute::Menus,
            AppRoute::Orders,
            AppRoute::Settings,
            AppRoute::ApiDocs,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        // Legacy alias kept from the original navigation surface.
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
    }

    #[test]
    fn unauthenticated_dashboard_access_redirects_to_login() {
        let outcome = decide(
            AppRoute::from_path("/dashboard/orders"),
            AuthStatus::Unauthenticated,
        );
        assert_eq!(outcome, GuardOutcome::RedirectTo(AppRoute::Login));
        assert_eq!(AppRoute::Login.to_path(), "/auth/login");
    }

    #[test]
    fn authenticated_users_leave_the_login_page() {
        let outcome = decide(AppRoute::Login, AuthStatus::Authenticated);
        assert_eq!(outcome, GuardOutcome::RedirectTo(AppRoute::Dashboard));
    }

    #[test]
    fn register_is_reachable_in_every_auth_state() {
        for status in [
            AuthStatus::Authenticated,
            AuthStatus::Unauthenticated,
        ] {
            assert_eq!(decide(AppRoute::Register, status), GuardOutcome::Render);
        }
    }

    #[test]
    fn nothing_protected_renders_while_auth_is_unknown() {
        for route in [AppRoute::Dashboard, AppRoute::Orders, AppRoute::Login] {
            assert_eq!(
                decide(route, AuthStatus::Unknown),
                GuardOutcome::Placeholder
            );
        }
    }

    #[test]
    fn public_routes_render_for_everyone() {
        for status in [AuthStatus::Authenticated, AuthStatus::Unauthenticated] {
            assert_eq!(decide(AppRoute::Home, status), GuardOutcome::Render);
            assert_eq!(decide(AppRoute::ApiDocs, status), GuardOutcome::Render);
        }
    }
}
