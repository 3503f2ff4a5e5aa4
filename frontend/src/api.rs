//! API gateway client.
//!
//! Every outbound call attaches the bearer token when the session holds one,
//! and every failure is normalized exactly once into [`ApiError`]; pages
//! never see raw transport errors. A 401 from any endpoint forces a logout
//! (the only error with a state side effect) before the caller gets its
//! `Err`; the router then redirects to the login page.

use crate::auth::{AuthContext, logout};
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use mesa_shared::protocol::{LoginRequest, LoginResponse};
use mesa_shared::{Address, Menu, Order, Restaurant};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Same-origin proxy prefix, as served by the hosting layer.
pub const API_BASE: &str = "/api";

const FALLBACK_MESSAGE: &str = "The request failed. Please try again.";

/// Uniform shape all API failures are converted to at this boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    fn transport(err: gloo_net::Error) -> Self {
        Self {
            message: err.to_string(),
            status: None,
            data: None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Builds the normalized error for a non-2xx response. The server's
/// `{message}` payload is surfaced verbatim when it parses; any JSON body
/// is kept in `data`.
fn normalize_error(status: u16, body: &str) -> ApiError {
    let data: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = data
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

    ApiError {
        message,
        status: Some(status),
        data,
    }
}

/// Classifies a failed response: the normalized error the caller will see,
/// and whether the session must be terminated first. Only a 401 terminates
/// the session; every other status is reported and nothing else changes.
fn classify_failure(status: u16, body: &str) -> (ApiError, bool) {
    (normalize_error(status, body), status == 401)
}

#[derive(Clone, Copy)]
pub struct MesaApi {
    auth: AuthContext,
}

impl MesaApi {
    pub fn new(auth: AuthContext) -> Self {
        Self { auth }
    }

    fn url(path: &str) -> String {
        format!("{API_BASE}{path}")
    }

    /// Bearer header when a token is present; unauthenticated otherwise,
    /// leaving the server as the final arbiter.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let session = self.auth.state.get_untracked();
        match session.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn handle<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if response.ok() {
            return response.json::<T>().await.map_err(ApiError::transport);
        }

        let body = response.text().await.unwrap_or_default();
        let (err, terminate_session) = classify_failure(status, &body);
        if terminate_session {
            // Token cleared first, redirect issued by the router's auth
            // effect, then the caller sees the rejection.
            logout(&self.auth);
        }
        Err(err)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .authorize(Request::get(&Self::url(path)))
            .send()
            .await
            .map_err(ApiError::transport)?;
        self.handle(response).await
    }

    async fn send_json<B, T>(&self, builder: RequestBuilder, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .authorize(builder)
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(ApiError::transport)?
            .send()
            .await
            .map_err(ApiError::transport)?;
        self.handle(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.send_json(Request::post(&Self::url(path)), body).await
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.send_json(Request::put(&Self::url(path)), body).await
    }

    // --- auth ---

    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post("/auth/login", credentials).await
    }

    // --- restaurants ---

    pub async fn get_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        self.get("/restaurants").await
    }

    pub async fn create_restaurant(&self, restaurant: &Restaurant) -> Result<Restaurant, ApiError> {
        self.post("/restaurants", restaurant).await
    }

    pub async fn update_restaurant(
        &self,
        id: i64,
        restaurant: &Restaurant,
    ) -> Result<Restaurant, ApiError> {
        self.put(&format!("/restaurants/{id}"), restaurant).await
    }

    /// Profile of the authenticated restaurant; backs the settings page.
    pub async fn get_restaurant_profile(&self) -> Result<Restaurant, ApiError> {
        self.get("/restaurants/profile").await
    }

    // --- menus ---

    pub async fn get_menus(&self) -> Result<Vec<Menu>, ApiError> {
        self.get("/menus").await
    }

    pub async fn create_menu(&self, menu: &Menu) -> Result<Menu, ApiError> {
        self.post("/menus", menu).await
    }

    pub async fn update_menu(&self, id: i64, menu: &Menu) -> Result<Menu, ApiError> {
        self.put(&format!("/menus/{id}"), menu).await
    }

    // --- orders ---

    pub async fn get_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/orders").await
    }

    pub async fn create_order(&self, order: &Order) -> Result<Order, ApiError> {
        self.post("/orders", order).await
    }

    pub async fn update_order(&self, id: i64, order: &Order) -> Result<Order, ApiError> {
        self.put(&format!("/orders/{id}"), order).await
    }

    // --- addresses ---
    // Part of the API surface; no dashboard page drives these yet.

    #[allow(dead_code)]
    pub async fn get_addresses(&self) -> Result<Vec<Address>, ApiError> {
        self.get("/addresses").await
    }

    #[allow(dead_code)]
    pub async fn create_address(&self, address: &Address) -> Result<Address, ApiError> {
        self.post("/addresses", address).await
    }

    #[allow(dead_code)]
    pub async fn update_address(&self, id: i64, address: &Address) -> Result<Address, ApiError> {
        self.put(&format!("/addresses/{id}"), address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_surfaced_verbatim() {
        let err = normalize_error(400, r#"{"message":"name must not be empty"}"#);
        assert_eq!(err.message, "name must not be empty");
        assert_eq!(err.status, Some(400));
        assert_eq!(err.data.unwrap()["message"], "name must not be empty");
    }

    #[test]
    fn non_json_bodies_fall_back_to_the_generic_message() {
        let err = normalize_error(502, "<html>bad gateway</html>");
        assert_eq!(err.message, FALLBACK_MESSAGE);
        assert_eq!(err.status, Some(502));
        assert_eq!(err.data, None);
    }

    #[test]
    fn json_without_a_message_keeps_the_payload_in_data() {
        let err = normalize_error(403, r#"{"code":"FORBIDDEN"}"#);
        assert_eq!(err.message, FALLBACK_MESSAGE);
        assert_eq!(err.data.unwrap()["code"], "FORBIDDEN");
    }

    #[test]
    fn only_a_401_terminates_the_session() {
        let (err, terminate) = classify_failure(401, r#"{"message":"Token expired"}"#);
        assert!(terminate);
        // The caller still gets the normalized rejection after the logout.
        assert_eq!(err.message, "Token expired");
        assert_eq!(err.status, Some(401));
    }

    #[test]
    fn other_failures_leave_the_session_alone() {
        for status in [400, 403, 404, 422, 500, 502] {
            let (err, terminate) = classify_failure(status, r#"{"message":"rejected"}"#);
            assert!(!terminate, "status {status} must not force a logout");
            assert_eq!(err.status, Some(status));
        }
    }

    #[test]
    fn display_includes_the_status_when_known() {
        let err = normalize_error(404, r#"{"message":"Menu not found"}"#);
        assert_eq!(err.to_string(), "Menu not found (status 404)");

        let transport = ApiError {
            message: "connection refused".to_string(),
            status: None,
            data: None,
        };
        assert_eq!(transport.to_string(), "connection refused");
    }
}
