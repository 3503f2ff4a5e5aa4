//! Native Web API wrappers: token persistence and the History-API router.
//! Kept thin so the domain modules stay free of `web_sys`.

pub mod route;
pub mod router;
mod storage;

pub use storage::TokenStore;
