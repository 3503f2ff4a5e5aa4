//! Persistence for the session token, the only durable client state.

/// The single well-known LocalStorage key the token lives under.
const TOKEN_KEY: &str = "auth_token";

/// Typed store over that one key. Storage API failures (denied access,
/// private browsing) degrade to "no stored token".
pub struct TokenStore;

impl TokenStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// The persisted token, or `None` when nothing is stored or the storage
    /// API is unavailable.
    pub fn load() -> Option<String> {
        Self::storage()?.get_item(TOKEN_KEY).ok()?
    }

    pub fn save(token: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(TOKEN_KEY, token).ok())
            .is_some()
    }

    pub fn clear() -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(TOKEN_KEY).ok())
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sessions restored by older builds must keep working, so the key is
    // part of the persistence contract.
    #[test]
    fn the_token_key_is_stable() {
        assert_eq!(TOKEN_KEY, "auth_token");
    }
}
