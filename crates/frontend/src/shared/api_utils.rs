//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::load_config;

/// Get the base URL for API requests
///
/// Taken from the loaded configuration (already normalised, no trailing
/// `/api`). Empty string means "same origin as the page".
pub fn api_base() -> String {
    match load_config() {
        Ok(config) => config.api.base_url,
        Err(e) => {
            log::warn!("Invalid embedded config, using same-origin API: {}", e);
            String::new()
        }
    }
}

/// Join an API base with a path that starts with "/api/"
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::join_url;
///
/// let url = join_url("https://host.it", "/api/analysis/123/overview");
/// assert_eq!(url, "https://host.it/api/analysis/123/overview");
/// assert_eq!(join_url("", "/api/analysis/123/overview"), "/api/analysis/123/overview");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}{}", base, path)
    }
}
