//! API utilities for frontend-backend communication
//!
//! The booking backend serves both the pages and the JSON endpoints, so
//! requests go to the page's own origin.

/// Base URL for API requests, e.g. `"https://bookings.example.org"`.
/// Empty when no window is available; paths then stay relative.
pub fn api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    window.location().origin().unwrap_or_default()
}

/// Full API URL from a path starting with `/api/`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Maps a failed HTTP response to the message shown inline.
pub fn http_error(context: &str, status: u16) -> String {
    match status {
        404 => format!("{}: not found", context),
        401 | 403 => format!("{}: not permitted", context),
        _ => format!("{}: HTTP {}", context, status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error() {
        assert_eq!(http_error("Load materials", 404), "Load materials: not found");
        assert_eq!(http_error("Add authority", 500), "Add authority: HTTP 500");
    }
}
