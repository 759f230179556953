//! Backend URL selection.

/// Backend used when the viewer runs on a developer machine.
pub const DEV_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Picks the backend base URL from the host the viewer was loaded from.
///
/// Local hosts talk to the dev backend; anything else is same-origin, in
/// which case `origin` is the base (possibly empty for relative URLs).
pub fn backend_base_url(host: &str, origin: &str) -> String {
    match host {
        "localhost" | "127.0.0.1" => DEV_BACKEND_URL.to_string(),
        _ => origin.trim_end_matches('/').to_string(),
    }
}

/// Joins a base URL and an absolute route path.
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
