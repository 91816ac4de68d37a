//! Embedded form pages and their scripts.

use axum::body::Body;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_embed::Embed;
use serde_json::json;

#[derive(Embed)]
#[folder = "assets/"]
struct FormAssets;

const INDEX: &str = "index.html";

/// Map a request path to the embedded file that answers it.
///
/// Page routes drop the `.html` suffix; unknown paths get the wizard.
fn resolve(path: &str) -> Option<String> {
    let path = path.trim_start_matches('/');
    if path == "api" || path.starts_with("api/") {
        return None;
    }
    let candidate = match path {
        "" => INDEX.to_string(),
        "commercial" | "success" | "error" => format!("{path}.html"),
        other => other.to_string(),
    };
    if FormAssets::get(&candidate).is_some() {
        Some(candidate)
    } else {
        Some(INDEX.to_string())
    }
}

pub(crate) async fn static_asset(uri: Uri) -> Response {
    let Some(name) = resolve(uri.path()) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("No route for {}", uri.path()) })),
        )
            .into_response();
    };

    match FormAssets::get(&name) {
        Some(file) => {
            let mime = mime_guess::from_path(&name).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                Body::from(file.data.into_owned()),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "asset bundle missing").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_routes_resolve_to_html_files() {
        assert_eq!(resolve("/").as_deref(), Some("index.html"));
        assert_eq!(resolve("/commercial").as_deref(), Some("commercial.html"));
        assert_eq!(resolve("/success").as_deref(), Some("success.html"));
        assert_eq!(resolve("/wizard.js").as_deref(), Some("wizard.js"));
    }

    #[test]
    fn unknown_pages_fall_back_to_the_wizard() {
        assert_eq!(resolve("/quote/step-3").as_deref(), Some("index.html"));
    }

    #[test]
    fn api_paths_are_never_served_as_pages() {
        assert_eq!(resolve("/api/contact"), None);
        assert_eq!(resolve("/api"), None);
    }
}
