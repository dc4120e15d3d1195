//! Embedded browser page
//!
//! The page and its script are compiled into the binary; `/static/{file}`
//! only knows the files listed in `ASSETS`.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use super::error_response;

const INDEX_HTML: &str = include_str!("../ui/index.html");

/// (file name, content type, body)
const ASSETS: &[(&str, &str, &str)] = &[(
    "app.js",
    "application/javascript; charset=utf-8",
    include_str!("../ui/app.js"),
)];

/// GET /
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/{file}
pub async fn serve_static(Path(file): Path<String>) -> Response {
    match ASSETS.iter().find(|(name, _, _)| *name == file) {
        Some((_, content_type, body)) => {
            ([(header::CONTENT_TYPE, *content_type)], *body).into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, format!("No such asset: {}", file)),
    }
}
