use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

/// Catch-all: greets whatever path was asked for.
pub async fn hello(uri: Uri) -> String {
    let name = uri.path().strip_prefix('/').unwrap_or(uri.path());
    format!("Hello, {name}!\n")
}

/// Acknowledge a POST; any other method is answered with 404.
pub async fn form_ack(method: Method) -> Response {
    if method != Method::POST {
        return (StatusCode::NOT_FOUND, "Method is not POST.\n").into_response();
    }
    "POST request successful\n".into_response()
}
