use actix_web::{http::StatusCode, HttpResponse};

use crate::entities::response::GeneralResponse;

/// Maps a mutating operation's result onto HTTP: `on_success` when it
/// succeeded, 404 for a missing target, 400 for anything else.
pub fn general_response(response: GeneralResponse, on_success: StatusCode) -> HttpResponse {
    let status = if response.success {
        on_success
    } else if response.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    HttpResponse::build(status).json(response)
}
